use crate::domain::model::{ColumnLabels, ResolvedColumns};
use crate::utils::error::{FlattenError, Result};

/// Find the first column whose name contains `label`, case-insensitively.
pub fn find_column<'a>(columns: &'a [String], label: &str) -> Option<&'a str> {
    let needle = label.to_lowercase();
    columns
        .iter()
        .find(|c| c.to_lowercase().contains(&needle))
        .map(String::as_str)
}

/// Best-effort mapping of input columns to the three roles the flattener
/// needs. Each field is `None` when no column matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub steps: Option<String>,
    pub key: Option<String>,
    pub summary: Option<String>,
}

impl ColumnMapping {
    pub fn resolve(columns: &[String], labels: &ColumnLabels) -> Self {
        Self {
            steps: find_column(columns, &labels.steps).map(str::to_string),
            key: find_column(columns, &labels.key)
                .or_else(|| find_column(columns, &labels.key_fallback))
                .map(str::to_string),
            summary: find_column(columns, &labels.summary).map(str::to_string),
        }
    }

    /// All three roles are required before flattening may proceed. The error
    /// lists exactly the labels that could not be resolved.
    pub fn require(self, labels: &ColumnLabels) -> Result<ResolvedColumns> {
        let mut missing = Vec::new();
        if self.steps.is_none() {
            missing.push(labels.steps.clone());
        }
        if self.key.is_none() {
            missing.push(labels.key.clone());
        }
        if self.summary.is_none() {
            missing.push(labels.summary.clone());
        }

        match (self.steps, self.key, self.summary) {
            (Some(steps), Some(key), Some(summary)) => Ok(ResolvedColumns { steps, key, summary }),
            _ => Err(FlattenError::MissingColumnsError { labels: missing }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_jira_export_columns() {
        let columns = cols(&[
            "Issue key",
            "Issue id",
            "Summary",
            "Custom field (Manual Test Steps)",
        ]);
        let mapping = ColumnMapping::resolve(&columns, &ColumnLabels::default());
        assert_eq!(
            mapping.steps.as_deref(),
            Some("Custom field (Manual Test Steps)")
        );
        assert_eq!(mapping.key.as_deref(), Some("Issue key"));
        assert_eq!(mapping.summary.as_deref(), Some("Summary"));
    }

    #[test]
    fn matching_is_case_insensitive_and_first_wins() {
        let columns = cols(&["SUMMARY (short)", "summary (long)"]);
        assert_eq!(find_column(&columns, "Summary"), Some("SUMMARY (short)"));
        assert_eq!(find_column(&columns, "nope"), None);
    }

    #[test]
    fn key_falls_back_to_plain_key_label() {
        let columns = cols(&["Key", "Summary", "Manual Test Steps"]);
        let mapping = ColumnMapping::resolve(&columns, &ColumnLabels::default());
        assert_eq!(mapping.key.as_deref(), Some("Key"));
    }

    #[test]
    fn require_lists_exactly_the_missing_labels() {
        let columns = cols(&["Issue key"]);
        let labels = ColumnLabels::default();
        let err = ColumnMapping::resolve(&columns, &labels)
            .require(&labels)
            .unwrap_err();
        match err {
            crate::utils::error::FlattenError::MissingColumnsError { labels } => {
                assert_eq!(labels, vec!["Manual Test Steps", "Summary"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn require_succeeds_when_all_resolved() {
        let columns = cols(&["Issue key", "Summary", "Custom field (Manual Test Steps)"]);
        let labels = ColumnLabels::default();
        let resolved = ColumnMapping::resolve(&columns, &labels)
            .require(&labels)
            .unwrap();
        assert_eq!(resolved.key, "Issue key");
    }

    #[test]
    fn custom_labels_override_defaults() {
        let columns = cols(&["Ticket", "Titel", "Testschritte"]);
        let labels = ColumnLabels {
            steps: "Testschritte".to_string(),
            key: "Ticket".to_string(),
            key_fallback: "Key".to_string(),
            summary: "Titel".to_string(),
        };
        let mapping = ColumnMapping::resolve(&columns, &labels);
        assert_eq!(mapping.steps.as_deref(), Some("Testschritte"));
        assert_eq!(mapping.key.as_deref(), Some("Ticket"));
        assert_eq!(mapping.summary.as_deref(), Some("Titel"));
    }
}
