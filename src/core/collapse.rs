use crate::domain::model::FlatTable;
use std::collections::HashSet;

/// Blank `columns_to_blank` on every row of a group except the first, where
/// groups are rows sharing the same `group_column` value in first-seen order.
/// Row order and count are never changed; unknown group columns make this a
/// no-op.
///
/// The group value is read from each row before any blanking, so the group
/// column itself may be one of the blanked columns.
pub fn collapse_repeats(table: &mut FlatTable, group_column: &str, columns_to_blank: &[&str]) {
    if table.rows.is_empty() || !FlatTable::has_column(group_column) {
        return;
    }

    let mut seen: HashSet<String> = HashSet::new();
    for row in &mut table.rows {
        let group = row.column_value(group_column).unwrap_or_default();
        if !seen.insert(group) {
            for column in columns_to_blank {
                row.blank_column(column);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FlatRow;

    fn row(key: &str, summary: &str, step: i64) -> FlatRow {
        FlatRow {
            case_number: Some(1),
            issue_key: key.to_string(),
            summary: summary.to_string(),
            step_number: Some(step),
            action: format!("action {step}"),
            data: String::new(),
            expected_result: String::new(),
        }
    }

    #[test]
    fn blanks_repeats_after_first_row_of_group() {
        let mut table = FlatTable {
            rows: vec![row("T-1", "Login", 1), row("T-1", "Login", 2)],
        };
        collapse_repeats(&mut table, "Issue key", &["Issue key", "Summary"]);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].issue_key, "T-1");
        assert_eq!(table.rows[0].summary, "Login");
        assert_eq!(table.rows[1].issue_key, "");
        assert_eq!(table.rows[1].summary, "");
        // Other columns untouched.
        assert_eq!(table.rows[1].action, "action 2");
        assert_eq!(table.rows[1].step_number, Some(2));
    }

    #[test]
    fn grouping_is_by_value_not_contiguity() {
        let mut table = FlatTable {
            rows: vec![
                row("A", "a", 1),
                row("B", "b", 1),
                row("A", "a", 2), // same key as row 0, non-contiguous
            ],
        };
        collapse_repeats(&mut table, "Issue key", &["Issue key", "Summary"]);
        assert_eq!(table.rows[0].issue_key, "A");
        assert_eq!(table.rows[1].issue_key, "B");
        assert_eq!(table.rows[2].issue_key, "");
    }

    #[test]
    fn unknown_group_column_is_a_noop() {
        let mut table = FlatTable {
            rows: vec![row("T-1", "Login", 1), row("T-1", "Login", 2)],
        };
        let before = table.clone();
        collapse_repeats(&mut table, "No such column", &["Summary"]);
        assert_eq!(table, before);
    }

    #[test]
    fn empty_table_is_a_noop() {
        let mut table = FlatTable::default();
        collapse_repeats(&mut table, "Issue key", &["Issue key"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn row_order_is_preserved() {
        let mut table = FlatTable {
            rows: vec![row("B", "b", 1), row("A", "a", 1), row("B", "b", 2)],
        };
        collapse_repeats(&mut table, "Issue key", &["Issue key"]);
        let actions: Vec<&str> = table.rows.iter().map(|r| r.action.as_str()).collect();
        assert_eq!(actions, vec!["action 1", "action 1", "action 2"]);
        assert_eq!(table.rows[1].issue_key, "A");
    }
}
