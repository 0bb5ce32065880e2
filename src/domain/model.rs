use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Output column order. Fixed regardless of how the input columns were named.
pub const OUTPUT_COLUMNS: [&str; 7] = [
    "Case #",
    "Issue key",
    "Summary",
    "Step #",
    "Action",
    "Data",
    "Expected Result",
];

/// One input row: column name → cell value. A cell is `None` when the row was
/// shorter than the header, `Some("")` when the cell was present but empty.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub cells: HashMap<String, Option<String>>,
}

impl RawRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|v| v.as_deref())
    }
}

/// A parsed input table, headers in original order.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRecord>,
}

/// One test step parsed out of a steps cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step_number: Option<i64>,
    pub action: String,
    pub data: String,
    pub expected_result: String,
}

/// One output row. `case_number` is blank for rows whose issue key is empty;
/// every row sharing a non-empty key shares the same number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    pub case_number: Option<u32>,
    pub issue_key: String,
    pub summary: String,
    pub step_number: Option<i64>,
    pub action: String,
    pub data: String,
    pub expected_result: String,
}

impl FlatRow {
    /// Render the row in `OUTPUT_COLUMNS` order. Absent numbers serialize as
    /// empty fields.
    pub fn to_record(&self) -> [String; 7] {
        [
            self.case_number.map(|n| n.to_string()).unwrap_or_default(),
            self.issue_key.clone(),
            self.summary.clone(),
            self.step_number.map(|n| n.to_string()).unwrap_or_default(),
            self.action.clone(),
            self.data.clone(),
            self.expected_result.clone(),
        ]
    }

    /// Value of a named output column, `None` for unknown column names.
    pub fn column_value(&self, column: &str) -> Option<String> {
        let idx = OUTPUT_COLUMNS.iter().position(|c| *c == column)?;
        Some(self.to_record()[idx].clone())
    }

    /// Blank a named output column. Returns false for unknown column names.
    pub fn blank_column(&mut self, column: &str) -> bool {
        match column {
            "Case #" => self.case_number = None,
            "Issue key" => self.issue_key.clear(),
            "Summary" => self.summary.clear(),
            "Step #" => self.step_number = None,
            "Action" => self.action.clear(),
            "Data" => self.data.clear(),
            "Expected Result" => self.expected_result.clear(),
            _ => return false,
        }
        true
    }
}

/// The flattened output table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatTable {
    pub rows: Vec<FlatRow>,
}

impl FlatTable {
    pub fn has_column(column: &str) -> bool {
        OUTPUT_COLUMNS.contains(&column)
    }

    /// Number of distinct cases, i.e. the highest assigned case number.
    pub fn case_count(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|r| r.case_number)
            .max()
            .unwrap_or(0) as usize
    }

    /// Number of rows carrying an actual step (placeholder rows excluded).
    pub fn step_count(&self) -> usize {
        self.rows.iter().filter(|r| r.step_number.is_some()).count()
    }
}

/// Recognized column-name labels. Matching is case-insensitive substring
/// containment; these are the needles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    pub steps: String,
    pub key: String,
    pub key_fallback: String,
    pub summary: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            steps: "Manual Test Steps".to_string(),
            key: "Issue key".to_string(),
            key_fallback: "Key".to_string(),
            summary: "Summary".to_string(),
        }
    }
}

/// Concrete input column names after resolution succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub steps: String,
    pub key: String,
    pub summary: String,
}

/// Result of the transform phase, handed to the load phase.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub flat: FlatTable,
    pub resolved: ResolvedColumns,
    pub case_count: usize,
    pub step_count: usize,
}

/// Machine-readable summary of one full run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub input_rows: usize,
    pub input_columns: usize,
    pub output_rows: usize,
    pub case_count: usize,
    pub step_count: usize,
    pub output_path: String,
}
