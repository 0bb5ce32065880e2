use crate::core::steps::parse_steps_cell;
use crate::domain::model::{FlatRow, FlatTable, RawTable, ResolvedColumns};
use std::collections::HashMap;

/// Flatten one table: one output row per parsed step, or exactly one
/// placeholder row for records whose steps cell yields nothing. Records are
/// never dropped. Key and summary cells are copied verbatim.
pub fn flatten(table: &RawTable, columns: &ResolvedColumns) -> FlatTable {
    let mut rows = Vec::with_capacity(table.rows.len());

    for record in &table.rows {
        let issue_key = record.get(&columns.key).unwrap_or("").to_string();
        let summary = record.get(&columns.summary).unwrap_or("").to_string();
        let steps = parse_steps_cell(record.get(&columns.steps));

        if steps.is_empty() {
            rows.push(FlatRow {
                case_number: None,
                issue_key,
                summary,
                step_number: None,
                action: String::new(),
                data: String::new(),
                expected_result: String::new(),
            });
        } else {
            for step in steps {
                rows.push(FlatRow {
                    case_number: None,
                    issue_key: issue_key.clone(),
                    summary: summary.clone(),
                    step_number: step.step_number,
                    action: step.action,
                    data: step.data,
                    expected_result: step.expected_result,
                });
            }
        }
    }

    assign_case_numbers(&mut rows);
    FlatTable { rows }
}

/// Scan the emitted rows in order and map the i-th distinct non-empty issue
/// key to case number i (1-based). Rows with an empty key keep a blank case
/// number.
fn assign_case_numbers(rows: &mut [FlatRow]) {
    let mut case_numbers: HashMap<String, u32> = HashMap::new();
    let mut next = 1u32;

    for row in rows {
        if row.issue_key.is_empty() {
            continue;
        }
        let number = *case_numbers.entry(row.issue_key.clone()).or_insert_with(|| {
            let n = next;
            next += 1;
            n
        });
        row.case_number = Some(number);
    }
}
