use crate::domain::model::StepRecord;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Parse one "Manual Test Steps" cell.
///
/// The expected shape is a JSON array like
/// `[{"index":1,"fields":{"Action":"...","Data":"...","Expected Result":"..."}}, ...]`.
/// A missing, empty or malformed cell yields an empty list, never an error:
/// a batch must not fail because one record has a broken export.
pub fn parse_steps_cell(cell: Option<&str>) -> Vec<StepRecord> {
    let raw = match cell {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Vec::new(),
    };

    // Some exports carry stray whitespace or non-breaking spaces.
    let normalized = raw.trim().replace('\u{00a0}', " ");

    let decoded = match decode_steps_array(&normalized) {
        Some(value) => value,
        None => return Vec::new(),
    };

    match decoded {
        Value::Array(items) => items.iter().map(step_from_item).collect(),
        // A cell that decodes to something other than an array has no steps.
        _ => Vec::new(),
    }
}

/// Two-stage decode: strict JSON first, then a relaxed retry that swaps
/// single quotes for double quotes (some instances export that way).
fn decode_steps_array(s: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(s) {
        return Some(value);
    }
    serde_json::from_str(&s.replace('\'', "\"")).ok()
}

/// Build a StepRecord from one array element. Elements that are not objects,
/// or objects without a `fields` object, degrade to empty defaults.
fn step_from_item(item: &Value) -> StepRecord {
    let fields = item.get("fields").and_then(Value::as_object);
    let field = |name: &str| fields.and_then(|f| f.get(name));

    StepRecord {
        step_number: item.get("index").and_then(Value::as_i64),
        action: clean_text(field("Action")),
        data: clean_text(field("Data")),
        expected_result: clean_text(field("Expected Result")),
    }
}

/// Collapse every whitespace run (including newlines) to a single ASCII space
/// and trim. Non-string values are stringified first; absent or null values
/// become the empty string.
pub fn clean_text(value: Option<&Value>) -> String {
    let s = match value {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    whitespace_re().replace_all(&s, " ").trim().to_string()
}
