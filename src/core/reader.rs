use crate::domain::model::{RawRecord, RawTable};
use crate::utils::error::Result;
use std::collections::HashMap;

/// Candidate delimiters for the fallback sniff, in preference order.
const SNIFF_CANDIDATES: [u8; 4] = [b';', b',', b'\t', b'|'];

fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(crate::core::writer::UTF8_BOM).unwrap_or(data)
}

/// Parse delimited bytes into a `RawTable`. Rows shorter than the header get
/// `None` cells for the missing columns; extra cells are dropped. A leading
/// UTF-8 BOM is ignored.
pub fn read_table(data: &[u8], delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(strip_bom(data));

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut cells = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            cells.insert(name.clone(), record.get(i).map(str::to_string));
        }
        rows.push(RawRecord { cells });
    }

    Ok(RawTable { columns, rows })
}

/// Parse with the configured delimiter first. When that fails, or when it
/// produces a single-column table (the usual symptom of a wrong delimiter),
/// retry once with a delimiter sniffed from the header line.
pub fn read_table_with_fallback(data: &[u8], delimiter: u8) -> Result<RawTable> {
    let first = read_table(data, delimiter);
    if let Ok(table) = &first {
        if table.columns.len() > 1 {
            return first;
        }
    }

    if let Some(sniffed) = sniff_delimiter(data) {
        if sniffed != delimiter {
            if let Ok(table) = read_table(data, sniffed) {
                if table.columns.len() > 1 {
                    tracing::warn!(
                        "Input did not split on '{}', fell back to auto-detected '{}'",
                        delimiter as char,
                        sniffed as char
                    );
                    return Ok(table);
                }
            }
        }
    }

    first
}

/// Pick the candidate delimiter occurring most often in the header line.
fn sniff_delimiter(data: &[u8]) -> Option<u8> {
    let data = strip_bom(data);
    let header = data.split(|b| *b == b'\n').next()?;

    SNIFF_CANDIDATES
        .iter()
        .map(|d| (*d, header.iter().filter(|b| **b == *d).count()))
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(delimiter, _)| delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_semicolon_table() {
        let data = b"Issue key;Summary;Steps\nT-1;Login;[]\nT-2;Logout;\n";
        let table = read_table(data, b';').unwrap();
        assert_eq!(table.columns, vec!["Issue key", "Summary", "Steps"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Summary"), Some("Login"));
        assert_eq!(table.rows[1].get("Steps"), Some(""));
    }

    #[test]
    fn short_rows_yield_absent_cells() {
        let data = b"a;b;c\n1;2\n";
        let table = read_table(data, b';').unwrap();
        assert_eq!(table.rows[0].get("b"), Some("2"));
        assert_eq!(table.rows[0].get("c"), None);
    }

    #[test]
    fn leading_bom_is_stripped() {
        let data = b"\xef\xbb\xbfkey;val\nT-1;x\n";
        let table = read_table(data, b';').unwrap();
        assert_eq!(table.columns[0], "key");
    }

    #[test]
    fn quoted_cells_keep_embedded_delimiters() {
        let data = b"key;steps\nT-1;\"[{\"\"index\"\":1}]\"\n";
        let table = read_table(data, b';').unwrap();
        assert_eq!(table.rows[0].get("steps"), Some(r#"[{"index":1}]"#));
    }

    #[test]
    fn fallback_sniffs_comma_separated_input() {
        let data = b"Issue key,Summary,Steps\nT-1,Login,[]\n";
        let table = read_table_with_fallback(data, b';').unwrap();
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.rows[0].get("Issue key"), Some("T-1"));
    }

    #[test]
    fn fallback_keeps_configured_delimiter_when_it_works() {
        // Commas inside a quoted cell must not trick the fallback.
        let data = b"Issue key;Summary\nT-1;\"a, b, c\"\n";
        let table = read_table_with_fallback(data, b';').unwrap();
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.rows[0].get("Summary"), Some("a, b, c"));
    }

    #[test]
    fn single_column_input_stays_single_column() {
        let data = b"only\nvalue\n";
        let table = read_table_with_fallback(data, b';').unwrap();
        assert_eq!(table.columns, vec!["only"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn sniff_prefers_most_frequent_candidate() {
        assert_eq!(sniff_delimiter(b"a,b,c;d\n1,2,3;4"), Some(b','));
        assert_eq!(sniff_delimiter(b"a\tb\tc\n"), Some(b'\t'));
        assert_eq!(sniff_delimiter(b"plain\n"), None);
    }
}
