use crate::domain::model::{FlatTable, OUTPUT_COLUMNS};
use crate::utils::error::{FlattenError, Result};

/// Every produced file starts with this so spreadsheet tools detect UTF-8.
pub const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Render the flat table as delimited text, header included, prefixed with
/// the UTF-8 byte-order mark.
pub fn to_delimited_bytes(table: &FlatTable, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_COLUMNS)?;
    for row in &table.rows {
        writer.write_record(row.to_record())?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| FlattenError::ProcessingError {
            message: format!("Failed to flush CSV writer: {}", e),
        })?;

    let mut out = Vec::with_capacity(UTF8_BOM.len() + body.len());
    out.extend_from_slice(UTF8_BOM);
    out.extend_from_slice(&body);
    Ok(out)
}
