use crate::core::collapse::collapse_repeats;
use crate::core::columns::ColumnMapping;
use crate::core::flatten::flatten;
use crate::core::reader::read_table_with_fallback;
use crate::core::writer::to_delimited_bytes;
use crate::core::{ConfigProvider, Pipeline, RawTable, Storage, TransformResult};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Semicolon variant, Excel-friendly for locales where ',' is the decimal
/// separator.
pub const OUTPUT_SEMICOLON: &str = "manual_test_steps_numbered_utf8.csv";
/// Comma variant for everything else. Identical row content.
pub const OUTPUT_COMMA: &str = "manual_test_steps_numbered_utf8_comma.csv";
/// Optional archive holding both variants.
pub const OUTPUT_BUNDLE: &str = "manual_test_steps_bundle.zip";

/// Columns blanked on repeated rows when collapsing is enabled.
const COLLAPSE_COLUMNS: [&str; 2] = ["Issue key", "Summary"];

pub struct FlattenPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> FlattenPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for FlattenPipeline<S, C> {
    async fn extract(&self) -> Result<RawTable> {
        tracing::debug!("Reading input from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;

        let table = read_table_with_fallback(&data, self.config.delimiter())?;
        tracing::info!(
            "Loaded {} rows, {} columns",
            table.rows.len(),
            table.columns.len()
        );
        Ok(table)
    }

    async fn transform(&self, table: RawTable) -> Result<TransformResult> {
        let labels = self.config.labels();
        let resolved = ColumnMapping::resolve(&table.columns, &labels).require(&labels)?;
        tracing::debug!(
            "Resolved columns - steps: '{}', key: '{}', summary: '{}'",
            resolved.steps,
            resolved.key,
            resolved.summary
        );

        let mut flat = flatten(&table, &resolved);

        if self.config.collapse_repeats() {
            collapse_repeats(&mut flat, "Issue key", &COLLAPSE_COLUMNS);
        }

        let case_count = flat.case_count();
        let step_count = flat.step_count();
        tracing::info!(
            "Flattened into {} rows ({} cases, {} steps)",
            flat.rows.len(),
            case_count,
            step_count
        );

        Ok(TransformResult {
            flat,
            resolved,
            case_count,
            step_count,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let semicolon = to_delimited_bytes(&result.flat, b';')?;
        let comma = to_delimited_bytes(&result.flat, b',')?;

        let out_dir = self.config.output_path();
        let semicolon_path = format!("{}/{}", out_dir, OUTPUT_SEMICOLON);
        self.storage.write_file(&semicolon_path, &semicolon).await?;
        self.storage
            .write_file(&format!("{}/{}", out_dir, OUTPUT_COMMA), &comma)
            .await?;

        if self.config.bundle_zip() {
            tracing::debug!("Bundling both CSV variants into {}", OUTPUT_BUNDLE);
            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                zip.start_file::<_, ()>(OUTPUT_SEMICOLON, FileOptions::default())?;
                zip.write_all(&semicolon)?;

                zip.start_file::<_, ()>(OUTPUT_COMMA, FileOptions::default())?;
                zip.write_all(&comma)?;

                let cursor = zip.finish()?;
                cursor.into_inner()
            };
            self.storage
                .write_file(&format!("{}/{}", out_dir, OUTPUT_BUNDLE), &zip_data)
                .await?;
        }

        Ok(semicolon_path)
    }
}
