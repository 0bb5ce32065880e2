use crate::domain::model::{ColumnLabels, RawTable, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    /// Field delimiter of the input file. Output always produces both the
    /// semicolon and comma variants.
    fn delimiter(&self) -> u8;
    /// Show issue key and summary only on the first row of each case.
    fn collapse_repeats(&self) -> bool;
    /// Bundle both output variants into a single zip archive.
    fn bundle_zip(&self) -> bool;
    fn labels(&self) -> ColumnLabels;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RawTable>;
    async fn transform(&self, table: RawTable) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
