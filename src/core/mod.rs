pub mod collapse;
pub mod columns;
pub mod etl;
pub mod flatten;
pub mod pipeline;
pub mod reader;
pub mod steps;
pub mod writer;

pub use crate::domain::model::{
    ColumnLabels, FlatRow, FlatTable, RawRecord, RawTable, ResolvedColumns, RunReport, StepRecord,
    TransformResult, OUTPUT_COLUMNS,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
