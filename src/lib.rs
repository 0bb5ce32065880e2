pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use core::{etl::FlattenEngine, pipeline::FlattenPipeline};
pub use domain::model::RunReport;
pub use utils::error::{FlattenError, Result};
