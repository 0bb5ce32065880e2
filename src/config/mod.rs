#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::ColumnLabels;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_delimiter, validate_file_extension, validate_non_empty_string, validate_path,
    validate_required_field, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "xray-flatten")]
#[command(about = "Flatten Jira/Xray manual test step CSV exports into one row per step")]
pub struct CliConfig {
    /// CSV export to flatten. Not needed when --profile is given.
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Input field delimiter. Jira exports default to ';'.
    #[arg(long, default_value = ";")]
    pub delimiter: String,

    /// Repeat issue key and summary on every row instead of only the first
    /// row of each case.
    #[arg(long)]
    pub no_collapse: bool,

    /// Also bundle both CSV variants into a zip archive.
    #[arg(long)]
    pub bundle: bool,

    /// Run from a TOML profile instead of CLI flags.
    #[arg(long)]
    pub profile: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process resource usage per phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        self.input.as_deref().unwrap_or("")
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn delimiter(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b';')
    }

    fn collapse_repeats(&self) -> bool {
        !self.no_collapse
    }

    fn bundle_zip(&self) -> bool {
        self.bundle
    }

    fn labels(&self) -> ColumnLabels {
        ColumnLabels::default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.profile.is_none() {
            let input = validate_required_field("input", &self.input)?;
            validate_non_empty_string("input", input)?;
            validate_file_extension("input", input, &["csv", "txt"])?;
        }
        validate_path("output_path", &self.output_path)?;
        validate_delimiter("delimiter", &self.delimiter)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            input: Some("export.csv".to_string()),
            output_path: "./output".to_string(),
            delimiter: ";".to_string(),
            no_collapse: false,
            bundle: false,
            profile: None,
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn missing_input_without_profile_fails() {
        let mut config = base_config();
        config.input = None;
        assert!(config.validate().is_err());

        config.profile = Some("run.toml".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_delimiter_fails() {
        let mut config = base_config();
        config.delimiter = ";;".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn collapse_defaults_on() {
        let config = base_config();
        assert!(config.collapse_repeats());
        assert_eq!(config.delimiter(), b';');
    }
}
