use crate::core::ConfigProvider;
use crate::domain::model::ColumnLabels;
use crate::utils::error::{FlattenError, Result};
use crate::utils::validation::{validate_delimiter, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A run profile loaded from a TOML file, for exports that need non-default
/// column labels or delimiters (different tracker locales name the columns
/// differently).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub transform: Option<TransformConfig>,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: String,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    pub collapse_repeats: Option<bool>,
    pub labels: Option<ColumnLabels>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub bundle: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FlattenError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FlattenError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replace `${VAR_NAME}` occurrences with environment values. Unset variables
/// are left as-is so validation reports them with context.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.input_path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn delimiter(&self) -> u8 {
        self.source
            .delimiter
            .as_deref()
            .and_then(|d| d.bytes().next())
            .unwrap_or(b';')
    }

    fn collapse_repeats(&self) -> bool {
        self.transform
            .as_ref()
            .and_then(|t| t.collapse_repeats)
            .unwrap_or(true)
    }

    fn bundle_zip(&self) -> bool {
        self.load.bundle.unwrap_or(false)
    }

    fn labels(&self) -> ColumnLabels {
        self.transform
            .as_ref()
            .and_then(|t| t.labels.clone())
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source.input_path", &self.source.input_path)?;
        validate_path("load.output_path", &self.load.output_path)?;
        if let Some(delimiter) = &self.source.delimiter {
            validate_delimiter("source.delimiter", delimiter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_profile() {
        let toml_content = r#"
[pipeline]
name = "regression-export"

[source]
input_path = "./export.csv"
delimiter = ";"

[transform]
collapse_repeats = false

[load]
output_path = "./out"
bundle = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "regression-export");
        assert_eq!(config.input_path(), "./export.csv");
        assert_eq!(config.delimiter(), b';');
        assert!(!config.collapse_repeats());
        assert!(config.bundle_zip());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_are_minimal() {
        let toml_content = r#"
[pipeline]
name = "minimal"

[source]
input_path = "export.csv"

[load]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.delimiter(), b';');
        assert!(config.collapse_repeats());
        assert!(!config.bundle_zip());
        assert_eq!(config.labels().steps, "Manual Test Steps");
    }

    #[test]
    fn test_custom_labels() {
        let toml_content = r#"
[pipeline]
name = "localized"

[source]
input_path = "export.csv"

[transform.labels]
steps = "Testschritte"
summary = "Titel"

[load]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let labels = config.labels();
        assert_eq!(labels.steps, "Testschritte");
        assert_eq!(labels.summary, "Titel");
        // Unset label fields keep their defaults.
        assert_eq!(labels.key, "Issue key");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("XRAY_TEST_INPUT", "/data/export.csv");

        let toml_content = r#"
[pipeline]
name = "env"

[source]
input_path = "${XRAY_TEST_INPUT}"

[load]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input_path(), "/data/export.csv");

        std::env::remove_var("XRAY_TEST_INPUT");
    }

    #[test]
    fn test_invalid_delimiter_fails_validation() {
        let toml_content = r#"
[pipeline]
name = "bad"

[source]
input_path = "export.csv"
delimiter = "abc"

[load]
output_path = "./out"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pipeline]
name = "file-test"

[source]
input_path = "export.csv"

[load]
output_path = "./out"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "file-test");
    }
}
