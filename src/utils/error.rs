use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlattenError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Missing required column(s): {}", labels.join(", "))]
    MissingColumnsError { labels: Vec<String> },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Config,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FlattenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::StorageError { .. } | Self::ZipError(_) => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::MissingColumnsError { .. }
            | Self::ProcessingError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingColumnsError { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::StorageError { .. } | Self::ZipError(_) => {
                ErrorSeverity::Critical
            }
            Self::CsvError(_) | Self::SerializationError(_) | Self::ProcessingError { .. } => {
                ErrorSeverity::High
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingColumnsError { .. } => {
                "Re-export from Jira with 'Export → CSV (All fields)' so the \
                 Manual Test Steps, Issue key and Summary columns are present"
                    .to_string()
            }
            Self::CsvError(_) => {
                "Check the input delimiter (the default export uses ';')".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and retry", field)
            }
            Self::MissingConfigError { field } => format!("Provide a value for '{}'", field),
            Self::IoError(_) | Self::StorageError { .. } => {
                "Check that the input file exists and the output path is writable".to_string()
            }
            _ => "Check the logs for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingColumnsError { labels } => {
                format!("The uploaded CSV is missing column(s): {}", labels.join(", "))
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlattenError>;
