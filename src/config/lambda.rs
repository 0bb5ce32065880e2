use crate::core::{ConfigProvider, Storage};
use crate::domain::model::ColumnLabels;
use crate::utils::error::{FlattenError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use aws_sdk_s3::Client as S3Client;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub s3_region: String,
    pub input_key: String,
    pub delimiter: u8,
    pub collapse_repeats: bool,
    pub bundle: bool,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            s3_bucket: env::var("S3_BUCKET").map_err(|_| FlattenError::ConfigError {
                message: "S3_BUCKET environment variable is required".to_string(),
            })?,
            s3_prefix: env::var("S3_PREFIX").unwrap_or_else(|_| "flatten-output".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "eu-central-1".to_string()),
            input_key: env::var("INPUT_KEY").map_err(|_| FlattenError::ConfigError {
                message: "INPUT_KEY environment variable is required".to_string(),
            })?,
            delimiter: env::var("DELIMITER")
                .ok()
                .and_then(|d| d.bytes().next())
                .unwrap_or(b';'),
            collapse_repeats: env::var("COLLAPSE_REPEATS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            bundle: env::var("BUNDLE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn input_path(&self) -> &str {
        &self.input_key
    }

    fn output_path(&self) -> &str {
        &self.s3_prefix
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn collapse_repeats(&self) -> bool {
        self.collapse_repeats
    }

    fn bundle_zip(&self) -> bool {
        self.bundle
    }

    fn labels(&self) -> ColumnLabels {
        ColumnLabels::default()
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validate_non_empty_string("s3_prefix", &self.s3_prefix)?;
        validate_aws_region("s3_region", &self.s3_region)?;
        validate_non_empty_string("input_key", &self.input_key)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(FlattenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(FlattenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(FlattenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(FlattenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| FlattenError::StorageError {
                message: format!("Failed to read s3://{}/{}: {}", self.bucket, path, e),
            })?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| FlattenError::StorageError {
                message: format!("Failed to collect S3 body for {}: {}", path, e),
            })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| FlattenError::StorageError {
                message: format!("Failed to write s3://{}/{}: {}", self.bucket, path, e),
            })?;

        Ok(())
    }
}
