#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use xray_flatten::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use xray_flatten::core::{etl::FlattenEngine, pipeline::FlattenPipeline};
#[cfg(feature = "lambda")]
use xray_flatten::RunReport;

/// Upload-and-report request: the uploaded CSV sits in S3; the response
/// carries the machine-readable run summary.
#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub s3_bucket: Option<String>,
    pub s3_prefix: Option<String>,
    pub input_key: Option<String>,
    pub collapse_repeats: Option<bool>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub message: String,
    pub report: RunReport,
    pub timestamp: String,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Starting flatten Lambda function");

    // Event fields override the environment.
    if let Some(bucket) = &event.payload.s3_bucket {
        std::env::set_var("S3_BUCKET", bucket);
    }
    if let Some(prefix) = &event.payload.s3_prefix {
        std::env::set_var("S3_PREFIX", prefix);
    }
    if let Some(key) = &event.payload.input_key {
        std::env::set_var("INPUT_KEY", key);
    }
    if let Some(collapse) = event.payload.collapse_repeats {
        std::env::set_var("COLLAPSE_REPEATS", collapse.to_string());
    }

    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    let storage = S3Storage::new(s3_client, lambda_config.s3_bucket.clone());
    let pipeline = FlattenPipeline::new(storage, lambda_config);

    let engine = FlattenEngine::new(pipeline);
    let report = engine
        .run()
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    tracing::info!("Flatten Lambda function completed successfully");
    Ok(Response {
        message: "Flatten process completed successfully".to_string(),
        report,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    xray_flatten::utils::logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
