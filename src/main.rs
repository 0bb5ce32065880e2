use clap::Parser;
use xray_flatten::config::toml_config::TomlConfig;
use xray_flatten::core::ConfigProvider;
use xray_flatten::utils::error::ErrorSeverity;
use xray_flatten::utils::{logger, validation::Validate};
use xray_flatten::{CliConfig, FlattenEngine, FlattenPipeline, FlattenError, LocalStorage, RunReport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting xray-flatten CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let profile_path = config.profile.clone();
    let result = if let Some(profile_path) = profile_path {
        tracing::info!("Running with TOML profile: {}", profile_path);
        match TomlConfig::from_file(&profile_path).and_then(|p| {
            p.validate()?;
            Ok(p)
        }) {
            Ok(profile) => run(profile, monitor_enabled).await,
            Err(e) => fail(&e),
        }
    } else {
        run(config, monitor_enabled).await
    };

    match result {
        Ok(report) => {
            tracing::info!("✅ Flatten process completed successfully!");
            tracing::info!(
                "📋 {} input rows → {} output rows ({} cases, {} steps)",
                report.input_rows,
                report.output_rows,
                report.case_count,
                report.step_count
            );
            println!("✅ Flatten process completed successfully!");
            println!("📁 Output saved to: {}", report.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Flatten process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            fail(&e);
        }
    }

    Ok(())
}

async fn run<C: ConfigProvider>(
    config: C,
    monitor_enabled: bool,
) -> Result<RunReport, FlattenError> {
    let storage = LocalStorage::new(".".to_string());
    let pipeline = FlattenPipeline::new(storage, config);
    let engine = FlattenEngine::new_with_monitoring(pipeline, monitor_enabled);
    engine.run().await
}

fn fail(e: &FlattenError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
