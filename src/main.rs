use clap::Parser;
use tibia_houses::core::ConfigProvider;
use tibia_houses::utils::error::{ErrorSeverity, ScrapeError};
use tibia_houses::utils::{logger, validation::Validate};
use tibia_houses::{CliConfig, EtlEngine, HousePipeline, LocalStorage, TomlConfig};

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<String, ScrapeError> {
    config.validate()?;

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = HousePipeline::new(storage, config)?;
    EtlEngine::new(pipeline).run().await
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting tibia-houses");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let outcome = match config.config.as_deref() {
        Some(path) => {
            tracing::info!("Loading settings from {}", path);
            match TomlConfig::from_file(path) {
                Ok(file_config) => run(file_config).await,
                Err(e) => Err(e),
            }
        }
        None => run(config).await,
    };

    match outcome {
        Ok(output_path) => {
            println!("Houses saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "Scrape failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());

            std::process::exit(exit_code(e.severity()));
        }
    }

    Ok(())
}
