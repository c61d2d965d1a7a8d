pub mod cli;
pub mod toml_config;

use crate::adapters::http::client::CHROME_USER_AGENT;
use crate::core::ConfigProvider;
use crate::export::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_stem, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url,
};
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATALOG_URL: &str = "https://www.tibia.com/community/?subtopic=houses";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;
pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_FILE_STEM: &str = "houses";
pub const DEFAULT_OUTPUT_FORMAT: &str = "csv";

pub fn default_user_agent() -> String {
    CHROME_USER_AGENT.to_string()
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("catalog_url", config.catalog_url())?;
    validate_non_empty_string("user_agent", config.user_agent())?;
    validate_positive_number("concurrent_requests", config.concurrent_requests(), 1)?;
    if let Some(timeout) = config.timeout_seconds() {
        validate_positive_number("timeout_seconds", timeout as usize, 1)?;
    }
    validate_path("output_path", config.output_path())?;
    validate_file_stem("file_stem", config.file_stem())?;

    if config.output_formats().is_empty() {
        return Err(crate::utils::error::ScrapeError::InvalidConfigValueError {
            field: "output_formats".to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }
    for format in config.output_formats() {
        format.parse::<OutputFormat>()?;
    }

    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tibia-houses")]
#[command(about = "Collects auctioned house listings for every world and town into a CSV file")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_FILE_STEM)]
    pub file_stem: String,

    #[arg(long = "formats", value_delimiter = ',', default_value = DEFAULT_OUTPUT_FORMAT)]
    pub output_formats: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS)]
    pub concurrent_requests: usize,

    #[arg(long, default_value = CHROME_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, help = "Per-request timeout; transport default when unset")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Abort when a results page names a different world or town than requested")]
    pub fail_on_mismatch: bool,

    #[arg(long, help = "Load settings from a TOML file instead of the flags above")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as line-delimited JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            output_formats: vec![DEFAULT_OUTPUT_FORMAT.to_string()],
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            user_agent: default_user_agent(),
            timeout_seconds: None,
            fail_on_mismatch: false,
            config: None,
            verbose: false,
            json_logs: false,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn fail_on_mismatch(&self) -> bool {
        self.fail_on_mismatch
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn file_stem(&self) -> &str {
        &self.file_stem
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
