pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod export;
pub mod parse;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{etl::EtlEngine, pipeline::HousePipeline, scraper::HouseScraper};
pub use domain::model::{HouseRecord, ScrapeReport};
pub use utils::error::{Result, ScrapeError};
