use crate::config::{
    default_user_agent, validate_provider, DEFAULT_CATALOG_URL, DEFAULT_CONCURRENT_REQUESTS,
    DEFAULT_FILE_STEM, DEFAULT_OUTPUT_FORMAT, DEFAULT_OUTPUT_PATH,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file for scheduled runs. Every section and key is optional.
///
/// ```toml
/// [source]
/// url = "https://www.tibia.com/community/?subtopic=houses"
/// timeout_seconds = 30
///
/// [extract]
/// concurrent_requests = 4
/// fail_on_mismatch = true
///
/// [load]
/// output_path = "${HOME}/houses"
/// output_formats = ["csv", "json"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub extract: ExtractConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    pub user_agent: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            user_agent: default_user_agent(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub concurrent_requests: usize,
    pub fail_on_mismatch: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            fail_on_mismatch: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub file_stem: String,
    pub output_formats: Vec<String>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            output_formats: vec![DEFAULT_OUTPUT_FORMAT.to_string()],
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScrapeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_url(&self) -> &str {
        &self.source.url
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.source.timeout_seconds
    }

    fn concurrent_requests(&self) -> usize {
        self.extract.concurrent_requests
    }

    fn fail_on_mismatch(&self) -> bool {
        self.extract.fail_on_mismatch
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn file_stem(&self) -> &str {
        &self.load.file_stem
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
