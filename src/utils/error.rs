use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Catalog page unavailable, status code: {status}")]
    CatalogUnavailable { status: u16 },

    #[error("Expected element not found: {element}")]
    MissingElement { element: &'static str },

    #[error("No cities found on the catalog page")]
    EmptyCityList,

    #[error("No servers found on the catalog page")]
    EmptyServerList,

    #[error("Results header is not of the form '... <city> of <server>': {header:?}")]
    MalformedHeader { header: String },

    #[error("House row {row} has a size cell but is missing {missing}")]
    MalformedHouseRow { row: usize, missing: &'static str },

    #[error("Failed to fetch houses for {city} of {server}, status code: {status}")]
    CombinationFetchFailed {
        server: String,
        city: String,
        status: u16,
    },

    #[error("Requested {requested} but the page rendered {echoed}")]
    CombinationMismatch { requested: String, echoed: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Markup,
    Export,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::Http(_)
            | ScrapeError::CatalogUnavailable { .. }
            | ScrapeError::CombinationFetchFailed { .. } => ErrorCategory::Network,
            ScrapeError::MissingElement { .. }
            | ScrapeError::EmptyCityList
            | ScrapeError::EmptyServerList
            | ScrapeError::MalformedHeader { .. }
            | ScrapeError::MalformedHouseRow { .. }
            | ScrapeError::CombinationMismatch { .. } => ErrorCategory::Markup,
            ScrapeError::Csv(_) | ScrapeError::Io(_) | ScrapeError::Serialization(_) => {
                ErrorCategory::Export
            }
            ScrapeError::ConfigError { .. } | ScrapeError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // The site may simply be throttling us; running again later can work.
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Markup => ErrorSeverity::High,
            ErrorCategory::Export => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    /// Every variant aborts the run. 403 responses never become an error.
    pub fn is_fatal(&self) -> bool {
        true
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download the house listings: {}", self),
            ErrorCategory::Markup => format!("The house pages did not look as expected: {}", self),
            ErrorCategory::Export => format!("Could not write the output file: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScrapeError::Http(_) => "Check your network connection and try again",
            ScrapeError::CatalogUnavailable { .. } | ScrapeError::CombinationFetchFailed { .. } => {
                "The site may be rate limiting; lower --concurrent-requests and retry later"
            }
            ScrapeError::MissingElement { .. }
            | ScrapeError::EmptyCityList
            | ScrapeError::EmptyServerList
            | ScrapeError::MalformedHeader { .. }
            | ScrapeError::MalformedHouseRow { .. } => {
                "The page layout has probably changed; the selectors in src/parse need updating"
            }
            ScrapeError::CombinationMismatch { .. } => {
                "Run without --fail-on-mismatch to keep the records and inspect the warnings"
            }
            ScrapeError::Csv(_) | ScrapeError::Io(_) | ScrapeError::Serialization(_) => {
                "Make sure the output directory exists and is writable"
            }
            ScrapeError::ConfigError { .. } | ScrapeError::InvalidConfigValueError { .. } => {
                "Run with --help to see the accepted values"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
