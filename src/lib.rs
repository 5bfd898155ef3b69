//! Address-Trawl: bulk postal-address extraction from organization websites
//!
//! This crate probes a fixed list of likely page paths on every input domain,
//! applies heuristic selector rules to each fetched page, and aggregates the
//! per-page results into one record per site.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod input;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Address-Trawl operations
#[derive(Debug, Error)]
pub enum TrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid selector for {field}: {selector}")]
    Selector { field: String, selector: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),

    #[error("Invalid probe path: {0}")]
    InvalidPath(String),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed domain: {0}")]
    Malformed(String),
}

/// Result type alias for Address-Trawl operations
pub type Result<T> = std::result::Result<T, TrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{process_input, process_site, run_batch, BatchReport, ErrorIndicator, SiteResult};
pub use input::SiteInput;
pub use extract::{AddressExtractor, AddressField, PartialAddress};
pub use url::{candidate_urls, Domain};
