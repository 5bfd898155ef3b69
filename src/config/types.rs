use crate::extract::AddressField;
use crate::url::DEFAULT_PROBE_PATHS;
use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure for Address-Trawl
///
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Per-field selector overrides, keyed by field (`city`, `road-number`, ...)
    #[serde(default)]
    pub selectors: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Resolves the `[selectors]` table into per-field overrides
    pub fn selector_overrides(&self) -> ConfigResult<BTreeMap<AddressField, Vec<String>>> {
        self.selectors
            .iter()
            .map(|(key, patterns)| {
                AddressField::from_key(key)
                    .map(|field| (field, patterns.clone()))
                    .ok_or_else(|| {
                        ConfigError::InvalidSelector(format!("Unknown address field '{}'", key))
                    })
            })
            .collect()
    }
}

/// HTTP behavior shared by every probe
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum redirects followed per request; 0 disables following
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_redirects: 10,
            user_agent: format!("address-trawl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Which pages of a site are probed
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Relative page paths in probe order
    pub paths: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            paths: DEFAULT_PROBE_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Batch sizing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Number of sites processed concurrently
    pub workers: usize,

    /// Only process the first N domains of the input
    pub limit: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            limit: None,
        }
    }
}

/// Where the domain list comes from
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the domain list (`.csv` or `.txt`)
    pub path: Option<PathBuf>,

    /// CSV column holding the domains
    #[serde(rename = "domain-column")]
    pub domain_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: None,
            domain_column: "domain".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the address table (CSV)
    #[serde(rename = "addresses-path")]
    pub addresses_path: String,

    /// Path to the error table (CSV)
    #[serde(rename = "errors-path")]
    pub errors_path: String,

    /// Path to the markdown run summary, if one should be written
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            addresses_path: "addresses.csv".to_string(),
            errors_path: "errors.csv".to_string(),
            summary_path: None,
        }
    }
}
