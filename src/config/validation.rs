use crate::config::types::{BatchConfig, Config, FetcherConfig, InputConfig, OutputConfig, ProbeConfig};
use crate::extract::RuleSet;
use crate::url::is_relative_probe_path;
use crate::ConfigError;

/// Upper bound for the per-request timeout, in seconds
const MAX_TIMEOUT_SECS: u64 = 300;

/// Upper bound for concurrent sites
const MAX_WORKERS: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_probe_config(&config.probe)?;
    validate_batch_config(&config.batch)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    validate_selectors(config)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if !config.user_agent.is_ascii() || config.user_agent.chars().any(|c| c.is_ascii_control()) {
        return Err(ConfigError::Validation(format!(
            "user-agent must be printable ASCII, got '{}'",
            config.user_agent
        )));
    }

    Ok(())
}

/// Validates the probe path list
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.paths.is_empty() {
        return Err(ConfigError::Validation(
            "probe paths must contain at least one path".to_string(),
        ));
    }

    for path in &config.paths {
        if !is_relative_probe_path(path) {
            return Err(ConfigError::InvalidPath(format!(
                "'{}' must be a non-empty path relative to the site root",
                path
            )));
        }
    }

    Ok(())
}

/// Validates batch sizing
fn validate_batch_config(config: &BatchConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.limit == Some(0) {
        return Err(ConfigError::Validation(
            "limit must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates input configuration
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.domain_column.trim().is_empty() {
        return Err(ConfigError::Validation(
            "domain-column cannot be empty".to_string(),
        ));
    }

    if let Some(path) = &config.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "input path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.addresses_path.is_empty() {
        return Err(ConfigError::Validation(
            "addresses-path cannot be empty".to_string(),
        ));
    }

    if config.errors_path.is_empty() {
        return Err(ConfigError::Validation(
            "errors-path cannot be empty".to_string(),
        ));
    }

    if config.addresses_path == config.errors_path {
        return Err(ConfigError::Validation(format!(
            "addresses-path and errors-path must differ, both are '{}'",
            config.addresses_path
        )));
    }

    if config.summary_path.as_deref() == Some("") {
        return Err(ConfigError::Validation(
            "summary-path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates selector overrides: known field names, non-empty lists, and
/// selectors that compile
fn validate_selectors(config: &Config) -> Result<(), ConfigError> {
    let overrides = config.selector_overrides()?;

    for (field, patterns) in &overrides {
        if patterns.is_empty() {
            return Err(ConfigError::InvalidSelector(format!(
                "selector list for '{}' cannot be empty",
                field
            )));
        }
    }

    RuleSet::with_overrides(&overrides)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(e.to_string()))
}
