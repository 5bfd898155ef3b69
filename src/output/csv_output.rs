//! CSV output handler
//!
//! Writes the address and error tables as CSV with a header row. A table
//! with no rows is not written at all, and an existing file at that path is
//! left untouched.

use crate::config::OutputConfig;
use crate::output::records::{AddressRecord, ErrorRecord};
use crate::output::traits::{OutputHandler, OutputResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Writes both result tables to CSV files
#[derive(Debug, Clone)]
pub struct CsvOutput {
    addresses_path: PathBuf,
    errors_path: PathBuf,
}

impl CsvOutput {
    pub fn new(addresses_path: impl Into<PathBuf>, errors_path: impl Into<PathBuf>) -> Self {
        Self {
            addresses_path: addresses_path.into(),
            errors_path: errors_path.into(),
        }
    }

    /// Creates a handler for the paths in the output configuration
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.addresses_path, &config.errors_path)
    }

    pub fn addresses_path(&self) -> &Path {
        &self.addresses_path
    }

    pub fn errors_path(&self) -> &Path {
        &self.errors_path
    }
}

impl OutputHandler for CsvOutput {
    fn write_addresses(&self, records: &[AddressRecord]) -> OutputResult<usize> {
        write_csv(&self.addresses_path, records, "address")
    }

    fn write_errors(&self, records: &[ErrorRecord]) -> OutputResult<usize> {
        write_csv(&self.errors_path, records, "error")
    }
}

/// Serializes `records` to `path`, skipping empty tables
fn write_csv<T: Serialize>(path: &Path, records: &[T], table: &str) -> OutputResult<usize> {
    if records.is_empty() {
        tracing::info!("No {} rows, skipping {}", table, path.display());
        return Ok(0);
    }

    tracing::debug!("Writing {} {} rows to {}", records.len(), table, path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} {} rows to {}", records.len(), table, path.display());
    Ok(records.len())
}
