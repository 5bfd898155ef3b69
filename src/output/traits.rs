//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! error type shared by every output format.

use crate::crawler::BatchReport;
use crate::output::records::{AddressRecord, ErrorRecord};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// What an output handler wrote for one report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Address rows written (0 if the table was skipped)
    pub address_rows: usize,
    /// Error rows written (0 if the table was skipped)
    pub error_rows: usize,
}

/// Trait for output handlers
///
/// Handlers receive flattened rows once the batch has finished; they never
/// see partial results of a site.
pub trait OutputHandler {
    /// Writes the address table
    ///
    /// # Returns
    ///
    /// The number of rows written
    fn write_addresses(&self, records: &[AddressRecord]) -> OutputResult<usize>;

    /// Writes the error table
    ///
    /// # Returns
    ///
    /// The number of rows written
    fn write_errors(&self, records: &[ErrorRecord]) -> OutputResult<usize>;

    /// Flattens a report and writes both tables
    fn write_report(&self, report: &BatchReport) -> OutputResult<WriteSummary> {
        let address_rows = self.write_addresses(&report.address_records())?;
        let error_rows = self.write_errors(&report.error_records())?;
        Ok(WriteSummary {
            address_rows,
            error_rows,
        })
    }
}
