//! Output module for writing batch results
//!
//! This module handles:
//! - Flattening site results into address and error rows
//! - Writing both tables as CSV
//! - Computing and printing run statistics
//! - Generating a markdown run summary

mod csv_output;
mod markdown;
mod records;
pub mod stats;
mod traits;

pub use csv_output::CsvOutput;
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use records::{AddressRecord, ErrorRecord};
pub use stats::{print_statistics, BatchStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult, WriteSummary};
