//! Site list loading
//!
//! Supports:
//! - CSV files with a header row and a domain column (other columns ignored)
//! - Parquet files with a string domain column
//! - Plain text lists with one domain per line
//!
//! Every row is kept in input order, duplicates included. Rows that do not
//! hold a usable domain become [`SiteInput::Rejected`] so they still show up
//! in the error table.

mod columnar;

use crate::url::Domain;
use crate::UrlError;
use std::path::Path;
use thiserror::Error;

pub use columnar::parse_parquet_sites;

/// Errors that can occur while loading the site list
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Input has no '{column}' column (found: {found})")]
    MissingColumn { column: String, found: String },

    #[error("Unsupported input format for {0}; expected .csv, .parquet or .txt")]
    UnsupportedFormat(String),
}

/// One row of the site list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteInput {
    /// A domain that will be probed
    Valid(Domain),
    /// A value that cannot be probed; reported without any request
    Rejected { website: String, reason: UrlError },
}

impl SiteInput {
    /// Parses one input value, keeping it even when it is not a domain
    pub fn parse(raw: &str) -> Self {
        match Domain::parse(raw) {
            Ok(domain) => SiteInput::Valid(domain),
            Err(reason) => SiteInput::Rejected {
                website: raw.trim().to_string(),
                reason,
            },
        }
    }

    /// The value as written in the input
    pub fn website(&self) -> &str {
        match self {
            SiteInput::Valid(domain) => domain.input(),
            SiteInput::Rejected { website, .. } => website,
        }
    }

    pub fn domain(&self) -> Option<&Domain> {
        match self {
            SiteInput::Valid(domain) => Some(domain),
            SiteInput::Rejected { .. } => None,
        }
    }
}

impl From<Domain> for SiteInput {
    fn from(domain: Domain) -> Self {
        SiteInput::Valid(domain)
    }
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Parquet,
    List,
}

impl InputFormat {
    /// Detects the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("csv") => Some(Self::Csv),
            Some("parquet") | Some("pq") => Some(Self::Parquet),
            Some("txt") | Some("list") => Some(Self::List),
            _ => None,
        }
    }
}

/// Loads the site list from a file, detecting the format from its extension
///
/// # Arguments
///
/// * `path` - Path to a `.csv`, `.parquet` or `.txt` file
/// * `column` - Name of the column holding the domains (case-insensitive);
///   ignored for plain lists
pub fn load_sites(path: &Path, column: &str) -> Result<Vec<SiteInput>, InputError> {
    let format = InputFormat::from_path(path)
        .ok_or_else(|| InputError::UnsupportedFormat(path.display().to_string()))?;

    let sites = match format {
        InputFormat::Csv => parse_csv_sites(&std::fs::read_to_string(path)?, column)?,
        InputFormat::Parquet => parse_parquet_sites(path, column)?,
        InputFormat::List => parse_list_sites(&std::fs::read_to_string(path)?),
    };

    let rejected = sites.iter().filter(|site| site.domain().is_none()).count();
    tracing::info!(
        "Loaded {} site(s) from {} ({} rejected)",
        sites.len(),
        path.display(),
        rejected
    );
    Ok(sites)
}

/// Parses sites from CSV content with a header row
pub fn parse_csv_sites(content: &str, column: &str) -> Result<Vec<SiteInput>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let column_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(column))
        .ok_or_else(|| InputError::MissingColumn {
            column: column.to_string(),
            found: headers.iter().collect::<Vec<_>>().join(", "),
        })?;

    let mut sites = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1
        sites.push(site_from_cell(record.get(column_idx), row + 2));
    }

    Ok(sites)
}

/// Parses sites from a plain list, one per line
///
/// Blank lines and lines starting with `#` are ignored.
pub fn parse_list_sites(content: &str) -> Vec<SiteInput> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(idx, line)| site_from_cell(Some(line), idx + 1))
        .collect()
}

/// Turns one cell into a row, logging values that cannot be probed
fn site_from_cell(value: Option<&str>, line: usize) -> SiteInput {
    let site = SiteInput::parse(value.unwrap_or_default());
    if let SiteInput::Rejected { website, reason } = &site {
        tracing::warn!("Row {}: '{}' is not a usable domain: {}", line, website, reason);
    }
    site
}
