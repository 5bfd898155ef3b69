//! Per-site processing
//!
//! One site is processed as a fixed, linear sequence:
//! 1. Probe every candidate URL in order, keeping every non-empty extraction
//! 2. If nothing was extracted, fetch the site root once as a diagnostic
//! 3. Emit exactly one [`SiteResult`]
//!
//! Failed probes never abort a site; they only show up through the
//! diagnostic probe when the whole site came up empty. Input rows that are
//! not a usable domain skip probing and go straight to the error table.

use crate::crawler::fetcher::{PageFetchResult, PageFetcher};
use crate::extract::{AddressExtractor, PartialAddress};
use crate::input::SiteInput;
use crate::url::{candidate_urls, Domain};
use std::fmt;

/// Outcome of the diagnostic probe for a site without any address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorIndicator {
    /// The site root answered with this status
    HttpStatus(u16),
    /// The site root could not be reached at all
    NetworkFailure,
    /// The input value is not a domain that can be probed
    InvalidDomain,
}

impl ErrorIndicator {
    /// Classifies the diagnostic probe's fetch outcome
    pub fn from_fetch(result: &PageFetchResult) -> Self {
        match result.status_code() {
            Some(code) => ErrorIndicator::HttpStatus(code),
            None => ErrorIndicator::NetworkFailure,
        }
    }

    /// A 200 on the site root: reachable, just no recognizable address
    pub fn is_all_clear(&self) -> bool {
        matches!(self, ErrorIndicator::HttpStatus(200))
    }

    /// Human-readable category, used in statistics and summaries
    pub fn label(&self) -> String {
        match self {
            ErrorIndicator::HttpStatus(code) => format!("HTTP {}", code),
            ErrorIndicator::NetworkFailure => "Network failure".to_string(),
            ErrorIndicator::InvalidDomain => "Invalid domain".to_string(),
        }
    }
}

impl fmt::Display for ErrorIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorIndicator::HttpStatus(code) => write!(f, "{}", code),
            // Both render like a failed request in the error table
            ErrorIndicator::NetworkFailure | ErrorIndicator::InvalidDomain => {
                f.write_str("Error")
            }
        }
    }
}

/// Everything found for one input row
#[derive(Debug, Clone, PartialEq)]
pub struct SiteResult {
    /// The input value as written, echoed in both output tables
    pub website: String,
    /// One entry per candidate page that yielded an address, in probe order
    pub addresses: Vec<PartialAddress>,
    /// Set only when `addresses` is empty
    pub error: Option<ErrorIndicator>,
}

impl SiteResult {
    /// Result for an input row that could not be probed
    pub fn rejected(website: impl Into<String>) -> Self {
        Self {
            website: website.into(),
            addresses: Vec::new(),
            error: Some(ErrorIndicator::InvalidDomain),
        }
    }

    pub fn has_addresses(&self) -> bool {
        !self.addresses.is_empty()
    }

    /// The error to report for this site, if any
    ///
    /// Sites with addresses never report an error, and neither do sites whose
    /// root answered 200.
    pub fn reportable_error(&self) -> Option<ErrorIndicator> {
        if self.has_addresses() {
            return None;
        }
        self.error.filter(|indicator| !indicator.is_all_clear())
    }
}

/// Runs the full probe sequence for one domain
///
/// # Arguments
///
/// * `fetcher` - Performs the GETs; one call per candidate plus at most one
///   diagnostic call
/// * `extractor` - Applied to every 200 response body
/// * `domain` - The site to probe
/// * `paths` - Candidate page paths, in priority order
pub async fn process_site<F, S>(
    fetcher: &F,
    extractor: &AddressExtractor,
    domain: &Domain,
    paths: &[S],
) -> SiteResult
where
    F: PageFetcher,
    S: AsRef<str>,
{
    let mut addresses = Vec::new();

    for url in candidate_urls(domain, paths) {
        match fetcher.fetch(&url).await {
            PageFetchResult::Success { body, .. } => match extractor.extract(&body) {
                Some(address) => {
                    tracing::debug!("{}: {} field(s) extracted", url, address.len());
                    addresses.push(address);
                }
                None => tracing::debug!("{}: no address markers", url),
            },
            PageFetchResult::HttpError { status_code } => {
                tracing::debug!("{}: HTTP {}", url, status_code);
            }
            PageFetchResult::NetworkError { cause } => {
                tracing::debug!("{}: {}", url, cause);
            }
        }
    }

    if !addresses.is_empty() {
        tracing::info!("{}: {} address(es) found", domain, addresses.len());
        return SiteResult {
            website: domain.input().to_string(),
            addresses,
            error: None,
        };
    }

    let diagnostic = fetcher.fetch(domain.base_url()).await;
    let indicator = ErrorIndicator::from_fetch(&diagnostic);

    if let PageFetchResult::NetworkError { cause } = &diagnostic {
        tracing::info!("{}: no address, site unreachable ({})", domain, cause);
    } else {
        tracing::info!("{}: no address, root answered {}", domain, indicator);
    }

    SiteResult {
        website: domain.input().to_string(),
        addresses,
        error: Some(indicator),
    }
}

/// Processes one input row: probes it if it holds a domain, otherwise
/// records it as rejected without any network access
pub async fn process_input<F, S>(
    fetcher: &F,
    extractor: &AddressExtractor,
    input: &SiteInput,
    paths: &[S],
) -> SiteResult
where
    F: PageFetcher,
    S: AsRef<str>,
{
    match input {
        SiteInput::Valid(domain) => process_site(fetcher, extractor, domain, paths).await,
        SiteInput::Rejected { website, .. } => SiteResult::rejected(website.as_str()),
    }
}
