//! Crawler module for probing sites and collecting addresses
//!
//! This module contains the extraction pipeline, including:
//! - HTTP fetching with outcome classification
//! - Per-site probing and aggregation
//! - The concurrent batch runner

mod batch;
mod fetcher;
mod site;

pub use batch::{run_batch, BatchOptions, BatchReport};
pub use fetcher::{build_http_client, fetch_page, HttpFetcher, PageFetchResult, PageFetcher};
pub use site::{process_input, process_site, ErrorIndicator, SiteResult};

use crate::config::Config;
use crate::extract::{AddressExtractor, RuleSet};
use crate::input::SiteInput;
use crate::TrawlError;
use std::future::Future;

/// Runs a complete batch from configuration
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client from the fetcher settings
/// 2. Compile the selector table, applying configured overrides
/// 3. Probe every domain and collect the results
///
/// # Arguments
///
/// * `config` - The run configuration
/// * `sites` - Input rows to process, in output order
/// * `shutdown` - Resolves to stop the run early
///
/// # Returns
///
/// * `Ok(BatchReport)` - The run finished or was stopped
/// * `Err(TrawlError)` - The client or the selector table could not be built
pub async fn trawl<S>(
    config: &Config,
    sites: &[SiteInput],
    shutdown: S,
) -> Result<BatchReport, TrawlError>
where
    S: Future<Output = ()>,
{
    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let overrides = config.selector_overrides()?;
    let extractor = AddressExtractor::with_rules(RuleSet::with_overrides(&overrides)?);

    let options = BatchOptions {
        workers: config.batch.workers,
        paths: config.probe.paths.clone(),
    };

    Ok(run_batch(&fetcher, &extractor, sites, &options, shutdown).await)
}
