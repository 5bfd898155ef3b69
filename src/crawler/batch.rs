//! Batch runner
//!
//! Sites are processed by a bounded pool of concurrent site tasks. Each
//! result is folded by a single owner into the [`BatchReport`] as soon as it
//! completes, tagged with its input position, and the collected results are
//! put back into input order at the end. Nothing is shared or locked while
//! the scan runs.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::site::{process_input, SiteResult};
use crate::extract::AddressExtractor;
use crate::input::SiteInput;
use crate::output::{AddressRecord, ErrorRecord};
use chrono::{DateTime, Utc};
use futures::{stream, StreamExt};
use std::future::Future;

/// How often progress is logged, in completed sites
const PROGRESS_INTERVAL: usize = 25;

/// Tuning knobs for a batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of sites processed concurrently
    pub workers: usize,
    /// Candidate page paths, in probe order
    pub paths: Vec<String>,
}

/// Collected results of a batch run
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One result per completed input row, in input order
    pub results: Vec<SiteResult>,
    /// Number of sites the run was started with
    pub total_sites: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// True if the run was stopped before every site completed
    pub interrupted: bool,
}

impl BatchReport {
    /// Flattens the results into one row per extracted address
    pub fn address_records(&self) -> Vec<AddressRecord> {
        self.results
            .iter()
            .flat_map(|site| {
                site.addresses
                    .iter()
                    .map(move |address| AddressRecord::from_address(&site.website, address))
            })
            .collect()
    }

    /// One row per site that ended with a reportable error
    pub fn error_records(&self) -> Vec<ErrorRecord> {
        self.results
            .iter()
            .filter_map(|site| {
                site.reportable_error()
                    .map(|indicator| ErrorRecord::new(&site.website, indicator))
            })
            .collect()
    }

    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Processes every domain and collects the results
///
/// At most `options.workers` sites are in flight at once and a slot is freed
/// as soon as its site finishes; each site's probes run sequentially. When
/// `shutdown` resolves, in-flight sites are dropped and the report is marked
/// interrupted. Every site that finished before that is kept.
///
/// # Arguments
///
/// * `fetcher` - Shared by all sites
/// * `extractor` - Shared by all sites
/// * `sites` - Input rows in order; rejected rows are reported without probing
/// * `options` - Worker count and probe paths
/// * `shutdown` - Resolves to stop the run early; pass
///   `std::future::pending()` to always run to completion
pub async fn run_batch<F, S>(
    fetcher: &F,
    extractor: &AddressExtractor,
    sites: &[SiteInput],
    options: &BatchOptions,
    shutdown: S,
) -> BatchReport
where
    F: PageFetcher,
    S: Future<Output = ()>,
{
    let started_at = Utc::now();
    let total_sites = sites.len();
    let workers = options.workers.max(1);

    tracing::info!(
        "Processing {} site(s) with {} worker(s), {} probe path(s) each",
        total_sites,
        workers,
        options.paths.len()
    );

    let paths = options.paths.as_slice();
    let mut indexed = stream::iter(sites.iter().enumerate())
        .map(|(idx, site)| async move {
            (idx, process_input(fetcher, extractor, site, paths).await)
        })
        .buffer_unordered(workers)
        .take_until(shutdown)
        .fold(Vec::with_capacity(total_sites), |mut results, entry| async move {
            results.push(entry);
            if results.len() % PROGRESS_INTERVAL == 0 {
                tracing::info!("Progress: {}/{} sites processed", results.len(), total_sites);
            }
            results
        })
        .await;

    indexed.sort_unstable_by_key(|(idx, _)| *idx);
    let results: Vec<SiteResult> = indexed.into_iter().map(|(_, site)| site).collect();

    let interrupted = results.len() < total_sites;
    if interrupted {
        tracing::warn!(
            "Run stopped early: {} of {} site(s) completed",
            results.len(),
            total_sites
        );
    }

    BatchReport {
        results,
        total_sites,
        started_at,
        finished_at: Utc::now(),
        interrupted,
    }
}
