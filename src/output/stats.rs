//! Statistics for a finished batch
//!
//! This module derives summary counts from a [`BatchReport`] and prints them
//! at the end of a run.

use crate::crawler::{BatchReport, ErrorIndicator};
use std::collections::HashMap;

/// Batch statistics summary
#[derive(Debug, Clone, Default)]
pub struct BatchStatistics {
    /// Sites in the input (after any limit)
    pub total_sites: u64,

    /// Sites that completed processing
    pub processed_sites: u64,

    /// Sites with at least one extracted address
    pub sites_with_addresses: u64,

    /// Address rows produced across all sites
    pub address_rows: u64,

    /// Sites whose root answered 200 but had no address markers
    pub reachable_without_address: u64,

    /// Reportable errors by indicator
    pub errors_by_indicator: HashMap<ErrorIndicator, u64>,

    /// True if the run stopped early
    pub interrupted: bool,
}

impl BatchStatistics {
    /// Computes statistics from a report
    pub fn from_report(report: &BatchReport) -> Self {
        let mut stats = Self {
            total_sites: report.total_sites as u64,
            processed_sites: report.results.len() as u64,
            interrupted: report.interrupted,
            ..Self::default()
        };

        for site in &report.results {
            if site.has_addresses() {
                stats.sites_with_addresses += 1;
                stats.address_rows += site.addresses.len() as u64;
            } else if let Some(indicator) = site.reportable_error() {
                *stats.errors_by_indicator.entry(indicator).or_insert(0) += 1;
            } else {
                stats.reachable_without_address += 1;
            }
        }

        stats
    }

    /// Total number of sites with a reportable error
    pub fn error_sites(&self) -> u64 {
        self.errors_by_indicator.values().sum()
    }

    /// Share of processed sites with at least one address, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.processed_sites == 0 {
            return 0.0;
        }
        (self.sites_with_addresses as f64 / self.processed_sites as f64) * 100.0
    }

    /// Errors sorted by count (descending), then by indicator
    pub fn sorted_errors(&self) -> Vec<(ErrorIndicator, u64)> {
        let mut errors: Vec<_> = self
            .errors_by_indicator
            .iter()
            .map(|(indicator, count)| (*indicator, *count))
            .collect();
        errors.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        errors
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &BatchStatistics) {
    println!("=== Batch Statistics ===\n");

    println!("Overview:");
    println!("  Sites in input: {}", stats.total_sites);
    println!("  Sites processed: {}", stats.processed_sites);
    println!("  Sites with addresses: {}", stats.sites_with_addresses);
    println!("  Address rows: {}", stats.address_rows);
    println!(
        "  Reachable, no address found: {}",
        stats.reachable_without_address
    );
    println!();

    if !stats.errors_by_indicator.is_empty() {
        println!("Errors ({} sites):", stats.error_sites());
        for (indicator, count) in stats.sorted_errors() {
            println!("  {}: {}", indicator.label(), count);
        }
        println!();
    }

    if stats.interrupted {
        println!(
            "Run was interrupted: {} of {} sites not processed",
            stats.total_sites - stats.processed_sites,
            stats.total_sites
        );
    }

    println!(
        "Success Rate: {:.1}% ({} / {} sites with an address)",
        stats.success_rate(),
        stats.sites_with_addresses,
        stats.processed_sites
    );
}
