//! Address-Trawl main entry point
//!
//! This is the command-line interface for the Address-Trawl address extractor.

use address_trawl::config::{load_config_with_hash, Config};
use address_trawl::crawler::trawl;
use address_trawl::input::{load_sites, SiteInput};
use address_trawl::output::{
    generate_markdown_summary, print_statistics, BatchStatistics, CsvOutput, OutputHandler,
};
use address_trawl::url::candidate_urls;
use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Address-Trawl: bulk postal-address extraction from websites
///
/// Address-Trawl probes a fixed set of likely pages on every domain of the
/// input list, extracts address fields with selector heuristics, and writes
/// one table of addresses and one table of failures.
#[derive(Parser, Debug)]
#[command(name = "address-trawl")]
#[command(version)]
#[command(about = "Bulk postal-address extraction from websites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Domain list to process (overrides input.path)
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Only process the first N domains (overrides batch.limit)
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Number of sites processed concurrently (overrides batch.workers)
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be probed without any network access
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    apply_overrides(&mut config, &cli)?;

    let input_path = match &config.input.path {
        Some(path) => path.clone(),
        None => bail!("No input file: set input.path in the config or pass --input"),
    };

    let sites = load_input(&input_path, &config)?;

    if cli.dry_run {
        handle_dry_run(&config, &sites);
        return Ok(());
    }

    handle_trawl(&config, &config_hash, &sites).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("address_trawl=info,warn"),
            1 => EnvFilter::new("address_trawl=debug,info"),
            2 => EnvFilter::new("address_trawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if let Some(input) = &cli.input {
        config.input.path = Some(input.clone());
    }
    if let Some(limit) = cli.limit {
        config.batch.limit = Some(limit);
    }
    if let Some(workers) = cli.workers {
        config.batch.workers = workers;
    }

    address_trawl::config::validate(config).context("Invalid command-line override")?;
    Ok(())
}

/// Loads the site list and applies the configured limit
fn load_input(path: &Path, config: &Config) -> anyhow::Result<Vec<SiteInput>> {
    let mut sites = load_sites(path, &config.input.domain_column)
        .with_context(|| format!("Failed to load sites from {}", path.display()))?;

    if let Some(limit) = config.batch.limit {
        if sites.len() > limit {
            tracing::info!("Limiting run to the first {} of {} sites", limit, sites.len());
            sites.truncate(limit);
        }
    }

    Ok(sites)
}

/// Handles the --dry-run mode: shows the configuration and probe plan
fn handle_dry_run(config: &Config, sites: &[SiteInput]) {
    println!("=== Address-Trawl Dry Run ===\n");

    println!("Fetcher Configuration:");
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Max redirects: {}", config.fetcher.max_redirects);
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Workers: {}", config.batch.workers);

    println!("\nOutput:");
    println!("  Addresses: {}", config.output.addresses_path);
    println!("  Errors: {}", config.output.errors_path);
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    if !config.selectors.is_empty() {
        println!("\nSelector Overrides:");
        for (field, patterns) in &config.selectors {
            println!("  - {}: {}", field, patterns.join(", "));
        }
    }

    println!("\nSites ({}):", sites.len());
    for site in sites {
        match site {
            SiteInput::Valid(domain) => {
                println!("  - {}", site.website());
                for url in candidate_urls(domain, config.probe.paths.as_slice()) {
                    println!("    * {}", url);
                }
            }
            SiteInput::Rejected { website, reason } => {
                println!("  - {} (not probed: {})", website, reason);
            }
        }
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would probe {} site(s) with up to {} request(s) each",
        sites.iter().filter(|site| site.domain().is_some()).count(),
        config.probe.paths.len() + 1
    );
}

/// Handles the main run: probe all sites, then write every output
async fn handle_trawl(config: &Config, config_hash: &str, sites: &[SiteInput]) -> anyhow::Result<()> {
    tracing::info!("Starting run over {} site(s)", sites.len());

    let report = trawl(config, sites, shutdown_signal())
        .await
        .context("Failed to start run")?;

    let output = CsvOutput::from_config(&config.output);
    let written = output
        .write_report(&report)
        .context("Failed to write result tables")?;

    if let Some(summary_path) = &config.output.summary_path {
        generate_markdown_summary(&report, config_hash, Path::new(summary_path))
            .with_context(|| format!("Failed to write summary {}", summary_path))?;
        tracing::info!("Summary written to {}", summary_path);
    }

    tracing::info!(
        "Run finished in {:.1}s: {} address row(s), {} error row(s)",
        report.duration_seconds(),
        written.address_rows,
        written.error_rows
    );

    print_statistics(&BatchStatistics::from_report(&report));

    Ok(())
}

/// Resolves on Ctrl-C; the run then stops taking new sites
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::warn!("Interrupt received, writing results collected so far"),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
