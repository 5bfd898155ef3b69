//! Markdown summary generation
//!
//! This module generates a human-readable markdown report of a batch run,
//! including run metadata, statistics, and the list of failed sites.

use crate::crawler::BatchReport;
use crate::output::stats::BatchStatistics;
use crate::output::traits::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary of a batch run and writes it to a file
///
/// # Arguments
///
/// * `report` - The finished batch
/// * `config_hash` - Hash of the configuration the run used
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_summary(
    report: &BatchReport,
    config_hash: &str,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(report, config_hash);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a batch report as markdown
pub fn format_markdown_summary(report: &BatchReport, config_hash: &str) -> String {
    let stats = BatchStatistics::from_report(report);
    let mut md = String::new();

    md.push_str("# Address-Trawl Run Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", report.finished_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {:.1} seconds\n",
        report.duration_seconds()
    ));
    let status = if report.interrupted {
        "interrupted"
    } else {
        "completed"
    };
    md.push_str(&format!("- **Status**: {}\n", status));
    md.push_str(&format!("- **Config Hash**: {}\n\n", config_hash));

    // Statistics
    md.push_str("## Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Sites in input | {} |\n", stats.total_sites));
    md.push_str(&format!("| Sites processed | {} |\n", stats.processed_sites));
    md.push_str(&format!(
        "| Sites with addresses | {} |\n",
        stats.sites_with_addresses
    ));
    md.push_str(&format!("| Address rows | {} |\n", stats.address_rows));
    md.push_str(&format!(
        "| Reachable, no address | {} |\n",
        stats.reachable_without_address
    ));
    md.push_str(&format!("| Sites with errors | {} |\n\n", stats.error_sites()));
    md.push_str(&format!(
        "**Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    // Error breakdown
    if !stats.errors_by_indicator.is_empty() {
        md.push_str("## Errors by Type\n\n");
        md.push_str("| Error | Sites |\n");
        md.push_str("|-------|-------|\n");
        for (indicator, count) in stats.sorted_errors() {
            md.push_str(&format!("| {} | {} |\n", indicator.label(), count));
        }
        md.push('\n');

        md.push_str("## Failed Sites\n\n");
        md.push_str("| Website | Error |\n");
        md.push_str("|---------|-------|\n");
        for record in report.error_records() {
            md.push_str(&format!("| {} | {} |\n", record.website, record.error));
        }
        md.push('\n');
    }

    md
}
