//! Markdown report generation
//!
//! This module renders a finished run as a markdown document: run
//! information, counters, and every issue grouped by page.

use crate::output::issues::{issue_count_text, PageIssues};
use crate::output::stats::RunStatistics;
use crate::output::traits::OutputResult;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Everything needed to render a report
#[derive(Debug, Clone)]
pub struct RunReport<'a> {
    pub finished_at: DateTime<Utc>,
    pub page_urls: &'a [String],
    pub statistics: &'a RunStatistics,
    pub issues: &'a [PageIssues],
}

/// Writes the markdown report for a run
///
/// # Arguments
///
/// * `report` - The run data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_report(report: &RunReport<'_>, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run report as markdown
pub fn format_markdown_report(report: &RunReport<'_>) -> String {
    let stats = report.statistics;
    let mut md = String::new();

    md.push_str("# Page Check Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Finished**: {}\n",
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        stats.elapsed.as_secs_f64()
    ));
    let status = if stats.is_clean() { "passed" } else { "failed" };
    md.push_str(&format!("- **Status**: {}\n\n", status));

    md.push_str("## Statistics\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Pages checked | {} |\n", stats.pages_checked));
    md.push_str(&format!("| Pages failed | {} |\n", stats.pages_failed));
    md.push_str(&format!("| Links checked | {} |\n", stats.links_checked));
    md.push_str(&format!("| Links already visited | {} |\n", stats.links_visited));
    md.push_str(&format!("| HEAD retried as GET | {} |\n", stats.retries));
    md.push_str(&format!("| Issues | {} |\n\n", stats.issues));

    md.push_str("## Pages\n\n");
    for page in report.page_urls {
        md.push_str(&format!("- {}\n", page));
    }
    md.push('\n');

    md.push_str("## Issues\n\n");
    if report.issues.is_empty() {
        md.push_str("No issues found.\n");
    } else {
        for page in report.issues {
            md.push_str(&format!("### {}\n\n", page.page));
            for message in &page.messages {
                md.push_str(&format!("- {}\n", message));
            }
            md.push('\n');
        }
        md.push_str(&format!(
            "**{}**\n",
            issue_count_text(stats.issues as usize)
        ));
    }

    md
}
