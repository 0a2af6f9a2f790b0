//! Output module for run logging and reports
//!
//! This module handles:
//! - Forwarding informational and issue lines to a reporter
//! - Keeping issues grouped by page for the end-of-run summary
//! - Run statistics and the optional markdown report

mod issues;
mod markdown;
pub mod stats;
mod traits;

pub use issues::{format_summary, issue_count_text, IssueLog, PageIssues};
pub use markdown::{format_markdown_report, generate_markdown_report, RunReport};
pub use stats::{print_statistics, RunStatistics};
pub use traits::{Channel, MemoryReporter, OutputError, OutputResult, Reporter, TracingReporter};
