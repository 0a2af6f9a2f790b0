//! Page-Checker main entry point
//!
//! This is the command-line interface for the Page-Checker page auditor.

use anyhow::Context;
use clap::Parser;
use page_checker::config::{load_config, Options, UserAgent};
use page_checker::output::print_statistics;
use page_checker::{check_pages, CheckError, TracingReporter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Page-Checker: audits web pages and the resources they link to
///
/// Page-Checker fetches each configured page, checks its status, headers,
/// response time and markup, then verifies every link the page contains.
/// The process exits with a non-zero status when any issue is found.
#[derive(Parser, Debug)]
#[command(name = "page-checker")]
#[command(version)]
#[command(about = "Audits web pages and the resources they link to", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only show issues
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be checked without sending requests
    #[arg(long)]
    dry_run: bool,

    /// Print issues grouped by page at the end of the run
    #[arg(long)]
    summary: bool,

    /// Print a single count line instead of a line per page and link
    #[arg(long)]
    terse: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::debug!("Loading configuration from: {}", cli.config.display());
    let mut options = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if cli.summary {
        options.summary = true;
    }
    if cli.terse {
        options.terse = true;
    }

    if cli.dry_run {
        handle_dry_run(&options);
        return Ok(());
    }

    handle_check(options, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Issues are logged at error level
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_checker=info,warn"),
            1 => EnvFilter::new("page_checker=debug,info"),
            2 => EnvFilter::new("page_checker=trace,debug"),
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

/// Handles the --dry-run mode: shows the validated options
fn handle_dry_run(options: &Options) {
    println!("=== Page-Checker Dry Run ===\n");

    println!("Pages ({}):", options.page_urls.len());
    for page in &options.page_urls {
        println!("  - {}", page);
    }

    println!("\nChecks:");
    println!("  Links: {}", options.check_links);
    println!("  XHTML: {}", options.check_xhtml);
    println!("  Caching: {}", options.check_caching);
    println!("  Compression: {}", options.check_compression);
    match options.max_response_time {
        Some(max) => println!("  Max response time: {}ms", max.as_millis()),
        None => println!("  Max response time: none"),
    }

    println!("\nLink policy:");
    println!("  Only same domain: {}", options.only_same_domain);
    println!("  No redirects: {}", options.no_redirects);
    println!("  No local links: {}", options.no_local_links);
    println!("  No empty fragments: {}", options.no_empty_fragments);
    println!("  Prefer secure: {}", options.prefer_secure);
    println!("  Query hashes: {}", options.query_hashes);
    println!("  Ignored links: {}", options.links_to_ignore.len());
    for link in &options.links_to_ignore {
        println!("    * {}", link);
    }

    println!("\nUser Agent:");
    match &options.user_agent {
        UserAgent::Default => println!("  {} (default)", page_checker::config::DEFAULT_USER_AGENT),
        UserAgent::Custom(value) => println!("  {}", value),
        UserAgent::Disabled => println!("  (disabled)"),
    }

    if let Some(path) = &options.report_path {
        println!("\nReport: {}", path);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would check {} page(s)", options.page_urls.len());
}

/// Handles the main check operation
async fn handle_check(options: Options, quiet: bool) -> anyhow::Result<()> {
    let terse = options.terse;
    tracing::debug!("Checking {} page(s)", options.page_urls.len());

    let mut reporter = TracingReporter;
    match check_pages(options, &mut reporter).await {
        Ok(outcome) => {
            if !quiet && !terse {
                println!();
                print_statistics(&outcome.statistics);
            }
            Ok(())
        }
        Err(CheckError::Issues { message, .. }) => {
            // Terse mode has already printed its summary and count line
            if !terse {
                for line in message.lines() {
                    tracing::error!("{}", line);
                }
            }
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
