//! Check coordinator - main run orchestration logic
//!
//! This module contains the loop that drains the work queue:
//! - Validating options and building HTTP clients before any request
//! - Dispatching page and link tasks in queue order
//! - Placing follow-up tasks at the front of the queue
//! - Producing the final outcome, summary and optional report

use crate::config::{validate, Options};
use crate::crawler::fetcher::HttpClients;
use crate::crawler::link::{verify_link, VisitedLinks};
use crate::crawler::page::verify_page;
use crate::crawler::scheduler::{Scheduler, Task};
use crate::output::{generate_markdown_report, IssueLog, Reporter, RunReport, RunStatistics};
use crate::CheckError;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;

/// Result of a run that recorded no issues
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Number of issues recorded (zero for a successful run)
    pub issue_count: usize,

    /// Page-grouped summary text (empty when there are no issues)
    pub summary: String,

    /// Counters for the run
    pub statistics: RunStatistics,
}

/// Mutable state shared by the page and link verifiers
pub(crate) struct RunContext<'a> {
    pub(crate) options: Options,
    pub(crate) clients: HttpClients,
    pub(crate) log: IssueLog<'a>,
    pub(crate) visited: VisitedLinks,
    pub(crate) stats: RunStatistics,
}

/// Main coordinator structure
pub struct Coordinator<'a> {
    scheduler: Scheduler,
    ctx: RunContext<'a>,
    started: Instant,
}

impl<'a> Coordinator<'a> {
    /// Creates a new coordinator
    ///
    /// Options are validated before anything else; a validation failure
    /// means no request is ever sent.
    ///
    /// # Arguments
    ///
    /// * `options` - The run options
    /// * `reporter` - Receives every log line as it is produced
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CheckError)` - Invalid options or HTTP client failure
    pub fn new(options: Options, reporter: &'a mut dyn Reporter) -> Result<Self, CheckError> {
        validate(&options)?;

        let clients = HttpClients::new(&options.user_agent, !options.no_redirects)?;
        let scheduler = Scheduler::new(&options.page_urls);
        let log = IssueLog::new(reporter, options.terse);

        Ok(Self {
            scheduler,
            ctx: RunContext {
                options,
                clients,
                log,
                visited: VisitedLinks::new(),
                stats: RunStatistics::default(),
            },
            started: Instant::now(),
        })
    }

    /// Runs the main loop until the queue is drained
    ///
    /// Every task runs to completion before the next one starts. Task
    /// failures are recorded as issues; only the final issue count decides
    /// whether the run fails.
    pub async fn run(mut self) -> Result<RunOutcome, CheckError> {
        tracing::debug!("Starting run with {} page(s)", self.scheduler.len());

        while let Some(task) = self.scheduler.next_task() {
            let follow_ups = match task {
                Task::Page { url } => verify_page(&mut self.ctx, &url).await,
                Task::Link { url, page, attempt } => {
                    verify_link(&mut self.ctx, &url, &page, attempt).await
                }
            };

            if !follow_ups.is_empty() {
                tracing::debug!(
                    "Queueing {} task(s), {} already queued",
                    follow_ups.len(),
                    self.scheduler.len()
                );
            }
            self.scheduler.push_front_all(follow_ups);
        }

        self.finish()
    }

    /// Computes the final outcome after the queue is drained
    fn finish(self) -> Result<RunOutcome, CheckError> {
        let Self { ctx, started, .. } = self;
        let RunContext {
            options,
            mut log,
            mut stats,
            ..
        } = ctx;

        let count = log.count();
        stats.issues = count as u64;
        stats.elapsed = started.elapsed();

        log.finish_terse(
            stats.pages_checked as usize,
            stats.links_checked as usize,
            options.summary,
        );

        if let Some(path) = &options.report_path {
            let report = RunReport {
                finished_at: Utc::now(),
                page_urls: &options.page_urls,
                statistics: &stats,
                issues: log.pages(),
            };
            generate_markdown_report(&report, Path::new(path))?;
            tracing::debug!("Wrote report to {}", path);
        }

        let summary = log.summarize();

        if count > 0 {
            let mut message = String::new();
            if options.summary {
                message.push_str(&summary);
            }
            message.push_str(&log.count_message());
            return Err(CheckError::Issues { count, message });
        }

        Ok(RunOutcome {
            issue_count: 0,
            summary,
            statistics: stats,
        })
    }
}

/// Checks every configured page and its links
///
/// # Arguments
///
/// * `options` - The run options
/// * `reporter` - Receives every log line
///
/// # Returns
///
/// * `Ok(RunOutcome)` - No issues were found
/// * `Err(CheckError::Issues)` - One or more issues; the message is the
///   final count line, preceded by the summary in summary mode
/// * `Err(CheckError)` - Invalid options or HTTP client failure
///
/// # Example
///
/// ```no_run
/// use page_checker::{check_pages, MemoryReporter, Options};
///
/// # async fn run() -> page_checker::Result<()> {
/// let options = Options {
///     page_urls: vec!["https://example.com/".to_string()],
///     check_links: true,
///     ..Default::default()
/// };
/// let mut reporter = MemoryReporter::new();
/// let outcome = check_pages(options, &mut reporter).await?;
/// assert_eq!(outcome.issue_count, 0);
/// # Ok(())
/// # }
/// ```
pub async fn check_pages(
    options: Options,
    reporter: &mut dyn Reporter,
) -> Result<RunOutcome, CheckError> {
    Coordinator::new(options, reporter)?.run().await
}
