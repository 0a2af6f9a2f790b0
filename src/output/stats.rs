//! Run statistics
//!
//! Counters collected by the coordinator while draining the queue, shown
//! by the command-line front end and written into the markdown report.

use std::time::Duration;

/// Counters for a single checking run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Page tasks processed
    pub pages_checked: u64,

    /// Pages that could not be fetched or returned a non-2xx status
    pub pages_failed: u64,

    /// Link tasks that issued at least one request
    pub links_checked: u64,

    /// Links skipped because their fragment-free form was already verified
    pub links_visited: u64,

    /// HEAD requests replaced by a GET retry
    pub retries: u64,

    /// Total issues recorded
    pub issues: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Returns true if no issues were recorded
    pub fn is_clean(&self) -> bool {
        self.issues == 0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Check Statistics ===\n");

    println!("Pages checked: {}", stats.pages_checked);
    println!("  Failed: {}", stats.pages_failed);
    println!("Links checked: {}", stats.links_checked);
    println!("  Already visited: {}", stats.links_visited);
    println!("  Retried as GET: {}", stats.retries);
    println!("Issues: {}", stats.issues);
    println!("Elapsed: {:.2}s", stats.elapsed.as_secs_f64());
}
