//! Reporter trait and output error types
//!
//! A reporter receives every log line of a run on one of two channels:
//! informational lines (pages and links that passed, visited links, hash
//! matches) and issue lines (every failed check, plus the final count).

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Log channel a line was reported on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Ok,
    Issue,
}

/// Trait for run output sinks
///
/// Lines arrive in the exact order the run produces them.
pub trait Reporter {
    /// Records an informational line
    fn ok(&mut self, message: &str);

    /// Records an issue line
    fn issue(&mut self, message: &str);
}

/// Reporter that forwards lines to `tracing`
///
/// Informational lines are emitted at `info`, issues at `error`, so a quiet
/// filter still shows every issue.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn ok(&mut self, message: &str) {
        tracing::info!("{}", message);
    }

    fn issue(&mut self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Reporter that keeps every line in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    /// All lines in arrival order
    pub lines: Vec<(Channel, String)>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Informational lines in order
    pub fn oks(&self) -> Vec<&str> {
        self.channel(Channel::Ok)
    }

    /// Issue lines in order
    pub fn issues(&self) -> Vec<&str> {
        self.channel(Channel::Issue)
    }

    fn channel(&self, channel: Channel) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line.as_str())
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn ok(&mut self, message: &str) {
        self.lines.push((Channel::Ok, message.to_string()));
    }

    fn issue(&mut self, message: &str) {
        self.lines.push((Channel::Issue, message.to_string()));
    }
}
