//! Page-Checker: audits web pages and the resources they link to
//!
//! This crate fetches a configured list of pages, validates response-level
//! properties (status, caching headers, compression, response time), walks
//! every linked resource to verify it is reachable, optionally checks the
//! markup for well-formedness, and verifies linked content against digests
//! embedded in query strings.

pub mod config;
pub mod crawler;
pub mod hash;
pub mod markup;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Page-Checker operations
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    /// The run finished with one or more issues; the message is the final
    /// count line, preceded by the grouped summary when summary mode is on
    #[error("{message}")]
    Issues { count: usize, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Page-Checker operations
pub type Result<T> = std::result::Result<T, CheckError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Options;
pub use crawler::{check_pages, RunOutcome};
pub use output::{IssueLog, MemoryReporter, Reporter, TracingReporter};
