//! Configuration module for Page-Checker
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files into the typed [`Options`] used for a run.
//!
//! # Example
//!
//! ```no_run
//! use page_checker::config::load_config;
//! use std::path::Path;
//!
//! let options = load_config(Path::new("pages.toml")).unwrap();
//! println!("Link checking enabled: {}", options.check_links);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Options, RawOptions, UserAgent, DEFAULT_USER_AGENT};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{resolve, validate};
