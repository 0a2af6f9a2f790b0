use crate::config::types::{Options, RawOptions};
use crate::config::validation::resolve;
use crate::ConfigError;
use std::path::Path;

/// Loads, parses and validates a configuration file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Options)` - Successfully loaded and validated options
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use page_checker::config::load_config;
///
/// let options = load_config(Path::new("pages.toml")).unwrap();
/// println!("Checking {} pages", options.page_urls.len());
/// ```
pub fn load_config(path: &Path) -> Result<Options, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Options, ConfigError> {
    let raw: RawOptions = toml::from_str(content)?;
    resolve(raw)
}
