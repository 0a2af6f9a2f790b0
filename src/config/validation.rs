use crate::config::types::{Options, RawOptions, UserAgent};
use crate::ConfigError;
use std::time::Duration;

const PAGE_URLS_MISSING: &str = "pageUrls option is not present; it should be an array of URLs";
const PAGE_URLS_INVALID: &str = "pageUrls option is invalid; it should be an array of URLs";
const LINKS_TO_IGNORE_INVALID: &str = "linksToIgnore option is invalid; it should be an array";
const MAX_RESPONSE_TIME_INVALID: &str =
    "maxResponseTime option is invalid; it should be a positive number";
const USER_AGENT_INVALID: &str = "userAgent option is invalid; it should be a string or null";

/// Resolves raw configuration values into typed [`Options`]
///
/// Checks run in a fixed order (page URLs, ignore list, response time,
/// user agent) so the first violation reported is deterministic.
pub fn resolve(raw: RawOptions) -> Result<Options, ConfigError> {
    let page_urls = match raw.page_urls {
        None => return Err(ConfigError::Validation(PAGE_URLS_MISSING.to_string())),
        Some(value) => string_array(value, PAGE_URLS_INVALID)?,
    };

    let links_to_ignore = match raw.links_to_ignore {
        None => Vec::new(),
        Some(value) => string_array(value, LINKS_TO_IGNORE_INVALID)?,
    };

    let max_response_time = raw
        .max_response_time
        .map(resolve_max_response_time)
        .transpose()?;

    let user_agent = match raw.user_agent {
        None => UserAgent::Default,
        Some(value) => resolve_user_agent(value)?,
    };

    let options = Options {
        page_urls,
        check_links: raw.check_links,
        check_xhtml: raw.check_xhtml,
        check_caching: raw.check_caching,
        check_compression: raw.check_compression,
        max_response_time,
        user_agent,
        only_same_domain: raw.only_same_domain,
        no_redirects: raw.no_redirects,
        no_local_links: raw.no_local_links,
        no_empty_fragments: raw.no_empty_fragments,
        prefer_secure: raw.prefer_secure,
        query_hashes: raw.query_hashes,
        links_to_ignore,
        summary: raw.summary,
        terse: raw.terse,
        report_path: raw.report_path,
    };

    validate(&options)?;
    Ok(options)
}

/// Validates options that were built in code
///
/// Typed options cannot carry type errors, so only value constraints are
/// checked here.
pub fn validate(options: &Options) -> Result<(), ConfigError> {
    if let Some(max) = options.max_response_time {
        if max.is_zero() {
            return Err(ConfigError::Validation(
                MAX_RESPONSE_TIME_INVALID.to_string(),
            ));
        }
    }

    if let UserAgent::Custom(value) = &options.user_agent {
        if value.is_empty() {
            return Err(ConfigError::Validation(USER_AGENT_INVALID.to_string()));
        }
    }

    Ok(())
}

/// Converts a TOML array of strings, failing with `message` otherwise
fn string_array(value: toml::Value, message: &str) -> Result<Vec<String>, ConfigError> {
    let toml::Value::Array(items) = value else {
        return Err(ConfigError::Validation(message.to_string()));
    };

    items
        .into_iter()
        .map(|item| match item {
            toml::Value::String(s) => Ok(s),
            _ => Err(ConfigError::Validation(message.to_string())),
        })
        .collect()
}

/// Milliseconds, integer or float, strictly positive
fn resolve_max_response_time(value: toml::Value) -> Result<Duration, ConfigError> {
    let millis = match value {
        toml::Value::Integer(i) => i as f64,
        toml::Value::Float(f) => f,
        _ => {
            return Err(ConfigError::Validation(
                MAX_RESPONSE_TIME_INVALID.to_string(),
            ))
        }
    };

    if !millis.is_finite() || millis <= 0.0 {
        return Err(ConfigError::Validation(
            MAX_RESPONSE_TIME_INVALID.to_string(),
        ));
    }

    // Thresholds beyond what a Duration can hold never trigger
    Ok(Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX))
}

/// A string sets the header; `false` or `""` disables it
fn resolve_user_agent(value: toml::Value) -> Result<UserAgent, ConfigError> {
    match value {
        toml::Value::String(s) if s.is_empty() => Ok(UserAgent::Disabled),
        toml::Value::String(s) => Ok(UserAgent::Custom(s)),
        toml::Value::Boolean(false) => Ok(UserAgent::Disabled),
        _ => Err(ConfigError::Validation(USER_AGENT_INVALID.to_string())),
    }
}
