//! Response-level page checks
//!
//! Each check inspects a fetched page and returns the issue messages it
//! found, in the order they are logged.

use reqwest::header::{HeaderMap, CACHE_CONTROL, CONTENT_ENCODING, ETAG};
use std::time::Duration;

/// Cache-Control directives, any one of which makes the header valid
const CACHE_DIRECTIVES: &[&str] = &[
    "max-age",
    "max-stale",
    "min-fresh",
    "must-revalidate",
    "no-cache",
    "no-store",
    "no-transform",
    "only-if-cached",
    "private",
    "proxy-revalidate",
    "public",
    "s-maxage",
];

/// Directives that mark a response as not cached, making ETag optional
const UNCACHED_DIRECTIVES: &[&str] = &["no-cache", "max-age=0"];

fn header_text<'a>(headers: &'a HeaderMap, name: &reqwest::header::HeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .map(|value| value.to_str().unwrap_or("<non-ASCII value>"))
}

/// Checks the Cache-Control and ETag headers
pub fn check_caching(headers: &HeaderMap) -> Vec<String> {
    let mut issues = Vec::new();

    let cache_control = header_text(headers, &CACHE_CONTROL).filter(|v| !v.is_empty());
    match cache_control {
        Some(value) => {
            if !CACHE_DIRECTIVES.iter().any(|d| value.contains(d)) {
                issues.push(format!("Invalid Cache-Control header in response: {}", value));
            }
        }
        None => issues.push("Missing Cache-Control header in response".to_string()),
    }

    match header_text(headers, &ETAG).filter(|v| !v.is_empty()) {
        Some(etag) => {
            if !is_valid_etag(etag) {
                issues.push(format!("Invalid ETag header in response: {}", etag));
            }
        }
        None => {
            let uncached = cache_control
                .map(|value| UNCACHED_DIRECTIVES.iter().any(|d| value.contains(d)))
                .unwrap_or(false);
            if !uncached {
                issues.push("Missing ETag header in response".to_string());
            }
        }
    }

    issues
}

/// Returns true for a strong or weak entity tag: `"..."` or `W/"..."`
pub fn is_valid_etag(etag: &str) -> bool {
    let quoted = etag.strip_prefix("W/").unwrap_or(etag);
    quoted.len() >= 2
        && quoted.starts_with('"')
        && quoted.ends_with('"')
        && !quoted[1..quoted.len() - 1].contains('"')
}

/// Checks that the page was served compressed
pub fn check_compression(headers: &HeaderMap) -> Vec<String> {
    match header_text(headers, &CONTENT_ENCODING).filter(|v| !v.is_empty()) {
        Some("gzip") | Some("deflate") => Vec::new(),
        Some(value) => vec![format!(
            "Invalid Content-Encoding header in response: {}",
            value
        )],
        None => vec!["Missing Content-Encoding header in response".to_string()],
    }
}

/// Checks the response time against the configured maximum
///
/// Only a time strictly above the maximum is an issue.
pub fn check_response_time(elapsed: Duration, max: Duration) -> Option<String> {
    if elapsed > max {
        Some(format!(
            "Page response took more than {}ms to complete",
            max.as_millis()
        ))
    } else {
        None
    }
}
