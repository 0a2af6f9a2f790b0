//! Link verification
//!
//! A link task sends one request (HEAD unless the content is needed) and
//! judges the answer. A HEAD that is not OK is queued again as a GET, since
//! some servers answer HEAD badly.

use crate::crawler::coordinator::RunContext;
use crate::crawler::fetcher::{format_elapsed, read_local_file, send_link_request, FetchError};
use crate::crawler::scheduler::Task;
use crate::hash::{expected_digest, ExpectedDigest};
use crate::state::{Attempt, LinkState};
use crate::url::{has_empty_fragment, is_insecure, is_local_link, link_identity, secure_variant};
use reqwest::header::LOCATION;
use reqwest::{Method, Response};
use std::collections::HashSet;
use std::time::Instant;
use url::Url;

const MISSING_LOCATION: &str = "[Missing Location header]";

/// Fragment-free identities of links already verified this run
#[derive(Debug, Clone, Default)]
pub struct VisitedLinks {
    seen: HashSet<String>,
}

impl VisitedLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a link; returns false if its identity was already present
    pub fn insert(&mut self, url: &Url) -> bool {
        self.seen.insert(link_identity(url))
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.seen.contains(&link_identity(url))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Verifies one link found on `page`
///
/// # Returns
///
/// The GET retry task when a first-attempt HEAD was not OK, otherwise
/// nothing.
pub(crate) async fn verify_link(
    ctx: &mut RunContext<'_>,
    url: &Url,
    page: &str,
    attempt: Attempt,
) -> Vec<Task> {
    if !attempt.is_retry() {
        if ctx.options.no_empty_fragments && has_empty_fragment(url) {
            ctx.log.log_issue(page, &format!("Empty fragment: {}", url));
        }

        if !ctx.visited.insert(url) {
            ctx.log.log_ok(&format!("Visited link: {}", url));
            ctx.stats.links_visited += 1;
            return Vec::new();
        }
        ctx.stats.links_checked += 1;

        if ctx.options.no_local_links && is_local_link(url) {
            ctx.log.log_issue(page, &format!("Local link: {}", url));
        }

        if ctx.options.prefer_secure && is_insecure(url) && probe_secure(ctx, url, page).await {
            return Vec::new();
        }
    }

    let expected = if ctx.options.query_hashes {
        expected_digest(url)
    } else {
        None
    };

    if url.scheme() == "file" {
        verify_file_link(ctx, url, page, expected.as_ref()).await;
        return Vec::new();
    }

    let method = if attempt.is_retry() || ctx.options.query_hashes {
        Method::GET
    } else {
        Method::HEAD
    };

    let state = attempt.initial_state();
    let start = Instant::now();
    let response = match send_link_request(&ctx.clients.link, url, method.clone()).await {
        Ok(response) => response,
        Err(e) => {
            advance(url, state, LinkState::Done);
            ctx.log.log_issue(
                page,
                &format!(
                    "Link error ({}): {} ({})",
                    e,
                    url,
                    format_elapsed(start.elapsed())
                ),
            );
            return Vec::new();
        }
    };
    let elapsed = format_elapsed(response.elapsed);

    if response.is_success() {
        advance(url, state, LinkState::Done);
        ctx.log.log_ok(&format!("Link: {} ({})", url, elapsed));
        if let Some(expected) = expected {
            check_hash(ctx, page, url, &expected, response.response).await;
        }
    } else if method == Method::HEAD {
        let state = advance(url, state, LinkState::HeadFailed);
        advance(url, state, LinkState::Retrying);
        tracing::debug!("HEAD {} returned {}, retrying as GET", url, response.status);
        ctx.stats.retries += 1;
        return vec![Task::retry(url.clone(), page)];
    } else if ctx.options.no_redirects && response.is_redirection() {
        advance(url, state, LinkState::Done);
        let location = response
            .headers
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(MISSING_LOCATION);
        ctx.log.log_issue(
            page,
            &format!(
                "Redirected link ({}): {} -> {} ({})",
                response.status, url, location, elapsed
            ),
        );
    } else {
        advance(url, state, LinkState::Done);
        ctx.log.log_issue(
            page,
            &format!("Bad link ({}): {} ({})", response.status, url, elapsed),
        );
    }

    Vec::new()
}

/// Tries the `https` counterpart of an `http` link
///
/// Returns true if the secure link answered OK, in which case only the
/// secure link is reported as checked. Either way the original is flagged.
async fn probe_secure(ctx: &mut RunContext<'_>, url: &Url, page: &str) -> bool {
    let secure = match secure_variant(url) {
        Ok(secure) => secure,
        Err(e) => {
            tracing::debug!("No secure variant for {}: {}", url, e);
            ctx.log.log_issue(page, &format!("Insecure link: {}", url));
            return false;
        }
    };

    check_secure_counterpart(ctx, url, &secure, page).await
}

/// Checks `secure` in place of the insecure `url`
///
/// HEAD is retried as GET inline. On success the secure link is logged,
/// hash-checked and marked visited.
async fn check_secure_counterpart(
    ctx: &mut RunContext<'_>,
    url: &Url,
    secure: &Url,
    page: &str,
) -> bool {
    let mut method = if ctx.options.query_hashes {
        Method::GET
    } else {
        Method::HEAD
    };
    let mut result = send_link_request(&ctx.clients.link, secure, method.clone()).await;
    if method == Method::HEAD && matches!(&result, Ok(response) if !response.is_success()) {
        method = Method::GET;
        result = send_link_request(&ctx.clients.link, secure, method.clone()).await;
    }
    match result {
        Ok(response) if response.is_success() => {
            ctx.log.log_ok(&format!(
                "Link: {} ({})",
                secure,
                format_elapsed(response.elapsed)
            ));
            let expected = if ctx.options.query_hashes {
                expected_digest(secure)
            } else {
                None
            };
            if let Some(expected) = expected {
                check_hash(ctx, page, secure, &expected, response.response).await;
            }
            ctx.visited.insert(secure);
            ctx.log.log_issue(page, &format!("Insecure link: {}", url));
            true
        }
        Ok(response) => {
            tracing::debug!("{} {} returned {}", method, secure, response.status);
            ctx.log.log_issue(page, &format!("Insecure link: {}", url));
            false
        }
        Err(e) => {
            tracing::debug!("{} {} failed: {}", method, secure, e);
            ctx.log.log_issue(page, &format!("Insecure link: {}", url));
            false
        }
    }
}

/// Streams a response body through the expected digest's hasher
async fn check_hash(
    ctx: &mut RunContext<'_>,
    page: &str,
    url: &Url,
    expected: &ExpectedDigest,
    mut response: Response,
) {
    let mut hasher = expected.algorithm.hasher();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => hasher.update(&chunk),
            Ok(None) => break,
            Err(e) => {
                let e = FetchError::from(e);
                ctx.log
                    .log_issue(page, &format!("Hash error ({}): {}", e, url));
                return;
            }
        }
    }
    report_hash(ctx, page, url, expected, hasher.finalize_hex());
}

fn report_hash(ctx: &mut RunContext<'_>, page: &str, url: &Url, expected: &ExpectedDigest, computed: String) {
    if expected.matches(&computed) {
        ctx.log.log_ok(&format!("Hash: {}", url));
    } else {
        ctx.log
            .log_issue(page, &format!("Hash error ({}): {}", computed, url));
    }
}

/// Verifies a `file:` link by checking that the path exists
async fn verify_file_link(
    ctx: &mut RunContext<'_>,
    url: &Url,
    page: &str,
    expected: Option<&ExpectedDigest>,
) {
    let start = Instant::now();
    let path = match url.to_file_path() {
        Ok(path) => path,
        Err(()) => {
            ctx.log.log_issue(
                page,
                &format!(
                    "Link error (Invalid file URL): {} ({})",
                    url,
                    format_elapsed(start.elapsed())
                ),
            );
            return;
        }
    };

    if let Err(e) = tokio::fs::metadata(&path).await {
        ctx.log.log_issue(
            page,
            &format!(
                "Link error ({}): {} ({})",
                e,
                url,
                format_elapsed(start.elapsed())
            ),
        );
        return;
    }

    ctx.log.log_ok(&format!(
        "Link: {} ({})",
        url,
        format_elapsed(start.elapsed())
    ));

    if let Some(expected) = expected {
        match read_local_file(&path).await {
            Ok(content) => {
                let mut hasher = expected.algorithm.hasher();
                hasher.update(&content);
                report_hash(ctx, page, url, expected, hasher.finalize_hex());
            }
            Err(e) => ctx
                .log
                .log_issue(page, &format!("Hash error ({}): {}", e, url)),
        }
    }
}

/// Moves a link to its next state, tracing the change
fn advance(url: &Url, state: LinkState, next: LinkState) -> LinkState {
    match state.transition(next) {
        Some(next) => {
            tracing::trace!("{}: {} -> {}", url, state, next);
            next
        }
        None => {
            tracing::warn!("Unexpected state change for {}: {} -> {}", url, state, next);
            next
        }
    }
}
