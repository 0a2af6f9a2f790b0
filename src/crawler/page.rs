//! Page verification
//!
//! Fetches a configured page, runs the enabled checks on the response and
//! turns the page's links into link tasks.

use crate::crawler::checks::{check_caching, check_compression, check_response_time};
use crate::crawler::coordinator::RunContext;
use crate::crawler::fetcher::{fetch_page, format_elapsed};
use crate::crawler::parser::{discover_links, DiscoveredLink};
use crate::crawler::scheduler::Task;
use crate::markup::check_well_formed;
use crate::url::filter_link;
use std::time::Instant;

/// Verifies one page
///
/// # Returns
///
/// One link task per discovered link that passed filtering, in discovery
/// order. Empty when the page failed or link checking is off. Link values
/// that cannot be resolved are logged as issues here.
pub(crate) async fn verify_page(ctx: &mut RunContext<'_>, page: &str) -> Vec<Task> {
    ctx.stats.pages_checked += 1;

    let start = Instant::now();
    let response = match fetch_page(&ctx.clients.page, page).await {
        Ok(response) => response,
        Err(e) => {
            ctx.stats.pages_failed += 1;
            ctx.log.log_issue(
                page,
                &format!(
                    "Page error ({}): {} ({})",
                    e,
                    page,
                    format_elapsed(start.elapsed())
                ),
            );
            return Vec::new();
        }
    };
    let elapsed = format_elapsed(response.elapsed);

    if !response.is_success() {
        ctx.stats.pages_failed += 1;
        ctx.log.log_issue(
            page,
            &format!("Bad page ({}): {} ({})", response.status, page, elapsed),
        );
        return Vec::new();
    }

    if response.redirected {
        ctx.log.log_ok(&format!(
            "Page: {} -> {} ({})",
            page, response.effective_url, elapsed
        ));
    } else {
        ctx.log.log_ok(&format!("Page: {} ({})", page, elapsed));
    }

    if ctx.options.check_xhtml {
        for error in check_well_formed(&response.body) {
            ctx.log.log_issue(page, &error.to_issue_message());
        }
    }

    if let Some(max) = ctx.options.max_response_time {
        if let Some(message) = check_response_time(response.elapsed, max) {
            ctx.log.log_issue(page, &message);
        }
    }

    if ctx.options.check_caching {
        for message in check_caching(&response.headers) {
            ctx.log.log_issue(page, &message);
        }
    }

    if ctx.options.check_compression {
        for message in check_compression(&response.headers) {
            ctx.log.log_issue(page, &message);
        }
    }

    if !ctx.options.check_links {
        return Vec::new();
    }

    let discovered = discover_links(&response.body, &response.effective_url);
    tracing::debug!("Found {} link(s) on {}", discovered.len(), page);

    let mut tasks = Vec::new();
    for link in discovered {
        match link {
            DiscoveredLink::Resolved(link) => {
                let filter = filter_link(
                    &link,
                    &response.effective_url,
                    &ctx.options.links_to_ignore,
                    ctx.options.only_same_domain,
                );
                if filter.should_check() {
                    tasks.push(Task::link(link, page));
                } else {
                    tracing::debug!("Skipping {} ({:?})", link, filter);
                }
            }
            DiscoveredLink::Unresolvable { href, reason } => {
                if ctx.options.links_to_ignore.iter().any(|ignored| *ignored == href) {
                    tracing::debug!("Skipping {} (Ignored)", href);
                    continue;
                }
                ctx.log
                    .log_issue(page, &format!("Link error ({}): {}", reason, href));
            }
        }
    }
    tasks
}
