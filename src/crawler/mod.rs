//! Checker module for page and link verification
//!
//! This module contains the core checking logic, including:
//! - HTTP and local-file fetching
//! - Link extraction from page markup
//! - Response-level page checks
//! - The ordered work queue and overall run coordination

mod checks;
mod coordinator;
mod fetcher;
mod link;
mod page;
mod parser;
mod scheduler;

pub use checks::{check_caching, check_compression, check_response_time, is_valid_etag};
pub use coordinator::{check_pages, Coordinator, RunOutcome};
pub use fetcher::{
    build_http_client, decode_body, fetch_page, locate, send_link_request, FetchError, HttpClients,
    LinkResponse, Location, PageResponse,
};
pub use link::VisitedLinks;
pub use parser::{discover_links, extract_links, DiscoveredLink, LINK_ATTRIBUTES};
pub use scheduler::{Scheduler, Task};
