//! URL handling module for Page-Checker
//!
//! This module provides host extraction, loopback detection, fragment
//! identity, secure-scheme rewriting and the link filtering applied before a
//! discovered link is queued.

mod domain;
mod fragment;
mod local;
mod secure;

// Re-export main functions
pub use domain::{extract_domain, is_same_domain};
pub use fragment::{has_empty_fragment, link_identity};
pub use local::is_local_link;
pub use secure::{is_insecure, secure_variant};

use url::Url;

/// Reasons a discovered link is dropped before it is queued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFilter {
    /// The link should be queued
    Keep,
    /// The resolved link is on the ignore list
    Ignored,
    /// Same-domain restriction is on and the host differs from the page
    OtherDomain,
}

impl LinkFilter {
    /// Returns true if the link should be queued
    pub fn should_check(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Decides whether a resolved link is queued for verification
///
/// The ignore list is matched exactly against the serialized resolved URL.
///
/// # Arguments
///
/// * `link` - The resolved link
/// * `page` - The effective URL of the page the link was found on
/// * `links_to_ignore` - Exact-match exclusion list
/// * `only_same_domain` - Whether links must share the page's host
pub fn filter_link(
    link: &Url,
    page: &Url,
    links_to_ignore: &[String],
    only_same_domain: bool,
) -> LinkFilter {
    if only_same_domain && !is_same_domain(link, page) {
        return LinkFilter::OtherDomain;
    }

    if links_to_ignore.iter().any(|ignored| ignored == link.as_str()) {
        return LinkFilter::Ignored;
    }

    LinkFilter::Keep
}
