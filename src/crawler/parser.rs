//! HTML parser for extracting links
//!
//! Links are collected from a fixed table of element/attribute pairs, one
//! selector at a time, so the discovery order is table order first and
//! document order second.

use scraper::{Html, Selector};
use url::Url;

/// Element/attribute pairs that carry a linked resource
pub const LINK_ATTRIBUTES: &[(&str, &str)] = &[
    ("a", "href"),
    ("area", "href"),
    ("audio", "src"),
    ("embed", "src"),
    ("iframe", "src"),
    ("img", "src"),
    ("input", "src"),
    ("link", "href"),
    ("object", "data"),
    ("script", "src"),
    ("source", "src"),
    ("track", "src"),
    ("video", "src"),
];

/// A link attribute value found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveredLink {
    /// Resolved to a checkable `http`, `https` or `file` URL
    Resolved(Url),
    /// Could not be turned into a checkable URL
    Unresolvable { href: String, reason: String },
}

/// Extracts every checkable link from an HTML document
///
/// Values that cannot be checked are dropped; see [`discover_links`] to
/// keep them.
///
/// # Example
///
/// ```no_run
/// use page_checker::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(html, &base_url);
/// assert_eq!(links[0].as_str(), "https://example.com/page");
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    discover_links(html, base_url)
        .into_iter()
        .filter_map(|link| match link {
            DiscoveredLink::Resolved(url) => Some(url),
            DiscoveredLink::Unresolvable { .. } => None,
        })
        .collect()
}

/// Collects every link attribute value in a document
///
/// # Link Extraction Rules
///
/// **Resolved:**
/// - Every pair in [`LINK_ATTRIBUTES`], resolved against `base_url`
/// - Fragment links, which resolve to the page itself plus the fragment
///
/// **Unresolvable:**
/// - Values the URL parser rejects
/// - Anything that resolves to a scheme other than `http`, `https` or `file`
///
/// **Skipped entirely:**
/// - Empty or whitespace-only attribute values
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
pub fn discover_links(html: &str, base_url: &Url) -> Vec<DiscoveredLink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for (element, attribute) in LINK_ATTRIBUTES {
        let selector = match Selector::parse(&format!("{}[{}]", element, attribute)) {
            Ok(selector) => selector,
            Err(_) => continue,
        };

        for node in document.select(&selector) {
            if let Some(value) = node.value().attr(attribute) {
                if let Some(link) = resolve_link(value, base_url) {
                    links.push(link);
                }
            }
        }
    }

    links
}

/// Resolves an attribute value against the page URL
///
/// Returns None for values that are not links to check at all.
fn resolve_link(href: &str, base_url: &Url) -> Option<DiscoveredLink> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let link = match base_url.join(href) {
        Ok(absolute_url) => match absolute_url.scheme() {
            "http" | "https" | "file" => DiscoveredLink::Resolved(absolute_url),
            scheme => DiscoveredLink::Unresolvable {
                href: href.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            },
        },
        Err(e) => DiscoveredLink::Unresolvable {
            href: href.to_string(),
            reason: e.to_string(),
        },
    };
    Some(link)
}
