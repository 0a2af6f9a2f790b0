use serde::Deserialize;
use std::time::Duration;

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("page-checker/", env!("CARGO_PKG_VERSION"));

/// Resolved options for a checking run
///
/// Built either by [`crate::config::load_config`] from a TOML file or
/// directly in code. All defaults are resolved here; nothing downstream
/// re-checks option types.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Pages to check, in order
    pub page_urls: Vec<String>,

    /// Discover and verify every link on each page
    pub check_links: bool,

    /// Check page markup for XHTML well-formedness
    pub check_xhtml: bool,

    /// Require valid Cache-Control and ETag response headers
    pub check_caching: bool,

    /// Require a gzip or deflate Content-Encoding
    pub check_compression: bool,

    /// Flag pages whose response took longer than this
    pub max_response_time: Option<Duration>,

    /// User agent header behavior
    pub user_agent: UserAgent,

    /// Only verify links on the same host as the page
    pub only_same_domain: bool,

    /// Treat redirected links as issues instead of following them
    pub no_redirects: bool,

    /// Flag links that target loopback addresses
    pub no_local_links: bool,

    /// Flag links whose fragment is present but empty
    pub no_empty_fragments: bool,

    /// Probe `https` for every `http` link and flag the insecure form
    pub prefer_secure: bool,

    /// Verify link content against `sha1`/`md5`/`crc32` query parameters
    pub query_hashes: bool,

    /// Resolved links to skip (exact match)
    pub links_to_ignore: Vec<String>,

    /// Include the page-grouped summary in the failure message
    pub summary: bool,

    /// Replace per-item log lines with one count line
    pub terse: bool,

    /// Optional path for a markdown report of the run
    pub report_path: Option<String>,
}

/// How the `User-Agent` request header is set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserAgent {
    /// Send [`DEFAULT_USER_AGENT`]
    #[default]
    Default,
    /// Send a custom value
    Custom(String),
    /// Send no `User-Agent` header at all
    Disabled,
}

impl UserAgent {
    /// Returns the header value to send, if any
    pub fn header_value(&self) -> Option<&str> {
        match self {
            Self::Default => Some(DEFAULT_USER_AGENT),
            Self::Custom(value) => Some(value),
            Self::Disabled => None,
        }
    }
}

/// Configuration file contents before validation
///
/// Options whose type must be checked with a descriptive message are kept
/// as raw TOML values and resolved by the validation step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawOptions {
    pub page_urls: Option<toml::Value>,
    #[serde(default)]
    pub check_links: bool,
    #[serde(default)]
    pub check_xhtml: bool,
    #[serde(default)]
    pub check_caching: bool,
    #[serde(default)]
    pub check_compression: bool,
    pub max_response_time: Option<toml::Value>,
    pub user_agent: Option<toml::Value>,
    #[serde(default)]
    pub only_same_domain: bool,
    #[serde(default)]
    pub no_redirects: bool,
    #[serde(default)]
    pub no_local_links: bool,
    #[serde(default)]
    pub no_empty_fragments: bool,
    #[serde(default)]
    pub prefer_secure: bool,
    #[serde(default)]
    pub query_hashes: bool,
    pub links_to_ignore: Option<toml::Value>,
    #[serde(default)]
    pub summary: bool,
    #[serde(default)]
    pub terse: bool,
    pub report_path: Option<String>,
}
