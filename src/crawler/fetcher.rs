//! HTTP and local-file fetching
//!
//! This module handles every request the checker makes:
//! - Building HTTP clients with the configured user agent and redirect policy
//! - GET requests for pages, with the body decoded locally so the raw
//!   `Content-Encoding` header stays visible to the compression check
//! - HEAD/GET requests for links, leaving the body unread for streaming
//! - Reading pages and links that refer to local files
//! - Error classification

use crate::config::UserAgent;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use reqwest::header::{HeaderMap, ACCEPT_ENCODING, CACHE_CONTROL, CONTENT_ENCODING, PRAGMA};
use reqwest::{redirect::Policy, Client, Method, Response};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

/// Maximum redirects followed when redirects are allowed
const MAX_REDIRECTS: usize = 10;

/// Errors from a single fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed")]
    Connect,

    #[error("{0}")]
    Http(reqwest::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect
        } else {
            FetchError::Http(e)
        }
    }
}

/// The clients used during one run
#[derive(Debug, Clone)]
pub struct HttpClients {
    /// Page requests: follows redirects, no automatic decompression
    pub page: Client,
    /// Link requests: redirect policy from the options, decompresses bodies
    pub link: Client,
}

impl HttpClients {
    /// Builds both clients
    ///
    /// # Arguments
    ///
    /// * `user_agent` - The user agent setting
    /// * `follow_link_redirects` - Whether link requests follow redirects
    pub fn new(user_agent: &UserAgent, follow_link_redirects: bool) -> Result<Self, reqwest::Error> {
        Ok(Self {
            page: build_page_client(user_agent)?,
            link: build_http_client(user_agent, follow_link_redirects)?,
        })
    }
}

/// Builds an HTTP client for link requests
///
/// # Example
///
/// ```no_run
/// use page_checker::config::UserAgent;
/// use page_checker::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgent::Default, true).unwrap();
/// ```
pub fn build_http_client(user_agent: &UserAgent, follow_redirects: bool) -> Result<Client, reqwest::Error> {
    let policy = if follow_redirects {
        Policy::limited(MAX_REDIRECTS)
    } else {
        Policy::none()
    };

    let mut builder = Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(policy)
        .gzip(true)
        .deflate(true)
        .brotli(true);

    if let Some(agent) = user_agent.header_value() {
        builder = builder.user_agent(agent);
    }

    builder.build()
}

/// Builds the HTTP client for page requests
///
/// Automatic decompression is off: reqwest strips `Content-Encoding` when
/// it decodes, and the compression check needs the header as sent.
fn build_page_client(user_agent: &UserAgent) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .no_gzip()
        .no_deflate()
        .no_brotli();

    if let Some(agent) = user_agent.header_value() {
        builder = builder.user_agent(agent);
    }

    builder.build()
}

/// A fetched page
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// URL actually reached; base for resolving relative links
    pub effective_url: Url,
    /// True if a redirect moved the request to a different URL
    pub redirected: bool,
    /// HTTP status code (200 for local files)
    pub status: u16,
    /// Response headers (empty for local files)
    pub headers: HeaderMap,
    /// Decoded body text
    pub body: String,
    /// Time until the body was fully read
    pub elapsed: Duration,
}

impl PageResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Where a page or link lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Network(Url),
    File(PathBuf),
}

/// Classifies a page or link string
///
/// `http` and `https` URLs go to the network. `file:` URLs and anything that
/// does not parse as a URL with a network scheme are read from disk.
pub fn locate(target: &str) -> Location {
    match Url::parse(target) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Location::Network(url),
        Ok(url) if url.scheme() == "file" => match url.to_file_path() {
            Ok(path) => Location::File(path),
            Err(()) => Location::File(PathBuf::from(url.path())),
        },
        _ => Location::File(PathBuf::from(target)),
    }
}

/// Fetches a page from the network or from disk
///
/// Network requests are sent with `Cache-Control: no-cache`,
/// `Pragma: no-cache` and `Accept-Encoding: gzip, deflate`.
pub async fn fetch_page(client: &Client, target: &str) -> Result<PageResponse, FetchError> {
    match locate(target) {
        Location::Network(url) => fetch_network_page(client, url).await,
        Location::File(path) => read_local_page(path).await,
    }
}

async fn fetch_network_page(client: &Client, url: Url) -> Result<PageResponse, FetchError> {
    let start = Instant::now();
    let response = client
        .get(url.clone())
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .header(ACCEPT_ENCODING, "gzip, deflate")
        .send()
        .await?;

    let effective_url = response.url().clone();
    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let raw = response.bytes().await?;
    let elapsed = start.elapsed();

    let encoding = headers
        .get(CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let body = decode_body(&raw, encoding);

    tracing::debug!(
        "GET {} -> {} ({} bytes, {:?})",
        url,
        status,
        raw.len(),
        elapsed
    );

    Ok(PageResponse {
        redirected: effective_url != url,
        effective_url,
        status,
        headers,
        body,
        elapsed,
    })
}

async fn read_local_page(path: PathBuf) -> Result<PageResponse, FetchError> {
    let start = Instant::now();
    let raw = tokio::fs::read(&path).await?;
    let absolute = tokio::fs::canonicalize(&path).await?;
    let effective_url = Url::from_file_path(&absolute)
        .map_err(|_| FetchError::InvalidUrl(absolute.display().to_string()))?;

    tracing::debug!("Read {} ({} bytes)", absolute.display(), raw.len());

    Ok(PageResponse {
        effective_url,
        redirected: false,
        status: 200,
        headers: HeaderMap::new(),
        body: String::from_utf8_lossy(&raw).into_owned(),
        elapsed: start.elapsed(),
    })
}

/// Decodes a page body according to its `Content-Encoding`
///
/// `deflate` is tried as zlib-wrapped first and as a raw stream second.
/// Undecodable or unknown encodings fall back to the raw bytes.
pub fn decode_body(raw: &[u8], encoding: &str) -> String {
    let mut decoded = Vec::new();
    let ok = match encoding.trim().to_ascii_lowercase().as_str() {
        "gzip" | "x-gzip" => GzDecoder::new(raw).read_to_end(&mut decoded).is_ok(),
        "deflate" => {
            ZlibDecoder::new(raw).read_to_end(&mut decoded).is_ok() || {
                decoded.clear();
                DeflateDecoder::new(raw).read_to_end(&mut decoded).is_ok()
            }
        }
        _ => false,
    };

    if ok {
        String::from_utf8_lossy(&decoded).into_owned()
    } else {
        String::from_utf8_lossy(raw).into_owned()
    }
}

/// Response to a link request, body not yet read
#[derive(Debug)]
pub struct LinkResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub elapsed: Duration,
    pub response: Response,
}

impl LinkResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirection(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// Sends a HEAD or GET request for a link
///
/// Elapsed time is measured until the response headers arrive.
pub async fn send_link_request(client: &Client, url: &Url, method: Method) -> Result<LinkResponse, FetchError> {
    let start = Instant::now();
    let response = client
        .request(method.clone(), url.clone())
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .await?;
    let elapsed = start.elapsed();

    tracing::debug!("{} {} -> {} ({:?})", method, url, response.status(), elapsed);

    Ok(LinkResponse {
        status: response.status().as_u16(),
        headers: response.headers().clone(),
        elapsed,
        response,
    })
}

/// Reads a local file linked from a page
pub async fn read_local_file(path: &Path) -> Result<Vec<u8>, FetchError> {
    Ok(tokio::fs::read(path).await?)
}

/// Formats an elapsed duration the way log lines show it
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{}ms", elapsed.as_millis())
}
