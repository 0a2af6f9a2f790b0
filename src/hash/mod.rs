//! Content hashing for query-hash link verification
//!
//! A link such as `http://example.com/app.js?md5=...` carries the expected
//! digest of its own content. [`expected_digest`] finds it and
//! [`ContentHasher`] computes the actual digest over a streamed body.

mod crc;

pub use crc::Crc32;

use md5::Md5;
use sha1::{Digest, Sha1};
use std::fmt;
use url::Url;

/// Supported digest algorithms, in query-parameter priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha1,
    Md5,
    Crc32,
}

impl HashAlgorithm {
    /// Lookup order when several parameters are present
    pub const PRIORITY: [HashAlgorithm; 3] = [Self::Sha1, Self::Md5, Self::Crc32];

    /// Name of the query parameter carrying this digest
    pub fn query_key(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
            Self::Crc32 => "crc32",
        }
    }

    /// Creates a fresh hasher for this algorithm
    pub fn hasher(&self) -> ContentHasher {
        match self {
            Self::Sha1 => ContentHasher::Sha1(Sha1::new()),
            Self::Md5 => ContentHasher::Md5(Md5::new()),
            Self::Crc32 => ContentHasher::Crc32(Crc32::new()),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_key())
    }
}

/// Digest expected for a link's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedDigest {
    pub algorithm: HashAlgorithm,
    pub value: String,
}

impl ExpectedDigest {
    /// Compares against a computed hex digest, ignoring case
    pub fn matches(&self, computed: &str) -> bool {
        self.value.eq_ignore_ascii_case(computed)
    }
}

/// Finds the expected digest in a link's query string
///
/// `sha1` wins over `md5`, which wins over `crc32`. Empty parameter values
/// are skipped.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_checker::hash::{expected_digest, HashAlgorithm};
///
/// let url = Url::parse("http://example.com/file?crc32=abc&md5=def").unwrap();
/// let expected = expected_digest(&url).unwrap();
/// assert_eq!(expected.algorithm, HashAlgorithm::Md5);
/// assert_eq!(expected.value, "def");
/// ```
pub fn expected_digest(url: &Url) -> Option<ExpectedDigest> {
    HashAlgorithm::PRIORITY.iter().find_map(|algorithm| {
        url.query_pairs()
            .find(|(key, value)| key == algorithm.query_key() && !value.is_empty())
            .map(|(_, value)| ExpectedDigest {
                algorithm: *algorithm,
                value: value.into_owned(),
            })
    })
}

/// Streaming hasher over one of the supported algorithms
#[derive(Clone)]
pub enum ContentHasher {
    Sha1(Sha1),
    Md5(Md5),
    Crc32(Crc32),
}

impl ContentHasher {
    /// Feeds the next chunk of content
    pub fn update(&mut self, chunk: &[u8]) {
        match self {
            Self::Sha1(h) => h.update(chunk),
            Self::Md5(h) => h.update(chunk),
            Self::Crc32(h) => h.update(chunk),
        }
    }

    /// Finishes hashing and returns the lowercase hex digest
    pub fn finalize_hex(self) -> String {
        match self {
            Self::Sha1(h) => hex::encode(h.finalize()),
            Self::Md5(h) => hex::encode(h.finalize()),
            Self::Crc32(h) => hex::encode(h.finalize()),
        }
    }
}

impl fmt::Debug for ContentHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sha1(_) => "Sha1",
            Self::Md5(_) => "Md5",
            Self::Crc32(_) => "Crc32",
        };
        f.debug_tuple("ContentHasher").field(&name).finish()
    }
}
