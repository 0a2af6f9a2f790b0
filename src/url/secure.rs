use crate::{UrlError, UrlResult};
use url::Url;

/// Returns true if the URL uses plain `http`
pub fn is_insecure(url: &Url) -> bool {
    url.scheme() == "http"
}

/// Returns the `https` counterpart of an `http` URL
///
/// Host, path, query and fragment are preserved. An explicit port is kept
/// unless it is the `http` default, which is dropped with the scheme.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_checker::url::secure_variant;
///
/// let url = Url::parse("http://example.com/a?b=c").unwrap();
/// assert_eq!(secure_variant(&url).unwrap().as_str(), "https://example.com/a?b=c");
/// ```
pub fn secure_variant(url: &Url) -> UrlResult<Url> {
    if !is_insecure(url) {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    let mut secure = url.clone();
    secure
        .set_scheme("https")
        .map_err(|_| UrlError::InvalidScheme(url.scheme().to_string()))?;
    Ok(secure)
}
