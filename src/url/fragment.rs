use url::Url;

/// Returns the identity used for visit de-duplication: the URL with any
/// fragment removed
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_checker::url::link_identity;
///
/// let url = Url::parse("http://example.com/page#section").unwrap();
/// assert_eq!(link_identity(&url), "http://example.com/page");
/// ```
pub fn link_identity(url: &Url) -> String {
    let mut identity = url.clone();
    identity.set_fragment(None);
    identity.into()
}

/// Returns true if the URL ends in `#` with nothing after it
pub fn has_empty_fragment(url: &Url) -> bool {
    url.fragment() == Some("")
}
