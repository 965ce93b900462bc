// src/utils/url.rs

//! URL manipulation utilities.

/// Resolve an anchor href against the page it was found on.
///
/// Anything starting with `http` is used as-is. Everything else is joined by
/// stripping one trailing slash from the page URL and all leading slashes
/// from the href. This is deliberately not RFC 3986 resolution: `../`,
/// query-only, and fragment-only hrefs are joined literally, which matches
/// how links were collected historically (see README). Upgrading to real URI
/// resolution would change which links a crawl records.
///
/// # Examples
/// ```
/// use trawl::utils::url::resolve;
///
/// assert_eq!(resolve("http://s/page/", "sub"), "http://s/page/sub");
/// assert_eq!(
///     resolve("https://example.com/a", "https://other.com/b"),
///     "https://other.com/b"
/// );
/// ```
pub fn resolve(page_url: &str, href: &str) -> String {
    // Already absolute (also matches "https")
    if href.starts_with("http") {
        return href.to_string();
    }

    let base = page_url.strip_suffix('/').unwrap_or(page_url);
    format!("{}/{}", base, href.trim_start_matches('/'))
}
