//! URL helpers for the magnet index
//!
//! Builds listing URLs against a resolved mirror base, extracts info
//! hashes from item links and assembles magnet URIs.

use regex::Regex;

/// Builds a listing page URL against the resolved mirror base
///
/// The mirror base is whatever address the browser ended up at, so a
/// trailing slash is normalized before joining the fixed path template.
/// The search term is URL encoded; the page number is taken verbatim.
///
/// # Example
/// ```
/// use cilisou_core::url::build_listing_url;
/// let url = build_listing_url("https://mirror.example/", "big buck", "2");
/// assert_eq!(url, "https://mirror.example/search/big%20buck/page-2.html");
/// ```
pub fn build_listing_url(base_url: &str, term: &str, page: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let encoded = urlencoding::encode(term);
    format!("{}/search/{}/page-{}.html", base, encoded, page)
}

/// Extracts the info hash from an item link
///
/// Item links point at detail pages of the form `/hash/<value>.html`.
/// Returns `None` when the link does not follow that shape.
///
/// # Example
/// ```
/// use cilisou_core::url::extract_info_hash;
/// let hash = extract_info_hash("https://mirror.example/hash/abc123.html");
/// assert_eq!(hash, Some("abc123".to_string()));
/// ```
pub fn extract_info_hash(href: &str) -> Option<String> {
    let re = Regex::new(r"/hash/(.*?)\.html").ok()?;
    re.captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Assembles a magnet URI from an info hash and a display name
///
/// An empty hash still produces a (malformed) magnet link; the listing
/// sometimes carries links the hash pattern does not match and the
/// record is emitted anyway.
pub fn build_magnet_link(info_hash: &str, display_name: &str) -> String {
    format!("magnet:?xt=urn:btih:{}&dn={}", info_hash, display_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_listing_url_with_trailing_slash() {
        let url = build_listing_url("https://mirror.example/", "ubuntu", "1");
        assert_eq!(url, "https://mirror.example/search/ubuntu/page-1.html");
    }

    #[test]
    fn test_build_listing_url_without_trailing_slash() {
        let url = build_listing_url("https://mirror.example", "ubuntu", "3");
        assert_eq!(url, "https://mirror.example/search/ubuntu/page-3.html");
    }

    #[test]
    fn test_build_listing_url_encodes_term() {
        let url = build_listing_url("https://mirror.example/", "big buck bunny", "1");
        assert_eq!(
            url,
            "https://mirror.example/search/big%20buck%20bunny/page-1.html"
        );
    }

    #[test]
    fn test_build_listing_url_page_verbatim() {
        let url = build_listing_url("https://mirror.example/", "q", "page");
        assert_eq!(url, "https://mirror.example/search/q/page-page.html");
    }

    #[test]
    fn test_extract_info_hash() {
        let hash = extract_info_hash("/hash/abc123.html");
        assert_eq!(hash, Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_info_hash_full_url() {
        let hash = extract_info_hash("https://mirror.example/hash/deadbeef.html");
        assert_eq!(hash, Some("deadbeef".to_string()));
    }

    #[test]
    fn test_extract_info_hash_no_match() {
        assert_eq!(extract_info_hash("/detail/abc123"), None);
        assert_eq!(extract_info_hash(""), None);
    }

    #[test]
    fn test_build_magnet_link() {
        let link = build_magnet_link("abc123", "ExampleTitle");
        assert_eq!(link, "magnet:?xt=urn:btih:abc123&dn=ExampleTitle");
    }

    #[test]
    fn test_build_magnet_link_empty_hash_still_emitted() {
        let link = build_magnet_link("", "ExampleTitle");
        assert_eq!(link, "magnet:?xt=urn:btih:&dn=ExampleTitle");
    }
}
