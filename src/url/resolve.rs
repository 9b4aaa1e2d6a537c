//! Relative URL resolution and same-domain matching for the crawler

use url::Url;

/// Resolves an anchor href to an absolute URL
///
/// Absolute URLs pass through unchanged. Scheme-relative hrefs get `https:`
/// prefixed, root-relative paths are joined to the base's scheme and host,
/// and every other relative form is resolved against `base_url` with
/// standard relative-URL resolution.
pub fn resolve_href(href: &str, base_url: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    if href.starts_with("//") {
        return Some(format!("https:{}", href));
    }

    let base = Url::parse(base_url).ok()?;

    if href.starts_with('/') {
        // origin() carries scheme, host, and port
        return Some(format!("{}{}", base.origin().ascii_serialization(), href));
    }

    base.join(href).ok().map(|u| u.to_string())
}

/// Extracts the lowercase host of a URL string
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// Loose same-domain test used for frontier filtering
///
/// A link is considered same-domain when the base host appears as a
/// substring of the link host. This deliberately matches `www.` and other
/// subdomain variants of the site being crawled.
pub fn same_domain(base_url: &str, link_url: &str) -> bool {
    match (host_of(base_url), host_of(link_url)) {
        (Some(base_host), Some(link_host)) => {
            !base_host.is_empty() && !link_host.is_empty() && link_host.contains(&base_host)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_passthrough() {
        assert_eq!(
            resolve_href("https://other.com/x", "https://example.com/"),
            Some("https://other.com/x".to_string())
        );
    }

    #[test]
    fn test_scheme_relative() {
        assert_eq!(
            resolve_href("//cdn.example.com/x", "https://example.com/"),
            Some("https://cdn.example.com/x".to_string())
        );
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(
            resolve_href("/about", "https://example.com/page/deep"),
            Some("https://example.com/about".to_string())
        );
    }

    #[test]
    fn test_root_relative_keeps_port() {
        assert_eq!(
            resolve_href("/about", "http://127.0.0.1:8080/index.html"),
            Some("http://127.0.0.1:8080/about".to_string())
        );
    }

    #[test]
    fn test_path_relative() {
        assert_eq!(
            resolve_href("other", "https://example.com/dir/page"),
            Some("https://example.com/dir/other".to_string())
        );
    }

    #[test]
    fn test_same_domain_exact() {
        assert!(same_domain("https://example.com/", "https://example.com/x"));
    }

    #[test]
    fn test_same_domain_subdomain_variant() {
        assert!(same_domain(
            "https://example.com/",
            "https://www.example.com/x"
        ));
        assert!(same_domain(
            "https://example.com/",
            "https://shop.example.com/x"
        ));
    }

    #[test]
    fn test_different_domain() {
        assert!(!same_domain("https://example.com/", "https://other.com/x"));
    }

    #[test]
    fn test_unparseable_is_not_same_domain() {
        assert!(!same_domain("not a url", "https://example.com/"));
    }

    #[test]
    fn test_host_of_lowercases() {
        assert_eq!(
            host_of("https://EXAMPLE.com/Page"),
            Some("example.com".to_string())
        );
    }
}
