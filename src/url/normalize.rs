//! Direct profile URL classification and normalization
//!
//! A "direct" input already references Instagram and needs no crawling:
//! it contains the platform domain, the short-link alias, or is a bare
//! `@handle`. Normalization turns any of these into a canonical profile
//! URL that the extraction patterns can consume.

use crate::url::{PLATFORM_DOMAIN, SHORT_DOMAIN};

/// Returns the canonical profile URL for a username
pub fn profile_url(username: &str) -> String {
    format!("https://www.{}/{}/", PLATFORM_DOMAIN, username)
}

/// Checks whether an input string is a direct Instagram reference
///
/// Matches (case-insensitively) any string containing the platform domain
/// or its short alias, or a string consisting solely of `@` followed by
/// handle characters.
pub fn is_direct_profile_url(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains(PLATFORM_DOMAIN) || lower.contains(SHORT_DOMAIN) {
        return true;
    }

    // Bare @handle shorthand
    if let Some(rest) = lower.strip_prefix('@') {
        return !rest.is_empty()
            && rest
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    }

    false
}

/// Normalizes a direct Instagram reference to a profile URL
///
/// # Normalization Steps
///
/// 1. `@handle` inputs are rewritten to the canonical profile URL using the
///    token after `@` up to the first whitespace
/// 2. Scheme-relative URLs (`//...`) get `https:` prefixed
/// 3. Root-relative paths (`/...`) are joined to the platform host
/// 4. Bare host-like strings lacking a scheme get `https://` prefixed
/// 5. Any query string and trailing slash are stripped
pub fn normalize_profile_url(input: &str) -> String {
    let lower = input.to_lowercase();

    // @handle shorthand short-circuits to the canonical form
    if let Some(rest) = lower.strip_prefix('@') {
        let username = rest.split_whitespace().next().unwrap_or_default();
        return profile_url(username);
    }

    let mut url = if lower.starts_with("//") {
        format!("https:{}", input)
    } else if lower.starts_with('/') {
        format!("https://www.{}{}", PLATFORM_DOMAIN, input)
    } else if !lower.starts_with("http") {
        format!("https://{}", input)
    } else {
        input.to_string()
    };

    // Strip query string and trailing slash
    if let Some(idx) = url.find('?') {
        url.truncate(idx);
    }
    while url.ends_with('/') && !url.ends_with("//") {
        url.pop();
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_platform_domain() {
        assert!(is_direct_profile_url("https://www.instagram.com/someone"));
        assert!(is_direct_profile_url("INSTAGRAM.COM/someone"));
    }

    #[test]
    fn test_detect_short_alias() {
        assert!(is_direct_profile_url("instagr.am/someone"));
    }

    #[test]
    fn test_detect_at_handle() {
        assert!(is_direct_profile_url("@john.doe"));
        assert!(is_direct_profile_url("@user_name99"));
    }

    #[test]
    fn test_reject_plain_site() {
        assert!(!is_direct_profile_url("https://example.com"));
        assert!(!is_direct_profile_url("example.com/about"));
    }

    #[test]
    fn test_reject_at_with_invalid_chars() {
        assert!(!is_direct_profile_url("@john doe"));
        assert!(!is_direct_profile_url("@"));
    }

    #[test]
    fn test_normalize_at_handle() {
        assert_eq!(
            normalize_profile_url("@john.doe"),
            "https://www.instagram.com/john.doe/"
        );
    }

    #[test]
    fn test_normalize_at_handle_lowercases() {
        assert_eq!(
            normalize_profile_url("@John.Doe"),
            "https://www.instagram.com/john.doe/"
        );
    }

    #[test]
    fn test_normalize_scheme_relative() {
        assert_eq!(
            normalize_profile_url("//www.instagram.com/brand"),
            "https://www.instagram.com/brand"
        );
    }

    #[test]
    fn test_normalize_root_relative() {
        assert_eq!(
            normalize_profile_url("/brand"),
            "https://www.instagram.com/brand"
        );
    }

    #[test]
    fn test_normalize_bare_host() {
        assert_eq!(
            normalize_profile_url("instagram.com/brand"),
            "https://instagram.com/brand"
        );
    }

    #[test]
    fn test_strip_query_and_trailing_slash() {
        assert_eq!(
            normalize_profile_url("https://instagram.com/brand/?hl=en"),
            "https://instagram.com/brand"
        );
        assert_eq!(
            normalize_profile_url("https://instagram.com/brand/"),
            "https://instagram.com/brand"
        );
    }

    #[test]
    fn test_idempotent_on_normalized() {
        let once = normalize_profile_url("https://instagram.com/brand?x=1");
        let twice = normalize_profile_url(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_profile_url_format() {
        assert_eq!(profile_url("brand"), "https://www.instagram.com/brand/");
    }
}
