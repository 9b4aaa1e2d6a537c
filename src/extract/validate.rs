//! Username validation heuristic
//!
//! This is a denylist, not a positive grammar: it rejects anything that
//! looks like an email address, a URL, or a contact-page artifact. It is
//! intentionally conservative and will reject some legitimate handles that
//! happen to contain a denylisted substring (e.g. "web"); that trade-off
//! is accepted rather than loosening the filter.

/// Substrings that never appear in a real Instagram username
///
/// Checked case-insensitively. `.com` also covers `.com.br`.
const DENYLIST: &[&str] = &[
    ".com",
    "gmail",
    "google",
    "outlook",
    "hotmail",
    "yahoo",
    "email",
    "contact",
    "contato",
    "info",
    "admin",
    "web",
    "site",
    "www",
    "http",
    "https",
    "mailto:",
    "@gmail.com",
    "@hotmail.com",
    "@outlook.com",
    "@yahoo.com",
];

/// Characters that disqualify a candidate outright
const FORBIDDEN_CHARS: &[char] = &['?', '&', '=', '%'];

/// Checks whether a candidate string is a plausible Instagram username
pub fn is_valid_username(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();

    for needle in DENYLIST {
        if lower.contains(needle) {
            tracing::debug!("rejected username '{}': contains '{}'", candidate, needle);
            return false;
        }
    }

    if candidate.contains(FORBIDDEN_CHARS) || candidate.chars().any(char::is_whitespace) {
        tracing::debug!("rejected username '{}': forbidden character", candidate);
        return false;
    }

    // Looks like an email address
    if candidate.contains('@')
        && (candidate.ends_with(".com")
            || candidate.ends_with(".com.br")
            || candidate.ends_with(".org")
            || candidate.ends_with(".net"))
    {
        tracing::debug!("rejected username '{}': looks like an email", candidate);
        return false;
    }

    // Looks like a URL
    if candidate.starts_with("http://")
        || candidate.starts_with("https://")
        || candidate.starts_with("www.")
    {
        tracing::debug!("rejected username '{}': looks like a URL", candidate);
        return false;
    }

    if candidate.len() > 30 {
        tracing::debug!("rejected username '{}': too long", candidate);
        return false;
    }

    if !candidate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        tracing::debug!("rejected username '{}': invalid characters", candidate);
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_plain_handles() {
        assert!(is_valid_username("john.doe"));
        assert!(is_valid_username("brand_store99"));
        assert!(is_valid_username("a"));
    }

    #[test]
    fn test_reject_all_denylisted_substrings() {
        for needle in DENYLIST {
            let candidate = format!("x{}x", needle);
            assert!(
                !is_valid_username(&candidate),
                "'{}' should be rejected",
                candidate
            );
        }
    }

    #[test]
    fn test_denylist_is_case_insensitive() {
        assert!(!is_valid_username("GMAIL"));
        assert!(!is_valid_username("Contact.Us"));
        assert!(!is_valid_username("myWEBshop"));
    }

    #[test]
    fn test_reject_forbidden_chars() {
        assert!(!is_valid_username("user?x"));
        assert!(!is_valid_username("a&b"));
        assert!(!is_valid_username("a=b"));
        assert!(!is_valid_username("a%20b"));
        assert!(!is_valid_username("two words"));
    }

    #[test]
    fn test_reject_email_shapes() {
        assert!(!is_valid_username("someone@corp.org"));
        assert!(!is_valid_username("someone@corp.net"));
    }

    #[test]
    fn test_reject_url_shapes() {
        assert!(!is_valid_username("http://x"));
        assert!(!is_valid_username("https://x"));
        assert!(!is_valid_username("www.x"));
    }

    #[test]
    fn test_reject_too_long() {
        let long = "a".repeat(31);
        assert!(!is_valid_username(&long));
        let max = "a".repeat(30);
        assert!(is_valid_username(&max));
    }

    #[test]
    fn test_reject_out_of_class_chars() {
        assert!(!is_valid_username("user-name"));
        assert!(!is_valid_username("usuário"));
        assert!(!is_valid_username("user/name"));
    }

    #[test]
    fn test_known_false_positive_is_preserved() {
        // A real handle containing "web" is rejected by design
        assert!(!is_valid_username("webster_arts"));
    }
}
