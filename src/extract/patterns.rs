//! Ordered pattern cascades for username extraction
//!
//! Both cascades are explicit ordered lists of matchers evaluated in
//! sequence; the first satisfying candidate wins. Reordering the tables
//! changes precedence, so the order is part of the contract.

use regex::Regex;

/// Path segments that are Instagram pages, never usernames
const RESERVED_SEGMENTS: &[&str] = &["p", "explore", "directory", "accounts", "reels", "stories"];

/// Compiled extraction patterns
///
/// Compile once and share; `Extractor` is cheap to reference from
/// concurrent discovery sessions.
pub struct Extractor {
    url_patterns: Vec<Regex>,
    text_patterns: Vec<Regex>,
    basic_format: Regex,
}

impl Extractor {
    /// Compiles the pattern tables
    pub fn new() -> Result<Self, regex::Error> {
        // URL cascade: platform domain, short alias, then a generic
        // trailing-path-segment form. The generic form is broad enough to
        // misfire on arbitrary URLs, so callers must gate it behind
        // `is_direct_profile_url`.
        let url_patterns = vec![
            Regex::new(r"(?i)instagram\.com/([A-Za-z0-9_.]{1,30})")?,
            Regex::new(r"(?i)instagr\.am/([A-Za-z0-9_.]{1,30})")?,
            Regex::new(r"/([A-Za-z0-9_.]{1,30})/?(?:\?.*)?$")?,
        ];

        // Text cascade. The `@` pattern captures the whole run of handle
        // characters; the length filter below rejects runs over 30 rather
        // than truncating them, which keeps the longest-match boundary.
        let text_patterns = vec![
            Regex::new(r"@([A-Za-z0-9_.]+)")?,
            Regex::new(r"(?i)instagram\.com/([A-Za-z0-9_.]{1,30})")?,
            Regex::new(r"(?i)instagr\.am/([A-Za-z0-9_.]{1,30})")?,
            Regex::new(r"(?i)ig: @?([A-Za-z0-9_.]{1,30})")?,
            Regex::new(r"(?i)instagram: @?([A-Za-z0-9_.]{1,30})")?,
            Regex::new(r"(?i)insta: @?([A-Za-z0-9_.]{1,30})")?,
        ];

        let basic_format = Regex::new(r"^[A-Za-z0-9_.]{1,30}$")?;

        Ok(Self {
            url_patterns,
            text_patterns,
            basic_format,
        })
    }

    /// Extracts a username candidate from a URL string
    ///
    /// Tries each URL pattern in order and returns the first capture that
    /// is not a reserved path segment. A reserved capture moves on to the
    /// next pattern rather than aborting the cascade.
    pub fn username_from_url(&self, url: &str) -> Option<String> {
        for pattern in &self.url_patterns {
            if let Some(caps) = pattern.captures(url) {
                let candidate = clean_candidate(&caps[1]);
                if RESERVED_SEGMENTS.contains(&candidate.to_lowercase().as_str()) {
                    continue;
                }
                if !candidate.is_empty() {
                    return Some(candidate.to_string());
                }
            }
        }
        None
    }

    /// Extracts a username candidate from free text
    ///
    /// Scans the patterns in fixed order and returns the first match whose
    /// full captured value fits the allowed character class with length
    /// 1-30. This is a precedence cascade, not a search for the best match.
    pub fn username_from_text(&self, text: &str) -> Option<String> {
        for pattern in &self.text_patterns {
            for caps in pattern.captures_iter(text) {
                let candidate = caps[1].trim();
                if self.basic_format.is_match(candidate) {
                    return Some(candidate.to_string());
                }
            }
        }
        None
    }
}

/// Strips trailing query, fragment, and slash from a captured candidate
fn clean_candidate(raw: &str) -> &str {
    let candidate = raw.split('?').next().unwrap_or(raw);
    let candidate = candidate.split('#').next().unwrap_or(candidate);
    candidate.trim_end_matches('/')
}
