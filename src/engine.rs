//! Discovery engine - the top-level entry point
//!
//! For each input string the engine tries the cheap extractions first
//! (direct Instagram URL, then free text) and only falls back to crawling
//! the site when neither applies. Every terminal condition is reported as
//! data in a `DiscoveryOutcome`; the engine never raises for expected
//! conditions.

use crate::config::EngineConfig;
use crate::crawler::{build_http_client, CrawlOutcome, SiteCrawler};
use crate::extract::{is_valid_username, Extractor};
use crate::url::{is_direct_profile_url, normalize_profile_url, profile_url};
use crate::Result;
use serde::Serialize;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Terminal status of one discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStatus {
    /// Input was empty or blank
    Empty,

    // ===== Found =====
    /// Input was itself a direct Instagram link or @handle
    FoundDirect,
    /// Handle extracted from the input text without crawling
    FoundFromText,
    /// Direct Instagram link found in a crawled page's anchors
    FoundInSite,
    /// Handle found in an anchor's visible text
    FoundInLinkText,
    /// Handle found in a page's full text
    FoundInPageText,
    /// Handle found in a meta tag's content
    FoundInMetaTag,
    /// Handle found inside a structural social-links section
    FoundInSocialSection,

    // ===== Extracted but rejected =====
    /// Direct link carried a candidate the validator rejected
    InvalidUsername,
    /// Text extraction produced a candidate the validator rejected
    InvalidUsernameFromText,
    /// Crawling produced a candidate the validator rejected
    InvalidUsernameCrawled,

    // ===== Nothing found =====
    /// Crawl budgets exhausted without a find
    NotFoundAfterScan,
    /// The crawl itself faulted
    CrawlError,
}

impl DiscoveryStatus {
    /// Returns true if a validated handle was discovered
    pub fn is_found(&self) -> bool {
        matches!(
            self,
            Self::FoundDirect
                | Self::FoundFromText
                | Self::FoundInSite
                | Self::FoundInLinkText
                | Self::FoundInPageText
                | Self::FoundInMetaTag
                | Self::FoundInSocialSection
        )
    }

    /// Returns true if a candidate was extracted but failed validation
    pub fn is_invalid(&self) -> bool {
        matches!(
            self,
            Self::InvalidUsername | Self::InvalidUsernameFromText | Self::InvalidUsernameCrawled
        )
    }

    /// Snake-case string form used in reports and output files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::FoundDirect => "found_direct",
            Self::FoundFromText => "found_from_text",
            Self::FoundInSite => "found_in_site",
            Self::FoundInLinkText => "found_in_link_text",
            Self::FoundInPageText => "found_in_page_text",
            Self::FoundInMetaTag => "found_in_meta_tag",
            Self::FoundInSocialSection => "found_in_social_section",
            Self::InvalidUsername => "invalid_username",
            Self::InvalidUsernameFromText => "invalid_username_from_text",
            Self::InvalidUsernameCrawled => "invalid_username_crawled",
            Self::NotFoundAfterScan => "not_found_after_scan",
            Self::CrawlError => "crawl_error",
        }
    }
}

impl fmt::Display for DiscoveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one discovery; immutable after construction
#[derive(Debug, Clone)]
pub struct DiscoveryOutcome {
    /// The input exactly as received
    pub original_input: String,

    /// Profile URL for the discovered or attempted handle ("" if none)
    pub handle_url: String,

    /// Validated username; non-empty if and only if the status is found
    pub username: String,

    /// Terminal status of the discovery
    pub status: DiscoveryStatus,

    /// Human-readable context
    pub notes: String,

    /// Pages fetched during crawling (0 unless the crawl path ran)
    pub pages_scanned: u32,

    /// URL of the page the handle was found on ("" unless found via crawl)
    pub found_on_page: String,
}

impl DiscoveryOutcome {
    fn new(original_input: &str, status: DiscoveryStatus) -> Self {
        Self {
            original_input: original_input.to_string(),
            handle_url: String::new(),
            username: String::new(),
            status,
            notes: String::new(),
            pages_scanned: 0,
            found_on_page: String::new(),
        }
    }
}

/// Handle discovery engine
///
/// Holds the shared HTTP client and the compiled pattern tables. The
/// engine carries no per-discovery state, so one instance may serve any
/// number of concurrent `discover` calls.
pub struct DiscoveryEngine {
    config: EngineConfig,
    client: reqwest::Client,
    extractor: Extractor,
}

impl DiscoveryEngine {
    /// Creates an engine from validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let client = build_http_client(config.timeout)?;
        let extractor = Extractor::new()?;
        Ok(Self {
            config,
            client,
            extractor,
        })
    }

    /// Discovers an Instagram handle reachable from one input string
    ///
    /// Resolution order:
    /// 1. Empty input reports `empty`
    /// 2. A direct Instagram URL or `@handle` is normalized and extracted
    /// 3. Free-text patterns are tried on the input
    /// 4. The input is treated as a site URL and crawled
    ///
    /// All terminal conditions come back as a `DiscoveryOutcome`; this
    /// method never fails.
    pub async fn discover(&self, input: &str, cancel: &CancellationToken) -> DiscoveryOutcome {
        if input.trim().is_empty() {
            return DiscoveryOutcome::new(input, DiscoveryStatus::Empty);
        }

        // Inputs pasted from spreadsheets often carry stray whitespace
        // inside the URL; strip all of it before classification
        let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();

        if is_direct_profile_url(&stripped) {
            return self.discover_direct(input, &stripped);
        }

        if let Some(candidate) = self.extractor.username_from_text(input.trim()) {
            return self.outcome_from_text(input, candidate);
        }

        self.discover_by_crawl(input, &stripped, cancel).await
    }

    /// Step 2: the input itself references Instagram
    fn discover_direct(&self, input: &str, stripped: &str) -> DiscoveryOutcome {
        let normalized = normalize_profile_url(stripped);
        let mut outcome = DiscoveryOutcome::new(input, DiscoveryStatus::InvalidUsername);
        outcome.handle_url = normalized.clone();

        match self.extractor.username_from_url(&normalized) {
            Some(username) if is_valid_username(&username) => {
                outcome.status = DiscoveryStatus::FoundDirect;
                outcome.notes = "direct Instagram link".to_string();
                outcome.username = username;
            }
            Some(username) => {
                outcome.notes = format!("invalid username: {}", username);
            }
            None => {
                outcome.notes = "no username in direct link".to_string();
            }
        }
        outcome
    }

    /// Step 3: a candidate was pulled straight out of the input text
    fn outcome_from_text(&self, input: &str, candidate: String) -> DiscoveryOutcome {
        let mut outcome = DiscoveryOutcome::new(input, DiscoveryStatus::InvalidUsernameFromText);
        if is_valid_username(&candidate) {
            outcome.status = DiscoveryStatus::FoundFromText;
            outcome.handle_url = profile_url(&candidate);
            outcome.notes = "extracted from input text".to_string();
            outcome.username = candidate;
        } else {
            outcome.notes = format!("invalid username extracted from text: {}", candidate);
        }
        outcome
    }

    /// Step 4: treat the input as a website and crawl it
    async fn discover_by_crawl(
        &self,
        input: &str,
        stripped: &str,
        cancel: &CancellationToken,
    ) -> DiscoveryOutcome {
        let crawler = SiteCrawler::new(&self.client, &self.config, &self.extractor);

        match crawler.crawl(stripped, cancel).await {
            Ok(CrawlOutcome::Found {
                find,
                pages_scanned,
                found_on_page,
            }) => {
                let mut outcome = DiscoveryOutcome::new(input, find.status);
                outcome.pages_scanned = pages_scanned;
                if is_valid_username(&find.username) {
                    outcome.handle_url = find.profile_url;
                    outcome.username = find.username;
                    outcome.notes = find.notes;
                    outcome.found_on_page = found_on_page;
                } else {
                    outcome.status = DiscoveryStatus::InvalidUsernameCrawled;
                    outcome.notes = format!("invalid username found: {}", find.username);
                }
                outcome
            }
            Ok(CrawlOutcome::Exhausted { pages_scanned }) => {
                let mut outcome = DiscoveryOutcome::new(input, DiscoveryStatus::NotFoundAfterScan);
                outcome.pages_scanned = pages_scanned;
                outcome.notes = format!("scanned {} pages, no Instagram found", pages_scanned);
                outcome
            }
            Err(e) => {
                tracing::warn!("crawl failed for {}: {}", stripped, e);
                let mut outcome = DiscoveryOutcome::new(input, DiscoveryStatus::CrawlError);
                outcome.notes = format!("crawl failed: {}", e);
                outcome
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DiscoveryEngine {
        DiscoveryEngine::new(EngineConfig::default()).expect("engine must build")
    }

    fn cancel() -> CancellationToken {
        CancellationToken::new()
    }

    #[tokio::test]
    async fn test_empty_input() {
        let outcome = engine().discover("", &cancel()).await;
        assert_eq!(outcome.status, DiscoveryStatus::Empty);
        assert!(outcome.username.is_empty());

        let outcome = engine().discover("   ", &cancel()).await;
        assert_eq!(outcome.status, DiscoveryStatus::Empty);
    }

    #[tokio::test]
    async fn test_direct_at_handle() {
        let outcome = engine().discover("@john.doe", &cancel()).await;
        assert_eq!(outcome.status, DiscoveryStatus::FoundDirect);
        assert_eq!(outcome.username, "john.doe");
        assert_eq!(outcome.handle_url, "https://www.instagram.com/john.doe/");
        assert_eq!(outcome.pages_scanned, 0);
        assert!(outcome.found_on_page.is_empty());
    }

    #[tokio::test]
    async fn test_direct_profile_url() {
        let outcome = engine()
            .discover("https://www.instagram.com/brandname/?hl=en", &cancel())
            .await;
        assert_eq!(outcome.status, DiscoveryStatus::FoundDirect);
        assert_eq!(outcome.username, "brandname");
        assert_eq!(outcome.handle_url, "https://www.instagram.com/brandname");
    }

    #[tokio::test]
    async fn test_direct_with_invalid_username() {
        let outcome = engine()
            .discover("https://www.instagram.com/contact", &cancel())
            .await;
        assert_eq!(outcome.status, DiscoveryStatus::InvalidUsername);
        assert!(outcome.username.is_empty());
        assert!(outcome.notes.contains("contact"));
    }

    #[tokio::test]
    async fn test_text_extraction() {
        let outcome = engine().discover("follow us: @brand.store", &cancel()).await;
        assert_eq!(outcome.status, DiscoveryStatus::FoundFromText);
        assert_eq!(outcome.username, "brand.store");
        assert_eq!(outcome.handle_url, "https://www.instagram.com/brand.store/");
    }

    #[tokio::test]
    async fn test_email_text_rejected() {
        let outcome = engine()
            .discover("contact us at info@example.com", &cancel())
            .await;
        assert_eq!(outcome.status, DiscoveryStatus::InvalidUsernameFromText);
        assert!(outcome.username.is_empty());
    }

    #[tokio::test]
    async fn test_found_statuses_imply_username() {
        // Invariant: username non-empty iff status is a found status
        let outcomes = vec![
            engine().discover("@john.doe", &cancel()).await,
            engine().discover("", &cancel()).await,
            engine()
                .discover("contact us at info@example.com", &cancel())
                .await,
        ];
        for outcome in outcomes {
            assert_eq!(outcome.status.is_found(), !outcome.username.is_empty());
        }
    }

    #[test]
    fn test_invalid_statuses() {
        assert!(DiscoveryStatus::InvalidUsername.is_invalid());
        assert!(DiscoveryStatus::InvalidUsernameFromText.is_invalid());
        assert!(DiscoveryStatus::InvalidUsernameCrawled.is_invalid());
        assert!(!DiscoveryStatus::FoundDirect.is_invalid());
        assert!(!DiscoveryStatus::NotFoundAfterScan.is_invalid());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(DiscoveryStatus::FoundDirect.as_str(), "found_direct");
        assert_eq!(
            DiscoveryStatus::InvalidUsernameFromText.as_str(),
            "invalid_username_from_text"
        );
        assert_eq!(DiscoveryStatus::CrawlError.to_string(), "crawl_error");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EngineConfig {
            max_pages: 0,
            ..Default::default()
        };
        assert!(DiscoveryEngine::new(config).is_err());
    }
}
