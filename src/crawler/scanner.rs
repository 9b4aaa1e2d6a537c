//! Page scanner - the extraction cascade over fetched HTML
//!
//! Given a page body and its final URL, the scanner applies five extraction
//! stages in fixed priority order and returns on the first hit:
//!
//! 1. Anchor hrefs that are direct Instagram links
//! 2. Anchor visible text (same anchor iteration as stage 1)
//! 3. Full page text
//! 4. Meta tag `content` attributes
//! 5. Structural "social section" selectors
//!
//! Link harvesting for frontier expansion is independent of the cascade.

use crate::engine::DiscoveryStatus;
use crate::extract::{is_valid_username, Extractor};
use crate::url::{is_direct_profile_url, profile_url, resolve_href, same_domain};
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Structural selectors targeting common "follow us" / social-icon markup
///
/// This is configuration data, not logic: an ordered table consumed by the
/// generic matching loop in stage 5. Entries cover hand-written markup,
/// icon fonts, and the widget classes emitted by popular page builders.
const SOCIAL_SELECTORS: &[&str] = &[
    ".social-links",
    ".social-icons",
    ".social-media",
    ".instagram",
    "[class*=\"instagram\"]",
    "[id*=\"instagram\"]",
    ".follow-us",
    ".social",
    ".share",
    ".connect",
    "#instagram",
    "a.instagram",
    "a[href*=\"instagram.com\"]",
    "[class*=\"insta\"]",
    "[id*=\"insta\"]",
    "[class*=\"ig-\"]",
    "[id*=\"ig-\"]",
    "[class*=\"ig_\"]",
    "[id*=\"ig_\"]",
    ".social-instagram",
    ".social__instagram",
    ".social-link--instagram",
    ".social-icons .instagram",
    ".social-links .instagram",
    ".follow-instagram",
    ".follow__instagram",
    ".follow--instagram",
    ".icon-instagram",
    ".icon__instagram",
    ".fa-instagram",
    ".bi-instagram",
    "[class*=\"icon-insta\"]",
    "[class*=\"icon-ig\"]",
    "[class*=\"fa-instagram\"]",
    ".footer-social",
    "a[title*=\"instagram\"]",
    "a[aria-label*=\"instagram\"]",
    "a[data-label*=\"instagram\"]",
    "a[data-social*=\"instagram\"]",
    "[class*=\"instagram-feed\"]",
    "[id*=\"instagram-feed\"]",
    "[class*=\"insta-feed\"]",
    "[id*=\"insta-feed\"]",
    "[class*=\"insta-gallery\"]",
    "[id*=\"insta-gallery\"]",
    "[class*=\"instagram-gallery\"]",
    "[id*=\"instagram-gallery\"]",
    "[class*=\"instagram-posts\"]",
    "[id*=\"instagram-posts\"]",
    "[class*=\"elfsight-app\"]",
    "[data-elfsight-app-lazy*=\"instagram\"]",
    "[data-instagram]",
    "[data-insta]",
    "[data-feed*=\"instagram\"]",
    "[class*=\"wp-block-instagram\"]",
    "[class*=\"elementor-instagram\"]",
    "[class*=\"shopify-section-instagram\"]",
    "[class*=\"sqs-block-instagram\"]",
    "a[href*=\"instagram.com\"][target]",
    "a.button[href*=\"instagram\"]",
    "a.btn[href*=\"instagram\"]",
    "a.link[href*=\"instagram\"]",
];

/// A validated handle found on a page
#[derive(Debug, Clone)]
pub struct PageFind {
    /// Canonical profile URL for the handle
    pub profile_url: String,

    /// The validated username
    pub username: String,

    /// Which cascade stage produced the find
    pub status: DiscoveryStatus,

    /// Human-readable context for the find
    pub notes: String,
}

/// Runs the extraction cascade over a fetched page
///
/// Returns the first validated handle in cascade priority order, or `None`
/// when no stage produces one. Candidates that fail validation do not stop
/// the cascade; scanning simply continues.
pub fn scan_page(extractor: &Extractor, html: &str, page_url: &str) -> Option<PageFind> {
    let document = Html::parse_document(html);

    // Stages 1 and 2 share one anchor iteration: for each anchor the href
    // is checked before its visible text.
    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            let href = element.value().attr("href").unwrap_or("").trim();

            if !href.is_empty() && is_direct_profile_url(href) {
                if let Some(resolved) = resolve_href(href, page_url) {
                    if let Some(username) = extractor.username_from_url(&resolved) {
                        if is_valid_username(&username) {
                            return Some(PageFind {
                                profile_url: resolved,
                                username,
                                status: DiscoveryStatus::FoundInSite,
                                notes: "found in page link".to_string(),
                            });
                        }
                    }
                }
            }

            let link_text = element.text().collect::<String>();
            let link_text = link_text.trim();
            if let Some(username) = extractor.username_from_text(link_text) {
                if is_valid_username(&username) {
                    return Some(PageFind {
                        profile_url: profile_url(&username),
                        username,
                        status: DiscoveryStatus::FoundInLinkText,
                        notes: format!("found in link text: \"{}\"", link_text),
                    });
                }
            }
        }
    }

    // Stage 3: full page text
    let page_text = document.root_element().text().collect::<String>();
    if let Some(username) = extractor.username_from_text(&page_text) {
        if is_valid_username(&username) {
            return Some(PageFind {
                profile_url: profile_url(&username),
                username,
                status: DiscoveryStatus::FoundInPageText,
                notes: "found in page text".to_string(),
            });
        }
    }

    // Stage 4: meta tag contents
    if let Ok(meta_selector) = Selector::parse("meta[content]") {
        for element in document.select(&meta_selector) {
            let content = element.value().attr("content").unwrap_or("");
            if content.is_empty() {
                continue;
            }
            if let Some(username) = extractor.username_from_text(content) {
                if is_valid_username(&username) {
                    let tag_name = element
                        .value()
                        .attr("property")
                        .or_else(|| element.value().attr("name"))
                        .unwrap_or("");
                    return Some(PageFind {
                        profile_url: profile_url(&username),
                        username,
                        status: DiscoveryStatus::FoundInMetaTag,
                        notes: format!("found in meta tag: {}", tag_name),
                    });
                }
            }
        }
    }

    // Stage 5: structural social-section selectors, in table order
    for selector_str in SOCIAL_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            if let Some(username) = extractor.username_from_text(&text) {
                if is_valid_username(&username) {
                    return Some(PageFind {
                        profile_url: profile_url(&username),
                        username,
                        status: DiscoveryStatus::FoundInSocialSection,
                        notes: format!("found in social section: {}", selector_str),
                    });
                }
            }
        }
    }

    None
}

/// Harvests same-domain links from a page for frontier expansion
///
/// Skips empty hrefs and `#`, `javascript:`, `mailto:`, `tel:` fragments,
/// resolves the rest against the page URL, keeps only same-domain results,
/// and de-duplicates within this page's result set (insertion order kept).
pub fn harvest_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&anchor_selector) {
        let href = element.value().attr("href").unwrap_or("").trim();

        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            continue;
        }

        let Some(resolved) = resolve_href(href, base_url) else {
            continue;
        };

        if same_domain(base_url, &resolved) && seen.insert(resolved.clone()) {
            links.push(resolved);
        }
    }

    links
}
