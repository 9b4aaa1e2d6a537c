//! Site crawler - bounded breadth-first handle search
//!
//! Owns the frontier, the visited set, and the page budget for one crawl
//! invocation. The frontier is FIFO so shallower pages are always preferred
//! over deeper ones. Per-URL fetch failures are skipped; only faults that
//! corrupt the session abort the crawl.

use crate::config::EngineConfig;
use crate::crawler::scanner::{harvest_links, scan_page, PageFind};
use crate::crawler::{fetch_url, FetchResult};
use crate::extract::Extractor;
use crate::{Result, ScoutError};
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use tokio_util::sync::CancellationToken;
use url::Url;

/// One pending fetch in the frontier
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    /// Absolute URL awaiting fetch
    pub url: String,

    /// Link depth from the start URL
    pub depth: u32,
}

/// Per-invocation crawl state
///
/// Owned exclusively by one crawl call and discarded when it returns, so
/// concurrent discoveries never share visited-state.
struct CrawlSession {
    visited: HashSet<String>,
    frontier: VecDeque<FrontierEntry>,
    pages_scanned: u32,
}

impl CrawlSession {
    fn new(start_url: String) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back(FrontierEntry {
            url: start_url,
            depth: 0,
        });
        Self {
            visited: HashSet::new(),
            frontier,
            pages_scanned: 0,
        }
    }
}

/// Terminal result of a crawl session
#[derive(Debug)]
pub enum CrawlOutcome {
    /// A validated handle was found; the crawl stopped immediately
    Found {
        find: PageFind,
        pages_scanned: u32,
        found_on_page: String,
    },

    /// The frontier emptied or a budget was reached without a find
    Exhausted { pages_scanned: u32 },
}

/// Breadth-first crawler over one website
pub struct SiteCrawler<'a> {
    client: &'a Client,
    config: &'a EngineConfig,
    extractor: &'a Extractor,
}

impl<'a> SiteCrawler<'a> {
    pub fn new(client: &'a Client, config: &'a EngineConfig, extractor: &'a Extractor) -> Self {
        Self {
            client,
            config,
            extractor,
        }
    }

    /// Crawls a site starting from `start_url` until a handle is found or
    /// the budgets exhaust
    ///
    /// A fresh session (visited set, frontier, page counter) is created per
    /// call. The cancellation token is checked before each fetch; on
    /// cancellation the session ends as `Exhausted` - a partial result is
    /// never reported as found.
    ///
    /// # Errors
    ///
    /// Only systemic faults error out (surfaced by the engine as
    /// `crawl_error`): a start URL that cannot form a valid absolute URL.
    /// Individual fetch failures are logged and skipped.
    pub async fn crawl(
        &self,
        start_url: &str,
        cancel: &CancellationToken,
    ) -> Result<CrawlOutcome> {
        let start_url = complete_scheme(start_url);

        // A start URL we cannot parse means the session can never track
        // visited-state meaningfully; abort instead of skipping
        Url::parse(&start_url)
            .map_err(|e| ScoutError::CrawlFault(format!("bad start URL {}: {}", start_url, e)))?;

        tracing::info!("starting site scan: {}", start_url);
        let mut session = CrawlSession::new(start_url);

        while session.pages_scanned < self.config.max_pages {
            let Some(entry) = session.frontier.pop_front() else {
                break;
            };

            if session.visited.contains(&entry.url) {
                continue;
            }
            if entry.depth > self.config.max_depth {
                continue;
            }
            if cancel.is_cancelled() {
                tracing::info!("crawl cancelled after {} pages", session.pages_scanned);
                break;
            }

            tracing::debug!("visiting {} (depth {})", entry.url, entry.depth);

            let (final_url, body) = match fetch_url(self.client, &entry.url).await {
                FetchResult::Success {
                    final_url, body, ..
                } => (final_url, body),
                FetchResult::HttpError { status_code } => {
                    tracing::debug!("skipping {}: HTTP {}", entry.url, status_code);
                    continue;
                }
                FetchResult::NetworkError { error, .. } => {
                    tracing::debug!("skipping {}: {}", entry.url, error);
                    continue;
                }
            };

            session.pages_scanned += 1;
            session.visited.insert(entry.url.clone());

            if let Some(find) = scan_page(self.extractor, &body, &final_url) {
                tracing::info!(
                    "found @{} on {} ({} pages scanned)",
                    find.username,
                    final_url,
                    session.pages_scanned
                );
                return Ok(CrawlOutcome::Found {
                    find,
                    pages_scanned: session.pages_scanned,
                    found_on_page: final_url,
                });
            }

            if entry.depth < self.config.max_depth {
                for link in harvest_links(&body, &final_url) {
                    if !session.visited.contains(&link) {
                        session.frontier.push_back(FrontierEntry {
                            url: link,
                            depth: entry.depth + 1,
                        });
                    }
                }
            }

            // Politeness throttle between fetches
            tokio::time::sleep(self.config.politeness_delay).await;
        }

        tracing::info!(
            "scan exhausted after {} pages, no handle found",
            session.pages_scanned
        );
        Ok(CrawlOutcome::Exhausted {
            pages_scanned: session.pages_scanned,
        })
    }
}

/// Prefixes `http://` when the start URL has no scheme
fn complete_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}
