//! Site crawling for Insta-Scout
//!
//! This module contains the bounded breadth-first crawl used when an input
//! carries no direct Instagram reference:
//! - HTTP fetching with timeout and error classification
//! - Page scanning through the extraction cascade
//! - Frontier and visited-set management with depth and page budgets

mod fetcher;
mod scanner;
mod site;

pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use scanner::{harvest_links, scan_page, PageFind};
pub use site::{CrawlOutcome, FrontierEntry, SiteCrawler};
