//! Insta-Scout: an Instagram handle discovery engine
//!
//! This crate discovers an Instagram username reachable from an arbitrary
//! input string: either encoded directly in the input (a profile URL or an
//! `@handle`), extractable from free text, or discoverable by a bounded
//! breadth-first crawl of the target website.

pub mod config;
pub mod crawler;
pub mod engine;
pub mod extract;
pub mod report;
pub mod sheet;
pub mod url;

use thiserror::Error;

/// Main error type for Insta-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Column '{0}' not found in input file")]
    MissingColumn(String),

    #[error("Crawl fault: {0}")]
    CrawlFault(String),
}

/// Result type alias for Insta-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{DiscoveryEngine, DiscoveryOutcome, DiscoveryStatus};
