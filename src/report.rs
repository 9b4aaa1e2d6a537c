//! End-of-run summary report
//!
//! Aggregates the per-row outcomes into status counts, a discovery-method
//! breakdown, scan statistics, and short samples of found and rejected
//! handles, then prints them to stdout.

use crate::engine::{DiscoveryOutcome, DiscoveryStatus};
use std::collections::HashMap;

/// Rows shown in each sample section
const SAMPLE_LIMIT: usize = 5;

/// Aggregated run statistics
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Total number of input rows
    pub total_rows: usize,

    /// Count of outcomes by status
    pub by_status: HashMap<DiscoveryStatus, usize>,

    /// Rows with a validated handle
    pub found: usize,

    /// Rows that required crawling
    pub crawled: usize,

    /// Crawled rows that ended with a validated handle
    pub crawled_found: usize,

    /// Rows whose extracted candidate failed validation
    pub invalid: usize,

    /// Total pages fetched across all crawls
    pub total_pages_scanned: u64,

    /// Largest single-row page count
    pub max_pages_scanned: u32,

    /// First few outcomes with a validated handle
    pub found_samples: Vec<DiscoveryOutcome>,

    /// First few outcomes whose candidate was rejected
    pub invalid_samples: Vec<DiscoveryOutcome>,
}

impl RunStats {
    /// Aggregates statistics over a slice of outcomes
    pub fn from_outcomes(outcomes: &[DiscoveryOutcome]) -> Self {
        let mut by_status: HashMap<DiscoveryStatus, usize> = HashMap::new();
        let mut found = 0;
        let mut crawled = 0;
        let mut crawled_found = 0;
        let mut invalid = 0;
        let mut total_pages_scanned = 0u64;
        let mut max_pages_scanned = 0u32;
        let mut found_samples = Vec::new();
        let mut invalid_samples = Vec::new();

        for outcome in outcomes {
            *by_status.entry(outcome.status).or_insert(0) += 1;
            if outcome.status.is_found() {
                found += 1;
                if found_samples.len() < SAMPLE_LIMIT {
                    found_samples.push(outcome.clone());
                }
            }
            if outcome.status.is_invalid() {
                invalid += 1;
                if invalid_samples.len() < SAMPLE_LIMIT {
                    invalid_samples.push(outcome.clone());
                }
            }
            if outcome.pages_scanned > 0 {
                crawled += 1;
                if outcome.status.is_found() {
                    crawled_found += 1;
                }
                total_pages_scanned += u64::from(outcome.pages_scanned);
                max_pages_scanned = max_pages_scanned.max(outcome.pages_scanned);
            }
        }

        Self {
            total_rows: outcomes.len(),
            by_status,
            found,
            crawled,
            crawled_found,
            invalid,
            total_pages_scanned,
            max_pages_scanned,
            found_samples,
            invalid_samples,
        }
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (count as f64 / self.total_rows as f64) * 100.0
        }
    }
}

/// Truncates long report values with an ellipsis
fn shorten(value: &str, limit: usize) -> String {
    if value.chars().count() > limit {
        let cut: String = value.chars().take(limit).collect();
        format!("{}...", cut)
    } else {
        value.to_string()
    }
}

/// Prints the run summary to stdout
pub fn print_stats(stats: &RunStats) {
    println!("=== Instagram Discovery Report ===\n");

    println!("Total rows: {}", stats.total_rows);
    println!(
        "Valid handles found: {} ({:.1}%)",
        stats.found,
        stats.percent(stats.found)
    );
    println!();

    println!("Status distribution:");
    // Sort statuses by count (descending) for readability
    let mut counts: Vec<_> = stats.by_status.iter().collect();
    counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

    for (status, count) in &counts {
        println!(
            "  {}: {} ({:.1}%)",
            status,
            count,
            stats.percent(**count)
        );
    }
    println!();

    if stats.found > 0 {
        println!("Discovery methods:");
        for (status, count) in &counts {
            if status.is_found() {
                println!("  {}: {}", status, count);
            }
        }
        println!();

        println!("Sample handles found:");
        for outcome in &stats.found_samples {
            println!("  @{}", outcome.username);
            println!("    Original: {}", shorten(&outcome.original_input, 50));
            println!("    Status: {}", outcome.status);
            println!("    Notes: {}", shorten(&outcome.notes, 50));
        }
        println!();
    }

    if stats.invalid > 0 {
        println!("Rejected username candidates: {}", stats.invalid);
        for outcome in &stats.invalid_samples {
            println!("  Status: {}", outcome.status);
            println!("    Original: {}", shorten(&outcome.original_input, 50));
            println!("    Notes: {}", shorten(&outcome.notes, 100));
        }
        println!();
    }

    if stats.crawled > 0 {
        let avg = stats.total_pages_scanned as f64 / stats.crawled as f64;
        let success_rate = (stats.crawled_found as f64 / stats.crawled as f64) * 100.0;
        println!("Scan statistics:");
        println!("  Sites crawled: {}", stats.crawled);
        println!("  Crawl success rate: {:.1}%", success_rate);
        println!("  Average pages per crawled site: {:.1}", avg);
        println!("  Maximum pages for one site: {}", stats.max_pages_scanned);
    }
}
