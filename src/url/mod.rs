//! URL handling for Insta-Scout
//!
//! This module classifies strings as direct Instagram references, builds
//! canonical profile URLs, resolves relative links during crawling, and
//! provides the loose same-domain test used for frontier filtering.

mod normalize;
mod resolve;

// Re-export main functions
pub use normalize::{is_direct_profile_url, normalize_profile_url, profile_url};
pub use resolve::{host_of, resolve_href, same_domain};

/// Canonical Instagram host
pub const PLATFORM_DOMAIN: &str = "instagram.com";

/// Short link alias for the platform
pub const SHORT_DOMAIN: &str = "instagr.am";
