//! Username extraction for Insta-Scout
//!
//! This module pulls candidate usernames out of URLs and free text, and
//! validates candidates against the denylist heuristic.

mod patterns;
mod validate;

pub use patterns::Extractor;
pub use validate::is_valid_username;
