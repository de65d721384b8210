//! URL handling module for Wiki-Trawl
//!
//! This module validates the seed URL, derives the origin that bounds a
//! traversal, and resolves raw article hrefs into absolute URLs on that origin.

mod resolve;
mod seed;

// Re-export main functions
pub use resolve::resolve_link;
pub use seed::{origin_of, validate_seed};
