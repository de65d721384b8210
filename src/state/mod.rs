//! State module for tracking traversal progress
//!
//! # Components
//!
//! - `PageVisit`: Visit state of a claimed page (visiting, explored)
//! - `FrameOutcome`: What a single traversal frame did (explored or skipped)
//! - `VisitedSet`: The per-run set of claimed pages

mod page_visit;
mod visited;

// Re-export main types
pub use page_visit::{FrameOutcome, PageVisit};
pub use visited::VisitedSet;
