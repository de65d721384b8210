//! Output module for traversal reports and store statistics
//!
//! This module handles:
//! - Counting what a traversal did (`TraversalReport`)
//! - Summarising what the link store holds (`StoreStatistics`)
//! - Printing both for the command line

mod report;
pub mod stats;

pub use report::{print_report, TraversalReport};
pub use stats::{load_statistics, print_statistics, StoreStatistics};
