//! Statistics generation from the link store
//!
//! This module provides functionality for extracting and displaying
//! link store statistics outside of a traversal.

use crate::storage::{LinkStore, StorageResult};

/// Link store statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatistics {
    /// Total number of stored links
    pub total_links: u64,

    /// Number of distinct article paths per leading path segment
    /// (e.g. `/wiki`), sorted by segment
    pub links_by_section: Vec<(String, u64)>,

    /// The first stored links in lexical order
    pub sample: Vec<String>,
}

/// Loads statistics from the link store
///
/// # Arguments
///
/// * `store` - The link store to query
/// * `sample_size` - How many URLs to include as a sample
pub fn load_statistics(
    store: &dyn LinkStore,
    sample_size: usize,
) -> StorageResult<StoreStatistics> {
    let total_links = store.count()?;
    let urls = store.urls()?;

    let mut sections: Vec<(String, u64)> = Vec::new();
    for url in &urls {
        let section = leading_segment(url);
        match sections.iter_mut().find(|(name, _)| *name == section) {
            Some((_, count)) => *count += 1,
            None => sections.push((section, 1)),
        }
    }
    sections.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(StoreStatistics {
        total_links,
        links_by_section: sections,
        sample: urls.into_iter().take(sample_size).collect(),
    })
}

/// Returns the first path segment of a URL as `/segment`, or `/`
fn leading_segment(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next().map(|s| s.to_string()))
        })
        .filter(|segment| !segment.is_empty())
        .map(|segment| format!("/{}", segment))
        .unwrap_or_else(|| "/".to_string())
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Link Store Statistics ===\n");

    println!("Total links stored: {}", stats.total_links);
    println!();

    if !stats.links_by_section.is_empty() {
        println!("Links by Section:");
        for (section, count) in &stats.links_by_section {
            let percentage = if stats.total_links > 0 {
                (*count as f64 / stats.total_links as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", section, count, percentage);
        }
        println!();
    }

    if !stats.sample.is_empty() {
        println!("Sample ({}):", stats.sample.len());
        for url in &stats.sample {
            println!("  - {}", url);
        }
    }
}
