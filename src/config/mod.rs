//! Configuration module for Wiki-Trawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional; [`Config::default`] mirrors the built-in
//! crawl policy (depth 6, 300ms pacing, `/wiki` article links).
//!
//! # Example
//!
//! ```no_run
//! use wiki_trawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("trawl.toml")).unwrap();
//! println!("Traversal depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
