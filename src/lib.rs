//! Wiki-Trawl: a depth-bounded crawler for a wiki's internal article links
//!
//! Starting from a seed page, this crate fetches pages, extracts same-site
//! article links, records each discovered link in a SQLite store and explores
//! every link up to a fixed depth, never visiting a page twice in one run.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Wiki-Trawl operations
#[derive(Debug, Error)]
pub enum TrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid visit transition for {url}: {from:?} -> {to:?}")]
    InvalidTransition {
        url: String,
        from: Option<state::PageVisit>,
        to: state::PageVisit,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("Link {link} leaves origin {origin}")]
    CrossOrigin { link: String, origin: String },
}

/// Result type alias for Wiki-Trawl operations
pub type Result<T> = std::result::Result<T, TrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{RunOutcome, Traversal};
pub use output::TraversalReport;
pub use state::{PageVisit, VisitedSet};
pub use storage::{LinkStore, SqliteLinkStore};
pub use self::url::{origin_of, resolve_link, validate_seed};
