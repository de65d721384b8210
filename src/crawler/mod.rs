//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with typed failures
//! - Article link extraction from page markup
//! - Request pacing
//! - Depth-bounded traversal coordination

mod extractor;
mod fetcher;
mod pacing;
mod traversal;

pub use extractor::{extract_article_links, ArticleFilter};
pub use fetcher::{build_http_client, user_agent_string, FetchError, HttpFetcher, PageFetcher};
pub use pacing::{FixedDelay, Pacer};
pub use traversal::{RunOutcome, Traversal};

use crate::config::Config;
use crate::storage::open_fresh_store;
use std::future::Future;
use std::path::Path;
use url::Url;

/// Runs a complete traversal from `seed` with the configured policy
///
/// This is the main entry point for a run. It will:
/// 1. Reset the link store at the configured database path
/// 2. Build the HTTP fetcher and pacing policy
/// 3. Explore from the seed until done or until `shutdown` resolves
///
/// The seed must already be validated; see [`crate::url::validate_seed`].
pub async fn run_trawl<Sh>(config: &Config, seed: &Url, shutdown: Sh) -> crate::Result<RunOutcome>
where
    Sh: Future<Output = ()>,
{
    let store = open_fresh_store(Path::new(&config.output.database_path))?;
    tracing::info!("Link store reset at {}", config.output.database_path);

    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let pacer = FixedDelay::from_config(&config.crawler);
    let filter = ArticleFilter::from_config(&config.crawler);

    let mut traversal = Traversal::new(fetcher, store, pacer, filter);
    traversal
        .run_until(seed, config.crawler.max_depth, shutdown)
        .await
}
