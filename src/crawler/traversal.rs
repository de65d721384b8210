//! Depth-bounded traversal
//!
//! The traversal drives exploration from a seed page: each frame is a page
//! plus its remaining depth budget. Frames are kept on an explicit stack
//! rather than the call stack, which gives depth-first order (a page's
//! children are fully explored before its siblings) without recursion.
//!
//! For every frame:
//! 1. Skip it if the depth budget is spent or the page was already claimed
//! 2. Claim the page in the visited set
//! 3. Pause, then fetch the page; a failed fetch yields no links
//! 4. Extract article hrefs and resolve them against the origin
//! 5. Persist the discovered links
//! 6. Push one child frame per link with one less unit of depth
//!
//! Failures in steps 3-5 are logged and contained in that frame.

use crate::crawler::extractor::{extract_article_links, ArticleFilter};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::pacing::Pacer;
use crate::output::TraversalReport;
use crate::state::{FrameOutcome, VisitedSet};
use crate::storage::LinkStore;
use crate::url::{origin_of, resolve_link};
use std::collections::BTreeSet;
use std::future::Future;
use url::Url;

/// One unit of pending work
#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    url: Url,
    depth: u32,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Every reachable page within the depth budget was handled
    Completed(TraversalReport),

    /// The shutdown signal fired first; links from finished pages are kept
    Interrupted(TraversalReport),
}

impl RunOutcome {
    pub fn report(&self) -> &TraversalReport {
        match self {
            Self::Completed(report) | Self::Interrupted(report) => report,
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted(_))
    }
}

/// Traversal engine over a fetcher, a link store and a pacing policy
pub struct Traversal<F, S, P> {
    fetcher: F,
    store: S,
    pacer: P,
    filter: ArticleFilter,
    report: TraversalReport,
}

impl<F, S, P> Traversal<F, S, P>
where
    F: PageFetcher,
    S: LinkStore,
    P: Pacer,
{
    pub fn new(fetcher: F, store: S, pacer: P, filter: ArticleFilter) -> Self {
        Self {
            fetcher,
            store,
            pacer,
            filter,
            report: TraversalReport::start(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Counters of the current (or last) run, including partial ones
    pub fn report(&self) -> &TraversalReport {
        &self.report
    }

    /// Explores from `seed` with a fresh visited set
    ///
    /// # Arguments
    ///
    /// * `seed` - The page to start from; its origin bounds the traversal
    /// * `depth` - Depth budget of the seed; 0 explores nothing
    pub async fn run(&mut self, seed: &Url, depth: u32) -> crate::Result<TraversalReport> {
        let origin = origin_of(seed)?;
        let mut visited = VisitedSet::new();
        Ok(self.explore(&origin, seed.clone(), depth, &mut visited).await)
    }

    /// Runs until the traversal completes or `shutdown` resolves
    ///
    /// When `shutdown` wins, the in-flight fetch is dropped and no further
    /// frames are processed. Links persisted by earlier frames stay in the
    /// store.
    pub async fn run_until<Sh>(
        &mut self,
        seed: &Url,
        depth: u32,
        shutdown: Sh,
    ) -> crate::Result<RunOutcome>
    where
        Sh: Future<Output = ()>,
    {
        let origin = origin_of(seed)?;
        let mut visited = VisitedSet::new();

        let completed = tokio::select! {
            report = self.explore(&origin, seed.clone(), depth, &mut visited) => Some(report),
            _ = shutdown => None,
        };

        match completed {
            Some(report) => Ok(RunOutcome::Completed(report)),
            None => {
                self.report.interrupt();
                tracing::warn!(
                    "Traversal interrupted after {} pages; {} links stored so far",
                    self.report.pages_explored,
                    self.report.links_stored
                );
                Ok(RunOutcome::Interrupted(self.report.clone()))
            }
        }
    }

    /// Explores `current` and everything reachable from it within `depth`
    ///
    /// `visited` is consulted and extended in place, so a caller can run
    /// several explorations that share one visited set.
    pub async fn explore(
        &mut self,
        origin: &Url,
        current: Url,
        depth: u32,
        visited: &mut VisitedSet,
    ) -> TraversalReport {
        self.report = TraversalReport::start();
        tracing::info!("Exploring from {} with depth {}", current, depth);

        let mut stack = vec![Frame {
            url: current,
            depth,
        }];

        while let Some(frame) = stack.pop() {
            let level = depth - frame.depth;
            let outcome = self.step(origin, frame, visited, &mut stack).await;
            self.report.record_frame(outcome, level);

            if !outcome.is_skipped() && self.report.pages_explored % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages explored, {} frames pending, {} links stored",
                    self.report.pages_explored,
                    stack.len(),
                    self.report.links_stored
                );
            }
        }

        self.report.finish();
        tracing::info!(
            "Traversal finished: {} pages explored, {} links stored",
            self.report.pages_explored,
            self.report.links_stored
        );

        self.report.clone()
    }

    /// Handles one frame, pushing its children onto `stack`
    async fn step(
        &mut self,
        origin: &Url,
        frame: Frame,
        visited: &mut VisitedSet,
        stack: &mut Vec<Frame>,
    ) -> FrameOutcome {
        if frame.depth == 0 {
            tracing::trace!("Depth exhausted at {}", frame.url);
            return FrameOutcome::DepthExhausted;
        }

        if visited.contains(frame.url.as_str()) {
            tracing::trace!("Already visited {}", frame.url);
            return FrameOutcome::AlreadyVisited;
        }

        if let Err(e) = visited.claim(frame.url.as_str()) {
            tracing::warn!("Could not claim {}: {}", frame.url, e);
            return FrameOutcome::AlreadyVisited;
        }

        tracing::debug!("Visiting {} (depth {})", frame.url, frame.depth);

        let children = match self.process_page(origin, &frame.url).await {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!(
                    "Error processing {} at depth {}: {}",
                    frame.url,
                    frame.depth,
                    e
                );
                self.report.frame_errors += 1;
                Vec::new()
            }
        };

        // Reverse so the lexically first child is popped first
        for url in children.into_iter().rev() {
            stack.push(Frame {
                url,
                depth: frame.depth - 1,
            });
        }

        if let Err(e) = visited.finish(frame.url.as_str()) {
            tracing::warn!("Could not mark {} explored: {}", frame.url, e);
        }

        FrameOutcome::Explored
    }

    /// Fetches a page, persists its article links and returns them
    ///
    /// A failed fetch is not an error: the page contributes no links.
    async fn process_page(&mut self, origin: &Url, url: &Url) -> crate::Result<Vec<Url>> {
        self.pacer.pause().await;

        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Fetch failed, treating as no links: {}", e);
                self.report.fetch_failures += 1;
                return Ok(Vec::new());
            }
        };

        let discovered = self.discover_links(&body, origin);
        if discovered.is_empty() {
            tracing::debug!("No article links on {}", url);
            return Ok(Vec::new());
        }

        let urls: Vec<String> = discovered.iter().map(|u| u.to_string()).collect();
        let inserted = self.store.upsert_all(&urls)?;

        self.report.links_discovered += urls.len() as u64;
        self.report.links_stored += inserted as u64;
        tracing::debug!(
            "{}: {} article links, {} new",
            url,
            urls.len(),
            inserted
        );

        Ok(discovered.into_iter().collect())
    }

    /// Extracts and resolves the article links in a page body
    fn discover_links(&self, body: &str, origin: &Url) -> BTreeSet<Url> {
        extract_article_links(body, &self.filter)
            .into_iter()
            .filter_map(|raw| match resolve_link(&raw, origin) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::debug!("Dropping link {}: {}", raw, e);
                    None
                }
            })
            .collect()
    }
}
