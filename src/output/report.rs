//! Per-run traversal report

use crate::state::FrameOutcome;
use chrono::{DateTime, Utc};

/// Counters collected while a traversal runs
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalReport {
    /// When the traversal started
    pub started_at: DateTime<Utc>,

    /// When the traversal ended, either normally or by interruption
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages claimed and processed (including ones whose fetch failed)
    pub pages_explored: u64,

    /// Frames dropped because their depth budget was spent
    pub skipped_depth: u64,

    /// Frames dropped because their page was already claimed
    pub skipped_visited: u64,

    /// Fetches that failed at transport or protocol level
    pub fetch_failures: u64,

    /// Frames whose extraction, resolution or persistence failed
    pub frame_errors: u64,

    /// Links found across all explored pages (counted per page)
    pub links_discovered: u64,

    /// Links that were new to the store
    pub links_stored: u64,

    /// Deepest level explored, the seed being level 0
    pub deepest_level: u32,

    /// True if the run was cut short
    pub interrupted: bool,
}

impl TraversalReport {
    /// Starts a new report stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_explored: 0,
            skipped_depth: 0,
            skipped_visited: 0,
            fetch_failures: 0,
            frame_errors: 0,
            links_discovered: 0,
            links_stored: 0,
            deepest_level: 0,
            interrupted: false,
        }
    }

    /// Records the outcome of one frame
    pub fn record_frame(&mut self, outcome: FrameOutcome, level: u32) {
        match outcome {
            FrameOutcome::Explored => {
                self.pages_explored += 1;
                self.deepest_level = self.deepest_level.max(level);
            }
            FrameOutcome::DepthExhausted => self.skipped_depth += 1,
            FrameOutcome::AlreadyVisited => self.skipped_visited += 1,
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Marks the report as interrupted and stamps the finish time
    pub fn interrupt(&mut self) {
        self.interrupted = true;
        self.finish();
    }

    /// Wall-clock duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }
}

impl Default for TraversalReport {
    fn default() -> Self {
        Self::start()
    }
}

/// Prints a traversal report to stdout
pub fn print_report(report: &TraversalReport) {
    println!("=== Traversal Report ===\n");

    if report.interrupted {
        println!("Status: interrupted (partial results kept)");
    } else {
        println!("Status: completed");
    }

    println!("  Started: {}", report.started_at.to_rfc3339());
    if let Some(duration) = report.duration_seconds() {
        println!("  Duration: {:.1}s", duration);
    }
    println!();

    println!("Pages:");
    println!("  Explored: {}", report.pages_explored);
    println!("  Deepest level: {}", report.deepest_level);
    println!("  Skipped (depth exhausted): {}", report.skipped_depth);
    println!("  Skipped (already visited): {}", report.skipped_visited);
    println!();

    println!("Links:");
    println!("  Discovered: {}", report.links_discovered);
    println!("  Newly stored: {}", report.links_stored);
    println!();

    if report.fetch_failures > 0 || report.frame_errors > 0 {
        println!("Failures:");
        println!("  Fetch failures: {}", report.fetch_failures);
        println!("  Frame errors: {}", report.frame_errors);
    }
}
