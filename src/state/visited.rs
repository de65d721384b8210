use crate::state::PageVisit;
use crate::TrawlError;
use std::collections::HashMap;

/// Pages claimed by the current traversal
///
/// The set only grows: a page enters as `Visiting` and may move to
/// `Explored`, but is never removed. It is owned by a single traversal and
/// passed explicitly; it is never persisted.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    pages: HashMap<String, PageVisit>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the page has been claimed in this run
    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    /// Returns the visit state of a page, or None if it is unvisited
    pub fn state(&self, url: &str) -> Option<PageVisit> {
        self.pages.get(url).copied()
    }

    /// Claims an unvisited page, marking it `Visiting`
    ///
    /// Check and insert happen in one step so the same page can never be
    /// claimed twice.
    pub fn claim(&mut self, url: &str) -> Result<(), TrawlError> {
        self.transition(url, PageVisit::Visiting)
    }

    /// Marks a claimed page as `Explored`
    pub fn finish(&mut self, url: &str) -> Result<(), TrawlError> {
        self.transition(url, PageVisit::Explored)
    }

    fn transition(&mut self, url: &str, to: PageVisit) -> Result<(), TrawlError> {
        let from = self.state(url);
        if !PageVisit::can_transition(from, to) {
            return Err(TrawlError::InvalidTransition {
                url: url.to_string(),
                from,
                to,
            });
        }

        self.pages.insert(url.to_string(), to);
        Ok(())
    }

    /// Number of pages claimed so far
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates over the claimed page URLs in no particular order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}
