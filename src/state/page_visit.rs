/// Visit state definitions for pages explored in one traversal
///
/// A page reference is `Unvisited` until the traversal first picks it up with
/// depth budget left; it is then `Visiting` while its content is fetched and
/// its links are persisted, and `Explored` once its children are queued.
/// Unvisited pages are simply absent from the [`VisitedSet`](super::VisitedSet).
use std::fmt;

/// Represents the visit state of a page that the traversal has claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageVisit {
    /// Page has been claimed and is being fetched and processed
    Visiting,

    /// Page content was handled and its children were scheduled
    Explored,
}

impl PageVisit {
    /// Checks whether moving from `from` (None = unvisited) to `to` is allowed
    ///
    /// Only `Unvisited -> Visiting` and `Visiting -> Explored` are valid;
    /// there are no reverse transitions and no revisits.
    pub fn can_transition(from: Option<Self>, to: Self) -> bool {
        matches!(
            (from, to),
            (None, Self::Visiting) | (Some(Self::Visiting), Self::Explored)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visiting => "visiting",
            Self::Explored => "explored",
        }
    }
}

impl fmt::Display for PageVisit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happened to a single traversal frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The page was claimed, fetched (or failed to fetch) and its links handled
    Explored,

    /// Depth budget was exhausted; the page was not claimed
    DepthExhausted,

    /// The page was already claimed earlier in this run
    AlreadyVisited,
}

impl FrameOutcome {
    pub fn is_skipped(&self) -> bool {
        !matches!(self, Self::Explored)
    }
}
