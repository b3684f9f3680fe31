//! # Selection Tracker
//!
//! Maintains the at-most-one "selected" marker on navigation list items.
//! Pure bookkeeping over nav link indices: it never fetches and never
//! touches the content region.
//!
//! Selection is a function of the current route: every route change (link
//! activation, deep link, back/forward) recomputes it via [`Selection::
//! sync_to_route`], so history navigation keeps the highlight in sync
//! instead of leaving it stale on the last clicked item.

use crate::core::shell::NavLink;

/// Index of the nav list item currently carrying the selected marker.
/// `None` until the first navigation completes its route change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection(Option<usize>);

impl Selection {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn current(&self) -> Option<usize> {
        self.0
    }

    /// Move the marker to `target`: whatever item carried it loses it, then
    /// `target` gains it. Tolerates no prior marker (first selection), and
    /// setting the already-selected item is a no-op.
    pub fn set(&mut self, target: usize) {
        self.0 = Some(target);
    }

    /// On first load with no incoming route, mark the first nav list item.
    pub fn initialize_default(&mut self) {
        self.0 = Some(0);
    }

    /// Recompute the marker from the current route: select the nav link
    /// whose fragment URL resolves to `url`. Returns whether a link
    /// matched; on no match the marker is left where it was (the route
    /// points at a fragment no nav link names).
    pub fn sync_to_route(&mut self, links: &[NavLink], url: &str) -> bool {
        match links.iter().position(|l| l.content_url == url) {
            Some(idx) => {
                self.set(idx);
                true
            }
            None => false,
        }
    }
}
