//! # Application State
//!
//! Core navigation state for docview. This module contains domain state
//! only - no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! App
//! ├── shell: ShellDocument     // bound nav links + content region
//! ├── router: Router           // route table + history cursor
//! ├── selection: Selection     // the selected nav item marker
//! ├── pending_loads: usize     // fetches in flight (0 = Idle)
//! └── status_message: String   // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::config::ResolvedConfig;
use crate::core::router::Router;
use crate::core::selection::Selection;
use crate::core::shell::ShellDocument;

pub struct App {
    pub shell: ShellDocument,
    pub router: Router,
    pub selection: Selection,
    /// Number of fragment fetches in flight. The router's state machine:
    /// zero is Idle, anything else is Loading. Overlapping navigations stay
    /// in Loading; completions drain the count.
    pub pending_loads: usize,
    pub status_message: String,
}

impl App {
    pub fn new(shell: ShellDocument, router: Router) -> Self {
        Self {
            shell,
            router,
            selection: Selection::new(),
            pending_loads: 0,
            status_message: String::new(),
        }
    }

    pub fn from_config(shell: ShellDocument, config: &ResolvedConfig) -> Self {
        Self::new(
            shell,
            Router::new(&config.content_dir, &config.default_fragment),
        )
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(!app.is_loading());
        assert_eq!(app.selection.current(), None);
        assert_eq!(app.shell.nav.len(), 3);
        assert!(app.status_message.is_empty());
    }
}
