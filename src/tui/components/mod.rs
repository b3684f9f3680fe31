//! # TUI Components
//!
//! Components follow two patterns, as in the rest of the tui module:
//!
//! - **Stateless (props-based)**: `TitleBar` receives all data as struct
//!   fields and just renders.
//! - **Stateful (persistent state + transient wrapper)**: `NavListState`
//!   and `ContentViewState` live in `TuiState` across frames; `NavList` and
//!   `ContentView` are created each frame with borrowed state and props.
//!
//! Components receive external data as props, never by reaching into
//! global state — dependencies stay explicit and testable.

pub mod content_view;
pub mod nav_list;
pub mod title_bar;

pub use content_view::{ContentView, ContentViewState};
pub use nav_list::{NavList, NavListState};
pub use title_bar::TitleBar;
