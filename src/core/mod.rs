//! # Core Navigation Logic
//!
//! This module contains docview's business logic. It knows nothing about
//! terminals, HTTP clients, or any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (state)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Router (history)     │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │   fetch    │
//!           │  Adapter   │              │ (reqwest)  │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all navigation state in one place
//! - [`action`]: The `Action` enum and `update()` — everything that can happen
//! - [`router`]: Route table and history (the hash/back/forward analogue)
//! - [`shell`]: The host document contract — nav links and the content region
//! - [`selection`]: The at-most-one selected marker on the nav list
//! - [`config`]: TOML config with defaults → file → env → CLI layering

pub mod action;
pub mod config;
pub mod router;
pub mod selection;
pub mod shell;
pub mod state;
