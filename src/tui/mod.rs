//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading** (fetch in flight): polls every ~80ms so the indicator and
//!   the arriving fragment appear promptly.
//! - **Idle**: sleeps up to 250ms, only redraws on events or resize.
//!
//! Fetch completions arrive over an mpsc channel drained after each poll,
//! in completion order — which is what makes the last-to-complete fetch
//! win the content region when navigations overlap.

mod component;
mod components;
mod event;
pub mod html;
mod ui;

use std::io;
use std::sync::mpsc;
use std::sync::Arc;

use log::{debug, info};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::router::Route;
use crate::core::shell::ShellDocument;
use crate::core::state::App;
use crate::fetch::{FragmentFetcher, HttpFetcher, spawn_fetch};
use crate::tui::component::EventHandler;
use crate::tui::components::{ContentViewState, NavListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core navigation logic)
pub struct TuiState {
    pub nav_list: NavListState,
    pub content: ContentViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            nav_list: NavListState::new(),
            content: ContentViewState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn run(config: ResolvedConfig) -> io::Result<()> {
    let fetcher: Arc<dyn FragmentFetcher> = Arc::new(HttpFetcher::new(config.base_url.clone()));

    // The shell page is fetched and bound once, before the terminal is
    // taken over, so startup failures print normally.
    info!("Fetching shell page {} from {}", config.shell, config.base_url);
    let shell_html = fetcher
        .fetch(&config.shell)
        .await
        .map_err(io::Error::other)?;
    let shell = ShellDocument::parse(&shell_html).map_err(io::Error::other)?;
    info!("Bound {} internal nav links", shell.nav.len());

    let mut app = App::from_config(shell, &config);
    let mut tui = TuiState::new();

    // Channel for fetch completions from background tasks
    let (tx, rx) = mpsc::channel();

    // Initial navigation: the CLI deep link plays the incoming hash.
    let initial = config.route.as_deref().and_then(Route::new);
    let effect = update(&mut app, Action::Start(initial));
    dispatch(effect, &fetcher, &tx);

    let mut terminal = ratatui::init();
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Short poll while a fetch is in flight, long when idle.
        let timeout = if app.is_loading() {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for ev in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match ev {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => {}
                TuiEvent::Quit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::CursorUp => tui.nav_list.focus_up(),
                TuiEvent::CursorDown => tui.nav_list.focus_down(app.shell.nav.len()),
                TuiEvent::Activate => {
                    let effect = update(&mut app, Action::Activate(tui.nav_list.focused));
                    dispatch(effect, &fetcher, &tx);
                }
                TuiEvent::Back => {
                    let effect = update(&mut app, Action::Back);
                    dispatch(effect, &fetcher, &tx);
                }
                TuiEvent::Forward => {
                    let effect = update(&mut app, Action::Forward);
                    dispatch(effect, &fetcher, &tx);
                }
                TuiEvent::Reload => {
                    let effect = update(&mut app, Action::Reload);
                    dispatch(effect, &fetcher, &tx);
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.content.handle_event(&ev);
                }
            }
        }

        if should_quit {
            break;
        }

        // Handle fetch completions (completion order = application order)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            dispatch(effect, &fetcher, &tx);
        }
    }

    ratatui::restore();
    Ok(())
}

fn dispatch(effect: Effect, fetcher: &Arc<dyn FragmentFetcher>, tx: &mpsc::Sender<Action>) {
    if let Effect::Load { route, url } = effect {
        spawn_fetch(Arc::clone(fetcher), route, url, tx.clone());
    }
}
