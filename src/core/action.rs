//! # Actions
//!
//! Everything that can happen in docview becomes an `Action`.
//! User opens a nav link? That's `Action::Activate(index)`.
//! A fetch finishes? That's `Action::FragmentLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action and
//! applies the transition. No I/O here — fetching happens elsewhere, driven
//! by the returned `Effect`.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```
//!
//! Every route change — activation, deep link, back/forward, reload —
//! funnels through `route_changed`, which syncs the selection marker and
//! emits exactly one `Effect::Load`. Completions apply in arrival order, so
//! when loads overlap the last one to complete wins in the content region.

use crate::core::router::Route;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Begin routing: deep-link route, or `None` for the default landing.
    Start(Option<Route>),
    /// An internal nav link was activated, by index.
    Activate(usize),
    Back,
    Forward,
    /// Re-dispatch the current route through the content loader.
    Reload,
    /// A fetch completed with a 2xx body.
    FragmentLoaded { route: Route, body: String },
    /// A fetch failed (network, non-2xx, unreadable body). The region is
    /// left untouched; the error was already logged where it surfaced.
    FragmentFailed { route: Route },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Fetch `url` and report back as `FragmentLoaded`/`FragmentFailed`.
    Load { route: Route, url: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Start(initial) => {
            let had_deep_link = initial.is_some();
            let route = app.router.start(initial);
            let url = app.router.resolve(&route);
            if !app.selection.sync_to_route(&app.shell.nav, &url) && !had_deep_link {
                // Default landing named by no nav link: still highlight the
                // first item, matching what a cold load shows.
                app.selection.initialize_default();
            }
            begin_load(app, route, url)
        }
        Action::Activate(index) => match app.shell.nav.get(index) {
            Some(link) => {
                let target = link.content_url.clone();
                match app.router.navigate(&target, true) {
                    Some(route) => route_changed(app, route),
                    None => Effect::None,
                }
            }
            None => Effect::None,
        },
        Action::Back => match app.router.back() {
            Some(route) => route_changed(app, route),
            None => Effect::None,
        },
        Action::Forward => match app.router.forward() {
            Some(route) => route_changed(app, route),
            None => Effect::None,
        },
        Action::Reload => match app.router.current().cloned() {
            Some(route) => route_changed(app, route),
            None => Effect::None,
        },
        Action::FragmentLoaded { route, body } => {
            app.pending_loads = app.pending_loads.saturating_sub(1);
            app.shell.main.replace(body);
            app.status_message = route.to_string();
            Effect::None
        }
        Action::FragmentFailed { route: _ } => {
            // Swallowed: no recovery, no error UI. Activation stays live so
            // the user can retry.
            app.pending_loads = app.pending_loads.saturating_sub(1);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// The route-change handler: selection follows the route, then the content
/// loader is invoked for the resolved fragment URL.
fn route_changed(app: &mut App, route: Route) -> Effect {
    let url = app.router.resolve(&route);
    app.selection.sync_to_route(&app.shell.nav, &url);
    begin_load(app, route, url)
}

fn begin_load(app: &mut App, route: Route, url: String) -> Effect {
    app.pending_loads += 1;
    Effect::Load { route, url }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn loaded(route: &Route, body: &str) -> Action {
        Action::FragmentLoaded {
            route: route.clone(),
            body: body.to_string(),
        }
    }

    #[test]
    fn cold_start_loads_default_landing_and_selects_first_item() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Start(None));
        assert_eq!(
            effect,
            Effect::Load {
                route: Route::new("index.html").unwrap(),
                url: "content/index.html".to_string(),
            }
        );
        assert_eq!(app.selection.current(), Some(0));
        assert!(app.is_loading());
    }

    #[test]
    fn deep_link_start_skips_default_landing() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Start(Route::new("large_json.html")));
        let Effect::Load { url, .. } = effect else {
            panic!("expected a load effect");
        };
        assert_eq!(url, "content/large_json.html");
        // Exactly one load was requested — no index.html fetch.
        assert_eq!(app.pending_loads, 1);
        assert_eq!(app.selection.current(), Some(2));
    }

    #[test]
    fn activation_routes_selects_and_loads() {
        let mut app = test_app();
        update(&mut app, Action::Start(None));

        let effect = update(&mut app, Action::Activate(1));
        assert_eq!(
            effect,
            Effect::Load {
                route: Route::new("tour.html").unwrap(),
                url: "content/tour.html".to_string(),
            }
        );
        assert_eq!(app.selection.current(), Some(1));
        assert_eq!(app.router.current().unwrap().as_str(), "tour.html");
    }

    #[test]
    fn activation_of_unknown_index_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::Start(None));
        assert_eq!(update(&mut app, Action::Activate(99)), Effect::None);
    }

    #[test]
    fn successful_load_swaps_region_and_drains_pending() {
        let mut app = test_app();
        update(&mut app, Action::Start(None));
        let route = Route::new("index.html").unwrap();

        update(&mut app, loaded(&route, "<h1>Index</h1>"));
        assert_eq!(app.shell.main.html(), "<h1>Index</h1>");
        assert_eq!(app.shell.main.rev(), 1);
        assert!(!app.is_loading());
        assert_eq!(app.status_message, "index.html");
    }

    #[test]
    fn failed_load_leaves_region_untouched() {
        let mut app = test_app();
        update(&mut app, Action::Start(None));
        let route = Route::new("index.html").unwrap();
        update(&mut app, loaded(&route, "<h1>Index</h1>"));

        update(&mut app, Action::Activate(1));
        update(
            &mut app,
            Action::FragmentFailed {
                route: Route::new("tour.html").unwrap(),
            },
        );
        assert_eq!(app.shell.main.html(), "<h1>Index</h1>");
        assert_eq!(app.shell.main.rev(), 1);
        assert!(!app.is_loading());
    }

    #[test]
    fn back_reissues_load_and_resyncs_selection() {
        let mut app = test_app();
        update(&mut app, Action::Start(Route::new("large_json.html")));
        update(&mut app, Action::Activate(1));
        assert_eq!(app.selection.current(), Some(1));

        let effect = update(&mut app, Action::Back);
        let Effect::Load { route, url } = effect else {
            panic!("back must reissue a load");
        };
        assert_eq!(route.as_str(), "large_json.html");
        assert_eq!(url, "content/large_json.html");
        // Selection follows history, not just clicks.
        assert_eq!(app.selection.current(), Some(2));
    }

    #[test]
    fn overlapping_loads_resolve_in_completion_order() {
        let mut app = test_app();
        update(&mut app, Action::Start(None));
        update(&mut app, Action::Activate(1));
        assert_eq!(app.pending_loads, 2);

        let index = Route::new("index.html").unwrap();
        let tour = Route::new("tour.html").unwrap();

        // The tour fetch was issued second but completes first; the slower
        // index fetch completes last and wins in the region.
        update(&mut app, loaded(&tour, "<p>tour</p>"));
        update(&mut app, loaded(&index, "<p>index</p>"));
        assert_eq!(app.shell.main.html(), "<p>index</p>");
        assert!(!app.is_loading());
    }

    #[test]
    fn reload_reissues_current_route() {
        let mut app = test_app();
        update(&mut app, Action::Start(None));
        let effect = update(&mut app, Action::Reload);
        let Effect::Load { url, .. } = effect else {
            panic!("reload must load");
        };
        assert_eq!(url, "content/index.html");
        // Reload does not grow history.
        assert_eq!(update(&mut app, Action::Back), Effect::None);
    }

    #[test]
    fn exactly_one_item_selected_after_any_completed_navigation() {
        let mut app = test_app();
        update(&mut app, Action::Start(None));
        for action in [Action::Activate(2), Action::Back, Action::Forward] {
            update(&mut app, action);
            assert!(app.selection.current().is_some());
        }
    }

    #[test]
    fn quit_action_produces_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
