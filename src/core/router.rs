//! # Router
//!
//! Translates between routes (the URL-hash analogue) and fragment URLs, and
//! keeps the browsing history so back/forward work.
//!
//! There is one route pattern: the route `file` (any non-empty filename)
//! maps to the fragment URL `<content_dir>/file`. The current route is a
//! function of the history cursor — it is never stored separately.

use std::fmt;

/// A route: the non-empty filename that would follow `#` in the original
/// single-page site. `large_json.html` resolves to `content/large_json.html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route(String);

impl Route {
    /// Build a route from user input. A leading `#` is tolerated (deep links
    /// are often pasted with one). Empty input is not a route.
    pub fn new(raw: &str) -> Option<Route> {
        let trimmed = raw.trim().trim_start_matches('#');
        if trimmed.is_empty() {
            None
        } else {
            Some(Route(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Route table plus history. Constructed once at startup and owned by the
/// `App` — there is no process-wide router singleton.
pub struct Router {
    content_dir: String,
    default_fragment: String,
    history: Vec<Route>,
    cursor: usize,
}

impl Router {
    pub fn new(content_dir: &str, default_fragment: &str) -> Self {
        Self {
            content_dir: content_dir.trim_matches('/').to_string(),
            default_fragment: default_fragment.to_string(),
            history: Vec::new(),
            cursor: 0,
        }
    }

    /// The route table: route → fragment URL.
    pub fn resolve(&self, route: &Route) -> String {
        format!("{}/{}", self.content_dir, route.as_str())
    }

    /// The route currently addressed by the history cursor, if any.
    pub fn current(&self) -> Option<&Route> {
        self.history.get(self.cursor)
    }

    /// Navigate to `target`: either a bare filename (`tour.html`) or a path
    /// relative to the content root (`content/tour.html`). Both normalize to
    /// the same route. Pushes a history entry, discarding any forward
    /// entries, the way a browser does on a fresh navigation.
    ///
    /// With `trigger`, returns the new route so the caller invokes the
    /// content loader; without, the history is updated silently. Empty
    /// targets are ignored. Navigating to the current route does not push a
    /// duplicate entry (assigning the same hash twice doesn't either), but
    /// with `trigger` it still reports the route so a retry reloads.
    pub fn navigate(&mut self, target: &str, trigger: bool) -> Option<Route> {
        let prefix = format!("{}/", self.content_dir);
        let bare = target.strip_prefix(prefix.as_str()).unwrap_or(target);
        let route = Route::new(bare)?;

        if self.current() != Some(&route) {
            if !self.history.is_empty() {
                self.history.truncate(self.cursor + 1);
            }
            self.history.push(route.clone());
            self.cursor = self.history.len() - 1;
        }

        if trigger { Some(route) } else { None }
    }

    /// Begin routing. With no incoming route, navigates to the default
    /// landing fragment; with a deep link, that route becomes the first
    /// history entry. Returns the route the content loader should resolve.
    pub fn start(&mut self, initial: Option<Route>) -> Route {
        let route = initial.unwrap_or_else(|| Route(self.default_fragment.clone()));
        self.history.push(route.clone());
        self.cursor = self.history.len() - 1;
        route
    }

    /// Move back one history entry, returning the route now current.
    pub fn back(&mut self) -> Option<Route> {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.current().cloned()
        } else {
            None
        }
    }

    /// Move forward one history entry, returning the route now current.
    pub fn forward(&mut self) -> Option<Route> {
        if self.cursor + 1 < self.history.len() {
            self.cursor += 1;
            self.current().cloned()
        } else {
            None
        }
    }
}
