//! # Fragment Fetching
//!
//! The content loader's I/O seam. `FragmentFetcher` abstracts how fragment
//! bodies are obtained; `HttpFetcher` is the real reqwest-backed
//! implementation. `spawn_fetch` runs a fetch on a background task and
//! reports the outcome to the event loop as an `Action`, so completions
//! apply in completion order — when loads overlap, the last to complete
//! wins in the content region. In-flight fetches are never cancelled.

pub mod fetcher;
pub mod http;

pub use fetcher::{FetchError, FragmentFetcher};
pub use http::HttpFetcher;

use std::sync::Arc;
use std::sync::mpsc::Sender;

use log::{debug, warn};

use crate::core::action::Action;
use crate::core::router::Route;

/// Fetch `url` on a background task and send the completion back over the
/// action channel. Failures are logged and reported as `FragmentFailed`;
/// the receiver decides nothing beyond draining the pending count.
pub fn spawn_fetch(
    fetcher: Arc<dyn FragmentFetcher>,
    route: Route,
    url: String,
    tx: Sender<Action>,
) {
    debug!("Fetching fragment {} for route {}", url, route);
    tokio::spawn(async move {
        let action = match fetcher.fetch(&url).await {
            Ok(body) => Action::FragmentLoaded { route, body },
            Err(e) => {
                warn!("Fragment load failed for {}: {}", url, e);
                Action::FragmentFailed { route }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver fetch result for {}: receiver dropped", url);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticFetcher;
    use std::sync::mpsc;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawn_fetch_reports_success_as_fragment_loaded() {
        let fetcher: Arc<dyn FragmentFetcher> =
            Arc::new(StaticFetcher::new(&[("content/tour.html", "<h1>Tour</h1>")]));
        let (tx, rx) = mpsc::channel();

        let route = Route::new("tour.html").unwrap();
        spawn_fetch(fetcher, route.clone(), "content/tour.html".to_string(), tx);

        let action = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            action,
            Action::FragmentLoaded {
                route,
                body: "<h1>Tour</h1>".to_string(),
            }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawn_fetch_reports_failure_as_fragment_failed() {
        let fetcher: Arc<dyn FragmentFetcher> = Arc::new(StaticFetcher::new(&[]));
        let (tx, rx) = mpsc::channel();

        let route = Route::new("missing.html").unwrap();
        spawn_fetch(fetcher, route.clone(), "content/missing.html".to_string(), tx);

        let action = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(action, Action::FragmentFailed { route });
    }
}
