use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while fetching a fragment. All of them are
/// swallowed by the controller (the region stays untouched), but the
/// variants keep the taxonomy visible in logs.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server answered with a non-2xx status. Treated as failure;
    /// no error fragment is injected.
    Status { status: u16 },
    /// The response completed but its body could not be read as text.
    Body(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Status { status } => write!(f, "server returned HTTP {status}"),
            FetchError::Body(msg) => write!(f, "unreadable body: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// How fragment bodies are obtained. The seam between the navigation core
/// and HTTP: tests substitute a canned implementation.
#[async_trait]
pub trait FragmentFetcher: Send + Sync {
    /// GET `url` (relative to the fetcher's root) and return the body on a
    /// 2xx response.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
