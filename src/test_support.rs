//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::router::Router;
use crate::core::shell::ShellDocument;
use crate::core::state::App;
use crate::fetch::{FetchError, FragmentFetcher};

/// A canonical shell page with three internal links and one external one.
pub const TEST_SHELL: &str = r#"
<!DOCTYPE html>
<html>
<body>
  <nav class="nav">
    <ul>
      <li><a class="internal" data-content-url="content/index.html">Home</a></li>
      <li><a class="internal" data-content-url="content/tour.html">Tour</a></li>
      <li><a class="internal" data-content-url="content/large_json.html">Large JSON</a></li>
      <li><a href="https://example.com">External</a></li>
    </ul>
  </nav>
  <div id="main"></div>
</body>
</html>
"#;

/// A fetcher serving canned bodies; missing URLs answer 404.
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl FragmentFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or(FetchError::Status { status: 404 })
    }
}

/// Creates a test App over the canonical shell with the default route table.
pub fn test_app() -> App {
    let shell = ShellDocument::parse(TEST_SHELL).expect("test shell parses");
    App::new(shell, Router::new("content", "index.html"))
}
