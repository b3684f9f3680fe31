//! # Shell Document
//!
//! The host document contract. The server's shell page must contain:
//!
//! - a navigation root (`<nav class="nav">`) whose descendants include
//!   anchors carrying the `internal` marker class,
//! - on each internal anchor, a `data-content-url` attribute naming the
//!   fragment URL to load, with the anchor sitting inside an `<li>`,
//! - a container with id `main` that receives injected markup.
//!
//! `ShellDocument::parse` is the link binder's one-shot enumeration: it runs
//! once at startup, and anchors without the internal marker are skipped
//! entirely — they keep their external meaning and never reach the
//! controller.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static NAV_ROOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<nav\b[^>]*\bclass\s*=\s*"[^"]*\bnav\b[^"]*"[^>]*>(.*?)</nav>"#)
        .expect("nav root pattern")
});

static LIST_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<li\b[^>]*>\s*<a\b([^>]*)>(.*?)</a>"#).expect("list anchor pattern")
});

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z][a-zA-Z0-9_-]*)\s*=\s*"([^"]*)""#).expect("attribute pattern")
});

static MAIN_CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<[a-z][a-z0-9]*\b[^>]*\bid\s*=\s*"main""#).expect("main container pattern")
});

static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("inner tag pattern"));

/// A bound navigation link: an internal-marked anchor and the fragment URL
/// it loads. Its index in `ShellDocument::nav` doubles as the identity of
/// the parent list item the selected marker applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    /// Fragment URL relative to the server root, e.g. `content/tour.html`.
    pub content_url: String,
}

/// The element with id `main`: its markup is replaced on each successful
/// load. The revision counter ticks on every injection so the renderer
/// (the highlighter pass) runs exactly once per load.
#[derive(Debug, Default)]
pub struct ContentRegion {
    html: String,
    rev: u64,
}

impl ContentRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, body: String) {
        self.html = body;
        self.rev += 1;
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ShellError {
    /// No `<nav class="nav">` element in the shell page.
    MissingNavRoot,
    /// No container with id `main` to inject fragments into.
    MissingMain,
    /// The nav root contains no internal-marked anchors to bind.
    NoInternalLinks,
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::MissingNavRoot => write!(f, "shell page has no <nav class=\"nav\"> root"),
            ShellError::MissingMain => write!(f, "shell page has no container with id \"main\""),
            ShellError::NoInternalLinks => {
                write!(f, "shell page declares no internal navigation links")
            }
        }
    }
}

impl std::error::Error for ShellError {}

/// The parsed shell page: the bound nav links and the content region.
#[derive(Debug)]
pub struct ShellDocument {
    pub nav: Vec<NavLink>,
    pub main: ContentRegion,
}

impl ShellDocument {
    /// One-shot enumeration of the shell's internal navigation anchors.
    /// Anchors added to the page after this point are never bound.
    pub fn parse(html: &str) -> Result<ShellDocument, ShellError> {
        let nav_block = NAV_ROOT
            .captures(html)
            .and_then(|c| c.get(1))
            .ok_or(ShellError::MissingNavRoot)?;

        if !MAIN_CONTAINER.is_match(html) {
            return Err(ShellError::MissingMain);
        }

        let mut nav = Vec::new();
        for cap in LIST_ANCHOR.captures_iter(nav_block.as_str()) {
            let attrs = &cap[1];
            let mut class = None;
            let mut content_url = None;
            for attr in ATTR.captures_iter(attrs) {
                match attr[1].to_ascii_lowercase().as_str() {
                    "class" => class = Some(attr[2].to_string()),
                    "data-content-url" => content_url = Some(attr[2].to_string()),
                    _ => {}
                }
            }

            // Only anchors carrying the internal marker participate in
            // single-page navigation. External links are left alone.
            let is_internal = class
                .as_deref()
                .is_some_and(|c| c.split_whitespace().any(|t| t == "internal"));
            if !is_internal {
                continue;
            }
            let Some(url) = content_url.filter(|u| !u.is_empty()) else {
                continue;
            };

            let label = decode_entities(INNER_TAG.replace_all(&cap[2], "").trim());
            nav.push(NavLink {
                label,
                content_url: url,
            });
        }

        if nav.is_empty() {
            return Err(ShellError::NoInternalLinks);
        }

        Ok(ShellDocument {
            nav,
            main: ContentRegion::new(),
        })
    }
}

/// Decode the handful of entities the shell contract can produce. The
/// server is trusted; anything exotic passes through untouched.
pub fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHELL: &str = r#"
<!DOCTYPE html>
<html>
<body>
  <nav class="nav sidebar">
    <ul>
      <li><a class="internal" data-content-url="content/index.html">Home</a></li>
      <li><a class="internal highlight" data-content-url="content/tour.html">Feature <em>Tour</em></a></li>
      <li><a class="internal" data-content-url="content/large_json.html">Large JSON</a></li>
      <li><a href="https://example.com">External docs</a></li>
    </ul>
  </nav>
  <div id="main"></div>
</body>
</html>
"#;

    #[test]
    fn parse_binds_internal_anchors_in_order() {
        let shell = ShellDocument::parse(SHELL).unwrap();
        let urls: Vec<&str> = shell.nav.iter().map(|l| l.content_url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "content/index.html",
                "content/tour.html",
                "content/large_json.html"
            ]
        );
    }

    #[test]
    fn parse_skips_anchors_without_internal_marker() {
        let shell = ShellDocument::parse(SHELL).unwrap();
        assert!(shell.nav.iter().all(|l| l.label != "External docs"));
    }

    #[test]
    fn labels_strip_inner_tags() {
        let shell = ShellDocument::parse(SHELL).unwrap();
        assert_eq!(shell.nav[1].label, "Feature Tour");
    }

    #[test]
    fn internal_marker_matches_whole_class_token() {
        let html = r#"
<nav class="nav">
  <ul><li><a class="internally-wrong" data-content-url="content/x.html">X</a></li></ul>
</nav>
<div id="main"></div>
"#;
        // `internally-wrong` must not count as the internal marker.
        let err = ShellDocument::parse(html).unwrap_err();
        assert_eq!(err, ShellError::NoInternalLinks);
    }

    #[test]
    fn missing_nav_root_is_rejected() {
        let err = ShellDocument::parse(r#"<div id="main"></div>"#).unwrap_err();
        assert_eq!(err, ShellError::MissingNavRoot);
    }

    #[test]
    fn missing_main_container_is_rejected() {
        let html = r#"
<nav class="nav">
  <ul><li><a class="internal" data-content-url="content/a.html">A</a></li></ul>
</nav>
"#;
        assert_eq!(ShellDocument::parse(html).unwrap_err(), ShellError::MissingMain);
    }

    #[test]
    fn content_region_replace_bumps_revision() {
        let mut region = ContentRegion::new();
        assert_eq!(region.rev(), 0);
        region.replace("<p>hello</p>".to_string());
        assert_eq!(region.html(), "<p>hello</p>");
        assert_eq!(region.rev(), 1);
        region.replace("<p>again</p>".to_string());
        assert_eq!(region.rev(), 2);
    }

    #[test]
    fn entities_decode() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt;"), "a & b <c>");
    }
}
