//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.docview/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DocviewConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Path of the shell page under the server root.
    pub shell: Option<String>,
    /// Directory fragment URLs live under.
    pub content_dir: Option<String>,
    /// Landing fragment when no deep link is given.
    pub default_fragment: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SHELL: &str = "index.html";
pub const DEFAULT_CONTENT_DIR: &str = "content";
pub const DEFAULT_FRAGMENT: &str = "index.html";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub shell: String,
    pub content_dir: String,
    pub default_fragment: String,
    /// Deep-link route from the CLI (the incoming hash), if any.
    pub route: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.docview/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".docview").join("config.toml"))
}

/// Load config from `~/.docview/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DocviewConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DocviewConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DocviewConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DocviewConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: DocviewConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Docview Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:8000"   # Or set DOCVIEW_BASE_URL env var

# [site]
# shell = "index.html"                 # Shell page under the server root
# content_dir = "content"              # Directory fragment URLs live under
# default_fragment = "index.html"      # Landing fragment with no deep link
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env
/// vars → CLI.
///
/// `cli_url` is the `--url` flag and `cli_route` the positional deep link
/// (None = not specified).
pub fn resolve(
    config: &DocviewConfig,
    cli_url: Option<&str>,
    cli_route: Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("DOCVIEW_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Shell page: env → config → default
    let shell = std::env::var("DOCVIEW_SHELL")
        .ok()
        .or_else(|| config.site.shell.clone())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string());

    // Content directory: env → config → default
    let content_dir = std::env::var("DOCVIEW_CONTENT_DIR")
        .ok()
        .or_else(|| config.site.content_dir.clone())
        .unwrap_or_else(|| DEFAULT_CONTENT_DIR.to_string());

    // Default landing fragment: env → config → default
    let default_fragment = std::env::var("DOCVIEW_DEFAULT_FRAGMENT")
        .ok()
        .or_else(|| config.site.default_fragment.clone())
        .unwrap_or_else(|| DEFAULT_FRAGMENT.to_string());

    ResolvedConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        shell,
        content_dir,
        default_fragment,
        route: cli_route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = DocviewConfig::default();
        assert!(config.server.base_url.is_none());
        assert!(config.site.default_fragment.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = DocviewConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.shell, DEFAULT_SHELL);
        assert_eq!(resolved.content_dir, DEFAULT_CONTENT_DIR);
        assert_eq!(resolved.default_fragment, DEFAULT_FRAGMENT);
        assert!(resolved.route.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = DocviewConfig {
            server: ServerConfig {
                base_url: Some("http://docs.internal:9000/".to_string()),
            },
            site: SiteConfig {
                shell: Some("shell.html".to_string()),
                content_dir: Some("fragments".to_string()),
                default_fragment: Some("welcome.html".to_string()),
            },
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.base_url, "http://docs.internal:9000");
        assert_eq!(resolved.shell, "shell.html");
        assert_eq!(resolved.content_dir, "fragments");
        assert_eq!(resolved.default_fragment, "welcome.html");
    }

    #[test]
    fn test_resolve_cli_url_wins() {
        let config = DocviewConfig {
            server: ServerConfig {
                base_url: Some("http://from-config".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("http://from-cli"), None);
        assert_eq!(resolved.base_url, "http://from-cli");
    }

    #[test]
    fn test_resolve_carries_deep_link_route() {
        let config = DocviewConfig::default();
        let resolved = resolve(&config, None, Some("large_json.html".to_string()));
        assert_eq!(resolved.route.as_deref(), Some("large_json.html"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[server]
base_url = "http://localhost:3000"

[site]
shell = "index.html"
content_dir = "content"
default_fragment = "index.html"
"#;
        let config: DocviewConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(config.site.content_dir.as_deref(), Some("content"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[site]
default_fragment = "welcome.html"
"#;
        let config: DocviewConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.site.default_fragment.as_deref(), Some("welcome.html"));
        assert!(config.site.shell.is_none());
        assert!(config.server.base_url.is_none());
    }
}
