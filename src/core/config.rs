//! Configuration management for postsync.
//!
//! This module handles loading configuration from TOML files and
//! environment variables. The search service credential is read
//! separately from the environment and never stored in `Config`.

use crate::core::error::{PostsyncError, Result};
use crate::core::types::IndexSettings;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable holding the search service API key
pub const API_KEY_ENV: &str = "MEILI_MASTER_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub index: IndexSettings,
    #[serde(default)]
    pub static_index: StaticIndexConfig,
}

/// How the site's search index gets built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMethod {
    /// Rebuild an index on a Meilisearch-compatible service
    #[default]
    Meilisearch,
    /// Run an external static-index generator
    Pagefind,
}

impl FromStr for IndexMethod {
    type Err = PostsyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meilisearch" => Ok(IndexMethod::Meilisearch),
            "pagefind" => Ok(IndexMethod::Pagefind),
            other => Err(PostsyncError::ConfigError(format!(
                "Unknown index method '{other}' (expected 'meilisearch' or 'pagefind')"
            ))),
        }
    }
}

impl fmt::Display for IndexMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexMethod::Meilisearch => f.write_str("meilisearch"),
            IndexMethod::Pagefind => f.write_str("pagefind"),
        }
    }
}

/// Search service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub method: IndexMethod,

    /// Base URL of the search service, e.g. `http://localhost:7700`
    #[serde(default)]
    pub host: Option<String>,

    /// Name (uid) of the index that gets rebuilt
    #[serde(default)]
    pub index_name: Option<String>,

    /// Delay between task status polls in milliseconds
    #[serde(default = "default_task_poll_interval")]
    pub task_poll_interval_ms: u64,
}

/// Content tree configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentConfig {
    /// Root directory of the authored posts
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// File extensions treated as content (without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Prefix of every document slug
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Sort discovered files by name before assigning ids
    #[serde(default = "default_sort")]
    pub sort: bool,
}

/// External static-index generator invocation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticIndexConfig {
    #[serde(default = "default_static_command")]
    pub command: String,

    #[serde(default = "default_static_args")]
    pub args: Vec<String>,
}

// Default value functions
fn default_task_poll_interval() -> u64 {
    50
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "mdx".to_string()]
}

fn default_url_prefix() -> String {
    "/posts/".to_string()
}

fn default_sort() -> bool {
    true
}

fn default_static_command() -> String {
    "npx".to_string()
}

fn default_static_args() -> Vec<String> {
    vec![
        "pagefind".to_string(),
        "--site".to_string(),
        "dist".to_string(),
    ]
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            method: IndexMethod::default(),
            host: None,
            index_name: None,
            task_poll_interval_ms: default_task_poll_interval(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extensions: default_extensions(),
            url_prefix: default_url_prefix(),
            sort: default_sort(),
        }
    }
}

impl Default for StaticIndexConfig {
    fn default() -> Self {
        Self {
            command: default_static_command(),
            args: default_static_args(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            PostsyncError::ConfigError(format!("Failed to read config file {path:?}: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg, explicit)
    }

    /// Load config with explicit XDG directories
    ///
    /// File priority:
    /// 1. `explicit` path (the `--config` flag)
    /// 2. POSTSYNC_CONFIG env var
    /// 3. XDG config file (~/.config/postsync/config.toml)
    /// 4. ./postsync.toml
    /// 5. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs, explicit: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::from_file(path)?
        } else if let Ok(config_path) = env::var("POSTSYNC_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("postsync.toml").exists() {
                Self::from_file("postsync.toml")?
            } else {
                Self::default()
            }
        };

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(method) = env::var("POSTSYNC_METHOD") {
            self.search.method = method.parse()?;
        }
        if let Ok(host) = env::var("POSTSYNC_HOST") {
            self.search.host = Some(host);
        }
        if let Ok(name) = env::var("POSTSYNC_INDEX_NAME") {
            self.search.index_name = Some(name);
        }
        if let Ok(interval) = env::var("POSTSYNC_TASK_POLL_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.search.task_poll_interval_ms = ms;
            }
        }
        if let Ok(dir) = env::var("POSTSYNC_CONTENT_DIR") {
            self.content.dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Validate configuration values
    ///
    /// Required fields are checked lazily by the accessors below, since
    /// not every command needs all of them.
    pub fn validate(&self) -> Result<()> {
        if self.search.task_poll_interval_ms == 0 {
            return Err(PostsyncError::ConfigError(
                "Task poll interval must be non-zero".to_string(),
            ));
        }

        if self.content.extensions.is_empty() {
            return Err(PostsyncError::ConfigError(
                "At least one content extension is required".to_string(),
            ));
        }

        if let Some(ext) = self
            .content
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(PostsyncError::ConfigError(format!(
                "Invalid content extension '{ext}' (use e.g. \"md\", without the dot)"
            )));
        }

        if self.index.searchable_attributes.is_empty()
            || self.index.displayed_attributes.is_empty()
        {
            return Err(PostsyncError::ConfigError(
                "Searchable and displayed attribute lists must not be empty".to_string(),
            ));
        }

        if let Some(name) = self.search.index_name.as_deref().map(str::trim) {
            if !name.is_empty() && !is_valid_index_name(name) {
                return Err(PostsyncError::ConfigError(format!(
                    "Invalid index name '{name}': use only letters, digits, '-' and '_'"
                )));
            }
        }

        if self.search.method == IndexMethod::Pagefind && self.static_index.command.is_empty() {
            return Err(PostsyncError::ConfigError(
                "static_index.command must be set for the pagefind method".to_string(),
            ));
        }

        Ok(())
    }

    /// Search service base URL (required for the meilisearch method)
    pub fn host(&self) -> Result<&str> {
        match self.search.host.as_deref().map(str::trim) {
            Some(host) if !host.is_empty() => Ok(host),
            _ => Err(PostsyncError::ConfigError(
                "search.host is required (or set POSTSYNC_HOST)".to_string(),
            )),
        }
    }

    /// Target index name (required for the meilisearch method)
    pub fn index_name(&self) -> Result<&str> {
        match self.search.index_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(PostsyncError::ConfigError(
                "search.index_name is required (or set POSTSYNC_INDEX_NAME)".to_string(),
            )),
        }
    }

    /// Content root directory
    pub fn content_dir(&self) -> Result<&Path> {
        match self.content.dir.as_deref() {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir),
            _ => Err(PostsyncError::ConfigError(
                "content.dir is required (or set POSTSYNC_CONTENT_DIR)".to_string(),
            )),
        }
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Method: {}", self.search.method);
        tracing::info!(
            "  Host: {}",
            self.search.host.as_deref().unwrap_or("<unset>")
        );
        tracing::info!(
            "  Index: {}",
            self.search.index_name.as_deref().unwrap_or("<unset>")
        );
        tracing::info!("  Content dir: {:?}", self.content.dir);
        tracing::info!("  Extensions: {:?}", self.content.extensions);
        tracing::info!("  URL prefix: {}", self.content.url_prefix);
        tracing::info!(
            "  Task poll interval: {}ms",
            self.search.task_poll_interval_ms
        );
    }
}

/// Index uids may only contain ASCII alphanumerics, hyphens and underscores
fn is_valid_index_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Read the search service API key from the environment
pub fn api_key_from_env() -> Result<String> {
    match env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(PostsyncError::ConfigError(format!(
            "{API_KEY_ENV} must be set to the search service API key"
        ))),
    }
}
