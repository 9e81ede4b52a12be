//! Runtime configuration.
//!
//! Loaded from a TOML file (path in `META_DOCS_CONFIG`, else
//! `<config dir>/meta-docs-mcp/config.toml` when present), then individual
//! fields may be overridden by `META_DOCS_CATALOG` and `META_DOCS_URL`.

use crate::search::resolve::{
    DEFAULT_DOCS_URL_BASE, DEFAULT_MAX_DISPLAY, DEFAULT_MAX_SUGGEST_DISTANCE,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "META_DOCS_CONFIG";
const CATALOG_ENV: &str = "META_DOCS_CATALOG";
const URL_ENV: &str = "META_DOCS_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON catalog to serve.
    pub catalog_path: PathBuf,
    /// Documentation site root, ending in `/`.
    pub docs_url_base: String,
    /// Largest edit distance offered as a "did you mean".
    pub max_suggest_distance: usize,
    /// Most candidates listed per message.
    pub max_display: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("meta-docs.json"),
            docs_url_base: DEFAULT_DOCS_URL_BASE.to_string(),
            max_suggest_distance: DEFAULT_MAX_SUGGEST_DISTANCE,
            max_display: DEFAULT_MAX_DISPLAY,
        }
    }
}

impl Config {
    /// Parse a TOML config document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Invalid config file")?;
        config.normalize();
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("In {}", path.display()))
    }

    /// Resolve configuration from the environment and optional config file.
    pub fn load() -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) => {
                tracing::info!("Using config file {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_overrides(
            std::env::var(CATALOG_ENV).ok().as_deref(),
            std::env::var(URL_ENV).ok().as_deref(),
        );
        Ok(config)
    }

    /// Apply per-field overrides (normally from environment variables).
    pub fn apply_overrides(&mut self, catalog: Option<&str>, url: Option<&str>) {
        if let Some(catalog) = catalog.filter(|c| !c.is_empty()) {
            self.catalog_path = PathBuf::from(catalog);
        }
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.docs_url_base = url.to_string();
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        if let Cow::Owned(expanded) = expand_tilde(&self.catalog_path.to_string_lossy()) {
            self.catalog_path = PathBuf::from(expanded);
        }
        if !self.docs_url_base.ends_with('/') {
            self.docs_url_base.push('/');
        }
        self.max_display = self.max_display.max(1);
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(expand_tilde(&path).into_owned()));
    }
    dirs::config_dir()
        .map(|dir| dir.join("meta-docs-mcp").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
