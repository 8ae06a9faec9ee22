//! Configuration loading and resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::labels::Labels;
use crate::types::{Order, QueryState, ShelfResult, DEFAULT_PAGE_SIZE};

/// Catalog endpoint used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "https://library.softly.uz/api/app/books";

/// Settings for a Shelfview front-end. Every field has a default, so a
/// config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    pub api_base: String,
    pub page_size: u32,
    pub order: Order,
    pub debounce_ms: u64,
    /// Per-request timeout. Unset means requests may hang indefinitely.
    pub timeout_ms: Option<u64>,
    pub labels: Labels,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            order: Order::Desc,
            debounce_ms: 400,
            timeout_ms: None,
            labels: Labels::default(),
        }
    }
}

impl ShelfConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> ShelfResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Read a JSON config file, falling back to defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> ShelfResult<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        tracing::info!("Loading config: {}", path.display());
        Self::load(path)
    }

    pub fn initial_state(&self) -> QueryState {
        QueryState::new(self.page_size, self.order)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Resolve the config file path: explicit flag, then `SHELFVIEW_CONFIG`,
/// then `./.shelfview/config.json`, then the home directory.
pub fn resolve_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return PathBuf::from(path);
    }

    if let Ok(env_path) = std::env::var("SHELFVIEW_CONFIG") {
        return PathBuf::from(env_path);
    }

    let cwd_config = PathBuf::from(".shelfview/config.json");
    if cwd_config.exists() {
        return cwd_config;
    }

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".shelfview/config.json")
}

/// Resolve the API base: explicit flag, then `SHELFVIEW_API`, then config.
pub fn resolve_api_base(explicit: Option<&str>, config: &ShelfConfig) -> String {
    if let Some(base) = explicit {
        return base.to_string();
    }

    if let Ok(env_base) = std::env::var("SHELFVIEW_API") {
        if !env_base.trim().is_empty() {
            return env_base;
        }
    }

    config.api_base.clone()
}
