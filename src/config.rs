// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading
//! and saving operator preferences to a `settings.toml` file.
//!
//! Every field is optional in the file; missing or out-of-range values fall
//! back to (or are clamped into) the documented defaults, so a hand-edited
//! file can never put the console into a nonsensical state.
//!
//! # Examples
//!
//! ```no_run
//! use challan_review::config::{self, Config};
//!
//! // Load existing configuration
//! let config = config::load().unwrap_or_default();
//!
//! // The resolved toast defaults feed the notification store
//! let store_config = config.store_config();
//! assert!(store_config.max_visible >= 1);
//! ```

use crate::error::Result;
use crate::media::prefetch::{self, PrefetchConfig};
use crate::notify::notification::{Placement, Timeout};
use crate::notify::store::{StoreConfig, DEFAULT_MAX_VISIBLE, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ChallanReview";

/// Bounds for the number of simultaneously visible toasts.
pub const MIN_MAX_VISIBLE: usize = 1;
pub const MAX_MAX_VISIBLE: usize = 10;

/// Bounds for a non-zero toast timeout. Zero is special: it means sticky.
pub const MIN_TIMEOUT_MS: u64 = 500;
pub const MAX_TIMEOUT_MS: u64 = 60_000;

/// Review backend used when the file does not name one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub toast: ToastSettings,
    #[serde(default)]
    pub prefetch: PrefetchSettings,
    #[serde(default)]
    pub api: ApiSettings,
}

/// `[toast]` section: defaults applied to notifications that don't specify
/// their own placement, timeout or hover behavior.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ToastSettings {
    #[serde(default)]
    pub max_visible: Option<usize>,
    /// Auto-dismiss duration in milliseconds; `0` means sticky.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub placement: Option<Placement>,
    #[serde(default)]
    pub pause_on_hover: Option<bool>,
}

/// `[prefetch]` section: presigned-URL cache tuning.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PrefetchSettings {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub max_entries: Option<usize>,
    #[serde(default)]
    pub window: Option<usize>,
    #[serde(default)]
    pub refresh_margin_secs: Option<u64>,
}

/// `[api]` section: where the review backend lives.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Keeps the visible-toast cap inside the supported range so a hand-edited
/// config cannot blank the screen or flood it.
fn clamp_max_visible(value: usize) -> usize {
    value.clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE)
}

/// Clamps a non-zero timeout into range; zero passes through as sticky.
fn clamp_timeout_ms(value: u64) -> u64 {
    if value == 0 {
        0
    } else {
        value.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS)
    }
}

impl Config {
    /// Resolves the `[toast]` section into store defaults.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        let timeout = match self.toast.timeout_ms.map(clamp_timeout_ms) {
            Some(ms) => Timeout::from_millis(ms),
            None => Timeout::After(DEFAULT_TIMEOUT),
        };
        StoreConfig {
            max_visible: clamp_max_visible(self.toast.max_visible.unwrap_or(DEFAULT_MAX_VISIBLE)),
            timeout,
            placement: self.toast.placement.unwrap_or_default(),
            pause_on_hover: self.toast.pause_on_hover.unwrap_or(true),
        }
    }

    /// Resolves the `[prefetch]` section into cache configuration.
    #[must_use]
    pub fn prefetch_config(&self) -> PrefetchConfig {
        if !self.prefetch.enabled.unwrap_or(true) {
            return PrefetchConfig::disabled();
        }
        PrefetchConfig::new(
            self.prefetch.max_entries.unwrap_or(prefetch::DEFAULT_MAX_ENTRIES),
            self.prefetch.window.unwrap_or(prefetch::DEFAULT_WINDOW),
            self.prefetch
                .refresh_margin_secs
                .map_or(prefetch::DEFAULT_REFRESH_MARGIN, Duration::from_secs),
        )
    }

    /// Returns the review backend base URL.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
