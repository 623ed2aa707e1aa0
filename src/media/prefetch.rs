// SPDX-License-Identifier: MPL-2.0
//! Presigned-URL prefetch cache for faster queue navigation.
//!
//! Challan images live in object storage and are served through short-lived
//! presigned URLs minted by the backend. Fetching a URL on demand adds a
//! round-trip right when the officer advances to the next image; this
//! module removes that latency by prefetching URLs for the next few queue
//! entries ahead of time.
//!
//! # Design
//!
//! - **LRU eviction**: least recently used entries are evicted first
//! - **Entry-bounded**: cache size limited by a configurable entry count
//! - **Expiry-aware**: presigned URLs carry their server-issued lifetime;
//!   entries near expiry are treated as absent so navigation never hands
//!   out a URL the object store will reject
//! - **Id-keyed**: entries indexed by challan image id
//!
//! # Usage
//!
//! ```ignore
//! let mut cache = UrlPrefetchCache::new(config);
//!
//! // Check if a fresh URL is already cached
//! if let Some(url) = cache.url(&image_id) {
//!     // Use cached URL
//! }
//!
//! // Find out which upcoming entries still need a fetch
//! let missing = cache.ids_to_prefetch(queue.prefetch_window(cache.window()));
//! ```

use crate::error::{HttpError, Result};
use lru::LruCache;
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// Default maximum number of cached URLs.
pub const DEFAULT_MAX_ENTRIES: usize = 32;

/// Minimum cached URLs.
pub const MIN_MAX_ENTRIES: usize = 4;

/// Maximum cached URLs.
pub const MAX_MAX_ENTRIES: usize = 256;

/// Default number of queue entries to prefetch ahead of the cursor.
pub const DEFAULT_WINDOW: usize = 3;

/// Default safety margin subtracted from a URL's lifetime.
///
/// A URL that expires while the image is still downloading is worse than a
/// cache miss, so anything within the margin counts as stale.
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(15);

/// Configuration for the prefetch cache.
#[derive(Debug, Clone, Copy)]
pub struct PrefetchConfig {
    /// Maximum number of cached URLs.
    pub max_entries: usize,

    /// Number of queue entries to prefetch ahead of the cursor.
    pub window: usize,

    /// Lifetime margin under which an entry counts as stale.
    pub refresh_margin: Duration,

    /// Whether prefetching is enabled.
    pub enabled: bool,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            window: DEFAULT_WINDOW,
            refresh_margin: DEFAULT_REFRESH_MARGIN,
            enabled: true,
        }
    }
}

impl PrefetchConfig {
    /// Creates a prefetch configuration with the entry count clamped to the
    /// supported range.
    #[must_use]
    pub fn new(max_entries: usize, window: usize, refresh_margin: Duration) -> Self {
        Self {
            max_entries: max_entries.clamp(MIN_MAX_ENTRIES, MAX_MAX_ENTRIES),
            window,
            refresh_margin,
            enabled: true,
        }
    }

    /// Creates a disabled prefetch configuration.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// A presigned object-store URL with its server-issued lifetime.
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    url: String,
    issued_at: Instant,
    valid_for: Duration,
}

impl PresignedUrl {
    /// Wraps a freshly minted URL valid for `valid_for` from now.
    #[must_use]
    pub fn new(url: impl Into<String>, valid_for: Duration) -> Self {
        Self {
            url: url.into(),
            issued_at: Instant::now(),
            valid_for,
        }
    }

    /// Returns the URL string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Returns whether the URL is expired, or will be within `margin`.
    #[must_use]
    pub fn is_stale(&self, margin: Duration) -> bool {
        self.issued_at.elapsed() >= self.valid_for.saturating_sub(margin)
    }
}

/// Statistics about prefetch cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefetchStats {
    /// Number of URLs currently in cache.
    pub entry_count: usize,

    /// Number of cache hits (fresh URL found).
    pub hits: u64,

    /// Number of cache misses (URL absent or stale).
    pub misses: u64,

    /// Number of entries evicted due to the size limit.
    pub evictions: u64,

    /// Number of entries dropped because they went stale.
    pub expirations: u64,

    /// Number of URLs inserted.
    pub insertions: u64,
}

impl PrefetchStats {
    /// Returns the cache hit rate as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Rolling LRU cache of presigned URLs, keyed by challan image id.
pub struct UrlPrefetchCache {
    cache: LruCache<String, PresignedUrl>,
    config: PrefetchConfig,
    stats: PrefetchStats,
}

impl UrlPrefetchCache {
    /// Creates a new prefetch cache with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if `DEFAULT_MAX_ENTRIES` is zero, which would indicate a
    /// build configuration error.
    #[must_use]
    pub fn new(config: PrefetchConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(
            NonZeroUsize::new(DEFAULT_MAX_ENTRIES).expect("DEFAULT_MAX_ENTRIES must be non-zero"),
        );

        Self {
            cache: LruCache::new(capacity),
            config,
            stats: PrefetchStats::default(),
        }
    }

    /// Creates a new prefetch cache with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PrefetchConfig::default())
    }

    /// Returns whether prefetching is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Returns the number of queue entries to prefetch ahead of the cursor.
    #[must_use]
    pub fn window(&self) -> usize {
        self.config.window
    }

    /// Inserts a presigned URL for an image id.
    ///
    /// Returns `true` if the URL was inserted, `false` if caching is
    /// disabled or the URL is already stale on arrival.
    pub fn insert(&mut self, image_id: impl Into<String>, url: PresignedUrl) -> bool {
        if !self.config.enabled || url.is_stale(self.config.refresh_margin) {
            return false;
        }

        let image_id = image_id.into();
        if let Some((evicted_id, _)) = self.cache.push(image_id.clone(), url) {
            if evicted_id != image_id {
                self.stats.evictions += 1;
            }
        }
        self.stats.insertions += 1;
        self.stats.entry_count = self.cache.len();
        true
    }

    /// Returns a fresh URL for the image id, updating LRU order.
    ///
    /// Stale entries are dropped and reported as misses.
    pub fn url(&mut self, image_id: &str) -> Option<String> {
        if !self.config.enabled {
            return None;
        }

        match self.cache.get(image_id) {
            Some(entry) if !entry.is_stale(self.config.refresh_margin) => {
                self.stats.hits += 1;
                Some(entry.as_str().to_owned())
            }
            Some(_) => {
                self.cache.pop(image_id);
                self.stats.expirations += 1;
                self.stats.misses += 1;
                self.stats.entry_count = self.cache.len();
                None
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Checks whether a fresh URL is cached, without updating LRU order.
    #[must_use]
    pub fn contains(&self, image_id: &str) -> bool {
        if !self.config.enabled {
            return false;
        }
        self.cache
            .peek(image_id)
            .is_some_and(|entry| !entry.is_stale(self.config.refresh_margin))
    }

    /// Returns the ids from `window_ids` that still need a fetch: absent
    /// from the cache, or present but stale.
    #[must_use]
    pub fn ids_to_prefetch(&self, window_ids: &[String]) -> Vec<String> {
        if !self.config.enabled {
            return Vec::new();
        }

        window_ids
            .iter()
            .filter(|id| !self.contains(id))
            .cloned()
            .collect()
    }

    /// Clears all cached URLs.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats.entry_count = 0;
    }

    /// Returns the current cache statistics.
    #[must_use]
    pub fn stats(&self) -> PrefetchStats {
        self.stats
    }

    /// Returns the current number of cached URLs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns the cache configuration.
    #[must_use]
    pub fn config(&self) -> &PrefetchConfig {
        &self.config
    }
}

impl std::fmt::Debug for UrlPrefetchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlPrefetchCache")
            .field("enabled", &self.config.enabled)
            .field("entry_count", &self.cache.len())
            .field("max_entries", &self.config.max_entries)
            .field("window", &self.config.window)
            .field("stats", &self.stats)
            .finish()
    }
}

/// JSON shape of the backend's presigned-URL endpoint.
#[derive(Debug, Deserialize)]
struct PresignedUrlResponse {
    url: String,
    expires_in_secs: u64,
}

/// Fetches a presigned URL for one image from the review backend.
///
/// This is the async function called by the prefetch task for each id the
/// cache reports as missing.
///
/// # Errors
///
/// Returns an error when the request fails, the backend answers with a
/// non-success status, or the body is not the expected JSON shape.
pub async fn fetch_presigned_url(
    client: &reqwest::Client,
    api_base: &str,
    image_id: &str,
) -> Result<PresignedUrl> {
    let endpoint = format!(
        "{}/review/images/{}/presigned-url",
        api_base.trim_end_matches('/'),
        image_id
    );

    let response = client.get(&endpoint).send().await?;
    if !response.status().is_success() {
        return Err(HttpError::Status(response.status().as_u16()).into());
    }

    let body: PresignedUrlResponse = response.json().await?;
    Ok(PresignedUrl::new(
        body.url,
        Duration::from_secs(body.expires_in_secs),
    ))
}
