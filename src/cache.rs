/// TTL cache for search results and subscriber counts
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Fixed TTL for both cache namespaces: 6 hours
pub const CACHE_TTL_SECONDS: u64 = 6 * 60 * 60;

/// Key for a cached result set, derived from the normalized query
pub fn result_key(query: &str) -> String {
    format!("search_{}", query.trim().to_lowercase())
}

/// Key for a cached channel subscriber count
pub fn subscriber_key(channel_id: &str) -> String {
    format!("subs_{}", channel_id)
}

/// Advisory key/value store with per-entry expiry.
///
/// Injected into the orchestrator so tests can substitute an in-memory
/// fake. Implementations must treat every internal failure as a miss;
/// a cache outage is never an error the pipeline sees.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a value, or None on miss/expiry/outage
    async fn get(&self, key: &str) -> Option<String>;

    /// Write a value unconditionally with the given TTL
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64);
}

/// On-disk cache entry envelope
#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    /// Unix timestamp at write time
    timestamp: u64,
    /// Entry lifetime in seconds
    ttl_seconds: u64,
    /// Serialized payload
    value: String,
}

impl CacheEnvelope {
    fn is_valid(&self, now: u64) -> bool {
        now.saturating_sub(self.timestamp) < self.ttl_seconds
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// File-backed cache, one JSON file per key
#[derive(Clone)]
pub struct FileCacheStore {
    cache_dir: PathBuf,
}

impl FileCacheStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Initialize cache directory
    pub async fn initialize(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.cache_dir).await?;
        debug!("cache directory initialized: {}", self.cache_dir.display());
        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        // Keys are built by result_key/subscriber_key and stay filename-safe
        self.cache_dir.join(format!("{}.json", sanitize_key(key)))
    }

    /// Remove every expired entry, returning how many were deleted
    pub async fn cleanup_expired(&self) -> Result<usize> {
        let now = unix_now();
        let mut cleaned = 0;
        let mut entries = tokio::fs::read_dir(&self.cache_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Ok(content) = tokio::fs::read_to_string(&path).await {
                    if let Ok(envelope) = serde_json::from_str::<CacheEnvelope>(&content) {
                        if !envelope.is_valid(now) && tokio::fs::remove_file(&path).await.is_ok() {
                            cleaned += 1;
                        }
                    }
                }
            }
        }

        if cleaned > 0 {
            info!("cleaned up {} expired cache entries", cleaned);
        }
        Ok(cleaned)
    }

    /// Remove every entry regardless of expiry
    pub async fn clear_all(&self) -> Result<usize> {
        let mut cleared = 0;
        let mut entries = tokio::fs::read_dir(&self.cache_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json")
                && tokio::fs::remove_file(&path).await.is_ok()
            {
                cleared += 1;
            }
        }

        info!("cleared {} cache entries", cleared);
        Ok(cleared)
    }
}

/// Keep keys usable as file names across platforms
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        if !path.exists() {
            debug!("cache miss: {}", key);
            return None;
        }

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to read cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<CacheEnvelope>(&content) {
            Ok(envelope) if envelope.is_valid(unix_now()) => {
                debug!("cache hit: {}", key);
                Some(envelope.value)
            }
            Ok(_) => {
                debug!("cache expired: {}", key);
                let _ = tokio::fs::remove_file(&path).await;
                None
            }
            Err(e) => {
                warn!("failed to parse cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) {
        let envelope = CacheEnvelope {
            timestamp: unix_now(),
            ttl_seconds,
            value: value.to_string(),
        };

        let path = self.entry_path(key);
        let json = match serde_json::to_string(&envelope) {
            Ok(json) => json,
            Err(e) => {
                warn!("failed to serialize cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = tokio::fs::write(&path, json).await {
            warn!("failed to write cache entry {}: {}", path.display(), e);
        } else {
            debug!("cached {} (ttl {}s)", key, ttl_seconds);
        }
    }
}

/// In-memory cache for tests and cache-disabled runs
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CacheEnvelope>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().ok()?;
        match entries.get(key) {
            Some(envelope) if envelope.is_valid(unix_now()) => Some(envelope.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                CacheEnvelope {
                    timestamp: unix_now(),
                    ttl_seconds,
                    value: value.to_string(),
                },
            );
        }
    }
}
