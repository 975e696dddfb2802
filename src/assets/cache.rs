//! Content cache for minified output
//!
//! Entries are keyed by a digest of the exact source text and expire after
//! a fixed TTL. A missing or expired entry is a miss, never an error.

use crate::assets::minify::Minify;
use crate::error::{SonataError, SonataResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Default lifetime of a cached minification
pub const DEFAULT_TTL_HOURS: u32 = 24;

/// Temp files older than this are left over from a crashed writer
const STALE_TMP_AGE: std::time::Duration = std::time::Duration::from_secs(60);

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Key/value store with expiry, shared between requests
pub trait ContentCache: Send + Sync {
    /// Cached content for `key`, `None` when absent or expired
    fn get(&self, key: &str) -> SonataResult<Option<String>>;

    /// Store `content` under `key`, replacing any previous entry
    fn set(&self, key: &str, content: &str, ttl: Duration) -> SonataResult<()>;
}

/// A cached value with its expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(content: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            content: content.into(),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// In-process cache, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> SonataResult<std::sync::MutexGuard<'_, HashMap<String, CacheEntry>>> {
        self.entries
            .lock()
            .map_err(|_| SonataError::Internal("memory cache lock poisoned".to_string()))
    }
}

impl ContentCache for MemoryCache {
    fn get(&self, key: &str) -> SonataResult<Option<String>> {
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.content.clone())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, content: &str, ttl: Duration) -> SonataResult<()> {
        self.lock()?
            .insert(key.to_string(), CacheEntry::new(content, ttl));
        Ok(())
    }
}

/// Directory-backed cache, one JSON file per entry
#[derive(Debug, Clone)]
pub struct FileCache {
    cache_dir: PathBuf,
}

impl FileCache {
    /// Open a cache rooted at `cache_dir`, creating it if needed
    pub fn open(cache_dir: impl Into<PathBuf>) -> SonataResult<Self> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir).map_err(|e| {
            SonataError::io(format!("creating cache dir {}", cache_dir.display()), e)
        })?;
        Ok(Self { cache_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Remove expired entries, returning how many were removed
    ///
    /// Abandoned temp files are swept as well but not counted.
    pub fn prune(&self) -> SonataResult<usize> {
        let now = SystemTime::now();
        for path in self.paths_with_extension("tmp")? {
            let stale = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .map(|modified| {
                    now.duration_since(modified)
                        .is_ok_and(|age| age >= STALE_TMP_AGE)
                })
                .unwrap_or(false);
            if stale {
                debug!("Removing abandoned temp file {}", path.display());
                Self::remove_file(&path)?;
            }
        }

        let mut removed = 0;
        for path in self.entry_paths()? {
            let expired = match Self::read_entry(&path) {
                Ok(entry) => entry.is_expired(),
                Err(e) => {
                    warn!("Dropping unreadable cache entry {}: {}", path.display(), e);
                    true
                }
            };
            if expired && Self::remove_file(&path)? {
                removed += 1;
            }
        }
        debug!("Pruned {} cache entries", removed);
        Ok(removed)
    }

    /// Remove every entry and temp file, returning how many entries were removed
    pub fn clear(&self) -> SonataResult<usize> {
        for path in self.paths_with_extension("tmp")? {
            Self::remove_file(&path)?;
        }

        let mut removed = 0;
        for path in self.entry_paths()? {
            if Self::remove_file(&path)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Number of entries currently on disk, expired ones included
    pub fn len(&self) -> SonataResult<usize> {
        Ok(self.entry_paths()?.len())
    }

    pub fn is_empty(&self) -> SonataResult<bool> {
        Ok(self.len()? == 0)
    }

    fn entry_paths(&self) -> SonataResult<Vec<PathBuf>> {
        self.paths_with_extension("json")
    }

    fn paths_with_extension(&self, extension: &str) -> SonataResult<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.cache_dir)
            .map_err(|e| SonataError::io("reading cache directory", e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SonataError::io("reading cache entry", e))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == extension) {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    fn read_entry(path: &Path) -> SonataResult<CacheEntry> {
        let content = fs::read_to_string(path)
            .map_err(|e| SonataError::io(format!("reading cache file {}", path.display()), e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Remove a file, returning false if another worker removed it first
    fn remove_file(path: &Path) -> SonataResult<bool> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SonataError::io(
                format!("removing cache file {}", path.display()),
                e,
            )),
        }
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Temp file name unique to this process and write
    fn tmp_path(&self, key: &str) -> PathBuf {
        let seq = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.cache_dir
            .join(format!("{}.json.{}.{}.tmp", key, std::process::id(), seq))
    }
}

impl ContentCache for FileCache {
    fn get(&self, key: &str) -> SonataResult<Option<String>> {
        let path = self.cache_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let entry = match Self::read_entry(&path) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Ignoring unreadable cache entry {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        if entry.is_expired() {
            debug!("Cache entry {} is expired", key);
            Self::remove_file(&path)?;
            return Ok(None);
        }

        Ok(Some(entry.content))
    }

    fn set(&self, key: &str, content: &str, ttl: Duration) -> SonataResult<()> {
        let path = self.cache_path(key);
        let entry = CacheEntry::new(content, ttl);

        // Write then rename so concurrent readers never see a partial file
        let tmp = self.tmp_path(key);
        fs::write(&tmp, serde_json::to_string(&entry)?)
            .map_err(|e| SonataError::io(format!("writing cache file {}", tmp.display()), e))?;

        if let Err(e) = fs::rename(&tmp, &path) {
            if e.kind() == ErrorKind::NotFound {
                // A concurrent clear swept the temp file; the entry is simply not cached
                warn!("Cache temp file {} vanished before rename", tmp.display());
                return Ok(());
            }
            Self::remove_file(&tmp)?;
            return Err(SonataError::io(
                format!("writing cache file {}", path.display()),
                e,
            ));
        }

        debug!("Cached {} until {}", key, entry.expires_at);
        Ok(())
    }
}

/// Cache key for `text` minified by `minifier`
pub fn cache_key(minifier: &dyn Minify, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let result = hasher.finalize();

    format!("{}-{}", minifier.name(), hex::encode(&result[..16]))
}

/// Memoizes minification through a [`ContentCache`]
#[derive(Clone)]
pub struct MinifyCache {
    cache: Arc<dyn ContentCache>,
    ttl: Duration,
}

impl MinifyCache {
    pub fn new(cache: Arc<dyn ContentCache>) -> Self {
        Self {
            cache,
            ttl: Duration::hours(i64::from(DEFAULT_TTL_HOURS)),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Minified form of `text`, computed at most once per TTL window
    pub fn minify_and_cache(&self, minifier: &dyn Minify, text: &str) -> SonataResult<String> {
        let key = cache_key(minifier, text);

        if let Some(cached) = self.cache.get(&key)? {
            debug!("Minify cache hit {}", key);
            return Ok(cached);
        }

        debug!("Minify cache miss {}, running {} minifier", key, minifier.name());
        let minified = minifier.minify(text)?;
        self.cache.set(&key, &minified, self.ttl)?;
        Ok(minified)
    }
}
