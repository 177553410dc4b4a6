//! LRU cache for query results.
//!
//! Keyed by the raw query plus the knobs that change its meaning (result
//! cap and free-text field subset). Values hold catalog indices, not
//! ports: the catalog is immutable for the process lifetime, so indices
//! stay valid and entries stay small. Time-relative queries are never
//! cached; the engine checks that before calling in here.

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

/// Default number of cached queries.
pub const DEFAULT_CACHE_SIZE: usize = 128;

/// A cached result set: positions of the capped hits in the catalog and
/// the pre-cap match total.
#[derive(Debug, Clone)]
pub struct CachedSearch {
    pub indices: Vec<usize>,
    pub total: usize,
}

/// Cache hit/miss counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe LRU over query results. All operations use try-lock and
/// degrade to a miss or a no-op under contention; a search never blocks
/// on the cache.
pub struct QueryCache {
    entries: Mutex<LruCache<u64, CachedSearch>>,
    stats: Mutex<CacheStats>,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    fn key(raw: &str, limit: usize, free_text_mask: u8) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        raw.hash(&mut hasher);
        limit.hash(&mut hasher);
        free_text_mask.hash(&mut hasher);
        hasher.finish()
    }

    pub fn get(&self, raw: &str, limit: usize, free_text_mask: u8) -> Option<CachedSearch> {
        let key = Self::key(raw, limit, free_text_mask);
        let mut entries = self.entries.try_lock().ok()?;
        let found = entries.get(&key).cloned();
        if let Ok(mut stats) = self.stats.try_lock() {
            if found.is_some() {
                stats.hits += 1;
            } else {
                stats.misses += 1;
            }
        }
        found
    }

    pub fn put(&self, raw: &str, limit: usize, free_text_mask: u8, result: CachedSearch) {
        let key = Self::key(raw, limit, free_text_mask);
        if let Ok(mut entries) = self.entries.try_lock() {
            entries.put(key, result);
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.try_lock().map(|s| *s).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.try_lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.try_lock() {
            entries.clear();
        }
        if let Ok(mut stats) = self.stats.try_lock() {
            *stats = CacheStats::default();
        }
    }
}
