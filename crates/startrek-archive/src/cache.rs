//! Read-through cache of decoded resources

use crate::resource::Resource;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from memory
    pub hits: u64,
    /// Lookups that went to disk
    pub misses: u64,
    /// Resources currently held
    pub entries: usize,
}

/// LRU cache keyed by the requested resource name
///
/// Keys are upper-cased, so `bridge.pal` and `BRIDGE.PAL` share a slot.
/// Only complete resources are ever inserted.
pub struct ResourceCache {
    entries: Mutex<LruCache<String, Resource>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResourceCache {
    /// Create a cache holding up to `capacity` resources
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a resource
    pub fn get(&self, name: &str) -> Option<Resource> {
        let found = self.entries.lock().get(&Self::key(name)).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Store a decoded resource under the name it was requested by
    pub fn insert(&self, name: &str, resource: Resource) {
        self.entries.lock().put(Self::key(name), resource);
    }

    /// Drop everything
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Current counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.lock().len(),
        }
    }

    fn key(name: &str) -> String {
        name.to_ascii_uppercase()
    }
}
