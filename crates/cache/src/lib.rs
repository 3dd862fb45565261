//! Process-wide memoization for fetch results.
//!
//! Entries are keyed by a hash of the full query text (or request URL) and
//! expire after a fixed wall-clock interval, so time-anchored queries such as
//! the "current date" growth metrics refresh instead of living for the whole
//! process. A zero TTL disables caching entirely.

use dashmap::DashMap;
use std::{
    hash::{DefaultHasher, Hash, Hasher},
    time::{Duration, Instant},
};

#[derive(Clone, Debug)]
struct Entry<V> {
    inserted: Instant,
    value: V,
}

/// TTL cache for fetched result sets.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: DashMap<u64, Entry<V>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { entries: DashMap::new(), ttl }
    }

    fn hash_key(key: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    /// Look up a fresh entry for `key`. Expired entries are removed on access.
    pub fn get(&self, key: &str) -> Option<V> {
        if self.ttl.is_zero() {
            return None;
        }
        let hash = Self::hash_key(key);
        if let Some(entry) = self.entries.get(&hash) {
            if entry.inserted.elapsed() < self.ttl {
                return Some(entry.value.clone());
            }
        }
        self.entries.remove(&hash);
        None
    }

    /// Store a value for `key`, replacing any previous entry.
    ///
    /// Also sweeps expired entries, so keys that are never looked up again do
    /// not accumulate across the process lifetime.
    pub fn insert(&self, key: &str, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.retain(|_, entry| entry.inserted.elapsed() < self.ttl);
        self.entries.insert(Self::hash_key(key), Entry { inserted: Instant::now(), value });
    }

    /// Number of live (possibly expired but not yet evicted) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
