use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    stored_at: DateTime<Utc>,
    value: V,
}

/// Memoizes values per key for a fixed time-to-live.
///
/// The cache is a plain value: whoever owns it decides its lifetime, and nothing is
/// shared between instances. A zero TTL disables hits entirely.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_at(key, Utc::now())
    }

    pub fn get_at(&self, key: &K, now: DateTime<Utc>) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| now.signed_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| &entry.value)
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Utc::now());
    }

    /// Stores `value` under `key`, replacing any earlier entry and its timestamp.
    pub fn insert_at(&mut self, key: K, value: V, now: DateTime<Utc>) {
        self.entries.insert(
            key,
            CacheEntry {
                stored_at: now,
                value,
            },
        );
    }
}
