//! In-process TTL cache with usage statistics.
//!
//! [`TtlCache`] stores values with a per-entry expiry. Expiry is checked
//! lazily on read: there is no background sweep, an expired entry is
//! removed by the first `get` that observes it. Capacity is bounded by
//! moka's LRU policy so a long-running process cannot grow without limit.
//!
//! # Statistics
//!
//! [`CacheStats`] counters are per instance and only ever increase:
//!
//! - `hits` / `misses`: every `get` bumps exactly one of them
//! - `sets`: every `set`, including overwrites
//! - `evictions`: entries dropped because they expired or because the
//!   cache was over capacity
//!
//! `size` is the stored entry count at snapshot time; expired entries that
//! no `get` has observed yet still count.
//!
//! # Concurrency
//!
//! Reads and writes on the same key are serialized by moka. Lazy expiry
//! uses a compute-on-entry so a fresh value written between the read and the
//! removal is never dropped, and a racing pair of readers counts the
//! eviction once.

use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use moka::notification::RemovalCause;
use moka::ops::compute::{CompResult, Op};
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::telemetry;

/// Longest TTL honoured; longer ones are capped so expiry stays representable.
const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Configuration for a [`TtlCache`].
///
/// ```rust
/// # use augur::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(1_000)
///     .ttl(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of live entries. Default: 10,000.
    pub max_entries: u64,
    /// TTL applied by [`TtlCache::set_default`]. Default: 5 minutes.
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            default_ttl: Duration::from_secs(300),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the default time-to-live.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

/// A stored value and the instant it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl.min(MAX_TTL))
            .or_else(|| now.checked_add(Duration::from_secs(u64::from(u32::MAX))))
            .unwrap_or(now);
        Self { value, expires_at }
    }

    /// Whether the entry is stale at `now`. An entry is stale from its
    /// expiry instant onward.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Point-in-time snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub size: u64,
    pub evictions: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    evictions: AtomicU64,
}

/// Bounded key-value cache with per-entry TTL.
///
/// Thread-safe; share it between engines or request handlers with `Arc`.
pub struct TtlCache<K, V> {
    name: String,
    entries: Cache<K, CacheEntry<V>>,
    default_ttl: Duration,
    counters: Arc<Counters>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache. `name` labels its metrics.
    pub fn new(name: impl Into<String>, config: &CacheConfig) -> Self {
        let name = name.into();
        let counters = Arc::new(Counters::default());

        let listener_counters = Arc::clone(&counters);
        let listener_name = name.clone();
        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            // LRU admits every new key; the default TinyLFU may reject a fresh set.
            .eviction_policy(EvictionPolicy::lru())
            .eviction_listener(move |_key, _value, cause| {
                if matches!(cause, RemovalCause::Size) {
                    listener_counters.evictions.fetch_add(1, Ordering::Relaxed);
                    metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL, "cache" => listener_name.clone())
                        .increment(1);
                }
            })
            .build();

        Self {
            name,
            entries,
            default_ttl: config.default_ttl,
            counters,
        }
    }

    /// Name used for metrics labels.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// TTL applied by [`set_default`](Self::set_default).
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        self.entries.insert(key, CacheEntry::new(value, ttl));
        self.counters.sets.fetch_add(1, Ordering::Relaxed);
    }

    /// Store `value` under `key` with the default TTL.
    pub fn set_default(&self, key: K, value: V) {
        self.set(key, value, self.default_ttl);
    }

    /// Look up a live value.
    ///
    /// Returns `None` for unknown or expired keys. The TTL of a hit is not
    /// extended.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => self.name.clone())
                    .increment(1);
                Some(entry.value)
            }
            Some(_) => {
                self.evict_if_expired(key.clone(), now);
                self.record_miss();
                None
            }
            None => {
                self.record_miss();
                None
            }
        }
    }

    /// Explicitly drop an entry. Returns the value if one was live.
    ///
    /// Explicit removal is not counted as an eviction.
    pub fn remove(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        self.entries
            .remove(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value)
    }

    /// Drop every entry. Counters are left untouched.
    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    /// Number of stored entries, including expired ones not yet observed.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter snapshot.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            sets: self.counters.sets.load(Ordering::Relaxed),
            size: self.len(),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
        }
    }

    fn record_miss(&self) {
        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => self.name.clone())
            .increment(1);
    }

    fn evict_if_expired(&self, key: K, now: Instant) {
        let result = self
            .entries
            .entry(key)
            .and_compute_with(|current| match current {
                Some(entry) if entry.value().is_expired_at(now) => Op::Remove,
                _ => Op::Nop,
            });

        if let CompResult::Removed(_) = result {
            self.counters.evictions.fetch_add(1, Ordering::Relaxed);
            metrics::counter!(telemetry::CACHE_EVICTIONS_TOTAL, "cache" => self.name.clone())
                .increment(1);
            trace!(cache = %self.name, "evicted expired entry");
        }
    }
}
