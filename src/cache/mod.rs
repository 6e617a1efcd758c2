//! Caching subsystem.
//!
//! - [`TtlCache`]: bounded in-process store with per-entry expiry and
//!   hit/miss statistics. Both engines memoize their results in one.
//!
//! - [`create_key`]: deterministic fingerprints of structured input,
//!   used as cache keys.
//!
//! Caches are constructed explicitly and shared by `Arc`; there is no
//! process-wide instance, so tests can use an isolated cache each.

pub mod key;
pub mod ttl;

pub use key::create_key;
pub use ttl::{CacheConfig, CacheEntry, CacheStats, TtlCache};
