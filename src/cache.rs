//! Resolution caching.
//!
//! [`RouteCache`] memoizes which route a path resolved to. It is gated
//! behind the `cache` feature flag and uses the [`lru`] crate internally.
//!
//! Tables are immutable, so a cached answer is always the answer a fresh
//! scan would give. The cache only remembers the *index* of the matched
//! route; parameters are re-captured from that single pattern on every hit.
//! A cache remembers which table filled it and clears itself when handed a
//! different one.
//!
//! [`CacheStats`] tracks hits, misses and invalidations so you can monitor
//! cache effectiveness at runtime.
//!
//! # Examples
//!
//! ```
//! use route_table::cache::RouteCache;
//! use route_table::{ComponentRef, RouteTable};
//!
//! let table = RouteTable::builder()
//!     .route("/about", ComponentRef::ready("AboutView", ()))
//!     .build()
//!     .unwrap();
//!
//! let mut cache = RouteCache::new();
//! cache.resolve(&table, "/about");
//! cache.resolve(&table, "/about");
//!
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

use crate::pattern::normalize_path;
use crate::resolve::{match_at, resolve, Resolution};
use crate::table::RouteTable;
use crate::{debug_log, trace_log};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Counters tracking cache hit/miss rates and invalidations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that had to scan the table.
    pub misses: usize,
    /// Number of full cache invalidations.
    pub invalidations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if no lookups have been performed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache from normalized path to matched route index.
///
/// Default capacity is 1000 entries.
#[derive(Debug)]
pub struct RouteCache {
    entries: LruCache<String, Option<usize>>,
    table_id: Option<u64>,
    stats: CacheStats,
}

impl RouteCache {
    const DEFAULT_CAPACITY: usize = 1000;

    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::new(Self::DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }

    /// Create a cache holding at most `capacity` paths.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            table_id: None,
            stats: CacheStats::default(),
        }
    }

    /// Resolve `path` against `table`, consulting the cache first.
    ///
    /// Always returns the same resolution as [`resolve`](crate::resolve()).
    pub fn resolve<'a, V>(&mut self, table: &'a RouteTable<V>, path: &str) -> Resolution<'a, V> {
        if self.table_id != Some(table.id()) {
            if self.table_id.is_some() {
                self.clear();
            }
            self.table_id = Some(table.id());
        }

        let normalized = normalize_path(path);

        if let Some(&cached) = self.entries.get(&*normalized) {
            self.stats.hits += 1;
            trace_log!("Route cache hit for path: '{}'", normalized);
            return match cached {
                Some(index) => match_at(table.routes(), index, &normalized),
                None => Resolution::NotFound,
            };
        }

        self.stats.misses += 1;
        trace_log!("Route cache miss for path: '{}'", normalized);

        let resolution = resolve(table, &normalized);
        self.entries
            .push(normalized.into_owned(), resolution.index());
        resolution
    }

    /// Drop all entries and increment the invalidation counter.
    pub fn clear(&mut self) {
        let len = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Route cache cleared: {} entries removed ({} total invalidations, hit rate: {:.1}%)",
            len,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    /// Return a reference to the current cache statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset all counters in [`CacheStats`] to zero.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentRef;

    fn table() -> RouteTable<()> {
        RouteTable::builder()
            .route("/", ComponentRef::ready("home", ()))
            .route("/users/:id", ComponentRef::ready("user", ()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_cache_creation() {
        let cache = RouteCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), &CacheStats::default());
    }

    #[test]
    fn test_hit_recaptures_params() {
        let table = table();
        let mut cache = RouteCache::new();

        let first = cache.resolve(&table, "/users/1").into_match().unwrap();
        let second = cache.resolve(&table, "/users/2").into_match().unwrap();
        let third = cache.resolve(&table, "users/1/").into_match().unwrap();

        assert_eq!(first.params.get("id"), Some("1"));
        assert_eq!(second.params.get("id"), Some("2"));
        assert_eq!(third.params.get("id"), Some("1"));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_not_found_is_cached() {
        let table = table();
        let mut cache = RouteCache::new();

        assert!(cache.resolve(&table, "/nope").is_not_found());
        assert!(cache.resolve(&table, "/nope").is_not_found());
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_switching_tables_invalidates() {
        let a = table();
        let b = table();
        let mut cache = RouteCache::new();

        cache.resolve(&a, "/");
        cache.resolve(&b, "/");

        assert_eq!(cache.stats().invalidations, 1);
        assert_eq!(cache.stats().misses, 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cached_answers_match_fresh_resolution() {
        let table = RouteTable::builder()
            .route("/", ComponentRef::ready("home", ()))
            .route("/about", ComponentRef::ready("about", ()))
            .route("/x/*", ComponentRef::ready("wildcardA", ()))
            .route("/*", ComponentRef::ready("wildcardB", ()))
            .build()
            .unwrap();
        let paths = ["/", "/about", "/x/y", "/unknown", "", "about/", "/x", "/x/y/z"];
        let mut cache = RouteCache::new();

        for _ in 0..3 {
            for path in paths {
                assert_eq!(
                    cache.resolve(&table, path).index(),
                    resolve(&table, path).index(),
                    "path '{}'",
                    path
                );
            }
        }
        assert!(cache.stats().hits > 0);
    }

    #[test]
    fn test_lru_eviction() {
        let table = table();
        let mut cache = RouteCache::with_capacity(NonZeroUsize::new(1).unwrap());

        cache.resolve(&table, "/users/1");
        cache.resolve(&table, "/users/2");
        cache.resolve(&table, "/users/1");

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().misses, 3);
    }

    #[test]
    fn test_hit_rate_calculation() {
        let table = table();
        let mut cache = RouteCache::new();
        cache.resolve(&table, "/a");
        cache.resolve(&table, "/b");
        cache.resolve(&table, "/c");
        cache.resolve(&table, "/a");
        cache.resolve(&table, "/b");

        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 3);
        assert!((cache.stats().hit_rate() - 0.4).abs() < 0.001);

        cache.reset_stats();
        assert_eq!(cache.stats().hits, 0);
    }
}
