use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters describing how a cache-aside repository's reads went.
///
/// `cache_errors` counts reads where the cache could not answer; those are
/// not counted as misses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub cache_errors: u64,
    pub store_failures: u64,
    pub populate_failures: u64,
}

#[derive(Debug, Default)]
pub(crate) struct StatCounters {
    pub(crate) hits: AtomicU64,
    pub(crate) misses: AtomicU64,
    pub(crate) cache_errors: AtomicU64,
    pub(crate) store_failures: AtomicU64,
    pub(crate) populate_failures: AtomicU64,
}

impl StatCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            cache_errors: self.cache_errors.load(Ordering::Relaxed),
            store_failures: self.store_failures.load(Ordering::Relaxed),
            populate_failures: self.populate_failures.load(Ordering::Relaxed),
        }
    }
}
