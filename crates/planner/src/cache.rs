//! In-process cache for fully assembled route plans, keyed by a fingerprint
//! of the request. Mirrors the disk-cache idiom used elsewhere for
//! upstream ship data (load-if-fresh, else fetch-and-save), but keeps
//! everything in memory behind a `DashMap` rather than on disk, since a
//! plan's inputs (two free-text locations) are cheap to hash and the
//! store only needs to survive the process's own lifetime.

use dashmap::DashMap;
use route_core::{Coord, PlanResult};
use std::time::{Duration, Instant};

/// How long a cached plan stays valid before it's treated as a miss.
pub const DEFAULT_TTL: Duration = Duration::from_secs(route_core::constants::ROUTE_CACHE_TTL_SECS);

struct CacheEntry {
    result: PlanResult,
    cached_at: Instant,
}

/// Fingerprint-keyed cache of recent plans.
pub struct RouteCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl RouteCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Build the cache key for a resolved `(start, end)` coordinate pair.
    ///
    /// Keyed on the coordinates, not the free-text request strings, so two
    /// queries that resolve to the same point (different spellings, literal
    /// `"lat,lon"` vs. geocoded) share a cache entry. Each coordinate is
    /// formatted to exactly 6 decimal places, so two endpoints equal only to
    /// that resolution collide on the same key.
    ///
    /// Uses an MD5 digest purely as a fast, fixed-width fingerprint — this
    /// is a cache key, not a security boundary, so collision resistance
    /// beyond "won't happen by accident for two different addresses"
    /// doesn't matter here.
    #[must_use]
    pub fn fingerprint(start: Coord, end: Coord) -> String {
        let digest = md5::compute(format!(
            "{:.6},{:.6}|{:.6},{:.6}",
            start.lon, start.lat, end.lon, end.lat
        ));
        format!("{digest:x}")
    }

    /// Look up a cached plan, evicting and returning `None` if it's
    /// expired.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<PlanResult> {
        let entry = self.entries.get(key)?;
        if entry.cached_at.elapsed() > self.ttl {
            drop(entry);
            self.entries.remove(key);
            return None;
        }
        Some(entry.result.clone())
    }

    pub fn insert(&self, key: String, result: PlanResult) {
        self.entries.insert(
            key,
            CacheEntry {
                result,
                cached_at: Instant::now(),
            },
        );
    }
}
