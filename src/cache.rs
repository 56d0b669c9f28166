//! Single-entry TTL memo for batch fetch results.
//!
//! Exactly one entry is live at a time. It is keyed by a structural hash of
//! the registry snapshot *and* the evaluation date, so mutating the registry
//! or crossing a date boundary both invalidate it without any explicit
//! bookkeeping: the next lookup simply misses.

use crate::types::location::Location;
use crate::types::snapshot::WeatherSnapshot;
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct CacheEntry {
    key: u64,
    created_at: Instant,
    data: HashMap<String, WeatherSnapshot>,
}

/// The engine's sole memo of per-city snapshots.
pub struct SnapshotCache {
    entry: Mutex<Option<CacheEntry>>,
    ttl: Duration,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: Mutex::new(None),
            ttl,
        }
    }

    /// Structural key over the ordered city list and the evaluation date.
    pub fn key(cities: &[Location], evaluated_on: NaiveDate) -> u64 {
        let mut hasher = DefaultHasher::new();
        for city in cities {
            city.name.hash(&mut hasher);
            city.lat.to_bits().hash(&mut hasher);
            city.lon.to_bits().hash(&mut hasher);
        }
        evaluated_on.hash(&mut hasher);
        hasher.finish()
    }

    /// Returns the live entry's data when it matches `key` and is younger
    /// than the TTL; otherwise runs `fetch` and stores its result as the new
    /// sole entry. `force` skips the lookup for this call only.
    ///
    /// The fetch future runs outside the lock, so a second refresh arriving
    /// meanwhile is not blocked; whichever finishes last wins the entry
    /// (a new refresh supersedes an in-flight one, nothing is preempted).
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: u64,
        force: bool,
        fetch: F,
    ) -> HashMap<String, WeatherSnapshot>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = HashMap<String, WeatherSnapshot>>,
    {
        if force {
            debug!("Forced refresh requested, skipping cache lookup");
        } else {
            let guard = self.entry.lock().await;
            if let Some(entry) = guard.as_ref() {
                if entry.key == key && entry.created_at.elapsed() < self.ttl {
                    info!("Cache hit for snapshot key {:#x}", key);
                    return entry.data.clone();
                }
            }
            debug!("Cache miss for snapshot key {:#x}", key);
        }

        let data = fetch().await;

        let mut guard = self.entry.lock().await;
        *guard = Some(CacheEntry {
            key,
            created_at: Instant::now(),
            data: data.clone(),
        });
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cities() -> Vec<Location> {
        vec![
            Location::new("Mumbai", 19.0760, 72.8777),
            Location::new("Delhi", 28.6139, 77.2090),
        ]
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn one_snapshot() -> HashMap<String, WeatherSnapshot> {
        let mut data = HashMap::new();
        data.insert(
            "Mumbai".to_string(),
            WeatherSnapshot {
                current_temp: 29.0,
                daily_series: vec![],
                avg_max: 31.0,
                avg_min: 25.0,
            },
        );
        data
    }

    #[test]
    fn test_key_is_stable_for_equal_snapshots() {
        assert_eq!(
            SnapshotCache::key(&cities(), day(25)),
            SnapshotCache::key(&cities(), day(25))
        );
    }

    #[test]
    fn test_key_changes_with_registry_contents_and_order() {
        let base = SnapshotCache::key(&cities(), day(25));
        let mut fewer = cities();
        fewer.pop();
        assert_ne!(base, SnapshotCache::key(&fewer, day(25)));
        let mut reordered = cities();
        reordered.reverse();
        assert_ne!(base, SnapshotCache::key(&reordered, day(25)));
    }

    #[test]
    fn test_key_changes_with_evaluation_date() {
        assert_ne!(
            SnapshotCache::key(&cities(), day(25)),
            SnapshotCache::key(&cities(), day(26))
        );
    }

    #[tokio::test]
    async fn test_second_lookup_within_ttl_skips_fetch() {
        let cache = SnapshotCache::new(Duration::from_secs(600));
        let calls = AtomicUsize::new(0);
        for _ in 0..2 {
            let data = cache
                .get_or_fetch(1, false, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    one_snapshot()
                })
                .await;
            assert!(data.contains_key("Mumbai"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_key_change_forces_fetch_within_ttl() {
        let cache = SnapshotCache::new(Duration::from_secs(600));
        let calls = AtomicUsize::new(0);
        for key in [1, 2] {
            cache
                .get_or_fetch(key, false, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    one_snapshot()
                })
                .await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_always_fetches() {
        let cache = SnapshotCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);
        for _ in 0..2 {
            cache
                .get_or_fetch(1, false, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    one_snapshot()
                })
                .await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_force_bypasses_live_entry_once() {
        let cache = SnapshotCache::new(Duration::from_secs(600));
        let calls = AtomicUsize::new(0);
        let fetch = || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { one_snapshot() }
        };
        cache.get_or_fetch(1, false, fetch).await;
        cache.get_or_fetch(1, true, fetch).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // The forced refresh repopulated the entry, so the next call hits.
        cache.get_or_fetch(1, false, fetch).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
