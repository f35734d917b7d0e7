use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;
use crate::metrics::{CACHE_HITS, CACHE_MISSES};

// Cache entry with timestamp
#[derive(Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub created_at: Instant,
}

/// Single-slot cache holding the most recently fetched value.
///
/// The slot lock is held across the refresh, so callers racing on a stale
/// entry wait for one refresh instead of each issuing their own. A refresh
/// that never returns stalls every waiter with it; `refresh` must bound its
/// own duration if that matters.
pub struct TtlCache<T> {
    name: &'static str,
    ttl: Duration,
    slot: Mutex<Option<CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns the held value while it is younger than the TTL, otherwise
    /// awaits `refresh` once. A failed refresh leaves the slot untouched.
    pub async fn get_or_refresh<F, Fut, E>(&self, refresh: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.created_at.elapsed() < self.ttl {
                CACHE_HITS.with_label_values(&[self.name]).inc();
                debug!(cache = self.name, "cache hit");
                return Ok(entry.value.clone());
            }
        }
        CACHE_MISSES.with_label_values(&[self.name]).inc();
        debug!(cache = self.name, "cache miss, refreshing");

        let value = refresh().await?;
        *slot = Some(CacheEntry {
            value: value.clone(),
            created_at: Instant::now(),
        });
        Ok(value)
    }

    // When the held value was fetched, if any
    #[cfg(test)]
    pub async fn cached_at(&self) -> Option<Instant> {
        self.slot.lock().await.as_ref().map(|entry| entry.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(600);

    async fn fetch_ok(calls: &AtomicUsize, value: &str) -> Result<String, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(value.to_string())
    }

    async fn fetch_err(calls: &AtomicUsize) -> Result<String, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Err("upstream down".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn second_get_within_window_is_served_from_cache() {
        let cache = TtlCache::new("test", TTL);
        let calls = AtomicUsize::new(0);

        let first = cache.get_or_refresh(|| fetch_ok(&calls, "sunny")).await;
        tokio::time::advance(Duration::from_secs(599)).await;
        let second = cache.get_or_refresh(|| fetch_ok(&calls, "rainy")).await;

        assert_eq!(first.unwrap(), "sunny");
        assert_eq!(second.unwrap(), "sunny");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn get_after_window_refetches() {
        let cache = TtlCache::new("test", TTL);
        let calls = AtomicUsize::new(0);

        cache.get_or_refresh(|| fetch_ok(&calls, "sunny")).await.unwrap();
        tokio::time::advance(TTL).await;
        let value = cache.get_or_refresh(|| fetch_ok(&calls, "rainy")).await;

        assert_eq!(value.unwrap(), "rainy");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_on_empty_slot_is_not_cached() {
        let cache = TtlCache::new("test", TTL);
        let calls = AtomicUsize::new(0);

        let err = cache.get_or_refresh(|| fetch_err(&calls)).await;
        assert_eq!(err.unwrap_err(), "upstream down");
        assert!(cache.cached_at().await.is_none());

        let value = cache.get_or_refresh(|| fetch_ok(&calls, "sunny")).await;
        assert_eq!(value.unwrap(), "sunny");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_keeps_previous_entry() {
        let cache = TtlCache::new("test", TTL);
        let calls = AtomicUsize::new(0);

        cache.get_or_refresh(|| fetch_ok(&calls, "sunny")).await.unwrap();
        let fetched_at = cache.cached_at().await;
        tokio::time::advance(Duration::from_secs(601)).await;

        assert!(cache.get_or_refresh(|| fetch_err(&calls)).await.is_err());
        assert_eq!(cache.cached_at().await, fetched_at);

        // still stale, so the next call goes upstream again
        let value = cache.get_or_refresh(|| fetch_ok(&calls, "rainy")).await;
        assert_eq!(value.unwrap(), "rainy");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_one_refresh() {
        let cache = Arc::new(TtlCache::new("test", TTL));
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_refresh(|| async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            Ok::<_, String>(42)
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waiters_block_for_the_whole_refresh() {
        let cache = Arc::new(TtlCache::new("test", TTL));

        let slow = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .get_or_refresh(|| async {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                        Ok::<_, String>(1)
                    })
                    .await
            })
        };
        tokio::task::yield_now().await;

        let waiter = cache.get_or_refresh(|| async { Ok::<_, String>(2) });
        let timed_out = tokio::time::timeout(Duration::from_secs(5), waiter).await;
        assert!(timed_out.is_err());

        assert_eq!(slow.await.unwrap().unwrap(), 1);
        // served from the slot the slow refresh filled
        assert_eq!(cache.get_or_refresh(|| async { Ok::<_, String>(2) }).await.unwrap(), 1);
    }
}
