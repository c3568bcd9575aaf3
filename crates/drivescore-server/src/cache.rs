//! Time-boxed cache for the driver list.
//!
//! The remote driver roster changes slowly, so one process-wide entry with a
//! long TTL is enough; there is no per-key eviction. The cache is an
//! explicitly constructed instance owned by [`crate::server::AppState`], not
//! a module-level singleton, so tests can run independent cache lifetimes.
//!
//! Refreshes are lazy: nothing happens in the background, a stale entry is
//! refreshed by the next caller. A failed refresh clears the entry before
//! the error is surfaced, so stale data can never masquerade as valid and
//! the next call starts from scratch. There is deliberately no retry here.
//!
//! Concurrent callers during a refresh share the single in-flight fetch
//! (the entry lock is held across the refresh) instead of issuing
//! duplicates.

use std::future::Future;
use std::sync::Arc;

use drivescore_core::DriverRecord;
use drivescore_geotab::GeotabError;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

struct CacheEntry {
    data: Arc<Vec<DriverRecord>>,
    fetched_at: Instant,
}

/// Single-entry cache serving a memoized driver list until the TTL elapses.
pub struct DriverCache {
    entry: Mutex<Option<CacheEntry>>,
    ttl: Duration,
}

impl DriverCache {
    /// Creates an empty cache with the specified TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: Mutex::new(None),
            ttl,
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached driver list, refreshing through `refresh` when the
    /// entry is absent or older than the TTL.
    ///
    /// # Errors
    ///
    /// Propagates the refresh error unchanged after clearing the entry.
    pub async fn get_with<F, Fut>(&self, refresh: F) -> Result<Arc<Vec<DriverRecord>>, GeotabError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<DriverRecord>, GeotabError>>,
    {
        // Held across the refresh: concurrent misses wait here and then see
        // the fresh entry instead of fetching again.
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                tracing::debug!("returning cached driver data");
                return Ok(Arc::clone(&cached.data));
            }
            tracing::debug!("cached driver data expired");
        }

        tracing::info!("refreshing driver data from remote API");
        match refresh().await {
            Ok(data) => {
                let data = Arc::new(data);
                *entry = Some(CacheEntry {
                    data: Arc::clone(&data),
                    fetched_at: Instant::now(),
                });
                Ok(data)
            }
            Err(e) => {
                *entry = None;
                Err(e)
            }
        }
    }

    /// Drops the cached entry; the next call fetches fresh data.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }
}
