//! TTL cache around the upstream feed.
//!
//! The feed changes a few times a day at most, so every handler works off a
//! shared catalog snapshot that is refreshed at most once per TTL window. A
//! refresh failure is returned to the caller; an expired snapshot is never
//! served in its place.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use flylady_feed::{FeedCatalog, FeedClient, FeedError};

struct CachedCatalog {
    fetched_at: Instant,
    catalog: Arc<FeedCatalog>,
}

pub struct FeedCache {
    client: FeedClient,
    ttl: Duration,
    slot: RwLock<Option<CachedCatalog>>,
}

impl FeedCache {
    pub fn new(client: FeedClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Returns the cached catalog, refreshing it from upstream when the TTL
    /// has elapsed. Concurrent callers during a refresh wait on the write
    /// lock; whoever wins re-checks freshness so the feed is fetched once.
    ///
    /// # Errors
    ///
    /// Propagates [`FeedError`] when a refresh is due and the fetch or parse
    /// fails.
    pub async fn catalog(&self) -> Result<Arc<FeedCatalog>, FeedError> {
        if let Some(catalog) = self.fresh().await {
            return Ok(catalog);
        }

        let mut slot = self.slot.write().await;
        if let Some(cached) = slot.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&cached.catalog));
            }
        }

        let catalog = Arc::new(FeedCatalog::load(&self.client).await?);
        *slot = Some(CachedCatalog {
            fetched_at: Instant::now(),
            catalog: Arc::clone(&catalog),
        });
        Ok(catalog)
    }

    /// Whether a fresh snapshot is held right now. Does not touch upstream.
    pub async fn is_warm(&self) -> bool {
        self.fresh().await.is_some()
    }

    async fn fresh(&self) -> Option<Arc<FeedCatalog>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| Arc::clone(&cached.catalog))
    }
}
