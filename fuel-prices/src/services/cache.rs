//! Caching layer for station lists.
//!
//! The price service asks clients not to poll the same area more often than
//! every five minutes. Replies are cached per query; only replies with an
//! ok status are stored.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{FuelType, Station};

use super::error::ServiceError;
use super::query::{SortOrder, StationQuery};
use super::{ServiceReply, StationService};

/// Cache key: query with floats compared bitwise.
type QueryKey = (u64, u64, u64, Option<FuelType>, SortOrder);

/// Cached station list reply.
type ReplyEntry = Arc<ServiceReply<Vec<Station>>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 256,
        }
    }
}

fn key(query: &StationQuery) -> QueryKey {
    (
        query.center.latitude().to_bits(),
        query.center.longitude().to_bits(),
        query.radius.km().to_bits(),
        query.fuel,
        query.effective_sort(),
    )
}

/// Station service with caching.
///
/// Wraps another `StationService` and caches its successful replies.
pub struct CachedStationService<S> {
    inner: S,
    replies: MokaCache<QueryKey, ReplyEntry>,
}

impl<S: StationService> CachedStationService<S> {
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let replies = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, replies }
    }

    /// Number of cached replies (approximate, for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.replies.entry_count()
    }

    /// Drop every cached reply.
    pub fn invalidate_all(&self) {
        self.replies.invalidate_all();
    }
}

impl<S: StationService> StationService for CachedStationService<S> {
    async fn find_stations_with(
        &self,
        query: &StationQuery,
    ) -> Result<ServiceReply<Vec<Station>>, ServiceError> {
        let key = key(query);

        if let Some(cached) = self.replies.get(&key).await {
            trace!(center = %query.center, "station list cache hit");
            return Ok(cached.as_ref().clone());
        }

        let reply = self.inner.find_stations_with(query).await?;

        if reply.status.is_ok() {
            self.replies.insert(key, Arc::new(reply.clone())).await;
        }

        Ok(reply)
    }
}
