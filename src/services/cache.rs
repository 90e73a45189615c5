use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::services::storefront::StorefrontProduct;

/// Shared, immutable product listing for one store
pub type ProductSnapshot = Arc<Vec<StorefrontProduct>>;

/// In-memory product snapshot cache
///
/// The storefront listing changes rarely and fetching it walks every page,
/// so one snapshot per store is kept until the TTL expires.
pub struct ProductCache {
    snapshots: Cache<String, ProductSnapshot>,
    ttl_secs: u64,
}

impl ProductCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let snapshots = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            snapshots,
            ttl_secs,
        }
    }

    pub async fn get(&self, key: &str) -> Option<ProductSnapshot> {
        let hit = self.snapshots.get(key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    pub async fn set(&self, key: &str, snapshot: ProductSnapshot) {
        self.snapshots.insert(key.to_string(), snapshot).await;
        tracing::trace!("Cache set: {}", key);
    }

    pub async fn delete(&self, key: &str) {
        self.snapshots.invalidate(key).await;
        tracing::debug!("Invalidated cache key: {}", key);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.snapshots.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a store's product listing
    pub fn products(store_domain: &str) -> String {
        format!("products:{}", store_domain)
    }
}
