use crate::config::CacheConfig;
use crate::error::{MarketDataError, Result};
use crate::models::{Location, MarketData};
use crate::provider::MarketDataProvider;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Market data cache with TTL
///
/// Entries are keyed by `category:postal_code` and never mutated in place;
/// a refetch after expiry writes a fresh snapshot. Concurrent populates for
/// the same key are allowed to race (last write wins).
pub struct MarketDataCache {
    config: CacheConfig,
    cache: Arc<RwLock<HashMap<String, CachedMarketData>>>,
}

#[derive(Debug, Clone)]
struct CachedMarketData {
    data: MarketData,
    cached_at: DateTime<Utc>,
}

impl MarketDataCache {
    /// Create a new market data cache
    pub fn new(config: CacheConfig) -> Self {
        Self { config, cache: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Composite cache key for a (category, location) pair
    pub fn cache_key(category: &str, location: &Location) -> String {
        format!("{}:{}", category, location.postal_code)
    }

    /// Get cached market data for a key, if present and unexpired
    pub async fn get(&self, key: &str) -> Option<MarketData> {
        let cache = self.cache.read().await;
        let cached = cache.get(key)?;

        let age = Utc::now() - cached.cached_at;
        let ttl = Duration::seconds(self.config.ttl_seconds as i64);
        if age > ttl {
            debug!("Cache entry for {} expired (age: {:?})", key, age);
            return None;
        }

        debug!("Cache hit for {}", key);
        Some(cached.data.clone())
    }

    /// Store market data in the cache
    pub async fn store(&self, key: String, data: MarketData) {
        let mut cache = self.cache.write().await;

        // Evict oldest entries when the size limit is reached
        if cache.len() >= self.config.max_size {
            let mut entries: Vec<_> = cache.iter().map(|(k, v)| (k.clone(), v.cached_at)).collect();
            entries.sort_by_key(|(_, cached_at)| *cached_at);

            let to_remove = entries.len() - self.config.max_size + 1;
            for (old_key, _) in entries.iter().take(to_remove) {
                cache.remove(old_key);
            }

            info!("Cache size limit reached, removed {} old entries", to_remove);
        }

        debug!("Cached market data for {}", key);
        cache.insert(key, CachedMarketData { data, cached_at: Utc::now() });
    }

    /// Look up market data, fetching through the provider on a miss
    ///
    /// The provider call runs under the configured timeout. Failures surface
    /// as `MarketDataError` so the recommendation assembler can fall back;
    /// they are never fatal to a pricing request.
    pub async fn get_or_fetch(
        &self,
        category: &str,
        location: &Location,
        provider: &dyn MarketDataProvider,
    ) -> Result<MarketData> {
        let key = Self::cache_key(category, location);

        if let Some(data) = self.get(&key).await {
            return Ok(data);
        }

        let fetch = provider.fetch_market_data(category, location);
        let data = match tokio::time::timeout(self.config.fetch_timeout(), fetch).await {
            Ok(result) => result?,
            Err(_) => return Err(MarketDataError::Timeout(self.config.fetch_timeout_ms)),
        };

        info!(
            "Fetched market data for {} ({} competitors, avg price {:?})",
            key,
            data.competitors.len(),
            data.average_price
        );
        self.store(key, data.clone()).await;
        Ok(data)
    }

    /// Clear expired entries from the cache
    pub async fn clear_expired(&self) {
        let mut cache = self.cache.write().await;
        let now = Utc::now();
        let ttl = Duration::seconds(self.config.ttl_seconds as i64);

        let initial_size = cache.len();
        cache.retain(|key, cached| {
            let expired = now - cached.cached_at > ttl;
            if expired {
                debug!("Removing expired cache entry for {}", key);
            }
            !expired
        });

        let removed = initial_size - cache.len();
        if removed > 0 {
            info!("Cleared {} expired cache entries", removed);
        }
    }

    /// Number of cached entries (expired or not)
    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }
}
