use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Market data cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in seconds
    pub ttl_seconds: u64,

    /// Maximum number of cached (category, location) entries
    pub max_size: usize,

    /// Provider fetch timeout in milliseconds
    pub fetch_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 300, // 5 minutes
            max_size: 1000,
            fetch_timeout_ms: 2000, // 2 seconds
        }
    }
}

impl CacheConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(ttl) = std::env::var("MARKET_DATA_TTL_SECONDS") {
            config.ttl_seconds = ttl.parse().unwrap_or(300);
        }

        if let Ok(max_size) = std::env::var("MARKET_DATA_CACHE_MAX_SIZE") {
            config.max_size = max_size.parse().unwrap_or(1000);
        }

        if let Ok(timeout) = std::env::var("MARKET_DATA_FETCH_TIMEOUT_MS") {
            config.fetch_timeout_ms = timeout.parse().unwrap_or(2000);
        }

        Ok(config)
    }

    /// Get fetch timeout as Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
