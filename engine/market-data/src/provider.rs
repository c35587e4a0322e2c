use crate::error::Result;
use crate::models::{Location, MarketData};
use async_trait::async_trait;

/// External market data collaborator
///
/// Implementations are expected to be I/O-bound (an upstream aggregation
/// service); the cache wraps every call in a timeout and the pricing engine
/// degrades gracefully when a fetch fails.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch aggregate market statistics for a (category, location) pair
    async fn fetch_market_data(&self, category: &str, location: &Location) -> Result<MarketData>;
}
