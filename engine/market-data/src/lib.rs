//! Market Data Service
//!
//! Fetches and caches aggregate market statistics (average prices, competitor
//! listings, demand/supply indices) per (category, location) key. The cache is
//! the only stateful piece of the pricing engine; entries are write-once per
//! TTL window and concurrent populates are last-write-wins.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod provider;

pub use cache::MarketDataCache;
pub use config::CacheConfig;
pub use error::{MarketDataError, Result};
pub use models::{CompetitorListing, Location, MarketData, TrendDelta};
pub use provider::MarketDataProvider;
