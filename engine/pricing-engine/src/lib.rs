//! Pricing Decision Engine
//!
//! Produces pricing recommendations for marketplace jobs: a recommended price
//! with a confidence score, alternative pricing strategies ranked by expected
//! revenue, and human-readable insights into the drivers. A separate bid
//! optimizer proposes next bids for live auctions.
//!
//! All scoring is deterministic: identical inputs (with an unexpired market
//! data cache) produce identical recommendations. The engine never fails a
//! caller's request; when market data is unavailable it degrades to a
//! budget-midpoint fallback recommendation.

pub mod adjustments;
pub mod base;
pub mod bid;
pub mod confidence;
pub mod config;
pub mod engine;
pub mod models;
pub mod strategy;

pub use adjustments::AdjustmentCalculator;
pub use base::BasePriceCalculator;
pub use bid::BidOptimizer;
pub use confidence::ConfidenceScorer;
pub use config::{BidConfig, PricingConfig};
pub use engine::PricingEngine;
pub use models::*;
pub use strategy::StrategyGenerator;

/// Re-export the market data surface consumed by callers
pub use market_data::{CacheConfig, Location, MarketData, MarketDataCache, MarketDataProvider};
