use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic location of a job or market lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub postal_code: String,
}

/// A competitor's active listing in the same (category, location) market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorListing {
    pub provider_id: String,
    pub price: f64,
    pub rating: f64,
    pub booking_rate: f64,
}

/// Price/demand movement over a trailing window
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrendDelta {
    /// Relative price change over the window (e.g. 0.05 = +5%)
    pub price_delta: f64,
    /// Relative demand change over the window
    pub demand_delta: f64,
}

/// Aggregate market statistics for a (category, location) pair
///
/// Snapshots are immutable once cached; a fresh fetch replaces the entry
/// rather than mutating it in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketData {
    pub category: String,

    /// Average listed price for the category, if the provider knows one
    pub average_price: Option<f64>,

    pub competitors: Vec<CompetitorListing>,

    /// Demand index in [0, 1]
    pub demand_index: f64,

    /// Supply index in [0, 1]
    pub supply_index: f64,

    /// Price elasticity estimate (lower = less price-sensitive market)
    pub price_elasticity: f64,

    pub trend_7d: TrendDelta,
    pub trend_30d: TrendDelta,

    pub fetched_at: DateTime<Utc>,
}

impl MarketData {
    /// Mean competitor price, if any competitors are listed
    pub fn competitor_average_price(&self) -> Option<f64> {
        if self.competitors.is_empty() {
            return None;
        }
        let sum: f64 = self.competitors.iter().map(|c| c.price).sum();
        Some(sum / self.competitors.len() as f64)
    }
}
