use chrono::{DateTime, Utc};
use market_data::Location;
use serde::{Deserialize, Serialize};

/// Round a price to the nearest cent
pub fn round_to_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Job urgency supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

/// Job complexity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
    Expert,
}

/// Client's preferred price positioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Budget,
    Value,
    Premium,
}

/// Risk classification for a pricing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Named pricing strategy family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyType {
    Competitive,
    Premium,
    Penetration,
    Value,
    Dynamic,
}

/// Live market conditions supplied per pricing request
///
/// Transient input, never persisted. Out-of-range values are clamped into
/// their documented ranges via [`PricingFactors::normalized`] before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingFactors {
    /// Demand level in [0, 1]
    pub demand: f64,
    /// Supply level in [0, 1]
    pub supply: f64,
    pub urgency: Urgency,
    /// Hour of day in [0, 23]
    pub time_of_day: u8,
    /// Day of week in [0, 6], 0 = Sunday
    pub day_of_week: u8,
    /// Seasonal intensity in [0, 1]
    pub seasonality: f64,
    /// Weather sensitivity in [0, 1]; None means weather-neutral
    pub weather_impact: Option<f64>,
    /// Optional macro indicator; carried through but not currently scored
    pub economic_index: Option<f64>,
}

impl PricingFactors {
    /// Clamp every field into its valid range (best-effort engine: clamp,
    /// never reject)
    pub fn normalized(&self) -> Self {
        Self {
            demand: clamp01(self.demand),
            supply: clamp01(self.supply),
            urgency: self.urgency,
            time_of_day: self.time_of_day.min(23),
            day_of_week: self.day_of_week.min(6),
            seasonality: clamp01(self.seasonality),
            weather_impact: self.weather_impact.map(clamp01),
            economic_index: self.economic_index.map(clamp01),
        }
    }
}

/// A historical price charged by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub recorded_at: DateTime<Utc>,
    pub job_category: String,
}

/// Provider performance snapshot from the profile store
///
/// Read-only for this engine; the profile store owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderMetrics {
    pub provider_id: String,
    /// Rating in [0, 5]
    pub rating: f64,
    /// Completion rate in [0, 1]
    pub completion_rate: f64,
    pub avg_response_minutes: f64,
    /// Ordered price history, oldest first
    pub price_history: Vec<PricePoint>,
    /// Demand score in [0, 1]
    pub demand_score: f64,
    /// Quality score in [0, 1]
    pub quality_score: f64,
    /// Reliability score in [0, 1]
    pub reliability_score: f64,
    pub specializations: Vec<String>,
    pub years_experience: u32,
    pub certifications: Vec<String>,
}

impl ProviderMetrics {
    /// Clamp rating and unit-interval scores into range
    pub fn normalized(&self) -> Self {
        Self {
            rating: self.rating.clamp(0.0, 5.0),
            completion_rate: clamp01(self.completion_rate),
            avg_response_minutes: self.avg_response_minutes.max(0.0),
            demand_score: clamp01(self.demand_score),
            quality_score: clamp01(self.quality_score),
            reliability_score: clamp01(self.reliability_score),
            ..self.clone()
        }
    }
}

/// Job schedule constraints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub start: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub flexibility_hours: u32,
}

/// Client budget range for the job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

impl BudgetRange {
    /// Midpoint of the stated budget, the engine's price of last resort
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Profile of the client posting the job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Client rating in [0, 5]
    pub rating: f64,
    /// Payment-history tier label, e.g. "excellent" or "delinquent"
    pub payment_history_tier: String,
    pub repeat_customer: bool,
    pub preferred_tier: PriceTier,
}

/// The job request being priced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCharacteristics {
    pub category: String,
    pub complexity: Complexity,
    pub location: Location,
    pub timeline: Timeline,
    pub requirements: Vec<String>,
    pub budget: BudgetRange,
    pub client: ClientProfile,
}

/// The seven dynamic adjustment multipliers applied to the base price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSet {
    pub time_of_day: f64,
    pub demand_surge: f64,
    pub quality_premium: f64,
    pub urgency: f64,
    pub seasonal: f64,
    pub weather: f64,
    pub competition: f64,
}

impl AdjustmentSet {
    /// All seven multipliers at neutral
    pub fn neutral() -> Self {
        Self {
            time_of_day: 1.0,
            demand_surge: 1.0,
            quality_premium: 1.0,
            urgency: 1.0,
            seasonal: 1.0,
            weather: 1.0,
            competition: 1.0,
        }
    }

    /// Product of all seven multipliers
    pub fn combined(&self) -> f64 {
        self.time_of_day
            * self.demand_surge
            * self.quality_premium
            * self.urgency
            * self.seasonal
            * self.weather
            * self.competition
    }

    /// Combined multiplier clamped into the configured band, so no stack of
    /// factors can drive the final price non-positive or past the ceiling
    pub fn clamped_combined(&self, floor: f64, ceiling: f64) -> f64 {
        self.combined().clamp(floor, ceiling)
    }
}

/// Named factor readings reported alongside a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub market_demand: f64,
    pub provider_quality: f64,
    pub urgency_premium: f64,
    pub competitive_landscape: f64,
    pub seasonal_adjustment: f64,
}

/// Recommended price band around the optimal price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub optimal: f64,
}

/// A labeled pricing alternative with its projected outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingStrategy {
    pub strategy_type: StrategyType,
    pub description: String,
    pub expected_outcome: String,
    pub risk_level: RiskLevel,
    pub price: f64,
    /// Projected booking probability in [0, 1]
    pub expected_booking_rate: f64,
    /// price * expected_booking_rate
    pub expected_revenue: f64,
}

impl PricingStrategy {
    /// Build a strategy, deriving expected revenue from price and booking rate
    pub fn new(
        strategy_type: StrategyType,
        description: impl Into<String>,
        expected_outcome: impl Into<String>,
        risk_level: RiskLevel,
        price: f64,
        expected_booking_rate: f64,
    ) -> Self {
        let price = round_to_cents(price);
        Self {
            strategy_type,
            description: description.into(),
            expected_outcome: expected_outcome.into(),
            risk_level,
            price,
            expected_booking_rate,
            expected_revenue: round_to_cents(price * expected_booking_rate),
        }
    }
}

/// Complete pricing recommendation, immutable once produced
///
/// Deliberately timestamp-free: identical inputs against an unexpired cache
/// yield an identical (comparable) recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecommendation {
    pub recommended_price: f64,
    pub price_range: PriceRange,
    /// Confidence in [0, 0.95]
    pub confidence: f64,
    pub factors: FactorBreakdown,
    pub insights: Vec<String>,
    /// Strategies sorted descending by expected revenue
    pub strategies: Vec<PricingStrategy>,
    /// The raw multipliers that produced the recommended price
    pub adjustments: AdjustmentSet,
}

/// Next-bid suggestion for a live auction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidSuggestion {
    pub suggested_bid: f64,
    pub reasoning: String,
    pub confidence: f64,
}
