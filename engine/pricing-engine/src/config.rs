use crate::models::{Complexity, PriceTier, Urgency};
use serde::{Deserialize, Serialize};

/// Configuration for the pricing decision engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Base price derivation parameters
    pub base: BasePriceParameters,

    /// Dynamic adjustment parameters
    pub adjustments: AdjustmentParameters,

    /// Confidence scoring parameters
    pub confidence: ConfidenceParameters,

    /// Strategy generation parameters
    pub strategy: StrategyParameters,

    /// Recommended price band around the optimal price
    pub range: PriceRangeParameters,

    /// Confidence reported by the degraded fallback recommendation
    pub fallback_confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasePriceParameters {
    /// Complexity multiplier: simple jobs price below market
    pub complexity_simple: f64,
    pub complexity_moderate: f64,
    pub complexity_complex: f64,
    pub complexity_expert: f64,

    /// Quality adjustment span: 1 + (quality_score - 0.5) * span
    pub quality_span: f64,

    /// Client preferred-tier multipliers
    pub tier_budget: f64,
    pub tier_value: f64,
    pub tier_premium: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentParameters {
    /// Floor applied to supply before computing the demand/supply ratio
    pub supply_floor: f64,

    /// Quality premium clamp band
    pub quality_min: f64,
    pub quality_max: f64,

    /// Urgency multipliers
    pub urgency_low: f64,
    pub urgency_medium: f64,
    pub urgency_high: f64,
    pub urgency_critical: f64,

    /// Combined-multiplier clamp band; the ceiling caps the final price at
    /// ceiling x base regardless of how factors stack
    pub combined_floor: f64,
    pub combined_ceiling: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceParameters {
    /// Starting confidence before data-volume bonuses
    pub base: f64,

    /// Bonus when at least `competitor_threshold` listings are known
    pub competitor_bonus: f64,
    pub competitor_threshold: usize,

    /// Bonus when the provider has more than `history_threshold` price points
    pub history_bonus: f64,
    pub history_threshold: usize,

    /// Bonus for provider rating at or above `rating_threshold`
    pub rating_bonus: f64,
    pub rating_threshold: f64,

    /// Bonus for completion rate at or above `completion_threshold`
    pub completion_bonus: f64,
    pub completion_threshold: f64,

    /// Bonus for price elasticity below `elasticity_threshold`
    pub elasticity_bonus: f64,
    pub elasticity_threshold: f64,

    /// Hard cap: the engine never claims full certainty
    pub cap: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyParameters {
    /// Competitive strategy: price at this fraction of the competitor average
    pub competitive_discount: f64,
    pub competitive_booking_rate: f64,

    /// Premium strategy: markup over base, gated on provider rating
    pub premium_markup: f64,
    pub premium_booking_rate: f64,
    pub premium_min_rating: f64,

    /// Value strategy prices at base
    pub value_booking_rate: f64,

    /// Dynamic strategy: markup over base with live adaptation
    pub dynamic_markup: f64,
    pub dynamic_booking_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRangeParameters {
    /// Lower bound as a fraction of the recommended price
    pub min_ratio: f64,
    /// Upper bound as a fraction of the recommended price
    pub max_ratio: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base: BasePriceParameters {
                complexity_simple: 0.8,
                complexity_moderate: 1.0,
                complexity_complex: 1.3,
                complexity_expert: 1.6,
                quality_span: 0.4, // ~0.8x to 1.2x across the quality range
                tier_budget: 0.85,
                tier_value: 1.0,
                tier_premium: 1.2,
            },
            adjustments: AdjustmentParameters {
                supply_floor: 0.1,
                quality_min: 0.7,
                quality_max: 1.5,
                urgency_low: 1.0,
                urgency_medium: 1.1,
                urgency_high: 1.25,
                urgency_critical: 1.5,
                combined_floor: 0.5,
                combined_ceiling: 3.0, // final price capped at 3x base
            },
            confidence: ConfidenceParameters {
                base: 0.7,
                competitor_bonus: 0.1,
                competitor_threshold: 5,
                history_bonus: 0.1,
                history_threshold: 10,
                rating_bonus: 0.1,
                rating_threshold: 4.5,
                completion_bonus: 0.05,
                completion_threshold: 0.95,
                elasticity_bonus: 0.05,
                elasticity_threshold: 0.3,
                cap: 0.95,
            },
            strategy: StrategyParameters {
                competitive_discount: 0.95,
                competitive_booking_rate: 0.75,
                premium_markup: 1.2,
                premium_booking_rate: 0.45,
                premium_min_rating: 4.5,
                value_booking_rate: 0.6,
                dynamic_markup: 1.1,
                dynamic_booking_rate: 0.65,
            },
            range: PriceRangeParameters { min_ratio: 0.85, max_ratio: 1.25 },
            fallback_confidence: 0.5,
        }
    }
}

impl PricingConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(ceiling) = std::env::var("PRICING_COMBINED_CEILING") {
            config.adjustments.combined_ceiling = ceiling.parse().unwrap_or(3.0);
        }

        if let Ok(floor) = std::env::var("PRICING_COMBINED_FLOOR") {
            config.adjustments.combined_floor = floor.parse().unwrap_or(0.5);
        }

        if let Ok(cap) = std::env::var("PRICING_CONFIDENCE_CAP") {
            config.confidence.cap = cap.parse().unwrap_or(0.95);
        }

        if let Ok(rating) = std::env::var("PRICING_PREMIUM_MIN_RATING") {
            config.strategy.premium_min_rating = rating.parse().unwrap_or(4.5);
        }

        Ok(config)
    }

    /// Complexity multiplier for a job
    pub fn complexity_multiplier(&self, complexity: Complexity) -> f64 {
        match complexity {
            Complexity::Simple => self.base.complexity_simple,
            Complexity::Moderate => self.base.complexity_moderate,
            Complexity::Complex => self.base.complexity_complex,
            Complexity::Expert => self.base.complexity_expert,
        }
    }

    /// Client preferred-tier multiplier
    pub fn tier_multiplier(&self, tier: PriceTier) -> f64 {
        match tier {
            PriceTier::Budget => self.base.tier_budget,
            PriceTier::Value => self.base.tier_value,
            PriceTier::Premium => self.base.tier_premium,
        }
    }

    /// Urgency multiplier
    pub fn urgency_multiplier(&self, urgency: Urgency) -> f64 {
        match urgency {
            Urgency::Low => self.adjustments.urgency_low,
            Urgency::Medium => self.adjustments.urgency_medium,
            Urgency::High => self.adjustments.urgency_high,
            Urgency::Critical => self.adjustments.urgency_critical,
        }
    }
}

/// Configuration for the auction bid optimizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidConfig {
    /// Auctions with less time remaining than this are in the closing regime
    pub closing_window_secs: u64,

    /// Auctions with more time remaining than this are in the early regime
    pub early_window_secs: u64,

    /// Closing top-up as a fraction of the job's max budget
    pub topup_budget_ratio: f64,

    /// Absolute ceiling on the closing top-up
    pub topup_cap: f64,

    /// Early regime: pull back when the current bid exceeds
    /// highest_competing x overbid_ratio
    pub overbid_ratio: f64,

    /// Early regime pull-back target relative to the highest competing bid
    pub pullback_ratio: f64,

    /// More competing bids than this triggers price discipline
    pub competition_threshold: usize,

    /// Price-discipline cap as a fraction of the job's max budget
    pub discipline_cap_ratio: f64,

    /// Confidence by regime
    pub default_confidence: f64,
    pub closing_confidence: f64,
    pub early_confidence: f64,
}

impl Default for BidConfig {
    fn default() -> Self {
        Self {
            closing_window_secs: 3600,     // 1 hour
            early_window_secs: 86_400,     // 24 hours
            topup_budget_ratio: 0.05,      // 5% of max budget
            topup_cap: 50.0,
            overbid_ratio: 1.1,
            pullback_ratio: 1.05,
            competition_threshold: 10,
            discipline_cap_ratio: 0.8,
            default_confidence: 0.7,
            closing_confidence: 0.8,
            early_confidence: 0.6,
        }
    }
}

impl BidConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(window) = std::env::var("BID_CLOSING_WINDOW_SECS") {
            config.closing_window_secs = window.parse().unwrap_or(3600);
        }

        if let Ok(window) = std::env::var("BID_EARLY_WINDOW_SECS") {
            config.early_window_secs = window.parse().unwrap_or(86_400);
        }

        if let Ok(cap) = std::env::var("BID_TOPUP_CAP") {
            config.topup_cap = cap.parse().unwrap_or(50.0);
        }

        Ok(config)
    }
}
