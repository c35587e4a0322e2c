use crate::adjustments::AdjustmentCalculator;
use crate::base::BasePriceCalculator;
use crate::bid::BidOptimizer;
use crate::confidence::ConfidenceScorer;
use crate::config::{BidConfig, PricingConfig};
use crate::models::{
    round_to_cents, AdjustmentSet, BidSuggestion, FactorBreakdown, JobCharacteristics,
    PriceRange, PricingFactors, PricingRecommendation, PricingStrategy, ProviderMetrics,
    RiskLevel, StrategyType, Urgency,
};
use crate::strategy::StrategyGenerator;
use market_data::{CacheConfig, MarketData, MarketDataCache, MarketDataProvider};
use std::sync::Arc;
use tracing::{info, warn};

/// Insight thresholds: a note is emitted only when the underlying metric
/// crosses its cutoff.
const HIGH_DEMAND_INDEX: f64 = 0.7;
const TIGHT_SUPPLY_INDEX: f64 = 0.3;
const EXCELLENT_RATING: f64 = 4.8;
const STRONG_COMPLETION: f64 = 0.98;
const CROWDED_MARKET: usize = 10;
const SURGE_IN_EFFECT: f64 = 1.2;
const UPWARD_WEEKLY_TREND: f64 = 0.05;

/// Pricing decision engine
///
/// The orchestrating entry point: looks up market data (cached), derives the
/// base price, applies the dynamic adjustments, generates strategies, scores
/// confidence, and assembles the recommendation. Neither public operation
/// ever fails the caller; market-data problems degrade to a budget-midpoint
/// fallback.
pub struct PricingEngine {
    config: PricingConfig,
    base: BasePriceCalculator,
    adjustments: AdjustmentCalculator,
    confidence: ConfidenceScorer,
    strategies: StrategyGenerator,
    bid: BidOptimizer,
    cache: MarketDataCache,
    provider: Arc<dyn MarketDataProvider>,
}

impl PricingEngine {
    /// Create a new pricing engine with explicit configuration
    pub fn new(
        config: PricingConfig,
        bid_config: BidConfig,
        cache_config: CacheConfig,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Self {
        Self {
            base: BasePriceCalculator::new(config.clone()),
            adjustments: AdjustmentCalculator::new(config.clone()),
            confidence: ConfidenceScorer::new(config.confidence.clone()),
            strategies: StrategyGenerator::new(config.strategy.clone()),
            bid: BidOptimizer::new(bid_config),
            cache: MarketDataCache::new(cache_config),
            provider,
            config,
        }
    }

    /// Create a pricing engine with default configuration
    pub fn with_defaults(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::new(PricingConfig::default(), BidConfig::default(), CacheConfig::default(), provider)
    }

    /// Generate a pricing recommendation for a job/provider pair
    ///
    /// Always returns a structurally valid recommendation. Out-of-range
    /// inputs are clamped; an unreachable market data provider triggers the
    /// degraded budget-midpoint fallback instead of an error.
    pub async fn generate_pricing_recommendation(
        &self,
        job: &JobCharacteristics,
        provider_metrics: &ProviderMetrics,
        factors: &PricingFactors,
    ) -> PricingRecommendation {
        let provider_metrics = provider_metrics.normalized();
        let factors = factors.normalized();

        match self
            .cache
            .get_or_fetch(&job.category, &job.location, self.provider.as_ref())
            .await
        {
            Ok(market) => self.assemble(job, &provider_metrics, &factors, &market),
            Err(err) => {
                warn!("Market data unavailable for {} ({}); using fallback pricing", job.category, err);
                self.fallback(job)
            }
        }
    }

    /// Suggest the next bid for a live auction on this job
    pub fn optimize_bid_price(
        &self,
        current_bid: f64,
        competing_bids: &[f64],
        time_remaining_secs: u64,
        job: &JobCharacteristics,
    ) -> BidSuggestion {
        self.bid.optimize_bid_price(current_bid, competing_bids, time_remaining_secs, job)
    }

    fn assemble(
        &self,
        job: &JobCharacteristics,
        provider_metrics: &ProviderMetrics,
        factors: &PricingFactors,
        market: &MarketData,
    ) -> PricingRecommendation {
        let base_price = self.base.calculate(job, provider_metrics, Some(market));
        let adjustments = self.adjustments.calculate(provider_metrics, factors, market);
        let combined = adjustments.clamped_combined(
            self.config.adjustments.combined_floor,
            self.config.adjustments.combined_ceiling,
        );
        let recommended_price = round_to_cents(base_price * combined);

        let strategies = self.strategies.generate(base_price, provider_metrics, market);
        let confidence = self.confidence.calculate(provider_metrics, market);
        let insights = self.build_insights(provider_metrics, factors, market, &adjustments);

        info!(
            "Recommendation for {} job: {:.2} (base: {:.2}, multiplier: {:.3}, confidence: {:.2})",
            job.category, recommended_price, base_price, combined, confidence
        );

        PricingRecommendation {
            recommended_price,
            price_range: PriceRange {
                min: round_to_cents(recommended_price * self.config.range.min_ratio),
                max: round_to_cents(recommended_price * self.config.range.max_ratio),
                optimal: recommended_price,
            },
            confidence,
            factors: FactorBreakdown {
                market_demand: adjustments.demand_surge,
                provider_quality: adjustments.quality_premium,
                urgency_premium: adjustments.urgency,
                competitive_landscape: adjustments.competition,
                seasonal_adjustment: adjustments.seasonal,
            },
            insights,
            strategies,
            adjustments,
        }
    }

    /// Degraded recommendation when market data cannot be obtained
    fn fallback(&self, job: &JobCharacteristics) -> PricingRecommendation {
        let price = round_to_cents(job.budget.midpoint());
        let adjustments = AdjustmentSet::neutral();

        PricingRecommendation {
            recommended_price: price,
            price_range: PriceRange {
                min: round_to_cents(price * self.config.range.min_ratio),
                max: round_to_cents(price * self.config.range.max_ratio),
                optimal: price,
            },
            confidence: self.config.fallback_confidence,
            factors: FactorBreakdown {
                market_demand: 1.0,
                provider_quality: 1.0,
                urgency_premium: 1.0,
                competitive_landscape: 1.0,
                seasonal_adjustment: 1.0,
            },
            insights: vec![
                "Market data is currently unavailable; this recommendation is anchored to your stated budget and carries reduced confidence.".to_string(),
            ],
            strategies: vec![PricingStrategy::new(
                StrategyType::Value,
                "Price at your budget midpoint until market data recovers",
                "Safe positioning with limited market visibility",
                RiskLevel::Low,
                price,
                self.config.strategy.value_booking_rate,
            )],
            adjustments,
        }
    }

    fn build_insights(
        &self,
        provider_metrics: &ProviderMetrics,
        factors: &PricingFactors,
        market: &MarketData,
        adjustments: &AdjustmentSet,
    ) -> Vec<String> {
        let mut insights = Vec::new();

        if market.demand_index > HIGH_DEMAND_INDEX {
            insights.push("High demand detected in this market.".to_string());
        }

        if market.supply_index < TIGHT_SUPPLY_INDEX {
            insights.push("Provider supply is tight; conditions favor firmer pricing.".to_string());
        }

        if provider_metrics.rating >= EXCELLENT_RATING {
            insights.push("Excellent rating supports premium pricing.".to_string());
        }

        if provider_metrics.completion_rate >= STRONG_COMPLETION {
            insights.push("Outstanding completion rate strengthens your position.".to_string());
        }

        if matches!(factors.urgency, Urgency::High | Urgency::Critical) {
            insights.push("Urgent timeline supports a higher rate.".to_string());
        }

        if market.competitors.len() > CROWDED_MARKET {
            insights.push(format!(
                "Crowded market with {} competing listings; consider competitive pricing.",
                market.competitors.len()
            ));
        }

        if adjustments.demand_surge > SURGE_IN_EFFECT {
            insights.push("Demand surge pricing is in effect.".to_string());
        }

        if market.trend_7d.price_delta > UPWARD_WEEKLY_TREND {
            insights.push("Prices in this market have trended upward over the past week.".to_string());
        }

        insights
    }
}
