use crate::config::PricingConfig;
use crate::models::{round_to_cents, JobCharacteristics, ProviderMetrics};
use market_data::MarketData;
use tracing::debug;

/// Base price calculator
///
/// Derives the pre-adjustment starting price from the market average, job
/// complexity, provider quality, and the client's preferred price tier.
/// Pure function of its inputs.
pub struct BasePriceCalculator {
    config: PricingConfig,
}

impl BasePriceCalculator {
    /// Create a new base price calculator
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Calculate the base price for a job/provider pair
    ///
    /// When the market knows no average price for the category (or market
    /// data is unavailable entirely), the job's budget midpoint anchors the
    /// calculation instead.
    pub fn calculate(
        &self,
        job: &JobCharacteristics,
        provider: &ProviderMetrics,
        market: Option<&MarketData>,
    ) -> f64 {
        let anchor = market
            .and_then(|m| m.average_price)
            .unwrap_or_else(|| job.budget.midpoint());

        let complexity = self.config.complexity_multiplier(job.complexity);
        let quality = 1.0 + (provider.quality_score - 0.5) * self.config.base.quality_span;
        let tier = self.config.tier_multiplier(job.client.preferred_tier);

        let base = round_to_cents(anchor * complexity * quality * tier);

        debug!(
            "Base price for {} job: {:.2} (anchor: {:.2}, complexity: {:.2}, quality: {:.2}, tier: {:.2})",
            job.category, base, anchor, complexity, quality, tier
        );

        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BudgetRange, ClientProfile, Complexity, JobCharacteristics, PriceTier, ProviderMetrics,
        Timeline,
    };
    use chrono::Utc;
    use market_data::{Location, MarketData, TrendDelta};

    fn job(complexity: Complexity, tier: PriceTier) -> JobCharacteristics {
        JobCharacteristics {
            category: "plumbing".to_string(),
            complexity,
            location: Location {
                latitude: 47.6,
                longitude: -122.3,
                city: "Seattle".to_string(),
                postal_code: "98101".to_string(),
            },
            timeline: Timeline {
                start: Utc::now(),
                deadline: Utc::now(),
                flexibility_hours: 24,
            },
            requirements: vec![],
            budget: BudgetRange { min: 80.0, max: 120.0, currency: "USD".to_string() },
            client: ClientProfile {
                rating: 4.0,
                payment_history_tier: "good".to_string(),
                repeat_customer: false,
                preferred_tier: tier,
            },
        }
    }

    fn provider(quality_score: f64) -> ProviderMetrics {
        ProviderMetrics {
            provider_id: "p1".to_string(),
            rating: 4.2,
            completion_rate: 0.93,
            avg_response_minutes: 30.0,
            price_history: vec![],
            demand_score: 0.5,
            quality_score,
            reliability_score: 0.8,
            specializations: vec![],
            years_experience: 4,
            certifications: vec![],
        }
    }

    fn market(average: Option<f64>) -> MarketData {
        MarketData {
            category: "plumbing".to_string(),
            average_price: average,
            competitors: vec![],
            demand_index: 0.5,
            supply_index: 0.5,
            price_elasticity: 0.4,
            trend_7d: TrendDelta::default(),
            trend_30d: TrendDelta::default(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn neutral_inputs_return_market_average() {
        let calc = BasePriceCalculator::new(PricingConfig::default());
        let market = market(Some(100.0));
        // Moderate complexity, quality_score 0.5, value tier: all multipliers 1.0
        let base = calc.calculate(
            &job(Complexity::Moderate, PriceTier::Value),
            &provider(0.5),
            Some(&market),
        );
        assert_eq!(base, 100.0);
    }

    #[test]
    fn complexity_and_tier_scale_the_anchor() {
        let calc = BasePriceCalculator::new(PricingConfig::default());
        let market = market(Some(100.0));
        let base = calc.calculate(
            &job(Complexity::Expert, PriceTier::Premium),
            &provider(0.5),
            Some(&market),
        );
        // 100 * 1.6 * 1.0 * 1.2
        assert_eq!(base, 192.0);
    }

    #[test]
    fn quality_score_centers_at_half() {
        let calc = BasePriceCalculator::new(PricingConfig::default());
        let market = market(Some(100.0));
        let high = calc.calculate(
            &job(Complexity::Moderate, PriceTier::Value),
            &provider(1.0),
            Some(&market),
        );
        let low = calc.calculate(
            &job(Complexity::Moderate, PriceTier::Value),
            &provider(0.0),
            Some(&market),
        );
        assert_eq!(high, 120.0);
        assert_eq!(low, 80.0);
    }

    #[test]
    fn missing_market_average_falls_back_to_budget_midpoint() {
        let calc = BasePriceCalculator::new(PricingConfig::default());
        let no_average = market(None);
        let base = calc.calculate(
            &job(Complexity::Moderate, PriceTier::Value),
            &provider(0.5),
            Some(&no_average),
        );
        assert_eq!(base, 100.0); // (80 + 120) / 2

        let no_market = calc.calculate(
            &job(Complexity::Moderate, PriceTier::Value),
            &provider(0.5),
            None,
        );
        assert_eq!(no_market, 100.0);
    }
}
