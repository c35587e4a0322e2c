use crate::config::StrategyParameters;
use crate::models::{PricingStrategy, ProviderMetrics, RiskLevel, StrategyType};
use market_data::MarketData;
use std::cmp::Ordering;

/// Strategy generator
///
/// Emits the applicable pricing alternatives for a request and ranks them
/// by expected revenue (price x projected booking rate), best first.
pub struct StrategyGenerator {
    params: StrategyParameters,
}

impl StrategyGenerator {
    /// Create a new strategy generator
    pub fn new(params: StrategyParameters) -> Self {
        Self { params }
    }

    /// Generate strategies for a base price, sorted descending by expected
    /// revenue
    ///
    /// Competitive requires competitor data; Premium requires a provider
    /// rating at or above the configured gate. Value and Dynamic always
    /// apply.
    pub fn generate(
        &self,
        base_price: f64,
        provider: &ProviderMetrics,
        market: &MarketData,
    ) -> Vec<PricingStrategy> {
        let mut strategies = Vec::with_capacity(4);

        if let Some(competitor_avg) = market.competitor_average_price() {
            strategies.push(PricingStrategy::new(
                StrategyType::Competitive,
                "Undercut the competitor average to win volume",
                "High booking likelihood at a thinner margin",
                RiskLevel::Low,
                competitor_avg * self.params.competitive_discount,
                self.params.competitive_booking_rate,
            ));
        }

        if provider.rating >= self.params.premium_min_rating {
            strategies.push(PricingStrategy::new(
                StrategyType::Premium,
                "Price above market on the strength of your rating",
                "Fewer bookings at a substantially higher margin",
                RiskLevel::High,
                base_price * self.params.premium_markup,
                self.params.premium_booking_rate,
            ));
        }

        strategies.push(PricingStrategy::new(
            StrategyType::Value,
            "Match the market-derived base price",
            "Balanced booking rate and margin",
            RiskLevel::Low,
            base_price,
            self.params.value_booking_rate,
        ));

        strategies.push(PricingStrategy::new(
            StrategyType::Dynamic,
            "Start slightly above base and adapt to live demand and supply",
            "Captures surge upside while staying bookable",
            RiskLevel::Medium,
            base_price * self.params.dynamic_markup,
            self.params.dynamic_booking_rate,
        ));

        strategies.sort_by(|a, b| {
            b.expected_revenue.partial_cmp(&a.expected_revenue).unwrap_or(Ordering::Equal)
        });

        strategies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;
    use chrono::Utc;
    use market_data::{CompetitorListing, TrendDelta};

    fn generator() -> StrategyGenerator {
        StrategyGenerator::new(PricingConfig::default().strategy)
    }

    fn provider(rating: f64) -> ProviderMetrics {
        ProviderMetrics {
            provider_id: "p1".to_string(),
            rating,
            completion_rate: 0.93,
            avg_response_minutes: 30.0,
            price_history: vec![],
            demand_score: 0.5,
            quality_score: 0.5,
            reliability_score: 0.8,
            specializations: vec![],
            years_experience: 4,
            certifications: vec![],
        }
    }

    fn market(competitor_prices: &[f64]) -> MarketData {
        MarketData {
            category: "plumbing".to_string(),
            average_price: Some(100.0),
            competitors: competitor_prices
                .iter()
                .map(|&price| CompetitorListing {
                    provider_id: "c".to_string(),
                    price,
                    rating: 4.0,
                    booking_rate: 0.5,
                })
                .collect(),
            demand_index: 0.5,
            supply_index: 0.5,
            price_elasticity: 0.4,
            trend_7d: TrendDelta::default(),
            trend_30d: TrendDelta::default(),
            fetched_at: Utc::now(),
        }
    }

    fn types(strategies: &[PricingStrategy]) -> Vec<StrategyType> {
        strategies.iter().map(|s| s.strategy_type).collect()
    }

    #[test]
    fn always_emits_value_and_dynamic() {
        let strategies = generator().generate(100.0, &provider(4.0), &market(&[]));
        let emitted = types(&strategies);
        assert!(emitted.contains(&StrategyType::Value));
        assert!(emitted.contains(&StrategyType::Dynamic));
        assert_eq!(strategies.len(), 2);
    }

    #[test]
    fn no_premium_below_rating_gate() {
        let strategies = generator().generate(100.0, &provider(4.4), &market(&[100.0]));
        assert!(!types(&strategies).contains(&StrategyType::Premium));
    }

    #[test]
    fn premium_at_rating_gate() {
        let strategies = generator().generate(100.0, &provider(4.5), &market(&[]));
        let premium = strategies
            .iter()
            .find(|s| s.strategy_type == StrategyType::Premium)
            .expect("premium strategy");
        assert_eq!(premium.price, 120.0);
        assert_eq!(premium.expected_booking_rate, 0.45);
    }

    #[test]
    fn no_competitive_without_competitor_data() {
        let strategies = generator().generate(100.0, &provider(4.9), &market(&[]));
        assert!(!types(&strategies).contains(&StrategyType::Competitive));
    }

    #[test]
    fn competitive_prices_off_competitor_average() {
        let strategies = generator().generate(100.0, &provider(4.0), &market(&[110.0, 90.0]));
        let competitive = strategies
            .iter()
            .find(|s| s.strategy_type == StrategyType::Competitive)
            .expect("competitive strategy");
        assert_eq!(competitive.price, 95.0); // 0.95 * avg(110, 90)
        assert_eq!(competitive.expected_booking_rate, 0.75);
    }

    #[test]
    fn sorted_descending_by_expected_revenue() {
        let strategies = generator().generate(100.0, &provider(4.9), &market(&[100.0, 105.0]));
        assert_eq!(strategies.len(), 4);
        for pair in strategies.windows(2) {
            assert!(pair[0].expected_revenue >= pair[1].expected_revenue);
        }
        // Competitive at ~97.38 * 0.75 leads dynamic 110 * 0.65
        assert_eq!(strategies[0].strategy_type, StrategyType::Competitive);
    }
}
