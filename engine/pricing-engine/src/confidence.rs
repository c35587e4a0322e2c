use crate::config::ConfidenceParameters;
use crate::models::ProviderMetrics;
use market_data::MarketData;

/// Confidence scorer
///
/// Estimates how much historical and market data backs a recommendation.
/// Additive bonuses over a base score, hard-capped below 1.0 so the engine
/// never claims full certainty.
pub struct ConfidenceScorer {
    params: ConfidenceParameters,
}

impl ConfidenceScorer {
    /// Create a new confidence scorer
    pub fn new(params: ConfidenceParameters) -> Self {
        Self { params }
    }

    /// Score confidence for one recommendation
    pub fn calculate(&self, provider: &ProviderMetrics, market: &MarketData) -> f64 {
        let mut confidence = self.params.base;

        if market.competitors.len() >= self.params.competitor_threshold {
            confidence += self.params.competitor_bonus;
        }

        if provider.price_history.len() > self.params.history_threshold {
            confidence += self.params.history_bonus;
        }

        if provider.rating >= self.params.rating_threshold {
            confidence += self.params.rating_bonus;
        }

        if provider.completion_rate >= self.params.completion_threshold {
            confidence += self.params.completion_bonus;
        }

        if market.price_elasticity < self.params.elasticity_threshold {
            confidence += self.params.elasticity_bonus;
        }

        confidence.min(self.params.cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;
    use crate::models::PricePoint;
    use chrono::Utc;
    use market_data::{CompetitorListing, TrendDelta};

    fn scorer() -> ConfidenceScorer {
        ConfidenceScorer::new(PricingConfig::default().confidence)
    }

    fn provider() -> ProviderMetrics {
        ProviderMetrics {
            provider_id: "p1".to_string(),
            rating: 4.0,
            completion_rate: 0.9,
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

    fn market(competitors: usize, elasticity: f64) -> MarketData {
        MarketData {
            category: "plumbing".to_string(),
            average_price: Some(100.0),
            competitors: (0..competitors)
                .map(|i| CompetitorListing {
                    provider_id: format!("c{}", i),
                    price: 100.0,
                    rating: 4.0,
                    booking_rate: 0.5,
                })
                .collect(),
            demand_index: 0.5,
            supply_index: 0.5,
            price_elasticity: elasticity,
            trend_7d: TrendDelta::default(),
            trend_30d: TrendDelta::default(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn sparse_data_scores_the_base() {
        let confidence = scorer().calculate(&provider(), &market(0, 0.5));
        assert!((confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn bonuses_accumulate() {
        let mut strong = provider();
        strong.rating = 4.6;
        let confidence = scorer().calculate(&strong, &market(5, 0.5));
        // base 0.7 + competitors 0.1 + rating 0.1
        assert!((confidence - 0.9).abs() < 1e-12);
    }

    #[test]
    fn capped_below_certainty() {
        let mut elite = provider();
        elite.rating = 4.9;
        elite.completion_rate = 0.99;
        elite.price_history = (0..12)
            .map(|_| PricePoint {
                price: 100.0,
                recorded_at: Utc::now(),
                job_category: "plumbing".to_string(),
            })
            .collect();

        // All five bonuses would land at 1.1; the cap holds at 0.95
        let confidence = scorer().calculate(&elite, &market(8, 0.2));
        assert_eq!(confidence, 0.95);
    }

    #[test]
    fn confidence_stays_in_range() {
        for competitors in [0, 4, 5, 20] {
            for elasticity in [0.1, 0.5] {
                let confidence = scorer().calculate(&provider(), &market(competitors, elasticity));
                assert!((0.0..=0.95).contains(&confidence));
            }
        }
    }
}
