use crate::config::BidConfig;
use crate::models::{round_to_cents, BidSuggestion, JobCharacteristics};
use tracing::debug;

/// Auction bid optimizer
///
/// Proposes the next bid for a live multi-party auction based on the time
/// remaining and the competing bids. Pure and synchronous; it reads nothing
/// from the job beyond its budget ceiling.
pub struct BidOptimizer {
    config: BidConfig,
}

impl BidOptimizer {
    /// Create a new bid optimizer
    pub fn new(config: BidConfig) -> Self {
        Self { config }
    }

    /// Suggest the next bid
    ///
    /// Three time regimes: closing (top up aggressively when outbid), early
    /// (pull back when far ahead of the competition), and mid-range (hold).
    /// Heavy competition caps the suggestion at a fraction of the budget
    /// ceiling in any regime. Reasoning accumulates across the rules that
    /// fired.
    pub fn optimize_bid_price(
        &self,
        current_bid: f64,
        competing_bids: &[f64],
        time_remaining_secs: u64,
        job: &JobCharacteristics,
    ) -> BidSuggestion {
        let highest_competing = competing_bids.iter().copied().reduce(f64::max);

        let mut suggested = current_bid;
        let mut confidence = self.config.default_confidence;
        let mut reasons: Vec<String> = Vec::new();

        if time_remaining_secs < self.config.closing_window_secs {
            if let Some(highest) = highest_competing {
                if current_bid < highest {
                    let topup =
                        (job.budget.max * self.config.topup_budget_ratio).min(self.config.topup_cap);
                    suggested = round_to_cents(highest + topup);
                    confidence = self.config.closing_confidence;
                    reasons.push(format!(
                        "Auction is closing and you are below the highest bid of {:.2}; topping up to {:.2} to regain the lead.",
                        highest, suggested
                    ));
                }
            }
        } else if time_remaining_secs > self.config.early_window_secs {
            if let Some(highest) = highest_competing {
                if current_bid > highest * self.config.overbid_ratio {
                    suggested = round_to_cents(highest * self.config.pullback_ratio);
                    confidence = self.config.early_confidence;
                    reasons.push(format!(
                        "Plenty of time remains and your bid is well above the competition at {:.2}; pulling back to {:.2} preserves margin.",
                        highest, suggested
                    ));
                }
            }
        }

        if competing_bids.len() > self.config.competition_threshold {
            let cap = round_to_cents(job.budget.max * self.config.discipline_cap_ratio);
            if suggested > cap {
                suggested = cap;
            }
            reasons.push(format!(
                "{} competing bids are in play; holding the line at or below {:.2} to avoid overpaying.",
                competing_bids.len(),
                cap
            ));
        }

        if reasons.is_empty() {
            reasons.push(
                "Holding the current bid; no adjustment is warranted at this stage of the auction."
                    .to_string(),
            );
        }

        let suggestion = BidSuggestion {
            suggested_bid: round_to_cents(suggested),
            reasoning: reasons.join(" "),
            confidence,
        };

        debug!(
            "Bid suggestion: {:.2} (current: {:.2}, {} competing, {}s remaining, confidence {:.2})",
            suggestion.suggested_bid,
            current_bid,
            competing_bids.len(),
            time_remaining_secs,
            suggestion.confidence
        );

        suggestion
    }
}

impl Default for BidOptimizer {
    fn default() -> Self {
        Self::new(BidConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetRange, ClientProfile, Complexity, PriceTier, Timeline};
    use chrono::Utc;
    use market_data::Location;

    fn job(budget_max: f64) -> JobCharacteristics {
        JobCharacteristics {
            category: "plumbing".to_string(),
            complexity: Complexity::Moderate,
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
            budget: BudgetRange { min: 100.0, max: budget_max, currency: "USD".to_string() },
            client: ClientProfile {
                rating: 4.0,
                payment_history_tier: "good".to_string(),
                repeat_customer: false,
                preferred_tier: PriceTier::Value,
            },
        }
    }

    #[test]
    fn closing_regime_tops_up_over_the_highest_bid() {
        let suggestion =
            BidOptimizer::default().optimize_bid_price(100.0, &[150.0, 140.0], 1800, &job(1000.0));
        // 150 + min(1000 * 0.05, 50) = 200
        assert_eq!(suggestion.suggested_bid, 200.0);
        assert_eq!(suggestion.confidence, 0.8);
        assert!(suggestion.reasoning.contains("closing"));
    }

    #[test]
    fn closing_regime_holds_when_already_leading() {
        let suggestion =
            BidOptimizer::default().optimize_bid_price(160.0, &[150.0, 140.0], 1800, &job(1000.0));
        assert_eq!(suggestion.suggested_bid, 160.0);
        assert_eq!(suggestion.confidence, 0.7);
    }

    #[test]
    fn early_regime_pulls_back_an_overbid() {
        let suggestion =
            BidOptimizer::default().optimize_bid_price(200.0, &[100.0], 100_000, &job(1000.0));
        assert_eq!(suggestion.suggested_bid, 105.0); // 100 * 1.05
        assert_eq!(suggestion.confidence, 0.6);
    }

    #[test]
    fn early_regime_leaves_a_close_bid_alone() {
        let suggestion =
            BidOptimizer::default().optimize_bid_price(105.0, &[100.0], 100_000, &job(1000.0));
        assert_eq!(suggestion.suggested_bid, 105.0);
        assert_eq!(suggestion.confidence, 0.7);
    }

    #[test]
    fn mid_range_holds_the_current_bid() {
        let suggestion =
            BidOptimizer::default().optimize_bid_price(120.0, &[150.0], 7200, &job(1000.0));
        assert_eq!(suggestion.suggested_bid, 120.0);
        assert_eq!(suggestion.confidence, 0.7);
        assert!(suggestion.reasoning.contains("Holding"));
    }

    #[test]
    fn heavy_competition_caps_the_suggestion() {
        let bids: Vec<f64> = (0..12).map(|i| 400.0 + i as f64).collect();
        let suggestion = BidOptimizer::default().optimize_bid_price(100.0, &bids, 1800, &job(500.0));
        // Closing top-up would land at 411 + min(25, 50) = 436; capped at 500 * 0.8
        assert_eq!(suggestion.suggested_bid, 400.0);
        assert!(suggestion.reasoning.contains("competing bids"));
    }

    #[test]
    fn heavy_competition_notes_discipline_even_below_the_cap() {
        let bids = vec![50.0; 11];
        let suggestion =
            BidOptimizer::default().optimize_bid_price(60.0, &bids, 7200, &job(1000.0));
        assert_eq!(suggestion.suggested_bid, 60.0);
        assert!(suggestion.reasoning.contains("competing bids"));
    }

    #[test]
    fn no_competing_bids_returns_the_current_bid() {
        let suggestion = BidOptimizer::default().optimize_bid_price(100.0, &[], 1800, &job(1000.0));
        assert_eq!(suggestion.suggested_bid, 100.0);
        assert_eq!(suggestion.confidence, 0.7);
    }
}
