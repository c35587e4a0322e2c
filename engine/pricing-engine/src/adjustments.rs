use crate::config::PricingConfig;
use crate::models::{AdjustmentSet, PricingFactors, ProviderMetrics};
use market_data::{CompetitorListing, MarketData};
use tracing::debug;

/// Ordered threshold ladder: the value of the first step whose threshold is
/// strictly exceeded wins, otherwise the default applies
///
/// Keeps each adjustment factor a small pure lookup that can be tested and
/// tuned independently of the composition logic.
#[derive(Debug, Clone)]
pub struct Band {
    steps: Vec<(f64, f64)>,
    default: f64,
}

impl Band {
    /// Build a band from descending (threshold, value) steps
    pub fn new(steps: Vec<(f64, f64)>, default: f64) -> Self {
        debug_assert!(
            steps.windows(2).all(|w| w[0].0 > w[1].0),
            "band thresholds must be strictly descending"
        );
        Self { steps, default }
    }

    /// Value for `x`: first step with `x > threshold`, else the default
    pub fn value_for(&self, x: f64) -> f64 {
        self.steps.iter().find(|(threshold, _)| x > *threshold).map(|(_, v)| *v).unwrap_or(self.default)
    }
}

/// Dynamic adjustment calculator
///
/// Computes seven independent multiplicative factors from live conditions
/// and combines them into the adjustment applied to the base price.
pub struct AdjustmentCalculator {
    config: PricingConfig,
    surge_band: Band,
}

impl AdjustmentCalculator {
    /// Create a new adjustment calculator
    pub fn new(config: PricingConfig) -> Self {
        // Demand/supply ratio ladder: 2.0x demand over supply earns the full
        // surge, easing down to neutral at parity
        let surge_band = Band::new(vec![(2.0, 1.5), (1.5, 1.3), (1.2, 1.15)], 1.0);
        Self { config, surge_band }
    }

    /// Compute all seven multipliers for one pricing request
    pub fn calculate(
        &self,
        provider: &ProviderMetrics,
        factors: &PricingFactors,
        market: &MarketData,
    ) -> AdjustmentSet {
        let set = AdjustmentSet {
            time_of_day: self.time_multiplier(factors.time_of_day, factors.day_of_week),
            demand_surge: self.surge_multiplier(factors.demand, factors.supply),
            quality_premium: self.quality_multiplier(provider),
            urgency: self.config.urgency_multiplier(factors.urgency),
            seasonal: self.seasonal_multiplier(factors.seasonality),
            weather: self.weather_multiplier(factors.weather_impact),
            competition: self.competition_multiplier(&market.competitors),
        };

        debug!(
            "Adjustments: time {:.2}, surge {:.2}, quality {:.2}, urgency {:.2}, seasonal {:.2}, weather {:.2}, competition {:.2}",
            set.time_of_day,
            set.demand_surge,
            set.quality_premium,
            set.urgency,
            set.seasonal,
            set.weather,
            set.competition
        );

        set
    }

    /// Time-of-day / day-of-week multiplier
    ///
    /// Each matching condition adds its bonus onto the same running total
    /// starting at 1.0; the conditions stack additively, not multiplicatively.
    pub fn time_multiplier(&self, hour: u8, day_of_week: u8) -> f64 {
        let mut multiplier = 1.0;

        // Business hours carry steady demand
        if (9..=17).contains(&hour) {
            multiplier += 0.10;
        }

        // Off-hours and weekends
        let weekend = day_of_week == 0 || day_of_week == 6;
        if !(8..=20).contains(&hour) || weekend {
            multiplier += 0.15;
        }

        // Deep night work
        if hour < 6 || hour > 22 {
            multiplier += 0.25;
        }

        multiplier
    }

    /// Demand surge multiplier from the demand/supply ratio
    pub fn surge_multiplier(&self, demand: f64, supply: f64) -> f64 {
        let ratio = demand / supply.max(self.config.adjustments.supply_floor);
        if ratio < 0.8 {
            0.9
        } else {
            self.surge_band.value_for(ratio)
        }
    }

    /// Quality premium from rating, completion, experience, and demand bands
    pub fn quality_multiplier(&self, provider: &ProviderMetrics) -> f64 {
        let mut multiplier: f64 = 1.0;

        if provider.rating >= 4.8 {
            multiplier += 0.2;
        } else if provider.rating >= 4.5 {
            multiplier += 0.1;
        } else if provider.rating < 4.0 {
            multiplier -= 0.1;
        }

        if provider.completion_rate >= 0.98 {
            multiplier += 0.1;
        } else if provider.completion_rate < 0.9 {
            multiplier -= 0.15;
        }

        if provider.years_experience >= 10 {
            multiplier += 0.1;
        } else if provider.years_experience >= 5 {
            multiplier += 0.05;
        }

        if provider.demand_score >= 0.8 {
            multiplier += 0.15;
        }

        multiplier.clamp(self.config.adjustments.quality_min, self.config.adjustments.quality_max)
    }

    /// Seasonal multiplier: 0.9 (off-season) through 1.1 (peak)
    pub fn seasonal_multiplier(&self, seasonality: f64) -> f64 {
        0.9 + seasonality * 0.2
    }

    /// Weather multiplier; neutral when no weather signal was supplied
    pub fn weather_multiplier(&self, weather_impact: Option<f64>) -> f64 {
        match weather_impact {
            Some(impact) => 0.95 + impact * 0.1,
            None => 1.0,
        }
    }

    /// Competitive landscape multiplier
    ///
    /// High price dispersion among competitors (stddev/mean > 0.3) relaxes
    /// price pressure; a crowded market (> 10 listings) adds downward
    /// pressure. The dispersion branch is checked first and at these cutoffs
    /// the two can never both apply; this mirrors the original rules and is
    /// kept as-is rather than redesigned.
    pub fn competition_multiplier(&self, competitors: &[CompetitorListing]) -> f64 {
        if competitors.is_empty() {
            return 1.0;
        }

        let mean = competitors.iter().map(|c| c.price).sum::<f64>() / competitors.len() as f64;
        let variance = competitors.iter().map(|c| (c.price - mean).powi(2)).sum::<f64>()
            / competitors.len() as f64;
        let dispersion = if mean > 0.0 { variance.sqrt() / mean } else { 0.0 };

        if dispersion > 0.3 {
            1.1
        } else if competitors.len() > 10 {
            0.95
        } else {
            1.0
        }
    }
}
