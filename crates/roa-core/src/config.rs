//! Planner configuration
//!
//! Scenario parameters: release budget, urgent-expiry thresholds,
//! normalization bounds and the number of best-of-random runs. Every field
//! has a default so a TOML file only needs to name what it overrides.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default release capacity in cost units
pub const DEFAULT_BUDGET: f64 = 15.0;

/// Default number of random plans tried by best-of-random
pub const DEFAULT_BEST_OF_RANDOM_RUNS: usize = 10;

/// Default number of draws used to estimate risk
pub const DEFAULT_RISK_SAMPLES: usize = 10;

/// Default rounding precision for valuation metrics
pub const DEFAULT_ROUNDING_PLACES: u32 = 3;

/// Largest knapsack capacity, `budget * cost_scale`, in integer cost units
pub const MAX_CAPACITY_UNITS: f64 = 1_000_000.0;

/// Largest knapsack table, `(items + 1) * (capacity + 1)` cells
///
/// Two tables of this size are held at once, one `f64` and one `bool`, so
/// the cap bounds a single call at a little over 2 GiB.
pub const MAX_TABLE_CELLS: usize = 1 << 28;

/// Linear normalization bounds for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Bounds {
    /// Create bounds
    #[inline]
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the interval
    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.max <= self.min {
            return Err(ConfigError::DegenerateBounds {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Normalization bounds for both valuation metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationBounds {
    /// Value-to-cost bounds (0, 3.5)
    pub value_to_cost: Bounds,
    /// Volatility bounds (0, 7)
    pub volatility: Bounds,
}

impl Default for ValuationBounds {
    fn default() -> Self {
        Self {
            value_to_cost: Bounds::new(0.0, 3.5),
            volatility: Bounds::new(0.0, 7.0),
        }
    }
}

/// Urgent-expiry rule applied before the main selection pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyRule {
    /// Remaining time at which a requirement counts as about to expire
    pub time_remaining: i64,
    /// Minimum score for greedy to force-select an urgent requirement
    pub greedy_min_score: f64,
    /// Minimum value-to-cost for knapsack to force-select an urgent requirement
    pub knapsack_min_value_to_cost: f64,
}

impl Default for UrgencyRule {
    fn default() -> Self {
        Self {
            time_remaining: 0,
            greedy_min_score: 1.0,
            knapsack_min_value_to_cost: 1.0,
        }
    }
}

impl UrgencyRule {
    /// Check if a requirement with this remaining time is about to expire
    #[inline]
    #[must_use]
    pub fn is_urgent(&self, time_remaining: i64) -> bool {
        time_remaining == self.time_remaining
    }
}

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Release capacity in cost units
    pub budget: f64,
    /// Integer units per cost unit for the knapsack table
    pub cost_scale: u32,
    /// Random plans tried by best-of-random
    pub best_of_random_runs: usize,
    /// Run best-of-random candidates on the rayon pool
    pub parallel_best_of_random: bool,
    /// Decimal places kept by valuation metrics
    pub rounding_places: u32,
    /// Draws used to estimate risk
    pub risk_samples: usize,
    /// Releases simulated before the deadline
    pub release_horizon: usize,
    /// Urgent-expiry thresholds
    pub urgency: UrgencyRule,
    /// Normalization bounds
    pub bounds: ValuationBounds,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            cost_scale: 1,
            best_of_random_runs: DEFAULT_BEST_OF_RANDOM_RUNS,
            parallel_best_of_random: false,
            rounding_places: DEFAULT_ROUNDING_PLACES,
            risk_samples: DEFAULT_RISK_SAMPLES,
            release_horizon: 5,
            urgency: UrgencyRule::default(),
            bounds: ValuationBounds::default(),
        }
    }
}

impl PlannerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate TOML configuration
    ///
    /// # Errors
    /// [`ConfigError::Parse`] on malformed TOML, or any error from [`Self::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        tracing::debug!(budget = config.budget, "loaded planner configuration");
        Ok(config)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// [`ConfigError::Parse`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// With budget
    #[inline]
    #[must_use]
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    /// With knapsack cost scale
    #[inline]
    #[must_use]
    pub fn with_cost_scale(mut self, scale: u32) -> Self {
        self.cost_scale = scale;
        self
    }

    /// With urgency rule
    #[inline]
    #[must_use]
    pub fn with_urgency(mut self, urgency: UrgencyRule) -> Self {
        self.urgency = urgency;
        self
    }

    /// With number of best-of-random runs
    #[inline]
    #[must_use]
    pub fn with_best_of_random_runs(mut self, runs: usize) -> Self {
        self.best_of_random_runs = runs;
        self
    }

    /// With parallel best-of-random
    #[inline]
    #[must_use]
    pub fn with_parallel_best_of_random(mut self, parallel: bool) -> Self {
        self.parallel_best_of_random = parallel;
        self
    }

    /// With normalization bounds
    #[inline]
    #[must_use]
    pub fn with_bounds(mut self, bounds: ValuationBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// With release horizon
    #[inline]
    #[must_use]
    pub fn with_release_horizon(mut self, releases: usize) -> Self {
        self.release_horizon = releases;
        self
    }

    /// Check every parameter is usable
    ///
    /// # Errors
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(ConfigError::InvalidBudget(self.budget));
        }
        if self.cost_scale == 0 {
            return Err(ConfigError::InvalidCostScale(self.cost_scale));
        }
        let units = self.budget * f64::from(self.cost_scale);
        if units > MAX_CAPACITY_UNITS {
            return Err(ConfigError::CapacityTooLarge {
                units,
                limit: MAX_CAPACITY_UNITS,
            });
        }
        if self.best_of_random_runs == 0 {
            return Err(ConfigError::NoRuns);
        }
        if self.risk_samples < 2 {
            return Err(ConfigError::TooFewSamples(self.risk_samples));
        }
        self.bounds.value_to_cost.validate("value-to-cost")?;
        self.bounds.volatility.validate("volatility")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_scenario() {
        let config = PlannerConfig::new();
        assert_eq!(config.budget, 15.0);
        assert_eq!(config.best_of_random_runs, 10);
        assert_eq!(config.bounds.value_to_cost, Bounds::new(0.0, 3.5));
        assert_eq!(config.bounds.volatility, Bounds::new(0.0, 7.0));
        assert!(config.urgency.is_urgent(0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = PlannerConfig::from_toml_str(
            r#"
            budget = 20.0

            [urgency]
            greedy_min_score = 1.5
            "#,
        )
        .unwrap();

        assert_eq!(config.budget, 20.0);
        assert_eq!(config.urgency.greedy_min_score, 1.5);
        assert_eq!(config.urgency.knapsack_min_value_to_cost, 1.0);
        assert_eq!(config.cost_scale, 1);
    }

    #[test]
    fn toml_round_trip() {
        let config = PlannerConfig::new().with_budget(12.0).with_cost_scale(10);
        let text = config.to_toml_string().unwrap();
        assert_eq!(PlannerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn rejects_negative_budget() {
        let err = PlannerConfig::new().with_budget(-1.0).validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidBudget(-1.0));
    }

    #[test]
    fn rejects_capacity_beyond_table_limit() {
        let err = PlannerConfig::new().with_budget(1.0e19).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::CapacityTooLarge {
                units: 1.0e19,
                limit: MAX_CAPACITY_UNITS
            }
        );

        // the limit applies to scaled units, not the raw budget
        let scaled = PlannerConfig::new().with_budget(200_000.0).with_cost_scale(10);
        assert!(matches!(
            scaled.validate(),
            Err(ConfigError::CapacityTooLarge { .. })
        ));
        assert!(PlannerConfig::new()
            .with_budget(MAX_CAPACITY_UNITS)
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_zero_runs_and_scale() {
        assert_eq!(
            PlannerConfig::new().with_best_of_random_runs(0).validate(),
            Err(ConfigError::NoRuns)
        );
        assert_eq!(
            PlannerConfig::new().with_cost_scale(0).validate(),
            Err(ConfigError::InvalidCostScale(0))
        );
    }

    #[test]
    fn rejects_inverted_bounds() {
        let bounds = ValuationBounds {
            volatility: Bounds::new(7.0, 0.0),
            ..ValuationBounds::default()
        };
        let err = PlannerConfig::new().with_bounds(bounds).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DegenerateBounds {
                name: "volatility",
                ..
            }
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = PlannerConfig::from_toml_str("budget = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
