//! Valuation model
//!
//! Binds the equations to the scenario's bounds and precision, and applies
//! them across batches of requirements.

use rand::Rng;
use roa_core::config::{DEFAULT_RISK_SAMPLES, DEFAULT_ROUNDING_PLACES};
use roa_core::{DomainError, PlannerConfig, Requirement, RequirementRecord, ValuationBounds};

use crate::equations;
use crate::risk;

/// Value-to-cost and volatility of one requirement at one point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
    /// Normalized value-to-cost
    pub value_to_cost: f64,
    /// Normalized volatility
    pub volatility: f64,
}

impl Valuation {
    /// Volatility-weighted value-to-cost
    #[inline]
    #[must_use]
    pub fn score(&self) -> f64 {
        equations::score(self.value_to_cost, self.volatility)
    }
}

/// Real-options valuation model
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationModel {
    bounds: ValuationBounds,
    rounding_places: u32,
    risk_samples: usize,
}

impl Default for ValuationModel {
    fn default() -> Self {
        Self {
            bounds: ValuationBounds::default(),
            rounding_places: DEFAULT_ROUNDING_PLACES,
            risk_samples: DEFAULT_RISK_SAMPLES,
        }
    }
}

impl ValuationModel {
    /// Create model with the default scenario bounds
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create model from planner configuration
    #[must_use]
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            bounds: config.bounds,
            rounding_places: config.rounding_places,
            risk_samples: config.risk_samples,
        }
    }

    /// Normalization bounds in use
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> ValuationBounds {
        self.bounds
    }

    /// Normalized value-to-cost
    ///
    /// # Errors
    /// See [`equations::value_to_cost`].
    pub fn value_to_cost(
        &self,
        value: f64,
        cost: f64,
        return_rate: f64,
        time: i64,
    ) -> Result<f64, DomainError> {
        equations::value_to_cost(
            value,
            cost,
            return_rate,
            time,
            self.bounds.value_to_cost,
            self.rounding_places,
        )
    }

    /// Normalized volatility
    ///
    /// # Errors
    /// See [`equations::volatility`].
    pub fn volatility(&self, risk: f64, time: i64) -> Result<f64, DomainError> {
        equations::volatility(risk, time, self.bounds.volatility, self.rounding_places)
    }

    /// Sampled risk estimate for `value`
    ///
    /// # Errors
    /// See [`risk::generate_risk`].
    pub fn generate_risk<R: Rng + ?Sized>(&self, value: f64, rng: &mut R) -> Result<f64, DomainError> {
        risk::generate_risk(value, self.risk_samples, self.rounding_places, rng)
    }

    /// Value one requirement `elapsed_time` periods into the schedule
    ///
    /// # Errors
    /// The first [`DomainError`] hit by either metric.
    pub fn evaluate(&self, req: &Requirement, elapsed_time: i64) -> Result<Valuation, DomainError> {
        let time = req.time_remaining - elapsed_time;
        Ok(Valuation {
            value_to_cost: self.value_to_cost(req.value, req.cost, req.return_rate, time)?,
            volatility: self.volatility(req.risk, time)?,
        })
    }

    /// Annotate copies of `requirements` with value-to-cost and volatility
    ///
    /// Nothing is filtered out. A requirement whose metrics are undefined
    /// comes back unvalued and a warning is logged.
    #[must_use]
    pub fn calculate_with_expiry(
        &self,
        requirements: &[Requirement],
        elapsed_time: i64,
    ) -> Vec<Requirement> {
        requirements
            .iter()
            .map(|req| {
                let mut valued = req.clone();
                valued.score = None;
                match self.evaluate(req, elapsed_time) {
                    Ok(v) => {
                        valued.value_to_cost = Some(v.value_to_cost);
                        valued.volatility = Some(v.volatility);
                    }
                    Err(e) => {
                        tracing::warn!(code = %req.code, error = %e, "requirement left unvalued");
                        valued.value_to_cost = None;
                        valued.volatility = None;
                    }
                }
                valued
            })
            .collect()
    }

    /// Estimate risk for records that carry none, from their business value
    ///
    /// Returns how many records were filled in.
    pub fn fill_missing_risk<R: Rng + ?Sized>(
        &self,
        records: &mut [RequirementRecord],
        rng: &mut R,
    ) -> usize {
        let mut filled = 0;
        for record in records.iter_mut().filter(|r| r.risk.is_none()) {
            let Some(value) = record.value else { continue };
            match self.generate_risk(value, rng) {
                Ok(risk) => {
                    record.risk = Some(risk);
                    filled += 1;
                }
                Err(e) => tracing::warn!(code = ?record.code, error = %e, "risk not estimated"),
            }
        }
        filled
    }
}

/// Attach scores in place; returns how many requirements could not be scored
///
/// Requirements without both metrics keep `score = None`.
pub fn apply_scores(requirements: &mut [Requirement]) -> usize {
    let mut unscored = 0;
    for req in requirements.iter_mut() {
        req.score = match (req.value_to_cost, req.volatility) {
            (Some(vtc), Some(vol)) => Some(equations::score(vtc, vol)),
            _ => {
                tracing::warn!(code = %req.code, "requirement has no valuation, not scored");
                unscored += 1;
                None
            }
        };
    }
    unscored
}

/// Scored copies of `requirements`
#[must_use]
pub fn calculate_scores(requirements: &[Requirement]) -> Vec<Requirement> {
    let mut scored = requirements.to_vec();
    apply_scores(&mut scored);
    scored
}
