//! Random selection strategy
//!
//! Draws candidates uniformly until the first unblocked draw that does not
//! fit the remaining capacity.

use rand::Rng;
use roa_core::{validate_requirements, Plan, PlannerConfig, PlannerResult, Requirement};

use crate::budget::Budget;
use crate::pool::CandidatePool;
use crate::strategy::{Determinism, SelectionStrategy};

/// Random strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomStrategy {
    budget: f64,
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new(roa_core::DEFAULT_BUDGET)
    }
}

impl RandomStrategy {
    /// Create random strategy with capacity `budget`
    #[inline]
    #[must_use]
    pub fn new(budget: f64) -> Self {
        Self { budget }
    }

    /// Create random strategy from planner configuration
    #[inline]
    #[must_use]
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.budget)
    }

    /// Draw one random plan, keeping the full records in selection order
    ///
    /// Blocked draws are retried. The run also ends once every remaining
    /// candidate is blocked.
    pub fn draw<R: Rng + ?Sized>(&self, requirements: &[Requirement], rng: &mut R) -> Vec<Requirement> {
        let mut pool = CandidatePool::new(requirements);
        let mut budget = Budget::new(self.budget);
        let mut picked = Vec::new();

        while !pool.is_empty() {
            let index = rng.random_range(0..pool.len());

            if pool.is_blocked_at(index) {
                if pool.all_blocked() {
                    tracing::debug!(left = pool.len(), "every remaining requirement is blocked");
                    break;
                }
                continue;
            }

            let cost = pool.get(index).cost;
            if !budget.fits(cost) {
                tracing::debug!(code = %pool.get(index).code, cost, spent = budget.spent(), "draw does not fit, stopping");
                break;
            }

            budget.spend(cost);
            picked.push(pool.remove(index));
        }

        picked
    }
}

impl SelectionStrategy for RandomStrategy {
    fn select<R: Rng + ?Sized>(
        &self,
        requirements: &[Requirement],
        rng: &mut R,
    ) -> PlannerResult<Plan> {
        validate_requirements(requirements)?;

        let plan = Plan::from_requirements(&self.draw(requirements, rng));
        tracing::info!(
            strategy = self.name(),
            selected = plan.len(),
            cost = plan.total_cost,
            "plan selected"
        );
        Ok(plan)
    }

    fn determinism(&self) -> Determinism {
        Determinism::Stochastic
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
