//! Best-of-random selection strategy
//!
//! Draws several random plans and keeps the one with the greatest total
//! value-to-cost. Each run gets its own seed taken from the caller's random
//! source up front, so sequential and parallel execution agree.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use roa_core::config::DEFAULT_BEST_OF_RANDOM_RUNS;
use roa_core::{validate_requirements, Plan, PlannerConfig, PlannerResult, Requirement};

use crate::random::RandomStrategy;
use crate::strategy::{Determinism, SelectionStrategy};

/// Best-of-random strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestRandomStrategy {
    inner: RandomStrategy,
    runs: usize,
    parallel: bool,
}

impl Default for BestRandomStrategy {
    fn default() -> Self {
        Self {
            inner: RandomStrategy::default(),
            runs: DEFAULT_BEST_OF_RANDOM_RUNS,
            parallel: false,
        }
    }
}

impl BestRandomStrategy {
    /// Create strategy drawing `runs` plans of capacity `budget`
    #[inline]
    #[must_use]
    pub fn new(budget: f64, runs: usize) -> Self {
        Self {
            inner: RandomStrategy::new(budget),
            runs,
            parallel: false,
        }
    }

    /// Create strategy from planner configuration
    #[must_use]
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.budget, config.best_of_random_runs)
            .with_parallel(config.parallel_best_of_random)
    }

    /// Run the draws on the rayon pool
    #[inline]
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Draw every candidate plan
    fn draws<R: Rng + ?Sized>(&self, requirements: &[Requirement], rng: &mut R) -> Vec<Vec<Requirement>> {
        let seeds: Vec<u64> = (0..self.runs).map(|_| rng.random()).collect();
        let run = |seed: &u64| self.inner.draw(requirements, &mut StdRng::seed_from_u64(*seed));

        if self.parallel {
            seeds.par_iter().map(run).collect()
        } else {
            seeds.iter().map(run).collect()
        }
    }
}

/// Sum of value-to-cost over a drawn plan; unvalued items count 0
#[must_use]
pub fn total_value_to_cost(drawn: &[Requirement]) -> f64 {
    drawn.iter().map(|r| r.value_to_cost.unwrap_or(0.0)).sum()
}

impl SelectionStrategy for BestRandomStrategy {
    fn select<R: Rng + ?Sized>(
        &self,
        requirements: &[Requirement],
        rng: &mut R,
    ) -> PlannerResult<Plan> {
        validate_requirements(requirements)?;

        let draws = self.draws(requirements, rng);

        // first strictly greater total wins; a plan must beat 0
        let mut best: &[Requirement] = &[];
        let mut best_total = 0.0;
        for (run, drawn) in draws.iter().enumerate() {
            let total = total_value_to_cost(drawn);
            tracing::debug!(run, total, selected = drawn.len(), "random draw");
            if total > best_total {
                best = drawn;
                best_total = total;
            }
        }

        let plan = Plan::from_requirements(best);
        tracing::info!(
            strategy = self.name(),
            runs = self.runs,
            selected = plan.len(),
            cost = plan.total_cost,
            total_value_to_cost = best_total,
            "plan selected"
        );
        Ok(plan)
    }

    fn determinism(&self) -> Determinism {
        Determinism::Stochastic
    }

    fn name(&self) -> &'static str {
        "best-random"
    }
}
