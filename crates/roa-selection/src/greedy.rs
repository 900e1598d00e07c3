//! Greedy selection strategy
//!
//! 1. Score every requirement.
//! 2. Force in urgent requirements that score well enough and fit.
//! 3. Scan the rest by descending score, restarting from the top after each
//!    selection. The first unblocked requirement that does not fit ends the
//!    scan, as does a full cycle without a selectable requirement.

use rand::Rng;
use roa_core::{
    validate_requirements, Plan, PlannerConfig, PlannerResult, Requirement, UrgencyRule,
};
use roa_valuation::calculate_scores;

use crate::budget::Budget;
use crate::pool::CandidatePool;
use crate::strategy::{Determinism, SelectionStrategy};

/// Greedy strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedyStrategy {
    budget: f64,
    urgency: UrgencyRule,
}

impl Default for GreedyStrategy {
    fn default() -> Self {
        Self::new(roa_core::DEFAULT_BUDGET)
    }
}

impl GreedyStrategy {
    /// Create greedy strategy with capacity `budget`
    #[inline]
    #[must_use]
    pub fn new(budget: f64) -> Self {
        Self {
            budget,
            urgency: UrgencyRule::default(),
        }
    }

    /// Create greedy strategy from planner configuration
    #[inline]
    #[must_use]
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.budget).with_urgency(config.urgency)
    }

    /// With urgent-expiry rule
    #[inline]
    #[must_use]
    pub fn with_urgency(mut self, urgency: UrgencyRule) -> Self {
        self.urgency = urgency;
        self
    }

    fn qualifies_as_urgent(&self, req: &Requirement) -> bool {
        self.urgency.is_urgent(req.time_remaining)
            && req
                .score
                .is_some_and(|score| score >= self.urgency.greedy_min_score)
    }

    /// Urgent pre-pass in pool order
    fn take_urgent(&self, pool: &mut CandidatePool, budget: &mut Budget, plan: &mut Plan) {
        let mut index = 0;
        while index < pool.len() {
            let req = pool.get(index);
            if self.qualifies_as_urgent(req) && !pool.is_blocked_at(index) && budget.fits(req.cost) {
                let req = pool.remove(index);
                tracing::debug!(code = %req.code, "urgent requirement forced in");
                budget.spend(req.cost);
                plan.push(req.code, req.cost);
            } else {
                index += 1;
            }
        }
    }

    /// Cyclic scan over the score-sorted pool
    fn scan(pool: &mut CandidatePool, budget: &mut Budget, plan: &mut Plan) {
        let mut index = 0;
        let mut misses = 0;

        while !pool.is_empty() {
            if misses >= pool.len() {
                tracing::debug!(left = pool.len(), "no selectable requirement left");
                break;
            }

            let req = pool.get(index);
            if req.score.is_some() && !pool.is_blocked_at(index) {
                if !budget.fits(req.cost) {
                    tracing::debug!(code = %req.code, cost = req.cost, spent = budget.spent(), "does not fit, stopping");
                    break;
                }
                let req = pool.remove(index);
                budget.spend(req.cost);
                plan.push(req.code, req.cost);
                index = 0;
                misses = 0;
                continue;
            }

            misses += 1;
            index = (index + 1) % pool.len();
        }
    }
}

impl SelectionStrategy for GreedyStrategy {
    fn select<R: Rng + ?Sized>(
        &self,
        requirements: &[Requirement],
        _rng: &mut R,
    ) -> PlannerResult<Plan> {
        validate_requirements(requirements)?;

        let mut pool = CandidatePool::from_vec(calculate_scores(requirements));
        let mut budget = Budget::new(self.budget);
        let mut plan = Plan::new();

        self.take_urgent(&mut pool, &mut budget, &mut plan);
        let urgent = plan.len();

        pool.sort_by_score_desc();
        Self::scan(&mut pool, &mut budget, &mut plan);

        tracing::info!(
            strategy = self.name(),
            urgent,
            selected = plan.len(),
            cost = plan.total_cost,
            "plan selected"
        );
        Ok(plan)
    }

    fn determinism(&self) -> Determinism {
        Determinism::Deterministic
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}
