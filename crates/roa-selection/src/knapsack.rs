//! Knapsack selection strategy
//!
//! 1. Score every requirement.
//! 2. Keep the independent set: requirements not blocked by the full pool.
//!    Anything blocked is left out of the release entirely.
//! 3. Force in urgent requirements with enough value-to-cost that fit.
//! 4. Fill the remaining capacity with a 0/1 knapsack on score.
//!
//! Costs are quantized to `ceil(cost * cost_scale)` units and the capacity
//! to `floor(remaining * cost_scale)`, so a chosen set never overshoots.

use rand::Rng;
use roa_core::{
    validate_requirements, ConfigError, Plan, PlannerConfig, PlannerResult, Requirement,
    UrgencyRule, MAX_TABLE_CELLS,
};
use roa_valuation::calculate_scores;

use crate::pool::is_blocked;
use crate::strategy::{Determinism, SelectionStrategy};

/// Dense `rows x cols` grid
#[derive(Debug, Clone)]
struct Table<T> {
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy + Default> Table<T> {
    /// `None` when `rows * cols` overflows or exceeds [`MAX_TABLE_CELLS`]
    fn new(rows: usize, cols: usize) -> Option<Self> {
        let len = rows.checked_mul(cols).filter(|&len| len <= MAX_TABLE_CELLS)?;
        Some(Self {
            cols,
            cells: vec![T::default(); len],
        })
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> T {
        self.cells[row * self.cols + col]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, value: T) {
        self.cells[row * self.cols + col] = value;
    }
}

/// Knapsack strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnapsackStrategy {
    budget: f64,
    cost_scale: u32,
    urgency: UrgencyRule,
}

impl Default for KnapsackStrategy {
    fn default() -> Self {
        Self::new(roa_core::DEFAULT_BUDGET)
    }
}

impl KnapsackStrategy {
    /// Create knapsack strategy with capacity `budget` and whole-unit costs
    #[inline]
    #[must_use]
    pub fn new(budget: f64) -> Self {
        Self {
            budget,
            cost_scale: 1,
            urgency: UrgencyRule::default(),
        }
    }

    /// Create knapsack strategy from planner configuration
    #[inline]
    #[must_use]
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.budget)
            .with_cost_scale(config.cost_scale)
            .with_urgency(config.urgency)
    }

    /// With cost units per budget unit
    #[inline]
    #[must_use]
    pub fn with_cost_scale(mut self, scale: u32) -> Self {
        self.cost_scale = scale.max(1);
        self
    }

    /// With urgent-expiry rule
    #[inline]
    #[must_use]
    pub fn with_urgency(mut self, urgency: UrgencyRule) -> Self {
        self.urgency = urgency;
        self
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn weight(&self, cost: f64) -> usize {
        (cost * f64::from(self.cost_scale)).ceil().max(0.0) as usize
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn capacity(&self, remaining: f64) -> usize {
        (remaining * f64::from(self.cost_scale)).floor().max(0.0) as usize
    }

    fn qualifies_as_urgent(&self, req: &Requirement) -> bool {
        self.urgency.is_urgent(req.time_remaining)
            && req
                .value_to_cost
                .is_some_and(|vtc| vtc >= self.urgency.knapsack_min_value_to_cost)
    }

    /// Optimal subset of `items` within `capacity`, in traceback order
    ///
    /// # Errors
    /// [`ConfigError::TableTooLarge`] when the table would exceed [`MAX_TABLE_CELLS`].
    fn solve<'a>(
        &self,
        items: &[&'a Requirement],
        capacity: usize,
    ) -> PlannerResult<Vec<&'a Requirement>> {
        let n = items.len();
        let weights: Vec<usize> = items.iter().map(|req| self.weight(req.cost)).collect();

        let too_large = || ConfigError::TableTooLarge {
            items: n,
            capacity,
        };
        let cols = capacity.checked_add(1).ok_or_else(too_large)?;
        let mut table: Table<f64> = Table::new(n + 1, cols).ok_or_else(too_large)?;
        let mut keep: Table<bool> = Table::new(n + 1, cols).ok_or_else(too_large)?;

        for i in 1..=n {
            let score = items[i - 1].score.unwrap_or(0.0);
            let weight = weights[i - 1];
            for j in 1..=capacity {
                let without = table.get(i - 1, j);
                if weight <= j {
                    let with = score + table.get(i - 1, j - weight);
                    if with > without {
                        table.set(i, j, with);
                        keep.set(i, j, true);
                        continue;
                    }
                }
                table.set(i, j, without);
            }
        }

        tracing::debug!(
            items = n,
            capacity,
            best = table.get(n, capacity),
            "knapsack table filled"
        );

        let mut chosen = Vec::new();
        let mut remaining = capacity;
        for i in (1..=n).rev() {
            if keep.get(i, remaining) {
                chosen.push(items[i - 1]);
                remaining -= weights[i - 1];
            }
        }
        Ok(chosen)
    }
}

impl SelectionStrategy for KnapsackStrategy {
    fn select<R: Rng + ?Sized>(
        &self,
        requirements: &[Requirement],
        _rng: &mut R,
    ) -> PlannerResult<Plan> {
        validate_requirements(requirements)?;

        let scored = calculate_scores(requirements);
        let mut independent: Vec<&Requirement> = scored
            .iter()
            .filter(|req| req.score.is_some() && !is_blocked(req, &scored))
            .collect();
        tracing::debug!(
            pool = scored.len(),
            independent = independent.len(),
            "independent set built"
        );

        let mut plan = Plan::new();
        let mut remaining = self.budget;
        independent.retain(|req| {
            if self.qualifies_as_urgent(req) && req.cost <= remaining {
                tracing::debug!(code = %req.code, "urgent requirement forced in");
                remaining -= req.cost;
                plan.push(&req.code, req.cost);
                false
            } else {
                true
            }
        });
        let urgent = plan.len();

        if remaining > 0.0 {
            for req in self.solve(&independent, self.capacity(remaining))? {
                plan.push(&req.code, req.cost);
            }
        }

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
        "knapsack"
    }
}
