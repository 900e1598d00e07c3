//! End-to-end planning pipeline
//!
//! records -> validation -> active-pool filtering at the schedule
//! position -> valuation -> strategy -> plan

use rand::Rng;
use roa_core::{
    requirements_from_records, Plan, PlannerConfig, PlannerResult, Requirement, RequirementRecord,
    SubPlanRecord,
};
use roa_selection::{select, Algorithm};
use roa_valuation::{calculate_scores, chart_points, prepare_active_pool, ChartPoint, ValuationModel};
use serde::Serialize;

/// Result of planning the next release
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutcome {
    /// Strategy that produced the plan
    pub algorithm: Algorithm,
    /// Releases already delivered
    pub elapsed_time: i64,
    /// The selected release
    pub plan: Plan,
    /// Live requirements the plan was chosen from
    pub active: Vec<Requirement>,
    /// Options-space coordinates of the live requirements
    pub chart: Vec<ChartPoint>,
}

/// Planner bound to one configuration
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    model: ValuationModel,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl Planner {
    /// Create planner from configuration
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        let model = ValuationModel::from_config(&config);
        Self { config, model }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Valuation model in use
    #[inline]
    #[must_use]
    pub fn model(&self) -> &ValuationModel {
        &self.model
    }

    /// Turn raw records into a validated backlog
    ///
    /// Records without a risk get a sampled estimate from their value.
    ///
    /// # Errors
    /// [`roa_core::PlannerError::Validation`] for missing fields or a malformed batch.
    pub fn prepare_backlog<R: Rng + ?Sized>(
        &self,
        mut records: Vec<RequirementRecord>,
        rng: &mut R,
    ) -> PlannerResult<Vec<Requirement>> {
        let estimated = self.model.fill_missing_risk(&mut records, rng);
        if estimated > 0 {
            tracing::info!(estimated, "risk estimated for records without one");
        }
        Ok(requirements_from_records(records)?)
    }

    /// Scored valuation of the whole backlog `elapsed_time` periods in
    #[must_use]
    pub fn evaluate(&self, backlog: &[Requirement], elapsed_time: i64) -> Vec<Requirement> {
        calculate_scores(&self.model.calculate_with_expiry(backlog, elapsed_time))
    }

    /// Plan the next release after the given sub-plans
    ///
    /// # Errors
    /// [`roa_core::PlannerError::Validation`] when the backlog is malformed.
    pub fn plan_next<R: Rng + ?Sized>(
        &self,
        algorithm: Algorithm,
        backlog: &[Requirement],
        sub_plans: &[SubPlanRecord],
        rng: &mut R,
    ) -> PlannerResult<PlanOutcome> {
        let pool = prepare_active_pool(&self.model, backlog, sub_plans);
        let plan = select(algorithm, &pool.requirements, &self.config, rng)?;

        Ok(PlanOutcome {
            algorithm,
            elapsed_time: pool.elapsed_time,
            chart: chart_points(&pool.requirements),
            active: pool.requirements,
            plan,
        })
    }
}
