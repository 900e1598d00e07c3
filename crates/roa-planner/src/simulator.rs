//! Release sequence simulator
//!
//! Plans release after release against one backlog, marking each release
//! delivered before planning the next. Release `k` is planned `k` periods
//! into the schedule.

use rand::Rng;
use roa_core::{PlannerResult, Requirement, SubPlanRecord};
use roa_selection::Algorithm;
use serde::Serialize;

use crate::pipeline::Planner;

/// Why a simulation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    /// Configured number of releases reached
    Horizon,
    /// Nothing left to plan
    PoolExhausted,
    /// Strategy selected nothing
    EmptyPlan,
    /// Every requirement left out of the last release expires with it
    AllExpiring,
}

/// One simulated release
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Delivered sub-plan record
    pub record: SubPlanRecord,
    /// Cost of the release
    pub total_cost: f64,
    /// Requirements that were eligible
    pub active: usize,
}

/// Outcome of a simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    /// Strategy simulated
    pub algorithm: Algorithm,
    /// Releases in delivery order
    pub releases: Vec<Release>,
    /// Why the simulation ended
    pub stop_reason: StopReason,
}

impl SimulationReport {
    /// Delivered sub-plan records
    #[must_use]
    pub fn sub_plans(&self) -> Vec<SubPlanRecord> {
        self.releases.iter().map(|r| r.record.clone()).collect()
    }

    /// Number of requirements delivered over all releases
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.releases.iter().map(|r| r.record.requirements.len()).sum()
    }

    /// Generate human-readable report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut out = format!("Simulation: {}\n", self.algorithm);
        for release in &self.releases {
            out.push_str(&format!(
                "  {:<16} cost {:>7.2}  of {:>4} active  [{}]\n",
                release.record.plan_index,
                release.total_cost,
                release.active,
                release.record.requirements.join(", ")
            ));
        }
        out.push_str(&format!(
            "Releases: {}  Delivered: {}  Stopped: {:?}\n",
            self.releases.len(),
            self.delivered(),
            self.stop_reason
        ));
        out
    }
}

/// Release sequence simulator
#[derive(Debug, Clone)]
pub struct ReleaseSimulator {
    planner: Planner,
    algorithm: Algorithm,
    horizon: usize,
}

impl ReleaseSimulator {
    /// Create simulator; the horizon comes from the planner configuration
    #[must_use]
    pub fn new(planner: Planner, algorithm: Algorithm) -> Self {
        let horizon = planner.config().release_horizon;
        Self {
            planner,
            algorithm,
            horizon,
        }
    }

    /// With number of releases to simulate at most
    #[inline]
    #[must_use]
    pub fn with_horizon(mut self, releases: usize) -> Self {
        self.horizon = releases;
        self
    }

    /// Run the simulation over `backlog`
    ///
    /// # Errors
    /// [`roa_core::PlannerError::Validation`] when the backlog is malformed.
    pub fn run<R: Rng + ?Sized>(
        &self,
        backlog: &[Requirement],
        rng: &mut R,
    ) -> PlannerResult<SimulationReport> {
        let mut delivered: Vec<SubPlanRecord> = Vec::new();
        let mut releases = Vec::new();

        let stop_reason = loop {
            if releases.len() >= self.horizon {
                break StopReason::Horizon;
            }

            let outcome = self.planner.plan_next(self.algorithm, backlog, &delivered, rng)?;
            if outcome.active.is_empty() {
                break StopReason::PoolExhausted;
            }
            if outcome.plan.is_empty() {
                break StopReason::EmptyPlan;
            }

            let leftovers: Vec<&Requirement> = outcome
                .active
                .iter()
                .filter(|r| !outcome.plan.contains(&r.code))
                .collect();
            let all_expiring = !leftovers.is_empty() && leftovers.iter().all(|r| r.time_remaining == 0);

            let record = SubPlanRecord::new(
                format!("{}{}", self.algorithm, releases.len() + 1),
                outcome.plan.requirements.clone(),
            )
            .completed();
            tracing::info!(
                release = %record.plan_index,
                selected = record.requirements.len(),
                cost = outcome.plan.total_cost,
                "release delivered"
            );

            delivered.push(record.clone());
            releases.push(Release {
                record,
                total_cost: outcome.plan.total_cost,
                active: outcome.active.len(),
            });

            if all_expiring {
                break StopReason::AllExpiring;
            }
        };

        tracing::info!(
            algorithm = %self.algorithm,
            releases = releases.len(),
            reason = ?stop_reason,
            "simulation finished"
        );

        Ok(SimulationReport {
            algorithm: self.algorithm,
            releases,
            stop_reason,
        })
    }
}
