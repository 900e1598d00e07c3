//! Schedule position and active-pool filtering
//!
//! The store only knows which sub-plans exist and which were delivered.
//! From that we derive how many periods have elapsed and which
//! requirements are already done, then keep only what is still live.

use roa_core::{Requirement, SubPlanRecord};
use std::collections::HashSet;

use crate::model::ValuationModel;

/// Periods elapsed: index of the first incomplete sub-plan, or all of them
#[must_use]
pub fn elapsed_time(sub_plans: &[SubPlanRecord]) -> i64 {
    let position = sub_plans
        .iter()
        .position(|plan| !plan.completed)
        .unwrap_or(sub_plans.len());
    i64::try_from(position).unwrap_or(i64::MAX)
}

/// Codes delivered by completed sub-plans
#[must_use]
pub fn completed_codes(sub_plans: &[SubPlanRecord]) -> HashSet<String> {
    sub_plans
        .iter()
        .filter(|plan| plan.completed)
        .flat_map(|plan| plan.requirements.iter().cloned())
        .collect()
}

/// Requirements still live at `elapsed_time`
///
/// Drops completed requirements and those already expired. Survivors have
/// `time_remaining` rebased to the current period.
#[must_use]
pub fn filter_active(
    requirements: &[Requirement],
    completed: &HashSet<String>,
    elapsed_time: i64,
) -> Vec<Requirement> {
    requirements
        .iter()
        .filter(|req| !completed.contains(&req.code))
        .filter_map(|req| {
            let remaining = req.time_remaining - elapsed_time;
            if remaining < 0 {
                tracing::debug!(code = %req.code, remaining, "requirement expired");
                return None;
            }
            let mut active = req.clone();
            active.time_remaining = remaining;
            Some(active)
        })
        .collect()
}

/// Valued, live candidate pool for the next release
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePool {
    /// Periods elapsed so far
    pub elapsed_time: i64,
    /// Requirements eligible for the next release
    pub requirements: Vec<Requirement>,
}

/// Keep what is live at the current schedule position and value it
///
/// Completed and expired requirements are dropped before valuation.
#[must_use]
pub fn prepare_active_pool(
    model: &ValuationModel,
    backlog: &[Requirement],
    sub_plans: &[SubPlanRecord],
) -> ActivePool {
    let elapsed = elapsed_time(sub_plans);
    // survivors are already rebased, so they are valued at period zero
    let active = filter_active(backlog, &completed_codes(sub_plans), elapsed);
    let requirements = model.calculate_with_expiry(&active, 0);

    tracing::debug!(
        elapsed,
        backlog = backlog.len(),
        active = requirements.len(),
        "prepared active pool"
    );

    ActivePool {
        elapsed_time: elapsed,
        requirements,
    }
}
