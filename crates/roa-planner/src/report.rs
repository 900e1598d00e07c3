//! Plain-text rendering of plans and valuations

use roa_core::Requirement;

use crate::pipeline::PlanOutcome;

fn metric(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

/// Valuation table: code, value-to-cost, volatility, score
#[must_use]
pub fn render_valuations(requirements: &[Requirement]) -> String {
    let mut out = format!(
        "{:<12} {:>8} {:>8} {:>8} {:>6}\n",
        "code", "vtc", "vol", "score", "time"
    );
    for req in requirements {
        out.push_str(&format!(
            "{:<12} {:>8} {:>8} {:>8} {:>6}\n",
            req.code,
            metric(req.value_to_cost),
            metric(req.volatility),
            metric(req.score),
            req.time_remaining
        ));
    }
    out
}

/// Plan summary
#[must_use]
pub fn render_plan(outcome: &PlanOutcome) -> String {
    let mut out = format!(
        "Release plan ({}, elapsed time {})\n",
        outcome.algorithm, outcome.elapsed_time
    );
    out.push_str(&format!(
        "  Active requirements: {}\n  Selected: {}\n  Total cost: {:.2}\n",
        outcome.active.len(),
        outcome.plan.len(),
        outcome.plan.total_cost
    ));
    for (position, code) in outcome.plan.codes().iter().enumerate() {
        out.push_str(&format!("  {:>3}. {code}\n", position + 1));
    }
    out
}
