//! Testing utilities for ROA workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roa_core::{Plan, Requirement};
use std::collections::HashSet;

/// Requirement that will not trip an urgent pre-pass
pub fn requirement(code: &str, value: f64, cost: f64) -> Requirement {
    Requirement::new(code, value, cost).with_time_remaining(3)
}

/// Requirement whose score equals `score` once scored (volatility 0)
pub fn scored(code: &str, cost: f64, score: f64) -> Requirement {
    requirement(code, score, cost).with_valuation(score, 0.0)
}

/// Knapsack instance with a known optimum of {A, B}, score 25, at budget 15
pub fn knapsack_fixture() -> Vec<Requirement> {
    vec![
        scored("A", 5.0, 10.0),
        scored("B", 10.0, 15.0),
        scored("C", 8.0, 12.0),
    ]
}

/// `R1 <- R2 <- ... <- Rn`: every requirement depends on its successor
pub fn dependency_chain(len: usize) -> Vec<Requirement> {
    (1..=len)
        .map(|i| {
            let req = scored(&format!("R{i}"), 1.0, 1.0);
            if i < len {
                req.with_dependencies([format!("R{}", i + 1)])
            } else {
                req
            }
        })
        .collect()
}

/// Seeded synthetic backlog of `len` requirements coded `R0..`
///
/// `dependency_percentage` of them get one dependency on another random
/// requirement of the backlog.
pub fn sample_backlog(len: usize, dependency_percentage: usize, seed: u64) -> Vec<Requirement> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut backlog: Vec<Requirement> = (0..len)
        .map(|i| {
            Requirement::new(
                format!("R{i}"),
                f64::from(rng.random_range(1..=20u32)),
                f64::from(rng.random_range(1..=10u32)),
            )
            .with_return_rate(rng.random_range(0.0..0.1))
            .with_risk(rng.random_range(0.5..3.5))
            .with_time_remaining(rng.random_range(0..=5))
        })
        .collect();

    if len < 2 {
        return backlog;
    }

    let dependents = len * dependency_percentage / 100;
    let mut chosen = HashSet::new();
    while chosen.len() < dependents.min(len) {
        let index = rng.random_range(0..len);
        if !chosen.insert(index) {
            continue;
        }
        let mut dep = rng.random_range(0..len);
        if dep == index {
            dep = (dep + 1) % len;
        }
        backlog[index].dependencies.push(format!("R{dep}"));
    }

    backlog
}

/// Assert total cost is within `budget` and matches the selected items
pub fn assert_within_budget(plan: &Plan, pool: &[Requirement], budget: f64) {
    let total: f64 = plan
        .codes()
        .iter()
        .map(|code| find(pool, code).cost)
        .sum();
    assert!(total <= budget + 1e-9, "plan cost {total} exceeds budget {budget}");
    assert!(
        (total - plan.total_cost).abs() < 1e-9,
        "plan reports cost {} but items sum to {total}",
        plan.total_cost
    );
}

/// Replay `plan` against `pool` and assert no item was selected while one
/// of its dependencies was still in the pool
pub fn assert_never_blocked(plan: &Plan, pool: &[Requirement]) {
    let mut remaining: HashSet<&str> = pool.iter().map(|r| r.code.as_str()).collect();
    for code in plan.codes() {
        let req = find(pool, code);
        for dep in &req.dependencies {
            assert!(
                !remaining.contains(dep.as_str()),
                "{code} selected while dependency {dep} still in pool"
            );
        }
        remaining.remove(code.as_str());
    }
}

/// Assert every code appears once and comes from the pool
pub fn assert_distinct_members(plan: &Plan, pool: &[Requirement]) {
    let mut seen = HashSet::new();
    for code in plan.codes() {
        let _ = find(pool, code);
        assert!(seen.insert(code.as_str()), "{code} selected twice");
    }
}

fn find<'a>(pool: &'a [Requirement], code: &str) -> &'a Requirement {
    pool.iter()
        .find(|r| r.code == code)
        .unwrap_or_else(|| panic!("{code} is not in the pool"))
}
