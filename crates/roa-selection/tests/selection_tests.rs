use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use roa_core::{PlannerConfig, Requirement};
use roa_selection::{select, Algorithm};
use roa_test_utils::{
    assert_distinct_members, assert_never_blocked, assert_within_budget, dependency_chain,
    sample_backlog,
};
use roa_valuation::ValuationModel;

fn valued(len: usize, dependency_percentage: usize, seed: u64) -> Vec<Requirement> {
    ValuationModel::new().calculate_with_expiry(&sample_backlog(len, dependency_percentage, seed), 0)
}

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_plan_within_budget(
        algorithm in algorithm(),
        len in 0..60usize,
        deps in 0..80usize,
        seed in 0..1_000u64,
        budget in 0.0..40.0f64,
    ) {
        let backlog = valued(len, deps, seed);
        let config = PlannerConfig::new().with_budget(budget);
        let plan = select(algorithm, &backlog, &config, &mut StdRng::seed_from_u64(seed)).unwrap();

        assert_within_budget(&plan, &backlog, budget);
        assert_distinct_members(&plan, &backlog);
    }

    #[test]
    fn prop_plan_never_selects_blocked(
        algorithm in algorithm(),
        len in 2..60usize,
        deps in 10..90usize,
        seed in 0..1_000u64,
    ) {
        let backlog = valued(len, deps, seed);
        let plan = select(algorithm, &backlog, &PlannerConfig::new(), &mut StdRng::seed_from_u64(seed)).unwrap();

        assert_never_blocked(&plan, &backlog);
    }

    #[test]
    fn prop_deterministic_strategies_ignore_seed(
        len in 0..40usize,
        seed in 0..1_000u64,
        other in 0..1_000u64,
    ) {
        let backlog = valued(len, 20, seed);
        let config = PlannerConfig::new();
        for algorithm in [Algorithm::Greedy, Algorithm::Knapsack] {
            let a = select(algorithm, &backlog, &config, &mut StdRng::seed_from_u64(seed)).unwrap();
            let b = select(algorithm, &backlog, &config, &mut StdRng::seed_from_u64(other)).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}

#[test]
fn test_dependent_never_precedes_its_dependency() {
    let chain = ValuationModel::new().calculate_with_expiry(&dependency_chain(2), 0);
    let config = PlannerConfig::new();

    for algorithm in Algorithm::ALL {
        for seed in 0..20 {
            let plan = select(algorithm, &chain, &config, &mut StdRng::seed_from_u64(seed)).unwrap();
            if let Some(r1) = plan.codes().iter().position(|c| c == "R1") {
                let r2 = plan.codes().iter().position(|c| c == "R2");
                assert!(matches!(r2, Some(r2) if r2 < r1), "{algorithm}: {:?}", plan.codes());
            }
        }
    }
}

#[test]
fn test_caller_pool_is_untouched() {
    let backlog = valued(30, 20, 4);
    let before = backlog.clone();
    let config = PlannerConfig::new();

    for algorithm in Algorithm::ALL {
        let _ = select(algorithm, &backlog, &config, &mut StdRng::seed_from_u64(1)).unwrap();
    }
    assert_eq!(backlog, before);
}

#[test]
fn test_zero_budget_selects_nothing_costly() {
    let backlog = valued(20, 0, 6);
    let config = PlannerConfig::new().with_budget(0.0);

    for algorithm in Algorithm::ALL {
        let plan = select(algorithm, &backlog, &config, &mut StdRng::seed_from_u64(2)).unwrap();
        assert!(plan.is_empty(), "{algorithm}");
    }
}
