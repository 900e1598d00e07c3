use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use roa_core::{Requirement, SubPlanRecord};
use roa_test_utils::sample_backlog;
use roa_valuation::{
    calculate_scores, chart_points, prepare_active_pool, ValuationModel,
};

proptest! {
    #[test]
    fn prop_valuation_repeatable(seed in 0..500u64, elapsed in 0..4i64) {
        let backlog = sample_backlog(40, 20, seed);
        let model = ValuationModel::new();
        let first = model.calculate_with_expiry(&backlog, elapsed);
        let second = model.calculate_with_expiry(&backlog, elapsed);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_scores_need_both_metrics(seed in 0..500u64, elapsed in 0..6i64) {
        let backlog = sample_backlog(30, 0, seed);
        let scored = calculate_scores(&ValuationModel::new().calculate_with_expiry(&backlog, elapsed));
        for req in &scored {
            prop_assert_eq!(req.score.is_some(), req.is_valued());
            if req.time_remaining < elapsed {
                prop_assert!(req.score.is_none());
            }
        }
    }
}

#[test]
fn test_pipeline_keeps_only_live_items() {
    let backlog = sample_backlog(50, 10, 17);
    let subs = vec![
        SubPlanRecord::new("knapsack1", vec!["R0".into(), "R1".into()]).completed(),
        SubPlanRecord::new("knapsack2", vec!["R2".into()]),
    ];

    let pool = prepare_active_pool(&ValuationModel::new(), &backlog, &subs);

    assert_eq!(pool.elapsed_time, 1);
    for req in &pool.requirements {
        assert!(req.code != "R0" && req.code != "R1");
        assert!(req.time_remaining >= 0);
    }
    // open plans do not remove their items
    let r2 = backlog.iter().find(|r| r.code == "R2").unwrap();
    if r2.time_remaining >= 1 {
        assert!(pool.requirements.iter().any(|r| r.code == "R2"));
    }
}

#[test]
fn test_live_items_chart_on_the_options_space() {
    let backlog = sample_backlog(25, 0, 5);
    let pool = prepare_active_pool(&ValuationModel::new(), &backlog, &[]);
    let points = chart_points(&pool.requirements);

    assert_eq!(points.len(), pool.requirements.iter().filter(|r| r.is_valued()).count());
    for point in points {
        assert!(point.x > 0.0);
        assert!(point.y > 0.0);
    }
}

#[test]
fn test_risk_estimate_feeds_volatility() {
    let model = ValuationModel::new();
    let mut rng = StdRng::seed_from_u64(2024);
    let risk = model.generate_risk(30.0, &mut rng).unwrap();

    let req = Requirement::new("R1", 9.0, 3.0)
        .with_risk(risk)
        .with_time_remaining(4);
    let valuation = model.evaluate(&req, 0).unwrap();

    assert!(valuation.volatility >= 0.0);
    assert!(valuation.score() >= valuation.value_to_cost);
}
