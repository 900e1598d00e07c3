//! ROA Selection System
//!
//! Budget-constrained release planning over a pool of requirements.
//!
//! # Core Concepts
//!
//! - [`SelectionStrategy`]: Core trait every planning strategy implements
//! - [`RandomStrategy`]: Uniform draws (baseline)
//! - [`BestRandomStrategy`]: Best of several random plans
//! - [`GreedyStrategy`]: Descending score with urgent-expiry pre-pass
//! - [`KnapsackStrategy`]: 0/1 knapsack on score with urgent-expiry pre-pass
//! - [`Algorithm`]: Closed set of strategies; names and aliases parse via `FromStr`
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use roa_core::{PlannerConfig, Requirement};
//! use roa_selection::{select, Algorithm};
//!
//! let reqs = vec![
//!     Requirement::new("A", 10.0, 5.0).with_valuation(10.0, 0.0).with_time_remaining(2),
//!     Requirement::new("B", 15.0, 10.0).with_valuation(15.0, 0.0).with_time_remaining(2),
//!     Requirement::new("C", 12.0, 8.0).with_valuation(12.0, 0.0).with_time_remaining(2),
//! ];
//! let mut rng = StdRng::seed_from_u64(7);
//! let plan = select(Algorithm::Knapsack, &reqs, &PlannerConfig::new(), &mut rng).unwrap();
//! assert_eq!(plan.codes(), &["B", "A"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Strategy implementations
mod best_random;
mod budget;
mod greedy;
mod knapsack;
mod pool;
mod random;
mod strategy;

// Re-exports
pub use best_random::{total_value_to_cost, BestRandomStrategy};
pub use budget::Budget;
pub use greedy::GreedyStrategy;
pub use knapsack::KnapsackStrategy;
pub use pool::{is_blocked, CandidatePool};
pub use random::RandomStrategy;
pub use strategy::{select, Algorithm, Determinism, SelectionStrategy, UnknownAlgorithm};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for selecting release plans
    pub use crate::{select, Algorithm, SelectionStrategy};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use roa_core::PlannerConfig;
    use roa_test_utils::{knapsack_fixture, sample_backlog};
    use roa_valuation::ValuationModel;

    #[test]
    fn parsed_names_dispatch() {
        let config = PlannerConfig::new();
        let reqs = knapsack_fixture();

        for name in ["random", "best-random", "Best Random", "best_random", "greedy", "knapsack"] {
            let algorithm: Algorithm = name.parse().unwrap();
            let plan = select(algorithm, &reqs, &config, &mut StdRng::seed_from_u64(3)).unwrap();
            assert!(plan.total_cost <= config.budget, "{name}");
        }
    }

    #[test]
    fn knapsack_never_scores_below_greedy() {
        let config = PlannerConfig::new();
        // no urgent items, so knapsack is a pure optimum
        let backlog: Vec<_> = ValuationModel::new()
            .calculate_with_expiry(&sample_backlog(40, 0, 12), 0)
            .into_iter()
            .map(|r| r.with_time_remaining(2))
            .collect();
        let scored = roa_valuation::calculate_scores(&backlog);
        let score_of = |plan: &roa_core::Plan| -> f64 {
            scored
                .iter()
                .filter(|r| plan.contains(&r.code))
                .filter_map(|r| r.score)
                .sum()
        };

        let mut rng = StdRng::seed_from_u64(0);
        let greedy = select(Algorithm::Greedy, &backlog, &config, &mut rng).unwrap();
        let knapsack = select(Algorithm::Knapsack, &backlog, &config, &mut rng).unwrap();

        assert!(score_of(&knapsack) + 1e-9 >= score_of(&greedy));
    }
}
