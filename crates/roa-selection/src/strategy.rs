//! Selection strategy trait and dispatch
//!
//! Provides the [`SelectionStrategy`] trait every release planning strategy
//! implements, and the closed [`Algorithm`] set the planner dispatches on.

use rand::Rng;
use roa_core::{Plan, PlannerConfig, PlannerResult, Requirement};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::best_random::BestRandomStrategy;
use crate::greedy::GreedyStrategy;
use crate::knapsack::KnapsackStrategy;
use crate::random::RandomStrategy;

/// Release plan selection strategy
///
/// # Contract
/// - The caller's slice is never mutated; strategies work on a private pool.
/// - The plan's total cost never exceeds the budget.
/// - No requirement is selected while one of its dependencies is still in
///   the pool.
/// - An empty input yields an empty plan.
pub trait SelectionStrategy: Send + Sync + fmt::Debug {
    /// Select a release plan from `requirements`
    ///
    /// Deterministic strategies never touch `rng`.
    ///
    /// # Errors
    /// [`roa_core::PlannerError::Validation`] when the batch is malformed;
    /// [`roa_core::PlannerError::Config`] when the knapsack table would be
    /// too large for the budget.
    fn select<R: Rng + ?Sized>(
        &self,
        requirements: &[Requirement],
        rng: &mut R,
    ) -> PlannerResult<Plan>;

    /// Whether the result depends on the random source
    fn determinism(&self) -> Determinism;

    /// Strategy name (for logs and plan indices)
    fn name(&self) -> &'static str;
}

/// Dependence of a strategy on its random source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Determinism {
    /// Same input, same plan
    Deterministic,

    /// Plan depends on the random source
    Stochastic,
}

impl Determinism {
    /// Check if the strategy ignores its random source
    #[inline]
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Self::Deterministic)
    }
}

/// The four built-in strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Uniform random draws until the first unblocked item that does not fit
    Random,

    /// Best of several random plans by total value-to-cost
    BestRandom,

    /// Descending score with an urgent-expiry pre-pass
    Greedy,

    /// 0/1 knapsack on score with an urgent-expiry pre-pass
    Knapsack,
}

impl Algorithm {
    /// Every built-in algorithm
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Random,
        Algorithm::BestRandom,
        Algorithm::Greedy,
        Algorithm::Knapsack,
    ];

    /// Canonical name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::BestRandom => "best-random",
            Self::Greedy => "greedy",
            Self::Knapsack => "knapsack",
        }
    }

    /// Check if the algorithm ignores its random source
    #[inline]
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Self::Greedy | Self::Knapsack)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name that matches no built-in algorithm
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "best-random" | "best random" | "best_random" | "bestrandom" => Ok(Self::BestRandom),
            "greedy" => Ok(Self::Greedy),
            "knapsack" => Ok(Self::Knapsack),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Run `algorithm` over `requirements` with the budget and thresholds in `config`
///
/// # Errors
/// See [`SelectionStrategy::select`].
pub fn select<R: Rng + ?Sized>(
    algorithm: Algorithm,
    requirements: &[Requirement],
    config: &PlannerConfig,
    rng: &mut R,
) -> PlannerResult<Plan> {
    match algorithm {
        Algorithm::Random => RandomStrategy::from_config(config).select(requirements, rng),
        Algorithm::BestRandom => BestRandomStrategy::from_config(config).select(requirements, rng),
        Algorithm::Greedy => GreedyStrategy::from_config(config).select(requirements, rng),
        Algorithm::Knapsack => KnapsackStrategy::from_config(config).select(requirements, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use roa_core::PlannerError;
    use roa_test_utils::knapsack_fixture;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("random".parse::<Algorithm>(), Ok(Algorithm::Random));
        assert_eq!("best random".parse::<Algorithm>(), Ok(Algorithm::BestRandom));
        assert_eq!("Best-Random".parse::<Algorithm>(), Ok(Algorithm::BestRandom));
        assert_eq!(" knapsack ".parse::<Algorithm>(), Ok(Algorithm::Knapsack));
        assert!("annealing".parse::<Algorithm>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn determinism_matches_algorithm() {
        assert!(Algorithm::Greedy.is_deterministic());
        assert!(!Algorithm::BestRandom.is_deterministic());
        assert!(Determinism::Deterministic.is_deterministic());
    }

    #[test]
    fn dispatch_validates_before_selecting() {
        let mut reqs = knapsack_fixture();
        reqs.push(reqs[0].clone());
        let mut rng = StdRng::seed_from_u64(1);

        for algorithm in Algorithm::ALL {
            let err = select(algorithm, &reqs, &PlannerConfig::new(), &mut rng).unwrap_err();
            assert!(matches!(err, PlannerError::Validation(_)), "{algorithm}: {err}");
        }
    }

    #[test]
    fn empty_pool_gives_empty_plan() {
        let mut rng = StdRng::seed_from_u64(1);
        for algorithm in Algorithm::ALL {
            let plan = select(algorithm, &[], &PlannerConfig::new(), &mut rng).unwrap();
            assert!(plan.is_empty(), "{algorithm}");
        }
    }
}
