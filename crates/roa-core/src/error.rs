//! Error types for ROA
//!
//! Two failure classes exist:
//! - [`DomainError`]: valuation math is undefined for one requirement.
//!   Non-fatal; the requirement is left unvalued and the run continues.
//! - [`ValidationError`]: a requirement record is malformed. Fatal for the
//!   whole invocation, raised before any selection begins.
//!
//! [`ConfigError`] covers planner configuration problems. All of them roll
//! up into [`PlannerError`].

/// Result alias used throughout the workspace
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Main ROA error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    /// Valuation math undefined for a requirement
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Invalid requirement input
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid planner configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PlannerError {
    /// Check if error aborts the whole invocation
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config(_))
    }

    /// Check if error only concerns a single requirement's valuation
    #[inline]
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Valuation math is undefined for the given inputs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// `1 + returnRate` must be positive to discount over a time horizon
    #[error("discount base 1 + return rate must be positive, got {base}")]
    NonPositiveDiscountBase {
        /// The offending base
        base: f64,
    },

    /// Volatility needs the square root of the remaining time
    #[error("cannot take the square root of negative time {time}")]
    NegativeTime {
        /// Remaining time after elapsed periods
        time: i64,
    },

    /// Value-to-cost divides by the present value of cost
    #[error("present value of cost is zero")]
    ZeroPresentValue,

    /// Risk estimation produced a non-finite deviation
    #[error("risk estimate is not finite for base {base}")]
    NonFiniteRisk {
        /// Base risk magnitude
        base: f64,
    },
}

/// Requirement record rejected at the invocation boundary
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent from the record
    #[error("record {index} is missing required field `{field}`")]
    MissingField {
        /// Position of the record in the input batch
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },

    /// Code is empty or whitespace
    #[error("record {index} has an empty code")]
    EmptyCode {
        /// Position of the record in the input batch
        index: usize,
    },

    /// Two records share a code
    #[error("duplicate requirement code {code}")]
    DuplicateCode {
        /// The repeated code
        code: String,
    },

    /// Cost is negative or not a finite number
    #[error("requirement {code} has invalid cost {cost}")]
    InvalidCost {
        /// Requirement code
        code: String,
        /// Offending cost
        cost: f64,
    },

    /// Value is negative or not a finite number
    #[error("requirement {code} has invalid value {value}")]
    InvalidValue {
        /// Requirement code
        code: String,
        /// Offending value
        value: f64,
    },

    /// Risk is negative or not a finite number
    #[error("requirement {code} has invalid risk {risk}")]
    InvalidRisk {
        /// Requirement code
        code: String,
        /// Offending risk
        risk: f64,
    },

    /// Time remaining must not be negative
    #[error("requirement {code} has negative time remaining {time_remaining}")]
    NegativeTimeRemaining {
        /// Requirement code
        code: String,
        /// Offending time
        time_remaining: i64,
    },

    /// Return rate must be greater than -1
    #[error("requirement {code} has return rate {rate}, must be > -1")]
    InvalidReturnRate {
        /// Requirement code
        code: String,
        /// Offending rate
        rate: f64,
    },
}

/// Planner configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Budget must be finite and non-negative
    #[error("invalid budget {0}")]
    InvalidBudget(f64),

    /// Cost scale must be at least 1
    #[error("cost scale must be at least 1, got {0}")]
    InvalidCostScale(u32),

    /// Budget times cost scale exceeds the knapsack capacity limit
    #[error("knapsack capacity of {units} cost units exceeds the limit of {limit}")]
    CapacityTooLarge {
        /// Scaled capacity requested
        units: f64,
        /// Largest accepted capacity
        limit: f64,
    },

    /// Knapsack table would exceed the cell limit
    #[error("knapsack table of {items} items by {capacity} cost units is too large")]
    TableTooLarge {
        /// Independent requirements in the table
        items: usize,
        /// Capacity in cost units
        capacity: usize,
    },

    /// Best-of-random needs at least one run
    #[error("best-of-random needs at least one run")]
    NoRuns,

    /// Risk estimation needs at least two samples
    #[error("risk estimation needs at least 2 samples, got {0}")]
    TooFewSamples(usize),

    /// Normalization bounds collapse to a point or are inverted
    #[error("degenerate {name} bounds: min {min}, max {max}")]
    DegenerateBounds {
        /// Which metric the bounds belong to
        name: &'static str,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Configuration text could not be parsed
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
