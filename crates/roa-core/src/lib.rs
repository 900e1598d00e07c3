//! ROA Core - shared foundation of the release planner
//!
//! Everything the valuation model and the selection engine agree on:
//! - Requirement records, plans and sub-plan records
//! - Planner configuration (budget, urgency thresholds, bounds)
//! - Boundary validation of requirement batches
//! - The error taxonomy (`DomainError`, `ValidationError`, `ConfigError`)
//!
//! # Example
//!
//! ```rust
//! use roa_core::{validate_requirements, PlannerConfig, Requirement};
//!
//! let config = PlannerConfig::new().with_budget(20.0);
//! let reqs = vec![Requirement::new("R1", 5.0, 3.0)];
//! assert!(validate_requirements(&reqs).is_ok());
//! assert_eq!(config.budget, 20.0);
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod error;
pub mod types;
pub mod validation;

// Re-exports for convenience
pub use config::{
    Bounds, PlannerConfig, UrgencyRule, ValuationBounds, DEFAULT_BUDGET, MAX_TABLE_CELLS,
};
pub use error::{ConfigError, DomainError, PlannerError, PlannerResult, ValidationError};
pub use types::{Plan, Requirement, RequirementRecord, SubPlanRecord, TestSet};
pub use validation::{requirements_from_records, validate_requirements};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with ROA Core
    pub use crate::{
        Plan, PlannerConfig, PlannerError, PlannerResult, Requirement, SubPlanRecord,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
