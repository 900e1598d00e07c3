//! ROA Valuation - real-options valuation of requirements
//!
//! Treats each requirement as a real option:
//! - `equations`: present value, normalization, value-to-cost, volatility, score
//! - `risk`: sampled risk estimate for requirements without one
//! - `model`: the equations bound to a scenario's bounds and precision
//! - `expiry`: schedule position and active-pool filtering
//! - `chart`: options-space coordinates
//!
//! # Example
//!
//! ```rust
//! use roa_core::Requirement;
//! use roa_valuation::{calculate_scores, ValuationModel};
//!
//! let model = ValuationModel::new();
//! let reqs = vec![Requirement::new("R1", 7.0, 4.0).with_risk(3.5).with_time_remaining(4)];
//! let scored = calculate_scores(&model.calculate_with_expiry(&reqs, 0));
//! assert_eq!(scored[0].score, Some(3.0));
//! ```

#![warn(unreachable_pub)]

pub mod chart;
pub mod equations;
pub mod expiry;
pub mod model;
pub mod risk;

pub use chart::{chart_point, chart_points, ChartPoint};
pub use equations::{normalize, present_value_of_x, score, value_to_cost, volatility};
pub use expiry::{completed_codes, elapsed_time, filter_active, prepare_active_pool, ActivePool};
pub use model::{apply_scores, calculate_scores, Valuation, ValuationModel};
pub use risk::generate_risk;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for valuing requirements
    pub use crate::{
        calculate_scores, filter_active, prepare_active_pool, ActivePool, ValuationModel,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
