//! ROA Planner - release planning front end
//!
//! Glues the valuation model and the selection engine to local inputs:
//! - `input`: requirement, sub-plan and configuration files
//! - `pipeline`: records to validated backlog to plan
//! - `simulator`: release-after-release planning over one backlog
//! - `report`: plain-text rendering
//! - `logging`: tracing subscriber for the binary

#![warn(unreachable_pub)]

pub mod input;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod simulator;

pub use input::{load_config, load_records, load_sub_plans, InputError};
pub use pipeline::{PlanOutcome, Planner};
pub use simulator::{Release, ReleaseSimulator, SimulationReport, StopReason};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
