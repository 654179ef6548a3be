//! Shared types for rootlocus design sessions.
//!
//! This crate defines the data structures passed between the design core,
//! the simulator, the scoring client and the command shell:
//! - Plant transfer function and design target
//! - PID gain sets and step references
//! - Simulation traces
//! - Grade records as stored remotely and as exported
//! - Simulation and design settings

mod gains;
mod grade;
mod plant;
mod response;
mod settings;

pub use gains::*;
pub use grade::*;
pub use plant::*;
pub use response::*;
pub use settings::*;
