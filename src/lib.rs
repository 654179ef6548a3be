//! rootlocus - root-locus PID design, closed-loop simulation and grading
//!
//! A student identifier seeds a second-order plant and a performance target.
//! The crate derives the "true" PID gains analytically, simulates the loop
//! for any student gains, and scores submissions against a remote store.
//!
//! # Architecture
//!
//! - [`design`]: plant model and root-locus gain solver
//! - [`simulation`]: continuous and sampled step responses built from
//!   [`blocks`] wired by hand
//! - [`scoring`]: error submission, cohort grading and CSV export
//! - [`session`] and [`config`]: validated user inputs and runtime settings
//!
//! # Example
//!
//! ```rust
//! use rootlocus::prelude::*;
//!
//! let mut session = Session::new(
//!     "2206029123",
//!     GainSolver::default(),
//!     SimulationSettings::default(),
//! )
//! .unwrap();
//!
//! let truth = session.true_design().unwrap().gains;
//! session.set_gains("31.75", "15.44", "1.74").unwrap();
//!
//! let result = session.simulate().unwrap();
//! let metrics = ResponseMetrics::from_trace(
//!     &result.time_continuous,
//!     &result.setpoint_continuous,
//!     &result.output_continuous,
//! )
//! .unwrap();
//!
//! assert!((truth.kp - 31.748).abs() < 1e-3);
//! assert!((metrics.final_value - 1.0).abs() < 0.01);
//! ```

pub mod block;
pub mod blocks;
pub mod config;
pub mod design;
pub mod error;
pub mod scoring;
pub mod session;
pub mod simulation;
pub mod utils;

pub use block::{Block, BlockError, DynamicBlock};
pub use error::{Error, Result};
pub use rootlocus_types as types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::block::{Block, DynamicBlock};
    pub use crate::config::AppConfig;
    pub use crate::design::{GainDesign, GainSolver, PlantModel};
    pub use crate::scoring::{HttpStore, MemoryStore, RecordStore, ScoringClient};
    pub use crate::session::{login, LoginOutcome, Session};
    pub use crate::simulation::{ResponseMetrics, ResponseSimulator, TraceExport};
    pub use crate::{Error, Result};
    pub use rootlocus_types::*;
}
