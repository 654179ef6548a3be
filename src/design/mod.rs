//! Root-locus PID design for seeded second-order plants.
//!
//! A student identifier seeds a plant G(s) = C/((s+D)(s+E)) and a target
//! (overshoot, settling time). The gain solver places the closed-loop
//! dominant pole on that target using the root-locus angle and magnitude
//! conditions.
//!
//! # Examples
//!
//! ```
//! use rootlocus::design::{GainSolver, PlantModel};
//!
//! let model = PlantModel::from_identifier("2206029123").unwrap();
//! assert_eq!(model.target().overshoot_percent, 12.0);
//!
//! let design = GainSolver::default().solve(model.plant(), model.target()).unwrap();
//! assert!(design.gains.is_finite());
//! ```

mod gains;
mod plant;

pub use gains::{GainDesign, GainSolver};
pub use plant::PlantModel;

use thiserror::Error;

/// Errors from plant construction and gain design
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error("identifier must end in {expected} decimal digits, got {identifier:?}")]
    InvalidIdentifier { identifier: String, expected: usize },

    #[error("overshoot must be in (0, 100) percent, got {0}")]
    OvershootOutOfRange(f64),

    #[error("settling time must be positive and finite, got {0}")]
    InvalidSettlingTime(f64),

    #[error("plant must be second order with two real poles")]
    UnsupportedPlant,

    #[error("dominant pole already satisfies the angle criterion (required zero angle {angle_deg} deg), no finite compensator zero exists")]
    DegenerateAngle { angle_deg: f64 },

    #[error("angle criterion places the compensator zero at s = {location}, in the right half-plane")]
    RightHalfPlaneZero { location: f64 },

    #[error("loop gain magnitude is zero while solving for {0}")]
    ZeroMagnitude(&'static str),

    #[error("gain computation produced a non-finite value for {0}")]
    NonFinite(&'static str),
}
