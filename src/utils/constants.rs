//! Design, simulation and grading constants

/// Number of trailing identifier digits that seed a plant
pub const SEED_DIGITS: usize = 5;

/// Minimum length of a student identifier
pub const MIN_IDENTIFIER_LEN: usize = 10;

/// Added to the first seed digit to obtain the percent overshoot target
pub const OVERSHOOT_OFFSET: f64 = 10.0;

/// Scales the seed digit sum into a settling time in seconds
pub const SETTLING_TIME_SCALE: f64 = 0.1;

/// Numerator of the 2% settling-time approximation Ts = 4 / (ζ ωn)
pub const SETTLING_FACTOR: f64 = 4.0;

/// Band used when measuring settling time on a simulated response
pub const SETTLING_BAND: f64 = 0.02;

/// Location of the integrator zero folded into the PI part of the design
pub const INTEGRATOR_ZERO: f64 = 0.5;

/// Below this |tan| the required zero angle is treated as degenerate
pub const DEGENERATE_TAN_TOLERANCE: f64 = 1e-9;

/// Lowest grade on the curve
pub const GRADE_FLOOR: f64 = 60.0;

/// Distance between the lowest and highest grade
pub const GRADE_SPAN: f64 = 40.0;

/// Exponential decay rate of the grade curve
pub const GRADE_DECAY: f64 = 2.0;

/// Grade given to every student when the cohort's errors are identical
pub const GRADE_MAX: f64 = 100.0;

/// Default timeout for remote store requests, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
