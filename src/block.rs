//! Core Block trait
//!
//! Blocks expose their I/O as slices and are driven by an explicit
//! update/step loop owned by the caller.

use thiserror::Error;

/// Errors raised while constructing a block
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("Denominator cannot be empty")]
    EmptyDenominator,

    #[error("Leading coefficient of denominator cannot be zero")]
    ZeroLeadingCoefficient,

    #[error("Improper transfer function: numerator has {num} coefficients, denominator {den}")]
    Improper { num: usize, den: usize },

    #[error("Sampling period must be positive and finite, got {0}")]
    InvalidPeriod(f64),
}

/// Simulation block
///
/// # Design
///
/// - `update` evaluates outputs from the current inputs and state
/// - `step` advances internal state by `dt` (dynamic blocks only)
/// - the caller propagates outputs to inputs between the two
///
/// # Example
///
/// ```ignore
/// source.update(t);
/// plant.set_input(0, source.get_output(0));
/// plant.update(t);
/// let y = plant.get_output(0);
/// plant.step(t, dt);
/// ```
pub trait Block {
    /// Access inputs as slice
    fn inputs(&self) -> &[f64];

    /// Mutable access to inputs
    fn inputs_mut(&mut self) -> &mut [f64];

    /// Access outputs as slice
    fn outputs(&self) -> &[f64];

    /// Evaluate outputs = f(state, inputs, t)
    fn update(&mut self, t: f64);

    /// Advance dynamic state by dt
    ///
    /// Default implementation does nothing.
    fn step(&mut self, _t: f64, _dt: f64) {}

    /// Reset to initial conditions
    fn reset(&mut self);

    /// Get single input value (convenience)
    #[inline]
    fn get_input(&self, port: usize) -> f64 {
        self.inputs()[port]
    }

    /// Set single input value (convenience)
    #[inline]
    fn set_input(&mut self, port: usize, value: f64) {
        self.inputs_mut()[port] = value;
    }

    /// Get single output value (convenience)
    #[inline]
    fn get_output(&self, port: usize) -> f64 {
        self.outputs()[port]
    }
}

/// Marker trait for dynamic blocks
pub trait DynamicBlock: Block {
    /// Get current state vector
    fn state(&self) -> &[f64];
}
