//! Transfer Function block: continuous-time SISO LTI system
//!
//! The numerator/denominator pair is realized in state-space form (see
//! [`StateSpace`]). Each step holds the input constant and advances the state
//! with the exact zero-order-hold transition for that step length, so stiff
//! loops stay stable at any step size.

use nalgebra::DVector;

use super::statespace::{DiscreteStateSpace, StateSpace};
use crate::block::{Block, BlockError, DynamicBlock};

/// Continuous transfer function H(s) = num(s)/den(s)
///
/// # Example
///
/// ```rust
/// use rootlocus::blocks::TransferFunction;
/// use rootlocus::Block;
///
/// // H(s) = 1/(s+1)
/// let mut tf = TransferFunction::new(&[1.0], &[1.0, 1.0]).unwrap();
/// tf.set_input(0, 1.0);
/// tf.update(0.0);
///
/// let dt = 0.01;
/// for _ in 0..500 {
///     tf.step(0.0, dt);
/// }
///
/// assert!((tf.get_output(0) - 0.993).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct TransferFunction {
    model: StateSpace,
    /// Transition matrices for the most recent step length
    transition: Option<DiscreteStateSpace>,
    input: f64,
    output: f64,
    state: DVector<f64>,
}

impl TransferFunction {
    /// Create from coefficients in descending powers of s
    pub fn new(num: &[f64], den: &[f64]) -> Result<Self, BlockError> {
        let model = StateSpace::from_transfer_function(num, den)?;
        Ok(Self::from_state_space(model))
    }

    pub fn from_state_space(model: StateSpace) -> Self {
        let state = DVector::zeros(model.order());
        Self {
            model,
            transition: None,
            input: 0.0,
            output: 0.0,
            state,
        }
    }

    pub fn model(&self) -> &StateSpace {
        &self.model
    }

    pub fn order(&self) -> usize {
        self.model.order()
    }

    /// Discretize for `dt` unless the cached transition already matches it
    fn refresh_transition(&mut self, dt: f64) -> Result<(), BlockError> {
        let stale = match &self.transition {
            Some(cached) => (cached.period - dt).abs() > STEP_TOLERANCE * dt.abs().max(1.0),
            None => true,
        };
        if stale {
            self.transition = Some(self.model.discretize_zoh(dt)?);
        }
        Ok(())
    }
}

/// Relative difference below which two step lengths share a discretization
const STEP_TOLERANCE: f64 = 1e-12;

impl Block for TransferFunction {
    #[inline]
    fn inputs(&self) -> &[f64] {
        std::slice::from_ref(&self.input)
    }

    #[inline]
    fn inputs_mut(&mut self) -> &mut [f64] {
        std::slice::from_mut(&mut self.input)
    }

    #[inline]
    fn outputs(&self) -> &[f64] {
        std::slice::from_ref(&self.output)
    }

    fn update(&mut self, _t: f64) {
        self.output = self.model.output(&self.state, self.input);
    }

    /// Advance by `dt` with the input held; a non-positive `dt` leaves the
    /// state untouched
    fn step(&mut self, _t: f64, dt: f64) {
        if self.refresh_transition(dt).is_err() {
            return;
        }
        let u = self.input;
        if let Some(transition) = &self.transition {
            self.state = transition.next_state(&self.state, u);
        }
        self.output = self.model.output(&self.state, u);
    }

    fn reset(&mut self) {
        self.input = 0.0;
        self.output = 0.0;
        self.state.fill(0.0);
    }
}

impl DynamicBlock for TransferFunction {
    fn state(&self) -> &[f64] {
        self.state.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tf_step_response_first_order() {
        let mut tf = TransferFunction::new(&[1.0], &[1.0, 1.0]).unwrap();
        tf.set_input(0, 1.0);
        tf.update(0.0);

        let dt = 0.01;
        for _ in 0..500 {
            tf.step(0.0, dt);
        }

        let expected = 1.0 - (-5.0_f64).exp();
        assert!(
            (tf.get_output(0) - expected).abs() < 1e-6,
            "Output: {}, Expected: {}",
            tf.get_output(0),
            expected
        );
    }

    #[test]
    fn test_tf_second_order_steady_state() {
        // 6/((s+2)(s+3)) has unit DC gain
        let mut tf = TransferFunction::new(&[6.0], &[1.0, 5.0, 6.0]).unwrap();
        tf.set_input(0, 1.0);
        tf.update(0.0);

        for _ in 0..1000 {
            tf.step(0.0, 0.01);
        }
        assert!((tf.get_output(0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_tf_stiff_pole_stays_bounded() {
        // pole at -1000 with a step 10x its time constant
        let mut tf = TransferFunction::new(&[1000.0], &[1.0, 1000.0]).unwrap();
        tf.set_input(0, 1.0);
        tf.update(0.0);

        for _ in 0..100 {
            tf.step(0.0, 0.01);
            assert!(tf.get_output(0).is_finite());
        }
        assert!((tf.get_output(0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_tf_changing_step_length() {
        let mut coarse = TransferFunction::new(&[1.0], &[1.0, 1.0]).unwrap();
        let mut fine = coarse.clone();
        for tf in [&mut coarse, &mut fine] {
            tf.set_input(0, 1.0);
            tf.update(0.0);
        }

        coarse.step(0.0, 0.2);
        for _ in 0..4 {
            fine.step(0.0, 0.05);
        }
        fine.step(0.0, 0.0);
        assert!((coarse.get_output(0) - fine.get_output(0)).abs() < 1e-10);
    }

    #[test]
    fn test_tf_direct_feedthrough() {
        // (s+1)/(s+2): initial output is the feedthrough term
        let mut tf = TransferFunction::new(&[1.0, 1.0], &[1.0, 2.0]).unwrap();
        tf.set_input(0, 1.0);
        tf.update(0.0);
        assert_eq!(tf.get_output(0), 1.0);
    }

    #[test]
    fn test_tf_reset() {
        let mut tf = TransferFunction::new(&[1.0], &[1.0, 2.0, 1.0]).unwrap();
        tf.set_input(0, 1.0);
        tf.update(0.0);
        tf.step(0.0, 0.1);
        assert!(tf.state().iter().any(|&x| x != 0.0));

        tf.reset();
        assert!(tf.state().iter().all(|&x| x == 0.0));
        assert_eq!(tf.get_input(0), 0.0);
        assert_eq!(tf.get_output(0), 0.0);
    }

    #[test]
    fn test_tf_invalid() {
        assert!(TransferFunction::new(&[1.0], &[0.0, 1.0]).is_err());
    }
}
