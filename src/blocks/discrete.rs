//! Discrete transfer function block: ZOH-discretized continuous plant
//!
//! `update` evaluates y[k] = C x[k] + D u[k]; `step` advances
//! x[k+1] = Ad x[k] + Bd u[k]. The `dt` passed to `step` is ignored, the
//! block always advances by its own sample period.

use nalgebra::DVector;

use super::statespace::{DiscreteStateSpace, StateSpace};
use crate::block::{Block, BlockError, DynamicBlock};

#[derive(Debug, Clone)]
pub struct DiscreteTransferFunction {
    model: DiscreteStateSpace,
    input: f64,
    output: f64,
    state: DVector<f64>,
}

impl DiscreteTransferFunction {
    /// Discretize `num / den` with a zero-order hold of period `ts`
    pub fn zoh(num: &[f64], den: &[f64], ts: f64) -> Result<Self, BlockError> {
        let model = StateSpace::from_transfer_function(num, den)?.discretize_zoh(ts)?;
        let state = DVector::zeros(model.order());
        Ok(Self {
            model,
            input: 0.0,
            output: 0.0,
            state,
        })
    }

    pub fn model(&self) -> &DiscreteStateSpace {
        &self.model
    }

    pub fn period(&self) -> f64 {
        self.model.period
    }
}

impl Block for DiscreteTransferFunction {
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

    fn step(&mut self, _t: f64, _dt: f64) {
        self.state = self.model.next_state(&self.state, self.input);
    }

    fn reset(&mut self) {
        self.input = 0.0;
        self.output = 0.0;
        self.state.fill(0.0);
    }
}

impl DynamicBlock for DiscreteTransferFunction {
    fn state(&self) -> &[f64] {
        self.state.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discrete_first_order_step() {
        // 1/(s+1) under ZOH: y[k] = 1 - e^{-kT} for a unit step
        let ts = 0.1;
        let mut plant = DiscreteTransferFunction::zoh(&[1.0], &[1.0, 1.0], ts).unwrap();

        for k in 0..20 {
            plant.set_input(0, 1.0);
            plant.update(k as f64 * ts);
            let expected = 1.0 - (-(k as f64) * ts).exp();
            assert_relative_eq!(plant.get_output(0), expected, epsilon = 1e-10);
            plant.step(k as f64 * ts, ts);
        }
    }

    #[test]
    fn test_discrete_output_lags_input_by_one_sample() {
        let mut plant = DiscreteTransferFunction::zoh(&[1.0], &[1.0, 5.0, 6.0], 0.1).unwrap();
        plant.set_input(0, 3.0);
        plant.update(0.0);
        assert_eq!(plant.get_output(0), 0.0);
        plant.step(0.0, 0.1);
        plant.update(0.1);
        assert!(plant.get_output(0) > 0.0);
    }

    #[test]
    fn test_discrete_reset() {
        let mut plant = DiscreteTransferFunction::zoh(&[1.0], &[1.0, 1.0], 0.1).unwrap();
        plant.set_input(0, 1.0);
        plant.step(0.0, 0.1);
        plant.reset();
        assert!(plant.state().iter().all(|&x| x == 0.0));
        assert_eq!(plant.period(), 0.1);
    }
}
