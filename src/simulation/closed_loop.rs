//! Loop assembly: unity feedback around the PID-compensated plant, and the
//! sampled open-loop drive of the discretized plant.

use rootlocus_types::{GainSet, PlantSpec, Reference};

use crate::block::{Block, BlockError};
use crate::blocks::{DiscreteTransferFunction, Step, TransferFunction};
use crate::utils::poly::{polyadd, polymul, trim};
use crate::utils::signal::{cumsum, gradient};

/// PID controller Kd s^2 + Kp s + Ki over s
pub fn pid_polynomial(gains: &GainSet) -> ([f64; 3], [f64; 2]) {
    ([gains.kd, gains.kp, gains.ki], [1.0, 0.0])
}

/// Closed loop T(s) = C G / (1 + C G) as (numerator, denominator)
pub fn unity_feedback(gains: &GainSet, plant: &PlantSpec) -> (Vec<f64>, Vec<f64>) {
    let (c_num, c_den) = pid_polynomial(gains);
    let open_num = trim(&polymul(&c_num, &plant.numerator));
    let open_den = polymul(&c_den, &plant.denominator);
    let closed_den = polyadd(&open_den, &open_num);
    (open_num, closed_den)
}

/// Continuous closed loop driven by a step reference
///
/// Wiring: `source -> system`, advanced by the system's exact held-input
/// transition over each interval.
#[derive(Debug, Clone)]
pub struct ContinuousLoop {
    pub source: Step,
    pub system: TransferFunction,
}

impl ContinuousLoop {
    pub fn new(gains: &GainSet, plant: &PlantSpec, reference: Reference) -> Result<Self, BlockError> {
        let (num, den) = unity_feedback(gains, plant);
        Ok(Self {
            source: Step::from(reference),
            system: TransferFunction::new(&num, &den)?,
        })
    }

    /// Sample reference and output on `time`
    pub fn run(&mut self, time: &[f64]) -> (Vec<f64>, Vec<f64>) {
        self.source.reset();
        self.system.reset();

        let mut setpoint = Vec::with_capacity(time.len());
        let mut output = Vec::with_capacity(time.len());

        for (k, &t) in time.iter().enumerate() {
            self.source.update(t);
            self.system.set_input(0, self.source.get_output(0));
            self.system.update(t);

            setpoint.push(self.source.get_output(0));
            output.push(self.system.get_output(0));

            if let Some(&next) = time.get(k + 1) {
                self.system.step(t, next - t);
            }
        }
        (setpoint, output)
    }
}

/// Discretized plant driven directly by the sampled PID law
#[derive(Debug, Clone)]
pub struct SampledLoop {
    pub source: Step,
    pub plant: DiscreteTransferFunction,
    gains: GainSet,
}

impl SampledLoop {
    pub fn new(
        gains: &GainSet,
        plant: &PlantSpec,
        reference: Reference,
        period: f64,
    ) -> Result<Self, BlockError> {
        Ok(Self {
            source: Step::from(reference),
            plant: DiscreteTransferFunction::zoh(&plant.numerator, &plant.denominator, period)?,
            gains: *gains,
        })
    }

    /// Control law u = Kp r + Ki Σr Ts + Kd dr/dt over a sampled reference
    pub fn control(&self, setpoint: &[f64]) -> Vec<f64> {
        let ts = self.plant.period();
        let integral = cumsum(setpoint);
        let derivative = gradient(setpoint, ts);

        setpoint
            .iter()
            .zip(integral.iter().zip(&derivative))
            .map(|(&r, (&i, &d))| self.gains.kp * r + self.gains.ki * i * ts + self.gains.kd * d)
            .collect()
    }

    /// Sample reference, control and output on `time`
    pub fn run(&mut self, time: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        self.source.reset();
        self.plant.reset();

        let setpoint: Vec<f64> = time
            .iter()
            .map(|&t| {
                self.source.update(t);
                self.source.get_output(0)
            })
            .collect();
        let control = self.control(&setpoint);

        let ts = self.plant.period();
        let mut output = Vec::with_capacity(time.len());
        for (&t, &u) in time.iter().zip(&control) {
            self.plant.set_input(0, u);
            self.plant.update(t);
            output.push(self.plant.get_output(0));
            self.plant.step(t, ts);
        }
        (setpoint, control, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unity_feedback_polynomials() {
        let plant = PlantSpec::from_factors(1.0, 2.0, 3.0);
        let (num, den) = unity_feedback(&GainSet::new(2.0, 3.0, 4.0), &plant);
        // (4s^2 + 2s + 3) / (s^3 + 5s^2 + 6s + 4s^2 + 2s + 3)
        assert_eq!(num, vec![4.0, 2.0, 3.0]);
        assert_eq!(den, vec![1.0, 9.0, 8.0, 3.0]);
    }

    #[test]
    fn test_unity_feedback_proportional_only() {
        let plant = PlantSpec::from_factors(1.0, 2.0, 3.0);
        let (num, den) = unity_feedback(&GainSet::new(1.0, 0.0, 0.0), &plant);
        assert_eq!(num, vec![1.0, 0.0]);
        assert_eq!(den, vec![1.0, 5.0, 7.0, 0.0]);
    }

    #[test]
    fn test_sampled_control_law() {
        let plant = PlantSpec::from_factors(1.0, 2.0, 3.0);
        let sampled =
            SampledLoop::new(&GainSet::new(2.0, 10.0, 0.5), &plant, Reference::default(), 0.1)
                .unwrap();
        let u = sampled.control(&[0.0, 1.0, 1.0, 1.0]);
        assert_relative_eq!(u[0], 0.5 * 10.0, epsilon = 1e-12);
        assert_relative_eq!(u[1], 2.0 + 10.0 * 0.1 + 0.5 * 5.0, epsilon = 1e-12);
        assert_relative_eq!(u[2], 2.0 + 10.0 * 0.2, epsilon = 1e-12);
        assert_relative_eq!(u[3], 2.0 + 10.0 * 0.3, epsilon = 1e-12);
    }
}
