//! Closed-loop step responses for a student's gain set.
//!
//! Two traces come out of one run:
//! - continuous: unity feedback around C(s) G(s), stepped exactly with the
//!   reference held over each interval of `linspace(0, T)`
//! - discrete: G discretized by zero-order hold and driven by the sampled
//!   PID law over `arange(0, T, Ts)`
//!
//! Both traces use the plant's full numerator C, the same G(s) the true gains
//! are designed against, rather than a unit numerator.
//!
//! # Examples
//!
//! ```
//! use rootlocus::simulation::ResponseSimulator;
//! use rootlocus_types::{GainSet, PlantSpec, Reference, SimulationSettings};
//!
//! let plant = PlantSpec::from_factors(1.0, 2.0, 3.0);
//! let result = ResponseSimulator::new(plant, SimulationSettings::default())
//!     .with_gains(GainSet::new(1.0, 0.0, 0.0))
//!     .with_reference(Reference::default())
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(result.len_continuous(), 1000);
//! assert_eq!(result.len_discrete(), 100);
//! ```

mod closed_loop;
mod export;
mod metrics;

pub use closed_loop::{pid_polynomial, unity_feedback, ContinuousLoop, SampledLoop};
pub use export::TraceExport;
pub use metrics::ResponseMetrics;

use log::debug;
use rootlocus_types::{GainSet, PlantSpec, Reference, SimulationResult, SimulationSettings};
use thiserror::Error;

use crate::block::BlockError;
use crate::utils::signal::{arange, linspace};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("missing simulation input: {0}")]
    MissingInput(&'static str),

    #[error("invalid simulation settings: {0}")]
    InvalidSettings(&'static str),

    #[error("trace columns have different lengths")]
    RaggedTrace,

    #[error(transparent)]
    Block(#[from] BlockError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs the continuous and hybrid simulations of one session
#[derive(Debug, Clone)]
pub struct ResponseSimulator {
    plant: PlantSpec,
    settings: SimulationSettings,
    gains: Option<GainSet>,
    reference: Option<Reference>,
}

impl ResponseSimulator {
    pub fn new(plant: PlantSpec, settings: SimulationSettings) -> Self {
        Self {
            plant,
            settings,
            gains: None,
            reference: None,
        }
    }

    pub fn with_gains(mut self, gains: GainSet) -> Self {
        self.gains = Some(gains);
        self
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn set_gains(&mut self, gains: GainSet) {
        self.gains = Some(gains);
    }

    pub fn set_reference(&mut self, reference: Reference) {
        self.reference = Some(reference);
    }

    pub fn plant(&self) -> &PlantSpec {
        &self.plant
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Simulate both loops. Identical inputs give bit-identical traces.
    pub fn run(&self) -> Result<SimulationResult, SimulationError> {
        let gains = self.gains.ok_or(SimulationError::MissingInput("gains"))?;
        let reference = self
            .reference
            .ok_or(SimulationError::MissingInput("reference"))?;
        self.validate()?;

        let s = &self.settings;
        let time_continuous = linspace(0.0, s.duration, s.samples);
        let (setpoint_continuous, output_continuous) =
            ContinuousLoop::new(&gains, &self.plant, reference)?.run(&time_continuous);

        let time_discrete = arange(0.0, s.duration, s.sample_period);
        let (setpoint_discrete, control_discrete, output_discrete) =
            SampledLoop::new(&gains, &self.plant, reference, s.sample_period)?.run(&time_discrete);

        debug!(
            "simulated Kp={} Ki={} Kd={}: {} continuous, {} discrete samples",
            gains.kp,
            gains.ki,
            gains.kd,
            time_continuous.len(),
            time_discrete.len()
        );

        Ok(SimulationResult {
            error_continuous: difference(&setpoint_continuous, &output_continuous),
            error_discrete: difference(&setpoint_discrete, &output_discrete),
            time_continuous,
            setpoint_continuous,
            output_continuous,
            time_discrete,
            setpoint_discrete,
            control_discrete,
            output_discrete,
        })
    }

    fn validate(&self) -> Result<(), SimulationError> {
        let s = &self.settings;
        if !(s.duration.is_finite() && s.duration > 0.0) {
            return Err(SimulationError::InvalidSettings("duration must be positive"));
        }
        if s.samples < 2 {
            return Err(SimulationError::InvalidSettings("need at least two samples"));
        }
        if !(s.sample_period.is_finite() && s.sample_period > 0.0) {
            return Err(SimulationError::InvalidSettings("sample period must be positive"));
        }
        Ok(())
    }
}

fn difference(setpoint: &[f64], output: &[f64]) -> Vec<f64> {
    setpoint.iter().zip(output).map(|(r, y)| r - y).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn simulator() -> ResponseSimulator {
        ResponseSimulator::new(
            PlantSpec::from_factors(1.0, 2.0, 3.0),
            SimulationSettings::default(),
        )
    }

    #[test]
    fn test_missing_inputs() {
        let err = simulator().with_reference(Reference::default()).run().unwrap_err();
        assert!(matches!(err, SimulationError::MissingInput("gains")));

        let err = simulator().with_gains(GainSet::default()).run().unwrap_err();
        assert!(matches!(err, SimulationError::MissingInput("reference")));
    }

    #[test]
    fn test_invalid_settings() {
        let settings = SimulationSettings {
            samples: 1,
            ..SimulationSettings::default()
        };
        let err = ResponseSimulator::new(PlantSpec::from_factors(1.0, 2.0, 3.0), settings)
            .with_gains(GainSet::default())
            .with_reference(Reference::default())
            .run()
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidSettings(_)));
    }

    #[test]
    fn test_proportional_loop_steady_state() {
        // Kp = 1 on 1/((s+2)(s+3)): closed-loop DC gain 1/7
        let result = simulator()
            .with_gains(GainSet::new(1.0, 0.0, 0.0))
            .with_reference(Reference::default())
            .run()
            .unwrap();

        let y_final = *result.output_continuous.last().unwrap();
        assert_relative_eq!(y_final, 1.0 / 7.0, epsilon = 1e-6);
        assert_relative_eq!(
            *result.error_continuous.last().unwrap(),
            1.0 - y_final,
            epsilon = 1e-15
        );

        // Open-loop sampled plant settles to the DC gain 1/6
        let yd_final = *result.output_discrete.last().unwrap();
        assert_relative_eq!(yd_final, 1.0 / 6.0, epsilon = 1e-4);
    }

    #[test]
    fn test_output_zero_before_step() {
        let result = simulator()
            .with_gains(GainSet::new(5.0, 2.0, 1.0))
            .with_reference(Reference::new(2.0, 1.0))
            .run()
            .unwrap();

        for (t, y) in result.time_continuous.iter().zip(&result.output_continuous) {
            if *t < 1.0 {
                assert_eq!(*y, 0.0);
            }
        }
        for (t, r) in result.time_discrete.iter().zip(&result.setpoint_discrete) {
            assert_eq!(*r, if *t >= 1.0 { 2.0 } else { 0.0 });
        }
    }
}
