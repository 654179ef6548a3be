//! Simulation trace types.

use serde::{Deserialize, Serialize};

/// Continuous and hybrid step responses of one simulation run
///
/// All sequences of the same domain have equal length: the continuous traces
/// share `time_continuous`, the discrete traces share `time_discrete`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Continuous time grid
    pub time_continuous: Vec<f64>,
    /// Step reference sampled on the continuous grid
    pub setpoint_continuous: Vec<f64>,
    /// Closed-loop output y(t)
    pub output_continuous: Vec<f64>,
    /// Tracking error r(t) - y(t)
    pub error_continuous: Vec<f64>,

    /// Discrete sample instants
    pub time_discrete: Vec<f64>,
    /// Step reference at each sample
    pub setpoint_discrete: Vec<f64>,
    /// Control signal applied to the discretized plant
    pub control_discrete: Vec<f64>,
    /// Discretized plant output
    pub output_discrete: Vec<f64>,
    /// Setpoint minus discrete output
    pub error_discrete: Vec<f64>,
}

impl SimulationResult {
    /// Number of continuous samples
    pub fn len_continuous(&self) -> usize {
        self.time_continuous.len()
    }

    /// Number of discrete samples
    pub fn len_discrete(&self) -> usize {
        self.time_discrete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_continuous.is_empty() && self.time_discrete.is_empty()
    }
}
