//! PID gain sets and step references.

use serde::{Deserialize, Serialize};

/// Parallel-form PID gains: C(s) = Kp + Ki/s + Kd*s
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainSet {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl GainSet {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// True when every gain is finite
    pub fn is_finite(&self) -> bool {
        self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite()
    }
}

/// Gains a fresh session starts with: proportional only
impl Default for GainSet {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

/// Step reference: 0 before `step_time`, `set_point` from then on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub set_point: f64,
    pub step_time: f64,
}

impl Reference {
    pub fn new(set_point: f64, step_time: f64) -> Self {
        Self {
            set_point,
            step_time,
        }
    }

    /// Reference value at time `t`
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        if t >= self.step_time {
            self.set_point
        } else {
            0.0
        }
    }
}

impl Default for Reference {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}
