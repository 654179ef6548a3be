//! Step-response metrics from a sampled trace.

use serde::Serialize;

use crate::utils::constants::SETTLING_BAND;

/// Peak, overshoot, settling and final value of a step response
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponseMetrics {
    pub peak: f64,
    pub peak_time: f64,
    /// Overshoot relative to the final set point, in percent (never negative)
    pub overshoot_percent: f64,
    /// First time after which the output stays inside the 2% band, if it does
    pub settling_time: Option<f64>,
    pub final_value: f64,
}

impl ResponseMetrics {
    /// Returns `None` for an empty trace or mismatched lengths.
    pub fn from_trace(time: &[f64], setpoint: &[f64], output: &[f64]) -> Option<Self> {
        if time.is_empty() || time.len() != output.len() || time.len() != setpoint.len() {
            return None;
        }

        let (peak_index, &peak) = output
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))?;
        let final_value = *output.last()?;
        let target = *setpoint.last()?;

        let scale = if target != 0.0 { target.abs() } else { 1.0 };
        let overshoot_percent = ((peak - target) / scale * 100.0).max(0.0);

        let band = SETTLING_BAND * scale;
        let settling_time = match output.iter().rposition(|&y| (y - target).abs() > band) {
            None => Some(time[0]),
            Some(last) if last + 1 < time.len() => Some(time[last + 1]),
            Some(_) => None,
        };

        Some(Self {
            peak,
            peak_time: time[peak_index],
            overshoot_percent,
            settling_time,
            final_value,
        })
    }
}
