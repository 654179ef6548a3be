//! Simulation and design settings.

use serde::{Deserialize, Serialize};

/// How the gain solver treats a compensator zero that the angle criterion
/// places on the non-negative real axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZeroConvention {
    /// Use the magnitude of the location and flag the design as mirrored
    #[default]
    Mirror,
    /// Reject the design
    Strict,
}

impl ZeroConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZeroConvention::Mirror => "mirror",
            ZeroConvention::Strict => "strict",
        }
    }
}

/// Simulation horizon and sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Simulation horizon in seconds
    pub duration: f64,

    /// Number of continuous-time samples over `[0, duration]`
    pub samples: usize,

    /// Zero-order hold period of the discretized plant
    pub sample_period: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            duration: 10.0,
            samples: 1000,
            sample_period: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_partial_json_uses_defaults() {
        let settings: SimulationSettings = serde_json::from_str(r#"{"duration": 5.0}"#).unwrap();
        assert_eq!(settings.duration, 5.0);
        assert_eq!(settings.samples, 1000);
        assert_eq!(settings.sample_period, 0.1);
    }

    #[test]
    fn test_zero_convention_serde() {
        let strict: ZeroConvention = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(strict, ZeroConvention::Strict);
        assert_eq!(
            serde_json::to_string(&ZeroConvention::Mirror).unwrap(),
            "\"mirror\""
        );
        assert_eq!(ZeroConvention::default(), ZeroConvention::Mirror);
    }
}
