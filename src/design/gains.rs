//! Analytic PID gains from the root-locus angle and magnitude criteria.

use std::f64::consts::PI;

use log::{debug, warn};
use num_complex::Complex64;
use rootlocus_types::{DesignTarget, GainSet, PlantSpec, ZeroConvention};

use super::DesignError;
use crate::utils::constants::{DEGENERATE_TAN_TOLERANCE, INTEGRATOR_ZERO, SETTLING_FACTOR};
use crate::utils::poly::{expand_pair, polyval};

/// Derivation of a gain set, step by step
#[derive(Debug, Clone, PartialEq)]
pub struct GainDesign {
    pub gains: GainSet,
    /// Damping ratio ζ for the overshoot target
    pub damping_ratio: f64,
    /// Natural frequency ωn in rad/s
    pub natural_frequency: f64,
    /// Desired closed-loop pole in the upper half-plane
    pub dominant_pole: Complex64,
    /// Sum of open-loop pole angles at the dominant pole, degrees
    pub pole_angle_sum: f64,
    /// Angle the compensator zero must contribute, degrees
    pub required_angle: f64,
    /// Raw zero location from the angle criterion
    pub zero_location: f64,
    /// Magnitude used for the (s + zero) factor
    pub zero: f64,
    /// Magnitude-criterion gain of the PD section
    pub kd_factor: f64,
    /// Magnitude-criterion gain of the PI section
    pub ki_factor: f64,
    /// Set when the angle criterion asked for a right half-plane zero and
    /// its mirror image was used instead
    pub mirrored: bool,
}

/// Solves for the "true" PID gains of a plant and design target
#[derive(Debug, Clone, Copy, Default)]
pub struct GainSolver {
    convention: ZeroConvention,
}

impl GainSolver {
    pub fn new(convention: ZeroConvention) -> Self {
        Self { convention }
    }

    pub fn convention(&self) -> ZeroConvention {
        self.convention
    }

    pub fn solve(&self, plant: &PlantSpec, target: &DesignTarget) -> Result<GainDesign, DesignError> {
        let overshoot = target.overshoot_percent;
        if !(overshoot > 0.0 && overshoot < 100.0) {
            return Err(DesignError::OvershootOutOfRange(overshoot));
        }
        let ts = target.settling_time;
        if !(ts.is_finite() && ts > 0.0) {
            return Err(DesignError::InvalidSettlingTime(ts));
        }
        let poles = plant.poles().ok_or(DesignError::UnsupportedPlant)?;

        let ln_mp = (overshoot / 100.0).ln();
        let zeta = -ln_mp / (PI * PI + ln_mp * ln_mp).sqrt();
        let wn = SETTLING_FACTOR / (ts * zeta);
        let p = Complex64::new(-zeta * wn, wn * (1.0 - zeta * zeta).sqrt());

        let pole_angle_sum: f64 = poles
            .iter()
            .map(|&q| 180.0 - (p - q).arg().to_degrees())
            .sum();
        let required_angle = pole_angle_sum - 180.0;

        let tan = required_angle.to_radians().tan();
        if tan.abs() < DEGENERATE_TAN_TOLERANCE {
            return Err(DesignError::DegenerateAngle { angle_deg: required_angle });
        }
        let zero_location = p.re + p.im / tan;

        let mirrored = zero_location >= 0.0;
        if mirrored {
            match self.convention {
                ZeroConvention::Strict => {
                    return Err(DesignError::RightHalfPlaneZero { location: zero_location });
                }
                ZeroConvention::Mirror => {
                    warn!(
                        "angle criterion places the zero at s = {:.6} (right half-plane), using s = {:.6}",
                        zero_location, -zero_location
                    );
                }
            }
        }
        let zero = zero_location.abs();

        let g = polyval(&plant.numerator, p) / polyval(&plant.denominator, p);
        let pd = (p + zero) * g;

        let kd_factor = reciprocal_magnitude(pd, "KD")?;
        let pi = (p + INTEGRATOR_ZERO) / p;
        let ki_factor = reciprocal_magnitude(pi * pd * kd_factor, "KI")?;

        // (s + 0.5)(s + zero) = s^2 + x s + y
        let [_, x, y] = expand_pair(INTEGRATOR_ZERO, zero).map(f64::abs);

        let k = ki_factor * kd_factor;
        let gains = GainSet::new(k * x, k * y, k);

        for (value, name) in [(gains.kp, "Kp"), (gains.ki, "Ki"), (gains.kd, "Kd")] {
            if !value.is_finite() {
                return Err(DesignError::NonFinite(name));
            }
        }

        debug!(
            "zeta={:.6} wn={:.6} p={:.6}{:+.6}j angles={:.6} required={:.6}",
            zeta, wn, p.re, p.im, pole_angle_sum, required_angle
        );
        debug!(
            "zero={:.6} KD={:.6} KI={:.6} -> Kp={:.6} Ki={:.6} Kd={:.6}",
            zero, kd_factor, ki_factor, gains.kp, gains.ki, gains.kd
        );

        Ok(GainDesign {
            gains,
            damping_ratio: zeta,
            natural_frequency: wn,
            dominant_pole: p,
            pole_angle_sum,
            required_angle,
            zero_location,
            zero,
            kd_factor,
            ki_factor,
            mirrored,
        })
    }
}

fn reciprocal_magnitude(value: Complex64, name: &'static str) -> Result<f64, DesignError> {
    let magnitude = value.norm();
    if magnitude == 0.0 {
        return Err(DesignError::ZeroMagnitude(name));
    }
    let inverse = 1.0 / magnitude;
    if !inverse.is_finite() {
        return Err(DesignError::NonFinite(name));
    }
    Ok(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::PlantModel;
    use approx::assert_relative_eq;

    fn solve(id: &str, convention: ZeroConvention) -> Result<GainDesign, DesignError> {
        let model = PlantModel::from_identifier(id).unwrap();
        GainSolver::new(convention).solve(model.plant(), model.target())
    }

    #[test]
    fn test_reference_design() {
        let design = solve("2206029123", ZeroConvention::Mirror).unwrap();

        assert_relative_eq!(design.damping_ratio, 0.5594163911096327, epsilon = 1e-12);
        assert_relative_eq!(design.natural_frequency, 5.958590749765994, epsilon = 1e-12);
        assert_relative_eq!(design.dominant_pole.re, -10.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(design.dominant_pole.im, 4.938997126146741, epsilon = 1e-12);
        assert_relative_eq!(design.pole_angle_sum, 161.03150109083418, epsilon = 1e-9);
        assert_relative_eq!(design.zero_location, -17.702882233918142, epsilon = 1e-9);
        assert_relative_eq!(design.kd_factor, 5.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(design.ki_factor, 1.0464710165268079, epsilon = 1e-9);
        assert!(!design.mirrored);

        assert_relative_eq!(design.gains.kp, 31.747981125076773, max_relative = 1e-9);
        assert_relative_eq!(design.gains.ki, 15.437960972318884, max_relative = 1e-9);
        assert_relative_eq!(design.gains.kd, 1.744118360878011, max_relative = 1e-9);
    }

    #[test]
    fn test_degenerate_angle() {
        // Poles at -3 and -7 sit symmetric about Re(p) = -5
        let err = solve("2200011137", ZeroConvention::Mirror).unwrap_err();
        assert!(matches!(err, DesignError::DegenerateAngle { .. }));
    }

    #[test]
    fn test_right_half_plane_zero() {
        let design = solve("2200011118", ZeroConvention::Mirror).unwrap();
        assert!(design.mirrored);
        assert!(design.zero_location > 0.0);
        assert_relative_eq!(design.zero, design.zero_location);
        assert!(design.gains.is_finite());

        let err = solve("2200011118", ZeroConvention::Strict).unwrap_err();
        assert!(matches!(err, DesignError::RightHalfPlaneZero { .. }));
    }

    #[test]
    fn test_target_validation() {
        let plant = PlantSpec::from_factors(1.0, 2.0, 3.0);
        let solver = GainSolver::default();

        for overshoot in [0.0, 100.0, -5.0, f64::NAN] {
            let target = DesignTarget::new(overshoot, 1.0);
            assert!(matches!(
                solver.solve(&plant, &target),
                Err(DesignError::OvershootOutOfRange(_))
            ));
        }
        for ts in [0.0, -1.0, f64::INFINITY] {
            let target = DesignTarget::new(12.0, ts);
            assert!(matches!(
                solver.solve(&plant, &target),
                Err(DesignError::InvalidSettlingTime(_))
            ));
        }
    }

    #[test]
    fn test_unsupported_plant() {
        let plant = PlantSpec::new(vec![1.0], vec![1.0, 0.0, 1.0]);
        let target = DesignTarget::new(12.0, 1.2);
        assert_eq!(
            GainSolver::default().solve(&plant, &target),
            Err(DesignError::UnsupportedPlant)
        );
    }

    #[test]
    fn test_zero_gain_plant() {
        let plant = PlantSpec::new(vec![0.0], vec![1.0, 5.0, 6.0]);
        let target = DesignTarget::new(12.0, 1.2);
        assert_eq!(
            GainSolver::default().solve(&plant, &target),
            Err(DesignError::ZeroMagnitude("KD"))
        );
    }
}
