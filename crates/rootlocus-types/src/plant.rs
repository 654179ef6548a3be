//! Plant transfer function and design target types.

use serde::{Deserialize, Serialize};

/// SISO plant G(s) = num(s) / den(s)
///
/// Coefficients are stored in descending powers of s. In design sessions the
/// numerator is a single constant and the denominator is the monic expansion
/// of two real first-order factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSpec {
    /// Numerator coefficients, descending powers of s
    pub numerator: Vec<f64>,

    /// Denominator coefficients, descending powers of s
    pub denominator: Vec<f64>,
}

impl PlantSpec {
    pub fn new(numerator: Vec<f64>, denominator: Vec<f64>) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Build `gain / ((s + d)(s + e))`
    pub fn from_factors(gain: f64, d: f64, e: f64) -> Self {
        Self {
            numerator: vec![gain],
            denominator: vec![1.0, d + e, d * e],
        }
    }

    /// Order of the denominator polynomial
    pub fn order(&self) -> usize {
        self.denominator.len().saturating_sub(1)
    }

    /// Real roots of a monic second-order denominator, most negative first.
    ///
    /// Returns `None` when the denominator is not second order or its roots
    /// are complex.
    pub fn poles(&self) -> Option<[f64; 2]> {
        if self.denominator.len() != 3 || self.denominator[0] == 0.0 {
            return None;
        }
        let a = self.denominator[0];
        let b = self.denominator[1] / a;
        let c = self.denominator[2] / a;
        let disc = b * b - 4.0 * c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        Some([(-b - root) / 2.0, (-b + root) / 2.0])
    }

    /// Numerator as a polynomial string in s
    pub fn numerator_string(&self) -> String {
        poly_string(&self.numerator)
    }

    /// Denominator as a polynomial string in s
    pub fn denominator_string(&self) -> String {
        poly_string(&self.denominator)
    }
}

impl std::fmt::Display for PlantSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}) / ({})",
            self.numerator_string(),
            self.denominator_string()
        )
    }
}

fn format_coeff(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn poly_string(coeffs: &[f64]) -> String {
    let order = coeffs.len().saturating_sub(1);
    let mut terms: Vec<String> = Vec::new();

    for (i, &c) in coeffs.iter().enumerate() {
        if c == 0.0 {
            continue;
        }
        let power = order - i;
        let magnitude = c.abs();
        let body = match power {
            0 => format_coeff(magnitude),
            1 if magnitude == 1.0 => "s".to_string(),
            1 => format!("{}*s", format_coeff(magnitude)),
            _ if magnitude == 1.0 => format!("s^{}", power),
            _ => format!("{}*s^{}", format_coeff(magnitude), power),
        };
        if terms.is_empty() {
            terms.push(if c < 0.0 { format!("-{}", body) } else { body });
        } else {
            terms.push(format!("{} {}", if c < 0.0 { "-" } else { "+" }, body));
        }
    }

    if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" ")
    }
}

/// Closed-loop performance target derived from a student identifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignTarget {
    /// Maximum percent overshoot, in (0, 100)
    pub overshoot_percent: f64,

    /// 2% settling time in seconds
    pub settling_time: f64,
}

impl DesignTarget {
    pub fn new(overshoot_percent: f64, settling_time: f64) -> Self {
        Self {
            overshoot_percent,
            settling_time,
        }
    }
}
