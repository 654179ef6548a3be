//! Identifier-seeded plant and design target.

use rootlocus_types::{DesignTarget, PlantSpec};

use super::DesignError;
use crate::utils::constants::{OVERSHOOT_OFFSET, SEED_DIGITS, SETTLING_TIME_SCALE};

/// Plant and target derived from the last five digits of an identifier
///
/// With the digits named A, B, C, D, E (zeros replaced by 1):
/// - G(s) = C / ((s + D)(s + E))
/// - overshoot = A + 10 percent
/// - settling time = (B + E) * 0.1 seconds
#[derive(Debug, Clone, PartialEq)]
pub struct PlantModel {
    digits: [u8; SEED_DIGITS],
    plant: PlantSpec,
    target: DesignTarget,
}

impl PlantModel {
    pub fn from_identifier(identifier: &str) -> Result<Self, DesignError> {
        let digits = seed_digits(identifier)?;
        let [a, b, c, d, e] = digits.map(f64::from);

        Ok(Self {
            digits,
            plant: PlantSpec::from_factors(c, d, e),
            target: DesignTarget::new(a + OVERSHOOT_OFFSET, (b + e) * SETTLING_TIME_SCALE),
        })
    }

    /// Seed digits A..E after zero substitution
    pub fn digits(&self) -> [u8; SEED_DIGITS] {
        self.digits
    }

    pub fn plant(&self) -> &PlantSpec {
        &self.plant
    }

    pub fn target(&self) -> &DesignTarget {
        &self.target
    }
}

/// Last five digits of `identifier`, each zero replaced by one
fn seed_digits(identifier: &str) -> Result<[u8; SEED_DIGITS], DesignError> {
    let invalid = || DesignError::InvalidIdentifier {
        identifier: identifier.to_string(),
        expected: SEED_DIGITS,
    };

    let bytes = identifier.as_bytes();
    if bytes.len() < SEED_DIGITS {
        return Err(invalid());
    }

    let mut digits = [0u8; SEED_DIGITS];
    for (slot, &byte) in digits.iter_mut().zip(&bytes[bytes.len() - SEED_DIGITS..]) {
        if !byte.is_ascii_digit() {
            return Err(invalid());
        }
        *slot = (byte - b'0').max(1);
    }
    Ok(digits)
}
