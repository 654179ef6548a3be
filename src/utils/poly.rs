//! Polynomial arithmetic on coefficient slices
//!
//! Coefficients are in descending powers of s, matching the transfer
//! function convention used throughout the crate.

use num_complex::Complex64;

/// Product of two polynomials
pub fn polymul(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}

/// Sum of two polynomials, aligned at the constant term
pub fn polyadd(a: &[f64], b: &[f64]) -> Vec<f64> {
    let len = a.len().max(b.len());
    let mut out = vec![0.0; len];
    for (i, &ai) in a.iter().enumerate() {
        out[len - a.len() + i] += ai;
    }
    for (i, &bi) in b.iter().enumerate() {
        out[len - b.len() + i] += bi;
    }
    out
}

/// Drop leading zero coefficients, keeping at least one term
pub fn trim(coeffs: &[f64]) -> Vec<f64> {
    match coeffs.iter().position(|&c| c != 0.0) {
        Some(first) => coeffs[first..].to_vec(),
        None => vec![0.0],
    }
}

/// Evaluate at a complex point (Horner)
pub fn polyval(coeffs: &[f64], s: Complex64) -> Complex64 {
    coeffs
        .iter()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * s + c)
}

/// Expand `(s + p)(s + q)` into `[1, p + q, p*q]`
pub fn expand_pair(p: f64, q: f64) -> [f64; 3] {
    let v = polymul(&[1.0, p], &[1.0, q]);
    [v[0], v[1], v[2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polymul() {
        assert_eq!(polymul(&[1.0, 2.0], &[1.0, 3.0]), vec![1.0, 5.0, 6.0]);
        assert_eq!(polymul(&[2.0], &[1.0, 0.0]), vec![2.0, 0.0]);
        assert!(polymul(&[], &[1.0]).is_empty());
    }

    #[test]
    fn test_polyadd_aligns_constant_terms() {
        assert_eq!(polyadd(&[1.0, 5.0, 6.0, 0.0], &[2.0, 3.0]), vec![1.0, 5.0, 8.0, 3.0]);
        assert_eq!(polyadd(&[1.0], &[]), vec![1.0]);
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim(&[0.0, 0.0, 1.0, 0.0]), vec![1.0, 0.0]);
        assert_eq!(trim(&[0.0, 0.0]), vec![0.0]);
    }

    #[test]
    fn test_polyval_complex() {
        // s^2 + 1 vanishes at s = j
        let v = polyval(&[1.0, 0.0, 1.0], Complex64::new(0.0, 1.0));
        assert!(v.norm() < 1e-15);

        let v = polyval(&[1.0, 5.0, 6.0], Complex64::new(-1.0, 0.0));
        assert_eq!(v, Complex64::new(2.0, 0.0));
    }

    #[test]
    fn test_expand_pair() {
        assert_eq!(expand_pair(2.0, 3.0), [1.0, 5.0, 6.0]);
        assert_eq!(expand_pair(0.5, 4.0), [1.0, 4.5, 2.0]);
    }
}
