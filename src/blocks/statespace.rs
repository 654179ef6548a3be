//! State-space realization of SISO transfer functions
//!
//! A transfer function
//!   H(s) = (b_n s^n + ... + b_0) / (s^n + a_{n-1} s^{n-1} + ... + a_0)
//! is realized as
//!   A = [-a_{n-1}  -a_{n-2}  ...  -a_0]
//!       [   1         0      ...   0  ]
//!       [   ⋮         ⋱            ⋮  ]
//!       [   0        ...     1     0  ]
//!   B = [1, 0, ..., 0]^T
//!   C = strictly proper numerator coefficients
//!   D = b_n (zero unless numerator and denominator have equal degree)
//!
//! which matches scipy.signal.tf2ss.

use nalgebra::{DMatrix, DVector};

use crate::block::BlockError;

/// Continuous-time SISO state-space model
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    pub c: DVector<f64>,
    pub d: f64,
}

impl StateSpace {
    /// Realize `num / den` (descending powers of s)
    pub fn from_transfer_function(num: &[f64], den: &[f64]) -> Result<Self, BlockError> {
        if den.is_empty() {
            return Err(BlockError::EmptyDenominator);
        }
        if den[0] == 0.0 {
            return Err(BlockError::ZeroLeadingCoefficient);
        }
        if num.len() > den.len() {
            return Err(BlockError::Improper {
                num: num.len(),
                den: den.len(),
            });
        }

        let leading = den[0];
        let den_norm: Vec<f64> = den.iter().map(|&x| x / leading).collect();
        let mut num_norm = vec![0.0; den.len() - num.len()];
        num_norm.extend(num.iter().map(|&x| x / leading));

        let n = den_norm.len() - 1;
        let d = num_norm[0];

        // Strictly proper part: num - d * den, dropping the leading term
        let c = DVector::from_fn(n, |i, _| num_norm[i + 1] - d * den_norm[i + 1]);

        let mut a = DMatrix::zeros(n, n);
        for j in 0..n {
            a[(0, j)] = -den_norm[j + 1];
        }
        for i in 1..n {
            a[(i, i - 1)] = 1.0;
        }

        let mut b = DVector::zeros(n);
        if n > 0 {
            b[0] = 1.0;
        }

        Ok(Self { a, b, c, d })
    }

    /// Number of states
    pub fn order(&self) -> usize {
        self.b.len()
    }

    /// y = Cx + Du
    #[inline]
    pub fn output(&self, x: &DVector<f64>, u: f64) -> f64 {
        self.c.dot(x) + self.d * u
    }

    /// Zero-order hold discretization with period `ts`
    ///
    /// Exponentiates the augmented matrix `[[A, B], [0, 0]] * ts`; its top
    /// blocks are `Ad = e^{A ts}` and `Bd = ∫_0^ts e^{A τ} dτ B`.
    pub fn discretize_zoh(&self, ts: f64) -> Result<DiscreteStateSpace, BlockError> {
        if !(ts > 0.0 && ts.is_finite()) {
            return Err(BlockError::InvalidPeriod(ts));
        }

        let n = self.order();
        let mut m = DMatrix::zeros(n + 1, n + 1);
        for i in 0..n {
            for j in 0..n {
                m[(i, j)] = self.a[(i, j)] * ts;
            }
            m[(i, n)] = self.b[i] * ts;
        }

        let e = m.exp();
        let ad = DMatrix::from_fn(n, n, |i, j| e[(i, j)]);
        let bd = DVector::from_fn(n, |i, _| e[(i, n)]);

        Ok(DiscreteStateSpace {
            a: ad,
            b: bd,
            c: self.c.clone(),
            d: self.d,
            period: ts,
        })
    }
}

/// Discrete-time SISO state-space model
///
/// x[k+1] = A x[k] + B u[k],  y[k] = C x[k] + D u[k]
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteStateSpace {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    pub c: DVector<f64>,
    pub d: f64,
    pub period: f64,
}

impl DiscreteStateSpace {
    pub fn order(&self) -> usize {
        self.b.len()
    }

    #[inline]
    pub fn next_state(&self, x: &DVector<f64>, u: f64) -> DVector<f64> {
        &self.a * x + &self.b * u
    }

    #[inline]
    pub fn output(&self, x: &DVector<f64>, u: f64) -> f64 {
        self.c.dot(x) + self.d * u
    }
}
