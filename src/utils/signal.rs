//! Sampled signal helpers: time grids, running sums and gradients

/// `n` evenly spaced samples over `[start, stop]`, both ends included
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|k| start + k as f64 * step).collect();
            grid[n - 1] = stop;
            grid
        }
    }
}

/// Samples `start, start + step, ...` strictly below `stop`
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || stop <= start {
        return Vec::new();
    }
    let n = ((stop - start) / step).ceil() as usize;
    (0..n).map(|k| start + k as f64 * step).collect()
}

/// Running sum
pub fn cumsum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

/// Numerical gradient with uniform spacing `h`
///
/// Central differences in the interior, first-order one-sided differences at
/// the two ends. Fewer than two samples yield zeros.
pub fn gradient(values: &[f64], h: f64) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let mut out = vec![0.0; n];
    out[0] = (values[1] - values[0]) / h;
    for i in 1..n - 1 {
        out[i] = (values[i + 1] - values[i - 1]) / (2.0 * h);
    }
    out[n - 1] = (values[n - 1] - values[n - 2]) / h;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let t = linspace(0.0, 10.0, 1000);
        assert_eq!(t.len(), 1000);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[999], 10.0);
        assert!((t[1] - 10.0 / 999.0).abs() < 1e-15);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn test_arange_excludes_stop() {
        let t = arange(0.0, 10.0, 0.1);
        assert_eq!(t.len(), 100);
        assert_eq!(t[10], 1.0);
        assert!(t[99] < 10.0);
        assert!(arange(0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn test_cumsum() {
        assert_eq!(cumsum(&[1.0, 2.0, 3.0]), vec![1.0, 3.0, 6.0]);
        assert!(cumsum(&[]).is_empty());
    }

    #[test]
    fn test_gradient_step() {
        let g = gradient(&[0.0, 0.0, 1.0, 1.0], 0.1);
        assert_eq!(g.len(), 4);
        assert_eq!(g[0], 0.0);
        assert!((g[1] - 5.0).abs() < 1e-12);
        assert!((g[2] - 5.0).abs() < 1e-12);
        assert_eq!(g[3], 0.0);
    }

    #[test]
    fn test_gradient_linear_is_exact() {
        let g = gradient(&[0.0, 2.0, 4.0, 6.0, 8.0], 2.0);
        assert!(g.iter().all(|&v| (v - 1.0).abs() < 1e-12));
        assert_eq!(gradient(&[5.0], 0.1), vec![0.0]);
    }
}
