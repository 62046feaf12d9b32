//! Bernstein basis polynomials.
//!
//! `B_i^n(t) = C(n, i) · t^i · (1 − t)^(n − i)` is the weight of control point
//! `i` in a degree-`n` Bezier curve at parameter `t`. The formula is evaluated
//! as-is for any finite `t`, so values outside `[0, 1]` degrade gracefully
//! instead of failing.

/// `n!` for the small degrees used by Bezier patches.
#[must_use]
pub fn factorial(n: usize) -> u64 {
    (1..=n as u64).product()
}

/// Binomial coefficient `C(n, i)`; zero when `i > n`.
#[must_use]
pub fn binomial(n: usize, i: usize) -> u64 {
    if i > n {
        return 0;
    }
    factorial(n) / (factorial(i) * factorial(n - i))
}

/// Evaluates the Bernstein basis polynomial `B_i^n(t)`.
///
/// `t = 0` and `t = 1` need no special casing: `0^0` resolves to `1` through
/// `powi`, which yields exact corner interpolation.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn bernstein(i: usize, n: usize, t: f64) -> f64 {
    if i > n {
        return 0.0;
    }
    let a = t.powi(i as i32);
    let b = (1.0 - t).powi((n - i) as i32);
    binomial(n, i) as f64 * a * b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_and_binomial_small_values() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(3), 6);
        assert_eq!(binomial(3, 0), 1);
        assert_eq!(binomial(3, 1), 3);
        assert_eq!(binomial(3, 2), 3);
        assert_eq!(binomial(3, 3), 1);
        assert_eq!(binomial(2, 3), 0);
    }

    #[test]
    fn bernstein_partition_of_unity() {
        for n in 0..=5 {
            for step in 0..=20_u32 {
                let t = f64::from(step) / 20.0;
                let sum: f64 = (0..=n).map(|i| bernstein(i, n, t)).sum();
                assert!((sum - 1.0).abs() < 1e-12, "n={n} t={t} sum={sum}");
            }
        }
    }

    #[test]
    fn bernstein_endpoints_are_exact() {
        assert_eq!(bernstein(0, 3, 0.0), 1.0);
        assert_eq!(bernstein(1, 3, 0.0), 0.0);
        assert_eq!(bernstein(3, 3, 1.0), 1.0);
        assert_eq!(bernstein(2, 3, 1.0), 0.0);
        assert_eq!(bernstein(0, 0, 0.5), 1.0);
    }

    #[test]
    fn bernstein_outside_unit_interval_stays_finite() {
        let v = bernstein(1, 3, 1.5);
        assert!(v.is_finite());
        // 3 · 1.5 · (−0.5)² = 1.125
        assert!((v - 1.125).abs() < 1e-12);
        let sum: f64 = (0..=3).map(|i| bernstein(i, 3, -0.25)).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn bernstein_index_above_degree_is_zero() {
        assert_eq!(bernstein(4, 3, 0.5), 0.0);
    }
}
