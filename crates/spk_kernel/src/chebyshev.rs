//! Chebyshev expansion evaluation for SPK segment records.
//!
//! Positions in Type 2 segments are stored as Chebyshev coefficients over
//! a normalised time `s` in `[-1, 1]`; velocities come from the expansion's
//! derivative. Evaluation uses the Clenshaw recurrence.

/// Evaluate `sum(c_k * T_k(s))` for coefficients `[c_0, ..., c_{n-1}]`.
pub fn clenshaw(coeffs: &[f64], s: f64) -> f64 {
    let n = coeffs.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return coeffs[0];
    }

    let two_s = 2.0 * s;
    let mut b_next = 0.0;
    let mut b_next2 = 0.0;

    for k in (1..n).rev() {
        let b = two_s * b_next - b_next2 + coeffs[k];
        b_next2 = b_next;
        b_next = b;
    }

    s * b_next - b_next2 + coeffs[0]
}

/// Evaluate `sum(c_k * T_k'(s))` for coefficients `[c_0, ..., c_{n-1}]`.
///
/// Uses the forward recurrence
/// `T_k'(s) = 2 T_{k-1}(s) + 2 s T_{k-1}'(s) - T_{k-2}'(s)`,
/// which needs the `T_k(s)` values alongside, computed via the standard
/// three-term recurrence.
pub fn clenshaw_derivative(coeffs: &[f64], s: f64) -> f64 {
    let n = coeffs.len();
    if n <= 1 {
        return 0.0;
    }

    let two_s = 2.0 * s;

    let mut t_prev2 = 1.0; // T_0
    let mut dt_prev2 = 0.0; // T_0'
    let mut t_prev1 = s; // T_1
    let mut dt_prev1 = 1.0; // T_1'

    let mut sum = coeffs[1];

    for &c in &coeffs[2..n] {
        let t = two_s * t_prev1 - t_prev2;
        let dt = 2.0 * t_prev1 + two_s * dt_prev1 - dt_prev2;

        sum += c * dt;

        t_prev2 = t_prev1;
        t_prev1 = t;
        dt_prev2 = dt_prev1;
        dt_prev1 = dt;
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-13;

    #[test]
    fn constant() {
        assert!((clenshaw(&[4.0], -0.3) - 4.0).abs() < EPS);
        assert!(clenshaw_derivative(&[4.0], -0.3).abs() < EPS);
    }

    #[test]
    fn linear() {
        // a*T_0 + b*T_1 = a + b*s, derivative b
        let s = 0.25;
        assert!((clenshaw(&[2.0, -3.0], s) - (2.0 - 3.0 * s)).abs() < EPS);
        assert!((clenshaw_derivative(&[2.0, -3.0], s) + 3.0).abs() < EPS);
    }

    #[test]
    fn quadratic() {
        // T_2(s) = 2s^2 - 1, T_2'(s) = 4s
        let (a, b, c) = (1.5, -2.0, 0.5);
        let s = -0.6;
        let expected = a + b * s + c * (2.0 * s * s - 1.0);
        assert!((clenshaw(&[a, b, c], s) - expected).abs() < EPS);
        let expected_d = b + c * 4.0 * s;
        assert!((clenshaw_derivative(&[a, b, c], s) - expected_d).abs() < EPS);
    }

    #[test]
    fn cubic() {
        // T_3(s) = 4s^3 - 3s, T_3'(s) = 12s^2 - 3
        let s = 0.8;
        let coeffs = [0.0, 0.0, 0.0, 2.0];
        let t3 = 4.0 * s * s * s - 3.0 * s;
        assert!((clenshaw(&coeffs, s) - 2.0 * t3).abs() < EPS);
        assert!((clenshaw_derivative(&coeffs, s) - 2.0 * (12.0 * s * s - 3.0)).abs() < EPS);
    }

    #[test]
    fn empty() {
        assert_eq!(clenshaw(&[], 0.1), 0.0);
        assert_eq!(clenshaw_derivative(&[], 0.1), 0.0);
    }

    #[test]
    fn endpoints() {
        // T_k(1) = 1, T_k(-1) = (-1)^k
        let coeffs = [1.0, 2.0, 3.0, 4.0];
        assert!((clenshaw(&coeffs, 1.0) - 10.0).abs() < EPS);
        assert!((clenshaw(&coeffs, -1.0) - (1.0 - 2.0 + 3.0 - 4.0)).abs() < EPS);
    }
}
