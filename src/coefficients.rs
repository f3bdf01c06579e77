//! Butcher tableaus for the explicit Runge-Kutta methods in this crate
//!
//! Every method is stored the same way so a single stage engine can drive
//! all of them:
//!
//! - `C[s]`: node of stage `s`, as a fraction of `h` added to the
//!   independent variable
//! - `A[s][j]`: coupling of stage `s` to stage `j` (strictly lower
//!   triangular, upper part is zero)
//! - `B[s]`: weight of stage `s` in the propagated solution
//!
//! The Fehlberg 4(5) pair is taken from:
//! Fehlberg, E. (1969). "Low-order Classical Runge-Kutta Formulas with
//! Stepsize Control and their Application to some Heat Transfer Problems".
//! NASA TR R-315.

/// Number of stages of the explicit Euler method
pub const EULER_STAGES: usize = 1;

/// Euler node
pub const EULER_C: [f64; EULER_STAGES] = [0.0];

/// Euler coupling matrix (a single empty row)
pub const EULER_A: [[f64; EULER_STAGES]; EULER_STAGES] = [[0.0]];

/// Euler weight
pub const EULER_B: [f64; EULER_STAGES] = [1.0];

/// Number of stages of the classical Runge-Kutta method
pub const RK4_STAGES: usize = 4;

/// Classical Runge-Kutta nodes
pub const RK4_C: [f64; RK4_STAGES] = [0.0, 0.5, 0.5, 1.0];

/// Classical Runge-Kutta coupling matrix
pub const RK4_A: [[f64; RK4_STAGES]; RK4_STAGES] = [
    [0.0, 0.0, 0.0, 0.0],
    [0.5, 0.0, 0.0, 0.0],
    [0.0, 0.5, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
];

/// Classical Runge-Kutta weights
pub const RK4_B: [f64; RK4_STAGES] = [1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0];

/// Number of stages of the Fehlberg 4(5) pair
pub const RKF45_STAGES: usize = 6;

/// Order of the propagated solution
pub const RKF45_ORDER: u8 = 4;

/// Order of the embedded solution (used for error estimation only)
pub const RKF45_EMBEDDED_ORDER: u8 = 5;

/// Fehlberg nodes
pub const RKF45_C: [f64; RKF45_STAGES] = [
    0.0,         // c[0]
    1.0 / 4.0,   // c[1]
    3.0 / 8.0,   // c[2]
    12.0 / 13.0, // c[3]
    1.0,         // c[4]
    1.0 / 2.0,   // c[5]
];

/// Fehlberg coupling matrix
pub const RKF45_A: [[f64; RKF45_STAGES]; RKF45_STAGES] = [
    // Row 0: k_0 = f(t, y)
    [0.0; RKF45_STAGES],
    // Row 1
    [1.0 / 4.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    // Row 2
    [3.0 / 32.0, 9.0 / 32.0, 0.0, 0.0, 0.0, 0.0],
    // Row 3
    [1932.0 / 2197.0, -7200.0 / 2197.0, 7296.0 / 2197.0, 0.0, 0.0, 0.0],
    // Row 4
    [439.0 / 216.0, -8.0, 3680.0 / 513.0, -845.0 / 4104.0, 0.0, 0.0],
    // Row 5
    [-8.0 / 27.0, 2.0, -3544.0 / 2565.0, 1859.0 / 4104.0, -11.0 / 40.0, 0.0],
];

/// Weights of the 4th-order solution (the one returned to the caller)
///
/// Stages 1 and 5 do not contribute.
pub const RKF45_B4: [f64; RKF45_STAGES] = [
    25.0 / 216.0,
    0.0,
    1408.0 / 2565.0,
    2197.0 / 4104.0,
    -1.0 / 5.0,
    0.0,
];

/// Weights of the 5th-order solution
///
/// Stage 1 does not contribute.
pub const RKF45_B5: [f64; RKF45_STAGES] = [
    16.0 / 135.0,
    0.0,
    6656.0 / 12825.0,
    28561.0 / 56430.0,
    -9.0 / 50.0,
    2.0 / 55.0,
];

/// Error weights: B5[i] - B4[i]
///
/// `h * sum(B_ERR[i] * k_i)` is the signed difference `y5 - y4`.
pub const RKF45_B_ERR: [f64; RKF45_STAGES] = [
    1.0 / 360.0,
    0.0,
    -128.0 / 4275.0,
    -2197.0 / 75240.0,
    1.0 / 50.0,
    2.0 / 55.0,
];

#[cfg(test)]
mod tests {
    use super::*;

    // A handful of f64 terms accumulates ~O(n*eps) roundoff
    const TOL: f64 = 1e-14;

    fn row_sums_match<const S: usize>(a: &[[f64; S]; S], c: &[f64; S]) {
        for i in 0..S {
            let row_sum: f64 = a[i].iter().sum();
            assert!(
                (row_sum - c[i]).abs() < TOL,
                "Row {} sum = {}, expected c[{}] = {}",
                i,
                row_sum,
                i,
                c[i]
            );
        }
    }

    fn strictly_lower<const S: usize>(a: &[[f64; S]; S]) {
        for i in 0..S {
            for j in i..S {
                assert_eq!(a[i][j], 0.0, "A[{}][{}] must be zero", i, j);
            }
        }
    }

    #[test]
    fn test_row_sum_condition() {
        row_sums_match(&EULER_A, &EULER_C);
        row_sums_match(&RK4_A, &RK4_C);
        row_sums_match(&RKF45_A, &RKF45_C);
    }

    #[test]
    fn test_tableaus_are_explicit() {
        strictly_lower(&EULER_A);
        strictly_lower(&RK4_A);
        strictly_lower(&RKF45_A);
    }

    #[test]
    fn test_weights_sum_to_one() {
        for (name, sum) in [
            ("Euler", EULER_B.iter().sum::<f64>()),
            ("RK4", RK4_B.iter().sum::<f64>()),
            ("RKF45 order 4", RKF45_B4.iter().sum::<f64>()),
            ("RKF45 order 5", RKF45_B5.iter().sum::<f64>()),
        ] {
            assert!((sum - 1.0).abs() < TOL, "{} weights sum to {}", name, sum);
        }
    }

    #[test]
    fn test_error_weights_match_difference() {
        for i in 0..RKF45_STAGES {
            let diff = RKF45_B5[i] - RKF45_B4[i];
            assert!(
                (RKF45_B_ERR[i] - diff).abs() < TOL,
                "B_ERR[{}] = {}, expected {}",
                i,
                RKF45_B_ERR[i],
                diff
            );
        }
        let err_sum: f64 = RKF45_B_ERR.iter().sum();
        assert!(err_sum.abs() < TOL, "Error weights sum to {}", err_sum);
    }

    #[test]
    fn test_fehlberg_order_conditions() {
        // A method of order p integrates t^(q-1) exactly for q <= p:
        // sum b_i c_i^(q-1) = 1/q
        for (b, order) in [(&RKF45_B4, RKF45_ORDER), (&RKF45_B5, RKF45_EMBEDDED_ORDER)] {
            for q in 1..=i32::from(order) {
                let sum: f64 = b
                    .iter()
                    .zip(RKF45_C.iter())
                    .map(|(bi, ci)| bi * ci.powi(q - 1))
                    .sum();
                let expected = 1.0 / f64::from(q);
                assert!(
                    (sum - expected).abs() < TOL,
                    "order {}: sum b c^{} = {}, expected {}",
                    order,
                    q - 1,
                    sum,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_specific_coefficients() {
        assert!((RKF45_C[3] - 12.0 / 13.0).abs() < TOL);
        assert!((RKF45_A[3][1] + 7200.0 / 2197.0).abs() < TOL);
        assert_eq!(RKF45_A[4][1], -8.0);
        assert_eq!(RKF45_A[5][1], 2.0);
        assert!((RKF45_B4[4] + 0.2).abs() < TOL);
        assert!((RKF45_B5[5] - 2.0 / 55.0).abs() < TOL);
        assert_eq!(RKF45_B4[1], 0.0);
        assert_eq!(RKF45_B5[1], 0.0);
    }
}
