//! Stage evaluation shared by every explicit tableau
//!
//! Stage `s` evaluates the equations at
//! `t + c[s]*h, y + h * sum_{j<s} a[s][j] * k[j]`, always rebuilt from the
//! input state. `k[s][i]` holds the derivative of component `i`; column 0
//! (the independent variable) is left at zero.

use crate::equations::{check_dimensions, EquationSet};
use crate::error::StepError;

/// Validate everything a step needs before touching the equations
pub(crate) fn validate_step<E, const N: usize>(
    equations: &E,
    state: &[f64; N],
    h: f64,
) -> Result<(), StepError>
where
    E: EquationSet<N> + ?Sized,
{
    check_dimensions(equations)?;
    if !h.is_finite() {
        return Err(StepError::invalid(format!("h = {} must be finite", h)));
    }
    for (i, &val) in state.iter().enumerate() {
        if !val.is_finite() {
            return Err(StepError::invalid(format!("state[{}] is not finite", i)));
        }
    }
    Ok(())
}

/// Evaluate all `S` stages of a tableau
#[allow(clippy::needless_range_loop)]
pub(crate) fn evaluate_stages<E, const N: usize, const S: usize>(
    equations: &E,
    state: &[f64; N],
    h: f64,
    c: &[f64; S],
    a: &[[f64; S]; S],
) -> Result<[[f64; N]; S], StepError>
where
    E: EquationSet<N> + ?Sized,
{
    let mut k = [[0.0; N]; S];
    let mut argument = *state;

    for s in 0..S {
        argument[0] = state[0] + c[s] * h;
        for i in 1..N {
            let mut sum = 0.0;
            for j in 0..s {
                sum += a[s][j] * k[j][i];
            }
            argument[i] = state[i] + h * sum;
        }

        for i in 1..N {
            let derivative = equations.derivative(i - 1, &argument);
            if !derivative.is_finite() {
                return Err(StepError::NonFiniteDerivative {
                    equation: i - 1,
                    stage: s,
                    t: argument[0],
                });
            }
            k[s][i] = derivative;
        }
    }

    Ok(k)
}

/// Combine stages with `weights`; the independent variable advances by exactly `h`
#[allow(clippy::needless_range_loop)]
pub(crate) fn combine<const N: usize, const S: usize>(
    state: &[f64; N],
    h: f64,
    k: &[[f64; N]; S],
    weights: &[f64; S],
) -> [f64; N] {
    let mut next = *state;
    if let Some(t) = next.first_mut() {
        *t += h;
    }
    for i in 1..N {
        let mut sum = 0.0;
        for s in 0..S {
            sum += weights[s] * k[s][i];
        }
        next[i] = state[i] + h * sum;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::{RK4_A, RK4_C};

    #[test]
    fn test_stage_arguments_restart_from_input() {
        // Record every argument the equation is evaluated at
        use std::cell::RefCell;
        let seen = RefCell::new(Vec::new());
        let eqs = [|s: &[f64; 2]| {
            seen.borrow_mut().push(*s);
            1.0
        }];

        let k = evaluate_stages(&eqs, &[1.0, 10.0], 0.2, &RK4_C, &RK4_A).unwrap();
        let seen = seen.into_inner();

        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], [1.0, 10.0]);
        assert!((seen[1][0] - 1.1).abs() < 1e-15);
        assert!((seen[1][1] - 10.1).abs() < 1e-15);
        // Stage 2 reuses the half-step offset, perturbed from the input
        assert!((seen[2][0] - 1.1).abs() < 1e-15);
        assert!((seen[2][1] - 10.1).abs() < 1e-15);
        assert!((seen[3][0] - 1.2).abs() < 1e-15);
        assert!((seen[3][1] - 10.2).abs() < 1e-15);
        for stage in k.iter() {
            assert_eq!(stage[0], 0.0);
            assert_eq!(stage[1], 1.0);
        }
    }

    #[test]
    fn test_non_finite_derivative_reports_stage() {
        // Finite at the input, blows up once t moves
        let eqs = [|s: &[f64; 2]| if s[0] > 0.0 { f64::NAN } else { 1.0 }];
        let err = evaluate_stages(&eqs, &[0.0, 0.0], 0.5, &RK4_C, &RK4_A).unwrap_err();
        assert_eq!(
            err,
            StepError::NonFiniteDerivative {
                equation: 0,
                stage: 1,
                t: 0.25
            }
        );
    }

    #[test]
    fn test_combine_advances_time_exactly() {
        let k = [[0.0, 2.0, -1.0]];
        let next = combine(&[3.0, 1.0, 1.0], 0.5, &k, &[1.0]);
        assert_eq!(next, [3.5, 2.0, 0.5]);
    }

    #[test]
    fn test_validate_step() {
        let eqs = [|s: &[f64; 2]| s[1]];
        assert!(validate_step(&eqs, &[0.0, 1.0], 0.1).is_ok());
        assert!(matches!(
            validate_step(&eqs, &[0.0, 1.0], f64::NAN),
            Err(StepError::InvalidInput { .. })
        ));
        assert!(matches!(
            validate_step(&eqs, &[f64::INFINITY, 1.0], 0.1),
            Err(StepError::InvalidInput { .. })
        ));
    }
}
