//! Fixed-step solvers: explicit Euler and classical Runge-Kutta
//!
//! Both take the step size as given and return the advanced state. Neither
//! estimates its own error; pick [`crate::RungeKuttaFehlberg`] when the step
//! size should adapt.

use crate::coefficients::{EULER_A, EULER_B, EULER_C, RK4_A, RK4_B, RK4_C};
use crate::coefficients::{EULER_STAGES, RK4_STAGES};
use crate::equations::EquationSet;
use crate::error::StepError;
use crate::stages::{combine, evaluate_stages, validate_step};

/// A one-step method with a fixed step size
///
/// Implementors are interchangeable: every one reads the same state layout
/// (independent variable at index 0) and returns a new state whose index 0
/// is `state[0] + h`.
pub trait FixedStepper<const N: usize> {
    /// Number of equation-set evaluations per step
    const STAGES: usize;

    /// Human-readable method name
    fn name(&self) -> &'static str;

    /// Advance `state` by one step of size `h`
    fn step<E>(&self, equations: &E, state: &[f64; N], h: f64) -> Result<[f64; N], StepError>
    where
        E: EquationSet<N> + ?Sized;
}

/// Explicit (forward) Euler method, first order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl<const N: usize> FixedStepper<N> for Euler {
    const STAGES: usize = EULER_STAGES;

    fn name(&self) -> &'static str {
        "euler"
    }

    fn step<E>(&self, equations: &E, state: &[f64; N], h: f64) -> Result<[f64; N], StepError>
    where
        E: EquationSet<N> + ?Sized,
    {
        let method = <Self as FixedStepper<N>>::name(self);
        fixed_step(method, equations, state, h, &EULER_C, &EULER_A, &EULER_B)
    }
}

/// Classical four-stage Runge-Kutta method, fourth order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassicalRungeKutta;

impl<const N: usize> FixedStepper<N> for ClassicalRungeKutta {
    const STAGES: usize = RK4_STAGES;

    fn name(&self) -> &'static str {
        "classical_runge_kutta"
    }

    fn step<E>(&self, equations: &E, state: &[f64; N], h: f64) -> Result<[f64; N], StepError>
    where
        E: EquationSet<N> + ?Sized,
    {
        let method = <Self as FixedStepper<N>>::name(self);
        fixed_step(method, equations, state, h, &RK4_C, &RK4_A, &RK4_B)
    }
}

fn fixed_step<E, const N: usize, const S: usize>(
    method: &str,
    equations: &E,
    state: &[f64; N],
    h: f64,
    c: &[f64; S],
    a: &[[f64; S]; S],
    b: &[f64; S],
) -> Result<[f64; N], StepError>
where
    E: EquationSet<N> + ?Sized,
{
    let result = validate_step(equations, state, h)
        .and_then(|()| evaluate_stages(equations, state, h, c, a))
        .map(|k| combine(state, h, &k, b));

    match &result {
        Ok(_) => log::trace!("{} step: t = {}, h = {}", method, state[0], h),
        Err(e) => log::debug!("{} step rejected: {}", method, e),
    }
    result
}

/// Advance `state` by one explicit Euler step
///
/// Each dependent component moves by `h` times its derivative at the input
/// state.
pub fn euler<E, const N: usize>(
    equations: &E,
    state: &[f64; N],
    h: f64,
) -> Result<[f64; N], StepError>
where
    E: EquationSet<N> + ?Sized,
{
    Euler.step(equations, state, h)
}

/// Advance `state` by one classical Runge-Kutta step
///
/// # Example
/// ```
/// use odestep::classical_runge_kutta;
///
/// // dy/dt = -y from (t, y) = (0, 1)
/// let eqs = [|s: &[f64; 2]| -s[1]];
/// let next = classical_runge_kutta(&eqs, &[0.0, 1.0], 0.1).unwrap();
///
/// assert_eq!(next[0], 0.1);
/// assert!((next[1] - (-0.1f64).exp()).abs() < 1e-7);
/// ```
pub fn classical_runge_kutta<E, const N: usize>(
    equations: &E,
    state: &[f64; N],
    h: f64,
) -> Result<[f64; N], StepError>
where
    E: EquationSet<N> + ?Sized,
{
    ClassicalRungeKutta.step(equations, state, h)
}
