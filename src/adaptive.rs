//! Runge-Kutta-Fehlberg 4(5) with step-size recommendation
//!
//! Six stages feed two solutions: the 4th-order `y4`, which is returned,
//! and the 5th-order `y5`, which only serves to estimate the local error.
//! From the discrepancy the solver recommends the step size for the caller's
//! next invocation:
//!
//! ```text
//! ratio_i = (|y_i| + |h * k0_i|) / |y5_i - y4_i|
//! h_next  = safety * (min_i(ratio_i) * error_ratio)^exponent * h
//! ```
//!
//! The solver never loops or rejects steps on its own. Retrying with a
//! smaller `h` is left to the caller.

use crate::coefficients::{RKF45_A, RKF45_B4, RKF45_B5, RKF45_C, RKF45_ORDER, RKF45_STAGES};
use crate::equations::EquationSet;
use crate::error::StepError;
use crate::stages::{combine, evaluate_stages, validate_step};

/// Step-size controller for the Fehlberg pair
///
/// h_next = safety * (ratio * error_ratio)^exponent * h
///
/// The defaults reproduce the classical update exactly. Factor and magnitude
/// clamps are disabled until set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StepController {
    /// Safety factor (0.9)
    pub safety: f64,
    /// Exponent applied to the scaled ratio, 1/(order + 1) = 1/5
    pub exponent: f64,
    /// Upper bound on the limiting ratio; also used when no component
    /// reports any error
    pub ratio_ceiling: f64,
    /// Minimum factor `h_next / h`
    pub min_factor: f64,
    /// Maximum factor `h_next / h`
    pub max_factor: f64,
    /// Minimum magnitude of `h_next`
    pub h_min: f64,
    /// Maximum magnitude of `h_next`
    pub h_max: f64,
}

impl Default for StepController {
    fn default() -> Self {
        Self {
            safety: 0.9,
            exponent: 1.0 / f64::from(RKF45_ORDER + 1),
            ratio_ceiling: 1e5,
            min_factor: 0.0,
            max_factor: f64::INFINITY,
            h_min: 0.0,
            h_max: f64::INFINITY,
        }
    }
}

impl StepController {
    /// Bound the growth factor `h_next / h` to `[min_factor, max_factor]`
    pub fn with_factor_limits(mut self, min_factor: f64, max_factor: f64) -> Self {
        self.min_factor = min_factor;
        self.max_factor = max_factor;
        self
    }

    /// Bound the magnitude of the recommended step to `[h_min, h_max]`
    pub fn with_step_limits(mut self, h_min: f64, h_max: f64) -> Self {
        self.h_min = h_min;
        self.h_max = h_max;
        self
    }

    /// Replace the ratio ceiling
    pub fn with_ratio_ceiling(mut self, ratio_ceiling: f64) -> Self {
        self.ratio_ceiling = ratio_ceiling;
        self
    }

    /// Check that the settings describe a usable controller
    pub fn validate(&self) -> Result<(), StepError> {
        if !self.safety.is_finite() || self.safety <= 0.0 {
            return Err(StepError::invalid("safety must be positive and finite"));
        }
        if !self.exponent.is_finite() || self.exponent <= 0.0 {
            return Err(StepError::invalid("exponent must be positive and finite"));
        }
        if !self.ratio_ceiling.is_finite() || self.ratio_ceiling <= 0.0 {
            return Err(StepError::invalid(
                "ratio_ceiling must be positive and finite",
            ));
        }
        if self.min_factor.is_nan() || self.min_factor < 0.0 || self.max_factor.is_nan() {
            return Err(StepError::invalid("factor limits must be non-negative"));
        }
        if !self.min_factor.is_finite() {
            return Err(StepError::invalid("min_factor must be finite"));
        }
        if self.min_factor > self.max_factor {
            return Err(StepError::invalid(format!(
                "min_factor {} exceeds max_factor {}",
                self.min_factor, self.max_factor
            )));
        }
        if self.h_min.is_nan() || self.h_min < 0.0 || self.h_max.is_nan() {
            return Err(StepError::invalid("step limits must be non-negative"));
        }
        if !self.h_min.is_finite() {
            return Err(StepError::invalid("h_min must be finite"));
        }
        if self.h_min > self.h_max {
            return Err(StepError::invalid(format!(
                "h_min {} exceeds h_max {}",
                self.h_min, self.h_max
            )));
        }
        Ok(())
    }

    /// Growth factor for a limiting ratio and the caller's error ratio
    ///
    /// Saturates at `f64::MAX` when the product overflows.
    pub fn compute_factor(&self, ratio: f64, error_ratio: f64) -> f64 {
        let factor = self.safety * (ratio * error_ratio).powf(self.exponent);
        factor
            .min(f64::MAX)
            .max(self.min_factor)
            .min(self.max_factor)
    }

    /// Recommended next step, keeping the sign of `h`
    ///
    /// The magnitude never exceeds `f64::MAX`, so the result is finite.
    pub fn next_step(&self, h: f64, factor: f64) -> f64 {
        let magnitude = (h * factor)
            .abs()
            .min(f64::MAX)
            .max(self.h_min)
            .min(self.h_max);
        if h < 0.0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Result of a single Runge-Kutta-Fehlberg step
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveStep<const N: usize> {
    /// New state (4th-order solution); `state[0]` is the input's plus `h`
    pub state: [f64; N],
    /// Recommended step size for the next call
    pub h_next: f64,
    /// Largest component of `|y5 - y4|`
    pub error: f64,
    /// Limiting ratio that drove `h_next`, after the ceiling
    pub limiting_ratio: f64,
}

/// Runge-Kutta-Fehlberg 4(5) solver
///
/// # Example
/// ```
/// use odestep::{RungeKuttaFehlberg, StepController};
///
/// // dy/dt = -y from (t, y) = (0, 1)
/// let eqs = [|s: &[f64; 2]| -s[1]];
/// let solver = RungeKuttaFehlberg::new(StepController::default().with_factor_limits(0.1, 4.0));
///
/// let step = solver.step(&eqs, &[0.0, 1.0], 0.1, 1.0).unwrap();
/// assert!((step.state[1] - (-0.1f64).exp()).abs() < 1e-7);
/// assert!(step.h_next <= 0.4 + 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RungeKuttaFehlberg {
    controller: StepController,
}

impl RungeKuttaFehlberg {
    /// Number of equation-set evaluations per step
    pub const STAGES: usize = RKF45_STAGES;

    /// Create a solver with the given controller
    pub fn new(controller: StepController) -> Self {
        Self { controller }
    }

    /// Controller used for the step-size recommendation
    pub fn controller(&self) -> &StepController {
        &self.controller
    }

    /// Perform one step of size `h`
    ///
    /// `error_ratio` is the caller's tolerance target; larger values permit
    /// larger recommended steps. It must be positive and finite.
    pub fn step<E, const N: usize>(
        &self,
        equations: &E,
        state: &[f64; N],
        h: f64,
        error_ratio: f64,
    ) -> Result<AdaptiveStep<N>, StepError>
    where
        E: EquationSet<N> + ?Sized,
    {
        let result = self.try_step(equations, state, h, error_ratio);
        match &result {
            Ok(step) => log::trace!(
                "runge_kutta_fehlberg step: t = {}, h = {}, error = {:e}, h_next = {}",
                state[0],
                h,
                step.error,
                step.h_next
            ),
            Err(e) => log::debug!("runge_kutta_fehlberg step rejected: {}", e),
        }
        result
    }

    fn try_step<E, const N: usize>(
        &self,
        equations: &E,
        state: &[f64; N],
        h: f64,
        error_ratio: f64,
    ) -> Result<AdaptiveStep<N>, StepError>
    where
        E: EquationSet<N> + ?Sized,
    {
        validate_step(equations, state, h)?;
        if !error_ratio.is_finite() || error_ratio <= 0.0 {
            return Err(StepError::invalid(format!(
                "error_ratio = {} must be positive and finite",
                error_ratio
            )));
        }
        self.controller.validate()?;

        let k = evaluate_stages(equations, state, h, &RKF45_C, &RKF45_A)?;
        let y4 = combine(state, h, &k, &RKF45_B4);
        let y5 = combine(state, h, &k, &RKF45_B5);

        let (error, limiting_ratio) = self.limiting_ratio(state, h, &k[0], &y4, &y5);
        let factor = self.controller.compute_factor(limiting_ratio, error_ratio);

        Ok(AdaptiveStep {
            state: y4,
            h_next: self.controller.next_step(h, factor),
            error,
            limiting_ratio,
        })
    }

    /// Largest discrepancy and the most error-sensitive scale ratio
    ///
    /// Components whose two estimates agree exactly carry no error
    /// information and are skipped; if all are skipped the ceiling applies.
    fn limiting_ratio<const N: usize>(
        &self,
        state: &[f64; N],
        h: f64,
        k0: &[f64; N],
        y4: &[f64; N],
        y5: &[f64; N],
    ) -> (f64, f64) {
        let ceiling = self.controller.ratio_ceiling;
        let mut error: f64 = 0.0;
        let mut ratio = ceiling;

        for i in 1..N {
            let diff = (y5[i] - y4[i]).abs();
            if diff == 0.0 {
                continue;
            }
            error = error.max(diff);
            let scale = state[i].abs() + (h * k0[i]).abs();
            ratio = ratio.min(scale / diff);
        }

        if error == 0.0 {
            log::debug!(
                "no component reported a local error; limiting ratio pinned at {}",
                ceiling
            );
        }
        (error, ratio)
    }
}

/// Advance `state` by one Runge-Kutta-Fehlberg step with the default controller
///
/// Returns the 4th-order state together with the recommended next step.
pub fn runge_kutta_fehlberg<E, const N: usize>(
    equations: &E,
    state: &[f64; N],
    h: f64,
    error_ratio: f64,
) -> Result<AdaptiveStep<N>, StepError>
where
    E: EquationSet<N> + ?Sized,
{
    RungeKuttaFehlberg::default().step(equations, state, h, error_ratio)
}
