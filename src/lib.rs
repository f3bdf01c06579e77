//! # odestep: single-step ODE solvers
//!
//! Explicit Euler, classical Runge-Kutta and Runge-Kutta-Fehlberg 4(5)
//! steppers for systems of first-order ordinary differential equations.
//!
//! ## Features
//!
//! - One call advances one step; the caller owns the integration loop
//! - Fixed-size state vectors `[f64; N]`, checked against the equation set
//!   at every call
//! - 6-stage embedded RK4(5) pair with a recommended next step size
//! - No allocation, no shared state: safe to call from many threads
//!
//! ## State convention
//!
//! Index 0 of the state holds the independent variable (usually time).
//! Indices `1..N` hold the dependent variables. The equation set supplies
//! `N - 1` derivative functions, equation `i` driving `state[i + 1]`.
//! Every solver returns a new state whose index 0 is `state[0] + h`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use odestep::{classical_runge_kutta, euler, runge_kutta_fehlberg};
//!
//! // Harmonic oscillator y'' = -y as [t, y, v]
//! let eqs: [fn(&[f64; 3]) -> f64; 2] = [|s| s[2], |s| -s[1]];
//! let state = [0.0, 1.0, 0.0];
//!
//! let coarse = euler(&eqs, &state, 0.1).unwrap();
//! let fine = classical_runge_kutta(&eqs, &state, 0.1).unwrap();
//! assert!((fine[1] - 0.1f64.cos()).abs() < 1e-7);
//! assert!((coarse[1] - 1.0).abs() < 1e-15);
//!
//! // The adaptive solver also recommends the next step size
//! let step = runge_kutta_fehlberg(&eqs, &state, 0.1, 1.0).unwrap();
//! assert_eq!(step.state[0], 0.1);
//! assert!(step.h_next > 0.0);
//! ```
//!
//! ## Driving the adaptive solver
//!
//! ```rust
//! use odestep::{RungeKuttaFehlberg, StepController};
//!
//! let eqs = [|s: &[f64; 2]| -s[1]];
//! let solver = RungeKuttaFehlberg::new(StepController::default().with_factor_limits(0.2, 5.0));
//!
//! let (mut state, mut h) = ([0.0, 1.0], 0.01_f64);
//! while state[0] < 1.0 {
//!     let step = solver.step(&eqs, &state, h.min(1.0 - state[0]), 1e-4).unwrap();
//!     state = step.state;
//!     h = step.h_next;
//! }
//! assert!((state[1] - (-1.0f64).exp()).abs() < 1e-5);
//! ```
//!
//! ## Step-size recommendation
//!
//! For each dependent variable the Fehlberg step forms
//! `(|y_i| + |h k0_i|) / |y5_i - y4_i|`; the smallest of these ratios,
//! capped at [`StepController::ratio_ceiling`], sets
//! `h_next = 0.9 (ratio * error_ratio)^(1/5) h`. Components whose two
//! estimates agree exactly are skipped, so a problem without any local
//! error (e.g. `dy/dt = 0`) receives the ceiling rather than a division by
//! zero.
//!
//! `error_ratio` acts as a relative tolerance: steps settle where
//! `|y5 - y4|` is about `error_ratio / 1.7` of the component's scale. With the
//! default ceiling of `1e5` an `error_ratio` below roughly `1.7e-5` shrinks
//! every step, however small the observed error; raise the ceiling for
//! tighter tolerances.
//!
//! ## Logging
//!
//! Steps are traced through the [`log`] facade at `trace` level; rejected
//! steps and error-free estimates are reported at `debug`.
//!
//! ## References
//!
//! 1. Fehlberg, E. (1969). "Low-order Classical Runge-Kutta Formulas with
//!    Stepsize Control and their Application to some Heat Transfer
//!    Problems". NASA TR R-315.
//!
//! 2. Hairer, E., Nørsett, S.P., & Wanner, G. (1993). "Solving
//!    Ordinary Differential Equations I: Nonstiff Problems".
//!    Springer.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod adaptive;
pub mod coefficients;
pub mod equations;
pub mod error;
pub mod fixed;
mod stages;

pub use adaptive::{runge_kutta_fehlberg, AdaptiveStep, RungeKuttaFehlberg, StepController};
pub use equations::{check_dimensions, EquationSet};
pub use error::StepError;
pub use fixed::{classical_runge_kutta, euler, ClassicalRungeKutta, Euler, FixedStepper};
