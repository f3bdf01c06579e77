//! Errors reported by the solvers

use thiserror::Error;

/// Errors reported by a single solver step
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    /// The equation set does not describe every dependent variable of the state
    #[error("{equations} equations cannot drive a state of length {state} (expected {state} - 1)")]
    DimensionMismatch {
        /// Number of equations supplied
        equations: usize,
        /// Length of the state vector (independent variable included)
        state: usize,
    },

    /// An equation produced NaN or an infinite derivative
    #[error("equation {equation} returned a non-finite derivative at stage {stage} (t = {t})")]
    NonFiniteDerivative {
        /// Index of the offending equation within the set
        equation: usize,
        /// Stage of the method at which it was evaluated
        stage: usize,
        /// Independent variable of the stage argument
        t: f64,
    },

    /// Step size, state, error ratio or controller settings are unusable
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the invalid input
        message: String,
    },
}

impl StepError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        StepError::InvalidInput {
            message: message.into(),
        }
    }
}
