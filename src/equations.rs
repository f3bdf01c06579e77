//! Equation sets: the right-hand sides driven by every solver
//!
//! A state vector `[f64; N]` holds the independent variable at index 0 and
//! the dependent variables at `1..N`. An equation set supplies one
//! derivative function per dependent variable, so it always has `N - 1`
//! entries. Equation `i` returns `d(state[i + 1]) / d(state[0])`.

use crate::error::StepError;

/// Ordered set of derivative functions over a state of length `N`
///
/// Implemented for arrays, slices and vectors of closures or function
/// pointers. Implement it directly on your own type when the equations share
/// parameters:
///
/// ```
/// use odestep::EquationSet;
///
/// // y'' + ω²y = 0 as [t, y, y']
/// struct HarmonicOscillator {
///     omega: f64,
/// }
///
/// impl EquationSet<3> for HarmonicOscillator {
///     fn len(&self) -> usize {
///         2
///     }
///
///     fn derivative(&self, index: usize, state: &[f64; 3]) -> f64 {
///         match index {
///             0 => state[2],
///             _ => -self.omega * self.omega * state[1],
///         }
///     }
/// }
/// ```
///
/// Equations are evaluated several times per step at perturbed states and
/// must be free of side effects.
pub trait EquationSet<const N: usize> {
    /// Number of equations in the set
    fn len(&self) -> usize;

    /// Whether the set holds no equations
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate equation `index` at `state`
    ///
    /// Only called with `index < self.len()`.
    fn derivative(&self, index: usize, state: &[f64; N]) -> f64;
}

impl<F, const N: usize, const M: usize> EquationSet<N> for [F; M]
where
    F: Fn(&[f64; N]) -> f64,
{
    fn len(&self) -> usize {
        M
    }

    fn derivative(&self, index: usize, state: &[f64; N]) -> f64 {
        self[index](state)
    }
}

impl<F, const N: usize> EquationSet<N> for [F]
where
    F: Fn(&[f64; N]) -> f64,
{
    fn len(&self) -> usize {
        <[F]>::len(self)
    }

    fn derivative(&self, index: usize, state: &[f64; N]) -> f64 {
        self[index](state)
    }
}

impl<F, const N: usize> EquationSet<N> for Vec<F>
where
    F: Fn(&[f64; N]) -> f64,
{
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn derivative(&self, index: usize, state: &[f64; N]) -> f64 {
        self[index](state)
    }
}

impl<E, const N: usize> EquationSet<N> for &E
where
    E: EquationSet<N> + ?Sized,
{
    fn len(&self) -> usize {
        (**self).len()
    }

    fn derivative(&self, index: usize, state: &[f64; N]) -> f64 {
        (**self).derivative(index, state)
    }
}

/// Check the sizing contract `state length == equation count + 1`
pub fn check_dimensions<E, const N: usize>(equations: &E) -> Result<(), StepError>
where
    E: EquationSet<N> + ?Sized,
{
    let count = equations.len();
    if N.checked_sub(1) != Some(count) {
        return Err(StepError::DimensionMismatch {
            equations: count,
            state: N,
        });
    }
    Ok(())
}
