//! Tridiagonal linear solvers (translates `FDM/tridiagonalSolver.hpp` and
//! `FDM/LUSolver.hpp/.cpp`).
//!
//! QuantLib's CRTP `DCTridiagonalSolver<T>` clone hierarchy is replaced by a
//! plain object-safe trait: a solver carries no per-call mutable state, so a
//! `Box<dyn TridiagonalSolver>` is shared freely by the schemes that own one.

use ql_core::errors::{Error, Result};
use ql_core::Real;

use super::operator::TridiagonalOperator;

/// Solves `A·x = w` for a tridiagonal `A`.
///
/// Corresponds to `marian::TridiagonalSolver`.
pub trait TridiagonalSolver: std::fmt::Debug + Send + Sync {
    /// Solve `a·x = w`, returning `x`.
    ///
    /// # Errors
    /// Returns [`Error::SizeMismatch`] if `w.len() != a.size()`, or
    /// [`Error::Numeric`] on a zero pivot.
    fn solve(&self, a: &TridiagonalOperator, w: &[Real]) -> Result<Vec<Real>>;
}

/// LU (Thomas algorithm) solver without pivoting.
///
/// Corresponds to `marian::LUSolver`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LuSolver;

impl LuSolver {
    /// Construct a new solver. Stateless; every call may reuse the same instance.
    pub fn new() -> Self {
        Self
    }
}

impl TridiagonalSolver for LuSolver {
    fn solve(&self, a: &TridiagonalOperator, w: &[Real]) -> Result<Vec<Real>> {
        let n = a.size();
        if w.len() != n {
            return Err(Error::SizeMismatch(format!(
                "solver expects a right-hand side of length {n}, got {}",
                w.len()
            )));
        }
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut ret = vec![0.0; n];
        let mut temp = vec![0.0; n];

        let mut bet = a.mid(0);
        if bet == 0.0 {
            return Err(Error::Numeric("zero pivot at row 0".to_string()));
        }
        ret[0] = w[0] / bet;

        for j in 1..n {
            temp[j] = a.upp(j - 1) / bet;
            bet = a.mid(j) - a.low(j - 1) * temp[j];
            if bet == 0.0 {
                return Err(Error::Numeric(format!("zero pivot at row {j}")));
            }
            ret[j] = (w[j] - a.low(j - 1) * ret[j - 1]) / bet;
        }

        for j in (0..n - 1).rev() {
            ret[j] -= temp[j + 1] * ret[j + 1];
        }

        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_identity() {
        let a = TridiagonalOperator::identity(4);
        let w = vec![1.0, 2.0, 3.0, 4.0];
        let x = LuSolver::new().solve(&a, &w).unwrap();
        assert_eq!(x, w);
    }

    #[test]
    fn solves_against_apply() {
        let a = TridiagonalOperator::d_plus_minus(6, 0.2);
        let x_expected = vec![1.0, -2.0, 3.0, 0.5, 1.5, -1.0];
        let w = a.apply(&x_expected).unwrap();
        let x = LuSolver::new().solve(&a, &w).unwrap();
        for (e, g) in x_expected.iter().zip(x) {
            assert!((e - g).abs() < 1e-9, "expected {e}, got {g}");
        }
    }

    #[test]
    fn zero_pivot_is_numeric_error() {
        let a = TridiagonalOperator::filled(3, 1.0, 0.0, 1.0);
        let w = vec![1.0, 1.0, 1.0];
        assert!(matches!(LuSolver::new().solve(&a, &w), Err(Error::Numeric(_))));
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let a = TridiagonalOperator::identity(4);
        assert!(matches!(
            LuSolver::new().solve(&a, &[1.0, 2.0]),
            Err(Error::SizeMismatch(_))
        ));
    }
}
