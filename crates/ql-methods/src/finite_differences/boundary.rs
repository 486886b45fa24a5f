//! Boundary condition hooks (translates
//! `FDM/boundaryConditions/boundaryCondition.hpp` and
//! `dirichletBoundaryCondition.hpp`).
//!
//! QuantLib's `BoundaryCondition` is a CRTP class with four virtual hooks
//! called around each explicit/implicit half-step. The C++ `DCBoundaryCondition<T>`
//! clone machinery is unnecessary here: a boundary condition is immutable
//! data (a side plus a time-dependent value function), so an `Arc<dyn Fn>`
//! is `Clone` for free and safely shared across threads.

use std::sync::Arc;

use ql_core::Real;

use super::operator::TridiagonalOperator;

/// Which end of the grid a boundary condition applies to.
///
/// Corresponds to `marian::BCSide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The low-index (spatial minimum) end of the grid.
    Low,
    /// The high-index (spatial maximum) end of the grid.
    Upp,
}

/// A boundary condition applied at one end of the grid.
///
/// Corresponds to `marian::BoundaryCondition` / `marian::DirichletBoundaryCondition`.
#[derive(Clone)]
pub enum BoundaryCondition {
    /// Fix the solution value at `side` to `value(t)` at every time step.
    Dirichlet {
        /// Which end of the grid this condition governs.
        side: Side,
        /// The prescribed boundary value as a function of time.
        value: Arc<dyn Fn(Real) -> Real + Send + Sync>,
    },
    /// No boundary adjustment; the operator's own stencil row stands.
    Free,
}

impl std::fmt::Debug for BoundaryCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryCondition::Dirichlet { side, .. } => {
                f.debug_struct("Dirichlet").field("side", side).finish()
            }
            BoundaryCondition::Free => write!(f, "Free"),
        }
    }
}

impl BoundaryCondition {
    /// Construct a Dirichlet condition pinning `side` to the constant `value`.
    pub fn dirichlet_constant(side: Side, value: Real) -> Self {
        BoundaryCondition::Dirichlet {
            side,
            value: Arc::new(move |_t| value),
        }
    }

    /// Construct a Dirichlet condition pinning `side` to a time-varying value.
    pub fn dirichlet(side: Side, value: Arc<dyn Fn(Real) -> Real + Send + Sync>) -> Self {
        BoundaryCondition::Dirichlet { side, value }
    }

    /// Rewrite `operator`'s boundary row(s) before an explicit half-step.
    pub fn before_explicit_step(&self, operator: &mut TridiagonalOperator) {
        if let BoundaryCondition::Dirichlet { side, .. } = self {
            match side {
                Side::Low => operator.set_first_row(1.0, 0.0),
                Side::Upp => operator.set_last_row(0.0, 1.0),
            }
        }
    }

    /// Overwrite `f`'s boundary entry after an explicit half-step.
    pub fn after_explicit_step(&self, f: &mut [Real], t: Real) {
        if let BoundaryCondition::Dirichlet { side, value } = self {
            match side {
                Side::Low => f[0] = value(t),
                Side::Upp => {
                    let last = f.len() - 1;
                    f[last] = value(t);
                }
            }
        }
    }

    /// Rewrite `operator`'s boundary row and `rhs`'s boundary entry before an
    /// implicit solve.
    pub fn before_implicit_step(&self, operator: &mut TridiagonalOperator, rhs: &mut [Real], t: Real) {
        if let BoundaryCondition::Dirichlet { side, value } = self {
            match side {
                Side::Low => {
                    operator.set_first_row(1.0, 0.0);
                    rhs[0] = value(t);
                }
                Side::Upp => {
                    operator.set_last_row(0.0, 1.0);
                    let last = rhs.len() - 1;
                    rhs[last] = value(t);
                }
            }
        }
    }

    /// Hook called after an implicit solve. No-op for every current side
    /// (matches the original, which leaves this hook empty).
    pub fn after_implicit_step(&self, _f: &mut [Real], _t: Real) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirichlet_pins_explicit_boundary_values() {
        let bc_low = BoundaryCondition::dirichlet_constant(Side::Low, 1.0);
        let bc_upp = BoundaryCondition::dirichlet_constant(Side::Upp, 2.0);
        let mut f = vec![0.0, 5.0, 5.0, 0.0];
        bc_low.after_explicit_step(&mut f, 0.0);
        bc_upp.after_explicit_step(&mut f, 0.0);
        assert_eq!(f[0], 1.0);
        assert_eq!(f[3], 2.0);
    }

    #[test]
    fn dirichlet_rewrites_operator_rows() {
        let bc = BoundaryCondition::dirichlet_constant(Side::Low, 0.0);
        let mut op = TridiagonalOperator::d_plus_minus(5, 0.1);
        op.set_first_row(99.0, 99.0);
        bc.before_explicit_step(&mut op);
        assert_eq!(op.mid(0), 1.0);
        assert_eq!(op.upp(0), 0.0);
    }

    #[test]
    fn free_condition_leaves_operator_and_vector_untouched() {
        let bc = BoundaryCondition::Free;
        let mut op = TridiagonalOperator::d_plus_minus(5, 0.1);
        let before = op.clone();
        bc.before_explicit_step(&mut op);
        assert_eq!(op, before);
        let mut f = vec![1.0, 2.0, 3.0];
        bc.after_explicit_step(&mut f, 0.0);
        assert_eq!(f, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn time_varying_value_is_sampled_at_t() {
        let bc = BoundaryCondition::dirichlet(Side::Low, Arc::new(|t: Real| 2.0 * t));
        let mut f = vec![0.0, 1.0];
        bc.after_explicit_step(&mut f, 3.0);
        assert_eq!(f[0], 6.0);
    }
}
