//! # ql-methods
//!
//! Finite-difference methods for 1-D parabolic convection-diffusion PDEs.
//!
//! Translates `ql/methods/finitedifferences/` plus the `FDM/` and
//! `diffusion/` trees of the `marian` reference project — tridiagonal
//! operator algebra, the Thomas-algorithm solver, uniform/hyperbolic-sine
//! grid builders, Dirichlet boundary conditions, the explicit/implicit/
//! Crank-Nicolson time-integration schemes, and the Backward/Forward
//! Kolmogorov PDE assemblers built on top of them.
//!
//! # Modules
//!
//! * [`finite_differences`] — the FDM kernel described above

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Finite difference methods: tridiagonal operator algebra, solvers, grid
/// builders, boundary conditions, time-stepping schemes, and PDE assemblers.
pub mod finite_differences;

pub use finite_differences::{
    interp, normal_cdf, solve_backward, solve_backward_and_save, solve_forward,
    solve_forward_and_save, BoundaryCondition, CrankNicolsonScheme, ExplicitScheme, GridBuilder,
    HyperbolicSineGridBuilder, ImplicitScheme, LuSolver, Scheme, Side, Sink, TridiagonalOperator,
    TridiagonalSolver, UniformGridBuilder,
};
