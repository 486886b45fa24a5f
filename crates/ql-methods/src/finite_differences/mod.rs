//! Finite-difference solvers for 1-D parabolic convection-diffusion PDEs
//! (translates `FDM/` and `diffusion/` from the `marian` reference project).
//!
//! The kernel is a small stack of composable pieces: a [`TridiagonalOperator`]
//! built by named factories (`D+`, `D-`, `D0`, `D+-`, `I`), a
//! [`TridiagonalSolver`] (the Thomas algorithm), a [`GridBuilder`] to lay out
//! the spatial mesh, a [`BoundaryCondition`] hook applied around every half
//! step, and a [`Scheme`] that ties them together for one time level. The
//! `kolmogorov` module assembles the spatial operator for the backward
//! (pricing) and forward (density) equations from a
//! [`ql_processes::ConvectionDiffusion`].

pub mod boundary;
pub mod grid;
pub mod kolmogorov;
pub mod math_utils;
pub mod operator;
pub mod scheme;
pub mod solver;

pub use boundary::{BoundaryCondition, Side};
pub use grid::{GridBuilder, HyperbolicSineGridBuilder, UniformGridBuilder};
pub use kolmogorov::{solve_backward, solve_backward_and_save, solve_forward, solve_forward_and_save};
pub use math_utils::{interp, normal_cdf};
pub use operator::TridiagonalOperator;
pub use scheme::{CrankNicolsonScheme, ExplicitScheme, ImplicitScheme, Scheme, Sink};
pub use solver::{LuSolver, TridiagonalSolver};
