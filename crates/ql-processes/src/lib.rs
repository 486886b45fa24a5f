//! # ql-processes
//!
//! Stochastic process definitions consumed by the finite-difference PDE
//! assemblers.
//!
//! Translates `ql/processes/` — in this workspace reduced to the single
//! process the Backward/Forward Kolmogorov assemblers need.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod convection_diffusion;

pub use convection_diffusion::ConvectionDiffusion;
