//! # quantlib
//!
//! A finite-difference PDE engine for pricing European options under
//! Black-Scholes, translated from the [QuantLib](https://www.quantlib.org/)
//! quantitative finance library's finite-difference module.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ql-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! quantlib = "0.1"
//! ```
//!
//! ```rust
//! use quantlib::core::Real;
//!
//! let rate: Real = 0.05;
//! assert!((rate - 0.05).abs() < f64::EPSILON);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ql_core as core;

/// Mathematical utilities: the standard normal distribution.
pub use ql_math as math;

/// Stochastic process definitions.
pub use ql_processes as processes;

/// Numerical methods (finite-difference PDE solvers).
pub use ql_methods as methods;

/// Financial instruments.
pub use ql_instruments as instruments;

/// Pricing engines.
pub use ql_pricingengines as pricingengines;
