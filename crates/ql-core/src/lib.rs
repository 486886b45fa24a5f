//! # ql-core
//!
//! Core types and error definitions shared by the finite-difference kernel
//! and the option-pricing façade built on top of it.
//!
//! This crate provides the foundational building blocks: the scalar/time
//! type aliases and the error hierarchy (`ensure!`/`ensure_post!`/`fail!`,
//! backing `Result<T>` everywhere a fallible operation is exposed).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Integer type used for general-purpose counting.
pub type Integer = i32;

/// Non-negative integer type.
pub type Natural = u32;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

pub mod errors;

pub use errors::{Error, Result};
