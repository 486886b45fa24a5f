//! # ql-math
//!
//! Mathematical utilities shared by the pricing façade. The workspace's
//! only surviving consumer is the closed-form Black-Scholes-Merton test
//! oracle in `ql-pricingengines`, which needs the standard normal CDF/PDF.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod distributions;

pub use distributions::{normal_cdf, normal_pdf};
