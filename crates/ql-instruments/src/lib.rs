//! # ql-instruments
//!
//! The European-option contract layer over the finite-difference engine:
//! the [`FdmOption`] factory abstraction, its sole implementation
//! [`EuroOpt`], and the [`RangeSetup`] strategy for approximating an
//! indefinite spatial boundary with a finite one.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod fdm_option;
pub mod fdm_range;
pub mod payoff;

pub use fdm_option::{EuroOpt, FdmOption};
pub use fdm_range::{RangeSetup, SpotRelatedRange};
pub use payoff::OptionType;
