//! Option type (translates `ql/option.hpp`'s `Option::Type`).
//!
//! The wider payoff hierarchy (`Payoff`, `PlainVanillaPayoff`, ...) this
//! module translated in the teacher workspace has no counterpart here: the
//! finite-difference engine samples a contract's payoff directly through
//! `FdmOption::initial_condition` (see `fdm_option.rs`) rather than through a
//! shared `Payoff` trait object.

use ql_core::Real;
use std::fmt;

/// Option type (call or put).
///
/// Corresponds to `QuantLib::Option::Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_matches_call_put_convention() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
    }

    #[test]
    fn display_matches_variant_name() {
        assert_eq!(OptionType::Call.to_string(), "Call");
        assert_eq!(OptionType::Put.to_string(), "Put");
    }
}
