//! FDM pricing-problem factory abstraction (translates
//! `financial/options/option.hpp`, `pricerAbstractFactory.hpp`, `euroOpt.hpp/.cpp`,
//! and `euroOptFactory.hpp/.cpp`).
//!
//! The source splits a contract (`Option`) from the strategy that converts it
//! into FDM inputs (`AbstractPricerFactory`, allocated per-option via
//! `Option::allocateFactory`). Both hierarchies rely on a CRTP deep-clone
//! machinery (`DCOption<T>`, `DCAbstractPricerFactory<T>`) to make the
//! polymorphic handles copyable. Since an [`FdmOption`] here is immutable
//! data consumed by shared reference, not an owned polymorphic handle that
//! must be cloned across calls, the two hierarchies collapse into a single
//! trait with no clone hook.

use ql_core::Real;
use ql_methods::finite_differences::{BoundaryCondition, Side};

use crate::payoff::OptionType;

/// Converts a contract into the inputs the FDM pricer needs: a maturity, a
/// spatial range (possibly indefinite, see [`crate::fdm_range::RangeSetup`]),
/// a concentration point for a non-uniform grid, a payoff-based initial
/// condition, and boundary conditions.
///
/// Corresponds to `marian::Option` + `marian::AbstractPricerFactory` (merged).
pub trait FdmOption: std::fmt::Debug + Send + Sync {
    /// Time to maturity, in years.
    fn maturity(&self) -> Real;

    /// Lower spot limit for the pricing grid. `0.0` means "indefinite";
    /// the caller substitutes a [`crate::fdm_range::RangeSetup`] bound.
    fn lower_spot_limit(&self) -> Real;

    /// Upper spot limit for the pricing grid. [`Real::INFINITY`] means
    /// "indefinite"; the caller substitutes a
    /// [`crate::fdm_range::RangeSetup`] bound.
    fn upper_spot_limit(&self) -> Real;

    /// The spot-space point around which a non-uniform grid should cluster.
    fn concentration_point(&self) -> Real;

    /// The terminal payoff sampled at every node of `spot_grid`.
    fn initial_condition(&self, spot_grid: &[Real]) -> Vec<Real>;

    /// Boundary conditions for a grid spanning `[low, upp]` in spot space.
    fn boundary_conditions(&self, low: Real, upp: Real) -> Vec<BoundaryCondition>;
}

/// A European call or put under the Black-Scholes model.
///
/// Corresponds to `marian::EuroOpt` + `marian::EuroOptFactory`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EuroOpt {
    strike: Real,
    maturity: Real,
    option_type: OptionType,
}

impl EuroOpt {
    /// Construct a European option with the given `strike`, `maturity`
    /// (years) and `option_type`.
    pub fn new(strike: Real, maturity: Real, option_type: OptionType) -> Self {
        Self {
            strike,
            maturity,
            option_type,
        }
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// The option type (call/put).
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Payoff at a single spot level: `max(S-K, 0)` for a call,
    /// `max(K-S, 0)` for a put.
    pub fn payoff(&self, spot: Real) -> Real {
        match self.option_type {
            OptionType::Call => (spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - spot).max(0.0),
        }
    }
}

impl FdmOption for EuroOpt {
    fn maturity(&self) -> Real {
        self.maturity
    }

    fn lower_spot_limit(&self) -> Real {
        0.0
    }

    fn upper_spot_limit(&self) -> Real {
        Real::INFINITY
    }

    fn concentration_point(&self) -> Real {
        self.strike
    }

    fn initial_condition(&self, spot_grid: &[Real]) -> Vec<Real> {
        spot_grid.iter().map(|&s| self.payoff(s)).collect()
    }

    fn boundary_conditions(&self, low: Real, upp: Real) -> Vec<BoundaryCondition> {
        let k = self.strike;
        match self.option_type {
            OptionType::Call => vec![
                BoundaryCondition::dirichlet_constant(Side::Low, 0.0),
                BoundaryCondition::dirichlet_constant(Side::Upp, upp - k),
            ],
            OptionType::Put => vec![
                BoundaryCondition::dirichlet_constant(Side::Low, k - low),
                BoundaryCondition::dirichlet_constant(Side::Upp, 0.0),
            ],
        }
    }
}
