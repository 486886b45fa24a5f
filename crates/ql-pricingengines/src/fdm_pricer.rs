//! European-option pricing façade over the finite-difference kernel
//! (translates `financial/market.hpp`, `financial/FdmPricer.hpp/.cpp`, and
//! `utils/utils.cpp::mkt2process`).
//!
//! [`FDMPricer`] wires together a [`Scheme`], a pair of [`GridBuilder`]s
//! (spatial and temporal) and a [`RangeSetup`] into a reusable pricer: it
//! converts an [`FdmOption`] and a [`Market`] into a Backward Kolmogorov
//! problem, solves it, and interpolates the result at the market spot.

use std::io::Write;
use std::path::Path;

use ql_core::errors::Result;
use ql_core::Real;
use ql_instruments::{FdmOption, RangeSetup};
use ql_methods::finite_differences::{
    interp, solve_backward, solve_backward_and_save, GridBuilder, Scheme,
};
use ql_processes::ConvectionDiffusion;

/// Market data feeding the Black-Scholes process: spot, volatility, and the
/// risk-free rate.
///
/// Corresponds to `marian::Market`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Market {
    /// Current price of the underlying.
    pub spot: Real,
    /// Black-Scholes volatility.
    pub vol: Real,
    /// Risk-free rate.
    pub rate: Real,
}

impl Market {
    /// Construct a market data record.
    pub fn new(spot: Real, vol: Real, rate: Real) -> Self {
        Self { spot, vol, rate }
    }
}

/// Derives the log-space Black-Scholes convection-diffusion process from
/// market data: `sigma' = sigma`, `mu' = r - sigma^2/2`, `gamma' = r`.
///
/// Corresponds to `marian::mkt2process`.
fn mkt2process(market: Market) -> ConvectionDiffusion {
    ConvectionDiffusion::new(
        market.vol,
        market.rate - 0.5 * market.vol * market.vol,
        market.rate,
    )
}

/// Default spatial node count (`Ns`) used by the source when unspecified.
pub const DEFAULT_SPATIAL_NODES: usize = 100;
/// Default temporal node count (`Nt`) used by the source when unspecified.
pub const DEFAULT_TEMPORAL_NODES: usize = 200;

/// Finite-difference pricer for European-style contracts under Black-Scholes.
///
/// Corresponds to `marian::FDMPricer`. The time-integration scheme already
/// owns its solver (constructor argument, per the source's redesign note),
/// so there is no separate `setSolver` step.
#[derive(Debug)]
pub struct FDMPricer {
    scheme: Box<dyn Scheme>,
    spatial_grid_builder: Box<dyn GridBuilder>,
    time_grid_builder: Box<dyn GridBuilder>,
    range_setter: Box<dyn RangeSetup>,
}

struct ResolvedProblem {
    spot_grid: Vec<Real>,
    log_grid: Vec<Real>,
    time_grid: Vec<Real>,
    initial: Vec<Real>,
    bcs: Vec<ql_methods::finite_differences::BoundaryCondition>,
    process: ConvectionDiffusion,
}

impl FDMPricer {
    /// Build a pricer from its four collaborating strategies.
    pub fn new(
        scheme: Box<dyn Scheme>,
        spatial_grid_builder: Box<dyn GridBuilder>,
        time_grid_builder: Box<dyn GridBuilder>,
        range_setter: Box<dyn RangeSetup>,
    ) -> Self {
        Self {
            scheme,
            spatial_grid_builder,
            time_grid_builder,
            range_setter,
        }
    }

    fn resolve(&self, market: Market, option: &dyn FdmOption, ns: usize, nt: usize) -> Result<ResolvedProblem> {
        let mut low = option.lower_spot_limit();
        let mut upp = option.upper_spot_limit();
        let concentration = option.concentration_point();

        if low == 0.0 {
            low = self.range_setter.lower_bound(market.spot);
        }
        if upp.is_infinite() {
            upp = self.range_setter.upper_bound(market.spot);
        }

        let log_grid = self
            .spatial_grid_builder
            .build_grid(low.ln(), upp.ln(), ns, concentration)?;
        let time_grid = self.time_grid_builder.build_grid(0.0, option.maturity(), nt, 0.0)?;

        let spot_grid: Vec<Real> = log_grid.iter().map(|&x| x.exp()).collect();
        let initial = option.initial_condition(&spot_grid);
        let bcs = option.boundary_conditions(low, upp);
        let process = mkt2process(market);

        Ok(ResolvedProblem {
            spot_grid,
            log_grid,
            time_grid,
            initial,
            bcs,
            process,
        })
    }

    /// Price `option` under `market`, using `ns` spatial and `nt` temporal
    /// nodes (the source's defaults are `ns = 100, nt = 200`).
    ///
    /// # Errors
    /// Propagates grid, operator, or solver errors raised while assembling
    /// or solving the Backward Kolmogorov equation, and `Error::Domain` if
    /// the market spot falls outside the resolved grid range.
    pub fn price(&self, market: Market, option: &dyn FdmOption, ns: usize, nt: usize) -> Result<Real> {
        let problem = self.resolve(market, option, ns, nt)?;
        let solution = solve_backward(
            self.scheme.as_ref(),
            problem.process,
            problem.initial,
            &problem.bcs,
            &problem.log_grid,
            &problem.time_grid,
        )?;
        interp(&problem.spot_grid, &solution, market.spot)
    }

    /// As [`FDMPricer::price`], additionally writing one `(T, S, f)` CSV row
    /// per `(time, spatial node)` pair to `path`, in the order `solveAndSave`
    /// emits them (initial level first, then one block per time step).
    ///
    /// # Errors
    /// As [`FDMPricer::price`], plus any I/O error opening or writing `path`.
    pub fn solve_and_save(
        &self,
        market: Market,
        option: &dyn FdmOption,
        path: &Path,
        ns: usize,
        nt: usize,
    ) -> Result<()> {
        let problem = self.resolve(market, option, ns, nt)?;
        let mut file = std::fs::File::create(path)
            .map_err(|e| ql_core::errors::Error::Runtime(format!("cannot create {}: {e}", path.display())))?;
        writeln!(file, "T;S;f")
            .map_err(|e| ql_core::errors::Error::Runtime(format!("write error: {e}")))?;

        let mut io_err = None;
        {
            let mut sink = |t: Real, x: Real, v: Real| {
                if io_err.is_some() {
                    return;
                }
                if let Err(e) = writeln!(file, "{t};{};{v}", x.exp()) {
                    io_err = Some(e);
                }
            };
            solve_backward_and_save(
                self.scheme.as_ref(),
                problem.process,
                problem.initial,
                &problem.bcs,
                &problem.log_grid,
                &problem.time_grid,
                &mut sink,
            )?;
        }
        if let Some(e) = io_err {
            return Err(ql_core::errors::Error::Runtime(format!("write error: {e}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ql_instruments::{EuroOpt, OptionType, SpotRelatedRange};
    use ql_methods::finite_differences::{CrankNicolsonScheme, LuSolver, UniformGridBuilder};

    fn standard_pricer() -> FDMPricer {
        FDMPricer::new(
            Box::new(CrankNicolsonScheme::new(Box::new(LuSolver::new()))),
            Box::new(UniformGridBuilder::new()),
            Box::new(UniformGridBuilder::new()),
            Box::new(SpotRelatedRange::new(0.2, 3.0)),
        )
    }

    #[test]
    fn european_call_matches_black_scholes_within_tolerance() {
        use crate::analytic_european_engine::black_scholes_merton;

        let pricer = standard_pricer();
        let market = Market::new(1.05, 0.25, 0.02);
        let option = EuroOpt::new(1.0, 1.0, OptionType::Call);

        let fdm_price = pricer.price(market, &option, 50, 350).unwrap();
        let (bs_price, ..) =
            black_scholes_merton(OptionType::Call, market.spot, 1.0, market.rate, 0.0, market.vol, 1.0);

        assert!(
            (fdm_price - bs_price).abs() < 1e-2,
            "fdm={fdm_price}, bs={bs_price}"
        );
    }

    #[test]
    fn put_call_parity_holds() {
        let pricer = standard_pricer();
        let market = Market::new(1.05, 0.25, 0.02);
        let call = EuroOpt::new(1.0, 1.0, OptionType::Call);
        let put = EuroOpt::new(1.0, 1.0, OptionType::Put);

        let call_price = pricer.price(market, &call, 50, 350).unwrap();
        let put_price = pricer.price(market, &put, 50, 350).unwrap();
        let parity = market.spot - 1.0 * (-market.rate * 1.0_f64).exp();

        assert!(
            (call_price - put_price - parity).abs() < 5e-3,
            "call-put={}, parity={parity}",
            call_price - put_price
        );
    }

    #[test]
    fn crank_nicolson_error_is_non_increasing_and_bounded_by_implicit() {
        use crate::analytic_european_engine::black_scholes_merton;
        use ql_methods::finite_differences::ImplicitScheme;

        let market = Market::new(1.05, 0.25, 0.02);
        let option = EuroOpt::new(1.0, 1.0, OptionType::Call);
        let (bs_price, ..) =
            black_scholes_merton(OptionType::Call, market.spot, 1.0, market.rate, 0.0, market.vol, 1.0);

        let cn_pricer = |solver_for: fn() -> Box<dyn Scheme>, nt: usize| -> Real {
            let pricer = FDMPricer::new(
                solver_for(),
                Box::new(UniformGridBuilder::new()),
                Box::new(UniformGridBuilder::new()),
                Box::new(SpotRelatedRange::new(0.2, 3.0)),
            );
            let price = pricer.price(market, &option, 50, nt).unwrap();
            (price - bs_price).abs()
        };
        let cn_scheme = || -> Box<dyn Scheme> { Box::new(CrankNicolsonScheme::new(Box::new(LuSolver::new()))) };
        let implicit_scheme = || -> Box<dyn Scheme> { Box::new(ImplicitScheme::new(Box::new(LuSolver::new()))) };

        let cn_err_100 = cn_pricer(cn_scheme, 100);
        let cn_err_300 = cn_pricer(cn_scheme, 300);
        let implicit_err_300 = cn_pricer(implicit_scheme, 300);

        assert!(
            cn_err_300 <= cn_err_100 + 1e-6,
            "Crank-Nicolson error should not increase with more time steps: {cn_err_100} -> {cn_err_300}"
        );
        assert!(
            cn_err_300 <= implicit_err_300 + 1e-6,
            "Crank-Nicolson should be at least as accurate as implicit Euler at Nt=300: cn={cn_err_300}, implicit={implicit_err_300}"
        );
    }

    #[test]
    fn analytic_vs_fdm_across_a_small_portfolio() {
        use crate::analytic_european_engine::black_scholes_merton;

        let options = [
            EuroOpt::new(1.0, 1.0, OptionType::Call),
            EuroOpt::new(1.0, 0.5, OptionType::Put),
        ];
        let markets = [
            Market::new(1.0, 0.2, 0.01),
            Market::new(1.2, 0.3, 0.02),
            Market::new(0.9, 0.15, 0.0),
        ];
        let pricer = standard_pricer();

        for option in &options {
            for market in &markets {
                let fdm_price = pricer.price(*market, option, 500, 800).unwrap();
                let (bs_price, ..) = black_scholes_merton(
                    option.option_type(),
                    market.spot,
                    option.strike(),
                    market.rate,
                    0.0,
                    market.vol,
                    option.maturity(),
                );
                assert!(
                    (fdm_price - bs_price).abs() < 5e-3,
                    "fdm={fdm_price}, bs={bs_price}, market={market:?}, strike={}, maturity={}",
                    option.strike(),
                    option.maturity()
                );
            }
        }
    }

    #[test]
    fn solve_and_save_writes_header_and_rows() {
        let pricer = standard_pricer();
        let market = Market::new(1.0, 0.2, 0.01);
        let option = EuroOpt::new(1.0, 0.25, OptionType::Call);
        let dir = std::env::temp_dir();
        let path = dir.join(format!("fdm_pricer_test_{}.csv", std::process::id()));

        pricer.solve_and_save(market, &option, &path, 20, 30).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("T;S;f"));
        assert_eq!(lines.count(), 20 * 30);
        std::fs::remove_file(&path).ok();
    }
}
