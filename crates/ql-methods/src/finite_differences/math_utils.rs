//! Small numeric helpers (translates `utils/mathUtils.hpp/.cpp`).
//!
//! `normal_cdf` here is a self-contained Abramowitz & Stegun 7.1.26
//! rational approximation, distinct from `ql_math::distributions::normal_cdf`
//! (which uses a different, higher-precision approximation for the rest of
//! the workspace). It exists only to back the test-only closed-form
//! Black-Scholes oracle this module's tests compare against, and is kept
//! local so that oracle reproduces the exact reference constants.

use ql_core::errors::{Error, Result};
use ql_core::Real;

const A1: Real = 0.254_829_592;
const A2: Real = -0.284_496_736;
const A3: Real = 1.421_413_741;
const A4: Real = -1.453_152_027;
const A5: Real = 1.061_405_429;
const P: Real = 0.327_591_1;

/// Standard normal CDF via the Abramowitz & Stegun 7.1.26 rational
/// approximation (absolute error `< 1.5e-7`).
pub fn normal_cdf(t: Real) -> Real {
    let sign = if t < 0.0 { -1.0 } else { 1.0 };
    let t = t.abs() / std::f64::consts::SQRT_2;
    let x = 1.0 / (1.0 + P * t);
    let y = 1.0 - (((((A5 * x + A4) * x + A3) * x + A2) * x + A1) * x * (-t * t).exp());
    0.5 * (1.0 + sign * y)
}

/// Linear interpolation of the sampled function `y = f(x)` at `t`.
///
/// # Errors
/// Returns [`Error::SizeMismatch`] if `x.len() != y.len()` or either has
/// fewer than 2 points, and [`Error::Domain`] if `t` falls outside
/// `[x[0], x[x.len()-1]]`.
pub fn interp(x: &[Real], y: &[Real], t: Real) -> Result<Real> {
    if x.len() != y.len() || x.len() < 2 {
        return Err(Error::SizeMismatch(format!(
            "interp requires matching, >= 2 element samples, got x.len()={}, y.len()={}",
            x.len(),
            y.len()
        )));
    }
    if t < x[0] || t > x[x.len() - 1] {
        return Err(Error::Domain(format!(
            "t={t} outside sampled range [{}, {}]",
            x[0],
            x[x.len() - 1]
        )));
    }
    let j = match x.binary_search_by(|probe| probe.partial_cmp(&t).unwrap()) {
        Ok(idx) => idx.max(1),
        Err(idx) => idx.max(1),
    };
    let (x0, x1) = (x[j - 1], x[j]);
    let (y0, y1) = (y[j - 1], y[j]);
    Ok(y0 + (y1 - y0) * (t - x0) / (x1 - x0))
}
