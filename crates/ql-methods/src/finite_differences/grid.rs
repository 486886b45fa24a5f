//! Spatial/temporal grid builders (translates `FDM/gridBuilders/`).

use ql_core::errors::{Error, Result};
use ql_core::Real;

/// Builds a monotonically increasing grid of `n` nodes over `[low, upp]`,
/// optionally clustering nodes around `concentration`.
///
/// Corresponds to `marian::GridBuilder`.
pub trait GridBuilder: std::fmt::Debug + Send + Sync {
    /// Build a grid of `n` nodes spanning `[low, upp]`.
    ///
    /// # Errors
    /// Returns [`ql_core::errors::Error::GridInvalid`] if `n < 2` or
    /// `upp <= low`.
    fn build_grid(&self, low: Real, upp: Real, n: usize, concentration: Real) -> Result<Vec<Real>>;
}

fn check_bounds(low: Real, upp: Real, n: usize) -> Result<()> {
    if n < 2 {
        return Err(Error::GridInvalid(format!("a grid needs at least 2 nodes, got {n}")));
    }
    if upp <= low {
        return Err(Error::GridInvalid(format!(
            "grid upper bound {upp} must exceed lower bound {low}"
        )));
    }
    Ok(())
}

/// Evenly spaced grid; ignores the concentration point.
///
/// Corresponds to `marian::UniformGridBuilder`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformGridBuilder;

impl UniformGridBuilder {
    /// Construct a new uniform grid builder.
    pub fn new() -> Self {
        Self
    }
}

impl GridBuilder for UniformGridBuilder {
    fn build_grid(&self, low: Real, upp: Real, n: usize, _concentration: Real) -> Result<Vec<Real>> {
        check_bounds(low, upp, n)?;
        let spacing = (upp - low) / (n - 1) as Real;
        Ok((0..n).map(|i| low + i as Real * spacing).collect())
    }
}

/// Non-uniform grid clustered around `concentration` via a hyperbolic sine
/// transform; `c` controls how tightly nodes cluster (smaller `c` clusters
/// more tightly).
///
/// Corresponds to `marian::HSineGridBuilder`.
#[derive(Debug, Clone, Copy)]
pub struct HyperbolicSineGridBuilder {
    c: Real,
}

impl HyperbolicSineGridBuilder {
    /// Construct a grid builder with clustering strength `c`.
    ///
    /// # Errors
    /// Returns [`ql_core::errors::Error::Domain`] if `c <= 0.0`.
    pub fn new(c: Real) -> Result<Self> {
        if c <= 0.0 {
            return Err(Error::Domain(format!(
                "clustering strength must be positive, got {c}"
            )));
        }
        Ok(Self { c })
    }
}

impl GridBuilder for HyperbolicSineGridBuilder {
    fn build_grid(&self, low: Real, upp: Real, n: usize, concentration: Real) -> Result<Vec<Real>> {
        check_bounds(low, upp, n)?;
        let k = (concentration - low) / (upp - low);
        let dx = (1.0 / n as Real) * (f64::asinh((1.0 - k) / self.c) - f64::asinh(-k / self.c));
        let mid = f64::asinh(-k / self.c);
        let mut grid = vec![0.0; n];
        for (i, g) in grid.iter_mut().enumerate().take(n - 1) {
            *g = low + (k + self.c * (mid + i as Real * dx).sinh()) * (upp - low);
        }
        grid[n - 1] = upp;
        Ok(grid)
    }
}
