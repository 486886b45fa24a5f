//! Time-stepping schemes (translates `FDM/schemes/fdScheme.hpp`,
//! `explicitScheme.hpp`, `implicitScheme.hpp/.cpp`, `crankNicolsonScheme.hpp/.cpp`).
//!
//! Each scheme steps a solution vector `f` through a `time_grid`, applying
//! the operator `l` and a set of [`BoundaryCondition`]s at every level. The
//! solver used by the implicit half-steps is a constructor argument rather
//! than set post-hoc, so a scheme is never observed without one.

use ql_core::errors::Result;
use ql_core::Real;

use super::boundary::BoundaryCondition;
use super::operator::TridiagonalOperator;
use super::solver::TridiagonalSolver;

/// A sink receiving `(time, spatial_position_index_as_x, value)` rows,
/// mirroring the CSV rows written by `solveAndSave`. Schemes call it once
/// per grid point at the initial level and at every stepped level.
pub type Sink<'a> = dyn FnMut(Real, Real, Real) + 'a;

/// A time-stepping scheme for `df/dt = L f` over a spatial operator `l`.
///
/// Corresponds to `marian::FDScheme`.
pub trait Scheme: std::fmt::Debug {
    /// Evolve `f` through every level of `time_grid`, applying `bcs` and the
    /// differential operator `l` at each step, and return the final level.
    ///
    /// # Errors
    /// Propagates any [`ql_core::errors::Error`] raised by the operator
    /// arithmetic or the solver.
    fn solve(
        &self,
        f: Vec<Real>,
        bcs: &[BoundaryCondition],
        time_grid: &[Real],
        l: &TridiagonalOperator,
    ) -> Result<Vec<Real>>;

    /// As [`Scheme::solve`], additionally streaming `(t, x, value)` rows for
    /// every grid point at the initial level and after every step to `sink`.
    ///
    /// `spatial_grid[i]` is the `x` coordinate reported for `f[i]`.
    ///
    /// # Errors
    /// Propagates any [`ql_core::errors::Error`] raised by the operator
    /// arithmetic or the solver.
    fn solve_and_save(
        &self,
        f: Vec<Real>,
        bcs: &[BoundaryCondition],
        spatial_grid: &[Real],
        time_grid: &[Real],
        l: &TridiagonalOperator,
        sink: &mut Sink<'_>,
    ) -> Result<Vec<Real>>;
}

fn emit_level(sink: &mut Sink<'_>, t: Real, spatial_grid: &[Real], f: &[Real]) {
    for (&x, &v) in spatial_grid.iter().zip(f) {
        sink(t, x, v);
    }
}

/// Forward-Euler explicit scheme: `f_{i+1} = (I + dt·L)·f_i`.
///
/// Corresponds to `marian::ExplicitScheme`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitScheme;

impl ExplicitScheme {
    /// Construct a new explicit scheme.
    pub fn new() -> Self {
        Self
    }

    fn step(
        &self,
        f: &[Real],
        bcs: &[BoundaryCondition],
        t: Real,
        dt: Real,
        l: &TridiagonalOperator,
        identity: &TridiagonalOperator,
    ) -> Result<Vec<Real>> {
        let mut evolve = identity.add(&l.scale(dt))?;
        for bc in bcs {
            bc.before_explicit_step(&mut evolve);
        }
        let mut next = evolve.apply(f)?;
        for bc in bcs {
            bc.after_explicit_step(&mut next, t);
        }
        Ok(next)
    }
}

impl Scheme for ExplicitScheme {
    fn solve(&self, mut f: Vec<Real>, bcs: &[BoundaryCondition], time_grid: &[Real], l: &TridiagonalOperator) -> Result<Vec<Real>> {
        let identity = TridiagonalOperator::identity(l.size());
        for i in 0..time_grid.len().saturating_sub(1) {
            let dt = time_grid[i + 1] - time_grid[i];
            f = self.step(&f, bcs, time_grid[i], dt, l, &identity)?;
        }
        Ok(f)
    }

    fn solve_and_save(
        &self,
        mut f: Vec<Real>,
        bcs: &[BoundaryCondition],
        spatial_grid: &[Real],
        time_grid: &[Real],
        l: &TridiagonalOperator,
        sink: &mut Sink<'_>,
    ) -> Result<Vec<Real>> {
        let identity = TridiagonalOperator::identity(l.size());
        if let Some(&t0) = time_grid.first() {
            emit_level(sink, t0, spatial_grid, &f);
        }
        for i in 0..time_grid.len().saturating_sub(1) {
            let dt = time_grid[i + 1] - time_grid[i];
            f = self.step(&f, bcs, time_grid[i], dt, l, &identity)?;
            emit_level(sink, time_grid[i + 1], spatial_grid, &f);
        }
        Ok(f)
    }
}

/// Backward-Euler implicit scheme: solves `(I - dt·L)·f_{i+1} = f_i`.
///
/// Corresponds to `marian::ImplicitScheme`.
#[derive(Debug)]
pub struct ImplicitScheme {
    solver: Box<dyn TridiagonalSolver>,
}

impl ImplicitScheme {
    /// Construct an implicit scheme using `solver` for every time step.
    pub fn new(solver: Box<dyn TridiagonalSolver>) -> Self {
        Self { solver }
    }

    fn step(
        &self,
        f: &[Real],
        bcs: &[BoundaryCondition],
        t: Real,
        dt: Real,
        l: &TridiagonalOperator,
        identity: &TridiagonalOperator,
    ) -> Result<Vec<Real>> {
        let mut diff_operator = identity.sub(&l.scale(dt))?;
        let mut rhs = f.to_vec();
        for bc in bcs {
            bc.before_implicit_step(&mut diff_operator, &mut rhs, t);
        }
        let mut next = self.solver.solve(&diff_operator, &rhs)?;
        for bc in bcs {
            bc.after_implicit_step(&mut next, t);
        }
        Ok(next)
    }
}

impl Scheme for ImplicitScheme {
    fn solve(&self, mut f: Vec<Real>, bcs: &[BoundaryCondition], time_grid: &[Real], l: &TridiagonalOperator) -> Result<Vec<Real>> {
        let identity = TridiagonalOperator::identity(l.size());
        for i in 0..time_grid.len().saturating_sub(1) {
            let dt = time_grid[i + 1] - time_grid[i];
            f = self.step(&f, bcs, time_grid[i], dt, l, &identity)?;
        }
        Ok(f)
    }

    fn solve_and_save(
        &self,
        mut f: Vec<Real>,
        bcs: &[BoundaryCondition],
        spatial_grid: &[Real],
        time_grid: &[Real],
        l: &TridiagonalOperator,
        sink: &mut Sink<'_>,
    ) -> Result<Vec<Real>> {
        let identity = TridiagonalOperator::identity(l.size());
        if let Some(&t0) = time_grid.first() {
            emit_level(sink, t0, spatial_grid, &f);
        }
        for i in 0..time_grid.len().saturating_sub(1) {
            let dt = time_grid[i + 1] - time_grid[i];
            f = self.step(&f, bcs, time_grid[i], dt, l, &identity)?;
            emit_level(sink, time_grid[i + 1], spatial_grid, &f);
        }
        Ok(f)
    }
}

/// Crank-Nicolson scheme: an explicit half-step with `L/2` followed by an
/// implicit half-step with `L/2`, each level.
///
/// Corresponds to `marian::CrankNicolsonScheme`.
#[derive(Debug)]
pub struct CrankNicolsonScheme {
    solver: Box<dyn TridiagonalSolver>,
}

impl CrankNicolsonScheme {
    /// Construct a Crank-Nicolson scheme using `solver` for the implicit half-step.
    pub fn new(solver: Box<dyn TridiagonalSolver>) -> Self {
        Self { solver }
    }

    fn step(
        &self,
        f: &[Real],
        bcs: &[BoundaryCondition],
        t: Real,
        dt: Real,
        l: &TridiagonalOperator,
        identity: &TridiagonalOperator,
    ) -> Result<Vec<Real>> {
        let half = l.scale(0.5 * dt);

        let mut diff_exp = identity.add(&half)?;
        for bc in bcs {
            bc.before_explicit_step(&mut diff_exp);
        }
        let mut half_step = diff_exp.apply(f)?;
        for bc in bcs {
            bc.after_explicit_step(&mut half_step, t);
        }

        let mut diff_imp = identity.sub(&half)?;
        for bc in bcs {
            bc.before_implicit_step(&mut diff_imp, &mut half_step, t);
        }
        let mut next = self.solver.solve(&diff_imp, &half_step)?;
        for bc in bcs {
            bc.after_implicit_step(&mut next, t);
        }
        Ok(next)
    }
}

impl Scheme for CrankNicolsonScheme {
    fn solve(&self, mut f: Vec<Real>, bcs: &[BoundaryCondition], time_grid: &[Real], l: &TridiagonalOperator) -> Result<Vec<Real>> {
        let identity = TridiagonalOperator::identity(l.size());
        for i in 0..time_grid.len().saturating_sub(1) {
            let dt = time_grid[i + 1] - time_grid[i];
            f = self.step(&f, bcs, time_grid[i], dt, l, &identity)?;
        }
        Ok(f)
    }

    fn solve_and_save(
        &self,
        mut f: Vec<Real>,
        bcs: &[BoundaryCondition],
        spatial_grid: &[Real],
        time_grid: &[Real],
        l: &TridiagonalOperator,
        sink: &mut Sink<'_>,
    ) -> Result<Vec<Real>> {
        let identity = TridiagonalOperator::identity(l.size());
        if let Some(&t0) = time_grid.first() {
            emit_level(sink, t0, spatial_grid, &f);
        }
        for i in 0..time_grid.len().saturating_sub(1) {
            let dt = time_grid[i + 1] - time_grid[i];
            f = self.step(&f, bcs, time_grid[i], dt, l, &identity)?;
            emit_level(sink, time_grid[i + 1], spatial_grid, &f);
        }
        Ok(f)
    }
}
