//! Tridiagonal operator algebra (translates `FDM/tridiagonalOperator.hpp/.cpp`).
//!
//! A [`TridiagonalOperator`] represents an N×N band matrix by its three
//! diagonals. Every named factory fixes the first row to `(mid=1, upp=0)`
//! and the last row to `(low=0, mid=1)` so that a [`BoundaryCondition`] can
//! rewrite them; the interior rows carry the finite-difference stencil.
//!
//! [`BoundaryCondition`]: crate::finite_differences::boundary::BoundaryCondition

use ql_core::errors::{Error, Result};
use ql_core::Real;

/// A tridiagonal N×N matrix stored as three contiguous bands.
///
/// `low` and `upp` have length `N-1`; `mid` has length `N` (for `N > 0`).
/// `N = 0` is a legal, empty operator. Every arithmetic operation produces
/// a new operator; no operator aliases another's storage after construction.
///
/// Corresponds to `marian::TridiagonalOperator`.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalOperator {
    low: Vec<Real>,
    mid: Vec<Real>,
    upp: Vec<Real>,
}

impl TridiagonalOperator {
    /// A zero-filled operator of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            low: vec![0.0; n.saturating_sub(1)],
            mid: vec![0.0; n],
            upp: vec![0.0; n.saturating_sub(1)],
        }
    }

    /// An operator of size `n` with every band filled by a constant.
    pub fn filled(n: usize, low: Real, mid: Real, upp: Real) -> Self {
        Self {
            low: vec![low; n.saturating_sub(1)],
            mid: vec![mid; n],
            upp: vec![upp; n.saturating_sub(1)],
        }
    }

    /// Construct directly from three explicit bands.
    ///
    /// # Errors
    /// Returns [`Error::SizeMismatch`] unless `low.len() == upp.len() == mid.len().saturating_sub(1)`.
    pub fn from_bands(low: Vec<Real>, mid: Vec<Real>, upp: Vec<Real>) -> Result<Self> {
        let n = mid.len();
        if low.len() != n.saturating_sub(1) || upp.len() != n.saturating_sub(1) {
            return Err(Error::SizeMismatch(format!(
                "band lengths inconsistent with size {n}: low={}, upp={}",
                low.len(),
                upp.len()
            )));
        }
        Ok(Self { low, mid, upp })
    }

    /// Matrix size N.
    pub fn size(&self) -> usize {
        self.mid.len()
    }

    /// Sub-diagonal entry `low[i]`, `0 <= i < N-1`.
    pub fn low(&self, i: usize) -> Real {
        self.low[i]
    }

    /// Diagonal entry `mid[i]`, `0 <= i < N`.
    pub fn mid(&self, i: usize) -> Real {
        self.mid[i]
    }

    /// Super-diagonal entry `upp[i]`, `0 <= i < N-1`.
    pub fn upp(&self, i: usize) -> Real {
        self.upp[i]
    }

    /// Rewrite the first row: `mid[0] = mid`, `upp[0] = upp`.
    pub fn set_first_row(&mut self, mid: Real, upp: Real) {
        self.mid[0] = mid;
        self.upp[0] = upp;
    }

    /// Rewrite interior row `i` (`1 <= i <= N-2`).
    pub fn set_mid_row(&mut self, i: usize, low: Real, mid: Real, upp: Real) {
        self.low[i - 1] = low;
        self.mid[i] = mid;
        self.upp[i] = upp;
    }

    /// Rewrite every interior row (`1 <= i <= N-2`) with the same three values.
    pub fn set_mid_rows(&mut self, low: Real, mid: Real, upp: Real) {
        let n = self.size();
        for i in 1..n - 1 {
            self.low[i - 1] = low;
            self.mid[i] = mid;
            self.upp[i] = upp;
        }
    }

    /// Rewrite the last row: `low[N-2] = low`, `mid[N-1] = mid`.
    pub fn set_last_row(&mut self, low: Real, mid: Real) {
        let n = self.size();
        self.low[n - 2] = low;
        self.mid[n - 1] = mid;
    }

    /// Matrix-vector product `A·v`.
    ///
    /// # Errors
    /// Returns [`Error::SizeMismatch`] if `v.len() != self.size()`.
    pub fn apply(&self, v: &[Real]) -> Result<Vec<Real>> {
        let n = self.size();
        if v.len() != n {
            return Err(Error::SizeMismatch(format!(
                "operator of size {n} applied to vector of length {}",
                v.len()
            )));
        }
        if n == 0 {
            return Ok(Vec::new());
        }
        if n == 1 {
            return Ok(vec![self.mid[0] * v[0]]);
        }
        let mut w = vec![0.0; n];
        w[0] = self.mid[0] * v[0] + self.upp[0] * v[1];
        for i in 1..n - 1 {
            w[i] = self.low[i - 1] * v[i - 1] + self.mid[i] * v[i] + self.upp[i] * v[i + 1];
        }
        w[n - 1] = self.low[n - 2] * v[n - 2] + self.mid[n - 1] * v[n - 1];
        Ok(w)
    }

    fn check_same_size(&self, other: &Self, op: &str) -> Result<()> {
        if self.size() != other.size() {
            return Err(Error::SizeMismatch(format!(
                "cannot {op} operators of size {} and {}",
                self.size(),
                other.size()
            )));
        }
        Ok(())
    }

    /// Elementwise sum of two operators of equal size.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_same_size(other, "add")?;
        Ok(Self {
            low: zip_map(&self.low, &other.low, |a, b| a + b),
            mid: zip_map(&self.mid, &other.mid, |a, b| a + b),
            upp: zip_map(&self.upp, &other.upp, |a, b| a + b),
        })
    }

    /// Elementwise difference of two operators of equal size.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_same_size(other, "subtract")?;
        Ok(Self {
            low: zip_map(&self.low, &other.low, |a, b| a - b),
            mid: zip_map(&self.mid, &other.mid, |a, b| a - b),
            upp: zip_map(&self.upp, &other.upp, |a, b| a - b),
        })
    }

    /// Scale every band by `factor`.
    pub fn scale(&self, factor: Real) -> Self {
        Self {
            low: self.low.iter().map(|x| x * factor).collect(),
            mid: self.mid.iter().map(|x| x * factor).collect(),
            upp: self.upp.iter().map(|x| x * factor).collect(),
        }
    }

    /// Divide every band by `divisor`.
    ///
    /// # Errors
    /// Returns [`Error::Numeric`] if `divisor == 0.0`.
    pub fn divide(&self, divisor: Real) -> Result<Self> {
        if divisor == 0.0 {
            return Err(Error::Numeric("division by zero".to_string()));
        }
        Ok(Self {
            low: self.low.iter().map(|x| x / divisor).collect(),
            mid: self.mid.iter().map(|x| x / divisor).collect(),
            upp: self.upp.iter().map(|x| x / divisor).collect(),
        })
    }

    // ── Named factories ────────────────────────────────────────────────────

    /// Identity operator `I`.
    pub fn identity(n: usize) -> Self {
        let mut op = Self::new(n);
        op.set_first_row(1.0, 0.0);
        op.set_mid_rows(0.0, 1.0, 0.0);
        op.set_last_row(0.0, 1.0);
        op
    }

    /// Forward first-derivative operator `D+` on a uniform grid of spacing `h`.
    pub fn d_plus(n: usize, h: Real) -> Self {
        let inv = 1.0 / h;
        let mut op = Self::new(n);
        op.set_first_row(1.0, 0.0);
        op.set_mid_rows(0.0, -inv, inv);
        op.set_last_row(0.0, 1.0);
        op
    }

    /// Backward first-derivative operator `D-` on a uniform grid of spacing `h`.
    pub fn d_minus(n: usize, h: Real) -> Self {
        let inv = 1.0 / h;
        let mut op = Self::new(n);
        op.set_first_row(1.0, 0.0);
        op.set_mid_rows(-inv, inv, 0.0);
        op.set_last_row(0.0, 1.0);
        op
    }

    /// Central first-derivative operator `D0` on a uniform grid of spacing `h`.
    pub fn d_zero(n: usize, h: Real) -> Self {
        let inv = 1.0 / (2.0 * h);
        let mut op = Self::new(n);
        op.set_first_row(1.0, 0.0);
        op.set_mid_rows(-inv, 0.0, inv);
        op.set_last_row(0.0, 1.0);
        op
    }

    /// Central second-derivative operator `D+-` on a uniform grid of spacing `h`.
    pub fn d_plus_minus(n: usize, h: Real) -> Self {
        let inv = 1.0 / (h * h);
        let mut op = Self::new(n);
        op.set_first_row(1.0, 0.0);
        op.set_mid_rows(inv, -2.0 * inv, inv);
        op.set_last_row(0.0, 1.0);
        op
    }

    /// Central first-derivative operator `D0` on a (possibly non-uniform) grid.
    ///
    /// # Errors
    /// Returns [`Error::GridInvalid`] unless `grid` has at least 2 strictly
    /// increasing nodes.
    pub fn d_zero_grid(grid: &[Real]) -> Result<Self> {
        check_grid(grid)?;
        let n = grid.len();
        let mut op = Self::new(n);
        op.set_first_row(1.0, 0.0);
        for i in 2..n {
            let hm = grid[i - 1] - grid[i - 2];
            let hp = grid[i] - grid[i - 1];
            let d = hm * hp * (hp + hm);
            op.set_mid_row(i - 1, -hp * hp / d, (hp * hp - hm * hm) / d, hm * hm / d);
        }
        op.set_last_row(0.0, 1.0);
        Ok(op)
    }

    /// Central second-derivative operator `D+-` on a (possibly non-uniform) grid.
    ///
    /// # Errors
    /// Returns [`Error::GridInvalid`] unless `grid` has at least 2 strictly
    /// increasing nodes.
    pub fn d_plus_minus_grid(grid: &[Real]) -> Result<Self> {
        check_grid(grid)?;
        let n = grid.len();
        let mut op = Self::new(n);
        op.set_first_row(1.0, 0.0);
        for i in 2..n {
            let hm = grid[i - 1] - grid[i - 2];
            let hp = grid[i] - grid[i - 1];
            let d = hm * hp * (hp + hm);
            op.set_mid_row(i - 1, 2.0 * hp / d, -2.0 * (hp + hm) / d, 2.0 * hm / d);
        }
        op.set_last_row(0.0, 1.0);
        Ok(op)
    }

    /// Identity operator of the same size as `grid`.
    ///
    /// # Errors
    /// Returns [`Error::GridInvalid`] unless `grid` has at least 2 strictly
    /// increasing nodes.
    pub fn identity_grid(grid: &[Real]) -> Result<Self> {
        check_grid(grid)?;
        Ok(Self::identity(grid.len()))
    }
}

fn zip_map(a: &[Real], b: &[Real], f: impl Fn(Real, Real) -> Real) -> Vec<Real> {
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

fn check_grid(grid: &[Real]) -> Result<()> {
    if grid.len() < 2 {
        return Err(Error::GridInvalid(format!(
            "grid must have at least 2 nodes, got {}",
            grid.len()
        )));
    }
    for w in grid.windows(2) {
        if w[1] <= w[0] {
            return Err(Error::GridInvalid(format!(
                "grid must be strictly increasing: {} followed by {}",
                w[0], w[1]
            )));
        }
    }
    Ok(())
}

impl std::ops::Add for &TridiagonalOperator {
    type Output = Result<TridiagonalOperator>;
    fn add(self, rhs: Self) -> Self::Output {
        TridiagonalOperator::add(self, rhs)
    }
}

impl std::ops::Sub for &TridiagonalOperator {
    type Output = Result<TridiagonalOperator>;
    fn sub(self, rhs: Self) -> Self::Output {
        TridiagonalOperator::sub(self, rhs)
    }
}

impl std::ops::Mul<Real> for &TridiagonalOperator {
    type Output = TridiagonalOperator;
    fn mul(self, rhs: Real) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Mul<&TridiagonalOperator> for Real {
    type Output = TridiagonalOperator;
    fn mul(self, rhs: &TridiagonalOperator) -> Self::Output {
        rhs.scale(self)
    }
}

impl std::ops::Div<Real> for &TridiagonalOperator {
    type Output = Result<TridiagonalOperator>;
    fn div(self, rhs: Real) -> Self::Output {
        self.divide(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_acts_as_identity() {
        let op = TridiagonalOperator::identity(5);
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let w = op.apply(&v).unwrap();
        assert_eq!(v, w);
    }

    #[test]
    fn first_and_last_row_fixed_by_every_factory() {
        for op in [
            TridiagonalOperator::identity(6),
            TridiagonalOperator::d_plus(6, 0.1),
            TridiagonalOperator::d_minus(6, 0.1),
            TridiagonalOperator::d_zero(6, 0.1),
            TridiagonalOperator::d_plus_minus(6, 0.1),
        ] {
            assert_eq!(op.mid(0), 1.0);
            assert_eq!(op.upp(0), 0.0);
            assert_eq!(op.low(op.size() - 2), 0.0);
            assert_eq!(op.mid(op.size() - 1), 1.0);
        }
    }

    #[test]
    fn addition_is_linear_on_vectors() {
        let a = TridiagonalOperator::d_plus_minus(5, 0.5);
        let b = TridiagonalOperator::d_zero(5, 0.5);
        let v = vec![1.0, 4.0, 9.0, 16.0, 25.0];
        let sum = a.add(&b).unwrap();
        let lhs = sum.apply(&v).unwrap();
        let rhs: Vec<Real> = a
            .apply(&v)
            .unwrap()
            .iter()
            .zip(b.apply(&v).unwrap())
            .map(|(x, y)| x + y)
            .collect();
        for (l, r) in lhs.iter().zip(rhs) {
            assert!((l - r).abs() < 1e-12);
        }
    }

    #[test]
    fn scalar_linearity() {
        let a = TridiagonalOperator::d_plus_minus(5, 0.25);
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let scaled = a.scale(3.0);
        let direct = scaled.apply(&v).unwrap();
        let expected: Vec<Real> = a.apply(&v).unwrap().iter().map(|x| x * 3.0).collect();
        for (d, e) in direct.iter().zip(expected) {
            assert!((d - e).abs() < 1e-12);
        }
        let divided = a.divide(4.0).unwrap().apply(&v).unwrap();
        let expected2: Vec<Real> = a.apply(&v).unwrap().iter().map(|x| x / 4.0).collect();
        for (d, e) in divided.iter().zip(expected2) {
            assert!((d - e).abs() < 1e-12);
        }
    }

    #[test]
    fn division_by_zero_is_numeric_error() {
        let a = TridiagonalOperator::identity(3);
        assert!(matches!(a.divide(0.0), Err(Error::Numeric(_))));
    }

    #[test]
    fn size_mismatch_on_apply() {
        let a = TridiagonalOperator::identity(3);
        assert!(matches!(a.apply(&[1.0, 2.0]), Err(Error::SizeMismatch(_))));
    }

    #[test]
    fn size_mismatch_on_add() {
        let a = TridiagonalOperator::identity(3);
        let b = TridiagonalOperator::identity(4);
        assert!(matches!(a.add(&b), Err(Error::SizeMismatch(_))));
    }

    #[test]
    fn non_uniform_grid_matches_uniform_limit() {
        let grid: Vec<Real> = (0..6).map(|i| i as Real * 0.1).collect();
        let uniform = TridiagonalOperator::d_plus_minus(6, 0.1);
        let non_uniform = TridiagonalOperator::d_plus_minus_grid(&grid).unwrap();
        for i in 1..5 {
            assert!((uniform.low(i - 1) - non_uniform.low(i - 1)).abs() < 1e-9);
            assert!((uniform.mid(i) - non_uniform.mid(i)).abs() < 1e-9);
            assert!((uniform.upp(i) - non_uniform.upp(i)).abs() < 1e-9);
        }
    }
}
