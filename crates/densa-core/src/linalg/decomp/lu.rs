//! LU decomposition with partial pivoting, plus the determinant and the
//! inverse that are derived from it.
//!
//! Decomposes a square matrix `A` into `PA = LU` where:
//! - `P` is a permutation matrix
//! - `L` is lower triangular with unit diagonal
//! - `U` is upper triangular

use std::borrow::Cow;

use tracing::debug;

use crate::buffer::dispatch_float;
use crate::dtype::{DType, Real, Scalar};
use crate::error::Result;
use crate::guard::check_square;
use crate::linalg::provider::LinalgProvider;
use crate::linalg::{Linalg, check_status};
use crate::matrix::Matrix;

/// Result of an LU decomposition with partial pivoting.
#[derive(Debug, Clone)]
pub struct Lu {
    l: Matrix,
    u: Matrix,
    p: Matrix,
    /// 1-based LAPACK pivots: row `i + 1` was interchanged with `pivots[i]`.
    pivots: Vec<i32>,
}

impl Lu {
    fn from_packed<T: Real>(n: usize, packed: &[T], pivots: Vec<i32>) -> Self {
        let mut l = vec![T::zero(); n * n];
        let mut u = vec![T::zero(); n * n];
        for i in 0..n {
            l[i * n + i] = T::one();
            for j in 0..i {
                l[i * n + j] = packed[i * n + j];
            }
            for j in i..n {
                u[i * n + j] = packed[i * n + j];
            }
        }

        // Replay the interchanges on 1..=n to get the row order of P A.
        let mut perm: Vec<usize> = (1..=n).collect();
        for (i, &piv) in pivots.iter().enumerate() {
            perm.swap(i, (piv - 1) as usize);
        }
        let mut p = vec![T::zero(); n * n];
        for (i, &src) in perm.iter().enumerate() {
            p[i * n + src - 1] = T::one();
        }

        Self {
            l: Matrix::from_parts(n, n, T::into_buffer(l)),
            u: Matrix::from_parts(n, n, T::into_buffer(u)),
            p: Matrix::from_parts(n, n, T::into_buffer(p)),
            pivots,
        }
    }

    /// Unit lower triangular factor.
    pub fn l(&self) -> &Matrix {
        &self.l
    }

    /// Upper triangular factor.
    pub fn u(&self) -> &Matrix {
        &self.u
    }

    /// Permutation matrix with `P A = L U`.
    pub fn p(&self) -> &Matrix {
        &self.p
    }

    pub fn pivots(&self) -> &[i32] {
        &self.pivots
    }

    /// Number of row interchanges performed.
    pub fn swap_count(&self) -> usize {
        swap_count(&self.pivots)
    }

    /// `sign(P) * prod(diag(U))`.
    pub fn det(&self) -> f64 {
        let n = self.u.rows();
        let sign = if self.swap_count() % 2 == 0 { 1.0 } else { -1.0 };
        (0..n).fold(sign, |acc, i| acc * self.u.get(i, i).unwrap_or_default())
    }

    /// `(L, U, P)`.
    pub fn into_parts(self) -> (Matrix, Matrix, Matrix) {
        (self.l, self.u, self.p)
    }
}

fn swap_count(pivots: &[i32]) -> usize {
    pivots
        .iter()
        .enumerate()
        .filter(|&(i, &p)| p != (i + 1) as i32)
        .count()
}

impl<P: LinalgProvider> Linalg<P> {
    /// Run `getrf` on a copy of `data`, returning the packed factors, the
    /// pivots and the raw status.
    pub(crate) fn getrf_copy<T: Real>(
        &self,
        rows: usize,
        cols: usize,
        data: &[T],
    ) -> (Vec<T>, Vec<i32>, i32) {
        let mut packed = data.to_vec();
        let mut ipiv = vec![0_i32; rows.min(cols)];
        debug!(rows, cols, "getrf");
        let status = self.provider.getrf(rows, cols, &mut packed, cols, &mut ipiv);
        (packed, ipiv, status)
    }

    /// LU factorization `P A = L U` of a square floating-point matrix.
    ///
    /// A singular matrix yields
    /// [`CoreError::FactorizationFailed`](crate::CoreError::FactorizationFailed)
    /// with the 1-based index of the first zero pivot.
    ///
    /// ```
    /// # use densa_core::{Matrix, linalg::Linalg};
    /// let a = Matrix::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]]).unwrap();
    /// let lu = Linalg::default().lu(&a).unwrap();
    /// assert!((lu.det() + 2.0).abs() < 1e-12);
    /// assert_eq!(lu.swap_count(), 1);
    /// ```
    #[tracing::instrument(skip(self, m), fields(rows = m.rows(), cols = m.cols()))]
    pub fn lu(&self, m: &Matrix) -> Result<Lu> {
        check_square(m, "LU decomposition requires a square matrix")?;
        let n = m.rows();
        dispatch_float!(
            m.buffer(),
            "LU decomposition requires a floating-point matrix",
            |d: T| {
                let (packed, ipiv, status) = self.getrf_copy(n, n, d.as_slice());
                check_status("getrf", status)?;
                Ok(Lu::from_packed(n, &packed, ipiv))
            }
        )
    }

    /// Determinant via LU. A singular matrix gives `0.0`; integer
    /// matrices are promoted to `F64`.
    ///
    /// ```
    /// # use densa_core::{Matrix, linalg::Linalg};
    /// let a = Matrix::from_rows(vec![vec![1, 2], vec![2, 4]]).unwrap();
    /// assert_eq!(Linalg::default().determinant(&a).unwrap(), 0.0);
    /// ```
    #[tracing::instrument(skip(self, m), fields(rows = m.rows(), cols = m.cols()))]
    pub fn determinant(&self, m: &Matrix) -> Result<f64> {
        check_square(m, "determinant requires a square matrix")?;
        let m = promote(m);
        let n = m.rows();
        dispatch_float!(m.buffer(), "determinant requires a numeric matrix", |d: T| {
            let (packed, ipiv, status) = self.getrf_copy(n, n, d.as_slice());
            if status > 0 {
                debug!(status, "singular pivot, determinant is zero");
                return Ok(0.0);
            }
            check_status("getrf", status)?;
            let sign = if swap_count(&ipiv) % 2 == 0 { 1.0 } else { -1.0 };
            Ok((0..n).fold(sign, |acc, i| acc * packed[i * n + i].to_f64()))
        })
    }

    /// Inverse of a square floating-point matrix via `getrf` and `getri`.
    ///
    /// ```
    /// # use densa_core::{Matrix, linalg::Linalg};
    /// let a = Matrix::from_rows(vec![vec![2.0_f64, 1.0], vec![1.0, 4.0]]).unwrap();
    /// let inv = Linalg::default().inverse(&a).unwrap();
    /// assert!((inv.get(0, 0).unwrap() - 4.0 / 7.0).abs() < 1e-12);
    /// ```
    #[tracing::instrument(skip(self, m), fields(rows = m.rows(), cols = m.cols()))]
    pub fn inverse(&self, m: &Matrix) -> Result<Matrix> {
        check_square(m, "inverse requires a square matrix")?;
        let n = m.rows();
        dispatch_float!(m.buffer(), "inverse requires a floating-point matrix", |d: T| {
            let (mut packed, ipiv, status) = self.getrf_copy(n, n, d.as_slice());
            check_status("getrf", status)?;
            debug!(n, "getri");
            let status = self.provider.getri(n, &mut packed, n, &ipiv);
            check_status("getri", status)?;
            Ok(Matrix::from_parts(n, n, T::into_buffer(packed)))
        })
    }
}

/// Integer matrices widened to `F64`; float matrices borrowed as-is.
pub(crate) fn promote(m: &Matrix) -> Cow<'_, Matrix> {
    if m.dtype().is_float() {
        Cow::Borrowed(m)
    } else {
        Cow::Owned(m.cast(DType::F64))
    }
}
