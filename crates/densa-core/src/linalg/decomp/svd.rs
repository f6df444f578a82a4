//! Singular Value Decomposition (SVD) and the Moore-Penrose
//! pseudo-inverse.
//!
//! Decomposes a matrix `A` (m x n) into `A = U S V^T` where:
//! - `U` is orthogonal (m x m)
//! - `S` is diagonal with non-negative entries, `min(m, n)` of them
//! - `V` is orthogonal (n x n)

use tracing::{debug, warn};

use crate::buffer::dispatch_float;
use crate::dtype::{Real, Scalar};
use crate::error::Result;
use crate::linalg::provider::{LinalgProvider, Transpose};
use crate::linalg::{Linalg, check_status};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Result of a Singular Value Decomposition.
#[derive(Debug, Clone)]
pub struct Svd {
    u: Matrix,
    s: Vector,
    vt: Matrix,
}

impl Svd {
    /// Left singular vectors (m x m).
    pub fn u(&self) -> &Matrix {
        &self.u
    }

    /// Singular values in descending order.
    pub fn s(&self) -> &Vector {
        &self.s
    }

    /// Right singular vectors transposed (n x n).
    pub fn vt(&self) -> &Matrix {
        &self.vt
    }

    /// Right singular vectors (n x n).
    pub fn v(&self) -> Matrix {
        self.vt.transpose()
    }

    /// Number of singular values above `tol`.
    pub fn rank(&self, tol: f64) -> usize {
        self.s.to_f64_vec().iter().filter(|&&sv| sv > tol).count()
    }

    /// `s_max / s_min`; infinite for a singular matrix.
    pub fn condition_number(&self) -> f64 {
        let s = self.s.to_f64_vec();
        let (max_s, min_s) = (s[0], s[s.len() - 1]);
        if min_s == 0.0 {
            return f64::INFINITY;
        }
        max_s / min_s
    }

    /// `(U, S, V^T)`.
    pub fn into_parts(self) -> (Matrix, Vector, Matrix) {
        (self.u, self.s, self.vt)
    }
}

/// Typed factors straight from `gesdd`.
struct RawSvd<T> {
    u: Vec<T>,
    s: Vec<T>,
    vt: Vec<T>,
}

impl<P: LinalgProvider> Linalg<P> {
    fn gesdd_copy<T: Real>(&self, rows: usize, cols: usize, data: &[T]) -> Result<RawSvd<T>> {
        let mut work = data.to_vec();
        let mut s = vec![T::zero(); rows.min(cols)];
        let mut u = vec![T::zero(); rows * rows];
        let mut vt = vec![T::zero(); cols * cols];
        debug!(rows, cols, "gesdd");
        let status = self
            .provider
            .gesdd(rows, cols, &mut work, cols, &mut s, &mut u, rows, &mut vt, cols);
        check_status("gesdd", status)?;
        Ok(RawSvd { u, s, vt })
    }

    /// Full SVD of a floating-point matrix of any shape.
    ///
    /// ```
    /// # use densa_core::{Matrix, linalg::Linalg};
    /// let a = Matrix::from_rows(vec![vec![3.0_f64, 0.0], vec![0.0, 4.0]]).unwrap();
    /// let svd = Linalg::default().svd(&a).unwrap();
    /// let s = svd.s().to_f64_vec();
    /// assert!((s[0] - 4.0).abs() < 1e-12);
    /// assert!((s[1] - 3.0).abs() < 1e-12);
    /// ```
    #[tracing::instrument(skip(self, m), fields(rows = m.rows(), cols = m.cols()))]
    pub fn svd(&self, m: &Matrix) -> Result<Svd> {
        let (rows, cols) = m.shape();
        dispatch_float!(m.buffer(), "SVD requires a floating-point matrix", |d: T| {
            let raw = self.gesdd_copy(rows, cols, d.as_slice())?;
            Ok(Svd {
                u: Matrix::from_parts(rows, rows, T::into_buffer(raw.u)),
                s: Vector::from_parts(T::into_buffer(raw.s)),
                vt: Matrix::from_parts(cols, cols, T::into_buffer(raw.vt)),
            })
        })
    }

    /// Moore-Penrose pseudo-inverse `A^+ = V S^+ U^T`, shaped cols x rows.
    ///
    /// Singular values at or below `pinv_rcond * max(s)` are treated as
    /// zero.
    ///
    /// ```
    /// # use densa_core::{Matrix, linalg::Linalg};
    /// let a = Matrix::from_rows(vec![vec![1.0_f64, 0.0], vec![0.0, 2.0], vec![0.0, 0.0]]).unwrap();
    /// let pinv = Linalg::default().pseudo_inverse(&a).unwrap();
    /// assert_eq!(pinv.shape(), (2, 3));
    /// assert!((pinv.get(1, 1).unwrap() - 0.5).abs() < 1e-12);
    /// ```
    #[tracing::instrument(skip(self, m), fields(rows = m.rows(), cols = m.cols()))]
    pub fn pseudo_inverse(&self, m: &Matrix) -> Result<Matrix> {
        let (rows, cols) = m.shape();
        let k = rows.min(cols);
        let rcond = self.config.pinv_rcond;
        dispatch_float!(
            m.buffer(),
            "pseudo-inverse requires a floating-point matrix",
            |d: T| {
                let RawSvd { u, s, vt } = self.gesdd_copy(rows, cols, d.as_slice())?;

                // First k rows of V^T, each scaled by 1 / s[i]
                let cutoff = s.iter().fold(T::zero(), |acc, &v| acc.max(v)) * T::from_f64(rcond);
                let mut scaled = vt[..k * cols].to_vec();
                let mut dropped = 0;
                for (i, &si) in s.iter().enumerate() {
                    let inv = if si > cutoff {
                        T::one() / si
                    } else {
                        dropped += 1;
                        T::zero()
                    };
                    self.provider.scal(inv, &mut scaled[i * cols..(i + 1) * cols]);
                }
                if dropped > 0 {
                    warn!(dropped, "pseudo-inverse truncated small singular values");
                }

                // (V^T')^T (cols x k) * U[:, :k]^T (k x rows)
                let mut out = vec![T::zero(); cols * rows];
                debug!(cols, rows, k, "gemm");
                self.provider.gemm(
                    Transpose::Trans,
                    Transpose::Trans,
                    cols,
                    rows,
                    k,
                    T::one(),
                    &scaled,
                    cols,
                    &u,
                    rows,
                    T::zero(),
                    &mut out,
                    rows,
                );
                Ok(Matrix::from_parts(cols, rows, T::into_buffer(out)))
            }
        )
    }
}
