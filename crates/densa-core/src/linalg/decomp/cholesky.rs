//! Cholesky decomposition for symmetric positive-definite matrices.
//!
//! Decomposes `A` into `A = L L^T` where `L` is lower triangular with
//! positive diagonal entries. Only the lower triangle of `A` is read.

use tracing::debug;

use crate::buffer::dispatch_float;
use crate::dtype::Scalar;
use crate::error::Result;
use crate::guard::check_square;
use crate::linalg::provider::{LinalgProvider, Uplo};
use crate::linalg::{Linalg, check_status};
use crate::matrix::Matrix;

/// Lower triangular factor of `A = L L^T`.
#[derive(Debug, Clone)]
pub struct Cholesky {
    lower: Matrix,
}

impl Cholesky {
    pub fn l(&self) -> &Matrix {
        &self.lower
    }

    pub fn into_inner(self) -> Matrix {
        self.lower
    }

    /// `log(det(A)) = 2 * sum(log(diag(L)))`.
    pub fn log_det(&self) -> f64 {
        let n = self.lower.rows();
        2.0 * (0..n)
            .map(|i| self.lower.get(i, i).unwrap_or_default().ln())
            .sum::<f64>()
    }
}

impl<P: LinalgProvider> Linalg<P> {
    /// Cholesky factorization of a square floating-point matrix.
    ///
    /// A matrix that is not positive definite yields
    /// [`CoreError::FactorizationFailed`](crate::CoreError::FactorizationFailed)
    /// whose status is the order of the failing leading minor.
    ///
    /// ```
    /// # use densa_core::{Matrix, linalg::Linalg};
    /// let la = Linalg::default();
    /// let a = Matrix::from_rows(vec![vec![4.0_f64, 2.0], vec![2.0, 3.0]]).unwrap();
    /// let l = la.cholesky(&a).unwrap().into_inner();
    /// let back = la.matmul(&l, &l.transpose()).unwrap();
    /// assert!((back.get(1, 1).unwrap() - 3.0).abs() < 1e-12);
    /// ```
    #[tracing::instrument(skip(self, m), fields(rows = m.rows(), cols = m.cols()))]
    pub fn cholesky(&self, m: &Matrix) -> Result<Cholesky> {
        check_square(m, "Cholesky decomposition requires a square matrix")?;
        let n = m.rows();
        dispatch_float!(
            m.buffer(),
            "Cholesky decomposition requires a floating-point matrix",
            |d: T| {
                let mut work = d.clone();
                debug!(n, "potrf");
                let status = self.provider.potrf(Uplo::Lower, n, &mut work, n);
                check_status("potrf", status)?;
                for i in 0..n {
                    for j in (i + 1)..n {
                        work[i * n + j] = T::zero();
                    }
                }
                Ok(Cholesky {
                    lower: Matrix::from_parts(n, n, T::into_buffer(work)),
                })
            }
        )
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::error::CoreError;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
    }

    #[test]
    fn test_cholesky_3x3() {
        let la = Linalg::default();
        let a = Matrix::from_rows(vec![
            vec![25.0_f64, 15.0, -5.0],
            vec![15.0, 18.0, 0.0],
            vec![-5.0, 0.0, 11.0],
        ])
        .unwrap();
        let chol = la.cholesky(&a).unwrap();
        let l = chol.l();
        // Known factor
        let expected = [5.0, 0.0, 0.0, 3.0, 3.0, 0.0, -1.0, 1.0, 3.0];
        assert!(approx_eq(&l.to_f64_vec(), &expected, 1e-12));
        let back = la.matmul(l, &l.transpose()).unwrap();
        assert!(approx_eq(&back.to_f64_vec(), &a.to_f64_vec(), 1e-10));
        // det = (5 * 3 * 3)^2
        assert!((chol.log_det() - 2025.0_f64.ln()).abs() < 1e-10);
    }

    #[test]
    fn test_cholesky_ignores_upper_triangle() {
        let la = Linalg::default();
        let a = Matrix::from_rows(vec![vec![4.0_f64, 99.0], vec![2.0, 3.0]]).unwrap();
        let l = la.cholesky(&a).unwrap().into_inner();
        assert_eq!(l.get(0, 1).unwrap(), 0.0);
        assert!((l.get(1, 0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cholesky_f32() {
        let la = Linalg::default();
        let a = Matrix::from_rows(vec![vec![4.0_f32, 2.0], vec![2.0, 3.0]]).unwrap();
        let l = la.cholesky(&a).unwrap().into_inner();
        assert_eq!(l.dtype(), DType::F32);
        assert!((l.get(1, 1).unwrap() - 2.0_f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_cholesky_failures() {
        let la = Linalg::default();
        let not_pd = Matrix::from_rows(vec![vec![1.0_f64, 2.0], vec![2.0, 1.0]]).unwrap();
        assert_eq!(
            la.cholesky(&not_pd).unwrap_err(),
            CoreError::FactorizationFailed {
                routine: "potrf",
                status: 2
            }
        );
        let int = Matrix::identity(2, DType::I32).unwrap();
        assert!(matches!(la.cholesky(&int), Err(CoreError::InvalidArgument { .. })));
        let rect = Matrix::zeros(2, 3, DType::F64).unwrap();
        assert!(matches!(la.cholesky(&rect), Err(CoreError::InvalidArgument { .. })));
    }
}
