//! Eigendecomposition.
//!
//! Symmetric mode goes through `syev` and always yields real eigenpairs in
//! ascending order. General mode goes through `geev`; only the real parts
//! of the eigenvalues are surfaced as [`Eigen::values`], while
//! [`Eigen::is_real`] and [`Eigen::max_imaginary`] report whether anything
//! was dropped.

use tracing::{debug, warn};

use crate::buffer::dispatch_float;
use crate::dtype::{Real, Scalar};
use crate::error::Result;
use crate::guard::check_square;
use crate::linalg::provider::LinalgProvider;
use crate::linalg::{Linalg, check_status};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Eigenvalues and eigenvectors of a square matrix.
///
/// Row `i` of [`vectors`](Self::vectors) is the eigenvector for
/// `values[i]`. For a complex pair `a ± ib` at positions `i, i + 1`, rows
/// `i` and `i + 1` hold the real and imaginary parts of the eigenvector
/// belonging to `a + ib`.
#[derive(Debug, Clone)]
pub struct Eigen {
    values: Vector,
    vectors: Matrix,
    imaginary: Vec<f64>,
}

impl Eigen {
    /// Real parts of the eigenvalues.
    pub fn values(&self) -> &Vector {
        &self.values
    }

    pub fn vectors(&self) -> &Matrix {
        &self.vectors
    }

    /// `true` when every eigenvalue has a zero imaginary part.
    pub fn is_real(&self) -> bool {
        self.imaginary.iter().all(|&v| v == 0.0)
    }

    /// Largest `|Im(lambda)|`.
    pub fn max_imaginary(&self) -> f64 {
        self.imaginary.iter().fold(0.0, |acc, &v| acc.max(v.abs()))
    }

    /// `(values, vectors)`.
    pub fn into_parts(self) -> (Vector, Matrix) {
        (self.values, self.vectors)
    }
}

/// Column-convention vectors `a` (n x n) transposed so that row `i` holds
/// column `i`.
fn rows_from_columns<T: Real>(a: &[T], n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); n * n];
    for i in 0..n {
        for j in 0..n {
            out[j * n + i] = a[i * n + j];
        }
    }
    out
}

impl<P: LinalgProvider> Linalg<P> {
    /// Eigendecomposition of a square floating-point matrix.
    ///
    /// With `symmetric == true` only the symmetric solver is used and the
    /// values come out ascending; otherwise the general solver runs.
    ///
    /// ```
    /// # use densa_core::{Matrix, linalg::Linalg};
    /// let a = Matrix::from_rows(vec![vec![2.0_f64, 0.0], vec![0.0, 3.0]]).unwrap();
    /// let eig = Linalg::default().eigen(&a, true).unwrap();
    /// assert_eq!(eig.values().to_f64_vec(), vec![2.0, 3.0]);
    /// ```
    #[tracing::instrument(skip(self, m), fields(rows = m.rows(), cols = m.cols()))]
    pub fn eigen(&self, m: &Matrix, symmetric: bool) -> Result<Eigen> {
        check_square(m, "eigendecomposition requires a square matrix")?;
        let n = m.rows();
        dispatch_float!(
            m.buffer(),
            "eigendecomposition requires a floating-point matrix",
            |d: T| {
                let mut work = d.clone();
                let mut wr = vec![T::zero(); n];
                let mut wi = vec![T::zero(); n];
                let vectors = if symmetric {
                    debug!(n, "syev");
                    let status = self.provider.syev(n, &mut work, n, &mut wr);
                    check_status("syev", status)?;
                    rows_from_columns(&work, n)
                } else {
                    let mut vr = vec![T::zero(); n * n];
                    debug!(n, "geev");
                    let status = self.provider.geev(n, &mut work, n, &mut wr, &mut wi, &mut vr, n);
                    check_status("geev", status)?;
                    rows_from_columns(&vr, n)
                };

                let imaginary: Vec<f64> = wi.iter().map(|v| v.to_f64()).collect();
                if imaginary.iter().any(|&v| v != 0.0) {
                    warn!("complex eigenvalues present; only real parts are returned");
                }
                Ok(Eigen {
                    values: Vector::from_parts(T::into_buffer(wr)),
                    vectors: Matrix::from_parts(n, n, T::into_buffer(vectors)),
                    imaginary,
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
    use approx::assert_abs_diff_eq;

    /// `max_i |(A v)_i - lambda v_i|` with `v` taken from row `k`.
    fn residual(la: &Linalg, a: &Matrix, eig: &Eigen, k: usize) -> f64 {
        let v = eig.vectors().row_as_vector(k).unwrap();
        let lambda = eig.values().get(k).unwrap();
        let av = la.matvec(a, &v).unwrap().to_f64_vec();
        av.iter()
            .zip(v.to_f64_vec())
            .map(|(x, y)| (x - lambda * y).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_symmetric() {
        let la = Linalg::default();
        let a = Matrix::from_rows(vec![vec![2.0_f64, 1.0], vec![1.0, 3.0]]).unwrap();
        let eig = la.eigen(&a, true).unwrap();
        let s5 = 5.0_f64.sqrt();
        let vals = eig.values().to_f64_vec();
        assert_abs_diff_eq!(vals[0], (5.0 - s5) / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vals[1], (5.0 + s5) / 2.0, epsilon = 1e-12);
        assert!(eig.is_real());
        for k in 0..2 {
            assert!(residual(&la, &a, &eig, k) < 1e-10);
        }
    }

    #[test]
    fn test_general_real() {
        let la = Linalg::default();
        let a = Matrix::from_rows(vec![
            vec![4.0_f64, 1.0, 0.0],
            vec![-2.0, 1.0, 0.0],
            vec![0.0, 0.0, 7.0],
        ])
        .unwrap();
        let eig = la.eigen(&a, false).unwrap();
        assert!(eig.is_real());
        let mut vals = eig.values().to_f64_vec();
        vals.sort_by(f64::total_cmp);
        assert_abs_diff_eq!(vals[0], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(vals[1], 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(vals[2], 7.0, epsilon = 1e-10);
        for k in 0..3 {
            assert!(residual(&la, &a, &eig, k) < 1e-8);
        }
    }

    #[test]
    fn test_general_complex_reports_imaginary() {
        let la = Linalg::default();
        let a = Matrix::from_rows(vec![vec![0.0_f64, -1.0], vec![1.0, 0.0]]).unwrap();
        let eig = la.eigen(&a, false).unwrap();
        assert!(!eig.is_real());
        assert_abs_diff_eq!(eig.max_imaginary(), 1.0, epsilon = 1e-12);
        assert!(eig.values().to_f64_vec().iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_rejects() {
        let la = Linalg::default();
        let int = Matrix::identity(2, DType::I32).unwrap();
        assert!(matches!(la.eigen(&int, true), Err(CoreError::InvalidArgument { .. })));
        let rect = Matrix::zeros(2, 3, DType::F32).unwrap();
        assert!(matches!(la.eigen(&rect, false), Err(CoreError::InvalidArgument { .. })));
    }

    #[test]
    fn test_sweep_cap_surfaces_failure() {
        let la = Linalg::native(crate::config::LinalgConfig {
            jacobi_max_sweeps: 0,
            ..Default::default()
        });
        let a = Matrix::from_rows(vec![vec![2.0_f64, 1.0], vec![1.0, 3.0]]).unwrap();
        assert!(la.eigen(&a, true).unwrap_err().is_factorization_failure());
    }
}
