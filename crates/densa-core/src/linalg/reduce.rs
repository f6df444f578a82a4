//! Row echelon forms.
//!
//! [`Linalg::ref_form`] returns the packed `getrf` factors (an upper
//! echelon `U` with the `L` multipliers below the diagonal).
//! [`Linalg::rref`] runs Gauss-Jordan elimination on a working copy with
//! the matrix row primitives, testing pivots for exact non-zero.

use tracing::debug;

use crate::buffer::dispatch_float;
use crate::dtype::Scalar;
use crate::error::Result;
use crate::linalg::decomp::promote;
use crate::linalg::provider::LinalgProvider;
use crate::linalg::{Linalg, check_status};
use crate::matrix::Matrix;

impl<P: LinalgProvider> Linalg<P> {
    /// Row echelon form from LU with partial pivoting, as the packed
    /// factor buffer. Works for any shape; a zero pivot is reported as
    /// [`CoreError::FactorizationFailed`](crate::CoreError::FactorizationFailed).
    #[tracing::instrument(skip(self, m), fields(rows = m.rows(), cols = m.cols()))]
    pub fn ref_form(&self, m: &Matrix) -> Result<Matrix> {
        let (rows, cols) = m.shape();
        dispatch_float!(
            m.buffer(),
            "row echelon form requires a floating-point matrix",
            |d: T| {
                let (packed, _, status) = self.getrf_copy(rows, cols, d.as_slice());
                check_status("getrf", status)?;
                Ok(Matrix::from_parts(rows, cols, T::into_buffer(packed)))
            }
        )
    }

    /// Reduced row echelon form. Integer matrices are promoted to `F64`.
    ///
    /// ```
    /// # use densa_core::{Matrix, linalg::Linalg};
    /// let a = Matrix::from_rows(vec![vec![1, 2], vec![2, 4]]).unwrap();
    /// let r = Linalg::default().rref(&a).unwrap();
    /// assert_eq!(r.to_f64_vec(), vec![1.0, 2.0, 0.0, 0.0]);
    /// ```
    #[tracing::instrument(skip(self, m), fields(rows = m.rows(), cols = m.cols()))]
    pub fn rref(&self, m: &Matrix) -> Result<Matrix> {
        let mut work = promote(m).into_owned();
        let (rows, cols) = work.shape();

        let mut lead = 0;
        for r in 0..rows {
            if lead >= cols {
                break;
            }
            // First row at or below r with a non-zero entry in column lead
            let mut i = r;
            while work.get(i, lead)? == 0.0 {
                i += 1;
                if i == rows {
                    i = r;
                    lead += 1;
                    if lead == cols {
                        debug!(rank = r, "rref");
                        return Ok(work);
                    }
                }
            }

            work.swap_rows(i, r)?;
            let pivot = work.get(r, lead)?;
            work.divide_row(r, pivot)?;
            for k in 0..rows {
                if k != r {
                    let factor = work.get(k, lead)?;
                    if factor != 0.0 {
                        work.add_scale_row(r, k, -factor)?;
                    }
                }
            }
            lead += 1;
        }
        debug!(rank = lead.min(rows), "rref");
        Ok(work)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::error::CoreError;

    fn mat(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_rref_nonsingular_is_identity() {
        let la = Linalg::default();
        let r = la.rref(&mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]])).unwrap();
        assert_eq!(r.to_f64_vec(), vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_rref_singular() {
        let la = Linalg::default();
        let r = la.rref(&mat(vec![vec![1.0, 2.0], vec![2.0, 4.0]])).unwrap();
        assert_eq!(r.to_f64_vec(), vec![1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rref_wide_with_zero_column() {
        let la = Linalg::default();
        let a = mat(vec![
            vec![0.0, 2.0, 4.0, 2.0],
            vec![0.0, 1.0, 3.0, 4.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ]);
        let r = la.rref(&a).unwrap();
        assert_eq!(r.to_rows(), vec![
            vec![0.0, 1.0, 0.0, -5.0],
            vec![0.0, 0.0, 1.0, 3.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ]);
    }

    #[test]
    fn test_rref_idempotent_and_keeps_dtype() {
        let la = Linalg::default();
        let a = mat(vec![vec![2.0, 4.0, 1.0], vec![1.0, 3.0, 7.0]]).cast(DType::F32);
        let once = la.rref(&a).unwrap();
        assert_eq!(once.dtype(), DType::F32);
        assert_eq!(la.rref(&once).unwrap(), once);
    }

    #[test]
    fn test_rref_integer_promotes() {
        let la = Linalg::default();
        let a = Matrix::from_rows(vec![vec![2, 4], vec![1, 3]]).unwrap();
        let r = la.rref(&a).unwrap();
        assert_eq!(r.dtype(), DType::F64);
        assert_eq!(r.to_f64_vec(), vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_ref_form() {
        let la = Linalg::default();
        let a = mat(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let r = la.ref_form(&a).unwrap();
        assert_eq!(r.shape(), (2, 3));
        // Pivot row is [4, 5, 6]
        assert_eq!(r.get(0, 0).unwrap(), 4.0);
        assert_eq!(r.get(0, 2).unwrap(), 6.0);

        let singular = mat(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert!(matches!(
            la.ref_form(&singular),
            Err(CoreError::FactorizationFailed { routine: "getrf", .. })
        ));
    }
}
