//! Matrix factories: zeros, ones, full, identity, diagonal, nested literals.

use crate::buffer::NumericBuffer;
use crate::dtype::{DType, Scalar};
use crate::error::{CoreError, Result};
use crate::guard::element_count;

use super::Matrix;

impl Matrix {
    /// A `rows x cols` matrix of zeros.
    ///
    /// ```
    /// # use densa_core::{Matrix, DType};
    /// let m = Matrix::zeros(2, 3, DType::F64).unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    /// assert!(m.to_f64_vec().iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(rows: usize, cols: usize, dtype: DType) -> Result<Self> {
        Self::full(rows, cols, 0.0, dtype)
    }

    pub fn ones(rows: usize, cols: usize, dtype: DType) -> Result<Self> {
        Self::full(rows, cols, 1.0, dtype)
    }

    /// A matrix with every element set to `value` (converted to `dtype`).
    pub fn full(rows: usize, cols: usize, value: f64, dtype: DType) -> Result<Self> {
        let buffer = NumericBuffer::full(dtype, element_count(rows, cols)?, value)?;
        Ok(Self::from_parts(rows, cols, buffer))
    }

    /// The `n x n` identity matrix.
    ///
    /// ```
    /// # use densa_core::{Matrix, DType};
    /// let eye = Matrix::identity(2, DType::F64).unwrap();
    /// assert_eq!(eye.to_f64_vec(), vec![1.0, 0.0, 0.0, 1.0]);
    /// ```
    pub fn identity(n: usize, dtype: DType) -> Result<Self> {
        let mut m = Self::zeros(n, n, dtype)?;
        for i in 0..n {
            m.buffer_mut().set(i * n + i, 1.0)?;
        }
        Ok(m)
    }

    /// A square matrix with `elements` on the diagonal and zeros elsewhere.
    pub fn diagonal(elements: &[f64], dtype: DType) -> Result<Self> {
        let n = elements.len();
        let mut m = Self::zeros(n, n, dtype)?;
        for (i, &e) in elements.iter().enumerate() {
            m.buffer_mut().set(i * n + i, e)?;
        }
        Ok(m)
    }

    /// Build a matrix from nested rows. Every row must have the same length.
    ///
    /// ```
    /// # use densa_core::Matrix;
    /// let m = Matrix::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    /// assert!(Matrix::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0]]).is_err());
    /// ```
    pub fn from_rows<T: Scalar>(rows: Vec<Vec<T>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(CoreError::InvalidArgument {
                reason: "matrix rows and cols must be at least 1",
            });
        }
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(CoreError::DimensionMismatch {
                    expected: vec![n_cols],
                    got: vec![row.len()],
                });
            }
            data.extend(row);
        }
        Self::from_vec(n_rows, n_cols, data)
    }

    /// Build a matrix of `dtype` from nested `f64` rows.
    pub fn from_rows_f64(rows: &[Vec<f64>], dtype: DType) -> Result<Self> {
        Ok(Self::from_rows(rows.to_vec())?.cast(dtype))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            Matrix::zeros(0, 2, DType::F64),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(Matrix::identity(0, DType::F64).is_err());
        assert!(Matrix::diagonal(&[], DType::F64).is_err());
    }

    #[test]
    fn test_full_int() {
        let m = Matrix::full(2, 2, 5.0, DType::I32).unwrap();
        assert_eq!(m.as_slice::<i32>().unwrap(), &[5, 5, 5, 5]);
    }

    #[test]
    fn test_diagonal() {
        let m = Matrix::diagonal(&[1.0, 2.0, 3.0], DType::F32).unwrap();
        assert_eq!(
            m.as_slice::<f32>().unwrap(),
            &[1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0]
        );
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Matrix::from_rows(vec![vec![1_i32, 2, 3], vec![4, 5]]).unwrap_err();
        assert_eq!(
            err,
            CoreError::DimensionMismatch {
                expected: vec![3],
                got: vec![2],
            }
        );
    }

    #[test]
    fn test_from_rows_f64_casts() {
        let m = Matrix::from_rows_f64(&[vec![1.5, 2.5]], DType::I32).unwrap();
        assert_eq!(m.as_slice::<i32>().unwrap(), &[1, 2]);
    }
}
