//! Dense two-dimensional matrix with a run-time dtype.
//!
//! A [`Matrix`] owns a [`NumericBuffer`] of exactly `rows * cols` elements in
//! row-major order: element `(i, j)` lives at flat offset `i * cols + j`.
//! Both dimensions are at least 1.
//!
//! Every operation returns a new matrix except the explicit `&mut self`
//! row primitives in [`structure`](self) (`swap_rows`, `scale_row`,
//! `add_scale_row`, ...), which are meant for private working copies.

mod create;
mod display;
mod linalg;
mod ops;
mod stats;
mod structure;

use serde::{Deserialize, Serialize};

use crate::buffer::NumericBuffer;
use crate::dtype::{DType, Scalar};
use crate::error::{CoreError, Result};
use crate::guard::element_count;
use crate::vector::Vector;

/// A dense row-major matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    buffer: NumericBuffer,
}

/// Unchecked wire form; validated on the way in.
#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    buffer: NumericBuffer,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = CoreError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Self::from_buffer(raw.rows, raw.cols, raw.buffer)
    }
}

impl Matrix {
    // ------------------------------------------------------------------
    // Construction from raw parts
    // ------------------------------------------------------------------

    /// Wrap an existing buffer.
    ///
    /// Fails if either dimension is zero or the buffer length is not
    /// `rows * cols`.
    pub fn from_buffer(rows: usize, cols: usize, buffer: NumericBuffer) -> Result<Self> {
        let len = element_count(rows, cols)?;
        if buffer.len() != len {
            return Err(CoreError::DimensionMismatch {
                expected: vec![len],
                got: vec![buffer.len()],
            });
        }
        Ok(Self { rows, cols, buffer })
    }

    /// Build a matrix from a flat row-major vector.
    ///
    /// ```
    /// # use densa_core::{Matrix, DType};
    /// let m = Matrix::from_vec(2, 3, vec![1_i32, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m.dtype(), DType::I32);
    /// ```
    pub fn from_vec<T: Scalar>(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        Self::from_buffer(rows, cols, T::into_buffer(data))
    }

    /// Internal constructor for kernels that already produced a buffer of
    /// the right length.
    pub(crate) fn from_parts(rows: usize, cols: usize, buffer: NumericBuffer) -> Self {
        debug_assert_eq!(buffer.len(), rows * cols);
        debug_assert!(rows > 0 && cols > 0);
        Self { rows, cols, buffer }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.buffer.dtype()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn buffer(&self) -> &NumericBuffer {
        &self.buffer
    }

    #[inline]
    pub(crate) fn buffer_mut(&mut self) -> &mut NumericBuffer {
        &mut self.buffer
    }

    /// Consume the matrix and return its storage.
    pub fn into_buffer(self) -> NumericBuffer {
        self.buffer
    }

    /// Typed view of the storage; fails if `T` is not the matrix dtype.
    pub fn as_slice<T: Scalar>(&self) -> Result<&[T]> {
        self.buffer.as_slice()
    }

    /// Element `(i, j)` widened to `f64`.
    pub fn get(&self, i: usize, j: usize) -> Result<f64> {
        if i >= self.rows || j >= self.cols {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![i, j],
                shape: vec![self.rows, self.cols],
            });
        }
        Ok(self.buffer.get(i * self.cols + j).unwrap_or_default())
    }

    /// Overwrite element `(i, j)`.
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<()> {
        if i >= self.rows || j >= self.cols {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![i, j],
                shape: vec![self.rows, self.cols],
            });
        }
        self.buffer.set(i * self.cols + j, value)
    }

    /// Row-major copy of the elements as `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.buffer.to_f64_vec()
    }

    /// Nested row copy as `f64`.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.to_f64_vec()
            .chunks_exact(self.cols)
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Copy converted to another dtype.
    pub fn cast(&self, dtype: DType) -> Self {
        Self::from_parts(self.rows, self.cols, self.buffer.cast(dtype))
    }

    /// Apply `f` to every element through `f64` and convert back.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_parts(self.rows, self.cols, self.buffer.map_f64(f))
    }

    /// Flatten into a vector of length `rows * cols`.
    pub fn as_vector(&self) -> Vector {
        Vector::from_parts(self.buffer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_buffer_validates() {
        let buf = NumericBuffer::F64(vec![1.0; 6]);
        assert!(Matrix::from_buffer(2, 3, buf.clone()).is_ok());
        assert!(matches!(
            Matrix::from_buffer(0, 3, buf.clone()),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Matrix::from_buffer(4, 2, buf),
            Err(CoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_get_set() {
        let mut m = Matrix::zeros(2, 2, DType::F32).unwrap();
        m.set(1, 0, 3.5).unwrap();
        assert!((m.get(1, 0).unwrap() - 3.5).abs() < 1e-12);
        assert!(m.get(2, 0).is_err());
        assert!(m.set(0, 2, 1.0).is_err());
    }

    #[test]
    fn test_to_rows() {
        let m = Matrix::from_vec(2, 2, vec![1_i32, 2, 3, 4]).unwrap();
        assert_eq!(m.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_deserialize_rejects_bad_shape() {
        let good = "rows = 1\ncols = 2\n[buffer]\nF64 = [1.0, 2.0]\n";
        let m: Matrix = toml::from_str(good).unwrap();
        assert_eq!(m.shape(), (1, 2));

        let bad = "rows = 2\ncols = 2\n[buffer]\nF64 = [1.0, 2.0]\n";
        assert!(toml::from_str::<Matrix>(bad).is_err());
    }
}
