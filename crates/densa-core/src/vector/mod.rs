//! Dense one-dimensional vector with a run-time dtype.
//!
//! A [`Vector`] is a thin wrapper over a non-empty [`NumericBuffer`]. Like
//! [`Matrix`], every operation returns a new value except the explicit
//! `&mut self` primitives (`swap`, `scale_in_place`, `sort_in_place`).

mod create;
mod display;
mod linalg;
mod ops;
mod reduce;
mod sort;

use serde::{Deserialize, Serialize};

use crate::buffer::NumericBuffer;
use crate::dtype::{DType, Scalar};
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

/// A dense vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVector")]
pub struct Vector {
    buffer: NumericBuffer,
}

#[derive(Deserialize)]
struct RawVector {
    buffer: NumericBuffer,
}

impl TryFrom<RawVector> for Vector {
    type Error = CoreError;

    fn try_from(raw: RawVector) -> Result<Self> {
        Self::from_buffer(raw.buffer)
    }
}

impl Vector {
    /// Wrap an existing buffer. Fails on an empty buffer.
    pub fn from_buffer(buffer: NumericBuffer) -> Result<Self> {
        if buffer.is_empty() {
            return Err(CoreError::InvalidArgument {
                reason: "vector length must be at least 1",
            });
        }
        Ok(Self { buffer })
    }

    /// Build a vector from owned elements; the dtype follows `T`.
    ///
    /// ```
    /// # use densa_core::{Vector, DType};
    /// let v = Vector::from_vec(vec![1.0_f32, 2.0]).unwrap();
    /// assert_eq!(v.dtype(), DType::F32);
    /// assert!(Vector::from_vec(Vec::<i32>::new()).is_err());
    /// ```
    pub fn from_vec<T: Scalar>(data: Vec<T>) -> Result<Self> {
        Self::from_buffer(T::into_buffer(data))
    }

    pub(crate) fn from_parts(buffer: NumericBuffer) -> Self {
        debug_assert!(!buffer.is_empty());
        Self { buffer }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always `false`: vectors hold at least one element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.buffer.dtype()
    }

    #[inline]
    pub fn buffer(&self) -> &NumericBuffer {
        &self.buffer
    }

    #[inline]
    pub(crate) fn buffer_mut(&mut self) -> &mut NumericBuffer {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> NumericBuffer {
        self.buffer
    }

    pub fn as_slice<T: Scalar>(&self) -> Result<&[T]> {
        self.buffer.as_slice()
    }

    /// Element `i` widened to `f64`.
    pub fn get(&self, i: usize) -> Result<f64> {
        self.buffer.get(i).ok_or_else(|| CoreError::IndexOutOfBounds {
            index: vec![i],
            shape: vec![self.len()],
        })
    }

    pub fn set(&mut self, i: usize, value: f64) -> Result<()> {
        self.buffer.set(i, value)
    }

    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.buffer.to_f64_vec()
    }

    pub fn cast(&self, dtype: DType) -> Self {
        Self::from_parts(self.buffer.cast(dtype))
    }

    /// Apply `f` to every element through `f64` and convert back.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_parts(self.buffer.map_f64(f))
    }

    // ------------------------------------------------------------------
    // Conversions to Matrix
    // ------------------------------------------------------------------

    /// Reshape a length-`n*n` vector into an `n x n` matrix.
    ///
    /// ```
    /// # use densa_core::Vector;
    /// let v = Vector::from_vec(vec![1_i32, 2, 3, 4]).unwrap();
    /// assert_eq!(v.as_matrix().unwrap().shape(), (2, 2));
    /// assert!(Vector::from_vec(vec![1_i32, 2, 3]).unwrap().as_matrix().is_err());
    /// ```
    pub fn as_matrix(&self) -> Result<Matrix> {
        let n = self.len().isqrt();
        if n * n != self.len() {
            return Err(CoreError::InvalidArgument {
                reason: "as_matrix requires a perfect-square length",
            });
        }
        Matrix::from_buffer(n, n, self.buffer.clone())
    }

    /// `1 x len` matrix.
    pub fn as_row_matrix(&self) -> Matrix {
        Matrix::from_parts(1, self.len(), self.buffer.clone())
    }

    /// `len x 1` matrix.
    pub fn as_column_matrix(&self) -> Matrix {
        Matrix::from_parts(self.len(), 1, self.buffer.clone())
    }
}
