//! Vector factories: constant fills, ranges and evenly spaced grids.

use crate::buffer::NumericBuffer;
use crate::dtype::DType;
use crate::error::{CoreError, Result};

use super::Vector;

/// Upper bound on the element count of [`Vector::range`].
const RANGE_MAX_LEN: usize = i32::MAX as usize;

impl Vector {
    pub fn zeros(len: usize, dtype: DType) -> Result<Self> {
        Self::full(len, 0.0, dtype)
    }

    pub fn ones(len: usize, dtype: DType) -> Result<Self> {
        Self::full(len, 1.0, dtype)
    }

    /// `len` copies of `value`, converted to `dtype`.
    pub fn full(len: usize, value: f64, dtype: DType) -> Result<Self> {
        Ok(Self::from_parts(NumericBuffer::full(dtype, len, value)?))
    }

    /// Build a vector of `dtype` from `f64` values.
    pub fn from_slice_f64(values: &[f64], dtype: DType) -> Result<Self> {
        Self::from_buffer(NumericBuffer::from_f64_iter(dtype, values.iter().copied())?)
    }

    /// Values from `start` toward `end` in steps of `|step|`.
    ///
    /// The direction follows the sign of `end - start`, and `end` is
    /// included when it lands on the grid.
    ///
    /// ```
    /// # use densa_core::{Vector, DType};
    /// let v = Vector::range(0.0, 1.0, 0.25, DType::F64).unwrap();
    /// assert_eq!(v.to_f64_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    /// let down = Vector::range(3.0, 0.0, 1.0, DType::I32).unwrap();
    /// assert_eq!(down.to_f64_vec(), vec![3.0, 2.0, 1.0, 0.0]);
    /// ```
    pub fn range(start: f64, end: f64, step: f64, dtype: DType) -> Result<Self> {
        if step == 0.0 || !step.is_finite() || !start.is_finite() || !end.is_finite() {
            return Err(CoreError::InvalidArgument {
                reason: "range: step must be non-zero and bounds finite",
            });
        }
        let step = if end < start { -step.abs() } else { step.abs() };
        let span = (end - start) / step;
        // Tolerate rounding so that an exact grid end is not dropped.
        let last = (span + span.abs() * f64::EPSILON * 4.0).floor();
        if !last.is_finite() || last >= RANGE_MAX_LEN as f64 {
            return Err(CoreError::InvalidArgument {
                reason: "range: too many elements",
            });
        }
        let n = last as usize + 1;
        let values = (0..n).map(|k| start + step * k as f64);
        Ok(Self::from_parts(NumericBuffer::from_f64_iter(dtype, values)?))
    }

    /// `n` evenly spaced values from `min` to `max`, both included.
    ///
    /// Requires `min <= max` and `n >= 2`. The last element is exactly `max`.
    pub fn linspace(min: f64, max: f64, n: usize, dtype: DType) -> Result<Self> {
        if min > max {
            return Err(CoreError::InvalidArgument {
                reason: "linspace: min must not exceed max",
            });
        }
        if n < 2 {
            return Err(CoreError::InvalidArgument {
                reason: "linspace requires n >= 2",
            });
        }
        let step = (max - min) / (n - 1) as f64;
        let values = (0..n).map(|i| if i == n - 1 { max } else { min + step * i as f64 });
        Ok(Self::from_parts(NumericBuffer::from_f64_iter(dtype, values)?))
    }
}
