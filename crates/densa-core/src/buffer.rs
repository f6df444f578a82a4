//! Dtype-tagged contiguous storage.
//!
//! [`NumericBuffer`] is the allocation unit behind every [`Matrix`] and
//! [`Vector`]. Its length is fixed at construction; operations that change
//! shape build a new buffer instead of resizing an existing one.
//!
//! [`Matrix`]: crate::Matrix
//! [`Vector`]: crate::Vector

use serde::{Deserialize, Serialize};

use crate::dtype::{DType, Scalar};
use crate::error::{CoreError, Result};

/// Contiguous storage of one of the supported element types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NumericBuffer {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
}

/// Run a generic expression against the typed storage of a buffer.
///
/// `$d` is bound to the inner `Vec` and `$T` to its element type.
///
/// ```ignore
/// let total = dispatch!(&buf, |d: T| d.iter().map(|&x| x.to_f64()).sum::<f64>());
/// ```
macro_rules! dispatch {
    ($buf:expr, |$d:ident : $T:ident| $body:expr) => {
        match $buf {
            $crate::buffer::NumericBuffer::F32($d) => {
                #[allow(dead_code)]
                type $T = f32;
                $body
            }
            $crate::buffer::NumericBuffer::F64($d) => {
                #[allow(dead_code)]
                type $T = f64;
                $body
            }
            $crate::buffer::NumericBuffer::I32($d) => {
                #[allow(dead_code)]
                type $T = i32;
                $body
            }
        }
    };
}
pub(crate) use dispatch;

/// Like [`dispatch!`] but only for float storage; integer storage yields
/// an `InvalidArgument` error with `$reason`.
macro_rules! dispatch_float {
    ($buf:expr, $reason:expr, |$d:ident : $T:ident| $body:expr) => {
        match $buf {
            $crate::buffer::NumericBuffer::F32($d) => {
                #[allow(dead_code)]
                type $T = f32;
                $body
            }
            $crate::buffer::NumericBuffer::F64($d) => {
                #[allow(dead_code)]
                type $T = f64;
                $body
            }
            $crate::buffer::NumericBuffer::I32(_) => {
                return Err($crate::error::CoreError::InvalidArgument { reason: $reason });
            }
        }
    };
}
pub(crate) use dispatch_float;

impl NumericBuffer {
    /// Wrap an owned vector, rejecting empty storage.
    pub fn from_vec<T: Scalar>(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(CoreError::InvalidArgument {
                reason: "buffer length must be at least 1",
            });
        }
        Ok(T::into_buffer(data))
    }

    /// A buffer of `len` copies of `value`, converted to `dtype`.
    pub fn full(dtype: DType, len: usize, value: f64) -> Result<Self> {
        if len == 0 {
            return Err(CoreError::InvalidArgument {
                reason: "buffer length must be at least 1",
            });
        }
        Ok(match dtype {
            DType::F32 => Self::F32(vec![f32::from_f64(value); len]),
            DType::F64 => Self::F64(vec![value; len]),
            DType::I32 => Self::I32(vec![i32::from_f64(value); len]),
        })
    }

    /// A zero-filled buffer.
    pub fn zeros(dtype: DType, len: usize) -> Result<Self> {
        Self::full(dtype, len, 0.0)
    }

    /// Build a buffer of `dtype` from `f64` values.
    pub fn from_f64_iter<I: IntoIterator<Item = f64>>(dtype: DType, iter: I) -> Result<Self> {
        let buf = match dtype {
            DType::F32 => Self::F32(iter.into_iter().map(f32::from_f64).collect()),
            DType::F64 => Self::F64(iter.into_iter().collect()),
            DType::I32 => Self::I32(iter.into_iter().map(i32::from_f64).collect()),
        };
        if buf.is_empty() {
            return Err(CoreError::InvalidArgument {
                reason: "buffer length must be at least 1",
            });
        }
        Ok(buf)
    }

    /// Element type tag.
    pub fn dtype(&self) -> DType {
        match self {
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
            Self::I32(_) => DType::I32,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        dispatch!(self, |d: T| d.len())
    }

    /// Always `false` for a buffer built through the checked constructors.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `i` widened to `f64`.
    pub fn get(&self, i: usize) -> Option<f64> {
        dispatch!(self, |d: T| d.get(i).map(|&x| x.to_f64()))
    }

    /// Overwrite element `i` with `value` converted to the buffer dtype.
    pub fn set(&mut self, i: usize, value: f64) -> Result<()> {
        let len = self.len();
        dispatch!(self, |d: T| match d.get_mut(i) {
            Some(slot) => {
                *slot = T::from_f64(value);
                Ok(())
            }
            None => Err(CoreError::IndexOutOfBounds {
                index: vec![i],
                shape: vec![len],
            }),
        })
    }

    /// Borrow the storage as `&[T]`, or fail if the dtype differs.
    pub fn as_slice<T: Scalar>(&self) -> Result<&[T]> {
        T::slice_of(self).ok_or(CoreError::DtypeMismatch {
            expected: T::DTYPE,
            got: self.dtype(),
        })
    }

    /// Mutably borrow the storage as `&mut [T]`, or fail if the dtype differs.
    pub fn as_mut_slice<T: Scalar>(&mut self) -> Result<&mut [T]> {
        let got = self.dtype();
        T::slice_of_mut(self).ok_or(CoreError::DtypeMismatch {
            expected: T::DTYPE,
            got,
        })
    }

    /// Copy every element into a `Vec<f64>`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        dispatch!(self, |d: T| d.iter().map(|&x| x.to_f64()).collect())
    }

    /// Convert to another dtype. Float to integer truncates toward zero.
    pub fn cast(&self, dtype: DType) -> Self {
        if dtype == self.dtype() {
            return self.clone();
        }
        let values = self.to_f64_vec();
        match dtype {
            DType::F32 => Self::F32(values.into_iter().map(f32::from_f64).collect()),
            DType::F64 => Self::F64(values),
            DType::I32 => Self::I32(values.into_iter().map(i32::from_f64).collect()),
        }
    }

    /// Apply `f` to every element through `f64` and convert back.
    pub fn map_f64(&self, f: impl Fn(f64) -> f64) -> Self {
        dispatch!(self, |d: T| T::into_buffer(
            d.iter().map(|&x| T::from_f64(f(x.to_f64()))).collect()
        ))
    }

    /// Swap elements `i` and `j` in place.
    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        dispatch!(self, |d: T| d.swap(i, j));
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_rejected() {
        assert!(matches!(
            NumericBuffer::from_vec::<f64>(vec![]),
            Err(CoreError::InvalidArgument { .. })
        ));
        assert!(NumericBuffer::zeros(DType::I32, 0).is_err());
    }

    #[test]
    fn test_full_converts_value() {
        let b = NumericBuffer::full(DType::I32, 3, 2.7).unwrap();
        assert_eq!(b, NumericBuffer::I32(vec![2, 2, 2]));
        assert_eq!(b.len(), 3);
        assert_eq!(b.dtype(), DType::I32);
    }

    #[test]
    fn test_get_set() {
        let mut b = NumericBuffer::zeros(DType::F32, 2).unwrap();
        b.set(1, 1.5).unwrap();
        assert_eq!(b.get(1), Some(1.5));
        assert_eq!(b.get(2), None);
        assert!(matches!(
            b.set(5, 0.0),
            Err(CoreError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_typed_slice_checks_dtype() {
        let b = NumericBuffer::from_vec(vec![1.0_f64, 2.0]).unwrap();
        assert_eq!(b.as_slice::<f64>().unwrap(), &[1.0, 2.0]);
        assert_eq!(
            b.as_slice::<i32>(),
            Err(CoreError::DtypeMismatch {
                expected: DType::I32,
                got: DType::F64,
            })
        );
    }

    #[test]
    fn test_cast() {
        let b = NumericBuffer::from_vec(vec![1.9_f64, -1.9]).unwrap();
        assert_eq!(b.cast(DType::I32), NumericBuffer::I32(vec![1, -1]));
        assert_eq!(b.cast(DType::F64), b);
    }
}
