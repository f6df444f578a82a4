//! Operand kinds and element-wise kernels.
//!
//! Every binary arithmetic method on [`Matrix`] and [`Vector`] takes an
//! `impl Into<Operand>`, so the scalar / vector / matrix dispatch is a
//! `match` on a closed enum rather than a run-time type inspection:
//!
//! ```
//! # use densa_core::{Matrix, Vector, DType};
//! let m = Matrix::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]]).unwrap();
//! let v = Vector::from_vec(vec![10.0_f64, 20.0]).unwrap();
//!
//! let a = m.sum(1.0).unwrap();   // scalar
//! let b = m.sum(&v).unwrap();    // row broadcast
//! let c = m.sum(&m).unwrap();    // element-wise
//! assert_eq!(b.to_f64_vec(), vec![11.0, 22.0, 13.0, 24.0]);
//! # let _ = (a, c);
//! ```

use crate::buffer::NumericBuffer;
use crate::dtype::Scalar;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;

// ======================================================================
// Operand
// ======================================================================

/// Right-hand side of a binary arithmetic operation.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// Applied to every element. Converted to the receiver dtype for float
    /// receivers; integer receivers compute in `f64` and truncate.
    Scalar(f64),
    Vector(&'a Vector),
    Matrix(&'a Matrix),
}

impl From<f64> for Operand<'_> {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<f32> for Operand<'_> {
    fn from(v: f32) -> Self {
        Self::Scalar(f64::from(v))
    }
}

impl From<i32> for Operand<'_> {
    fn from(v: i32) -> Self {
        Self::Scalar(f64::from(v))
    }
}

impl<'a> From<&'a Vector> for Operand<'a> {
    fn from(v: &'a Vector) -> Self {
        Self::Vector(v)
    }
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(m: &'a Matrix) -> Self {
        Self::Matrix(m)
    }
}

/// Result of an operation whose output kind depends on the operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    Vector(Vector),
    Matrix(Matrix),
}

impl Array {
    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Self::Matrix(m) => Some(m),
            Self::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Self::Vector(v) => Some(v),
            Self::Matrix(_) => None,
        }
    }

    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Self::Matrix(m) => Some(m),
            Self::Vector(_) => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Self::Vector(v) => Some(v),
            Self::Matrix(_) => None,
        }
    }

    /// Flat copy of the elements as `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Self::Vector(v) => v.to_f64_vec(),
            Self::Matrix(m) => m.to_f64_vec(),
        }
    }
}

// ======================================================================
// BinaryOp
// ======================================================================

/// Element-wise binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Rem,
    /// `1` where equal, else `0`.
    Equal,
    /// `1` where `lhs > rhs`, else `0`.
    Greater,
    /// `1` where `lhs < rhs`, else `0`.
    Less,
    Max,
    Min,
}

const DIV_BY_ZERO: CoreError = CoreError::InvalidArgument {
    reason: "integer division or modulus by zero",
};

impl BinaryOp {
    /// Apply to two elements of the same type. `None` on integer division
    /// or modulus by zero.
    #[inline]
    pub fn apply<T: Scalar>(self, a: T, b: T) -> Option<T> {
        let flag = |c: bool| if c { T::one() } else { T::zero() };
        match self {
            Self::Add => Some(a.wrapping_add(b)),
            Self::Sub => Some(a.wrapping_sub(b)),
            Self::Mul => Some(a.wrapping_mul(b)),
            Self::Div => a.checked_div(b),
            Self::Pow => Some(a.pow(b)),
            Self::Rem => a.checked_rem(b),
            Self::Equal => Some(flag(a == b)),
            Self::Greater => Some(flag(a > b)),
            Self::Less => Some(flag(a < b)),
            Self::Max => Some(if b > a { b } else { a }),
            Self::Min => Some(if b < a { b } else { a }),
        }
    }

    /// Apply with an `f64` scalar on the right (or left, when `flipped`).
    #[inline]
    fn apply_scalar<T: Scalar>(self, a: T, s: f64, flipped: bool) -> Option<T> {
        let (x, y) = if flipped { (T::from_f64(s), a) } else { (a, T::from_f64(s)) };
        if T::DTYPE.is_float() {
            return self.apply(x, y);
        }
        // Integer receivers: compute in f64 so fractional scalars are not
        // truncated before the operation.
        let (xf, yf) = if flipped { (s, a.to_f64()) } else { (a.to_f64(), s) };
        if matches!(self, Self::Div | Self::Rem) && yf == 0.0 {
            return None;
        }
        self.apply(xf, yf).map(T::from_f64)
    }
}

// ======================================================================
// Buffer kernels
// ======================================================================

macro_rules! dispatch_pair {
    ($a:expr, $b:expr, |$x:ident, $y:ident| $body:expr) => {
        match ($a, $b) {
            (NumericBuffer::F32($x), NumericBuffer::F32($y)) => $body.map(NumericBuffer::F32),
            (NumericBuffer::F64($x), NumericBuffer::F64($y)) => $body.map(NumericBuffer::F64),
            (NumericBuffer::I32($x), NumericBuffer::I32($y)) => $body.map(NumericBuffer::I32),
            (a, b) => Err(CoreError::DtypeMismatch {
                expected: a.dtype(),
                got: b.dtype(),
            }),
        }
    };
}

fn zip_typed<T: Scalar>(op: BinaryOp, a: &[T], b: &[T]) -> Result<Vec<T>> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| op.apply(x, y).ok_or(DIV_BY_ZERO))
        .collect()
}

fn scalar_typed<T: Scalar>(op: BinaryOp, a: &[T], s: f64, flipped: bool) -> Result<Vec<T>> {
    a.iter()
        .map(|&x| op.apply_scalar(x, s, flipped).ok_or(DIV_BY_ZERO))
        .collect()
}

fn broadcast_typed<T: Scalar>(
    op: BinaryOp,
    m: &[T],
    cols: usize,
    v: &[T],
    vector_first: bool,
) -> Result<Vec<T>> {
    m.chunks_exact(cols)
        .flat_map(|row| row.iter().zip(v))
        .map(|(&x, &y)| {
            let r = if vector_first { op.apply(y, x) } else { op.apply(x, y) };
            r.ok_or(DIV_BY_ZERO)
        })
        .collect()
}

/// `out[i] = op(a[i], b[i])`. Lengths are assumed checked by the caller.
pub(crate) fn zip_with(op: BinaryOp, a: &NumericBuffer, b: &NumericBuffer) -> Result<NumericBuffer> {
    dispatch_pair!(a, b, |x, y| zip_typed(op, x, y))
}

/// `out[i] = op(a[i], s)`, or `op(s, a[i])` when `flipped`.
pub(crate) fn scalar_with(
    op: BinaryOp,
    a: &NumericBuffer,
    s: f64,
    flipped: bool,
) -> Result<NumericBuffer> {
    match a {
        NumericBuffer::F32(x) => scalar_typed(op, x, s, flipped).map(NumericBuffer::F32),
        NumericBuffer::F64(x) => scalar_typed(op, x, s, flipped).map(NumericBuffer::F64),
        NumericBuffer::I32(x) => scalar_typed(op, x, s, flipped).map(NumericBuffer::I32),
    }
}

/// `out[i, j] = op(m[i, j], v[j])`, or `op(v[j], m[i, j])` when
/// `vector_first`.
pub(crate) fn broadcast_rows(
    op: BinaryOp,
    m: &NumericBuffer,
    cols: usize,
    v: &NumericBuffer,
    vector_first: bool,
) -> Result<NumericBuffer> {
    dispatch_pair!(m, v, |x, y| broadcast_typed(op, x, cols, y, vector_first))
}
