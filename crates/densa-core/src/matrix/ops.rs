//! Element-wise arithmetic for [`Matrix`].
//!
//! Each method accepts a scalar, a [`Vector`] (broadcast across every row)
//! or a peer [`Matrix`] through [`Operand`]. Shapes and dtypes are checked
//! before anything is allocated.
//!
//! `Add`, `Sub`, `Mul` and `Div` are also implemented for `&Matrix` with
//! `Output = Result<Matrix>`.

use core::ops::{Add, Div, Mul, Sub};

use crate::error::{CoreError, Result};
use crate::guard::{check_broadcast, check_dtype, check_shape};
use crate::operand::{BinaryOp, Operand, broadcast_rows, scalar_with, zip_with};
use crate::vector::Vector;

use super::Matrix;

impl Matrix {
    /// Resolve `rhs` by kind and apply `op` element-wise.
    pub(crate) fn binary<'a>(&self, op: BinaryOp, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        let buffer = match rhs.into() {
            Operand::Scalar(s) => scalar_with(op, &self.buffer, s, false)?,
            Operand::Matrix(m) => {
                check_dtype(self, m)?;
                check_shape(self, m)?;
                zip_with(op, &self.buffer, &m.buffer)?
            }
            Operand::Vector(v) => {
                check_dtype(self, v)?;
                check_broadcast(self, v)?;
                broadcast_rows(op, &self.buffer, self.cols, v.buffer(), false)?
            }
        };
        Ok(Matrix::from_parts(self.rows, self.cols, buffer))
    }

    /// Element-wise addition.
    ///
    /// ```
    /// # use densa_core::Matrix;
    /// let m = Matrix::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]]).unwrap();
    /// let r = m.sum(&m).unwrap();
    /// assert_eq!(r.to_f64_vec(), vec![2.0, 4.0, 6.0, 8.0]);
    /// ```
    pub fn sum<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        self.binary(BinaryOp::Add, rhs)
    }

    pub fn subtract<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        self.binary(BinaryOp::Sub, rhs)
    }

    /// Element-wise (Hadamard) product. A scalar `0` short-circuits to a
    /// zero matrix, see [`scale`](Self::scale).
    pub fn multiply<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        match rhs.into() {
            Operand::Scalar(s) => self.scale(s),
            other => self.binary(BinaryOp::Mul, other),
        }
    }

    /// Element-wise division. Integer division by zero is an
    /// `InvalidArgument` error; float division follows IEEE semantics.
    pub fn divide<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        self.binary(BinaryOp::Div, rhs)
    }

    pub fn pow<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        self.binary(BinaryOp::Pow, rhs)
    }

    /// Element-wise remainder (truncated, like Rust's `%`).
    pub fn modulus<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        self.binary(BinaryOp::Rem, rhs)
    }

    /// `1` where equal, `0` elsewhere, in the receiver dtype.
    pub fn equal<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        self.binary(BinaryOp::Equal, rhs)
    }

    pub fn greater<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        self.binary(BinaryOp::Greater, rhs)
    }

    pub fn less<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Matrix> {
        self.binary(BinaryOp::Less, rhs)
    }

    /// Element-wise maximum with a peer matrix.
    pub fn maximum(&self, other: &Matrix) -> Result<Matrix> {
        self.binary(BinaryOp::Max, other)
    }

    /// Element-wise minimum with a peer matrix.
    pub fn minimum(&self, other: &Matrix) -> Result<Matrix> {
        self.binary(BinaryOp::Min, other)
    }

    /// Multiply every element by `c`.
    ///
    /// Scaling by zero returns an explicit zero matrix of the same shape and
    /// dtype, so `NaN` and infinite entries do not leak through.
    ///
    /// ```
    /// # use densa_core::{Matrix, DType};
    /// let m = Matrix::full(2, 2, f64::INFINITY, DType::F64).unwrap();
    /// assert_eq!(m.scale(0.0).unwrap(), Matrix::zeros(2, 2, DType::F64).unwrap());
    /// ```
    pub fn scale(&self, c: f64) -> Result<Matrix> {
        if c == 0.0 {
            return Matrix::zeros(self.rows, self.cols, self.dtype());
        }
        self.binary(BinaryOp::Mul, c)
    }

    /// `out[i, j] = self[i, j] - v[i]`: subtract a per-row value.
    pub fn subtract_column_vector(&self, v: &Vector) -> Result<Matrix> {
        check_dtype(self, v)?;
        if v.len() != self.rows {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.rows],
                got: vec![v.len()],
            });
        }
        self.transpose().binary(BinaryOp::Sub, v).map(|m| m.transpose())
    }

    /// `1 / x` for every element.
    pub fn reciprocal(&self) -> Result<Matrix> {
        let buffer = scalar_with(BinaryOp::Div, &self.buffer, 1.0, true)?;
        Ok(Matrix::from_parts(self.rows, self.cols, buffer))
    }

    /// Element-wise square.
    pub fn square(&self) -> Matrix {
        self.map(|x| x * x)
    }

    /// Clamp every element into `[min, max]`.
    pub fn clip(&self, min: f64, max: f64) -> Result<Matrix> {
        if min > max {
            return Err(CoreError::InvalidArgument {
                reason: "clip: min must not exceed max",
            });
        }
        Ok(self.map(|x| x.clamp(min, max)))
    }

    /// Raise every element below `min` to `min`.
    pub fn clip_lower(&self, min: f64) -> Matrix {
        self.map(|x| if x < min { min } else { x })
    }

    /// Lower every element above `max` to `max`.
    pub fn clip_upper(&self, max: f64) -> Matrix {
        self.map(|x| if x > max { max } else { x })
    }
}

// ======================================================================
// Operator overloads on references
// ======================================================================

macro_rules! impl_matrix_binop {
    ($trait:ident, $method:ident, $call:ident) => {
        impl<'a> $trait<&'a Matrix> for &Matrix {
            type Output = Result<Matrix>;

            fn $method(self, rhs: &'a Matrix) -> Result<Matrix> {
                self.$call(rhs)
            }
        }

        impl<'a> $trait<&'a Vector> for &Matrix {
            type Output = Result<Matrix>;

            fn $method(self, rhs: &'a Vector) -> Result<Matrix> {
                self.$call(rhs)
            }
        }

        impl $trait<f64> for &Matrix {
            type Output = Result<Matrix>;

            fn $method(self, rhs: f64) -> Result<Matrix> {
                self.$call(rhs)
            }
        }
    };
}

impl_matrix_binop!(Add, add, sum);
impl_matrix_binop!(Sub, sub, subtract);
impl_matrix_binop!(Mul, mul, multiply);
impl_matrix_binop!(Div, div, divide);

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::dtype::DType;

    fn m22(data: [f64; 4]) -> Matrix {
        Matrix::from_vec(2, 2, data.to_vec()).unwrap()
    }

    #[test]
    fn test_integer_overflow_wraps() {
        let m = Matrix::from_rows(vec![vec![i32::MAX, i32::MIN]]).unwrap();
        assert_eq!(m.sum(&m).unwrap().as_slice::<i32>().unwrap(), &[-2, 0]);
        assert_eq!(m.multiply(&m).unwrap().as_slice::<i32>().unwrap(), &[1, 0]);
        let one = Matrix::from_rows(vec![vec![-1, 1]]).unwrap();
        assert_eq!(
            m.subtract(&one).unwrap().as_slice::<i32>().unwrap(),
            &[i32::MIN, i32::MAX]
        );
    }

    #[test]
    fn test_scalar_ops() {
        let m = m22([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.sum(1.0).unwrap().to_f64_vec(), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(m.subtract(1.0).unwrap().to_f64_vec(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(m.divide(2.0).unwrap().to_f64_vec(), vec![0.5, 1.0, 1.5, 2.0]);
        assert_eq!(m.pow(2.0).unwrap().to_f64_vec(), vec![1.0, 4.0, 9.0, 16.0]);
        assert_eq!(m.modulus(2.0).unwrap().to_f64_vec(), vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_vector_broadcast() {
        let m = Matrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let v = Vector::from_vec(vec![10.0_f64, 20.0, 30.0]).unwrap();
        let r = m.multiply(&v).unwrap();
        assert_eq!(r.to_f64_vec(), vec![10.0, 40.0, 90.0, 40.0, 100.0, 180.0]);
        assert_eq!(r.shape(), (2, 3));

        let short = Vector::from_vec(vec![1.0_f64, 2.0]).unwrap();
        assert!(matches!(
            m.sum(&short),
            Err(CoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_matrix_shape_and_dtype_checks() {
        let a = m22([1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::zeros(2, 3, DType::F64).unwrap();
        let c = Matrix::zeros(2, 2, DType::F32).unwrap();
        assert!(matches!(a.sum(&b), Err(CoreError::DimensionMismatch { .. })));
        assert!(matches!(a.sum(&c), Err(CoreError::DtypeMismatch { .. })));
        // Operands untouched after a failure.
        assert_eq!(a, m22([1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_comparisons() {
        let a = m22([1.0, 5.0, 3.0, 4.0]);
        let b = m22([1.0, 2.0, 7.0, 4.0]);
        assert_eq!(a.equal(&b).unwrap().to_f64_vec(), vec![1.0, 0.0, 0.0, 1.0]);
        assert_eq!(a.greater(&b).unwrap().to_f64_vec(), vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(a.less(3.5).unwrap().to_f64_vec(), vec![1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_scale_zero_short_circuits() {
        let m = m22([f64::NAN, f64::INFINITY, -1.0, 2.0]);
        let z = m.scale(0.0).unwrap();
        assert_eq!(z.to_f64_vec(), vec![0.0; 4]);
        let z = m.multiply(0.0).unwrap();
        assert_eq!(z.to_f64_vec(), vec![0.0; 4]);
    }

    #[test]
    fn test_integer_division_by_zero() {
        let m = Matrix::from_vec(1, 2, vec![4_i32, 6]).unwrap();
        assert_eq!(m.divide(4).unwrap().as_slice::<i32>().unwrap(), &[1, 1]);
        assert!(matches!(
            m.divide(0),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_subtract_column_vector() {
        let m = m22([1.0, 2.0, 3.0, 4.0]);
        let v = Vector::from_vec(vec![1.0_f64, 3.0]).unwrap();
        let r = m.subtract_column_vector(&v).unwrap();
        assert_eq!(r.to_f64_vec(), vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_reciprocal_square_clip() {
        let m = m22([1.0, 2.0, 4.0, -5.0]);
        assert_eq!(m.reciprocal().unwrap().to_f64_vec(), vec![1.0, 0.5, 0.25, -0.2]);
        assert_eq!(m.square().to_f64_vec(), vec![1.0, 4.0, 16.0, 25.0]);
        assert_eq!(m.clip(0.0, 3.0).unwrap().to_f64_vec(), vec![1.0, 2.0, 3.0, 0.0]);
        assert_eq!(m.clip_lower(2.0).to_f64_vec(), vec![2.0, 2.0, 4.0, 2.0]);
        assert_eq!(m.clip_upper(2.0).to_f64_vec(), vec![1.0, 2.0, 2.0, -5.0]);
        assert!(m.clip(1.0, 0.0).is_err());
    }

    #[test]
    fn test_operator_overloads() {
        let a = m22([1.0, 2.0, 3.0, 4.0]);
        let r = (&a + &a).unwrap();
        assert_eq!(r.to_f64_vec(), vec![2.0, 4.0, 6.0, 8.0]);
        let r = (&a * 2.0).unwrap();
        assert_eq!(r.to_f64_vec(), vec![2.0, 4.0, 6.0, 8.0]);
    }
}
