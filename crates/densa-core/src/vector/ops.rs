//! Element-wise arithmetic on vectors.
//!
//! A scalar or vector operand yields [`Array::Vector`]. A matrix operand
//! broadcasts the vector across the matrix rows and yields
//! [`Array::Matrix`] with `out[i, j] = op(v[j], m[i, j])`.

use crate::error::Result;
use crate::guard::{check_broadcast, check_dtype, check_shape};
use crate::matrix::Matrix;
use crate::operand::{Array, BinaryOp, Operand, broadcast_rows, scalar_with, zip_with};

use super::Vector;

impl Vector {
    pub(crate) fn binary<'a>(&self, op: BinaryOp, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        match rhs.into() {
            Operand::Scalar(s) => {
                let buffer = scalar_with(op, &self.buffer, s, false)?;
                Ok(Array::Vector(Vector::from_parts(buffer)))
            }
            Operand::Vector(v) => {
                check_dtype(self, v)?;
                check_shape(self, v)?;
                let buffer = zip_with(op, &self.buffer, &v.buffer)?;
                Ok(Array::Vector(Vector::from_parts(buffer)))
            }
            Operand::Matrix(m) => {
                check_dtype(self, m)?;
                check_broadcast(m, self)?;
                let buffer = broadcast_rows(op, m.buffer(), m.cols(), &self.buffer, true)?;
                Ok(Array::Matrix(Matrix::from_parts(m.rows(), m.cols(), buffer)))
            }
        }
    }

    /// Element-wise addition.
    ///
    /// ```
    /// # use densa_core::{Matrix, Vector};
    /// let v = Vector::from_vec(vec![1_i32, 2]).unwrap();
    /// let w = v.sum(&v).unwrap().into_vector().unwrap();
    /// assert_eq!(w.as_slice::<i32>().unwrap(), &[2, 4]);
    ///
    /// let m = Matrix::from_rows(vec![vec![10_i32, 20], vec![30, 40]]).unwrap();
    /// let b = v.sum(&m).unwrap().into_matrix().unwrap();
    /// assert_eq!(b.as_slice::<i32>().unwrap(), &[11, 22, 31, 42]);
    /// ```
    pub fn sum<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        self.binary(BinaryOp::Add, rhs)
    }

    pub fn subtract<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        self.binary(BinaryOp::Sub, rhs)
    }

    /// Element-wise product. A scalar `0` short-circuits to zeros.
    pub fn multiply<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        match rhs.into() {
            Operand::Scalar(s) => self.scale(s).map(Array::Vector),
            other => self.binary(BinaryOp::Mul, other),
        }
    }

    pub fn divide<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        self.binary(BinaryOp::Div, rhs)
    }

    pub fn pow<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        self.binary(BinaryOp::Pow, rhs)
    }

    pub fn modulus<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        self.binary(BinaryOp::Rem, rhs)
    }

    pub fn equal<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        self.binary(BinaryOp::Equal, rhs)
    }

    pub fn greater<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        self.binary(BinaryOp::Greater, rhs)
    }

    pub fn less<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        self.binary(BinaryOp::Less, rhs)
    }

    /// Element-wise maximum with a peer vector.
    pub fn maximum(&self, other: &Vector) -> Result<Vector> {
        check_dtype(self, other)?;
        check_shape(self, other)?;
        Ok(Vector::from_parts(zip_with(BinaryOp::Max, &self.buffer, &other.buffer)?))
    }

    /// Element-wise minimum with a peer vector.
    pub fn minimum(&self, other: &Vector) -> Result<Vector> {
        check_dtype(self, other)?;
        check_shape(self, other)?;
        Ok(Vector::from_parts(zip_with(BinaryOp::Min, &self.buffer, &other.buffer)?))
    }

    /// Multiply every element by `c`. Zero gives an explicit zero vector.
    pub fn scale(&self, c: f64) -> Result<Vector> {
        if c == 0.0 {
            return Vector::zeros(self.len(), self.dtype());
        }
        Ok(Vector::from_parts(scalar_with(BinaryOp::Mul, &self.buffer, c, false)?))
    }

    pub fn reciprocal(&self) -> Result<Vector> {
        Ok(Vector::from_parts(scalar_with(BinaryOp::Div, &self.buffer, 1.0, true)?))
    }

    pub fn square(&self) -> Vector {
        self.map(|x| x * x)
    }
}
