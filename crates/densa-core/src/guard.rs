//! Shape and dtype guards.
//!
//! Pure O(1) checks run at the top of every arithmetic entry point, before
//! any output is allocated.

use crate::dtype::DType;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Anything with a dtype and a shape.
pub trait Shaped {
    fn dtype(&self) -> DType;

    /// `[len]` for a vector, `[rows, cols]` for a matrix.
    fn dims(&self) -> Vec<usize>;
}

impl Shaped for Vector {
    fn dtype(&self) -> DType {
        self.buffer().dtype()
    }

    fn dims(&self) -> Vec<usize> {
        vec![self.len()]
    }
}

impl Shaped for Matrix {
    fn dtype(&self) -> DType {
        self.buffer().dtype()
    }

    fn dims(&self) -> Vec<usize> {
        vec![self.rows(), self.cols()]
    }
}

/// Fails with [`CoreError::DtypeMismatch`] if the dtypes differ.
pub fn check_dtype<A: Shaped + ?Sized, B: Shaped + ?Sized>(a: &A, b: &B) -> Result<()> {
    if a.dtype() != b.dtype() {
        return Err(CoreError::DtypeMismatch {
            expected: a.dtype(),
            got: b.dtype(),
        });
    }
    Ok(())
}

/// Element-wise compatibility: equal rows and cols, or equal lengths.
pub fn check_shape<S: Shaped + ?Sized>(a: &S, b: &S) -> Result<()> {
    let (expected, got) = (a.dims(), b.dims());
    if expected != got {
        return Err(CoreError::DimensionMismatch { expected, got });
    }
    Ok(())
}

/// Product compatibility: `a.cols == b.rows`.
pub fn check_dimensions(a: &Matrix, b: &Matrix) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(CoreError::DimensionMismatch {
            expected: vec![a.cols(), b.cols()],
            got: vec![b.rows(), b.cols()],
        });
    }
    Ok(())
}

/// Row-broadcast compatibility: `v.len() == m.cols()`.
pub fn check_broadcast(m: &Matrix, v: &Vector) -> Result<()> {
    if v.len() != m.cols() {
        return Err(CoreError::DimensionMismatch {
            expected: vec![m.cols()],
            got: vec![v.len()],
        });
    }
    Ok(())
}

/// Element count of a `rows x cols` matrix. Both dimensions must be at
/// least 1 and the product must fit in `usize`.
pub fn element_count(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(CoreError::InvalidArgument {
            reason: "matrix rows and cols must be at least 1",
        });
    }
    rows.checked_mul(cols).ok_or(CoreError::InvalidArgument {
        reason: "matrix rows * cols overflows usize",
    })
}

pub fn check_square(m: &Matrix, reason: &'static str) -> Result<()> {
    if !m.is_square() {
        return Err(CoreError::InvalidArgument { reason });
    }
    Ok(())
}

pub(crate) fn check_row(m: &Matrix, row: usize) -> Result<()> {
    if row >= m.rows() {
        return Err(CoreError::IndexOutOfBounds {
            index: vec![row, 0],
            shape: m.dims(),
        });
    }
    Ok(())
}

pub(crate) fn check_col(m: &Matrix, col: usize) -> Result<()> {
    if col >= m.cols() {
        return Err(CoreError::IndexOutOfBounds {
            index: vec![0, col],
            shape: m.dims(),
        });
    }
    Ok(())
}

pub(crate) fn check_index(len: usize, index: usize) -> Result<()> {
    if index >= len {
        return Err(CoreError::IndexOutOfBounds {
            index: vec![index],
            shape: vec![len],
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dtype() {
        let a = Matrix::zeros(2, 2, DType::F64).unwrap();
        let b = Matrix::zeros(2, 2, DType::I32).unwrap();
        assert!(check_dtype(&a, &a).is_ok());
        assert_eq!(
            check_dtype(&a, &b),
            Err(CoreError::DtypeMismatch {
                expected: DType::F64,
                got: DType::I32,
            })
        );
    }

    #[test]
    fn test_element_count() {
        assert_eq!(element_count(2, 3), Ok(6));
        assert!(matches!(element_count(0, 3), Err(CoreError::InvalidArgument { .. })));
        assert!(matches!(
            element_count(usize::MAX, 2),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_check_shape() {
        let a = Matrix::zeros(2, 3, DType::F64).unwrap();
        let b = Matrix::zeros(3, 2, DType::F64).unwrap();
        assert_eq!(
            check_shape(&a, &b),
            Err(CoreError::DimensionMismatch {
                expected: vec![2, 3],
                got: vec![3, 2],
            })
        );
        let u = Vector::zeros(3, DType::F64).unwrap();
        let v = Vector::zeros(4, DType::F64).unwrap();
        assert!(check_shape(&u, &v).is_err());
    }

    #[test]
    fn test_check_dimensions() {
        let a = Matrix::zeros(2, 3, DType::F64).unwrap();
        let b = Matrix::zeros(3, 4, DType::F64).unwrap();
        assert!(check_dimensions(&a, &b).is_ok());
        assert!(check_dimensions(&b, &a).is_err());
    }

    #[test]
    fn test_check_broadcast_and_square() {
        let m = Matrix::zeros(2, 3, DType::F64).unwrap();
        assert!(check_broadcast(&m, &Vector::zeros(3, DType::F64).unwrap()).is_ok());
        assert!(check_broadcast(&m, &Vector::zeros(2, DType::F64).unwrap()).is_err());
        assert!(check_square(&m, "square").is_err());
    }
}
