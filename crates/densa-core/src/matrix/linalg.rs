//! Linear-algebra conveniences backed by the native provider.
//!
//! Each method builds a [`Linalg::default`] orchestrator on the spot; use
//! [`Linalg`] directly to inject another provider or configuration.

use crate::error::Result;
use crate::linalg::{Cholesky, Eigen, Linalg, Lu, NormKind, Svd};
use crate::operand::{Array, Operand};

use super::Matrix;

impl Matrix {
    /// Product with a scalar, vector or matrix.
    ///
    /// A matrix operand gives the matrix product (`self.cols == rhs.rows`);
    /// a vector operand gives `self * v` (`v.len == self.cols`).
    ///
    /// ```
    /// # use densa_core::{Matrix, Vector};
    /// let a = Matrix::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]]).unwrap();
    /// let v = Vector::from_vec(vec![1.0_f64, 1.0]).unwrap();
    /// let av = a.dot(&v).unwrap().into_vector().unwrap();
    /// assert_eq!(av.to_f64_vec(), vec![3.0, 7.0]);
    /// ```
    pub fn dot<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Array> {
        let la = Linalg::default();
        match rhs.into() {
            Operand::Scalar(c) => self.scale(c).map(Array::Matrix),
            Operand::Vector(v) => la.matvec(self, v).map(Array::Vector),
            Operand::Matrix(m) => la.matmul(self, m).map(Array::Matrix),
        }
    }

    /// `sign(P) * prod(diag(U))` from LU. Square matrices only.
    pub fn determinant(&self) -> Result<f64> {
        Linalg::default().determinant(self)
    }

    pub fn lu(&self) -> Result<Lu> {
        Linalg::default().lu(self)
    }

    pub fn cholesky(&self) -> Result<Cholesky> {
        Linalg::default().cholesky(self)
    }

    pub fn eigen(&self, symmetric: bool) -> Result<Eigen> {
        Linalg::default().eigen(self, symmetric)
    }

    pub fn svd(&self) -> Result<Svd> {
        Linalg::default().svd(self)
    }

    pub fn pseudo_inverse(&self) -> Result<Matrix> {
        Linalg::default().pseudo_inverse(self)
    }

    pub fn inverse(&self) -> Result<Matrix> {
        Linalg::default().inverse(self)
    }

    /// Packed row echelon form from LU with partial pivoting.
    pub fn ref_form(&self) -> Result<Matrix> {
        Linalg::default().ref_form(self)
    }

    /// Reduced row echelon form.
    pub fn rref(&self) -> Result<Matrix> {
        Linalg::default().rref(self)
    }

    /// Maximum absolute column sum.
    pub fn norm_l1(&self) -> f64 {
        Linalg::default().norm(self, NormKind::One)
    }

    /// Frobenius norm, the entry-wise L2 norm.
    pub fn norm_l2(&self) -> f64 {
        self.norm_frob()
    }

    /// Maximum absolute row sum.
    pub fn norm_inf(&self) -> f64 {
        Linalg::default().norm(self, NormKind::Inf)
    }

    pub fn norm_frob(&self) -> f64 {
        Linalg::default().norm(self, NormKind::Frobenius)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::error::CoreError;
    use crate::vector::Vector;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_integer_products_wrap() {
        let a = Matrix::from_rows(vec![vec![i32::MAX, i32::MAX]]).unwrap();
        let v = Vector::from_vec(vec![2_i32, 2]).unwrap();
        let out = a.dot(&v).unwrap().into_vector().unwrap();
        assert_eq!(out.as_slice::<i32>().unwrap(), &[-4]);

        let b = Matrix::from_rows(vec![vec![2], vec![2]]).unwrap();
        let out = a.dot(&b).unwrap().into_matrix().unwrap();
        assert_eq!(out.as_slice::<i32>().unwrap(), &[-4]);
    }

    #[test]
    fn test_dot_dispatch() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let scaled = a.dot(2.0).unwrap().into_matrix().unwrap();
        assert_eq!(scaled.to_f64_vec(), vec![2.0, 4.0, 6.0, 8.0]);

        let prod = a.dot(&a).unwrap().into_matrix().unwrap();
        assert_eq!(prod.to_f64_vec(), vec![7.0, 10.0, 15.0, 22.0]);

        let v = Vector::from_vec(vec![1.0_f64, 2.0, 3.0]).unwrap();
        assert!(matches!(a.dot(&v), Err(CoreError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_determinant() {
        assert_eq!(m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).determinant().unwrap(), -2.0);
        let rect = Matrix::zeros(2, 3, DType::F64).unwrap();
        assert!(matches!(rect.determinant(), Err(CoreError::InvalidArgument { .. })));
    }

    #[test]
    fn test_inverse_and_rref() {
        let a = m(vec![vec![4.0, 7.0], vec![2.0, 6.0]]);
        let inv = a.inverse().unwrap();
        let eye = a.dot(&inv).unwrap().into_matrix().unwrap();
        for (x, y) in eye.to_f64_vec().iter().zip([1.0, 0.0, 0.0, 1.0]) {
            assert!((x - y).abs() < 1e-12);
        }
        assert_eq!(a.rref().unwrap().to_f64_vec(), vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_norms() {
        let a = m(vec![vec![1.0, -2.0], vec![-3.0, 4.0]]);
        assert_eq!(a.norm_l1(), 6.0);
        assert_eq!(a.norm_inf(), 7.0);
        assert!((a.norm_frob() - 30.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(a.norm_l2(), a.norm_frob());
    }
}
