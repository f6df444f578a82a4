//! Inner products and norms.

use crate::error::Result;
use crate::linalg::Linalg;
use crate::matrix::Matrix;

use super::Vector;

impl Vector {
    /// Inner product. Requires the same dtype and length.
    ///
    /// ```
    /// # use densa_core::Vector;
    /// let a = Vector::from_vec(vec![1_i32, 2, 3]).unwrap();
    /// assert_eq!(a.dot(&a).unwrap(), 14.0);
    /// ```
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        Linalg::default().dot(self, other)
    }

    /// `v^T * m`. Requires `self.len == m.rows`; the result has length
    /// `m.cols`.
    pub fn dot_matrix(&self, m: &Matrix) -> Result<Vector> {
        Linalg::default().vecmat(self, m)
    }

    /// Sum of absolute values.
    pub fn l1_norm(&self) -> f64 {
        Linalg::default().asum(self)
    }

    /// Euclidean length.
    pub fn l2_norm(&self) -> f64 {
        Linalg::default().nrm2(self)
    }
}
