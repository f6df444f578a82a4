//! Queries and per-row statistics.
//!
//! Row statistics (`mean`, `variance`, `median`, `covariance`) are computed
//! in `f64`. Float matrices get results in their own dtype; integer matrices
//! get `F64` results so that fractional means are not truncated.

use core::cmp::Ordering;

use crate::buffer::{NumericBuffer, dispatch};
use crate::dtype::{DType, Scalar};
use crate::error::{CoreError, Result};
use crate::guard::{check_col, check_row, check_square};
use crate::vector::Vector;

use super::Matrix;

/// Result dtype for statistics over a matrix of `dtype`.
fn stat_dtype(dtype: DType) -> DType {
    if dtype.is_float() { dtype } else { DType::F64 }
}

impl Matrix {
    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Sum of the diagonal. Square matrices only.
    pub fn trace(&self) -> Result<f64> {
        check_square(self, "trace requires a square matrix")?;
        Ok(dispatch!(&self.buffer, |d: T| {
            (0..self.rows).map(|i| d[i * self.cols + i].to_f64()).sum::<f64>()
        }))
    }

    /// `true` if square and `self[i, j] == self[j, i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.rows;
        dispatch!(&self.buffer, |d: T| {
            (0..n).all(|i| (i + 1..n).all(|j| d[i * n + j] == d[j * n + i]))
        })
    }

    /// The main diagonal, `min(rows, cols)` long.
    pub fn diagonal_as_vector(&self) -> Vector {
        let k = self.rows.min(self.cols);
        let buffer = dispatch!(&self.buffer, |d: T| {
            T::into_buffer((0..k).map(|i| d[i * self.cols + i]).collect())
        });
        Vector::from_parts(buffer)
    }

    pub fn row_as_vector(&self, row: usize) -> Result<Vector> {
        check_row(self, row)?;
        let c = self.cols;
        let buffer = dispatch!(&self.buffer, |d: T| T::into_buffer(d[row * c..row * c + c].to_vec()));
        Ok(Vector::from_parts(buffer))
    }

    pub fn col_as_vector(&self, col: usize) -> Result<Vector> {
        check_col(self, col)?;
        let c = self.cols;
        let buffer = dispatch!(&self.buffer, |d: T| {
            T::into_buffer(d.iter().skip(col).step_by(c).copied().collect())
        });
        Ok(Vector::from_parts(buffer))
    }

    /// `true` if every element of `row` is zero.
    pub fn is_row_zero(&self, row: usize) -> Result<bool> {
        check_row(self, row)?;
        let c = self.cols;
        Ok(dispatch!(&self.buffer, |d: T| {
            d[row * c..row * c + c].iter().all(|&x| x == T::zero())
        }))
    }

    pub fn has_zero_row(&self) -> bool {
        dispatch!(&self.buffer, |d: T| {
            d.chunks_exact(self.cols).any(|row| row.iter().all(|&x| x == T::zero()))
        })
    }

    /// Smallest element, widened to `f64`.
    pub fn min(&self) -> f64 {
        self.to_f64_vec().into_iter().fold(f64::INFINITY, f64::min)
    }

    /// Largest element, widened to `f64`.
    pub fn max(&self) -> f64 {
        self.to_f64_vec().into_iter().fold(f64::NEG_INFINITY, f64::max)
    }

    // ------------------------------------------------------------------
    // Per-row statistics
    // ------------------------------------------------------------------

    /// Sum of each row, in the matrix dtype.
    pub fn sum_rows(&self) -> Vector {
        let buffer = dispatch!(&self.buffer, |d: T| {
            let sums = d
                .chunks_exact(self.cols)
                .map(|row| row.iter().fold(T::zero(), |acc, &x| acc.wrapping_add(x)));
            T::into_buffer(sums.collect())
        });
        Vector::from_parts(buffer)
    }

    /// Mean of each row.
    ///
    /// ```
    /// # use densa_core::Matrix;
    /// let m = Matrix::from_rows(vec![vec![1_i32, 2], vec![3, 6]]).unwrap();
    /// assert_eq!(m.mean().to_f64_vec(), vec![1.5, 4.5]);
    /// ```
    pub fn mean(&self) -> Vector {
        let n = self.cols as f64;
        self.row_stat(|row| row.iter().sum::<f64>() / n)
    }

    /// Population variance of each row (divides by `cols`).
    ///
    /// `mean` may supply precomputed row means; it must have one entry per
    /// row.
    pub fn variance(&self, mean: Option<&Vector>) -> Result<Vector> {
        let means = self.resolve_means(mean)?;
        let n = self.cols as f64;
        let rows: Vec<f64> = self
            .to_f64_vec()
            .chunks_exact(self.cols)
            .zip(&means)
            .map(|(row, &mu)| row.iter().map(|&x| (x - mu) * (x - mu)).sum::<f64>() / n)
            .collect();
        Vector::from_buffer(NumericBuffer::from_f64_iter(stat_dtype(self.dtype()), rows)?)
    }

    /// Median of each row. Even-length rows average the two middle values.
    pub fn median(&self) -> Vector {
        self.row_stat(|row| {
            let mut sorted = row.to_vec();
            sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 0 {
                (sorted[mid - 1] + sorted[mid]) / 2.0
            } else {
                sorted[mid]
            }
        })
    }

    /// Row covariance `B * B^T / cols`, where `B` is the matrix with each
    /// row's mean subtracted. The result is `rows x rows`.
    pub fn covariance(&self, mean: Option<&Vector>) -> Result<Matrix> {
        let means = self.resolve_means(mean)?;
        let (r, c) = (self.rows, self.cols);
        let centered: Vec<f64> = self
            .to_f64_vec()
            .chunks_exact(c)
            .zip(&means)
            .flat_map(|(row, &mu)| row.iter().map(move |&x| x - mu))
            .collect();
        let n = c as f64;
        let mut out = vec![0.0; r * r];
        for i in 0..r {
            for j in i..r {
                let bi = &centered[i * c..i * c + c];
                let bj = &centered[j * c..j * c + c];
                let v = bi.iter().zip(bj).map(|(a, b)| a * b).sum::<f64>() / n;
                out[i * r + j] = v;
                out[j * r + i] = v;
            }
        }
        Matrix::from_buffer(r, r, NumericBuffer::from_f64_iter(stat_dtype(self.dtype()), out)?)
    }

    /// Column index of each row's largest element (first on ties).
    pub fn argmax(&self) -> Vector {
        self.row_arg(Ordering::Greater)
    }

    /// Column index of each row's smallest element (first on ties).
    pub fn argmin(&self) -> Vector {
        self.row_arg(Ordering::Less)
    }

    fn row_stat(&self, f: impl Fn(&[f64]) -> f64) -> Vector {
        let values: Vec<f64> = self.to_f64_vec().chunks_exact(self.cols).map(f).collect();
        let buffer = match stat_dtype(self.dtype()) {
            DType::F32 => NumericBuffer::F32(values.into_iter().map(f32::from_f64).collect()),
            _ => NumericBuffer::F64(values),
        };
        Vector::from_parts(buffer)
    }

    fn row_arg(&self, wanted: Ordering) -> Vector {
        let idx: Vec<i32> = dispatch!(&self.buffer, |d: T| {
            d.chunks_exact(self.cols)
                .map(|row| {
                    let mut best = 0;
                    for (j, x) in row.iter().enumerate().skip(1) {
                        if x.partial_cmp(&row[best]) == Some(wanted) {
                            best = j;
                        }
                    }
                    i32::from_usize(best)
                })
                .collect()
        });
        Vector::from_parts(NumericBuffer::I32(idx))
    }

    fn resolve_means(&self, mean: Option<&Vector>) -> Result<Vec<f64>> {
        match mean {
            Some(v) if v.len() != self.rows => Err(CoreError::DimensionMismatch {
                expected: vec![self.rows],
                got: vec![v.len()],
            }),
            Some(v) => Ok(v.to_f64_vec()),
            None => Ok(self.mean().to_f64_vec()),
        }
    }
}
