//! Structural operations: transpose, join, diminish, reshape, and the
//! in-place row primitives used by row reduction.

use crate::buffer::dispatch;
use crate::dtype::Scalar;
use crate::error::{CoreError, Result};
use crate::guard::{check_col, check_dtype, check_index, check_row, element_count};

use super::Matrix;

impl Matrix {
    // ------------------------------------------------------------------
    // Allocating structural operations
    // ------------------------------------------------------------------

    /// `out[i, j] = self[j, i]`.
    ///
    /// ```
    /// # use densa_core::Matrix;
    /// let m = Matrix::from_rows(vec![vec![1_i32, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(m.transpose().as_slice::<i32>().unwrap(), &[1, 3, 2, 4]);
    /// ```
    pub fn transpose(&self) -> Matrix {
        let (r, c) = (self.rows, self.cols);
        let buffer = dispatch!(&self.buffer, |d: T| {
            let mut out: Vec<T> = Vec::with_capacity(r * c);
            for j in 0..c {
                out.extend((0..r).map(|i| d[i * c + j]));
            }
            T::into_buffer(out)
        });
        Matrix::from_parts(c, r, buffer)
    }

    /// `[self | other]`: `other`'s columns appended to the right of `self`.
    ///
    /// ```
    /// # use densa_core::{Matrix, DType};
    /// let eye = Matrix::identity(2, DType::F64).unwrap();
    /// let j = eye.join_left(&eye).unwrap();
    /// assert_eq!(j.to_f64_vec(), vec![1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0]);
    /// ```
    pub fn join_left(&self, other: &Matrix) -> Result<Matrix> {
        hstack(self, other)
    }

    /// `[other | self]`.
    pub fn join_right(&self, other: &Matrix) -> Result<Matrix> {
        hstack(other, self)
    }

    /// `self` stacked on top of `other`.
    pub fn join_above(&self, other: &Matrix) -> Result<Matrix> {
        vstack(self, other)
    }

    /// `other` stacked on top of `self`.
    pub fn join_below(&self, other: &Matrix) -> Result<Matrix> {
        vstack(other, self)
    }

    /// The leftmost `cols` columns.
    pub fn diminish_left(&self, cols: usize) -> Result<Matrix> {
        self.column_range(0, cols)
    }

    /// The rightmost `cols` columns.
    pub fn diminish_right(&self, cols: usize) -> Result<Matrix> {
        if cols > self.cols {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![0, cols],
                shape: vec![self.rows, self.cols],
            });
        }
        self.column_range(self.cols - cols, cols)
    }

    fn column_range(&self, start: usize, width: usize) -> Result<Matrix> {
        if width == 0 {
            return Err(CoreError::InvalidArgument {
                reason: "diminish: column count must be at least 1",
            });
        }
        if start + width > self.cols {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![0, start + width],
                shape: vec![self.rows, self.cols],
            });
        }
        let buffer = dispatch!(&self.buffer, |d: T| {
            let out: Vec<T> = d
                .chunks_exact(self.cols)
                .flat_map(|row| row[start..start + width].iter().copied())
                .collect();
            T::into_buffer(out)
        });
        Ok(Matrix::from_parts(self.rows, width, buffer))
    }

    /// Same elements, new shape. The element count must be preserved.
    pub fn reshape(&self, rows: usize, cols: usize) -> Result<Matrix> {
        let len = element_count(rows, cols)?;
        if len != self.size() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.size()],
                got: vec![len],
            });
        }
        Matrix::from_buffer(rows, cols, self.buffer.clone())
    }

    // ------------------------------------------------------------------
    // In-place primitives
    // ------------------------------------------------------------------

    pub fn swap_rows(&mut self, r1: usize, r2: usize) -> Result<()> {
        check_row(self, r1)?;
        check_row(self, r2)?;
        if r1 == r2 {
            return Ok(());
        }
        let c = self.cols;
        dispatch!(&mut self.buffer, |d: T| {
            let (lo, hi) = (r1.min(r2), r1.max(r2));
            let (head, tail) = d.split_at_mut(hi * c);
            head[lo * c..lo * c + c].swap_with_slice(&mut tail[..c]);
        });
        Ok(())
    }

    pub fn swap_cols(&mut self, c1: usize, c2: usize) -> Result<()> {
        check_col(self, c1)?;
        check_col(self, c2)?;
        let c = self.cols;
        for i in 0..self.rows {
            self.buffer.swap(i * c + c1, i * c + c2);
        }
        Ok(())
    }

    /// Exchange two elements by flat row-major index.
    pub fn swap_value(&mut self, i1: usize, i2: usize) -> Result<()> {
        check_index(self.size(), i1)?;
        check_index(self.size(), i2)?;
        self.buffer.swap(i1, i2);
        Ok(())
    }

    /// `row *= c`.
    pub fn scale_row(&mut self, row: usize, c: f64) -> Result<()> {
        check_row(self, row)?;
        let n = self.cols;
        dispatch!(&mut self.buffer, |d: T| {
            for x in &mut d[row * n..row * n + n] {
                *x = T::from_f64(x.to_f64() * c);
            }
        });
        Ok(())
    }

    /// `row /= c`. Dividing a pivot by itself gives exactly one, which
    /// `scale_row(row, 1.0 / c)` does not guarantee.
    pub(crate) fn divide_row(&mut self, row: usize, c: f64) -> Result<()> {
        check_row(self, row)?;
        let n = self.cols;
        dispatch!(&mut self.buffer, |d: T| {
            for x in &mut d[row * n..row * n + n] {
                *x = T::from_f64(x.to_f64() / c);
            }
        });
        Ok(())
    }

    /// `row r2 += row r1 * c`.
    pub fn add_scale_row(&mut self, r1: usize, r2: usize, c: f64) -> Result<()> {
        check_row(self, r1)?;
        check_row(self, r2)?;
        let n = self.cols;
        dispatch!(&mut self.buffer, |d: T| {
            for j in 0..n {
                let src = d[r1 * n + j].to_f64();
                let dst = &mut d[r2 * n + j];
                *dst = T::from_f64(dst.to_f64() + src * c);
            }
        });
        Ok(())
    }
}

fn hstack(left: &Matrix, right: &Matrix) -> Result<Matrix> {
    check_dtype(left, right)?;
    if left.rows != right.rows {
        return Err(CoreError::DimensionMismatch {
            expected: vec![left.rows],
            got: vec![right.rows],
        });
    }
    let cols = left.cols + right.cols;
    let buffer = dispatch!(&left.buffer, |a: T| {
        let b = right.buffer.as_slice::<T>()?;
        let mut out: Vec<T> = Vec::with_capacity(left.rows * cols);
        for (ra, rb) in a.chunks_exact(left.cols).zip(b.chunks_exact(right.cols)) {
            out.extend_from_slice(ra);
            out.extend_from_slice(rb);
        }
        T::into_buffer(out)
    });
    Ok(Matrix::from_parts(left.rows, cols, buffer))
}

fn vstack(top: &Matrix, bottom: &Matrix) -> Result<Matrix> {
    check_dtype(top, bottom)?;
    if top.cols != bottom.cols {
        return Err(CoreError::DimensionMismatch {
            expected: vec![top.cols],
            got: vec![bottom.cols],
        });
    }
    let buffer = dispatch!(&top.buffer, |a: T| {
        let b = bottom.buffer.as_slice::<T>()?;
        let mut out: Vec<T> = Vec::with_capacity(a.len() + b.len());
        out.extend_from_slice(a);
        out.extend_from_slice(b);
        T::into_buffer(out)
    });
    Ok(Matrix::from_parts(top.rows + bottom.rows, top.cols, buffer))
}
