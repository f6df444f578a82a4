//! Strided 1D and 2D convolution.
//!
//! Both operands must share a dtype and `stride` must be at least 1.
//! Integer inputs accumulate in `i32` with wrapping arithmetic; float
//! inputs accumulate in their own type.
//!
//! ```
//! # use densa_core::Vector;
//! let v = Vector::from_vec(vec![1.0_f64, 2.0, 3.0]).unwrap();
//! let k = Vector::from_vec(vec![0.0_f64, 1.0, 0.5]).unwrap();
//! let full = v.convolve(&k, 1).unwrap();
//! assert_eq!(full.to_f64_vec(), vec![0.0, 1.0, 2.5, 4.0, 1.5]);
//! ```

use tracing::debug;

use crate::buffer::dispatch;
use crate::dtype::Scalar;
use crate::error::{CoreError, Result};
use crate::guard::check_dtype;
use crate::matrix::Matrix;
use crate::vector::Vector;

const ZERO_STRIDE: CoreError = CoreError::InvalidArgument {
    reason: "convolution stride must be at least 1",
};

fn conv1d_typed<T: Scalar>(v: &[T], k: &[T], stride: usize) -> Vec<T> {
    let nc = v.len() + k.len() - 1;
    (0..nc)
        .step_by(stride)
        .map(|i| {
            let jmin = i.saturating_sub(k.len() - 1);
            let jmax = i.min(v.len() - 1);
            (jmin..=jmax).fold(T::zero(), |acc, j| acc.mul_acc(v[j], k[i - j]))
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn conv2d_typed<T: Scalar>(
    m: &[T],
    rows: usize,
    cols: usize,
    k: &[T],
    krows: usize,
    kcols: usize,
    stride: usize,
    out_rows: usize,
    out_cols: usize,
) -> Vec<T> {
    let (p, q) = (krows / 2, kcols / 2);
    let mut out = Vec::with_capacity(out_rows * out_cols);
    for oi in 0..out_rows {
        let i = oi * stride;
        for oj in 0..out_cols {
            let j = oj * stride;
            let mut acc = T::zero();
            for a in 0..krows {
                // x = i + p - a, skipped when outside [0, rows)
                let Some(x) = (i + p).checked_sub(a).filter(|&x| x < rows) else {
                    continue;
                };
                for b in 0..kcols {
                    if let Some(y) = (j + q).checked_sub(b).filter(|&y| y < cols) {
                        acc = acc.mul_acc(m[x * cols + y], k[a * kcols + b]);
                    }
                }
            }
            out.push(acc);
        }
    }
    out
}

/// 1D convolution of `v` with kernel `k`, sampled every `stride` outputs
/// of the full convolution.
///
/// The result has length `ceil((v.len + k.len - 1) / stride)`.
#[tracing::instrument(skip(v, k), fields(len = v.len(), kernel = k.len()))]
pub fn conv1d(v: &Vector, k: &Vector, stride: usize) -> Result<Vector> {
    check_dtype(v, k)?;
    if stride == 0 {
        return Err(ZERO_STRIDE);
    }
    let out = dispatch!(v.buffer(), |dv: T| {
        let dk = k.as_slice::<T>()?;
        T::into_buffer(conv1d_typed(dv, dk, stride))
    });
    debug!(out_len = out.len(), "conv1d");
    Ok(Vector::from_parts(out))
}

/// 2D convolution of `m` with kernel `k`, centred on the kernel midpoint
/// and zero padded at the borders.
///
/// The result is `(m.rows / stride) x (m.cols / stride)`; a stride larger
/// than either dimension is an [`CoreError::InvalidArgument`].
#[tracing::instrument(skip(m, k), fields(rows = m.rows(), cols = m.cols()))]
pub fn conv2d(m: &Matrix, k: &Matrix, stride: usize) -> Result<Matrix> {
    check_dtype(m, k)?;
    if stride == 0 {
        return Err(ZERO_STRIDE);
    }
    let (rows, cols) = m.shape();
    let (out_rows, out_cols) = (rows / stride, cols / stride);
    if out_rows == 0 || out_cols == 0 {
        return Err(CoreError::InvalidArgument {
            reason: "convolution stride exceeds the matrix dimensions",
        });
    }
    let (krows, kcols) = k.shape();
    debug!(krows, kcols, out_rows, out_cols, "conv2d");
    let out = dispatch!(m.buffer(), |dm: T| {
        let dk = k.as_slice::<T>()?;
        T::into_buffer(conv2d_typed(
            dm, rows, cols, dk, krows, kcols, stride, out_rows, out_cols,
        ))
    });
    Ok(Matrix::from_parts(out_rows, out_cols, out))
}

impl Vector {
    /// See [`conv1d`].
    pub fn convolve(&self, kernel: &Vector, stride: usize) -> Result<Vector> {
        conv1d(self, kernel, stride)
    }
}

impl Matrix {
    /// See [`conv2d`].
    pub fn convolve(&self, kernel: &Matrix, stride: usize) -> Result<Matrix> {
        conv2d(self, kernel, stride)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::dtype::DType;

    fn vecf(data: Vec<f64>) -> Vector {
        Vector::from_vec(data).unwrap()
    }

    #[test]
    fn test_conv1d_full() {
        let v = vecf(vec![1.0, 2.0, 3.0]);
        let k = vecf(vec![1.0, 1.0]);
        assert_eq!(conv1d(&v, &k, 1).unwrap().to_f64_vec(), vec![1.0, 3.0, 5.0, 3.0]);
    }

    #[test]
    fn test_conv1d_stride() {
        // Full convolution is [1, 3, 6, 9, 7, 4]; stride 2 keeps 0, 2, 4
        let v = vecf(vec![1.0, 2.0, 3.0, 4.0]);
        let k = vecf(vec![1.0, 1.0, 1.0]);
        assert_eq!(conv1d(&v, &k, 2).unwrap().to_f64_vec(), vec![1.0, 6.0, 7.0]);
        // ceil(6 / 4) = 2
        assert_eq!(conv1d(&v, &k, 4).unwrap().len(), 2);
    }

    #[test]
    fn test_conv1d_kernel_longer_than_signal() {
        let v = vecf(vec![2.0]);
        let k = vecf(vec![1.0, 2.0, 3.0]);
        assert_eq!(conv1d(&v, &k, 1).unwrap().to_f64_vec(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_conv1d_integer_wraps() {
        let v = Vector::from_vec(vec![i32::MAX, 1]).unwrap();
        let k = Vector::from_vec(vec![1_i32, 1]).unwrap();
        let out = conv1d(&v, &k, 1).unwrap();
        assert_eq!(out.as_slice::<i32>().unwrap(), &[i32::MAX, i32::MIN, 1]);
    }

    #[test]
    fn test_conv1d_rejects() {
        let v = vecf(vec![1.0, 2.0]);
        assert!(matches!(conv1d(&v, &v, 0), Err(CoreError::InvalidArgument { .. })));
        let k = v.cast(DType::F32);
        assert!(matches!(conv1d(&v, &k, 1), Err(CoreError::DtypeMismatch { .. })));
    }

    #[test]
    fn test_conv2d_identity_kernel() {
        let m = Matrix::from_rows(vec![vec![1.0_f64, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let k = Matrix::from_rows(vec![
            vec![0.0_f64, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .unwrap();
        assert_eq!(conv2d(&m, &k, 1).unwrap(), m);
    }

    #[test]
    fn test_conv2d_box_kernel_pads_with_zero() {
        let m = Matrix::ones(3, 3, DType::I32).unwrap();
        let k = Matrix::ones(3, 3, DType::I32).unwrap();
        let out = conv2d(&m, &k, 1).unwrap();
        assert_eq!(out.as_slice::<i32>().unwrap(), &[4, 6, 4, 6, 9, 6, 4, 6, 4]);

        let strided = conv2d(&m, &k, 2).unwrap();
        assert_eq!(strided.shape(), (1, 1));
        assert_eq!(strided.as_slice::<i32>().unwrap(), &[4]);
    }

    #[test]
    fn test_conv2d_rejects() {
        let m = Matrix::ones(2, 2, DType::F64).unwrap();
        assert!(matches!(conv2d(&m, &m, 0), Err(CoreError::InvalidArgument { .. })));
        assert!(matches!(conv2d(&m, &m, 3), Err(CoreError::InvalidArgument { .. })));
        let k = m.cast(DType::I32);
        assert!(matches!(conv2d(&m, &k, 1), Err(CoreError::DtypeMismatch { .. })));
    }
}
