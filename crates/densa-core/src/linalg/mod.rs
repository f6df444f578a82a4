//! Linear algebra over [`Matrix`] and [`Vector`].
//!
//! Numerical work is delegated to a [`LinalgProvider`] held by a [`Linalg`]
//! value; nothing here is a process-wide singleton. The in-process
//! [`NativeProvider`] is the default.
//!
//! | Entry point | Provider routines | Result |
//! |-------------|-------------------|--------|
//! | [`Linalg::lu`] | `getrf` | [`Lu`] with `P A = L U` |
//! | [`Linalg::cholesky`] | `potrf` | [`Cholesky`] with `A = L L^T` |
//! | [`Linalg::eigen`] | `syev` / `geev` | [`Eigen`] |
//! | [`Linalg::svd`] | `gesdd` | [`Svd`] with `A = U S V^T` |
//! | [`Linalg::pseudo_inverse`] | `gesdd`, `gemm` | `A^+` |
//! | [`Linalg::inverse`] | `getrf`, `getri` | `A^-1` |
//! | [`Linalg::determinant`] | `getrf` | `det(A)` |
//! | [`Linalg::ref_form`] / [`Linalg::rref`] | `getrf` / row operations | echelon forms |
//! | [`Linalg::matmul`] / [`Linalg::matvec`] / [`Linalg::vecmat`] | `gemm` / `gemv` | products |
//!
//! Decompositions need a floating dtype; an `I32` input is rejected with
//! [`CoreError::InvalidArgument`]. A non-zero provider status surfaces as
//! [`CoreError::FactorizationFailed`].
//!
//! ```
//! use densa_core::{Matrix, linalg::Linalg};
//!
//! let la = Linalg::default();
//! let a = Matrix::from_rows(vec![vec![4.0_f64, 2.0], vec![2.0, 3.0]]).unwrap();
//! let l = la.cholesky(&a).unwrap().into_inner();
//! assert!((l.get(0, 0).unwrap() - 2.0).abs() < 1e-12);
//! ```

pub mod decomp;
mod native;
pub mod provider;
mod reduce;

pub use decomp::{Cholesky, Eigen, Lu, Svd};
pub use native::NativeProvider;
pub use provider::{LinalgProvider, NormKind, SortOrder, Transpose, Uplo};

use tracing::{debug, warn};

use crate::buffer::{NumericBuffer, dispatch};
use crate::config::LinalgConfig;
use crate::dtype::Scalar;
use crate::error::{CoreError, Result};
use crate::guard::{check_broadcast, check_dimensions, check_dtype, check_shape};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Decomposition orchestrator over an injected provider.
#[derive(Debug, Clone)]
pub struct Linalg<P: LinalgProvider = NativeProvider> {
    provider: P,
    config: LinalgConfig,
}

impl Default for Linalg<NativeProvider> {
    fn default() -> Self {
        Self::new(NativeProvider::new())
    }
}

impl Linalg<NativeProvider> {
    /// Native provider and orchestrator sharing one configuration.
    pub fn native(config: LinalgConfig) -> Self {
        Self::with_config(NativeProvider::with_config(config.clone()), config)
    }
}

impl<P: LinalgProvider> Linalg<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, LinalgConfig::default())
    }

    pub fn with_config(provider: P, config: LinalgConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &LinalgConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// `a * b`. Requires equal dtypes and `a.cols == b.rows`.
    ///
    /// ```
    /// # use densa_core::{Matrix, linalg::Linalg};
    /// let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
    /// let c = Linalg::default().matmul(&a, &a).unwrap();
    /// assert_eq!(c.to_f64_vec(), vec![7.0, 10.0, 15.0, 22.0]);
    /// ```
    pub fn matmul(&self, a: &Matrix, b: &Matrix) -> Result<Matrix> {
        check_dtype(a, b)?;
        check_dimensions(a, b)?;
        let (m, k, n) = (a.rows(), a.cols(), b.cols());
        debug!(m, k, n, "gemm");
        dispatch!(a.buffer(), |da: T| {
            let db = b.as_slice::<T>()?;
            let mut out = vec![T::zero(); m * n];
            self.provider.gemm(
                Transpose::NoTrans,
                Transpose::NoTrans,
                m,
                n,
                k,
                T::one(),
                da.as_slice(),
                k,
                db,
                n,
                T::zero(),
                &mut out,
                n,
            );
            Ok(Matrix::from_parts(m, n, T::into_buffer(out)))
        })
    }

    /// `m * v`. Requires `v.len == m.cols`.
    pub fn matvec(&self, m: &Matrix, v: &Vector) -> Result<Vector> {
        check_dtype(m, v)?;
        check_broadcast(m, v)?;
        let (rows, cols) = m.shape();
        debug!(rows, cols, "gemv");
        dispatch!(m.buffer(), |dm: T| {
            let dv = v.as_slice::<T>()?;
            let mut out = vec![T::zero(); rows];
            self.provider.gemv(
                Transpose::NoTrans,
                rows,
                cols,
                T::one(),
                dm.as_slice(),
                cols,
                dv,
                T::zero(),
                &mut out,
            );
            Ok(Vector::from_parts(T::into_buffer(out)))
        })
    }

    /// `v^T * m`. Requires `v.len == m.rows`; the result has length
    /// `m.cols`.
    pub fn vecmat(&self, v: &Vector, m: &Matrix) -> Result<Vector> {
        check_dtype(m, v)?;
        let (rows, cols) = m.shape();
        if v.len() != rows {
            return Err(CoreError::DimensionMismatch {
                expected: vec![rows],
                got: vec![v.len()],
            });
        }
        debug!(rows, cols, "gemv (transposed)");
        dispatch!(m.buffer(), |dm: T| {
            let dv = v.as_slice::<T>()?;
            let mut out = vec![T::zero(); cols];
            self.provider.gemv(
                Transpose::Trans,
                rows,
                cols,
                T::one(),
                dm.as_slice(),
                cols,
                dv,
                T::zero(),
                &mut out,
            );
            Ok(Vector::from_parts(T::into_buffer(out)))
        })
    }

    /// Inner product, widened to `f64`.
    pub fn dot(&self, x: &Vector, y: &Vector) -> Result<f64> {
        check_dtype(x, y)?;
        check_shape(x, y)?;
        dispatch!(x.buffer(), |dx: T| {
            let dy = y.as_slice::<T>()?;
            Ok(self.provider.dot(dx.as_slice(), dy).to_f64())
        })
    }

    /// Sort `v` in place.
    pub fn sort(&self, v: &mut Vector, order: SortOrder) {
        dispatch!(v.buffer_mut(), |d: T| self.provider.sort(order, d.as_mut_slice()));
    }

    // ------------------------------------------------------------------
    // Norms
    // ------------------------------------------------------------------

    /// Matrix norm. Integer matrices are measured in `f64`.
    pub fn norm(&self, m: &Matrix, kind: NormKind) -> f64 {
        let (rows, cols) = m.shape();
        match m.buffer() {
            NumericBuffer::F32(d) => f64::from(self.provider.lange(kind, rows, cols, d, cols)),
            NumericBuffer::F64(d) => self.provider.lange(kind, rows, cols, d, cols),
            NumericBuffer::I32(_) => {
                let d = m.to_f64_vec();
                self.provider.lange(kind, rows, cols, &d, cols)
            }
        }
    }

    /// `sum(|v[i]|)`.
    pub fn asum(&self, v: &Vector) -> f64 {
        match v.buffer() {
            NumericBuffer::F32(d) => f64::from(self.provider.asum(d)),
            NumericBuffer::F64(d) => self.provider.asum(d),
            NumericBuffer::I32(_) => self.provider.asum(&v.to_f64_vec()),
        }
    }

    /// Euclidean length.
    pub fn nrm2(&self, v: &Vector) -> f64 {
        match v.buffer() {
            NumericBuffer::F32(d) => f64::from(self.provider.nrm2(d)),
            NumericBuffer::F64(d) => self.provider.nrm2(d),
            NumericBuffer::I32(_) => self.provider.nrm2(&v.to_f64_vec()),
        }
    }
}

/// Map a provider status to `Ok` or [`CoreError::FactorizationFailed`].
pub(crate) fn check_status(routine: &'static str, status: i32) -> Result<()> {
    if status != 0 {
        warn!(routine, status, "provider routine failed");
        return Err(CoreError::FactorizationFailed { routine, status });
    }
    debug!(routine, "provider routine succeeded");
    Ok(())
}
