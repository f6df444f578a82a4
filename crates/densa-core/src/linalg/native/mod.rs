//! In-process pure-Rust [`LinalgProvider`].
//!
//! | Routine | Method |
//! |---------|--------|
//! | `getrf` | Doolittle LU with partial pivoting |
//! | `getri` | Column-by-column solve against the LU factors |
//! | `potrf` | Column-oriented Cholesky |
//! | `syev`  | Cyclic Jacobi |
//! | `gesdd` | One-sided Jacobi with orthonormal completion of `U` |
//! | `geev`  | Hessenberg + Francis double-shift QR + inverse iteration |
//!
//! The iterative routines read their caps and tolerances from the
//! [`LinalgConfig`] the provider was built with.

mod blas;
mod eig;
mod lapack;
mod svd;

use crate::config::LinalgConfig;
use crate::dtype::{Real, Scalar};
use crate::linalg::provider::{LinalgProvider, NormKind, SortOrder, Transpose, Uplo};

/// Pure-Rust provider. Holds nothing but its configuration.
///
/// ```
/// use densa_core::linalg::{LinalgProvider, NativeProvider};
///
/// let p = NativeProvider::new();
/// assert_eq!(p.dot(&[1.0_f64, 2.0], &[3.0, 4.0]), 11.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NativeProvider {
    config: LinalgConfig,
}

impl NativeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LinalgConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LinalgConfig {
        &self.config
    }
}

#[allow(clippy::too_many_arguments)]
impl LinalgProvider for NativeProvider {
    fn dot<T: Scalar>(&self, x: &[T], y: &[T]) -> T {
        blas::dot(x, y)
    }

    fn asum<T: Real>(&self, x: &[T]) -> T {
        blas::asum(x)
    }

    fn nrm2<T: Real>(&self, x: &[T]) -> T {
        blas::nrm2(x)
    }

    fn scal<T: Scalar>(&self, alpha: T, x: &mut [T]) {
        blas::scal(alpha, x);
    }

    fn swap<T: Scalar>(&self, x: &mut [T], y: &mut [T]) {
        blas::swap(x, y);
    }

    fn copy<T: Scalar>(&self, x: &[T], y: &mut [T]) {
        blas::copy(x, y);
    }

    fn iamax<T: Scalar>(&self, x: &[T]) -> usize {
        blas::iamax(x)
    }

    fn iamin<T: Scalar>(&self, x: &[T]) -> usize {
        blas::iamin(x)
    }

    fn sort<T: Scalar>(&self, order: SortOrder, x: &mut [T]) {
        blas::sort(order, x);
    }

    fn gemv<T: Scalar>(
        &self,
        trans: Transpose,
        m: usize,
        n: usize,
        alpha: T,
        a: &[T],
        lda: usize,
        x: &[T],
        beta: T,
        y: &mut [T],
    ) {
        blas::gemv(trans, m, n, alpha, a, lda, x, beta, y);
    }

    fn gemm<T: Scalar>(
        &self,
        trans_a: Transpose,
        trans_b: Transpose,
        m: usize,
        n: usize,
        k: usize,
        alpha: T,
        a: &[T],
        lda: usize,
        b: &[T],
        ldb: usize,
        beta: T,
        c: &mut [T],
        ldc: usize,
    ) {
        blas::gemm(trans_a, trans_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc);
    }

    fn getrf<T: Real>(
        &self,
        m: usize,
        n: usize,
        a: &mut [T],
        lda: usize,
        ipiv: &mut [i32],
    ) -> i32 {
        lapack::getrf(m, n, a, lda, ipiv)
    }

    fn getri<T: Real>(&self, n: usize, a: &mut [T], lda: usize, ipiv: &[i32]) -> i32 {
        lapack::getri(n, a, lda, ipiv)
    }

    fn potrf<T: Real>(&self, uplo: Uplo, n: usize, a: &mut [T], lda: usize) -> i32 {
        lapack::potrf(uplo, n, a, lda)
    }

    fn gesdd<T: Real>(
        &self,
        m: usize,
        n: usize,
        a: &mut [T],
        lda: usize,
        s: &mut [T],
        u: &mut [T],
        ldu: usize,
        vt: &mut [T],
        ldvt: usize,
    ) -> i32 {
        svd::gesdd(&self.config, m, n, a, lda, s, u, ldu, vt, ldvt)
    }

    fn syev<T: Real>(&self, n: usize, a: &mut [T], lda: usize, w: &mut [T]) -> i32 {
        eig::syev(&self.config, n, a, lda, w)
    }

    fn geev<T: Real>(
        &self,
        n: usize,
        a: &mut [T],
        lda: usize,
        wr: &mut [T],
        wi: &mut [T],
        vr: &mut [T],
        ldvr: usize,
    ) -> i32 {
        eig::geev(&self.config, n, a, lda, wr, wi, vr, ldvr)
    }

    fn lange<T: Real>(&self, norm: NormKind, m: usize, n: usize, a: &[T], lda: usize) -> T {
        lapack::lange(norm, m, n, a, lda)
    }
}
