//! The linear-algebra capability seam.
//!
//! A [`LinalgProvider`] supplies BLAS/LAPACK-shaped primitives over flat
//! row-major slices. Matrices cross the boundary as `(slice, rows, cols,
//! leading dimension)`; element `(i, j)` of an argument with leading
//! dimension `ld` lives at `i * ld + j`.
//!
//! Factorization routines return an `i32` status:
//!
//! | status | meaning |
//! |--------|---------|
//! | `0`    | success |
//! | `< 0`  | argument `-status` was illegal |
//! | `> 0`  | numerical failure (singular pivot, not positive definite, no convergence) |
//!
//! Orchestrators in [`crate::linalg`] turn non-zero statuses into
//! [`CoreError::FactorizationFailed`](crate::CoreError::FactorizationFailed).

use crate::dtype::{Real, Scalar};

/// Whether a matrix argument is used as stored or transposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transpose {
    NoTrans,
    Trans,
}

/// Which triangle of a symmetric matrix a routine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uplo {
    Upper,
    Lower,
}

/// Matrix norm selector for [`LinalgProvider::lange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormKind {
    /// Maximum absolute column sum.
    One,
    /// Maximum absolute row sum.
    Inf,
    /// Square root of the sum of squares.
    Frobenius,
    /// Largest absolute element.
    Max,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// BLAS/LAPACK-shaped primitives.
///
/// Implementations must be `Send + Sync`; orchestrators hold one by value
/// and never share mutable state through it.
#[allow(clippy::too_many_arguments)]
pub trait LinalgProvider: Send + Sync {
    // ------------------------------------------------------------------
    // Level 1
    // ------------------------------------------------------------------

    /// `sum(x[i] * y[i])` over the common length.
    fn dot<T: Scalar>(&self, x: &[T], y: &[T]) -> T;

    /// `sum(|x[i]|)`.
    fn asum<T: Real>(&self, x: &[T]) -> T;

    /// Euclidean norm.
    fn nrm2<T: Real>(&self, x: &[T]) -> T;

    /// `x *= alpha`.
    fn scal<T: Scalar>(&self, alpha: T, x: &mut [T]);

    /// Exchange the contents of `x` and `y`.
    fn swap<T: Scalar>(&self, x: &mut [T], y: &mut [T]);

    /// `y = x`.
    fn copy<T: Scalar>(&self, x: &[T], y: &mut [T]);

    /// Index of the first element of largest magnitude (`0` when empty).
    fn iamax<T: Scalar>(&self, x: &[T]) -> usize;

    /// Index of the first element of smallest magnitude (`0` when empty).
    fn iamin<T: Scalar>(&self, x: &[T]) -> usize;

    fn sort<T: Scalar>(&self, order: SortOrder, x: &mut [T]);

    // ------------------------------------------------------------------
    // Level 2 / 3
    // ------------------------------------------------------------------

    /// `y = alpha * op(A) * x + beta * y` where `A` is stored `m x n`.
    ///
    /// With `NoTrans`, `x` has length `n` and `y` length `m`; with `Trans`
    /// the roles swap. `beta == 0` overwrites `y` without reading it.
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
    );

    /// `C = alpha * op(A) * op(B) + beta * C` with `op(A)` `m x k`,
    /// `op(B)` `k x n` and `C` `m x n`.
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
    );

    // ------------------------------------------------------------------
    // LAPACK
    // ------------------------------------------------------------------

    /// LU factorization with partial pivoting, in place.
    ///
    /// On return `a` holds `U` on and above the diagonal and the multipliers
    /// of the unit lower `L` below it. `ipiv[i]` (1-based) is the row that
    /// was interchanged with row `i + 1`. The factorization runs to
    /// completion even for singular input; the status is then the 1-based
    /// index of the first exactly-zero pivot.
    fn getrf<T: Real>(&self, m: usize, n: usize, a: &mut [T], lda: usize, ipiv: &mut [i32])
    -> i32;

    /// Inverse from a [`getrf`](Self::getrf) factorization, in place.
    fn getri<T: Real>(&self, n: usize, a: &mut [T], lda: usize, ipiv: &[i32]) -> i32;

    /// Cholesky factorization, in place. Only the `uplo` triangle is read
    /// or written. A positive status `k` means the leading minor of order
    /// `k` is not positive definite.
    fn potrf<T: Real>(&self, uplo: Uplo, n: usize, a: &mut [T], lda: usize) -> i32;

    /// Full SVD `A = U * diag(s) * VT` of an `m x n` matrix.
    ///
    /// `s` has length `min(m, n)` in descending order, `u` is `m x m` and
    /// `vt` is `n x n`. `a` is destroyed.
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
    ) -> i32;

    /// Symmetric eigendecomposition. Eigenvalues are written to `w` in
    /// ascending order; the eigenvectors overwrite `a` as columns.
    fn syev<T: Real>(&self, n: usize, a: &mut [T], lda: usize, w: &mut [T]) -> i32;

    /// General real eigendecomposition.
    ///
    /// Eigenvalue `j` is `wr[j] + i * wi[j]`. Complex conjugate pairs are
    /// consecutive with the positive imaginary part first; their right
    /// eigenvector `vr[:, j] ± i * vr[:, j + 1]` occupies two columns. `a`
    /// is destroyed.
    fn geev<T: Real>(
        &self,
        n: usize,
        a: &mut [T],
        lda: usize,
        wr: &mut [T],
        wi: &mut [T],
        vr: &mut [T],
        ldvr: usize,
    ) -> i32;

    /// Matrix norm of an `m x n` matrix.
    fn lange<T: Real>(&self, norm: NormKind, m: usize, n: usize, a: &[T], lda: usize) -> T;
}
