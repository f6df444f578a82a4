//! BLAS Level 1–3 kernels over row-major slices.
//!
//! Straight loops, no blocking or SIMD.

use core::cmp::Ordering;

use crate::dtype::{Real, Scalar};
use crate::linalg::provider::{SortOrder, Transpose};

// ======================================================================
// BLAS Level 1: vector operations, O(n)
// ======================================================================

pub(crate) fn dot<T: Scalar>(x: &[T], y: &[T]) -> T {
    x.iter().zip(y).fold(T::zero(), |acc, (&a, &b)| acc.mul_acc(a, b))
}

pub(crate) fn asum<T: Real>(x: &[T]) -> T {
    x.iter().fold(T::zero(), |acc, &v| acc + v.abs())
}

/// Euclidean norm, scaled by the largest magnitude to avoid overflow.
pub(crate) fn nrm2<T: Real>(x: &[T]) -> T {
    let scale = x.iter().fold(T::zero(), |acc, &v| acc.max(v.abs()));
    if scale == T::zero() {
        return T::zero();
    }
    let ssq = x.iter().fold(T::zero(), |acc, &v| {
        let r = v / scale;
        acc + r * r
    });
    scale * ssq.sqrt()
}

pub(crate) fn scal<T: Scalar>(alpha: T, x: &mut [T]) {
    for v in x {
        *v = v.wrapping_mul(alpha);
    }
}

pub(crate) fn swap<T: Scalar>(x: &mut [T], y: &mut [T]) {
    for (a, b) in x.iter_mut().zip(y.iter_mut()) {
        core::mem::swap(a, b);
    }
}

pub(crate) fn copy<T: Scalar>(x: &[T], y: &mut [T]) {
    for (dst, &src) in y.iter_mut().zip(x) {
        *dst = src;
    }
}

fn magnitude<T: Scalar>(v: T) -> f64 {
    v.to_f64().abs()
}

pub(crate) fn iamax<T: Scalar>(x: &[T]) -> usize {
    let mut best = 0;
    for (i, &v) in x.iter().enumerate().skip(1) {
        if magnitude(v) > magnitude(x[best]) {
            best = i;
        }
    }
    best
}

pub(crate) fn iamin<T: Scalar>(x: &[T]) -> usize {
    let mut best = 0;
    for (i, &v) in x.iter().enumerate().skip(1) {
        if magnitude(v) < magnitude(x[best]) {
            best = i;
        }
    }
    best
}

/// Sort in place. Incomparable values (NaN) compare equal.
pub(crate) fn sort<T: Scalar>(order: SortOrder, x: &mut [T]) {
    let cmp = |a: &T, b: &T| a.partial_cmp(b).unwrap_or(Ordering::Equal);
    match order {
        SortOrder::Ascending => x.sort_by(cmp),
        SortOrder::Descending => x.sort_by(|a, b| cmp(b, a)),
    }
}

/// `alpha * sum + beta * prev`; a zero `beta` ignores `prev`.
fn scaled<T: Scalar>(alpha: T, sum: T, beta: T, prev: T) -> T {
    let head = alpha.wrapping_mul(sum);
    if beta == T::zero() {
        head
    } else {
        head.mul_acc(beta, prev)
    }
}

// ======================================================================
// BLAS Level 2: matrix-vector operations, O(n^2)
// ======================================================================

/// `y = alpha * op(A) * x + beta * y`, `A` stored `m x n`.
#[allow(clippy::too_many_arguments, clippy::many_single_char_names)]
pub(crate) fn gemv<T: Scalar>(
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
    let (rows, inner) = match trans {
        Transpose::NoTrans => (m, n),
        Transpose::Trans => (n, m),
    };
    for (i, yi) in y.iter_mut().enumerate().take(rows) {
        let mut sum = T::zero();
        for (p, &xp) in x.iter().enumerate().take(inner) {
            let aip = match trans {
                Transpose::NoTrans => a[i * lda + p],
                Transpose::Trans => a[p * lda + i],
            };
            sum = sum.mul_acc(aip, xp);
        }
        *yi = scaled(alpha, sum, beta, *yi);
    }
}

// ======================================================================
// BLAS Level 3: matrix-matrix operations, O(n^3)
// ======================================================================

/// `C = alpha * op(A) * op(B) + beta * C`, `op(A)` `m x k`, `op(B)` `k x n`.
#[allow(clippy::too_many_arguments, clippy::many_single_char_names)]
pub(crate) fn gemm<T: Scalar>(
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
    let a_at = |i: usize, p: usize| match trans_a {
        Transpose::NoTrans => a[i * lda + p],
        Transpose::Trans => a[p * lda + i],
    };
    let b_at = |p: usize, j: usize| match trans_b {
        Transpose::NoTrans => b[p * ldb + j],
        Transpose::Trans => b[j * ldb + p],
    };

    // ijk loop order (row-major friendly for A and C)
    for i in 0..m {
        for j in 0..n {
            let mut sum = T::zero();
            for p in 0..k {
                sum = sum.mul_acc(a_at(i, p), b_at(p, j));
            }
            let c_idx = i * ldc + j;
            c[c_idx] = scaled(alpha, sum, beta, c[c_idx]);
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_level1() {
        let x = [1.0_f64, -5.0, 3.0];
        let y = [4.0_f64, 5.0, 6.0];
        assert_eq!(dot(&x, &y), -3.0);
        assert_eq!(asum(&x), 9.0);
        assert!((nrm2(&[3.0_f64, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(nrm2(&[0.0_f64; 3]), 0.0);
        assert_eq!(iamax(&x), 1);
        assert_eq!(iamin(&x), 0);
        assert_eq!(iamax(&[2_i32, -7, 7]), 1);
    }

    #[test]
    fn test_nrm2_no_overflow() {
        let big = [1e300_f64, 1e300];
        assert!((nrm2(&big) / 1e300 - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_scal_swap_copy() {
        let mut x = [1_i32, 2, 3];
        scal(10, &mut x);
        assert_eq!(x, [10, 20, 30]);
        let mut y = [0_i32; 3];
        swap(&mut x, &mut y);
        assert_eq!(y, [10, 20, 30]);
        assert_eq!(x, [0, 0, 0]);
        copy(&y, &mut x);
        assert_eq!(x, y);
    }

    #[test]
    fn test_sort() {
        let mut x = [3.0_f32, -1.0, 2.0];
        sort(SortOrder::Ascending, &mut x);
        assert_eq!(x, [-1.0, 2.0, 3.0]);
        sort(SortOrder::Descending, &mut x);
        assert_eq!(x, [3.0, 2.0, -1.0]);
    }

    #[test]
    fn test_gemv_both_orientations() {
        // A = [[1, 2], [3, 4], [5, 6]]
        let a = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut y = [0.0; 3];
        gemv(Transpose::NoTrans, 3, 2, 1.0, &a, 2, &[1.0, 1.0], 0.0, &mut y);
        assert_eq!(y, [3.0, 7.0, 11.0]);

        let mut z = [1.0; 2];
        gemv(Transpose::Trans, 3, 2, 1.0, &a, 2, &[1.0, 0.0, 1.0], 2.0, &mut z);
        assert_eq!(z, [8.0, 10.0]);
    }

    #[test]
    fn test_gemm_basic() {
        let a = [1.0_f64, 2.0, 3.0, 4.0];
        let b = [5.0_f64, 6.0, 7.0, 8.0];
        let mut c = [0.0; 4];
        gemm(Transpose::NoTrans, Transpose::NoTrans, 2, 2, 2, 1.0, &a, 2, &b, 2, 0.0, &mut c, 2);
        assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_gemm_transposed() {
        // op(A) = A^T, A stored 3 x 2; op(B) = B^T, B stored 2 x 3
        let a = [1.0_f64, 4.0, 2.0, 5.0, 3.0, 6.0];
        let b = [7.0_f64, 9.0, 11.0, 8.0, 10.0, 12.0];
        let mut c = [0.0; 4];
        gemm(Transpose::Trans, Transpose::Trans, 2, 2, 3, 1.0, &a, 2, &b, 3, 0.0, &mut c, 2);
        // [[1,2,3],[4,5,6]] * [[7,8],[9,10],[11,12]]
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_gemm_beta_accumulates() {
        let eye = [1_i32, 0, 0, 1];
        let mut c = [1_i32, 1, 1, 1];
        gemm(Transpose::NoTrans, Transpose::NoTrans, 2, 2, 2, 2, &eye, 2, &eye, 2, 3, &mut c, 2);
        assert_eq!(c, [5, 3, 3, 5]);
    }
}
