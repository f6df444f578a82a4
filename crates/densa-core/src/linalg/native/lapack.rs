//! LU, inverse, Cholesky and matrix norms over row-major slices.
//!
//! The routines follow LAPACK calling conventions (in-place factors,
//! 1-based pivots, integer status) so that an external backend could be
//! swapped in behind [`LinalgProvider`](crate::linalg::LinalgProvider).

use crate::dtype::Real;
use crate::linalg::provider::{NormKind, Uplo};

/// `a` must hold at least `rows` rows of leading dimension `ld` covering
/// `cols` columns.
fn fits<T>(a: &[T], rows: usize, cols: usize, ld: usize) -> bool {
    ld >= cols.max(1) && (rows == 0 || a.len() >= (rows - 1) * ld + cols)
}

// ======================================================================
// getrf: LU with partial pivoting
// ======================================================================

#[allow(clippy::many_single_char_names)]
pub(crate) fn getrf<T: Real>(m: usize, n: usize, a: &mut [T], lda: usize, ipiv: &mut [i32]) -> i32 {
    if !fits(a, m, n, lda) {
        return -3;
    }
    let mn = m.min(n);
    if ipiv.len() < mn {
        return -5;
    }

    let mut info = 0;
    for k in 0..mn {
        // Find pivot: row with largest |a[i, k]| for i >= k
        let mut p = k;
        let mut max_val = a[k * lda + k].abs();
        for i in (k + 1)..m {
            let val = a[i * lda + k].abs();
            if val > max_val {
                max_val = val;
                p = i;
            }
        }
        ipiv[k] = (p + 1) as i32;

        if max_val == T::zero() {
            // Column already eliminated; record the first singular pivot
            // and keep going.
            if info == 0 {
                info = (k + 1) as i32;
            }
            continue;
        }

        if p != k {
            for j in 0..n {
                a.swap(k * lda + j, p * lda + j);
            }
        }

        let pivot = a[k * lda + k];
        for i in (k + 1)..m {
            let factor = a[i * lda + k] / pivot;
            a[i * lda + k] = factor; // Store L factor
            if factor == T::zero() {
                continue;
            }
            for j in (k + 1)..n {
                let ukj = a[k * lda + j];
                a[i * lda + j] -= factor * ukj;
            }
        }
    }
    info
}

// ======================================================================
// getri: inverse from the LU factors
// ======================================================================

/// Solves `A X = I` column by column from the packed factors.
#[allow(clippy::needless_range_loop)]
pub(crate) fn getri<T: Real>(n: usize, a: &mut [T], lda: usize, ipiv: &[i32]) -> i32 {
    if !fits(a, n, n, lda) {
        return -2;
    }
    if ipiv.len() < n {
        return -4;
    }
    if let Some(i) = (0..n).find(|&i| a[i * lda + i] == T::zero()) {
        return (i + 1) as i32;
    }

    let mut inv = vec![T::zero(); n * n];
    let mut x = vec![T::zero(); n];
    for col in 0..n {
        // Apply the row interchanges to e_col: P * e_col
        x.iter_mut().for_each(|v| *v = T::zero());
        x[col] = T::one();
        for k in 0..n {
            let p = (ipiv[k] - 1) as usize;
            if p != k && p < n {
                x.swap(k, p);
            }
        }

        // Forward substitution: L y = P e
        for i in 1..n {
            for j in 0..i {
                let lij_xj = a[i * lda + j] * x[j];
                x[i] -= lij_xj;
            }
        }

        // Back substitution: U x = y
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let uij_xj = a[i * lda + j] * x[j];
                x[i] -= uij_xj;
            }
            x[i] /= a[i * lda + i];
        }

        for row in 0..n {
            inv[row * n + col] = x[row];
        }
    }

    for i in 0..n {
        a[i * lda..i * lda + n].copy_from_slice(&inv[i * n..i * n + n]);
    }
    0
}

// ======================================================================
// potrf: Cholesky
// ======================================================================

/// `A = L L^T` (`Lower`) or `A = U^T U` (`Upper`), written over the
/// selected triangle. The other triangle is neither read nor written.
pub(crate) fn potrf<T: Real>(uplo: Uplo, n: usize, a: &mut [T], lda: usize) -> i32 {
    if !fits(a, n, n, lda) {
        return -3;
    }
    // Address the factor as lower-triangular L; for Upper, L[i][j] is
    // stored at U[j][i].
    let at = |i: usize, j: usize| match uplo {
        Uplo::Lower => i * lda + j,
        Uplo::Upper => j * lda + i,
    };

    for j in 0..n {
        // Diagonal element
        let mut sum = a[at(j, j)];
        for k in 0..j {
            let ljk = a[at(j, k)];
            sum -= ljk * ljk;
        }
        if sum <= T::zero() || !sum.is_finite() {
            return (j + 1) as i32;
        }
        let diag = sum.sqrt();
        a[at(j, j)] = diag;

        // Off-diagonal elements
        for i in (j + 1)..n {
            let mut sum = a[at(i, j)];
            for k in 0..j {
                sum -= a[at(i, k)] * a[at(j, k)];
            }
            a[at(i, j)] = sum / diag;
        }
    }
    0
}

// ======================================================================
// lange: matrix norms
// ======================================================================

pub(crate) fn lange<T: Real>(norm: NormKind, m: usize, n: usize, a: &[T], lda: usize) -> T {
    if m == 0 || n == 0 || !fits(a, m, n, lda) {
        return T::zero();
    }
    let row = move |i: usize| &a[i * lda..i * lda + n];
    match norm {
        NormKind::Max => (0..m)
            .flat_map(row)
            .fold(T::zero(), |acc, &v| acc.max(v.abs())),
        NormKind::Inf => (0..m)
            .map(|i| row(i).iter().fold(T::zero(), |acc, &v| acc + v.abs()))
            .fold(T::zero(), T::max),
        NormKind::One => (0..n)
            .map(|j| (0..m).fold(T::zero(), |acc, i| acc + a[i * lda + j].abs()))
            .fold(T::zero(), T::max),
        NormKind::Frobenius => {
            let flat: Vec<T> = (0..m).flat_map(row).copied().collect();
            super::blas::nrm2(&flat)
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
    }

    #[test]
    fn test_getrf_pivots_and_factors() {
        let mut a = vec![2.0_f64, 1.0, 1.0, 4.0, 3.0, 3.0, 8.0, 7.0, 9.0];
        let mut ipiv = [0_i32; 3];
        assert_eq!(getrf(3, 3, &mut a, 3, &mut ipiv), 0);
        // First pivot is the 8 in row 3.
        assert_eq!(ipiv[0], 3);
        assert_eq!(a[0], 8.0);
        // Diagonal of U multiplies to |det| = 4.
        let prod = a[0] * a[4] * a[8];
        assert!((prod.abs() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_getrf_singular_completes() {
        let mut a = vec![1.0_f64, 2.0, 2.0, 4.0];
        let mut ipiv = [0_i32; 2];
        let info = getrf(2, 2, &mut a, 2, &mut ipiv);
        assert_eq!(info, 2);
        assert_eq!(ipiv, [2, 2]);
    }

    #[test]
    fn test_getrf_rejects_short_buffer() {
        let mut a = vec![1.0_f64; 3];
        let mut ipiv = [0_i32; 2];
        assert!(getrf(2, 2, &mut a, 2, &mut ipiv) < 0);
    }

    #[test]
    fn test_getri_inverse() {
        let mut a = vec![2.0_f64, 1.0, 1.0, 4.0];
        let mut ipiv = [0_i32; 2];
        assert_eq!(getrf(2, 2, &mut a, 2, &mut ipiv), 0);
        assert_eq!(getri(2, &mut a, 2, &ipiv), 0);
        let expected = [4.0 / 7.0, -1.0 / 7.0, -1.0 / 7.0, 2.0 / 7.0];
        assert!(approx_eq(&a, &expected, 1e-12));
    }

    #[test]
    fn test_getri_singular() {
        let mut a = vec![1.0_f64, 2.0, 2.0, 4.0];
        let mut ipiv = [0_i32; 2];
        getrf(2, 2, &mut a, 2, &mut ipiv);
        assert_eq!(getri(2, &mut a, 2, &ipiv), 2);
    }

    #[test]
    fn test_potrf_lower_only_touches_lower() {
        let mut a = vec![4.0_f64, -99.0, 2.0, 3.0];
        assert_eq!(potrf(Uplo::Lower, 2, &mut a, 2), 0);
        assert_eq!(a[1], -99.0);
        assert!(approx_eq(&[a[0], a[2], a[3]], &[2.0, 1.0, 2.0_f64.sqrt()], 1e-12));
    }

    #[test]
    fn test_potrf_upper() {
        let mut a = vec![4.0_f64, 2.0, -99.0, 3.0];
        assert_eq!(potrf(Uplo::Upper, 2, &mut a, 2), 0);
        assert_eq!(a[2], -99.0);
        assert!(approx_eq(&[a[0], a[1], a[3]], &[2.0, 1.0, 2.0_f64.sqrt()], 1e-12));
    }

    #[test]
    fn test_potrf_not_positive_definite() {
        let mut a = vec![1.0_f64, 2.0, 2.0, 1.0];
        assert_eq!(potrf(Uplo::Lower, 2, &mut a, 2), 2);
    }

    #[test]
    fn test_lange() {
        let a = [1.0_f64, -2.0, 3.0, 4.0];
        assert_eq!(lange(NormKind::One, 2, 2, &a, 2), 6.0);
        assert_eq!(lange(NormKind::Inf, 2, 2, &a, 2), 7.0);
        assert_eq!(lange(NormKind::Max, 2, 2, &a, 2), 4.0);
        assert!((lange(NormKind::Frobenius, 2, 2, &a, 2) - 30.0_f64.sqrt()).abs() < 1e-12);
    }
}
