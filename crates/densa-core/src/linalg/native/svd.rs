//! Singular value decomposition by one-sided Jacobi.
//!
//! Column pairs of a working copy are rotated until mutually orthogonal;
//! their norms are then the singular values and the accumulated rotations
//! form `V`. Wide inputs are handled through `A^T = V S U^T`.

use core::cmp::Ordering;

use crate::config::LinalgConfig;
use crate::dtype::Real;

fn fits<T>(a: &[T], rows: usize, cols: usize, ld: usize) -> bool {
    ld >= cols.max(1) && (rows == 0 || a.len() >= (rows - 1) * ld + cols)
}

/// Dense factors of a tall (or square) matrix, packed.
struct Factors<T> {
    u: Vec<T>,
    s: Vec<T>,
    vt: Vec<T>,
}

/// Full SVD of the `m x n` matrix in `a`. Returns the count of column
/// pairs left unconverged when the sweep cap is hit.
#[allow(clippy::too_many_arguments)]
pub(crate) fn gesdd<T: Real>(
    cfg: &LinalgConfig,
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
    if !fits(a, m, n, lda) {
        return -4;
    }
    if s.len() < m.min(n) {
        return -5;
    }
    if !fits(u, m, m, ldu) {
        return -6;
    }
    if !fits(vt, n, n, ldvt) {
        return -8;
    }
    if m == 0 || n == 0 {
        return 0;
    }

    let packed: Vec<T> = (0..m).flat_map(|i| a[i * lda..i * lda + n].iter().copied()).collect();
    let (factors, info) = if m >= n {
        svd_tall(cfg, &packed, m, n)
    } else {
        // A^T = U' S V'^T  =>  A = V' S U'^T
        let mut at = vec![T::zero(); m * n];
        for i in 0..m {
            for j in 0..n {
                at[j * m + i] = packed[i * n + j];
            }
        }
        let (f, info) = svd_tall(cfg, &at, n, m);
        (
            Factors {
                u: transpose(&f.vt, m),
                s: f.s,
                vt: transpose(&f.u, n),
            },
            info,
        )
    };
    if info != 0 {
        return info;
    }

    s[..factors.s.len()].copy_from_slice(&factors.s);
    for i in 0..m {
        u[i * ldu..i * ldu + m].copy_from_slice(&factors.u[i * m..i * m + m]);
    }
    for i in 0..n {
        vt[i * ldvt..i * ldvt + n].copy_from_slice(&factors.vt[i * n..i * n + n]);
    }
    0
}

fn transpose<T: Real>(a: &[T], n: usize) -> Vec<T> {
    let mut out = vec![T::zero(); n * n];
    for i in 0..n {
        for j in 0..n {
            out[j * n + i] = a[i * n + j];
        }
    }
    out
}

/// Column pairs of `work` that are not yet orthogonal to tolerance.
fn pending_pairs<T: Real>(work: &[T], m: usize, n: usize, tol: T) -> usize {
    let mut count = 0;
    for p in 0..n {
        for q in (p + 1)..n {
            let (mut app, mut aqq, mut apq) = (T::zero(), T::zero(), T::zero());
            for i in 0..m {
                let wp = work[i * n + p];
                let wq = work[i * n + q];
                app += wp * wp;
                aqq += wq * wq;
                apq += wp * wq;
            }
            if apq.abs() > tol * (app * aqq).sqrt() {
                count += 1;
            }
        }
    }
    count
}

/// `m >= n`.
#[allow(clippy::many_single_char_names)]
fn svd_tall<T: Real>(cfg: &LinalgConfig, a: &[T], m: usize, n: usize) -> (Factors<T>, i32) {
    // Columns of `work` converge to U * S
    let mut work = a.to_vec();
    let mut v = vec![T::zero(); n * n];
    for i in 0..n {
        v[i * n + i] = T::one();
    }

    let tol = T::epsilon() * T::from_f64(cfg.tolerance_scale);

    for _sweep in 0..cfg.jacobi_max_sweeps {
        let mut rotated = false;

        for p in 0..n {
            for q in (p + 1)..n {
                let mut app = T::zero();
                let mut aqq = T::zero();
                let mut apq = T::zero();
                for i in 0..m {
                    let wp = work[i * n + p];
                    let wq = work[i * n + q];
                    app += wp * wp;
                    aqq += wq * wq;
                    apq += wp * wq;
                }

                if apq.abs() <= tol * (app * aqq).sqrt() {
                    continue;
                }
                rotated = true;

                let tau = (aqq - app) / (apq + apq);
                let root = (T::one() + tau * tau).sqrt();
                let t = if tau >= T::zero() {
                    T::one() / (tau + root)
                } else {
                    -T::one() / (root - tau)
                };
                let cs = T::one() / (T::one() + t * t).sqrt();
                let sn = t * cs;

                for i in 0..m {
                    let wp = work[i * n + p];
                    let wq = work[i * n + q];
                    work[i * n + p] = cs * wp - sn * wq;
                    work[i * n + q] = sn * wp + cs * wq;
                }
                for i in 0..n {
                    let vp = v[i * n + p];
                    let vq = v[i * n + q];
                    v[i * n + p] = cs * vp - sn * vq;
                    v[i * n + q] = sn * vp + cs * vq;
                }
            }
        }

        if !rotated {
            break;
        }
    }
    let unconverged = pending_pairs(&work, m, n, tol);

    // Column norms are the singular values
    let mut s = vec![T::zero(); n];
    for (j, sj) in s.iter_mut().enumerate() {
        let col: Vec<T> = (0..m).map(|i| work[i * n + j]).collect();
        *sj = super::blas::nrm2(&col);
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| s[y].partial_cmp(&s[x]).unwrap_or(Ordering::Equal));

    let smax = s.iter().fold(T::zero(), |acc, &v| acc.max(v));
    let cutoff = tol * smax.max(T::min_positive());

    let mut u = vec![T::zero(); m * m];
    let mut s_sorted = vec![T::zero(); n];
    let mut vt = vec![T::zero(); n * n];
    let mut filled = Vec::with_capacity(m);
    for (new_j, &old_j) in order.iter().enumerate() {
        s_sorted[new_j] = s[old_j];
        for i in 0..n {
            vt[new_j * n + i] = v[i * n + old_j];
        }
        if s[old_j] > cutoff {
            for i in 0..m {
                u[i * m + new_j] = work[i * n + old_j] / s[old_j];
            }
            filled.push(new_j);
        }
    }

    // Complete U: every column not yet set (zero singular values and the
    // trailing m - n) takes the standard basis direction with the largest
    // component outside the span built so far.
    for j in 0..m {
        if filled.contains(&j) {
            continue;
        }
        let mut best: Option<(T, Vec<T>)> = None;
        for e in 0..m {
            let mut col = vec![T::zero(); m];
            col[e] = T::one();
            // Two passes of Gram-Schmidt
            for _ in 0..2 {
                for &k in &filled {
                    let dot = (0..m).fold(T::zero(), |acc, i| acc + col[i] * u[i * m + k]);
                    for (i, c) in col.iter_mut().enumerate() {
                        *c -= dot * u[i * m + k];
                    }
                }
            }
            let norm = super::blas::nrm2(&col);
            if best.as_ref().is_none_or(|(b, _)| norm > *b) {
                best = Some((norm, col));
            }
        }
        if let Some((norm, col)) = best {
            if norm > T::zero() {
                for (i, c) in col.iter().enumerate() {
                    u[i * m + j] = *c / norm;
                }
            }
        }
        filled.push(j);
    }

    let info = i32::try_from(unconverged).unwrap_or(i32::MAX);
    (
        Factors {
            u,
            s: s_sorted,
            vt,
        },
        info,
    )
}
