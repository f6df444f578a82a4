//! Eigenvalue kernels.
//!
//! - [`syev`]: cyclic Jacobi rotations for real symmetric matrices.
//! - [`geev`]: general real matrices. Reduce to upper Hessenberg form by
//!   stabilized elementary similarity transforms, find the eigenvalues with
//!   the Francis double-shift QR iteration, then recover each eigenvector
//!   by inverse iteration on the original matrix. A complex pair
//!   `a ± ib` is handled through the real `2n x 2n` system
//!   `[[A - aI, bI], [-bI, A - aI]]`, whose null space holds the real and
//!   imaginary parts of the eigenvector.

use core::cmp::Ordering;

use crate::config::LinalgConfig;
use crate::dtype::Real;
use crate::linalg::provider::NormKind;

use super::blas::{dot, iamax, nrm2};
use super::lapack::lange;

fn fits<T>(a: &[T], n: usize, ld: usize) -> bool {
    ld >= n.max(1) && (n == 0 || a.len() >= (n - 1) * ld + n)
}

// ======================================================================
// syev: symmetric Jacobi
// ======================================================================

/// Eigenvalues ascending into `w`, eigenvectors as the columns of `a`.
///
/// Returns the number of off-diagonal pairs still above tolerance if the
/// sweep cap is reached.
#[allow(clippy::many_single_char_names)]
pub(crate) fn syev<T: Real>(cfg: &LinalgConfig, n: usize, a: &mut [T], lda: usize, w: &mut [T]) -> i32 {
    if !fits(a, n, lda) {
        return -3;
    }
    if w.len() < n {
        return -5;
    }
    if n == 0 {
        return 0;
    }

    // Work on a packed copy; V starts as identity
    let mut s: Vec<T> = (0..n).flat_map(|i| a[i * lda..i * lda + n].iter().copied()).collect();
    let mut v = vec![T::zero(); n * n];
    for i in 0..n {
        v[i * n + i] = T::one();
    }

    let tol = T::epsilon() * T::from_f64(cfg.tolerance_scale);
    let scale = lange(NormKind::Frobenius, n, n, &s, n).max(T::min_positive());
    let threshold = tol * scale;

    let mut sweeps = 0;
    loop {
        let mut off_norm = T::zero();
        for i in 0..n {
            for j in (i + 1)..n {
                off_norm += s[i * n + j] * s[i * n + j];
            }
        }
        if off_norm.sqrt() <= threshold {
            break;
        }
        if sweeps == cfg.jacobi_max_sweeps {
            let stuck = (0..n)
                .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
                .filter(|&(i, j)| s[i * n + j].abs() > threshold)
                .count();
            return stuck.max(1) as i32;
        }
        sweeps += 1;

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = s[p * n + q];
                if apq == T::zero() {
                    continue;
                }
                let app = s[p * n + p];
                let aqq = s[q * n + q];

                // Rotation angle
                let theta = (aqq - app) / (apq + apq);
                let root = (T::one() + theta * theta).sqrt();
                let t = if theta >= T::zero() {
                    T::one() / (theta + root)
                } else {
                    -T::one() / (root - theta)
                };
                let cs = T::one() / (T::one() + t * t).sqrt();
                let sn = t * cs;

                // S' = G^T S G
                s[p * n + p] = app - t * apq;
                s[q * n + q] = aqq + t * apq;
                s[p * n + q] = T::zero();
                s[q * n + p] = T::zero();
                for r in 0..n {
                    if r == p || r == q {
                        continue;
                    }
                    let srp = s[r * n + p];
                    let srq = s[r * n + q];
                    s[r * n + p] = cs * srp - sn * srq;
                    s[p * n + r] = cs * srp - sn * srq;
                    s[r * n + q] = sn * srp + cs * srq;
                    s[q * n + r] = sn * srp + cs * srq;
                }

                // V' = V G
                for i in 0..n {
                    let vp = v[i * n + p];
                    let vq = v[i * n + q];
                    v[i * n + p] = cs * vp - sn * vq;
                    v[i * n + q] = sn * vp + cs * vq;
                }
            }
        }
    }

    // Ascending eigenvalues, columns permuted to match
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&x, &y| s[x * n + x].partial_cmp(&s[y * n + y]).unwrap_or(Ordering::Equal));
    for (new_j, &old_j) in order.iter().enumerate() {
        w[new_j] = s[old_j * n + old_j];
        for i in 0..n {
            a[i * lda + new_j] = v[i * n + old_j];
        }
    }
    0
}

// ======================================================================
// geev: general real eigenproblem
// ======================================================================

/// Eigenvalues into `wr`/`wi`, right eigenvectors into `vr` (columns,
/// unit 2-norm). Returns the 1-based index of the eigenvalue that failed
/// to converge, if any.
#[allow(clippy::too_many_arguments)]
pub(crate) fn geev<T: Real>(
    cfg: &LinalgConfig,
    n: usize,
    a: &mut [T],
    lda: usize,
    wr: &mut [T],
    wi: &mut [T],
    vr: &mut [T],
    ldvr: usize,
) -> i32 {
    if !fits(a, n, lda) {
        return -3;
    }
    if wr.len() < n {
        return -4;
    }
    if wi.len() < n {
        return -5;
    }
    if !fits(vr, n, ldvr) {
        return -6;
    }
    if n == 0 {
        return 0;
    }

    let orig: Vec<T> = (0..n).flat_map(|i| a[i * lda..i * lda + n].iter().copied()).collect();
    let mut h = orig.clone();
    hessenberg(&mut h, n);
    let info = hqr(&mut h, n, wr, wi, cfg.qr_max_iterations);

    // `a` is workspace: leave the reduced form behind.
    for i in 0..n {
        a[i * lda..i * lda + n].copy_from_slice(&h[i * n..i * n + n]);
    }
    if info != 0 {
        return info;
    }

    eigenvectors(&orig, n, wr, wi, vr, ldvr, cfg.inverse_iterations);
    0
}

/// In-place reduction to upper Hessenberg form by elimination with
/// pivoting. Entries below the subdiagonal are cleared on return.
fn hessenberg<T: Real>(h: &mut [T], n: usize) {
    for m in 1..n.saturating_sub(1) {
        // Pivot: largest |h[j, m-1]| for j >= m
        let mut x = T::zero();
        let mut piv = m;
        for j in m..n {
            if h[j * n + m - 1].abs() > x.abs() {
                x = h[j * n + m - 1];
                piv = j;
            }
        }
        if piv != m {
            for j in (m - 1)..n {
                h.swap(piv * n + j, m * n + j);
            }
            for j in 0..n {
                h.swap(j * n + piv, j * n + m);
            }
        }
        if x != T::zero() {
            for i in (m + 1)..n {
                let y = h[i * n + m - 1];
                if y == T::zero() {
                    continue;
                }
                let y = y / x;
                h[i * n + m - 1] = y;
                for j in m..n {
                    let hmj = h[m * n + j];
                    h[i * n + j] -= y * hmj;
                }
                for j in 0..n {
                    let hji = h[j * n + i];
                    h[j * n + m] += y * hji;
                }
            }
        }
    }
    for i in 2..n {
        for j in 0..i - 1 {
            h[i * n + j] = T::zero();
        }
    }
}

/// Francis double-shift QR on an upper Hessenberg matrix.
///
/// Indices inside are 1-based over an `(n + 1) x (n + 1)` scratch array,
/// which keeps the deflation and bulge-chasing bounds readable.
/// Complex pairs are stored with the positive imaginary part first.
#[allow(
    clippy::many_single_char_names,
    clippy::too_many_lines,
    unused_assignments
)]
fn hqr<T: Real>(h: &[T], n: usize, wr: &mut [T], wi: &mut [T], max_its: usize) -> i32 {
    let st = n + 1;
    let ix = |i: usize, j: usize| i * st + j;
    let mut a = vec![T::zero(); st * st];
    for i in 1..=n {
        for j in 1..=n {
            a[ix(i, j)] = h[(i - 1) * n + (j - 1)];
        }
    }

    let mut anorm = T::zero();
    for i in 1..=n {
        for j in (i - 1).max(1)..=n {
            anorm += a[ix(i, j)].abs();
        }
    }

    let half = T::from_f64(0.5);
    let (mut p, mut q, mut r) = (T::zero(), T::zero(), T::zero());
    let (mut x, mut y, mut z, mut w) = (T::zero(), T::zero(), T::zero(), T::zero());
    let mut t = T::zero();
    let mut nn = n;

    while nn >= 1 {
        let mut its = 0;
        loop {
            // Look for a single small subdiagonal element
            let mut l = nn;
            while l >= 2 {
                let mut s = a[ix(l - 1, l - 1)].abs() + a[ix(l, l)].abs();
                if s == T::zero() {
                    s = anorm;
                }
                if a[ix(l, l - 1)].abs() + s == s {
                    a[ix(l, l - 1)] = T::zero();
                    break;
                }
                l -= 1;
            }

            x = a[ix(nn, nn)];
            if l == nn {
                // One root found
                wr[nn - 1] = x + t;
                wi[nn - 1] = T::zero();
                nn -= 1;
            } else {
                y = a[ix(nn - 1, nn - 1)];
                w = a[ix(nn, nn - 1)] * a[ix(nn - 1, nn)];
                if l == nn - 1 {
                    // Two roots found
                    p = half * (y - x);
                    q = p * p + w;
                    z = q.abs().sqrt();
                    x += t;
                    if q >= T::zero() {
                        z = p + z.with_sign_of(p);
                        wr[nn - 2] = x + z;
                        wr[nn - 1] = x + z;
                        if z != T::zero() {
                            wr[nn - 1] = x - w / z;
                        }
                        wi[nn - 2] = T::zero();
                        wi[nn - 1] = T::zero();
                    } else {
                        wr[nn - 2] = x + p;
                        wr[nn - 1] = x + p;
                        wi[nn - 2] = z;
                        wi[nn - 1] = -z;
                    }
                    nn -= 2;
                } else {
                    if its == max_its {
                        return nn as i32;
                    }
                    if its == 10 || its == 20 {
                        // Exceptional shift
                        t += x;
                        for i in 1..=nn {
                            a[ix(i, i)] -= x;
                        }
                        let s = a[ix(nn, nn - 1)].abs() + a[ix(nn - 1, nn - 2)].abs();
                        x = T::from_f64(0.75) * s;
                        y = x;
                        w = T::from_f64(-0.4375) * s * s;
                    }
                    its += 1;

                    // Look for two consecutive small subdiagonal elements
                    let mut m = nn - 2;
                    loop {
                        z = a[ix(m, m)];
                        r = x - z;
                        let s = y - z;
                        p = (r * s - w) / a[ix(m + 1, m)] + a[ix(m, m + 1)];
                        q = a[ix(m + 1, m + 1)] - z - r - s;
                        r = a[ix(m + 2, m + 1)];
                        let s = p.abs() + q.abs() + r.abs();
                        p /= s;
                        q /= s;
                        r /= s;
                        if m == l {
                            break;
                        }
                        let u = a[ix(m, m - 1)].abs() * (q.abs() + r.abs());
                        let v = p.abs()
                            * (a[ix(m - 1, m - 1)].abs() + z.abs() + a[ix(m + 1, m + 1)].abs());
                        if u + v == v {
                            break;
                        }
                        m -= 1;
                    }
                    for i in (m + 2)..=nn {
                        a[ix(i, i - 2)] = T::zero();
                        if i != m + 2 {
                            a[ix(i, i - 3)] = T::zero();
                        }
                    }

                    // Double QR step on rows l..nn and columns m..nn
                    for k in m..nn {
                        if k != m {
                            p = a[ix(k, k - 1)];
                            q = a[ix(k + 1, k - 1)];
                            r = T::zero();
                            if k != nn - 1 {
                                r = a[ix(k + 2, k - 1)];
                            }
                            x = p.abs() + q.abs() + r.abs();
                            if x != T::zero() {
                                p /= x;
                                q /= x;
                                r /= x;
                            }
                        }
                        let s = (p * p + q * q + r * r).sqrt().with_sign_of(p);
                        if s == T::zero() {
                            continue;
                        }
                        if k == m {
                            if l != m {
                                a[ix(k, k - 1)] = -a[ix(k, k - 1)];
                            }
                        } else {
                            a[ix(k, k - 1)] = -s * x;
                        }
                        p += s;
                        x = p / s;
                        y = q / s;
                        z = r / s;
                        q /= p;
                        r /= p;
                        // Row modification
                        for j in k..=nn {
                            p = a[ix(k, j)] + q * a[ix(k + 1, j)];
                            if k != nn - 1 {
                                p += r * a[ix(k + 2, j)];
                                a[ix(k + 2, j)] -= p * z;
                            }
                            a[ix(k + 1, j)] -= p * y;
                            a[ix(k, j)] -= p * x;
                        }
                        // Column modification
                        let mmin = nn.min(k + 3);
                        for i in l..=mmin {
                            p = x * a[ix(i, k)] + y * a[ix(i, k + 1)];
                            if k != nn - 1 {
                                p += z * a[ix(i, k + 2)];
                                a[ix(i, k + 2)] -= p * r;
                            }
                            a[ix(i, k + 1)] -= p * q;
                            a[ix(i, k)] -= p;
                        }
                    }
                }
            }
            if l + 1 >= nn {
                break;
            }
        }
    }
    0
}

/// Inverse iteration for every eigenvalue; writes unit-norm columns of
/// `vr`. Real vectors have their largest component positive; complex
/// vectors are rotated so that their largest component is real positive.
///
/// Vectors for a repeated real eigenvalue are kept orthogonal to the ones
/// already found for it, so a diagonalizable matrix gets a full basis. A
/// defective eigenvalue has no such basis; its extra vectors repeat the
/// first one, as LAPACK's do.
fn eigenvectors<T: Real>(
    a: &[T],
    n: usize,
    wr: &[T],
    wi: &[T],
    vr: &mut [T],
    ldvr: usize,
    iterations: usize,
) {
    let anorm = lange(NormKind::One, n, n, a, n).max(T::min_positive());
    let close = T::epsilon().sqrt() * anorm.max(T::one());
    let mut found: Vec<(T, Vec<T>)> = Vec::new();
    let mut j = 0;
    while j < n {
        if wi[j] == T::zero() || j + 1 == n {
            let mut shifted = a.to_vec();
            for i in 0..n {
                shifted[i * n + i] -= wr[j];
            }
            let basis: Vec<&[T]> = found
                .iter()
                .filter(|(w, _)| (*w - wr[j]).abs() <= close)
                .map(|(_, v)| v.as_slice())
                .collect();
            let mut x = inverse_iterate(shifted.clone(), n, anorm, iterations, &basis);
            if !basis.is_empty() && residual(a, n, wr[j], &x) > close {
                x = inverse_iterate(shifted, n, anorm, iterations, &[]);
            }
            let big = iamax(&x);
            if x[big] < T::zero() {
                x.iter_mut().for_each(|v| *v = -*v);
            }
            for i in 0..n {
                vr[i * ldvr + j] = x[i];
            }
            found.push((wr[j], x));
            j += 1;
        } else {
            let (re, im) = (wr[j], wi[j]);
            let dim = 2 * n;
            let mut big = vec![T::zero(); dim * dim];
            for i in 0..n {
                for k in 0..n {
                    let aik = a[i * n + k];
                    big[i * dim + k] = aik;
                    big[(n + i) * dim + n + k] = aik;
                }
                big[i * dim + i] -= re;
                big[(n + i) * dim + n + i] -= re;
                big[i * dim + n + i] = im;
                big[(n + i) * dim + i] = -im;
            }
            let v = inverse_iterate(big, dim, anorm + im.abs(), iterations, &[]);
            let (xr, xi) = v.split_at(n);

            // Rotate so the largest-modulus component is real and positive
            let k = (0..n)
                .max_by(|&p, &q| {
                    let mp = xr[p] * xr[p] + xi[p] * xi[p];
                    let mq = xr[q] * xr[q] + xi[q] * xi[q];
                    mp.partial_cmp(&mq).unwrap_or(Ordering::Equal)
                })
                .unwrap_or(0);
            let modulus = xr[k].hypot(xi[k]);
            let (c, s) = if modulus == T::zero() {
                (T::one(), T::zero())
            } else {
                (xr[k] / modulus, xi[k] / modulus)
            };
            for i in 0..n {
                vr[i * ldvr + j] = xr[i] * c + xi[i] * s;
                vr[i * ldvr + j + 1] = xi[i] * c - xr[i] * s;
            }
            j += 2;
        }
    }
}

/// `max_i |(A x)_i - lambda x_i|`.
fn residual<T: Real>(a: &[T], n: usize, lambda: T, x: &[T]) -> T {
    (0..n).fold(T::zero(), |worst, i| {
        let ax = dot(&a[i * n..i * n + n], x);
        worst.max((ax - lambda * x[i]).abs())
    })
}

/// Remove the components of `b` along each unit vector in `basis`.
fn deflate<T: Real>(b: &mut [T], basis: &[&[T]]) {
    for q in basis {
        let d = dot(b, q);
        for (bi, &qi) in b.iter_mut().zip(q.iter()) {
            *bi -= d * qi;
        }
    }
}

/// Unit start vector with a solid component outside `basis`: a spread
/// vector away from any axis-aligned or all-equal eigenvector, else the
/// first axis that survives deflation.
fn start_vector<T: Real>(dim: usize, basis: &[&[T]]) -> Vec<T> {
    let spread = (0..dim).map(|i| T::one() + T::from_f64(0.37) * T::from_usize(i % 5));
    let axes = (0..dim).map(|k| (0..dim).map(move |i| if i == k { T::one() } else { T::zero() }));
    let candidates = core::iter::once(spread.collect::<Vec<T>>())
        .chain(axes.map(|axis| axis.collect::<Vec<T>>()));
    let mut fallback = None;
    for mut b in candidates {
        let before = nrm2(&b);
        deflate(&mut b, basis);
        let after = nrm2(&b);
        if after > T::from_f64(0.1) * before {
            b.iter_mut().for_each(|v| *v /= after);
            return b;
        }
        if fallback.is_none() {
            fallback = Some(b);
        }
    }
    fallback.unwrap_or_default()
}

/// Factor a nearly singular `m` once (tiny pivots lifted to
/// `eps * max(anorm, 1)`), then repeatedly solve `m x = b`, deflate against
/// `basis` and renormalize. A solve that overflows or collapses to zero
/// keeps the previous iterate.
fn inverse_iterate<T: Real>(
    mut m: Vec<T>,
    dim: usize,
    anorm: T,
    iterations: usize,
    basis: &[&[T]],
) -> Vec<T> {
    let tiny = T::epsilon() * anorm.max(T::one());
    let mut piv = vec![0_usize; dim];
    for k in 0..dim {
        let mut p = k;
        for i in (k + 1)..dim {
            if m[i * dim + k].abs() > m[p * dim + k].abs() {
                p = i;
            }
        }
        piv[k] = p;
        if p != k {
            for j in 0..dim {
                m.swap(k * dim + j, p * dim + j);
            }
        }
        if m[k * dim + k].abs() < tiny {
            m[k * dim + k] = tiny.with_sign_of(m[k * dim + k]);
        }
        let pivot = m[k * dim + k];
        for i in (k + 1)..dim {
            let f = m[i * dim + k] / pivot;
            m[i * dim + k] = f;
            for j in (k + 1)..dim {
                let mkj = m[k * dim + j];
                m[i * dim + j] -= f * mkj;
            }
        }
    }

    let mut x = start_vector(dim, basis);
    for _ in 0..iterations.max(1) {
        let mut b = x.clone();
        for (k, &p) in piv.iter().enumerate() {
            b.swap(k, p);
        }
        for i in 1..dim {
            for j in 0..i {
                let mij_bj = m[i * dim + j] * b[j];
                b[i] -= mij_bj;
            }
        }
        for i in (0..dim).rev() {
            for j in (i + 1)..dim {
                let mij_bj = m[i * dim + j] * b[j];
                b[i] -= mij_bj;
            }
            b[i] /= m[i * dim + i];
        }
        deflate(&mut b, basis);
        let norm = nrm2(&b);
        if !(norm > T::zero() && norm.is_finite()) {
            break;
        }
        b.iter_mut().for_each(|v| *v /= norm);
        x = b;
    }
    x
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn column(vr: &[f64], n: usize, j: usize) -> Vec<f64> {
        (0..n).map(|i| vr[i * n + j]).collect()
    }

    #[test]
    fn test_syev_diagonal_ascending() {
        let cfg = LinalgConfig::default();
        let mut a = vec![5.0_f64, 0.0, 0.0, 3.0];
        let mut w = [0.0; 2];
        assert_eq!(syev(&cfg, 2, &mut a, 2, &mut w), 0);
        assert_eq!(w, [3.0, 5.0]);
        assert_eq!(a, vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_syev_2x2() {
        let cfg = LinalgConfig::default();
        let src = [2.0_f64, 1.0, 1.0, 3.0];
        let mut a = src.to_vec();
        let mut w = [0.0; 2];
        assert_eq!(syev(&cfg, 2, &mut a, 2, &mut w), 0);
        let s5 = 5.0_f64.sqrt();
        assert!((w[0] - (5.0 - s5) / 2.0).abs() < 1e-12);
        assert!((w[1] - (5.0 + s5) / 2.0).abs() < 1e-12);
        for j in 0..2 {
            assert!(residual(&src, 2, w[j], &column(&a, 2, j)) < 1e-10);
        }
    }

    #[test]
    fn test_syev_sweep_cap() {
        let cfg = LinalgConfig {
            jacobi_max_sweeps: 0,
            ..LinalgConfig::default()
        };
        let mut a = vec![2.0_f64, 1.0, 1.0, 3.0];
        let mut w = [0.0; 2];
        assert!(syev(&cfg, 2, &mut a, 2, &mut w) > 0);
    }

    #[test]
    fn test_geev_real_nonsymmetric() {
        // Eigenvalues 2 and 3
        let src = [4.0_f64, 1.0, -2.0, 1.0];
        let mut a = src.to_vec();
        let (mut wr, mut wi, mut vr) = ([0.0; 2], [0.0; 2], [0.0; 4]);
        assert_eq!(geev(&LinalgConfig::default(), 2, &mut a, 2, &mut wr, &mut wi, &mut vr, 2), 0);
        let mut vals = wr.to_vec();
        vals.sort_by(f64::total_cmp);
        assert!((vals[0] - 2.0).abs() < 1e-10);
        assert!((vals[1] - 3.0).abs() < 1e-10);
        assert_eq!(wi, [0.0, 0.0]);
        for j in 0..2 {
            let v = column(&vr, 2, j);
            assert!(residual(&src, 2, wr[j], &v) < 1e-8);
            assert!((nrm2(&v) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_geev_3x3() {
        // Upper triangular: eigenvalues on the diagonal
        let src = [1.0_f64, 2.0, 3.0, 0.0, 4.0, 5.0, 0.0, 0.0, 6.0];
        let mut a = src.to_vec();
        let (mut wr, mut wi, mut vr) = ([0.0; 3], [0.0; 3], [0.0; 9]);
        assert_eq!(geev(&LinalgConfig::default(), 3, &mut a, 3, &mut wr, &mut wi, &mut vr, 3), 0);
        let mut vals = wr.to_vec();
        vals.sort_by(f64::total_cmp);
        for (got, want) in vals.iter().zip([1.0, 4.0, 6.0]) {
            assert!((got - want).abs() < 1e-10);
        }
        for j in 0..3 {
            assert!(residual(&src, 3, wr[j], &column(&vr, 3, j)) < 1e-8);
        }
    }

    #[test]
    fn test_geev_complex_pair() {
        // Rotation by 90 degrees: eigenvalues ±i, eigenvector (1, ∓i)/√2
        let mut a = vec![0.0_f64, -1.0, 1.0, 0.0];
        let (mut wr, mut wi, mut vr) = ([0.0; 2], [0.0; 2], [0.0; 4]);
        assert_eq!(geev(&LinalgConfig::default(), 2, &mut a, 2, &mut wr, &mut wi, &mut vr, 2), 0);
        assert!(wr[0].abs() < 1e-12 && wr[1].abs() < 1e-12);
        assert!((wi[0] - 1.0).abs() < 1e-12);
        assert!((wi[1] + 1.0).abs() < 1e-12);

        // A (x + iy) = i (x + iy)  <=>  A x = -y, A y = x
        let x = column(&vr, 2, 0);
        let y = column(&vr, 2, 1);
        let ax = [-x[1], x[0]];
        let ay = [-y[1], y[0]];
        for i in 0..2 {
            assert!((ax[i] + y[i]).abs() < 1e-8);
            assert!((ay[i] - x[i]).abs() < 1e-8);
        }
    }

    #[test]
    fn test_geev_iteration_cap() {
        let cfg = LinalgConfig {
            qr_max_iterations: 0,
            ..LinalgConfig::default()
        };
        let mut a = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0];
        let (mut wr, mut wi, mut vr) = ([0.0; 3], [0.0; 3], [0.0; 9]);
        assert!(geev(&cfg, 3, &mut a, 3, &mut wr, &mut wi, &mut vr, 3) > 0);
    }

    fn run_geev(src: &[f64], n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let mut a = src.to_vec();
        let (mut wr, mut wi, mut vr) = (vec![0.0; n], vec![0.0; n], vec![0.0; n * n]);
        assert_eq!(geev(&LinalgConfig::default(), n, &mut a, n, &mut wr, &mut wi, &mut vr, n), 0);
        (wr, wi, vr)
    }

    fn det3(m: &[f64]) -> f64 {
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    #[test]
    fn test_geev_zero_matrix_gives_unit_vectors() {
        let (wr, wi, vr) = run_geev(&[0.0; 4], 2);
        assert_eq!(wr, vec![0.0, 0.0]);
        assert_eq!(wi, vec![0.0, 0.0]);
        assert!(vr.iter().all(|v| v.is_finite()));
        for j in 0..2 {
            assert!((nrm2(&column(&vr, 2, j)) - 1.0).abs() < 1e-12);
        }
        let cross = dot(&column(&vr, 2, 0), &column(&vr, 2, 1));
        assert!(cross.abs() < 1e-8);
    }

    #[test]
    fn test_geev_repeated_eigenvalues_span_full_basis() {
        let identity = [1.0_f64, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let (wr, _, vr) = run_geev(&identity, 3);
        assert!(det3(&vr).abs() > 0.5);
        for j in 0..3 {
            assert!(residual(&identity, 3, wr[j], &column(&vr, 3, j)) < 1e-10);
        }

        let diag = [2.0_f64, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0];
        let (wr, _, vr) = run_geev(&diag, 3);
        assert!(det3(&vr).abs() > 0.5);
        for j in 0..3 {
            assert!(residual(&diag, 3, wr[j], &column(&vr, 3, j)) < 1e-8);
        }
    }

    #[test]
    fn test_geev_defective_matrix_keeps_eigenvectors() {
        // Single Jordan block: only one eigenvector direction exists
        let jordan = [2.0_f64, 1.0, 0.0, 2.0];
        let (wr, _, vr) = run_geev(&jordan, 2);
        for j in 0..2 {
            let v = column(&vr, 2, j);
            assert!(v.iter().all(|x| x.is_finite()));
            assert!(residual(&jordan, 2, wr[j], &v) < 1e-8);
        }
    }
}
