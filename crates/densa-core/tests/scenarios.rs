//! End-to-end behaviour of the public API on small known matrices.

#![allow(clippy::float_cmp)]

use approx::assert_abs_diff_eq;
use densa_core::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn mat(rows: Vec<Vec<f64>>) -> Matrix {
    Matrix::from_rows(rows).unwrap()
}

#[test]
fn transpose_of_2x2() {
    let m = mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(m.transpose(), mat(vec![vec![1.0, 3.0], vec![2.0, 4.0]]));
}

#[test]
fn determinant_of_2x2() {
    init_tracing();
    let m = mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_abs_diff_eq!(m.determinant().unwrap(), -2.0, epsilon = 1e-12);
}

#[test]
fn rref_of_nonsingular_is_identity() {
    init_tracing();
    let m = mat(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(m.rref().unwrap(), Matrix::identity(2, DType::F64).unwrap());
}

#[test]
fn rref_of_singular_eliminates_second_row() {
    let m = mat(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
    assert_eq!(m.rref().unwrap(), mat(vec![vec![1.0, 2.0], vec![0.0, 0.0]]));
}

#[test]
fn join_left_of_identities() {
    let eye = Matrix::identity(2, DType::I32).unwrap();
    let joined = eye.join_left(&eye).unwrap();
    assert_eq!(
        joined,
        Matrix::from_rows(vec![vec![1, 0, 1, 0], vec![0, 1, 0, 1]]).unwrap()
    );
}

#[test]
fn scale_by_zero_is_zeros() {
    let m = Matrix::full(2, 2, 5.0, DType::F64).unwrap();
    assert_eq!(m.scale(0.0).unwrap(), Matrix::zeros(2, 2, DType::F64).unwrap());
}

// ----------------------------------------------------------------------
// Determinant agreement with cofactor expansion
// ----------------------------------------------------------------------

fn cofactor_det(a: &[Vec<f64>]) -> f64 {
    match a.len() {
        1 => a[0][0],
        2 => a[0][0] * a[1][1] - a[0][1] * a[1][0],
        n => (0..n)
            .map(|j| {
                let minor: Vec<Vec<f64>> = a[1..]
                    .iter()
                    .map(|row| {
                        row.iter()
                            .enumerate()
                            .filter(|&(c, _)| c != j)
                            .map(|(_, &v)| v)
                            .collect()
                    })
                    .collect();
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                sign * a[0][j] * cofactor_det(&minor)
            })
            .sum(),
    }
}

#[test]
fn determinant_matches_cofactor_expansion() {
    let cases = vec![
        vec![vec![3.0, 8.0], vec![4.0, 6.0]],
        vec![vec![0.0, 1.0], vec![1.0, 0.0]],
        vec![
            vec![6.0, 1.0, 1.0],
            vec![4.0, -2.0, 5.0],
            vec![2.0, 8.0, 7.0],
        ],
        vec![
            vec![0.0, 2.0, 1.0],
            vec![1.0, 0.0, 3.0],
            vec![4.0, 5.0, 0.0],
        ],
        vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ],
    ];
    for rows in cases {
        let expected = cofactor_det(&rows);
        let got = mat(rows).determinant().unwrap();
        assert_abs_diff_eq!(got, expected, epsilon = 1e-9);
    }
}

#[test]
fn integer_determinant_is_promoted() {
    let m = Matrix::from_rows(vec![vec![2, 0, 0], vec![0, 3, 0], vec![0, 0, 4]]).unwrap();
    assert_abs_diff_eq!(m.determinant().unwrap(), 24.0, epsilon = 1e-12);
}

// ----------------------------------------------------------------------
// Decompositions through an injected orchestrator
// ----------------------------------------------------------------------

#[test]
fn cholesky_reconstructs_input() {
    init_tracing();
    let b = mat(vec![
        vec![1.0, 2.0, 0.5],
        vec![-1.0, 0.0, 3.0],
        vec![2.0, 1.0, 1.0],
    ]);
    // B^T B + 3 I is symmetric positive definite
    let a = b
        .transpose()
        .dot(&b)
        .unwrap()
        .into_matrix()
        .unwrap()
        .sum(&Matrix::identity(3, DType::F64).unwrap().scale(3.0).unwrap())
        .unwrap();

    let la = Linalg::default();
    let l = la.cholesky(&a).unwrap().into_inner();
    let back = la.matmul(&l, &l.transpose()).unwrap();
    for (x, y) in back.to_f64_vec().iter().zip(a.to_f64_vec()) {
        assert_abs_diff_eq!(*x, y, epsilon = 1e-10);
    }
}

#[test]
fn lu_reconstructs_permuted_input() {
    let a = mat(vec![
        vec![2.0, 1.0, 1.0],
        vec![4.0, -6.0, 0.0],
        vec![-2.0, 7.0, 2.0],
    ]);
    let la = Linalg::default();
    let lu = la.lu(&a).unwrap();
    let pa = la.matmul(lu.p(), &a).unwrap();
    let prod = la.matmul(lu.l(), lu.u()).unwrap();
    for (x, y) in pa.to_f64_vec().iter().zip(prod.to_f64_vec()) {
        assert_abs_diff_eq!(*x, y, epsilon = 1e-12);
    }
    assert_abs_diff_eq!(lu.det(), a.determinant().unwrap(), epsilon = 1e-12);
}

#[test]
fn configured_orchestrator_surfaces_nonconvergence() {
    init_tracing();
    let config = LinalgConfig::from_toml_str("[linalg]\njacobi_max_sweeps = 0\n").unwrap();
    let la = Linalg::native(config);
    let a = mat(vec![vec![2.0, 1.0], vec![1.0, 3.0]]);
    let err = la.svd(&a).unwrap_err();
    assert!(matches!(err, CoreError::FactorizationFailed { routine: "gesdd", .. }));
}

#[test]
fn general_eigen_of_degenerate_matrices_gives_a_full_basis() {
    init_tracing();
    let la = Linalg::default();

    let zero = la.eigen(&Matrix::zeros(2, 2, DType::F64).unwrap(), false).unwrap();
    assert_eq!(zero.values().to_f64_vec(), vec![0.0, 0.0]);
    let vecs = zero.vectors();
    assert!(vecs.to_f64_vec().iter().all(|v| v.is_finite()));
    for j in 0..2 {
        let col = vecs.col_as_vector(j).unwrap();
        assert_abs_diff_eq!(col.l2_norm(), 1.0, epsilon = 1e-12);
    }
    assert!(vecs.determinant().unwrap().abs() > 0.5);

    let eye = la.eigen(&Matrix::identity(3, DType::F64).unwrap(), false).unwrap();
    assert!(eye.vectors().determinant().unwrap().abs() > 0.5);
}

#[test]
fn vector_round_trip_through_matrix_products() {
    let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
    let v = Vector::from_vec(vec![1, 0, -1]).unwrap();
    assert_eq!(v.dot_matrix(&m).unwrap().to_f64_vec(), vec![-4.0, -4.0]);
    let w = Vector::from_vec(vec![1, 1]).unwrap();
    let mw = m.dot(&w).unwrap().into_vector().unwrap();
    assert_eq!(mw.as_slice::<i32>().unwrap(), &[3, 7, 11]);
}

#[test]
fn convolution_through_public_api() {
    let img = Matrix::from_rows(vec![
        vec![1.0_f32, 2.0, 3.0, 4.0],
        vec![5.0, 6.0, 7.0, 8.0],
    ])
    .unwrap();
    let k = Matrix::from_rows(vec![vec![1.0_f32]]).unwrap();
    let out = img.convolve(&k, 2).unwrap();
    assert_eq!(out.shape(), (1, 2));
    assert_eq!(out.to_f64_vec(), vec![1.0, 3.0]);
}
