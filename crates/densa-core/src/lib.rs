//! `densa-core`: dense matrices and vectors with a run-time dtype.
//!
//! Provides [`Matrix`] and [`Vector`] over a dtype-tagged [`NumericBuffer`]
//! (`F32`, `F64` or `I32`), scalar / vector / matrix operand dispatch,
//! LU, Cholesky, eigen and singular value decompositions behind a pluggable
//! [`LinalgProvider`], row echelon forms, strided convolution and random
//! factories.
//!
//! # Design
//!
//! - Values are owned and immutable by default; every operation returns a
//!   new array. The few `&mut self` row primitives exist for working copies.
//! - Shape and dtype preconditions are checked up front by the [`guard`]
//!   functions and reported as a [`CoreError`], never as a panic.
//! - Numerical kernels live behind [`LinalgProvider`]; [`Linalg`] holds a
//!   provider and a [`LinalgConfig`] by value, so nothing is global.
//!
//! ```
//! use densa_core::prelude::*;
//!
//! let a = Matrix::from_rows(vec![vec![4.0_f64, 2.0], vec![2.0, 3.0]]).unwrap();
//! assert_eq!(a.determinant().unwrap(), 8.0);
//!
//! let x = Vector::from_vec(vec![1.0_f64, 1.0]).unwrap();
//! let ax = a.dot(&x).unwrap().into_vector().unwrap();
//! assert_eq!(ax.to_f64_vec(), vec![6.0, 5.0]);
//! ```

pub mod buffer;
pub mod config;
pub mod convolve;
pub mod dtype;
pub mod error;
pub mod guard;
pub mod linalg;
mod math;
pub mod matrix;
pub mod operand;
mod random;
pub mod vector;

// Re-export key types at crate root for convenience.
pub use buffer::NumericBuffer;
pub use config::{ConfigError, LinalgConfig};
pub use dtype::{DType, Float, Integer, Real, Scalar};
pub use error::{CoreError, Result};
pub use linalg::{
    Cholesky, Eigen, Linalg, LinalgProvider, Lu, NativeProvider, NormKind, SortOrder, Svd,
    Transpose, Uplo,
};
pub use matrix::Matrix;
pub use operand::{Array, BinaryOp, Operand};
pub use vector::Vector;

/// Items intended for glob-import: `use densa_core::prelude::*;`
pub mod prelude {
    pub use crate::buffer::NumericBuffer;
    pub use crate::config::LinalgConfig;
    pub use crate::dtype::{DType, Float, Integer, Real, Scalar};
    pub use crate::error::{CoreError, Result};
    pub use crate::linalg::{Linalg, NativeProvider, NormKind, SortOrder};
    pub use crate::matrix::Matrix;
    pub use crate::operand::{Array, Operand};
    pub use crate::vector::Vector;
}
