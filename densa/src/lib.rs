//! # Densa
//!
//! Dense numeric arrays for Rust: matrices and vectors with a run-time
//! dtype, and the linear algebra around them.
//!
//! One `use densa::prelude::*;` gives you [`Matrix`](core::Matrix),
//! [`Vector`](core::Vector), the decompositions and the configuration.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Arrays, operand dispatch, linear algebra, convolution |
//!
//! ```
//! use densa::prelude::*;
//!
//! let a = Matrix::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]]).unwrap();
//! let r = a.rref().unwrap();
//! assert_eq!(r.to_f64_vec(), vec![1.0, 0.0, 0.0, 1.0]);
//! ```

pub use densa_core as core;

/// Glob-import convenience: `use densa::prelude::*;`
pub mod prelude {
    pub use densa_core::prelude::*;
}
