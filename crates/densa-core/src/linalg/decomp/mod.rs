//! Decomposition orchestrators.
//!
//! | Decomposition | Module       | Factorization           |
//! |---------------|--------------|-------------------------|
//! | LU            | [`lu`]       | `PA = LU`               |
//! | Cholesky      | [`cholesky`] | `A = L L^T`             |
//! | SVD           | [`svd`]      | `A = U diag(s) V^T`     |
//! | Eigen         | [`eig`]      | `A V = V diag(d)`       |
//!
//! Each orchestrator copies its input, calls the provider and converts a
//! non-zero status into [`CoreError::FactorizationFailed`](crate::CoreError::FactorizationFailed).

pub mod cholesky;
pub mod eig;
pub mod lu;
pub mod svd;

pub use cholesky::Cholesky;
pub use eig::Eigen;
pub use lu::Lu;
pub use svd::Svd;

pub(crate) use lu::promote;
