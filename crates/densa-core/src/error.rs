use thiserror::Error;

use crate::dtype::DType;

/// All errors returned by `densa-core`.
///
/// Validation variants are raised before any output is allocated, so a
/// failed call leaves its operands untouched. [`FactorizationFailed`]
/// carries the raw status a [`LinalgProvider`](crate::linalg::LinalgProvider)
/// routine reported.
///
/// [`FactorizationFailed`]: CoreError::FactorizationFailed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An argument is outside the domain of the operation.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    /// Operand shapes do not match the required layout.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// Operand element type differs from the receiver's.
    #[error("dtype mismatch: expected {expected}, got {got}")]
    DtypeMismatch { expected: DType, got: DType },

    /// A row, column or flat index is out of bounds.
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// The provider routine returned a non-zero status.
    #[error("{routine} failed with status {status}")]
    FactorizationFailed { routine: &'static str, status: i32 },
}

impl CoreError {
    /// `true` if the error came from a provider status rather than validation.
    pub fn is_factorization_failure(&self) -> bool {
        matches!(self, Self::FactorizationFailed { .. })
    }
}

/// Convenience alias used throughout `densa-core`.
pub type Result<T> = std::result::Result<T, CoreError>;
