use thiserror::Error;

use crate::matrix::Element;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatrixError {
    #[error("matrix dimension must be > 0")]
    ZeroDimension,
    #[error("dimension mismatch: expected {expected}x{expected}, got {got}x{got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("data length {len} does not match a {dim}x{dim} matrix")]
    LengthMismatch { dim: usize, len: usize },
    #[error("result mismatch at ({row}, {col}): expected {expected}, got {got}")]
    Mismatch {
        row: usize,
        col: usize,
        expected: Element,
        got: Element,
    },
    #[error("cannot allocate {elements} matrix elements")]
    Allocation { elements: usize },
    #[error("reference output has not been computed")]
    MissingReference,
    #[error("reference output is already computed")]
    ReferenceFrozen,
}

pub type Result<T> = std::result::Result<T, MatrixError>;
