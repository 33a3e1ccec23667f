//! `mm-matrix` - Matrix storage for matmul-bench.
//!
//! This crate provides:
//! - A square, row-major `Matrix` of integer elements
//! - A `MatrixStore` owning the inputs, output and serial reference of a run
//! - Seeded, reproducible input initialization
//! - The exact-equality `verify` check shared by every strategy

pub mod error;
pub mod matrix;
pub mod store;
pub mod verify;

// Re-export primary types at the crate root for convenience.
pub use error::{MatrixError, Result};
pub use matrix::{Element, Matrix};
pub use store::{MatrixStore, INPUT_VALUE_BOUND};
pub use verify::verify;
