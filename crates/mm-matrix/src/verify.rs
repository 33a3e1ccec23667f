use crate::error::{MatrixError, Result};
use crate::matrix::Matrix;

/// Compares `output` against `reference` cell by cell in row-major order.
///
/// Returns the first mismatching cell as `MatrixError::Mismatch`. Equality is
/// exact; elements are integers.
pub fn verify(output: &Matrix, reference: &Matrix) -> Result<()> {
    reference.ensure_same_dim(output)?;

    let dim = reference.dim();
    let mismatch = reference
        .as_slice()
        .iter()
        .zip(output.as_slice())
        .position(|(expected, got)| expected != got);

    match mismatch {
        None => Ok(()),
        Some(idx) => Err(MatrixError::Mismatch {
            row: idx / dim,
            col: idx % dim,
            expected: reference.as_slice()[idx],
            got: output.as_slice()[idx],
        }),
    }
}
