use crate::error::{MatrixError, Result};

/// Element type shared by every matrix in a run.
pub type Element = i32;

/// A square matrix of [`Element`]s stored contiguously in row-major order.
///
/// The dimension is fixed at construction. Values are overwritten in place by
/// the initializer and by strategies; the buffer itself is never reallocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    dim: usize,
    data: Vec<Element>,
}

impl Matrix {
    /// Create a zero-filled `dim x dim` matrix.
    ///
    /// # Errors
    /// Returns `ZeroDimension` for `dim == 0` and `Allocation` if the buffer
    /// cannot be reserved.
    pub fn zeros(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(MatrixError::ZeroDimension);
        }
        let elements = dim
            .checked_mul(dim)
            .ok_or(MatrixError::Allocation { elements: usize::MAX })?;

        let mut data = Vec::new();
        data.try_reserve_exact(elements)
            .map_err(|_| MatrixError::Allocation { elements })?;
        data.resize(elements, 0);

        Ok(Matrix { dim, data })
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if `data.len() != dim * dim`.
    pub fn from_rows(dim: usize, data: Vec<Element>) -> Result<Self> {
        if dim == 0 {
            return Err(MatrixError::ZeroDimension);
        }
        if dim.checked_mul(dim) != Some(data.len()) {
            return Err(MatrixError::LengthMismatch {
                dim,
                len: data.len(),
            });
        }
        Ok(Matrix { dim, data })
    }

    /// Side length of the matrix.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Total number of elements (`dim * dim`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a matrix has at least one element.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the element at (`row`, `col`).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Element {
        self.check_index(row, col);
        self.data[row * self.dim + col]
    }

    /// Overwrites the element at (`row`, `col`).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: Element) {
        self.check_index(row, col);
        self.data[row * self.dim + col] = value;
    }

    /// Returns row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= dim()`.
    pub fn row(&self, i: usize) -> &[Element] {
        assert!(i < self.dim, "row {} out of range for dim {}", i, self.dim);
        let offset = i * self.dim;
        &self.data[offset..offset + self.dim]
    }

    /// Returns the elements in row-major order.
    pub fn as_slice(&self) -> &[Element] {
        &self.data
    }

    /// Returns the elements in row-major order for in-place writes.
    pub fn as_mut_slice(&mut self) -> &mut [Element] {
        &mut self.data
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: Element) {
        self.data.fill(value);
    }

    fn check_index(&self, row: usize, col: usize) {
        assert!(row < self.dim, "row {} out of range for dim {}", row, self.dim);
        assert!(col < self.dim, "column {} out of range for dim {}", col, self.dim);
    }

    /// Returns `DimensionMismatch` unless `other` has the same dimension.
    pub fn ensure_same_dim(&self, other: &Matrix) -> Result<()> {
        if self.dim != other.dim {
            return Err(MatrixError::DimensionMismatch {
                expected: self.dim,
                got: other.dim,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let m = Matrix::zeros(3).unwrap();
        assert_eq!(m.dim(), 3);
        assert_eq!(m.len(), 9);
        assert!(!m.is_empty());
        assert_eq!(m.as_slice(), &[0; 9]);
    }

    #[test]
    fn test_zero_dimension() {
        assert_eq!(Matrix::zeros(0), Err(MatrixError::ZeroDimension));
        assert_eq!(Matrix::from_rows(0, vec![]), Err(MatrixError::ZeroDimension));
    }

    #[test]
    fn test_from_rows_length_mismatch() {
        let err = Matrix::from_rows(2, vec![1, 2, 3]).unwrap_err();
        assert_eq!(err, MatrixError::LengthMismatch { dim: 2, len: 3 });
    }

    #[test]
    fn test_get_set_row() {
        let mut m = Matrix::from_rows(2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.get(1, 0), 3);
        m.set(0, 1, 42);
        assert_eq!(m.row(0), &[1, 42]);
        assert_eq!(m.row(1), &[3, 4]);
    }

    #[test]
    #[should_panic(expected = "column 2 out of range for dim 2")]
    fn test_get_column_out_of_range_panics() {
        let m = Matrix::zeros(2).unwrap();
        let _ = m.get(0, 2);
    }

    #[test]
    #[should_panic(expected = "row 2 out of range for dim 2")]
    fn test_get_row_out_of_range_panics() {
        let m = Matrix::zeros(2).unwrap();
        let _ = m.get(2, 0);
    }

    #[test]
    #[should_panic(expected = "row 3 out of range for dim 2")]
    fn test_set_row_out_of_range_panics() {
        let mut m = Matrix::zeros(2).unwrap();
        m.set(3, 0, 1);
    }

    #[test]
    #[should_panic(expected = "row 2 out of range for dim 2")]
    fn test_row_out_of_range_panics() {
        let m = Matrix::zeros(2).unwrap();
        let _ = m.row(2);
    }

    #[test]
    fn test_fill() {
        let mut m = Matrix::from_rows(2, vec![1, 2, 3, 4]).unwrap();
        m.fill(0);
        assert_eq!(m.as_slice(), &[0; 4]);
    }

    #[test]
    fn test_ensure_same_dim() {
        let a = Matrix::zeros(2).unwrap();
        let b = Matrix::zeros(3).unwrap();
        assert!(a.ensure_same_dim(&a.clone()).is_ok());
        assert_eq!(
            a.ensure_same_dim(&b),
            Err(MatrixError::DimensionMismatch { expected: 2, got: 3 })
        );
    }
}
