// Inner loops shared by the serial and parallel strategies.
//
// All slices are row-major views of square `n x n` matrices.

use mm_matrix::Element;

/// out_row += a_row @ b, walking `b` row by row (k, j order).
#[inline]
pub(crate) fn accumulate_row(a_row: &[Element], b: &[Element], n: usize, out_row: &mut [Element]) {
    for (k, &aik) in a_row.iter().enumerate() {
        let b_row = &b[k * n..(k + 1) * n];
        for (c, &bkj) in out_row.iter_mut().zip(b_row) {
            *c += aik * bkj;
        }
    }
}

/// Dot product of `a_row` with column `j` of `b`, summed in a local.
#[inline]
pub(crate) fn dot_column(a_row: &[Element], b: &[Element], n: usize, j: usize) -> Element {
    a_row
        .iter()
        .zip(b[j..].iter().step_by(n))
        .map(|(&x, &y)| x * y)
        .sum()
}

/// Sets `cell` to the dot product of `a_row` with column `j` of `b`,
/// accumulating in place in the output slot.
#[inline]
pub(crate) fn accumulate_cell(
    cell: &mut Element,
    a_row: &[Element],
    b: &[Element],
    n: usize,
    j: usize,
) {
    *cell = 0;
    for (k, &aik) in a_row.iter().enumerate() {
        *cell += aik * b[k * n + j];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // [1,2;3,4] @ [5,6;7,8] = [19,22;43,50]
    const A: [Element; 4] = [1, 2, 3, 4];
    const B: [Element; 4] = [5, 6, 7, 8];

    #[test]
    fn test_accumulate_row() {
        let mut out = [1, 1];
        accumulate_row(&A[2..4], &B, 2, &mut out);
        assert_eq!(out, [44, 51]);
    }

    #[test]
    fn test_dot_column() {
        assert_eq!(dot_column(&A[0..2], &B, 2, 0), 19);
        assert_eq!(dot_column(&A[0..2], &B, 2, 1), 22);
        assert_eq!(dot_column(&A[2..4], &B, 2, 1), 50);
    }

    #[test]
    fn test_accumulate_cell_overwrites() {
        let mut cell = 99;
        accumulate_cell(&mut cell, &A[2..4], &B, 2, 0);
        assert_eq!(cell, 43);
    }
}
