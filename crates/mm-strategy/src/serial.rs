use mm_matrix::Matrix;

use crate::error::Result;
use crate::kernel::accumulate_row;
use crate::strategy::{check_operands, MultiplyStrategy};

/// Reference triple loop in (row, column, inner) order.
///
/// Each cell is overwritten with its full dot product, so `out` need not be
/// zeroed. The harness uses it to fill the reference output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Serial;

impl MultiplyStrategy for Serial {
    fn name(&self) -> &str {
        "serial"
    }

    fn run(&self, a: &Matrix, b: &Matrix, out: &mut Matrix, _granularity: Option<usize>) -> Result<()> {
        let n = check_operands(a, b, out)?;
        let b = b.as_slice();
        for (i, out_row) in out.as_mut_slice().chunks_mut(n).enumerate() {
            let a_row = a.row(i);
            for (j, c) in out_row.iter_mut().enumerate() {
                let mut sum = 0;
                for k in 0..n {
                    sum += a_row[k] * b[k * n + j];
                }
                *c = sum;
            }
        }
        Ok(())
    }
}

/// Serial (row, inner, column) order: streams rows of `b` and `out`.
///
/// Accumulates into `out`, which must be zeroed beforehand.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCacheOrdered;

impl MultiplyStrategy for RowCacheOrdered {
    fn name(&self) -> &str {
        "cache_row"
    }

    fn accumulates(&self) -> bool {
        true
    }

    fn run(&self, a: &Matrix, b: &Matrix, out: &mut Matrix, _granularity: Option<usize>) -> Result<()> {
        let n = check_operands(a, b, out)?;
        let b = b.as_slice();
        for (i, out_row) in out.as_mut_slice().chunks_mut(n).enumerate() {
            accumulate_row(a.row(i), b, n, out_row);
        }
        Ok(())
    }
}

/// Serial (column, inner, row) order: strides down columns of `a` and `out`.
///
/// Accumulates into `out`, which must be zeroed beforehand.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnCacheOrdered;

impl MultiplyStrategy for ColumnCacheOrdered {
    fn name(&self) -> &str {
        "cache_col"
    }

    fn accumulates(&self) -> bool {
        true
    }

    fn run(&self, a: &Matrix, b: &Matrix, out: &mut Matrix, _granularity: Option<usize>) -> Result<()> {
        let n = check_operands(a, b, out)?;
        let (a, b) = (a.as_slice(), b.as_slice());
        let out = out.as_mut_slice();
        for j in 0..n {
            for k in 0..n {
                let bkj = b[k * n + j];
                for i in 0..n {
                    out[i * n + j] += a[i * n + k] * bkj;
                }
            }
        }
        Ok(())
    }
}
