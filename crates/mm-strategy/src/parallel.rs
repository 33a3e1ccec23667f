use std::sync::Arc;

use mm_matrix::Matrix;

use crate::error::Result;
use crate::kernel::{accumulate_cell, accumulate_row, dot_column};
use crate::pool::{Partition, Schedule, WorkerPool};
use crate::strategy::{check_operands, MultiplyStrategy};

/// Collapsed (row, column) iteration space: each unit is one output cell.
///
/// The cell is zeroed, then the dot product is accumulated in place.
fn cells_in_place(
    pool: &WorkerPool,
    schedule: Schedule,
    a: &Matrix,
    b: &Matrix,
    out: &mut Matrix,
    granularity: Option<usize>,
) -> Result<()> {
    let n = check_operands(a, b, out)?;
    let b = b.as_slice();
    pool.fork_join(schedule, out.as_mut_slice(), 1, granularity, |part: Partition, cells| {
        for (offset, cell) in cells.iter_mut().enumerate() {
            let flat = part.first_unit + offset;
            accumulate_cell(cell, a.row(flat / n), b, n, flat % n);
        }
    })
}

/// Parallel over output cells with static partitions.
#[derive(Debug, Clone)]
pub struct ParallelStatic {
    pool: Arc<WorkerPool>,
}

impl ParallelStatic {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self { pool }
    }
}

impl MultiplyStrategy for ParallelStatic {
    fn name(&self) -> &str {
        "static"
    }

    fn is_parallel(&self) -> bool {
        true
    }

    fn run(&self, a: &Matrix, b: &Matrix, out: &mut Matrix, granularity: Option<usize>) -> Result<()> {
        cells_in_place(&self.pool, Schedule::Static, a, b, out, granularity)
    }
}

/// Parallel over output cells with a shared work queue.
#[derive(Debug, Clone)]
pub struct ParallelDynamic {
    pool: Arc<WorkerPool>,
}

impl ParallelDynamic {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self { pool }
    }
}

impl MultiplyStrategy for ParallelDynamic {
    fn name(&self) -> &str {
        "dynamic"
    }

    fn is_parallel(&self) -> bool {
        true
    }

    fn run(&self, a: &Matrix, b: &Matrix, out: &mut Matrix, granularity: Option<usize>) -> Result<()> {
        cells_in_place(&self.pool, Schedule::Dynamic, a, b, out, granularity)
    }
}

/// Static partitions over output cells; the dot product is reduced in a
/// local and stored once, which lets the inner loop vectorize.
#[derive(Debug, Clone)]
pub struct ParallelVectorized {
    pool: Arc<WorkerPool>,
}

impl ParallelVectorized {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self { pool }
    }
}

impl MultiplyStrategy for ParallelVectorized {
    fn name(&self) -> &str {
        "simd"
    }

    fn is_parallel(&self) -> bool {
        true
    }

    fn run(&self, a: &Matrix, b: &Matrix, out: &mut Matrix, granularity: Option<usize>) -> Result<()> {
        let n = check_operands(a, b, out)?;
        let b = b.as_slice();
        self.pool
            .fork_join(Schedule::Static, out.as_mut_slice(), 1, granularity, |part, cells| {
                for (offset, cell) in cells.iter_mut().enumerate() {
                    let flat = part.first_unit + offset;
                    *cell = dot_column(a.row(flat / n), b, n, flat % n);
                }
            })
    }
}

/// Rows handed out through the shared queue, each computed in
/// (row, inner, column) order.
///
/// Accumulates into `out`, which must be zeroed beforehand.
#[derive(Debug, Clone)]
pub struct ParallelCacheOrdered {
    pool: Arc<WorkerPool>,
}

impl ParallelCacheOrdered {
    pub fn new(pool: Arc<WorkerPool>) -> Self {
        Self { pool }
    }
}

impl MultiplyStrategy for ParallelCacheOrdered {
    fn name(&self) -> &str {
        "cache_parallel"
    }

    fn accumulates(&self) -> bool {
        true
    }

    fn is_parallel(&self) -> bool {
        true
    }

    fn run(&self, a: &Matrix, b: &Matrix, out: &mut Matrix, granularity: Option<usize>) -> Result<()> {
        let n = check_operands(a, b, out)?;
        let b = b.as_slice();
        self.pool
            .fork_join(Schedule::Dynamic, out.as_mut_slice(), n, granularity, |part, rows| {
                for (offset, out_row) in rows.chunks_mut(n).enumerate() {
                    accumulate_row(a.row(part.first_unit + offset), b, n, out_row);
                }
            })
    }
}
