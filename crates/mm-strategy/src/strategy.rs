use std::fmt::{self, Debug};
use std::sync::Arc;

use mm_matrix::Matrix;

use crate::error::Result;
use crate::parallel::{ParallelCacheOrdered, ParallelDynamic, ParallelStatic, ParallelVectorized};
use crate::pool::WorkerPool;
use crate::serial::{ColumnCacheOrdered, RowCacheOrdered, Serial};

/// A way of computing `out = a @ b` for square matrices.
///
/// Every implementation produces the same result; they differ only in loop
/// order and in how the iteration space is distributed over workers.
pub trait MultiplyStrategy: Send + Sync + Debug {
    /// Returns the label used in reports (e.g., "static", "cache_row").
    fn name(&self) -> &str;

    /// True if the strategy adds into `out` and therefore needs it zeroed first.
    fn accumulates(&self) -> bool {
        false
    }

    /// True if the strategy runs on the worker pool and needs a granularity.
    fn is_parallel(&self) -> bool {
        false
    }

    /// Compute `out[i][j] = sum_k a[i][k] * b[k][j]` for every cell.
    ///
    /// `granularity` is the number of units handed to a worker per scheduling
    /// decision; serial strategies ignore it.
    fn run(&self, a: &Matrix, b: &Matrix, out: &mut Matrix, granularity: Option<usize>)
        -> Result<()>;
}

/// The strategy variants known to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Serial,
    RowCacheOrdered,
    ColumnCacheOrdered,
    ParallelStatic,
    ParallelDynamic,
    ParallelVectorized,
    ParallelCacheOrdered,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 7] = [
        StrategyKind::Serial,
        StrategyKind::RowCacheOrdered,
        StrategyKind::ColumnCacheOrdered,
        StrategyKind::ParallelStatic,
        StrategyKind::ParallelDynamic,
        StrategyKind::ParallelVectorized,
        StrategyKind::ParallelCacheOrdered,
    ];

    /// Parallel variants in report order.
    pub const PARALLEL: [StrategyKind; 4] = [
        StrategyKind::ParallelStatic,
        StrategyKind::ParallelDynamic,
        StrategyKind::ParallelVectorized,
        StrategyKind::ParallelCacheOrdered,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Serial => "serial",
            StrategyKind::RowCacheOrdered => "cache_row",
            StrategyKind::ColumnCacheOrdered => "cache_col",
            StrategyKind::ParallelStatic => "static",
            StrategyKind::ParallelDynamic => "dynamic",
            StrategyKind::ParallelVectorized => "simd",
            StrategyKind::ParallelCacheOrdered => "cache_parallel",
        }
    }

    /// Build the strategy; parallel variants share `pool`.
    pub fn instantiate(&self, pool: &Arc<WorkerPool>) -> Box<dyn MultiplyStrategy> {
        match self {
            StrategyKind::Serial => Box::new(Serial),
            StrategyKind::RowCacheOrdered => Box::new(RowCacheOrdered),
            StrategyKind::ColumnCacheOrdered => Box::new(ColumnCacheOrdered),
            StrategyKind::ParallelStatic => Box::new(ParallelStatic::new(Arc::clone(pool))),
            StrategyKind::ParallelDynamic => Box::new(ParallelDynamic::new(Arc::clone(pool))),
            StrategyKind::ParallelVectorized => {
                Box::new(ParallelVectorized::new(Arc::clone(pool)))
            }
            StrategyKind::ParallelCacheOrdered => {
                Box::new(ParallelCacheOrdered::new(Arc::clone(pool)))
            }
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checks that both inputs and the output share one dimension and returns it.
pub(crate) fn check_operands(a: &Matrix, b: &Matrix, out: &Matrix) -> Result<usize> {
    a.ensure_same_dim(b)?;
    a.ensure_same_dim(out)?;
    Ok(a.dim())
}
