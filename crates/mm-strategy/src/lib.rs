//! `mm-strategy` - Interchangeable matrix multiplication strategies.
//!
//! This crate provides:
//! - A `MultiplyStrategy` trait shared by every variant
//! - Serial reference, row-ordered and column-ordered loops
//! - Parallel static, dynamic, vectorized and cache-ordered variants
//! - A `WorkerPool` running fork-join partitions with static or dynamic scheduling

pub mod error;
mod kernel;
pub mod parallel;
pub mod pool;
pub mod serial;
pub mod strategy;

// Re-export primary types at the crate root for convenience.
pub use error::{Result, StrategyError};
pub use parallel::{ParallelCacheOrdered, ParallelDynamic, ParallelStatic, ParallelVectorized};
pub use pool::{AbortSignal, Partition, Schedule, WorkerPool};
pub use serial::{ColumnCacheOrdered, RowCacheOrdered, Serial};
pub use strategy::{MultiplyStrategy, StrategyKind};
