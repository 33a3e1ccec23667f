//! `mm-bench` - Timing harness for matmul-bench.
//!
//! Times every strategy from `mm-strategy` against a shared `MatrixStore`,
//! verifies each result against the serial reference, and sweeps the
//! partition granularity of the parallel strategies.

pub mod config;
pub mod error;
pub mod harness;
pub mod report;
pub mod timing;

pub use config::{BenchConfig, SweepRange};
pub use error::{BenchError, Result};
pub use harness::Harness;
pub use report::{BaselineRow, Reporter, SweepRow, TextReporter};
pub use timing::{measure, time, TimingSample};
