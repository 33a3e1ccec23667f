use crate::error::{BenchError, Result};

/// Inclusive, ascending range of partition granularities to sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepRange {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl SweepRange {
    pub fn new(start: usize, end: usize, step: usize) -> Self {
        SweepRange { start, end, step }
    }

    /// Granularities `start, start + step, ...` up to and including `end`.
    pub fn values(&self) -> impl Iterator<Item = usize> {
        (self.start..=self.end).step_by(self.step.max(1))
    }
}

impl Default for SweepRange {
    fn default() -> Self {
        SweepRange::new(20, 500, 20)
    }
}

/// Benchmark run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Side length of every matrix.
    pub dimension: usize,
    /// Seed for input initialization.
    pub seed: u64,
    /// Worker pool size; `None` uses every hardware thread.
    pub threads: Option<usize>,
    /// Partition granularities for the parallel strategies.
    pub sweep: SweepRange,
    /// Also time the column-ordered serial loop (slow at large dimensions).
    pub include_column_major: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            dimension: 2048,
            seed: 1,
            threads: None,
            sweep: SweepRange::default(),
            include_column_major: false,
        }
    }
}

impl BenchConfig {
    /// Reject configurations that would make a run meaningless.
    ///
    /// Checks:
    /// - `dimension` > 0
    /// - `sweep.start` > 0 (granularity 0 is never valid)
    /// - `sweep.step` > 0
    /// - `sweep.start` <= `sweep.end`
    pub fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(BenchError::Config("dimension must be > 0".to_string()));
        }
        if self.sweep.start == 0 {
            return Err(BenchError::Config(
                "sweep must start at a granularity >= 1".to_string(),
            ));
        }
        if self.sweep.step == 0 {
            return Err(BenchError::Config("sweep step must be > 0".to_string()));
        }
        if self.sweep.start > self.sweep.end {
            return Err(BenchError::Config(format!(
                "sweep start {} is past its end {}",
                self.sweep.start, self.sweep.end
            )));
        }
        Ok(())
    }
}
