use std::sync::Arc;
use std::time::Duration;

use log::info;
use mm_matrix::MatrixStore;
use mm_strategy::{AbortSignal, MultiplyStrategy, StrategyKind, WorkerPool};

use crate::config::BenchConfig;
use crate::error::Result;
use crate::report::{BaselineRow, Reporter, SweepRow};
use crate::timing::{measure, time, TimingSample};

/// Drives a full benchmark: serial baseline, then the granularity sweep.
///
/// The store and the worker pool are created once and reused by every
/// measurement. Strategies within a sweep step run back-to-back, so caches
/// warmed by one strategy are not flushed before the next.
pub struct Harness {
    config: BenchConfig,
    store: MatrixStore,
    pool: Arc<WorkerPool>,
    reference: Box<dyn MultiplyStrategy>,
    baseline: Vec<Box<dyn MultiplyStrategy>>,
    parallel: Vec<Box<dyn MultiplyStrategy>>,
}

impl Harness {
    /// Validate `config`, allocate the matrices, start the pool and
    /// initialize the inputs.
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;

        let mut store = MatrixStore::allocate(config.dimension)?;
        let pool = Arc::new(WorkerPool::new(config.threads)?);
        store.initialize(config.seed);

        let mut baseline = vec![StrategyKind::RowCacheOrdered.instantiate(&pool)];
        if config.include_column_major {
            baseline.push(StrategyKind::ColumnCacheOrdered.instantiate(&pool));
        }
        let parallel = StrategyKind::PARALLEL
            .iter()
            .map(|kind| kind.instantiate(&pool))
            .collect();

        info!(
            "harness ready: dim={}, threads={}, seed={}",
            config.dimension,
            pool.threads(),
            config.seed
        );

        Ok(Harness {
            reference: StrategyKind::Serial.instantiate(&pool),
            config,
            store,
            pool,
            baseline,
            parallel,
        })
    }

    /// Number of worker threads shared by the parallel strategies.
    pub fn pool_size(&self) -> usize {
        self.pool.threads()
    }

    /// Handle for aborting in-flight and future parallel runs.
    pub fn abort_signal(&self) -> AbortSignal {
        self.pool.abort_signal()
    }

    pub fn store(&self) -> &MatrixStore {
        &self.store
    }

    /// Compute the reference (timed as the serial sample), then time each
    /// non-parameterized strategy once.
    pub fn run_baseline(&mut self) -> Result<BaselineRow> {
        let reference = self.reference.as_ref();
        let mut elapsed = Duration::ZERO;
        self.store.compute_reference(|a, b, r| {
            let (result, t) = time(|| reference.run(a, b, r, None));
            elapsed = t;
            result
        })?;
        info!("reference computed in {:?}", elapsed);

        let mut samples = vec![TimingSample {
            strategy: reference.name().to_string(),
            granularity: None,
            elapsed,
        }];
        for strategy in &self.baseline {
            samples.push(measure(&mut self.store, strategy.as_ref(), None)?);
        }
        Ok(BaselineRow { samples })
    }

    /// Time every parallel strategy once at `granularity`.
    pub fn run_step(&mut self, granularity: usize) -> Result<SweepRow> {
        let mut samples = Vec::with_capacity(self.parallel.len());
        for strategy in &self.parallel {
            samples.push(measure(
                &mut self.store,
                strategy.as_ref(),
                Some(granularity),
            )?);
        }
        Ok(SweepRow {
            granularity,
            samples,
        })
    }

    /// Run the whole benchmark, handing each row to `reporter` as soon as it
    /// is measured. Stops at the first error.
    pub fn run(&mut self, reporter: &mut dyn Reporter) -> Result<()> {
        reporter.pool_size(self.pool_size())?;

        let baseline = self.run_baseline()?;
        reporter.baseline(&baseline)?;

        let sweep = self.config.sweep;
        for granularity in sweep.values() {
            let row = self.run_step(granularity)?;
            info!("sweep step granularity={} done", granularity);
            reporter.sweep_row(&row)?;
        }
        Ok(())
    }
}
