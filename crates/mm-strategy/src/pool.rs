use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, trace};
use mm_matrix::Element;

use crate::error::{Result, StrategyError};

/// How partitions are handed to workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Partitions are dealt round-robin to worker slots before execution.
    Static,
    /// Workers pull the next partition from a shared queue when they finish one.
    Dynamic,
}

/// One scheduling decision: a contiguous run of `granularity` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Position of the partition in the iteration space.
    pub index: usize,
    /// Flat index of the first unit (cell or row) covered.
    pub first_unit: usize,
    /// Worker slot that ran the partition.
    pub worker: usize,
}

/// Coarse cancellation flag shared between the pool and its callers.
///
/// Once raised, workers stop taking new partitions and every `fork_join`
/// returns `StrategyError::Aborted` until the flag is cleared.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fixed-size pool of worker threads shared by all parallel strategies.
///
/// Every `fork_join` blocks the caller until all partitions have completed.
#[derive(Debug)]
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    abort: AbortSignal,
    // (worker, first element, length) of every partition handed out.
    #[cfg(test)]
    written: Mutex<Vec<(usize, usize, usize)>>,
}

impl WorkerPool {
    /// Build a pool of `threads` workers, or one per hardware thread when
    /// `threads` is `None` or zero.
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let threads = threads
            .filter(|&n| n > 0)
            .unwrap_or_else(default_threads);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("mm-worker-{}", i))
            .build()?;
        debug!("worker pool ready, threads={}", pool.current_num_threads());
        Ok(WorkerPool {
            pool,
            abort: AbortSignal::default(),
            #[cfg(test)]
            written: Mutex::new(Vec::new()),
        })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Returns a handle to this pool's abort flag.
    pub fn abort_signal(&self) -> AbortSignal {
        self.abort.clone()
    }

    /// Run `work` over `cells` split into partitions of `granularity` units of
    /// `unit_len` elements each, then join.
    ///
    /// Partitions are disjoint sub-slices of `cells`, so no two workers ever
    /// write the same element. The last partition may be shorter.
    ///
    /// # Errors
    /// `InvalidGranularity` for a missing or zero granularity (nothing is
    /// scheduled and `cells` is untouched), `Aborted` if the abort flag is
    /// raised before or during the run.
    pub fn fork_join<F>(
        &self,
        schedule: Schedule,
        cells: &mut [Element],
        unit_len: usize,
        granularity: Option<usize>,
        work: F,
    ) -> Result<()>
    where
        F: Fn(Partition, &mut [Element]) + Sync,
    {
        let (units_per_chunk, chunk_len) = granularity
            .filter(|&g| g > 0)
            .and_then(|g| g.checked_mul(unit_len).map(|len| (g, len)))
            .filter(|&(_, len)| len > 0)
            .ok_or(StrategyError::InvalidGranularity(granularity))?;
        if self.abort.is_raised() {
            return Err(StrategyError::Aborted);
        }

        let partitions = cells.len().div_ceil(chunk_len);
        let workers = self.threads().min(partitions);
        trace!(
            "fork {:?}: {} partitions of {} elements over {} workers",
            schedule,
            partitions,
            chunk_len,
            workers
        );

        match schedule {
            Schedule::Static => self.run_static(cells, chunk_len, units_per_chunk, workers, &work),
            Schedule::Dynamic => self.run_dynamic(cells, chunk_len, units_per_chunk, workers, &work),
        }

        if self.abort.is_raised() {
            return Err(StrategyError::Aborted);
        }
        Ok(())
    }

    fn run_static<F>(
        &self,
        cells: &mut [Element],
        chunk_len: usize,
        units_per_chunk: usize,
        workers: usize,
        work: &F,
    ) where
        F: Fn(Partition, &mut [Element]) + Sync,
    {
        let mut assigned: Vec<Vec<(usize, &mut [Element])>> =
            (0..workers).map(|_| Vec::new()).collect();
        for (index, chunk) in cells.chunks_mut(chunk_len).enumerate() {
            assigned[index % workers].push((index, chunk));
        }

        let abort = &self.abort;
        self.pool.scope(|scope| {
            for (worker, chunks) in assigned.into_iter().enumerate() {
                scope.spawn(move |_| {
                    for (index, chunk) in chunks {
                        if abort.is_raised() {
                            return;
                        }
                        let partition = Partition {
                            index,
                            first_unit: index * units_per_chunk,
                            worker,
                        };
                        #[cfg(test)]
                        self.note_written(worker, index * chunk_len, chunk.len());
                        work(partition, chunk);
                    }
                });
            }
        });
    }

    fn run_dynamic<F>(
        &self,
        cells: &mut [Element],
        chunk_len: usize,
        units_per_chunk: usize,
        workers: usize,
        work: &F,
    ) where
        F: Fn(Partition, &mut [Element]) + Sync,
    {
        let queue = Mutex::new(cells.chunks_mut(chunk_len).enumerate());

        let abort = &self.abort;
        let queue = &queue;
        self.pool.scope(|scope| {
            for worker in 0..workers {
                scope.spawn(move |_| loop {
                    if abort.is_raised() {
                        return;
                    }
                    let next = match queue.lock() {
                        Ok(mut pending) => pending.next(),
                        Err(_) => None,
                    };
                    let Some((index, chunk)) = next else {
                        return;
                    };
                    let partition = Partition {
                        index,
                        first_unit: index * units_per_chunk,
                        worker,
                    };
                    #[cfg(test)]
                    self.note_written(worker, index * chunk_len, chunk.len());
                    work(partition, chunk);
                });
            }
        });
    }

    #[cfg(test)]
    fn note_written(&self, worker: usize, start: usize, len: usize) {
        self.written.lock().unwrap().push((worker, start, len));
    }

    /// Drains the record of partitions handed out since the last call.
    #[cfg(test)]
    pub(crate) fn take_written(&self) -> Vec<(usize, usize, usize)> {
        std::mem::take(&mut *self.written.lock().unwrap())
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
