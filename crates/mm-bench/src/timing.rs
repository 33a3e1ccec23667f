use std::time::{Duration, Instant};

use log::debug;
use mm_matrix::MatrixStore;
use mm_strategy::MultiplyStrategy;

use crate::error::Result;

/// Duration of one strategy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingSample {
    pub strategy: String,
    pub granularity: Option<usize>,
    pub elapsed: Duration,
}

impl TimingSample {
    /// Elapsed time in whole milliseconds.
    pub fn millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Run `op` once and return its result with the elapsed wall-clock time.
pub fn time<R>(op: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = op();
    (result, start.elapsed())
}

/// Time one strategy run against the store.
///
/// Output is zeroed before the clock starts and verified against the
/// reference after it stops; only `strategy.run` is timed.
pub fn measure(
    store: &mut MatrixStore,
    strategy: &dyn MultiplyStrategy,
    granularity: Option<usize>,
) -> Result<TimingSample> {
    store.reset_output();

    let (a, b, out) = store.operands();
    let (result, elapsed) = time(|| strategy.run(a, b, out, granularity));
    result?;

    store.verify()?;

    let sample = TimingSample {
        strategy: strategy.name().to_string(),
        granularity,
        elapsed,
    };
    debug!(
        "{} granularity={:?}: {:?}",
        sample.strategy, sample.granularity, sample.elapsed
    );
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use mm_matrix::{Matrix, MatrixError};
    use mm_strategy::{Serial, StrategyError};

    #[derive(Debug)]
    struct OffByOne;

    impl MultiplyStrategy for OffByOne {
        fn name(&self) -> &str {
            "off_by_one"
        }

        fn run(
            &self,
            a: &Matrix,
            b: &Matrix,
            out: &mut Matrix,
            granularity: Option<usize>,
        ) -> mm_strategy::Result<()> {
            Serial.run(a, b, out, granularity)?;
            let v = out.get(1, 2);
            out.set(1, 2, v + 1);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Sleepy(Duration);

    impl MultiplyStrategy for Sleepy {
        fn name(&self) -> &str {
            "sleepy"
        }

        fn run(
            &self,
            a: &Matrix,
            b: &Matrix,
            out: &mut Matrix,
            granularity: Option<usize>,
        ) -> mm_strategy::Result<()> {
            std::thread::sleep(self.0);
            Serial.run(a, b, out, granularity)
        }
    }

    fn store() -> MatrixStore {
        let mut s = MatrixStore::allocate(4).unwrap();
        s.initialize(1);
        s.compute_reference(|a, b, r| Serial.run(a, b, r, None))
            .unwrap();
        s
    }

    #[test]
    fn test_time_returns_result() {
        let (v, elapsed) = time(|| 6 * 7);
        assert_eq!(v, 42);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_measure_records_sample() {
        let mut s = store();
        let sample = measure(&mut s, &Sleepy(Duration::from_millis(20)), Some(3)).unwrap();
        assert_eq!(sample.strategy, "sleepy");
        assert_eq!(sample.granularity, Some(3));
        assert!(sample.elapsed >= Duration::from_millis(20));
        assert!(sample.millis() >= 20);
    }

    #[test]
    fn test_measure_fails_on_mismatch() {
        let mut s = store();
        let err = measure(&mut s, &OffByOne, None).unwrap_err();
        assert!(matches!(
            err,
            BenchError::Matrix(MatrixError::Mismatch { row: 1, col: 2, .. })
        ));
    }

    #[test]
    fn test_measure_propagates_strategy_error() {
        let mut s = store();
        let pool = std::sync::Arc::new(mm_strategy::WorkerPool::new(Some(2)).unwrap());
        let strategy = mm_strategy::ParallelStatic::new(pool);
        let err = measure(&mut s, &strategy, Some(0)).unwrap_err();
        assert!(matches!(
            err,
            BenchError::Strategy(StrategyError::InvalidGranularity(Some(0)))
        ));
    }
}
