use std::io::Write;

use crate::error::Result;
use crate::timing::TimingSample;

/// Serial timings, measured once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineRow {
    pub samples: Vec<TimingSample>,
}

/// Parallel timings for one partition granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepRow {
    pub granularity: usize,
    pub samples: Vec<TimingSample>,
}

/// Receives measurements as the harness produces them.
pub trait Reporter {
    fn pool_size(&mut self, threads: usize) -> Result<()>;

    fn baseline(&mut self, row: &BaselineRow) -> Result<()>;

    fn sweep_row(&mut self, row: &SweepRow) -> Result<()>;
}

/// Writes one `key:value` line per report, durations in milliseconds.
/// Every line is flushed as soon as it is written.
///
/// ```text
/// max_threads:8
/// serial:5210,cache_row:1630
/// block_size:20,static:790,dynamic:802,simd:512,cache_parallel:230
/// ```
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn join_samples(samples: &[TimingSample]) -> String {
    samples
        .iter()
        .map(|s| format!("{}:{}", s.strategy, s.millis()))
        .collect::<Vec<_>>()
        .join(",")
}

impl<W: Write> Reporter for TextReporter<W> {
    fn pool_size(&mut self, threads: usize) -> Result<()> {
        writeln!(self.out, "max_threads:{}", threads)?;
        self.out.flush()?;
        Ok(())
    }

    fn baseline(&mut self, row: &BaselineRow) -> Result<()> {
        writeln!(self.out, "{}", join_samples(&row.samples))?;
        self.out.flush()?;
        Ok(())
    }

    fn sweep_row(&mut self, row: &SweepRow) -> Result<()> {
        writeln!(
            self.out,
            "block_size:{},{}",
            row.granularity,
            join_samples(&row.samples)
        )?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample(strategy: &str, granularity: Option<usize>, ms: u64) -> TimingSample {
        TimingSample {
            strategy: strategy.to_string(),
            granularity,
            elapsed: Duration::from_millis(ms) + Duration::from_micros(400),
        }
    }

    #[test]
    fn test_text_lines() {
        let mut r = TextReporter::new(Vec::new());
        r.pool_size(8).unwrap();
        r.baseline(&BaselineRow {
            samples: vec![sample("serial", None, 5210), sample("cache_row", None, 1630)],
        })
        .unwrap();
        r.sweep_row(&SweepRow {
            granularity: 20,
            samples: vec![
                sample("static", Some(20), 790),
                sample("dynamic", Some(20), 802),
                sample("simd", Some(20), 512),
                sample("cache_parallel", Some(20), 230),
            ],
        })
        .unwrap();

        let text = String::from_utf8(r.into_inner()).unwrap();
        assert_eq!(
            text,
            "max_threads:8\n\
             serial:5210,cache_row:1630\n\
             block_size:20,static:790,dynamic:802,simd:512,cache_parallel:230\n"
        );
    }

    // Counts flushes and how many bytes had been written at each one.
    #[derive(Default)]
    struct FlushLog {
        buf: Vec<u8>,
        flushed_at: Vec<usize>,
    }

    impl Write for FlushLog {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed_at.push(self.buf.len());
            Ok(())
        }
    }

    #[test]
    fn test_every_line_flushed() {
        let mut r = TextReporter::new(FlushLog::default());
        r.pool_size(4).unwrap();
        r.baseline(&BaselineRow {
            samples: vec![sample("serial", None, 12)],
        })
        .unwrap();
        r.sweep_row(&SweepRow {
            granularity: 2,
            samples: vec![sample("static", Some(2), 3)],
        })
        .unwrap();

        let log = r.into_inner();
        let ends: Vec<usize> = log
            .buf
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == b'\n')
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(log.flushed_at, ends);
    }

    #[test]
    fn test_empty_row() {
        let mut r = TextReporter::new(Vec::new());
        r.baseline(&BaselineRow { samples: vec![] }).unwrap();
        assert_eq!(r.into_inner(), b"\n");
    }
}
