use std::io;
use std::process;

use log::error;
use mm_bench::{BenchConfig, Harness, TextReporter};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    if let Err(e) = run() {
        error!("benchmark failed: {}", e);
        eprintln!("matmul-bench: {}", e);
        process::exit(1);
    }
}

fn run() -> mm_bench::Result<()> {
    let mut harness = Harness::new(BenchConfig::default())?;
    let mut reporter = TextReporter::new(io::stdout().lock());
    harness.run(&mut reporter)
}
