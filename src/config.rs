//! Command-line options of the `simdavg` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::harness::{BenchmarkConfig, DEFAULT_ITERATIONS, DEFAULT_WARMUP_ITERATIONS};

/// Times scalar, SIMD and parallel averaging of two reference specimens.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "simdavg", version, about)]
pub struct Options {
    /// Number of calculation iterations to run per measurement.
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS, value_parser = clap::value_parser!(u64).range(1..))]
    pub iterations: u64,

    /// Untimed iterations per kernel before measuring.
    #[arg(short, long, default_value_t = DEFAULT_WARMUP_ITERATIONS)]
    pub warmup: u64,

    /// Worker threads for the parallel runs [default: available parallelism].
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: Option<u64>,

    /// Use the portable backend with this many lanes instead of the probed SIMD width.
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub lanes: Option<u64>,

    /// File the report is written to at the end of the run.
    #[arg(long, default_value = "./simdavg.log")]
    pub log_file: PathBuf,

    /// Increase diagnostic output (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Options {
    pub fn benchmark_config(&self) -> BenchmarkConfig {
        BenchmarkConfig {
            iterations: self.iterations,
            warmup_iterations: self.warmup,
            threads: self.threads.map(|threads| threads as usize),
        }
    }

    /// Default `tracing` filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
