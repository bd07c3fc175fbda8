use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use simdavg::config::Options;
use simdavg::harness::{self, Harness};
use simdavg::platform::{self, PlatformInfo};
use simdavg::samples::{SPECIMEN_P, SPECIMEN_Q};
use simdavg::{Report, SimdWidth};

fn init_tracing(options: &Options) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints `line` and appends it to the report.
fn emit(report: &mut Report, line: String) {
    println!("{line}");
    report.push_line(line);
}

fn main() -> Result<()> {
    let options = Options::parse();
    init_tracing(&options);

    println!("simdavg {}", env!("CARGO_PKG_VERSION"));

    // Probed once; every vectorized call below receives this value.
    let width = match options.lanes {
        Some(lanes) => SimdWidth::portable(lanes as usize)?,
        None => SimdWidth::probe(),
    };

    let platform = PlatformInfo::detect();
    let mut report = Report::new();

    report.push_line(format!(
        "Starting execution at {} on {} running {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        platform.host_name,
        platform.os
    ));
    emit(&mut report, platform.cpu_line());
    emit(&mut report, platform::simd_presence_line(&width));
    emit(&mut report, platform::simd_length_line(&width));

    let lhs = SPECIMEN_P.values();
    let rhs = SPECIMEN_Q.values();

    let harness = Harness::new(lhs, rhs, width, options.benchmark_config())
        .context("failed to set up the benchmark")?;

    tracing::info!(
        specimens = %format!("{} + {}", SPECIMEN_P.name, SPECIMEN_Q.name),
        len = lhs.len(),
        width = %harness.width(),
        iterations = harness.config().iterations,
        warmup = harness.config().warmup_iterations,
        threads = harness.threads(),
        "starting benchmark"
    );

    harness.warm_up().context("warm-up failed")?;

    let mut results = Report::new();
    let measurements = harness.run(&mut results).context("benchmark failed")?;

    for line in results.lines() {
        emit(&mut report, line.clone());
    }
    for line in harness::summarize(&measurements) {
        emit(&mut report, line);
    }

    let file = File::create(&options.log_file)
        .with_context(|| format!("failed to create {}", options.log_file.display()))?;
    report
        .write_to(BufWriter::new(file))
        .with_context(|| format!("failed to write {}", options.log_file.display()))?;

    tracing::info!(path = %options.log_file.display(), lines = report.len(), "report written");

    Ok(())
}
