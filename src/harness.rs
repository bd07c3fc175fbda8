//! Wall-clock benchmark harness for the averaging kernels.
//!
//! The harness compares the scalar and vectorized two-input kernels, each run
//! N times serially and N times fanned out over a rayon worker pool:
//!
//! | Order | Kernel     | Mode     |
//! |-------|------------|----------|
//! | 1     | scalar     | serial   |
//! | 2     | vectorized | serial   |
//! | 3     | scalar     | parallel |
//! | 4     | vectorized | parallel |
//!
//! A run is two explicit phases: [`Harness::warm_up`] invokes every
//! combination a few times without timing, then [`Harness::run`] times each
//! combination once and appends one line per measurement to a [`Report`].
//!
//! Every invocation allocates and returns a fresh result vector, which is
//! passed through [`black_box`] and dropped, so allocation cost is identical
//! across variants.

use std::fmt;
use std::hint::black_box;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::average::{scalar_average2, simd_average2};
use crate::error::{ensure_same_len, invalid_argument, Result};
use crate::report::Report;
use crate::simd::SimdWidth;

/// Default number of timed invocations per measurement.
pub const DEFAULT_ITERATIONS: u64 = 10_000_000;

/// Default number of untimed invocations per combination.
pub const DEFAULT_WARMUP_ITERATIONS: u64 = 2;

/// Kernel variant under measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    Scalar,
    Vectorized,
}

impl KernelKind {
    /// Wording used in report lines.
    pub fn instructions(&self) -> &'static str {
        match self {
            KernelKind::Scalar => "scalar instructions",
            KernelKind::Vectorized => "SIMD instructions",
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelKind::Scalar => f.write_str("scalar"),
            KernelKind::Vectorized => f.write_str("vectorized"),
        }
    }
}

/// How the N invocations of a measurement are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// Tight sequential loop on the calling thread.
    Serial,
    /// Independent invocations fanned out over the worker pool, then joined.
    Parallel,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Serial => f.write_str("serial"),
            ExecutionMode::Parallel => f.write_str("parallel"),
        }
    }
}

/// Fixed reporting order of the four measured combinations.
pub const MEASUREMENT_ORDER: [(KernelKind, ExecutionMode); 4] = [
    (KernelKind::Scalar, ExecutionMode::Serial),
    (KernelKind::Vectorized, ExecutionMode::Serial),
    (KernelKind::Scalar, ExecutionMode::Parallel),
    (KernelKind::Vectorized, ExecutionMode::Parallel),
];

/// One wall-clock measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub kernel: KernelKind,
    pub mode: ExecutionMode,
    pub iterations: u64,
    pub elapsed: Duration,
}

impl Measurement {
    /// Human-readable report line, e.g.
    /// `Finished with 100 parallel iterations using SIMD instructions: 3 ms`.
    pub fn report_line(&self) -> String {
        let parallel = match self.mode {
            ExecutionMode::Serial => "",
            ExecutionMode::Parallel => "parallel ",
        };

        format!(
            "Finished with {} {}iterations using {}: {} ms",
            self.iterations,
            parallel,
            self.kernel.instructions(),
            self.elapsed.as_millis()
        )
    }

    /// How many times faster `self` ran than `baseline`.
    ///
    /// `None` when `self` took no measurable time.
    pub fn speedup_over(&self, baseline: &Measurement) -> Option<f64> {
        let elapsed = self.elapsed.as_secs_f64();

        (elapsed > 0.0).then(|| baseline.elapsed.as_secs_f64() / elapsed)
    }
}

/// Benchmark run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Timed invocations per measurement; must be positive.
    pub iterations: u64,
    /// Untimed invocations per combination during warm-up.
    pub warmup_iterations: u64,
    /// Worker pool size; `None` uses the host's available parallelism.
    pub threads: Option<usize>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
            threads: None,
        }
    }
}

/// Drives the kernels over two fixed, equal-length inputs.
pub struct Harness<'a> {
    lhs: &'a [f64],
    rhs: &'a [f64],
    width: SimdWidth,
    config: BenchmarkConfig,
    pool: ThreadPool,
}

impl<'a> Harness<'a> {
    /// Validates the inputs and builds the worker pool.
    ///
    /// # Errors
    ///
    /// - [`crate::SimdavgError::InvalidArgument`] if the inputs differ in
    ///   length, `iterations` is zero, or `threads` is `Some(0)`
    /// - [`crate::SimdavgError::ThreadPool`] if the pool cannot be built
    pub fn new(
        lhs: &'a [f64],
        rhs: &'a [f64],
        width: SimdWidth,
        config: BenchmarkConfig,
    ) -> Result<Self> {
        ensure_same_len(&[lhs, rhs])?;

        if config.iterations == 0 {
            return Err(invalid_argument("iteration count must be positive"));
        }

        let threads = match config.threads {
            Some(0) => return Err(invalid_argument("worker pool needs at least one thread")),
            Some(threads) => threads,
            None => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("simdavg-worker-{idx}"))
            .build()?;

        tracing::debug!(
            len = lhs.len(),
            width = %width,
            threads,
            iterations = config.iterations,
            "benchmark harness ready"
        );

        Ok(Self {
            lhs,
            rhs,
            width,
            config,
            pool,
        })
    }

    pub fn width(&self) -> SimdWidth {
        self.width
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Number of worker threads used by the parallel mode.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs one kernel invocation over the harness inputs.
    pub fn invoke(&self, kernel: KernelKind) -> Result<Vec<f64>> {
        match kernel {
            KernelKind::Scalar => scalar_average2(self.lhs, self.rhs),
            KernelKind::Vectorized => simd_average2(self.lhs, self.rhs, self.width),
        }
    }

    /// Untimed phase: every combination, `warmup_iterations` times.
    ///
    /// Produces no measurements and no report lines.
    pub fn warm_up(&self) -> Result<()> {
        let iterations = self.config.warmup_iterations;

        tracing::debug!(iterations, "warm-up started");

        for (kernel, mode) in MEASUREMENT_ORDER {
            self.execute(kernel, mode, iterations)?;
        }

        tracing::debug!("warm-up finished");

        Ok(())
    }

    /// Times `iterations` invocations of `kernel` in `mode`.
    ///
    /// # Errors
    ///
    /// A kernel error aborts the measurement and is returned as is.
    pub fn measure(&self, kernel: KernelKind, mode: ExecutionMode) -> Result<Measurement> {
        let iterations = self.config.iterations;

        let start = Instant::now();
        self.execute(kernel, mode, iterations)?;
        let elapsed = start.elapsed();

        let measurement = Measurement {
            kernel,
            mode,
            iterations,
            elapsed,
        };

        tracing::info!(
            %kernel,
            %mode,
            iterations,
            elapsed_ms = elapsed.as_millis() as u64,
            "measurement recorded"
        );

        Ok(measurement)
    }

    /// Measures all four combinations in [`MEASUREMENT_ORDER`] and appends one
    /// line per measurement to `report`.
    pub fn run(&self, report: &mut Report) -> Result<Vec<Measurement>> {
        let mut measurements = Vec::with_capacity(MEASUREMENT_ORDER.len());

        for (kernel, mode) in MEASUREMENT_ORDER {
            let measurement = self.measure(kernel, mode)?;
            report.push_line(measurement.report_line());
            measurements.push(measurement);
        }

        Ok(measurements)
    }

    fn execute(&self, kernel: KernelKind, mode: ExecutionMode, iterations: u64) -> Result<()> {
        match mode {
            ExecutionMode::Serial => {
                for _ in 0..iterations {
                    black_box(self.invoke(kernel)?);
                }

                Ok(())
            }
            // `try_for_each` returns only once every task has finished: that is
            // the join barrier the parallel timing stops at.
            ExecutionMode::Parallel => self.pool.install(|| {
                (0..iterations)
                    .into_par_iter()
                    .try_for_each(|_| self.invoke(kernel).map(|result| drop(black_box(result))))
            }),
        }
    }
}

/// Throughput deltas derived from a full [`Harness::run`].
///
/// Lines whose measurements are missing or took no measurable time are skipped.
pub fn summarize(measurements: &[Measurement]) -> Vec<String> {
    let find = |kernel: KernelKind, mode: ExecutionMode| {
        measurements
            .iter()
            .find(|m| m.kernel == kernel && m.mode == mode)
    };

    let comparisons = [
        (
            "SIMD speedup over scalar (serial)",
            find(KernelKind::Vectorized, ExecutionMode::Serial),
            find(KernelKind::Scalar, ExecutionMode::Serial),
        ),
        (
            "SIMD speedup over scalar (parallel)",
            find(KernelKind::Vectorized, ExecutionMode::Parallel),
            find(KernelKind::Scalar, ExecutionMode::Parallel),
        ),
        (
            "Parallel speedup over serial (scalar)",
            find(KernelKind::Scalar, ExecutionMode::Parallel),
            find(KernelKind::Scalar, ExecutionMode::Serial),
        ),
        (
            "Parallel speedup over serial (SIMD)",
            find(KernelKind::Vectorized, ExecutionMode::Parallel),
            find(KernelKind::Vectorized, ExecutionMode::Serial),
        ),
    ];

    comparisons
        .into_iter()
        .filter_map(|(label, candidate, baseline)| {
            let speedup = candidate?.speedup_over(baseline?)?;
            Some(format!("{label}: {speedup:.2}x"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimdavgError;

    fn measurement(kernel: KernelKind, mode: ExecutionMode, millis: u64) -> Measurement {
        Measurement {
            kernel,
            mode,
            iterations: 1_000,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn test_report_line_wording() {
        assert_eq!(
            measurement(KernelKind::Scalar, ExecutionMode::Serial, 12).report_line(),
            "Finished with 1000 iterations using scalar instructions: 12 ms"
        );
        assert_eq!(
            measurement(KernelKind::Vectorized, ExecutionMode::Parallel, 3).report_line(),
            "Finished with 1000 parallel iterations using SIMD instructions: 3 ms"
        );
    }

    #[test]
    fn test_speedup_over() {
        let scalar = measurement(KernelKind::Scalar, ExecutionMode::Serial, 40);
        let simd = measurement(KernelKind::Vectorized, ExecutionMode::Serial, 10);
        let instant = measurement(KernelKind::Vectorized, ExecutionMode::Serial, 0);

        assert_eq!(simd.speedup_over(&scalar), Some(4.0));
        assert_eq!(instant.speedup_over(&scalar), None);
    }

    #[test]
    fn test_summarize() {
        let measurements = [
            measurement(KernelKind::Scalar, ExecutionMode::Serial, 40),
            measurement(KernelKind::Vectorized, ExecutionMode::Serial, 20),
            measurement(KernelKind::Scalar, ExecutionMode::Parallel, 10),
            measurement(KernelKind::Vectorized, ExecutionMode::Parallel, 0),
        ];

        let lines = summarize(&measurements);

        assert_eq!(
            lines,
            vec![
                "SIMD speedup over scalar (serial): 2.00x".to_string(),
                "Parallel speedup over serial (scalar): 4.00x".to_string(),
            ]
        );
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let width = SimdWidth::probe();
        let a = [1.0; 4];
        let b = [2.0; 3];

        let zero_iterations = BenchmarkConfig {
            iterations: 0,
            ..BenchmarkConfig::default()
        };
        let zero_threads = BenchmarkConfig {
            threads: Some(0),
            ..BenchmarkConfig::default()
        };

        assert!(matches!(
            Harness::new(&a, &b, width, BenchmarkConfig::default()),
            Err(SimdavgError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Harness::new(&a, &a, width, zero_iterations),
            Err(SimdavgError::InvalidArgument { .. })
        ));
        assert!(matches!(
            Harness::new(&a, &a, width, zero_threads),
            Err(SimdavgError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_threads_follow_config() {
        let a = [1.0; 8];
        let config = BenchmarkConfig {
            iterations: 1,
            warmup_iterations: 0,
            threads: Some(2),
        };

        let harness = Harness::new(&a, &a, SimdWidth::probe(), config).unwrap();
        assert_eq!(harness.threads(), 2);
    }

    #[test]
    fn test_invoke_matches_kernels() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [5.0, 4.0, 3.0, 2.0, 1.0];
        let config = BenchmarkConfig {
            iterations: 1,
            warmup_iterations: 1,
            threads: Some(1),
        };

        let harness = Harness::new(&a, &b, SimdWidth::probe(), config).unwrap();

        assert_eq!(harness.invoke(KernelKind::Scalar).unwrap(), vec![3.0; 5]);
        assert_eq!(harness.invoke(KernelKind::Vectorized).unwrap(), vec![3.0; 5]);
    }
}
