//! Scalar, SIMD and parallel element-wise averaging of f64 arrays, and a
//! wall-clock harness comparing them.
//!
//! - [`average`]: scalar and vectorized kernels for two or three inputs
//! - [`simd`]: runtime vector-width probe and per-ISA lane types
//! - [`harness`]: warm-up, serial and parallel timing, report lines
//! - [`samples`]: the two reference specimens used as benchmark input
//! - [`platform`]: host identification for the startup banner

pub mod average;

pub mod config;

pub mod error;

pub mod harness;

pub mod platform;

pub mod report;

pub mod samples;

pub mod simd;

pub use average::{scalar_average2, scalar_average3, simd_average2, simd_average3, SimdAverage};
pub use error::{Result, SimdavgError};
pub use harness::{BenchmarkConfig, ExecutionMode, Harness, KernelKind, Measurement};
pub use report::Report;
pub use simd::{Isa, SimdWidth};
