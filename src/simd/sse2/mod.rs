//! SSE2 implementations for 128-bit f64 vector operations.
//!
//! SSE2 is part of the x86_64 baseline, so this backend is the floor for
//! every 64-bit x86 host. On 32-bit x86 it is still detected at run time.
//!
//! # Available Types
//!
//! - [`f64x2::F64x2`]: 128-bit vector containing 2 packed double-precision values

pub mod f64x2;

pub mod slice;
