//! ARM NEON implementations for 128-bit f64 vector operations.
//!
//! NEON is mandatory on AArch64, but it is still confirmed at run time
//! through [`crate::simd::SimdWidth`] before these kernels are entered.
//!
//! # Available Types
//!
//! - [`f64x2::F64x2`]: 128-bit vector containing 2 packed double-precision values

pub mod f64x2;

pub mod slice;
