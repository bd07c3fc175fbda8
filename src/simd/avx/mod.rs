//! AVX implementations for 256-bit f64 vector operations.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Sandy Bridge (2011+) or AMD Bulldozer (2011+)
//! - **Target Architecture**: x86 or x86_64
//! - **Runtime Detection**: entered only when [`crate::simd::SimdWidth`]
//!   reports [`crate::simd::Isa::Avx`]; the kernels enable the feature with
//!   `#[target_feature(enable = "avx")]`, so no global compiler flag is needed.
//!
//! # Available Types
//!
//! - [`f64x4::F64x4`]: 256-bit vector containing 4 packed double-precision values

pub mod f64x4;

pub mod slice;
