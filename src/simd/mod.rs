//! SIMD building blocks for the averaging kernels.
//!
//! Unlike a build-time feature switch, every backend here is compiled for its
//! target architecture and selected at run time through [`SimdWidth`]:
//!
//! - [`avx`]: 256-bit `__m256d` vectors, 4 × f64 (x86/x86_64)
//! - [`sse2`]: 128-bit `__m128d` vectors, 2 × f64 (x86/x86_64)
//! - [`neon`]: 128-bit `float64x2_t` vectors, 2 × f64 (aarch64)
//! - [`slice`]: scalar loops and the portable batched fallback (any target)
//!
//! A hardware backend is only entered after [`SimdWidth`] has confirmed that
//! the host CPU supports it.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod sse2;

#[cfg(target_arch = "aarch64")]
pub mod neon;

pub mod slice;

pub mod traits;

pub mod width;

pub use traits::{Alignment, SimdLoad, SimdStore};
pub use width::{Isa, SimdWidth};
