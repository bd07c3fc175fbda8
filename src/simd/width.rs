//! Runtime SIMD capability probe.
//!
//! The same binary may run on CPUs with different vector units, so the f64
//! vector width is queried at run time, once, and then handed explicitly to
//! the vectorized kernels as a [`SimdWidth`] value.
//!
//! ```rust
//! use simdavg::simd::SimdWidth;
//!
//! let width = SimdWidth::probe();
//! assert!(width.lanes() >= 1);
//! assert_eq!(width.bits(), width.lanes() * 64);
//! ```

use std::fmt;

use crate::error::{invalid_argument, Result};

/// Number of bits in one f64 lane.
pub const LANE_BITS: usize = std::mem::size_of::<f64>() * 8;

/// Instruction-set backend used by the vectorized kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Isa {
    /// 256-bit AVX, 4 × f64.
    Avx,
    /// 128-bit SSE2, 2 × f64.
    Sse2,
    /// 128-bit ARM NEON, 2 × f64.
    Neon,
    /// Plain Rust blocks of any lane count; no SIMD instructions required.
    Portable,
}

impl Isa {
    /// Hardware backends ordered from widest to narrowest.
    pub const HARDWARE: [Isa; 3] = [Isa::Avx, Isa::Sse2, Isa::Neon];

    pub fn name(&self) -> &'static str {
        match self {
            Isa::Avx => "AVX",
            Isa::Sse2 => "SSE2",
            Isa::Neon => "NEON",
            Isa::Portable => "portable",
        }
    }

    /// Native f64 lane count of the backend.
    pub fn native_lanes(&self) -> usize {
        match self {
            Isa::Avx => 4,
            Isa::Sse2 | Isa::Neon => 2,
            Isa::Portable => 1,
        }
    }

    /// Whether the host CPU can execute this backend.
    pub fn is_supported(&self) -> bool {
        detect(*self)
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect(isa: Isa) -> bool {
    match isa {
        Isa::Avx => std::is_x86_feature_detected!("avx"),
        Isa::Sse2 => std::is_x86_feature_detected!("sse2"),
        Isa::Neon => false,
        Isa::Portable => true,
    }
}

#[cfg(target_arch = "aarch64")]
fn detect(isa: Isa) -> bool {
    match isa {
        Isa::Neon => std::arch::is_aarch64_feature_detected!("neon"),
        Isa::Portable => true,
        Isa::Avx | Isa::Sse2 => false,
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
fn detect(isa: Isa) -> bool {
    matches!(isa, Isa::Portable)
}

/// The f64 vector width the vectorized kernels operate with.
///
/// A value whose backend is a hardware ISA can only be obtained from
/// [`SimdWidth::probe`] or [`SimdWidth::for_isa`], both of which check CPU
/// support first. The kernels rely on that to enter the intrinsics safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimdWidth {
    isa: Isa,
    lanes: usize,
}

impl SimdWidth {
    /// Detects the widest backend supported by the host CPU.
    ///
    /// Falls back to a single-lane portable width when no SIMD unit is found.
    /// AVX-512 is not probed: its intrinsics need a nightly toolchain.
    pub fn probe() -> Self {
        let width = Isa::HARDWARE
            .iter()
            .find_map(|&isa| Self::for_isa(isa))
            .unwrap_or(Self {
                isa: Isa::Portable,
                lanes: Isa::Portable.native_lanes(),
            });

        tracing::debug!(isa = %width.isa, lanes = width.lanes, "probed SIMD width");

        width
    }

    /// Returns the native width of `isa`, or `None` if the host can't run it.
    pub fn for_isa(isa: Isa) -> Option<Self> {
        isa.is_supported().then(|| Self {
            isa,
            lanes: isa.native_lanes(),
        })
    }

    /// A portable width processing `lanes` elements per block.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SimdavgError::InvalidArgument`] if `lanes` is zero.
    pub fn portable(lanes: usize) -> Result<Self> {
        if lanes == 0 {
            return Err(invalid_argument("vector width must be at least one lane"));
        }

        Ok(Self {
            isa: Isa::Portable,
            lanes,
        })
    }

    pub fn isa(&self) -> Isa {
        self.isa
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Register width in bits.
    pub fn bits(&self) -> usize {
        self.lanes * LANE_BITS
    }

    pub fn is_hardware_accelerated(&self) -> bool {
        self.isa != Isa::Portable
    }

    /// Number of leading elements of a `len`-element input covered by full vector blocks.
    pub fn body_len(&self, len: usize) -> usize {
        len - len % self.lanes
    }
}

impl fmt::Display for SimdWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} bits = {} x f64)",
            self.isa,
            self.bits(),
            self.lanes
        )
    }
}
