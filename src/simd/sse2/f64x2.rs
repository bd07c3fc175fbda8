//! SSE2 2-lane f64 SIMD vector implementation.
//!
//! `F64x2` wraps the `__m128d` register type and provides just what the
//! averaging kernels need: full-width loads and stores, broadcast, and
//! element-wise addition and division.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div};

use crate::simd::{Alignment, SimdLoad, SimdStore};

/// SSE2 memory alignment requirement in bytes.
pub(crate) const SSE_ALIGNMENT: usize = 16;

/// Number of f64 elements that fit in an SSE2 128-bit vector.
pub(crate) const LANE_COUNT: usize = 2;

/// SSE2 SIMD vector containing 2 packed f64 values.
#[derive(Copy, Clone, Debug)]
pub struct F64x2 {
    /// SSE2 128-bit vector register containing 2 packed f64 values
    pub(crate) elements: __m128d,
}

impl Alignment<f64> for F64x2 {
    #[inline(always)]
    fn is_aligned(ptr: *const f64) -> bool {
        (ptr as usize) % SSE_ALIGNMENT == 0
    }
}

impl SimdLoad<f64> for F64x2 {
    type Output = Self;

    /// Loads exactly 2 elements from memory.
    ///
    /// Chooses between aligned and unaligned load based on pointer alignment.
    ///
    /// # Safety
    ///
    /// Pointer must not be null and must point to at least 2 valid f64 values.
    /// The CPU must support SSE2.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if size != 2 or if pointer is null.
    #[inline]
    unsafe fn load(ptr: *const f64, size: usize) -> Self::Output {
        debug_assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F64x2::is_aligned(ptr) {
            true => Self::load_aligned(ptr),
            false => Self::load_unaligned(ptr),
        }
    }

    /// Loads 2 elements from 16-byte aligned memory using `_mm_load_pd`.
    #[inline]
    unsafe fn load_aligned(ptr: *const f64) -> Self::Output {
        Self {
            elements: _mm_load_pd(ptr),
        }
    }

    /// Loads 2 elements from unaligned memory using `_mm_loadu_pd`.
    #[inline]
    unsafe fn load_unaligned(ptr: *const f64) -> Self::Output {
        Self {
            elements: _mm_loadu_pd(ptr),
        }
    }

    #[inline]
    unsafe fn splat(value: f64) -> Self::Output {
        Self {
            elements: _mm_set1_pd(value),
        }
    }
}

impl SimdStore<f64> for F64x2 {
    /// Stores both elements, choosing the aligned store when possible.
    ///
    /// # Safety
    ///
    /// Pointer must not be null and must point to 2 writable f64 values.
    #[inline]
    unsafe fn store_at(&self, ptr: *mut f64) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        match F64x2::is_aligned(ptr) {
            true => self.store_aligned_at(ptr),
            false => self.store_unaligned_at(ptr),
        }
    }

    #[inline]
    unsafe fn store_aligned_at(&self, ptr: *mut f64) {
        _mm_store_pd(ptr, self.elements)
    }

    #[inline]
    unsafe fn store_unaligned_at(&self, ptr: *mut f64) {
        _mm_storeu_pd(ptr, self.elements)
    }
}

/// Element-wise addition using `_mm_add_pd`.
impl Add for F64x2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_add_pd(self.elements, rhs.elements) },
        }
    }
}

/// Element-wise IEEE-754 division using `_mm_div_pd`.
impl Div for F64x2 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_div_pd(self.elements, rhs.elements) },
        }
    }
}
