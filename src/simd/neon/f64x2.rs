use std::arch::aarch64::*;

use std::ops::{Add, Div};

use crate::simd::{Alignment, SimdLoad, SimdStore};

pub const NEON_ALIGNMENT: usize = 16;

pub const LANE_COUNT: usize = 2;

/// A SIMD vector of 2 64-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F64x2 {
    pub(crate) elements: float64x2_t,
}

impl Alignment<f64> for F64x2 {
    #[inline(always)]
    fn is_aligned(ptr: *const f64) -> bool {
        (ptr as usize) % NEON_ALIGNMENT == 0
    }
}

impl SimdLoad<f64> for F64x2 {
    type Output = Self;

    /// `vld1q_f64` has no alignment requirement, so every load goes through it.
    #[inline]
    unsafe fn load(ptr: *const f64, size: usize) -> Self::Output {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");
        debug_assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");

        Self::load_unaligned(ptr)
    }

    #[inline]
    unsafe fn load_aligned(ptr: *const f64) -> Self::Output {
        Self::load_unaligned(ptr)
    }

    #[inline]
    unsafe fn load_unaligned(ptr: *const f64) -> Self::Output {
        Self {
            elements: vld1q_f64(ptr),
        }
    }

    #[inline]
    unsafe fn splat(value: f64) -> Self::Output {
        Self {
            elements: vdupq_n_f64(value),
        }
    }
}

impl SimdStore<f64> for F64x2 {
    #[inline]
    unsafe fn store_at(&self, ptr: *mut f64) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        self.store_unaligned_at(ptr)
    }

    #[inline]
    unsafe fn store_aligned_at(&self, ptr: *mut f64) {
        self.store_unaligned_at(ptr)
    }

    #[inline]
    unsafe fn store_unaligned_at(&self, ptr: *mut f64) {
        vst1q_f64(ptr, self.elements)
    }
}

impl Add for F64x2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f64(self.elements, rhs.elements) },
        }
    }
}

impl Div for F64x2 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vdivq_f64(self.elements, rhs.elements) },
        }
    }
}
