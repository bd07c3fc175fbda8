//! Element-wise averaging kernels.
//!
//! Every kernel validates its inputs, allocates a fresh result vector and
//! returns it; none of them keeps state between calls.
//!
//! The vectorized kernels run in two phases:
//!
//! 1. **Vector body**: the first `len - len % W` elements, `W` lanes per step,
//!    on the backend selected by [`SimdWidth`]
//! 2. **Scalar remainder**: the trailing `len % W` elements, one at a time
//!
//! Both phases perform the same IEEE-754 operations per element (add, then
//! divide; three inputs are summed left to right), so scalar and vectorized
//! results are bit-identical.
//!
//! ```rust
//! use simdavg::{simd::SimdWidth, SimdAverage};
//!
//! let lhs = [17.38, 18.58, 20.63, 22.67, 24.10];
//! let rhs = [14.63, 16.90, 18.79, 20.68, 23.58];
//!
//! let width = SimdWidth::probe();
//! let scalar = lhs.as_slice().scalar_average(rhs.as_slice()).unwrap();
//! let simd = lhs.as_slice().simd_average(rhs.as_slice(), width).unwrap();
//! assert_eq!(scalar, simd);
//! ```

use crate::error::{ensure_same_len, Result};
use crate::simd::{
    slice::{
        portable_average2_body, portable_average3_body, scalar_average2_into,
        scalar_average3_into,
    },
    Isa, SimdWidth,
};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use crate::simd::{avx, sse2};

#[cfg(target_arch = "aarch64")]
use crate::simd::neon;

/// Averages two slices one element at a time.
///
/// # Errors
///
/// [`crate::SimdavgError::InvalidArgument`] if the slices differ in length.
pub fn scalar_average2(lhs: &[f64], rhs: &[f64]) -> Result<Vec<f64>> {
    ensure_same_len(&[lhs, rhs])?;

    let mut result = vec![0.0; lhs.len()];
    scalar_average2_into(lhs, rhs, &mut result);

    Ok(result)
}

/// Averages three slices one element at a time.
///
/// # Errors
///
/// [`crate::SimdavgError::InvalidArgument`] if the slices differ in length.
pub fn scalar_average3(lhs: &[f64], mhs: &[f64], rhs: &[f64]) -> Result<Vec<f64>> {
    ensure_same_len(&[lhs, mhs, rhs])?;

    let mut result = vec![0.0; lhs.len()];
    scalar_average3_into(lhs, mhs, rhs, &mut result);

    Ok(result)
}

/// Averages two slices `width.lanes()` elements at a time, then finishes the
/// remainder with the scalar loop.
///
/// # Errors
///
/// [`crate::SimdavgError::InvalidArgument`] if the slices differ in length.
/// Lengths are checked before any element is read.
pub fn simd_average2(lhs: &[f64], rhs: &[f64], width: SimdWidth) -> Result<Vec<f64>> {
    ensure_same_len(&[lhs, rhs])?;

    let size = lhs.len();
    let body = width.body_len(size);

    let mut result = vec![0.0; size];
    let (out_body, out_tail) = result.split_at_mut(body);

    average2_body(&lhs[..body], &rhs[..body], out_body, width);
    scalar_average2_into(&lhs[body..], &rhs[body..], out_tail);

    Ok(result)
}

/// Three-input counterpart of [`simd_average2`].
///
/// # Errors
///
/// [`crate::SimdavgError::InvalidArgument`] if the slices differ in length.
pub fn simd_average3(lhs: &[f64], mhs: &[f64], rhs: &[f64], width: SimdWidth) -> Result<Vec<f64>> {
    ensure_same_len(&[lhs, mhs, rhs])?;

    let size = lhs.len();
    let body = width.body_len(size);

    let mut result = vec![0.0; size];
    let (out_body, out_tail) = result.split_at_mut(body);

    average3_body(&lhs[..body], &mhs[..body], &rhs[..body], out_body, width);
    scalar_average3_into(&lhs[body..], &mhs[body..], &rhs[body..], out_tail);

    Ok(result)
}

// SAFETY (all unsafe blocks below): a `SimdWidth` carrying a hardware `Isa`
// is only constructed after runtime detection succeeded, and `body` lengths
// are whole multiples of that ISA's lane count.

#[inline(always)]
fn average2_body(lhs: &[f64], rhs: &[f64], out: &mut [f64], width: SimdWidth) {
    match width.isa() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Isa::Avx => unsafe { avx::slice::average2_body(lhs, rhs, out) },
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Isa::Sse2 => unsafe { sse2::slice::average2_body(lhs, rhs, out) },
        #[cfg(target_arch = "aarch64")]
        Isa::Neon => unsafe { neon::slice::average2_body(lhs, rhs, out) },
        _ => portable_average2_body(lhs, rhs, out, width.lanes()),
    }
}

#[inline(always)]
fn average3_body(lhs: &[f64], mhs: &[f64], rhs: &[f64], out: &mut [f64], width: SimdWidth) {
    match width.isa() {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Isa::Avx => unsafe { avx::slice::average3_body(lhs, mhs, rhs, out) },
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Isa::Sse2 => unsafe { sse2::slice::average3_body(lhs, mhs, rhs, out) },
        #[cfg(target_arch = "aarch64")]
        Isa::Neon => unsafe { neon::slice::average3_body(lhs, mhs, rhs, out) },
        _ => portable_average3_body(lhs, mhs, rhs, out, width.lanes()),
    }
}

/// Scalar and vectorized averages as methods on f64 slices.
pub trait SimdAverage<Rhs = Self> {
    type Output;

    fn scalar_average(self, rhs: Rhs) -> Self::Output;
    fn simd_average(self, rhs: Rhs, width: SimdWidth) -> Self::Output;
    fn scalar_average3(self, mhs: Rhs, rhs: Rhs) -> Self::Output;
    fn simd_average3(self, mhs: Rhs, rhs: Rhs, width: SimdWidth) -> Self::Output;
}

impl<'b> SimdAverage<&'b [f64]> for &[f64] {
    type Output = Result<Vec<f64>>;

    #[inline(always)]
    fn scalar_average(self, rhs: &'b [f64]) -> Self::Output {
        scalar_average2(self, rhs)
    }

    #[inline(always)]
    fn simd_average(self, rhs: &'b [f64], width: SimdWidth) -> Self::Output {
        simd_average2(self, rhs, width)
    }

    #[inline(always)]
    fn scalar_average3(self, mhs: &'b [f64], rhs: &'b [f64]) -> Self::Output {
        scalar_average3(self, mhs, rhs)
    }

    #[inline(always)]
    fn simd_average3(self, mhs: &'b [f64], rhs: &'b [f64], width: SimdWidth) -> Self::Output {
        simd_average3(self, mhs, rhs, width)
    }
}
