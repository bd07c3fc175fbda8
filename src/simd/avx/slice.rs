//! AVX block kernels for the vectorized averages.
//!
//! These functions only cover the vector body: every slice must have the same
//! length and that length must be a multiple of [`LANE_COUNT`]. The scalar
//! remainder is handled by the caller.

use crate::simd::{
    avx::f64x4::{F64x4, LANE_COUNT},
    SimdLoad, SimdStore,
};

/// Averages two slices 4 lanes at a time.
///
/// # Safety
///
/// The CPU must support AVX. `lhs`, `rhs` and `out` must have the same length,
/// a multiple of 4.
#[target_feature(enable = "avx")]
pub(crate) unsafe fn average2_body(lhs: &[f64], rhs: &[f64], out: &mut [f64]) {
    debug_assert_eq!(lhs.len(), rhs.len(), "Vectors must be the same length");
    debug_assert_eq!(lhs.len(), out.len(), "Output must match input length");
    debug_assert_eq!(lhs.len() % LANE_COUNT, 0, "Body must be whole blocks");

    let divisor = F64x4::splat(2.0);

    for ((a, b), c) in lhs
        .chunks_exact(LANE_COUNT)
        .zip(rhs.chunks_exact(LANE_COUNT))
        .zip(out.chunks_exact_mut(LANE_COUNT))
    {
        let va = F64x4::load(a.as_ptr(), LANE_COUNT);
        let vb = F64x4::load(b.as_ptr(), LANE_COUNT);

        ((va + vb) / divisor).store_at(c.as_mut_ptr());
    }
}

/// Averages three slices 4 lanes at a time, summing left to right.
///
/// # Safety
///
/// The CPU must support AVX. All slices must have the same length, a multiple of 4.
#[target_feature(enable = "avx")]
pub(crate) unsafe fn average3_body(lhs: &[f64], mhs: &[f64], rhs: &[f64], out: &mut [f64]) {
    debug_assert_eq!(lhs.len(), mhs.len(), "Vectors must be the same length");
    debug_assert_eq!(lhs.len(), rhs.len(), "Vectors must be the same length");
    debug_assert_eq!(lhs.len(), out.len(), "Output must match input length");
    debug_assert_eq!(lhs.len() % LANE_COUNT, 0, "Body must be whole blocks");

    let divisor = F64x4::splat(3.0);

    for (((a, m), b), c) in lhs
        .chunks_exact(LANE_COUNT)
        .zip(mhs.chunks_exact(LANE_COUNT))
        .zip(rhs.chunks_exact(LANE_COUNT))
        .zip(out.chunks_exact_mut(LANE_COUNT))
    {
        let va = F64x4::load(a.as_ptr(), LANE_COUNT);
        let vm = F64x4::load(m.as_ptr(), LANE_COUNT);
        let vb = F64x4::load(b.as_ptr(), LANE_COUNT);

        ((va + vm + vb) / divisor).store_at(c.as_mut_ptr());
    }
}
