//! Load/store traits shared by the per-ISA lane types.
//!
//! All methods are `unsafe`: besides the usual pointer validity rules, the
//! caller must ensure the host CPU supports the instruction set behind the
//! implementing type. A lane value can only be obtained through these unsafe
//! constructors, so the arithmetic operators on it are safe to call.
//!
//! The register inside a lane type is not reachable from outside the crate:
//!
//! ```compile_fail
//! use simdavg::simd::avx::f64x4::F64x4;
//!
//! fn raw(vector: F64x4) {
//!     let _ = vector.elements;
//! }
//! ```

/// Pointer alignment check for a lane type.
pub trait Alignment<T> {
    /// Returns `true` if `ptr` satisfies the lane type's preferred alignment.
    fn is_aligned(ptr: *const T) -> bool;
}

pub trait SimdLoad<T> {
    type Output;

    /// Loads a full vector, picking the aligned or unaligned instruction.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `size` readable elements, `size` must equal
    /// the lane count, and the CPU must support the lane type's instruction set.
    unsafe fn load(ptr: *const T, size: usize) -> Self::Output;

    /// # Safety
    ///
    /// `ptr` must be aligned to the lane type's alignment and point to a full
    /// vector of readable elements. The CPU must support the instruction set.
    unsafe fn load_aligned(ptr: *const T) -> Self::Output;

    /// # Safety
    ///
    /// `ptr` must point to a full vector of readable elements. The CPU must
    /// support the instruction set.
    unsafe fn load_unaligned(ptr: *const T) -> Self::Output;

    /// Broadcasts `value` to every lane.
    ///
    /// # Safety
    ///
    /// The CPU must support the instruction set.
    unsafe fn splat(value: T) -> Self::Output;
}

pub trait SimdStore<T> {
    /// Stores a full vector, picking the aligned or unaligned instruction.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a full vector of writable elements.
    unsafe fn store_at(&self, ptr: *mut T);

    /// # Safety
    ///
    /// `ptr` must be aligned to the lane type's alignment and point to a full
    /// vector of writable elements.
    unsafe fn store_aligned_at(&self, ptr: *mut T);

    /// # Safety
    ///
    /// `ptr` must point to a full vector of writable elements.
    unsafe fn store_unaligned_at(&self, ptr: *mut T);
}
