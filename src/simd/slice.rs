//! Scalar loops and the portable batched backend.
//!
//! The scalar functions are both the scalar kernels' inner loop and the
//! remainder path of every vectorized kernel, so all variants share the exact
//! same per-element arithmetic.

/// `out[i] = (lhs[i] + rhs[i]) / 2.0`
#[inline(always)]
pub(crate) fn scalar_average2_into(lhs: &[f64], rhs: &[f64], out: &mut [f64]) {
    debug_assert_eq!(lhs.len(), rhs.len(), "Vectors must be the same length");
    debug_assert_eq!(lhs.len(), out.len(), "Output must match input length");

    for ((c, a), b) in out.iter_mut().zip(lhs).zip(rhs) {
        *c = (a + b) / 2.0;
    }
}

/// `out[i] = (lhs[i] + mhs[i] + rhs[i]) / 3.0`
#[inline(always)]
pub(crate) fn scalar_average3_into(lhs: &[f64], mhs: &[f64], rhs: &[f64], out: &mut [f64]) {
    debug_assert_eq!(lhs.len(), mhs.len(), "Vectors must be the same length");
    debug_assert_eq!(lhs.len(), rhs.len(), "Vectors must be the same length");
    debug_assert_eq!(lhs.len(), out.len(), "Output must match input length");

    for (((c, a), m), b) in out.iter_mut().zip(lhs).zip(mhs).zip(rhs) {
        *c = (a + m + b) / 3.0;
    }
}

/// Portable vector body: averages `lanes`-sized blocks of two slices.
///
/// Common widths are monomorphized so each block is a fixed-size array the
/// optimizer can keep in registers.
pub(crate) fn portable_average2_body(lhs: &[f64], rhs: &[f64], out: &mut [f64], lanes: usize) {
    debug_assert!(lanes > 0, "Lane count must be positive");
    debug_assert_eq!(lhs.len() % lanes, 0, "Body must be whole blocks");

    match lanes {
        2 => average2_blocks::<2>(lhs, rhs, out),
        4 => average2_blocks::<4>(lhs, rhs, out),
        8 => average2_blocks::<8>(lhs, rhs, out),
        _ => {
            for ((a, b), c) in lhs
                .chunks_exact(lanes)
                .zip(rhs.chunks_exact(lanes))
                .zip(out.chunks_exact_mut(lanes))
            {
                scalar_average2_into(a, b, c);
            }
        }
    }
}

/// Portable vector body for three inputs.
pub(crate) fn portable_average3_body(
    lhs: &[f64],
    mhs: &[f64],
    rhs: &[f64],
    out: &mut [f64],
    lanes: usize,
) {
    debug_assert!(lanes > 0, "Lane count must be positive");
    debug_assert_eq!(lhs.len() % lanes, 0, "Body must be whole blocks");

    match lanes {
        2 => average3_blocks::<2>(lhs, mhs, rhs, out),
        4 => average3_blocks::<4>(lhs, mhs, rhs, out),
        8 => average3_blocks::<8>(lhs, mhs, rhs, out),
        _ => {
            for (((a, m), b), c) in lhs
                .chunks_exact(lanes)
                .zip(mhs.chunks_exact(lanes))
                .zip(rhs.chunks_exact(lanes))
                .zip(out.chunks_exact_mut(lanes))
            {
                scalar_average3_into(a, m, b, c);
            }
        }
    }
}

#[inline(always)]
fn load<const N: usize>(chunk: &[f64]) -> [f64; N] {
    let mut block = [0.0; N];
    block.copy_from_slice(chunk);
    block
}

#[inline(always)]
fn average2_blocks<const N: usize>(lhs: &[f64], rhs: &[f64], out: &mut [f64]) {
    for ((a, b), c) in lhs
        .chunks_exact(N)
        .zip(rhs.chunks_exact(N))
        .zip(out.chunks_exact_mut(N))
    {
        let va = load::<N>(a);
        let vb = load::<N>(b);

        let mut vc = [0.0; N];
        for lane in 0..N {
            vc[lane] = (va[lane] + vb[lane]) / 2.0;
        }

        c.copy_from_slice(&vc);
    }
}

#[inline(always)]
fn average3_blocks<const N: usize>(lhs: &[f64], mhs: &[f64], rhs: &[f64], out: &mut [f64]) {
    for (((a, m), b), c) in lhs
        .chunks_exact(N)
        .zip(mhs.chunks_exact(N))
        .zip(rhs.chunks_exact(N))
        .zip(out.chunks_exact_mut(N))
    {
        let va = load::<N>(a);
        let vm = load::<N>(m);
        let vb = load::<N>(b);

        let mut vc = [0.0; N];
        for lane in 0..N {
            vc[lane] = (va[lane] + vm[lane] + vb[lane]) / 3.0;
        }

        c.copy_from_slice(&vc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_average2_into() {
        let mut out = [0.0; 3];
        scalar_average2_into(&[1.0, 2.0, -3.0], &[3.0, 2.0, 3.0], &mut out);
        assert_eq!(out, [2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_scalar_average3_into() {
        let mut out = [0.0; 2];
        scalar_average3_into(&[1.0, 2.0], &[2.0, 4.0], &[3.0, 6.0], &mut out);
        assert_eq!(out, [2.0, 4.0]);
    }

    #[test]
    fn test_portable_bodies_match_scalar() {
        let a: Vec<f64> = (0..24).map(|i| i as f64 * 1.37).collect();
        let m: Vec<f64> = (0..24).map(|i| 5.0 - i as f64 * 0.21).collect();
        let b: Vec<f64> = (0..24).map(|i| (i * i) as f64 / 7.0).collect();

        let mut expected2 = vec![0.0; 24];
        let mut expected3 = vec![0.0; 24];
        scalar_average2_into(&a, &b, &mut expected2);
        scalar_average3_into(&a, &m, &b, &mut expected3);

        // 3 takes the generic chunk path, the rest are monomorphized.
        for lanes in [1, 2, 3, 4, 8] {
            let mut out2 = vec![0.0; 24];
            let mut out3 = vec![0.0; 24];
            portable_average2_body(&a, &b, &mut out2, lanes);
            portable_average3_body(&a, &m, &b, &mut out3, lanes);

            assert_eq!(out2, expected2, "lanes = {lanes}");
            assert_eq!(out3, expected3, "lanes = {lanes}");
        }
    }
}
