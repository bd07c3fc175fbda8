//! Equivalence tests between the scalar and vectorized two-input averages.
//!
//! Every available width is exercised: the probed one, each hardware backend
//! the host supports, and a range of portable widths.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use simdavg::simd::{Isa, SimdWidth};
use simdavg::{scalar_average2, simd_average2, SimdavgError};

fn widths() -> Vec<SimdWidth> {
    let mut widths = vec![SimdWidth::probe()];
    widths.extend(Isa::HARDWARE.iter().filter_map(|&isa| SimdWidth::for_isa(isa)));
    widths.extend((1..=8).map(|lanes| SimdWidth::portable(lanes).unwrap()));
    widths
}

fn random_vec(rng: &mut StdRng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.random_range(-1.0e6..=1.0e6)).collect()
}

/// Test the scalar kernel against ndarray's element-wise arithmetic.
#[test]
fn test_scalar_matches_ndarray() {
    let mut rng = StdRng::seed_from_u64(12345);
    let lhs = random_vec(&mut rng, 1000);
    let rhs = random_vec(&mut rng, 1000);

    let expected = (&Array1::from(lhs.clone()) + &Array1::from(rhs.clone())) / 2.0;
    let scalar = scalar_average2(&lhs, &rhs).unwrap();

    assert_eq!(scalar, expected.to_vec());
}

/// Every length from empty to three blocks plus one, for every width.
#[test]
fn test_all_lengths_match_scalar() {
    let mut rng = StdRng::seed_from_u64(42);

    for width in widths() {
        let max_len = width.lanes() * 3 + 1;

        for len in 0..=max_len {
            let lhs = random_vec(&mut rng, len);
            let rhs = random_vec(&mut rng, len);

            let scalar = scalar_average2(&lhs, &rhs).unwrap();
            let simd = simd_average2(&lhs, &rhs, width).unwrap();

            assert_eq!(simd.len(), len, "width {width}, len {len}");

            for (i, (s, v)) in scalar.iter().zip(&simd).enumerate() {
                assert_eq!(
                    s.to_bits(),
                    v.to_bits(),
                    "width {width}, len {len}, index {i}: scalar={s}, simd={v}"
                );
            }
        }
    }
}

/// Large random inputs with lengths that leave a remainder.
#[test]
fn test_random_inputs_bit_identical() {
    let mut rng = StdRng::seed_from_u64(7);

    for len in [31, 1_000, 4_099] {
        let lhs = random_vec(&mut rng, len);
        let rhs = random_vec(&mut rng, len);
        let scalar = scalar_average2(&lhs, &rhs).unwrap();

        for width in widths() {
            assert_eq!(simd_average2(&lhs, &rhs, width).unwrap(), scalar, "width {width}");
        }
    }
}

#[test]
fn test_reference_scenario() {
    let lhs = [17.38, 18.58];
    let rhs = [14.63, 16.90];

    for width in widths() {
        let result = simd_average2(&lhs, &rhs, width).unwrap();
        assert!((result[0] - 16.005).abs() < 1e-12, "{result:?}");
        assert!((result[1] - 17.74).abs() < 1e-12, "{result:?}");
    }
}

#[test]
fn test_width_four_with_remainder_of_one() {
    let width = SimdWidth::portable(4).unwrap();
    let lhs = [0.5, 1.5, 2.5, 3.5, 4.5];
    let rhs = [1.0, 2.0, 3.0, 4.0, 5.0];

    let simd = simd_average2(&lhs, &rhs, width).unwrap();

    assert_eq!(simd, scalar_average2(&lhs, &rhs).unwrap());
    assert_eq!(simd, vec![0.75, 1.75, 2.75, 3.75, 4.75]);
}

#[test]
fn test_idempotent() {
    let mut rng = StdRng::seed_from_u64(99);
    let lhs = random_vec(&mut rng, 37);
    let rhs = random_vec(&mut rng, 37);
    let width = SimdWidth::probe();

    assert_eq!(
        scalar_average2(&lhs, &rhs).unwrap(),
        scalar_average2(&lhs, &rhs).unwrap()
    );
    assert_eq!(
        simd_average2(&lhs, &rhs, width).unwrap(),
        simd_average2(&lhs, &rhs, width).unwrap()
    );
}

/// NaN and infinities propagate the same way through both paths.
#[test]
fn test_special_values_propagate() {
    let lhs = [f64::NAN, f64::INFINITY, f64::INFINITY, 1.0, f64::NEG_INFINITY, 2.0, f64::MAX];
    let rhs = [1.0, 1.0, f64::NEG_INFINITY, f64::NAN, -1.0, 2.0, f64::MAX];

    let scalar = scalar_average2(&lhs, &rhs).unwrap();
    assert!(scalar[0].is_nan());
    assert_eq!(scalar[1], f64::INFINITY);
    assert!(scalar[2].is_nan());
    assert_eq!(scalar[4], f64::NEG_INFINITY);
    assert_eq!(scalar[6], f64::INFINITY);

    for width in widths() {
        let simd = simd_average2(&lhs, &rhs, width).unwrap();

        for (s, v) in scalar.iter().zip(&simd) {
            if s.is_nan() {
                assert!(v.is_nan(), "width {width}: expected NaN, got {v}");
            } else {
                assert_eq!(s, v, "width {width}");
            }
        }
    }
}

#[test]
fn test_mismatched_lengths() {
    let lhs = vec![1.0; 10];
    let rhs = vec![1.0; 7];

    assert!(matches!(
        scalar_average2(&lhs, &rhs),
        Err(SimdavgError::InvalidArgument { .. })
    ));

    for width in widths() {
        assert!(matches!(
            simd_average2(&lhs, &rhs, width),
            Err(SimdavgError::InvalidArgument { .. })
        ));
        assert!(matches!(
            simd_average2(&rhs, &lhs, width),
            Err(SimdavgError::InvalidArgument { .. })
        ));
    }
}
