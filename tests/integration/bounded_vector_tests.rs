//! Bounded monotone vectors, alone and inside model trees

use super::sample_model::Household;
use crate::test_helpers::{seeded_rng, slice_approx_eq};
use approx::assert_relative_eq;
use modelparams_rs::bounded_vector::bounded_values;
use modelparams_rs::model::change_value;
use modelparams_rs::{
    make_guess, set_params_from_guess, BoundedVector, IncrementScaling, ModelParamsError, ObjectId,
};
use rand::Rng;

fn grid(increasing: bool, n: usize) -> BoundedVector {
    let mut bv = BoundedVector::new(
        ObjectId::new("grid"),
        increasing,
        -1.0,
        3.0,
        vec![1.0 / n as f64; n],
    )
    .unwrap();
    bv.set_pvector("Grid increments", "dx", true).unwrap();
    bv
}

#[test]
fn test_example_values() {
    let bv = BoundedVector::new(ObjectId::new("grid"), true, 1.0, 2.0, vec![0.3, 0.2, 0.5]).unwrap();
    let values = bv.values();
    assert_relative_eq!(values[0], 1.3, epsilon = 1e-12);
    assert_relative_eq!(values[1], 1.5, epsilon = 1e-12);
    assert_relative_eq!(values[2], 2.0, epsilon = 1e-12);
    assert_eq!(bv.values_at(&[2, 0]).unwrap(), vec![values[2], values[0]]);
}

#[test]
fn test_random_increments_stay_monotone_and_bounded() {
    let mut rng = seeded_rng(1);

    for _ in 0..200 {
        let n = rng.gen_range(1..10);
        let lower = rng.gen_range(-10.0..10.0);
        let upper = lower + rng.gen_range(0.1..10.0);
        let increasing = rng.gen_bool(0.5);
        // Include exact zeros to hit the degenerate cases
        let dx: Vec<f64> = (0..n)
            .map(|_| if rng.gen_bool(0.2) { 0.0 } else { rng.gen_range(0.0..1.0) })
            .collect();

        for scaling in [IncrementScaling::Normalized, IncrementScaling::Saturating] {
            let values = bounded_values(&dx, lower, upper, increasing, scaling);
            assert_eq!(values.len(), n);
            assert!(values.iter().all(|v| (lower..=upper).contains(v)));
            for w in values.windows(2) {
                if increasing {
                    assert!(w[0] <= w[1], "{:?} not increasing", values);
                } else {
                    assert!(w[0] >= w[1], "{:?} not decreasing", values);
                }
            }
            if scaling == IncrementScaling::Normalized {
                let end = if increasing { upper } else { lower };
                assert_eq!(values[n - 1], end);
            }
        }
    }
}

#[test]
fn test_normalized_inverse() {
    let mut rng = seeded_rng(2);

    for increasing in [true, false] {
        for _ in 0..50 {
            let n = rng.gen_range(1..8);
            let mut bv = grid(increasing, n);

            // Random monotone target ending at the attainable end point
            let mut target: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..3.0)).collect();
            target.sort_by(|a, b| a.partial_cmp(b).unwrap());
            if increasing {
                target[n - 1] = 3.0;
            } else {
                target.reverse();
                target[n - 1] = -1.0;
            }

            bv.set_default_value(&target).unwrap();
            assert!(slice_approx_eq(&bv.values(), &target, 1e-9), "{:?} vs {:?}", bv.values(), target);
        }
    }
}

#[test]
fn test_saturating_inverse() {
    let mut rng = seeded_rng(3);

    for _ in 0..50 {
        let n = rng.gen_range(1..8);
        let mut bv = grid(true, n).with_scaling(IncrementScaling::Saturating);

        let mut target: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..3.0)).collect();
        target.sort_by(|a, b| a.partial_cmp(b).unwrap());

        bv.set_default_value(&target).unwrap();
        assert!(slice_approx_eq(&bv.values(), &target, 1e-9));
    }
}

#[test]
fn test_inverse_errors() {
    let mut bv = grid(true, 3);

    assert!(matches!(
        bv.set_default_value(&[0.0, 1.0]),
        Err(ModelParamsError::SizeMismatch {
            expected: 3,
            actual: 2,
            ..
        })
    ));
    assert!(matches!(
        bv.set_default_value(&[0.0, 2.0, 1.0]),
        Err(ModelParamsError::NotMonotone { index: 2 })
    ));
    assert!(matches!(
        bv.set_default_value(&[0.0, 1.0, 2.0]),
        Err(ModelParamsError::UnreachableTarget { .. })
    ));

    // Failed calls keep the previous increments
    assert!(slice_approx_eq(bv.increments(), &[1.0 / 3.0; 3], 1e-15));
}

#[test]
fn test_fix_values_removes_from_guess() {
    let mut household = Household::new();
    assert_eq!(make_guess(&household).unwrap().len(), 7);

    household.thresholds.fix_values(&[0.1, 0.2, 0.6, 1.0]).unwrap();
    assert_eq!(make_guess(&household).unwrap().len(), 3);

    let values = household.thresholds.values();
    assert!(slice_approx_eq(&values, &[0.1, 0.2, 0.6, 1.0], 1e-12));

    // The fixed vector survives a round trip of the remaining guess
    set_params_from_guess(&mut household, &[0.9, 3.0, 1.0]).unwrap();
    assert!(slice_approx_eq(&household.thresholds.values(), &values, 1e-15));
}

#[test]
fn test_change_increments_through_tree() {
    let mut household = Household::new();
    change_value(
        &mut household,
        &Household::thresholds_id(),
        "dx",
        &[0.5, 0.0, 0.25, 0.25],
    )
    .unwrap();

    assert_eq!(household.thresholds.increments(), &[0.5, 0.0, 0.25, 0.25]);
    let values = household.thresholds.values();
    assert_relative_eq!(values[0], 0.5, epsilon = 1e-12);
    assert_relative_eq!(values[1], 0.5, epsilon = 1e-12);
    assert_relative_eq!(values[2], 0.75, epsilon = 1e-12);
    assert_eq!(values[3], 1.0);

    // Increments are calibrated with bounds [0, 1]
    assert!(matches!(
        change_value(&mut household, &Household::thresholds_id(), "dx", &[1.5, 0.0, 0.0, 0.0]),
        Err(ModelParamsError::OutOfBounds { .. })
    ));
    assert!(matches!(
        change_value(&mut household, &ObjectId::new("firm"), "dx", &[0.25; 4]),
        Err(ModelParamsError::ObjectNotFound(_))
    ));
}
