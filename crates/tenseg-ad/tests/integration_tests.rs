//! Integration tests for tenseg-ad
//!
//! End-to-end forward + backward flows over the reference scenarios, plus
//! finite-difference verification of the analytic VJP rule.

use anyhow::Result;
use scirs2_core::numeric::Float;
use tenseg_ad::gradcheck::{check_gradient, GradCheckConfig};
use tenseg_ad::vjp::{SegmentReduceVjp, VjpOp};
use tenseg_core::DenseND;
use tenseg_kernels::{segment_reduce, SegmentReduction};

/// Compare with rtol/atol, treating NaN as equal to NaN
fn assert_allclose<T: Float + std::fmt::Debug>(actual: &[T], expected: &[T]) {
    let rtol = T::from(1e-2).unwrap();
    let atol = T::from(1e-5).unwrap();
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected.iter()) {
        if e.is_nan() {
            assert!(a.is_nan(), "expected NaN, got {:?}", a);
        } else {
            let diff = (*a - *e).abs();
            assert!(
                diff <= atol + rtol * e.abs(),
                "got {:?}, expected {:?}",
                a,
                e
            );
        }
    }
}

fn reference_input<T: Float>() -> DenseND<T> {
    DenseND::from_vec(
        vec![
            T::one(),
            T::nan(),
            T::from(3.0).unwrap(),
            T::from(4.0).unwrap(),
            T::from(5.0).unwrap(),
            T::from(5.0).unwrap(),
        ],
        &[6],
    )
    .unwrap()
}

/// Forward then backward under a sum loss (upstream gradient of ones),
/// across validation modes and axis spellings.
fn check_simple_1d<T: Float + std::fmt::Debug>(
    reduction: SegmentReduction,
    unchecked: bool,
    axis: isize,
) -> Result<()> {
    let lengths = [1, 2, 3, 0];
    let data = reference_input::<T>();

    let (expected_result, expected_grad): (Vec<T>, Vec<T>) = match reduction {
        SegmentReduction::Max => (
            vec![T::one(), T::nan(), T::from(5.0).unwrap(), T::zero()],
            vec![
                T::one(),
                T::one(),
                T::zero(),
                T::zero(),
                T::from(0.5).unwrap(),
                T::from(0.5).unwrap(),
            ],
        ),
        SegmentReduction::Mean => (
            vec![T::one(), T::nan(), T::from(4.666).unwrap(), T::zero()],
            vec![
                T::from(1.0).unwrap(),
                T::from(0.5).unwrap(),
                T::from(0.5).unwrap(),
                T::from(0.333).unwrap(),
                T::from(0.333).unwrap(),
                T::from(0.333).unwrap(),
            ],
        ),
    };

    let actual =
        segment_reduce(&data.view(), reduction, &lengths, axis, unchecked, T::zero())?;
    assert_allclose(actual.as_slice().unwrap(), &expected_result);

    let rule = SegmentReduceVjp::new(data, reduction, &lengths, axis, unchecked)?;
    let grads = rule.vjp(&DenseND::ones(&[4]))?;
    assert_allclose(grads[0].as_slice(), &expected_grad);

    Ok(())
}

#[test]
fn test_simple_1d_all_parameterizations() -> Result<()> {
    for reduction in [SegmentReduction::Max, SegmentReduction::Mean] {
        for unchecked in [false, true] {
            for axis in [0, -1] {
                check_simple_1d::<f32>(reduction, unchecked, axis)?;
                check_simple_1d::<f64>(reduction, unchecked, axis)?;
            }
        }
    }
    Ok(())
}

#[test]
fn test_gradcheck_segment_reduce() -> Result<()> {
    // NaN-free variant of the reference data; finite differences do not
    // tolerate NaN.
    let data = DenseND::from_vec(vec![1.0, 10.0, 3.0, 4.0, 5.0, 5.0], &[6])?;
    let lengths = [1usize, 2, 3, 0];

    for reduction in [SegmentReduction::Max, SegmentReduction::Mean] {
        let f = |x: &DenseND<f64>| -> Result<DenseND<f64>> {
            let out = segment_reduce(&x.view(), reduction, &lengths, 0, false, 0.0)?;
            Ok(DenseND::from_array(out))
        };
        let df = |x: &DenseND<f64>, grad_y: &DenseND<f64>| -> Result<DenseND<f64>> {
            let rule =
                SegmentReduceVjp::new(x.clone(), reduction, &lengths, 0, false)?;
            let mut grads = rule.vjp(grad_y)?;
            Ok(grads.remove(0))
        };

        let grad_y = DenseND::ones(&[4]);
        let result = check_gradient(f, df, &data, &grad_y, &GradCheckConfig::default())?;
        assert!(
            result.passed,
            "{} gradcheck failed: max_rel_diff = {}",
            reduction, result.max_rel_diff
        );
    }
    Ok(())
}

#[test]
fn test_gradcheck_with_nonuniform_upstream() -> Result<()> {
    let data = DenseND::from_vec(vec![2.0, -1.0, 7.0, 0.5], &[4])?;
    let lengths = [2usize, 2];

    let f = |x: &DenseND<f64>| -> Result<DenseND<f64>> {
        let out = segment_reduce(
            &x.view(),
            SegmentReduction::Mean,
            &lengths,
            0,
            false,
            0.0,
        )?;
        Ok(DenseND::from_array(out))
    };
    let df = |x: &DenseND<f64>, grad_y: &DenseND<f64>| -> Result<DenseND<f64>> {
        let rule = SegmentReduceVjp::new(
            x.clone(),
            SegmentReduction::Mean,
            &lengths,
            0,
            false,
        )?;
        let mut grads = rule.vjp(grad_y)?;
        Ok(grads.remove(0))
    };

    let grad_y = DenseND::from_vec(vec![3.0, -2.0], &[2])?;
    let result = check_gradient(f, df, &data, &grad_y, &GradCheckConfig::default())?;
    assert!(result.passed);
    Ok(())
}

#[test]
fn test_2d_forward_backward_roundtrip() -> Result<()> {
    // Two lanes, segmented [1, 2] along the last axis.
    let data = DenseND::from_vec(vec![1.0, 2.0, 4.0, -1.0, 6.0, 6.0], &[2, 3])?;

    let out = segment_reduce(
        &data.view(),
        SegmentReduction::Max,
        &[1, 2],
        -1,
        false,
        0.0,
    )?;
    assert_eq!(out.shape(), &[2, 2]);
    assert_eq!(out[[0, 1]], 4.0);
    assert_eq!(out[[1, 1]], 6.0);

    let rule = SegmentReduceVjp::new(data, SegmentReduction::Max, &[1, 2], -1, false)?;
    let grads = rule.vjp(&DenseND::ones(&[2, 2]))?;
    assert_eq!(
        grads[0].as_slice(),
        &[1.0, 0.0, 1.0, 1.0, 0.5, 0.5],
    );
    Ok(())
}
