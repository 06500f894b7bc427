//! Segment Gradients Example
//!
//! Runs a segmented reduction forward, computes the analytic gradient via
//! the VJP rule, and verifies it with finite differences.
//!
//! Run with:
//! ```bash
//! cargo run --example segment_gradients
//! ```

use tenseg_ad::gradcheck::{check_gradient, GradCheckConfig};
use tenseg_ad::vjp::{SegmentReduceVjp, VjpOp};
use tenseg_core::DenseND;
use tenseg_kernels::{segment_reduce, SegmentReduction};

fn main() -> anyhow::Result<()> {
    println!("=== TenSeg Segment Gradients Demo ===\n");

    // Four segments of a length-6 sequence: [1], [10, 3], [4, 5, 5], []
    let data = DenseND::from_vec(vec![1.0, 10.0, 3.0, 4.0, 5.0, 5.0], &[6])?;
    let lengths = [1usize, 2, 3, 0];

    for reduction in [SegmentReduction::Max, SegmentReduction::Mean] {
        println!("--- {} reduction ---", reduction);

        let out = segment_reduce(&data.view(), reduction, &lengths, 0, false, 0.0)?;
        println!("forward:  {:?}", out.as_slice().unwrap());

        // Gradient of the sum of outputs: upstream cotangent of ones.
        let rule = SegmentReduceVjp::new(data.clone(), reduction, &lengths, 0, false)?;
        let grads = rule.vjp(&DenseND::ones(&[4]))?;
        println!("backward: {:?}", grads[0].as_slice());

        // Verify the analytic rule against central finite differences.
        let f = |x: &DenseND<f64>| -> anyhow::Result<DenseND<f64>> {
            let y = segment_reduce(&x.view(), reduction, &lengths, 0, false, 0.0)?;
            Ok(DenseND::from_array(y))
        };
        let df = |x: &DenseND<f64>, gy: &DenseND<f64>| -> anyhow::Result<DenseND<f64>> {
            let rule = SegmentReduceVjp::new(x.clone(), reduction, &lengths, 0, false)?;
            let mut grads = rule.vjp(gy)?;
            Ok(grads.remove(0))
        };

        let config = GradCheckConfig {
            verbose: true,
            ..GradCheckConfig::default()
        };
        let result = check_gradient(f, df, &data, &DenseND::ones(&[4]), &config)?;
        println!(
            "gradcheck: passed={} (max_abs_diff={:.2e})\n",
            result.passed, result.max_abs_diff
        );
    }

    Ok(())
}
