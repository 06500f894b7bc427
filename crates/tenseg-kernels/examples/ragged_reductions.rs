//! Ragged Reductions Example
//!
//! Demonstrates segmented max/mean reductions over a ragged sequence,
//! including empty segments, NaN propagation and the backend capability
//! query.
//!
//! Run with:
//! ```bash
//! cargo run --example ragged_reductions
//! ```

use tenseg_core::DenseND;
use tenseg_kernels::{
    segment_reduce, segment_reduce_on, Backend, Pass, SegmentReduction,
};

fn main() -> anyhow::Result<()> {
    println!("=== TenSeg Ragged Reductions Demo ===\n");

    // Variable-length event windows flattened into one sequence:
    // [3.0] [1.0, 4.0] [] [2.0, 2.0, 9.0]
    let data = DenseND::from_vec(vec![3.0, 1.0, 4.0, 2.0, 2.0, 9.0], &[6])?;
    let lengths = [1, 2, 0, 3];

    println!("data    = {:?}", data.as_slice());
    println!("lengths = {:?}\n", lengths);

    let max = segment_reduce(&data.view(), SegmentReduction::Max, &lengths, 0, false, 0.0)?;
    let mean = segment_reduce(&data.view(), SegmentReduction::Mean, &lengths, 0, false, 0.0)?;

    println!("per-window max  = {:?}", max.as_slice().unwrap());
    println!("per-window mean = {:?}", mean.as_slice().unwrap());
    println!("(window 2 is empty, so both report the initial value 0.0)\n");

    // NaN dominates a window.
    let noisy = DenseND::from_vec(vec![3.0, f64::NAN, 4.0], &[3])?;
    let noisy_max =
        segment_reduce(&noisy.view(), SegmentReduction::Max, &[3], 0, false, 0.0)?;
    println!("window with NaN -> max = {:?}\n", noisy_max.as_slice().unwrap());

    // Capability-gated backend dispatch.
    for reduction in [SegmentReduction::Max, SegmentReduction::Mean] {
        let supported = Backend::Gpu.supports(reduction, Pass::Forward);
        println!("GPU {} forward supported: {}", reduction, supported);
        if supported {
            let out = segment_reduce_on(
                Backend::Gpu,
                &data.view(),
                reduction,
                &lengths,
                0,
                false,
                0.0,
            )?;
            println!("  GPU result: {:?}", out.as_slice().unwrap());
        }
    }

    Ok(())
}
