//! Dense tensor basics
//!
//! Demonstrates creating [`DenseND`] tensors, inspecting their shape and
//! reading/writing elements and views.
//!
//! Run with:
//! ```bash
//! cargo run --example dense_basics
//! ```

use tenseg_core::DenseND;

fn main() -> anyhow::Result<()> {
    println!("=== TenSeg Core: Dense Tensor Basics ===\n");

    // Construction.
    let zeros = DenseND::<f64>::zeros(&[2, 3]);
    let ragged = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;

    println!("zeros:  shape {:?}, rank {}", zeros.shape(), zeros.rank());
    println!("ragged: shape {:?}, len {}\n", ragged.shape(), ragged.len());

    // Element access: panicking indexing or checked get().
    println!("ragged[1, 2] = {}", ragged[&[1, 2]]);
    println!("ragged.get(&[5, 5]) = {:?}\n", ragged.get(&[5, 5]));

    // Mutation through a checked handle.
    let mut scratch = DenseND::from_elem(&[4], 1.0);
    if let Some(v) = scratch.get_mut(&[2]) {
        *v = 7.0;
    }
    println!("scratch after write: {:?}", scratch.as_slice());

    // Zero-copy views are what the kernel stack consumes.
    let view = ragged.view();
    println!("view sum = {}", view.iter().sum::<f64>());

    Ok(())
}
