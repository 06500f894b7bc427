//! # TenSeg - Segmented Tensor Reductions
//!
//! Reductions over contiguous segments of a tensor axis, with analytic
//! gradients and finite-difference verification.
//!
//! This is the **meta crate** that re-exports all TenSeg components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use tenseg::prelude::*;
//!
//! // Ragged windows of a length-6 sequence: [1], [2, 4], [5, 5, 3]
//! let data = DenseND::from_vec(vec![1.0, 2.0, 4.0, 5.0, 5.0, 3.0], &[6])?;
//! let out = segment_reduce(&data.view(), SegmentReduction::Max, &[1, 2, 3], 0, false, 0.0)?;
//! assert_eq!(out[[2]], 5.0);
//!
//! // Gradient of the sum of outputs w.r.t. the data.
//! let rule = SegmentReduceVjp::new(data, SegmentReduction::Max, &[1, 2, 3], 0, false)?;
//! let grads = rule.vjp(&DenseND::ones(&[3]))?;
//! assert_eq!(grads[0].as_slice(), &[1.0, 0.0, 1.0, 0.5, 0.5, 0.0]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Core Tensor Types ([`core`])
//!
//! Dense tensor storage ([`core::DenseND`]) with views and bounds-checked
//! access.
//!
//! ### Segmented Reduction Kernels ([`kernels`])
//!
//! The forward kernel ([`kernels::segment_reduce`]), the backend capability
//! model ([`kernels::Backend`]) and structured errors
//! ([`kernels::KernelError`]).
//!
//! ### Automatic Differentiation ([`ad`])
//!
//! The VJP rule ([`ad::SegmentReduceVjp`]) and finite-difference gradient
//! checking ([`ad::gradcheck`]).

#![deny(warnings)]

pub use tenseg_ad as ad;
pub use tenseg_core as core;
pub use tenseg_kernels as kernels;

/// Convenience re-exports of the commonly used TenSeg surface
pub mod prelude {
    pub use tenseg_ad::gradcheck::{check_gradient, GradCheckConfig, GradCheckResult};
    pub use tenseg_ad::vjp::{segment_reduce_grad, SegmentReduceVjp, VjpOp};
    pub use tenseg_core::DenseND;
    pub use tenseg_kernels::{
        resolve_axis, segment_offsets, segment_reduce, segment_reduce_on, Backend, KernelError,
        KernelResult, Pass, SegmentReduction,
    };
}
