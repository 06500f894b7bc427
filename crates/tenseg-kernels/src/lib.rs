//! # tenseg-kernels
//!
//! Segmented reduction kernels for TenSeg.
//!
//! This crate implements reductions over contiguous segments of a tensor
//! axis, where the segmentation is described by a sequence of per-segment
//! lengths. One output value is produced per segment; zero-length segments
//! are filled with a caller-supplied initial value.
//!
//! **Key pieces:**
//! - [`segment_reduce`] - the forward kernel (`max` / `mean` per segment)
//! - [`SegmentReduction`] - reduction mode selector
//! - [`Backend`] / [`Pass`] - explicit capability model for compute backends
//! - [`KernelError`] - structured errors (axis, validation, capability)
//!
//! ## Quick Start
//!
//! ```
//! use scirs2_core::ndarray_ext::Array;
//! use tenseg_kernels::{segment_reduce, SegmentReduction};
//!
//! // Three ragged segments of a length-6 sequence: [1], [2, 4], [5, 5, 3]
//! let data = Array::from_shape_vec(vec![6], vec![1.0, 2.0, 4.0, 5.0, 5.0, 3.0]).unwrap();
//! let out = segment_reduce(
//!     &data.view(),
//!     SegmentReduction::Max,
//!     &[1, 2, 3],
//!     0,
//!     false,
//!     0.0,
//! )
//! .unwrap();
//! assert_eq!(out.shape(), &[3]);
//! assert_eq!(out[[0]], 1.0);
//! assert_eq!(out[[1]], 4.0);
//! assert_eq!(out[[2]], 5.0);
//! ```
//!
//! ## NaN Policy
//!
//! NaN dominates both reductions: any NaN inside a segment makes that
//! segment's output NaN. This is a deliberate numeric policy, tested
//! explicitly, not an artifact of comparison order.
//!
//! ## SciRS2 Integration
//!
//! This crate uses `scirs2-core` for all array operations and numerical
//! computations. Direct use of `ndarray` or `num-traits` is not permitted.
//! See `SCIRS2_INTEGRATION_POLICY.md` for details.

#![deny(warnings)]

pub mod backend;
pub mod error;
pub mod segment;


// Re-exports
pub use backend::{segment_reduce_on, Backend, Pass};
pub use error::{KernelError, KernelResult};
pub use segment::{resolve_axis, segment_offsets, segment_reduce, SegmentReduction};
