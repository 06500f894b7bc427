//! # tenseg-core
//!
//! Core tensor types for TenSeg.
//!
//! This crate provides the dense tensor representation ([`DenseND`]) that the
//! segmented-reduction stack is built on: constructors, shape accessors,
//! bounds-checked element access and zero-copy views.
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2-core`. Direct use of `ndarray` or
//! `num-traits` is forbidden per SCIRS2_INTEGRATION_POLICY.md.
//!
//! ## Quick Start
//!
//! ```
//! use tenseg_core::DenseND;
//!
//! let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
//! assert_eq!(tensor.shape(), &[2, 3, 4]);
//! assert_eq!(tensor.rank(), 3);
//!
//! let ragged = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 5.0], &[6]).unwrap();
//! assert_eq!(ragged.len(), 6);
//! ```

#![deny(warnings)]

pub mod dense;

// Re-exports
pub use dense::DenseND;
