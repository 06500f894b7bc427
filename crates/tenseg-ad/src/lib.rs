//! # tenseg-ad
//!
//! Backward-pass support for TenSeg segmented reductions.
//!
//! This crate provides:
//! - The [`VjpOp`] trait and the [`SegmentReduceVjp`] rule computing the
//!   gradient of a segmented reduction with respect to its data input
//! - [`segment_reduce_grad`], the same math over raw views
//! - Finite-difference gradient checking ([`gradcheck`]) for verifying
//!   analytic gradients against numerical ones
//!
//! Backend capability gaps apply to the backward pass too: construct rules
//! through [`SegmentReduceVjp::for_backend`] to get an explicit error on
//! backends that lack a backward implementation.

#![deny(warnings)]

pub mod gradcheck;
pub mod vjp;

// Re-exports
pub use vjp::*;
