//! Error types for segmented reduction kernels
//!
//! This module provides structured error types for kernel operations. Every
//! error names the operation it came from; validation and capability errors
//! carry enough context for the caller to branch deterministically.

use crate::backend::{Backend, Pass};
use crate::segment::SegmentReduction;
use thiserror::Error;

/// Error type for segmented reduction kernels
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Axis does not resolve to a valid dimension
    #[error("{operation}: axis {axis} is out of range for tensor of rank {rank}")]
    AxisOutOfRange {
        operation: String,
        axis: isize,
        rank: usize,
    },

    /// Segment lengths do not partition the segmented axis
    #[error("{operation}: segment lengths sum to {actual}, but axis {axis} has extent {expected}")]
    SegmentLengthMismatch {
        operation: String,
        expected: usize,
        actual: usize,
        axis: usize,
    },

    /// Requested reduction/pass combination is not implemented on the backend
    #[error("{operation}: {reduction} {pass} is not supported on the {backend} backend")]
    UnsupportedBackend {
        operation: String,
        backend: Backend,
        reduction: SegmentReduction,
        pass: Pass,
    },

    /// Generic operation error with context
    #[error("{operation}: {message}")]
    Operation { operation: String, message: String },
}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Create an axis-out-of-range error
    pub fn axis_out_of_range(operation: impl Into<String>, axis: isize, rank: usize) -> Self {
        KernelError::AxisOutOfRange {
            operation: operation.into(),
            axis,
            rank,
        }
    }

    /// Create a segment length mismatch error
    pub fn segment_length_mismatch(
        operation: impl Into<String>,
        expected: usize,
        actual: usize,
        axis: usize,
    ) -> Self {
        KernelError::SegmentLengthMismatch {
            operation: operation.into(),
            expected,
            actual,
            axis,
        }
    }

    /// Create an unsupported backend error
    pub fn unsupported_backend(
        operation: impl Into<String>,
        backend: Backend,
        reduction: SegmentReduction,
        pass: Pass,
    ) -> Self {
        KernelError::UnsupportedBackend {
            operation: operation.into(),
            backend,
            reduction,
            pass,
        }
    }

    /// Create a generic operation error
    pub fn operation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        KernelError::Operation {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_out_of_range_display() {
        let err = KernelError::axis_out_of_range("segment_reduce", -3, 2);

        let msg = format!("{}", err);
        assert!(msg.contains("segment_reduce"));
        assert!(msg.contains("axis -3"));
        assert!(msg.contains("rank 2"));
    }

    #[test]
    fn test_segment_length_mismatch_display() {
        let err = KernelError::segment_length_mismatch("segment_reduce", 6, 5, 0);

        let msg = format!("{}", err);
        assert!(msg.contains("sum to 5"));
        assert!(msg.contains("axis 0"));
        assert!(msg.contains("extent 6"));
    }

    #[test]
    fn test_unsupported_backend_display() {
        let err = KernelError::unsupported_backend(
            "segment_reduce",
            Backend::Gpu,
            SegmentReduction::Mean,
            Pass::Forward,
        );

        let msg = format!("{}", err);
        assert!(msg.contains("mean"));
        assert!(msg.contains("forward"));
        assert!(msg.contains("GPU"));
    }

    #[test]
    fn test_operation_display() {
        let err = KernelError::operation("segment_reduce", "lengths slice was empty");

        let msg = format!("{}", err);
        assert!(msg.contains("segment_reduce"));
        assert!(msg.contains("lengths slice was empty"));
    }
}
