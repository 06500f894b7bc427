//! Compute backend capability model
//!
//! Backends do not all implement every reduction/pass combination. Rather
//! than failing deep inside a dispatch path (or silently falling back),
//! callers query [`Backend::supports`] and branch deterministically; the
//! dispatching entry points check the same table and fail fast with
//! [`KernelError::UnsupportedBackend`].
//!
//! The GPU backend currently stages through the host execution path behind
//! the capability gate, so the supported subset produces identical results
//! on both backends.

use crate::error::{KernelError, KernelResult};
use crate::segment::{segment_reduce, SegmentReduction};
use scirs2_core::ndarray_ext::{Array, ArrayView, IxDyn};
use scirs2_core::numeric::Float;
use std::fmt;

/// Compute backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Host CPU (always available, full coverage)
    Cpu,
    /// Accelerator backend; currently limited to max forward
    Gpu,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Cpu => write!(f, "CPU"),
            Backend::Gpu => write!(f, "GPU"),
        }
    }
}

/// Which half of the operator contract is being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Forward evaluation
    Forward,
    /// Gradient (VJP) evaluation
    Backward,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Forward => write!(f, "forward"),
            Pass::Backward => write!(f, "backward"),
        }
    }
}

impl Backend {
    /// Query whether this backend implements a reduction/pass combination
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseg_kernels::{Backend, Pass, SegmentReduction};
    ///
    /// assert!(Backend::Cpu.supports(SegmentReduction::Mean, Pass::Backward));
    /// assert!(Backend::Gpu.supports(SegmentReduction::Max, Pass::Forward));
    /// assert!(!Backend::Gpu.supports(SegmentReduction::Mean, Pass::Forward));
    /// assert!(!Backend::Gpu.supports(SegmentReduction::Max, Pass::Backward));
    /// ```
    pub fn supports(&self, reduction: SegmentReduction, pass: Pass) -> bool {
        match self {
            Backend::Cpu => true,
            Backend::Gpu => matches!((reduction, pass), (SegmentReduction::Max, Pass::Forward)),
        }
    }
}

/// Compute a segmented reduction on a specific backend
///
/// Identical contract to [`segment_reduce`], with a capability check first:
/// a reduction the backend does not implement fails with
/// [`KernelError::UnsupportedBackend`] before touching the data.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use tenseg_kernels::{segment_reduce_on, Backend, SegmentReduction};
///
/// let data = Array::from_shape_vec(vec![3], vec![1.0, 4.0, 2.0]).unwrap();
///
/// let out = segment_reduce_on(
///     Backend::Gpu,
///     &data.view(),
///     SegmentReduction::Max,
///     &[3],
///     0,
///     false,
///     0.0,
/// )
/// .unwrap();
/// assert_eq!(out[[0]], 4.0);
///
/// let err = segment_reduce_on(
///     Backend::Gpu,
///     &data.view(),
///     SegmentReduction::Mean,
///     &[3],
///     0,
///     false,
///     0.0,
/// );
/// assert!(err.is_err());
/// ```
#[allow(clippy::too_many_arguments)]
pub fn segment_reduce_on<T>(
    backend: Backend,
    data: &ArrayView<T, IxDyn>,
    reduction: SegmentReduction,
    lengths: &[usize],
    axis: isize,
    unchecked: bool,
    initial: T,
) -> KernelResult<Array<T, IxDyn>>
where
    T: Float,
{
    if !backend.supports(reduction, Pass::Forward) {
        return Err(KernelError::unsupported_backend(
            "segment_reduce",
            backend,
            reduction,
            Pass::Forward,
        ));
    }
    segment_reduce(data, reduction, lengths, axis, unchecked, initial)
}
