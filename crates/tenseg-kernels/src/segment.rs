//! Segmented reduction along a tensor axis
//!
//! A segmented reduction collapses contiguous runs of elements ("segments")
//! along one axis into a single value per run. The segmentation is given as
//! a sequence of per-segment lengths whose cumulative offsets tile the axis
//! in order. Zero-length segments are legal and produce a caller-supplied
//! initial value.
//!
//! The reduction applies independently to every 1-D lane along the axis, so
//! the output keeps the input's shape except that the segmented axis extent
//! becomes the number of segments.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{s, Array, ArrayView, ArrayView1, Axis, IxDyn, Zip};
use scirs2_core::numeric::Float;
use std::fmt;

/// Reduction mode applied within each segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentReduction {
    /// Maximum over the segment; NaN dominates the comparison
    Max,
    /// Arithmetic mean over the segment; NaN propagates through the sum
    Mean,
}

impl fmt::Display for SegmentReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentReduction::Max => write!(f, "max"),
            SegmentReduction::Mean => write!(f, "mean"),
        }
    }
}

/// Resolve a possibly-negative axis index against a tensor rank
///
/// Negative axes count from the end, so `-1` is the last axis.
///
/// # Errors
///
/// Returns [`KernelError::AxisOutOfRange`] if the axis does not resolve to a
/// valid dimension (this includes every axis of a rank-0 tensor).
///
/// # Examples
///
/// ```
/// use tenseg_kernels::resolve_axis;
///
/// assert_eq!(resolve_axis(0, 3, "segment_reduce").unwrap(), 0);
/// assert_eq!(resolve_axis(-1, 3, "segment_reduce").unwrap(), 2);
/// assert!(resolve_axis(3, 3, "segment_reduce").is_err());
/// assert!(resolve_axis(-4, 3, "segment_reduce").is_err());
/// ```
pub fn resolve_axis(axis: isize, rank: usize, operation: &str) -> KernelResult<usize> {
    let resolved = if axis < 0 { axis + rank as isize } else { axis };
    if resolved < 0 || resolved as usize >= rank {
        return Err(KernelError::axis_out_of_range(operation, axis, rank));
    }
    Ok(resolved as usize)
}

/// Compute the starting offset of each segment from its lengths
///
/// # Examples
///
/// ```
/// use tenseg_kernels::segment_offsets;
///
/// assert_eq!(segment_offsets(&[1, 2, 3, 0]), vec![0, 1, 3, 6]);
/// assert_eq!(segment_offsets(&[]), Vec::<usize>::new());
/// ```
pub fn segment_offsets(lengths: &[usize]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(lengths.len());
    let mut acc = 0;
    for &len in lengths {
        offsets.push(acc);
        acc += len;
    }
    offsets
}

/// Check that the lengths tile the segmented axis exactly
fn validate_lengths(
    lengths: &[usize],
    extent: usize,
    axis: usize,
    operation: &str,
) -> KernelResult<()> {
    let total: usize = lengths.iter().sum();
    if total != extent {
        return Err(KernelError::segment_length_mismatch(
            operation, extent, total, axis,
        ));
    }
    Ok(())
}

/// Reduce one non-empty segment slice to a scalar
///
/// NaN dominates both modes: for `Max` the accumulator is pinned to NaN as
/// soon as one is seen; for `Mean` the NaN rides through the sum.
fn reduce_segment<T>(reduction: SegmentReduction, seg: &ArrayView1<T>) -> T
where
    T: Float,
{
    match reduction {
        SegmentReduction::Max => {
            let mut best = seg[0];
            for &v in seg.iter().skip(1) {
                if v.is_nan() {
                    best = v;
                    break;
                }
                if v > best {
                    best = v;
                }
            }
            best
        }
        SegmentReduction::Mean => {
            let sum = seg.iter().fold(T::zero(), |acc, &v| acc + v);
            sum / T::from(seg.len()).unwrap()
        }
    }
}

/// Compute a segmented reduction along an axis
///
/// For each segment `i` with length `L_i`, the contiguous slice of `L_i`
/// elements at the segment's cumulative offset is reduced to one output
/// value. Zero-length segments produce `initial`. Any NaN inside a segment
/// makes that segment's output NaN, for both reductions.
///
/// # Arguments
///
/// * `data` - Input tensor
/// * `reduction` - Reduction mode ([`SegmentReduction::Max`] or [`SegmentReduction::Mean`])
/// * `lengths` - Per-segment lengths; their cumulative offsets tile the axis in order
/// * `axis` - Axis to segment (negative counts from the end)
/// * `unchecked` - Skip validation that `lengths` sums to the axis extent
/// * `initial` - Fill value for zero-length segments
///
/// # Returns
///
/// Tensor with the same shape as `data`, except the segmented axis extent
/// becomes `lengths.len()`. The element type is unchanged.
///
/// # Errors
///
/// * [`KernelError::AxisOutOfRange`] - `axis` does not resolve to a dimension
/// * [`KernelError::SegmentLengthMismatch`] - `lengths` does not sum to the
///   axis extent and `unchecked` is false
///
/// With `unchecked` set, the caller is trusted: lengths summing past the
/// axis extent cause a fail-stop panic on the out-of-range slice, and
/// lengths summing short silently ignore the trailing elements.
///
/// # Complexity
///
/// Time: O(tensor_size), one pass over the data.
/// Space: O(output_size).
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use tenseg_kernels::{segment_reduce, SegmentReduction};
///
/// let data = Array::from_shape_vec(vec![6], vec![1.0, f64::NAN, 3.0, 4.0, 5.0, 5.0]).unwrap();
///
/// let out = segment_reduce(&data.view(), SegmentReduction::Max, &[1, 2, 3, 0], 0, false, 0.0)
///     .unwrap();
/// assert_eq!(out.shape(), &[4]);
/// assert_eq!(out[[0]], 1.0);
/// assert!(out[[1]].is_nan());
/// assert_eq!(out[[2]], 5.0);
/// assert_eq!(out[[3]], 0.0); // empty segment filled with `initial`
/// ```
pub fn segment_reduce<T>(
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
    let ax = resolve_axis(axis, data.ndim(), "segment_reduce")?;
    if !unchecked {
        validate_lengths(lengths, data.shape()[ax], ax, "segment_reduce")?;
    }

    let offsets = segment_offsets(lengths);

    let mut out_shape = data.shape().to_vec();
    out_shape[ax] = lengths.len();
    // Pre-filling with `initial` makes empty segments a no-op in the lane loop.
    let mut out = Array::from_elem(IxDyn(&out_shape), initial);

    Zip::from(out.lanes_mut(Axis(ax)))
        .and(data.lanes(Axis(ax)))
        .for_each(|mut out_lane, data_lane| {
            for (i, &len) in lengths.iter().enumerate() {
                if len == 0 {
                    continue;
                }
                let seg = data_lane.slice(s![offsets[i]..offsets[i] + len]);
                out_lane[i] = reduce_segment(reduction, &seg);
            }
        });

    Ok(out)
}
