//! Vector-Jacobian Product (VJP) rule for segmented reductions
//!
//! For a forward operation `y = segment_reduce(x, ...)`, the VJP computes
//! `∂L/∂x` from the incoming cotangent `∂L/∂y` (one value per segment,
//! per lane).
//!
//! # Gradient semantics
//!
//! - **Mean**: every element of segment `i` receives `g_i / L_i`. This holds
//!   even for segments containing NaN; the sensitivity of a mean to each
//!   addend is `1/L` regardless of the other addends' values.
//! - **Max**: the cotangent is distributed equally over *all* elements
//!   attaining the segment maximum (an equality mask, not a single argmax).
//!   Elements below the maximum receive zero. When the segment maximum is
//!   NaN, the NaN-valued elements share the cotangent equally and every
//!   finite element receives zero.
//! - **Empty segments**: no elements, no gradient flow; their output is the
//!   initial value, which has zero sensitivity to the data.

use anyhow::{anyhow, Result};
use scirs2_core::ndarray_ext::{s, Array, ArrayView, Axis, IxDyn, Zip};
use scirs2_core::numeric::Float;
use tenseg_core::DenseND;
use tenseg_kernels::{
    resolve_axis, segment_offsets, Backend, KernelError, Pass, SegmentReduction,
};

/// Trait for operations that support VJP (backward differentiation)
pub trait VjpOp<T>
where
    T: Float,
{
    /// Compute the VJP (backward pass) given the output gradient
    ///
    /// # Arguments
    ///
    /// * `output_grad` - Gradient w.r.t. the output (∂L/∂output)
    ///
    /// # Returns
    ///
    /// Gradients w.r.t. each input, in input order
    fn vjp(&self, output_grad: &DenseND<T>) -> Result<Vec<DenseND<T>>>;
}

/// VJP context for segmented reductions
///
/// Stores the forward-pass input and segmentation needed for the backward
/// computation. The constructor performs the same axis resolution and
/// lengths validation as the forward kernel.
///
/// # Example
///
/// ```
/// use tenseg_ad::vjp::{SegmentReduceVjp, VjpOp};
/// use tenseg_core::DenseND;
/// use tenseg_kernels::SegmentReduction;
///
/// let data = DenseND::from_vec(vec![1.0, 2.0, 4.0, 4.0], &[4]).unwrap();
/// let rule = SegmentReduceVjp::new(data, SegmentReduction::Max, &[1, 3], 0, false).unwrap();
///
/// // Upstream gradient of a sum loss: ones, one per segment.
/// let upstream = DenseND::ones(&[2]);
/// let grads = rule.vjp(&upstream).unwrap();
///
/// // Segment [2, 4, 4] has two tied maxima sharing the gradient.
/// assert_eq!(grads[0].as_slice(), &[1.0, 0.0, 0.5, 0.5]);
/// ```
pub struct SegmentReduceVjp<T>
where
    T: Float,
{
    /// Input tensor saved from the forward pass
    input: DenseND<T>,
    /// Reduction mode of the forward pass
    reduction: SegmentReduction,
    /// Per-segment lengths
    lengths: Vec<usize>,
    /// Resolved (non-negative) segmentation axis
    axis: usize,
}

impl<T> SegmentReduceVjp<T>
where
    T: Float,
{
    /// Create a VJP context for a segmented reduction
    ///
    /// # Errors
    ///
    /// Fails like the forward kernel: [`KernelError::AxisOutOfRange`] for a
    /// bad axis, [`KernelError::SegmentLengthMismatch`] when `lengths` does
    /// not tile the axis and `unchecked` is false.
    pub fn new(
        input: DenseND<T>,
        reduction: SegmentReduction,
        lengths: &[usize],
        axis: isize,
        unchecked: bool,
    ) -> Result<Self> {
        let resolved = resolve_axis(axis, input.rank(), "segment_reduce_grad")?;
        if !unchecked {
            let extent = input.shape()[resolved];
            let total: usize = lengths.iter().sum();
            if total != extent {
                return Err(KernelError::segment_length_mismatch(
                    "segment_reduce_grad",
                    extent,
                    total,
                    resolved,
                )
                .into());
            }
        }
        Ok(Self {
            input,
            reduction,
            lengths: lengths.to_vec(),
            axis: resolved,
        })
    }

    /// Create a VJP context for a specific backend
    ///
    /// Checks the backend's backward capability first; backends without a
    /// backward implementation for this reduction fail with
    /// [`KernelError::UnsupportedBackend`] instead of silently computing on
    /// the host.
    pub fn for_backend(
        backend: Backend,
        input: DenseND<T>,
        reduction: SegmentReduction,
        lengths: &[usize],
        axis: isize,
        unchecked: bool,
    ) -> Result<Self> {
        if !backend.supports(reduction, Pass::Backward) {
            return Err(KernelError::unsupported_backend(
                "segment_reduce_grad",
                backend,
                reduction,
                Pass::Backward,
            )
            .into());
        }
        Self::new(input, reduction, lengths, axis, unchecked)
    }

    /// The resolved segmentation axis
    pub fn axis(&self) -> usize {
        self.axis
    }
}

impl<T> VjpOp<T> for SegmentReduceVjp<T>
where
    T: Float,
{
    fn vjp(&self, output_grad: &DenseND<T>) -> Result<Vec<DenseND<T>>> {
        let grad = segment_reduce_grad(
            &self.input.view(),
            self.reduction,
            &self.lengths,
            self.axis as isize,
            &output_grad.view(),
        )?;
        Ok(vec![DenseND::from_array(grad)])
    }
}

/// Compute the gradient of a segmented reduction w.r.t. its data input
///
/// `output_grad` must have the shape of the forward output: the shape of
/// `data` with the segmented axis extent replaced by `lengths.len()`.
/// The returned gradient has the shape of `data`; elements outside every
/// segment (possible only when the forward ran unchecked with short
/// lengths) receive zero.
///
/// # Errors
///
/// * [`KernelError::AxisOutOfRange`] - `axis` does not resolve
/// * Shape mismatch between `output_grad` and the expected output shape
pub fn segment_reduce_grad<T>(
    data: &ArrayView<T, IxDyn>,
    reduction: SegmentReduction,
    lengths: &[usize],
    axis: isize,
    output_grad: &ArrayView<T, IxDyn>,
) -> Result<Array<T, IxDyn>>
where
    T: Float,
{
    let ax = resolve_axis(axis, data.ndim(), "segment_reduce_grad")?;

    let mut expected_shape = data.shape().to_vec();
    expected_shape[ax] = lengths.len();
    if output_grad.shape() != expected_shape.as_slice() {
        return Err(anyhow!(
            "Output gradient shape {:?} doesn't match expected {:?}",
            output_grad.shape(),
            expected_shape
        ));
    }

    let offsets = segment_offsets(lengths);
    let mut grad = Array::zeros(IxDyn(data.shape()));

    Zip::from(grad.lanes_mut(Axis(ax)))
        .and(data.lanes(Axis(ax)))
        .and(output_grad.lanes(Axis(ax)))
        .for_each(|mut grad_lane, data_lane, up_lane| {
            for (i, &len) in lengths.iter().enumerate() {
                if len == 0 {
                    continue;
                }
                let g = up_lane[i];
                let seg = data_lane.slice(s![offsets[i]..offsets[i] + len]);
                let mut gseg = grad_lane.slice_mut(s![offsets[i]..offsets[i] + len]);

                match reduction {
                    SegmentReduction::Mean => {
                        let share = g / T::from(len).unwrap();
                        gseg.fill(share);
                    }
                    SegmentReduction::Max => {
                        // NaN-dominant segment maximum, matching the forward.
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

                        // Equality mask over the maximum; ties share equally.
                        // When the maximum is NaN, the mask selects the NaN
                        // elements instead.
                        let attains = |v: T| {
                            if best.is_nan() {
                                v.is_nan()
                            } else {
                                v == best
                            }
                        };
                        let ties = seg.iter().filter(|&&v| attains(v)).count();
                        let share = g / T::from(ties).unwrap();
                        for (gv, &v) in gseg.iter_mut().zip(seg.iter()) {
                            if attains(v) {
                                *gv = share;
                            }
                        }
                    }
                }
            }
        });

    Ok(grad)
}
