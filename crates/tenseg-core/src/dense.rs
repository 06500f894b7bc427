//! Dense tensor implementation
//!
//! This module provides the core `DenseND<T>` type for dense N-dimensional
//! tensor storage. It is a thin, tensor-flavored wrapper over
//! `scirs2_core::ndarray_ext` arrays with dynamic dimensionality.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`. Direct use of
//! `ndarray` or `num_traits` is forbidden per SCIRS2_INTEGRATION_POLICY.md

use scirs2_core::ndarray_ext::{Array, ArrayView, ArrayViewMut, IxDyn};
use scirs2_core::numeric::Num;
use std::fmt;

/// Dense N-dimensional tensor backed by scirs2_core's ndarray
///
/// This is the primary dense tensor type in TenSeg. Kernels operate on views
/// obtained via [`DenseND::view`]; the owning type handles storage, shape
/// queries and element access.
///
/// # Type Parameters
///
/// * `T` - The element type (typically `f32` or `f64`)
///
/// # Memory Layout
///
/// Tensors are C-contiguous (row-major). Views handed to kernels may slice
/// and stride freely without copying.
///
/// # Examples
///
/// ```
/// use tenseg_core::dense::DenseND;
///
/// let tensor = DenseND::<f64>::zeros(&[4, 6]);
/// assert_eq!(tensor.shape(), &[4, 6]);
/// assert_eq!(tensor.rank(), 2);
/// ```
#[derive(Clone)]
pub struct DenseND<T> {
    /// Underlying ndarray storage (via scirs2_core)
    pub(crate) data: Array<T, IxDyn>,
}

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Create a tensor from an existing ndarray
    ///
    /// # Arguments
    ///
    /// * `array` - The source array with dynamic dimension
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::Array;
    /// use tenseg_core::dense::DenseND;
    ///
    /// let arr = Array::<f64, _>::zeros(vec![2, 3]);
    /// let tensor = DenseND::from_array(arr);
    /// assert_eq!(tensor.shape(), &[2, 3]);
    /// ```
    pub fn from_array(array: Array<T, IxDyn>) -> Self {
        Self { data: array }
    }

    /// Create a tensor from a vector with given shape
    ///
    /// # Arguments
    ///
    /// * `vec` - Flattened data in row-major order
    /// * `shape` - Target shape
    ///
    /// # Returns
    ///
    /// A tensor with the specified shape, or an error if dimensions don't match
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseg_core::dense::DenseND;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    /// let tensor = DenseND::from_vec(data, &[6]).unwrap();
    /// assert_eq!(tensor.shape(), &[6]);
    /// ```
    pub fn from_vec(vec: Vec<T>, shape: &[usize]) -> anyhow::Result<Self> {
        let total: usize = shape.iter().product();
        if vec.len() != total {
            anyhow::bail!(
                "Shape {:?} requires {} elements, but got {}",
                shape,
                total,
                vec.len()
            );
        }
        let array = Array::from_shape_vec(IxDyn(shape), vec)?;
        Ok(Self { data: array })
    }

    /// Create a tensor filled with a specific value
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseg_core::dense::DenseND;
    ///
    /// let tensor = DenseND::from_elem(&[2, 3], 5.0);
    /// assert_eq!(tensor[&[1, 2]], 5.0);
    /// ```
    pub fn from_elem(shape: &[usize], value: T) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    /// Create a tensor of zeros
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseg_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3]);
    /// assert_eq!(tensor[&[0, 0]], 0.0);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// Create a tensor of ones
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseg_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::ones(&[2, 3]);
    /// assert_eq!(tensor[&[1, 1]], 1.0);
    /// ```
    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: Array::ones(IxDyn(shape)),
        }
    }

    /// Get the rank (number of dimensions) of this tensor
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Get the shape of this tensor
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseg_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f32>::zeros(&[2, 3, 4]);
    /// assert_eq!(tensor.shape(), &[2, 3, 4]);
    /// ```
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Get the total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the tensor has no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a reference to the underlying array
    pub fn as_array(&self) -> &Array<T, IxDyn> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn as_array_mut(&mut self) -> &mut Array<T, IxDyn> {
        &mut self.data
    }

    /// Get an immutable view of the tensor
    pub fn view(&self) -> ArrayView<'_, T, IxDyn> {
        self.data.view()
    }

    /// Get a mutable view of the tensor
    pub fn view_mut(&mut self) -> ArrayViewMut<'_, T, IxDyn> {
        self.data.view_mut()
    }

    /// Get an element at the specified index without panicking.
    ///
    /// Returns `None` if the index is out of bounds or has incorrect
    /// dimensionality.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseg_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::from_elem(&[3, 4], 5.0);
    ///
    /// assert_eq!(tensor.get(&[2, 3]), Some(&5.0));
    /// assert_eq!(tensor.get(&[10, 10]), None);
    /// assert_eq!(tensor.get(&[0]), None);
    /// ```
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.rank() {
            return None;
        }
        for (i, &idx) in index.iter().enumerate() {
            if idx >= self.shape()[i] {
                return None;
            }
        }
        Some(&self.data[IxDyn(index)])
    }

    /// Get a mutable reference to an element at the specified index without
    /// panicking.
    ///
    /// Returns `None` if the index is out of bounds or has incorrect
    /// dimensionality.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseg_core::DenseND;
    ///
    /// let mut tensor = DenseND::<f64>::zeros(&[3, 4]);
    /// if let Some(elem) = tensor.get_mut(&[1, 2]) {
    ///     *elem = 42.0;
    /// }
    /// assert_eq!(tensor[&[1, 2]], 42.0);
    /// ```
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        if index.len() != self.rank() {
            return None;
        }
        let shape = self.shape().to_vec();
        for (i, &idx) in index.iter().enumerate() {
            if idx >= shape[i] {
                return None;
            }
        }
        Some(&mut self.data[IxDyn(index)])
    }

    /// Get a reference to the underlying data as a slice
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseg_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::ones(&[2, 3]);
    /// assert_eq!(tensor.as_slice().len(), 6);
    /// ```
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice().expect("Data should be contiguous")
    }

    /// Get a mutable reference to the underlying data as a slice
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseg_core::dense::DenseND;
    ///
    /// let mut tensor = DenseND::<f64>::zeros(&[2, 2]);
    /// tensor.as_slice_mut()[3] = 9.0;
    /// assert_eq!(tensor[&[1, 1]], 9.0);
    /// ```
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        self.data
            .as_slice_mut()
            .expect("Data should be contiguous")
    }
}

impl<T> std::ops::Index<&[usize]> for DenseND<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &Self::Output {
        &self.data[IxDyn(index)]
    }
}

impl<T> std::ops::IndexMut<&[usize]> for DenseND<T> {
    fn index_mut(&mut self, index: &[usize]) -> &mut Self::Output {
        &mut self.data[IxDyn(index)]
    }
}

impl<T: fmt::Debug + Clone + Num> fmt::Debug for DenseND<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseND")
            .field("shape", &self.shape())
            .field("data", &self.data)
            .finish()
    }
}
