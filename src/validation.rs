//! Shape and length preconditions for array-like inputs.
//!
//! Metric functions accept anything implementing [`ArrayLike`]: slices,
//! vectors, fixed-size arrays, nested vectors and `ndarray` arrays of any
//! dimensionality. Inputs are checked here before any element-wise
//! computation so that a 2-D array or a length mismatch is reported as an
//! error instead of being silently truncated.

use std::borrow::Cow;

use ndarray::{ArrayBase, Data, Dimension};

use crate::error::{MetricsError, Result};

/// An input that exposes a shape and its elements in logical order.
pub trait ArrayLike<T: Clone> {
    /// Extent along each axis.
    fn shape(&self) -> Vec<usize>;

    /// All elements, flattened in logical (row-major) order.
    fn values(&self) -> Cow<'_, [T]>;
}

impl<T: Clone> ArrayLike<T> for [T] {
    fn shape(&self) -> Vec<usize> {
        vec![self.len()]
    }

    fn values(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self)
    }
}

impl<T: Clone> ArrayLike<T> for Vec<T> {
    fn shape(&self) -> Vec<usize> {
        vec![self.len()]
    }

    fn values(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<T: Clone, const N: usize> ArrayLike<T> for [T; N] {
    fn shape(&self) -> Vec<usize> {
        vec![N]
    }

    fn values(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.as_slice())
    }
}

/// Nested vectors are treated as a 2-D table: rows by the length of the
/// longest row.
impl<T: Clone> ArrayLike<T> for Vec<Vec<T>> {
    fn shape(&self) -> Vec<usize> {
        vec![self.len(), self.iter().map(Vec::len).max().unwrap_or(0)]
    }

    fn values(&self) -> Cow<'_, [T]> {
        Cow::Owned(self.iter().flatten().cloned().collect())
    }
}

impl<T, S, D> ArrayLike<T> for ArrayBase<S, D>
where
    T: Clone,
    S: Data<Elem = T>,
    D: Dimension,
{
    fn shape(&self) -> Vec<usize> {
        ArrayBase::shape(self).to_vec()
    }

    fn values(&self) -> Cow<'_, [T]> {
        match self.as_slice() {
            Some(slice) => Cow::Borrowed(slice),
            None => Cow::Owned(self.iter().cloned().collect()),
        }
    }
}

/// Fail with [`MetricsError::Shape`] unless `input` is exactly one-dimensional.
pub fn raise_for_non_vector<T, A>(input: &A) -> Result<()>
where
    T: Clone,
    A: ArrayLike<T> + ?Sized,
{
    let shape = ArrayLike::shape(input);
    if shape.len() != 1 {
        return Err(MetricsError::Shape { shape });
    }
    Ok(())
}

/// Fail with [`MetricsError::ShapeMismatch`] when the two inputs differ in shape.
pub fn raise_for_inconsistent_shapes<T, A, B>(left: &A, right: &B) -> Result<()>
where
    T: Clone,
    A: ArrayLike<T> + ?Sized,
    B: ArrayLike<T> + ?Sized,
{
    let left = ArrayLike::shape(left);
    let right = ArrayLike::shape(right);
    if left != right {
        return Err(MetricsError::ShapeMismatch { left, right });
    }
    Ok(())
}

/// Validate a single input and return its elements.
pub fn as_vector<T, A>(input: &A) -> Result<Cow<'_, [T]>>
where
    T: Clone,
    A: ArrayLike<T> + ?Sized,
{
    raise_for_non_vector(input)?;
    Ok(input.values())
}

/// Validate a pair of inputs and return their aligned elements.
///
/// Both inputs must be one-dimensional and of equal length.
pub fn paired_vectors<'a, T, A, B>(
    left: &'a A,
    right: &'a B,
) -> Result<(Cow<'a, [T]>, Cow<'a, [T]>)>
where
    T: Clone,
    A: ArrayLike<T> + ?Sized,
    B: ArrayLike<T> + ?Sized,
{
    raise_for_non_vector(left)?;
    raise_for_non_vector(right)?;
    raise_for_inconsistent_shapes(left, right)?;
    Ok((left.values(), right.values()))
}
