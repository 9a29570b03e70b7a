use crate::Shape;

/// Arbitrarily deep nested numeric data, e.g. `Vec<Vec<f32>>`.
///
/// Recursion over the nesting depth happens at compile time: primitive
/// numbers are the rank-0 leaves and `Vec<T>` / `[T]` add one axis per
/// level. Flattening visits leaves depth-first, left to right.
pub trait Nested {
    type Scalar: Copy;

    /// Total number of scalar leaves. Used to pre-size the flat buffer.
    fn element_count(&self) -> usize;

    /// Appends all leaves to `out` in depth-first, left-to-right order.
    fn flatten_into(&self, out: &mut Vec<Self::Scalar>);

    /// Appends this level's extent, then recurses into the first
    /// element only. Siblings are not checked, so jagged input yields
    /// dimensions that describe only the first branch.
    fn dimensions_into(&self, dims: &mut Vec<i64>);
}

macro_rules! impl_nested_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Nested for $ty {
            type Scalar = $ty;

            fn element_count(&self) -> usize {
                1
            }

            fn flatten_into(&self, out: &mut Vec<Self::Scalar>) {
                out.push(*self);
            }

            fn dimensions_into(&self, _dims: &mut Vec<i64>) {}
        }
    )*};
}

impl_nested_scalar!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64);

impl<T: Nested> Nested for [T] {
    type Scalar = T::Scalar;

    fn element_count(&self) -> usize {
        self.iter().map(Nested::element_count).sum()
    }

    fn flatten_into(&self, out: &mut Vec<Self::Scalar>) {
        for item in self {
            item.flatten_into(out);
        }
    }

    fn dimensions_into(&self, dims: &mut Vec<i64>) {
        dims.push(self.len() as i64);
        if let Some(first) = self.first() {
            first.dimensions_into(dims);
        }
    }
}

impl<T: Nested> Nested for Vec<T> {
    type Scalar = T::Scalar;

    fn element_count(&self) -> usize {
        self.as_slice().element_count()
    }

    fn flatten_into(&self, out: &mut Vec<Self::Scalar>) {
        self.as_slice().flatten_into(out);
    }

    fn dimensions_into(&self, dims: &mut Vec<i64>) {
        self.as_slice().dimensions_into(dims);
    }
}

/// Number of scalar leaves in `value`.
pub fn element_count<T: Nested + ?Sized>(value: &T) -> usize {
    value.element_count()
}

/// Flattens `value` into a single contiguous buffer, leaves in
/// depth-first, left-to-right order. A scalar yields a one-element
/// buffer.
pub fn flatten<T: Nested + ?Sized>(value: &T) -> Vec<T::Scalar> {
    let mut out = Vec::with_capacity(value.element_count());
    value.flatten_into(&mut out);
    out
}

/// Infers the per-axis extents of `value`, outermost first.
///
/// A scalar has rank 0, an empty sequence is `[0]`, and otherwise the
/// result is `[len]` followed by the dimensions of the first element.
/// Only the first element per level is inspected; rectangularity is
/// the caller's responsibility.
pub fn dimensions<T: Nested + ?Sized>(value: &T) -> Shape {
    let mut dims = Vec::new();
    value.dimensions_into(&mut dims);
    Shape(dims.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_count_scalar_and_flat() {
        assert_eq!(element_count(&42i32), 1);
        assert_eq!(element_count(&vec![1.23f32, 2.34]), 2);
        assert_eq!(element_count(&Vec::<i32>::new()), 0);
    }

    #[test]
    fn element_count_nested() {
        assert_eq!(element_count(&vec![vec![1, 2], vec![3, 4, 5]]), 5);
        let three_deep = vec![vec![vec![1.0f32, 2.0], vec![3.0]], vec![vec![4.0, 5.0, 6.0]]];
        assert_eq!(element_count(&three_deep), 6);
    }

    #[test]
    fn flatten_scalar() {
        assert_eq!(flatten(&42i32), vec![42]);
    }

    #[test]
    fn flatten_one_level() {
        assert_eq!(flatten(&vec![1.5f32, 2.5, 3.5]), vec![1.5, 2.5, 3.5]);
        assert!(flatten(&Vec::<i32>::new()).is_empty());
    }

    #[test]
    fn flatten_preserves_leaf_order() {
        assert_eq!(flatten(&vec![vec![1, 2], vec![3, 4, 5]]), vec![1, 2, 3, 4, 5]);
        let three_deep = vec![vec![vec![1.0f32, 2.0], vec![3.0]], vec![vec![4.0, 5.0, 6.0]]];
        assert_eq!(flatten(&three_deep), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn flatten_length_matches_element_count() {
        let jagged = vec![vec![vec![1u8], vec![2, 3]], vec![], vec![vec![4, 5, 6]]];
        assert_eq!(flatten(&jagged).len(), element_count(&jagged));
    }

    #[test]
    fn dimensions_scalar_is_rank_zero() {
        assert_eq!(dimensions(&42i32), Shape::default());
    }

    #[test]
    fn dimensions_flat_and_empty() {
        assert_eq!(dimensions(&vec![1.5f32, 2.5, 3.5]), Shape::from_slice(&[3]));
        assert_eq!(dimensions(&Vec::<i32>::new()), Shape::from_slice(&[0]));
    }

    #[test]
    fn dimensions_rectangular() {
        assert_eq!(
            dimensions(&vec![vec![1, 2, 3], vec![4, 5, 6]]),
            Shape::from_slice(&[2, 3])
        );
        let three_deep = vec![
            vec![vec![1.0f32, 2.0], vec![3.0, 4.0]],
            vec![vec![5.0, 6.0], vec![7.0, 8.0]],
        ];
        assert_eq!(dimensions(&three_deep), Shape::from_slice(&[2, 2, 2]));
    }

    #[test]
    fn dimensions_jagged_follows_first_branch() {
        // Only the first branch is inspected; the second row's true
        // length of 3 is ignored.
        assert_eq!(
            dimensions(&vec![vec![1, 2], vec![3, 4, 5]]),
            Shape::from_slice(&[2, 2])
        );
    }
}
