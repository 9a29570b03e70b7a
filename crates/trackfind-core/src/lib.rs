pub mod features;
pub mod nested;
pub mod schema;

pub use features::*;
pub use nested::*;
pub use schema::*;

use std::fmt;

use smallvec::SmallVec;

/// Element type of a tensor, as reported by the inference engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DType {
    F32,
    F16,
    I64,
    I32,
    U8,
}

/// Per-axis extents of a tensor, outermost axis first.
///
/// Axes reported by the engine may be dynamic, encoded as `-1`. Shapes
/// inferred from nested input data are always concrete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shape(pub SmallVec<[i64; 6]>);

impl Shape {
    pub fn from_slice(dims: &[i64]) -> Self {
        Self(dims.iter().copied().collect())
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements implied by the shape. A rank-0 shape
    /// holds one element; dynamic axes count as zero.
    pub fn numel(&self) -> usize {
        self.0.iter().map(|d| (*d).max(0) as usize).product()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn is_dynamic(&self) -> bool {
        self.0.iter().any(|d| *d < 0)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dim}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_numel() {
        assert_eq!(Shape::default().numel(), 1);
        assert_eq!(Shape::from_slice(&[0]).numel(), 0);
        assert_eq!(Shape::from_slice(&[2, 3]).numel(), 6);
        assert_eq!(Shape::from_slice(&[-1, 4]).numel(), 0);
    }

    #[test]
    fn shape_display() {
        assert_eq!(Shape::default().to_string(), "[]");
        assert_eq!(Shape::from_slice(&[2, 3]).to_string(), "[2, 3]");
        assert_eq!(Shape::from_slice(&[-1, 4]).to_string(), "[-1, 4]");
    }

    #[test]
    fn shape_dynamic() {
        assert!(Shape::from_slice(&[-1, 4]).is_dynamic());
        assert!(!Shape::from_slice(&[2, 4]).is_dynamic());
    }
}
