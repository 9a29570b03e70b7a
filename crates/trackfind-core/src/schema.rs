use crate::{DType, Shape};

/// One named input or output slot of a loaded model, in declaration
/// order. The position in the session's input/output list is the
/// binding key when constructing or consuming tensors.
#[derive(Clone, Debug)]
pub struct TensorInfo {
    pub name: String,
    pub dtype: DType,
    pub shape: Shape,
}
