use anyhow::{bail, Context, Result};
use ort::session::SessionOutputs;
use ort::value::{TensorRef, ValueRef, ValueType};
use trackfind_core::{dimensions, flatten, DType, Nested, Shape};

use crate::session::{dtype_from_element, OnnxModel};

impl OnnxModel {
    /// Runs one synchronous forward pass over a caller-owned flat
    /// buffer with an explicit shape.
    ///
    /// The buffer is wrapped in a zero-copy tensor view and bound to
    /// the model's first declared input slot; nothing is copied on the
    /// input side. The returned [`Outputs`] borrow the session, so the
    /// handles stay valid exactly until the next call on this session.
    pub fn run<'s>(&'s mut self, data: &[f32], shape: &[i64]) -> Result<Outputs<'s>> {
        let session = self.session.as_mut().context("model not loaded")?;
        let slot = self.inputs.first().context("model declares no inputs")?;

        let view = TensorRef::from_array_view((shape.to_vec(), data))
            .context("failed to create input tensor view")?;

        let raw = session
            .run(ort::inputs![slot.name.as_str() => view])
            .context("inference failed")?;

        Ok(Outputs { raw })
    }

    /// Convenience entry: derives shape and flat buffer from a nested
    /// container and delegates to [`OnnxModel::run`].
    ///
    /// The length-versus-shape check is a fail-fast sanity assertion
    /// only; it fires for jagged input, where dimension inference
    /// follows the first branch.
    pub fn run_nested<'s, T>(&'s mut self, value: &T) -> Result<Outputs<'s>>
    where
        T: Nested<Scalar = f32> + ?Sized,
    {
        let shape = dimensions(value);
        let data = flatten(value);
        debug_assert_eq!(
            data.len(),
            shape.numel(),
            "flattened length does not match inferred shape {shape}"
        );
        self.run(&data, shape.as_slice())
    }
}

/// Output tensors of one forward pass.
///
/// The data is owned by the engine; the mutable borrow on the session
/// guarantees it cannot be invalidated by another call while these
/// handles are alive. Copy values out via [`OutputTensor::to_f32_vec`]
/// or [`OutputTensor::to_i64_vec`] to keep them longer.
#[derive(Debug)]
pub struct Outputs<'s> {
    raw: SessionOutputs<'s>,
}

impl<'s> Outputs<'s> {
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Output tensors in the model's declared order.
    pub fn iter(&self) -> impl Iterator<Item = OutputTensor<'_>> {
        self.raw
            .iter()
            .map(|(name, value)| OutputTensor { name, value })
    }

    /// Output at `index` in declaration order.
    pub fn get(&self, index: usize) -> Option<OutputTensor<'_>> {
        self.iter().nth(index)
    }

    pub fn get_named(&self, name: &str) -> Option<OutputTensor<'_>> {
        self.iter().find(|out| out.name == name)
    }
}

/// Borrowed handle to one engine-owned output tensor.
pub struct OutputTensor<'r> {
    name: &'r str,
    value: ValueRef<'r>,
}

impl OutputTensor<'_> {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn dtype(&self) -> Result<DType> {
        match self.value.dtype() {
            ValueType::Tensor { ty, .. } => dtype_from_element(*ty),
            other => bail!("non-tensor output {}: {other:?}", self.name),
        }
    }

    pub fn shape(&self) -> Shape {
        match self.value.dtype() {
            ValueType::Tensor { shape, .. } => Shape(shape.iter().copied().collect()),
            _ => Shape::default(),
        }
    }

    pub fn element_count(&self) -> usize {
        self.shape().numel()
    }

    /// Copies the tensor data into a caller-owned buffer.
    pub fn to_f32_vec(&self) -> Result<Vec<f32>> {
        let array = self
            .value
            .try_extract_array::<f32>()
            .with_context(|| format!("failed to extract f32 output {}", self.name))?;
        let slice = array.as_slice().context("non-contiguous output tensor")?;
        Ok(slice.to_vec())
    }

    pub fn to_i64_vec(&self) -> Result<Vec<i64>> {
        let array = self
            .value
            .try_extract_array::<i64>()
            .with_context(|| format!("failed to extract i64 output {}", self.name))?;
        let slice = array.as_slice().context("non-contiguous output tensor")?;
        Ok(slice.to_vec())
    }
}
