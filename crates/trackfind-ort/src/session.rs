use std::path::Path;

use anyhow::{bail, Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::tensor::TensorElementType;
use ort::value::ValueType;
use tracing::{debug, error};
use trackfind_core::{DType, Shape, TensorInfo};

/// Owns a loaded ONNX model and its derived input/output schema.
///
/// Constructed unloaded; `load` binds a model file and populates the
/// schema. Not safe to share across threads without external
/// serialization; the recommended discipline is one session per worker.
pub struct OnnxModel {
    name: String,
    pub(crate) session: Option<Session>,
    pub(crate) inputs: Vec<TensorInfo>,
    pub(crate) outputs: Vec<TensorInfo>,
}

impl OnnxModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            session: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// Declared input slots, in engine-reported order.
    pub fn inputs(&self) -> &[TensorInfo] {
        &self.inputs
    }

    /// Declared output slots, in engine-reported order.
    pub fn outputs(&self) -> &[TensorInfo] {
        &self.outputs
    }

    /// Loads the model at `path`, replacing any previously loaded one.
    ///
    /// Never propagates a load failure: on error the diagnostic is
    /// logged, the session is left unloaded with cleared schema, and
    /// `false` is returned.
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        self.unload();
        let path = path.as_ref();
        match self.open(path) {
            Ok(()) => {
                debug!(model = %self.name, path = %path.display(), "loaded ONNX model");
                true
            }
            Err(err) => {
                error!(
                    model = %self.name,
                    path = %path.display(),
                    error = ?err,
                    "failed to load ONNX model"
                );
                self.unload();
                false
            }
        }
    }

    /// Releases the native handle and clears the schema. Idempotent.
    pub fn unload(&mut self) {
        self.session = None;
        self.inputs.clear();
        self.outputs.clear();
    }

    fn open(&mut self, path: &Path) -> Result<()> {
        // One intra-op thread and the extended optimization level keep
        // per-call latency deterministic for a synchronous per-event
        // pipeline stage.
        let session = Session::builder()
            .context("failed to create ORT session builder")?
            .with_optimization_level(GraphOptimizationLevel::Level2)
            .context("failed to configure graph optimization level")?
            .with_intra_threads(1)
            .context("failed to configure intra-op threads")?
            .commit_from_file(path)
            .context("failed to load ONNX model")?;

        self.inputs = session
            .inputs
            .iter()
            .map(|input| tensor_info(&input.name, &input.input_type))
            .collect::<Result<Vec<_>>>()?;
        self.outputs = session
            .outputs
            .iter()
            .map(|output| tensor_info(&output.name, &output.output_type))
            .collect::<Result<Vec<_>>>()?;
        self.session = Some(session);

        Ok(())
    }
}

fn tensor_info(name: &str, value_type: &ValueType) -> Result<TensorInfo> {
    let ValueType::Tensor { ty, shape, .. } = value_type else {
        bail!("unsupported non-tensor IO value type for {name}");
    };

    Ok(TensorInfo {
        name: name.to_string(),
        dtype: dtype_from_element(*ty)?,
        // Dynamic axes stay as -1, matching the engine's report.
        shape: Shape(shape.iter().copied().collect()),
    })
}

pub(crate) fn dtype_from_element(ty: TensorElementType) -> Result<DType> {
    match ty {
        TensorElementType::Float32 => Ok(DType::F32),
        TensorElementType::Float16 => Ok(DType::F16),
        TensorElementType::Int64 => Ok(DType::I64),
        TensorElementType::Int32 => Ok(DType::I32),
        TensorElementType::Uint8 => Ok(DType::U8),
        _ => bail!("unsupported tensor element type: {ty}"),
    }
}
