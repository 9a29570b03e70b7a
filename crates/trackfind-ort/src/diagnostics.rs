use std::io::{self, Write};

use crate::session::OnnxModel;

impl OnnxModel {
    /// Writes a human-readable summary of the loaded model to `out`:
    /// session name plus the declared inputs and outputs with their
    /// shapes. Informational only; the format is not a stable contract.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if !self.is_loaded() {
            return writeln!(out, "Model not loaded");
        }

        writeln!(out, "=== ONNX Model Information ===")?;
        writeln!(out, "Session: {}", self.name())?;

        writeln!(out, "Inputs ({}):", self.inputs.len())?;
        for (i, info) in self.inputs.iter().enumerate() {
            writeln!(out, "  [{i}] {} - Shape: {}", info.name, info.shape)?;
        }

        writeln!(out, "Outputs ({}):", self.outputs.len())?;
        for (i, info) in self.outputs.iter().enumerate() {
            writeln!(out, "  [{i}] {} - Shape: {}", info.name, info.shape)?;
        }

        writeln!(out, "==============================")
    }
}
