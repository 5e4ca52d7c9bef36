//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use hybrid_ir::{Circuit, CircuitDescription};
use hybrid_qasm3::EmitterConfig;
use hybrid_sa::BackendProfile;

/// Deserialize a YAML or JSON file, chosen by extension (JSON by default).
fn load_document<T: DeserializeOwned>(path: &str) -> Result<T> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let ext = path_obj.extension().and_then(|e| e.to_str()).unwrap_or("");
    debug!(path, ext, bytes = source.len(), "Loading document");

    match ext.to_lowercase().as_str() {
        "yaml" | "yml" => {
            serde_yaml_ng::from_str(&source).with_context(|| format!("Invalid YAML in {path}"))
        }
        _ => serde_json::from_str(&source).with_context(|| format!("Invalid JSON in {path}")),
    }
}

/// Load and normalize a circuit description.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let mut desc: CircuitDescription = load_document(path)?;
    if desc.name.is_empty() {
        desc.name = Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    let circuit = Circuit::from_description(&desc)?;
    debug!(
        circuit = circuit.name(),
        wires = circuit.num_wires(),
        operations = circuit.operations().len(),
        measurements = circuit.measurements().len(),
        "Normalized circuit"
    );
    Ok(circuit)
}

/// Load an emitter configuration file.
pub fn load_config(path: &str) -> Result<EmitterConfig> {
    load_document(path)
}

/// Resolve a backend preset name or profile file.
pub fn load_backend(spec: &str) -> Result<BackendProfile> {
    match spec.to_lowercase().as_str() {
        "qubit" | "qubit-only" => Ok(BackendProfile::qubit_only("qubit")),
        "hybrid" => Ok(BackendProfile::hybrid("hybrid")),
        "fock" | "fock-only" => Ok(BackendProfile::fock_only("fock")),
        _ if Path::new(spec).exists() => load_document(spec),
        other => {
            anyhow::bail!(
                "Unknown backend: '{other}'. Available: qubit, hybrid, fock, or a profile file"
            );
        }
    }
}
