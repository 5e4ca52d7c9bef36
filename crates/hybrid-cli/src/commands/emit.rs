//! Emit command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use tracing::debug;

use hybrid_qasm3::{EmitterConfig, emit};
use hybrid_sa::analyze;

use super::common::{load_circuit, load_config};

/// Command-line settings that take precedence over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub strict: bool,
    pub no_rotations: bool,
    pub precision: Option<usize>,
    pub int_bits: Option<u32>,
    pub float_bits: Option<u32>,
}

impl Overrides {
    fn apply(&self, mut config: EmitterConfig) -> EmitterConfig {
        if self.strict {
            config = config.strict();
        }
        if self.no_rotations {
            config = config.with_rotations(false);
        }
        if let Some(precision) = self.precision {
            config = config.with_precision(precision);
        }
        if let Some(bits) = self.int_bits {
            config = config.with_int_bits(bits);
        }
        if let Some(bits) = self.float_bits {
            config = config.with_float_bits(bits);
        }
        config
    }
}

/// Build the effective emitter configuration.
fn resolve_config(config_path: Option<&str>, overrides: &Overrides) -> Result<EmitterConfig> {
    let base = match config_path {
        Some(path) => load_config(path)?,
        None => EmitterConfig::default(),
    };
    Ok(overrides.apply(base))
}

/// Execute the emit command.
pub fn execute(
    input: &str,
    output: Option<&str>,
    config_path: Option<&str>,
    overrides: &Overrides,
) -> Result<()> {
    let config = resolve_config(config_path, overrides)?;
    debug!(?config, "Resolved emitter configuration");
    let circuit = load_circuit(input)?;
    let result = analyze(&circuit)?;
    let qasm = emit(&circuit, &result, &config)?;

    let Some(path) = output else {
        print!("{qasm}");
        return Ok(());
    };

    fs::write(path, &qasm).with_context(|| format!("Failed to write file: {path}"))?;

    println!(
        "{} Emitted {} ({:?} mode)",
        style("✓").green().bold(),
        style(input).green(),
        config.mode
    );
    println!(
        "  {} qubits, {} qumodes, {} executions",
        result.discrete_wires().len(),
        result.continuous_wires().len(),
        result.groups().len()
    );
    println!("  Output: {}", style(path).green());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hybrid_qasm3::EmitMode;

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emit.yaml");
        fs::write(&path, "mode: permissive\nint_bits: 16\nprecision: 3\n").unwrap();

        let overrides = Overrides {
            strict: true,
            int_bits: Some(8),
            ..Overrides::default()
        };
        let config = resolve_config(path.to_str(), &overrides).unwrap();
        assert_eq!(config.mode, EmitMode::Strict);
        assert_eq!(config.int_bits, 8);
        assert_eq!(config.precision, 3);
        assert!(config.rotations);
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("displaced.json");
        let output = dir.path().join("displaced.qasm");
        fs::write(
            &input,
            r#"{
                "operations": [
                    {"name": "ConditionalDisplacement", "wires": ["m", "q"], "params": [0.5],
                     "capability": "Hybrid", "num_continuous": 1}
                ],
                "measurements": [
                    {"Named": {"name": "QuadX", "wires": ["m"]}},
                    {"Named": {"name": "PauliZ", "wires": ["q"]}}
                ]
            }"#,
        )
        .unwrap();

        execute(
            input.to_str().unwrap(),
            output.to_str(),
            None,
            &Overrides {
                no_rotations: true,
                ..Overrides::default()
            },
        )
        .unwrap();

        let qasm = fs::read_to_string(&output).unwrap();
        assert!(qasm.starts_with("OPENQASM 3.0;\n"));
        assert!(qasm.contains("qumode[1] m;"));
        assert!(!qasm.contains("cv_r"));
    }

    #[test]
    fn test_aliasing_circuit_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("alias.json");
        fs::write(
            &input,
            r#"{
                "operations": [
                    {"name": "Hadamard", "wires": [0], "capability": "Standard"},
                    {"name": "Displacement", "wires": [0], "params": [1.0, 0.0],
                     "capability": "ContinuousNative"}
                ]
            }"#,
        )
        .unwrap();

        let err = execute(input.to_str().unwrap(), None, None, &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("Aliasing on wire 0"));
    }
}
