//! Analyze command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;

use hybrid_ir::{Circuit, Wire, WireId};
use hybrid_sa::{BasisSchema, StaticAnalysisResult, analyze};

use super::common::{load_backend, load_circuit};

/// Analysis report with wires shown by their front-end labels.
#[derive(Debug, Serialize)]
struct Report<'a> {
    circuit: &'a str,
    qubits: Vec<Wire>,
    qumodes: Vec<Wire>,
    groups: Vec<GroupReport>,
}

#[derive(Debug, Serialize)]
struct GroupReport {
    measurements: Vec<usize>,
    readouts: Vec<ReadoutReport>,
    diagonalizing: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ReadoutReport {
    wire: Wire,
    schema: BasisSchema,
}

impl<'a> Report<'a> {
    fn new(circuit: &'a Circuit, result: &StaticAnalysisResult) -> Self {
        let labels = |wires: Vec<WireId>| -> Vec<Wire> {
            wires.into_iter().map(|w| circuit.wire_label(w)).collect()
        };
        Self {
            circuit: circuit.name(),
            qubits: labels(result.discrete_wires()),
            qumodes: labels(result.continuous_wires()),
            groups: result
                .groups()
                .iter()
                .map(|g| GroupReport {
                    measurements: g.measurements.clone(),
                    readouts: g
                        .readouts
                        .iter()
                        .map(|&(wire, schema)| ReadoutReport {
                            wire: circuit.wire_label(wire),
                            schema,
                        })
                        .collect(),
                    diagonalizing: g
                        .diagonalizing
                        .iter()
                        .map(|op| {
                            let wires: Vec<String> = op
                                .wires
                                .iter()
                                .map(|w| circuit.wire_label(*w).to_string())
                                .collect();
                            format!("{}({})", op.name, wires.join(", "))
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Execute the analyze command.
pub fn execute(input: &str, format: &str, backend: Option<&str>) -> Result<()> {
    let circuit = load_circuit(input)?;
    let result = analyze(&circuit)?;

    if let Some(spec) = backend {
        let profile = load_backend(spec)?;
        result.check_backend(&profile)?;
    }

    let report = Report::new(&circuit, &result);
    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        _ => print_report(&report, backend),
    }

    Ok(())
}

fn print_report(report: &Report<'_>, backend: Option<&str>) {
    let join = |wires: &[Wire]| {
        wires
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!(
        "{} Analysed {}",
        style("✓").green().bold(),
        style(report.circuit).green()
    );
    println!("  Qubits  ({}): {}", report.qubits.len(), join(&report.qubits));
    println!("  Qumodes ({}): {}", report.qumodes.len(), join(&report.qumodes));
    println!("  Executions: {}", report.groups.len());

    for (g, group) in report.groups.iter().enumerate() {
        let measurements = group
            .measurements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "\n  {} group {} (measurements {})",
            style("→").cyan().bold(),
            g,
            measurements
        );
        for readout in &group.readouts {
            println!(
                "    {:>8}  {}",
                style(&readout.wire).yellow(),
                readout.schema
            );
        }
        if !group.diagonalizing.is_empty() {
            println!("    rotate: {}", style(group.diagonalizing.join("; ")).dim());
        }
    }

    if let Some(name) = backend {
        println!(
            "\n{} Compatible with backend {}",
            style("✓").green().bold(),
            style(name).yellow()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hybrid_ir::{Param, RawObservable};

    #[test]
    fn test_report_uses_labels() {
        let mut circuit = Circuit::new("displaced");
        circuit
            .hybrid(
                "ConditionalDisplacement",
                [Wire::from("cav"), Wire::from("ion")],
                1,
                [Param::Real(0.5)],
            )
            .unwrap()
            .measure(&RawObservable::named("QuadP", [Wire::from("cav")]))
            .unwrap();
        let result = analyze(&circuit).unwrap();

        let report = Report::new(&circuit, &result);
        assert_eq!(report.qubits, vec![Wire::from("ion")]);
        assert_eq!(report.qumodes, vec![Wire::from("cav")]);
        assert_eq!(report.groups[0].diagonalizing, vec!["Rotation(cav)".to_string()]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["groups"][0]["readouts"][0]["wire"], "cav");
        assert_eq!(json["groups"][0]["readouts"][0]["schema"], "Position");
    }
}
