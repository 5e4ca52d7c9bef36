//! The analysis driver and its result.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use hybrid_ir::{Circuit, WireId, WireType};

use crate::context::TypeContext;
use crate::error::{AnalysisError, AnalysisResult};
use crate::group::{MeasurementGroup, group_measurements};
use crate::infer::infer_wire_types;
use crate::schema::{BasisSchema, MeasurementSchema, resolve_measurements};

/// Outcome of a successful analysis run. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticAnalysisResult {
    wire_types: Vec<WireType>,
    schemas: Vec<MeasurementSchema>,
    groups: Vec<MeasurementGroup>,
}

impl StaticAnalysisResult {
    /// Type of `wire`; `None` if the wire is not part of the analysed circuit.
    pub fn wire_type(&self, wire: WireId) -> Option<WireType> {
        self.wire_types.get(wire.index()).copied()
    }

    /// Number of wires covered.
    pub fn num_wires(&self) -> usize {
        self.wire_types.len()
    }

    /// Qubit wires in first-reference order.
    pub fn discrete_wires(&self) -> Vec<WireId> {
        self.wires_of(WireType::Discrete)
    }

    /// Qumode wires in first-reference order.
    pub fn continuous_wires(&self) -> Vec<WireId> {
        self.wires_of(WireType::Continuous)
    }

    fn wires_of(&self, ty: WireType) -> Vec<WireId> {
        self.wire_types
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == ty)
            .map(|(i, _)| WireId(i as u32))
            .collect()
    }

    /// Per-measurement schemas, in declaration order.
    pub fn schemas(&self) -> &[MeasurementSchema] {
        &self.schemas
    }

    /// Execution groups, in creation order.
    pub fn groups(&self) -> &[MeasurementGroup] {
        &self.groups
    }

    /// Whether the circuit uses qubits only.
    pub fn is_discrete_only(&self) -> bool {
        self.wire_types.iter().all(|t| *t == WireType::Discrete)
    }

    /// Check that `backend` can execute every group of this circuit.
    pub fn check_backend(&self, backend: &BackendProfile) -> AnalysisResult<()> {
        let unsupported = |reason: String| AnalysisError::UnsupportedByBackend {
            backend: backend.name.clone(),
            reason,
        };

        if !backend.supports_continuous && !self.is_discrete_only() {
            return Err(unsupported(format!(
                "{} qumode wire(s) but no qumode support",
                self.continuous_wires().len()
            )));
        }
        for (g, group) in self.groups.iter().enumerate() {
            for &(wire, schema) in &group.readouts {
                let on_qumode = self.wire_type(wire) == Some(WireType::Continuous);
                if on_qumode && !backend.readouts.contains(&schema) {
                    return Err(unsupported(format!(
                        "group {g} needs a {schema} readout on {wire}"
                    )));
                }
            }
        }
        if let Some(max) = backend.max_executions {
            if self.groups.len() > max {
                return Err(unsupported(format!(
                    "{} executions exceed the limit of {max}",
                    self.groups.len()
                )));
            }
        }
        Ok(())
    }
}

/// What a target backend can execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendProfile {
    /// Backend name.
    pub name: String,
    /// Whether qumode registers are available.
    pub supports_continuous: bool,
    /// Readout schemas available on qumodes.
    #[serde(default)]
    pub readouts: Vec<BasisSchema>,
    /// Maximum number of preparation runs per submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_executions: Option<usize>,
}

impl BackendProfile {
    /// A qubit-only device.
    pub fn qubit_only(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supports_continuous: false,
            readouts: vec![],
            max_executions: None,
        }
    }

    /// A hybrid device with every readout.
    pub fn hybrid(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supports_continuous: true,
            readouts: vec![
                BasisSchema::Discrete,
                BasisSchema::Position,
                BasisSchema::Coherent,
            ],
            max_executions: None,
        }
    }

    /// A hybrid device whose qumodes are read by photon counting only.
    pub fn fock_only(name: impl Into<String>) -> Self {
        Self {
            readouts: vec![BasisSchema::Discrete],
            ..Self::hybrid(name)
        }
    }
}

/// Run the full static analysis on a normalized circuit.
///
/// Stages run in order: wire-type inference over operations, schema
/// resolution over measurements (sharing the same type map), the
/// unresolved-wire check, and execution grouping. The first error aborts.
#[instrument(skip(circuit), fields(circuit = circuit.name()))]
pub fn analyze(circuit: &Circuit) -> AnalysisResult<StaticAnalysisResult> {
    info!(
        "Analysing circuit with {} wires, {} operations, {} measurements",
        circuit.num_wires(),
        circuit.operations().len(),
        circuit.measurements().len()
    );

    let mut ctx = TypeContext::new(circuit);
    infer_wire_types(circuit, &mut ctx)?;
    let schemas = resolve_measurements(circuit, &mut ctx)?;
    let wire_types = ctx.finish()?;
    let groups = group_measurements(&schemas);

    let result = StaticAnalysisResult {
        wire_types,
        schemas,
        groups,
    };
    info!(
        "Analysis complete: {} qubits, {} qumodes, {} executions",
        result.discrete_wires().len(),
        result.continuous_wires().len(),
        result.groups.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hybrid_ir::{Param, RawObservable, Wire};

    fn w(label: &str) -> Wire {
        Wire::from(label)
    }

    fn scenario() -> Circuit {
        let mut circuit = Circuit::new("scenario");
        circuit
            .hybrid("ConditionalDisplacement", [w("m"), w("q")], 1, [Param::Real(0.5)])
            .unwrap()
            .measure(&RawObservable::named("QuadX", [w("m")]))
            .unwrap()
            .measure(&RawObservable::named("PauliZ", [w("q")]))
            .unwrap();
        circuit
    }

    #[test]
    fn test_analyze_partitions_wires() {
        let circuit = scenario();
        let result = analyze(&circuit).unwrap();

        assert_eq!(result.continuous_wires(), vec![WireId(0)]);
        assert_eq!(result.discrete_wires(), vec![WireId(1)]);
        assert_eq!(result.schemas().len(), 2);
        assert!(!result.is_discrete_only());
    }

    #[test]
    fn test_measurement_only_wire_typed_by_observable() {
        let mut circuit = Circuit::new("m_only");
        circuit
            .measure(&RawObservable::named("NumberOperator", [w("m")]))
            .unwrap();
        let result = analyze(&circuit).unwrap();
        assert_eq!(result.wire_type(WireId(0)), Some(WireType::Continuous));
    }

    #[test]
    fn test_measurement_aliasing_against_operation() {
        let mut circuit = Circuit::new("alias");
        circuit
            .standard("Hadamard", [w("a")], [])
            .unwrap()
            .measure(&RawObservable::named("QuadX", [w("a")]))
            .unwrap();
        let err = analyze(&circuit).unwrap_err();
        assert!(matches!(err, AnalysisError::Aliasing { .. }));
        assert!(err.to_string().contains("measurement 0 (QuadX)"));
    }

    #[test]
    fn test_unconstrained_wire_is_an_error() {
        let mut circuit = Circuit::new("unresolved");
        circuit
            .measure(&RawObservable::named("Identity", [w("z")]))
            .unwrap();
        assert!(matches!(
            analyze(&circuit),
            Err(AnalysisError::UnresolvedWire { .. })
        ));
    }

    #[test]
    fn test_backend_checks() {
        let result = analyze(&scenario()).unwrap();

        assert!(result.check_backend(&BackendProfile::hybrid("sim")).is_ok());
        assert!(matches!(
            result.check_backend(&BackendProfile::qubit_only("ibm")),
            Err(AnalysisError::UnsupportedByBackend { .. })
        ));
        assert!(result.check_backend(&BackendProfile::fock_only("trap")).is_err());

        let limited = BackendProfile {
            max_executions: Some(0),
            ..BackendProfile::hybrid("tiny")
        };
        assert!(result.check_backend(&limited).is_err());
    }

    #[test]
    fn test_empty_circuit() {
        let result = analyze(&Circuit::new("empty")).unwrap();
        assert_eq!(result.num_wires(), 0);
        assert!(result.groups().is_empty());
        assert!(result.is_discrete_only());
    }
}
