//! Normalized circuit: the operation graph model.

use rustc_hash::FxHashSet;

use crate::error::{IrError, IrResult};
use crate::frontend::{CircuitDescription, RawCapability, RawObservable, RawOperation};
use crate::observable::ObservableNode;
use crate::operation::{Capability, Operation, Param};
use crate::wire::{Wire, WireId, WireTable};

/// A terminal measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// The observable tree.
    pub observable: ObservableNode,
}

impl Measurement {
    /// Diagnostic name of the measured observable.
    pub fn name(&self) -> String {
        self.observable.name()
    }
}

/// An ordered hybrid circuit with deduplicated wires.
///
/// Wires are created on first reference, either by an operation or by a
/// measurement, and receive dense [`WireId`]s in that order.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    name: String,
    wires: WireTable,
    operations: Vec<Operation>,
    measurements: Vec<Measurement>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Normalize a complete front-end description.
    pub fn from_description(desc: &CircuitDescription) -> IrResult<Self> {
        let mut circuit = Self::new(desc.name.clone());
        for op in &desc.operations {
            circuit.push_raw(op)?;
        }
        for obs in &desc.measurements {
            circuit.measure(obs)?;
        }
        Ok(circuit)
    }

    /// Append a front-end operation record.
    pub fn push_raw(&mut self, raw: &RawOperation) -> IrResult<&mut Self> {
        let index = self.operations.len();
        let malformed = |reason: String| IrError::MalformedOperation {
            index,
            name: raw.name.clone(),
            reason,
        };

        let capability = match raw.capability {
            RawCapability::Standard => Capability::Standard,
            RawCapability::ContinuousNative => Capability::ContinuousNative,
            RawCapability::Hybrid => {
                let num_continuous = raw
                    .num_continuous
                    .ok_or_else(|| malformed("hybrid operation without continuous-wire count".into()))?;
                if num_continuous > raw.wires.len() {
                    return Err(malformed(format!(
                        "continuous-wire count {num_continuous} exceeds {} wires",
                        raw.wires.len()
                    )));
                }
                Capability::Hybrid { num_continuous }
            }
        };

        let mut seen = FxHashSet::default();
        for w in &raw.wires {
            if !seen.insert(w) {
                return Err(IrError::DuplicateWire {
                    wire: w.clone(),
                    name: raw.name.clone(),
                });
            }
        }

        let wires: Vec<WireId> = raw.wires.iter().map(|w| self.wires.intern(w)).collect();
        self.operations.push(Operation {
            name: raw.name.clone(),
            wires,
            params: raw.params.clone(),
            capability,
        });
        Ok(self)
    }

    /// Append a qubit-only operation.
    pub fn standard(
        &mut self,
        name: &str,
        wires: impl IntoIterator<Item = Wire>,
        params: impl IntoIterator<Item = Param>,
    ) -> IrResult<&mut Self> {
        self.push_raw(&RawOperation::standard(name, wires, params))
    }

    /// Append a qumode-only operation.
    pub fn continuous(
        &mut self,
        name: &str,
        wires: impl IntoIterator<Item = Wire>,
        params: impl IntoIterator<Item = Param>,
    ) -> IrResult<&mut Self> {
        self.push_raw(&RawOperation::continuous(name, wires, params))
    }

    /// Append a hybrid operation with `num_continuous` qumode wires.
    pub fn hybrid(
        &mut self,
        name: &str,
        wires: impl IntoIterator<Item = Wire>,
        num_continuous: usize,
        params: impl IntoIterator<Item = Param>,
    ) -> IrResult<&mut Self> {
        self.push_raw(&RawOperation::hybrid(name, wires, num_continuous, params))
    }

    /// Append a terminal measurement.
    ///
    /// On error the circuit is left unchanged, including its wire table.
    pub fn measure(&mut self, observable: &RawObservable) -> IrResult<&mut Self> {
        let known = self.wires.len();
        let observable = match ObservableNode::from_raw(observable, &mut self.wires) {
            Ok(node) => node,
            Err(e) => {
                self.wires.truncate(known);
                return Err(e);
            }
        };
        self.measurements.push(Measurement { observable });
        Ok(self)
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wire table.
    pub fn wires(&self) -> &WireTable {
        &self.wires
    }

    /// Number of distinct wires.
    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }

    /// Operations in program order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Measurements in declaration order.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Front-end label of a wire, for diagnostics.
    pub fn wire_label(&self, id: WireId) -> Wire {
        self.wires
            .label(id)
            .cloned()
            .unwrap_or_else(|| Wire::Label(id.to_string()))
    }
}
