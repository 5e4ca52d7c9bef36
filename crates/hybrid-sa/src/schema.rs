//! Measurement-schema resolution.
//!
//! Each terminal measurement is resolved, by recursive descent over its
//! observable tree, into a [`MeasurementSchema`]: the readout every touched
//! wire needs. Leaves fix wire types through the shared [`TypeContext`], so
//! wires that only appear in measurements get their type here.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use hybrid_ir::{
    Circuit, HYBRID_WIRE_ORDER, Leaf, LeafKind, NaturalBasis, ObservableNode, Operation, WireId,
    WireType,
};

use crate::context::TypeContext;
use crate::error::{AnalysisError, AnalysisResult, Site};

/// How a wire is read out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasisSchema {
    /// Computational basis on a qubit, photon number on a qumode.
    Discrete,
    /// Homodyne detection of a quadrature.
    Position,
    /// Heterodyne detection of both quadratures.
    Coherent,
}

/// The kind of classical value a readout produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Bit or unsigned integer.
    Integer,
    /// Real number.
    Real,
    /// Complex number.
    Complex,
}

impl BasisSchema {
    /// The result value kind implied by this schema.
    pub fn value_kind(self) -> ValueKind {
        match self {
            BasisSchema::Discrete => ValueKind::Integer,
            BasisSchema::Position => ValueKind::Real,
            BasisSchema::Coherent => ValueKind::Complex,
        }
    }
}

impl fmt::Display for BasisSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasisSchema::Discrete => f.write_str("Discrete"),
            BasisSchema::Position => f.write_str("Position"),
            BasisSchema::Coherent => f.write_str("Coherent"),
        }
    }
}

/// Readout requirement for one wire: the schema plus the operations that
/// rotate the observable's eigenbasis onto the native readout basis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireReadout {
    /// Readout schema.
    pub schema: BasisSchema,
    /// Diagonalizing operations, in application order.
    pub diagonalizing: Vec<Operation>,
}

impl WireReadout {
    fn plain(schema: BasisSchema) -> Self {
        Self {
            schema,
            diagonalizing: vec![],
        }
    }

    fn rotated(schema: BasisSchema, angle: f64, wire: WireId) -> Self {
        Self {
            schema,
            diagonalizing: vec![Operation::rotation(angle, wire)],
        }
    }
}

/// Per-wire readouts required by one measurement, in first-touch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasurementSchema {
    entries: Vec<(WireId, WireReadout)>,
    #[serde(skip)]
    index: FxHashMap<WireId, usize>,
}

impl MeasurementSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Readout required on `wire`, if the measurement touches it.
    pub fn get(&self, wire: WireId) -> Option<&WireReadout> {
        self.index.get(&wire).map(|&i| &self.entries[i].1)
    }

    /// Schema required on `wire`.
    pub fn basis(&self, wire: WireId) -> Option<BasisSchema> {
        self.get(wire).map(|r| r.schema)
    }

    /// All `(wire, readout)` pairs in first-touch order.
    pub fn iter(&self) -> impl Iterator<Item = (WireId, &WireReadout)> + '_ {
        self.entries.iter().map(|(w, r)| (*w, r))
    }

    /// Number of wires touched.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no wire needs a readout.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `readout` on `wire`. An identical readout is a no-op; a
    /// different one is returned as `Err((existing, new))`.
    fn insert(
        &mut self,
        wire: WireId,
        readout: WireReadout,
    ) -> Result<(), (BasisSchema, BasisSchema)> {
        if let Some(&i) = self.index.get(&wire) {
            let existing = &self.entries[i].1;
            return if *existing == readout {
                Ok(())
            } else {
                Err((existing.schema, readout.schema))
            };
        }
        self.index.insert(wire, self.entries.len());
        self.entries.push((wire, readout));
        Ok(())
    }
}

/// Resolve every measurement of the circuit, in declaration order.
pub fn resolve_measurements(
    circuit: &Circuit,
    ctx: &mut TypeContext<'_>,
) -> AnalysisResult<Vec<MeasurementSchema>> {
    let schemas = circuit
        .measurements()
        .iter()
        .enumerate()
        .map(|(i, m)| resolve_observable(&m.observable, i, ctx))
        .collect::<AnalysisResult<Vec<_>>>()?;
    debug!(
        "Resolved {} measurement schemas over {} wire readouts",
        schemas.len(),
        schemas.iter().map(MeasurementSchema::len).sum::<usize>()
    );
    Ok(schemas)
}

/// Resolve the readout schema of one observable tree.
///
/// Composite children are resolved left to right into a single accumulator;
/// a wire assigned two different readouts is a [`AnalysisError::SchemaConflict`].
pub fn resolve_observable(
    node: &ObservableNode,
    measurement: usize,
    ctx: &mut TypeContext<'_>,
) -> AnalysisResult<MeasurementSchema> {
    let mut schema = MeasurementSchema::new();
    let mut resolver = Resolver {
        ctx,
        site: Site::Measurement(measurement),
        schema: &mut schema,
    };
    resolver.visit(node)?;
    Ok(schema)
}

struct Resolver<'a, 'c> {
    ctx: &'a mut TypeContext<'c>,
    site: Site,
    schema: &'a mut MeasurementSchema,
}

impl Resolver<'_, '_> {
    fn visit(&mut self, node: &ObservableNode) -> AnalysisResult<()> {
        match node {
            ObservableNode::Composite { children, .. } => {
                for child in children {
                    self.visit(child)?;
                }
                Ok(())
            }
            ObservableNode::Leaf(leaf) => self.visit_leaf(leaf),
        }
    }

    fn visit_leaf(&mut self, leaf: &Leaf) -> AnalysisResult<()> {
        match &leaf.kind {
            LeafKind::Identity => Ok(()),
            LeafKind::Discrete { diagonalizing } => {
                for &wire in &leaf.wires {
                    self.ctx.require(wire, WireType::Discrete, self.site)?;
                    let readout = WireReadout {
                        schema: BasisSchema::Discrete,
                        diagonalizing: diagonalizing
                            .iter()
                            .map(|gate| Operation::qubit_gate(gate, wire))
                            .collect(),
                    };
                    self.record(wire, readout)?;
                }
                Ok(())
            }
            LeafKind::Continuous { basis } => {
                for &wire in &leaf.wires {
                    self.continuous_wire(leaf, wire, *basis)?;
                }
                Ok(())
            }
            LeafKind::Hybrid {
                num_continuous,
                basis,
            } => {
                let arity = leaf.wires.len();
                for (pos, &wire) in leaf.wires.iter().enumerate() {
                    match HYBRID_WIRE_ORDER.type_at(pos, arity, *num_continuous) {
                        WireType::Continuous => self.continuous_wire(leaf, wire, *basis)?,
                        WireType::Discrete => {
                            self.ctx.require(wire, WireType::Discrete, self.site)?;
                            self.record(wire, WireReadout::plain(BasisSchema::Discrete))?;
                        }
                    }
                }
                Ok(())
            }
        }
    }

    fn continuous_wire(
        &mut self,
        leaf: &Leaf,
        wire: WireId,
        basis: Option<NaturalBasis>,
    ) -> AnalysisResult<()> {
        self.ctx.require(wire, WireType::Continuous, self.site)?;
        let readout = match basis {
            Some(NaturalBasis::Fock) => WireReadout::plain(BasisSchema::Discrete),
            Some(NaturalBasis::Quadrature { angle }) => {
                WireReadout::rotated(BasisSchema::Position, angle, wire)
            }
            Some(NaturalBasis::Coherent { phase }) => {
                WireReadout::rotated(BasisSchema::Coherent, phase, wire)
            }
            None => {
                let circuit = self.ctx.circuit();
                return Err(AnalysisError::UnsupportedObservable {
                    observable: leaf.name.clone(),
                    wire: circuit.wire_label(wire),
                    measurement: self.site.describe(circuit),
                });
            }
        };
        self.record(wire, readout)
    }

    fn record(&mut self, wire: WireId, readout: WireReadout) -> AnalysisResult<()> {
        self.schema.insert(wire, readout).map_err(|(first, second)| {
            let circuit = self.ctx.circuit();
            AnalysisError::SchemaConflict {
                wire: circuit.wire_label(wire),
                measurement: self.site.describe(circuit),
                first,
                second,
            }
        })
    }
}
