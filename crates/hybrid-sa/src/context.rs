//! The wire-type map shared by type inference and schema resolution.

use hybrid_ir::{Circuit, WireId, WireType};
use tracing::trace;

use crate::error::{AnalysisError, AnalysisResult, Site};

/// Owned, per-run map from wire to its resolved type.
///
/// One context lives for exactly one analysis run and is threaded by `&mut`
/// through both passes. A slot, once filled, never changes.
#[derive(Debug)]
pub struct TypeContext<'c> {
    circuit: &'c Circuit,
    slots: Vec<Option<(WireType, Site)>>,
}

impl<'c> TypeContext<'c> {
    /// Create a context with every wire of `circuit` unresolved.
    pub fn new(circuit: &'c Circuit) -> Self {
        Self {
            circuit,
            slots: vec![None; circuit.num_wires()],
        }
    }

    /// Require `wire` to have type `ty`, fixing it if still unresolved.
    pub fn require(&mut self, wire: WireId, ty: WireType, site: Site) -> AnalysisResult<()> {
        let Some(slot) = self.slots.get_mut(wire.index()) else {
            return Err(AnalysisError::UnresolvedWire {
                wire: self.circuit.wire_label(wire),
            });
        };
        let current = *slot;
        match current {
            None => {
                trace!("wire {} resolved to {ty}", wire);
                *slot = Some((ty, site));
                Ok(())
            }
            Some((resolved, _)) if resolved == ty => Ok(()),
            Some((resolved, prior)) => Err(AnalysisError::Aliasing {
                wire: self.circuit.wire_label(wire),
                resolved,
                prior: prior.describe(self.circuit),
                conflicting: site.describe(self.circuit),
            }),
        }
    }

    /// The resolved type of `wire`, if any.
    pub fn get(&self, wire: WireId) -> Option<WireType> {
        self.slots.get(wire.index()).copied().flatten().map(|(ty, _)| ty)
    }

    /// The circuit being analysed.
    pub fn circuit(&self) -> &'c Circuit {
        self.circuit
    }

    /// Close the run, failing on the first wire nothing constrained.
    pub fn finish(self) -> AnalysisResult<Vec<WireType>> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.map(|(ty, _)| ty).ok_or_else(|| AnalysisError::UnresolvedWire {
                    wire: self.circuit.wire_label(WireId(i as u32)),
                })
            })
            .collect()
    }
}
