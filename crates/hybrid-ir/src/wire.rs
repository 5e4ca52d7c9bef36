//! Wire identifiers and the wire table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A wire as named by the front end: a small integer or a string label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Wire {
    /// Integer wire label.
    Index(u32),
    /// String wire label.
    Label(String),
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wire::Index(i) => write!(f, "{i}"),
            Wire::Label(l) => f.write_str(l),
        }
    }
}

impl From<u32> for Wire {
    fn from(i: u32) -> Self {
        Wire::Index(i)
    }
}

impl From<&str> for Wire {
    fn from(label: &str) -> Self {
        Wire::Label(label.to_string())
    }
}

impl From<String> for Wire {
    fn from(label: String) -> Self {
        Wire::Label(label)
    }
}

/// Dense identifier for a wire inside one [`Circuit`](crate::Circuit).
///
/// Ids are handed out in first-reference order, so they double as indices
/// into per-wire vectors in later stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WireId(pub u32);

impl WireId {
    /// The id as a vector index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// The register kind a wire denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireType {
    /// Two-level register (qubit).
    Discrete,
    /// Oscillator register (qumode).
    Continuous,
}

impl WireType {
    /// The other wire type.
    pub fn opposite(self) -> Self {
        match self {
            WireType::Discrete => WireType::Continuous,
            WireType::Continuous => WireType::Discrete,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireType::Discrete => f.write_str("qubit"),
            WireType::Continuous => f.write_str("qumode"),
        }
    }
}

/// Where the continuous wires sit in a hybrid operation's wire list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HybridWireOrder {
    /// `[qumodes..., qubits...]`
    ContinuousFirst,
    /// `[qubits..., qumodes...]`
    DiscreteFirst,
}

/// Project-wide hybrid wire convention. Every component that splits the
/// wires of a hybrid operation or observable goes through this constant.
pub const HYBRID_WIRE_ORDER: HybridWireOrder = HybridWireOrder::ContinuousFirst;

impl HybridWireOrder {
    /// Wire type at `position` of an `arity`-wire hybrid item with
    /// `num_continuous` continuous wires.
    pub fn type_at(self, position: usize, arity: usize, num_continuous: usize) -> WireType {
        let continuous = match self {
            HybridWireOrder::ContinuousFirst => position < num_continuous,
            HybridWireOrder::DiscreteFirst => position >= arity.saturating_sub(num_continuous),
        };
        if continuous {
            WireType::Continuous
        } else {
            WireType::Discrete
        }
    }
}

/// Deduplicating table of the wires referenced by a circuit.
#[derive(Debug, Clone, Default)]
pub struct WireTable {
    wires: Vec<Wire>,
    ids: FxHashMap<Wire, WireId>,
}

impl WireTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `wire`, registering it on first reference.
    pub fn intern(&mut self, wire: &Wire) -> WireId {
        if let Some(&id) = self.ids.get(wire) {
            return id;
        }
        let id = WireId(u32::try_from(self.wires.len()).unwrap_or(u32::MAX));
        self.wires.push(wire.clone());
        self.ids.insert(wire.clone(), id);
        id
    }

    /// Forget every wire registered after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        for wire in self.wires.drain(len.min(self.wires.len())..) {
            self.ids.remove(&wire);
        }
    }

    /// Look up an already registered wire.
    pub fn get(&self, wire: &Wire) -> Option<WireId> {
        self.ids.get(wire).copied()
    }

    /// The front-end label of an id.
    pub fn label(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id.index())
    }

    /// Number of distinct wires.
    pub fn len(&self) -> usize {
        self.wires.len()
    }

    /// Whether no wire has been referenced.
    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    /// All ids in first-reference order.
    pub fn ids(&self) -> impl Iterator<Item = WireId> + '_ {
        (0..self.wires.len()).map(|i| WireId(i as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_display() {
        assert_eq!(Wire::Index(3).to_string(), "3");
        assert_eq!(Wire::from("mode").to_string(), "mode");
        assert_eq!(WireId(7).to_string(), "w7");
    }

    #[test]
    fn test_intern_deduplicates() {
        let mut table = WireTable::new();
        let a = table.intern(&Wire::from("a"));
        let b = table.intern(&Wire::Index(0));
        let a2 = table.intern(&Wire::from("a"));

        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
        assert_eq!(table.label(b), Some(&Wire::Index(0)));
        assert_eq!(table.ids().collect::<Vec<_>>(), vec![WireId(0), WireId(1)]);
    }

    #[test]
    fn test_hybrid_order() {
        let order = HybridWireOrder::ContinuousFirst;
        assert_eq!(order.type_at(0, 3, 1), WireType::Continuous);
        assert_eq!(order.type_at(1, 3, 1), WireType::Discrete);
        assert_eq!(order.type_at(2, 3, 1), WireType::Discrete);

        let order = HybridWireOrder::DiscreteFirst;
        assert_eq!(order.type_at(0, 3, 1), WireType::Discrete);
        assert_eq!(order.type_at(2, 3, 1), WireType::Continuous);
    }

    #[test]
    fn test_wire_deserialize_untagged() {
        let wires: Vec<Wire> = serde_json::from_str(r#"[0, "m"]"#).unwrap();
        assert_eq!(wires, vec![Wire::Index(0), Wire::from("m")]);
    }
}
