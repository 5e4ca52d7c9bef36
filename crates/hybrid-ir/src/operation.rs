//! Circuit operations and their capability tags.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wire::{HYBRID_WIRE_ORDER, WireId, WireType};

/// A numeric operation parameter. The analyzer never inspects values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    /// Integer hyperparameter (e.g. a Fock level).
    Int(i64),
    /// Real-valued parameter.
    Real(f64),
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Real(v)
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl Param {
    /// Render with `precision` decimal places for reals.
    pub fn format(&self, precision: usize) -> String {
        match self {
            Param::Int(v) => v.to_string(),
            Param::Real(v) => format!("{v:.precision$}"),
        }
    }
}

/// Which wire types an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    /// Acts on qubits only.
    Standard,
    /// Acts on qumodes only.
    ContinuousNative,
    /// Acts on qumodes and qubits; the first or last `num_continuous` wires
    /// are qumodes according to [`HYBRID_WIRE_ORDER`].
    Hybrid {
        /// Number of continuous wires.
        num_continuous: usize,
    },
}

impl Capability {
    /// The wire type demanded at `position` of an `arity`-wire operation.
    pub fn required_type(self, position: usize, arity: usize) -> WireType {
        match self {
            Capability::Standard => WireType::Discrete,
            Capability::ContinuousNative => WireType::Continuous,
            Capability::Hybrid { num_continuous } => {
                HYBRID_WIRE_ORDER.type_at(position, arity, num_continuous)
            }
        }
    }
}

/// A normalized circuit instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Front-end operation name (e.g. `ConditionalDisplacement`).
    pub name: String,
    /// Wires in front-end order.
    pub wires: Vec<WireId>,
    /// Opaque numeric parameters.
    pub params: Vec<Param>,
    /// Capability tag.
    pub capability: Capability,
}

impl Operation {
    /// Create an operation.
    pub fn new(
        name: impl Into<String>,
        wires: impl IntoIterator<Item = WireId>,
        params: impl IntoIterator<Item = Param>,
        capability: Capability,
    ) -> Self {
        Self {
            name: name.into(),
            wires: wires.into_iter().collect(),
            params: params.into_iter().collect(),
            capability,
        }
    }

    /// Phase-space rotation `R(θ)` on one qumode.
    pub fn rotation(theta: f64, wire: WireId) -> Self {
        Self::new(
            "Rotation",
            [wire],
            [Param::Real(theta)],
            Capability::ContinuousNative,
        )
    }

    /// A parameterless single-qubit gate.
    pub fn qubit_gate(name: &str, wire: WireId) -> Self {
        Self::new(name, [wire], [], Capability::Standard)
    }

    /// Each wire paired with the type this operation demands of it.
    pub fn wire_requirements(&self) -> impl Iterator<Item = (WireId, WireType)> + '_ {
        let arity = self.wires.len();
        self.wires
            .iter()
            .enumerate()
            .map(move |(pos, &w)| (w, self.capability.required_type(pos, arity)))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wires = self
            .wires
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({wires})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_requires_discrete() {
        let op = Operation::new("CNOT", [WireId(0), WireId(1)], [], Capability::Standard);
        assert!(
            op.wire_requirements()
                .all(|(_, t)| t == WireType::Discrete)
        );
    }

    #[test]
    fn test_hybrid_requirements_follow_convention() {
        let op = Operation::new(
            "ConditionalDisplacement",
            [WireId(0), WireId(1)],
            [Param::Real(0.5)],
            Capability::Hybrid { num_continuous: 1 },
        );
        let reqs: Vec<_> = op.wire_requirements().collect();
        assert_eq!(
            reqs,
            vec![
                (WireId(0), HYBRID_WIRE_ORDER.type_at(0, 2, 1)),
                (WireId(1), HYBRID_WIRE_ORDER.type_at(1, 2, 1)),
            ]
        );
        assert_ne!(reqs[0].1, reqs[1].1);
    }

    #[test]
    fn test_param_format() {
        assert_eq!(Param::Real(0.5).format(3), "0.500");
        assert_eq!(Param::Int(4).format(3), "4");
    }

    #[test]
    fn test_display() {
        let op = Operation::rotation(1.0, WireId(2));
        assert_eq!(op.to_string(), "Rotation(w2)");
    }
}
