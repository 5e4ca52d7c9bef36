//! Observable trees.
//!
//! Front-end observables are normalized into a closed tree: leaves carry a
//! [`LeafKind`] obtained from a fixed classification table, and composites
//! ([`CompositeKind`]) hold an ordered, non-empty list of children.
//!
//! | Name | Class | Natural basis |
//! |------|-------|---------------|
//! | `PauliZ`, `PauliX`, `PauliY`, `Projector` | discrete | computational (after diagonalization) |
//! | `NumberOperator`, `TensorN`, `FockStateProjector`, `Parity` | continuous | Fock |
//! | `QuadX`, `QuadP`, `QuadOperator(φ)` | continuous | quadrature at angle 0, π/2, φ |
//! | `Heterodyne(φ?)` | continuous | coherent |
//! | `PolyXP`, `QuadraticPhase` | continuous | none |
//! | `ConditionalNumber` | hybrid | Fock on the qumode |
//! | `ConditionalQuadX` | hybrid | quadrature on the qumode |
//! | `Identity` | neutral | none required |

use rustc_hash::FxHashSet;
use std::f64::consts::FRAC_PI_2;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::frontend::RawObservable;
use crate::wire::{WireId, WireTable};

/// The basis in which a continuous observable is diagonal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NaturalBasis {
    /// Function of the number operator.
    Fock,
    /// Function of the quadrature `x cos θ + p sin θ`.
    Quadrature {
        /// Quadrature angle θ.
        angle: f64,
    },
    /// Function of the complex amplitude, read out by heterodyne detection.
    Coherent {
        /// Reference phase.
        phase: f64,
    },
}

/// Classification of an observable leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafKind {
    /// Qubit observable with a discrete eigenbasis, reached by applying
    /// `diagonalizing` (gate names, in order) to each wire.
    Discrete {
        /// Single-qubit gates rotating the eigenbasis onto Z.
        diagonalizing: &'static [&'static str],
    },
    /// Qumode observable; `None` when it has no natural basis.
    Continuous {
        /// Natural readout basis.
        basis: Option<NaturalBasis>,
    },
    /// Mixed observable. Wires are split by [`HYBRID_WIRE_ORDER`]; qubit
    /// wires are read in Z, qumode wires by the continuous rule.
    ///
    /// [`HYBRID_WIRE_ORDER`]: crate::HYBRID_WIRE_ORDER
    Hybrid {
        /// Number of qumode wires.
        num_continuous: usize,
        /// Natural basis of the qumode part.
        basis: Option<NaturalBasis>,
    },
    /// Identity: constrains neither type nor basis.
    Identity,
}

/// A classified observable leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Front-end name.
    pub name: String,
    /// Wires the leaf acts on.
    pub wires: Vec<WireId>,
    /// Classification.
    pub kind: LeafKind,
}

/// Kinds of composite observables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompositeKind {
    /// Linear combination.
    Sum,
    /// Operator product.
    Product,
    /// Adjoint.
    Adjoint,
    /// Power with the given exponent.
    Power(f64),
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeKind::Sum => f.write_str("Sum"),
            CompositeKind::Product => f.write_str("Prod"),
            CompositeKind::Adjoint => f.write_str("Adjoint"),
            CompositeKind::Power(_) => f.write_str("Pow"),
        }
    }
}

/// A normalized observable tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservableNode {
    /// Classified leaf.
    Leaf(Leaf),
    /// Composite with ordered, non-empty children.
    Composite {
        /// Composite kind.
        kind: CompositeKind,
        /// Children in front-end order.
        children: Vec<ObservableNode>,
    },
}

impl ObservableNode {
    /// Normalize a front-end observable, interning its wires into `wires`.
    pub fn from_raw(raw: &RawObservable, wires: &mut WireTable) -> IrResult<Self> {
        match raw {
            RawObservable::Named {
                name,
                wires: leaf_wires,
                params,
            } => {
                let kind = classify(name, leaf_wires.len(), params)?;
                let mut seen = FxHashSet::default();
                let mut ids = Vec::with_capacity(leaf_wires.len());
                for w in leaf_wires {
                    if !seen.insert(w) {
                        return Err(IrError::DuplicateWire {
                            wire: w.clone(),
                            name: name.clone(),
                        });
                    }
                    ids.push(wires.intern(w));
                }
                Ok(ObservableNode::Leaf(Leaf {
                    name: name.clone(),
                    wires: ids,
                    kind,
                }))
            }
            RawObservable::Sum { terms } => Self::composite(CompositeKind::Sum, terms, wires),
            RawObservable::Prod { factors } => {
                Self::composite(CompositeKind::Product, factors, wires)
            }
            RawObservable::Adjoint { base } => Ok(ObservableNode::Composite {
                kind: CompositeKind::Adjoint,
                children: vec![Self::from_raw(base, wires)?],
            }),
            RawObservable::Pow { base, exponent } => Ok(ObservableNode::Composite {
                kind: CompositeKind::Power(*exponent),
                children: vec![Self::from_raw(base, wires)?],
            }),
        }
    }

    fn composite(
        kind: CompositeKind,
        raw_children: &[RawObservable],
        wires: &mut WireTable,
    ) -> IrResult<Self> {
        if raw_children.is_empty() {
            return Err(IrError::EmptyComposite(kind.to_string()));
        }
        let children = raw_children
            .iter()
            .map(|c| Self::from_raw(c, wires))
            .collect::<IrResult<Vec<_>>>()?;
        Ok(ObservableNode::Composite { kind, children })
    }

    /// Short name used in diagnostics.
    pub fn name(&self) -> String {
        match self {
            ObservableNode::Leaf(leaf) => leaf.name.clone(),
            ObservableNode::Composite { kind, .. } => kind.to_string(),
        }
    }

    /// Visit every leaf in depth-first, left-to-right order.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut out = vec![];
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                ObservableNode::Leaf(leaf) => out.push(leaf),
                ObservableNode::Composite { children, .. } => stack.extend(children.iter().rev()),
            }
        }
        out
    }
}

const NO_ROTATION: &[&str] = &[];

/// Look up a front-end observable name in the classification table.
pub fn classify(name: &str, num_wires: usize, params: &[f64]) -> IrResult<LeafKind> {
    let malformed = |reason: &str| IrError::MalformedObservable {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if num_wires == 0 {
        return Err(malformed("acts on no wires"));
    }

    let kind = match name {
        "Identity" => LeafKind::Identity,
        "PauliZ" | "Projector" => LeafKind::Discrete {
            diagonalizing: NO_ROTATION,
        },
        "PauliX" => LeafKind::Discrete {
            diagonalizing: &["Hadamard"],
        },
        "PauliY" => LeafKind::Discrete {
            diagonalizing: &["PauliZ", "S", "Hadamard"],
        },
        "NumberOperator" | "TensorN" | "FockStateProjector" | "Parity" => LeafKind::Continuous {
            basis: Some(NaturalBasis::Fock),
        },
        "QuadX" => LeafKind::Continuous {
            basis: Some(NaturalBasis::Quadrature { angle: 0.0 }),
        },
        "QuadP" => LeafKind::Continuous {
            basis: Some(NaturalBasis::Quadrature { angle: FRAC_PI_2 }),
        },
        "QuadOperator" => {
            let angle = *params
                .first()
                .ok_or_else(|| malformed("missing quadrature angle"))?;
            LeafKind::Continuous {
                basis: Some(NaturalBasis::Quadrature { angle }),
            }
        }
        "Heterodyne" => LeafKind::Continuous {
            basis: Some(NaturalBasis::Coherent {
                phase: params.first().copied().unwrap_or(0.0),
            }),
        },
        "PolyXP" | "QuadraticPhase" => LeafKind::Continuous { basis: None },
        "ConditionalNumber" | "ConditionalQuadX" => {
            if num_wires < 2 {
                return Err(malformed("hybrid observable needs a qumode and a qubit"));
            }
            let basis = if name == "ConditionalNumber" {
                NaturalBasis::Fock
            } else {
                NaturalBasis::Quadrature { angle: 0.0 }
            };
            LeafKind::Hybrid {
                num_continuous: 1,
                basis: Some(basis),
            }
        }
        other => return Err(IrError::UnknownObservable(other.to_string())),
    };
    Ok(kind)
}
