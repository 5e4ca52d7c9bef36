//! Hybrid Circuit Intermediate Representation
//!
//! This crate holds the operation graph model for circuits that mix
//! two-level registers (qubits) with oscillator registers (qumodes). It is
//! the input side of the static analyzer in `hybrid-sa`.
//!
//! # Core Components
//!
//! - **Wires**: [`Wire`] front-end labels, interned into dense [`WireId`]s by
//!   a [`WireTable`]
//! - **Operations**: [`Operation`] with a [`Capability`] tag telling which wire
//!   types it acts on
//! - **Observables**: [`ObservableNode`] trees of classified [`Leaf`]s and
//!   composites
//! - **Circuit**: [`Circuit`], the normalized ordered program
//! - **Front end**: [`CircuitDescription`] and friends, the records a front
//!   end hands over (also the CLI's JSON format)
//!
//! # Example
//!
//! ```rust
//! use hybrid_ir::{Circuit, Param, RawObservable, Wire};
//!
//! let mut circuit = Circuit::new("cd_readout");
//! circuit
//!     .hybrid("ConditionalDisplacement", [Wire::from("m"), Wire::from("q")], 1, [Param::Real(0.5)])
//!     .unwrap()
//!     .measure(&RawObservable::named("QuadX", [Wire::from("m")]))
//!     .unwrap();
//!
//! assert_eq!(circuit.num_wires(), 2);
//! assert_eq!(circuit.operations().len(), 1);
//! ```
//!
//! # Hybrid wire convention
//!
//! Hybrid operations list their qumode wires first ([`HYBRID_WIRE_ORDER`]).

pub mod circuit;
pub mod error;
pub mod frontend;
pub mod gate;
pub mod observable;
pub mod operation;
pub mod wire;

pub use circuit::{Circuit, Measurement};
pub use error::{IrError, IrResult};
pub use frontend::{CircuitDescription, RawCapability, RawObservable, RawOperation};
pub use observable::{CompositeKind, Leaf, LeafKind, NaturalBasis, ObservableNode};
pub use operation::{Capability, Operation, Param};
pub use wire::{HYBRID_WIRE_ORDER, HybridWireOrder, Wire, WireId, WireTable, WireType};
