//! Static Analysis for Hybrid Circuits
//!
//! This crate checks a normalized [`hybrid_ir::Circuit`] before emission:
//! every wire gets exactly one type, every terminal measurement gets a
//! readout schema, and measurements are packed into as few preparation
//! runs as their readouts allow.
//!
//! # Pipeline
//!
//! ```text
//! Circuit
//!    │
//!    ├── infer_wire_types      (operations fix qubit/qumode types)
//!    ├── resolve_measurements  (observables fix readouts, may type wires)
//!    ├── TypeContext::finish   (no wire left untyped)
//!    └── group_measurements    (first-fit execution groups)
//!    │
//!    ▼
//! StaticAnalysisResult
//! ```
//!
//! All stages share one [`TypeContext`]; the first error aborts the run.
//!
//! # Example
//!
//! ```rust
//! use hybrid_ir::{Circuit, Param, RawObservable, Wire, WireType};
//! use hybrid_sa::{BasisSchema, analyze};
//!
//! let mut circuit = Circuit::new("cd_readout");
//! circuit
//!     .hybrid("ConditionalDisplacement", [Wire::from("m"), Wire::from("q")], 1, [Param::Real(0.5)])
//!     .unwrap()
//!     .measure(&RawObservable::named("QuadX", [Wire::from("m")]))
//!     .unwrap()
//!     .measure(&RawObservable::named("PauliZ", [Wire::from("q")]))
//!     .unwrap();
//!
//! let result = analyze(&circuit).unwrap();
//! assert_eq!(result.continuous_wires().len(), 1);
//! assert_eq!(result.groups().len(), 1);
//! assert_eq!(result.groups()[0].readouts[0].1, BasisSchema::Position);
//! ```

pub mod context;
pub mod error;
pub mod group;
pub mod infer;
pub mod result;
pub mod schema;

pub use context::TypeContext;
pub use error::{AnalysisError, AnalysisResult, Origin, Site};
pub use group::{MeasurementGroup, group_measurements};
pub use infer::infer_wire_types;
pub use result::{BackendProfile, StaticAnalysisResult, analyze};
pub use schema::{
    BasisSchema, MeasurementSchema, ValueKind, WireReadout, resolve_measurements,
    resolve_observable,
};
