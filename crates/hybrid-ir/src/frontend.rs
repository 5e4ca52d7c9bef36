//! Records handed over by the circuit-construction front end.
//!
//! These mirror what a front end knows before normalization: wires are
//! arbitrary labels, hybrid operations may or may not carry their continuous
//! wire count, and observables are referenced by name. [`Circuit`] turns them
//! into the normalized graph model.
//!
//! The same records double as the JSON circuit format read by the CLI:
//!
//! ```json
//! {
//!   "name": "cd_readout",
//!   "operations": [
//!     { "name": "ConditionalDisplacement", "wires": ["m", "q"],
//!       "params": [0.5], "capability": "Hybrid", "num_continuous": 1 }
//!   ],
//!   "measurements": [
//!     { "Named": { "name": "QuadX", "wires": ["m"] } },
//!     { "Named": { "name": "PauliZ", "wires": ["q"] } }
//!   ]
//! }
//! ```
//!
//! [`Circuit`]: crate::Circuit

use serde::{Deserialize, Serialize};

use crate::operation::Param;
use crate::wire::Wire;

/// Capability tag as supplied by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawCapability {
    /// Qubit-only operation.
    Standard,
    /// Qumode-only operation.
    ContinuousNative,
    /// Mixed qubit/qumode operation; requires `num_continuous`.
    Hybrid,
}

/// One operation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOperation {
    /// Operation name.
    pub name: String,
    /// Wires in front-end order.
    pub wires: Vec<Wire>,
    /// Numeric parameters.
    #[serde(default)]
    pub params: Vec<Param>,
    /// Capability tag.
    pub capability: RawCapability,
    /// Number of continuous wires, mandatory for hybrid operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_continuous: Option<usize>,
}

impl RawOperation {
    /// A qubit-only operation.
    pub fn standard(
        name: impl Into<String>,
        wires: impl IntoIterator<Item = Wire>,
        params: impl IntoIterator<Item = Param>,
    ) -> Self {
        Self {
            name: name.into(),
            wires: wires.into_iter().collect(),
            params: params.into_iter().collect(),
            capability: RawCapability::Standard,
            num_continuous: None,
        }
    }

    /// A qumode-only operation.
    pub fn continuous(
        name: impl Into<String>,
        wires: impl IntoIterator<Item = Wire>,
        params: impl IntoIterator<Item = Param>,
    ) -> Self {
        Self {
            capability: RawCapability::ContinuousNative,
            ..Self::standard(name, wires, params)
        }
    }

    /// A hybrid operation with `num_continuous` qumode wires.
    pub fn hybrid(
        name: impl Into<String>,
        wires: impl IntoIterator<Item = Wire>,
        num_continuous: usize,
        params: impl IntoIterator<Item = Param>,
    ) -> Self {
        Self {
            capability: RawCapability::Hybrid,
            num_continuous: Some(num_continuous),
            ..Self::standard(name, wires, params)
        }
    }
}

/// An observable as built by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawObservable {
    /// A leaf, classified by name.
    Named {
        /// Observable name (e.g. `QuadX`, `PauliZ`).
        name: String,
        /// Wires it acts on.
        wires: Vec<Wire>,
        /// Numeric parameters (e.g. the angle of `QuadOperator`).
        #[serde(default)]
        params: Vec<f64>,
    },
    /// Linear combination; coefficients do not affect the basis.
    Sum {
        /// Summands.
        terms: Vec<RawObservable>,
    },
    /// Tensor/operator product.
    Prod {
        /// Factors.
        factors: Vec<RawObservable>,
    },
    /// Hermitian adjoint.
    Adjoint {
        /// The adjointed observable.
        base: Box<RawObservable>,
    },
    /// Integer or real power.
    Pow {
        /// The base observable.
        base: Box<RawObservable>,
        /// Exponent.
        exponent: f64,
    },
}

impl RawObservable {
    /// A named leaf without parameters.
    pub fn named(name: impl Into<String>, wires: impl IntoIterator<Item = Wire>) -> Self {
        RawObservable::Named {
            name: name.into(),
            wires: wires.into_iter().collect(),
            params: vec![],
        }
    }

    /// A named leaf with parameters.
    pub fn with_params(
        name: impl Into<String>,
        wires: impl IntoIterator<Item = Wire>,
        params: impl IntoIterator<Item = f64>,
    ) -> Self {
        RawObservable::Named {
            name: name.into(),
            wires: wires.into_iter().collect(),
            params: params.into_iter().collect(),
        }
    }
}

/// A whole circuit as produced by the front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitDescription {
    /// Circuit name.
    #[serde(default)]
    pub name: String,
    /// Operations in program order.
    #[serde(default)]
    pub operations: Vec<RawOperation>,
    /// Terminal measurements in declaration order.
    #[serde(default)]
    pub measurements: Vec<RawObservable>,
}
