//! Error types for the analysis crate.

use std::fmt;

use hybrid_ir::{Circuit, IrError, Wire, WireType};
use serde::Serialize;
use thiserror::Error;

use crate::schema::BasisSchema;

/// Compact reference to the circuit element that constrained a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    /// Operation at this program index.
    Operation(usize),
    /// Measurement at this declaration index.
    Measurement(usize),
}

impl Site {
    /// Attach the element's name for reporting.
    pub fn describe(self, circuit: &Circuit) -> Origin {
        match self {
            Site::Operation(index) => Origin::Operation {
                index,
                name: circuit
                    .operations()
                    .get(index)
                    .map(|op| op.name.clone())
                    .unwrap_or_default(),
            },
            Site::Measurement(index) => Origin::Measurement {
                index,
                name: circuit
                    .measurements()
                    .get(index)
                    .map(hybrid_ir::Measurement::name)
                    .unwrap_or_default(),
            },
        }
    }
}

/// A named circuit element, as reported in errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Origin {
    /// An operation.
    Operation {
        /// Program index.
        index: usize,
        /// Operation name.
        name: String,
    },
    /// A measurement.
    Measurement {
        /// Declaration index.
        index: usize,
        /// Root observable name.
        name: String,
    },
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Operation { index, name } => write!(f, "operation {index} ({name})"),
            Origin::Measurement { index, name } => write!(f, "measurement {index} ({name})"),
        }
    }
}

/// Errors that abort a static analysis run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// Structural error from normalization.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// A wire is required to be both a qubit and a qumode.
    #[error(
        "Aliasing on wire {wire}: {prior} uses it as a {resolved}, but {conflicting} requires a {}",
        .resolved.opposite()
    )]
    Aliasing {
        /// The offending wire.
        wire: Wire,
        /// The type fixed first.
        resolved: WireType,
        /// Where that type was fixed.
        prior: Origin,
        /// Where the opposite type was required.
        conflicting: Origin,
    },

    /// Two parts of one observable need different bases on the same wire.
    #[error("Schema conflict on wire {wire} in {measurement}: {first} vs {second}")]
    SchemaConflict {
        /// The offending wire.
        wire: Wire,
        /// The measurement containing both parts.
        measurement: Origin,
        /// Readout required by the earlier part.
        first: BasisSchema,
        /// Readout required by the later part.
        second: BasisSchema,
    },

    /// A qumode observable without a natural readout basis.
    #[error("Observable '{observable}' on wire {wire} in {measurement} has no natural basis")]
    UnsupportedObservable {
        /// Leaf name.
        observable: String,
        /// The wire it acts on.
        wire: Wire,
        /// The enclosing measurement.
        measurement: Origin,
    },

    /// No operation or measurement determines the wire's type.
    #[error("Wire {wire} is never constrained to a qubit or a qumode")]
    UnresolvedWire {
        /// The unresolved wire.
        wire: Wire,
    },

    /// The circuit needs something the target backend cannot do.
    #[error("Backend '{backend}' cannot run this circuit: {reason}")]
    UnsupportedByBackend {
        /// Backend name.
        backend: String,
        /// What is missing.
        reason: String,
    },
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
