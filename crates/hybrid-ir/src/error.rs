//! Error types for the IR crate.

use thiserror::Error;

use crate::wire::Wire;

/// Structural errors found while normalizing front-end records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Operation record is structurally invalid.
    #[error("Malformed operation '{name}' (operation {index}): {reason}")]
    MalformedOperation {
        /// Position of the operation in program order.
        index: usize,
        /// Front-end name of the operation.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The same wire appears twice in one operation or observable leaf.
    #[error("Duplicate wire {wire} in '{name}'")]
    DuplicateWire {
        /// The repeated wire.
        wire: Wire,
        /// Operation or observable name.
        name: String,
    },

    /// Observable name missing from the classification table.
    #[error("Unknown observable '{0}'")]
    UnknownObservable(String),

    /// Observable leaf with the wrong number of wires or parameters.
    #[error("Malformed observable '{name}': {reason}")]
    MalformedObservable {
        /// Observable name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Composite observable without children.
    #[error("Composite observable '{0}' has no children")]
    EmptyComposite(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
