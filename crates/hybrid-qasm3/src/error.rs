//! Error types for the emitter.

use hybrid_sa::AnalysisError;
use thiserror::Error;

/// Errors that can occur during emission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// The circuit failed analysis.
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// The analysis result does not describe the circuit being emitted.
    /// Indicates a bug in the caller's stage ordering, not a bad circuit.
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

/// Result type for emission.
pub type EmitResult<T> = Result<T, EmitError>;
