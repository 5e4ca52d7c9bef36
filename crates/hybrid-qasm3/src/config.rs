//! Emitter configuration.

use serde::{Deserialize, Serialize};

/// Output dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitMode {
    /// Qumode registers and readouts keep their own keywords
    /// (`qumode`, `homodyne`, `fock_number`, `heterodyne`).
    #[default]
    Permissive,
    /// Standard-compliant erasure.
    ///
    /// Qumodes are declared as `qubit` registers and qumode readouts become
    /// calls to empty-bodied stub functions. A standard parser accepts the
    /// output, but it cannot be executed without external definitions of the
    /// `cv_` gates and the readout functions.
    Strict,
}

/// Knobs for [`emit`](crate::emit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Output dialect.
    pub mode: EmitMode,
    /// Insert diagonalizing operations before readout.
    pub rotations: bool,
    /// Decimal places for real operation parameters.
    pub precision: usize,
    /// Width of Fock-number results.
    pub int_bits: u32,
    /// Width of homodyne results and of each heterodyne component.
    pub float_bits: u32,
    /// Spaces per indentation level.
    pub indent: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            mode: EmitMode::Permissive,
            rotations: true,
            precision: 6,
            int_bits: 32,
            float_bits: 32,
            indent: 4,
        }
    }
}

impl EmitterConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output dialect.
    #[must_use]
    pub fn with_mode(mut self, mode: EmitMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `with_mode(EmitMode::Strict)`.
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_mode(EmitMode::Strict)
    }

    /// Enable or disable diagonalizing operations.
    #[must_use]
    pub fn with_rotations(mut self, rotations: bool) -> Self {
        self.rotations = rotations;
        self
    }

    /// Set the parameter precision.
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the integer result width.
    #[must_use]
    pub fn with_int_bits(mut self, bits: u32) -> Self {
        self.int_bits = bits;
        self
    }

    /// Set the float result width.
    #[must_use]
    pub fn with_float_bits(mut self, bits: u32) -> Self {
        self.float_bits = bits;
        self
    }

    /// Set the indentation width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Whether strict erasure is on.
    pub fn is_strict(&self) -> bool {
        self.mode == EmitMode::Strict
    }
}
