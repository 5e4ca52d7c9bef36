//! `OpenQASM` 3 Emitter for Hybrid Circuits
//!
//! This crate serializes an analysed hybrid circuit into an `OpenQASM` 3
//! superset with qumode registers and qumode readouts.
//!
//! # Program Layout
//!
//! | Section | Example |
//! |---------|---------|
//! | Version and includes | `OPENQASM 3.0;`, `include "cvstdgates.inc";` |
//! | Registers | `qubit[1] q;`, `qumode[1] m;` |
//! | Preparation routine | `def state_prep() { reset q; reset m; cv_cd(0.5) m[0], q[0]; }` |
//! | One block per execution group | `state_prep();`, `cv_r(0.0) m[0];`, `float[32] c0 = homodyne m[0];` |
//!
//! # Readouts
//!
//! | Wire | Schema | Statement |
//! |------|--------|-----------|
//! | qubit | Discrete | `bit c0 = measure q[0];` |
//! | qumode | Discrete | `uint[32] c0 = fock_number m[0];` |
//! | qumode | Position | `float[32] c0 = homodyne m[0];` |
//! | qumode | Coherent | `complex[float[32]] c0 = heterodyne m[0];` |
//!
//! In [`EmitMode::Strict`] qumodes are declared as `qubit` registers and the
//! qumode readouts become calls to synthesized stub functions. That output
//! parses with a standard `OpenQASM` 3 toolchain but is lossy: nothing
//! defines what the stubs or the `cv_` gates do.
//!
//! # Example
//!
//! ```rust
//! use hybrid_ir::{Circuit, Param, RawObservable, Wire};
//! use hybrid_qasm3::{EmitterConfig, to_openqasm};
//!
//! let mut circuit = Circuit::new("cd_readout");
//! circuit
//!     .hybrid("ConditionalDisplacement", [Wire::from("m"), Wire::from("q")], 1, [Param::Real(0.5)])
//!     .unwrap()
//!     .measure(&RawObservable::named("QuadX", [Wire::from("m")]))
//!     .unwrap();
//!
//! let qasm = to_openqasm(&circuit, &EmitterConfig::default()).unwrap();
//! assert!(qasm.contains("qumode[1] m;"));
//! assert!(qasm.contains("cv_cd(0.500000) m[0], q[0];"));
//! assert!(qasm.contains("float[32] c0 = homodyne m[0];"));
//! ```

pub mod config;
pub mod emitter;
pub mod error;

pub use config::{EmitMode, EmitterConfig};
pub use emitter::{emit, to_openqasm};
pub use error::{EmitError, EmitResult};
