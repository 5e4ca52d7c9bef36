//! Front-end operation names and their OpenQASM spellings.
//!
//! Qubit gates follow `stdgates.inc`. Qumode and hybrid gates follow the
//! `cvstdgates.inc` naming (`cv_` prefix).

/// Qubit gates from `stdgates.inc`.
const STD_GATES: &[(&str, &str)] = &[
    ("GlobalPhase", "gphase"),
    ("Identity", "id"),
    ("Hadamard", "h"),
    ("PauliX", "x"),
    ("PauliY", "y"),
    ("PauliZ", "z"),
    ("S", "s"),
    ("Adjoint(S)", "sdg"),
    ("T", "t"),
    ("Adjoint(T)", "tdg"),
    ("SX", "sx"),
    ("Rot", "u"),
    ("RX", "rx"),
    ("RY", "ry"),
    ("RZ", "rz"),
    ("PhaseShift", "p"),
    ("ControlledPhaseShift", "cp"),
    ("CNOT", "cx"),
    ("CZ", "cz"),
    ("CY", "cy"),
    ("CH", "ch"),
    ("SWAP", "swap"),
    ("CSWAP", "cswap"),
    ("Toffoli", "ccx"),
    ("CRX", "crx"),
    ("CRY", "cry"),
    ("CRZ", "crz"),
];

/// Qumode and hybrid gates from `cvstdgates.inc`.
const CV_GATES: &[(&str, &str)] = &[
    ("Displacement", "cv_d"),
    ("Rotation", "cv_r"),
    ("Squeezing", "cv_sq"),
    ("Beamsplitter", "cv_bs"),
    ("TwoModeSqueezing", "cv_sq2"),
    ("CubicPhase", "cv_p3"),
    ("SelectiveNumberArbitraryPhase", "cv_snap"),
    ("ConditionalDisplacement", "cv_cd"),
    ("SelectiveQubitRotation", "cv_sqr"),
    ("JaynesCummings", "cv_jc"),
    ("AntiJaynesCummings", "cv_ajc"),
    ("ModeSwap", "cv_swap"),
    ("Fourier", "cv_f"),
    ("ConditionalParity", "cv_cp"),
    ("ConditionalRotation", "cv_cr"),
    ("ConditionalBeamsplitter", "cv_cbs"),
    ("ConditionalTwoModeSqueezing", "cv_csq2"),
];

/// OpenQASM name of a known gate.
pub fn qasm_name(name: &str) -> Option<&'static str> {
    STD_GATES
        .iter()
        .chain(CV_GATES)
        .find(|(front, _)| *front == name)
        .map(|(_, qasm)| *qasm)
}
