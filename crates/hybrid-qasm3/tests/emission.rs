//! Byte-exact emission tests.

use hybrid_ir::{Circuit, Param, RawObservable, Wire};
use hybrid_qasm3::{EmitterConfig, emit, to_openqasm};
use hybrid_sa::analyze;

fn w(label: &str) -> Wire {
    Wire::from(label)
}

/// Helper: `ConditionalDisplacement` on `[m, q]`, then `x̂` on `m` and `σz`
/// on `q` as two separate measurements.
fn cd_readout() -> Circuit {
    let mut circuit = Circuit::new("cd_readout");
    circuit
        .hybrid("ConditionalDisplacement", [w("m"), w("q")], 1, [Param::Real(0.5)])
        .unwrap()
        .measure(&RawObservable::named("QuadX", [w("m")]))
        .unwrap()
        .measure(&RawObservable::named("PauliZ", [w("q")]))
        .unwrap();
    circuit
}

// ============================================================================
// Hybrid readout
// ============================================================================

#[test]
fn test_cd_readout_permissive() {
    let qasm = to_openqasm(&cd_readout(), &EmitterConfig::default()).unwrap();
    let expected = "\
OPENQASM 3.0;
include \"stdgates.inc\";
include \"cvstdgates.inc\";

qubit[1] q;
qumode[1] m;

def state_prep() {
    reset q;
    reset m;
    cv_cd(0.500000) m[0], q[0];
}

state_prep();
cv_r(0.000000) m[0];
float[32] c0 = homodyne m[0];
bit c1 = measure q[0];
";
    assert_eq!(qasm, expected);
}

#[test]
fn test_cd_readout_strict() {
    let qasm = to_openqasm(&cd_readout(), &EmitterConfig::new().strict()).unwrap();
    let expected = "\
OPENQASM 3.0;
include \"stdgates.inc\";
include \"cvstdgates.inc\";

qubit[1] q;
qubit[1] m;
def homodyne(qubit r) -> float[32] {}

def state_prep() {
    reset q;
    reset m;
    cv_cd(0.500000) m[0], q[0];
}

state_prep();
cv_r(0.000000) m[0];
float[32] c0 = homodyne(m[0]);
bit c1 = measure q[0];
";
    assert_eq!(qasm, expected);
}

#[test]
fn test_strict_stubs_follow_first_use() {
    let mut circuit = Circuit::new("two_modes");
    circuit
        .continuous("Displacement", [w("a")], [Param::Real(0.3), Param::Real(0.0)])
        .unwrap()
        .continuous("Squeezing", [w("b")], [Param::Real(0.1), Param::Real(0.0)])
        .unwrap()
        .measure(&RawObservable::named("Heterodyne", [w("a")]))
        .unwrap()
        .measure(&RawObservable::named("NumberOperator", [w("b")]))
        .unwrap()
        .measure(&RawObservable::named("QuadX", [w("a")]))
        .unwrap();

    let qasm = to_openqasm(&circuit, &EmitterConfig::new().strict()).unwrap();
    let expected = "\
OPENQASM 3.0;
include \"stdgates.inc\";
include \"cvstdgates.inc\";

qubit[2] m;
def heterodyne(qubit r) -> complex[float[32]] {}
def fock_number(qubit r) -> uint[32] {}
def homodyne(qubit r) -> float[32] {}

def state_prep() {
    reset m;
    cv_d(0.300000, 0.000000) m[0];
    cv_sq(0.100000, 0.000000) m[1];
}

state_prep();
cv_r(0.000000) m[0];
complex[float[32]] c0 = heterodyne(m[0]);
uint[32] c1 = fock_number(m[1]);

state_prep();
cv_r(0.000000) m[0];
float[32] c2 = homodyne(m[0]);
";
    assert_eq!(qasm, expected);
}

#[test]
fn test_cd_readout_without_rotations() {
    let qasm = to_openqasm(&cd_readout(), &EmitterConfig::new().with_rotations(false)).unwrap();
    assert!(!qasm.contains("cv_r"));
    assert!(qasm.contains("state_prep();\nfloat[32] c0 = homodyne m[0];\n"));
}

// ============================================================================
// Execution groups
// ============================================================================

#[test]
fn test_colliding_readouts_get_one_invocation_each() {
    let mut circuit = Circuit::new("split");
    circuit
        .hybrid("ConditionalDisplacement", [w("m"), w("q")], 1, [Param::Real(0.5)])
        .unwrap()
        .measure(&RawObservable::named("QuadP", [w("m")]))
        .unwrap()
        .measure(&RawObservable::named("NumberOperator", [w("m")]))
        .unwrap();

    let qasm = to_openqasm(&circuit, &EmitterConfig::new().with_precision(4)).unwrap();
    let tail = qasm.split("}\n").nth(1).unwrap();
    let expected = "
state_prep();
cv_r(1.5708) m[0];
float[32] c0 = homodyne m[0];

state_prep();
uint[32] c1 = fock_number m[0];
";
    assert_eq!(tail, expected);
    assert_eq!(qasm.matches("state_prep();").count(), 2);
}

#[test]
fn test_int_width_independent_of_program_length() {
    for ops in [0usize, 1, 25] {
        let mut circuit = Circuit::new("fock");
        circuit
            .continuous("Displacement", [w("m")], [Param::Real(0.1), Param::Real(0.0)])
            .unwrap();
        for _ in 0..ops {
            circuit
                .continuous("Rotation", [w("m")], [Param::Real(0.2)])
                .unwrap();
        }
        circuit
            .measure(&RawObservable::named("NumberOperator", [w("m")]))
            .unwrap();

        let qasm = to_openqasm(&circuit, &EmitterConfig::new().with_int_bits(12)).unwrap();
        assert!(qasm.contains("uint[12] c0 = fock_number m[0];"));
        assert_eq!(qasm.matches("uint[").count(), 1);
    }
}

#[test]
fn test_pauli_y_diagonalization_order() {
    let mut circuit = Circuit::new("y");
    circuit
        .standard("RX", [w("a")], [Param::Real(0.25)])
        .unwrap()
        .measure(&RawObservable::named("PauliY", [w("a")]))
        .unwrap();

    let qasm = to_openqasm(&circuit, &EmitterConfig::default()).unwrap();
    assert!(qasm.ends_with("state_prep();\nz q[0];\ns q[0];\nh q[0];\nbit c0 = measure q[0];\n"));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_emission_is_deterministic() {
    let circuit = cd_readout();
    let result = analyze(&circuit).unwrap();
    for config in [EmitterConfig::default(), EmitterConfig::new().strict()] {
        let first = emit(&circuit, &result, &config).unwrap();
        let second = emit(&circuit, &result, &config).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_description_to_qasm() {
    let json = r#"{
        "name": "sqr",
        "operations": [
            {"name": "SelectiveQubitRotation", "wires": [0, 1], "params": [1.0, 0.5, 2],
             "capability": "Hybrid", "num_continuous": 1}
        ],
        "measurements": [
            {"Prod": {"factors": [
                {"Named": {"name": "NumberOperator", "wires": [0]}},
                {"Named": {"name": "PauliZ", "wires": [1]}}
            ]}}
        ]
    }"#;
    let desc: hybrid_ir::CircuitDescription = serde_json::from_str(json).unwrap();
    let circuit = Circuit::from_description(&desc).unwrap();
    let qasm = to_openqasm(&circuit, &EmitterConfig::new().with_precision(1)).unwrap();

    assert!(qasm.contains("    cv_sqr(1.0, 0.5, 2) m[0], q[0];\n"));
    assert!(qasm.contains("uint[32] c0 = fock_number m[0];\nbit c1 = measure q[0];\n"));
}
