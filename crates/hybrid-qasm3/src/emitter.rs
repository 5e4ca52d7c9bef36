//! OpenQASM 3 emitter for analysed hybrid circuits.

use hybrid_ir::{Circuit, Operation, WireId, WireType, gate::qasm_name};
use hybrid_sa::{BasisSchema, MeasurementGroup, StaticAnalysisResult, analyze};
use tracing::{debug, info, instrument};

use crate::config::EmitterConfig;
use crate::error::{EmitError, EmitResult};

const VERSION: &str = "OPENQASM 3.0;";
const STD_INCLUDE: &str = "stdgates.inc";
const CV_INCLUDE: &str = "cvstdgates.inc";
const QUMODE_KEYWORD: &str = "qumode";
const QUBIT_KEYWORD: &str = "qubit";
const PREP_ROUTINE: &str = "state_prep";

/// Emit an analysed circuit as OpenQASM 3 source.
///
/// `result` must be the analysis of `circuit`; a result that does not match
/// is reported as [`EmitError::Invariant`].
#[instrument(skip_all, fields(circuit = circuit.name(), mode = ?config.mode))]
pub fn emit(
    circuit: &Circuit,
    result: &StaticAnalysisResult,
    config: &EmitterConfig,
) -> EmitResult<String> {
    let mut emitter = Emitter::new(circuit, result, config)?;
    let source = emitter.emit_program();
    info!(
        "Emitted {} bytes: {} executions, {} readouts",
        source.len(),
        result.groups().len(),
        emitter.next_var
    );
    Ok(source)
}

/// Analyse `circuit` and emit it in one step.
pub fn to_openqasm(circuit: &Circuit, config: &EmitterConfig) -> EmitResult<String> {
    let result = analyze(circuit)?;
    emit(circuit, &result, config)
}

/// Readout statement kinds, keyed by wire type and schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readout {
    Measure,
    FockNumber,
    Homodyne,
    Heterodyne,
}

impl Readout {
    fn for_wire(ty: WireType, schema: BasisSchema) -> Option<Self> {
        match (ty, schema) {
            (WireType::Discrete, BasisSchema::Discrete) => Some(Readout::Measure),
            (WireType::Continuous, BasisSchema::Discrete) => Some(Readout::FockNumber),
            (WireType::Continuous, BasisSchema::Position) => Some(Readout::Homodyne),
            (WireType::Continuous, BasisSchema::Coherent) => Some(Readout::Heterodyne),
            (WireType::Discrete, _) => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Readout::Measure => "measure",
            Readout::FockNumber => "fock_number",
            Readout::Homodyne => "homodyne",
            Readout::Heterodyne => "heterodyne",
        }
    }

    fn result_type(self, config: &EmitterConfig) -> String {
        match self {
            Readout::Measure => "bit".into(),
            Readout::FockNumber => format!("uint[{}]", config.int_bits),
            Readout::Homodyne => format!("float[{}]", config.float_bits),
            Readout::Heterodyne => format!("complex[float[{}]]", config.float_bits),
        }
    }

    /// Strict mode rewrites qumode readouts as function calls.
    fn is_call(self, config: &EmitterConfig) -> bool {
        config.is_strict() && self != Readout::Measure
    }
}

struct Emitter<'a> {
    circuit: &'a Circuit,
    result: &'a StaticAnalysisResult,
    config: &'a EmitterConfig,
    /// Register reference per wire, e.g. `q[0]` or `m[2]`.
    operands: Vec<String>,
    /// Readout kind per (group, readout) in emission order.
    readouts: Vec<Vec<Readout>>,
    num_qubits: usize,
    num_qumodes: usize,
    output: String,
    indent: usize,
    next_var: usize,
}

impl<'a> Emitter<'a> {
    fn new(
        circuit: &'a Circuit,
        result: &'a StaticAnalysisResult,
        config: &'a EmitterConfig,
    ) -> EmitResult<Self> {
        if result.num_wires() != circuit.num_wires() {
            return Err(EmitError::Invariant(format!(
                "analysis covers {} wires, circuit has {}",
                result.num_wires(),
                circuit.num_wires()
            )));
        }

        let mut operands = Vec::with_capacity(circuit.num_wires());
        let (mut num_qubits, mut num_qumodes) = (0, 0);
        for i in 0..circuit.num_wires() {
            let wire = WireId(i as u32);
            match result.wire_type(wire) {
                Some(WireType::Discrete) => {
                    operands.push(format!("q[{num_qubits}]"));
                    num_qubits += 1;
                }
                Some(WireType::Continuous) => {
                    operands.push(format!("m[{num_qumodes}]"));
                    num_qumodes += 1;
                }
                None => {
                    return Err(EmitError::Invariant(format!("wire {wire} has no type")));
                }
            }
        }

        for (index, op) in circuit.operations().iter().enumerate() {
            for (wire, ty) in op.wire_requirements() {
                if result.wire_type(wire) != Some(ty) {
                    return Err(EmitError::Invariant(format!(
                        "operation {index} ({}) needs a {ty} on {wire}",
                        op.name
                    )));
                }
            }
        }

        let placed: usize = result.groups().iter().map(|g| g.measurements.len()).sum();
        if placed != circuit.measurements().len() {
            return Err(EmitError::Invariant(format!(
                "groups place {placed} measurements, circuit has {}",
                circuit.measurements().len()
            )));
        }

        let readouts = result
            .groups()
            .iter()
            .enumerate()
            .map(|(g, group)| readouts_of(result, g, group))
            .collect::<EmitResult<Vec<_>>>()?;

        Ok(Self {
            circuit,
            result,
            config,
            operands,
            readouts,
            num_qubits,
            num_qumodes,
            output: String::new(),
            indent: 0,
            next_var: 0,
        })
    }

    fn emit_program(&mut self) -> String {
        self.emit_header();
        self.emit_declarations();
        self.emit_state_prep();

        for g in 0..self.result.groups().len() {
            self.writeln("");
            self.emit_group(g);
        }

        std::mem::take(&mut self.output)
    }

    fn emit_header(&mut self) {
        self.writeln(VERSION);
        self.writeln(&format!("include \"{STD_INCLUDE}\";"));
        if self.num_qumodes > 0 {
            self.writeln(&format!("include \"{CV_INCLUDE}\";"));
        }
        self.writeln("");
    }

    fn emit_declarations(&mut self) {
        if self.num_qubits > 0 {
            self.writeln(&format!("{QUBIT_KEYWORD}[{}] q;", self.num_qubits));
        }
        if self.num_qumodes > 0 {
            let keyword = if self.config.is_strict() {
                QUBIT_KEYWORD
            } else {
                QUMODE_KEYWORD
            };
            self.writeln(&format!("{keyword}[{}] m;", self.num_qumodes));
        }

        if self.config.is_strict() {
            for readout in self.stubs_in_first_use_order() {
                self.writeln(&format!(
                    "def {}({QUBIT_KEYWORD} r) -> {} {{}}",
                    readout.keyword(),
                    readout.result_type(self.config)
                ));
            }
        }

        if self.num_qubits + self.num_qumodes > 0 {
            self.writeln("");
        }
    }

    fn stubs_in_first_use_order(&self) -> Vec<Readout> {
        let mut stubs: Vec<Readout> = vec![];
        for readout in self.readouts.iter().flatten() {
            if readout.is_call(self.config) && !stubs.contains(readout) {
                stubs.push(*readout);
            }
        }
        stubs
    }

    fn emit_state_prep(&mut self) {
        self.writeln(&format!("def {PREP_ROUTINE}() {{"));
        self.indent += 1;
        if self.num_qubits > 0 {
            self.writeln("reset q;");
        }
        if self.num_qumodes > 0 {
            self.writeln("reset m;");
        }
        for op in self.circuit.operations() {
            let statement = self.format_operation(op);
            self.writeln(&statement);
        }
        self.indent -= 1;
        self.writeln("}");
        debug!(
            "state_prep body: {} operations",
            self.circuit.operations().len()
        );
    }

    fn emit_group(&mut self, g: usize) {
        let group = &self.result.groups()[g];
        self.writeln(&format!("{PREP_ROUTINE}();"));

        if self.config.rotations {
            for op in &group.diagonalizing {
                let statement = self.format_operation(op);
                self.writeln(&statement);
            }
        }

        for (k, (wire, _)) in group.readouts.iter().enumerate() {
            let readout = self.readouts[g][k];
            let var = format!("c{}", self.next_var);
            self.next_var += 1;
            let operand = &self.operands[wire.index()];
            let value = if readout.is_call(self.config) {
                format!("{}({operand})", readout.keyword())
            } else {
                format!("{} {operand}", readout.keyword())
            };
            let line = format!("{} {var} = {value};", readout.result_type(self.config));
            self.writeln(&line);
        }
    }

    fn format_operation(&self, op: &Operation) -> String {
        let name = qasm_name(&op.name).unwrap_or(op.name.as_str());
        let wires = op
            .wires
            .iter()
            .map(|w| self.operands[w.index()].as_str())
            .collect::<Vec<_>>()
            .join(", ");

        if op.params.is_empty() {
            format!("{name} {wires};")
        } else {
            let params = op
                .params
                .iter()
                .map(|p| p.format(self.config.precision))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{name}({params}) {wires};")
        }
    }

    fn writeln(&mut self, line: &str) {
        if !line.is_empty() {
            let indent = " ".repeat(self.indent * self.config.indent);
            self.output.push_str(&indent);
            self.output.push_str(line);
        }
        self.output.push('\n');
    }
}

fn readouts_of(
    result: &StaticAnalysisResult,
    g: usize,
    group: &MeasurementGroup,
) -> EmitResult<Vec<Readout>> {
    group
        .readouts
        .iter()
        .map(|&(wire, schema)| {
            let ty = result.wire_type(wire).ok_or_else(|| {
                EmitError::Invariant(format!("group {g} reads untyped wire {wire}"))
            })?;
            Readout::for_wire(ty, schema).ok_or_else(|| {
                EmitError::Invariant(format!(
                    "group {g} needs a {schema} readout on {ty} wire {wire}"
                ))
            })
        })
        .collect()
}
