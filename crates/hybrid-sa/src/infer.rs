//! Wire-type inference over operations.

use tracing::debug;

use hybrid_ir::Circuit;

use crate::context::TypeContext;
use crate::error::{AnalysisResult, Site};

/// Fix the type of every wire an operation touches, in program order.
///
/// One forward pass; each (operation, wire) pair costs one slot lookup.
/// The first conflicting requirement aborts with
/// [`AnalysisError::Aliasing`](crate::AnalysisError::Aliasing).
pub fn infer_wire_types(circuit: &Circuit, ctx: &mut TypeContext<'_>) -> AnalysisResult<()> {
    let mut touched = 0usize;
    for (index, op) in circuit.operations().iter().enumerate() {
        for (wire, ty) in op.wire_requirements() {
            ctx.require(wire, ty, Site::Operation(index))?;
            touched += 1;
        }
    }
    debug!(
        "Wire-type inference visited {} operations, {} wire uses",
        circuit.operations().len(),
        touched
    );
    Ok(())
}
