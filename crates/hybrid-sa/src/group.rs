//! Execution grouping of terminal measurements.
//!
//! Measurements are packed first-fit, in declaration order, into groups that
//! can share one execution of the preparation circuit. A measurement fits a
//! group when none of its wires already has a different readout there.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::debug;

use hybrid_ir::{Operation, WireId};

use crate::schema::{BasisSchema, MeasurementSchema, WireReadout};

/// Measurements that are read out from one execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementGroup {
    /// Indices of the measurements served by this group, ascending.
    pub measurements: Vec<usize>,
    /// One readout per wire, in first-placement order.
    pub readouts: Vec<(WireId, BasisSchema)>,
    /// Operations to apply before readout, in the order of `readouts`.
    pub diagonalizing: Vec<Operation>,
}

impl MeasurementGroup {
    /// Schema read on `wire` in this group.
    pub fn basis(&self, wire: WireId) -> Option<BasisSchema> {
        self.readouts
            .iter()
            .find(|(w, _)| *w == wire)
            .map(|(_, s)| *s)
    }
}

#[derive(Default)]
struct OpenGroup<'s> {
    measurements: Vec<usize>,
    readouts: Vec<(WireId, &'s WireReadout)>,
    by_wire: FxHashMap<WireId, &'s WireReadout>,
}

impl OpenGroup<'_> {
    fn finish(self) -> MeasurementGroup {
        MeasurementGroup {
            measurements: self.measurements,
            readouts: self.readouts.iter().map(|(w, r)| (*w, r.schema)).collect(),
            diagonalizing: self
                .readouts
                .iter()
                .flat_map(|(_, r)| r.diagonalizing.iter().cloned())
                .collect(),
        }
    }
}

/// Partition measurements into execution groups.
///
/// Greedy first-fit: each measurement goes to the earliest group without a
/// colliding readout, or opens a new group. Only groups that already hold
/// one of the measurement's wires can collide, so the scan is driven by a
/// per-wire index instead of a pass over all groups.
pub fn group_measurements(schemas: &[MeasurementSchema]) -> Vec<MeasurementGroup> {
    let mut groups: Vec<OpenGroup<'_>> = vec![];
    let mut wire_groups: FxHashMap<WireId, Vec<usize>> = FxHashMap::default();
    let mut blocked: FxHashSet<usize> = FxHashSet::default();

    for (index, schema) in schemas.iter().enumerate() {
        blocked.clear();
        for (wire, readout) in schema.iter() {
            for &g in wire_groups.get(&wire).map(Vec::as_slice).unwrap_or_default() {
                if groups[g].by_wire.get(&wire).is_some_and(|r| *r != readout) {
                    blocked.insert(g);
                }
            }
        }

        let target = (0..groups.len())
            .find(|g| !blocked.contains(g))
            .unwrap_or(groups.len());
        if target == groups.len() {
            groups.push(OpenGroup::default());
        }

        let group = &mut groups[target];
        group.measurements.push(index);
        for (wire, readout) in schema.iter() {
            if group.by_wire.contains_key(&wire) {
                continue;
            }
            group.by_wire.insert(wire, readout);
            group.readouts.push((wire, readout));
            wire_groups.entry(wire).or_default().push(target);
        }
    }

    debug!(
        "Grouped {} measurements into {} executions",
        schemas.len(),
        groups.len()
    );
    groups.into_iter().map(OpenGroup::finish).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TypeContext;
    use crate::schema::resolve_measurements;
    use hybrid_ir::{Circuit, RawObservable, Wire};

    fn schemas_for(measurements: &[RawObservable]) -> (Circuit, Vec<MeasurementSchema>) {
        let mut circuit = Circuit::new("group");
        for m in measurements {
            circuit.measure(m).unwrap();
        }
        let schemas = {
            let mut ctx = TypeContext::new(&circuit);
            resolve_measurements(&circuit, &mut ctx).unwrap()
        };
        (circuit, schemas)
    }

    fn named(name: &str, wire: &str) -> RawObservable {
        RawObservable::named(name, [Wire::from(wire)])
    }

    #[test]
    fn test_disjoint_measurements_share_one_group() {
        let (_, schemas) = schemas_for(&[
            named("QuadX", "a"),
            named("NumberOperator", "b"),
            named("PauliZ", "c"),
        ]);
        let groups = group_measurements(&schemas);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].measurements, vec![0, 1, 2]);
        assert_eq!(groups[0].readouts.len(), 3);
    }

    #[test]
    fn test_collision_opens_new_group_in_order() {
        let (_, schemas) = schemas_for(&[named("QuadX", "a"), named("NumberOperator", "a")]);
        let groups = group_measurements(&schemas);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].measurements, vec![0]);
        assert_eq!(groups[0].basis(WireId(0)), Some(BasisSchema::Position));
        assert_eq!(groups[1].measurements, vec![1]);
        assert_eq!(groups[1].basis(WireId(0)), Some(BasisSchema::Discrete));
    }

    #[test]
    fn test_identical_readouts_are_shared() {
        let (_, schemas) = schemas_for(&[named("QuadX", "a"), named("QuadX", "a")]);
        let groups = group_measurements(&schemas);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].measurements, vec![0, 1]);
        assert_eq!(groups[0].readouts, vec![(WireId(0), BasisSchema::Position)]);
        assert_eq!(groups[0].diagonalizing.len(), 1);
    }

    #[test]
    fn test_first_fit_returns_to_earlier_group() {
        // a:x | a:n | b:n fits the first group again.
        let (_, schemas) = schemas_for(&[
            named("QuadX", "a"),
            named("NumberOperator", "a"),
            named("NumberOperator", "b"),
        ]);
        let groups = group_measurements(&schemas);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].measurements, vec![0, 2]);
        assert_eq!(groups[1].measurements, vec![1]);
    }

    #[test]
    fn test_blocked_by_any_wire() {
        let (_, schemas) = schemas_for(&[
            RawObservable::Prod {
                factors: vec![named("QuadX", "a"), named("QuadX", "b")],
            },
            RawObservable::Prod {
                factors: vec![named("QuadX", "a"), named("QuadP", "b")],
            },
        ]);
        let groups = group_measurements(&schemas);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].readouts.len(), 2);
    }

    #[test]
    fn test_pauli_bases_do_not_share() {
        let (_, schemas) = schemas_for(&[named("PauliZ", "q"), named("PauliX", "q")]);
        let groups = group_measurements(&schemas);
        assert_eq!(groups.len(), 2);
        assert!(groups[0].diagonalizing.is_empty());
        assert_eq!(groups[1].diagonalizing.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_measurements(&[]).is_empty());
    }
}
