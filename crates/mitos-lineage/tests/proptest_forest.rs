//! Property tests for forest growth and lineage tracing.
//!
//! These tests use `proptest` to generate random interleavings of founding
//! and replication and verify that the descent invariants hold for every
//! propagule afterwards.

use mitos_lineage::prelude::*;
use proptest::prelude::*;

/// Operations we can perform on a forest.
#[derive(Debug, Clone)]
enum ForestOp {
    Found,
    /// Replicate the propagule at this position in creation order (mod len).
    Replicate(usize),
}

fn forest_op_strategy() -> impl Strategy<Value = ForestOp> {
    prop_oneof![
        1 => Just(ForestOp::Found),
        4 => (0..64usize).prop_map(ForestOp::Replicate),
    ]
}

/// Apply a random op sequence, always starting from one founder so that
/// replication targets exist.
fn grow(ops: &[ForestOp]) -> (Forest, Vec<PropagatorId>) {
    let mut forest: Forest = Forest::new();
    let mut created = vec![forest.found()];
    for op in ops {
        match op {
            ForestOp::Found => created.push(forest.found()),
            ForestOp::Replicate(i) => {
                let parent = created[i % created.len()];
                created.push(forest.replicate(parent).unwrap());
            }
        }
    }
    (forest, created)
}

proptest! {
    #[test]
    fn random_growth_preserves_descent_invariants(
        ops in prop::collection::vec(forest_op_strategy(), 1..80)
    ) {
        let (forest, created) = grow(&ops);

        // Identities are unique and strictly increasing in creation order.
        for pair in created.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        prop_assert_eq!(forest.len(), created.len());

        for node in forest.iter() {
            // generation == 0 <=> no parent <=> founder == self.
            let zero_gen = node.generation() == 0;
            prop_assert_eq!(zero_gen, node.parent().is_none());
            prop_assert_eq!(zero_gen, node.founder() == node.index());

            // Walking parent exactly `generation` times reaches the founder.
            let mut cursor = node.descent().clone();
            for _ in 0..node.generation() {
                let pid = cursor.parent().unwrap();
                cursor = forest.get(pid).unwrap().descent().clone();
            }
            prop_assert!(cursor.is_founder());
            prop_assert_eq!(cursor.index(), node.founder());
        }
    }

    #[test]
    fn random_growth_traces_are_gap_free(
        ops in prop::collection::vec(forest_op_strategy(), 1..80)
    ) {
        let (forest, created) = grow(&ops);

        for &id in &created {
            let node_generation = forest.get(id).unwrap().generation();
            let chain = forest.trace_lineage(id).unwrap();
            prop_assert_eq!(chain.len() as u64, node_generation + 1);
            for (gen, node) in chain.iter().enumerate() {
                prop_assert_eq!(node.generation(), gen as u64);
            }
            prop_assert_eq!(chain.last().unwrap().index(), id);
        }
    }

    #[test]
    fn truncated_trace_is_a_suffix_of_the_full_trace(
        ops in prop::collection::vec(forest_op_strategy(), 1..60),
        floor in 0u64..16,
    ) {
        let (forest, created) = grow(&ops);

        for &id in &created {
            let full: Vec<PropagatorId> = forest
                .trace_lineage(id)
                .unwrap()
                .iter()
                .map(|p| p.index())
                .collect();
            let truncated: Vec<PropagatorId> = forest
                .trace_lineage_from(id, floor)
                .unwrap()
                .iter()
                .map(|p| p.index())
                .collect();

            let expected: Vec<PropagatorId> = full
                .iter()
                .copied()
                .skip(floor.min(full.len() as u64) as usize)
                .collect();
            prop_assert_eq!(truncated, expected);
        }
    }
}
