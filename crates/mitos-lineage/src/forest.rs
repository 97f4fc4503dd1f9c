//! The lineage forest arena.
//!
//! A [`Forest`] owns every propagule of one population together with the
//! [`IdentityAllocator`] that names them. Propagules are addressed by
//! [`PropagatorId`] and the arena only ever grows, so a parent link can never
//! dangle: once a propagule is stored, every ancestor it references is stored
//! too.
//!
//! # Quick Start
//!
//! ```
//! use mitos_lineage::prelude::*;
//!
//! let mut forest: Forest = Forest::new();
//! let founder = forest.found();
//! let child = forest.replicate(founder).unwrap();
//! let grandchild = forest.replicate(child).unwrap();
//!
//! let chain = forest.trace_lineage(grandchild).unwrap();
//! let ids: Vec<PropagatorId> = chain.iter().map(|p| p.index()).collect();
//! assert_eq!(ids, vec![founder, child, grandchild]);
//! ```

use std::collections::HashMap;

use crate::descent::Descent;
use crate::identity::{IdentityAllocator, PropagatorId};
use crate::propagule::{Propagule, Replicator};
use crate::LineageError;

// ---------------------------------------------------------------------------
// Forest
// ---------------------------------------------------------------------------

/// Append-only arena of propagules of kind `P`, rooted at zero or more
/// founders.
///
/// The forest holds the allocator for its population; constructing a fresh
/// forest is how an independent run gets a fresh, reproducible identity
/// sequence starting at 0.
#[derive(Debug)]
pub struct Forest<P: Propagule = Replicator> {
    allocator: IdentityAllocator,
    nodes: Vec<P>,
    /// Identity -> slot in `nodes`. Identities are dense for a forest grown
    /// in-process but may be sparse after reconstruction from records.
    slots: HashMap<PropagatorId, usize>,
}

impl<P: Propagule> Forest<P> {
    /// Create an empty forest with a fresh allocator.
    pub fn new() -> Self {
        Self {
            allocator: IdentityAllocator::new(),
            nodes: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Found a new lineage tree: a generation-0 propagule with a freshly
    /// allocated identity and no parent.
    pub fn found(&mut self) -> PropagatorId {
        let id = self.allocator.next_id();
        self.insert(P::sprout(Descent::founding(id)));
        id
    }

    /// Clone `parent` into a new propagule one generation below it, sharing
    /// its founder.
    ///
    /// Allocates exactly one identity, and only after the parent lookup has
    /// succeeded, so a failed call does not consume identity space.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::UnknownPropagator`] if `parent` is not in this
    /// forest.
    pub fn replicate(&mut self, parent: PropagatorId) -> Result<PropagatorId, LineageError> {
        let parent_descent = self
            .get(parent)
            .ok_or(LineageError::UnknownPropagator { id: parent })?
            .descent()
            .clone();
        let id = self.allocator.next_id();
        self.insert(P::sprout(Descent::offspring(id, &parent_descent)));
        Ok(id)
    }

    /// Look up a propagule by identity.
    pub fn get(&self, id: PropagatorId) -> Option<&P> {
        self.slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    /// Whether `id` names a propagule in this forest.
    pub fn contains(&self, id: PropagatorId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Number of propagules in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest holds no propagules.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all propagules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.nodes.iter()
    }

    /// The raw value of the next identity this forest would allocate.
    pub fn next_identity(&self) -> u64 {
        self.allocator.peek()
    }

    // -- lineage tracing ----------------------------------------------------

    /// The full lineage of `id`, ordered founder-first, self-last.
    ///
    /// The result has length `generation + 1` and is produced by walking
    /// parent links from `id` back to the founder and reversing.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::UnknownPropagator`] if `id` is not in this
    /// forest.
    pub fn trace_lineage(&self, id: PropagatorId) -> Result<Vec<&P>, LineageError> {
        self.walk(id, 0)
    }

    /// The lineage of `id` truncated to generations `>= first_generation`,
    /// ordered founder-side-first, self-last.
    ///
    /// The walk starts at `id` and stops as soon as the generation
    /// requirement fails, so if `first_generation` exceeds the subject's own
    /// generation the result is empty.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::UnknownPropagator`] if `id` is not in this
    /// forest.
    pub fn trace_lineage_from(
        &self,
        id: PropagatorId,
        first_generation: u64,
    ) -> Result<Vec<&P>, LineageError> {
        self.walk(id, first_generation)
    }

    /// Walk parent links from `id` while generations stay `>= floor`, then
    /// reverse into increasing-generation order.
    fn walk(&self, id: PropagatorId, floor: u64) -> Result<Vec<&P>, LineageError> {
        let mut cursor = self
            .get(id)
            .ok_or(LineageError::UnknownPropagator { id })?;
        let mut chain = Vec::with_capacity((cursor.generation() + 1) as usize);

        loop {
            if cursor.generation() < floor {
                break;
            }
            chain.push(cursor);
            match cursor.parent() {
                Some(pid) => {
                    cursor = self
                        .get(pid)
                        .ok_or(LineageError::UnknownPropagator { id: pid })?;
                }
                None => break,
            }
        }

        chain.reverse();
        Ok(chain)
    }

    // -- reconstruction -----------------------------------------------------

    /// Rebuild a forest from parent-child identity pairs, where a self-edge
    /// marks a founder.
    ///
    /// Input order is arbitrary; edges are sorted by child identity before
    /// insertion. Identities strictly increase in creation order, so in a
    /// well-formed edge set every parent identity is strictly below its
    /// child's -- a forward or missing reference surfaces as
    /// [`LineageError::UnknownParent`]. The allocator of the rebuilt forest
    /// resumes strictly above the largest reloaded identity.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::DuplicateIdentity`] if two edges share a child
    /// identity and [`LineageError::UnknownParent`] if a non-self parent is
    /// absent from the edge set or does not precede its child.
    pub fn from_edges(
        edges: impl IntoIterator<Item = (PropagatorId, PropagatorId)>,
    ) -> Result<Self, LineageError> {
        let mut edges: Vec<(PropagatorId, PropagatorId)> = edges.into_iter().collect();
        edges.sort_by_key(|&(child, _)| child);

        let mut forest = Self::new();
        for &(child, parent) in &edges {
            if forest.contains(child) {
                return Err(LineageError::DuplicateIdentity { id: child });
            }
            let descent = if child == parent {
                Descent::founding(child)
            } else {
                let parent_descent = forest
                    .get(parent)
                    .ok_or(LineageError::UnknownParent { child, parent })?
                    .descent();
                Descent::offspring(child, parent_descent)
            };
            forest.insert(P::sprout(descent));
        }

        if let Some(&(last, _)) = edges.last() {
            forest.allocator = IdentityAllocator::starting_at(last.to_raw() + 1);
        }
        tracing::debug!(
            propagules = forest.len(),
            next_identity = forest.next_identity(),
            "rebuilt forest from edge set"
        );
        Ok(forest)
    }

    fn insert(&mut self, propagule: P) {
        let id = propagule.index();
        self.slots.insert(id, self.nodes.len());
        self.nodes.push(propagule);
    }
}

impl<P: Propagule> Default for Forest<P> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> PropagatorId {
        PropagatorId::new(raw)
    }

    #[test]
    fn founders_start_at_generation_zero() {
        let mut forest: Forest = Forest::new();
        let f = forest.found();
        let node = forest.get(f).unwrap();
        assert_eq!(node.generation(), 0);
        assert_eq!(node.parent(), None);
        assert_eq!(node.founder(), f);
        assert!(node.is_founder());
    }

    #[test]
    fn replication_derives_generation_and_founder() {
        let mut forest: Forest = Forest::new();
        let f = forest.found();
        let c1 = forest.replicate(f).unwrap();
        let c2 = forest.replicate(c1).unwrap();

        let node = forest.get(c2).unwrap();
        assert_eq!(node.generation(), 2);
        assert_eq!(node.parent(), Some(c1));
        assert_eq!(node.founder(), f);
        assert!(!node.is_founder());
    }

    #[test]
    fn replicate_unknown_parent_fails_without_burning_an_identity() {
        let mut forest: Forest = Forest::new();
        let before = forest.next_identity();
        let err = forest.replicate(id(99)).unwrap_err();
        assert!(matches!(err, LineageError::UnknownPropagator { .. }));
        assert_eq!(forest.next_identity(), before);
    }

    #[test]
    fn identities_strictly_increase_across_interleaved_lineages() {
        let mut forest: Forest = Forest::new();
        let a = forest.found();
        let b = forest.found();
        let a1 = forest.replicate(a).unwrap();
        let b1 = forest.replicate(b).unwrap();
        let a2 = forest.replicate(a1).unwrap();

        let ids = [a, b, a1, b1, a2];
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        // Parallel lineages interleave: creation order is not generation order.
        assert_eq!(forest.get(b1).unwrap().generation(), 1);
        assert_eq!(forest.get(a2).unwrap().generation(), 2);
    }

    #[test]
    fn trace_is_founder_first_and_gap_free() {
        let mut forest: Forest = Forest::new();
        let f = forest.found();
        let mut tip = f;
        for _ in 0..10 {
            tip = forest.replicate(tip).unwrap();
        }

        let chain = forest.trace_lineage(tip).unwrap();
        assert_eq!(chain.len(), 11);
        assert_eq!(chain[0].index(), f);
        assert_eq!(chain[10].index(), tip);
        for (gen, node) in chain.iter().enumerate() {
            assert_eq!(node.generation(), gen as u64);
            assert_eq!(node.founder(), f);
        }
    }

    #[test]
    fn walking_parent_links_generation_times_reaches_the_founder() {
        let mut forest: Forest = Forest::new();
        let f = forest.found();
        let mut tip = f;
        for _ in 0..5 {
            tip = forest.replicate(tip).unwrap();
        }

        let mut cursor = forest.get(tip).unwrap();
        for _ in 0..cursor.generation() {
            cursor = forest.get(cursor.parent().unwrap()).unwrap();
        }
        assert!(cursor.is_founder());
        assert_eq!(cursor.index(), forest.get(tip).unwrap().founder());
    }

    #[test]
    fn truncated_trace_keeps_generations_at_or_above_the_bound() {
        let mut forest: Forest = Forest::new();
        let f = forest.found();
        let c1 = forest.replicate(f).unwrap();
        let c2 = forest.replicate(c1).unwrap();
        let c3 = forest.replicate(c2).unwrap();

        let chain = forest.trace_lineage_from(c3, 2).unwrap();
        let ids: Vec<PropagatorId> = chain.iter().map(|p| p.index()).collect();
        assert_eq!(ids, vec![c2, c3]);

        // Bound 0 is the full trace.
        assert_eq!(forest.trace_lineage_from(c3, 0).unwrap().len(), 4);
    }

    #[test]
    fn trace_bound_above_generation_is_empty() {
        let mut forest: Forest = Forest::new();
        let f = forest.found();
        let c1 = forest.replicate(f).unwrap();

        assert!(forest.trace_lineage_from(c1, 2).unwrap().is_empty());
        assert!(forest.trace_lineage_from(f, 1).unwrap().is_empty());
        // Bound equal to the subject's generation keeps only the subject.
        let only_self = forest.trace_lineage_from(c1, 1).unwrap();
        assert_eq!(only_self.len(), 1);
        assert_eq!(only_self[0].index(), c1);
    }

    #[test]
    fn trace_of_unknown_id_fails() {
        let forest: Forest = Forest::new();
        assert!(matches!(
            forest.trace_lineage(id(0)),
            Err(LineageError::UnknownPropagator { .. })
        ));
    }

    #[test]
    fn from_edges_rebuilds_descent_exactly() {
        // Two trees: 0 -> 1 -> 3 and 2 -> 4, listed out of order.
        let edges = vec![
            (id(4), id(2)),
            (id(0), id(0)),
            (id(3), id(1)),
            (id(2), id(2)),
            (id(1), id(0)),
        ];
        let forest: Forest = Forest::from_edges(edges).unwrap();

        assert_eq!(forest.len(), 5);
        assert_eq!(forest.get(id(3)).unwrap().generation(), 2);
        assert_eq!(forest.get(id(3)).unwrap().founder(), id(0));
        assert_eq!(forest.get(id(4)).unwrap().generation(), 1);
        assert_eq!(forest.get(id(4)).unwrap().founder(), id(2));
        assert!(forest.get(id(2)).unwrap().is_founder());
        assert_eq!(forest.next_identity(), 5);
    }

    #[test]
    fn from_edges_resumed_allocation_stays_above_reloaded_ids() {
        let edges = vec![(id(0), id(0)), (id(7), id(0))];
        let mut forest: Forest = Forest::from_edges(edges).unwrap();
        let fresh = forest.replicate(id(7)).unwrap();
        assert_eq!(fresh, id(8));
    }

    #[test]
    fn from_edges_rejects_duplicates_and_unknown_parents() {
        let dup = vec![(id(0), id(0)), (id(0), id(0))];
        assert!(matches!(
            Forest::<Replicator>::from_edges(dup),
            Err(LineageError::DuplicateIdentity { .. })
        ));

        let orphan = vec![(id(1), id(0))];
        assert!(matches!(
            Forest::<Replicator>::from_edges(orphan),
            Err(LineageError::UnknownParent { .. })
        ));

        // A parent listed after its child by identity order is malformed:
        // identities increase in creation order.
        let forward = vec![(id(1), id(2)), (id(2), id(2))];
        assert!(matches!(
            Forest::<Replicator>::from_edges(forward),
            Err(LineageError::UnknownParent { .. })
        ));
    }

    #[test]
    fn empty_forest_from_no_edges() {
        let forest: Forest = Forest::from_edges(Vec::new()).unwrap();
        assert!(forest.is_empty());
        assert_eq!(forest.next_identity(), 0);
    }
}
