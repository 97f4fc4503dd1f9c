//! Per-propagule lineage bookkeeping.
//!
//! Every propagule kind embeds a [`Descent`]: its own identity, an optional
//! parent identity, and the founder identity and generation number derived
//! once at construction. Nothing here is ever recomputed by walking the
//! forest -- a child's founder and generation come straight from its parent's
//! descent in O(1).

use serde::{Deserialize, Serialize};

use crate::identity::PropagatorId;

/// Lineage metadata fixed at construction.
///
/// Invariant: `generation == 0` iff `parent` is `None` iff `founder == index`.
/// The constructors are crate-internal, so the invariant cannot be violated
/// from outside the forest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Descent {
    index: PropagatorId,
    parent: Option<PropagatorId>,
    founder: PropagatorId,
    generation: u64,
}

impl Descent {
    /// Descent of a generation-0 propagule: no parent, its own founder.
    pub(crate) fn founding(index: PropagatorId) -> Self {
        Self {
            index,
            parent: None,
            founder: index,
            generation: 0,
        }
    }

    /// Descent of a child one generation below `parent`, sharing its founder.
    pub(crate) fn offspring(index: PropagatorId, parent: &Descent) -> Self {
        Self {
            index,
            parent: Some(parent.index),
            founder: parent.founder,
            generation: parent.generation + 1,
        }
    }

    /// This propagule's own identity.
    #[inline]
    pub fn index(&self) -> PropagatorId {
        self.index
    }

    /// The parent's identity, or `None` for a founder.
    #[inline]
    pub fn parent(&self) -> Option<PropagatorId> {
        self.parent
    }

    /// The generation-0 ancestor reached by following parent links.
    #[inline]
    pub fn founder(&self) -> PropagatorId {
        self.founder
    }

    /// Distance in parent-hops from the founder.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether this propagule has no parent.
    #[inline]
    pub fn is_founder(&self) -> bool {
        self.parent.is_none()
    }
}
