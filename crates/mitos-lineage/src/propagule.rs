//! Propagule kinds.
//!
//! The forest is generic over the concrete kind of entity it grows
//! ([`Forest<P>`](crate::forest::Forest)), so each kind exposes its own type
//! through lookups and traces without downcasting. A kind implements
//! [`Propagule`]: it embeds a [`Descent`] and can be manufactured from one by
//! the forest.
//!
//! [`Replicator`] is the default kind -- an immortal self-cloning entity that
//! carries nothing beyond its descent.

use serde::{Deserialize, Serialize};

use crate::descent::Descent;
use crate::identity::PropagatorId;

// ---------------------------------------------------------------------------
// Propagule
// ---------------------------------------------------------------------------

/// An entity participating in a lineage forest.
///
/// Implementors embed the [`Descent`] handed to [`sprout`](Self::sprout) and
/// return it from [`descent`](Self::descent) unchanged; the provided
/// accessors all delegate to it.
pub trait Propagule: Sized {
    /// Manufacture a value of this kind from freshly derived descent.
    ///
    /// Called only by the forest, which is the sole source of valid descent.
    fn sprout(descent: Descent) -> Self;

    /// The embedded lineage bookkeeping.
    fn descent(&self) -> &Descent;

    /// This propagule's own identity.
    #[inline]
    fn index(&self) -> PropagatorId {
        self.descent().index()
    }

    /// The parent's identity, or `None` for a founder.
    #[inline]
    fn parent(&self) -> Option<PropagatorId> {
        self.descent().parent()
    }

    /// The founder of this propagule's lineage tree.
    #[inline]
    fn founder(&self) -> PropagatorId {
        self.descent().founder()
    }

    /// Distance in parent-hops from the founder.
    #[inline]
    fn generation(&self) -> u64 {
        self.descent().generation()
    }

    /// Whether this propagule is a founder.
    #[inline]
    fn is_founder(&self) -> bool {
        self.descent().is_founder()
    }
}

// ---------------------------------------------------------------------------
// Replicator
// ---------------------------------------------------------------------------

/// An immortal self-cloning propagule.
///
/// Replication never fails and never terminates a lineage;
/// [`Forest::replicate`](crate::forest::Forest::replicate) manufactures a new
/// `Replicator` one generation below the receiver, sharing its founder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Replicator {
    descent: Descent,
}

impl Propagule for Replicator {
    fn sprout(descent: Descent) -> Self {
        Self { descent }
    }

    fn descent(&self) -> &Descent {
        &self.descent
    }
}
