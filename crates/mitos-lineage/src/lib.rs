//! Mitos Lineage -- propagation lineage forest with derived descent metadata.
//!
//! This crate models a population of entities that are founded once and then
//! replicate indefinitely, each clone carrying a permanent link to its parent.
//! A [`Forest`](forest::Forest) is an append-only arena of propagules; every
//! propagule's founder and generation are derived once at construction and
//! never recomputed, and identities come from an explicit
//! [`IdentityAllocator`](identity::IdentityAllocator) that is unique-forever
//! and strictly increasing in creation order.
//!
//! # Quick Start
//!
//! ```
//! use mitos_lineage::prelude::*;
//!
//! let mut forest: Forest = Forest::new();
//! let founder = forest.found();
//! let child = forest.replicate(founder)?;
//!
//! let node = forest.get(child).unwrap();
//! assert_eq!(node.generation(), 1);
//! assert_eq!(node.founder(), founder);
//! # Ok::<(), mitos_lineage::LineageError>(())
//! ```

#![deny(unsafe_code)]

pub mod descent;
pub mod forest;
pub mod identity;
pub mod propagule;

use identity::PropagatorId;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by forest operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineageError {
    /// The identity does not name a propagule in this forest.
    #[error("propagator {id} does not exist in this forest")]
    UnknownPropagator { id: PropagatorId },

    /// Two reconstruction edges claim the same child identity.
    #[error("duplicate propagator identity {id} in edge set")]
    DuplicateIdentity { id: PropagatorId },

    /// A reconstruction edge references a parent that is absent from the edge
    /// set or does not precede its child in identity order.
    #[error("propagator {child} references unknown parent {parent}")]
    UnknownParent {
        child: PropagatorId,
        parent: PropagatorId,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::descent::Descent;
    pub use crate::forest::Forest;
    pub use crate::identity::{IdentityAllocator, PropagatorId};
    pub use crate::propagule::{Propagule, Replicator};
    pub use crate::LineageError;
}

// ---------------------------------------------------------------------------
// Integration tests
// ---------------------------------------------------------------------------
