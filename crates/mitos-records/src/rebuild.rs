//! Forest reconstruction from persisted parent records.
//!
//! The per-line parser only validates syntax; reconstruction is where
//! cross-record graph consistency is enforced. Feeding the parent records of
//! any live forest back through
//! [`rebuild_forest`] reproduces every propagule's descent exactly, and the
//! rebuilt forest keeps allocating identities strictly above every reloaded
//! one.

use mitos_lineage::forest::Forest;
use mitos_lineage::propagule::Propagule;
use mitos_lineage::LineageError;

use crate::parent::ParentRecord;

/// Rebuild a forest from a batch of parent records.
///
/// Record order does not matter; a self-edge marks a founder.
///
/// # Errors
///
/// Returns [`LineageError::DuplicateIdentity`] if two records share a child
/// index and [`LineageError::UnknownParent`] if a record references a parent
/// with no record of its own (or one whose identity does not precede the
/// child's).
pub fn rebuild_forest<P: Propagule>(records: &[ParentRecord]) -> Result<Forest<P>, LineageError> {
    tracing::debug!(records = records.len(), "rebuilding forest from parent records");
    Forest::from_edges(
        records
            .iter()
            .map(|record| (record.child_index(), record.parent_index())),
    )
}
