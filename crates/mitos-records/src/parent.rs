//! Single parent-child edge records.
//!
//! A [`ParentRecord`] captures one propagule's parent edge. The flat format
//! has no null, so a founder is recorded as its own parent (a self-edge).
//!
//! The text form is exactly two comma-separated decimal identities, preceded
//! once per file by the fixed header line:
//!
//! ```text
//! childIndex,parentIndex
//! 2,1
//! 0,0
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mitos_lineage::forest::Forest;
use mitos_lineage::identity::PropagatorId;
use mitos_lineage::propagule::Propagule;
use mitos_lineage::LineageError;

use crate::RecordError;

// ---------------------------------------------------------------------------
// ParentRecord
// ---------------------------------------------------------------------------

/// Immutable snapshot of one propagule's parent edge (self-edge for a
/// founder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentRecord {
    child: PropagatorId,
    parent: PropagatorId,
}

impl ParentRecord {
    /// The fixed column header, emitted once per output file, never per
    /// record.
    pub const HEADER: &'static str = "childIndex,parentIndex";

    /// Capture the parent edge of `id` from a live forest.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::UnknownPropagator`] if `id` is not in the
    /// forest.
    pub fn capture<P: Propagule>(
        forest: &Forest<P>,
        id: PropagatorId,
    ) -> Result<Self, LineageError> {
        let node = forest
            .get(id)
            .ok_or(LineageError::UnknownPropagator { id })?;
        Ok(Self {
            child: node.index(),
            parent: node.parent().unwrap_or_else(|| node.index()),
        })
    }

    /// Parse one two-field record line.
    ///
    /// Leading and trailing whitespace around each field is tolerated; the
    /// line must contain exactly two fields and both must be valid decimal
    /// identities.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::FieldCount`] on the wrong number of fields and
    /// [`RecordError::InvalidField`] if a field is not a valid identity.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 2 {
            return Err(RecordError::FieldCount {
                expected: 2,
                found: fields.len(),
            });
        }
        let parse_field = |field: &str| {
            let field = field.trim();
            field
                .parse::<PropagatorId>()
                .map_err(|source| RecordError::InvalidField {
                    field: field.to_owned(),
                    source,
                })
        };
        Ok(Self {
            child: parse_field(fields[0])?,
            parent: parse_field(fields[1])?,
        })
    }

    /// Render the canonical text form `"<childIndex>,<parentIndex>"`.
    ///
    /// `parse(record.format())` reproduces an equal record.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// The subject's own identity.
    pub fn child_index(&self) -> PropagatorId {
        self.child
    }

    /// The parent's identity (equal to the child's for a founder).
    pub fn parent_index(&self) -> PropagatorId {
        self.parent
    }

    /// Whether this record marks a founder.
    pub fn is_self_edge(&self) -> bool {
        self.child == self.parent
    }
}

impl fmt::Display for ParentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.child, self.parent)
    }
}

impl FromStr for ParentRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
