//! Full ancestor-chain records.
//!
//! An [`AncestryRecord`] captures one propagule's complete ancestor chain in
//! strictly child-to-founder order: the first identity is the subject's own,
//! the last is its founder's. A founder's record is the single-element chain
//! of its own identity.
//!
//! The text form is one comma-joined line of decimal identities, child first:
//!
//! ```text
//! 2,1,0
//! ```
//!
//! Records are values -- once captured or parsed they carry no reference to
//! any live forest, compare structurally, and round-trip through their text
//! form exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use mitos_lineage::forest::Forest;
use mitos_lineage::identity::PropagatorId;
use mitos_lineage::propagule::Propagule;
use mitos_lineage::LineageError;

use crate::RecordError;

// ---------------------------------------------------------------------------
// AncestryRecord
// ---------------------------------------------------------------------------

/// Immutable snapshot of one propagule's complete ancestor chain,
/// child-first, founder-last.
///
/// Invariant: the chain is non-empty; its length equals the subject's
/// generation + 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AncestryRecord {
    lineage: Vec<PropagatorId>,
}

impl AncestryRecord {
    /// Capture the ancestor chain of `id` from a live forest.
    ///
    /// # Errors
    ///
    /// Returns [`LineageError::UnknownPropagator`] if `id` is not in the
    /// forest.
    pub fn capture<P: Propagule>(
        forest: &Forest<P>,
        id: PropagatorId,
    ) -> Result<Self, LineageError> {
        let lineage = forest
            .trace_lineage(id)?
            .iter()
            .rev()
            .map(|p| p.index())
            .collect();
        Ok(Self { lineage })
    }

    /// Parse one comma-separated record line.
    ///
    /// Leading and trailing whitespace around each field is tolerated; the
    /// line must contain at least one field and every field must be a valid
    /// decimal identity.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidField`] if a field is not a valid
    /// identity (an empty or blank line fails here too: its single field is
    /// empty).
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let lineage = line
            .split(',')
            .map(|field| {
                let field = field.trim();
                field
                    .parse::<PropagatorId>()
                    .map_err(|source| RecordError::InvalidField {
                        field: field.to_owned(),
                        source,
                    })
            })
            .collect::<Result<Vec<PropagatorId>, RecordError>>()?;
        // split(',') yields at least one field, so the chain is non-empty.
        Ok(Self { lineage })
    }

    /// Render the canonical text form: comma-joined identities, child first,
    /// no whitespace.
    ///
    /// `parse(record.format())` reproduces an equal record.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// The subject's own identity (first element).
    pub fn child_index(&self) -> PropagatorId {
        self.lineage[0]
    }

    /// The founder's identity (last element).
    pub fn founder_index(&self) -> PropagatorId {
        self.lineage[self.lineage.len() - 1]
    }

    /// The full chain, child-first, founder-last.
    pub fn lineage(&self) -> &[PropagatorId] {
        &self.lineage
    }

    /// The subject's generation: chain length minus one.
    pub fn generations(&self) -> u64 {
        (self.lineage.len() - 1) as u64
    }
}

impl fmt::Display for AncestryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.lineage.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl FromStr for AncestryRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
