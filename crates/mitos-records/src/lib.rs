//! Mitos Records -- flat lineage records and line-oriented persistence.
//!
//! This crate turns the live lineage state of a
//! [`Forest`](mitos_lineage::forest::Forest) into two serializable flat-record
//! representations and back:
//!
//! - [`AncestryRecord`](ancestry::AncestryRecord): one propagule's complete
//!   ancestor chain, child-first, as a variable-width comma-separated line.
//! - [`ParentRecord`](parent::ParentRecord): one parent-child edge (self-edge
//!   for a founder) as a fixed two-field line under a column header.
//!
//! Records are values: captured from a forest or parsed from text, never
//! mutated, independent of any live propagule once created. The [`file`]
//! module reads and writes batches of them one per line, and [`rebuild`]
//! reconstructs a forest from a parent-record batch for downstream phylogeny
//! analysis.
//!
//! # Quick Start
//!
//! ```
//! use mitos_lineage::prelude::*;
//! use mitos_records::prelude::*;
//!
//! let mut forest: Forest = Forest::new();
//! let founder = forest.found();
//! let child = forest.replicate(founder)?;
//!
//! let record = AncestryRecord::capture(&forest, child)?;
//! assert_eq!(record.format(), "1,0");
//! assert_eq!(AncestryRecord::parse("1,0").unwrap(), record);
//! # Ok::<(), mitos_lineage::LineageError>(())
//! ```

#![deny(unsafe_code)]

pub mod ancestry;
pub mod file;
pub mod parent;
pub mod rebuild;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced when parsing a single record line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The line had the wrong number of comma-separated fields.
    #[error("expected {expected} comma-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// A field did not parse as a decimal identity.
    #[error("field '{field}' is not a valid identity")]
    InvalidField {
        field: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::ancestry::AncestryRecord;
    pub use crate::file::{
        read_ancestry, read_ancestry_file, read_parents, read_parents_file, write_ancestry,
        write_ancestry_file, write_parents, write_parents_file, LineageFileError,
    };
    pub use crate::parent::ParentRecord;
    pub use crate::rebuild::rebuild_forest;
    pub use crate::RecordError;
}

// ---------------------------------------------------------------------------
// Integration tests
// ---------------------------------------------------------------------------
