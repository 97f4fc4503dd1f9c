//! Line-oriented lineage file I/O.
//!
//! Both lineage file formats are plain text, one record per line:
//!
//! - **Ancestry files** have no header; every line is a full ancestor chain
//!   (field count varies per record).
//! - **Parent files** start with the fixed header
//!   [`ParentRecord::HEADER`] and every following line is exactly two fields.
//!
//! Readers are strict: the whole read fails on the first malformed line,
//! carrying its 1-based line number. There is no skip-and-log mode here --
//! callers that want to tolerate bad lines filter before parsing.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::ancestry::AncestryRecord;
use crate::parent::ParentRecord;
use crate::RecordError;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors produced when reading or writing lineage files.
#[derive(Debug, thiserror::Error)]
pub enum LineageFileError {
    /// The underlying stream failed.
    #[error("i/o failure on lineage file")]
    Io(#[from] io::Error),

    /// A parent file did not start with the expected header line.
    #[error("missing header line, expected '{expected}'")]
    MissingHeader { expected: &'static str },

    /// A line failed to parse as a record.
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: RecordError,
    },
}

// ---------------------------------------------------------------------------
// Ancestry files
// ---------------------------------------------------------------------------

/// Write ancestry records one per line, no header.
pub fn write_ancestry<W: Write>(
    out: &mut W,
    records: &[AncestryRecord],
) -> Result<(), LineageFileError> {
    for record in records {
        writeln!(out, "{record}")?;
    }
    tracing::debug!(records = records.len(), "wrote ancestry batch");
    Ok(())
}

/// Read ancestry records, one per line, until end of input.
///
/// # Errors
///
/// Returns [`LineageFileError::Line`] on the first malformed line (blank
/// lines included) and [`LineageFileError::Io`] if the stream fails.
pub fn read_ancestry<R: BufRead>(input: R) -> Result<Vec<AncestryRecord>, LineageFileError> {
    let mut records = Vec::new();
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let record = AncestryRecord::parse(&line).map_err(|source| LineageFileError::Line {
            line: number + 1,
            source,
        })?;
        records.push(record);
    }
    tracing::debug!(records = records.len(), "read ancestry batch");
    Ok(records)
}

/// Write an ancestry file at `path`.
pub fn write_ancestry_file(
    path: impl AsRef<Path>,
    records: &[AncestryRecord],
) -> Result<(), LineageFileError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_ancestry(&mut out, records)?;
    out.flush()?;
    Ok(())
}

/// Read an ancestry file at `path`.
pub fn read_ancestry_file(path: impl AsRef<Path>) -> Result<Vec<AncestryRecord>, LineageFileError> {
    read_ancestry(BufReader::new(File::open(path)?))
}

// ---------------------------------------------------------------------------
// Parent files
// ---------------------------------------------------------------------------

/// Write the header line followed by one parent record per line.
pub fn write_parents<W: Write>(
    out: &mut W,
    records: &[ParentRecord],
) -> Result<(), LineageFileError> {
    writeln!(out, "{}", ParentRecord::HEADER)?;
    for record in records {
        writeln!(out, "{record}")?;
    }
    tracing::debug!(records = records.len(), "wrote parent batch");
    Ok(())
}

/// Read a parent file: header line first, then one record per line.
///
/// # Errors
///
/// Returns [`LineageFileError::MissingHeader`] if the first line is not the
/// fixed header, [`LineageFileError::Line`] on the first malformed record
/// line, and [`LineageFileError::Io`] if the stream fails.
pub fn read_parents<R: BufRead>(input: R) -> Result<Vec<ParentRecord>, LineageFileError> {
    let mut lines = input.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => String::new(),
    };
    if header.trim() != ParentRecord::HEADER {
        return Err(LineageFileError::MissingHeader {
            expected: ParentRecord::HEADER,
        });
    }

    let mut records = Vec::new();
    for (number, line) in lines.enumerate() {
        let line = line?;
        let record = ParentRecord::parse(&line).map_err(|source| LineageFileError::Line {
            line: number + 2,
            source,
        })?;
        records.push(record);
    }
    tracing::debug!(records = records.len(), "read parent batch");
    Ok(records)
}

/// Write a parent file at `path`.
pub fn write_parents_file(
    path: impl AsRef<Path>,
    records: &[ParentRecord],
) -> Result<(), LineageFileError> {
    let mut out = BufWriter::new(File::create(path)?);
    write_parents(&mut out, records)?;
    out.flush()?;
    Ok(())
}

/// Read a parent file at `path`.
pub fn read_parents_file(path: impl AsRef<Path>) -> Result<Vec<ParentRecord>, LineageFileError> {
    read_parents(BufReader::new(File::open(path)?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
