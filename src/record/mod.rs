//! BED record kinds and their column layouts.
//!
//! Every record kind is an immutable value validated once at construction.
//! Kinds are described by a [`Schema`] (ordered column names) and implement
//! [`BedRecord`] to move between typed values and column tokens:
//!
//! - **Point**: [`Bed2`], a single base with no end column
//! - **Simple intervals**: [`Bed3`], [`Bed4`], [`Bed5`], [`Bed6`], [`Bed12`]
//! - **Scored spans**: [`BedGraph`]
//! - **Pairs**: [`PairBed`], [`BedPe`]
//! - **Custom kinds**: [`Extended`] composes any kind with trailing columns
//!   declared through [`bed_extension!`](crate::bed_extension)
//!
//! Equality and hashing are structural. Ordering is lexicographic in column
//! order, so it sorts by (reference name, start, end) first.

mod any;
mod extended;
mod graph;
mod paired;
mod point;
mod simple;

use std::borrow::Cow;
use std::fmt;

use crate::error::ValidationError;
use crate::field::BedField;
use crate::interval::Strand;

pub use any::AnyBed;
pub use extended::{Extended, Extension};
pub use graph::BedGraph;
pub use paired::{BedPe, PairBed, PairedInterval};
pub use point::Bed2;
pub use simple::{Bed12, Bed3, Bed4, Bed5, Bed6};

/// The ordered column layout of a record kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    name: Cow<'static, str>,
    columns: Cow<'static, [&'static str]>,
}

impl Schema {
    /// A schema for a built-in kind.
    pub const fn new(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            name: Cow::Borrowed(name),
            columns: Cow::Borrowed(columns),
        }
    }

    /// Append trailing columns, naming the result `<name>+<n>`.
    pub fn extend(&self, extra: &[&'static str]) -> Self {
        let mut columns = self.columns.to_vec();
        columns.extend_from_slice(extra);
        Self {
            name: Cow::Owned(format!("{}+{}", self.name, extra.len())),
            columns: Cow::Owned(columns),
        }
    }

    /// Display name of the kind, e.g. `BED6`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in order.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Sequential reader over a record's column tokens.
#[derive(Debug)]
pub struct FieldCursor<'a> {
    fields: &'a [&'a str],
    pos: usize,
}

impl<'a> FieldCursor<'a> {
    pub fn new(fields: &'a [&'a str]) -> Self {
        Self { fields, pos: 0 }
    }

    /// Decode the next column as `T`.
    pub fn read<T: BedField>(&mut self, field: &'static str) -> Result<T, ValidationError> {
        let token = self
            .fields
            .get(self.pos)
            .copied()
            .ok_or(ValidationError::EmptyField { field })?;
        self.pos += 1;
        T::decode(token, field)
    }

    /// The raw next token, for columns with bespoke decoding.
    pub fn token(&mut self, field: &'static str) -> Result<&'a str, ValidationError> {
        let token = self
            .fields
            .get(self.pos)
            .copied()
            .ok_or(ValidationError::EmptyField { field })?;
        self.pos += 1;
        Ok(token)
    }

    /// Number of tokens not yet consumed.
    pub fn remaining(&self) -> usize {
        self.fields.len().saturating_sub(self.pos)
    }
}

/// A record kind with a fixed column layout.
pub trait BedRecord: Sized {
    /// The column layout of this kind.
    fn schema() -> Schema;

    /// Decode and validate from the columns under the cursor.
    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError>;

    /// Append this record's column tokens in schema order.
    fn write_fields(&self, out: &mut Vec<String>);

    /// The spans on the genome this record covers.
    fn territory(&self) -> Vec<Bed3>;

    /// All declared columns in schema order.
    fn to_fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::schema().len());
        self.write_fields(&mut out);
        out
    }
}

/// A record kind that may carry a feature name.
pub trait Named {
    /// The name column, `None` when it was `.`.
    fn name(&self) -> Option<&str>;
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> Option<&str> {
        (**self).name()
    }
}

/// A record kind with a single strand column.
pub trait Stranded {
    fn strand(&self) -> Strand;
}

impl<T: Stranded + ?Sized> Stranded for &T {
    fn strand(&self) -> Strand {
        (**self).strand()
    }
}

/// Column validation shared by every kind that has (chrom, start, end).
pub(crate) fn check_span(
    reference_name: &str,
    start: u64,
    end: u64,
    columns: [&'static str; 3],
) -> Result<(), ValidationError> {
    crate::field::check_text(reference_name, columns[0])?;
    if end < start {
        return Err(ValidationError::EndBeforeStart {
            field: columns[2],
            start,
            end,
        });
    }
    Ok(())
}
