//! Mapping between records and their positional column representation.
//!
//! Decoding checks the column count against the record kind's [`Schema`]
//! before any field is read, then hands the tokens to the kind's own
//! validation. Encoding writes every declared column in schema order, using
//! `.` for missing optional values.

use memchr::memchr_iter;

use crate::error::{FormatError, Result};
use crate::record::{BedRecord, FieldCursor, Schema};

/// Line prefixes that mark header and comment lines.
pub const COMMENT_PREFIXES: [&str; 3] = ["#", "track", "browser"];

/// How a line is split into column tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Exactly one tab between columns (the BED standard).
    #[default]
    Tab,
    /// Any run of ASCII whitespace between columns.
    Whitespace,
}

/// A value that can be decoded from a full line's column tokens.
pub trait Decode: Sized {
    fn decode_fields(fields: &[&str]) -> Result<Self>;
}

/// A value that can be written as one line of column tokens.
pub trait Encode {
    /// The layout this particular value is written with.
    fn layout(&self) -> Schema;

    /// All declared columns in layout order.
    fn encode_fields(&self) -> Vec<String>;
}

impl<T: BedRecord> Decode for T {
    fn decode_fields(fields: &[&str]) -> Result<Self> {
        let schema = T::schema();
        check_column_count(&schema, fields.len())?;
        let mut cursor = FieldCursor::new(fields);
        Ok(T::read_fields(&mut cursor)?)
    }
}

impl<T: BedRecord> Encode for T {
    fn layout(&self) -> Schema {
        T::schema()
    }

    fn encode_fields(&self) -> Vec<String> {
        self.to_fields()
    }
}

pub(crate) fn check_column_count(schema: &Schema, found: usize) -> Result<()> {
    if found != schema.len() {
        return Err(FormatError::ColumnCount {
            kind: schema.name().to_string(),
            expected: schema.len(),
            found,
        }
        .into());
    }
    Ok(())
}

/// Decode a record from already-tokenized columns.
///
/// # Example
///
/// ```
/// use bedspec::format::decode_fields;
/// use bedspec::record::Bed4;
///
/// let bed: Bed4 = decode_fields(&["chr1", "10", "20", "gene1"]).unwrap();
/// assert_eq!(bed.name(), Some("gene1"));
/// assert!(decode_fields::<Bed4>(&["chr1", "10", "20"]).is_err());
/// ```
pub fn decode_fields<T: Decode>(fields: &[&str]) -> Result<T> {
    T::decode_fields(fields)
}

/// Encode a record into its column tokens.
pub fn encode_fields<T: Encode + ?Sized>(record: &T) -> Vec<String> {
    record.encode_fields()
}

/// Decode one data line (without its line terminator).
pub fn decode_line<T: Decode>(line: &str, delimiter: Delimiter) -> Result<T> {
    let fields = split_fields(line, delimiter);
    T::decode_fields(&fields)
}

/// Encode a record as one tab-delimited line, without a terminator.
pub fn encode_line<T: Encode + ?Sized>(record: &T) -> String {
    record.encode_fields().join("\t")
}

/// Split a line into column tokens.
pub fn split_fields(line: &str, delimiter: Delimiter) -> Vec<&str> {
    match delimiter {
        Delimiter::Tab => split_tabs(line),
        Delimiter::Whitespace => line.split_ascii_whitespace().collect(),
    }
}

fn split_tabs(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(12);
    let mut from = 0;
    for tab in memchr_iter(b'\t', line.as_bytes()) {
        fields.push(&line[from..tab]);
        from = tab + 1;
    }
    fields.push(&line[from..]);
    fields
}

/// True for header lines: `#` comments and `track`/`browser` lines.
#[inline]
pub fn is_comment(line: &str) -> bool {
    let line = line.trim_start();
    COMMENT_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// Strip a trailing `\n` or `\r\n`.
#[inline]
pub(crate) fn trim_line_end(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
