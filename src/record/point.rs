use crate::error::ValidationError;
use crate::field::{check_text, BedField};
use crate::interval::Interval;

use super::{Bed3, BedRecord, FieldCursor, Schema};

const COLUMNS: &[&str] = &["chrom", "chromStart"];

/// A BED2 record: a single 0-based base on a reference sequence.
///
/// As an [`Interval`] it covers `[start, start + 1)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bed2 {
    reference_name: String,
    start: u64,
}

impl Bed2 {
    pub fn new(reference_name: impl Into<String>, start: u64) -> Result<Self, ValidationError> {
        let reference_name = reference_name.into();
        check_text(&reference_name, COLUMNS[0])?;
        if start == u64::MAX {
            return Err(ValidationError::InvalidNumber {
                field: COLUMNS[1],
                expected: "a position below the maximum coordinate",
                value: start.to_string(),
            });
        }
        Ok(Self {
            reference_name,
            start,
        })
    }

    /// The 0-based position of the base.
    #[inline]
    pub fn position(&self) -> u64 {
        self.start
    }
}

impl Interval for Bed2 {
    #[inline]
    fn reference_name(&self) -> &str {
        &self.reference_name
    }

    #[inline]
    fn start(&self) -> u64 {
        self.start
    }

    #[inline]
    fn end(&self) -> u64 {
        self.start + 1
    }
}

impl BedRecord for Bed2 {
    fn schema() -> Schema {
        Schema::new("BED2", COLUMNS)
    }

    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError> {
        let reference_name: String = fields.read(COLUMNS[0])?;
        let start = fields.read(COLUMNS[1])?;
        Self::new(reference_name, start)
    }

    fn write_fields(&self, out: &mut Vec<String>) {
        out.push(self.reference_name.clone());
        out.push(self.start.to_token());
    }

    fn territory(&self) -> Vec<Bed3> {
        vec![Bed3::from_parts(
            self.reference_name.clone(),
            self.start,
            self.start + 1,
        )]
    }
}
