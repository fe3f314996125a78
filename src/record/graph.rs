use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::ValidationError;
use crate::field::{check_finite, BedField};
use crate::interval::Interval;

use super::simple::impl_span_interval;
use super::{Bed3, BedRecord, FieldCursor, Schema};

const COLUMNS: &[&str] = &["chrom", "chromStart", "chromEnd", "dataValue"];
const SPAN: [&str; 3] = ["chrom", "chromStart", "chromEnd"];

/// A bedGraph record: a span carrying one real-valued measurement.
///
/// The value is always finite, so equality, hashing and ordering are total.
#[derive(Debug, Clone)]
pub struct BedGraph {
    span: Bed3,
    value: f64,
}

impl BedGraph {
    pub fn new(
        reference_name: impl Into<String>,
        start: u64,
        end: u64,
        value: f64,
    ) -> Result<Self, ValidationError> {
        let span = Bed3::new(reference_name, start, end)?;
        check_finite(value, COLUMNS[3])?;
        Ok(Self { span, value })
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl_span_interval!(BedGraph);

impl PartialEq for BedGraph {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BedGraph {}

impl PartialOrd for BedGraph {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BedGraph {
    fn cmp(&self, other: &Self) -> Ordering {
        self.span
            .cmp(&other.span)
            .then_with(|| self.value.total_cmp(&other.value))
    }
}

impl Hash for BedGraph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.span.hash(state);
        // -0.0 and 0.0 order differently under total_cmp, so bits agree with Eq
        self.value.to_bits().hash(state);
    }
}

impl BedRecord for BedGraph {
    fn schema() -> Schema {
        Schema::new("bedGraph", COLUMNS)
    }

    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError> {
        let span = Bed3::read_span(fields, SPAN)?;
        let value = fields.read(COLUMNS[3])?;
        Ok(Self { span, value })
    }

    fn write_fields(&self, out: &mut Vec<String>) {
        self.span.write_span(out);
        out.push(self.value.to_token());
    }

    fn territory(&self) -> Vec<Bed3> {
        vec![self.span.clone()]
    }
}
