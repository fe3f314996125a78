//! The BED3+N family: a contiguous span plus optional trailing columns.

use crate::error::ValidationError;
use crate::field::{check_name, check_score, decode_item_rgb, BedColor, BedField};
use crate::interval::{Interval, Strand};

use super::{check_span, BedRecord, FieldCursor, Named, Schema, Stranded};

const BED3_COLUMNS: &[&str] = &["chrom", "chromStart", "chromEnd"];
const BED4_COLUMNS: &[&str] = &["chrom", "chromStart", "chromEnd", "name"];
const BED5_COLUMNS: &[&str] = &["chrom", "chromStart", "chromEnd", "name", "score"];
const BED6_COLUMNS: &[&str] = &["chrom", "chromStart", "chromEnd", "name", "score", "strand"];
const BED12_COLUMNS: &[&str] = &[
    "chrom",
    "chromStart",
    "chromEnd",
    "name",
    "score",
    "strand",
    "thickStart",
    "thickEnd",
    "itemRgb",
    "blockCount",
    "blockSizes",
    "blockStarts",
];

const SPAN: [&str; 3] = ["chrom", "chromStart", "chromEnd"];

/// A BED3 record: a contiguous half-open span on a reference sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bed3 {
    reference_name: String,
    start: u64,
    end: u64,
}

impl Bed3 {
    /// Create a span. Zero-length spans (`start == end`) are allowed.
    pub fn new(
        reference_name: impl Into<String>,
        start: u64,
        end: u64,
    ) -> Result<Self, ValidationError> {
        Self::with_columns(reference_name.into(), start, end, SPAN)
    }

    /// Validate against the given column names, for kinds that embed spans.
    pub(crate) fn with_columns(
        reference_name: String,
        start: u64,
        end: u64,
        columns: [&'static str; 3],
    ) -> Result<Self, ValidationError> {
        check_span(&reference_name, start, end, columns)?;
        Ok(Self::from_parts(reference_name, start, end))
    }

    /// Assemble from coordinates that were already validated.
    pub(crate) fn from_parts(reference_name: String, start: u64, end: u64) -> Self {
        Self {
            reference_name,
            start,
            end,
        }
    }

    pub(crate) fn read_span(
        fields: &mut FieldCursor<'_>,
        columns: [&'static str; 3],
    ) -> Result<Self, ValidationError> {
        let reference_name: String = fields.read(columns[0])?;
        let start = fields.read(columns[1])?;
        let end = fields.read(columns[2])?;
        Self::with_columns(reference_name, start, end, columns)
    }

    pub(crate) fn write_span(&self, out: &mut Vec<String>) {
        out.push(self.reference_name.clone());
        out.push(self.start.to_token());
        out.push(self.end.to_token());
    }
}

impl Interval for Bed3 {
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
        self.end
    }
}

impl BedRecord for Bed3 {
    fn schema() -> Schema {
        Schema::new("BED3", BED3_COLUMNS)
    }

    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError> {
        Self::read_span(fields, SPAN)
    }

    fn write_fields(&self, out: &mut Vec<String>) {
        self.write_span(out);
    }

    fn territory(&self) -> Vec<Bed3> {
        vec![self.clone()]
    }
}

/// Delegate the interval capability and span accessors to the embedded span.
macro_rules! impl_span_interval {
    ($ty:ty) => {
        impl Interval for $ty {
            #[inline]
            fn reference_name(&self) -> &str {
                self.span.reference_name()
            }

            #[inline]
            fn start(&self) -> u64 {
                self.span.start()
            }

            #[inline]
            fn end(&self) -> u64 {
                self.span.end()
            }
        }

        impl $ty {
            /// The (chrom, start, end) part of this record.
            pub fn span(&self) -> &Bed3 {
                &self.span
            }
        }
    };
}

pub(crate) use impl_span_interval;

/// A BED4 record: a span with an optional name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bed4 {
    span: Bed3,
    name: Option<String>,
}

impl Bed4 {
    pub fn new(
        reference_name: impl Into<String>,
        start: u64,
        end: u64,
        name: Option<String>,
    ) -> Result<Self, ValidationError> {
        let span = Bed3::new(reference_name, start, end)?;
        check_name(name.as_deref(), "name")?;
        Ok(Self { span, name })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl_span_interval!(Bed4);

impl BedRecord for Bed4 {
    fn schema() -> Schema {
        Schema::new("BED4", BED4_COLUMNS)
    }

    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError> {
        let span = Bed3::read_span(fields, SPAN)?;
        let name: Option<String> = fields.read("name")?;
        check_name(name.as_deref(), "name")?;
        Ok(Self { span, name })
    }

    fn write_fields(&self, out: &mut Vec<String>) {
        self.span.write_span(out);
        out.push(self.name.to_token());
    }

    fn territory(&self) -> Vec<Bed3> {
        vec![self.span.clone()]
    }
}

/// A BED5 record: a span with an optional name and score.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bed5 {
    span: Bed3,
    name: Option<String>,
    score: Option<i64>,
}

impl Bed5 {
    pub fn new(
        reference_name: impl Into<String>,
        start: u64,
        end: u64,
        name: Option<String>,
        score: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let span = Bed3::new(reference_name, start, end)?;
        check_name(name.as_deref(), "name")?;
        check_score(score, "score")?;
        Ok(Self { span, name, score })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn score(&self) -> Option<i64> {
        self.score
    }
}

impl_span_interval!(Bed5);

impl BedRecord for Bed5 {
    fn schema() -> Schema {
        Schema::new("BED5", BED5_COLUMNS)
    }

    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError> {
        let span = Bed3::read_span(fields, SPAN)?;
        let name: Option<String> = fields.read("name")?;
        let score = fields.read("score")?;
        check_name(name.as_deref(), "name")?;
        check_score(score, "score")?;
        Ok(Self { span, name, score })
    }

    fn write_fields(&self, out: &mut Vec<String>) {
        self.span.write_span(out);
        out.push(self.name.to_token());
        out.push(self.score.to_token());
    }

    fn territory(&self) -> Vec<Bed3> {
        vec![self.span.clone()]
    }
}

/// A BED6 record: a span with an optional name, score and a strand.
///
/// A missing strand (`.`) is [`Strand::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bed6 {
    span: Bed3,
    name: Option<String>,
    score: Option<i64>,
    strand: Strand,
}

impl Bed6 {
    pub fn new(
        reference_name: impl Into<String>,
        start: u64,
        end: u64,
        name: Option<String>,
        score: Option<i64>,
        strand: Strand,
    ) -> Result<Self, ValidationError> {
        let span = Bed3::new(reference_name, start, end)?;
        Self::from_span(span, name, score, strand)
    }

    pub(crate) fn from_span(
        span: Bed3,
        name: Option<String>,
        score: Option<i64>,
        strand: Strand,
    ) -> Result<Self, ValidationError> {
        check_name(name.as_deref(), "name")?;
        check_score(score, "score")?;
        Ok(Self {
            span,
            name,
            score,
            strand,
        })
    }

    /// Assemble from columns that were already validated.
    pub(crate) fn from_checked(
        span: Bed3,
        name: Option<String>,
        score: Option<i64>,
        strand: Strand,
    ) -> Self {
        Self {
            span,
            name,
            score,
            strand,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn score(&self) -> Option<i64> {
        self.score
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }
}

impl_span_interval!(Bed6);

impl BedRecord for Bed6 {
    fn schema() -> Schema {
        Schema::new("BED6", BED6_COLUMNS)
    }

    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError> {
        let span = Bed3::read_span(fields, SPAN)?;
        let name = fields.read("name")?;
        let score = fields.read("score")?;
        let strand = fields.read("strand")?;
        Self::from_span(span, name, score, strand)
    }

    fn write_fields(&self, out: &mut Vec<String>) {
        self.span.write_span(out);
        out.push(self.name.to_token());
        out.push(self.score.to_token());
        out.push(self.strand.to_token());
    }

    fn territory(&self) -> Vec<Bed3> {
        vec![self.span.clone()]
    }
}

/// A BED12 record: a BED6 with a thick (coding) range, a color and blocks.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bed12 {
    span: Bed3,
    name: Option<String>,
    score: Option<i64>,
    strand: Strand,
    thick_start: Option<u64>,
    thick_end: Option<u64>,
    item_rgb: Option<BedColor>,
    block_count: Option<u32>,
    block_sizes: Vec<u64>,
    block_starts: Vec<u64>,
}

impl Bed12 {
    pub fn new(
        reference_name: impl Into<String>,
        start: u64,
        end: u64,
        name: Option<String>,
        score: Option<i64>,
        strand: Strand,
        thick_start: Option<u64>,
        thick_end: Option<u64>,
        item_rgb: Option<BedColor>,
        block_count: Option<u32>,
        block_sizes: Vec<u64>,
        block_starts: Vec<u64>,
    ) -> Result<Self, ValidationError> {
        let span = Bed3::new(reference_name, start, end)?;
        check_name(name.as_deref(), "name")?;
        check_score(score, "score")?;

        if let (Some(thick_start), Some(thick_end)) = (thick_start, thick_end) {
            if thick_end < thick_start {
                return Err(ValidationError::ThickRange {
                    field: "thickEnd",
                    thick_start,
                    thick_end,
                });
            }
        }

        let expected = block_count.map_or(block_sizes.len(), |c| c as usize);
        if block_sizes.len() != expected {
            return Err(ValidationError::BlockMismatch {
                field: "blockSizes",
                expected,
                found: block_sizes.len(),
            });
        }
        if block_starts.len() != expected {
            return Err(ValidationError::BlockMismatch {
                field: "blockStarts",
                expected,
                found: block_starts.len(),
            });
        }

        Ok(Self {
            span,
            name,
            score,
            strand,
            thick_start,
            thick_end,
            item_rgb,
            block_count,
            block_sizes,
            block_starts,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn score(&self) -> Option<i64> {
        self.score
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn thick_start(&self) -> Option<u64> {
        self.thick_start
    }

    pub fn thick_end(&self) -> Option<u64> {
        self.thick_end
    }

    pub fn item_rgb(&self) -> Option<BedColor> {
        self.item_rgb
    }

    pub fn block_count(&self) -> Option<u32> {
        self.block_count
    }

    pub fn block_sizes(&self) -> &[u64] {
        &self.block_sizes
    }

    /// Block starts relative to `chromStart`.
    pub fn block_starts(&self) -> &[u64] {
        &self.block_starts
    }

    /// The blocks as absolute spans on the reference sequence.
    pub fn blocks(&self) -> Vec<Bed3> {
        self.block_starts
            .iter()
            .zip(&self.block_sizes)
            .map(|(&offset, &size)| {
                let start = self.span.start().saturating_add(offset);
                let end = start.saturating_add(size);
                Bed3::from_parts(self.span.reference_name().to_string(), start, end)
            })
            .collect()
    }
}

impl_span_interval!(Bed12);

impl BedRecord for Bed12 {
    fn schema() -> Schema {
        Schema::new("BED12", BED12_COLUMNS)
    }

    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError> {
        let reference_name: String = fields.read("chrom")?;
        let start = fields.read("chromStart")?;
        let end = fields.read("chromEnd")?;
        let name = fields.read("name")?;
        let score = fields.read("score")?;
        let strand = fields.read("strand")?;
        let thick_start = fields.read("thickStart")?;
        let thick_end = fields.read("thickEnd")?;
        let item_rgb = decode_item_rgb(fields.token("itemRgb")?, "itemRgb")?;
        let block_count = fields.read("blockCount")?;
        let block_sizes = fields.read("blockSizes")?;
        let block_starts = fields.read("blockStarts")?;
        Self::new(
            reference_name,
            start,
            end,
            name,
            score,
            strand,
            thick_start,
            thick_end,
            item_rgb,
            block_count,
            block_sizes,
            block_starts,
        )
    }

    fn write_fields(&self, out: &mut Vec<String>) {
        self.span.write_span(out);
        out.push(self.name.to_token());
        out.push(self.score.to_token());
        out.push(self.strand.to_token());
        out.push(self.thick_start.to_token());
        out.push(self.thick_end.to_token());
        out.push(self.item_rgb.to_token());
        out.push(self.block_count.to_token());
        out.push(self.block_sizes.to_token());
        out.push(self.block_starts.to_token());
    }

    fn territory(&self) -> Vec<Bed3> {
        vec![self.span.clone()]
    }
}

macro_rules! impl_named {
    ($($kind:ty),+) => {
        $(
            impl Named for $kind {
                fn name(&self) -> Option<&str> {
                    <$kind>::name(self)
                }
            }
        )+
    };
}

impl_named!(Bed4, Bed5, Bed6, Bed12);

impl Stranded for Bed6 {
    fn strand(&self) -> Strand {
        Bed6::strand(self)
    }
}

impl Stranded for Bed12 {
    fn strand(&self) -> Strand {
        Bed12::strand(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn decode<R: BedRecord>(tokens: &[&str]) -> Result<R, ValidationError> {
        R::read_fields(&mut FieldCursor::new(tokens))
    }

    #[test]
    fn test_valid_spans_construct() {
        for (start, end) in [(0, 0), (0, 1), (5, 5), (5, 100)] {
            assert!(Bed3::new("chr1", start, end).is_ok(), "{}-{}", start, end);
        }
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = Bed3::new("chr1", 5, 0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EndBeforeStart {
                field: "chromEnd",
                start: 5,
                end: 0
            }
        );
    }

    #[test]
    fn test_negative_start_rejected_from_fields() {
        let err = decode::<Bed3>(&["chr1", "-1", "5"]).unwrap_err();
        assert!(matches!(err, ValidationError::NegativeValue { field: "chromStart", .. }));
    }

    #[test]
    fn test_reference_name_validated() {
        assert!(Bed3::new("", 1, 2).is_err());
        assert!(Bed3::new("chr 1", 1, 2).is_err());
    }

    #[test]
    fn test_decode_presets() {
        assert_eq!(
            decode::<Bed4>(&["chr1", "1", "2", "foo"]).unwrap(),
            Bed4::new("chr1", 1, 2, Some("foo".into())).unwrap()
        );
        assert_eq!(
            decode::<Bed5>(&["chr1", "1", "2", "foo", "3"]).unwrap(),
            Bed5::new("chr1", 1, 2, Some("foo".into()), Some(3)).unwrap()
        );
        assert_eq!(
            decode::<Bed6>(&["chr1", "1", "2", "foo", "3", "+"]).unwrap(),
            Bed6::new("chr1", 1, 2, Some("foo".into()), Some(3), Strand::Forward).unwrap()
        );
    }

    #[test]
    fn test_generic_name_and_strand() {
        fn names<R: Named>(records: &[R]) -> Vec<Option<&str>> {
            records.iter().map(Named::name).collect()
        }
        fn on_minus<R: Stranded>(records: &[R]) -> usize {
            records.iter().filter(|r| r.strand() == Strand::Reverse).count()
        }

        let bed4 = [
            Bed4::new("chr1", 1, 2, Some("a".into())).unwrap(),
            Bed4::new("chr1", 1, 2, None).unwrap(),
        ];
        assert_eq!(names(&bed4), [Some("a"), None]);

        let bed5 = [Bed5::new("chr1", 1, 2, Some("b".into()), Some(3)).unwrap()];
        assert_eq!(names(&bed5), [Some("b")]);

        let bed6 = [
            Bed6::new("chr1", 1, 2, Some("c".into()), None, Strand::Reverse).unwrap(),
            Bed6::new("chr1", 1, 2, None, None, Strand::Forward).unwrap(),
        ];
        assert_eq!(names(&bed6), [Some("c"), None]);
        assert_eq!(on_minus(&bed6), 1);

        let bed12 = [decode::<Bed12>(&[
            "chr1", "1", "9", "tx", "0", "-", ".", ".", ".", ".", ".", ".",
        ])
        .unwrap()];
        assert_eq!(names(&bed12), [Some("tx")]);
        assert_eq!(on_minus(&bed12), 1);
    }

    #[test]
    fn test_missing_optional_fields() {
        let bed = decode::<Bed6>(&["chr1", "1", "2", ".", ".", "."]).unwrap();
        assert_eq!(bed.name(), None);
        assert_eq!(bed.score(), None);
        assert_eq!(bed.strand(), Strand::Unknown);
        assert_eq!(bed.to_fields(), vec!["chr1", "1", "2", ".", ".", "."]);
    }

    #[test]
    fn test_bad_strand_and_score() {
        let err = decode::<Bed6>(&["chr1", "1", "2", "a", "3", "x"]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidStrand { field: "strand", .. }));
        let err = decode::<Bed5>(&["chr1", "1", "2", "a", "high"]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "score", .. }));
    }

    #[test]
    #[serial_test::serial]
    fn test_out_of_range_score_is_accepted() {
        crate::config::set_strict_scores(false);
        let bed = Bed5::new("chr1", 1, 2, None, Some(5000)).unwrap();
        assert_eq!(bed.score(), Some(5000));
    }

    #[test]
    fn test_bed12_fields() {
        let tokens = [
            "chr1", "2", "10", "bed12", "2", "+", "3", "4", "101,2,32", "2", "1,2", "0,6",
        ];
        let bed = decode::<Bed12>(&tokens).unwrap();
        assert_eq!(bed.item_rgb(), Some(BedColor::new(101, 2, 32)));
        assert_eq!(bed.block_sizes(), &[1, 2]);
        assert_eq!(bed.block_starts(), &[0, 6]);
        assert_eq!(bed.to_fields(), tokens.to_vec());
        assert_eq!(
            bed.blocks(),
            vec![
                Bed3::new("chr1", 2, 3).unwrap(),
                Bed3::new("chr1", 8, 10).unwrap()
            ]
        );
    }

    #[test]
    fn test_bed12_block_mismatch() {
        let err = Bed12::new(
            "chr1",
            0,
            10,
            None,
            None,
            Strand::Unknown,
            None,
            None,
            None,
            Some(2),
            vec![1],
            vec![0],
        )
        .unwrap_err();
        assert_eq!(err.field(), "blockSizes");
    }

    #[test]
    fn test_ordering_is_coordinate_first() {
        let mut beds = vec![
            Bed4::new("chr2", 1, 2, Some("a".into())).unwrap(),
            Bed4::new("chr1", 5, 9, Some("a".into())).unwrap(),
            Bed4::new("chr1", 5, 6, Some("z".into())).unwrap(),
        ];
        beds.sort();
        let coords: Vec<_> = beds
            .iter()
            .map(|b| (b.reference_name().to_string(), b.start(), b.end()))
            .collect();
        assert_eq!(
            coords,
            vec![
                ("chr1".to_string(), 5, 6),
                ("chr1".to_string(), 5, 9),
                ("chr2".to_string(), 1, 2)
            ]
        );
    }
}
