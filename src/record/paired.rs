//! Records that describe two linear intervals at once.
//!
//! A pair is not itself an [`Interval`](crate::interval::Interval): the two
//! halves may sit on different reference sequences and no order between them
//! is enforced. Index a pair through its halves or its territory instead.

use crate::error::ValidationError;
use crate::field::BedField;
use crate::interval::Strand;

use super::{Bed3, Bed6, BedRecord, FieldCursor, Named, Schema};

const FIRST: [&str; 3] = ["chrom1", "start1", "end1"];
const SECOND: [&str; 3] = ["chrom2", "start2", "end2"];

const PAIR_COLUMNS: &[&str] = &["chrom1", "start1", "end1", "chrom2", "start2", "end2"];
const BEDPE_COLUMNS: &[&str] = &[
    "chrom1", "start1", "end1", "chrom2", "start2", "end2", "name", "score", "strand1", "strand2",
];

/// Access to the two halves of a paired record.
pub trait PairedInterval {
    fn first(&self) -> &Bed3;

    fn second(&self) -> &Bed3;
}

impl<T: PairedInterval + ?Sized> PairedInterval for &T {
    fn first(&self) -> &Bed3 {
        (**self).first()
    }

    fn second(&self) -> &Bed3 {
        (**self).second()
    }
}

fn pair_spans(
    first: (String, u64, u64),
    second: (String, u64, u64),
) -> Result<(Bed3, Bed3), ValidationError> {
    let first = Bed3::with_columns(first.0, first.1, first.2, FIRST)?;
    let second = Bed3::with_columns(second.0, second.1, second.2, SECOND)?;
    Ok((first, second))
}

/// The minimal paired record: two spans and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairBed {
    first: Bed3,
    second: Bed3,
}

impl PairBed {
    pub fn new(
        reference_name1: impl Into<String>,
        start1: u64,
        end1: u64,
        reference_name2: impl Into<String>,
        start2: u64,
        end2: u64,
    ) -> Result<Self, ValidationError> {
        let (first, second) = pair_spans(
            (reference_name1.into(), start1, end1),
            (reference_name2.into(), start2, end2),
        )?;
        Ok(Self { first, second })
    }
}

impl PairedInterval for PairBed {
    fn first(&self) -> &Bed3 {
        &self.first
    }

    fn second(&self) -> &Bed3 {
        &self.second
    }
}

impl BedRecord for PairBed {
    fn schema() -> Schema {
        Schema::new("PairBED", PAIR_COLUMNS)
    }

    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError> {
        let first = Bed3::read_span(fields, FIRST)?;
        let second = Bed3::read_span(fields, SECOND)?;
        Ok(Self { first, second })
    }

    fn write_fields(&self, out: &mut Vec<String>) {
        self.first.write_span(out);
        self.second.write_span(out);
    }

    fn territory(&self) -> Vec<Bed3> {
        vec![self.first.clone(), self.second.clone()]
    }
}

/// A BEDPE record as written by bedtools: two spans, a shared name and
/// score, and a strand per half.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BedPe {
    first: Bed3,
    second: Bed3,
    name: Option<String>,
    score: Option<i64>,
    strand1: Strand,
    strand2: Strand,
}

impl BedPe {
    pub fn new(
        reference_name1: impl Into<String>,
        start1: u64,
        end1: u64,
        reference_name2: impl Into<String>,
        start2: u64,
        end2: u64,
        name: Option<String>,
        score: Option<i64>,
        strand1: Strand,
        strand2: Strand,
    ) -> Result<Self, ValidationError> {
        let (first, second) = pair_spans(
            (reference_name1.into(), start1, end1),
            (reference_name2.into(), start2, end2),
        )?;
        Self::from_spans(first, second, name, score, strand1, strand2)
    }

    fn from_spans(
        first: Bed3,
        second: Bed3,
        name: Option<String>,
        score: Option<i64>,
        strand1: Strand,
        strand2: Strand,
    ) -> Result<Self, ValidationError> {
        crate::field::check_name(name.as_deref(), "name")?;
        crate::field::check_score(score, "score")?;
        Ok(Self {
            first,
            second,
            name,
            score,
            strand1,
            strand2,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn score(&self) -> Option<i64> {
        self.score
    }

    pub fn strand1(&self) -> Strand {
        self.strand1
    }

    pub fn strand2(&self) -> Strand {
        self.strand2
    }

    /// The first half as a BED6 carrying the shared name and score.
    pub fn bed1(&self) -> Bed6 {
        self.half(&self.first, self.strand1)
    }

    /// The second half as a BED6 carrying the shared name and score.
    pub fn bed2(&self) -> Bed6 {
        self.half(&self.second, self.strand2)
    }

    fn half(&self, span: &Bed3, strand: Strand) -> Bed6 {
        // name and score were validated when this pair was built
        Bed6::from_checked(span.clone(), self.name.clone(), self.score, strand)
    }
}

impl Named for BedPe {
    fn name(&self) -> Option<&str> {
        BedPe::name(self)
    }
}

impl PairedInterval for BedPe {
    fn first(&self) -> &Bed3 {
        &self.first
    }

    fn second(&self) -> &Bed3 {
        &self.second
    }
}

impl BedRecord for BedPe {
    fn schema() -> Schema {
        Schema::new("BEDPE", BEDPE_COLUMNS)
    }

    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError> {
        let first = Bed3::read_span(fields, FIRST)?;
        let second = Bed3::read_span(fields, SECOND)?;
        let name = fields.read("name")?;
        let score = fields.read("score")?;
        let strand1 = fields.read("strand1")?;
        let strand2 = fields.read("strand2")?;
        Self::from_spans(first, second, name, score, strand1, strand2)
    }

    fn write_fields(&self, out: &mut Vec<String>) {
        self.first.write_span(out);
        self.second.write_span(out);
        out.push(self.name.to_token());
        out.push(self.score.to_token());
        out.push(self.strand1.to_token());
        out.push(self.strand2.to_token());
    }

    fn territory(&self) -> Vec<Bed3> {
        vec![self.first.clone(), self.second.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    fn bedpe() -> BedPe {
        BedPe::new(
            "chr1",
            1,
            2,
            "chr2",
            3,
            4,
            Some("foo".into()),
            Some(5),
            Strand::Forward,
            Strand::Reverse,
        )
        .unwrap()
    }

    #[test]
    fn test_bedpe_fields() {
        let tokens = ["chr1", "1", "2", "chr2", "3", "4", "foo", "5", "+", "-"];
        let decoded = BedPe::read_fields(&mut FieldCursor::new(&tokens)).unwrap();
        assert_eq!(decoded, bedpe());
        assert_eq!(decoded.to_fields(), tokens.to_vec());
    }

    #[test]
    fn test_bedpe_is_named() {
        fn name_of<R: Named>(record: &R) -> Option<&str> {
            record.name()
        }
        assert_eq!(name_of(&bedpe()), Some("foo"));
        assert_eq!(name_of(&&bedpe()), Some("foo"));
    }

    #[test]
    fn test_halves_are_independent() {
        let pair = PairBed::new("chr9", 100, 200, "chr1", 5, 6).unwrap();
        assert_eq!(pair.first().reference_name(), "chr9");
        assert_eq!(pair.second().reference_name(), "chr1");
        assert_eq!(
            pair.territory(),
            vec![
                Bed3::new("chr9", 100, 200).unwrap(),
                Bed3::new("chr1", 5, 6).unwrap()
            ]
        );
    }

    #[test]
    fn test_each_half_is_validated() {
        let err = PairBed::new("chr1", 5, 0, "chr1", 1, 2).unwrap_err();
        assert_eq!(err.field(), "end1");
        let err = PairBed::new("chr1", 1, 2, "chr1", 5, 0).unwrap_err();
        assert_eq!(err.field(), "end2");
        let tokens = ["chr1", "1", "2", "chr1", "-1", "5"];
        let err = PairBed::read_fields(&mut FieldCursor::new(&tokens)).unwrap_err();
        assert_eq!(err.field(), "start2");
    }

    #[test]
    fn test_bedpe_halves_as_bed6() {
        let pair = bedpe();
        assert_eq!(
            pair.bed1(),
            Bed6::new("chr1", 1, 2, Some("foo".into()), Some(5), Strand::Forward).unwrap()
        );
        assert_eq!(
            pair.bed2(),
            Bed6::new("chr2", 3, 4, Some("foo".into()), Some(5), Strand::Reverse).unwrap()
        );
    }
}
