//! The interval capability shared by every single-span BED record.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{QueryError, ValidationError};

/// A 0-based, half-open span `[start, end)` on a named reference sequence.
///
/// Point records report `end == start + 1` so that they take part in
/// overlap queries as single bases.
pub trait Interval {
    /// The reference sequence (contig) name.
    fn reference_name(&self) -> &str;

    /// 0-based inclusive start.
    fn start(&self) -> u64;

    /// 0-based exclusive end.
    fn end(&self) -> u64;

    /// Returns the length of the interval.
    #[inline]
    fn len(&self) -> u64 {
        self.end().saturating_sub(self.start())
    }

    /// Returns true if the interval has zero length.
    #[inline]
    fn is_empty(&self) -> bool {
        self.start() >= self.end()
    }

    /// Half-open overlap test. Touching endpoints do not overlap.
    #[inline]
    fn overlaps(&self, other: &dyn Interval) -> bool {
        self.reference_name() == other.reference_name()
            && self.start() < other.end()
            && other.start() < self.end()
    }

    /// True if `other` lies entirely within this interval.
    #[inline]
    fn encloses(&self, other: &dyn Interval) -> bool {
        self.reference_name() == other.reference_name()
            && self.start() <= other.start()
            && other.end() <= self.end()
    }

    /// True if this interval lies entirely within `other`.
    #[inline]
    fn is_enclosed_by(&self, other: &dyn Interval) -> bool {
        self.reference_name() == other.reference_name()
            && other.start() <= self.start()
            && self.end() <= other.end()
    }

    /// Compute the overlap length with another interval.
    #[inline]
    fn overlap_length(&self, other: &dyn Interval) -> u64 {
        if !self.overlaps(other) {
            return 0;
        }
        self.end().min(other.end()) - self.start().max(other.start())
    }

    /// Lexicographic order by (reference name, start, end).
    #[inline]
    fn coordinate_cmp(&self, other: &dyn Interval) -> Ordering {
        self.reference_name()
            .cmp(other.reference_name())
            .then(self.start().cmp(&other.start()))
            .then(self.end().cmp(&other.end()))
    }
}

impl<T: Interval + ?Sized> Interval for &T {
    #[inline]
    fn reference_name(&self) -> &str {
        (**self).reference_name()
    }

    #[inline]
    fn start(&self) -> u64 {
        (**self).start()
    }

    #[inline]
    fn end(&self) -> u64 {
        (**self).end()
    }
}

impl<T: Interval + ?Sized> Interval for Box<T> {
    #[inline]
    fn reference_name(&self) -> &str {
        (**self).reference_name()
    }

    #[inline]
    fn start(&self) -> u64 {
        (**self).start()
    }

    #[inline]
    fn end(&self) -> u64 {
        (**self).end()
    }
}

/// A bare `(reference name, start, end)` triple, handy as a query.
impl<S: AsRef<str>> Interval for (S, u64, u64) {
    #[inline]
    fn reference_name(&self) -> &str {
        self.0.as_ref()
    }

    #[inline]
    fn start(&self) -> u64 {
        self.1
    }

    #[inline]
    fn end(&self) -> u64 {
        self.2
    }
}

/// Check the structural invariants any interval must hold.
pub(crate) fn check_interval<I: Interval + ?Sized>(interval: &I) -> Result<(), ValidationError> {
    if interval.reference_name().is_empty() {
        return Err(ValidationError::EmptyField {
            field: "reference_name",
        });
    }
    if interval.end() < interval.start() {
        return Err(ValidationError::EndBeforeStart {
            field: "end",
            start: interval.start(),
            end: interval.end(),
        });
    }
    Ok(())
}

/// Check that an interval can be used as an overlap query.
pub(crate) fn check_query<I: Interval + ?Sized>(query: &I) -> Result<(), QueryError> {
    if query.reference_name().is_empty() {
        return Err(QueryError::EmptyReferenceName);
    }
    if query.end() < query.start() {
        return Err(QueryError::EndBeforeStart {
            reference_name: query.reference_name().to_string(),
            start: query.start(),
            end: query.end(),
        });
    }
    Ok(())
}

/// Strand orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    #[default]
    Unknown,
}

impl Strand {
    /// The strand symbol as written in BED columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::Unknown => ".",
        }
    }

    /// Swap forward and reverse. Unknown stays unknown.
    pub fn opposite(&self) -> Self {
        match self {
            Strand::Forward => Strand::Reverse,
            Strand::Reverse => Strand::Forward,
            Strand::Unknown => Strand::Unknown,
        }
    }
}

impl FromStr for Strand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." => Ok(Strand::Unknown),
            _ => Err(ValidationError::InvalidStrand {
                field: "strand",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
