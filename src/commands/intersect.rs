//! Intersect command: report records of A by how they relate to B.
//!
//! B is loaded into an [`IntervalIndex`] over the spans its records cover;
//! A is then read in full and each record is tested through its own spans.
//! Paired kinds therefore take part through both halves.

use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use rayon::prelude::*;

use crate::bed::BedReader;
use crate::error::{QueryError, Result};
use crate::format::{self, Decode, Delimiter, Encode};
use crate::index::IntervalIndex;
use crate::parallel::PARALLEL_THRESHOLD;
use crate::record::{
    AnyBed, Bed12, Bed2, Bed3, Bed4, Bed5, Bed6, BedGraph, BedPe, BedRecord, PairBed,
};

use super::{open_input, RecordKind};

/// Which relation between an A span and a B record counts as a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntersectMode {
    /// B overlaps A
    #[default]
    Overlapping,
    /// B entirely contains A
    Enclosing,
    /// B lies entirely within A
    EnclosedBy,
}

impl IntersectMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntersectMode::Overlapping => "overlapping",
            IntersectMode::Enclosing => "enclosing",
            IntersectMode::EnclosedBy => "enclosed-by",
        }
    }
}

impl FromStr for IntersectMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "overlapping" => Ok(IntersectMode::Overlapping),
            "enclosing" => Ok(IntersectMode::Enclosing),
            "enclosed-by" | "enclosed_by" => Ok(IntersectMode::EnclosedBy),
            _ => Err(format!(
                "unknown mode '{}', expected overlapping, enclosing or enclosed-by",
                s
            )),
        }
    }
}

impl fmt::Display for IntersectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records that can be reduced to the spans they cover.
trait Territory {
    fn spans(&self) -> Vec<Bed3>;
}

impl<T: BedRecord> Territory for T {
    fn spans(&self) -> Vec<Bed3> {
        self.territory()
    }
}

impl Territory for AnyBed {
    fn spans(&self) -> Vec<Bed3> {
        self.territory()
    }
}

/// Intersect command configuration.
#[derive(Debug, Clone, Default)]
pub struct IntersectCommand {
    /// Kind both inputs are read as
    pub kind: RecordKind,
    /// Relation that counts as a hit
    pub mode: IntersectMode,
    /// Report each A record once if it has any hit (-u)
    pub unique: bool,
    /// Report only A records with no hit (-v)
    pub no_overlap: bool,
    /// Report each A record followed by its hit count (-c)
    pub count: bool,
    /// Column delimiter for both inputs
    pub delimiter: Delimiter,
}

impl IntersectCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intersect two files (`-` reads stdin) and write A records to `output`.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        a_path: P,
        b_path: P,
        output: &mut W,
    ) -> Result<()> {
        let (a_path, b_path) = (a_path.as_ref(), b_path.as_ref());
        match self.kind {
            RecordKind::Bed2 => self.run_kind::<Bed2, W>(a_path, b_path, output),
            RecordKind::Bed3 => self.run_kind::<Bed3, W>(a_path, b_path, output),
            RecordKind::Bed4 => self.run_kind::<Bed4, W>(a_path, b_path, output),
            RecordKind::Bed5 => self.run_kind::<Bed5, W>(a_path, b_path, output),
            RecordKind::Bed6 => self.run_kind::<Bed6, W>(a_path, b_path, output),
            RecordKind::Bed12 => self.run_kind::<Bed12, W>(a_path, b_path, output),
            RecordKind::BedGraph => self.run_kind::<BedGraph, W>(a_path, b_path, output),
            RecordKind::PairBed => self.run_kind::<PairBed, W>(a_path, b_path, output),
            RecordKind::BedPe => self.run_kind::<BedPe, W>(a_path, b_path, output),
            RecordKind::Auto => self.run_kind::<AnyBed, W>(a_path, b_path, output),
        }
    }

    fn run_kind<T, W>(&self, a_path: &Path, b_path: &Path, output: &mut W) -> Result<()>
    where
        T: Decode + Encode + Territory + Sync,
        W: Write,
    {
        let b_records: Vec<T> = self.read_all(b_path)?;
        let index = IntervalIndex::par_build(b_records.iter().flat_map(Territory::spans))?;
        drop(b_records);

        let a_records: Vec<T> = self.read_all(a_path)?;
        let hits = self.count_hits(&a_records, &index)?;

        let mut writer = BufWriter::with_capacity(256 * 1024, output);
        for (record, hits) in a_records.iter().zip(hits) {
            self.write_result(&mut writer, record, hits)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn read_all<T: Decode>(&self, path: &Path) -> Result<Vec<T>> {
        let input = open_input(path)?;
        BedReader::new(input)
            .with_delimiter(self.delimiter)
            .records()
            .collect()
    }

    /// Hit count per A record, summed over its spans.
    fn count_hits<T: Territory + Sync>(
        &self,
        records: &[T],
        index: &IntervalIndex<Bed3>,
    ) -> std::result::Result<Vec<usize>, QueryError> {
        let count = |record: &T| -> std::result::Result<usize, QueryError> {
            record
                .spans()
                .iter()
                .map(|span| self.hits_for(index, span))
                .sum()
        };
        if records.len() < PARALLEL_THRESHOLD {
            records.iter().map(count).collect()
        } else {
            records.par_iter().map(count).collect()
        }
    }

    fn hits_for(
        &self,
        index: &IntervalIndex<Bed3>,
        span: &Bed3,
    ) -> std::result::Result<usize, QueryError> {
        match self.mode {
            IntersectMode::Overlapping => {
                if (self.unique || self.no_overlap) && !self.count {
                    index.overlaps(span).map(usize::from)
                } else {
                    index.count_overlaps(span)
                }
            }
            IntersectMode::Enclosing => index.enclosing(span).map(|hits| hits.len()),
            IntersectMode::EnclosedBy => index.enclosed_by(span).map(|hits| hits.len()),
        }
    }

    fn write_result<T: Encode, W: Write>(
        &self,
        out: &mut W,
        record: &T,
        hits: usize,
    ) -> Result<()> {
        let line = format::encode_line(record);
        if self.no_overlap {
            if hits == 0 {
                writeln!(out, "{}", line)?;
            }
        } else if self.count {
            writeln!(out, "{}\t{}", line, hits)?;
        } else if self.unique {
            if hits > 0 {
                writeln!(out, "{}", line)?;
            }
        } else {
            for _ in 0..hits {
                writeln!(out, "{}", line)?;
            }
        }
        Ok(())
    }
}
