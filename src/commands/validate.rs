//! Validate command: decode every line of a BED file as one record kind.

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;

use crate::bed::{BedLine, BedReader};
use crate::error::Result;
use crate::format::{Decode, Delimiter};
use crate::record::{AnyBed, Bed12, Bed2, Bed3, Bed4, Bed5, Bed6, BedGraph, BedPe, PairBed};

use super::{open_input, RecordKind};

/// Counts gathered from a file that decoded cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidateSummary {
    pub records: usize,
    pub comments: usize,
}

impl fmt::Display for ValidateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} records, {} comment lines", self.records, self.comments)
    }
}

/// Validate command configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidateCommand {
    /// Kind every data line must decode as
    pub kind: RecordKind,
    /// Column delimiter
    pub delimiter: Delimiter,
}

impl ValidateCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every line from `input`. Stops at the first invalid line.
    pub fn validate<R: Read>(&self, input: R) -> Result<ValidateSummary> {
        match self.kind {
            RecordKind::Bed2 => self.count::<R, Bed2>(input),
            RecordKind::Bed3 => self.count::<R, Bed3>(input),
            RecordKind::Bed4 => self.count::<R, Bed4>(input),
            RecordKind::Bed5 => self.count::<R, Bed5>(input),
            RecordKind::Bed6 => self.count::<R, Bed6>(input),
            RecordKind::Bed12 => self.count::<R, Bed12>(input),
            RecordKind::BedGraph => self.count::<R, BedGraph>(input),
            RecordKind::PairBed => self.count::<R, PairBed>(input),
            RecordKind::BedPe => self.count::<R, BedPe>(input),
            RecordKind::Auto => self.count::<R, AnyBed>(input),
        }
    }

    fn count<R: Read, T: Decode>(&self, input: R) -> Result<ValidateSummary> {
        let mut summary = ValidateSummary::default();
        let lines = BedReader::<R, T>::new(input)
            .with_delimiter(self.delimiter)
            .lines();
        for line in lines {
            match line? {
                BedLine::Comment(_) => summary.comments += 1,
                BedLine::Record(_) => summary.records += 1,
            }
        }
        Ok(summary)
    }

    /// Validate a file (`-` for stdin) and write a one-line summary.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        output: &mut W,
    ) -> Result<ValidateSummary> {
        let path = path.as_ref();
        let input = open_input(path)?;
        let summary = self.validate(input)?;
        writeln!(output, "{}: {} {}", path.display(), self.kind, summary)?;
        log::info!("{} is valid {}", path.display(), self.kind);
        Ok(summary)
    }
}
