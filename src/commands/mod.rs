//! Command implementations for the bedspec CLI.

pub mod intersect;
pub mod validate;

use std::fmt;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use crate::bed::open_path;

pub use intersect::{IntersectCommand, IntersectMode};
pub use validate::{ValidateCommand, ValidateSummary};

/// The record kind a command reads its input as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordKind {
    Bed2,
    Bed3,
    Bed4,
    Bed5,
    Bed6,
    Bed12,
    BedGraph,
    PairBed,
    BedPe,
    /// Infer a simple BED kind per line from its column count.
    #[default]
    Auto,
}

impl RecordKind {
    pub const ALL: [RecordKind; 10] = [
        RecordKind::Bed2,
        RecordKind::Bed3,
        RecordKind::Bed4,
        RecordKind::Bed5,
        RecordKind::Bed6,
        RecordKind::Bed12,
        RecordKind::BedGraph,
        RecordKind::PairBed,
        RecordKind::BedPe,
        RecordKind::Auto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Bed2 => "bed2",
            RecordKind::Bed3 => "bed3",
            RecordKind::Bed4 => "bed4",
            RecordKind::Bed5 => "bed5",
            RecordKind::Bed6 => "bed6",
            RecordKind::Bed12 => "bed12",
            RecordKind::BedGraph => "bedgraph",
            RecordKind::PairBed => "pairbed",
            RecordKind::BedPe => "bedpe",
            RecordKind::Auto => "auto",
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        RecordKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| {
                let names: Vec<&str> = RecordKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown record kind '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open a path for reading, treating `-` as stdin and decompressing
/// `.gz`/`.bgz` files.
pub(crate) fn open_input(path: &Path) -> io::Result<Box<dyn Read>> {
    if path.to_string_lossy() == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        open_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_names() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.as_str().parse::<RecordKind>().unwrap(), kind);
        }
        assert_eq!("BEDPE".parse::<RecordKind>().unwrap(), RecordKind::BedPe);
        assert!("bed7".parse::<RecordKind>().is_err());
    }
}
