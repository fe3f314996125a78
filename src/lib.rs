// Clippy allows for the whole crate
#![allow(clippy::too_many_arguments)]

//! bedspec: typed BED records and an overlap index.
//!
//! This library models the BED family of genomic interval formats as
//! validated, immutable record types and answers overlap queries against a
//! fixed collection of them.
//!
//! # Features
//!
//! - **Typed records**: points, BED3 through BED12, bedGraph and paired
//!   records, plus custom kinds composed with [`bed_extension!`]
//! - **Overlap index**: an implicit augmented interval tree with lazy,
//!   ordered query results
//! - **Compressed input**: `.gz` and `.bgz` files are read transparently
//! - **Parallel processing**: Uses Rayon for sorting and batch queries
//!
//! # Example
//!
//! ```rust
//! use bedspec::{bed, index::IntervalIndex, interval::Interval, record::Bed6};
//!
//! let genes: Vec<Bed6> = bed::parse_records(
//!     "chr1\t100\t200\tgeneA\t0\t+\nchr1\t500\t900\tgeneB\t0\t-\n",
//! )
//! .unwrap();
//! let index = IntervalIndex::build(genes).unwrap();
//!
//! let hits = index.overlapping(&("chr1", 150u64, 600u64)).unwrap();
//! assert_eq!(hits.len(), 2);
//! assert_eq!(hits[0].name(), Some("geneA"));
//! assert!(hits.iter().all(|g| g.reference_name() == "chr1"));
//! ```

pub mod bed;
pub mod commands;
pub mod config;
pub mod error;
pub mod field;
pub mod format;
pub mod index;
pub mod interval;
pub mod parallel;
pub mod record;

// Re-export commonly used types
pub use bed::{parse_records, read_records, BedLine, BedReader, BedWriter};
pub use error::{BedError, FormatError, QueryError, ValidationError};
pub use index::IntervalIndex;
pub use interval::{Interval, Strand};
pub use record::BedRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bed::{parse_records, read_records, BedLine, BedReader, BedWriter};
    pub use crate::error::{BedError, FormatError, QueryError, ValidationError};
    pub use crate::field::{BedColor, BedField};
    pub use crate::format::{Decode, Delimiter, Encode};
    pub use crate::index::IntervalIndex;
    pub use crate::interval::{Interval, Strand};
    pub use crate::record::{
        AnyBed, Bed12, Bed2, Bed3, Bed4, Bed5, Bed6, BedGraph, BedPe, BedRecord, Extended,
        Extension, Named, PairBed, PairedInterval, Stranded,
    };
}
