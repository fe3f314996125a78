//! Custom record kinds built by composition.
//!
//! A custom kind is a base kind plus an ordered list of typed trailing
//! columns. The base keeps its own validation and coordinates; the
//! trailing columns only take part in equality and ordering of the whole
//! record, never in overlap tests.
//!
//! ```
//! use bedspec::bed_extension;
//! use bedspec::interval::Interval;
//! use bedspec::record::{Bed3, BedRecord, Extended};
//!
//! bed_extension! {
//!     #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
//!     pub struct Peak {
//!         summit: u64,
//!         label: Option<String>,
//!     }
//! }
//!
//! let peak = Extended::new(
//!     Bed3::new("chr1", 10, 20).unwrap(),
//!     Peak { summit: 15, label: None },
//! )
//! .unwrap();
//! assert_eq!(peak.start(), 10);
//! assert_eq!(peak.to_fields(), vec!["chr1", "10", "20", "15", "."]);
//! assert_eq!(Extended::<Bed3, Peak>::schema().name(), "BED3+2");
//! ```

use crate::error::ValidationError;
use crate::interval::{Interval, Strand};

use super::paired::PairedInterval;
use super::{Bed3, BedRecord, FieldCursor, Named, Schema, Stranded};

/// An ordered list of typed trailing columns.
///
/// Usually implemented through [`bed_extension!`](crate::bed_extension).
pub trait Extension: Sized {
    /// Column names in order.
    const COLUMNS: &'static [&'static str];

    /// Decode and validate the trailing columns under the cursor.
    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError>;

    /// Append the trailing column tokens in order.
    fn write_fields(&self, out: &mut Vec<String>);

    /// Check the trailing columns of an already-typed value.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A base record kind `B` followed by the trailing columns `X`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Extended<B, X> {
    base: B,
    extra: X,
}

impl<B: BedRecord, X: Extension> Extended<B, X> {
    /// Combine a validated base with trailing columns, validating the latter.
    pub fn new(base: B, extra: X) -> Result<Self, ValidationError> {
        extra.validate()?;
        Ok(Self { base, extra })
    }
}

impl<B, X> Extended<B, X> {
    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn extra(&self) -> &X {
        &self.extra
    }

    pub fn into_parts(self) -> (B, X) {
        (self.base, self.extra)
    }
}

impl<B: Interval, X> Interval for Extended<B, X> {
    #[inline]
    fn reference_name(&self) -> &str {
        self.base.reference_name()
    }

    #[inline]
    fn start(&self) -> u64 {
        self.base.start()
    }

    #[inline]
    fn end(&self) -> u64 {
        self.base.end()
    }
}

impl<B: PairedInterval, X> PairedInterval for Extended<B, X> {
    fn first(&self) -> &Bed3 {
        self.base.first()
    }

    fn second(&self) -> &Bed3 {
        self.base.second()
    }
}

impl<B: Named, X> Named for Extended<B, X> {
    fn name(&self) -> Option<&str> {
        self.base.name()
    }
}

impl<B: Stranded, X> Stranded for Extended<B, X> {
    fn strand(&self) -> Strand {
        self.base.strand()
    }
}

impl<B: BedRecord, X: Extension> BedRecord for Extended<B, X> {
    fn schema() -> Schema {
        B::schema().extend(X::COLUMNS)
    }

    fn read_fields(fields: &mut FieldCursor<'_>) -> Result<Self, ValidationError> {
        let base = B::read_fields(fields)?;
        let extra = X::read_fields(fields)?;
        Ok(Self { base, extra })
    }

    fn write_fields(&self, out: &mut Vec<String>) {
        self.base.write_fields(out);
        self.extra.write_fields(out);
    }

    fn territory(&self) -> Vec<Bed3> {
        self.base.territory()
    }
}

/// Declare a struct of typed trailing columns and implement
/// [`Extension`](crate::record::Extension) for it.
///
/// Column names are the field names, in declaration order. Every field type
/// must implement [`BedField`](crate::field::BedField). Derives are left to
/// the caller so that fields such as `f64` can opt out of `Eq`.
#[macro_export]
macro_rules! bed_extension {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_meta:meta])* $field_vis:vis $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$field_meta])* $field_vis $field: $ty ),*
        }

        impl $crate::record::Extension for $name {
            const COLUMNS: &'static [&'static str] = &[$(stringify!($field)),*];

            fn read_fields(
                fields: &mut $crate::record::FieldCursor<'_>,
            ) -> ::std::result::Result<Self, $crate::error::ValidationError> {
                $(
                    let $field = fields.read::<$ty>(stringify!($field))?;
                )*
                let extension = Self { $($field),* };
                $crate::record::Extension::validate(&extension)?;
                ::std::result::Result::Ok(extension)
            }

            fn write_fields(&self, out: &mut ::std::vec::Vec<::std::string::String>) {
                $(
                    out.push($crate::field::BedField::to_token(&self.$field));
                )*
            }

            fn validate(&self) -> ::std::result::Result<(), $crate::error::ValidationError> {
                $(
                    $crate::field::BedField::check(&self.$field, stringify!($field))?;
                )*
                ::std::result::Result::Ok(())
            }
        }
    };
}
