use crate::error::{FormatError, Result};
use crate::format::{Decode, Encode};
use crate::interval::Interval;

use super::{Bed12, Bed2, Bed3, Bed4, Bed5, Bed6, BedRecord, FieldCursor, Schema};

/// A simple BED record whose kind is inferred from its column count.
///
/// 2, 3, 4, 5, 6 and 12 columns map to the matching preset; any other count
/// is a [`FormatError::UnknownLayout`]. bedGraph and paired files share
/// column counts with these kinds and must be read with their own type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnyBed {
    Bed2(Bed2),
    Bed3(Bed3),
    Bed4(Bed4),
    Bed5(Bed5),
    Bed6(Bed6),
    Bed12(Bed12),
}

macro_rules! each_kind {
    ($value:expr, $bed:ident => $body:expr) => {
        match $value {
            AnyBed::Bed2($bed) => $body,
            AnyBed::Bed3($bed) => $body,
            AnyBed::Bed4($bed) => $body,
            AnyBed::Bed5($bed) => $body,
            AnyBed::Bed6($bed) => $body,
            AnyBed::Bed12($bed) => $body,
        }
    };
}

impl AnyBed {
    /// Decode, choosing the kind from the number of columns.
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        fn read<T: BedRecord>(fields: &[&str]) -> Result<T> {
            Ok(T::read_fields(&mut FieldCursor::new(fields))?)
        }

        Ok(match fields.len() {
            2 => AnyBed::Bed2(read(fields)?),
            3 => AnyBed::Bed3(read(fields)?),
            4 => AnyBed::Bed4(read(fields)?),
            5 => AnyBed::Bed5(read(fields)?),
            6 => AnyBed::Bed6(read(fields)?),
            12 => AnyBed::Bed12(read(fields)?),
            found => return Err(FormatError::UnknownLayout { found }.into()),
        })
    }

    /// The layout of the wrapped kind.
    pub fn schema(&self) -> Schema {
        match self {
            AnyBed::Bed2(_) => Bed2::schema(),
            AnyBed::Bed3(_) => Bed3::schema(),
            AnyBed::Bed4(_) => Bed4::schema(),
            AnyBed::Bed5(_) => Bed5::schema(),
            AnyBed::Bed6(_) => Bed6::schema(),
            AnyBed::Bed12(_) => Bed12::schema(),
        }
    }

    pub fn to_fields(&self) -> Vec<String> {
        each_kind!(self, bed => bed.to_fields())
    }

    pub fn territory(&self) -> Vec<Bed3> {
        each_kind!(self, bed => bed.territory())
    }
}

impl Interval for AnyBed {
    fn reference_name(&self) -> &str {
        each_kind!(self, bed => bed.reference_name())
    }

    fn start(&self) -> u64 {
        each_kind!(self, bed => bed.start())
    }

    fn end(&self) -> u64 {
        each_kind!(self, bed => bed.end())
    }
}

impl Decode for AnyBed {
    fn decode_fields(fields: &[&str]) -> Result<Self> {
        AnyBed::from_fields(fields)
    }
}

impl Encode for AnyBed {
    fn layout(&self) -> Schema {
        self.schema()
    }

    fn encode_fields(&self) -> Vec<String> {
        self.to_fields()
    }
}

macro_rules! impl_from_kind {
    ($($kind:ident),*) => {
        $(
            impl From<$kind> for AnyBed {
                fn from(bed: $kind) -> Self {
                    AnyBed::$kind(bed)
                }
            }
        )*
    };
}

impl_from_kind!(Bed2, Bed3, Bed4, Bed5, Bed6, Bed12);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BedError;

    #[test]
    fn test_kind_from_column_count() {
        let point = AnyBed::from_fields(&["chr1", "5"]).unwrap();
        assert_eq!(point, AnyBed::Bed2(Bed2::new("chr1", 5).unwrap()));
        assert_eq!(point.end(), 6);

        let bed = AnyBed::from_fields(&["chr1", "1", "2", "foo", "5"]).unwrap();
        assert_eq!(bed.schema().name(), "BED5");
        assert_eq!(bed.to_fields(), vec!["chr1", "1", "2", "foo", "5"]);
    }

    #[test]
    fn test_unknown_layout() {
        let err = AnyBed::from_fields(&["chr1", "1", "2", "a", "b", "c", "d"]).unwrap_err();
        assert!(matches!(
            err,
            BedError::Format(FormatError::UnknownLayout { found: 7 })
        ));
        assert!(AnyBed::from_fields(&["chr1"]).is_err());
    }

    #[test]
    fn test_layout_follows_value() {
        let a: AnyBed = Bed3::new("chr1", 1, 2).unwrap().into();
        let b: AnyBed = Bed4::new("chr1", 1, 2, None).unwrap().into();
        assert_ne!(a.layout(), b.layout());
        assert_eq!(a.territory(), vec![Bed3::new("chr1", 1, 2).unwrap()]);
    }
}
