//! Typed BED column values and their text encoding.
//!
//! Every column of every record kind is a [`BedField`]: it knows how to
//! decode itself from one text token and how to write itself back out.
//! Optional columns use `.` as the missing-value placeholder.

use std::fmt;

use crate::error::ValidationError;
use crate::interval::Strand;

/// The token used for a missing optional field.
pub const MISSING_FIELD: &str = ".";

/// A value that occupies exactly one BED column.
pub trait BedField: Sized {
    /// Decode a value from a single token. `field` names the column for errors.
    fn decode(token: &str, field: &'static str) -> Result<Self, ValidationError>;

    /// Append the column text for this value.
    fn encode(&self, out: &mut String);

    /// Check invariants of an already-typed value.
    fn check(&self, _field: &'static str) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Encode into a freshly allocated token.
    fn to_token(&self) -> String {
        let mut out = String::new();
        self.encode(&mut out);
        out
    }
}

/// Validate free text that must survive a trip through a delimited line.
pub(crate) fn check_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    if value.chars().any(|c| c.is_whitespace()) {
        return Err(ValidationError::InvalidText {
            field,
            value: value.to_string(),
            reason: "contains whitespace",
        });
    }
    Ok(())
}

/// Validate an optional name: it may not collide with the missing placeholder.
pub(crate) fn check_name(name: Option<&str>, field: &'static str) -> Result<(), ValidationError> {
    if let Some(name) = name {
        check_text(name, field)?;
        if name == MISSING_FIELD {
            return Err(ValidationError::InvalidText {
                field,
                value: name.to_string(),
                reason: "collides with the missing-field placeholder",
            });
        }
    }
    Ok(())
}

/// Validate a BED score against the declared range.
///
/// Out-of-range scores are warned about unless strict scores are enabled.
pub(crate) fn check_score(score: Option<i64>, field: &'static str) -> Result<(), ValidationError> {
    if let Some(value) = score {
        if !crate::config::SCORE_RANGE.contains(&value) {
            if crate::config::is_strict_scores() {
                return Err(ValidationError::ScoreOutOfRange { field, value });
            }
            log::warn!("{} {} is outside the BED range [0, 1000]", field, value);
        }
    }
    Ok(())
}

fn parse_integer<T: std::str::FromStr>(
    token: &str,
    field: &'static str,
    expected: &'static str,
) -> Result<T, ValidationError> {
    token.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        expected,
        value: token.to_string(),
    })
}

impl BedField for String {
    fn decode(token: &str, field: &'static str) -> Result<Self, ValidationError> {
        check_text(token, field)?;
        Ok(token.to_string())
    }

    fn check(&self, field: &'static str) -> Result<(), ValidationError> {
        check_text(self, field)
    }

    fn encode(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl BedField for u64 {
    fn decode(token: &str, field: &'static str) -> Result<Self, ValidationError> {
        if let Some(digits) = token.strip_prefix('-') {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ValidationError::NegativeValue {
                    field,
                    value: token.to_string(),
                });
            }
        }
        parse_integer(token, field, "a non-negative integer")
    }

    fn encode(&self, out: &mut String) {
        out.push_str(itoa::Buffer::new().format(*self));
    }
}

impl BedField for u32 {
    fn decode(token: &str, field: &'static str) -> Result<Self, ValidationError> {
        let value = u64::decode(token, field)?;
        u32::try_from(value).map_err(|_| ValidationError::InvalidNumber {
            field,
            expected: "a 32-bit unsigned integer",
            value: token.to_string(),
        })
    }

    fn encode(&self, out: &mut String) {
        out.push_str(itoa::Buffer::new().format(*self));
    }
}

impl BedField for i64 {
    fn decode(token: &str, field: &'static str) -> Result<Self, ValidationError> {
        parse_integer(token, field, "an integer")
    }

    fn encode(&self, out: &mut String) {
        out.push_str(itoa::Buffer::new().format(*self));
    }
}

impl BedField for f64 {
    fn decode(token: &str, field: &'static str) -> Result<Self, ValidationError> {
        let value: f64 = token.parse().map_err(|_| ValidationError::InvalidNumber {
            field,
            expected: "a real number",
            value: token.to_string(),
        })?;
        check_finite(value, field)?;
        Ok(value)
    }

    fn check(&self, field: &'static str) -> Result<(), ValidationError> {
        check_finite(*self, field)
    }

    fn encode(&self, out: &mut String) {
        out.push_str(ryu::Buffer::new().format(*self));
    }
}

pub(crate) fn check_finite(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite {
            field,
            value: value.to_string(),
        })
    }
}

impl BedField for Strand {
    fn decode(token: &str, field: &'static str) -> Result<Self, ValidationError> {
        token.parse().map_err(|_| ValidationError::InvalidStrand {
            field,
            value: token.to_string(),
        })
    }

    fn encode(&self, out: &mut String) {
        out.push_str(self.as_str());
    }
}

impl<T: BedField> BedField for Option<T> {
    fn decode(token: &str, field: &'static str) -> Result<Self, ValidationError> {
        if token == MISSING_FIELD {
            Ok(None)
        } else {
            T::decode(token, field).map(Some)
        }
    }

    fn check(&self, field: &'static str) -> Result<(), ValidationError> {
        if let Some(value) = self {
            value.check(field)?;
            let token = value.to_token();
            if token == MISSING_FIELD {
                return Err(ValidationError::InvalidText {
                    field,
                    value: token,
                    reason: "collides with the missing-field placeholder",
                });
            }
        }
        Ok(())
    }

    fn encode(&self, out: &mut String) {
        match self {
            Some(value) => value.encode(out),
            None => out.push_str(MISSING_FIELD),
        }
    }
}

/// Comma-separated lists. An empty list is written as the placeholder.
impl<T: BedField> BedField for Vec<T> {
    fn decode(token: &str, field: &'static str) -> Result<Self, ValidationError> {
        if token == MISSING_FIELD {
            return Ok(Vec::new());
        }
        token
            .strip_suffix(',')
            .unwrap_or(token)
            .split(',')
            .map(|item| T::decode(item, field))
            .collect()
    }

    fn check(&self, field: &'static str) -> Result<(), ValidationError> {
        for value in self {
            value.check(field)?;
            let token = value.to_token();
            if token.contains(',') {
                return Err(ValidationError::InvalidText {
                    field,
                    value: token,
                    reason: "list items may not contain commas",
                });
            }
            // a lone `.` item would read back as the empty list
            if self.len() == 1 && token == MISSING_FIELD {
                return Err(ValidationError::InvalidText {
                    field,
                    value: token,
                    reason: "collides with the missing-field placeholder",
                });
            }
        }
        Ok(())
    }

    fn encode(&self, out: &mut String) {
        if self.is_empty() {
            out.push_str(MISSING_FIELD);
            return;
        }
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            value.encode(out);
        }
    }
}

/// The display color of a BED record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl BedColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for BedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl BedField for BedColor {
    fn decode(token: &str, field: &'static str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidColor {
            field,
            value: token.to_string(),
        };
        let mut parts = token.split(',');
        let mut channel = || -> Result<u8, ValidationError> {
            parts
                .next()
                .and_then(|p| p.parse::<u8>().ok())
                .ok_or_else(invalid)
        };
        let color = BedColor::new(channel()?, channel()?, channel()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(color)
    }

    fn encode(&self, out: &mut String) {
        let mut buf = itoa::Buffer::new();
        out.push_str(buf.format(self.r));
        out.push(',');
        out.push_str(buf.format(self.g));
        out.push(',');
        out.push_str(buf.format(self.b));
    }
}

/// The `itemRgb` column, where `0` also means "no color".
pub(crate) fn decode_item_rgb(
    token: &str,
    field: &'static str,
) -> Result<Option<BedColor>, ValidationError> {
    if token == "0" {
        Ok(None)
    } else {
        Option::<BedColor>::decode(token, field)
    }
}
