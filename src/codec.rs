//! The text codec every value type shares.
//!
//! A type implements [`TextCodec`] once (canonical emitter plus grammar) and
//! `impl_text_codec!` derives `Display`, `FromStr`, `parse`/`must_parse` and
//! the serde impls from it.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Visitor};

use crate::error::{Error, Result};

/// Canonical text form of a value type.
pub trait TextCodec: Sized + Default + fmt::Display {
    /// Name used when annotating errors.
    const TYPE_NAME: &'static str;

    /// Whether empty text in a container (JSON string, SQL column) means the
    /// unset value rather than an error.
    const EMPTY_IS_ZERO: bool = true;

    /// Whether this is the unset value.
    fn is_zero(&self) -> bool;

    /// Writes the canonical text. The unset value writes nothing, unless the
    /// type has a meaningful zero (`PT0S`, `Z`).
    ///
    /// # Errors
    /// Only if the writer fails.
    fn append_text<W: fmt::Write>(&self, w: &mut W) -> fmt::Result;

    /// Parses the grammar only; callers go through [`TextCodec::parse_text`]
    /// which attaches the input to errors.
    ///
    /// # Errors
    /// Any grammar or range violation.
    fn decode_text(text: &str) -> Result<Self>;

    /// The canonical text as an owned string.
    fn marshal_text(&self) -> String {
        self.to_string()
    }

    /// Parses canonical text. Empty text is an error.
    ///
    /// # Errors
    /// `EmptyInput`, `BadFormat`, `ParseNumber` or `OutOfRange`, each
    /// carrying the offending input.
    fn parse_text(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::empty_input().with_input(text));
        }
        Self::decode_text(text).map_err(|err| err.with_input(text))
    }

    /// Like [`TextCodec::parse_text`] but maps empty text to the unset value
    /// where [`TextCodec::EMPTY_IS_ZERO`] allows it.
    ///
    /// # Errors
    /// See [`TextCodec::parse_text`].
    fn unmarshal_text(text: &str) -> Result<Self> {
        if text.is_empty() && Self::EMPTY_IS_ZERO {
            return Ok(Self::default());
        }
        Self::parse_text(text)
    }
}

macro_rules! impl_text_codec {
    ($ty:ty) => {
        impl $ty {
            /// Parses the canonical ISO-8601 text form.
            ///
            /// # Errors
            /// Returns an error carrying the input if it does not match the grammar.
            pub fn parse(text: &str) -> $crate::error::Result<Self> {
                <Self as $crate::codec::TextCodec>::parse_text(text)
            }

            /// Like `parse`, but panics on malformed input.
            ///
            /// # Panics
            /// If `text` cannot be parsed.
            pub fn must_parse(text: &str) -> Self {
                match Self::parse(text) {
                    Ok(value) => value,
                    Err(err) => panic!("{err}"),
                }
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                <Self as $crate::codec::TextCodec>::append_text(self, f)
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::error::Error;

            fn from_str(s: &str) -> $crate::error::Result<Self> {
                <Self as $crate::codec::TextCodec>::parse_text(s)
            }
        }

        impl ::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::codec::serialize(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::codec::deserialize(deserializer)
            }
        }
    };
}

/// Serializes as the canonical string, or `null` when that string is empty.
pub(crate) fn serialize<T, S>(value: &T, serializer: S) -> core::result::Result<S::Ok, S::Error>
where
    T: TextCodec,
    S: serde::Serializer,
{
    let text = value.marshal_text();
    if text.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(&text)
    }
}

/// Deserializes from `null`, a string or bytes.
pub(crate) fn deserialize<'de, T, D>(deserializer: D) -> core::result::Result<T, D::Error>
where
    T: TextCodec,
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalVisitor(PhantomData))
}

struct OptionalVisitor<T>(PhantomData<T>);

impl<'de, T: TextCodec> Visitor<'de> for OptionalVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an ISO 8601 {} string or null", T::TYPE_NAME)
    }

    fn visit_none<E: de::Error>(self) -> core::result::Result<T, E> {
        Ok(T::default())
    }

    fn visit_unit<E: de::Error>(self) -> core::result::Result<T, E> {
        Ok(T::default())
    }

    fn visit_some<D: de::Deserializer<'de>>(self, deserializer: D) -> core::result::Result<T, D::Error> {
        deserializer.deserialize_str(TextVisitor(PhantomData))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<T, E> {
        TextVisitor(PhantomData).visit_str(v)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> core::result::Result<T, E> {
        TextVisitor(PhantomData).visit_bytes(v)
    }
}

struct TextVisitor<T>(PhantomData<T>);

impl<T: TextCodec> Visitor<'_> for TextVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an ISO 8601 {} string", T::TYPE_NAME)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<T, E> {
        T::unmarshal_text(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> core::result::Result<T, E> {
        let text = std::str::from_utf8(v).map_err(E::custom)?;
        self.visit_str(text)
    }

    fn visit_unit<E: de::Error>(self) -> core::result::Result<T, E> {
        Ok(T::default())
    }
}

// --- grammar helpers ---

/// Parses a non-empty run of ASCII digits.
pub(crate) fn parse_digits(digits: &[u8]) -> Result<i64> {
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::bad_format());
    }
    let text = std::str::from_utf8(digits).map_err(|_| Error::bad_format())?;
    Ok(text.parse::<i64>()?)
}

/// Parses an optionally signed (`+`/`-`) run of ASCII digits.
pub(crate) fn parse_signed(text: &[u8]) -> Result<i64> {
    match text.split_first() {
        Some((b'-', rest)) => Ok(-parse_digits(rest)?),
        Some((b'+', rest)) => parse_digits(rest),
        _ => parse_digits(text),
    }
}

/// Parses exactly two ASCII digits.
pub(crate) fn parse_two_digits(digits: &[u8]) -> Result<u8> {
    match digits {
        [a @ b'0'..=b'9', b @ b'0'..=b'9'] => Ok((a - b'0') * 10 + (b - b'0')),
        _ => Err(Error::bad_format()),
    }
}

/// Parses 1 to 9 fractional-second digits, right-padding with zeros to
/// nanoseconds.
pub(crate) fn parse_fraction(digits: &[u8]) -> Result<i64> {
    if digits.is_empty() || digits.len() > 9 {
        return Err(Error::bad_format());
    }
    let value = parse_digits(digits)?;
    let mut scale = 1;
    for _ in digits.len()..9 {
        scale *= 10;
    }
    Ok(value * scale)
}

/// How many fractional digits to keep when printing nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FractionStyle {
    /// 3, 6 or 9 digits, whichever is the shortest exact form.
    Grouped,
    /// As few digits as possible.
    Trimmed,
}

/// Writes `.fffffffff` for a non-zero `nanos`; nothing for zero.
pub(crate) fn write_fraction<W: fmt::Write>(
    w: &mut W,
    nanos: i64,
    style: FractionStyle,
) -> fmt::Result {
    if nanos == 0 {
        return Ok(());
    }
    let digits = format!("{nanos:09}");
    let keep = match style {
        FractionStyle::Grouped => {
            if nanos % 1_000_000 == 0 {
                3
            } else if nanos % 1_000 == 0 {
                6
            } else {
                9
            }
        }
        FractionStyle::Trimmed => digits.trim_end_matches('0').len(),
    };
    write!(w, ".{}", &digits[..keep])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits(b"0042").unwrap(), 42);
        assert_eq!(parse_digits(b"").unwrap_err().kind(), &ErrorKind::BadFormat);
        assert_eq!(parse_digits(b"4a").unwrap_err().kind(), &ErrorKind::BadFormat);
        assert_eq!(parse_digits(b"+4").unwrap_err().kind(), &ErrorKind::BadFormat);
        assert!(matches!(
            parse_digits(b"99999999999999999999").unwrap_err().kind(),
            ErrorKind::ParseNumber(_)
        ));
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(parse_signed(b"-12").unwrap(), -12);
        assert_eq!(parse_signed(b"+12").unwrap(), 12);
        assert_eq!(parse_signed(b"12").unwrap(), 12);
        assert!(parse_signed(b"-").is_err());
        assert!(parse_signed(b"--1").is_err());
    }

    #[test]
    fn test_parse_two_digits() {
        assert_eq!(parse_two_digits(b"07").unwrap(), 7);
        assert!(parse_two_digits(b"7").is_err());
        assert!(parse_two_digits(b"7x").is_err());
        assert!(parse_two_digits(b"123").is_err());
    }

    #[test]
    fn test_parse_fraction() {
        assert_eq!(parse_fraction(b"5").unwrap(), 500_000_000);
        assert_eq!(parse_fraction(b"345").unwrap(), 345_000_000);
        assert_eq!(parse_fraction(b"123456789").unwrap(), 123_456_789);
        assert_eq!(parse_fraction(b"000000001").unwrap(), 1);
        assert!(parse_fraction(b"").is_err());
        assert!(parse_fraction(b"1234567890").is_err());
    }

    #[test]
    fn test_write_fraction() {
        struct TestCase {
            nanos: i64,
            grouped: &'static str,
            trimmed: &'static str,
        }

        let cases = [
            TestCase {
                nanos: 0,
                grouped: "",
                trimmed: "",
            },
            TestCase {
                nanos: 500_000_000,
                grouped: ".500",
                trimmed: ".5",
            },
            TestCase {
                nanos: 123_400_000,
                grouped: ".123400",
                trimmed: ".1234",
            },
            TestCase {
                nanos: 1,
                grouped: ".000000001",
                trimmed: ".000000001",
            },
            TestCase {
                nanos: 123_456_789,
                grouped: ".123456789",
                trimmed: ".123456789",
            },
        ];

        for case in &cases {
            let mut grouped = String::new();
            write_fraction(&mut grouped, case.nanos, FractionStyle::Grouped).unwrap();
            assert_eq!(grouped, case.grouped, "grouped {}", case.nanos);

            let mut trimmed = String::new();
            write_fraction(&mut trimmed, case.nanos, FractionStyle::Trimmed).unwrap();
            assert_eq!(trimmed, case.trimmed, "trimmed {}", case.nanos);
        }
    }
}
