//! Driver-neutral SQL binding.
//!
//! Drivers hand over column values as a [`SqlValue`]; every value type in
//! this crate binds as its canonical text (or `NULL` when unset) and scans
//! back from `NULL`, text, bytes and, for date/time types, a native
//! timestamp.

use crate::codec::TextCodec;
use crate::error::{Error, ErrorKind, Result};

/// A column value as exchanged with a database driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Bytes(Vec<u8>),
    /// A native timestamp column. Its time zone is ignored when scanning into
    /// civil date/time types.
    Timestamp(jiff::Zoned),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl SqlValue {
    /// The name of the host type carried, for error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Timestamp(_) => "timestamp",
            Self::Int(_) => "int64",
            Self::Float(_) => "float64",
            Self::Bool(_) => "bool",
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Conversion into a value a driver can bind.
pub trait ToSqlValue {
    fn to_sql_value(&self) -> SqlValue;
}

/// Conversion from a value a driver scanned.
pub trait FromSqlValue: Sized {
    /// # Errors
    /// `UnsupportedSqlType` for host types this value cannot come from, or
    /// any parse error for malformed text.
    fn from_sql_value(value: &SqlValue) -> Result<Self>;
}

/// `NULL` for the unset value, the canonical text otherwise.
pub(crate) fn bind<T: TextCodec>(value: &T) -> SqlValue {
    if TextCodec::is_zero(value) {
        SqlValue::Null
    } else {
        SqlValue::Text(value.marshal_text())
    }
}

/// Scans `NULL`, text and bytes; timestamps go through `from_timestamp` when
/// the type accepts them.
pub(crate) fn scan<T: TextCodec>(
    value: &SqlValue,
    from_timestamp: Option<fn(&jiff::Zoned) -> Result<T>>,
) -> Result<T> {
    match value {
        SqlValue::Null => Ok(T::default()),
        SqlValue::Text(text) => T::unmarshal_text(text),
        SqlValue::Bytes(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|_| Error::bad_format())?;
            T::unmarshal_text(text)
        }
        SqlValue::Timestamp(zoned) => match from_timestamp {
            Some(convert) => convert(zoned),
            None => Err(unsupported(value)),
        },
        SqlValue::Int(_) | SqlValue::Float(_) | SqlValue::Bool(_) => Err(unsupported(value)),
    }
}

fn unsupported(value: &SqlValue) -> Error {
    Error::new(ErrorKind::UnsupportedSqlType(value.type_name()))
}

macro_rules! impl_sql {
    ($ty:ty) => {
        impl_sql!($ty, None);
    };
    ($ty:ty, $from_timestamp:expr) => {
        impl $crate::sql::ToSqlValue for $ty {
            fn to_sql_value(&self) -> $crate::sql::SqlValue {
                $crate::sql::bind(self)
            }
        }

        impl $crate::sql::FromSqlValue for $ty {
            fn from_sql_value(value: &$crate::sql::SqlValue) -> $crate::error::Result<Self> {
                $crate::sql::scan(value, $from_timestamp)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(SqlValue::Null.type_name(), "null");
        assert_eq!(SqlValue::Int(1).type_name(), "int64");
        assert_eq!(SqlValue::Bytes(vec![]).type_name(), "bytes");
        assert!(SqlValue::Null.is_null());
        assert!(!SqlValue::Bool(false).is_null());
    }
}
