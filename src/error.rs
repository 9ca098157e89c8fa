use std::fmt;
use std::num::ParseIntError;

use crate::field::Field;

/// Alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// The reason an operation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    /// Empty text where a value was required.
    #[error("empty input")]
    EmptyInput,

    /// The text does not follow the expected grammar.
    #[error("bad format")]
    BadFormat,

    /// An embedded number could not be converted.
    #[error("parse number: {0}")]
    ParseNumber(ParseIntError),

    /// A value lies outside the interval its field permits.
    #[error("value {value} out of range for field {field}")]
    OutOfRange { field: Field, value: i64 },

    /// The field is not handled by this kind of value.
    #[error("unsupported field {0}")]
    UnsupportedField(Field),

    /// Signed arithmetic overflowed.
    #[error("arithmetic overflow")]
    Overflow,

    /// The SQL scanner received a host value of an unexpected type.
    #[error("unsupported SQL type {0}")]
    UnsupportedSqlType(&'static str),

    /// The zone database could not resolve an identifier or local time.
    #[error("time zone: {0}")]
    Zone(String),
}

/// Where an error happened: the operation that gave up and the text that
/// was being parsed, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Context {
    location: Option<(&'static str, &'static str)>,
    input: Option<Box<str>>,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((type_name, op)) = self.location {
            write!(f, "{type_name}.{op}: ")?;
        }
        if let Some(input) = &self.input {
            write!(f, "parse {input:?}: ")?;
        }
        Ok(())
    }
}

/// The single error type of this crate.
///
/// Every message starts with `goda: `, followed by the failing operation
/// (when raised inside a [`Chain`](crate::Chain)), the offending input (when
/// raised by a parser) and finally the [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("goda: {context}{kind}")]
pub struct Error {
    kind: ErrorKind,
    context: Context,
}

impl Error {
    /// Creates an error of the given kind without context.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: Context::default(),
        }
    }

    pub(crate) fn empty_input() -> Self {
        Self::new(ErrorKind::EmptyInput)
    }

    pub(crate) fn bad_format() -> Self {
        Self::new(ErrorKind::BadFormat)
    }

    pub(crate) fn overflow() -> Self {
        Self::new(ErrorKind::Overflow)
    }

    pub(crate) fn out_of_range(field: Field, value: i64) -> Self {
        Self::new(ErrorKind::OutOfRange { field, value })
    }

    pub(crate) fn unsupported_field(field: Field) -> Self {
        Self::new(ErrorKind::UnsupportedField(field))
    }

    pub(crate) fn zone(message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Zone(message.to_string()))
    }

    /// Returns the reason of this error.
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the text that failed to parse, if this error came from a parser.
    pub fn input(&self) -> Option<&str> {
        self.context.input.as_deref()
    }

    /// Returns the `(type, operation)` that gave up, if recorded.
    pub const fn location(&self) -> Option<(&'static str, &'static str)> {
        self.context.location
    }

    /// Records the text being parsed. The innermost input wins.
    #[must_use]
    pub(crate) fn with_input(mut self, input: &str) -> Self {
        if self.context.input.is_none() {
            self.context.input = Some(input.into());
        }
        self
    }

    /// Records the operation that failed. The innermost location wins.
    #[must_use]
    pub(crate) fn leave_function(mut self, type_name: &'static str, op: &'static str) -> Self {
        if self.context.location.is_none() {
            self.context.location = Some((type_name, op));
        }
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Self {
        Self::new(ErrorKind::ParseNumber(err))
    }
}
