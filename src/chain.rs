//! Fluent arithmetic with a sticky error.
//!
//! ```
//! use goda::{LocalDate, Month};
//!
//! let date = LocalDate::must_of(2024, Month::JANUARY, 31)
//!     .chain()
//!     .plus_months(1)
//!     .plus_days(1)
//!     .result()
//!     .unwrap();
//! assert_eq!(date.to_string(), "2024-03-01");
//! ```

use crate::codec::TextCodec;
use crate::date::LocalDate;
use crate::datetime::LocalDateTime;
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::field::{Field, TemporalAdjuster};
use crate::offset::ZoneOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::time::LocalTime;

/// A value being transformed step by step.
///
/// The first failing step records its error, annotated with the type and
/// operation, and every later step is skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain<T> {
    value: T,
    error: Option<Error>,
}

impl<T: TextCodec + Copy> Chain<T> {
    pub const fn new(value: T) -> Self {
        Self { value, error: None }
    }

    fn step(self, op: &'static str, f: impl FnOnce(T) -> Result<T>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match f(self.value) {
            Ok(value) => Self::new(value),
            Err(err) => {
                trace!("{}.{op} failed: {err}", T::TYPE_NAME);
                Self {
                    value: self.value,
                    error: Some(err.leave_function(T::TYPE_NAME, op)),
                }
            }
        }
    }

    /// The first error raised, if any.
    pub const fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// # Errors
    /// The first error raised by any step.
    pub fn result(self) -> Result<T> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }

    /// # Panics
    /// If any step failed.
    pub fn must_get(self) -> T {
        match self.result() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// The final value, or `default` if any step failed.
    pub fn get_or(self, default: T) -> T {
        self.result().unwrap_or(default)
    }
}

impl<T: TextCodec + TemporalAdjuster + Copy> Chain<T> {
    pub fn with_field(self, field: Field, value: i64) -> Self {
        self.step("with_field", |v| v.with_field(field, value))
    }
}

macro_rules! chain_ops {
    ($ty:ty { $($op:ident($($arg:ident: $arg_ty:ty),*)),* $(,)? }) => {
        impl $ty {
            /// Starts a [`Chain`] of fallible operations on this value.
            pub const fn chain(self) -> Chain<Self> {
                Chain::new(self)
            }
        }

        impl Chain<$ty> {
            $(
                pub fn $op(self, $($arg: $arg_ty),*) -> Self {
                    self.step(stringify!($op), |value| value.$op($($arg),*))
                }
            )*
        }
    };
}

chain_ops!(LocalDate {
    plus_days(days: i64),
    minus_days(days: i64),
    plus_weeks(weeks: i64),
    minus_weeks(weeks: i64),
    plus_months(months: i64),
    minus_months(months: i64),
    plus_years(years: i64),
    minus_years(years: i64),
    with_year(year: i64),
    with_month(month: u8),
    with_day_of_month(day_of_month: u8),
    with_day_of_year(day_of_year: u16),
});

chain_ops!(LocalTime {
    with_hour(hour: u8),
    with_minute(minute: u8),
    with_second(second: u8),
    with_nano(nano: u32),
});

// Time-of-day arithmetic wraps and cannot fail.
impl Chain<LocalTime> {
    pub fn plus_hours(self, hours: i64) -> Self {
        self.step("plus_hours", |value| Ok(value.plus_hours(hours)))
    }

    pub fn plus_minutes(self, minutes: i64) -> Self {
        self.step("plus_minutes", |value| Ok(value.plus_minutes(minutes)))
    }

    pub fn plus_seconds(self, seconds: i64) -> Self {
        self.step("plus_seconds", |value| Ok(value.plus_seconds(seconds)))
    }

    pub fn plus_nanos(self, nanos: i64) -> Self {
        self.step("plus_nanos", |value| Ok(value.plus_nanos(nanos)))
    }

    pub fn minus_hours(self, hours: i64) -> Self {
        self.step("minus_hours", |value| Ok(value.minus_hours(hours)))
    }

    pub fn minus_minutes(self, minutes: i64) -> Self {
        self.step("minus_minutes", |value| Ok(value.minus_minutes(minutes)))
    }

    pub fn minus_seconds(self, seconds: i64) -> Self {
        self.step("minus_seconds", |value| Ok(value.minus_seconds(seconds)))
    }

    pub fn minus_nanos(self, nanos: i64) -> Self {
        self.step("minus_nanos", |value| Ok(value.minus_nanos(nanos)))
    }
}

chain_ops!(LocalDateTime {
    plus_days(days: i64),
    minus_days(days: i64),
    plus_weeks(weeks: i64),
    minus_weeks(weeks: i64),
    plus_months(months: i64),
    minus_months(months: i64),
    plus_years(years: i64),
    minus_years(years: i64),
    plus_hours(hours: i64),
    minus_hours(hours: i64),
    plus_minutes(minutes: i64),
    minus_minutes(minutes: i64),
    plus_seconds(seconds: i64),
    minus_seconds(seconds: i64),
    plus_nanos(nanos: i64),
    minus_nanos(nanos: i64),
    plus_duration(duration: Duration),
    minus_duration(duration: Duration),
    with_year(year: i64),
    with_month(month: u8),
    with_day_of_month(day_of_month: u8),
    with_day_of_year(day_of_year: u16),
    with_hour(hour: u8),
    with_minute(minute: u8),
    with_second(second: u8),
    with_nano(nano: u32),
});

chain_ops!(OffsetDateTime {
    plus_days(days: i64),
    minus_days(days: i64),
    plus_weeks(weeks: i64),
    minus_weeks(weeks: i64),
    plus_months(months: i64),
    minus_months(months: i64),
    plus_years(years: i64),
    minus_years(years: i64),
    plus_hours(hours: i64),
    minus_hours(hours: i64),
    plus_minutes(minutes: i64),
    minus_minutes(minutes: i64),
    plus_seconds(seconds: i64),
    minus_seconds(seconds: i64),
    plus_nanos(nanos: i64),
    minus_nanos(nanos: i64),
    plus_duration(duration: Duration),
    minus_duration(duration: Duration),
    with_offset_same_instant(offset: ZoneOffset),
});

chain_ops!(ZoneOffset {});

chain_ops!(Duration {
    plus(other: Duration),
    minus(other: Duration),
    multiplied_by(scalar: i64),
    negated(),
    abs(),
});
