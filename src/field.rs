//! The uniform field-access protocol shared by dates, times, date-times and
//! offsets.
//!
//! Every value answers [`TemporalAccessor::get_field`] for the closed set of
//! [`Field`]s it understands, and values that can be rebuilt from a single
//! field implement [`TemporalAdjuster::with_temporal`].

use crate::consts::{MAX_OFFSET_SECONDS, MAX_YEAR, MIN_YEAR};
use crate::date::{MAX_EPOCH_DAY, MIN_EPOCH_DAY};
use crate::error::{Error, Result};
use crate::prelude::*;

/// A temporal field, such as month-of-year or minute-of-hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Field {
    #[display(fmt = "NanoOfSecond")]
    NanoOfSecond,
    #[display(fmt = "NanoOfDay")]
    NanoOfDay,
    #[display(fmt = "MicroOfSecond")]
    MicroOfSecond,
    #[display(fmt = "MicroOfDay")]
    MicroOfDay,
    #[display(fmt = "MilliOfSecond")]
    MilliOfSecond,
    #[display(fmt = "MilliOfDay")]
    MilliOfDay,
    #[display(fmt = "SecondOfMinute")]
    SecondOfMinute,
    #[display(fmt = "SecondOfDay")]
    SecondOfDay,
    #[display(fmt = "MinuteOfHour")]
    MinuteOfHour,
    #[display(fmt = "MinuteOfDay")]
    MinuteOfDay,
    #[display(fmt = "HourOfAmPm")]
    HourOfAmPm,
    #[display(fmt = "ClockHourOfAmPm")]
    ClockHourOfAmPm,
    #[display(fmt = "HourOfDay")]
    HourOfDay,
    #[display(fmt = "ClockHourOfDay")]
    ClockHourOfDay,
    #[display(fmt = "AmPmOfDay")]
    AmPmOfDay,
    #[display(fmt = "DayOfWeek")]
    DayOfWeek,
    #[display(fmt = "AlignedDayOfWeekInMonth")]
    AlignedDayOfWeekInMonth,
    #[display(fmt = "AlignedDayOfWeekInYear")]
    AlignedDayOfWeekInYear,
    #[display(fmt = "DayOfMonth")]
    DayOfMonth,
    #[display(fmt = "DayOfYear")]
    DayOfYear,
    #[display(fmt = "EpochDay")]
    EpochDay,
    #[display(fmt = "AlignedWeekOfMonth")]
    AlignedWeekOfMonth,
    #[display(fmt = "AlignedWeekOfYear")]
    AlignedWeekOfYear,
    #[display(fmt = "MonthOfYear")]
    MonthOfYear,
    #[display(fmt = "ProlepticMonth")]
    ProlepticMonth,
    #[display(fmt = "YearOfEra")]
    YearOfEra,
    #[display(fmt = "Year")]
    Year,
    #[display(fmt = "Era")]
    Era,
    #[display(fmt = "InstantSeconds")]
    InstantSeconds,
    #[display(fmt = "OffsetSeconds")]
    OffsetSeconds,
}

impl Field {
    /// All fields, time fields first.
    pub const ALL: [Self; 30] = [
        Self::NanoOfSecond,
        Self::NanoOfDay,
        Self::MicroOfSecond,
        Self::MicroOfDay,
        Self::MilliOfSecond,
        Self::MilliOfDay,
        Self::SecondOfMinute,
        Self::SecondOfDay,
        Self::MinuteOfHour,
        Self::MinuteOfDay,
        Self::HourOfAmPm,
        Self::ClockHourOfAmPm,
        Self::HourOfDay,
        Self::ClockHourOfDay,
        Self::AmPmOfDay,
        Self::DayOfWeek,
        Self::AlignedDayOfWeekInMonth,
        Self::AlignedDayOfWeekInYear,
        Self::DayOfMonth,
        Self::DayOfYear,
        Self::EpochDay,
        Self::AlignedWeekOfMonth,
        Self::AlignedWeekOfYear,
        Self::MonthOfYear,
        Self::ProlepticMonth,
        Self::YearOfEra,
        Self::Year,
        Self::Era,
        Self::InstantSeconds,
        Self::OffsetSeconds,
    ];

    /// Whether this field describes a position within a day.
    pub const fn is_time_based(self) -> bool {
        matches!(
            self,
            Self::NanoOfSecond
                | Self::NanoOfDay
                | Self::MicroOfSecond
                | Self::MicroOfDay
                | Self::MilliOfSecond
                | Self::MilliOfDay
                | Self::SecondOfMinute
                | Self::SecondOfDay
                | Self::MinuteOfHour
                | Self::MinuteOfDay
                | Self::HourOfAmPm
                | Self::ClockHourOfAmPm
                | Self::HourOfDay
                | Self::ClockHourOfDay
                | Self::AmPmOfDay
        )
    }

    /// Whether this field describes a calendar date.
    pub const fn is_date_based(self) -> bool {
        matches!(
            self,
            Self::DayOfWeek
                | Self::AlignedDayOfWeekInMonth
                | Self::AlignedDayOfWeekInYear
                | Self::DayOfMonth
                | Self::DayOfYear
                | Self::EpochDay
                | Self::AlignedWeekOfMonth
                | Self::AlignedWeekOfYear
                | Self::MonthOfYear
                | Self::ProlepticMonth
                | Self::YearOfEra
                | Self::Year
                | Self::Era
        )
    }

    /// The outer bounds a value of this field can take.
    ///
    /// Some fields have tighter bounds in context, e.g. day-of-month in
    /// February; those are checked when the value is applied.
    pub const fn range(self) -> ValueRange {
        const NANOS_PER_DAY: i64 = 86_400 * 1_000_000_000;
        let (min, max) = match self {
            Self::NanoOfSecond => (0, 999_999_999),
            Self::NanoOfDay => (0, NANOS_PER_DAY - 1),
            Self::MicroOfSecond => (0, 999_999),
            Self::MicroOfDay => (0, NANOS_PER_DAY / 1_000 - 1),
            Self::MilliOfSecond => (0, 999),
            Self::MilliOfDay => (0, NANOS_PER_DAY / 1_000_000 - 1),
            Self::SecondOfMinute => (0, 59),
            Self::SecondOfDay => (0, 86_399),
            Self::MinuteOfHour => (0, 59),
            Self::MinuteOfDay => (0, 1_439),
            Self::HourOfAmPm => (0, 11),
            Self::ClockHourOfAmPm => (1, 12),
            Self::HourOfDay => (0, 23),
            Self::ClockHourOfDay => (1, 24),
            Self::AmPmOfDay => (0, 1),
            Self::DayOfWeek | Self::AlignedDayOfWeekInMonth | Self::AlignedDayOfWeekInYear => {
                (1, 7)
            }
            Self::DayOfMonth => (1, 31),
            Self::DayOfYear => (1, 366),
            Self::EpochDay => (MIN_EPOCH_DAY, MAX_EPOCH_DAY),
            Self::AlignedWeekOfMonth => (1, 5),
            Self::AlignedWeekOfYear => (1, 53),
            Self::MonthOfYear => (1, 12),
            Self::ProlepticMonth => (MIN_YEAR * 12, MAX_YEAR * 12 + 11),
            Self::YearOfEra => (1, MAX_YEAR + 1),
            Self::Year => (MIN_YEAR, MAX_YEAR),
            Self::Era => (0, 1),
            Self::InstantSeconds => (i64::MIN, i64::MAX),
            Self::OffsetSeconds => (-(MAX_OFFSET_SECONDS as i64), MAX_OFFSET_SECONDS as i64),
        };
        ValueRange { min, max }
    }

    /// Checks that `value` lies in [`Field::range`].
    ///
    /// # Errors
    /// Returns an `OutOfRange` error naming this field otherwise.
    pub fn check(self, value: i64) -> Result<i64> {
        if self.range().contains(value) {
            Ok(value)
        } else {
            Err(Error::out_of_range(self, value))
        }
    }
}

/// Inclusive bounds of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    pub min: i64,
    pub max: i64,
}

impl ValueRange {
    #[inline]
    pub const fn contains(self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// The answer to a field query: a value, or a marker that the field could
/// not be read (unsupported field or unset entity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemporalValue {
    v: i64,
    unsupported: bool,
}

impl TemporalValue {
    /// A readable value.
    #[inline]
    pub const fn of(v: i64) -> Self {
        Self {
            v,
            unsupported: false,
        }
    }

    /// The marker for a field that could not be read.
    #[inline]
    pub const fn unsupported() -> Self {
        Self {
            v: 0,
            unsupported: true,
        }
    }

    /// The raw value; `0` when unsupported.
    #[inline]
    pub const fn value(self) -> i64 {
        self.v
    }

    #[inline]
    pub const fn is_unsupported(self) -> bool {
        self.unsupported
    }

    /// The value if it is supported.
    #[inline]
    pub const fn get(self) -> Option<i64> {
        if self.unsupported { None } else { Some(self.v) }
    }
}

impl From<i64> for TemporalValue {
    fn from(v: i64) -> Self {
        Self::of(v)
    }
}

/// Read access to the fields of a temporal value.
pub trait TemporalAccessor {
    /// Whether this is the unset value.
    fn is_zero(&self) -> bool;

    /// Whether this kind of value can answer or accept `field`.
    fn is_supported_field(&self, field: Field) -> bool;

    /// Reads `field`. Unset values and unsupported fields yield
    /// [`TemporalValue::unsupported`].
    fn get_field(&self, field: Field) -> TemporalValue;
}

/// Rebuilding a temporal value with one field replaced.
pub trait TemporalAdjuster: TemporalAccessor + Sized {
    /// Returns a copy of this value with `field` set to `value`.
    ///
    /// An unset value comes back unchanged, as does any value when `value`
    /// itself is [`TemporalValue::unsupported`].
    ///
    /// # Errors
    /// `UnsupportedField` if `field` is not supported, `OutOfRange` if
    /// `value` does not fit the field.
    fn with_temporal(&self, field: Field, value: TemporalValue) -> Result<Self>;

    /// Shorthand for [`with_temporal`](Self::with_temporal) with a plain integer.
    ///
    /// # Errors
    /// See [`with_temporal`](Self::with_temporal).
    fn with_field(&self, field: Field, value: i64) -> Result<Self> {
        self.with_temporal(field, TemporalValue::of(value))
    }
}

/// Shared prologue of every `with_temporal`: support check, then the
/// unset/no-op short cuts, then the range check.
pub(crate) fn check_set<T: TemporalAccessor>(
    target: &T,
    field: Field,
    value: TemporalValue,
) -> Result<Option<i64>> {
    if !target.is_supported_field(field) {
        return Err(Error::unsupported_field(field));
    }
    if target.is_zero() {
        return Ok(None);
    }
    match value.get() {
        Some(v) => field.check(v).map(Some),
        None => Ok(None),
    }
}
