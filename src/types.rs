use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH,
};
use crate::codec::{TextCodec, parse_signed};
use crate::error::{Error, Result};
use crate::field::Field;
use crate::math::floor_mod;
use crate::prelude::*;
use std::fmt;

/// A proleptic Gregorian year.
///
/// Year `0` exists algorithmically (it is 1 BCE) but a `Year` holding `0` is
/// also the unset value, so [`Year::is_zero`] reports it as such.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into,
)]
pub struct Year(i64);

impl Year {
    /// Creates a year from its number.
    #[inline]
    pub const fn of(value: i64) -> Self {
        Self(value)
    }

    /// Returns the year value as i64
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Whether this year has a February 29th.
    #[inline]
    pub const fn is_leap_year(self) -> bool {
        is_leap_year(self.0)
    }

    /// Number of days in this year, 365 or 366.
    #[inline]
    pub const fn length(self) -> u16 {
        if self.is_leap_year() { 366 } else { 365 }
    }
}

impl TextCodec for Year {
    const TYPE_NAME: &'static str = "Year";

    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn append_text<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        if Self::is_zero(*self) {
            return Ok(());
        }
        write!(w, "{}", self.0)
    }

    /// A signed decimal year.
    fn decode_text(text: &str) -> Result<Self> {
        let year = parse_signed(text.as_bytes())?;
        Ok(Self(Field::Year.check(year)?))
    }
}

impl_text_codec!(Year);
impl_sql!(Year);

/// A month-of-year, 1 (January) through 12 (December).
///
/// The default value `0` is the unset month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Self = Self(1);
    pub const FEBRUARY: Self = Self(2);
    pub const MARCH: Self = Self(3);
    pub const APRIL: Self = Self(4);
    pub const MAY: Self = Self(5);
    pub const JUNE: Self = Self(6);
    pub const JULY: Self = Self(7);
    pub const AUGUST: Self = Self(8);
    pub const SEPTEMBER: Self = Self(9);
    pub const OCTOBER: Self = Self(10);
    pub const NOVEMBER: Self = Self(11);
    pub const DECEMBER: Self = Self(12);

    const NAMES: [&'static str; 13] = [
        "",
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];

    /// Creates a new Month, validating that it's in `1..=12`
    ///
    /// # Errors
    /// Returns an `OutOfRange` error for `MonthOfYear` otherwise.
    pub fn of(value: u8) -> Result<Self> {
        if value == 0 || value > MAX_MONTH {
            return Err(Error::out_of_range(Field::MonthOfYear, i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Callers guarantee `value` is in `0..=12`.
    #[inline]
    pub(crate) const fn new_unchecked(value: u8) -> Self {
        Self(value)
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The month `months` after this one, wrapping around December.
    ///
    /// The unset month stays unset.
    #[must_use]
    pub const fn plus(self, months: i64) -> Self {
        if self.is_zero() {
            return self;
        }
        let amount = floor_mod(months, 12);
        Self((floor_mod(self.0 as i64 - 1 + amount, 12) + 1) as u8)
    }

    /// Longest length of this month in days; February counts as 29.
    #[inline]
    pub const fn max_days(self) -> u8 {
        if self.0 == FEBRUARY {
            FEBRUARY_DAYS_LEAP
        } else {
            DAYS_IN_MONTH[self.0 as usize]
        }
    }

    /// Length of this month in days for a leap or common year.
    #[inline]
    pub const fn length(self, is_leap: bool) -> u8 {
        if self.0 == FEBRUARY && is_leap {
            FEBRUARY_DAYS_LEAP
        } else {
            DAYS_IN_MONTH[self.0 as usize]
        }
    }

    /// Day-of-year of the first day of this month.
    pub const fn first_day_of_year(self, is_leap: bool) -> u16 {
        let leap = if is_leap { 1 } else { 0 };
        match self.0 {
            1 => 1,
            2 => 32,
            3 => 60 + leap,
            4 => 91 + leap,
            5 => 121 + leap,
            6 => 152 + leap,
            7 => 182 + leap,
            8 => 213 + leap,
            9 => 244 + leap,
            10 => 274 + leap,
            11 => 305 + leap,
            12 => 335 + leap,
            _ => 0,
        }
    }
}

impl TryFrom<u8> for Month {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::of(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAMES[self.0 as usize])
    }
}

/// A day-of-week, 1 (Monday) through 7 (Sunday).
///
/// The default value `0` is the unset day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const MONDAY: Self = Self(1);
    pub const TUESDAY: Self = Self(2);
    pub const WEDNESDAY: Self = Self(3);
    pub const THURSDAY: Self = Self(4);
    pub const FRIDAY: Self = Self(5);
    pub const SATURDAY: Self = Self(6);
    pub const SUNDAY: Self = Self(7);

    const NAMES: [&'static str; 8] = [
        "",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    /// # Errors
    /// Returns an `OutOfRange` error for `DayOfWeek` unless `value` is in `1..=7`.
    pub fn of(value: u8) -> Result<Self> {
        if value == 0 || value > 7 {
            return Err(Error::out_of_range(Field::DayOfWeek, i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Callers guarantee `value` is in `0..=7`.
    #[inline]
    pub(crate) const fn new_unchecked(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The day `days` after this one, wrapping around Sunday.
    #[must_use]
    pub const fn plus(self, days: i64) -> Self {
        if self.is_zero() {
            return self;
        }
        let amount = floor_mod(days, 7);
        Self((floor_mod(self.0 as i64 - 1 + amount, 7) + 1) as u8)
    }

    /// Maps a Sunday-first numbering (0 = Sunday .. 6 = Saturday) onto this type.
    ///
    /// # Errors
    /// Returns an `OutOfRange` error unless `value` is in `0..=6`.
    pub fn from_sunday_zero(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::SUNDAY),
            1..=6 => Ok(Self(value)),
            _ => Err(Error::out_of_range(Field::DayOfWeek, i64::from(value))),
        }
    }

    /// Sunday-first numbering, 0 = Sunday .. 6 = Saturday. `None` if unset.
    pub const fn to_sunday_zero(self) -> Option<u8> {
        match self.0 {
            0 => None,
            7 => Some(0),
            v => Some(v),
        }
    }

    /// Converts to the host weekday type. `None` if unset.
    pub fn to_weekday(self) -> Option<jiff::civil::Weekday> {
        let offset = i8::try_from(self.0).ok()?;
        jiff::civil::Weekday::from_monday_one_offset(offset).ok()
    }
}

impl From<jiff::civil::Weekday> for DayOfWeek {
    fn from(weekday: jiff::civil::Weekday) -> Self {
        Self(weekday.to_monday_one_offset().unsigned_abs())
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::of(value)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.0
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::NAMES[self.0 as usize])
    }
}

/// The era of a proleptic Gregorian year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Era {
    /// Before the common era, years `<= 0`.
    #[display(fmt = "BCE")]
    Bce = 0,
    /// Common era, years `>= 1`.
    #[display(fmt = "CE")]
    Ce = 1,
}

impl Era {
    /// The era a year falls in.
    pub const fn of_year(year: i64) -> Self {
        if year >= 1 { Self::Ce } else { Self::Bce }
    }

    /// # Errors
    /// Returns an `OutOfRange` error for `Era` unless `value` is 0 or 1.
    pub fn of(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Self::Bce),
            1 => Ok(Self::Ce),
            _ => Err(Error::out_of_range(Field::Era, value)),
        }
    }

    #[inline]
    pub const fn value(self) -> i64 {
        self as i64
    }
}

// Helper functions

pub const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i64, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
