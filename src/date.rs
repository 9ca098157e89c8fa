use std::cmp::Ordering;
use std::fmt;

use crate::codec::{TextCodec, parse_signed, parse_two_digits};
use crate::consts::{DAYS_0000_TO_1970, DAYS_PER_CYCLE, MAX_YEAR, MIN_YEAR};
use crate::datetime::LocalDateTime;
use crate::error::{Error, Result};
use crate::field::{Field, TemporalAccessor, TemporalAdjuster, TemporalValue, check_set};
use crate::math::{add_exact, floor_div, floor_mod, mul_exact, neg_exact};
use crate::time::LocalTime;
use crate::types::{DayOfWeek, Era, Month, Year, days_in_month, is_leap_year};
use crate::zone::ZoneId;

/// Epoch day of `-140737488355327-01-01`.
pub(crate) const MIN_EPOCH_DAY: i64 = epoch_day_of(MIN_YEAR, 1, 1);
/// Epoch day of `+140737488355327-12-31`.
pub(crate) const MAX_EPOCH_DAY: i64 = epoch_day_of(MAX_YEAR, 12, 31);

/// Days since 1970-01-01 of a valid proleptic Gregorian date.
const fn epoch_day_of(year: i64, month: u8, day_of_month: u8) -> i64 {
    let y = year;
    let m = month as i64;
    let mut total = 365 * y;
    if y >= 0 {
        total += (y + 3) / 4 - (y + 99) / 100 + (y + 399) / 400;
    } else {
        total -= y / -4 - y / -100 + y / -400;
    }
    total += (367 * m - 362) / 12;
    total += day_of_month as i64 - 1;
    if m > 2 {
        total -= 1;
        if !is_leap_year(y) {
            total -= 1;
        }
    }
    total - DAYS_0000_TO_1970
}

/// Inverse of [`epoch_day_of`], for `epoch_day` in
/// `MIN_EPOCH_DAY..=MAX_EPOCH_DAY`.
const fn date_of_epoch_day(epoch_day: i64) -> (i64, u8, u8) {
    // Work from 0000-03-01 so the leap day falls at the end of each cycle.
    let mut zero_day = epoch_day + DAYS_0000_TO_1970 - 60;
    let mut adjust = 0;
    if zero_day < 0 {
        let adjust_cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
        adjust = adjust_cycles * 400;
        zero_day += -adjust_cycles * DAYS_PER_CYCLE;
    }
    let mut year_est = ((400 * zero_day as i128 + 591) / DAYS_PER_CYCLE as i128) as i64;
    let mut doy_est = zero_day - days_before_march_year(year_est);
    if doy_est < 0 {
        year_est -= 1;
        doy_est = zero_day - days_before_march_year(year_est);
    }
    year_est += adjust;

    let march_month0 = (doy_est * 5 + 2) / 153;
    let month = (march_month0 + 2) % 12 + 1;
    let dom = doy_est - (march_month0 * 306 + 5) / 10 + 1;
    year_est += march_month0 / 10;
    (year_est, month as u8, dom as u8)
}

/// Days from 0000-03-01 to March 1st of `year`, for non-negative `year`.
const fn days_before_march_year(year: i64) -> i64 {
    365 * year + year / 4 - year / 100 + year / 400
}

/// A date without a time of day or offset, such as `2024-03-15`.
///
/// Stored as one packed integer: the year in the upper 48 bits, the month
/// in the next 8 and the day-of-month in the low 8. The default value is
/// the unset date, which sorts before every valid date and prints as an
/// empty string.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LocalDate(i64);

impl LocalDate {
    /// The earliest representable date.
    pub const MIN: Self = Self::pack(MIN_YEAR, 1, 1);
    /// The latest representable date.
    pub const MAX: Self = Self::pack(MAX_YEAR, 12, 31);
    pub(crate) const UNSET: Self = Self(0);
    /// 1970-01-01.
    pub const UNIX_EPOCH: Self = Self::pack(1970, 1, 1);

    const fn pack(year: i64, month: u8, day_of_month: u8) -> Self {
        Self((year << 16) | ((month as i64) << 8) | day_of_month as i64)
    }

    fn from_parts(year: i64, month: u8, day_of_month: u8) -> Result<Self> {
        Field::Year.check(year)?;
        Field::MonthOfYear.check(i64::from(month))?;
        Field::DayOfMonth.check(i64::from(day_of_month))?;
        if day_of_month > days_in_month(year, month) {
            return Err(Error::out_of_range(Field::DayOfMonth, i64::from(day_of_month)));
        }
        Ok(Self::pack(year, month, day_of_month))
    }

    /// Clamps the day-of-month to the length of the target month.
    fn resolve_previous_valid(year: i64, month: u8, day_of_month: u8) -> Result<Self> {
        Field::Year.check(year)?;
        let day_of_month = day_of_month.min(days_in_month(year, month));
        Ok(Self::pack(year, month, day_of_month))
    }

    /// Creates a date from a year, month and day-of-month.
    ///
    /// # Errors
    /// `OutOfRange` if the year exceeds `±(2^47 - 1)`, the month is unset,
    /// or the day does not exist in that month.
    pub fn of(year: i64, month: Month, day_of_month: u8) -> Result<Self> {
        Self::from_parts(year, month.value(), day_of_month)
    }

    /// # Panics
    /// If the date is invalid.
    pub fn must_of(year: i64, month: Month, day_of_month: u8) -> Self {
        match Self::of(year, month, day_of_month) {
            Ok(date) => date,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a date from the number of days since 1970-01-01.
    ///
    /// # Errors
    /// `OutOfRange` for `EpochDay` outside the representable years.
    pub fn of_unix_epoch_days(days: i64) -> Result<Self> {
        Field::EpochDay.check(days)?;
        let (year, month, day_of_month) = date_of_epoch_day(days);
        Ok(Self::pack(year, month, day_of_month))
    }

    /// # Panics
    /// If `days` is out of range.
    pub fn must_of_unix_epoch_days(days: i64) -> Self {
        match Self::of_unix_epoch_days(days) {
            Ok(date) => date,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a date from a year and day-of-year.
    ///
    /// # Errors
    /// `OutOfRange` for an invalid year, or a day-of-year beyond the length
    /// of that year.
    pub fn of_year_day(year: i64, day_of_year: u16) -> Result<Self> {
        Field::Year.check(year)?;
        Field::DayOfYear.check(i64::from(day_of_year))?;
        let leap = is_leap_year(year);
        if day_of_year == 366 && !leap {
            return Err(Error::out_of_range(Field::DayOfYear, 366));
        }
        let mut month = Month::new_unchecked(((day_of_year - 1) / 31 + 1) as u8);
        let month_end = month.first_day_of_year(leap) + u16::from(month.length(leap)) - 1;
        if day_of_year > month_end {
            month = month.plus(1);
        }
        let day_of_month = day_of_year - month.first_day_of_year(leap) + 1;
        Ok(Self::pack(year, month.value(), day_of_month as u8))
    }

    /// Today in the system time zone.
    pub fn now() -> Self {
        Self::from(jiff::Zoned::now().date())
    }

    /// Today in UTC.
    pub fn now_utc() -> Self {
        Self::now_in(&ZoneId::utc())
    }

    /// Today in `zone`.
    pub fn now_in(zone: &ZoneId) -> Self {
        Self::from(zone.now_zoned().date())
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn year(self) -> Year {
        Year::of(self.0 >> 16)
    }

    #[inline]
    pub const fn month(self) -> Month {
        Month::new_unchecked(((self.0 >> 8) & 0xff) as u8)
    }

    #[inline]
    pub const fn day_of_month(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Day-of-year, 1 to 366; 0 for the unset date.
    pub const fn day_of_year(self) -> u16 {
        if self.is_zero() {
            return 0;
        }
        self.month().first_day_of_year(self.is_leap_year()) - 1 + self.day_of_month() as u16
    }

    /// Day-of-week; unset for the unset date.
    pub const fn day_of_week(self) -> DayOfWeek {
        if self.is_zero() {
            return DayOfWeek::new_unchecked(0);
        }
        DayOfWeek::new_unchecked((floor_mod(self.unix_epoch_days() + 3, 7) + 1) as u8)
    }

    /// Days since 1970-01-01, negative before it. The unset date yields 0.
    pub const fn unix_epoch_days(self) -> i64 {
        if self.is_zero() {
            return 0;
        }
        epoch_day_of(self.year().value(), self.month().value(), self.day_of_month())
    }

    pub const fn era(self) -> Era {
        Era::of_year(self.year().value())
    }

    #[inline]
    pub const fn is_leap_year(self) -> bool {
        self.year().is_leap_year()
    }

    /// Number of days in this date's month; 0 for the unset date.
    pub const fn length_of_month(self) -> u8 {
        if self.is_zero() {
            return 0;
        }
        self.month().length(self.is_leap_year())
    }

    /// Number of days in this date's year; 0 for the unset date.
    pub const fn length_of_year(self) -> u16 {
        if self.is_zero() {
            return 0;
        }
        self.year().length()
    }

    pub fn is_before(self, other: Self) -> bool {
        self < other
    }

    pub fn is_after(self, other: Self) -> bool {
        self > other
    }

    const fn proleptic_month(self) -> i64 {
        self.year().value() * 12 + self.month().value() as i64 - 1
    }

    /// # Errors
    /// `Overflow` or `OutOfRange` if the result leaves the representable years.
    pub fn plus_days(self, days: i64) -> Result<Self> {
        if self.is_zero() || days == 0 {
            return Ok(self);
        }
        Self::of_unix_epoch_days(add_exact(self.unix_epoch_days(), days)?)
    }

    /// # Errors
    /// See [`LocalDate::plus_days`].
    pub fn minus_days(self, days: i64) -> Result<Self> {
        self.plus_days(neg_exact(days)?)
    }

    /// # Errors
    /// See [`LocalDate::plus_days`].
    pub fn plus_weeks(self, weeks: i64) -> Result<Self> {
        self.plus_days(mul_exact(weeks, 7)?)
    }

    /// # Errors
    /// See [`LocalDate::plus_days`].
    pub fn minus_weeks(self, weeks: i64) -> Result<Self> {
        self.plus_weeks(neg_exact(weeks)?)
    }

    /// Adds months, clamping the day to the end of the target month, so
    /// 2024-01-31 plus one month is 2024-02-29.
    ///
    /// # Errors
    /// `Overflow` or `OutOfRange` if the result leaves the representable years.
    pub fn plus_months(self, months: i64) -> Result<Self> {
        if self.is_zero() || months == 0 {
            return Ok(self);
        }
        let count = add_exact(self.proleptic_month(), months)?;
        self.with_proleptic_month(count)
    }

    /// # Errors
    /// See [`LocalDate::plus_months`].
    pub fn minus_months(self, months: i64) -> Result<Self> {
        self.plus_months(neg_exact(months)?)
    }

    /// Adds years, clamping February 29th to the 28th in common years.
    ///
    /// # Errors
    /// `Overflow` or `OutOfRange` if the result leaves the representable years.
    pub fn plus_years(self, years: i64) -> Result<Self> {
        if self.is_zero() || years == 0 {
            return Ok(self);
        }
        self.with_year(add_exact(self.year().value(), years)?)
    }

    /// # Errors
    /// See [`LocalDate::plus_years`].
    pub fn minus_years(self, years: i64) -> Result<Self> {
        self.plus_years(neg_exact(years)?)
    }

    /// Replaces the year, clamping February 29th when needed.
    ///
    /// # Errors
    /// `OutOfRange` for a year outside `±(2^47 - 1)`.
    pub fn with_year(self, year: i64) -> Result<Self> {
        if self.is_zero() {
            return Ok(self);
        }
        Self::resolve_previous_valid(year, self.month().value(), self.day_of_month())
    }

    /// Replaces the month, clamping the day to the end of that month.
    ///
    /// # Errors
    /// `OutOfRange` for a month outside `1..=12`.
    pub fn with_month(self, month: u8) -> Result<Self> {
        if self.is_zero() {
            return Ok(self);
        }
        Field::MonthOfYear.check(i64::from(month))?;
        Self::resolve_previous_valid(self.year().value(), month, self.day_of_month())
    }

    /// # Errors
    /// `OutOfRange` if the day does not exist in this month.
    pub fn with_day_of_month(self, day_of_month: u8) -> Result<Self> {
        if self.is_zero() {
            return Ok(self);
        }
        Self::from_parts(self.year().value(), self.month().value(), day_of_month)
    }

    /// # Errors
    /// `OutOfRange` if the day does not exist in this year.
    pub fn with_day_of_year(self, day_of_year: u16) -> Result<Self> {
        if self.is_zero() {
            return Ok(self);
        }
        Self::of_year_day(self.year().value(), day_of_year)
    }

    fn with_proleptic_month(self, proleptic_month: i64) -> Result<Self> {
        let year = floor_div(proleptic_month, 12);
        let month = (floor_mod(proleptic_month, 12) + 1) as u8;
        Self::resolve_previous_valid(year, month, self.day_of_month())
    }

    /// Combines this date with a time of day.
    pub fn at_time(self, time: LocalTime) -> LocalDateTime {
        LocalDateTime::of_date_time(self, time)
    }

    /// This date at midnight.
    pub fn at_start_of_day(self) -> LocalDateTime {
        self.at_time(LocalTime::MIDNIGHT)
    }

    fn from_zoned(zoned: &jiff::Zoned) -> Result<Self> {
        Ok(Self::from(zoned.date()))
    }
}

impl Ord for LocalDate {
    fn cmp(&self, other: &Self) -> Ordering {
        // The unset date sorts first even though year 0 packs above it.
        match (Self::is_zero(*self), Self::is_zero(*other)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for LocalDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalDate({self})")
    }
}

impl TemporalAccessor for LocalDate {
    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn is_supported_field(&self, field: Field) -> bool {
        field.is_date_based()
    }

    fn get_field(&self, field: Field) -> TemporalValue {
        if Self::is_zero(*self) {
            return TemporalValue::unsupported();
        }
        let year = self.year().value();
        let dom = i64::from(self.day_of_month());
        let doy = i64::from(self.day_of_year());
        let v = match field {
            Field::DayOfWeek => i64::from(self.day_of_week().value()),
            Field::AlignedDayOfWeekInMonth => (dom - 1) % 7 + 1,
            Field::AlignedDayOfWeekInYear => (doy - 1) % 7 + 1,
            Field::DayOfMonth => dom,
            Field::DayOfYear => doy,
            Field::EpochDay => self.unix_epoch_days(),
            Field::AlignedWeekOfMonth => (dom - 1) / 7 + 1,
            Field::AlignedWeekOfYear => (doy - 1) / 7 + 1,
            Field::MonthOfYear => i64::from(self.month().value()),
            Field::ProlepticMonth => self.proleptic_month(),
            Field::YearOfEra => {
                if year >= 1 {
                    year
                } else {
                    1 - year
                }
            }
            Field::Year => year,
            Field::Era => self.era().value(),
            _ => return TemporalValue::unsupported(),
        };
        TemporalValue::of(v)
    }
}

impl TemporalAdjuster for LocalDate {
    fn with_temporal(&self, field: Field, value: TemporalValue) -> Result<Self> {
        let Some(v) = check_set(self, field, value)? else {
            return Ok(*self);
        };
        let current = self.get_field(field).value();
        match field {
            Field::DayOfWeek | Field::AlignedDayOfWeekInMonth | Field::AlignedDayOfWeekInYear => {
                self.plus_days(v - current)
            }
            Field::AlignedWeekOfMonth | Field::AlignedWeekOfYear => self.plus_weeks(v - current),
            Field::DayOfMonth => self.with_day_of_month(v as u8),
            Field::DayOfYear => self.with_day_of_year(v as u16),
            Field::EpochDay => Self::of_unix_epoch_days(v),
            Field::MonthOfYear => self.with_month(v as u8),
            Field::ProlepticMonth => self.with_proleptic_month(v),
            Field::YearOfEra => {
                // Year 0 is 1 BCE, so BCE years count backwards from 1.
                if self.year().value() >= 1 {
                    self.with_year(v)
                } else {
                    self.with_year(1 - v)
                }
            }
            Field::Year => self.with_year(v),
            Field::Era => {
                if v == current {
                    Ok(*self)
                } else {
                    self.with_year(1 - self.year().value())
                }
            }
            _ => Err(Error::unsupported_field(field)),
        }
    }
}

impl TextCodec for LocalDate {
    const TYPE_NAME: &'static str = "LocalDate";

    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn append_text<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        if Self::is_zero(*self) {
            return Ok(());
        }
        let year = self.year().value();
        if year.unsigned_abs() < 1000 {
            if year < 0 {
                write!(w, "-{:04}", -year)?;
            } else {
                write!(w, "{year:04}")?;
            }
        } else if year > 9999 {
            write!(w, "+{year}")?;
        } else {
            write!(w, "{year}")?;
        }
        write!(w, "-{:02}-{:02}", self.month().value(), self.day_of_month())
    }

    /// `[+-]y+-MM-dd`.
    fn decode_text(text: &str) -> Result<Self> {
        let bytes = text.as_bytes();
        if bytes.len() < 7 {
            return Err(Error::bad_format());
        }
        let (year, rest) = bytes.split_at(bytes.len() - 6);
        if rest[0] != b'-' || rest[3] != b'-' {
            return Err(Error::bad_format());
        }
        let month = parse_two_digits(&rest[1..3])?;
        let day_of_month = parse_two_digits(&rest[4..6])?;
        Self::from_parts(parse_signed(year)?, month, day_of_month)
    }
}

impl_text_codec!(LocalDate);
impl_sql!(LocalDate, Some(Self::from_zoned));

impl From<jiff::civil::Date> for LocalDate {
    fn from(date: jiff::civil::Date) -> Self {
        Self::pack(
            i64::from(date.year()),
            date.month().unsigned_abs(),
            date.day().unsigned_abs(),
        )
    }
}

impl TryFrom<LocalDate> for jiff::civil::Date {
    type Error = Error;

    /// # Errors
    /// `EmptyInput` for the unset date, `OutOfRange` for years outside
    /// `-9999..=9999`.
    fn try_from(date: LocalDate) -> Result<Self> {
        if date.is_zero() {
            return Err(Error::empty_input());
        }
        let year = date.year().value();
        let out_of_range = |_| Error::out_of_range(Field::Year, year);
        let jiff_year = i16::try_from(year).map_err(out_of_range)?;
        Self::new(
            jiff_year,
            date.month().value() as i8,
            date.day_of_month() as i8,
        )
        .map_err(|_| Error::out_of_range(Field::Year, year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::sql::{FromSqlValue, SqlValue, ToSqlValue};

    fn date(year: i64, month: u8, day: u8) -> LocalDate {
        LocalDate::must_of(year, Month::of(month).unwrap(), day)
    }

    #[test]
    fn test_scenario_march_15() {
        let d = LocalDate::must_of(2024, Month::MARCH, 15);
        assert_eq!(d.day_of_week(), DayOfWeek::FRIDAY);
        assert_eq!(d.day_of_year(), 75);
        assert_eq!(d.unix_epoch_days(), 19_797);
        assert_eq!(d.to_string(), "2024-03-15");
    }

    #[test]
    fn test_epoch_day_known_values() {
        struct TestCase {
            date: LocalDate,
            epoch_day: i64,
        }

        let cases = [
            TestCase {
                date: date(1970, 1, 1),
                epoch_day: 0,
            },
            TestCase {
                date: date(1969, 12, 31),
                epoch_day: -1,
            },
            TestCase {
                date: date(2000, 2, 29),
                epoch_day: 11_016,
            },
            TestCase {
                date: date(2000, 3, 1),
                epoch_day: 11_017,
            },
            TestCase {
                date: date(0, 1, 1),
                epoch_day: -719_528,
            },
            TestCase {
                date: date(-1, 12, 31),
                epoch_day: -719_529,
            },
            TestCase {
                date: date(1600, 1, 1),
                epoch_day: -135_140,
            },
        ];

        for case in &cases {
            assert_eq!(case.date.unix_epoch_days(), case.epoch_day, "{}", case.date);
            assert_eq!(
                LocalDate::of_unix_epoch_days(case.epoch_day).unwrap(),
                case.date
            );
        }
    }

    #[test]
    fn test_epoch_day_round_trip() {
        let mut day = -3_000_000;
        while day <= 3_000_000 {
            let d = LocalDate::of_unix_epoch_days(day).unwrap();
            assert_eq!(d.unix_epoch_days(), day);
            assert_eq!(date(d.year().value(), d.month().value(), d.day_of_month()), d);
            day += 97;
        }
        for day in [MIN_EPOCH_DAY, MIN_EPOCH_DAY + 1, MAX_EPOCH_DAY - 1, MAX_EPOCH_DAY] {
            assert_eq!(LocalDate::of_unix_epoch_days(day).unwrap().unix_epoch_days(), day);
        }
        assert_eq!(LocalDate::of_unix_epoch_days(MIN_EPOCH_DAY).unwrap(), LocalDate::MIN);
        assert_eq!(LocalDate::of_unix_epoch_days(MAX_EPOCH_DAY).unwrap(), LocalDate::MAX);
        assert!(LocalDate::of_unix_epoch_days(MAX_EPOCH_DAY + 1).is_err());
        assert!(LocalDate::of_unix_epoch_days(MIN_EPOCH_DAY - 1).is_err());
    }

    #[test]
    fn test_agrees_with_jiff_over_ten_centuries() {
        let mut host = jiff::civil::date(1500, 1, 1);
        let end = jiff::civil::date(2500, 1, 1);
        let mut epoch_day = LocalDate::from(host).unix_epoch_days();
        while host < end {
            let d = LocalDate::from(host);
            assert_eq!(d.unix_epoch_days(), epoch_day, "{host}");
            assert_eq!(d.day_of_week(), DayOfWeek::from(host.weekday()), "{host}");
            assert_eq!(d.day_of_week().to_weekday(), Some(host.weekday()));
            assert_eq!(d.day_of_year(), host.day_of_year().unsigned_abs());
            assert_eq!(LocalDate::of_unix_epoch_days(epoch_day).unwrap(), d);
            host = host.tomorrow().unwrap();
            epoch_day += 1;
        }
    }

    #[test]
    fn test_of_validation() {
        assert!(LocalDate::of(2023, Month::FEBRUARY, 29).is_err());
        assert!(LocalDate::of(2024, Month::FEBRUARY, 29).is_ok());
        assert!(LocalDate::of(2024, Month::APRIL, 31).is_err());
        assert!(LocalDate::of(2024, Month::APRIL, 0).is_err());
        assert!(LocalDate::of(2024, Month::default(), 1).is_err());
        assert!(LocalDate::of(MAX_YEAR + 1, Month::JANUARY, 1).is_err());
        assert_eq!(
            LocalDate::of(2024, Month::APRIL, 31).unwrap_err().kind(),
            &ErrorKind::OutOfRange {
                field: Field::DayOfMonth,
                value: 31
            }
        );
    }

    #[test]
    fn test_year_zero_is_a_date() {
        let d = date(0, 6, 1);
        assert!(!d.is_zero());
        assert!(d.is_leap_year());
        assert_eq!(d.era(), Era::Bce);
        assert_eq!(d.to_string(), "0000-06-01");
        assert!(LocalDate::default() < d);
        assert!(LocalDate::default() < date(-5, 1, 1));
    }

    #[test]
    fn test_of_year_day() {
        assert_eq!(LocalDate::of_year_day(2024, 75).unwrap(), date(2024, 3, 15));
        assert_eq!(LocalDate::of_year_day(2024, 366).unwrap(), date(2024, 12, 31));
        assert_eq!(LocalDate::of_year_day(2023, 365).unwrap(), date(2023, 12, 31));
        assert_eq!(LocalDate::of_year_day(2023, 1).unwrap(), date(2023, 1, 1));
        assert_eq!(LocalDate::of_year_day(2023, 59).unwrap(), date(2023, 2, 28));
        assert_eq!(LocalDate::of_year_day(2023, 60).unwrap(), date(2023, 3, 1));
        assert!(LocalDate::of_year_day(2023, 366).is_err());
        assert!(LocalDate::of_year_day(2023, 0).is_err());
    }

    #[test]
    fn test_month_clamping() {
        assert_eq!(date(2024, 1, 31).plus_months(1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2023, 1, 31).plus_months(1).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 2, 29).plus_years(1).unwrap(), date(2025, 2, 28));
        assert_eq!(date(2024, 2, 29).plus_years(4).unwrap(), date(2028, 2, 29));
        assert_eq!(date(2024, 3, 31).minus_months(1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2024, 1, 15).minus_months(13).unwrap(), date(2022, 12, 15));
        assert_eq!(date(-1, 1, 15).minus_months(1).unwrap(), date(-2, 12, 15));
        assert_eq!(date(2024, 11, 30).plus_months(3).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_day_arithmetic() {
        let d = date(2024, 2, 28);
        assert_eq!(d.plus_days(1).unwrap(), date(2024, 2, 29));
        assert_eq!(d.plus_days(2).unwrap(), date(2024, 3, 1));
        assert_eq!(d.minus_days(59).unwrap(), date(2023, 12, 31));
        assert_eq!(d.plus_weeks(1).unwrap(), date(2024, 3, 6));
        assert_eq!(d.minus_weeks(1).unwrap(), date(2024, 2, 21));
        assert!(LocalDate::MAX.plus_days(1).is_err());
        assert!(d.plus_days(i64::MAX).is_err());
        assert_eq!(d.minus_days(i64::MIN).unwrap_err().kind(), &ErrorKind::Overflow);
    }

    #[test]
    fn test_zero_arithmetic() {
        let zero = LocalDate::default();
        assert!(zero.plus_days(5).unwrap().is_zero());
        assert!(zero.plus_months(5).unwrap().is_zero());
        assert!(zero.plus_years(5).unwrap().is_zero());
        assert!(zero.with_year(2024).unwrap().is_zero());
        assert!(zero.day_of_week().is_zero());
        assert_eq!(zero.day_of_year(), 0);
    }

    #[test]
    fn test_with() {
        let d = date(2024, 3, 31);
        assert_eq!(d.with_month(4).unwrap(), date(2024, 4, 30));
        assert_eq!(d.with_year(2023).unwrap(), date(2023, 3, 31));
        assert_eq!(d.with_day_of_month(1).unwrap(), date(2024, 3, 1));
        assert!(d.with_day_of_month(32).is_err());
        assert_eq!(d.with_day_of_year(1).unwrap(), date(2024, 1, 1));
        assert_eq!(d.length_of_month(), 31);
        assert_eq!(d.length_of_year(), 366);
        assert!(d.is_after(date(2024, 3, 30)));
        assert!(d.is_before(date(2024, 4, 1)));
    }

    #[test]
    fn test_get_field() {
        let d = date(2024, 3, 15);
        struct TestCase {
            field: Field,
            value: i64,
        }

        let cases = [
            TestCase {
                field: Field::DayOfWeek,
                value: 5,
            },
            TestCase {
                field: Field::DayOfMonth,
                value: 15,
            },
            TestCase {
                field: Field::DayOfYear,
                value: 75,
            },
            TestCase {
                field: Field::MonthOfYear,
                value: 3,
            },
            TestCase {
                field: Field::ProlepticMonth,
                value: 2024 * 12 + 2,
            },
            TestCase {
                field: Field::Year,
                value: 2024,
            },
            TestCase {
                field: Field::YearOfEra,
                value: 2024,
            },
            TestCase {
                field: Field::Era,
                value: 1,
            },
            TestCase {
                field: Field::EpochDay,
                value: 19_797,
            },
            TestCase {
                field: Field::AlignedDayOfWeekInMonth,
                value: 1,
            },
            TestCase {
                field: Field::AlignedWeekOfMonth,
                value: 3,
            },
            TestCase {
                field: Field::AlignedDayOfWeekInYear,
                value: 5,
            },
            TestCase {
                field: Field::AlignedWeekOfYear,
                value: 11,
            },
        ];

        for case in &cases {
            assert!(d.is_supported_field(case.field));
            assert_eq!(d.get_field(case.field).get(), Some(case.value), "{}", case.field);
        }

        assert!(!d.is_supported_field(Field::HourOfDay));
        assert!(d.get_field(Field::HourOfDay).is_unsupported());
        assert_eq!(date(-5, 1, 1).get_field(Field::YearOfEra).get(), Some(6));
        assert_eq!(date(0, 1, 1).get_field(Field::Era).get(), Some(0));

        for field in Field::ALL {
            assert!(LocalDate::default().get_field(field).is_unsupported());
        }
    }

    #[test]
    fn test_with_field() {
        let d = date(2024, 3, 15);
        assert_eq!(d.with_field(Field::DayOfWeek, 1).unwrap(), date(2024, 3, 11));
        assert_eq!(d.with_field(Field::DayOfWeek, 7).unwrap(), date(2024, 3, 17));
        assert_eq!(d.with_field(Field::DayOfMonth, 1).unwrap(), date(2024, 3, 1));
        assert_eq!(d.with_field(Field::DayOfYear, 60).unwrap(), date(2024, 2, 29));
        assert_eq!(d.with_field(Field::EpochDay, 0).unwrap(), LocalDate::UNIX_EPOCH);
        assert_eq!(d.with_field(Field::MonthOfYear, 2).unwrap(), date(2024, 2, 15));
        assert_eq!(
            d.with_field(Field::ProlepticMonth, 2023 * 12 + 11).unwrap(),
            date(2023, 12, 15)
        );
        assert_eq!(d.with_field(Field::ProlepticMonth, -1).unwrap(), date(-1, 12, 15));
        assert_eq!(d.with_field(Field::Year, 1999).unwrap(), date(1999, 3, 15));
        assert_eq!(d.with_field(Field::YearOfEra, 10).unwrap(), date(10, 3, 15));
        assert_eq!(d.with_field(Field::Era, 0).unwrap(), date(-2023, 3, 15));
        assert_eq!(d.with_field(Field::Era, 1).unwrap(), d);
        assert_eq!(d.with_field(Field::AlignedWeekOfMonth, 1).unwrap(), date(2024, 3, 1));
        assert_eq!(
            d.with_field(Field::AlignedDayOfWeekInMonth, 3).unwrap(),
            date(2024, 3, 17)
        );
        assert_eq!(d.with_field(Field::AlignedWeekOfYear, 1).unwrap(), date(2024, 1, 5));
    }

    #[test]
    fn test_with_field_year_of_era_before_common_era() {
        // Year 0 is 1 BCE.
        let d = date(0, 5, 1);
        assert_eq!(d.get_field(Field::YearOfEra).get(), Some(1));
        assert_eq!(d.with_field(Field::YearOfEra, 5).unwrap(), date(-4, 5, 1));
        assert_eq!(d.with_field(Field::YearOfEra, 1).unwrap(), d);
        assert_eq!(d.with_field(Field::Era, 1).unwrap(), date(1, 5, 1));
    }

    #[test]
    fn test_with_field_errors() {
        let d = date(2024, 3, 15);
        assert_eq!(
            d.with_field(Field::MonthOfYear, 13).unwrap_err().kind(),
            &ErrorKind::OutOfRange {
                field: Field::MonthOfYear,
                value: 13
            }
        );
        assert_eq!(
            d.with_field(Field::HourOfDay, 1).unwrap_err().kind(),
            &ErrorKind::UnsupportedField(Field::HourOfDay)
        );
        assert!(date(2024, 2, 1).with_field(Field::DayOfMonth, 30).is_err());
        assert!(
            LocalDate::default()
                .with_field(Field::Year, 2024)
                .unwrap()
                .is_zero()
        );
        assert_eq!(
            d.with_temporal(Field::Year, TemporalValue::unsupported()).unwrap(),
            d
        );
    }

    #[test]
    fn test_text() {
        struct TestCase {
            date: LocalDate,
            text: &'static str,
        }

        let cases = [
            TestCase {
                date: date(2024, 3, 15),
                text: "2024-03-15",
            },
            TestCase {
                date: date(1, 1, 1),
                text: "0001-01-01",
            },
            TestCase {
                date: date(0, 12, 31),
                text: "0000-12-31",
            },
            TestCase {
                date: date(-1, 2, 3),
                text: "-0001-02-03",
            },
            TestCase {
                date: date(-12_345, 6, 7),
                text: "-12345-06-07",
            },
            TestCase {
                date: date(10_000, 1, 1),
                text: "+10000-01-01",
            },
            TestCase {
                date: LocalDate::MAX,
                text: "+140737488355327-12-31",
            },
            TestCase {
                date: LocalDate::MIN,
                text: "-140737488355327-01-01",
            },
        ];

        for case in &cases {
            assert_eq!(case.date.to_string(), case.text);
            assert_eq!(LocalDate::must_parse(case.text), case.date);
        }
        assert_eq!(LocalDate::default().to_string(), "");
        assert_eq!(LocalDate::must_parse("10000-01-01"), date(10_000, 1, 1));
        assert_eq!(LocalDate::must_parse("7-01-01"), date(7, 1, 1));
    }

    #[test]
    fn test_parse_errors() {
        for text in ["2024-3-15", "2024/03/15", "2024-03-1x", "-03-15", "20240315", "x2024-03-15"] {
            assert!(LocalDate::parse(text).is_err(), "{text}");
        }
        let err = LocalDate::parse("2024-13-01").unwrap_err();
        assert_eq!(err.input(), Some("2024-13-01"));
        assert_eq!(
            err.to_string(),
            "goda: parse \"2024-13-01\": value 13 out of range for field MonthOfYear"
        );
        assert_eq!(LocalDate::parse("").unwrap_err().kind(), &ErrorKind::EmptyInput);
    }

    #[test]
    fn test_json() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Row {
            born: LocalDate,
            died: LocalDate,
        }

        let row = Row {
            born: date(1912, 6, 23),
            died: LocalDate::default(),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"born":"1912-06-23","died":null}"#);
        assert_eq!(serde_json::from_str::<Row>(&json).unwrap(), row);

        let empty: LocalDate = serde_json::from_str("\"\"").unwrap();
        assert!(empty.is_zero());
        assert!(serde_json::from_str::<LocalDate>("\"2024-02-30\"").is_err());
    }

    #[test]
    fn test_sql() {
        let d = date(2024, 3, 15);
        assert_eq!(d.to_sql_value(), SqlValue::Text("2024-03-15".to_owned()));
        assert_eq!(LocalDate::from_sql_value(&d.to_sql_value()).unwrap(), d);
        assert_eq!(LocalDate::default().to_sql_value(), SqlValue::Null);
        assert!(LocalDate::from_sql_value(&SqlValue::Null).unwrap().is_zero());
        assert_eq!(
            LocalDate::from_sql_value(&SqlValue::Bytes(b"2024-03-15".to_vec())).unwrap(),
            d
        );

        let zoned = jiff::civil::date(2024, 3, 15)
            .at(23, 30, 0, 0)
            .in_tz("Asia/Tokyo")
            .unwrap();
        assert_eq!(LocalDate::from_sql_value(&SqlValue::Timestamp(zoned)).unwrap(), d);
        assert_eq!(
            LocalDate::from_sql_value(&SqlValue::Int(1)).unwrap_err().kind(),
            &ErrorKind::UnsupportedSqlType("int64")
        );
    }

    #[test]
    fn test_jiff_conversion() {
        let d = date(2024, 3, 15);
        let host = jiff::civil::Date::try_from(d).unwrap();
        assert_eq!(host, jiff::civil::date(2024, 3, 15));
        assert_eq!(LocalDate::from(host), d);
        assert!(jiff::civil::Date::try_from(date(10_000, 1, 1)).is_err());
        assert!(jiff::civil::Date::try_from(LocalDate::default()).is_err());
    }
}
