use std::fmt;

use crate::codec::TextCodec;
use crate::consts::{
    NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND, SECONDS_PER_DAY,
};
use crate::date::LocalDate;
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::field::{Field, TemporalAccessor, TemporalAdjuster, TemporalValue, check_set};
use crate::math::{floor_div_i128, floor_mod_i128, narrow};
use crate::offset::ZoneOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::time::LocalTime;
use crate::types::{DayOfWeek, Month, Year};
use crate::zone::ZoneId;

/// A date and time of day without an offset, such as
/// `2024-03-15T14:30:45.123456789`.
///
/// The default value is the unset date-time; a date-time built from an
/// unset date or an unset time is itself unset.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDateTime {
    date: LocalDate,
    time: LocalTime,
}

impl LocalDateTime {
    pub const MIN: Self = Self {
        date: LocalDate::MIN,
        time: LocalTime::MIN,
    };
    pub const MAX: Self = Self {
        date: LocalDate::MAX,
        time: LocalTime::MAX,
    };

    /// # Errors
    /// `OutOfRange` naming the first invalid component.
    pub fn of(
        year: i64,
        month: Month,
        day_of_month: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nano: u32,
    ) -> Result<Self> {
        let date = LocalDate::of(year, month, day_of_month)?;
        let time = LocalTime::of(hour, minute, second, nano)?;
        Ok(Self::of_date_time(date, time))
    }

    /// # Panics
    /// If a component is invalid.
    pub fn must_of(
        year: i64,
        month: Month,
        day_of_month: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nano: u32,
    ) -> Self {
        match Self::of(year, month, day_of_month, hour, minute, second, nano) {
            Ok(datetime) => datetime,
            Err(err) => panic!("{err}"),
        }
    }

    /// Combines a date and a time. Either part being unset yields the unset
    /// date-time.
    pub const fn of_date_time(date: LocalDate, time: LocalTime) -> Self {
        if date.is_zero() || time.is_zero() {
            return Self {
                date: LocalDate::UNSET,
                time: LocalTime::UNSET,
            };
        }
        Self { date, time }
    }

    /// The local date-time at `offset` of an instant given as seconds since
    /// 1970-01-01T00:00:00Z.
    ///
    /// # Errors
    /// `OutOfRange` if `nano` is not a nano-of-second.
    pub fn of_epoch_second(epoch_second: i64, nano: u32, offset: ZoneOffset) -> Result<Self> {
        Field::NanoOfSecond.check(i64::from(nano))?;
        let local = i128::from(epoch_second) + i128::from(offset.total_seconds());
        let days = narrow(floor_div_i128(local, i128::from(SECONDS_PER_DAY)))?;
        let second_of_day = floor_mod_i128(local, i128::from(SECONDS_PER_DAY)) as i64;
        let date = LocalDate::of_unix_epoch_days(days)?;
        let time = LocalTime::of_nano_of_day(second_of_day * NANOS_PER_SECOND + i64::from(nano))?;
        Ok(Self::of_date_time(date, time))
    }

    /// The current date-time in the system time zone.
    pub fn now() -> Self {
        Self::from(jiff::Zoned::now().datetime())
    }

    /// The current date-time in UTC.
    pub fn now_utc() -> Self {
        Self::now_in(&ZoneId::utc())
    }

    /// The current date-time in `zone`.
    pub fn now_in(zone: &ZoneId) -> Self {
        Self::from(zone.now_zoned().datetime())
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.date.is_zero() && self.time.is_zero()
    }

    #[inline]
    pub const fn date(self) -> LocalDate {
        self.date
    }

    #[inline]
    pub const fn time(self) -> LocalTime {
        self.time
    }

    pub const fn year(self) -> Year {
        self.date.year()
    }

    pub const fn month(self) -> Month {
        self.date.month()
    }

    pub const fn day_of_month(self) -> u8 {
        self.date.day_of_month()
    }

    pub const fn day_of_year(self) -> u16 {
        self.date.day_of_year()
    }

    pub const fn day_of_week(self) -> DayOfWeek {
        self.date.day_of_week()
    }

    pub const fn hour(self) -> u8 {
        self.time.hour()
    }

    pub const fn minute(self) -> u8 {
        self.time.minute()
    }

    pub const fn second(self) -> u8 {
        self.time.second()
    }

    pub const fn nano(self) -> u32 {
        self.time.nano()
    }

    pub fn is_before(self, other: Self) -> bool {
        self < other
    }

    pub fn is_after(self, other: Self) -> bool {
        self > other
    }

    fn with_date(self, date: LocalDate) -> Self {
        Self { date, ..self }
    }

    fn with_time(self, time: LocalTime) -> Self {
        Self { time, ..self }
    }

    /// # Errors
    /// See [`LocalDate::plus_years`].
    pub fn plus_years(self, years: i64) -> Result<Self> {
        Ok(self.with_date(self.date.plus_years(years)?))
    }

    /// # Errors
    /// See [`LocalDate::minus_years`].
    pub fn minus_years(self, years: i64) -> Result<Self> {
        Ok(self.with_date(self.date.minus_years(years)?))
    }

    /// # Errors
    /// See [`LocalDate::plus_months`].
    pub fn plus_months(self, months: i64) -> Result<Self> {
        Ok(self.with_date(self.date.plus_months(months)?))
    }

    /// # Errors
    /// See [`LocalDate::minus_months`].
    pub fn minus_months(self, months: i64) -> Result<Self> {
        Ok(self.with_date(self.date.minus_months(months)?))
    }

    /// # Errors
    /// See [`LocalDate::plus_weeks`].
    pub fn plus_weeks(self, weeks: i64) -> Result<Self> {
        Ok(self.with_date(self.date.plus_weeks(weeks)?))
    }

    /// # Errors
    /// See [`LocalDate::minus_weeks`].
    pub fn minus_weeks(self, weeks: i64) -> Result<Self> {
        Ok(self.with_date(self.date.minus_weeks(weeks)?))
    }

    /// # Errors
    /// See [`LocalDate::plus_days`].
    pub fn plus_days(self, days: i64) -> Result<Self> {
        Ok(self.with_date(self.date.plus_days(days)?))
    }

    /// # Errors
    /// See [`LocalDate::minus_days`].
    pub fn minus_days(self, days: i64) -> Result<Self> {
        Ok(self.with_date(self.date.minus_days(days)?))
    }

    /// # Errors
    /// `Overflow` or `OutOfRange` if the date leaves the representable years.
    pub fn plus_hours(self, hours: i64) -> Result<Self> {
        self.plus_nanos_wide(i128::from(hours) * i128::from(NANOS_PER_HOUR))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_hours`].
    pub fn minus_hours(self, hours: i64) -> Result<Self> {
        self.plus_nanos_wide(-i128::from(hours) * i128::from(NANOS_PER_HOUR))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_hours`].
    pub fn plus_minutes(self, minutes: i64) -> Result<Self> {
        self.plus_nanos_wide(i128::from(minutes) * i128::from(NANOS_PER_MINUTE))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_hours`].
    pub fn minus_minutes(self, minutes: i64) -> Result<Self> {
        self.plus_nanos_wide(-i128::from(minutes) * i128::from(NANOS_PER_MINUTE))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_hours`].
    pub fn plus_seconds(self, seconds: i64) -> Result<Self> {
        self.plus_nanos_wide(i128::from(seconds) * i128::from(NANOS_PER_SECOND))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_hours`].
    pub fn minus_seconds(self, seconds: i64) -> Result<Self> {
        self.plus_nanos_wide(-i128::from(seconds) * i128::from(NANOS_PER_SECOND))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_hours`].
    pub fn plus_nanos(self, nanos: i64) -> Result<Self> {
        self.plus_nanos_wide(i128::from(nanos))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_hours`].
    pub fn minus_nanos(self, nanos: i64) -> Result<Self> {
        self.plus_nanos_wide(-i128::from(nanos))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_hours`].
    pub fn plus_duration(self, duration: Duration) -> Result<Self> {
        self.plus_nanos_wide(duration.total_nanos())
    }

    /// # Errors
    /// See [`LocalDateTime::plus_hours`].
    pub fn minus_duration(self, duration: Duration) -> Result<Self> {
        self.plus_nanos_wide(-duration.total_nanos())
    }

    /// Adds nanoseconds to the time and carries whole days into the date.
    fn plus_nanos_wide(self, nanos: i128) -> Result<Self> {
        if self.is_zero() || nanos == 0 {
            return Ok(self);
        }
        let total = i128::from(self.time.nano_of_day()) + nanos;
        let day_carry = narrow(floor_div_i128(total, i128::from(NANOS_PER_DAY)))?;
        let nano_of_day = floor_mod_i128(total, i128::from(NANOS_PER_DAY)) as i64;
        Ok(Self {
            date: self.date.plus_days(day_carry)?,
            time: LocalTime::of_nano_of_day(nano_of_day)?,
        })
    }

    /// # Errors
    /// See [`LocalDate::with_year`].
    pub fn with_year(self, year: i64) -> Result<Self> {
        Ok(self.with_date(self.date.with_year(year)?))
    }

    /// # Errors
    /// See [`LocalDate::with_month`].
    pub fn with_month(self, month: u8) -> Result<Self> {
        Ok(self.with_date(self.date.with_month(month)?))
    }

    /// # Errors
    /// See [`LocalDate::with_day_of_month`].
    pub fn with_day_of_month(self, day_of_month: u8) -> Result<Self> {
        Ok(self.with_date(self.date.with_day_of_month(day_of_month)?))
    }

    /// # Errors
    /// See [`LocalDate::with_day_of_year`].
    pub fn with_day_of_year(self, day_of_year: u16) -> Result<Self> {
        Ok(self.with_date(self.date.with_day_of_year(day_of_year)?))
    }

    /// # Errors
    /// See [`LocalTime::with_hour`].
    pub fn with_hour(self, hour: u8) -> Result<Self> {
        Ok(self.with_time(self.time.with_hour(hour)?))
    }

    /// # Errors
    /// See [`LocalTime::with_minute`].
    pub fn with_minute(self, minute: u8) -> Result<Self> {
        Ok(self.with_time(self.time.with_minute(minute)?))
    }

    /// # Errors
    /// See [`LocalTime::with_second`].
    pub fn with_second(self, second: u8) -> Result<Self> {
        Ok(self.with_time(self.time.with_second(second)?))
    }

    /// # Errors
    /// See [`LocalTime::with_nano`].
    pub fn with_nano(self, nano: u32) -> Result<Self> {
        Ok(self.with_time(self.time.with_nano(nano)?))
    }

    /// The time from `self` to `other`, negative if `other` is earlier.
    /// Zero if either value is unset.
    ///
    /// # Errors
    /// `Overflow` if the difference does not fit in a [`Duration`].
    pub fn between(self, other: Self) -> Result<Duration> {
        if self.is_zero() || other.is_zero() {
            return Ok(Duration::ZERO);
        }
        Duration::from_total_nanos(other.nanos_since_epoch() - self.nanos_since_epoch())
    }

    /// Nanoseconds since 1970-01-01T00:00:00 on the local time line.
    pub(crate) const fn nanos_since_epoch(self) -> i128 {
        self.date.unix_epoch_days() as i128 * NANOS_PER_DAY as i128
            + self.time.nano_of_day() as i128
    }

    /// Seconds since 1970-01-01T00:00:00Z of this date-time at `offset`.
    ///
    /// # Errors
    /// `Overflow` for dates too far from 1970 to count in an `i64`.
    pub fn to_epoch_second(self, offset: ZoneOffset) -> Result<i64> {
        let local = i128::from(self.date.unix_epoch_days()) * i128::from(SECONDS_PER_DAY)
            + i128::from(self.time.second_of_day());
        narrow(local - i128::from(offset.total_seconds()))
    }

    /// Attaches an offset.
    pub fn at_offset(self, offset: ZoneOffset) -> OffsetDateTime {
        OffsetDateTime::of(self, offset)
    }

    /// Places this date-time in `zone`; see [`ZoneId::resolve_local`].
    ///
    /// # Errors
    /// See [`ZoneId::resolve_local`].
    pub fn at_zone(self, zone: &ZoneId) -> Result<OffsetDateTime> {
        zone.resolve_local(self)
    }

    fn from_zoned(zoned: &jiff::Zoned) -> Result<Self> {
        Ok(Self::from(zoned.datetime()))
    }
}

impl fmt::Debug for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalDateTime({self})")
    }
}

impl TemporalAccessor for LocalDateTime {
    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn is_supported_field(&self, field: Field) -> bool {
        field.is_date_based() || field.is_time_based()
    }

    fn get_field(&self, field: Field) -> TemporalValue {
        if field.is_date_based() {
            self.date.get_field(field)
        } else {
            self.time.get_field(field)
        }
    }
}

impl TemporalAdjuster for LocalDateTime {
    fn with_temporal(&self, field: Field, value: TemporalValue) -> Result<Self> {
        let Some(v) = check_set(self, field, value)? else {
            return Ok(*self);
        };
        if field.is_date_based() {
            Ok(self.with_date(self.date.with_field(field, v)?))
        } else {
            Ok(self.with_time(self.time.with_field(field, v)?))
        }
    }
}

impl TextCodec for LocalDateTime {
    const TYPE_NAME: &'static str = "LocalDateTime";

    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn append_text<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        if Self::is_zero(*self) {
            return Ok(());
        }
        self.date.append_text(w)?;
        w.write_char('T')?;
        self.time.append_text(w)
    }

    /// `<date>T<time>`; `t` or a space also separate the parts.
    fn decode_text(text: &str) -> Result<Self> {
        let Some(split) = text.find(['T', 't', ' ']) else {
            return Err(Error::bad_format());
        };
        let date = LocalDate::decode_text(&text[..split])?;
        let time = LocalTime::decode_text(&text[split + 1..])?;
        Ok(Self::of_date_time(date, time))
    }
}

impl_text_codec!(LocalDateTime);
impl_sql!(LocalDateTime, Some(Self::from_zoned));

impl From<jiff::civil::DateTime> for LocalDateTime {
    fn from(datetime: jiff::civil::DateTime) -> Self {
        Self::of_date_time(datetime.date().into(), datetime.time().into())
    }
}

impl TryFrom<LocalDateTime> for jiff::civil::DateTime {
    type Error = Error;

    /// # Errors
    /// `EmptyInput` for the unset date-time, `OutOfRange` for years outside
    /// `-9999..=9999`.
    fn try_from(datetime: LocalDateTime) -> Result<Self> {
        let date = jiff::civil::Date::try_from(datetime.date)?;
        let time = jiff::civil::Time::try_from(datetime.time)?;
        Ok(Self::from_parts(date, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::sql::{FromSqlValue, SqlValue, ToSqlValue};

    fn datetime(year: i64, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> LocalDateTime {
        LocalDateTime::must_of(year, Month::of(month).unwrap(), day, hour, minute, second, 0)
    }

    #[test]
    fn test_scenario_text_json_sql() {
        let dt = LocalDateTime::must_of(2024, Month::MARCH, 15, 14, 30, 45, 123_456_789);
        assert_eq!(dt.to_string(), "2024-03-15T14:30:45.123456789");
        assert_eq!(
            serde_json::to_string(&dt).unwrap(),
            "\"2024-03-15T14:30:45.123456789\""
        );
        assert_eq!(
            dt.to_sql_value(),
            SqlValue::Text("2024-03-15T14:30:45.123456789".to_owned())
        );
        assert!(LocalDateTime::from_sql_value(&SqlValue::Null).unwrap().is_zero());
        assert_eq!(LocalDateTime::from_sql_value(&dt.to_sql_value()).unwrap(), dt);
        assert_eq!(
            serde_json::from_str::<LocalDateTime>("\"2024-03-15T14:30:45.123456789\"").unwrap(),
            dt
        );
    }

    #[test]
    fn test_unset_parts() {
        let date = LocalDate::must_of(2024, Month::MARCH, 15);
        assert!(LocalDateTime::of_date_time(date, LocalTime::default()).is_zero());
        assert!(LocalDateTime::of_date_time(LocalDate::default(), LocalTime::NOON).is_zero());
        assert_eq!(LocalDateTime::default().to_string(), "");
        assert_eq!(date.at_start_of_day().to_string(), "2024-03-15T00:00:00");
        assert_eq!(LocalTime::NOON.at_date(date).to_string(), "2024-03-15T12:00:00");
    }

    #[test]
    fn test_day_carry() {
        let dt = datetime(2024, 2, 28, 23, 30, 0);
        assert_eq!(dt.plus_hours(1).unwrap(), datetime(2024, 2, 29, 0, 30, 0));
        assert_eq!(dt.plus_minutes(60 * 24 + 30).unwrap(), datetime(2024, 3, 1, 0, 0, 0));
        assert_eq!(dt.minus_hours(24 * 365).unwrap(), datetime(2023, 2, 28, 23, 30, 0));
        assert_eq!(
            datetime(2024, 1, 1, 0, 0, 0).minus_nanos(1).unwrap(),
            LocalDateTime::must_of(2023, Month::DECEMBER, 31, 23, 59, 59, 999_999_999)
        );
        assert_eq!(
            dt.plus_duration(Duration::must_of_seconds(-1, 500_000_000)).unwrap(),
            LocalDateTime::must_of(2024, Month::FEBRUARY, 28, 23, 29, 59, 500_000_000)
        );
        assert_eq!(
            dt.minus_duration(Duration::of_hours(48).unwrap()).unwrap(),
            datetime(2024, 2, 26, 23, 30, 0)
        );
        assert!(LocalDateTime::MAX.plus_nanos(1).is_err());
        assert!(LocalDateTime::default().plus_hours(3).unwrap().is_zero());
    }

    #[test]
    fn test_date_arithmetic_keeps_time() {
        let dt = datetime(2024, 1, 31, 8, 15, 0);
        assert_eq!(dt.plus_months(1).unwrap(), datetime(2024, 2, 29, 8, 15, 0));
        assert_eq!(dt.minus_years(1).unwrap(), datetime(2023, 1, 31, 8, 15, 0));
        assert_eq!(dt.plus_weeks(1).unwrap(), datetime(2024, 2, 7, 8, 15, 0));
        assert_eq!(dt.minus_days(31).unwrap(), datetime(2023, 12, 31, 8, 15, 0));
    }

    #[test]
    fn test_between() {
        let start = datetime(2024, 3, 15, 12, 0, 0);
        let end = datetime(2024, 3, 16, 13, 30, 0);
        assert_eq!(start.between(end).unwrap(), Duration::of_secs(25 * 3600 + 1800));
        assert_eq!(end.between(start).unwrap(), Duration::of_secs(-(25 * 3600 + 1800)));
        assert_eq!(start.between(LocalDateTime::default()).unwrap(), Duration::ZERO);
        assert_eq!(
            LocalDateTime::default().between(LocalDateTime::default()).unwrap(),
            Duration::ZERO
        );
        assert!(LocalDateTime::MIN.between(LocalDateTime::MAX).is_err());
    }

    #[test]
    fn test_epoch_second() {
        let dt = datetime(1970, 1, 1, 1, 0, 0);
        let plus_one = ZoneOffset::of_hours(1).unwrap();
        assert_eq!(dt.to_epoch_second(plus_one).unwrap(), 0);
        assert_eq!(dt.to_epoch_second(ZoneOffset::UTC).unwrap(), 3600);
        assert_eq!(
            LocalDateTime::of_epoch_second(0, 0, plus_one).unwrap(),
            dt
        );
        assert_eq!(
            LocalDateTime::of_epoch_second(-1, 5, ZoneOffset::UTC).unwrap(),
            LocalDateTime::must_of(1969, Month::DECEMBER, 31, 23, 59, 59, 5)
        );
        assert!(LocalDateTime::MAX.to_epoch_second(ZoneOffset::UTC).is_err());
    }

    #[test]
    fn test_field_delegation() {
        let dt = LocalDateTime::must_of(2024, Month::MARCH, 15, 14, 30, 45, 123_456_789);
        assert_eq!(dt.get_field(Field::DayOfWeek).get(), Some(5));
        assert_eq!(dt.get_field(Field::NanoOfDay).get(), Some(52_245_123_456_789));
        assert!(dt.get_field(Field::OffsetSeconds).is_unsupported());
        assert!(!dt.is_supported_field(Field::InstantSeconds));
        assert_eq!(
            dt.with_field(Field::MonthOfYear, 2).unwrap().date(),
            LocalDate::must_of(2024, Month::FEBRUARY, 15)
        );
        assert_eq!(dt.with_field(Field::HourOfDay, 1).unwrap().hour(), 1);
        assert_eq!(
            dt.with_field(Field::OffsetSeconds, 1).unwrap_err().kind(),
            &ErrorKind::UnsupportedField(Field::OffsetSeconds)
        );
        assert!(dt.with_field(Field::MinuteOfHour, 60).is_err());
        for field in Field::ALL {
            assert!(LocalDateTime::default().get_field(field).is_unsupported());
        }
    }

    #[test]
    fn test_parse() {
        let expected = datetime(2024, 3, 15, 14, 30, 0);
        for text in ["2024-03-15T14:30:00", "2024-03-15t14:30:00", "2024-03-15 14:30:00"] {
            assert_eq!(LocalDateTime::must_parse(text), expected, "{text}");
        }
        for text in ["2024-03-15", "2024-03-15T", "T14:30:00", "2024-03-15X14:30:00", "2024-03-15T14:30"] {
            let err = LocalDateTime::parse(text).unwrap_err();
            assert_eq!(err.input(), Some(text));
        }
        assert_eq!(
            LocalDateTime::must_parse("+12345-01-02T03:04:05.06").to_string(),
            "+12345-01-02T03:04:05.060"
        );
    }

    #[test]
    fn test_sql_timestamp_ignores_zone() {
        let zoned = jiff::civil::date(2024, 3, 15)
            .at(14, 30, 0, 0)
            .in_tz("Australia/Sydney")
            .unwrap();
        assert_eq!(
            LocalDateTime::from_sql_value(&SqlValue::Timestamp(zoned)).unwrap(),
            datetime(2024, 3, 15, 14, 30, 0)
        );
    }

    #[test]
    fn test_jiff_conversion() {
        let dt = LocalDateTime::must_of(2024, Month::MARCH, 15, 14, 30, 45, 1);
        let host = jiff::civil::DateTime::try_from(dt).unwrap();
        assert_eq!(host, jiff::civil::date(2024, 3, 15).at(14, 30, 45, 1));
        assert_eq!(LocalDateTime::from(host), dt);
        assert!(jiff::civil::DateTime::try_from(LocalDateTime::default()).is_err());
    }
}
