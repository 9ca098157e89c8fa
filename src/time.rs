use std::fmt;

use crate::codec::{FractionStyle, TextCodec, parse_fraction, parse_two_digits, write_fraction};
use crate::consts::{
    HOURS_PER_DAY, MINUTES_PER_DAY, MINUTES_PER_HOUR, NANOS_PER_DAY, NANOS_PER_HOUR,
    NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_MINUTE, NANOS_PER_SECOND, SECONDS_PER_DAY,
    SECONDS_PER_MINUTE,
};
use crate::date::LocalDate;
use crate::datetime::LocalDateTime;
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::field::{Field, TemporalAccessor, TemporalAdjuster, TemporalValue, check_set};
use crate::math::floor_mod;
use crate::zone::ZoneId;

/// Set on every valid time so that `00:00:00` differs from the unset value.
const VALID: u64 = 1 << 63;

/// A time of day without a date or offset, such as `14:30:45.123456789`.
///
/// Stored as the nanosecond-of-day with the top bit marking a set value.
/// The default value is the unset time, which sorts before midnight and
/// prints as an empty string.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime(u64);

impl LocalTime {
    pub const MIN: Self = Self::from_nano_of_day(0);
    pub const MAX: Self = Self::from_nano_of_day(NANOS_PER_DAY - 1);
    pub const MIDNIGHT: Self = Self::MIN;
    pub const NOON: Self = Self::from_nano_of_day(12 * NANOS_PER_HOUR);
    pub(crate) const UNSET: Self = Self(0);

    /// Callers guarantee `nanos` is in `0..NANOS_PER_DAY`.
    const fn from_nano_of_day(nanos: i64) -> Self {
        Self(VALID | nanos as u64)
    }

    /// # Errors
    /// `OutOfRange` naming the first component outside its range.
    pub fn of(hour: u8, minute: u8, second: u8, nano: u32) -> Result<Self> {
        let hour = Field::HourOfDay.check(i64::from(hour))?;
        let minute = Field::MinuteOfHour.check(i64::from(minute))?;
        let second = Field::SecondOfMinute.check(i64::from(second))?;
        let nano = Field::NanoOfSecond.check(i64::from(nano))?;
        Ok(Self::from_nano_of_day(
            hour * NANOS_PER_HOUR + minute * NANOS_PER_MINUTE + second * NANOS_PER_SECOND + nano,
        ))
    }

    /// # Panics
    /// If a component is out of range.
    pub fn must_of(hour: u8, minute: u8, second: u8, nano: u32) -> Self {
        match Self::of(hour, minute, second, nano) {
            Ok(time) => time,
            Err(err) => panic!("{err}"),
        }
    }

    /// # Errors
    /// `OutOfRange` unless `nanos` is in `0..86_400_000_000_000`.
    pub fn of_nano_of_day(nanos: i64) -> Result<Self> {
        Field::NanoOfDay.check(nanos).map(Self::from_nano_of_day)
    }

    /// # Errors
    /// `OutOfRange` unless `seconds` is in `0..86_400`.
    pub fn of_second_of_day(seconds: i64) -> Result<Self> {
        let seconds = Field::SecondOfDay.check(seconds)?;
        Ok(Self::from_nano_of_day(seconds * NANOS_PER_SECOND))
    }

    /// The current time of day in the system time zone.
    pub fn now() -> Self {
        Self::from(jiff::Zoned::now().time())
    }

    /// The current time of day in UTC.
    pub fn now_utc() -> Self {
        Self::now_in(&ZoneId::utc())
    }

    /// The current time of day in `zone`.
    pub fn now_in(zone: &ZoneId) -> Self {
        Self::from(zone.now_zoned().time())
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 & VALID == 0
    }

    /// Nanoseconds since midnight; 0 for the unset time.
    #[inline]
    pub const fn nano_of_day(self) -> i64 {
        (self.0 & !VALID) as i64
    }

    #[inline]
    pub const fn second_of_day(self) -> i64 {
        self.nano_of_day() / NANOS_PER_SECOND
    }

    #[inline]
    pub const fn hour(self) -> u8 {
        (self.nano_of_day() / NANOS_PER_HOUR) as u8
    }

    #[inline]
    pub const fn minute(self) -> u8 {
        ((self.nano_of_day() / NANOS_PER_MINUTE) % MINUTES_PER_HOUR) as u8
    }

    #[inline]
    pub const fn second(self) -> u8 {
        ((self.nano_of_day() / NANOS_PER_SECOND) % SECONDS_PER_MINUTE) as u8
    }

    #[inline]
    pub const fn nano(self) -> u32 {
        (self.nano_of_day() % NANOS_PER_SECOND) as u32
    }

    pub fn is_before(self, other: Self) -> bool {
        self < other
    }

    pub fn is_after(self, other: Self) -> bool {
        self > other
    }

    /// Adds nanoseconds, wrapping around midnight.
    #[must_use]
    pub const fn plus_nanos(self, nanos: i64) -> Self {
        if self.is_zero() || nanos == 0 {
            return self;
        }
        let shift = floor_mod(nanos, NANOS_PER_DAY);
        Self::from_nano_of_day(floor_mod(self.nano_of_day() + shift, NANOS_PER_DAY))
    }

    /// Adds seconds, wrapping around midnight.
    #[must_use]
    pub const fn plus_seconds(self, seconds: i64) -> Self {
        self.plus_nanos(floor_mod(seconds, SECONDS_PER_DAY) * NANOS_PER_SECOND)
    }

    /// Adds minutes, wrapping around midnight.
    #[must_use]
    pub const fn plus_minutes(self, minutes: i64) -> Self {
        self.plus_nanos(floor_mod(minutes, MINUTES_PER_DAY) * NANOS_PER_MINUTE)
    }

    /// Adds hours, wrapping around midnight.
    #[must_use]
    pub const fn plus_hours(self, hours: i64) -> Self {
        self.plus_nanos(floor_mod(hours, HOURS_PER_DAY) * NANOS_PER_HOUR)
    }

    #[must_use]
    pub const fn minus_nanos(self, nanos: i64) -> Self {
        self.plus_nanos(-(nanos % NANOS_PER_DAY))
    }

    #[must_use]
    pub const fn minus_seconds(self, seconds: i64) -> Self {
        self.plus_seconds(-(seconds % SECONDS_PER_DAY))
    }

    #[must_use]
    pub const fn minus_minutes(self, minutes: i64) -> Self {
        self.plus_minutes(-(minutes % MINUTES_PER_DAY))
    }

    #[must_use]
    pub const fn minus_hours(self, hours: i64) -> Self {
        self.plus_hours(-(hours % HOURS_PER_DAY))
    }

    /// Adds a duration, wrapping around midnight.
    #[must_use]
    pub const fn plus_duration(self, duration: Duration) -> Self {
        self.plus_seconds(duration.seconds())
            .plus_nanos(duration.nanos() as i64)
    }

    /// # Errors
    /// `OutOfRange` unless `hour` is in `0..24`.
    pub fn with_hour(self, hour: u8) -> Result<Self> {
        self.with_parts(hour, self.minute(), self.second(), self.nano())
    }

    /// # Errors
    /// `OutOfRange` unless `minute` is in `0..60`.
    pub fn with_minute(self, minute: u8) -> Result<Self> {
        self.with_parts(self.hour(), minute, self.second(), self.nano())
    }

    /// # Errors
    /// `OutOfRange` unless `second` is in `0..60`.
    pub fn with_second(self, second: u8) -> Result<Self> {
        self.with_parts(self.hour(), self.minute(), second, self.nano())
    }

    /// # Errors
    /// `OutOfRange` unless `nano` is in `0..1_000_000_000`.
    pub fn with_nano(self, nano: u32) -> Result<Self> {
        self.with_parts(self.hour(), self.minute(), self.second(), nano)
    }

    fn with_parts(self, hour: u8, minute: u8, second: u8, nano: u32) -> Result<Self> {
        if self.is_zero() {
            return Ok(self);
        }
        Self::of(hour, minute, second, nano)
    }

    /// Combines this time with a date.
    pub fn at_date(self, date: LocalDate) -> LocalDateTime {
        LocalDateTime::of_date_time(date, self)
    }

    fn from_zoned(zoned: &jiff::Zoned) -> Result<Self> {
        Ok(Self::from(zoned.time()))
    }
}

impl fmt::Debug for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocalTime({self})")
    }
}

impl TemporalAccessor for LocalTime {
    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn is_supported_field(&self, field: Field) -> bool {
        field.is_time_based()
    }

    fn get_field(&self, field: Field) -> TemporalValue {
        if Self::is_zero(*self) {
            return TemporalValue::unsupported();
        }
        let n = self.nano_of_day();
        let hour = i64::from(self.hour());
        let v = match field {
            Field::NanoOfSecond => n % NANOS_PER_SECOND,
            Field::NanoOfDay => n,
            Field::MicroOfSecond => n % NANOS_PER_SECOND / NANOS_PER_MICRO,
            Field::MicroOfDay => n / NANOS_PER_MICRO,
            Field::MilliOfSecond => n % NANOS_PER_SECOND / NANOS_PER_MILLI,
            Field::MilliOfDay => n / NANOS_PER_MILLI,
            Field::SecondOfMinute => i64::from(self.second()),
            Field::SecondOfDay => n / NANOS_PER_SECOND,
            Field::MinuteOfHour => i64::from(self.minute()),
            Field::MinuteOfDay => n / NANOS_PER_MINUTE,
            Field::HourOfAmPm => hour % 12,
            Field::ClockHourOfAmPm => {
                if hour % 12 == 0 {
                    12
                } else {
                    hour % 12
                }
            }
            Field::HourOfDay => hour,
            Field::ClockHourOfDay => {
                if hour == 0 {
                    24
                } else {
                    hour
                }
            }
            Field::AmPmOfDay => hour / 12,
            _ => return TemporalValue::unsupported(),
        };
        TemporalValue::of(v)
    }
}

impl TemporalAdjuster for LocalTime {
    fn with_temporal(&self, field: Field, value: TemporalValue) -> Result<Self> {
        let Some(v) = check_set(self, field, value)? else {
            return Ok(*self);
        };
        let hour = i64::from(self.hour());
        match field {
            Field::NanoOfSecond => self.with_nano(v as u32),
            Field::NanoOfDay => Self::of_nano_of_day(v),
            Field::MicroOfSecond => self.with_nano((v * NANOS_PER_MICRO) as u32),
            Field::MicroOfDay => Self::of_nano_of_day(v * NANOS_PER_MICRO),
            Field::MilliOfSecond => self.with_nano((v * NANOS_PER_MILLI) as u32),
            Field::MilliOfDay => Self::of_nano_of_day(v * NANOS_PER_MILLI),
            Field::SecondOfMinute => self.with_second(v as u8),
            Field::SecondOfDay => Ok(self.plus_seconds(v - self.second_of_day())),
            Field::MinuteOfHour => self.with_minute(v as u8),
            Field::MinuteOfDay => Ok(self.plus_minutes(v - self.nano_of_day() / NANOS_PER_MINUTE)),
            Field::HourOfAmPm => Ok(self.plus_hours(v - hour % 12)),
            Field::ClockHourOfAmPm => Ok(self.plus_hours(v % 12 - hour % 12)),
            Field::HourOfDay => self.with_hour(v as u8),
            Field::ClockHourOfDay => self.with_hour((v % 24) as u8),
            Field::AmPmOfDay => Ok(self.plus_hours((v - hour / 12) * 12)),
            _ => Err(Error::unsupported_field(field)),
        }
    }
}

impl TextCodec for LocalTime {
    const TYPE_NAME: &'static str = "LocalTime";

    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn append_text<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        if Self::is_zero(*self) {
            return Ok(());
        }
        write!(
            w,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )?;
        write_fraction(w, i64::from(self.nano()), FractionStyle::Grouped)
    }

    /// `HH:mm:ss` with an optional `.f{1,9}` fraction.
    fn decode_text(text: &str) -> Result<Self> {
        let bytes = text.as_bytes();
        if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
            return Err(Error::bad_format());
        }
        let hour = parse_two_digits(&bytes[..2])?;
        let minute = parse_two_digits(&bytes[3..5])?;
        let second = parse_two_digits(&bytes[6..8])?;
        let nano = match &bytes[8..] {
            [] => 0,
            [b'.', fraction @ ..] => parse_fraction(fraction)?,
            _ => return Err(Error::bad_format()),
        };
        Self::of(hour, minute, second, nano as u32)
    }
}

impl_text_codec!(LocalTime);
impl_sql!(LocalTime, Some(Self::from_zoned));

impl From<jiff::civil::Time> for LocalTime {
    fn from(time: jiff::civil::Time) -> Self {
        Self::from_nano_of_day(
            i64::from(time.hour()) * NANOS_PER_HOUR
                + i64::from(time.minute()) * NANOS_PER_MINUTE
                + i64::from(time.second()) * NANOS_PER_SECOND
                + i64::from(time.subsec_nanosecond()),
        )
    }
}

impl TryFrom<LocalTime> for jiff::civil::Time {
    type Error = Error;

    /// # Errors
    /// `EmptyInput` for the unset time.
    fn try_from(time: LocalTime) -> Result<Self> {
        if time.is_zero() {
            return Err(Error::empty_input());
        }
        Self::new(
            time.hour() as i8,
            time.minute() as i8,
            time.second() as i8,
            time.nano() as i32,
        )
        .map_err(|_| Error::out_of_range(Field::NanoOfDay, time.nano_of_day()))
    }
}
