use std::cmp::Ordering;
use std::fmt;

use crate::codec::TextCodec;
use crate::consts::NANOS_PER_SECOND;
use crate::date::LocalDate;
use crate::datetime::LocalDateTime;
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::field::{Field, TemporalAccessor, TemporalAdjuster, TemporalValue, check_set};
use crate::offset::ZoneOffset;
use crate::time::LocalTime;
use crate::types::{DayOfWeek, Month, Year};
use crate::zone::ZoneId;

/// A date-time with an offset from UTC, such as
/// `2024-03-15T14:30:45+05:30`. It names one instant on the time line.
///
/// Equality compares the local date-time and the offset; ordering compares
/// instants first and breaks ties by the local date-time, so that two values
/// naming the same instant in different offsets are ordered but not equal.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    datetime: LocalDateTime,
    offset: ZoneOffset,
}

impl OffsetDateTime {
    /// Attaches `offset` to `datetime`. The unset date-time yields the unset
    /// value regardless of the offset.
    pub fn of(datetime: LocalDateTime, offset: ZoneOffset) -> Self {
        if datetime.is_zero() {
            return Self::default();
        }
        Self { datetime, offset }
    }

    /// The instant `epoch_second` seconds and `nano` nanoseconds after
    /// 1970-01-01T00:00:00Z, seen at `offset`.
    ///
    /// # Errors
    /// `OutOfRange` if `nano` is not a nano-of-second or the date leaves the
    /// representable years.
    pub fn of_epoch_second(epoch_second: i64, nano: u32, offset: ZoneOffset) -> Result<Self> {
        Ok(Self::of(
            LocalDateTime::of_epoch_second(epoch_second, nano, offset)?,
            offset,
        ))
    }

    /// The current instant at the system zone's offset.
    pub fn now() -> Self {
        // Zone database offsets stay well inside ±18:00.
        Self::try_from(&jiff::Zoned::now()).unwrap_or_default()
    }

    /// The current instant at UTC.
    pub fn now_utc() -> Self {
        Self::now_in(&ZoneId::utc())
    }

    /// The current instant at the offset `zone` has now.
    pub fn now_in(zone: &ZoneId) -> Self {
        Self::try_from(&zone.now_zoned()).unwrap_or_default()
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.datetime.is_zero()
    }

    #[inline]
    pub const fn datetime(self) -> LocalDateTime {
        self.datetime
    }

    #[inline]
    pub const fn date(self) -> LocalDate {
        self.datetime.date()
    }

    #[inline]
    pub const fn time(self) -> LocalTime {
        self.datetime.time()
    }

    #[inline]
    pub const fn offset(self) -> ZoneOffset {
        self.offset
    }

    pub const fn year(self) -> Year {
        self.datetime.year()
    }

    pub const fn month(self) -> Month {
        self.datetime.month()
    }

    pub const fn day_of_month(self) -> u8 {
        self.datetime.day_of_month()
    }

    pub const fn day_of_year(self) -> u16 {
        self.datetime.day_of_year()
    }

    pub const fn day_of_week(self) -> DayOfWeek {
        self.datetime.day_of_week()
    }

    pub const fn hour(self) -> u8 {
        self.datetime.hour()
    }

    pub const fn minute(self) -> u8 {
        self.datetime.minute()
    }

    pub const fn second(self) -> u8 {
        self.datetime.second()
    }

    pub const fn nano(self) -> u32 {
        self.datetime.nano()
    }

    /// Seconds since 1970-01-01T00:00:00Z.
    ///
    /// # Errors
    /// `Overflow` for dates too far from 1970 to count in an `i64`.
    pub fn to_epoch_second(self) -> Result<i64> {
        self.datetime.to_epoch_second(self.offset)
    }

    /// Nanoseconds since 1970-01-01T00:00:00Z.
    const fn instant_nanos(self) -> i128 {
        self.datetime.nanos_since_epoch()
            - self.offset.total_seconds() as i128 * NANOS_PER_SECOND as i128
    }

    /// The same instant seen at another offset.
    ///
    /// # Errors
    /// `OutOfRange` if the shifted date leaves the representable years.
    pub fn with_offset_same_instant(self, offset: ZoneOffset) -> Result<Self> {
        if self.is_zero() || offset == self.offset {
            return Ok(self);
        }
        let shift = offset.total_seconds() - self.offset.total_seconds();
        Ok(Self {
            datetime: self.datetime.plus_seconds(i64::from(shift))?,
            offset,
        })
    }

    /// The same local date-time at another offset, naming a different
    /// instant.
    pub fn with_offset_same_local(self, offset: ZoneOffset) -> Self {
        Self::of(self.datetime, offset)
    }

    /// The same instant at the offset `zone` has at that instant.
    ///
    /// # Errors
    /// See [`ZoneId::offset_at`].
    pub fn at_zone_same_instant(self, zone: &ZoneId) -> Result<Self> {
        if self.is_zero() {
            return Ok(self);
        }
        self.with_offset_same_instant(zone.offset_at(self)?)
    }

    pub fn is_before(self, other: Self) -> bool {
        self.instant_nanos() < other.instant_nanos()
    }

    pub fn is_after(self, other: Self) -> bool {
        self.instant_nanos() > other.instant_nanos()
    }

    /// Whether both values name the same instant, whatever their offsets.
    pub fn is_same_instant(self, other: Self) -> bool {
        self.instant_nanos() == other.instant_nanos()
    }

    /// The time from `self` to `other` on the instant time line. Zero if
    /// either value is unset.
    ///
    /// # Errors
    /// `Overflow` if the difference does not fit in a [`Duration`].
    pub fn between(self, other: Self) -> Result<Duration> {
        if self.is_zero() || other.is_zero() {
            return Ok(Duration::ZERO);
        }
        Duration::from_total_nanos(other.instant_nanos() - self.instant_nanos())
    }

    fn map_datetime(self, f: impl FnOnce(LocalDateTime) -> Result<LocalDateTime>) -> Result<Self> {
        Ok(Self {
            datetime: f(self.datetime)?,
            offset: self.offset,
        })
    }

    /// # Errors
    /// See [`LocalDateTime::plus_years`].
    pub fn plus_years(self, years: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.plus_years(years))
    }

    /// # Errors
    /// See [`LocalDateTime::minus_years`].
    pub fn minus_years(self, years: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.minus_years(years))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_months`].
    pub fn plus_months(self, months: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.plus_months(months))
    }

    /// # Errors
    /// See [`LocalDateTime::minus_months`].
    pub fn minus_months(self, months: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.minus_months(months))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_weeks`].
    pub fn plus_weeks(self, weeks: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.plus_weeks(weeks))
    }

    /// # Errors
    /// See [`LocalDateTime::minus_weeks`].
    pub fn minus_weeks(self, weeks: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.minus_weeks(weeks))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_days`].
    pub fn plus_days(self, days: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.plus_days(days))
    }

    /// # Errors
    /// See [`LocalDateTime::minus_days`].
    pub fn minus_days(self, days: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.minus_days(days))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_hours`].
    pub fn plus_hours(self, hours: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.plus_hours(hours))
    }

    /// # Errors
    /// See [`LocalDateTime::minus_hours`].
    pub fn minus_hours(self, hours: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.minus_hours(hours))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_minutes`].
    pub fn plus_minutes(self, minutes: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.plus_minutes(minutes))
    }

    /// # Errors
    /// See [`LocalDateTime::minus_minutes`].
    pub fn minus_minutes(self, minutes: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.minus_minutes(minutes))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_seconds`].
    pub fn plus_seconds(self, seconds: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.plus_seconds(seconds))
    }

    /// # Errors
    /// See [`LocalDateTime::minus_seconds`].
    pub fn minus_seconds(self, seconds: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.minus_seconds(seconds))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_nanos`].
    pub fn plus_nanos(self, nanos: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.plus_nanos(nanos))
    }

    /// # Errors
    /// See [`LocalDateTime::minus_nanos`].
    pub fn minus_nanos(self, nanos: i64) -> Result<Self> {
        self.map_datetime(|dt| dt.minus_nanos(nanos))
    }

    /// # Errors
    /// See [`LocalDateTime::plus_duration`].
    pub fn plus_duration(self, duration: Duration) -> Result<Self> {
        self.map_datetime(|dt| dt.plus_duration(duration))
    }

    /// # Errors
    /// See [`LocalDateTime::minus_duration`].
    pub fn minus_duration(self, duration: Duration) -> Result<Self> {
        self.map_datetime(|dt| dt.minus_duration(duration))
    }

    fn from_zoned(zoned: &jiff::Zoned) -> Result<Self> {
        Self::try_from(zoned)
    }
}

impl Ord for OffsetDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        match (Self::is_zero(*self), Self::is_zero(*other)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .instant_nanos()
                .cmp(&other.instant_nanos())
                .then_with(|| self.datetime.cmp(&other.datetime)),
        }
    }
}

impl PartialOrd for OffsetDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OffsetDateTime({self})")
    }
}

impl TemporalAccessor for OffsetDateTime {
    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn is_supported_field(&self, field: Field) -> bool {
        matches!(field, Field::InstantSeconds | Field::OffsetSeconds)
            || self.datetime.is_supported_field(field)
    }

    fn get_field(&self, field: Field) -> TemporalValue {
        if Self::is_zero(*self) {
            return TemporalValue::unsupported();
        }
        match field {
            Field::InstantSeconds => self
                .to_epoch_second()
                .map_or_else(|_| TemporalValue::unsupported(), TemporalValue::of),
            Field::OffsetSeconds => TemporalValue::of(i64::from(self.offset.total_seconds())),
            _ => self.datetime.get_field(field),
        }
    }
}

impl TemporalAdjuster for OffsetDateTime {
    fn with_temporal(&self, field: Field, value: TemporalValue) -> Result<Self> {
        let Some(v) = check_set(self, field, value)? else {
            return Ok(*self);
        };
        match field {
            Field::InstantSeconds => Self::of_epoch_second(v, self.nano(), self.offset),
            Field::OffsetSeconds => {
                let offset = ZoneOffset::of_total_seconds(
                    i32::try_from(v).map_err(|_| Error::out_of_range(field, v))?,
                )?;
                Ok(self.with_offset_same_local(offset))
            }
            _ => self.map_datetime(|dt| dt.with_field(field, v)),
        }
    }
}

impl TextCodec for OffsetDateTime {
    const TYPE_NAME: &'static str = "OffsetDateTime";

    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn append_text<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        if Self::is_zero(*self) {
            return Ok(());
        }
        self.datetime.append_text(w)?;
        self.offset.append_text(w)
    }

    /// `<datetime><offset>`; the offset starts at the first `+`, `-`, `Z`
    /// or `z` after the date-time separator.
    fn decode_text(text: &str) -> Result<Self> {
        let Some(split) = text.find(['T', 't', ' ']) else {
            return Err(Error::bad_format());
        };
        let Some(offset_at) = text[split..].find(['+', '-', 'Z', 'z']) else {
            return Err(Error::bad_format());
        };
        let (datetime, offset) = text.split_at(split + offset_at);
        Ok(Self::of(
            LocalDateTime::decode_text(datetime)?,
            ZoneOffset::decode_text(offset)?,
        ))
    }
}

impl_text_codec!(OffsetDateTime);
impl_sql!(OffsetDateTime, Some(Self::from_zoned));

impl TryFrom<&jiff::Zoned> for OffsetDateTime {
    type Error = Error;

    /// # Errors
    /// `OutOfRange` if the zone's offset exceeds ±18:00.
    fn try_from(zoned: &jiff::Zoned) -> Result<Self> {
        Ok(Self::of(
            LocalDateTime::from(zoned.datetime()),
            ZoneOffset::try_from(zoned.offset())?,
        ))
    }
}

impl TryFrom<jiff::Zoned> for OffsetDateTime {
    type Error = Error;

    fn try_from(zoned: jiff::Zoned) -> Result<Self> {
        Self::try_from(&zoned)
    }
}

impl TryFrom<OffsetDateTime> for jiff::Timestamp {
    type Error = Error;

    /// # Errors
    /// `EmptyInput` for the unset value, `OutOfRange` for instants outside
    /// the years `-9999..=9999`.
    fn try_from(value: OffsetDateTime) -> Result<Self> {
        if value.is_zero() {
            return Err(Error::empty_input());
        }
        let second = value.to_epoch_second()?;
        Self::new(second, value.nano() as i32)
            .map_err(|_| Error::out_of_range(Field::InstantSeconds, second))
    }
}

impl TryFrom<OffsetDateTime> for jiff::Zoned {
    type Error = Error;

    /// The instant in a fixed-offset zone.
    ///
    /// # Errors
    /// See the conversion to [`jiff::Timestamp`].
    fn try_from(value: OffsetDateTime) -> Result<Self> {
        let timestamp = jiff::Timestamp::try_from(value)?;
        Ok(timestamp.to_zoned(jiff::tz::TimeZone::fixed(value.offset.into())))
    }
}
