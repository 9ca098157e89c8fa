use std::fmt;

use crate::codec::{TextCodec, parse_two_digits};
use crate::consts::{MAX_OFFSET_SECONDS, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::error::{Error, Result};
use crate::field::{Field, TemporalAccessor, TemporalAdjuster, TemporalValue, check_set};

/// A fixed offset from UTC, between `-18:00` and `+18:00`.
///
/// The default value is UTC, printed as `Z`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneOffset {
    seconds: i32,
}

impl ZoneOffset {
    pub const UTC: Self = Self { seconds: 0 };
    pub const MIN: Self = Self {
        seconds: -MAX_OFFSET_SECONDS,
    };
    pub const MAX: Self = Self {
        seconds: MAX_OFFSET_SECONDS,
    };

    /// # Errors
    /// `OutOfRange` for `OffsetSeconds` outside `-64800..=64800`.
    pub fn of_total_seconds(seconds: i32) -> Result<Self> {
        Field::OffsetSeconds.check(i64::from(seconds))?;
        Ok(Self { seconds })
    }

    /// # Errors
    /// See [`ZoneOffset::of_hours_minutes_seconds`].
    pub fn of_hours(hours: i32) -> Result<Self> {
        Self::of_hours_minutes_seconds(hours, 0, 0)
    }

    /// # Errors
    /// See [`ZoneOffset::of_hours_minutes_seconds`].
    pub fn of_hours_minutes(hours: i32, minutes: i32) -> Result<Self> {
        Self::of_hours_minutes_seconds(hours, minutes, 0)
    }

    /// Builds an offset from components that all share one sign, e.g.
    /// `(-5, -30, 0)` for `-05:30`.
    ///
    /// # Errors
    /// `OutOfRange` if a component is out of range, the signs disagree, or
    /// the total exceeds 18 hours.
    pub fn of_hours_minutes_seconds(hours: i32, minutes: i32, seconds: i32) -> Result<Self> {
        if !(-59..=59).contains(&minutes) {
            return Err(Error::out_of_range(Field::MinuteOfHour, i64::from(minutes)));
        }
        if !(-59..=59).contains(&seconds) {
            return Err(Error::out_of_range(Field::SecondOfMinute, i64::from(seconds)));
        }
        let positive = hours > 0 || (hours == 0 && (minutes > 0 || (minutes == 0 && seconds > 0)));
        let negative = hours < 0 || (hours == 0 && (minutes < 0 || (minutes == 0 && seconds < 0)));
        if (positive && minutes < 0) || (negative && minutes > 0) {
            return Err(Error::out_of_range(Field::MinuteOfHour, i64::from(minutes)));
        }
        if (positive && seconds < 0) || (negative && seconds > 0) {
            return Err(Error::out_of_range(Field::SecondOfMinute, i64::from(seconds)));
        }
        let total = i64::from(hours) * SECONDS_PER_HOUR
            + i64::from(minutes) * SECONDS_PER_MINUTE
            + i64::from(seconds);
        let total = i32::try_from(Field::OffsetSeconds.check(total)?)
            .map_err(|_| Error::out_of_range(Field::OffsetSeconds, total))?;
        Ok(Self { seconds: total })
    }

    /// # Panics
    /// If the offset is invalid.
    pub fn must_of_hours_minutes_seconds(hours: i32, minutes: i32, seconds: i32) -> Self {
        match Self::of_hours_minutes_seconds(hours, minutes, seconds) {
            Ok(offset) => offset,
            Err(err) => panic!("{err}"),
        }
    }

    #[inline]
    pub const fn total_seconds(self) -> i32 {
        self.seconds
    }

    /// Hours component, carrying the sign of the offset.
    #[inline]
    pub const fn hours(self) -> i32 {
        self.seconds / 3600
    }

    /// Minutes component, carrying the sign of the offset.
    #[inline]
    pub const fn minutes(self) -> i32 {
        (self.seconds / 60) % 60
    }

    /// Seconds component, carrying the sign of the offset.
    #[inline]
    pub const fn seconds(self) -> i32 {
        self.seconds % 60
    }

    /// Whether this is UTC, which doubles as the unset value.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.seconds == 0
    }
}

impl TemporalAccessor for ZoneOffset {
    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn is_supported_field(&self, field: Field) -> bool {
        field == Field::OffsetSeconds
    }

    fn get_field(&self, field: Field) -> TemporalValue {
        if Self::is_zero(*self) || field != Field::OffsetSeconds {
            return TemporalValue::unsupported();
        }
        TemporalValue::of(i64::from(self.seconds))
    }
}

impl TemporalAdjuster for ZoneOffset {
    fn with_temporal(&self, field: Field, value: TemporalValue) -> Result<Self> {
        let Some(v) = check_set(self, field, value)? else {
            return Ok(*self);
        };
        let seconds = i32::try_from(v).map_err(|_| Error::out_of_range(field, v))?;
        Self::of_total_seconds(seconds)
    }
}

impl TextCodec for ZoneOffset {
    const TYPE_NAME: &'static str = "ZoneOffset";
    const EMPTY_IS_ZERO: bool = false;

    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn append_text<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        if Self::is_zero(*self) {
            return w.write_char('Z');
        }
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let abs = self.seconds.unsigned_abs();
        write!(w, "{sign}{:02}:{:02}", abs / 3600, (abs / 60) % 60)?;
        if abs % 60 != 0 {
            write!(w, ":{:02}", abs % 60)?;
        }
        Ok(())
    }

    /// `Z`, `z`, `±H`, `±HH`, `±HHMM`, `±HH:MM`, `±HHMMSS` or `±HH:MM:SS`.
    fn decode_text(text: &str) -> Result<Self> {
        if text == "Z" || text == "z" {
            return Ok(Self::UTC);
        }
        let bytes = text.as_bytes();
        let sign = match bytes.first() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return Err(Error::bad_format()),
        };
        let rest = &bytes[1..];
        let (hours, minutes, seconds) = match rest {
            [h @ b'0'..=b'9'] => (h - b'0', 0, 0),
            [_, _] => (parse_two_digits(rest)?, 0, 0),
            [_, _, _, _] => (parse_two_digits(&rest[..2])?, parse_two_digits(&rest[2..])?, 0),
            [_, _, b':', _, _] => (parse_two_digits(&rest[..2])?, parse_two_digits(&rest[3..])?, 0),
            [_, _, _, _, _, _] => (
                parse_two_digits(&rest[..2])?,
                parse_two_digits(&rest[2..4])?,
                parse_two_digits(&rest[4..])?,
            ),
            [_, _, b':', _, _, b':', _, _] => (
                parse_two_digits(&rest[..2])?,
                parse_two_digits(&rest[3..5])?,
                parse_two_digits(&rest[6..])?,
            ),
            _ => return Err(Error::bad_format()),
        };
        Self::of_hours_minutes_seconds(
            sign * i32::from(hours),
            sign * i32::from(minutes),
            sign * i32::from(seconds),
        )
    }
}

impl_text_codec!(ZoneOffset);
impl_sql!(ZoneOffset);

impl From<ZoneOffset> for jiff::tz::Offset {
    fn from(offset: ZoneOffset) -> Self {
        // jiff accepts up to 25:59:59, a superset of our range.
        Self::from_seconds(offset.seconds).unwrap_or(Self::UTC)
    }
}

impl TryFrom<jiff::tz::Offset> for ZoneOffset {
    type Error = Error;

    fn try_from(offset: jiff::tz::Offset) -> Result<Self> {
        Self::of_total_seconds(offset.seconds())
    }
}
