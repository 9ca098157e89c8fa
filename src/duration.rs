use std::cmp::Ordering;
use std::fmt;

use crate::codec::{FractionStyle, TextCodec, parse_digits, parse_fraction, write_fraction};
use crate::consts::{
    MILLIS_PER_SECOND, NANOS_PER_MILLI, NANOS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE,
};
use crate::error::{Error, Result};
use crate::math::{add_exact, floor_div, floor_div_i128, floor_mod, floor_mod_i128, mul_exact, narrow};

/// A signed, nanosecond precision amount of time.
///
/// Stored as whole seconds plus a nanosecond adjustment that is always in
/// `0..1_000_000_000`, so `-0.5s` is `(-1, 500_000_000)`. The default value
/// is the zero duration, which prints as `PT0S`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Duration {
    seconds: i64,
    nanos: i32,
}

impl Duration {
    pub const ZERO: Self = Self {
        seconds: 0,
        nanos: 0,
    };

    /// Builds a duration from seconds plus a nanosecond adjustment of any
    /// size or sign; the adjustment is carried into the seconds with floor
    /// semantics.
    ///
    /// # Errors
    /// `Overflow` if the carried seconds do not fit in an `i64`.
    pub fn of_seconds(seconds: i64, nano_adjustment: i64) -> Result<Self> {
        let seconds = add_exact(seconds, floor_div(nano_adjustment, NANOS_PER_SECOND))?;
        let nanos = floor_mod(nano_adjustment, NANOS_PER_SECOND);
        Ok(Self {
            seconds,
            nanos: i32::try_from(nanos).map_err(|_| Error::overflow())?,
        })
    }

    /// # Panics
    /// If the duration overflows.
    pub fn must_of_seconds(seconds: i64, nano_adjustment: i64) -> Self {
        match Self::of_seconds(seconds, nano_adjustment) {
            Ok(d) => d,
            Err(err) => panic!("{err}"),
        }
    }

    /// Whole seconds, no fractional part.
    pub const fn of_secs(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    pub const fn of_nanos(nanos: i64) -> Self {
        Self {
            seconds: floor_div(nanos, NANOS_PER_SECOND),
            nanos: floor_mod(nanos, NANOS_PER_SECOND) as i32,
        }
    }

    pub const fn of_millis(millis: i64) -> Self {
        Self {
            seconds: floor_div(millis, MILLIS_PER_SECOND),
            nanos: (floor_mod(millis, MILLIS_PER_SECOND) * NANOS_PER_MILLI) as i32,
        }
    }

    /// # Errors
    /// `Overflow` if the number of seconds does not fit in an `i64`.
    pub fn of_minutes(minutes: i64) -> Result<Self> {
        mul_exact(minutes, SECONDS_PER_MINUTE).map(Self::of_secs)
    }

    /// # Errors
    /// `Overflow` if the number of seconds does not fit in an `i64`.
    pub fn of_hours(hours: i64) -> Result<Self> {
        mul_exact(hours, SECONDS_PER_HOUR).map(Self::of_secs)
    }

    /// Days of exactly 86 400 seconds.
    ///
    /// # Errors
    /// `Overflow` if the number of seconds does not fit in an `i64`.
    pub fn of_days(days: i64) -> Result<Self> {
        mul_exact(days, SECONDS_PER_DAY).map(Self::of_secs)
    }

    /// Whole seconds, rounded toward negative infinity.
    #[inline]
    pub const fn seconds(self) -> i64 {
        self.seconds
    }

    /// Nanosecond adjustment, always in `0..1_000_000_000`.
    #[inline]
    pub const fn nanos(self) -> i32 {
        self.nanos
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.seconds > 0 || (self.seconds == 0 && self.nanos > 0)
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.seconds < 0
    }

    /// # Errors
    /// `Overflow` if the sum does not fit.
    pub fn plus(self, other: Self) -> Result<Self> {
        let seconds = add_exact(self.seconds, other.seconds)?;
        Self::of_seconds(seconds, i64::from(self.nanos) + i64::from(other.nanos))
    }

    /// # Errors
    /// `Overflow` if the difference does not fit.
    pub fn minus(self, other: Self) -> Result<Self> {
        self.plus(other.negated()?)
    }

    /// # Errors
    /// `Overflow` if the product does not fit.
    pub fn multiplied_by(self, scalar: i64) -> Result<Self> {
        let total = self
            .total_nanos()
            .checked_mul(i128::from(scalar))
            .ok_or_else(Error::overflow)?;
        Self::from_total_nanos(total)
    }

    /// The duration with the opposite sign.
    ///
    /// # Errors
    /// `Overflow` for the most negative representable duration.
    pub fn negated(self) -> Result<Self> {
        let seconds = self.seconds.checked_neg().ok_or_else(Error::overflow)?;
        Self::of_seconds(seconds, -i64::from(self.nanos))
    }

    /// # Errors
    /// `Overflow` for the most negative representable duration.
    pub fn abs(self) -> Result<Self> {
        if self.is_negative() { self.negated() } else { Ok(self) }
    }

    /// Total length in nanoseconds.
    ///
    /// # Errors
    /// `Overflow` if it does not fit in an `i64` (about 292 years).
    pub fn to_nanos(self) -> Result<i64> {
        narrow(self.total_nanos())
    }

    /// Total length in milliseconds, rounded toward negative infinity.
    ///
    /// # Errors
    /// `Overflow` if it does not fit in an `i64`.
    pub fn to_millis(self) -> Result<i64> {
        let millis = mul_exact(self.seconds, MILLIS_PER_SECOND)?;
        add_exact(millis, i64::from(self.nanos) / NANOS_PER_MILLI)
    }

    /// Whole hours, truncated toward zero.
    pub const fn to_hours(self) -> i64 {
        (self.total_nanos() / (SECONDS_PER_HOUR as i128 * NANOS_PER_SECOND as i128)) as i64
    }

    /// Whole minutes, truncated toward zero.
    pub const fn to_minutes(self) -> i64 {
        (self.total_nanos() / (SECONDS_PER_MINUTE as i128 * NANOS_PER_SECOND as i128)) as i64
    }

    pub(crate) const fn total_nanos(self) -> i128 {
        self.seconds as i128 * NANOS_PER_SECOND as i128 + self.nanos as i128
    }

    pub(crate) fn from_total_nanos(total: i128) -> Result<Self> {
        let nanos_per_second = i128::from(NANOS_PER_SECOND);
        let seconds = narrow(floor_div_i128(total, nanos_per_second))?;
        let nanos = floor_mod_i128(total, nanos_per_second);
        Ok(Self {
            seconds,
            nanos: i32::try_from(nanos).map_err(|_| Error::overflow())?,
        })
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.seconds.cmp(&other.seconds) {
            Ordering::Equal => self.nanos.cmp(&other.nanos),
            ord => ord,
        }
    }
}

impl TextCodec for Duration {
    const TYPE_NAME: &'static str = "Duration";
    const EMPTY_IS_ZERO: bool = false;

    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }

    fn append_text<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        if self.is_zero() {
            return w.write_str("PT0S");
        }
        w.write_str("PT")?;
        let total = self.total_nanos();
        if total < 0 {
            w.write_char('-')?;
        }
        let magnitude = total.unsigned_abs();
        let nanos_per_second = NANOS_PER_SECOND.unsigned_abs() as u128;
        let whole_seconds = magnitude / nanos_per_second;
        let fraction = (magnitude % nanos_per_second) as i64;
        let hours = whole_seconds / SECONDS_PER_HOUR.unsigned_abs() as u128;
        let minutes = (whole_seconds / 60) % 60;
        let seconds = whole_seconds % 60;
        if hours != 0 {
            write!(w, "{hours}H")?;
        }
        if minutes != 0 {
            write!(w, "{minutes}M")?;
        }
        if seconds != 0 || fraction != 0 {
            write!(w, "{seconds}")?;
            write_fraction(w, fraction, FractionStyle::Trimmed)?;
            w.write_char('S')?;
        }
        Ok(())
    }

    /// `PT[+-]?(<int>H)?(<int>M)?(<int>(.<frac>)?S)?`, with the sign applying
    /// to the whole duration.
    fn decode_text(text: &str) -> Result<Self> {
        let rest = text.strip_prefix("PT").ok_or_else(Error::bad_format)?;
        let mut bytes = rest.as_bytes();
        let negative = match bytes.first() {
            Some(b'-') => {
                bytes = &bytes[1..];
                true
            }
            Some(b'+') => {
                bytes = &bytes[1..];
                false
            }
            _ => false,
        };
        if bytes.is_empty() {
            return Err(Error::bad_format());
        }

        let mut total: i128 = 0;
        // Units must appear in H, M, S order, each at most once.
        let mut next_unit = 0;
        while !bytes.is_empty() {
            let digits_end = bytes
                .iter()
                .position(|c| !c.is_ascii_digit())
                .ok_or_else(Error::bad_format)?;
            let amount = i128::from(parse_digits(&bytes[..digits_end])?);
            let (unit, rest) = (bytes[digits_end], &bytes[digits_end + 1..]);
            bytes = rest;
            let nanos_per_second = i128::from(NANOS_PER_SECOND);
            match unit {
                b'H' if next_unit < 1 => {
                    total += amount * i128::from(SECONDS_PER_HOUR) * nanos_per_second;
                    next_unit = 1;
                }
                b'M' if next_unit < 2 => {
                    total += amount * i128::from(SECONDS_PER_MINUTE) * nanos_per_second;
                    next_unit = 2;
                }
                b'S' if next_unit < 3 => {
                    total += amount * nanos_per_second;
                    next_unit = 3;
                }
                b'.' if next_unit < 3 => {
                    let frac_end = bytes
                        .iter()
                        .position(|c| *c == b'S')
                        .ok_or_else(Error::bad_format)?;
                    let fraction = parse_fraction(&bytes[..frac_end])?;
                    total += amount * nanos_per_second + i128::from(fraction);
                    bytes = &bytes[frac_end + 1..];
                    next_unit = 3;
                }
                _ => return Err(Error::bad_format()),
            }
        }
        Self::from_total_nanos(if negative { -total } else { total })
    }
}

impl_text_codec!(Duration);
impl_sql!(Duration);

impl TryFrom<Duration> for std::time::Duration {
    type Error = Error;

    /// Fails with `Overflow` for negative durations.
    fn try_from(d: Duration) -> Result<Self> {
        let seconds = u64::try_from(d.seconds).map_err(|_| Error::overflow())?;
        Ok(Self::new(seconds, d.nanos.unsigned_abs()))
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = Error;

    fn try_from(d: std::time::Duration) -> Result<Self> {
        let seconds = i64::try_from(d.as_secs()).map_err(|_| Error::overflow())?;
        Self::of_seconds(seconds, i64::from(d.subsec_nanos()))
    }
}

impl TryFrom<jiff::SignedDuration> for Duration {
    type Error = Error;

    /// Fails with `Overflow` only for values within a second of
    /// `SignedDuration::MIN`.
    fn try_from(d: jiff::SignedDuration) -> Result<Self> {
        Self::from_total_nanos(d.as_nanos())
    }
}

impl TryFrom<Duration> for jiff::SignedDuration {
    type Error = Error;

    /// Fails with `Overflow` for the most negative duration, which has no
    /// counterpart with sign-aligned nanos.
    fn try_from(d: Duration) -> Result<Self> {
        if d.seconds < 0 && d.nanos > 0 {
            let seconds = d.seconds.checked_add(1).ok_or_else(Error::overflow)?;
            Ok(Self::new(seconds, d.nanos - 1_000_000_000))
        } else {
            Ok(Self::new(d.seconds, d.nanos))
        }
    }
}
