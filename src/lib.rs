//! Immutable date, time, offset and duration values modeled on `java.time`.
//!
//! Each concept gets its own type: [`LocalDate`], [`LocalTime`],
//! [`LocalDateTime`], [`OffsetDateTime`], [`Duration`], [`ZoneOffset`] and
//! [`ZoneId`]. Every type has an unset value (its `Default`) that prints as
//! an empty string, binds to SQL as `NULL` and serializes to JSON as `null`.
//!
//! ```
//! use goda::{Field, LocalDate, Month, TemporalAccessor};
//!
//! let date = LocalDate::must_of(2024, Month::MARCH, 15);
//! assert_eq!(date.to_string(), "2024-03-15");
//! assert_eq!(date.get_field(Field::DayOfYear).get(), Some(75));
//! assert_eq!(date.plus_months(11)?.to_string(), "2025-02-15");
//! # Ok::<(), goda::Error>(())
//! ```

#[macro_use]
mod logging;
#[macro_use]
mod codec;
#[macro_use]
mod sql;

mod chain;
mod consts;
mod date;
mod datetime;
mod duration;
mod error;
mod field;
mod math;
mod offset;
mod offset_datetime;
mod prelude;
mod time;
mod types;
mod zone;

pub use chain::Chain;
pub use codec::TextCodec;
pub use consts::*;
pub use date::LocalDate;
pub use datetime::LocalDateTime;
pub use duration::Duration;
pub use error::{Error, ErrorKind, Result};
pub use field::{Field, TemporalAccessor, TemporalAdjuster, TemporalValue, ValueRange};
pub use offset::ZoneOffset;
pub use offset_datetime::OffsetDateTime;
pub use sql::{FromSqlValue, SqlValue, ToSqlValue};
pub use time::LocalTime;
pub use types::{DayOfWeek, Era, Month, Year};
pub use zone::ZoneId;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;

    fn round_trip<T>(value: &T)
    where
        T: TextCodec + ToSqlValue + FromSqlValue + serde::Serialize + serde::de::DeserializeOwned
            + PartialEq + Debug,
    {
        let text = value.to_string();
        assert_eq!(&T::parse_text(&text).unwrap(), value, "text {text}");
        let json = serde_json::to_string(value).unwrap();
        assert_eq!(&serde_json::from_str::<T>(&json).unwrap(), value, "json {json}");
        assert_eq!(&T::from_sql_value(&value.to_sql_value()).unwrap(), value, "sql {text}");
    }

    #[test]
    fn test_round_trips() {
        round_trip(&LocalDate::must_of(2024, Month::MARCH, 15));
        round_trip(&LocalDate::MIN);
        round_trip(&LocalDate::MAX);
        round_trip(&LocalDate::must_of(0, Month::JANUARY, 1));
        round_trip(&LocalTime::MIDNIGHT);
        round_trip(&LocalTime::must_of(14, 30, 45, 120_000));
        round_trip(&LocalTime::MAX);
        round_trip(&LocalDateTime::must_of(-333, Month::DECEMBER, 31, 23, 59, 59, 1));
        round_trip(&OffsetDateTime::of(
            LocalDateTime::must_of(2024, Month::MARCH, 15, 14, 30, 45, 0),
            ZoneOffset::must_of_hours_minutes_seconds(-9, -30, -15),
        ));
        round_trip(&Duration::ZERO);
        round_trip(&Duration::must_of_seconds(-1, 500_000_000));
        round_trip(&Duration::must_of_seconds(29_172, 345_000_000));
        round_trip(&ZoneOffset::UTC);
        round_trip(&ZoneOffset::MIN);
        round_trip(&ZoneOffset::MAX);
        round_trip(&ZoneId::of("Asia/Kolkata").unwrap());
        round_trip(&ZoneId::of("UTC+02:00").unwrap());
        round_trip(&Year::of(-4713));
    }

    #[test]
    fn test_unset_values_round_trip_as_null() {
        fn check<T>()
        where
            T: TextCodec + ToSqlValue + FromSqlValue + serde::Serialize
                + serde::de::DeserializeOwned + PartialEq + Debug,
        {
            let zero = T::default();
            assert_eq!(zero.to_string(), "");
            assert_eq!(zero.to_sql_value(), SqlValue::Null);
            assert_eq!(serde_json::to_string(&zero).unwrap(), "null");
            assert_eq!(serde_json::from_str::<T>("null").unwrap(), zero);
            assert_eq!(T::from_sql_value(&SqlValue::Null).unwrap(), zero);
        }
        check::<LocalDate>();
        check::<LocalTime>();
        check::<LocalDateTime>();
        check::<OffsetDateTime>();
        check::<ZoneId>();
        check::<Year>();
    }

    #[test]
    fn test_scenarios() {
        let date = LocalDate::must_of(2024, Month::MARCH, 15);
        assert_eq!(date.day_of_week(), DayOfWeek::FRIDAY);
        assert_eq!(date.day_of_year(), 75);
        assert_eq!(date.unix_epoch_days(), 19_797);

        let time = LocalTime::must_of(14, 30, 45, 123_456_789);
        assert_eq!(time.to_string(), "14:30:45.123456789");
        assert_eq!(time.get_field(Field::NanoOfDay).get(), Some(52_245_123_456_789));

        let duration = Duration::must_parse("PT8H6M12.345S");
        assert_eq!((duration.seconds(), duration.nanos()), (29_172, 345_000_000));
        assert_eq!(duration.to_string(), "PT8H6M12.345S");

        let duration = Duration::must_of_seconds(5, -1_500_000_000);
        assert_eq!(duration, Duration::must_of_seconds(3, 500_000_000));
        assert!(duration.is_positive());
        assert_eq!(duration.to_string(), "PT3.5S");

        let offset = ZoneOffset::must_parse("+05:30");
        assert_eq!(offset.total_seconds(), 19_800);
        assert_eq!(offset.to_string(), "+05:30");
        assert!(ZoneOffset::must_parse("Z").is_zero());
    }

    #[test]
    fn test_errors_are_prefixed() {
        let err = LocalDate::parse("2024-13-01").unwrap_err();
        assert_eq!(
            err.to_string(),
            "goda: parse \"2024-13-01\": value 13 out of range for field MonthOfYear"
        );
        assert!(Duration::parse("").unwrap_err().to_string().starts_with("goda: "));
    }
}
