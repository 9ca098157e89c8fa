//! Time-zone identifiers.
//!
//! A [`ZoneId`] is either a fixed offset (`Z`, `+05:30`, `UTC`, `GMT-03`)
//! or an IANA region (`Europe/Paris`) resolved through the bundled zone
//! database. Resolved regions are kept in a process-wide cache, so each
//! identifier is loaded at most once.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use jiff::tz::TimeZone;
use rustc_hash::FxHashMap;

use crate::codec::TextCodec;
use crate::datetime::LocalDateTime;
use crate::error::{Error, Result};
use crate::offset::ZoneOffset;
use crate::offset_datetime::OffsetDateTime;

static LOCATIONS: LazyLock<RwLock<FxHashMap<Box<str>, TimeZone>>> =
    LazyLock::new(|| RwLock::new(FxHashMap::default()));

/// Looks up an IANA zone, consulting the cache first. When two threads race
/// on the same identifier, the first one to store it wins.
fn load_location(id: &str) -> Result<TimeZone> {
    {
        let cache = LOCATIONS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(tz) = cache.get(id) {
            trace!("time zone cache hit for {id}");
            return Ok(tz.clone());
        }
    }

    debug!("loading time zone {id}");
    let tz = TimeZone::get(id).map_err(|err| {
        warn!("failed to load time zone {id}: {err}");
        Error::zone(err)
    })?;

    let mut cache = LOCATIONS.write().unwrap_or_else(PoisonError::into_inner);
    Ok(cache.entry(id.into()).or_insert(tz).clone())
}

/// Prefixes that may precede a fixed offset, longest first.
const OFFSET_PREFIXES: [&str; 3] = ["UTC", "GMT", "UT"];

#[derive(Clone, Default)]
enum Repr {
    #[default]
    Unset,
    Fixed {
        id: Arc<str>,
        offset: ZoneOffset,
    },
    Region {
        id: Arc<str>,
        tz: TimeZone,
    },
}

/// A time-zone identifier.
///
/// Two identifiers are equal when their text is equal; `UTC` and `Z` are
/// different identifiers for the same rules. The default value is the
/// unset zone, which behaves as UTC when asked for offsets.
#[derive(Clone, Default)]
pub struct ZoneId(Repr);

impl ZoneId {
    /// Parses a zone identifier and resolves it.
    ///
    /// # Errors
    /// `EmptyInput`, `BadFormat` for malformed identifiers, `Zone` for
    /// regions the database does not know.
    pub fn of(id: &str) -> Result<Self> {
        Self::parse(id)
    }

    /// The `UTC` zone.
    pub fn utc() -> Self {
        Self(Repr::Fixed {
            id: Arc::from("UTC"),
            offset: ZoneOffset::UTC,
        })
    }

    /// A zone that always uses `offset`; its identifier is the offset text.
    pub fn of_offset(offset: ZoneOffset) -> Self {
        Self(Repr::Fixed {
            id: Arc::from(offset.to_string()),
            offset,
        })
    }

    /// The zone the host is configured with.
    ///
    /// # Errors
    /// `Zone` if the host zone cannot be determined or has no IANA name.
    pub fn system() -> Result<Self> {
        let tz = TimeZone::try_system().map_err(Error::zone)?;
        let Some(name) = tz.iana_name() else {
            return Err(Error::zone("system time zone has no IANA name"));
        };
        let id = Arc::from(name);
        Ok(Self(Repr::Region { id, tz }))
    }

    /// The identifier text; empty for the unset zone.
    pub fn id(&self) -> &str {
        match &self.0 {
            Repr::Unset => "",
            Repr::Fixed { id, .. } | Repr::Region { id, .. } => id,
        }
    }

    pub const fn is_zero(&self) -> bool {
        matches!(self.0, Repr::Unset)
    }

    /// Whether this zone never changes its offset.
    pub const fn is_fixed_offset(&self) -> bool {
        !matches!(self.0, Repr::Region { .. })
    }

    /// The constant offset of a fixed zone.
    pub const fn fixed_offset(&self) -> Option<ZoneOffset> {
        match &self.0 {
            Repr::Unset => Some(ZoneOffset::UTC),
            Repr::Fixed { offset, .. } => Some(*offset),
            Repr::Region { .. } => None,
        }
    }

    /// The rules of this zone as a jiff time zone.
    pub fn to_time_zone(&self) -> TimeZone {
        match &self.0 {
            Repr::Unset => TimeZone::UTC,
            Repr::Fixed { offset, .. } => TimeZone::fixed((*offset).into()),
            Repr::Region { tz, .. } => tz.clone(),
        }
    }

    /// The offset in effect at `instant`.
    ///
    /// # Errors
    /// `OutOfRange` if the instant is outside the years the zone database
    /// supports.
    pub fn offset_at(&self, instant: OffsetDateTime) -> Result<ZoneOffset> {
        match &self.0 {
            Repr::Region { tz, .. } => {
                let timestamp = jiff::Timestamp::try_from(instant)?;
                ZoneOffset::try_from(tz.to_offset(timestamp))
            }
            _ => Ok(self.fixed_offset().unwrap_or_default()),
        }
    }

    /// The offset a local date-time receives in this zone. Times in a gap
    /// take the offset after the transition; times in an overlap take the
    /// earlier offset.
    ///
    /// # Errors
    /// See [`ZoneId::resolve_local`].
    pub fn offset_for_local(&self, datetime: LocalDateTime) -> Result<ZoneOffset> {
        Ok(self.resolve_local(datetime)?.offset())
    }

    /// Places a local date-time in this zone. A time skipped by a gap moves
    /// forward by the length of the gap; an ambiguous time takes the
    /// earlier offset.
    ///
    /// # Errors
    /// `OutOfRange` if the date-time is outside the years the zone database
    /// supports, or `Zone` if the database cannot resolve it.
    pub fn resolve_local(&self, datetime: LocalDateTime) -> Result<OffsetDateTime> {
        if datetime.is_zero() {
            return Ok(OffsetDateTime::default());
        }
        match &self.0 {
            Repr::Region { tz, .. } => {
                let civil = jiff::civil::DateTime::try_from(datetime)?;
                let zoned = tz.to_zoned(civil).map_err(Error::zone)?;
                OffsetDateTime::try_from(&zoned)
            }
            _ => Ok(OffsetDateTime::of(
                datetime,
                self.fixed_offset().unwrap_or_default(),
            )),
        }
    }

    /// The current moment in this zone.
    pub(crate) fn now_zoned(&self) -> jiff::Zoned {
        jiff::Timestamp::now().to_zoned(self.to_time_zone())
    }

    fn parse_fixed(text: &str) -> Result<Option<Self>> {
        if text == "Z" || text.starts_with(['+', '-']) {
            return ZoneOffset::decode_text(text).map(|offset| Some(Self::of_offset(offset)));
        }
        for prefix in OFFSET_PREFIXES {
            let Some(rest) = text.strip_prefix(prefix) else {
                continue;
            };
            if rest.is_empty() {
                return Ok(Some(Self(Repr::Fixed {
                    id: Arc::from(prefix),
                    offset: ZoneOffset::UTC,
                })));
            }
            if !rest.starts_with(['+', '-']) {
                continue;
            }
            let offset = ZoneOffset::decode_text(rest)?;
            let id = if offset.is_zero() {
                Arc::from(prefix)
            } else {
                Arc::from(format!("{prefix}{offset}"))
            };
            return Ok(Some(Self(Repr::Fixed { id, offset })));
        }
        Ok(None)
    }
}

/// `[A-Za-z][A-Za-z0-9~/._+-]+`
fn is_region_id(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || b"~/._+-".contains(b))
}

impl PartialEq for ZoneId {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ZoneId {}

impl Hash for ZoneId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl Ord for ZoneId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id().cmp(other.id())
    }
}

impl PartialOrd for ZoneId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ZoneId").field(&self.id()).finish()
    }
}

impl TextCodec for ZoneId {
    const TYPE_NAME: &'static str = "ZoneId";

    fn is_zero(&self) -> bool {
        Self::is_zero(self)
    }

    fn append_text<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str(self.id())
    }

    fn decode_text(text: &str) -> Result<Self> {
        if let Some(fixed) = Self::parse_fixed(text)? {
            return Ok(fixed);
        }
        if !is_region_id(text) {
            return Err(Error::bad_format());
        }
        let tz = load_location(text)?;
        Ok(Self(Repr::Region {
            id: Arc::from(text),
            tz,
        }))
    }
}

impl_text_codec!(ZoneId);
impl_sql!(ZoneId);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::sql::{FromSqlValue, SqlValue, ToSqlValue};
    use crate::types::Month;

    fn local(year: i64, month: Month, day: u8, hour: u8, minute: u8) -> LocalDateTime {
        LocalDateTime::must_of(year, month, day, hour, minute, 0, 0)
    }

    #[test]
    fn test_region() {
        let paris = ZoneId::of("Europe/Paris").unwrap();
        assert_eq!(paris.id(), "Europe/Paris");
        assert_eq!(paris.to_string(), "Europe/Paris");
        assert!(!paris.is_fixed_offset());
        assert_eq!(paris.fixed_offset(), None);
        assert_eq!(paris.to_time_zone().iana_name(), Some("Europe/Paris"));
        assert_eq!(ZoneId::of("Europe/Paris").unwrap(), paris);
    }

    #[test]
    fn test_fixed_forms() {
        struct TestCase {
            text: &'static str,
            id: &'static str,
            seconds: i32,
        }

        let cases = [
            TestCase {
                text: "Z",
                id: "Z",
                seconds: 0,
            },
            TestCase {
                text: "+05:30",
                id: "+05:30",
                seconds: 19_800,
            },
            TestCase {
                text: "-0800",
                id: "-08:00",
                seconds: -28_800,
            },
            TestCase {
                text: "UTC",
                id: "UTC",
                seconds: 0,
            },
            TestCase {
                text: "GMT",
                id: "GMT",
                seconds: 0,
            },
            TestCase {
                text: "UT",
                id: "UT",
                seconds: 0,
            },
            TestCase {
                text: "UTC+1",
                id: "UTC+01:00",
                seconds: 3_600,
            },
            TestCase {
                text: "GMT-03:30",
                id: "GMT-03:30",
                seconds: -12_600,
            },
            TestCase {
                text: "UT+00",
                id: "UT",
                seconds: 0,
            },
        ];

        for case in &cases {
            let zone = ZoneId::of(case.text).unwrap();
            assert!(zone.is_fixed_offset(), "{}", case.text);
            assert_eq!(zone.id(), case.id);
            assert_eq!(zone.fixed_offset().map(ZoneOffset::total_seconds), Some(case.seconds));
        }
    }

    #[test]
    fn test_errors() {
        assert_eq!(ZoneId::of("").unwrap_err().kind(), &ErrorKind::EmptyInput);
        for text in ["1abc", "Europe Paris", "E", "+25:00x", "UTC+"] {
            assert!(ZoneId::of(text).is_err(), "{text}");
        }
        assert_eq!(ZoneId::of("Europe Paris").unwrap_err().kind(), &ErrorKind::BadFormat);
        let err = ZoneId::of("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Zone(_)));
        assert_eq!(err.input(), Some("Mars/Olympus_Mons"));
    }

    #[test]
    fn test_offset_for_local() {
        let paris = ZoneId::of("Europe/Paris").unwrap();
        let winter = paris.offset_for_local(local(2024, Month::JANUARY, 15, 12, 0)).unwrap();
        assert_eq!(winter.total_seconds(), 3_600);
        let summer = paris.offset_for_local(local(2024, Month::JULY, 15, 12, 0)).unwrap();
        assert_eq!(summer.total_seconds(), 7_200);
    }

    #[test]
    fn test_resolve_gap_and_overlap() {
        let paris = ZoneId::of("Europe/Paris").unwrap();

        let gap = paris.resolve_local(local(2024, Month::MARCH, 31, 2, 30)).unwrap();
        assert_eq!(gap.to_string(), "2024-03-31T03:30:00+02:00");

        let overlap = paris.resolve_local(local(2024, Month::OCTOBER, 27, 2, 30)).unwrap();
        assert_eq!(overlap.to_string(), "2024-10-27T02:30:00+02:00");
    }

    #[test]
    fn test_offset_at() {
        let new_york = ZoneId::of("America/New_York").unwrap();
        let instant = OffsetDateTime::must_parse("2024-07-04T12:00:00Z");
        assert_eq!(new_york.offset_at(instant).unwrap().total_seconds(), -4 * 3600);
        let fixed = ZoneId::of("+03:00").unwrap();
        assert_eq!(fixed.offset_at(instant).unwrap().total_seconds(), 3 * 3600);
        assert!(ZoneId::default().offset_at(instant).unwrap().is_zero());
    }

    #[test]
    fn test_equality_by_id() {
        assert_ne!(ZoneId::of("UTC").unwrap(), ZoneId::of("Z").unwrap());
        assert_eq!(ZoneId::utc(), ZoneId::of("UTC").unwrap());
        assert!(ZoneId::default() < ZoneId::utc());
        assert_eq!(
            ZoneId::of_offset(ZoneOffset::of_hours(2).unwrap()),
            ZoneId::of("+02:00").unwrap()
        );
    }

    #[test]
    fn test_cache_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| ZoneId::of("Asia/Kolkata").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().id(), "Asia/Kolkata");
        }
        let cache = LOCATIONS.read().unwrap();
        assert!(cache.contains_key("Asia/Kolkata"));
    }

    #[test]
    fn test_json_and_sql() {
        let zone = ZoneId::of("Asia/Tokyo").unwrap();
        let json = serde_json::to_string(&zone).unwrap();
        assert_eq!(json, "\"Asia/Tokyo\"");
        assert_eq!(serde_json::from_str::<ZoneId>(&json).unwrap(), zone);
        assert!(serde_json::from_str::<ZoneId>("\"\"").unwrap().is_zero());
        assert!(serde_json::from_str::<ZoneId>("null").unwrap().is_zero());
        assert_eq!(serde_json::to_string(&ZoneId::default()).unwrap(), "null");

        assert_eq!(zone.to_sql_value(), SqlValue::Text("Asia/Tokyo".to_owned()));
        assert_eq!(ZoneId::from_sql_value(&zone.to_sql_value()).unwrap(), zone);
        assert_eq!(ZoneId::default().to_sql_value(), SqlValue::Null);
    }
}
