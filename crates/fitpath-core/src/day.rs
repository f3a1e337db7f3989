//! Day-boundary policy.
//!
//! Plans expire when the calendar day changes and food logs are filtered by
//! calendar day. Both decisions go through a [`Clock`] and compare
//! [`DayKey`]s (ISO `YYYY-MM-DD`) computed in the clock's timezone, never
//! raw timestamps. Day bounds are resolved per date, so days that gain or
//! lose an hour to a DST change are 25 or 23 hours long.

use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current time, carrying the offset used for calendar-day decisions.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Today's day key.
    fn today(&self) -> DayKey {
        DayKey::from(self.now().date_naive())
    }

    /// Current time as Unix epoch milliseconds.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// The local-time bounds of `date`. The default uses the offset of
    /// [`Clock::now`], which is exact for fixed-offset clocks.
    fn bounds_of(&self, date: NaiveDate) -> DayBounds {
        DayBounds::for_date(date, *self.now().offset())
    }
}

/// The system clock in the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }

    fn bounds_of(&self, date: NaiveDate) -> DayBounds {
        DayBounds::in_zone(date, &Local)
    }
}

/// A settable clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Parse an RFC 3339 timestamp, e.g. `2025-03-10T08:00:00+08:00`.
    pub fn at(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self::new(DateTime::parse_from_rfc3339(rfc3339)?))
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.write().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.write().unwrap_or_else(|e| e.into_inner());
        *guard = *guard + by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// DayKey
// ---------------------------------------------------------------------------

/// A normalized calendar day, stored as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Self)
    }
}

// ---------------------------------------------------------------------------
// DayBounds
// ---------------------------------------------------------------------------

/// Inclusive epoch-millisecond bounds of one calendar day:
/// `[00:00:00.000, 23:59:59.999]` local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl DayBounds {
    pub fn for_date(date: NaiveDate, offset: FixedOffset) -> Self {
        Self::in_zone(date, &offset)
    }

    /// From local midnight of `date` up to one millisecond before local
    /// midnight of the next day, both resolved in `tz`.
    pub fn in_zone<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let start_ms = start_of_day_ms(date, tz);
        let end_ms = match date.succ_opt() {
            Some(next) => start_of_day_ms(next, tz) - 1,
            None => start_ms + MILLIS_PER_DAY - 1,
        };
        Self { start_ms, end_ms }
    }

    pub fn contains(&self, timestamp_ms: i64) -> bool {
        (self.start_ms..=self.end_ms).contains(&timestamp_ms)
    }
}

/// First instant of `date` in `tz`. Where a DST gap swallows midnight the
/// day starts at the first local minute that exists.
fn start_of_day_ms<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=180)
        .find_map(|minutes| {
            tz.from_local_datetime(&(midnight + Duration::minutes(minutes)))
                .earliest()
        })
        .map(|start| start.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}
