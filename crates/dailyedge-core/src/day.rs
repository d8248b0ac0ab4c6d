//! Calendar-day keys and the clock abstraction.
//!
//! Everything that needs "today" or "now" goes through [`Clock`], so the
//! rollover and timer rules can be driven deterministically in tests.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, ValidationError};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, `YYYY-MM-DD`, with no time-of-day component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDayKey {
                input: s.to_string(),
            })
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Source of the current calendar day and of monotonic instants.
pub trait Clock {
    /// Today's key in the clock's timezone.
    fn today(&self) -> DayKey;

    /// A monotonic instant used for elapsed-time deltas.
    fn now(&self) -> Instant;
}

/// Wall clock backed by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    tz: Option<Tz>,
}

impl SystemClock {
    /// Clock reporting days in the machine's local timezone.
    pub fn local() -> Self {
        Self { tz: None }
    }

    /// Clock for a configured timezone: `local`, `utc`, or an IANA name.
    pub fn with_timezone(name: &str) -> Result<Self, ConfigError> {
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Self::local());
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Self {
                tz: Some(chrono_tz::UTC),
            });
        }
        Tz::from_str(trimmed)
            .map(|tz| Self { tz: Some(tz) })
            .map_err(|_| ConfigError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }
}

impl Clock for SystemClock {
    fn today(&self) -> DayKey {
        match self.tz {
            None => DayKey(Local::now().date_naive()),
            Some(tz) => DayKey(Utc::now().with_timezone(&tz).date_naive()),
        }
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock for tests and simulations.
///
/// `now()` starts at the instant of construction and only moves when
/// [`advance`](Self::advance) or [`rewind`](Self::rewind) is called.
#[derive(Debug)]
pub struct ManualClock {
    today: Cell<DayKey>,
    origin: Instant,
    offset: Cell<Duration>,
}

impl ManualClock {
    pub fn new(today: DayKey) -> Self {
        Self {
            today: Cell::new(today),
            origin: Instant::now(),
            // Room to rewind without underflowing the origin.
            offset: Cell::new(Duration::from_secs(3600)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get().saturating_add(by));
    }

    /// Move the monotonic reading backwards, simulating a clock anomaly.
    pub fn rewind(&self, by: Duration) {
        self.offset.set(self.offset.get().saturating_sub(by));
    }

    pub fn set_today(&self, today: DayKey) {
        self.today.set(today);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> DayKey {
        self.today.get()
    }

    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> DayKey {
        (**self).today()
    }

    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    #[test]
    fn day_key_roundtrips_through_text() {
        let key = day("2024-03-09");
        assert_eq!(key.to_string(), "2024-03-09");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-03-09\"");
        let back: DayKey = serde_json::from_str("\"2024-03-09\"").unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn day_key_rejects_timestamps() {
        assert!("2024-03-09T10:00:00Z".parse::<DayKey>().is_err());
        assert!("yesterday".parse::<DayKey>().is_err());
    }

    #[test]
    fn timezone_parsing() {
        assert!(SystemClock::with_timezone("local").is_ok());
        assert!(SystemClock::with_timezone("UTC").is_ok());
        assert!(SystemClock::with_timezone("Asia/Tokyo").is_ok());
        assert!(matches!(
            SystemClock::with_timezone("Mars/Olympus"),
            Err(ConfigError::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(day("2024-01-01"));
        let t0 = clock.now();
        assert_eq!(clock.now(), t0);
        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.now() - t0, Duration::from_secs(5));
        clock.rewind(Duration::from_secs(2));
        assert_eq!(clock.now() - t0, Duration::from_secs(3));
        clock.set_today(day("2024-01-02"));
        assert_eq!(clock.today(), day("2024-01-02"));
    }
}
