//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 timestamp. Mostly useful for fixed clocks in tests.
    pub fn parse_rfc3339(s: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc)))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by adding whole calendar months.
    ///
    /// Day-of-month is preserved where possible and clamped to the last day
    /// of shorter months (Jan 31 + 1 month = Feb 28/29).
    pub fn add_calendar_months(&self, months: u32) -> Self {
        // checked_add_months only fails past year ~262143; saturate instead
        // of propagating an error nobody can handle.
        Self(self.0.checked_add_months(Months::new(months)).unwrap_or(DateTime::<Utc>::MAX_UTC))
    }

    /// Calendar month of this timestamp, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Two-digit year (year mod 100), as printed on payment cards.
    pub fn two_digit_year(&self) -> u32 {
        (self.0.year().rem_euclid(100)) as u32
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
