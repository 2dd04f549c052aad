//! Poll timestamps.

use std::fmt;

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// The UTC minute a poll was taken in.
///
/// Its label (`YYYY-MM-DD HH:MM UTC`) is the column header in the
/// history table, so two polls in the same minute share a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PollTimestamp(DateTime<Utc>);

impl PollTimestamp {
    /// The current minute.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Truncate a datetime to the minute.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        let minute = at.duration_trunc(TimeDelta::minutes(1)).unwrap_or(at);
        Self(minute)
    }

    /// The underlying (minute-aligned) datetime.
    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Column label, e.g. `2021-03-26 09:00 UTC`.
    pub fn label(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M UTC").to_string()
    }
}

impl fmt::Display for PollTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
