use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Event time in whole seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTimestamp(i64);

impl EventTimestamp {
    /// Reads the wall clock, truncating to whole seconds.
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Builds a timestamp from seconds since the epoch.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Seconds since the epoch.
    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// Converts to a UTC date-time, if the value is in chrono's range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.0, 0).single()
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for EventTimestamp {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.timestamp())
    }
}
