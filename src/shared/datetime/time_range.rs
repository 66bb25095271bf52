use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::errors::TimeRangeError;

/// Half-open `[from, to)` window a logs volume query covers. `from <= to`
/// holds for every value, deserialized ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeParts")]
pub struct TimeRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RangeParts {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl TryFrom<RangeParts> for TimeRange {
    type Error = TimeRangeError;

    fn try_from(parts: RangeParts) -> Result<Self, Self::Error> {
        TimeRange::new(parts.from, parts.to)
    }
}

/// The range as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteRange {
    pub from: i64,
    pub to: i64,
}

impl TimeRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, TimeRangeError> {
        if from > to {
            return Err(TimeRangeError::Inverted {
                from: from.timestamp_millis(),
                to: to.timestamp_millis(),
            });
        }
        Ok(Self { from, to })
    }

    pub fn from_millis(from: i64, to: i64) -> Result<Self, TimeRangeError> {
        let from_dt =
            DateTime::from_timestamp_millis(from).ok_or(TimeRangeError::OutOfRange(from))?;
        let to_dt = DateTime::from_timestamp_millis(to).ok_or(TimeRangeError::OutOfRange(to))?;
        Self::new(from_dt, to_dt)
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    pub fn span_ms(&self) -> u64 {
        (self.to - self.from).num_milliseconds() as u64
    }

    pub fn absolute(&self) -> AbsoluteRange {
        AbsoluteRange {
            from: self.from.timestamp_millis(),
            to: self.to.timestamp_millis(),
        }
    }

    pub fn contains_millis(&self, ts: i64) -> bool {
        let abs = self.absolute();
        ts >= abs.from && ts < abs.to
    }
}
