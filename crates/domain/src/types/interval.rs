//! Half-open time intervals

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ConveneError, Result};

/// A `[start, end)` interval with `start < end` enforced at construction.
///
/// Deserialization goes through the same check, so an interval received from
/// the API can never be empty or inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    #[serde(rename = "startTime")]
    start: DateTime<Utc>,
    #[serde(rename = "endTime")]
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInterval {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = ConveneError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        Self::new(raw.start_time, raw.end_time)
    }
}

impl TimeInterval {
    /// Build an interval, rejecting zero or negative durations.
    ///
    /// # Errors
    /// Returns `ConveneError::Validation` when `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(ConveneError::Validation(format!(
                "meeting must end after it starts (start {}, end {})",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Build an interval from a start instant and a length.
    ///
    /// # Errors
    /// Returns `ConveneError::Validation` when `length` is not positive or
    /// the end falls outside the representable range.
    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> Result<Self> {
        let end = start.checked_add_signed(length).ok_or_else(|| {
            ConveneError::Validation(format!(
                "meeting length of {} minutes is out of range",
                length.num_minutes()
            ))
        })?;
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Exclusive-boundary overlap: `a.start < b.end && b.start < a.end`.
    ///
    /// Intervals that merely touch (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}
