//! Minute intervals and timeline pixel mapping.
//!
//! An appointment occupies the half-open interval `[start_minute, end_minute)`
//! measured from midnight. Back-to-back intervals never overlap.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

/// Duration assumed when an appointment has none, or a non-positive one.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A half-open `[start_minute, end_minute)` range within one day.
///
/// `end_minute` may run past midnight for late appointments; it is never
/// wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl TimeInterval {
    /// Build an interval from a start minute and a duration.
    ///
    /// A zero duration is replaced by [`DEFAULT_DURATION_MINUTES`] so the
    /// interval is never empty.
    pub fn new(start_minute: u32, duration_minutes: u32) -> Self {
        let duration = if duration_minutes == 0 {
            DEFAULT_DURATION_MINUTES
        } else {
            duration_minutes
        };
        Self {
            start_minute,
            end_minute: start_minute + duration,
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minute - self.start_minute
    }

    /// Two intervals overlap iff `a.start < b.end && a.end > b.start`.
    /// Touching endpoints do not count.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start_minute < other.end_minute && self.end_minute > other.start_minute
    }

    /// Length of the shared range, 0 when the intervals do not overlap.
    pub fn overlap_minutes(&self, other: &TimeInterval) -> u32 {
        let start = self.start_minute.max(other.start_minute);
        let end = self.end_minute.min(other.end_minute);
        end.saturating_sub(start)
    }

    /// True when the whole interval lies inside `[window_start, window_end]`.
    pub fn fits_within(&self, window_start: u32, window_end: u32) -> bool {
        self.start_minute >= window_start && self.end_minute <= window_end
    }
}

/// Where an interval lands on a fixed-height timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePosition {
    /// Distance from the top of the visible range, never negative.
    pub top: f64,
    /// Rendered height, floored at `min_content_height`.
    pub height: f64,
    /// Height derived from the true duration, without the floor.
    pub natural_height: f64,
}

/// Map an interval onto the timeline described by `config`.
pub fn timeline_position(interval: &TimeInterval, config: &EngineConfig) -> TimelinePosition {
    let visible_start = f64::from(config.day_start_hour * 60);
    let offset_minutes = f64::from(interval.start_minute) - visible_start;
    let top = (offset_minutes / 60.0 * config.pixels_per_hour).max(0.0);
    let natural_height = f64::from(interval.duration_minutes()) / 60.0 * config.pixels_per_hour;

    TimelinePosition {
        top,
        height: natural_height.max(config.min_content_height),
        natural_height,
    }
}

/// Parse a 24-hour `HH:MM` wall-clock time into minutes since midnight.
///
/// # Errors
/// Returns `EngineError::MalformedTime` if the string is not a valid time of day.
pub fn parse_time_of_day(value: &str) -> Result<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::malformed("startTime", value, "empty time"));
    }
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .map_err(|e| EngineError::malformed("startTime", value, e.to_string()))?;
    Ok(time.hour() * 60 + time.minute())
}

/// Format minutes since midnight as `HH:MM`. The end of day formats as `24:00`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
