//! Compute free windows in the business day.
//!
//! Sorts appointment intervals by start, merges overlapping busy periods, then
//! returns the gaps between merged periods within the configured window.

use serde::Serialize;

use crate::appointment::Appointment;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::time_range::{format_minutes, TimeInterval};

/// A gap with no appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeWindow {
    /// `HH:MM` start of the gap.
    pub start: String,
    /// `HH:MM` end of the gap.
    pub end: String,
    pub duration_minutes: u32,
}

impl FreeWindow {
    fn from_minutes(start: u32, end: u32) -> Self {
        Self {
            start: format_minutes(start),
            end: format_minutes(end),
            duration_minutes: end - start,
        }
    }
}

/// Merge overlapping or adjacent busy periods, clipped to the given window.
///
/// Returns a sorted, non-overlapping list of intervals. Malformed
/// appointments are ignored.
fn merge_busy_periods(
    appointments: &[Appointment],
    window_start: u32,
    window_end: u32,
) -> Vec<TimeInterval> {
    let mut intervals: Vec<TimeInterval> = appointments
        .iter()
        .filter_map(|a| a.interval().ok())
        .filter(|i| i.start_minute < window_end && i.end_minute > window_start)
        .map(|i| TimeInterval {
            start_minute: i.start_minute.max(window_start),
            end_minute: i.end_minute.min(window_end),
        })
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort();

    let mut merged: Vec<TimeInterval> = Vec::new();
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if interval.start_minute <= last.end_minute {
                last.end_minute = last.end_minute.max(interval.end_minute);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Free windows between the configured day start and day end.
///
/// # Errors
/// Returns `EngineError::Configuration` if `config` does not validate.
pub fn free_windows(
    appointments: &[Appointment],
    config: &EngineConfig,
) -> Result<Vec<FreeWindow>> {
    config.validate()?;
    let (window_start, window_end) = config.window();
    let merged = merge_busy_periods(appointments, window_start, window_end);

    let mut free = Vec::new();
    let mut cursor = window_start;

    for busy in &merged {
        if cursor < busy.start_minute {
            free.push(FreeWindow::from_minutes(cursor, busy.start_minute));
        }
        cursor = cursor.max(busy.end_minute);
    }

    if cursor < window_end {
        free.push(FreeWindow::from_minutes(cursor, window_end));
    }

    Ok(free)
}

/// The first free window of at least `min_duration_minutes`.
pub fn first_free_window(
    appointments: &[Appointment],
    min_duration_minutes: u32,
    config: &EngineConfig,
) -> Result<Option<FreeWindow>> {
    Ok(free_windows(appointments, config)?
        .into_iter()
        .find(|w| w.duration_minutes >= min_duration_minutes))
}
