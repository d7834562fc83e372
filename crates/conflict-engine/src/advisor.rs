//! Reschedule suggestions and slot availability.
//!
//! Both operations are pure: they take the full appointment set as input and
//! keep nothing between calls. After the caller applies a reschedule it simply
//! runs the engine again on the updated set.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::appointment::Appointment;
use crate::config::{validate_granularity, EngineConfig};
use crate::conflict::conflict_group;
use crate::error::{EngineError, Result};
use crate::time_range::{format_minutes, parse_time_of_day, TimeInterval};

/// An `HH:MM` start time that resolves a conflict.
pub type CandidateTime = String;

/// Offsets, in minutes, applied to each involved appointment's start.
const CANDIDATE_OFFSETS: [i64; 3] = [-60, 60, 120];

/// One fixed-width probe slot of the business day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAvailability {
    pub start: String,
    pub end: String,
    pub available: bool,
}

/// Suggest alternative start times for `conflicted`.
///
/// For the conflicted appointment and each peer, candidates are one hour
/// before its start, one hour after and two hours after. A candidate is kept
/// when the conflicted appointment's duration fits inside the business window
/// from there and it overlaps no peer. The result is sorted and deduplicated.
/// If nothing survives, the configured fallback times are returned instead.
///
/// # Errors
/// Returns `EngineError::Configuration` if `config` is invalid, or
/// `EngineError::MalformedTime` if `conflicted` itself cannot be parsed.
/// Malformed peers are ignored.
pub fn suggest_times(
    conflicted: &Appointment,
    peers: &[Appointment],
    config: &EngineConfig,
) -> Result<Vec<CandidateTime>> {
    let peer_intervals = intervals_excluding(conflicted, peers.iter());
    suggest_avoiding(conflicted, &peer_intervals, &peer_intervals, config)
}

/// [`suggest_times`] for an appointment within its whole day.
///
/// Candidates are derived from `appointment`'s conflict group, but must also
/// stay clear of every other appointment in `day`, so a suggestion never
/// trades one conflict for another. Entries of `day` on other dates are
/// ignored for both.
pub fn suggest_times_for(
    appointment: &Appointment,
    day: &[Appointment],
    config: &EngineConfig,
) -> Result<Vec<CandidateTime>> {
    let same_date = |other: &&Appointment| other.date == appointment.date;
    let group = intervals_excluding(
        appointment,
        conflict_group(appointment, day).into_iter().filter(same_date),
    );
    let blockers = intervals_excluding(appointment, day.iter().filter(same_date));
    suggest_avoiding(appointment, &group, &blockers, config)
}

/// Parsed intervals of `appointments`, minus `subject` and malformed entries.
fn intervals_excluding<'a>(
    subject: &Appointment,
    appointments: impl Iterator<Item = &'a Appointment>,
) -> Vec<TimeInterval> {
    appointments
        .filter(|other| other.id != subject.id)
        .filter_map(|other| other.interval().ok())
        .collect()
}

fn suggest_avoiding(
    conflicted: &Appointment,
    sources: &[TimeInterval],
    blockers: &[TimeInterval],
    config: &EngineConfig,
) -> Result<Vec<CandidateTime>> {
    config.validate()?;
    let subject = conflicted.interval()?;
    let duration = subject.duration_minutes();
    let (window_start, window_end) = config.window();

    let mut candidates = BTreeSet::new();

    for source in std::iter::once(&subject).chain(sources) {
        for offset in CANDIDATE_OFFSETS {
            let start = i64::from(source.start_minute) + offset;
            let Ok(start) = u32::try_from(start) else {
                continue;
            };
            let candidate = TimeInterval::new(start, duration);
            if !candidate.fits_within(window_start, window_end) {
                continue;
            }
            if blockers.iter().any(|b| b.overlaps(&candidate)) {
                continue;
            }
            candidates.insert(start);
        }
    }

    if candidates.is_empty() {
        tracing::debug!(
            appointment_id = %conflicted.id,
            "no derived candidates fit the window, using fallback times"
        );
        for time in &config.fallback_times {
            candidates.insert(parse_time_of_day(time)?);
        }
    }

    tracing::debug!(
        appointment_id = %conflicted.id,
        candidates = candidates.len(),
        "suggested reschedule times"
    );

    Ok(candidates.into_iter().map(format_minutes).collect())
}

/// Every `granularity_minutes`-wide slot of the business day on `date`,
/// flagged available when it overlaps no existing appointment.
///
/// `date` is `YYYY-MM-DD`; appointments on other dates are ignored, as are
/// malformed ones.
///
/// # Errors
/// Returns `EngineError::Configuration` for an unparsable date, a granularity
/// that is zero or does not divide 60, or an invalid `config`.
pub fn list_available_slots(
    date: &str,
    existing: &[Appointment],
    granularity_minutes: u32,
    config: &EngineConfig,
) -> Result<Vec<SlotAvailability>> {
    validate_granularity(granularity_minutes)?;
    config.validate()?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| EngineError::Configuration(format!("invalid date '{}': {}", date, e)))?;

    let busy: Vec<TimeInterval> = existing
        .iter()
        .filter(|a| a.date == date)
        .filter_map(|a| a.interval().ok())
        .collect();

    let (window_start, window_end) = config.window();
    let mut slots = Vec::new();
    let mut cursor = window_start;

    while cursor + granularity_minutes <= window_end {
        let probe = TimeInterval::new(cursor, granularity_minutes);
        slots.push(SlotAvailability {
            start: format_minutes(probe.start_minute),
            end: format_minutes(probe.end_minute),
            available: !busy.iter().any(|b| b.overlaps(&probe)),
        });
        cursor += granularity_minutes;
    }

    Ok(slots)
}
