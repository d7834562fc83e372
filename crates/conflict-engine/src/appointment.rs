//! Appointment input model.
//!
//! Appointments are owned by the caller and treated as read-only. The engine
//! only derives intervals from them; the one "mutation" it offers,
//! [`Appointment::rescheduled`], returns a new value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::time_range::{
    parse_time_of_day, TimeInterval, DEFAULT_DURATION_MINUTES, MINUTES_PER_DAY,
};

/// Lifecycle state of an appointment. Only affects rendering color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    InProgress,
    Complete,
    /// A status this engine does not know. Kept so the rest of the record
    /// still loads.
    #[serde(other)]
    Unknown,
}

/// Duration as it arrives from the datastore: a number, or a numeric string.
///
/// Anything else (fractions, booleans, objects) lands in `Other` so that one
/// bad record fails on its own in [`RawDuration::minutes`] rather than
/// failing deserialization of the whole day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Minutes(i64),
    Text(String),
    Other(serde_json::Value),
}

impl From<u32> for RawDuration {
    fn from(minutes: u32) -> Self {
        RawDuration::Minutes(i64::from(minutes))
    }
}

impl RawDuration {
    /// Resolve to whole minutes. Non-positive values fall back to the default.
    ///
    /// # Errors
    /// Returns `EngineError::MalformedTime` for non-numeric text, a value that
    /// is not a whole number, or a duration longer than one day.
    pub fn minutes(&self) -> Result<u32> {
        let minutes = match self {
            RawDuration::Minutes(m) => *m,
            RawDuration::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(DEFAULT_DURATION_MINUTES);
                }
                trimmed.parse::<i64>().map_err(|e| {
                    EngineError::malformed("durationMinutes", text.as_str(), e.to_string())
                })?
            }
            RawDuration::Other(value) => {
                return Err(EngineError::malformed(
                    "durationMinutes",
                    value.to_string(),
                    "expected a whole number of minutes",
                ));
            }
        };

        if minutes <= 0 {
            return Ok(DEFAULT_DURATION_MINUTES);
        }
        if minutes > i64::from(MINUTES_PER_DAY) {
            return Err(EngineError::malformed(
                "durationMinutes",
                minutes.to_string(),
                "longer than one day",
            ));
        }
        Ok(minutes as u32)
    }
}

/// A single booked appointment on the business calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Opaque identifier, stable across calls. Also the secondary sort key.
    pub id: String,
    pub date: NaiveDate,
    /// Wall-clock `HH:MM`, 24-hour.
    pub start_time: String,
    #[serde(
        default,
        rename = "durationMinutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<RawDuration>,
    #[serde(default)]
    pub status: AppointmentStatus,
}

impl Appointment {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        start_time: impl Into<String>,
        duration_minutes: Option<u32>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            start_time: start_time.into(),
            duration: duration_minutes.map(RawDuration::from),
            status: AppointmentStatus::default(),
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn duration_minutes(&self) -> Result<u32> {
        match &self.duration {
            Some(raw) => raw.minutes(),
            None => Ok(DEFAULT_DURATION_MINUTES),
        }
    }

    /// The half-open minute interval this appointment occupies.
    ///
    /// # Errors
    /// Returns `EngineError::MalformedTime` if the start time or duration
    /// cannot be parsed.
    pub fn interval(&self) -> Result<TimeInterval> {
        let start = parse_time_of_day(&self.start_time)?;
        let duration = self.duration_minutes()?;
        Ok(TimeInterval::new(start, duration))
    }

    /// A copy moved to `new_start`, keeping id, date, duration and status.
    ///
    /// # Errors
    /// Returns `EngineError::MalformedTime` if `new_start` is not `HH:MM`.
    pub fn rescheduled(&self, new_start: &str) -> Result<Appointment> {
        parse_time_of_day(new_start)?;
        Ok(Appointment {
            start_time: new_start.trim().to_string(),
            ..self.clone()
        })
    }
}

/// An appointment paired with its successfully parsed interval.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scheduled<'a> {
    pub appointment: &'a Appointment,
    pub interval: TimeInterval,
}

impl<'a> Scheduled<'a> {
    /// Total order used everywhere: start minute, then id.
    pub fn order_key(&self) -> (u32, &'a str) {
        (self.interval.start_minute, self.appointment.id.as_str())
    }

    /// Same appointment, judged by id.
    pub fn is_same(&self, other: &Appointment) -> bool {
        self.appointment.id == other.id
    }
}

/// An appointment left out of the engine's output, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedAppointment {
    pub appointment_id: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: EngineError,
}

fn serialize_display<S: serde::Serializer>(
    error: &EngineError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Split a day into parsable appointments and rejected ones.
///
/// Rejections are logged at `warn` level so a caller with a subscriber sees
/// them even if it ignores the returned list.
pub(crate) fn partition_day(
    appointments: &[Appointment],
) -> (Vec<Scheduled<'_>>, Vec<RejectedAppointment>) {
    let mut scheduled = Vec::with_capacity(appointments.len());
    let mut rejected = Vec::new();

    for appointment in appointments {
        match appointment.interval() {
            Ok(interval) => scheduled.push(Scheduled {
                appointment,
                interval,
            }),
            Err(error) => {
                tracing::warn!(
                    appointment_id = %appointment.id,
                    %error,
                    "excluding appointment with malformed time"
                );
                rejected.push(RejectedAppointment {
                    appointment_id: appointment.id.clone(),
                    error,
                });
            }
        }
    }

    (scheduled, rejected)
}
