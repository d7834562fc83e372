//! # conflict-engine
//!
//! Deterministic calendar conflict engine for a single business day.
//!
//! Given the appointments of one day, the engine detects which of them overlap,
//! lays them out in non-colliding columns for a fixed-height timeline, decides
//! which side of each overlap shows the warning, and suggests alternative start
//! times that would resolve a conflict. Every operation is a pure function of
//! its inputs; the caller owns the appointment set and re-runs the engine after
//! each change.
//!
//! ## Modules
//!
//! - [`appointment`] — Appointment input model and reschedule helper
//! - [`time_range`] — `HH:MM` parsing, half-open minute intervals, pixel mapping
//! - [`layout`] — Greedy column sweep producing rendering coordinates
//! - [`conflict`] — Pairwise overlap detection and warning ownership
//! - [`advisor`] — Candidate reschedule times and slot availability grids
//! - [`freebusy`] — Free windows inside the business day
//! - [`config`] — Caller-supplied engine configuration
//! - [`error`] — Error types

pub mod advisor;
pub mod appointment;
pub mod config;
pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod layout;
pub mod time_range;

pub use advisor::{
    list_available_slots, suggest_times, suggest_times_for, CandidateTime, SlotAvailability,
};
pub use appointment::{Appointment, AppointmentStatus, RawDuration, RejectedAppointment};
pub use config::EngineConfig;
pub use conflict::{
    conflict_group, find_conflicts, is_conflicted, should_show_conflict_warning, Conflict,
};
pub use error::EngineError;
pub use freebusy::{first_free_window, free_windows, FreeWindow};
pub use layout::{compute_day_layout, DayLayout, LayoutAssignment};
pub use time_range::{
    format_minutes, parse_time_of_day, timeline_position, TimeInterval, TimelinePosition,
};
