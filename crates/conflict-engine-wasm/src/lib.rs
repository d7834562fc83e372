//! WASM bindings for conflict-engine.
//!
//! Exposes day layout, conflict detection, reschedule suggestions, slot
//! availability and free windows to the JavaScript client via `wasm-bindgen`.
//! All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p conflict-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/conflict_engine_wasm.wasm
//! ```

use conflict_engine::{Appointment, EngineConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictDto<'a> {
    owner_id: &'a str,
    other_id: &'a str,
    overlap_minutes: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictFlagsDto<'a> {
    appointment_id: &'a str,
    conflicted: bool,
    show_warning: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a JSON array of appointments as stored by the client.
fn parse_appointments_json(json: &str) -> Result<Vec<Appointment>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid appointments JSON: {}", e)))
}

/// Parse an optional JSON config; `undefined` or an empty string means defaults.
fn parse_config_json(json: Option<String>) -> Result<EngineConfig, JsValue> {
    let config = match json.as_deref().map(str::trim) {
        None | Some("") => EngineConfig::default(),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| JsValue::from_str(&format!("Invalid config JSON: {}", e)))?,
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn find_appointment<'a>(
    appointments: &'a [Appointment],
    id: &str,
) -> Result<&'a Appointment, JsValue> {
    appointments
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| JsValue::from_str(&format!("No appointment with id '{}'", id)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Lay out one day of appointments for rendering.
///
/// Returns `{assignments, rejected}`: one assignment per well-formed
/// appointment plus the appointments excluded for malformed times.
#[wasm_bindgen(js_name = "computeDayLayout")]
pub fn compute_day_layout(
    appointments_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let appointments = parse_appointments_json(appointments_json)?;
    let config = parse_config_json(config_json)?;
    to_json(&conflict_engine::compute_day_layout(&appointments, &config))
}

/// Find every overlapping pair. Returns `[{ownerId, otherId, overlapMinutes}]`,
/// where `ownerId` is the appointment that shows the warning.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(appointments_json: &str) -> Result<String, JsValue> {
    let appointments = parse_appointments_json(appointments_json)?;
    let conflicts = conflict_engine::find_conflicts(&appointments);

    let dtos: Vec<ConflictDto> = conflicts
        .iter()
        .map(|c| ConflictDto {
            owner_id: &c.owner.id,
            other_id: &c.other.id,
            overlap_minutes: c.overlap_minutes,
        })
        .collect();

    to_json(&dtos)
}

/// Per-appointment conflict flags for badge rendering.
///
/// Returns `[{appointmentId, conflicted, showWarning}]` in input order.
#[wasm_bindgen(js_name = "conflictFlags")]
pub fn conflict_flags(appointments_json: &str) -> Result<String, JsValue> {
    let appointments = parse_appointments_json(appointments_json)?;

    let dtos: Vec<ConflictFlagsDto> = appointments
        .iter()
        .map(|a| ConflictFlagsDto {
            appointment_id: &a.id,
            conflicted: conflict_engine::is_conflicted(a, &appointments),
            show_warning: conflict_engine::should_show_conflict_warning(a, &appointments),
        })
        .collect();

    to_json(&dtos)
}

/// Suggest conflict-free start times for the appointment with `appointment_id`.
///
/// Returns a sorted JSON array of `HH:MM` strings.
#[wasm_bindgen(js_name = "suggestTimes")]
pub fn suggest_times(
    appointment_id: &str,
    appointments_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let appointments = parse_appointments_json(appointments_json)?;
    let config = parse_config_json(config_json)?;
    let target = find_appointment(&appointments, appointment_id)?;

    let times = conflict_engine::suggest_times_for(target, &appointments, &config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&times)
}

/// Availability grid for `date` (`YYYY-MM-DD`).
///
/// Returns `[{start, end, available}]`.
#[wasm_bindgen(js_name = "listAvailableSlots")]
pub fn list_available_slots(
    date: &str,
    appointments_json: &str,
    granularity_minutes: Option<u32>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let appointments = parse_appointments_json(appointments_json)?;
    let config = parse_config_json(config_json)?;
    let granularity = granularity_minutes.unwrap_or(config.granularity_minutes);

    let slots = conflict_engine::list_available_slots(date, &appointments, granularity, &config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&slots)
}

/// Free windows inside the business day.
///
/// Returns `[{start, end, durationMinutes}]`.
#[wasm_bindgen(js_name = "findFreeWindows")]
pub fn find_free_windows(
    appointments_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let appointments = parse_appointments_json(appointments_json)?;
    let config = parse_config_json(config_json)?;

    let windows = conflict_engine::free_windows(&appointments, &config)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&windows)
}
