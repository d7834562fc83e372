//! Lane assignment for rendering a day's appointments side by side.
//!
//! A greedy sweep in `(start_minute, id)` order: each appointment takes the
//! lowest column not used by an already-placed appointment it overlaps. Only
//! placed appointments are consulted, so this is interval-graph colouring, not
//! an exact minimum colouring. Past `max_columns` appointments stack in the
//! last column. Column width is shared across each connected cluster of
//! overlapping appointments.

use serde::Serialize;

use crate::appointment::{partition_day, Appointment, RejectedAppointment, Scheduled};
use crate::config::EngineConfig;
use crate::time_range::{timeline_position, TimeInterval};

/// Rendering coordinates for one appointment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutAssignment {
    pub appointment_id: String,
    pub interval: TimeInterval,
    /// Pixels from the top of the visible timeline.
    pub top_offset: f64,
    /// Rendered height with the `min_content_height` floor applied.
    pub height: f64,
    /// Height from the true duration, without the floor.
    pub natural_height: f64,
    pub column: usize,
    pub column_width_percent: f64,
    pub left_offset_percent: f64,
}

impl LayoutAssignment {
    /// Horizontal extent as `[left, left + width)`, in percent.
    pub fn horizontal_range(&self) -> (f64, f64) {
        (
            self.left_offset_percent,
            self.left_offset_percent + self.column_width_percent,
        )
    }
}

/// Result of laying out one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    /// One entry per well-formed appointment, in `(start_minute, id)` order.
    pub assignments: Vec<LayoutAssignment>,
    /// Appointments excluded because their time could not be parsed.
    pub rejected: Vec<RejectedAppointment>,
}

impl DayLayout {
    pub fn get(&self, appointment_id: &str) -> Option<&LayoutAssignment> {
        self.assignments
            .iter()
            .find(|a| a.appointment_id == appointment_id)
    }
}

/// Assign every appointment of a day a column, width and vertical extent.
///
/// Never drops a well-formed appointment. Malformed ones are moved to
/// [`DayLayout::rejected`] instead of failing the whole day.
pub fn compute_day_layout(appointments: &[Appointment], config: &EngineConfig) -> DayLayout {
    let (mut scheduled, rejected) = partition_day(appointments);
    scheduled.sort_by(|a, b| a.order_key().cmp(&b.order_key()));

    let max_columns = config.max_columns.max(1);
    let columns = assign_columns(&scheduled, max_columns);
    let lanes = cluster_lanes(&scheduled, max_columns);

    let assignments: Vec<LayoutAssignment> = scheduled
        .iter()
        .zip(columns.iter().zip(&lanes))
        .map(|(current, (&column, &lanes))| {
            let width = 100.0 / lanes as f64;
            let position = timeline_position(&current.interval, config);
            LayoutAssignment {
                appointment_id: current.appointment.id.clone(),
                interval: current.interval,
                top_offset: position.top,
                height: position.height,
                natural_height: position.natural_height,
                column,
                column_width_percent: width,
                left_offset_percent: column as f64 * width,
            }
        })
        .collect();

    tracing::debug!(
        assigned = assignments.len(),
        rejected = rejected.len(),
        max_columns,
        "computed day layout"
    );

    DayLayout {
        assignments,
        rejected,
    }
}

/// Greedy sweep over `scheduled` (already sorted): the lowest column no
/// overlapping earlier appointment holds, else the last one.
fn assign_columns(scheduled: &[Scheduled<'_>], max_columns: usize) -> Vec<usize> {
    let mut columns: Vec<usize> = Vec::with_capacity(scheduled.len());

    for (idx, current) in scheduled.iter().enumerate() {
        let used: Vec<usize> = scheduled[..idx]
            .iter()
            .zip(&columns)
            .filter(|(prev, _)| prev.interval.overlaps(&current.interval))
            .map(|(_, &column)| column)
            .collect();

        let column = (0..max_columns)
            .find(|c| !used.contains(c))
            .unwrap_or(max_columns - 1);
        columns.push(column);
    }

    columns
}

/// Lane count for each appointment, shared by its whole overlap cluster.
///
/// A cluster is a maximal run of the sorted day joined by overlaps. Every
/// member gets the cluster's largest `min(group size, max_columns)`, so two
/// overlapping appointments always divide the row the same way.
fn cluster_lanes(scheduled: &[Scheduled<'_>], max_columns: usize) -> Vec<usize> {
    let group_sizes = overlap_group_sizes(scheduled);
    let mut lanes = vec![1; scheduled.len()];

    let mut cluster_start = 0;
    let mut cluster_end = 0;
    for idx in 0..=scheduled.len() {
        let closes = match scheduled.get(idx) {
            Some(current) => idx > 0 && current.interval.start_minute >= cluster_end,
            None => true,
        };
        if closes && idx > cluster_start {
            let widest = group_sizes[cluster_start..idx]
                .iter()
                .map(|&size| size.min(max_columns))
                .max()
                .unwrap_or(1)
                .max(1);
            lanes[cluster_start..idx].fill(widest);
            cluster_start = idx;
        }
        if let Some(current) = scheduled.get(idx) {
            cluster_end = if idx == cluster_start {
                current.interval.end_minute
            } else {
                cluster_end.max(current.interval.end_minute)
            };
        }
    }

    lanes
}

/// For each appointment, 1 + the number of other appointments overlapping it.
fn overlap_group_sizes(scheduled: &[Scheduled<'_>]) -> Vec<usize> {
    scheduled
        .iter()
        .enumerate()
        .map(|(i, current)| {
            1 + scheduled
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && other.interval.overlaps(&current.interval))
                .count()
        })
        .collect()
}
