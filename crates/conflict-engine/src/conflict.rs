//! Detect overlapping appointments within one day.
//!
//! Overlap uses half-open intervals: an appointment ending exactly when
//! another starts is NOT a conflict. Of two overlapping appointments, the one
//! later in `(start_minute, id)` order owns the conflict and shows the warning.

use serde::Serialize;

use crate::appointment::{Appointment, Scheduled};

/// A detected overlap between two appointments of the same day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// The later appointment of the pair; the one that surfaces the warning.
    pub owner: Appointment,
    /// The earlier appointment it collides with.
    pub other: Appointment,
    pub overlap_minutes: u32,
}

/// Well-formed appointments other than `subject`. Malformed ones are skipped
/// silently here; [`crate::layout::compute_day_layout`] is where they are reported.
fn peers_of<'a, 's>(
    subject: &'s Appointment,
    day: &'a [Appointment],
) -> impl Iterator<Item = Scheduled<'a>> + 's
where
    'a: 's,
{
    day.iter()
        .filter(move |other| other.id != subject.id)
        .filter_map(|other| {
            other.interval().ok().map(|interval| Scheduled {
                appointment: other,
                interval,
            })
        })
}

/// True iff any other appointment of the day overlaps `appointment`.
///
/// An appointment whose own time is malformed is never conflicted.
pub fn is_conflicted(appointment: &Appointment, day: &[Appointment]) -> bool {
    let Ok(interval) = appointment.interval() else {
        return false;
    };
    peers_of(appointment, day).any(|peer| peer.interval.overlaps(&interval))
}

/// True iff `appointment` overlaps a peer that comes strictly before it in
/// `(start_minute, id)` order.
///
/// For any overlapping pair exactly one side returns true: the later start,
/// or the larger id when both start on the same minute.
pub fn should_show_conflict_warning(appointment: &Appointment, day: &[Appointment]) -> bool {
    let Ok(interval) = appointment.interval() else {
        return false;
    };
    let subject = Scheduled {
        appointment,
        interval,
    };
    peers_of(appointment, day)
        .any(|peer| peer.interval.overlaps(&interval) && peer.order_key() < subject.order_key())
}

/// The conflict group of `appointment`: every peer whose interval overlaps it.
///
/// Not transitively closed; two members of the group need not overlap each
/// other. Returned in `(start_minute, id)` order.
pub fn conflict_group<'a>(
    appointment: &Appointment,
    day: &'a [Appointment],
) -> Vec<&'a Appointment> {
    let Ok(interval) = appointment.interval() else {
        return Vec::new();
    };
    let mut group: Vec<Scheduled<'a>> = peers_of(appointment, day)
        .filter(|peer| peer.interval.overlaps(&interval))
        .collect();
    group.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
    group.into_iter().map(|peer| peer.appointment).collect()
}

/// Find every overlapping pair in a day.
///
/// Pairs are reported once, ordered by the earlier appointment and then by
/// the owner. The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(day: &[Appointment]) -> Vec<Conflict> {
    let mut scheduled: Vec<Scheduled<'_>> = day
        .iter()
        .filter_map(|appointment| {
            appointment.interval().ok().map(|interval| Scheduled {
                appointment,
                interval,
            })
        })
        .collect();
    scheduled.sort_by(|a, b| a.order_key().cmp(&b.order_key()));

    let mut conflicts = Vec::new();

    for (i, earlier) in scheduled.iter().enumerate() {
        for later in &scheduled[i + 1..] {
            // Sorted by start: nothing further along can reach back into `earlier`.
            if later.interval.start_minute >= earlier.interval.end_minute {
                break;
            }
            if later.is_same(earlier.appointment) {
                continue;
            }
            conflicts.push(Conflict {
                owner: later.appointment.clone(),
                other: earlier.appointment.clone(),
                overlap_minutes: earlier.interval.overlap_minutes(&later.interval),
            });
        }
    }

    conflicts
}
