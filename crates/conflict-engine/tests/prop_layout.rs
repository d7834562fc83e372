//! Property-based tests for layout and conflict invariants using proptest.
//!
//! These hold for *any* well-formed day, not just the fixed scenarios in
//! `layout_tests.rs` and `conflict_tests.rs`.

use chrono::NaiveDate;
use conflict_engine::{
    compute_day_layout, find_conflicts, is_conflicted, should_show_conflict_warning, Appointment,
    EngineConfig,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Start between 06:00 and 21:45 on a 15-minute grid.
fn arb_start() -> impl Strategy<Value = String> {
    (6u32..=21, prop_oneof![Just(0u32), Just(15), Just(30), Just(45)])
        .prop_map(|(h, m)| format!("{:02}:{:02}", h, m))
}

fn arb_duration() -> impl Strategy<Value = u32> {
    prop_oneof![Just(15u32), Just(30), Just(45), Just(60), Just(90), Just(120)]
}

/// A day of 0..10 appointments with unique ids.
fn arb_day() -> impl Strategy<Value = Vec<Appointment>> {
    prop::collection::vec((arb_start(), arb_duration()), 0..10).prop_map(|slots| {
        let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
        slots
            .into_iter()
            .enumerate()
            .map(|(i, (start, duration))| {
                Appointment::new(format!("appt-{:02}", i), date, start, Some(duration))
            })
            .collect()
    })
}

fn arb_max_columns() -> impl Strategy<Value = usize> {
    1usize..=4
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

/// Largest number of appointments running at the same minute.
fn max_concurrency(day: &[Appointment]) -> usize {
    let intervals: Vec<_> = day.iter().map(|a| a.interval().unwrap()).collect();
    intervals
        .iter()
        .map(|probe| {
            intervals
                .iter()
                .filter(|other| {
                    other.start_minute <= probe.start_minute
                        && other.end_minute > probe.start_minute
                })
                .count()
        })
        .max()
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Property 1: Completeness — one assignment per appointment, ids match
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn every_appointment_gets_one_assignment(day in arb_day(), max_columns in arb_max_columns()) {
        let cfg = EngineConfig { max_columns, ..EngineConfig::default() };
        let layout = compute_day_layout(&day, &cfg);

        prop_assert_eq!(layout.assignments.len(), day.len());
        prop_assert!(layout.rejected.is_empty());

        let mut expected: Vec<&str> = day.iter().map(|a| a.id.as_str()).collect();
        let mut got: Vec<&str> = layout
            .assignments
            .iter()
            .map(|a| a.appointment_id.as_str())
            .collect();
        expected.sort();
        got.sort();
        prop_assert_eq!(expected, got);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Idempotence — same input, same output
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn layout_is_deterministic(day in arb_day()) {
        let cfg = EngineConfig::default();
        prop_assert_eq!(compute_day_layout(&day, &cfg), compute_day_layout(&day, &cfg));
    }
}

// ---------------------------------------------------------------------------
// Property 3: Input order does not matter
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn layout_ignores_input_order(day in arb_day()) {
        let cfg = EngineConfig::default();
        let mut reversed = day.clone();
        reversed.reverse();
        prop_assert_eq!(compute_day_layout(&day, &cfg), compute_day_layout(&reversed, &cfg));
    }
}

// ---------------------------------------------------------------------------
// Property 4: Overlapping appointments never share screen space while lanes suffice
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlapping_appointments_render_side_by_side(
        day in arb_day(),
        max_columns in arb_max_columns(),
    ) {
        prop_assume!(max_concurrency(&day) <= max_columns);

        let cfg = EngineConfig { max_columns, ..EngineConfig::default() };
        let layout = compute_day_layout(&day, &cfg);

        for (i, a) in layout.assignments.iter().enumerate() {
            for b in &layout.assignments[i + 1..] {
                if a.interval.overlaps(&b.interval) {
                    let (a_left, a_right) = a.horizontal_range();
                    let (b_left, b_right) = b.horizontal_range();
                    let disjoint = a_right <= b_left + 1e-9 || b_right <= a_left + 1e-9;
                    prop_assert!(a.column != b.column);
                    prop_assert!(
                        disjoint,
                        "{} {:?} and {} {:?} overlap on screen",
                        a.appointment_id, (a_left, a_right), b.appointment_id, (b_left, b_right)
                    );
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Lanes stay inside the cap and the row
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn lanes_fit_inside_the_row(day in arb_day(), max_columns in arb_max_columns()) {
        let cfg = EngineConfig { max_columns, ..EngineConfig::default() };
        for a in compute_day_layout(&day, &cfg).assignments {
            prop_assert!(a.column < max_columns);
            let (left, right) = a.horizontal_range();
            prop_assert!(left >= 0.0);
            prop_assert!(right <= 100.0 + 1e-9);
            prop_assert!(a.height >= cfg.min_content_height);
            prop_assert!(a.top_offset >= 0.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Conflicts are symmetric, warnings are not
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn exactly_one_side_of_each_conflict_warns(day in arb_day()) {
        for (i, a) in day.iter().enumerate() {
            for b in &day[i + 1..] {
                let overlapping = a.interval().unwrap().overlaps(&b.interval().unwrap());
                if !overlapping {
                    continue;
                }
                prop_assert!(is_conflicted(a, &day));
                prop_assert!(is_conflicted(b, &day));
            }
        }

        for conflict in find_conflicts(&day) {
            prop_assert!(should_show_conflict_warning(&conflict.owner, &day));
        }

        // The first appointment in (start, id) order never warns.
        if let Some(first) = day
            .iter()
            .min_by_key(|a| (a.interval().unwrap().start_minute, a.id.clone()))
        {
            prop_assert!(!should_show_conflict_warning(first, &day));
        }
    }
}
