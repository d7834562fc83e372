use chrono::NaiveDate;
use conflict_engine::{
    compute_day_layout, find_conflicts, suggest_times_for, Appointment, EngineConfig,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// A busy salon day: 120 appointments every 7 minutes with mixed durations.
fn busy_day() -> Vec<Appointment> {
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    (0..120u32)
        .map(|i| {
            let start = 6 * 60 + i * 7;
            let start_time = format!("{:02}:{:02}", start / 60, start % 60);
            let duration = [15, 30, 45, 60, 90][(i % 5) as usize];
            Appointment::new(format!("{:03}", i), date, start_time, Some(duration))
        })
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let day = busy_day();
    let config = EngineConfig::default();

    c.bench_function("compute_day_layout/120", |b| {
        b.iter(|| compute_day_layout(black_box(&day), black_box(&config)))
    });

    c.bench_function("find_conflicts/120", |b| {
        b.iter(|| find_conflicts(black_box(&day)))
    });

    c.bench_function("suggest_times_for/120", |b| {
        b.iter(|| suggest_times_for(black_box(&day[60]), black_box(&day), black_box(&config)))
    });
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
