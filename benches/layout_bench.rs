// Benchmark for merge and layout
// Measures a full rebuild of growing lane structures

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lane_calendar::models::lane::CalendarStructure;
use lane_calendar::models::participant::SpecialistLink;
use lane_calendar::models::window::TimeWindow;
use lane_calendar::models::working_hours::WorkingHours;
use lane_calendar::services::grid_layout::{layout, HourScale, LayoutParams};
use lane_calendar::services::lane_merge::{merge, MergeInput};
use lane_calendar::services::working_hours::GridMode;

fn window() -> TimeWindow {
    let start = Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap();
    TimeWindow::new(start, start + Duration::hours(3))
}

fn links(count: usize) -> Vec<SpecialistLink> {
    (0..count)
        .map(|i| SpecialistLink::new(format!("Specialist {}", i)))
        .collect()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for count in [5usize, 50, 200] {
        let links = links(count);
        let mut input = MergeInput::new(window());
        input.specialist_links = &links;
        let previous = merge(&CalendarStructure::empty(), &input);

        group.bench_with_input(BenchmarkId::new("remerge", count), &count, |b, _| {
            b.iter(|| merge(black_box(&previous), black_box(&input)))
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let start = window().start;
    let hours = WorkingHours::new(
        "NYC",
        start - Duration::hours(1),
        start + Duration::hours(8),
    );

    for count in [5usize, 50, 200] {
        let links = links(count);
        let mut input = MergeInput::new(window());
        input.specialist_links = &links;
        let structure = merge(&CalendarStructure::empty(), &input);
        let params = LayoutParams {
            window: window(),
            working_hours: Some(&hours),
            scale: HourScale::default(),
            mode: GridMode::Scheduling,
            use_24_hour_clock: false,
        };

        group.bench_with_input(BenchmarkId::new("scheduling", count), &count, |b, _| {
            b.iter(|| layout(black_box(&params), black_box(&structure), None))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge, bench_layout);
criterion_main!(benches);
