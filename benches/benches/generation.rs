// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tallywall_model::{DataFile, Granularity, Roster, TallyWall};

fn demo_roster() -> Roster {
    match DataFile::demo() {
        Ok(DataFile::People(people)) => Roster::new(people),
        _ => unreachable!("demo data is a family"),
    }
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let roster = demo_roster();
    for years in [10_i32, 40, 88] {
        let today = NaiveDate::from_ymd_opt(1938 + years, 2, 1).unwrap();
        let days = TallyWall::generate(roster.clone(), Granularity::Day, today).len();
        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(BenchmarkId::new("days", years), &today, |b, &today| {
            b.iter(|| TallyWall::generate(black_box(roster.clone()), Granularity::Day, today));
        });
    }
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    group.bench_function("years", |b| {
        b.iter(|| TallyWall::generate(black_box(roster.clone()), Granularity::Year, today));
    });
    group.finish();
}

fn bench_advance(c: &mut Criterion) {
    let roster = demo_roster();
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let wall = TallyWall::generate(roster, Granularity::Day, start);
    let later = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    c.bench_function("advance_288_days", |b| {
        b.iter_batched(
            || wall.clone(),
            |mut wall| wall.advance_to(black_box(later)),
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_generate, bench_advance);
criterion_main!(benches);
