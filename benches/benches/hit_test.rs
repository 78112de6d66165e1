// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use tallywall_model::{DataFile, Sheet, SheetSettings};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1_u64 << 53) as f64)
    }
}

fn demo_sheet() -> Box<dyn Sheet> {
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    DataFile::demo()
        .unwrap()
        .into_sheet(&SheetSettings::default(), today, 1280.0)
}

fn bench_hit_test(c: &mut Criterion) {
    let sheet = demo_sheet();
    let bounds = sheet.bounds();
    let mut rng = Rng(0x5eed);
    let points: Vec<Point> = (0..1024)
        .map(|_| {
            Point::new(
                bounds.x0 + rng.next_f64() * bounds.width(),
                bounds.y0 + rng.next_f64() * bounds.height(),
            )
        })
        .collect();

    c.bench_function("hit_test_1024_points", |b| {
        b.iter(|| {
            points
                .iter()
                .filter_map(|&pt| sheet.hit_test(black_box(pt)))
                .count()
        });
    });
}

fn bench_candidates(c: &mut Criterion) {
    let sheet = demo_sheet();
    let viewport = Rect::new(0.0, 40_000.0, 1600.0, 41_000.0);
    c.bench_function("candidates_viewport", |b| {
        b.iter(|| sheet.candidates(black_box(viewport)).len());
    });
}

criterion_group!(benches, bench_hit_test, bench_candidates);
criterion_main!(benches);
