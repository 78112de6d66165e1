// Copyright 2025 the Tally Wall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Size, Vec2};
use tallywall_model::{DataFile, SheetSettings};
use tallywall_svg::SvgRenderer;
use tallywall_view2d::Camera;

fn bench_render(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let sheet = DataFile::demo()
        .unwrap()
        .into_sheet(&SheetSettings::default(), today, 1280.0);
    let renderer = SvgRenderer::new();
    let surface = Size::new(1280.0, 800.0);

    let mut group = c.benchmark_group("render");
    for scale in [0.05, 0.2, 0.8, 4.0] {
        let camera = Camera::new(scale, Vec2::new(50.0, 50.0));
        group.bench_with_input(BenchmarkId::from_parameter(scale), &camera, |b, camera| {
            b.iter(|| renderer.render(sheet.as_ref(), black_box(camera), surface, None));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
