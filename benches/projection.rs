// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for map projection operations.
//!
//! Measures the performance of:
//! - Web Mercator projection round trips
//! - Click unprojection on a viewport
//! - Visible tile enumeration for a full picker viewport

use criterion::{criterion_group, criterion_main, Criterion};
use iced::{Point, Size};
use iced_parking::domain::geo::{GeoPoint, ZoomLevel};
use iced_parking::map::projection::{project, unproject};
use iced_parking::map::MapView;
use std::hint::black_box;

fn sample_point() -> GeoPoint {
    GeoPoint::new(40.7500, -73.9900).unwrap()
}

/// Benchmark project followed by unproject at street zoom.
fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let zoom = ZoomLevel::new(16);
    let point = sample_point();

    group.bench_function("project_unproject", |b| {
        b.iter(|| {
            let world = project(black_box(point), zoom);
            black_box(unproject(world, zoom));
        });
    });

    group.finish();
}

/// Benchmark converting a click position into a coordinate.
fn bench_geo_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let view = MapView::new(GeoPoint::default(), ZoomLevel::default(), Size::new(672.0, 300.0));

    group.bench_function("geo_at", |b| {
        b.iter(|| black_box(view.geo_at(black_box(Point::new(412.0, 96.0)))));
    });

    group.finish();
}

/// Benchmark listing the tiles that cover the viewport.
fn bench_visible_tiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let view = MapView::new(sample_point(), ZoomLevel::new(14), Size::new(1280.0, 720.0));

    group.bench_function("visible_tiles", |b| {
        b.iter(|| black_box(view.visible_tiles()));
    });

    group.finish();
}

criterion_group!(benches, bench_round_trip, bench_geo_at, bench_visible_tiles);
criterion_main!(benches);
