use criterion::{criterion_group, criterion_main, Criterion};

use hotspot_tour_core::{Point, Size, TourData};
use hotspot_tour_render::{build_overlay, overlay_to_svg};
use serde_json::{json, Value};

/// A slide with `n` rectangular hotspots laid out on a grid.
fn dense_tour(n: usize) -> TourData {
    let hotspots: Vec<Value> = (0..n)
        .map(|i| {
            let x = (i % 20) as f64 * 5.0;
            let y = (i / 20) as f64 * 5.0;
            json!({
                "id": format!("h{i}"),
                "label": format!("Part {}", i % 7),
                "points": [[x, y], [x + 4.0, y], [x + 4.0, y + 4.0], [x, y + 4.0]],
                "adjustScaleX": 1.1
            })
        })
        .collect();
    TourData::from_value(&json!({
        "images": [{ "id": "bench", "src": "bench.png", "alt": "", "hotspots": hotspots }]
    }))
}

fn bench_build_overlay(c: &mut Criterion) {
    let data = dense_tour(400);
    let slide = &data.slides[0];

    c.bench_function("build_overlay_400_hotspots", |b| {
        b.iter(|| build_overlay(slide, Size::new(3840.0, 2160.0), &data.defaults));
    });
}

fn bench_hit_test(c: &mut Criterion) {
    let data = dense_tour(400);
    let overlay = build_overlay(&data.slides[0], Size::new(3840.0, 2160.0), &data.defaults);

    c.bench_function("region_at_grid_sweep", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for y in (0..2160).step_by(40) {
                for x in (0..3840).step_by(40) {
                    if overlay.region_at(Point::new(x as f64, y as f64)).is_some() {
                        hits += 1;
                    }
                }
            }
            hits
        });
    });
}

fn bench_svg_export(c: &mut Criterion) {
    let data = dense_tour(400);
    let overlay = build_overlay(&data.slides[0], Size::new(3840.0, 2160.0), &data.defaults);

    c.bench_function("overlay_to_svg_400_hotspots", |b| {
        b.iter(|| overlay_to_svg(&overlay, Some("bench.png")));
    });
}

criterion_group!(benches, bench_build_overlay, bench_hit_test, bench_svg_export);
criterion_main!(benches);
