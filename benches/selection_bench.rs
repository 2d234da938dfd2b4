use capforge::geometry::Rect;
use capforge::layouts::{generate_layout, LayoutType};
use capforge::selection::intersecting_keys;
use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use std::hint::black_box;

fn setup_rects(px_per_unit: f32) -> (capforge::geometry::KeyboardLayout, HashMap<String, Rect>) {
    let layout = generate_layout(LayoutType::Full);
    let rects = layout
        .keys
        .iter()
        .map(|k| {
            (
                k.id.clone(),
                Rect::from_origin_size(
                    k.x * px_per_unit,
                    k.y * px_per_unit,
                    k.width * px_per_unit,
                    k.height * px_per_unit,
                ),
            )
        })
        .collect();
    (layout, rects)
}

fn bench_generation(c: &mut Criterion) {
    c.bench_function("generate_full_layout", |b| {
        b.iter(|| black_box(generate_layout(LayoutType::Full)))
    });
}

fn bench_intersection(c: &mut Criterion) {
    let (layout, rects) = setup_rects(48.0);
    // A mid-board sweep touching roughly half the keys.
    let drag = Rect::from_corners(100.0, 80.0, 700.0, 260.0);

    c.bench_function("drag_intersection_full_layout", |b| {
        b.iter(|| black_box(intersecting_keys(&drag, &layout, &rects)))
    });
}

criterion_group!(benches, bench_generation, bench_intersection);
criterion_main!(benches);
