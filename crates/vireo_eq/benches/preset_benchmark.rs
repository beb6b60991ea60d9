//! Performance benchmarks for the preset model
//!
//! Run with: cargo bench -p vireo_eq

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vireo_eq::{parse_value_string, EqualizerPreset, BAND_COUNT};

fn benchmark_band_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("preset");

    group.bench_function("set_band_no_listeners", |b| {
        let preset = EqualizerPreset::manual();
        let mut band = 0;
        let mut gain = 0.0_f32;

        b.iter(|| {
            // Simulate dragging a slider
            preset.set_band(band, gain).unwrap();
            band = (band + 1) % BAND_COUNT;
            gain = (gain + 1.0) % 24.0;
        });
    });

    group.bench_function("set_band_with_listener", |b| {
        let preset = EqualizerPreset::manual().shared();
        let weak = std::sync::Arc::downgrade(&preset);
        let _sub = preset.subscribe(move |_| {
            if let Some(p) = weak.upgrade() {
                black_box(p.to_value_string());
            }
        });
        let mut band = 0;
        let mut gain = 0.0_f32;

        b.iter(|| {
            preset.set_band(band, gain).unwrap();
            band = (band + 1) % BAND_COUNT;
            gain = (gain + 1.0) % 24.0;
        });
    });

    group.finish();
}

fn benchmark_value_string(c: &mut Criterion) {
    c.bench_function("parse_value_string", |b| {
        b.iter(|| {
            black_box(parse_value_string(black_box("6;5;3;1;0;0;-1.5;2;4;6")).unwrap());
        });
    });
}

criterion_group!(benches, benchmark_band_edit, benchmark_value_string);

criterion_main!(benches);
