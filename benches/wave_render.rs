use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ratatui::style::Color;
use std::time::Duration;
use wavetui::waveform::sample::{value_at, Sample};
use wavetui::waveform::store::StoredSignal;
use wavetui::waveform::wave::render_wave;
use wavetui::waveform::{PaneGeometry, PaneId, SignalData, SignalStore, Viewport, WaveformDisplay};

/// Random toggles on a 1-bit signal, one change every few ps on average.
fn bit_samples(rng: &mut ChaCha8Rng, changes: usize) -> Vec<Sample> {
    let mut time = 0u64;
    let mut high = false;
    (0..changes)
        .map(|_| {
            time += rng.gen_range(1..20);
            high = !high;
            Sample::new(time, if high { "1" } else { "0" })
        })
        .collect()
}

fn bus_samples(rng: &mut ChaCha8Rng, changes: usize, width: usize) -> Vec<Sample> {
    let mut time = 0u64;
    (0..changes)
        .map(|_| {
            time += rng.gen_range(5..200);
            let bits: String = (0..width)
                .map(|_| match rng.gen_range(0..50) {
                    0 => 'x',
                    n if n % 2 == 0 => '0',
                    _ => '1',
                })
                .collect();
            Sample::new(time, bits)
        })
        .collect()
}

fn bench_value_lookup(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut group = c.benchmark_group("value_lookup");
    group.sample_size(20);

    for changes in [1_000usize, 100_000] {
        let samples = bit_samples(&mut rng, changes);
        let end = samples.last().map_or(0, |s| s.time);
        group.bench_with_input(BenchmarkId::new("value_at", changes), &samples, |b, samples| {
            let mut t = 0u64;
            b.iter(|| {
                t = (t + 7919) % (end + 1);
                black_box(value_at(black_box(samples), t));
            })
        });
    }

    group.finish();
}

fn bench_render_wave(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut group = c.benchmark_group("render_wave");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));

    let clk = StoredSignal {
        width: 1,
        samples: bit_samples(&mut rng, 50_000),
        color: Color::LightGreen,
    };
    let bus = StoredSignal {
        width: 32,
        samples: bus_samples(&mut rng, 5_000, 32),
        color: Color::LightCyan,
    };
    let end_time = clk
        .samples
        .last()
        .map_or(0, |s| s.time)
        .max(bus.samples.last().map_or(0, |s| s.time));

    // Dense (one change per column) down to sparse (many changes per column).
    for tpc in [1u64, 16, 512] {
        let mut viewport = Viewport::new(tpc);
        viewport.set_start_time(end_time / 3);

        group.bench_with_input(BenchmarkId::new("bit", tpc), &viewport, |b, viewport| {
            b.iter(|| render_wave(black_box(&clk), viewport, end_time, 200, Color::LightRed))
        });
        group.bench_with_input(BenchmarkId::new("bus", tpc), &viewport, |b, viewport| {
            b.iter(|| render_wave(black_box(&bus), viewport, end_time, 200, Color::LightRed))
        });
    }

    group.finish();
}

fn bench_render_frame(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let mut group = c.benchmark_group("render_frame");
    group.sample_size(10);

    for signals in [8usize, 64] {
        let mut display = WaveformDisplay::new(
            SignalStore::new(),
            Viewport::new(10),
            PaneGeometry {
                names_width: 30,
                values_width: 15,
                waves_width: 160,
            },
        );
        for i in 0..signals {
            let data = if i % 4 == 0 {
                SignalData::new(16, bus_samples(&mut rng, 2_000, 16))
            } else {
                SignalData::new(1, bit_samples(&mut rng, 10_000))
            };
            display.add_signal(&format!("top.u{i:03}.sig"), data);
        }
        display.on_scroll(PaneId::Waves, 500, 0);
        display.on_click(PaneId::Waves, 80);

        group.bench_with_input(BenchmarkId::new("signals", signals), &display, |b, display| {
            b.iter(|| black_box(display.render_frame()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_value_lookup, bench_render_wave, bench_render_frame);
criterion_main!(benches);
