use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use oco2_peak::analyzers::{fit_track, EmissionEstimator};
use oco2_peak::models::{PeakParams, SoundingRecord};

// Create a synthetic sounding cluster along a noisy track
fn create_test_soundings(count: usize) -> Vec<SoundingRecord> {
    let mut soundings = Vec::with_capacity(count);

    for i in 0..count {
        let t = i as f64 / count as f64;
        let latitude = 44.0 + t * 0.5;
        // Deterministic wobble around the track line
        let wobble = ((i * 37) % 100) as f64 / 100.0 - 0.5;
        let longitude = 14.0 + latitude * 2.5 + wobble * 0.01;
        let xco2 = 405.0 + wobble;

        soundings.push(SoundingRecord::new(
            Some(2018082510210000 + i as i64),
            latitude,
            longitude,
            xco2,
            25.0,
            979.0,
        ));
    }

    soundings
}

fn test_params() -> PeakParams {
    PeakParams {
        sounding_id: Some(2018082510210000),
        amplitude: Some(-42.0),
        windspeed_u: Some(3.0),
        windspeed_v: Some(4.0),
        tcwv: Some(25.0),
        surface_pressure: Some(979.0),
        latitude: Some(44.25),
        longitude: Some(124.6),
        ..PeakParams::default()
    }
}

fn benchmark_fit_track(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_track");

    for size in [100, 1_000, 10_000] {
        let soundings = create_test_soundings(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &soundings, |b, s| {
            b.iter(|| fit_track(black_box(s)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_estimate(c: &mut Criterion) {
    let soundings = create_test_soundings(1_000);
    let params = test_params();
    let estimator = EmissionEstimator::new();

    c.bench_function("estimate_emission_1k", |b| {
        b.iter(|| {
            estimator
                .estimate(black_box(&soundings), black_box(&params))
                .unwrap()
        });
    });
}

criterion_group!(benches, benchmark_fit_track, benchmark_estimate);
criterion_main!(benches);
