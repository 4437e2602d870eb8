use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use digitraffic_road::{mock_section_features, MockGenerator, Normalizer, SectionFeature, SectionResolver};

fn bench_resolver(c: &mut Criterion) {
    let mut features = mock_section_features();
    for i in 0..2000 {
        features.push(SectionFeature::new(
            format!("{:05}_{:03}_00000_1_0", i % 100, i),
            format!("Tie {}: Osuus {} {}.{:03}", i % 100, i, i % 100, i),
        ));
    }
    let resolver = SectionResolver::new();

    c.bench_function("resolve_free_text", |b| {
        b.iter(|| resolver.resolve(black_box("VT4: Oulu area"), &features))
    });
    c.bench_function("resolve_native_id", |b| {
        b.iter(|| resolver.resolve(black_box("00004_101_03169_2_0"), &features))
    });
}

fn bench_normalizer(c: &mut Criterion) {
    let mock = MockGenerator::new();
    let normalizer = Normalizer::default();
    let now = Utc::now();
    let tms = mock.tms_measurements("23001", now);
    let weather = mock.weather_measurements("1013", now);

    c.bench_function("normalize_tms", |b| {
        b.iter(|| normalizer.normalize_measurements(black_box(&tms)))
    });
    c.bench_function("normalize_weather", |b| {
        b.iter(|| normalizer.normalize_measurements(black_box(&weather)))
    });
}

criterion_group!(benches, bench_resolver, bench_normalizer);
criterion_main!(benches);
