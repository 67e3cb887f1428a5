use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::f64::consts::PI;
use tone_spectrum::{AnalyzerConfig, SpectrumAnalyzer, WindowType};

fn bench_compute_spectrum(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_spectrum");

    for fft_size in [256usize, 1024, 4096] {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
            fft_size,
            window_type: WindowType::Hann,
            ..AnalyzerConfig::default()
        })
        .unwrap();
        let signal: Vec<f64> = (0..fft_size)
            .map(|n| (2.0 * PI * 440.0 * n as f64 / 48000.0).sin())
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(fft_size), &signal, |b, signal| {
            b.iter(|| {
                let spectrum = analyzer.compute_spectrum(black_box(signal)).unwrap();
                black_box(spectrum[0]);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_spectrum);
criterion_main!(benches);
