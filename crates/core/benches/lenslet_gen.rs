use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lenslet::{LatticeConfig, LensletArray, LensletConfig, Millimeter};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("lenslet-generation");
    group.sample_size(10);

    let config = LensletConfig::default();
    group.bench_function("default", |b| {
        b.iter(|| LensletArray::generate(black_box(config)))
    });

    // Small tiles mean a lot more tiles, which is where the time goes
    let config = LensletConfig {
        lattice: LatticeConfig {
            tile_size: Millimeter(0.1),
        },
        ..Default::default()
    };
    group.bench_function("fine lattice", |b| {
        b.iter(|| LensletArray::generate(black_box(config)))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
