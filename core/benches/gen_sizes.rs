use concentration_core::{BoardGenerator, GameConfig, RandomBoardGenerator};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let full = GameConfig::new((4, 11)).expect("22 pairs fit the palette");

    for config in GameConfig::PRESETS.into_iter().chain([full]) {
        let (rows, cols) = config.size();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{cols}")),
            &config,
            |b, &config| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    black_box(RandomBoardGenerator::new(seed).generate(black_box(config)))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
