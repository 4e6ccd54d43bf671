use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use sigclump::cluster::{Item, Uniqify};
use sigclump::sketch::MinHashSketch;

fn bench_uniqify(c: &mut Criterion) {
    let mut group = c.benchmark_group("uniqify");

    // 2000 sketches of 500 hashes drawn from 50 families, ~80% core overlap.
    let mut rng = StdRng::seed_from_u64(42);
    let n = 2000;
    let families = 50u64;
    let max_hash = u64::MAX / 1000;

    let items: Vec<Item<MinHashSketch>> = (0..n)
        .map(|i| {
            let family = rng.random_range(0..families);
            let core = (0..400).map(|h| family * 1_000_000 + h);
            let private: Vec<u64> = (0..100).map(|_| rng.random::<u64>() % max_hash).collect();
            let name = format!("genome{i}");
            let sketch =
                MinHashSketch::from_hashes(name.clone(), 31, "DNA", max_hash, core.chain(private));
            Item::new(name, sketch)
        })
        .collect();

    group.bench_function("fit_n2000_families50_batch500", |b| {
        b.iter(|| {
            let model = Uniqify::new(0.2).with_batch_size(500).with_seed(42);
            model.fit(black_box(items.clone())).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_uniqify);
criterion_main!(benches);
