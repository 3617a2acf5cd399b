use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use wavelet_occupancy::{count_region_in_interval, RankTree, Symbol};

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut g = c.benchmark_group("rank tree");

    let len = 100_000;
    // sweep the alphabet size, from a handful of bins to a sparse, wide alphabet
    for alphabet in [4, 256, 65_536] {
        let data: Vec<Symbol> = (0..len).map(|_| rng.gen_range(0..alphabet)).collect();

        g.bench_function(BenchmarkId::new("build", alphabet), |b| {
            b.iter(|| RankTree::new(black_box(&data)));
        });

        let tree = RankTree::new(&data);

        // query a random symbol at 25% of the positions
        let mut queries = vec![];
        for i in 0..len {
            if rng.gen_ratio(25, 100) {
                queries.push((rng.gen_range(0..alphabet), i));
            }
        }

        g.bench_function(BenchmarkId::new("rank", alphabet), |b| {
            b.iter(|| {
                let mut ret = 0;
                for &(symbol, index) in &queries {
                    ret += tree.rank(symbol, index);
                }
                ret
            });
        });

        // a band covering a quarter of the alphabet, one descent per symbol
        let high = (alphabet / 4).max(1) - 1;
        g.bench_function(BenchmarkId::new("region", alphabet), |b| {
            b.iter(|| count_region_in_interval(&tree, 0, high, 0, alphabet - 1, len / 4, len - 1));
        });
    }
    g.finish();
}

criterion_group! {
    name    = benches;
    config  = Criterion::default().warm_up_time(Duration::from_secs(1));
    targets = criterion_benchmark
}
criterion_main!(benches);
