use criterion::*;

use pagesim::prelude::v1::*;

use crate::util::{bench_config, bench_seed, quiet_logs};

fn generate_params(group: &mut BenchmarkGroup<'_, measurement::WallTime>, pattern: AccessPattern) {
    for &len in [0x100, 0x1000, 0x10000].iter() {
        let config = bench_config(Algorithm::Fifo, pattern, 8, len).unwrap();
        let seed = bench_seed();

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(
            BenchmarkId::new(pattern.as_str().replace(' ', "_"), len),
            &config,
            |b, config| b.iter(|| black_box(generate(config, black_box(seed)).unwrap())),
        );
    }
}

pub fn generate_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("workload_generate");

    quiet_logs(|| {
        for &pattern in AccessPattern::ALL.iter() {
            generate_params(&mut group, pattern);
        }
    });

    group.finish();
}
