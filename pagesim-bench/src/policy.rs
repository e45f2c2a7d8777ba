use criterion::*;

use pagesim::prelude::v1::*;

use crate::util::{bench_config, bench_seed, quiet_logs};

fn simulate_params(
    group: &mut BenchmarkGroup<'_, measurement::WallTime>,
    algorithm: Algorithm,
    pattern: AccessPattern,
) {
    let seed = bench_seed();

    for &frames in [4, 16, 64].iter() {
        let config = bench_config(algorithm, pattern, frames, 0x4000).unwrap();
        let sequence = generate(&config, seed).unwrap();

        group.throughput(Throughput::Elements(sequence.len() as u64));
        group.bench_with_input(
            BenchmarkId::new(format!("{}_f{}", algorithm, frames), sequence.len()),
            &sequence,
            |b, sequence| {
                b.iter(|| black_box(run_with_sequence(&config, sequence).unwrap().fault_count()))
            },
        );
    }
}

pub fn simulate(c: &mut Criterion, pattern: AccessPattern) {
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);

    let group_name = format!("simulate_{}", pattern.as_str().replace(' ', "_"));

    let mut group = c.benchmark_group(group_name);
    group.plot_config(plot_config);

    quiet_logs(|| {
        for &algorithm in Algorithm::ALL.iter() {
            simulate_params(&mut group, algorithm, pattern);
        }
    });

    group.finish();
}

/// OPT victim selection with the precomputed table against the rescanning reference.
pub fn opt_selection(c: &mut Criterion) {
    let config = bench_config(Algorithm::Opt, AccessPattern::LocalityRandom, 32, 0x4000).unwrap();
    let sequence = generate(&config, bench_seed()).unwrap();
    let page_size = config.page_size();

    let mut sim = Simulator::new(&config, &sequence).unwrap();
    while !sim.frame_table().is_full() && sim.step().is_some() {}

    let now = sim.time().saturating_sub(1);
    let frames = sim.frame_table().frames().to_vec();
    let opt = Opt::new(&sequence, page_size, config.page_count()).unwrap();

    let mut group = c.benchmark_group("opt_select");
    group.bench_function("next_use_table", |b| {
        b.iter(|| black_box(opt.select_victim(black_box(&frames), now)))
    });
    group.bench_function("rescan", |b| {
        b.iter(|| black_box(opt::scan_victim(black_box(&frames), &sequence, page_size, now)))
    });
    group.finish();
}
