/*!
Independent trials over a shared access sequence.

Every trial owns its own simulator, only the sequence is shared. With the
`parallel` feature enabled trials are spread over the rayon thread pool.
Results are always returned in trial order.
*/

use log::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{Algorithm, Config};
use crate::error::Result;
use crate::sim::{run_with_sequence, SimulationReport};
use crate::workload::AccessSequence;

fn run_trials(configs: &[Config], sequence: &AccessSequence) -> Result<Vec<SimulationReport>> {
    #[cfg(feature = "parallel")]
    let iter = configs.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = configs.iter();

    iter.map(|config| run_with_sequence(config, sequence))
        .collect()
}

/// Runs FIFO, LRU and OPT on the same sequence.
pub fn compare_algorithms(
    config: &Config,
    sequence: &AccessSequence,
) -> Result<Vec<SimulationReport>> {
    let configs = Algorithm::ALL
        .iter()
        .map(|&algorithm| config.with_algorithm(algorithm))
        .collect::<Vec<_>>();

    info!("comparing {} algorithms", configs.len());
    run_trials(&configs, sequence)
}

/// Runs the algorithm of `config` once for every frame count.
pub fn sweep_frames<I: IntoIterator<Item = usize>>(
    config: &Config,
    sequence: &AccessSequence,
    frame_counts: I,
) -> Result<Vec<SimulationReport>> {
    let configs = frame_counts
        .into_iter()
        .map(|frames| config.with_frame_count(frames))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "sweeping {} frame counts with {}",
        configs.len(),
        config.algorithm()
    );
    run_trials(&configs, sequence)
}
