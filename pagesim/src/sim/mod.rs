/*!
The simulation driver.

[`run`] is the one-shot entry point: it generates the workload for a config
and a seed, replays it against an empty frame table and returns the final
[`SimulationReport`]. [`Simulator`] exposes the same loop step by step.
*/

pub mod driver;
pub mod report;


#[doc(hidden)]
pub use driver::{Access, AccessOutcome, Simulator};
#[doc(hidden)]
pub use report::SimulationReport;

use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::workload::{self, AccessSequence};

/// Generates the workload of `config` from `seed` and simulates it.
pub fn run(config: &Config, seed: u64) -> Result<SimulationReport> {
    info!(
        "simulating {} accesses ({} pattern, seed {:#x})",
        config.sequence_length(),
        config.access_pattern(),
        seed
    );

    let sequence = workload::generate(config, seed)?;
    run_with_sequence(config, &sequence)
}

/// Simulates an already generated or recorded `sequence`.
pub fn run_with_sequence(config: &Config, sequence: &AccessSequence) -> Result<SimulationReport> {
    Ok(Simulator::new(config, sequence)?.run())
}
