use log::{debug, info};

use super::SimulationReport;
use crate::config::Config;
use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::mem::{FrameIndex, FrameTable, PageId};
use crate::policy::ReplacementPolicy;
use crate::stats::Counters;
use crate::workload::AccessSequence;

#[cfg(feature = "trace_sim")]
macro_rules! sim_trace {
    ( $( $x:expr ),* ) => {
        log::trace!( $($x, )* );
    }
}

#[cfg(not(feature = "trace_sim"))]
macro_rules! sim_trace {
    ( $( $x:expr ),* ) => {};
}

/// Accesses between two progress messages.
pub const PROGRESS_INTERVAL: usize = 200;

/// Result of resolving a single access.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AccessOutcome {
    /// The page was resident in `frame`.
    Hit { frame: FrameIndex },
    /// The page was loaded into `frame`, replacing `evicted` if the pool was full.
    Fault {
        frame: FrameIndex,
        evicted: Option<PageId>,
    },
}

impl AccessOutcome {
    pub fn is_fault(&self) -> bool {
        matches!(self, AccessOutcome::Fault { .. })
    }

    pub fn frame(&self) -> FrameIndex {
        match *self {
            AccessOutcome::Hit { frame } | AccessOutcome::Fault { frame, .. } => frame,
        }
    }
}

/// A resolved access of the workload.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Access {
    pub time: usize,
    pub address: usize,
    pub page: PageId,
    pub outcome: AccessOutcome,
}

/// Drives a frame table with an access sequence.
///
/// Every access is fully resolved (lookup, eviction, install) before the
/// next one starts. The simulator can be stepped manually or run to
/// completion; it also implements `Iterator` over the resolved accesses.
pub struct Simulator<'a> {
    config: &'a Config,
    sequence: &'a AccessSequence,
    table: FrameTable,
    policy: ReplacementPolicy,
    counters: Counters,
    time: usize,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator replaying `sequence` with the policy of `config`.
    ///
    /// The length of `sequence` determines the number of simulated accesses.
    pub fn new(config: &'a Config, sequence: &'a AccessSequence) -> Result<Self> {
        if sequence.total_instructions() > config.total_instructions() {
            return Err(
                Error(ErrorOrigin::Simulator, ErrorKind::OutOfBounds).log_error(format!(
                    "sequence spans {} instructions, config only {}",
                    sequence.total_instructions(),
                    config.total_instructions()
                )),
            );
        }

        let table = FrameTable::new(config.frame_count(), config.page_count())?;
        let policy = ReplacementPolicy::new(
            config.algorithm(),
            sequence,
            config.page_size(),
            config.page_count(),
        )?;

        Ok(Self {
            config,
            sequence,
            table,
            policy,
            counters: Counters::default(),
            time: 0,
        })
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn sequence(&self) -> &AccessSequence {
        self.sequence
    }

    pub fn frame_table(&self) -> &FrameTable {
        &self.table
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Position of the next access to resolve.
    pub fn time(&self) -> usize {
        self.time
    }

    pub fn is_finished(&self) -> bool {
        self.time >= self.sequence.len()
    }

    /// Resolves the next access. Returns `None` once the sequence is exhausted.
    pub fn step(&mut self) -> Option<Access> {
        if self.is_finished() {
            return None;
        }

        let time = self.time;
        let address = self.sequence[time];
        let page = address / self.config.page_size();

        let outcome = match self.table.lookup(page) {
            Some(frame) => {
                self.table.touch(frame, time);
                AccessOutcome::Hit { frame }
            }
            None => {
                self.counters.faults += 1;

                let (frame, evicted) = match self.table.find_free_frame() {
                    Some(frame) => (frame, None),
                    None => self.policy.evict(&mut self.table, time),
                };
                self.table.install(page, frame, time);

                AccessOutcome::Fault { frame, evicted }
            }
        };

        self.counters.accesses += 1;
        self.time += 1;

        sim_trace!(
            "t={} addr={} page={} {:?}",
            time,
            address,
            page,
            outcome
        );
        debug_assert!(self.table.check_consistency().is_ok());

        if time > 0 && time % PROGRESS_INTERVAL == 0 {
            debug!(
                "progress: {}/{} ({}%)",
                time,
                self.sequence.len(),
                time * 100 / self.sequence.len()
            );
        }

        Some(Access {
            time,
            address,
            page,
            outcome,
        })
    }

    /// Resolves all remaining accesses and produces the final report.
    pub fn run(mut self) -> SimulationReport {
        while self.step().is_some() {}
        self.finish()
    }

    /// Stops the simulation and produces a report of the current state.
    pub fn finish(self) -> SimulationReport {
        info!(
            "{} with {} frames: {} accesses, {} faults",
            self.policy.algorithm(),
            self.table.frame_count(),
            self.counters.accesses(),
            self.counters.faults()
        );

        SimulationReport {
            algorithm: self.policy.algorithm(),
            frame_count: self.table.frame_count(),
            counters: self.counters,
            frames: self.table.frames().to_vec(),
        }
    }
}

impl<'a> Iterator for Simulator<'a> {
    type Item = Access;

    fn next(&mut self) -> Option<Access> {
        self.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.sequence.len() - self.time;
        (left, Some(left))
    }
}
