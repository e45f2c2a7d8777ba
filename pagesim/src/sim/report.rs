use std::fmt;

use itertools::Itertools;

use crate::config::Algorithm;
use crate::mem::Frame;
use crate::stats::{Counters, Rates};

/// Final state of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationReport {
    pub algorithm: Algorithm,
    pub frame_count: usize,
    pub counters: Counters,
    /// Snapshot of the frame pool after the last access.
    pub frames: Vec<Frame>,
}

impl SimulationReport {
    pub fn fault_count(&self) -> usize {
        self.counters.faults()
    }

    pub fn hit_count(&self) -> usize {
        self.counters.hits()
    }

    pub fn rates(&self) -> Rates {
        self.counters.rates()
    }

    /// One line rendering of the frame snapshot, e.g. `[0: page 4] [1: empty]`.
    pub fn frame_state(&self) -> String {
        self.frames
            .iter()
            .enumerate()
            .map(|(idx, frame)| format!("[{}: {}]", idx, frame))
            .join(" ")
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rates = self.rates();
        writeln!(f, "algorithm: {}", self.algorithm)?;
        writeln!(f, "frames: {}", self.frame_count)?;
        writeln!(f, "accesses: {}", self.counters.accesses())?;
        writeln!(f, "faults: {}", self.fault_count())?;
        writeln!(f, "hits: {}", self.hit_count())?;
        writeln!(f, "fault rate: {:.2}%", rates.fault_rate * 100.0)?;
        writeln!(f, "hit rate: {:.2}%", rates.hit_rate * 100.0)?;
        write!(f, "final frames: {}", self.frame_state())
    }
}
