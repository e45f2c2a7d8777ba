/*!
Fault counters and the rates derived from them.
*/

use std::fmt;

/// Access and fault counters of a simulation run.
///
/// Both values only ever grow while the simulation runs.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Counters {
    pub(crate) accesses: usize,
    pub(crate) faults: usize,
}

impl Counters {
    /// Creates counters from raw values, e.g. to compute rates of external runs.
    ///
    /// `faults` is capped to `accesses`.
    pub fn new(accesses: usize, faults: usize) -> Self {
        Self {
            accesses,
            faults: faults.min(accesses),
        }
    }

    pub fn accesses(&self) -> usize {
        self.accesses
    }

    pub fn faults(&self) -> usize {
        self.faults
    }

    pub fn hits(&self) -> usize {
        self.accesses - self.faults
    }

    pub fn rates(&self) -> Rates {
        compute_rates(self)
    }
}

/// Fault and hit rate, both within `0.0..=1.0`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rates {
    pub fault_rate: f64,
    pub hit_rate: f64,
}

impl fmt::Display for Rates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "fault rate: {:.2}%, hit rate: {:.2}%",
            self.fault_rate * 100.0,
            self.hit_rate * 100.0
        )
    }
}

/// Derives the fault and hit rate from `counters`.
///
/// A run without accesses has a fault rate of zero.
pub fn compute_rates(counters: &Counters) -> Rates {
    let fault_rate = if counters.accesses == 0 {
        0.0
    } else {
        counters.faults as f64 / counters.accesses as f64
    };

    Rates {
        fault_rate,
        hit_rate: 1.0 - fault_rate,
    }
}
