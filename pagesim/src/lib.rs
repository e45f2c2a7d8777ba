//!
//! # pagesim
//!
//! Page replacement made measurable
//!
//! ## Introduction
//!
//! pagesim models a fixed pool of memory frames in front of a page table and drives it with a
//! synthetic stream of instruction accesses. Every access either hits a resident page or faults.
//! On a fault with no free frame left an eviction policy decides which page has to go. The
//! simulator counts faults and hits so that policies, frame counts and workloads can be compared.
//!
//! ```text
//! +--------+     +-----------+     +----------------+     +-----------+
//! | Config | --> | Workload  | --> |   Simulator    | --> |  Report   |
//! +--------+     | Generator |     |                |     | (counters,|
//!                +-----------+     | +------------+ |     |  rates,   |
//!                 AccessSequence   | | FrameTable | |     |  frames)  |
//!                                  | +------------+ |     +-----------+
//!                                  | +------------+ |
//!                                  | |   Policy   | |
//!                                  | +------------+ |
//!                                  +----------------+
//! ```
//!
//! # Structure
//!
//! [config](crate::config) holds the validated simulation parameters,
//! [workload](crate::workload) generates access sequences from one of five access pattern models,
//! [mem](crate::mem) contains the frame table and page table, [policy](crate::policy) the FIFO,
//! LRU and OPT eviction policies, [sim](crate::sim) the driver that ties everything together,
//! [stats](crate::stats) the fault and hit rates and [trials](crate::trials) helpers for running
//! several independent simulations over one sequence.
//!
//! ## Getting started
//!
//! ```
//! use pagesim::prelude::v1::*;
//!
//! # fn main() -> Result<()> {
//! let config = ConfigBuilder::new()
//!     .frame_count(4)
//!     .algorithm(Algorithm::Lru)
//!     .access_pattern(AccessPattern::LocalityRandom)
//!     .build()?;
//!
//! let report = run(&config, 0x1234)?;
//! assert_eq!(report.fault_count() + report.hit_count(), config.sequence_length());
//! # Ok(())
//! # }
//! ```
//!
//! Simulations are fully deterministic: the same config and seed always produce the same
//! sequence and therefore the same fault count.

pub mod error;

pub mod config;

pub mod workload;

pub mod mem;

pub mod policy;

pub mod sim;

pub mod stats;

pub mod trials;

#[doc(hidden)]
pub mod prelude {
    pub mod v1 {
        pub use crate::config::*;
        pub use crate::error::*;
        pub use crate::mem::*;
        pub use crate::policy::*;
        pub use crate::sim::*;
        pub use crate::stats::*;
        pub use crate::trials::*;
        pub use crate::workload::*;
    }
    pub use v1::*;
}
