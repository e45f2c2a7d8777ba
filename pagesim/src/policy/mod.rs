/*!
Eviction policies.

A policy is only consulted when a fault occurs and every frame is occupied.
It picks a victim frame which is then released, clearing the page table entry
of the evicted page, before the faulting page gets installed.

The available policies are selected through [`Algorithm`] and dispatched
by [`ReplacementPolicy`]:

- [`Fifo`] evicts the page that was loaded first.
- [`Lru`] evicts the page that was accessed least recently.
- [`Opt`] evicts the page whose next access lies farthest in the future.
*/

pub mod fifo;
pub mod lru;
pub mod opt;

#[doc(hidden)]
pub use fifo::Fifo;
#[doc(hidden)]
pub use lru::Lru;
#[doc(hidden)]
pub use opt::Opt;

use crate::config::Algorithm;
use crate::error::Result;
use crate::mem::{Frame, FrameIndex, FrameTable, PageId};
use crate::workload::AccessSequence;

/// Selects the frame to evict from a full frame pool.
pub trait VictimSelector {
    /// Returns the index of the victim frame at logical time `now`.
    ///
    /// `frames` is never empty and all frames hold a page.
    fn select_victim(&self, frames: &[Frame], now: usize) -> FrameIndex;
}

/// Returns the first frame with the smallest key.
///
/// Ties resolve to the lowest frame index.
#[inline]
pub(crate) fn first_min_by_key<F: Fn(&Frame) -> usize>(frames: &[Frame], key: F) -> FrameIndex {
    let mut victim = 0;
    let mut min = usize::MAX;
    for (idx, frame) in frames.iter().enumerate() {
        let k = key(frame);
        if idx == 0 || k < min {
            min = k;
            victim = idx;
        }
    }
    victim
}

/// The policy driving a single simulation.
#[derive(Clone, Debug)]
pub enum ReplacementPolicy {
    Fifo(Fifo),
    Lru(Lru),
    Opt(Opt),
}

impl ReplacementPolicy {
    /// Creates the policy for `algorithm`.
    ///
    /// OPT needs the whole access sequence up front.
    pub fn new(
        algorithm: Algorithm,
        sequence: &AccessSequence,
        page_size: usize,
        page_count: usize,
    ) -> Result<Self> {
        Ok(match algorithm {
            Algorithm::Fifo => ReplacementPolicy::Fifo(Fifo),
            Algorithm::Lru => ReplacementPolicy::Lru(Lru),
            Algorithm::Opt => ReplacementPolicy::Opt(Opt::new(sequence, page_size, page_count)?),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            ReplacementPolicy::Fifo(_) => Algorithm::Fifo,
            ReplacementPolicy::Lru(_) => Algorithm::Lru,
            ReplacementPolicy::Opt(_) => Algorithm::Opt,
        }
    }

    /// Picks a victim in the full `table` and releases it.
    ///
    /// Returns the released frame and the page it held.
    ///
    /// # Panics
    ///
    /// Panics if the table still has free frames or the policy selects a frame
    /// outside of the table. Both are logic errors in the simulator.
    pub fn evict(&self, table: &mut FrameTable, now: usize) -> (FrameIndex, Option<PageId>) {
        assert!(table.is_full(), "eviction requested with free frames left");

        let victim = self.select_victim(table.frames(), now);
        assert!(
            victim < table.frame_count(),
            "{} selected frame {} out of {}",
            self.algorithm(),
            victim,
            table.frame_count()
        );

        (victim, table.release(victim))
    }
}

impl VictimSelector for ReplacementPolicy {
    #[inline]
    fn select_victim(&self, frames: &[Frame], now: usize) -> FrameIndex {
        match self {
            ReplacementPolicy::Fifo(p) => p.select_victim(frames, now),
            ReplacementPolicy::Lru(p) => p.select_victim(frames, now),
            ReplacementPolicy::Opt(p) => p.select_victim(frames, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table() -> FrameTable {
        let mut table = FrameTable::new(3, 8).unwrap();
        table.install(4, 0, 0);
        table.install(5, 1, 1);
        table.install(6, 2, 2);
        table
    }

    #[test]
    fn evict_releases_victim() {
        let seq = AccessSequence::from_vec(8, vec![4, 5, 6, 7]).unwrap();
        let policy = ReplacementPolicy::new(Algorithm::Fifo, &seq, 1, 8).unwrap();
        let mut table = full_table();

        assert_eq!(policy.evict(&mut table, 3), (0, Some(4)));
        assert_eq!(table.lookup(4), None);
        assert_eq!(table.find_free_frame(), Some(0));
        table.check_consistency().unwrap();
    }

    #[test]
    #[should_panic]
    fn evict_with_free_frames_panics() {
        let seq = AccessSequence::from_vec(8, vec![0]).unwrap();
        let policy = ReplacementPolicy::new(Algorithm::Lru, &seq, 1, 8).unwrap();
        let mut table = FrameTable::new(2, 8).unwrap();
        policy.evict(&mut table, 0);
    }

    #[test]
    fn policy_reports_algorithm() {
        let seq = AccessSequence::from_vec(8, vec![0, 1]).unwrap();
        for &algorithm in Algorithm::ALL.iter() {
            let policy = ReplacementPolicy::new(algorithm, &seq, 1, 8).unwrap();
            assert_eq!(policy.algorithm(), algorithm);
        }
    }

    #[test]
    fn first_min_prefers_lowest_index() {
        let mut table = FrameTable::new(3, 8).unwrap();
        table.install(0, 0, 5);
        table.install(1, 1, 2);
        table.install(2, 2, 2);
        assert_eq!(first_min_by_key(table.frames(), Frame::loaded_at), 1);
    }
}
