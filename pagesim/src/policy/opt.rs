/*!
Belady's optimal replacement.

OPT evicts the resident page whose next access lies farthest in the future.
Frames are scanned in index order: the first page that is never accessed
again is evicted on the spot, otherwise the frame with the strictly largest
next use wins, so ties go to the lower index.

[`scan_victim`] is the reference implementation and rescans the remaining
sequence for every frame on every fault. [`Opt`] precomputes the position of
the next access for every position of the sequence in a single backward pass
and resolves a victim in `O(frames)`. Both select the same frame.
*/

use super::VictimSelector;
use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::mem::{Frame, FrameIndex, PageId};
use crate::workload::AccessSequence;

/// Reference OPT selection by rescanning the rest of `sequence`.
pub fn scan_victim(
    frames: &[Frame],
    sequence: &AccessSequence,
    page_size: usize,
    now: usize,
) -> FrameIndex {
    let mut farthest: Option<(FrameIndex, usize)> = None;

    for (idx, frame) in frames.iter().enumerate() {
        let page = match frame.page() {
            Some(page) => page,
            None => return idx,
        };

        let next_use = (now + 1..sequence.len()).find(|&j| sequence.page_at(j, page_size) == page);

        match next_use {
            None => return idx,
            Some(next) => {
                if farthest.map_or(true, |(_, far)| next > far) {
                    farthest = Some((idx, next));
                }
            }
        }
    }

    farthest.map_or(0, |(idx, _)| idx)
}

/// OPT backed by a precomputed next use table.
#[derive(Clone, Debug)]
pub struct Opt {
    /// `next_use[i]` is the next position after `i` accessing the same page,
    /// or the sequence length if there is none.
    next_use: Box<[usize]>,
}

impl Opt {
    pub fn new(sequence: &AccessSequence, page_size: usize, page_count: usize) -> Result<Self> {
        if sequence.total_instructions() > page_count * page_size {
            return Err(Error(ErrorOrigin::Policy, ErrorKind::OutOfBounds).log_error(format!(
                "sequence spans {} instructions, only {} pages of {} available",
                sequence.total_instructions(),
                page_count,
                page_size
            )));
        }

        let never = sequence.len();

        let mut last_seen: Vec<usize> = Vec::new();
        last_seen
            .try_reserve_exact(page_count)
            .map_err(|_| Error(ErrorOrigin::Policy, ErrorKind::AllocationFailed))?;
        last_seen.resize(page_count, never);

        let mut next_use = Vec::new();
        next_use
            .try_reserve_exact(never)
            .map_err(|_| Error(ErrorOrigin::Policy, ErrorKind::AllocationFailed))?;
        next_use.resize(never, never);

        for i in (0..never).rev() {
            let page: PageId = sequence.page_at(i, page_size);
            next_use[i] = last_seen[page];
            last_seen[page] = i;
        }

        Ok(Self {
            next_use: next_use.into_boxed_slice(),
        })
    }

    /// Position of the next access to the page of a frame last used at `last_used`.
    ///
    /// Returns `None` if the page is never accessed again.
    #[inline]
    pub fn next_use(&self, last_used: usize) -> Option<usize> {
        let next = self.next_use[last_used];
        if next == self.next_use.len() {
            None
        } else {
            Some(next)
        }
    }
}

impl VictimSelector for Opt {
    /// The frame's `last_used` time has to be the position of the most recent
    /// access to its page, which holds for every frame maintained by the
    /// simulator.
    fn select_victim(&self, frames: &[Frame], now: usize) -> FrameIndex {
        let mut farthest: Option<(FrameIndex, usize)> = None;

        for (idx, frame) in frames.iter().enumerate() {
            if !frame.is_valid() {
                return idx;
            }

            match self.next_use(frame.last_used()) {
                None => return idx,
                Some(next) => {
                    debug_assert!(next > now);
                    if farthest.map_or(true, |(_, far)| next > far) {
                        farthest = Some((idx, next));
                    }
                }
            }
        }

        farthest.map_or(0, |(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::FrameTable;

    fn sequence(pages: &[usize]) -> AccessSequence {
        AccessSequence::from_vec(16, pages.to_vec()).unwrap()
    }

    #[test]
    fn next_use_table() {
        let seq = sequence(&[0, 1, 0, 2, 1]);
        let opt = Opt::new(&seq, 1, 16).unwrap();

        assert_eq!(opt.next_use(0), Some(2));
        assert_eq!(opt.next_use(1), Some(4));
        assert_eq!(opt.next_use(2), None);
        assert_eq!(opt.next_use(3), None);
        assert_eq!(opt.next_use(4), None);
    }

    #[test]
    fn evicts_farthest_next_use() {
        // time 3 faults on page 3 with pages 0, 1, 2 resident
        let seq = sequence(&[0, 1, 2, 3, 1, 0, 2]);
        let mut table = FrameTable::new(3, 16).unwrap();
        table.install(0, 0, 0);
        table.install(1, 1, 1);
        table.install(2, 2, 2);

        let opt = Opt::new(&seq, 1, 16).unwrap();
        assert_eq!(opt.select_victim(table.frames(), 3), 2);
        assert_eq!(scan_victim(table.frames(), &seq, 1, 3), 2);
    }

    #[test]
    fn never_used_again_wins_in_scan_order() {
        // pages 1 and 2 are never accessed after time 3
        let seq = sequence(&[0, 1, 2, 3, 0]);
        let mut table = FrameTable::new(3, 16).unwrap();
        table.install(0, 0, 0);
        table.install(1, 1, 1);
        table.install(2, 2, 2);

        let opt = Opt::new(&seq, 1, 16).unwrap();
        assert_eq!(opt.select_victim(table.frames(), 3), 1);
        assert_eq!(scan_victim(table.frames(), &seq, 1, 3), 1);
    }

    #[test]
    fn rejects_sequence_wider_than_pages() {
        let seq = sequence(&[0, 15]);
        let err = Opt::new(&seq, 1, 8).unwrap_err();
        assert_eq!(err, Error(ErrorOrigin::Policy, ErrorKind::OutOfBounds));

        assert!(Opt::new(&seq, 2, 8).is_ok());
    }

    #[test]
    fn respects_page_size() {
        // instructions 0..4 are page 0, 4..8 page 1 and so on
        let seq = AccessSequence::from_vec(16, vec![0, 4, 8, 12, 5, 1]).unwrap();
        let mut table = FrameTable::new(3, 4).unwrap();
        table.install(0, 0, 0);
        table.install(1, 1, 1);
        table.install(2, 2, 2);

        let opt = Opt::new(&seq, 4, 4).unwrap();
        assert_eq!(opt.select_victim(table.frames(), 3), 2);
        assert_eq!(scan_victim(table.frames(), &seq, 4, 3), 2);
    }
}
