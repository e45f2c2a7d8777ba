use super::{first_min_by_key, VictimSelector};
use crate::mem::{Frame, FrameIndex};

/// First in, first out.
///
/// Evicts the frame with the smallest load time. Hits do not influence the
/// order in which pages leave the pool.
#[derive(Copy, Clone, Debug, Default)]
pub struct Fifo;

impl VictimSelector for Fifo {
    #[inline]
    fn select_victim(&self, frames: &[Frame], _now: usize) -> FrameIndex {
        first_min_by_key(frames, Frame::loaded_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mem::FrameTable;

    #[test]
    fn evicts_oldest_load() {
        let mut table = FrameTable::new(3, 8).unwrap();
        table.install(0, 0, 3);
        table.install(1, 1, 1);
        table.install(2, 2, 2);
        // a recent hit on the oldest page does not save it
        table.touch(1, 10);

        assert_eq!(Fifo.select_victim(table.frames(), 11), 1);
    }
}
