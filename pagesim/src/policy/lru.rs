use super::{first_min_by_key, VictimSelector};
use crate::mem::{Frame, FrameIndex};

/// Least recently used.
///
/// Evicts the frame with the smallest last access time.
#[derive(Copy, Clone, Debug, Default)]
pub struct Lru;

impl VictimSelector for Lru {
    #[inline]
    fn select_victim(&self, frames: &[Frame], _now: usize) -> FrameIndex {
        first_min_by_key(frames, Frame::last_used)
    }
}
