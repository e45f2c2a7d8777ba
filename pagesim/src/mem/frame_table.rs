use std::fmt;

use super::{FrameIndex, PageId};
use crate::error::{Error, ErrorKind, ErrorOrigin, Result};

/// A single slot of the frame pool.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub struct Frame {
    page: Option<PageId>,
    loaded_at: usize,
    last_used: usize,
}

impl Frame {
    pub const EMPTY: Frame = Frame {
        page: None,
        loaded_at: 0,
        last_used: 0,
    };

    /// Returns the resident page, if any.
    #[inline]
    pub fn page(&self) -> Option<PageId> {
        self.page
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.page.is_some()
    }

    /// Logical time the resident page was loaded at.
    #[inline]
    pub fn loaded_at(&self) -> usize {
        self.loaded_at
    }

    /// Logical time the resident page was last accessed at.
    #[inline]
    pub fn last_used(&self) -> usize {
        self.last_used
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "page {}", page),
            None => f.write_str("empty"),
        }
    }
}

/// Fixed size frame pool together with the page table mapping pages onto it.
///
/// The page table is always the exact inverse of the frame residency:
/// `page_table[p] == Some(i)` if and only if frame `i` holds page `p`.
#[derive(Clone, Debug)]
pub struct FrameTable {
    frames: Box<[Frame]>,
    page_table: Box<[Option<FrameIndex>]>,
    resident: usize,
}

impl FrameTable {
    /// Creates an empty frame table with `frame_count` frames for `page_count` pages.
    pub fn new(frame_count: usize, page_count: usize) -> Result<Self> {
        let mut frames = Vec::new();
        frames.try_reserve_exact(frame_count)?;
        frames.resize(frame_count, Frame::EMPTY);

        let mut page_table = Vec::new();
        page_table.try_reserve_exact(page_count)?;
        page_table.resize(page_count, None);

        Ok(Self {
            frames: frames.into_boxed_slice(),
            page_table: page_table.into_boxed_slice(),
            resident: 0,
        })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn page_count(&self) -> usize {
        self.page_table.len()
    }

    /// Number of frames currently holding a page.
    pub fn resident(&self) -> usize {
        self.resident
    }

    #[inline]
    pub fn lookup(&self, page: PageId) -> Option<FrameIndex> {
        self.page_table[page]
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.resident == self.frames.len()
    }

    /// Returns the lowest empty frame.
    #[inline]
    pub fn find_free_frame(&self) -> Option<FrameIndex> {
        if self.is_full() {
            None
        } else {
            self.frames.iter().position(|f| !f.is_valid())
        }
    }

    /// Loads `page` into `frame` at logical time `now`.
    ///
    /// Any page previously occupying the frame loses its mapping.
    ///
    /// # Panics
    ///
    /// Panics if `page` is already resident.
    pub fn install(&mut self, page: PageId, frame: FrameIndex, now: usize) {
        assert!(
            self.page_table[page].is_none(),
            "page {} already resident in frame {:?}",
            page,
            self.page_table[page]
        );

        if self.release(frame).is_some() {
            log::trace!("frame {} overwritten without eviction", frame);
        }

        self.frames[frame] = Frame {
            page: Some(page),
            loaded_at: now,
            last_used: now,
        };
        self.page_table[page] = Some(frame);
        self.resident += 1;
    }

    /// Records a hit on `frame` at logical time `now`.
    #[inline]
    pub fn touch(&mut self, frame: FrameIndex, now: usize) {
        self.frames[frame].last_used = now;
    }

    /// Empties `frame` and clears the page table entry of its page.
    pub fn release(&mut self, frame: FrameIndex) -> Option<PageId> {
        let page = self.frames[frame].page.take()?;
        self.page_table[page] = None;
        self.resident -= 1;
        Some(page)
    }

    /// Verifies that the page table is the exact inverse of the frame residency.
    pub fn check_consistency(&self) -> Result<()> {
        let violation = || Error(ErrorOrigin::FrameTable, ErrorKind::InvariantViolation);

        let mut resident = 0;
        for (idx, frame) in self.frames.iter().enumerate() {
            if let Some(page) = frame.page {
                resident += 1;
                if self.page_table.get(page).copied().flatten() != Some(idx) {
                    return Err(violation().log_error(format!("frame {} holds page {}", idx, page)));
                }
            }
        }

        for (page, entry) in self.page_table.iter().enumerate() {
            if let Some(idx) = *entry {
                let holds = self.frames.get(idx).and_then(Frame::page);
                if holds != Some(page) {
                    return Err(violation().log_error(format!("page {} maps to frame {}", page, idx)));
                }
            }
        }

        if resident != self.resident {
            return Err(violation().log_error("resident frame count mismatch"));
        }

        Ok(())
    }
}
