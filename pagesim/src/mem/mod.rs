/*!
This module covers the simulated memory: the fixed size frame pool and
the page table that maps pages onto it.
*/

pub mod frame_table;

#[doc(hidden)]
pub use frame_table::{Frame, FrameTable};

/// Identifier of a virtual page (`instruction / page_size`).
pub type PageId = usize;

/// Index of a frame inside the [`FrameTable`].
pub type FrameIndex = usize;
