use std::ops::Index;

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::mem::PageId;

/// An immutable, ordered sequence of instruction indices.
///
/// Every entry is guaranteed to be smaller than the instruction count the
/// sequence was created for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessSequence {
    addresses: Box<[usize]>,
    total_instructions: usize,
}

impl AccessSequence {
    /// Wraps an explicit list of instruction indices, e.g. a recorded trace.
    pub fn from_vec(total_instructions: usize, addresses: Vec<usize>) -> Result<Self> {
        if total_instructions == 0 {
            return Err(Error(
                ErrorOrigin::Workload,
                ErrorKind::InvalidInstructionCount,
            ));
        }
        if let Some(addr) = addresses.iter().find(|&&a| a >= total_instructions) {
            return Err(Error(ErrorOrigin::Workload, ErrorKind::OutOfBounds)
                .log_debug(format!("{} >= {}", addr, total_instructions)));
        }
        Ok(Self {
            addresses: addresses.into_boxed_slice(),
            total_instructions,
        })
    }

    pub(crate) fn from_generated(total_instructions: usize, addresses: Vec<usize>) -> Self {
        debug_assert!(addresses.iter().all(|&a| a < total_instructions));
        Self {
            addresses: addresses.into_boxed_slice(),
            total_instructions,
        }
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn total_instructions(&self) -> usize {
        self.total_instructions
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.addresses
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.addresses.iter().copied()
    }

    /// Returns the page accessed at position `index`.
    #[inline]
    pub fn page_at(&self, index: usize, page_size: usize) -> PageId {
        self.addresses[index] / page_size
    }

    /// Iterates over the pages touched by this sequence.
    pub fn pages(&self, page_size: usize) -> impl Iterator<Item = PageId> + '_ {
        self.addresses.iter().map(move |&a| a / page_size)
    }
}

impl Index<usize> for AccessSequence {
    type Output = usize;

    fn index(&self, index: usize) -> &usize {
        &self.addresses[index]
    }
}

impl<'a> IntoIterator for &'a AccessSequence {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.addresses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_bounds() {
        let seq = AccessSequence::from_vec(10, vec![0, 9, 3]).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq[1], 9);

        let err = AccessSequence::from_vec(10, vec![0, 10]).unwrap_err();
        assert_eq!(err, Error(ErrorOrigin::Workload, ErrorKind::OutOfBounds));

        assert!(AccessSequence::from_vec(0, vec![]).is_err());
    }

    #[test]
    fn pages_divide_by_page_size() {
        let seq = AccessSequence::from_vec(40, vec![0, 9, 10, 39]).unwrap();
        assert_eq!(seq.pages(10).collect::<Vec<_>>(), vec![0, 0, 1, 3]);
        assert_eq!(seq.page_at(3, 10), 3);
    }
}
