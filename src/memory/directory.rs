//! Page directory: which frame holds each resident page.

use std::collections::HashMap;

use crate::common::{FrameId, PageId};

/// Maps resident page IDs to the frame holding them.
///
/// Only [`FrameTable`](super::FrameTable) mutates a directory, always in the
/// same call that changes the frame, so the map stays a bijection onto the
/// resident pages.
#[derive(Debug, Clone, Default)]
pub struct PageDirectory {
    entries: HashMap<PageId, FrameId>,
}

impl PageDirectory {
    /// Create an empty directory sized for `capacity` frames.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Frame holding `page`, if it is resident.
    #[inline]
    pub fn get(&self, page: PageId) -> Option<FrameId> {
        self.entries.get(&page).copied()
    }

    #[inline]
    pub fn contains(&self, page: PageId) -> bool {
        self.entries.contains_key(&page)
    }

    /// Number of resident pages.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, page: PageId, frame: FrameId) -> Option<FrameId> {
        self.entries.insert(page, frame)
    }

    pub(crate) fn remove(&mut self, page: PageId) -> Option<FrameId> {
        self.entries.remove(&page)
    }

    /// Iterate over `(page, frame)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (PageId, FrameId)> + '_ {
        self.entries.iter().map(|(&page, &frame)| (page, frame))
    }
}
