//! Frame - a slot of simulated physical memory.
//!
//! A [`Frame`] records which page is loaded, if any. Policy metadata
//! (reference bits, age counters, recency links) is owned by the replacer
//! and indexed by [`FrameId`](crate::FrameId), so a frame only carries
//! residency.

use crate::common::PageId;

/// A frame in the simulated memory.
///
/// The frame table has a fixed number of frames allocated at startup.
/// Each frame holds at most one resident page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    /// Which page is currently loaded, or None if frame is empty.
    resident: Option<PageId>,
}

impl Frame {
    /// Create a new empty frame.
    pub fn new() -> Self {
        Self { resident: None }
    }

    /// Get the page loaded in this frame.
    #[inline]
    pub fn page_id(&self) -> Option<PageId> {
        self.resident
    }

    /// Check if the frame is empty (no page loaded).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resident.is_none()
    }

    /// Load `page`, returning the page it replaced.
    #[inline]
    pub(crate) fn load(&mut self, page: PageId) -> Option<PageId> {
        self.resident.replace(page)
    }

    /// Reset the frame to empty state, returning the page it held.
    pub(crate) fn reset(&mut self) -> Option<PageId> {
        self.resident.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_new() {
        let frame = Frame::new();
        assert!(frame.is_empty());
        assert_eq!(frame.page_id(), None);
    }

    #[test]
    fn test_frame_load_returns_previous() {
        let mut frame = Frame::new();

        assert_eq!(frame.load(PageId::new(42)), None);
        assert_eq!(frame.page_id(), Some(PageId::new(42)));
        assert!(!frame.is_empty());

        assert_eq!(frame.load(PageId::new(7)), Some(PageId::new(42)));
        assert_eq!(frame.page_id(), Some(PageId::new(7)));
    }

    #[test]
    fn test_frame_reset() {
        let mut frame = Frame::new();
        frame.load(PageId::new(99));

        assert_eq!(frame.reset(), Some(PageId::new(99)));
        assert!(frame.is_empty());
        assert_eq!(frame.reset(), None);
    }
}
