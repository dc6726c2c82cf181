//! Frame table - the simulated physical memory.

use std::collections::BTreeSet;

use crate::common::{Error, FrameId, PageId, Result};
use crate::memory::{Frame, PageDirectory};

/// Fixed pool of frames plus the directory that indexes them.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────┐
/// │                      FrameTable                         │
/// │  ┌──────────────┐  ┌───────────────────────────────┐    │
/// │  │  directory   │  │      frames: Vec<Frame>       │    │
/// │  │PageId → Fid  │─▶│  [Frame0] [Frame1] [Frame2]   │    │
/// │  └──────────────┘  └───────────────────────────────┘    │
/// │  ┌──────────────┐                                       │
/// │  │  free_set    │  lowest index handed out first        │
/// │  │BTreeSet<Fid> │                                       │
/// │  └──────────────┘                                       │
/// └─────────────────────────────────────────────────────────┘
/// ```
///
/// All mutation goes through [`FrameTable::install`] and
/// [`FrameTable::release`], which update the frame and the directory in
/// the same call. No caller can observe one updated without the other.
#[derive(Debug, Clone)]
pub struct FrameTable {
    frames: Vec<Frame>,
    directory: PageDirectory,
    free_set: BTreeSet<FrameId>,
}

impl FrameTable {
    /// Create a table of `capacity` empty frames.
    ///
    /// # Panics
    /// Panics if `capacity` is 0. [`SimConfig`](crate::SimConfig) rejects
    /// that before a table is ever built.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        Self {
            frames: vec![Frame::new(); capacity],
            directory: PageDirectory::with_capacity(capacity),
            free_set: (0..capacity).map(FrameId::new).collect(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of frames.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.frames.len()
    }

    /// Number of frames holding a page.
    #[inline]
    pub fn resident_count(&self) -> usize {
        self.directory.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_set.is_empty()
    }

    /// O(1) residency test.
    #[inline]
    pub fn contains(&self, page: PageId) -> bool {
        self.directory.contains(page)
    }

    /// Frame holding `page`, if resident.
    #[inline]
    pub fn frame_of(&self, page: PageId) -> Option<FrameId> {
        self.directory.get(page)
    }

    /// Page held by `frame`. Out-of-range frames read as empty.
    #[inline]
    pub fn page_at(&self, frame: FrameId) -> Option<PageId> {
        self.frames.get(frame.0).and_then(Frame::page_id)
    }

    /// The lowest-indexed empty frame.
    #[inline]
    pub fn find_free_frame(&self) -> Option<FrameId> {
        self.free_set.first().copied()
    }

    pub fn directory(&self) -> &PageDirectory {
        &self.directory
    }

    /// Every frame in index order with its page, if any.
    pub fn iter(&self) -> impl Iterator<Item = (FrameId, Option<PageId>)> + '_ {
        self.frames
            .iter()
            .enumerate()
            .map(|(idx, frame)| (FrameId::new(idx), frame.page_id()))
    }

    /// Occupied frames in index order.
    pub fn resident(&self) -> impl Iterator<Item = (FrameId, PageId)> + '_ {
        self.iter().filter_map(|(fid, page)| page.map(|p| (fid, p)))
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Load `page` into `frame`, evicting whatever the frame held.
    ///
    /// Returns the evicted page. The evicted page's directory entry is removed
    /// and the new one inserted before returning.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` if `frame` is out of range or `page` is
    ///   already resident somewhere.
    pub fn install(&mut self, frame: FrameId, page: PageId) -> Result<Option<PageId>> {
        if let Some(existing) = self.directory.get(page) {
            return Err(Error::invariant(format!(
                "page {} is already resident in {}",
                page, existing
            )));
        }
        let capacity = self.frames.len();
        let slot = self.frames.get_mut(frame.0).ok_or_else(|| {
            Error::invariant(format!("{} is outside a table of {} frames", frame, capacity))
        })?;

        let evicted = slot.load(page);
        if let Some(old) = evicted {
            self.directory.remove(old);
        }
        self.directory.insert(page, frame);
        self.free_set.remove(&frame);

        Ok(evicted)
    }

    /// Empty `frame`, returning the page it held.
    pub fn release(&mut self, frame: FrameId) -> Option<PageId> {
        let page = self.frames.get_mut(frame.0)?.reset()?;
        self.directory.remove(page);
        self.free_set.insert(frame);
        Some(page)
    }

    // ========================================================================
    // Consistency
    // ========================================================================

    /// Check that the directory is a bijection onto the resident pages and
    /// that the free set lists exactly the empty frames.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first divergence found.
    pub fn verify(&self) -> Result<()> {
        let mut occupied = 0;
        for (fid, page) in self.iter() {
            match page {
                Some(page) => {
                    occupied += 1;
                    if self.directory.get(page) != Some(fid) {
                        return Err(Error::invariant(format!(
                            "{} holds page {} but the directory maps it to {:?}",
                            fid,
                            page,
                            self.directory.get(page)
                        )));
                    }
                    if self.free_set.contains(&fid) {
                        return Err(Error::invariant(format!("{} is occupied but marked free", fid)));
                    }
                }
                None if !self.free_set.contains(&fid) => {
                    return Err(Error::invariant(format!("{} is empty but not marked free", fid)));
                }
                None => {}
            }
        }

        if occupied != self.directory.len() {
            return Err(Error::invariant(format!(
                "{} occupied frames but {} directory entries",
                occupied,
                self.directory.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(n: u32) -> PageId {
        PageId::new(n)
    }

    fn fid(n: usize) -> FrameId {
        FrameId::new(n)
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = FrameTable::new(3);
        assert_eq!(table.capacity(), 3);
        assert_eq!(table.resident_count(), 0);
        assert!(!table.is_full());
        assert_eq!(table.find_free_frame(), Some(fid(0)));
        table.verify().unwrap();
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn test_zero_capacity_panics() {
        FrameTable::new(0);
    }

    #[test]
    fn test_free_frame_is_lowest_index() {
        let mut table = FrameTable::new(4);
        table.install(fid(0), pid(10)).unwrap();
        table.install(fid(1), pid(11)).unwrap();
        table.install(fid(2), pid(12)).unwrap();
        assert_eq!(table.find_free_frame(), Some(fid(3)));

        table.release(fid(1));
        assert_eq!(table.find_free_frame(), Some(fid(1)));

        table.release(fid(0));
        assert_eq!(table.find_free_frame(), Some(fid(0)));
        table.verify().unwrap();
    }

    #[test]
    fn test_install_replaces_occupant() {
        let mut table = FrameTable::new(2);
        assert_eq!(table.install(fid(0), pid(7)).unwrap(), None);
        assert_eq!(table.install(fid(1), pid(0)).unwrap(), None);
        assert!(table.is_full());

        assert_eq!(table.install(fid(0), pid(2)).unwrap(), Some(pid(7)));
        assert!(!table.contains(pid(7)));
        assert_eq!(table.frame_of(pid(2)), Some(fid(0)));
        assert_eq!(table.page_at(fid(0)), Some(pid(2)));
        assert_eq!(table.resident_count(), 2);
        table.verify().unwrap();
    }

    #[test]
    fn test_install_rejects_duplicate_page() {
        let mut table = FrameTable::new(2);
        table.install(fid(0), pid(5)).unwrap();

        let err = table.install(fid(1), pid(5)).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
        // Table unchanged
        assert_eq!(table.page_at(fid(1)), None);
        table.verify().unwrap();
    }

    #[test]
    fn test_install_rejects_out_of_range_frame() {
        let mut table = FrameTable::new(2);
        let err = table.install(fid(2), pid(5)).unwrap_err();
        assert!(!err.is_configuration());
        assert!(!table.contains(pid(5)));
    }

    #[test]
    fn test_resident_iterates_in_frame_order() {
        let mut table = FrameTable::new(3);
        table.install(fid(2), pid(9)).unwrap();
        table.install(fid(0), pid(4)).unwrap();

        let resident: Vec<_> = table.resident().collect();
        assert_eq!(resident, vec![(fid(0), pid(4)), (fid(2), pid(9))]);
    }

    #[test]
    fn test_release_empty_frame_is_noop() {
        let mut table = FrameTable::new(2);
        assert_eq!(table.release(fid(1)), None);
        assert_eq!(table.release(fid(5)), None);
        table.verify().unwrap();
    }
}
