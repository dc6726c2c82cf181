//! Aging replacement policy.
//!
//! Approximates LRU with an 8-bit history register per frame. On every
//! tick the register shifts right and the frame's reference bit enters at
//! the top, so recent use weighs more than old use:
//!
//! ```text
//! age  = 0b0100_0000   referenced since last tick
//! tick → 0b1010_0000
//! tick → 0b0101_0000   not referenced
//! ```
//!
//! A hit only sets the reference bit; it does not change the eviction order
//! until the next tick.

use crate::common::config::AGE_MSB;
use crate::common::{Error, FrameId, PageId, Result};
use crate::memory::replacer::{FrameMeta, OnlineReplacer, Replacer};
use crate::memory::FrameTable;

/// Evicts the resident frame with the smallest age counter.
#[derive(Debug, Clone)]
pub struct AgingReplacer {
    ref_bits: Vec<bool>,
    ages: Vec<u8>,
}

impl AgingReplacer {
    /// Create a new Aging replacer for `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            ref_bits: vec![false; capacity],
            ages: vec![0; capacity],
        }
    }

    #[inline]
    pub fn age(&self, frame: FrameId) -> u8 {
        self.ages[frame.0]
    }

    #[inline]
    pub fn is_referenced(&self, frame: FrameId) -> bool {
        self.ref_bits[frame.0]
    }
}

impl Replacer for AgingReplacer {
    fn name(&self) -> &'static str {
        "aging"
    }

    fn record_hit(&mut self, frame: FrameId) {
        self.ref_bits[frame.0] = true;
    }

    fn record_install(&mut self, frame: FrameId, _page: PageId) {
        self.ages[frame.0] = 0;
        self.ref_bits[frame.0] = true;
    }

    fn tick(&mut self, frames: &FrameTable) {
        for (fid, _) in frames.resident() {
            let mut age = self.ages[fid.0] >> 1;
            if self.ref_bits[fid.0] {
                age |= AGE_MSB;
            }
            self.ages[fid.0] = age;
            self.ref_bits[fid.0] = false;
        }
    }

    fn meta(&self, frame: FrameId) -> FrameMeta {
        FrameMeta::Aging {
            referenced: self.ref_bits[frame.0],
            age: self.ages[frame.0],
        }
    }
}

impl OnlineReplacer for AgingReplacer {
    fn select_victim(&mut self, frames: &FrameTable) -> Result<FrameId> {
        // min_by_key keeps the first minimum, so ties go to the lowest frame.
        frames
            .resident()
            .map(|(fid, _)| fid)
            .min_by_key(|fid| self.ages[fid.0])
            .ok_or_else(|| Error::invariant("aging found no resident frame while memory is full"))
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

    fn setup(pages: &[u32]) -> (FrameTable, AgingReplacer) {
        let mut frames = FrameTable::new(pages.len());
        let mut replacer = AgingReplacer::new(pages.len());
        for (idx, &p) in pages.iter().enumerate() {
            frames.install(fid(idx), pid(p)).unwrap();
            replacer.record_install(fid(idx), pid(p));
        }
        (frames, replacer)
    }

    #[test]
    fn test_aging_tick_shifts_and_sets_msb() {
        let (frames, mut replacer) = setup(&[1, 2]);

        replacer.tick(&frames);
        assert_eq!(replacer.age(fid(0)), 0x80);
        assert!(!replacer.is_referenced(fid(0)));

        // Frame 0 referenced again, frame 1 idle.
        replacer.record_hit(fid(0));
        replacer.tick(&frames);
        assert_eq!(replacer.age(fid(0)), 0xC0);
        assert_eq!(replacer.age(fid(1)), 0x40);

        replacer.tick(&frames);
        assert_eq!(replacer.age(fid(0)), 0x60);
        assert_eq!(replacer.age(fid(1)), 0x20);
    }

    #[test]
    fn test_aging_hit_takes_effect_only_after_tick() {
        let (frames, mut replacer) = setup(&[1, 2]);
        replacer.tick(&frames);
        replacer.record_hit(fid(1));

        // Both still 0x80: tie goes to frame 0 despite frame 1's fresh hit.
        assert_eq!(replacer.age(fid(1)), 0x80);
        assert_eq!(replacer.select_victim(&frames).unwrap(), fid(0));
    }

    #[test]
    fn test_aging_victim_is_smallest_counter() {
        let (frames, mut replacer) = setup(&[1, 2, 3]);
        replacer.tick(&frames);
        replacer.record_hit(fid(0));
        replacer.record_hit(fid(2));
        replacer.tick(&frames);

        // 0xC0, 0x40, 0xC0
        assert_eq!(replacer.select_victim(&frames).unwrap(), fid(1));
    }

    #[test]
    fn test_aging_tie_breaks_on_lowest_frame() {
        let (frames, mut replacer) = setup(&[4, 5, 6]);
        assert_eq!(replacer.select_victim(&frames).unwrap(), fid(0));
    }

    #[test]
    fn test_aging_install_resets_counter() {
        let (mut frames, mut replacer) = setup(&[1, 2]);
        replacer.tick(&frames);

        frames.install(fid(1), pid(9)).unwrap();
        replacer.record_install(fid(1), pid(9));
        assert_eq!(
            replacer.meta(fid(1)),
            FrameMeta::Aging {
                referenced: true,
                age: 0
            }
        );
    }

    #[test]
    fn test_aging_tick_skips_empty_frames() {
        let mut frames = FrameTable::new(2);
        let mut replacer = AgingReplacer::new(2);
        frames.install(fid(0), pid(1)).unwrap();
        replacer.record_install(fid(0), pid(1));

        replacer.tick(&frames);
        assert_eq!(replacer.age(fid(0)), 0x80);
        assert_eq!(replacer.age(fid(1)), 0);
    }
}
