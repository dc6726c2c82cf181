//! CLOCK (Second Chance) replacement policy.

use crate::common::{Error, FrameId, PageId, Result};
use crate::memory::replacer::{FrameMeta, OnlineReplacer, Replacer};
use crate::memory::FrameTable;

/// Sweeps a hand over the frames, clearing reference bits until it finds
/// a frame whose bit is already clear.
///
/// Free frames are filled lowest-first before the hand ever moves; the
/// sweep runs only once memory is full.
#[derive(Debug, Clone)]
pub struct ClockReplacer {
    ref_bits: Vec<bool>,
    hand: FrameId,
}

impl ClockReplacer {
    /// Create a new Clock replacer for `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            ref_bits: vec![false; capacity],
            hand: FrameId::new(0),
        }
    }

    /// Frame the next sweep starts from.
    #[inline]
    pub fn hand(&self) -> FrameId {
        self.hand
    }

    #[inline]
    pub fn is_referenced(&self, frame: FrameId) -> bool {
        self.ref_bits[frame.0]
    }
}

impl Replacer for ClockReplacer {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn record_hit(&mut self, frame: FrameId) {
        self.ref_bits[frame.0] = true;
    }

    fn record_install(&mut self, frame: FrameId, _page: PageId) {
        self.ref_bits[frame.0] = true;
    }

    fn meta(&self, frame: FrameId) -> FrameMeta {
        FrameMeta::Clock {
            referenced: self.ref_bits[frame.0],
            hand: frame == self.hand,
        }
    }
}

impl OnlineReplacer for ClockReplacer {
    fn select_victim(&mut self, frames: &FrameTable) -> Result<FrameId> {
        let capacity = self.ref_bits.len();

        // After one full pass every bit is clear, so the second pass must stop.
        for _ in 0..2 * capacity {
            let current = self.hand;
            self.hand = current.next(capacity);

            if frames.page_at(current).is_none() {
                return Err(Error::invariant(format!(
                    "clock hand reached empty {} while memory is full",
                    current
                )));
            }
            if self.ref_bits[current.0] {
                self.ref_bits[current.0] = false;
            } else {
                return Ok(current);
            }
        }

        Err(Error::invariant(format!(
            "clock sweep found no victim within {} steps",
            2 * capacity
        )))
    }
}
