//! LRU (Least Recently Used) replacement policy.
//!
//! Recency is kept in a doubly linked list threaded through a per-frame
//! link array, so promoting a frame on a hit and evicting the tail are both
//! O(1). The page → frame step comes from the frame table's directory.
//!
//! ```text
//!  head (MRU)                                   tail (LRU)
//!     │                                             │
//!     ▼                                             ▼
//!  [Frame2] ⇄ [Frame0] ⇄ [Frame1]  ...  ⇄  [FrameN]
//! ```

use crate::common::{Error, FrameId, PageId, Result};
use crate::memory::replacer::{OnlineReplacer, Replacer};
use crate::memory::FrameTable;

#[derive(Debug, Clone, Copy, Default)]
struct Link {
    /// Neighbour towards the MRU end.
    prev: Option<FrameId>,
    /// Neighbour towards the LRU end.
    next: Option<FrameId>,
    linked: bool,
}

/// Evicts the resident page whose last access is oldest.
#[derive(Debug, Clone)]
pub struct LruReplacer {
    links: Vec<Link>,
    head: Option<FrameId>,
    tail: Option<FrameId>,
}

impl LruReplacer {
    /// Create a new LRU replacer for `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            links: vec![Link::default(); capacity],
            head: None,
            tail: None,
        }
    }

    /// Frames from most to least recently used.
    pub fn recency_order(&self) -> impl Iterator<Item = FrameId> + '_ {
        std::iter::successors(self.head, move |fid| self.links[fid.0].next)
    }

    fn unlink(&mut self, frame: FrameId) {
        let link = self.links[frame.0];
        if !link.linked {
            return;
        }
        match link.prev {
            Some(prev) => self.links[prev.0].next = link.next,
            None => self.head = link.next,
        }
        match link.next {
            Some(next) => self.links[next.0].prev = link.prev,
            None => self.tail = link.prev,
        }
        self.links[frame.0] = Link::default();
    }

    fn push_front(&mut self, frame: FrameId) {
        self.links[frame.0] = Link {
            prev: None,
            next: self.head,
            linked: true,
        };
        match self.head {
            Some(old_head) => self.links[old_head.0].prev = Some(frame),
            None => self.tail = Some(frame),
        }
        self.head = Some(frame);
    }

    /// Make `frame` the most recently used.
    fn touch(&mut self, frame: FrameId) {
        if self.head == Some(frame) {
            return;
        }
        self.unlink(frame);
        self.push_front(frame);
    }
}

impl Replacer for LruReplacer {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn record_hit(&mut self, frame: FrameId) {
        self.touch(frame);
    }

    fn record_install(&mut self, frame: FrameId, _page: PageId) {
        self.touch(frame);
    }
}

impl OnlineReplacer for LruReplacer {
    fn select_victim(&mut self, frames: &FrameTable) -> Result<FrameId> {
        let victim = self
            .tail
            .ok_or_else(|| Error::invariant("LRU list is empty while memory is full"))?;

        if frames.page_at(victim).is_none() {
            return Err(Error::invariant(format!(
                "LRU tail {} holds no resident page",
                victim
            )));
        }
        self.unlink(victim);
        Ok(victim)
    }
}
