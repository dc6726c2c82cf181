//! FIFO (First-In-First-Out) replacement policy.

use std::collections::VecDeque;

use crate::common::{Error, FrameId, PageId, Result};
use crate::memory::replacer::{OnlineReplacer, Replacer};
use crate::memory::FrameTable;

/// Evicts pages in the order they were loaded.
///
/// Hits never reorder the queue: a page loaded early is evicted early no
/// matter how often it is used afterwards.
#[derive(Debug, Clone)]
pub struct FifoReplacer {
    /// Resident pages in load order (front = oldest).
    queue: VecDeque<PageId>,
}

impl FifoReplacer {
    /// Create a new FIFO replacer for `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
        }
    }

    /// Resident pages from oldest to newest.
    pub fn queue_order(&self) -> impl Iterator<Item = PageId> + '_ {
        self.queue.iter().copied()
    }
}

impl Replacer for FifoReplacer {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn record_hit(&mut self, _frame: FrameId) {}

    fn record_install(&mut self, _frame: FrameId, page: PageId) {
        self.queue.push_back(page);
    }
}

impl OnlineReplacer for FifoReplacer {
    fn select_victim(&mut self, frames: &FrameTable) -> Result<FrameId> {
        let oldest = self
            .queue
            .pop_front()
            .ok_or_else(|| Error::invariant("FIFO queue is empty while memory is full"))?;

        frames.frame_of(oldest).ok_or_else(|| {
            Error::invariant(format!("FIFO queue head {} is not resident", oldest))
        })
    }
}
