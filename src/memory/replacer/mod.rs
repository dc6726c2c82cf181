//! Eviction policy implementations (replacers).
//!
//! Implements:
//! - [`FifoReplacer`] - First-In-First-Out
//! - [`LruReplacer`] - Least Recently Used
//! - [`ClockReplacer`] - Second Chance
//! - [`AgingReplacer`] - 8-bit history counters decayed by ticks
//! - [`OptimalReplacer`] - Belady's offline oracle
//!
//! Residency itself lives in [`FrameTable`]; a replacer only keeps the
//! metadata it needs, indexed by [`FrameId`]. The simulator calls
//! [`Replacer::record_hit`] on a hit and, on a fault, asks for a victim only
//! when no frame is free, installs the page, then calls
//! [`Replacer::record_install`].
//!
//! Policies come in two capability families. [`OnlineReplacer`]s see only
//! the accesses made so far. [`OfflineReplacer`]s additionally receive a
//! [`Lookahead`] over the rest of the trace.

mod aging;
mod clock;
mod fifo;
mod lru;
mod optimal;

pub use aging::AgingReplacer;
pub use clock::ClockReplacer;
pub use fifo::FifoReplacer;
pub use lru::LruReplacer;
pub use optimal::OptimalReplacer;

use serde::Serialize;

use crate::common::{FrameId, PageId, Result};
use crate::memory::FrameTable;

/// Per-frame policy state exposed in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameMeta {
    /// The policy keeps no per-frame state worth showing.
    Plain,
    /// Clock reference bit; `hand` is set on the frame the hand points at.
    Clock { referenced: bool, hand: bool },
    /// Aging reference bit and history counter.
    Aging { referenced: bool, age: u8 },
}

/// Bookkeeping shared by every policy.
pub trait Replacer {
    /// Short lower-case policy name.
    fn name(&self) -> &'static str;

    /// A resident page in `frame` was accessed.
    fn record_hit(&mut self, frame: FrameId);

    /// `page` was just installed in `frame`, possibly replacing a victim.
    fn record_install(&mut self, frame: FrameId, page: PageId);

    /// External timer event. Only time-driven policies react.
    fn tick(&mut self, _frames: &FrameTable) {}

    /// Policy state of `frame` for snapshots.
    fn meta(&self, _frame: FrameId) -> FrameMeta {
        FrameMeta::Plain
    }
}

/// A policy that decides from past accesses only.
pub trait OnlineReplacer: Replacer {
    /// Choose the frame to evict. Called only when every frame is occupied.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` if the policy's state has diverged from
    ///   the frame table.
    fn select_victim(&mut self, frames: &FrameTable) -> Result<FrameId>;
}

/// A policy that needs to see future accesses.
pub trait OfflineReplacer: Replacer {
    /// Choose the frame to evict. Called only when every frame is occupied.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` if no resident page can be chosen.
    fn select_victim(&mut self, frames: &FrameTable, lookahead: Lookahead<'_>) -> Result<FrameId>;
}

/// Read-only view of a trace from the access currently being served.
#[derive(Debug, Clone, Copy)]
pub struct Lookahead<'a> {
    trace: &'a [PageId],
    position: usize,
}

impl<'a> Lookahead<'a> {
    /// View `trace` while serving the access at index `position`.
    pub fn new(trace: &'a [PageId], position: usize) -> Self {
        Self { trace, position }
    }

    /// Index of the access being served.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Accesses strictly after the current one.
    pub fn remaining(&self) -> &'a [PageId] {
        self.trace.get(self.position + 1..).unwrap_or(&[])
    }

    /// Trace index of the next access to `page` strictly after the current
    /// position, or `None` if it is never accessed again.
    pub fn next_use(&self, page: PageId) -> Option<usize> {
        self.remaining()
            .iter()
            .position(|&p| p == page)
            .map(|offset| self.position + 1 + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(pages: &[u32]) -> Vec<PageId> {
        pages.iter().copied().map(PageId::new).collect()
    }

    #[test]
    fn test_lookahead_next_use_is_strictly_after_position() {
        let t = trace(&[1, 2, 1, 3, 2]);
        let la = Lookahead::new(&t, 0);
        assert_eq!(la.next_use(PageId::new(1)), Some(2));
        assert_eq!(la.next_use(PageId::new(2)), Some(1));
        assert_eq!(la.next_use(PageId::new(9)), None);

        let la = Lookahead::new(&t, 2);
        assert_eq!(la.next_use(PageId::new(1)), None);
        assert_eq!(la.next_use(PageId::new(2)), Some(4));
    }

    #[test]
    fn test_lookahead_at_last_access_sees_nothing() {
        let t = trace(&[4, 5]);
        let la = Lookahead::new(&t, 1);
        assert!(la.remaining().is_empty());
        assert_eq!(la.next_use(PageId::new(4)), None);
    }
}
