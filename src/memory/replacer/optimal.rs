//! Optimal (Belady / MIN) replacement policy.
//!
//! Evicts the resident page whose next use lies furthest in the future.
//! It needs the whole trace, so it can only run offline and serves as the
//! lower bound on faults for a given trace and capacity.

use crate::common::{Error, FrameId, PageId, Result};
use crate::memory::replacer::{Lookahead, OfflineReplacer, Replacer};
use crate::memory::FrameTable;

/// Next use of one resident page, as seen from the current access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forecast {
    pub frame: FrameId,
    pub page: PageId,
    /// Trace index of the next access, `None` if never used again.
    pub next_use: Option<usize>,
}

/// Belady's oracle. Keeps no per-frame state.
#[derive(Debug, Clone, Default)]
pub struct OptimalReplacer;

impl OptimalReplacer {
    pub fn new() -> Self {
        Self
    }

    /// Next use of every resident page, in ascending frame order.
    pub fn forecast(&self, frames: &FrameTable, lookahead: Lookahead<'_>) -> Vec<Forecast> {
        forecasts(frames, lookahead).collect()
    }
}

fn forecasts<'a>(
    frames: &'a FrameTable,
    lookahead: Lookahead<'a>,
) -> impl Iterator<Item = Forecast> + 'a {
    frames.resident().map(move |(frame, page)| Forecast {
        frame,
        page,
        next_use: lookahead.next_use(page),
    })
}

impl Replacer for OptimalReplacer {
    fn name(&self) -> &'static str {
        "optimal"
    }

    fn record_hit(&mut self, _frame: FrameId) {}

    fn record_install(&mut self, _frame: FrameId, _page: PageId) {}
}

impl OfflineReplacer for OptimalReplacer {
    fn select_victim(&mut self, frames: &FrameTable, lookahead: Lookahead<'_>) -> Result<FrameId> {
        let mut furthest: Option<(FrameId, usize)> = None;

        for forecast in forecasts(frames, lookahead) {
            match forecast.next_use {
                // Never used again: nothing can beat it.
                None => return Ok(forecast.frame),
                // Strict comparison keeps the first frame on ties.
                Some(next) if furthest.map_or(true, |(_, best)| next > best) => {
                    furthest = Some((forecast.frame, next));
                }
                Some(_) => {}
            }
        }

        furthest
            .map(|(frame, _)| frame)
            .ok_or_else(|| Error::invariant("optimal found no resident frame while memory is full"))
    }
}
