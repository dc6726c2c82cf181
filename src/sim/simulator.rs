//! Simulator - drives one replacement policy over a reference trace.
//!
//! The [`Simulator`] provides:
//! - The access loop shared by every policy
//! - Per-access records with a snapshot of the frames
//! - Final statistics handed back by value

use log::{debug, trace};
use serde::Serialize;

use crate::common::{Error, FrameId, PageId, Result};
use crate::memory::replacer::{
    AgingReplacer, ClockReplacer, FifoReplacer, FrameMeta, Lookahead, LruReplacer,
    OfflineReplacer, OnlineReplacer, OptimalReplacer,
};
use crate::memory::FrameTable;
use crate::sim::{PolicyKind, ReferenceTrace, SimConfig, Statistics};

/// Result of a single access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AccessOutcome {
    /// The page was already resident.
    Hit,
    /// The page had to be loaded, displacing `evicted` if memory was full.
    Fault { evicted: Option<PageId> },
}

impl AccessOutcome {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, AccessOutcome::Hit)
    }

    #[inline]
    pub fn evicted(&self) -> Option<PageId> {
        match self {
            AccessOutcome::Hit => None,
            AccessOutcome::Fault { evicted } => *evicted,
        }
    }
}

/// One frame as it stood after an access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameSnapshot {
    pub frame: FrameId,
    pub page: Option<PageId>,
    pub meta: FrameMeta,
}

/// What happened on one access, and the frames afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessRecord {
    /// 0-based index in the trace.
    pub position: usize,
    pub page: PageId,
    pub outcome: AccessOutcome,
    /// Whether a tick fired right after this access.
    pub ticked: bool,
    /// Frames in index order, after the access and any tick.
    pub frames: Vec<FrameSnapshot>,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub policy: PolicyKind,
    pub capacity: usize,
    pub records: Vec<AccessRecord>,
    pub stats: Statistics,
}

impl RunReport {
    /// Outcomes in trace order.
    pub fn outcomes(&self) -> impl Iterator<Item = AccessOutcome> + '_ {
        self.records.iter().map(|r| r.outcome)
    }

    /// Pages evicted, in the order they left.
    pub fn evictions(&self) -> Vec<PageId> {
        self.outcomes().filter_map(|o| o.evicted()).collect()
    }
}

/// The active policy, in one of the two capability families.
enum Engine {
    Online(Box<dyn OnlineReplacer>),
    Offline(Box<dyn OfflineReplacer>),
}

impl Engine {
    fn for_policy(kind: PolicyKind, capacity: usize) -> Self {
        match kind {
            PolicyKind::Fifo => Engine::Online(Box::new(FifoReplacer::new(capacity))),
            PolicyKind::Lru => Engine::Online(Box::new(LruReplacer::new(capacity))),
            PolicyKind::Clock => Engine::Online(Box::new(ClockReplacer::new(capacity))),
            PolicyKind::Aging => Engine::Online(Box::new(AgingReplacer::new(capacity))),
            PolicyKind::Optimal => Engine::Offline(Box::new(OptimalReplacer::new())),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Engine::Online(r) => r.name(),
            Engine::Offline(r) => r.name(),
        }
    }

    fn record_hit(&mut self, frame: FrameId) {
        match self {
            Engine::Online(r) => r.record_hit(frame),
            Engine::Offline(r) => r.record_hit(frame),
        }
    }

    fn record_install(&mut self, frame: FrameId, page: PageId) {
        match self {
            Engine::Online(r) => r.record_install(frame, page),
            Engine::Offline(r) => r.record_install(frame, page),
        }
    }

    fn tick(&mut self, frames: &FrameTable) {
        match self {
            Engine::Online(r) => r.tick(frames),
            Engine::Offline(r) => r.tick(frames),
        }
    }

    fn meta(&self, frame: FrameId) -> FrameMeta {
        match self {
            Engine::Online(r) => r.meta(frame),
            Engine::Offline(r) => r.meta(frame),
        }
    }

    fn select_victim(&mut self, frames: &FrameTable, lookahead: Lookahead<'_>) -> Result<FrameId> {
        match self {
            Engine::Online(r) => r.select_victim(frames),
            Engine::Offline(r) => r.select_victim(frames, lookahead),
        }
    }
}

/// Runs one policy over one trace.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │                       Simulator                          │
/// │  trace[position] ──▶ on_access ──▶ FrameTable + Engine   │
/// │                          │                               │
/// │                          ├──▶ Statistics                 │
/// │                          └──▶ on_tick (if scheduled)     │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// The simulator owns its frame table, policy and statistics for the whole
/// run. Building one twice from the same config and trace yields the same
/// records.
///
/// # Usage
/// ```
/// use pagesim::{PolicyKind, ReferenceTrace, SimConfig, Simulator};
///
/// let trace = ReferenceTrace::canonical();
/// let config = SimConfig::new(PolicyKind::Lru, 3)?;
///
/// let mut sim = Simulator::new(&config, &trace)?;
/// let first = sim.step().unwrap()?;
/// assert!(!first.outcome.is_hit());
///
/// let stats = sim.run()?.stats;
/// assert_eq!(stats.faults, 12);
/// # Ok::<(), pagesim::Error>(())
/// ```
pub struct Simulator<'t> {
    config: SimConfig,
    trace: &'t ReferenceTrace,
    frames: FrameTable,
    engine: Engine,
    stats: Statistics,
    /// Index of the next access to serve.
    position: usize,
    records: Vec<AccessRecord>,
}

impl<'t> Simulator<'t> {
    /// Validate `config` against `trace` and set up empty state.
    ///
    /// # Errors
    /// - Any configuration error from [`SimConfig::validate`]
    pub fn new(config: &SimConfig, trace: &'t ReferenceTrace) -> Result<Self> {
        debug_assert!(!trace.is_empty());
        config.validate(trace)?;

        let engine = Engine::for_policy(config.policy(), config.capacity());
        debug!(
            "starting {} run: {} frames, {} accesses, ticks {:?}",
            engine.name(),
            config.capacity(),
            trace.len(),
            config.ticks()
        );

        Ok(Self {
            config: config.clone(),
            trace,
            frames: FrameTable::new(config.capacity()),
            engine,
            stats: Statistics::new(),
            position: 0,
            records: Vec::with_capacity(trace.len()),
        })
    }

    // ========================================================================
    // Public API: Inspection
    // ========================================================================

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// Statistics so far.
    pub fn statistics(&self) -> Statistics {
        self.stats
    }

    /// Index of the next access to serve.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.trace.len()
    }

    /// Current frames with their policy metadata.
    pub fn snapshot(&self) -> Vec<FrameSnapshot> {
        self.frames
            .iter()
            .map(|(frame, page)| FrameSnapshot {
                frame,
                page,
                meta: self.engine.meta(frame),
            })
            .collect()
    }

    // ========================================================================
    // Public API: Driving
    // ========================================================================

    /// Serve the next access in the trace.
    ///
    /// Returns `None` once the trace is exhausted.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` if internal state diverged
    pub fn step(&mut self) -> Option<Result<AccessRecord>> {
        let page = *self.trace.as_slice().get(self.position)?;
        let position = self.position;
        self.position += 1;

        let record = self.serve(position, page);
        if let Ok(record) = &record {
            self.records.push(record.clone());
        }
        Some(record)
    }

    /// Deliver a timer tick to the policy.
    pub fn on_tick(&mut self) {
        trace!("tick after access {}", self.position);
        self.engine.tick(&self.frames);
    }

    /// Serve every remaining access and return the full report.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` if internal state diverged
    pub fn run(mut self) -> Result<RunReport> {
        while let Some(record) = self.step() {
            record?;
        }
        debug!("{} run finished: {}", self.engine.name(), self.stats);

        Ok(RunReport {
            policy: self.config.policy(),
            capacity: self.config.capacity(),
            records: self.records,
            stats: self.stats,
        })
    }

    /// Stop and hand back the statistics gathered so far.
    pub fn finish(self) -> Statistics {
        self.stats
    }

    // ========================================================================
    // Internal: Core access logic
    // ========================================================================

    fn serve(&mut self, position: usize, page: PageId) -> Result<AccessRecord> {
        let outcome = self.on_access(position, page)?;

        let ticked = self.config.ticks().fires_after(position);
        if ticked {
            self.on_tick();
        }

        if cfg!(debug_assertions) {
            self.frames.verify()?;
        }

        Ok(AccessRecord {
            position,
            page,
            outcome,
            ticked,
            frames: self.snapshot(),
        })
    }

    /// Serve one access: hit bookkeeping, or pick a frame, evict and install.
    fn on_access(&mut self, position: usize, page: PageId) -> Result<AccessOutcome> {
        let outcome = match self.frames.frame_of(page) {
            Some(frame) => {
                self.engine.record_hit(frame);
                AccessOutcome::Hit
            }
            None => {
                let (frame, needs_victim) = match self.frames.find_free_frame() {
                    Some(free) => (free, false),
                    None => {
                        let lookahead = Lookahead::new(self.trace.as_slice(), position);
                        (self.engine.select_victim(&self.frames, lookahead)?, true)
                    }
                };

                let evicted = self.frames.install(frame, page)?;
                if needs_victim && evicted.is_none() {
                    return Err(Error::invariant(format!(
                        "{} chose {} as victim but it held no page",
                        self.engine.name(),
                        frame
                    )));
                }
                if let Some(victim) = evicted {
                    trace!(
                        "access {}: page {} evicts page {} from {}",
                        position,
                        page,
                        victim,
                        frame
                    );
                }

                self.engine.record_install(frame, page);
                AccessOutcome::Fault { evicted }
            }
        };

        self.stats.record(&outcome);
        Ok(outcome)
    }
}
