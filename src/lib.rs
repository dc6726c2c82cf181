//! pagesim - a page replacement simulator with swappable eviction policies.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            pagesim                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Simulation (sim/)                        │   │
//! │  │   ReferenceTrace → Simulator → AccessRecord + Statistics │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │             Simulated memory (memory/)                   │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │ Online:  FIFO | LRU | CLOCK | AGING             │   │   │
//! │  │   │ Offline: OPTIMAL (sees the rest of the trace)   │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │          FrameTable + PageDirectory + Frame              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Error, config)
//! - [`memory`] - Frames, the page directory and eviction policies
//! - [`sim`] - The simulation loop, configuration and statistics
//!
//! The library performs no I/O. The `pagesim` binary is a thin harness that
//! reads traces, prints frame tables and writes JSON reports.
//!
//! # Quick Start
//! ```
//! use pagesim::{simulate, PolicyKind, ReferenceTrace, SimConfig};
//!
//! let trace: ReferenceTrace = "7 0 1 2 0 3 0 4 2 3 0 3 2 1 2 0 1 7 0 1".parse()?;
//! let report = simulate(&SimConfig::new(PolicyKind::Optimal, 3)?, &trace)?;
//!
//! assert_eq!(report.stats.faults, 9);
//! assert_eq!(report.stats.hits, 11);
//! # Ok::<(), pagesim::Error>(())
//! ```

pub mod common;
pub mod memory;
pub mod sim;

// Re-export commonly used items at crate root for convenience
pub use common::{Error, FrameId, PageId, Result};

pub use memory::replacer::FrameMeta;
pub use memory::FrameTable;
pub use sim::{
    compare, simulate, AccessOutcome, AccessRecord, FrameSnapshot, PolicyKind, ReferenceTrace,
    RunReport, SimConfig, Simulator, Statistics, TickPositions, TickSchedule,
};
