//! Simulation driver.
//!
//! # Components
//! - [`Simulator`] - The access loop over one trace with one policy
//! - [`SimConfig`] / [`PolicyKind`] / [`TickSchedule`] - What to run
//! - [`ReferenceTrace`] - The accesses to replay
//! - [`Statistics`] - Hit and fault counts
//!
//! [`simulate`] and [`compare`] cover the common cases of running one
//! policy or several over the same trace.

mod config;
mod simulator;
mod stats;
mod trace;

pub use config::{PolicyKind, SimConfig, TickPositions, TickSchedule};
pub use simulator::{AccessOutcome, AccessRecord, FrameSnapshot, RunReport, Simulator};
pub use stats::Statistics;
pub use trace::ReferenceTrace;

use crate::common::Result;

/// Run `config` over `trace` from empty memory.
///
/// # Errors
/// - Configuration errors, before anything is simulated
///
/// # Example
/// ```
/// use pagesim::{simulate, PolicyKind, ReferenceTrace, SimConfig};
///
/// let report = simulate(
///     &SimConfig::new(PolicyKind::Fifo, 3)?,
///     &ReferenceTrace::canonical(),
/// )?;
/// assert_eq!((report.stats.faults, report.stats.hits), (15, 5));
/// # Ok::<(), pagesim::Error>(())
/// ```
pub fn simulate(config: &SimConfig, trace: &ReferenceTrace) -> Result<RunReport> {
    Simulator::new(config, trace)?.run()
}

/// Run each policy in `policies` over the same trace and capacity.
///
/// `ticks` replaces the default schedule of every config unless it is
/// [`TickSchedule::Never`], in which case tick-driven policies keep their
/// default periodic schedule.
///
/// # Errors
/// - The first configuration error met, before any run starts
pub fn compare(
    policies: &[PolicyKind],
    capacity: i64,
    ticks: &TickSchedule,
    trace: &ReferenceTrace,
) -> Result<Vec<RunReport>> {
    let configs = policies
        .iter()
        .map(|&kind| {
            let config = SimConfig::new(kind, capacity)?;
            let config = if ticks.is_never() {
                config
            } else {
                config.with_ticks(ticks.clone())
            };
            config.validate(trace)?;
            Ok(config)
        })
        .collect::<Result<Vec<_>>>()?;

    configs.iter().map(|config| simulate(config, trace)).collect()
}
