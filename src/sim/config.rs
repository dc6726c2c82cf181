//! Simulation configuration.
//!
//! Everything here is checked before the first access is simulated; once a
//! [`Simulator`](crate::Simulator) is built the run cannot fail on bad input.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::common::config::DEFAULT_TICK_INTERVAL;
use crate::common::{Error, Result};
use crate::sim::ReferenceTrace;

/// The five replacement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Fifo,
    Lru,
    Clock,
    Aging,
    Optimal,
}

impl PolicyKind {
    /// Every policy, in the order reports list them.
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::Clock,
        PolicyKind::Aging,
        PolicyKind::Optimal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lru => "lru",
            PolicyKind::Clock => "clock",
            PolicyKind::Aging => "aging",
            PolicyKind::Optimal => "optimal",
        }
    }

    /// Whether the policy needs to see future accesses.
    pub fn is_offline(self) -> bool {
        matches!(self, PolicyKind::Optimal)
    }

    /// Whether the policy reacts to ticks.
    pub fn uses_ticks(self) -> bool {
        matches!(self, PolicyKind::Aging)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "lru" => Ok(PolicyKind::Lru),
            "clock" | "second-chance" => Ok(PolicyKind::Clock),
            "aging" => Ok(PolicyKind::Aging),
            "optimal" | "opt" | "belady" | "min" => Ok(PolicyKind::Optimal),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

/// Explicit tick positions, always sorted and free of duplicates.
///
/// The only way to build one is from an iterator, which sorts it.
///
/// ```
/// use pagesim::TickPositions;
///
/// let positions: TickPositions = [4, 0, 2, 4].into_iter().collect();
/// assert_eq!(positions.as_slice(), &[0, 2, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickPositions(Vec<usize>);

impl TickPositions {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, position: usize) -> bool {
        self.0.binary_search(&position).is_ok()
    }
}

impl FromIterator<usize> for TickPositions {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut positions: Vec<usize> = iter.into_iter().collect();
        positions.sort_unstable();
        positions.dedup();
        TickPositions(positions)
    }
}

/// When timer ticks fire, measured in accesses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TickSchedule {
    /// No ticks.
    #[default]
    Never,
    /// After every `k`-th access: accesses `k`, `2k`, ...
    Every(u64),
    /// After the access at each listed 0-based trace index.
    At(TickPositions),
}

impl TickSchedule {
    /// Explicit positions, in any order.
    pub fn at(positions: impl IntoIterator<Item = usize>) -> Self {
        TickSchedule::At(positions.into_iter().collect())
    }

    /// Whether a tick follows the access at trace index `position`.
    pub fn fires_after(&self, position: usize) -> bool {
        match self {
            TickSchedule::Never => false,
            TickSchedule::Every(0) => false,
            TickSchedule::Every(k) => (position as u64 + 1) % k == 0,
            TickSchedule::At(positions) => positions.contains(position),
        }
    }

    pub fn is_never(&self) -> bool {
        match self {
            TickSchedule::Never => true,
            TickSchedule::At(positions) => positions.is_empty(),
            TickSchedule::Every(_) => false,
        }
    }

    fn validate(&self, trace_len: usize) -> Result<()> {
        match self {
            TickSchedule::Every(0) => Err(Error::InvalidTickInterval(0)),
            TickSchedule::At(positions) => {
                match positions.as_slice().iter().find(|&&p| p >= trace_len) {
                    Some(&position) => Err(Error::TickOutOfRange {
                        position,
                        len: trace_len,
                    }),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }
}

/// Policy, frame capacity and tick schedule for one run.
///
/// # Example
/// ```
/// use pagesim::{PolicyKind, SimConfig, TickSchedule};
///
/// let config = SimConfig::new(PolicyKind::Aging, 3)
///     .unwrap()
///     .with_ticks(TickSchedule::Every(4));
/// assert_eq!(config.capacity(), 3);
///
/// assert!(SimConfig::new(PolicyKind::Lru, 0).is_err());
/// assert!(SimConfig::new(PolicyKind::Lru, -1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    policy: PolicyKind,
    capacity: usize,
    ticks: TickSchedule,
}

impl SimConfig {
    /// Create a config with no ticks, or the default periodic schedule for
    /// policies that need one.
    ///
    /// `capacity` is signed so callers can hand over raw user input.
    ///
    /// # Errors
    /// - `Error::InvalidCapacity` if `capacity` is zero or negative
    pub fn new(policy: PolicyKind, capacity: i64) -> Result<Self> {
        let capacity = usize::try_from(capacity)
            .ok()
            .filter(|&c| c > 0)
            .ok_or(Error::InvalidCapacity(capacity))?;

        let ticks = if policy.uses_ticks() {
            TickSchedule::Every(DEFAULT_TICK_INTERVAL)
        } else {
            TickSchedule::Never
        };

        Ok(Self {
            policy,
            capacity,
            ticks,
        })
    }

    /// Replace the tick schedule.
    pub fn with_ticks(mut self, ticks: TickSchedule) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ticks(&self) -> &TickSchedule {
        &self.ticks
    }

    /// Check the parts of the config that depend on the trace.
    ///
    /// # Errors
    /// - `Error::InvalidTickInterval` for `TickSchedule::Every(0)`
    /// - `Error::TickOutOfRange` for a tick position past the trace
    /// - `Error::MissingTickSchedule` for Aging without ticks
    pub fn validate(&self, trace: &ReferenceTrace) -> Result<()> {
        self.ticks.validate(trace.len())?;
        if self.policy.uses_ticks() && self.ticks.is_never() {
            return Err(Error::MissingTickSchedule);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind_round_trip_names() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.name().parse::<PolicyKind>().unwrap(), kind);
        }
        assert_eq!("OPT".parse::<PolicyKind>().unwrap(), PolicyKind::Optimal);
        assert_eq!(
            "random".parse::<PolicyKind>(),
            Err(Error::UnknownPolicy("random".to_string()))
        );
    }

    #[test]
    fn test_only_optimal_is_offline() {
        let offline: Vec<_> = PolicyKind::ALL
            .iter()
            .filter(|k| k.is_offline())
            .collect();
        assert_eq!(offline, vec![&PolicyKind::Optimal]);
    }

    #[test]
    fn test_capacity_must_be_positive() {
        assert_eq!(
            SimConfig::new(PolicyKind::Fifo, 0),
            Err(Error::InvalidCapacity(0))
        );
        assert_eq!(
            SimConfig::new(PolicyKind::Fifo, -5),
            Err(Error::InvalidCapacity(-5))
        );
        assert_eq!(SimConfig::new(PolicyKind::Fifo, 1).unwrap().capacity(), 1);
    }

    #[test]
    fn test_aging_defaults_to_periodic_ticks() {
        let config = SimConfig::new(PolicyKind::Aging, 3).unwrap();
        assert_eq!(config.ticks(), &TickSchedule::Every(DEFAULT_TICK_INTERVAL));

        let config = SimConfig::new(PolicyKind::Lru, 3).unwrap();
        assert_eq!(config.ticks(), &TickSchedule::Never);
    }

    #[test]
    fn test_every_fires_after_each_kth_access() {
        let ticks = TickSchedule::Every(4);
        let fired: Vec<_> = (0..12).filter(|&p| ticks.fires_after(p)).collect();
        assert_eq!(fired, vec![3, 7, 11]);
    }

    #[test]
    fn test_at_is_sorted_and_deduped() {
        let ticks = TickSchedule::at([5, 1, 5, 3]);
        match &ticks {
            TickSchedule::At(positions) => assert_eq!(positions.as_slice(), &[1, 3, 5]),
            other => panic!("expected explicit positions, got {:?}", other),
        }
        assert!(ticks.fires_after(3));
        assert!(!ticks.fires_after(4));
    }

    #[test]
    fn test_at_variant_built_from_unsorted_positions() {
        let ticks = TickSchedule::At(vec![4, 0, 2].into_iter().collect());
        let fired: Vec<_> = (0..6).filter(|&p| ticks.fires_after(p)).collect();
        assert_eq!(fired, vec![0, 2, 4]);
        assert_eq!(ticks, TickSchedule::at([0, 2, 4]));
    }

    #[test]
    fn test_validate_against_trace() {
        let trace: ReferenceTrace = "1 2 3".parse().unwrap();

        let config = SimConfig::new(PolicyKind::Aging, 2)
            .unwrap()
            .with_ticks(TickSchedule::Every(0));
        assert_eq!(config.validate(&trace), Err(Error::InvalidTickInterval(0)));

        let config = config.with_ticks(TickSchedule::at([0, 3]));
        assert_eq!(
            config.validate(&trace),
            Err(Error::TickOutOfRange {
                position: 3,
                len: 3
            })
        );

        let config = config.with_ticks(TickSchedule::Never);
        assert_eq!(config.validate(&trace), Err(Error::MissingTickSchedule));

        let config = config.with_ticks(TickSchedule::at([0, 2]));
        assert!(config.validate(&trace).is_ok());
    }

    #[test]
    fn test_ticks_are_allowed_but_ignored_by_other_policies() {
        let trace: ReferenceTrace = "1 2".parse().unwrap();
        let config = SimConfig::new(PolicyKind::Clock, 2)
            .unwrap()
            .with_ticks(TickSchedule::Every(1));
        assert!(config.validate(&trace).is_ok());
    }
}
