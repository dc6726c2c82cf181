//! Simulation statistics.

use std::fmt;

use serde::Serialize;

use crate::sim::AccessOutcome;

/// Hit and fault counts of one simulation run.
///
/// Owned by the [`Simulator`](crate::Simulator) while it runs and handed
/// back by value when it finishes. There is no shared or global counter.
///
/// # Example
/// ```
/// use pagesim::{AccessOutcome, Statistics};
///
/// let mut stats = Statistics::new();
/// stats.record(&AccessOutcome::Hit);
/// stats.record(&AccessOutcome::Fault { evicted: None });
/// assert_eq!(stats.total_accesses(), 2);
/// assert_eq!(stats.hit_ratio(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Accesses to a page that was already resident.
    pub hits: u64,

    /// Accesses that had to load the page.
    pub faults: u64,

    /// Faults that displaced a resident page.
    pub evictions: u64,
}

impl Statistics {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one access. Exactly one of hits/faults goes up.
    pub fn record(&mut self, outcome: &AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::Fault { evicted } => {
                self.faults += 1;
                if evicted.is_some() {
                    self.evictions += 1;
                }
            }
        }
    }

    pub fn total_accesses(&self) -> u64 {
        self.hits + self.faults
    }

    /// Calculate hit ratio (0.0 to 1.0). Zero accesses give 0.0.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate fault ratio (0.0 to 1.0). Zero accesses give 0.0.
    pub fn fault_ratio(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.faults as f64 / total as f64
        }
    }
}

impl Serialize for Statistics {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("Statistics", 5)?;
        s.serialize_field("total_accesses", &self.total_accesses())?;
        s.serialize_field("hits", &self.hits)?;
        s.serialize_field("faults", &self.faults)?;
        s.serialize_field("evictions", &self.evictions)?;
        s.serialize_field("hit_ratio", &self.hit_ratio())?;
        s.end()
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ hits: {}, faults: {}, evictions: {}, hit_rate: {:.2}% }}",
            self.hits,
            self.faults,
            self.evictions,
            self.hit_ratio() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageId;

    #[test]
    fn test_stats_new() {
        let stats = Statistics::new();
        assert_eq!(stats.total_accesses(), 0);
        assert_eq!(stats.hit_ratio(), 0.0);
        assert_eq!(stats.fault_ratio(), 0.0);
    }

    #[test]
    fn test_stats_record() {
        let mut stats = Statistics::new();
        for _ in 0..7 {
            stats.record(&AccessOutcome::Hit);
        }
        stats.record(&AccessOutcome::Fault { evicted: None });
        stats.record(&AccessOutcome::Fault {
            evicted: Some(PageId::new(1)),
        });
        stats.record(&AccessOutcome::Fault {
            evicted: Some(PageId::new(2)),
        });

        assert_eq!(stats.hits, 7);
        assert_eq!(stats.faults, 3);
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.hit_ratio(), 0.7);
        assert!((stats.fault_ratio() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_stats_display() {
        let stats = Statistics {
            hits: 80,
            faults: 20,
            evictions: 5,
        };
        let display = format!("{}", stats);

        assert!(display.contains("hits: 80"));
        assert!(display.contains("faults: 20"));
        assert!(display.contains("80.00%"));
    }

    #[test]
    fn test_stats_serialize_includes_derived_fields() {
        let stats = Statistics {
            hits: 1,
            faults: 3,
            evictions: 0,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["total_accesses"], 4);
        assert_eq!(json["hit_ratio"], 0.25);
    }
}
