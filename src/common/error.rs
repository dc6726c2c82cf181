//! Error types for pagesim.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagesim.
///
/// Every variant except [`Error::InvariantViolation`] is a configuration
/// error: it is raised before the first access is simulated and the caller
/// can fix its input and try again. A run that starts with a valid
/// configuration cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Frame capacity was zero or negative.
    #[error("Frame capacity must be positive, got {0}")]
    InvalidCapacity(i64),

    /// The reference trace has no accesses.
    #[error("Reference trace is empty")]
    EmptyTrace,

    /// A trace token is not a non-negative page number.
    #[error("Invalid page number: {0:?}")]
    InvalidPage(String),

    /// A periodic tick schedule with a zero interval.
    #[error("Tick interval must be positive, got {0}")]
    InvalidTickInterval(u64),

    /// An explicit tick position past the end of the trace.
    #[error("Tick position {position} is outside a trace of {len} accesses")]
    TickOutOfRange { position: usize, len: usize },

    /// Aging was selected without any tick schedule.
    #[error("The aging policy requires a tick schedule")]
    MissingTickSchedule,

    /// A policy name that does not match any known policy.
    #[error("Unknown replacement policy: {0:?}")]
    UnknownPolicy(String),

    /// Internal state diverged. This is a bug, never a user error.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// Whether the caller can fix this by changing its input.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::InvariantViolation(_))
    }

    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        Error::InvariantViolation(msg.into())
    }
}
