//! Frame identifier type.

use std::fmt;

use serde::Serialize;

/// Index of a physical frame, always in `[0, capacity)`.
///
/// Wraps a `usize` so it can index the frame vector and every per-frame
/// metadata vector a policy keeps: `ref_bits[frame.0]`.
///
/// # Example
/// ```
/// use pagesim::FrameId;
///
/// let frame = FrameId::new(2);
/// assert_eq!(frame.next(3), FrameId::new(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FrameId(pub usize);

impl FrameId {
    /// Create a new FrameId.
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }

    /// The following frame on a circular table of `capacity` frames.
    #[inline]
    pub fn next(self, capacity: usize) -> Self {
        FrameId((self.0 + 1) % capacity)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}
