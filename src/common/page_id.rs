//! Page identifier type.

use std::fmt;

use serde::Serialize;

/// Identifies a logical page in a reference trace.
///
/// Pages are opaque numbers: the simulator never interprets them beyond
/// equality and hashing, and the same page may appear any number of times
/// in a trace.
///
/// # Example
/// ```
/// use pagesim::PageId;
///
/// let page = PageId::new(7);
/// assert_eq!(page.0, 7);
/// assert_eq!(page, PageId::from(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageId(pub u32);

impl PageId {
    /// Create a new PageId.
    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }
}

impl From<u32> for PageId {
    #[inline]
    fn from(id: u32) -> Self {
        PageId(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn test_page_id_from_raw() {
        assert_eq!(PageId::new(42), PageId::from(42));
        assert_eq!(PageId::from(u32::MAX).0, u32::MAX);
    }

    #[test]
    fn test_repeated_pages_collapse() {
        let distinct: HashSet<PageId> = [7, 0, 7, 1, 0].into_iter().map(PageId::new).collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_page_id_display_is_bare_number() {
        assert_eq!(format!("{}", PageId::new(7)), "7");
    }
}
