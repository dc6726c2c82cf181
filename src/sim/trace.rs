//! Reference traces.

use std::str::FromStr;

use crate::common::config::CANONICAL_TRACE;
use crate::common::{Error, PageId, Result};

/// An ordered, non-empty sequence of page accesses.
///
/// # Example
/// ```
/// use pagesim::{PageId, ReferenceTrace};
///
/// let trace: ReferenceTrace = "7, 0, 1 2".parse().unwrap();
/// assert_eq!(trace.len(), 4);
/// assert_eq!(trace.as_slice()[3], PageId::new(2));
///
/// assert!("".parse::<ReferenceTrace>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTrace {
    pages: Vec<PageId>,
}

impl ReferenceTrace {
    /// # Errors
    /// - `Error::EmptyTrace` if `pages` is empty
    pub fn new(pages: Vec<PageId>) -> Result<Self> {
        if pages.is_empty() {
            return Err(Error::EmptyTrace);
        }
        Ok(Self { pages })
    }

    /// Build from raw page numbers.
    ///
    /// # Errors
    /// - `Error::EmptyTrace` if `pages` yields nothing
    pub fn from_pages(pages: impl IntoIterator<Item = u32>) -> Result<Self> {
        Self::new(pages.into_iter().map(PageId::new).collect())
    }

    /// The textbook string `7 0 1 2 0 3 0 4 2 3 0 3 2 1 2 0 1 7 0 1`.
    pub fn canonical() -> Self {
        Self {
            pages: CANONICAL_TRACE.iter().copied().map(PageId::new).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false for a constructed trace.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[PageId] {
        &self.pages
    }

    pub fn iter(&self) -> impl Iterator<Item = PageId> + '_ {
        self.pages.iter().copied()
    }
}

impl FromStr for ReferenceTrace {
    type Err = Error;

    /// Parse page numbers separated by commas and/or whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let pages = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<u32>()
                    .map(PageId::new)
                    .map_err(|_| Error::InvalidPage(token.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_trace_rejected() {
        assert_eq!(ReferenceTrace::new(vec![]), Err(Error::EmptyTrace));
        assert_eq!(ReferenceTrace::from_pages(Vec::new()), Err(Error::EmptyTrace));
        assert_eq!(" , ,\n".parse::<ReferenceTrace>(), Err(Error::EmptyTrace));
    }

    #[test]
    fn test_parse_mixed_separators() {
        let trace: ReferenceTrace = "7,0, 1\n2\t0".parse().unwrap();
        let pages: Vec<u32> = trace.iter().map(|p| p.0).collect();
        assert_eq!(pages, vec![7, 0, 1, 2, 0]);
    }

    #[test]
    fn test_parse_rejects_negative_and_garbage() {
        assert_eq!(
            "1 -2 3".parse::<ReferenceTrace>(),
            Err(Error::InvalidPage("-2".to_string()))
        );
        assert_eq!(
            "1 x".parse::<ReferenceTrace>(),
            Err(Error::InvalidPage("x".to_string()))
        );
    }

    #[test]
    fn test_canonical_trace() {
        let trace = ReferenceTrace::canonical();
        assert_eq!(trace.len(), 20);
        assert!(!trace.is_empty());
        assert_eq!(trace.as_slice()[17], PageId::new(7));
    }
}
