//! Offset/limit paging over an already-materialized result set.

/// Fixed number of records per page.
pub const PAGE_SIZE: usize = 10;

/// A 1-based page request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Page {
    number: i64,
    size: usize,
}

impl Page {
    pub fn new(number: i64) -> Self {
        Self::with_size(number, PAGE_SIZE)
    }

    pub(crate) fn with_size(number: i64, size: usize) -> Self {
        Self { number, size }
    }

    /// Index of the first record on this page, `None` for pages below 1.
    pub fn offset(&self) -> Option<usize> {
        if self.number < 1 {
            return None;
        }
        usize::try_from(self.number - 1)
            .ok()?
            .checked_mul(self.size)
    }

    /// Slice of `items` covered by this page.
    ///
    /// Returns `None` when the page starts at or beyond the end of `items`,
    /// so an empty set has no first page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> Option<&'a [T]> {
        let start = self.offset()?;
        if start >= items.len() {
            return None;
        }
        let end = start.saturating_add(self.size).min(items.len());
        Some(&items[start..end])
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_holds_page_size_items() {
        let items: Vec<u32> = (0..19).collect();
        assert_eq!(Page::new(1).slice(&items).unwrap().len(), 10);
        assert_eq!(Page::new(2).slice(&items).unwrap(), &items[10..19]);
        assert!(Page::new(3).slice(&items).is_none());
    }

    #[test]
    fn non_positive_pages_and_empty_sets_have_no_slice() {
        let items: Vec<u32> = (0..5).collect();
        assert!(Page::new(0).slice(&items).is_none());
        assert!(Page::new(-4).slice(&items).is_none());
        assert!(Page::new(1).slice::<u32>(&[]).is_none());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: pages partition the set, in order, without overlap.
            #[test]
            fn pages_partition_the_set(len in 0usize..95, size in 1usize..15) {
                let items: Vec<usize> = (0..len).collect();
                let mut seen = Vec::new();
                let mut number = 1;
                while let Some(chunk) = Page::with_size(number, size).slice(&items) {
                    prop_assert!(chunk.len() <= size);
                    seen.extend_from_slice(chunk);
                    number += 1;
                }
                prop_assert_eq!(seen, items);
            }
        }
    }
}
