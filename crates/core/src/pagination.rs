//! Fixed-size client-side pagination.
//!
//! The service returns the whole collection; pages are cut locally. Pages
//! are 1-indexed. A [`PageState`] is a plain value: navigation returns a new
//! state instead of mutating the old one.

use std::ops::RangeInclusive;

/// Customers shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Number of pages needed for `len` items, `ceil(len / page_size)`.
///
/// A `page_size` of zero is treated as one.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    let size = if page_size == 0 { 1 } else { page_size };
    len.div_ceil(size)
}

/// Page numbers for a page picker, `1..=total_pages`.
///
/// Empty when there are no pages.
#[must_use]
pub const fn page_numbers(total_pages: usize) -> RangeInclusive<usize> {
    1..=total_pages
}

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// First page with the given page size (minimum 1).
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self {
            current: 1,
            size: if size == 0 { 1 } else { size },
        }
    }

    /// Current 1-indexed page number.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Items per page.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Back to page 1, keeping the page size.
    #[must_use]
    pub const fn first(self) -> Self {
        Self::new(self.size)
    }

    /// Advance one page; no-op on the last page.
    #[must_use]
    pub const fn next(self, total_pages: usize) -> Self {
        if self.current < total_pages {
            Self {
                current: self.current + 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Go back one page; no-op on page 1.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.current > 1 {
            Self {
                current: self.current - 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Jump to `page`, clamped into `1..=max(total_pages, 1)`.
    #[must_use]
    pub fn go_to(self, page: usize, total_pages: usize) -> Self {
        Self {
            current: page.clamp(1, total_pages.max(1)),
            ..self
        }
    }

    /// This state with the page clamped to `total_pages`.
    #[must_use]
    pub fn clamped(self, total_pages: usize) -> Self {
        self.go_to(self.current, total_pages)
    }
}

/// One page cut from a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page (at most `page_size`).
    pub items: &'a [T],
    /// 1-indexed page number actually shown.
    pub number: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Total number of items across all pages.
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    /// Whether a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Cut the page described by `state` out of `items`.
///
/// The page number is clamped first, so a state left over from a larger
/// collection still yields the last page rather than an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], state: PageState) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), state.size);
    let state = state.clamped(total_pages);

    let start = (state.current - 1).saturating_mul(state.size).min(items.len());
    let end = start.saturating_add(state.size).min(items.len());

    Page {
        items: items.get(start..end).unwrap_or_default(),
        number: state.current,
        total_pages,
        total_items: items.len(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(1, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(15, 5), 3);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_fifteen_items_three_pages() {
        let items: Vec<u32> = (1..=15).collect();
        let page = paginate(&items, PageState::default());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items, &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_last_page_is_partial() {
        let items: Vec<u32> = (1..=12).collect();
        let state = PageState::default().go_to(3, 3);
        let page = paginate(&items, state);
        assert_eq!(page.items, &[11, 12]);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_page_lengths_sum_to_total() {
        for len in 0..23 {
            let items: Vec<usize> = (0..len).collect();
            let pages = total_pages(len, DEFAULT_PAGE_SIZE);
            let mut state = PageState::default();
            let mut sum = 0;
            for _ in page_numbers(pages) {
                sum += paginate(&items, state).items.len();
                state = state.next(pages);
            }
            assert_eq!(sum, len, "len {len}");
        }
    }

    #[test]
    fn test_previous_at_first_page_is_noop() {
        let state = PageState::default();
        assert_eq!(state.previous(), state);
    }

    #[test]
    fn test_next_at_last_page_is_noop() {
        let state = PageState::default().go_to(3, 3);
        assert_eq!(state.next(3).current(), 3);
        assert_eq!(PageState::default().next(0).current(), 1);
    }

    #[test]
    fn test_go_to_clamps() {
        let state = PageState::default();
        assert_eq!(state.go_to(0, 4).current(), 1);
        assert_eq!(state.go_to(9, 4).current(), 4);
        assert_eq!(state.go_to(2, 4).current(), 2);
        assert_eq!(state.go_to(7, 0).current(), 1);
    }

    #[test]
    fn test_paginate_is_idempotent() {
        let items: Vec<u32> = (1..=9).collect();
        let state = PageState::default().go_to(2, 2);
        assert_eq!(paginate(&items, state), paginate(&items, state));
    }

    #[test]
    fn test_stale_page_is_clamped_when_collection_shrinks() {
        let items: Vec<u32> = (1..=6).collect();
        let stale = PageState::default().go_to(4, 4);
        let page = paginate(&items, stale);
        assert_eq!(page.number, 2);
        assert_eq!(page.items, &[6]);
    }

    #[test]
    fn test_empty_collection() {
        let items: Vec<u32> = vec![];
        let page = paginate(&items, PageState::default());
        assert!(page.items.is_empty());
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page_numbers(0).next().is_none());
    }

    #[test]
    fn test_zero_page_size_is_one() {
        assert_eq!(PageState::new(0).size(), 1);
    }
}
