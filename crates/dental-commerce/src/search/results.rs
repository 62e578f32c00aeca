//! Listing results and pagination.

use serde::{Deserialize, Serialize};

/// Pagination info for a product listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of matching items.
    pub total: i64,
    /// Total number of pages (at least 1).
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Pages past the end are kept as requested and come back empty.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total = total.max(0);
        let total_pages = if total == 0 {
            1
        } else {
            total / per_page + i64::from(total % per_page != 0)
        };

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Number of items before the current page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Window of page numbers centred on the current page, for the pager.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<i64> {
        if self.total_pages as usize <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = (max_visible / 2) as i64;
        let end = (self.page - half)
            .max(1)
            .saturating_add(max_visible as i64 - 1);
        let end = end.min(self.total_pages);
        let start = (end - max_visible as i64 + 1).max(1);

        (start..=end).collect()
    }

    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// First item number on this page (1-indexed), 0 when empty.
    pub fn start_item(&self) -> i64 {
        if self.total == 0 {
            0
        } else {
            self.offset().saturating_add(1)
        }
    }

    /// Last item number on this page.
    pub fn end_item(&self) -> i64 {
        self.page.saturating_mul(self.per_page).min(self.total)
    }

    /// "Showing 25-48 of 130" style summary.
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {}",
            self.start_item(),
            self.end_item(),
            self.total
        )
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 24, 0)
    }
}

/// A page of listing results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> SearchResults<T> {
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for SearchResults<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), 10);
    }

    #[test]
    fn test_pagination_edges() {
        let first = Pagination::new(1, 10, 45);
        assert!(first.is_first() && !first.is_last() && !first.has_prev);

        let last = Pagination::new(5, 10, 45);
        assert!(last.is_last() && !last.has_next);
        assert_eq!(last.end_item(), 45);
    }

    #[test]
    fn test_empty_listing() {
        let p = Pagination::new(1, 24, 0);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.summary(), "Showing 0-0 of 0");
    }

    #[test]
    fn test_page_numbers_window() {
        assert_eq!(Pagination::new(5, 10, 100).page_numbers(5), vec![3, 4, 5, 6, 7]);
        assert_eq!(Pagination::new(1, 10, 100).page_numbers(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(Pagination::new(10, 10, 100).page_numbers(5), vec![6, 7, 8, 9, 10]);
        assert_eq!(Pagination::new(1, 10, 30).page_numbers(5), vec![1, 2, 3]);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let p = Pagination::new(i64::MAX, 100, 1);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.offset(), i64::MAX);
        assert_eq!(p.end_item(), 1);
        assert_eq!(p.page_numbers(5), vec![1]);

        let many = Pagination::new(i64::MAX, 10, 1000);
        assert_eq!(many.page_numbers(5), vec![96, 97, 98, 99, 100]);
    }

    #[test]
    fn test_page_below_one_is_first_page() {
        let p = Pagination::new(-3, 10, 45);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);
        assert!(!p.has_prev);
    }

    #[test]
    fn test_summary() {
        assert_eq!(Pagination::new(2, 24, 130).summary(), "Showing 25-48 of 130");
    }
}
