//! Zero-based page windows and the pages they produce.

use serde::Serialize;

/// Page size used when the client does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;
/// Largest page size a client may request.
pub const MAX_ITEMS_PER_PAGE: usize = 1000;

/// Requested window: `page` is zero-based, `per_page` is at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of rows to skip, saturating instead of overflowing for absurd pages.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.per_page)
    }
}

/// One window of a listing together with the totals needed to navigate it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index.
    pub number: usize,
    /// Requested page size.
    pub size: usize,
    /// Total number of items across all pages.
    pub total_elements: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: Pagination, total_elements: usize) -> Self {
        Self {
            items,
            number: pagination.page,
            size: pagination.per_page,
            total_elements,
        }
    }

    /// `ceil(total_elements / size)`; zero for an empty listing.
    pub fn total_pages(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size)
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        self.number.saturating_add(1) >= self.total_pages()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
