//! Pagination primitives for read-model queries.

use serde::Serialize;

// =============================================================================
// PageRequest
// =============================================================================

/// Which slice of a result set to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 20;

    /// Creates a page request. Returns `None` when `size` is zero.
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Option<Self> {
        if size == 0 {
            return None;
        }
        Some(Self { page, size })
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items to skip before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}

// =============================================================================
// Page
// =============================================================================

/// One page of a result set together with the size of the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size as u64)
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.page as u64 + 1) < self.total_pages()
    }

    /// Transforms the content while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, function: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(function).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
