//! Page-number pagination shared by list endpoints and repositories.

/// Page used when the caller does not send `page`.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not send `page_size`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest accepted `page_size`.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated `(page, page_size)` pair. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Apply defaults and bounds. Returns `None` when `page < 1` or
    /// `page_size` falls outside `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Option<Self> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 1 || !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return None;
        }
        Some(Self { page, page_size })
    }

    /// Rows to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
