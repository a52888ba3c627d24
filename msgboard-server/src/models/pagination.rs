//! Pagination types

use serde::{Deserialize, Serialize};

/// Maximum items per page
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default items per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number (0-indexed)
    pub page: u32,
    /// Items per page (1..=100)
    pub size: u32,
}

impl PageRequest {
    /// Create a page request, clamping size to 1..=100.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus total-count metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Current page number (0-indexed)
    pub page: u32,
    /// Items per page
    pub size: u32,
}

impl<T> Page<T> {
    /// Calculate total number of pages.
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 || self.size == 0 {
            0
        } else {
            let total = self.total as u64;
            let size = u64::from(self.size);
            u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX)
        }
    }

    /// Check if there's a next page.
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    /// Check if there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Convert items, keeping paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}

/// Paginated response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        let total_pages = page.total_pages();
        let has_next = page.has_next();
        let has_previous = page.has_prev();
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            size: page.size,
            total_pages,
            has_next,
            has_previous,
        }
    }
}

/// Query parameters for pagination
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        Self::new(
            params.page.unwrap_or(0),
            params.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total: i64, page: u32, size: u32) -> Page<()> {
        Page {
            items: vec![],
            total,
            page,
            size,
        }
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
        assert_eq!(PageRequest::new(1, 10).offset(), 10);
        assert_eq!(PageRequest::new(2, 25).offset(), 50);
    }

    #[test]
    fn clamps_size() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
        assert_eq!(PageRequest::new(0, 999).size, MAX_PAGE_SIZE);
    }

    #[test]
    fn defaults_from_params() {
        let request = PageRequest::from(PageParams::default());
        assert_eq!(request, PageRequest { page: 0, size: 10 });

        let request = PageRequest::from(PageParams {
            page: Some(3),
            size: Some(5),
        });
        assert_eq!(request, PageRequest { page: 3, size: 5 });
    }

    #[test]
    fn total_pages() {
        assert_eq!(page_of(0, 0, 10).total_pages(), 0);
        assert_eq!(page_of(25, 0, 10).total_pages(), 3);
        assert_eq!(page_of(100, 0, 10).total_pages(), 10);
    }

    #[test]
    fn has_next_prev() {
        let first = page_of(30, 0, 10);
        assert!(first.has_next());
        assert!(!first.has_prev());

        let middle = page_of(30, 1, 10);
        assert!(middle.has_next());
        assert!(middle.has_prev());

        let last = page_of(30, 2, 10);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }

    #[test]
    fn response_carries_navigation() {
        let page = Page {
            items: vec![1, 2, 3],
            total: 13,
            page: 0,
            size: 3,
        };
        let response = PageResponse::from(page.map(|n| n * 2));

        assert_eq!(response.items, vec![2, 4, 6]);
        assert_eq!(response.total_pages, 5);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalPages"], 5);
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["hasPrevious"], false);

        let last = PageResponse::from(page_of(13, 4, 3));
        assert!(!last.has_next);
        assert!(last.has_previous);
    }
}
