//! API response types
//!
//! Pagination structures shared by panel and admin list endpoints.
//! The response envelope itself lives in [`crate::error::ApiResponse`].

use serde::{Deserialize, Serialize};

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
    /// Total number of items
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
}

impl Pagination {
    /// Create a new pagination
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            ((total as f64) / (per_page as f64)).ceil() as u32
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    /// List of items
    pub items: Vec<T>,
    /// Pagination metadata
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(page, per_page, total),
        }
    }
}

/// Page query parameters accepted by list endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    /// Requested page (1-based)
    pub page: Option<u32>,
    /// Requested page size
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub const DEFAULT_PER_PAGE: u32 = 50;
    pub const MAX_PER_PAGE: u32 = 200;

    /// Normalized (page, per_page) with defaults applied and size clamped
    pub fn normalize(&self) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .clamp(1, Self::MAX_PER_PAGE);
        (page, per_page)
    }

    /// SQL OFFSET for the normalized page
    pub fn offset(&self) -> i64 {
        let (page, per_page) = self.normalize();
        ((page - 1) as i64) * (per_page as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_total_pages() {
        assert_eq!(Pagination::new(1, 50, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 50, 50).total_pages, 1);
        assert_eq!(Pagination::new(1, 50, 51).total_pages, 2);
        assert_eq!(Pagination::new(1, 0, 51).total_pages, 0);
    }

    #[test]
    fn test_page_query_defaults() {
        let q = PageQuery {
            page: None,
            per_page: None,
        };
        assert_eq!(q.normalize(), (1, PageQuery::DEFAULT_PER_PAGE));
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_page_query_clamps() {
        let q = PageQuery {
            page: Some(0),
            per_page: Some(10_000),
        };
        assert_eq!(q.normalize(), (1, PageQuery::MAX_PER_PAGE));

        let q = PageQuery {
            page: Some(3),
            per_page: Some(20),
        };
        assert_eq!(q.offset(), 40);
    }
}
