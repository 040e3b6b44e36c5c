use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// `?page=&limit=` query; 1-indexed page.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PaginationRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Validated page window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
}

impl PaginationRequest {
    pub fn resolve(&self, max_limit: i64) -> Result<PageWindow> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            return Err(AppError::BadRequest("page must be >= 1".to_string()));
        }
        if limit < 1 || limit > max_limit {
            return Err(AppError::BadRequest(format!(
                "limit must be 1-{}",
                max_limit
            )));
        }
        // The row offset must fit the store's signed 64-bit OFFSET.
        if (page - 1).checked_mul(limit).is_none() {
            return Err(AppError::BadRequest("page is out of range".to_string()));
        }
        Ok(PageWindow { page, limit })
    }
}

impl PageWindow {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Paginated response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl<T> PagedResponse<T> {
    pub fn new(items: Vec<T>, total: i64, window: PageWindow) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + window.limit - 1) / window.limit
        };
        Self {
            items,
            total,
            page: window.page,
            limit: window.limit,
            total_pages,
            has_more: window.page.saturating_mul(window.limit) < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let window = PaginationRequest::default().resolve(100).unwrap();
        assert_eq!(window, PageWindow { page: 1, limit: 10 });
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let zero_page = PaginationRequest {
            page: Some(0),
            limit: None,
        };
        assert!(zero_page.resolve(100).is_err());

        let huge_limit = PaginationRequest {
            page: None,
            limit: Some(101),
        };
        assert!(huge_limit.resolve(100).is_err());
    }

    #[test]
    fn rejects_pages_whose_offset_overflows() {
        let far_page = PaginationRequest {
            page: Some(i64::MAX),
            limit: Some(10),
        };
        let err = far_page.resolve(100).unwrap_err();
        assert_eq!(err.to_string(), "page is out of range");

        let last_ok = PaginationRequest {
            page: Some(i64::MAX / 10),
            limit: Some(10),
        }
        .resolve(100)
        .unwrap();
        assert!(last_ok.offset() > 0);
    }

    #[test]
    fn offset_advances_by_limit() {
        let window = PaginationRequest {
            page: Some(3),
            limit: Some(10),
        }
        .resolve(100)
        .unwrap();
        assert_eq!(window.offset(), 20);
    }

    #[test]
    fn paged_response_reports_remaining_pages() {
        let window = PageWindow { page: 1, limit: 10 };
        let page = PagedResponse::new(vec![1; 10], 25, window);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_more);

        let last = PagedResponse::new(vec![1; 5], 25, PageWindow { page: 3, limit: 10 });
        assert!(!last.has_more);
    }
}
