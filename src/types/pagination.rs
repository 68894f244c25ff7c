//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::AppResult;
use crate::utils::validation::validate_numeric_range;

/// Pagination parameters (1-indexed page)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Check page and page size bounds before any query is issued
    pub fn validate(&self) -> AppResult<()> {
        validate_numeric_range(self.page as f64, 1.0, u32::MAX as f64, "page")?;
        validate_numeric_range(self.page_size as f64, 1.0, MAX_PAGE_SIZE as f64, "pageSize")
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit()
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.page_size.min(MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of records plus its position in the full listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = if page_size > 0 {
            total.div_ceil(page_size)
        } else {
            0
        };

        Self {
            data,
            meta: PaginationMeta {
                page,
                page_size,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::codes;

    #[test]
    fn test_offset_and_limit() {
        let params = PaginationParams::new(3, 20);
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(PaginationParams::default().validate().is_ok());
        assert!(PaginationParams::new(1, MAX_PAGE_SIZE).validate().is_ok());

        let err = PaginationParams::new(0, 10).validate().unwrap_err();
        assert_eq!(err.code(), codes::VALUE_OUT_OF_RANGE);

        let err = PaginationParams::new(1, MAX_PAGE_SIZE + 1).validate().unwrap_err();
        assert_eq!(err.code(), codes::VALUE_OUT_OF_RANGE);
        assert_eq!(err.detail("paramName"), Some(&serde_json::json!("pageSize")));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Paginated::new(vec![1, 2], 1, 2, 5);
        assert_eq!(page.meta.total_pages, 3);

        let empty: Paginated<i32> = Paginated::new(vec![], 1, 10, 0);
        assert_eq!(empty.meta.total_pages, 0);
    }
}
