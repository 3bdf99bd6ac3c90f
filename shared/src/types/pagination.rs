//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Minimum number of items per page
pub const MIN_PER_PAGE: u32 = 1;

/// Maximum number of items per page
pub const MAX_PER_PAGE: u32 = 100;

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl Pagination {
    /// Create a new pagination with custom values
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.per_page
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u32 {
        self.per_page
    }

    /// Calculate offset as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Calculate limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        self.limit() as i64
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The actual data items
    pub data: Vec<T>,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub per_page: u32,

    /// Total number of items
    pub total: u64,

    /// Total number of pages
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Build a paginated response from a page of items and the total count
    pub fn new(data: Vec<T>, pagination: &Pagination, total: u64) -> Self {
        let per_page = pagination.per_page.max(MIN_PER_PAGE) as u64;
        let total_pages = if total == 0 {
            0
        } else {
            ((total + per_page - 1) / per_page) as u32
        };
        Self {
            data,
            page: pagination.page,
            per_page: pagination.per_page,
            total,
            total_pages,
        }
    }

    /// Whether there is a page after the current one
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_calculation() {
        let pagination = Pagination::new(3, 20);
        assert_eq!(pagination.offset(), 40);
        assert_eq!(pagination.limit(), 20);
    }

    #[test]
    fn test_page_floor() {
        let pagination = Pagination::new(0, 20);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_per_page_clamped() {
        let pagination = Pagination::new(1, 1000);
        assert_eq!(pagination.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_paginated_response_metadata() {
        let pagination = Pagination::new(1, 10);
        let response = PaginatedResponse::new(vec![1, 2, 3], &pagination, 23);
        assert_eq!(response.total_pages, 3);
        assert!(response.has_next_page());

        let empty: PaginatedResponse<i32> = PaginatedResponse::new(vec![], &pagination, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next_page());
    }
}
