//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Maximum page size accepted from clients
pub const MAX_PER_PAGE: u32 = 100;

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
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.per_page
    }

    /// Calculate offset as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Calculate limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        self.per_page as i64
    }
}

/// A page of results together with its pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items in the current page
    pub items: Vec<T>,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub per_page: u32,

    /// Total number of items across all pages
    pub total: u64,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(items: Vec<T>, pagination: &Pagination, total: u64) -> Self {
        Self {
            items,
            page: pagination.page,
            per_page: pagination.per_page,
            total,
        }
    }

    /// Total number of pages
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            0
        } else {
            (self.total + self.per_page as u64 - 1) / self.per_page as u64
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_calculation() {
        let pagination = Pagination::new(3, 20);
        assert_eq!(pagination.offset(), 40);
    }

    #[test]
    fn test_per_page_is_clamped() {
        let pagination = Pagination::new(1, 5000);
        assert_eq!(pagination.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn test_total_pages() {
        let pagination = Pagination::new(1, 20);
        let response: PaginatedResponse<u32> = PaginatedResponse::new(vec![], &pagination, 41);
        assert_eq!(response.total_pages(), 3);
    }
}
