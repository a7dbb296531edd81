//! Catalog and checkout/waitlist DTOs.

use serde::Deserialize;

use libris_core::domain::entities::BookSearchFilter;
use libris_shared::types::Pagination;

/// Query string for GET /books
#[derive(Debug, Deserialize, Default)]
pub struct BookSearchQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl BookSearchQuery {
    pub fn filter(&self) -> BookSearchFilter {
        BookSearchFilter {
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }

    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.per_page),
        )
    }
}

/// Query string naming the book a checkout/waitlist toggle targets
#[derive(Debug, Deserialize)]
pub struct BookSelector {
    /// ISBN-13 of the target book
    pub book: String,
}
