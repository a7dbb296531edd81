//! Book entity.

use serde::{Deserialize, Serialize};

/// Catalog entry for a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// ISBN-13, the primary key of the catalog
    pub isbn13: String,

    /// Title
    pub title: String,

    /// Author
    pub author: String,

    /// Year of publication
    pub published_year: i32,

    /// Cover image URL
    pub image_url: Option<String>,

    /// Short description
    pub description: Option<String>,
}

/// Search filters for the catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookSearchFilter {
    /// Substring match against the title
    pub title: Option<String>,

    /// Substring match against the author
    pub author: Option<String>,
}

impl BookSearchFilter {
    /// Whether any filter is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}
