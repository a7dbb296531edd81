//! Library service implementation.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::book::{Book, BookSearchFilter};
use crate::errors::{DomainError, LibraryError};
use crate::repositories::BookRepository;

use libris_shared::types::{PaginatedResponse, Pagination};

/// Catalog queries and checkout/waitlist transitions
///
/// Conflict detection lives in the store layer (entry-table constraints);
/// this service sequences the calls and shapes the results.
pub struct LibraryService<B: BookRepository> {
    books: Arc<B>,
}

impl<B: BookRepository> LibraryService<B> {
    pub fn new(books: Arc<B>) -> Self {
        Self { books }
    }

    /// Search the catalog
    pub async fn search(
        &self,
        filter: &BookSearchFilter,
        pagination: &Pagination,
    ) -> Result<PaginatedResponse<Book>, DomainError> {
        let (items, total) = self.books.search(filter, pagination).await?;
        Ok(PaginatedResponse::new(items, pagination, total))
    }

    /// Fetch one book by ISBN-13
    pub async fn get(&self, isbn13: &str) -> Result<Book, DomainError> {
        self.books
            .find_by_isbn(isbn13)
            .await?
            .ok_or_else(|| LibraryError::BookNotFound.into())
    }

    /// Check a book out to a user
    pub async fn checkout(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        self.books.checkout(user_id, isbn13).await?;
        info!(%user_id, isbn13, "checked out");
        Ok(())
    }

    /// Check a book back in
    pub async fn check_in(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        self.books.check_in(user_id, isbn13).await?;
        info!(%user_id, isbn13, "checked in");
        Ok(())
    }

    /// Add a user to a book's waitlist
    pub async fn join_waitlist(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        self.books.join_waitlist(user_id, isbn13).await?;
        info!(%user_id, isbn13, "joined waitlist");
        Ok(())
    }

    /// Remove a user from a book's waitlist
    pub async fn leave_waitlist(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        self.books.leave_waitlist(user_id, isbn13).await?;
        info!(%user_id, isbn13, "left waitlist");
        Ok(())
    }

    /// Books a user currently has checked out
    pub async fn checkouts(&self, user_id: Uuid) -> Result<Vec<Book>, DomainError> {
        self.books.checkouts_for_user(user_id).await
    }

    /// Books a user is currently waitlisted for
    pub async fn waitlist(&self, user_id: Uuid) -> Result<Vec<Book>, DomainError> {
        self.books.waitlist_for_user(user_id).await
    }
}
