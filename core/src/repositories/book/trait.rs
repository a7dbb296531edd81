//! Book repository trait covering the catalog and checkout/waitlist state.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::book::{Book, BookSearchFilter};
use crate::errors::DomainError;
use libris_shared::types::Pagination;

/// Repository trait for the book catalog and per-user checkout/waitlist rows
///
/// Checkout and waitlist state is row-toggling: an entry row exists while the
/// relationship holds, and every transition appends to the matching history
/// table. Implementations surface constraint violations as `LibraryError`
/// variants rather than raw store errors.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Search the catalog with optional title/author substring filters
    ///
    /// # Returns
    /// * `Ok((books, total))` - One page of matches plus the unpaged total
    async fn search(
        &self,
        filter: &BookSearchFilter,
        pagination: &Pagination,
    ) -> Result<(Vec<Book>, u64), DomainError>;

    /// Find a single book by ISBN-13
    async fn find_by_isbn(&self, isbn13: &str) -> Result<Option<Book>, DomainError>;

    /// Check a book out to a user
    ///
    /// Fails with `LibraryError::BookNotFound` for an unknown ISBN and
    /// `LibraryError::AlreadyCheckedOut` when an entry row already exists.
    async fn checkout(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError>;

    /// Check a book back in, stamping the history row's check-in date
    ///
    /// Fails with `LibraryError::NotCheckedOut` when no entry row exists.
    async fn check_in(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError>;

    /// Add a user to a book's waitlist
    ///
    /// Fails with `AlreadyWaitlisted`, `WaitlistFull` or
    /// `UserWaitlistLimitReached` per the store's constraints.
    async fn join_waitlist(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError>;

    /// Remove a user from a book's waitlist
    ///
    /// Fails with `LibraryError::NotWaitlisted` when no entry row exists.
    async fn leave_waitlist(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError>;

    /// Books currently checked out by a user
    async fn checkouts_for_user(&self, user_id: Uuid) -> Result<Vec<Book>, DomainError>;

    /// Books a user is currently waitlisted for
    async fn waitlist_for_user(&self, user_id: Uuid) -> Result<Vec<Book>, DomainError>;
}
