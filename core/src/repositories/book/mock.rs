//! Mock implementation of BookRepository for testing

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::book::{Book, BookSearchFilter};
use crate::errors::{DomainError, LibraryError};
use libris_shared::types::Pagination;

use super::r#trait::BookRepository;

/// Per-book waitlist capacity enforced by the store triggers
pub const WAITLIST_CAPACITY: usize = 3;

/// Per-user waitlist membership limit enforced by the store triggers
pub const USER_WAITLIST_LIMIT: usize = 3;

/// In-memory book repository for testing
///
/// Mirrors the store-side constraints (capacity and membership limits) so
/// service tests can exercise the conflict paths without a database.
pub struct MockBookRepository {
    books: Arc<RwLock<HashMap<String, Book>>>,
    checkouts: Arc<RwLock<HashSet<(Uuid, String)>>>,
    waitlist: Arc<RwLock<HashSet<(Uuid, String)>>>,
}

impl MockBookRepository {
    pub fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(HashMap::new())),
            checkouts: Arc::new(RwLock::new(HashSet::new())),
            waitlist: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Directly insert a catalog row
    pub async fn seed(&self, book: Book) {
        self.books.write().await.insert(book.isbn13.clone(), book);
    }
}

impl Default for MockBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_filter(book: &Book, filter: &BookSearchFilter) -> bool {
    if let Some(title) = &filter.title {
        if !book.title.to_lowercase().contains(&title.to_lowercase()) {
            return false;
        }
    }
    if let Some(author) = &filter.author {
        if !book.author.to_lowercase().contains(&author.to_lowercase()) {
            return false;
        }
    }
    true
}

#[async_trait]
impl BookRepository for MockBookRepository {
    async fn search(
        &self,
        filter: &BookSearchFilter,
        pagination: &Pagination,
    ) -> Result<(Vec<Book>, u64), DomainError> {
        let books = self.books.read().await;
        let mut matches: Vec<Book> = books
            .values()
            .filter(|b| matches_filter(b, filter))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.title.cmp(&b.title));

        let total = matches.len() as u64;
        let page: Vec<Book> = matches
            .into_iter()
            .skip(pagination.offset_i64() as usize)
            .take(pagination.limit_i64() as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_by_isbn(&self, isbn13: &str) -> Result<Option<Book>, DomainError> {
        Ok(self.books.read().await.get(isbn13).cloned())
    }

    async fn checkout(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        if !self.books.read().await.contains_key(isbn13) {
            return Err(LibraryError::BookNotFound.into());
        }
        let mut checkouts = self.checkouts.write().await;
        if !checkouts.insert((user_id, isbn13.to_string())) {
            return Err(LibraryError::AlreadyCheckedOut.into());
        }
        Ok(())
    }

    async fn check_in(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        let mut checkouts = self.checkouts.write().await;
        if !checkouts.remove(&(user_id, isbn13.to_string())) {
            return Err(LibraryError::NotCheckedOut.into());
        }
        Ok(())
    }

    async fn join_waitlist(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        if !self.books.read().await.contains_key(isbn13) {
            return Err(LibraryError::BookNotFound.into());
        }
        let mut waitlist = self.waitlist.write().await;
        if waitlist.contains(&(user_id, isbn13.to_string())) {
            return Err(LibraryError::AlreadyWaitlisted.into());
        }
        let book_count = waitlist.iter().filter(|(_, i)| i == isbn13).count();
        if book_count >= WAITLIST_CAPACITY {
            return Err(LibraryError::WaitlistFull.into());
        }
        let user_count = waitlist.iter().filter(|(u, _)| *u == user_id).count();
        if user_count >= USER_WAITLIST_LIMIT {
            return Err(LibraryError::UserWaitlistLimitReached.into());
        }
        waitlist.insert((user_id, isbn13.to_string()));
        Ok(())
    }

    async fn leave_waitlist(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        let mut waitlist = self.waitlist.write().await;
        if !waitlist.remove(&(user_id, isbn13.to_string())) {
            return Err(LibraryError::NotWaitlisted.into());
        }
        Ok(())
    }

    async fn checkouts_for_user(&self, user_id: Uuid) -> Result<Vec<Book>, DomainError> {
        let checkouts = self.checkouts.read().await;
        let books = self.books.read().await;
        Ok(checkouts
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, isbn)| books.get(isbn).cloned())
            .collect())
    }

    async fn waitlist_for_user(&self, user_id: Uuid) -> Result<Vec<Book>, DomainError> {
        let waitlist = self.waitlist.read().await;
        let books = self.books.read().await;
        Ok(waitlist
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, isbn)| books.get(isbn).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(isbn: &str, title: &str, author: &str) -> Book {
        Book {
            isbn13: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            published_year: 1990,
            image_url: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_checkout_toggles_entry_row() {
        let repo = MockBookRepository::new();
        let user_id = Uuid::new_v4();
        repo.seed(book("9780000000001", "Dune", "Frank Herbert")).await;

        repo.checkout(user_id, "9780000000001").await.unwrap();
        assert!(matches!(
            repo.checkout(user_id, "9780000000001").await,
            Err(DomainError::Library(LibraryError::AlreadyCheckedOut))
        ));

        repo.check_in(user_id, "9780000000001").await.unwrap();
        assert!(matches!(
            repo.check_in(user_id, "9780000000001").await,
            Err(DomainError::Library(LibraryError::NotCheckedOut))
        ));
    }

    #[tokio::test]
    async fn test_waitlist_capacity() {
        let repo = MockBookRepository::new();
        repo.seed(book("9780000000002", "Hyperion", "Dan Simmons")).await;

        for _ in 0..WAITLIST_CAPACITY {
            repo.join_waitlist(Uuid::new_v4(), "9780000000002")
                .await
                .unwrap();
        }
        assert!(matches!(
            repo.join_waitlist(Uuid::new_v4(), "9780000000002").await,
            Err(DomainError::Library(LibraryError::WaitlistFull))
        ));
    }

    #[tokio::test]
    async fn test_search_filters_and_pages() {
        let repo = MockBookRepository::new();
        repo.seed(book("1", "Dune", "Frank Herbert")).await;
        repo.seed(book("2", "Dune Messiah", "Frank Herbert")).await;
        repo.seed(book("3", "Hyperion", "Dan Simmons")).await;

        let filter = BookSearchFilter {
            title: Some("dune".into()),
            author: None,
        };
        let (page, total) = repo
            .search(&filter, &Pagination::default())
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].title, "Dune");
    }
}
