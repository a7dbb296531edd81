//! MySQL implementation of the BookRepository trait.
//!
//! Checkout and waitlist state is row-toggling: entry tables hold the
//! current relationship, history tables get a row per transition. Waitlist
//! capacity limits are enforced by database triggers that raise custom
//! SQLSTATEs; this module maps those back to `LibraryError` variants.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use libris_core::domain::entities::book::{Book, BookSearchFilter};
use libris_core::errors::{DomainError, LibraryError};
use libris_core::repositories::BookRepository;
use libris_shared::types::Pagination;

/// SQLSTATE raised by the waitlist-capacity trigger
const SQLSTATE_WAITLIST_FULL: &str = "45000";

/// SQLSTATE raised by the per-user waitlist-limit trigger
const SQLSTATE_USER_WAITLIST_LIMIT: &str = "45100";

/// SQLSTATE for integrity-constraint violations (duplicate entry rows)
const SQLSTATE_DUPLICATE: &str = "23000";

const BOOK_COLUMNS: &str = "isbn13, title, author, published_year, image_url, description";

/// MySQL implementation of BookRepository
pub struct MySqlBookRepository {
    pool: MySqlPool,
}

impl MySqlBookRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_book(row: &sqlx::mysql::MySqlRow) -> Result<Book, DomainError> {
        Ok(Book {
            isbn13: row
                .try_get("isbn13")
                .map_err(|e| DomainError::store(format!("failed to get isbn13: {}", e)))?,
            title: row
                .try_get("title")
                .map_err(|e| DomainError::store(format!("failed to get title: {}", e)))?,
            author: row
                .try_get("author")
                .map_err(|e| DomainError::store(format!("failed to get author: {}", e)))?,
            published_year: row
                .try_get("published_year")
                .map_err(|e| DomainError::store(format!("failed to get published_year: {}", e)))?,
            image_url: row
                .try_get("image_url")
                .map_err(|e| DomainError::store(format!("failed to get image_url: {}", e)))?,
            description: row
                .try_get("description")
                .map_err(|e| DomainError::store(format!("failed to get description: {}", e)))?,
        })
    }

    async fn book_exists(&self, isbn13: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM books WHERE isbn13 = ?) AS present")
            .bind(isbn13)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to check book: {}", e)))?;
        let present: i64 = row
            .try_get("present")
            .map_err(|e| DomainError::store(format!("failed to read existence: {}", e)))?;
        Ok(present == 1)
    }

    fn map_checkout_error(e: sqlx::Error) -> DomainError {
        match e.as_database_error().and_then(|db| db.code()) {
            Some(code) if code == SQLSTATE_DUPLICATE => LibraryError::AlreadyCheckedOut.into(),
            _ => DomainError::store(format!("checkout failed: {}", e)),
        }
    }

    fn map_waitlist_error(e: sqlx::Error) -> DomainError {
        match e.as_database_error().and_then(|db| db.code()) {
            Some(code) if code == SQLSTATE_DUPLICATE => LibraryError::AlreadyWaitlisted.into(),
            Some(code) if code == SQLSTATE_WAITLIST_FULL => LibraryError::WaitlistFull.into(),
            Some(code) if code == SQLSTATE_USER_WAITLIST_LIMIT => {
                LibraryError::UserWaitlistLimitReached.into()
            }
            _ => DomainError::store(format!("waitlist update failed: {}", e)),
        }
    }
}

#[async_trait]
impl BookRepository for MySqlBookRepository {
    async fn search(
        &self,
        filter: &BookSearchFilter,
        pagination: &Pagination,
    ) -> Result<(Vec<Book>, u64), DomainError> {
        let title_pattern = filter
            .title
            .as_deref()
            .map(|t| format!("%{}%", t))
            .unwrap_or_else(|| "%".to_string());
        let author_pattern = filter
            .author
            .as_deref()
            .map(|a| format!("%{}%", a))
            .unwrap_or_else(|| "%".to_string());

        let count_row = sqlx::query(
            "SELECT COUNT(*) AS total FROM books WHERE title LIKE ? AND author LIKE ?",
        )
        .bind(&title_pattern)
        .bind(&author_pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::store(format!("failed to count books: {}", e)))?;
        let total: i64 = count_row
            .try_get("total")
            .map_err(|e| DomainError::store(format!("failed to read count: {}", e)))?;

        let query = format!(
            "SELECT {} FROM books WHERE title LIKE ? AND author LIKE ? \
             ORDER BY title LIMIT ? OFFSET ?",
            BOOK_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(&title_pattern)
            .bind(&author_pattern)
            .bind(pagination.limit_i64())
            .bind(pagination.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to search books: {}", e)))?;

        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            books.push(Self::row_to_book(&row)?);
        }
        Ok((books, total as u64))
    }

    async fn find_by_isbn(&self, isbn13: &str) -> Result<Option<Book>, DomainError> {
        let query = format!("SELECT {} FROM books WHERE isbn13 = ? LIMIT 1", BOOK_COLUMNS);
        let result = sqlx::query(&query)
            .bind(isbn13)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to find book: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_book(&row)?)),
            None => Ok(None),
        }
    }

    async fn checkout(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        if !self.book_exists(isbn13).await? {
            return Err(LibraryError::BookNotFound.into());
        }

        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::store(format!("failed to begin transaction: {}", e)))?;

        sqlx::query(
            "INSERT INTO book_checkout_entries (user_id, isbn13, checkout_date) VALUES (?, ?, ?)",
        )
        .bind(user_id.to_string())
        .bind(isbn13)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Self::map_checkout_error)?;

        sqlx::query(
            "INSERT INTO book_checkout_history (user_id, isbn13, checkout_date) VALUES (?, ?, ?)",
        )
        .bind(user_id.to_string())
        .bind(isbn13)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::store(format!("failed to record checkout history: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::store(format!("failed to commit checkout: {}", e)))
    }

    async fn check_in(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::store(format!("failed to begin transaction: {}", e)))?;

        let deleted =
            sqlx::query("DELETE FROM book_checkout_entries WHERE user_id = ? AND isbn13 = ?")
                .bind(user_id.to_string())
                .bind(isbn13)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::store(format!("check-in failed: {}", e)))?;
        if deleted.rows_affected() == 0 {
            return Err(LibraryError::NotCheckedOut.into());
        }

        sqlx::query(
            "UPDATE book_checkout_history SET checkin_date = ? \
             WHERE user_id = ? AND isbn13 = ? AND checkin_date IS NULL",
        )
        .bind(Utc::now())
        .bind(user_id.to_string())
        .bind(isbn13)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::store(format!("failed to stamp check-in history: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::store(format!("failed to commit check-in: {}", e)))
    }

    async fn join_waitlist(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        if !self.book_exists(isbn13).await? {
            return Err(LibraryError::BookNotFound.into());
        }

        let now = Utc::now();
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::store(format!("failed to begin transaction: {}", e)))?;

        sqlx::query(
            "INSERT INTO book_waitlist_entries (user_id, isbn13, joined_date) VALUES (?, ?, ?)",
        )
        .bind(user_id.to_string())
        .bind(isbn13)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Self::map_waitlist_error)?;

        sqlx::query(
            "INSERT INTO book_waitlist_history (user_id, isbn13, joined_date) VALUES (?, ?, ?)",
        )
        .bind(user_id.to_string())
        .bind(isbn13)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::store(format!("failed to record waitlist history: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::store(format!("failed to commit waitlist join: {}", e)))
    }

    async fn leave_waitlist(&self, user_id: Uuid, isbn13: &str) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::store(format!("failed to begin transaction: {}", e)))?;

        let deleted =
            sqlx::query("DELETE FROM book_waitlist_entries WHERE user_id = ? AND isbn13 = ?")
                .bind(user_id.to_string())
                .bind(isbn13)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::store(format!("waitlist leave failed: {}", e)))?;
        if deleted.rows_affected() == 0 {
            return Err(LibraryError::NotWaitlisted.into());
        }

        sqlx::query(
            "UPDATE book_waitlist_history SET left_date = ? \
             WHERE user_id = ? AND isbn13 = ? AND left_date IS NULL",
        )
        .bind(Utc::now())
        .bind(user_id.to_string())
        .bind(isbn13)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::store(format!("failed to stamp waitlist history: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::store(format!("failed to commit waitlist leave: {}", e)))
    }

    async fn checkouts_for_user(&self, user_id: Uuid) -> Result<Vec<Book>, DomainError> {
        let query = "SELECT b.isbn13, b.title, b.author, b.published_year, b.image_url, b.description \
             FROM books b \
             INNER JOIN book_checkout_entries e ON e.isbn13 = b.isbn13 \
             WHERE e.user_id = ? ORDER BY e.checkout_date";
        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to list checkouts: {}", e)))?;

        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            books.push(Self::row_to_book(&row)?);
        }
        Ok(books)
    }

    async fn waitlist_for_user(&self, user_id: Uuid) -> Result<Vec<Book>, DomainError> {
        let query = "SELECT b.isbn13, b.title, b.author, b.published_year, b.image_url, b.description \
             FROM books b \
             INNER JOIN book_waitlist_entries e ON e.isbn13 = b.isbn13 \
             WHERE e.user_id = ? ORDER BY e.joined_date";
        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::store(format!("failed to list waitlist: {}", e)))?;

        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            books.push(Self::row_to_book(&row)?);
        }
        Ok(books)
    }
}
