//! Domain-specific error types and error handling.

use thiserror::Error;

/// Token lifecycle errors
///
/// `Store` failures are transient and may be retried by repeating the whole
/// enclosing operation. `Revocation` failures are fatal to the enclosing
/// flow: a login must not issue new tokens while old ones may still be live.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Token store failure: {message}")]
    Store { message: String },

    #[error("Revocation failed: {message}")]
    Revocation { message: String },

    #[error("Token is invalid or expired")]
    Invalid,

    #[error("Operation forbidden by token policy")]
    Forbidden,
}

/// Authentication flow errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Wrong password")]
    WrongPassword,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Email already in use")]
    EmailInUse,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

/// Email delivery errors, mapped to distinct HTTP statuses by the API layer
#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Temporary delivery failure")]
    Temporary,

    #[error("Delivery timed out")]
    Timeout,

    #[error("Permanent delivery failure")]
    Permanent,
}

/// Library (checkout/waitlist) errors
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Book not found")]
    BookNotFound,

    #[error("Book already checked out by this user")]
    AlreadyCheckedOut,

    #[error("Book already on this user's waitlist")]
    AlreadyWaitlisted,

    #[error("Book is not checked out by this user")]
    NotCheckedOut,

    #[error("Book is not on this user's waitlist")]
    NotWaitlisted,

    #[error("Waitlist for this book is full")]
    WaitlistFull,

    #[error("User has reached the waitlist limit")]
    UserWaitlistLimitReached,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Library(#[from] LibraryError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Convenience constructor for store-level token failures
    pub fn store(message: impl Into<String>) -> Self {
        DomainError::Token(TokenError::Store {
            message: message.into(),
        })
    }
}
