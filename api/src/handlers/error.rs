//! Domain-error to HTTP-response mapping.

use actix_web::HttpResponse;
use tracing::{error, warn};

use libris_core::errors::{AuthError, DomainError, EmailError, LibraryError, TokenError};

use crate::dto::ErrorResponse;

/// Convert a domain error into the HTTP response the client sees
///
/// Store-level detail stays in the log; the body carries a stable code and
/// a message safe to show.
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Token(e) => token_error_response(e),
        DomainError::Auth(e) => auth_error_response(e),
        DomainError::Email(e) => email_error_response(e),
        DomainError::Library(e) => library_error_response(e),

        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_failed", message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("{} was not found", resource),
        )),
        DomainError::Internal { message } => {
            error!("internal error: {}", message);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("internal_error", "An internal error occurred"))
        }
    }
}

fn token_error_response(error: &TokenError) -> HttpResponse {
    match error {
        TokenError::InvalidArgument { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("invalid_argument", message))
        }
        TokenError::Invalid => HttpResponse::Forbidden().json(ErrorResponse::new(
            "invalid_token",
            "Token is invalid or expired",
        )),
        TokenError::Forbidden => HttpResponse::Forbidden().json(ErrorResponse::new(
            "forbidden",
            "Operation forbidden by token policy",
        )),
        TokenError::Store { message } => {
            error!("token store failure: {}", message);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("store_error", "Token store failure"))
        }
        TokenError::Revocation { message } => {
            error!("revocation failure: {}", message);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("revocation_error", "Token revocation failure"))
        }
    }
}

fn auth_error_response(error: &AuthError) -> HttpResponse {
    match error {
        AuthError::UserNotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new("user_not_found", "User not found"))
        }
        AuthError::WrongPassword => {
            HttpResponse::Forbidden().json(ErrorResponse::new("wrong_password", "Wrong password"))
        }
        AuthError::UserAlreadyExists => HttpResponse::Conflict().json(ErrorResponse::new(
            "user_already_exists",
            "Username is already taken",
        )),
        AuthError::EmailInUse => HttpResponse::Conflict().json(ErrorResponse::new(
            "email_in_use",
            "Email is already in use",
        )),
        AuthError::PasswordMismatch => HttpResponse::BadRequest().json(ErrorResponse::new(
            "password_mismatch",
            "Passwords do not match",
        )),
        AuthError::ValidationFailed { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_failed", message))
        }
    }
}

fn email_error_response(error: &EmailError) -> HttpResponse {
    warn!("email delivery failure: {}", error);
    match error {
        EmailError::Timeout => HttpResponse::RequestTimeout().json(ErrorResponse::new(
            "email_timeout",
            "Email delivery timed out",
        )),
        EmailError::Temporary => HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
            "email_unavailable",
            "Email delivery is temporarily unavailable",
        )),
        EmailError::Permanent => HttpResponse::InternalServerError().json(ErrorResponse::new(
            "email_failed",
            "Email could not be delivered",
        )),
    }
}

fn library_error_response(error: &LibraryError) -> HttpResponse {
    match error {
        LibraryError::BookNotFound => {
            HttpResponse::NotFound().json(ErrorResponse::new("book_not_found", "Book not found"))
        }
        LibraryError::NotCheckedOut => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_checked_out",
            "Book is not checked out by this user",
        )),
        LibraryError::NotWaitlisted => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_waitlisted",
            "Book is not on this user's waitlist",
        )),
        LibraryError::AlreadyCheckedOut => HttpResponse::Conflict().json(ErrorResponse::new(
            "already_checked_out",
            "Book is already checked out by this user",
        )),
        LibraryError::AlreadyWaitlisted => HttpResponse::Conflict().json(ErrorResponse::new(
            "already_waitlisted",
            "Book is already on this user's waitlist",
        )),
        LibraryError::WaitlistFull => HttpResponse::Conflict().json(ErrorResponse::new(
            "waitlist_full",
            "Waitlist for this book is full",
        )),
        LibraryError::UserWaitlistLimitReached => HttpResponse::Conflict().json(
            ErrorResponse::new("waitlist_limit", "User has reached the waitlist limit"),
        ),
    }
}

/// Map validator failures on request bodies to a 400
pub fn validation_error_response(errors: &validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("validation_failed", errors.to_string()))
}
