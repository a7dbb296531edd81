//! Domain entities

pub mod audit;
pub mod book;
pub mod token;
pub mod user;

pub use audit::{AuditAction, AuditEntry, AuditOutcome};
pub use book::{Book, BookSearchFilter};
pub use token::{Claims, IssuedToken, Token, TokenKind, TokenPair};
pub use user::User;
