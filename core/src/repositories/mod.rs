pub mod audit;
pub mod book;
pub mod token;
pub mod user;

pub use audit::{AuditLogRepository, NoOpAuditLogRepository};
pub use book::BookRepository;
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use audit::MockAuditLogRepository;
#[cfg(test)]
pub use book::MockBookRepository;
#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;
