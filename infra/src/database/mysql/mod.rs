//! MySQL repository implementations

pub mod audit_repository_impl;
pub mod book_repository_impl;
pub mod token_repository_impl;
pub mod user_repository_impl;

pub use audit_repository_impl::MySqlAuditLogRepository;
pub use book_repository_impl::MySqlBookRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
