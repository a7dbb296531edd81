//! Shared application state.

use std::sync::Arc;

use libris_core::services::{AuthService, LibraryService, TokenService};
use libris_infra::{
    BcryptPasswordHasher, LoggingEmailService, MySqlAuditLogRepository, MySqlBookRepository,
    MySqlTokenRepository, MySqlUserRepository, RedisTokenCache,
};

/// Token lifecycle service over the production implementations
pub type Tokens =
    TokenService<MySqlTokenRepository, MySqlUserRepository, RedisTokenCache, MySqlAuditLogRepository>;

/// Auth flow service over the production implementations
pub type Auth = AuthService<
    MySqlTokenRepository,
    MySqlUserRepository,
    RedisTokenCache,
    LoggingEmailService,
    BcryptPasswordHasher,
    MySqlAuditLogRepository,
>;

/// Catalog and checkout/waitlist service
pub type Library = LibraryService<MySqlBookRepository>;

/// Services shared by all handlers via `web::Data`
pub struct AppState {
    pub auth: Arc<Auth>,
    pub tokens: Arc<Tokens>,
    pub library: Arc<Library>,
}
