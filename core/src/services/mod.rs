//! Domain services

pub mod audit;
pub mod auth;
pub mod email;
pub mod library;
pub mod token;

pub use audit::AuditService;
pub use auth::{AuthConfig, AuthService, PasswordHasher};
pub use email::{EmailMessage, EmailService};
pub use library::LibraryService;
pub use token::{
    IssueOptions, JwtSigner, TokenCache, TokenCleanupConfig, TokenCleanupService, TokenService,
    TokenServiceConfig,
};
