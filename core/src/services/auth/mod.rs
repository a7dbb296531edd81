//! Authentication flows: registration, login, refresh, logout and the
//! password-reset protocol.

pub mod config;
pub mod password;
pub mod service;

pub use config::AuthConfig;
pub use password::PasswordHasher;
pub use service::{AuthService, LoginOutcome};
