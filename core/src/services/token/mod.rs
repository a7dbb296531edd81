//! Token lifecycle services: issuance, verification, rotation, revocation
//! and background expiry sweeps.

pub mod cache;
pub mod cleanup;
pub mod config;
pub mod service;
pub mod signer;

pub use cache::TokenCache;
pub use cleanup::{TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use service::{IssueOptions, TokenService};
pub use signer::JwtSigner;

#[cfg(test)]
pub use cache::MockTokenCache;
