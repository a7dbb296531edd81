//! Bcrypt password hashing.

use bcrypt::{hash, verify, DEFAULT_COST};

use libris_core::errors::DomainError;
use libris_core::services::PasswordHasher;

/// Bcrypt implementation of the `PasswordHasher` contract
///
/// Hashing is synchronous and CPU-bound; async callers wrap calls in
/// `spawn_blocking` or accept the latency on login-sized traffic.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("password hashing failed: {}", e),
        })
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        verify(password, hash).map_err(|e| DomainError::Internal {
            message: format!("password verification failed: {}", e),
        })
    }
}
