//! Password hashing contract.

use crate::errors::DomainError;

/// Hashes and verifies passwords
///
/// Hashing is CPU-bound, so callers on async executors should run it via
/// `spawn_blocking`; implementations stay synchronous.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}

#[cfg(test)]
pub use mock::MockPasswordHasher;

#[cfg(test)]
mod mock {
    use super::*;

    /// Transparent "hasher" for tests: hash(p) = "hashed:" + p
    pub struct MockPasswordHasher;

    impl PasswordHasher for MockPasswordHasher {
        fn hash(&self, password: &str) -> Result<String, DomainError> {
            Ok(format!("hashed:{}", password))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
            Ok(hash == format!("hashed:{}", password))
        }
    }
}
