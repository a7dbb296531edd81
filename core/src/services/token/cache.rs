//! Token cache trait.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Fast-path store for issued token payloads
///
/// The cache is never authoritative: every value can be reconstructed from
/// the token store, so callers treat read errors as misses and tolerate
/// write failures. Implementations acquire their connection per operation
/// and release it on drop, including on the error path.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Store a value under `key` with a time-to-live in seconds
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError>;

    /// Fetch the value under `key`, if present and not yet expired
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Remove the value under `key`; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}

#[cfg(test)]
pub use mock::MockTokenCache;

#[cfg(test)]
mod mock {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::errors::TokenError;

    /// In-memory token cache for testing, honoring per-key TTLs
    pub struct MockTokenCache {
        entries: Arc<RwLock<HashMap<String, (String, DateTime<Utc>)>>>,
        fail_reads: Arc<RwLock<bool>>,
        fail_writes: Arc<RwLock<bool>>,
    }

    impl MockTokenCache {
        pub fn new() -> Self {
            Self {
                entries: Arc::new(RwLock::new(HashMap::new())),
                fail_reads: Arc::new(RwLock::new(false)),
                fail_writes: Arc::new(RwLock::new(false)),
            }
        }

        /// Make every get fail, to exercise the fall-through-to-store path
        pub async fn fail_reads(&self) {
            *self.fail_reads.write().await = true;
        }

        /// Make every set fail, to exercise the tolerated-write-failure path
        pub async fn fail_writes(&self) {
            *self.fail_writes.write().await = true;
        }

        /// Whether a live entry exists under `key`
        pub async fn contains(&self, key: &str) -> bool {
            let entries = self.entries.read().await;
            matches!(entries.get(key), Some((_, expires)) if *expires > Utc::now())
        }

        /// The TTL recorded for `key`, in whole seconds
        pub async fn ttl_of(&self, key: &str) -> Option<i64> {
            let entries = self.entries.read().await;
            entries
                .get(key)
                .map(|(_, expires)| (*expires - Utc::now()).num_seconds())
        }
    }

    impl Default for MockTokenCache {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl TokenCache for MockTokenCache {
        async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), DomainError> {
            if *self.fail_writes.read().await {
                return Err(TokenError::Store {
                    message: "cache write failed".to_string(),
                }
                .into());
            }
            let expires = Utc::now() + Duration::seconds(ttl_seconds as i64);
            self.entries
                .write()
                .await
                .insert(key.to_string(), (value.to_string(), expires));
            Ok(())
        }

        async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
            if *self.fail_reads.read().await {
                return Err(TokenError::Store {
                    message: "cache read failed".to_string(),
                }
                .into());
            }
            let entries = self.entries.read().await;
            Ok(entries
                .get(key)
                .filter(|(_, expires)| *expires > Utc::now())
                .map(|(value, _)| value.clone()))
        }

        async fn delete(&self, key: &str) -> Result<(), DomainError> {
            self.entries.write().await.remove(key);
            Ok(())
        }
    }
}
