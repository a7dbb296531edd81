//! Shared utilities and common types for the Libris server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Common response and pagination types
//! - Validation utilities

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CorsConfig, DatabaseConfig, Environment, ServerConfig,
    TokenSecretsConfig,
};
pub use types::{ApiResponse, PaginatedResponse, Pagination};
pub use utils::validation;
