//! Request and response DTOs

pub mod auth;
pub mod books;
pub mod error;

pub use error::ErrorResponse;
