//! Catalog search and checkout/waitlist flows.

pub mod service;

pub use service::LibraryService;
