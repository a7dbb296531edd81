//! Core business logic and domain layer for the Libris backend
//!
//! This crate contains the domain entities, repository contracts, and the
//! services that implement the token lifecycle, authentication flows, and
//! library operations. Persistence and delivery concerns live in the
//! `libris_infra` crate; HTTP concerns live in `libris_api`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult};
