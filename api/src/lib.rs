//! # HTTP API Layer
//!
//! actix-web surface for the Libris backend: route handlers, DTOs, the
//! JWT auth middleware, error mapping and the app factory.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use state::AppState;
