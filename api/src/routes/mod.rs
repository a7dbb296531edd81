//! Route handlers

pub mod account;
pub mod auth;
pub mod books;
pub mod health;
