//! Best-effort audit trail recording.

pub mod service;

pub use service::AuditService;
