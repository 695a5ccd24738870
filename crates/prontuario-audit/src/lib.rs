//! prontuario-audit
//!
//! Application-level audit trail for record access and changes.

pub mod events;

pub use events::{AuditAction, AuditEvent};
