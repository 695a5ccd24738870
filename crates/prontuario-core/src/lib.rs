//! prontuario-core
//!
//! Pure domain types, reference tables, formatters and the draft/form rules.
//! No AWS SDK dependency; this is the shared vocabulary of the Prontuário system.

pub mod age;
pub mod draft;
pub mod error;
pub mod format;
pub mod models;
pub mod reference;
pub mod storage_keys;
