//! prontuario-storage
//!
//! Object storage for practice records. Rows are JSON objects under
//! owner-scoped keys; attachments are raw objects in the same store.

pub mod client;
pub mod error;
pub mod objects;
pub mod records;
pub mod repository;
pub mod store;
