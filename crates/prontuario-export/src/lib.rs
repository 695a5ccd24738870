//! prontuario-export
//!
//! Session narratives (Tera), the paginated patient dossier, and the PDF and
//! DOCX writers.

pub mod docx;
pub mod dossier;
pub mod error;
pub mod layout;
pub mod narrative;
pub mod pdf;
pub mod render;
pub mod styles;
pub mod text;
