use serde::{Deserialize, Serialize};

/// Document styling configuration for exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentStyles {
    /// Font for body text in DOCX exports.
    pub body_font: String,

    /// Font for headings in DOCX exports.
    pub heading_font: String,

    /// Body text font size in points (DOCX).
    pub body_size: usize,

    /// Section heading font size in points (DOCX).
    pub heading_size: usize,

    /// Page size and margin in millimetres, shared by PDF and DOCX.
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Times New Roman".to_string(),
            heading_font: "Arial".to_string(),
            body_size: 12,
            heading_size: 13,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 20.0,
        }
    }
}
