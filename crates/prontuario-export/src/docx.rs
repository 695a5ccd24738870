use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Longest prefix treated as a `Label:` in a header line.
const MAX_LABEL_CHARS: usize = 24;

/// Convert a rendered narrative into a DOCX document.
///
/// The narrative is plain text, so structure is recovered line by line:
/// - an all-caps line → section heading
/// - `Label: value` → bold label followed by the value
/// - `---` → blank spacer before the closing line
/// - everything else → body paragraph
pub fn narrative_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new().add_style(
        Style::new("Heading1", StyleType::Paragraph)
            .name("heading 1")
            .size(styles.heading_size * 2), // OOXML uses half-points
    );

    for line in rendered.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "---" {
            docx = docx.add_paragraph(Paragraph::new());
        } else if is_heading(trimmed) {
            docx = docx.add_paragraph(heading_paragraph(trimmed, styles));
        } else if let Some((label, value)) = split_label(trimmed) {
            docx = docx.add_paragraph(labelled_paragraph(label, value, styles));
        } else {
            docx = docx.add_paragraph(body_paragraph(trimmed, styles));
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

/// `SESSION RECORD - INTAKE`, `CLINICAL OBSERVATIONS`.
fn is_heading(line: &str) -> bool {
    line.chars().any(char::is_alphabetic)
        && !line.chars().any(char::is_lowercase)
        && !line.contains(':')
}

fn split_label(line: &str) -> Option<(&str, &str)> {
    let (label, value) = line.split_once(": ")?;
    let plain = label
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-');
    (plain && label.chars().count() <= MAX_LABEL_CHARS).then_some((label, value))
}

fn heading_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style("Heading1").add_run(
        Run::new()
            .add_text(text)
            .bold()
            .size(styles.heading_size * 2)
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn labelled_paragraph(label: &str, value: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(
            Run::new()
                .add_text(format!("{label}: "))
                .bold()
                .size(styles.body_size * 2)
                .fonts(RunFonts::new().ascii(&styles.body_font)),
        )
        .add_run(
            Run::new()
                .add_text(value)
                .size(styles.body_size * 2)
                .fonts(RunFonts::new().ascii(&styles.body_font)),
        )
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().align(AlignmentType::Left).add_run(
        Run::new()
            .add_text(text)
            .size(styles.body_size * 2)
            .fonts(RunFonts::new().ascii(&styles.body_font)),
    )
}
