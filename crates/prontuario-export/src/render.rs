use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;

/// Render a plain-text Tera template.
///
/// `context` is serialized through `serde_json` and its top-level fields
/// become template variables. Template names should not end in `.html` so
/// values are never HTML-escaped. Templates lay out their own blank lines;
/// only the ends of the document are trimmed, so field values keep their
/// spacing.
pub fn render_text<C: Serialize>(
    template_name: &str,
    template_content: &str,
    context: &C,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(context)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered.trim().to_string())
}

