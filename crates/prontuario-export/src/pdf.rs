//! PDF backend for [`LayoutDocument`], built on `printpdf` builtin fonts.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};
use tracing::debug;

use crate::error::ExportError;
use crate::layout::{Element, LayoutDocument, Weight};

/// Millimetres to points, for stroke widths.
const MM_TO_PT: f32 = 2.834_645_7;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Serialize a laid-out document to PDF bytes.
pub fn render_pdf(document: &LayoutDocument) -> Result<Vec<u8>, ExportError> {
    let g = document.geometry;
    let (doc, first_page, first_layer) = PdfDocument::new(
        &document.title,
        Mm(g.width_mm),
        Mm(g.height_mm),
        "Layer 1",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?,
    };

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(g.width_mm), Mm(g.height_mm), "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };
        for element in &page.elements {
            draw(&layer, &fonts, g.height_mm, element);
        }
    }
    debug!(pages = document.pages.len(), "pdf rendered");

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

/// Layout `y` grows downwards; PDF `y` grows upwards from the bottom edge.
fn draw(layer: &PdfLayerReference, fonts: &Fonts, page_height: f32, element: &Element) {
    match element {
        Element::Text {
            x_mm,
            y_mm,
            size_pt,
            weight,
            gray,
            text,
        } => {
            let font = match weight {
                Weight::Regular => &fonts.regular,
                Weight::Bold => &fonts.bold,
            };
            layer.set_fill_color(gray_color(*gray));
            layer.use_text(text.as_str(), *size_pt, Mm(*x_mm), Mm(page_height - y_mm), font);
        }
        Element::Rule {
            x1_mm,
            x2_mm,
            y_mm,
            gray,
        } => {
            stroke(layer, *x1_mm, *x2_mm, page_height - y_mm, 0.75, *gray);
        }
        // A stroke as thick as the band, through its middle.
        Element::Band {
            x_mm,
            y_mm,
            width_mm,
            height_mm,
            gray,
        } => {
            let middle = page_height - (y_mm + height_mm / 2.0);
            stroke(
                layer,
                *x_mm,
                x_mm + width_mm,
                middle,
                height_mm * MM_TO_PT,
                *gray,
            );
        }
    }
}

fn stroke(layer: &PdfLayerReference, x1: f32, x2: f32, y: f32, thickness_pt: f32, gray: u8) {
    layer.set_outline_color(gray_color(gray));
    layer.set_outline_thickness(thickness_pt);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(x1), Mm(y)), false),
            (Point::new(Mm(x2), Mm(y)), false),
        ],
        is_closed: false,
    });
}

fn gray_color(level: u8) -> Color {
    let v = f32::from(level) / 255.0;
    Color::Rgb(Rgb::new(v, v, v, None))
}
