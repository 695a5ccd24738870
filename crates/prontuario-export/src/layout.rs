//! Backend-independent page layout.
//!
//! [`PageComposer`] walks a vertical cursor down an A4 page and emits
//! positioned [`Element`]s. Every block asks for room with `ensure_space`
//! first; when the block would cross the bottom margin a new page is started
//! and the running header is drawn again. Coordinates are millimetres from
//! the top-left corner, with `y` at the text baseline.

use crate::styles::DocumentStyles;

/// Points to millimetres.
const PT_TO_MM: f32 = 0.352_778;

/// Average Helvetica glyph width as a fraction of the font size.
const REGULAR_WIDTH_EM: f32 = 0.5;
const BOLD_WIDTH_EM: f32 = 0.55;

/// Leading for 9pt body lines.
const LINE_HEIGHT_MM: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 20.0,
    };

    pub fn from_styles(styles: &DocumentStyles) -> Self {
        Self {
            width_mm: styles.page_width_mm,
            height_mm: styles.page_height_mm,
            margin_mm: styles.margin_mm,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    /// Lowest `y` a block may reach.
    pub fn bottom_limit(&self) -> f32 {
        self.height_mm - self.margin_mm
    }

    pub fn center_x(&self) -> f32 {
        self.width_mm / 2.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x_mm: f32,
        y_mm: f32,
        size_pt: f32,
        weight: Weight,
        /// 0 is black, 255 is white.
        gray: u8,
        text: String,
    },
    Rule {
        x1_mm: f32,
        x2_mm: f32,
        y_mm: f32,
        gray: u8,
    },
    /// Filled rectangle; `y_mm` is its top edge.
    Band {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
        gray: u8,
    },
}

impl Element {
    pub fn text(&self) -> Option<&str> {
        match self {
            Element::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    /// Text elements in emission order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(Element::text)
    }
}

/// A finished document, ready for a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl LayoutDocument {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::texts)
    }
}

/// Lines repeated at the top of every page.
#[derive(Debug, Clone)]
pub struct RunningHeader {
    pub title: String,
    pub subtitle: String,
    pub contact: Option<String>,
}

/// Estimated rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, size_pt: f32, weight: Weight) -> f32 {
    let em = match weight {
        Weight::Regular => REGULAR_WIDTH_EM,
        Weight::Bold => BOLD_WIDTH_EM,
    };
    text.chars().count() as f32 * size_pt * PT_TO_MM * em
}

/// Greedy word wrap. Explicit newlines are kept; a word wider than the line
/// is split by characters.
pub fn wrap(text: &str, width_mm: f32, size_pt: f32, weight: Weight) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width_mm(&candidate, size_pt, weight) <= width_mm {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width_mm(word, size_pt, weight) <= width_mm {
                current = word.to_string();
            } else {
                for c in word.chars() {
                    current.push(c);
                    if text_width_mm(&current, size_pt, weight) > width_mm {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    }
                }
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

pub struct PageComposer {
    geometry: PageGeometry,
    header: RunningHeader,
    pages: Vec<Page>,
    y: f32,
}

impl PageComposer {
    /// Starts the first page with its header.
    pub fn new(geometry: PageGeometry, header: RunningHeader) -> Self {
        let mut composer = Self {
            geometry,
            header,
            pages: Vec::new(),
            y: 0.0,
        };
        composer.start_page();
        composer
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Break to a new page unless `height_mm` still fits above the bottom margin.
    pub fn ensure_space(&mut self, height_mm: f32) {
        if self.y + height_mm > self.geometry.bottom_limit() {
            self.start_page();
        }
    }

    pub fn gap(&mut self, height_mm: f32) {
        self.y += height_mm;
    }

    /// Centred bold document title.
    pub fn title(&mut self, text: &str) {
        self.ensure_space(10.0);
        self.centered(text, 16.0, Weight::Bold, 0);
        self.y += 10.0;
    }

    pub fn section(&mut self, text: &str) {
        self.ensure_space(15.0);
        let x = self.geometry.margin_mm;
        self.push_text(x, text, 12.0, Weight::Bold, 60);
        self.y += 6.0;
    }

    /// `Label: value`, the value wrapping under the label. Blank values are
    /// skipped entirely.
    pub fn field(&mut self, label: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.ensure_space(8.0);

        let margin = self.geometry.margin_mm;
        let label = format!("{label}: ");
        let label_width = text_width_mm(&label, 9.0, Weight::Bold);
        self.push_text(margin, &label, 9.0, Weight::Bold, 0);

        let value_width = self.geometry.content_width() - label_width;
        let mut lines = wrap(value, value_width, 9.0, Weight::Regular).into_iter();
        if let Some(first) = lines.next() {
            self.push_text(margin + label_width, &first, 9.0, Weight::Regular, 0);
        }
        for line in lines {
            self.y += LINE_HEIGHT_MM;
            self.ensure_space(LINE_HEIGHT_MM);
            self.push_text(margin, &line, 9.0, Weight::Regular, 0);
        }
        self.y += 5.0;
    }

    pub fn paragraph(&mut self, text: &str) {
        self.ensure_space(10.0);
        let margin = self.geometry.margin_mm;
        for line in wrap(text, self.geometry.content_width(), 9.0, Weight::Regular) {
            self.ensure_space(LINE_HEIGHT_MM);
            self.push_text(margin, &line, 9.0, Weight::Regular, 0);
            self.y += LINE_HEIGHT_MM;
        }
        self.y += 2.0;
    }

    /// Shaded full-width bar with bold text, used to open a session block.
    /// Keeps at least 30mm together with it.
    pub fn band(&mut self, text: &str) {
        self.ensure_space(30.0);
        let margin = self.geometry.margin_mm;
        let width = self.geometry.content_width();
        let top = self.y - 4.0;
        self.current_page().elements.push(Element::Band {
            x_mm: margin,
            y_mm: top,
            width_mm: width,
            height_mm: 8.0,
            gray: 240,
        });
        self.push_text(margin + 2.0, text, 10.0, Weight::Bold, 0);
        self.y += 8.0;
    }

    /// Signature line with the signer's name and registration under it.
    pub fn signature(&mut self, name: &str, registration: &str) {
        self.ensure_space(40.0);
        self.y += 10.0;
        let margin = self.geometry.margin_mm;
        let y = self.y;
        let x2 = self.geometry.width_mm - margin - 30.0;
        self.current_page().elements.push(Element::Rule {
            x1_mm: margin + 30.0,
            x2_mm: x2,
            y_mm: y,
            gray: 150,
        });
        self.y += 5.0;
        self.centered(name, 10.0, Weight::Regular, 0);
        self.y += 4.0;
        self.centered(registration, 10.0, Weight::Regular, 0);
        self.y += 8.0;
    }

    /// Small gray centred lines, one under the other.
    pub fn caption(&mut self, lines: &[&str]) {
        for line in lines {
            self.ensure_space(LINE_HEIGHT_MM);
            self.centered(line, 8.0, Weight::Regular, 100);
            self.y += LINE_HEIGHT_MM;
        }
    }

    pub fn finish(self, title: impl Into<String>) -> LayoutDocument {
        LayoutDocument {
            title: title.into(),
            geometry: self.geometry,
            pages: self.pages,
        }
    }

    fn start_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.geometry.margin_mm;
        self.running_header();
    }

    fn running_header(&mut self) {
        let header = self.header.clone();
        self.centered(&header.title, 14.0, Weight::Bold, 0);
        self.y += 6.0;
        self.centered(&header.subtitle, 10.0, Weight::Regular, 0);
        self.y += 4.0;
        if let Some(contact) = header.contact.as_deref() {
            self.centered(contact, 10.0, Weight::Regular, 0);
            self.y += 4.0;
        }
        self.y += 2.0;
        let margin = self.geometry.margin_mm;
        let y = self.y;
        let x2 = self.geometry.width_mm - margin;
        self.current_page().elements.push(Element::Rule {
            x1_mm: margin,
            x2_mm: x2,
            y_mm: y,
            gray: 200,
        });
        self.y += 8.0;
    }

    fn centered(&mut self, text: &str, size_pt: f32, weight: Weight, gray: u8) {
        let x = self.geometry.center_x() - text_width_mm(text, size_pt, weight) / 2.0;
        self.push_text(x.max(0.0), text, size_pt, weight, gray);
    }

    fn push_text(&mut self, x_mm: f32, text: &str, size_pt: f32, weight: Weight, gray: u8) {
        let y_mm = self.y;
        self.current_page().elements.push(Element::Text {
            x_mm,
            y_mm,
            size_pt,
            weight,
            gray,
            text: text.to_string(),
        });
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}
