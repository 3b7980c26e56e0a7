//! Turns marked-up worksheet text into a paginated document.

use crate::{
    document::Document,
    font::{Font, FontFamily, FontStyle},
    info::Info,
    layout::{wrap_url, wrap_words},
    markup::{classify, normalize, LineKind},
    options::LayoutOptions,
    page::{Page, SpanFont, SpanLayout},
    units::Pt,
    RenderError,
};
use id_arena::Id;
use log::debug;

/// Lays text out on fixed-size pages and writes the result as a PDF.
///
/// A paginator holds no per-render state; each call builds its own document,
/// so one paginator can be shared between threads.
///
/// ```
/// use worksheet_pdf::{LayoutOptions, Paginator};
///
/// let paginator = Paginator::new(LayoutOptions::default());
/// let document = paginator
///     .layout("**Header**\n1. Question one?\n\nRegular text line.")
///     .unwrap();
/// assert_eq!(document.page_count(), 1);
///
/// let bytes = paginator.render("**Header**").unwrap();
/// assert!(bytes.starts_with(b"%PDF-"));
/// ```
#[derive(Debug, Clone)]
pub struct Paginator {
    options: LayoutOptions,
    fonts: FontFamily,
    info: Option<Info>,
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator::new(LayoutOptions::default())
    }
}

impl Paginator {
    /// A paginator setting text in Helvetica
    pub fn new(options: LayoutOptions) -> Paginator {
        Paginator {
            options,
            fonts: FontFamily::helvetica(),
            info: Some(Info::enhanced_worksheet()),
        }
    }

    /// Use a different set of faces
    pub fn with_fonts(mut self, fonts: FontFamily) -> Paginator {
        self.fonts = fonts;
        self
    }

    /// Replace the metadata written to every document; [None] omits it
    pub fn with_info(mut self, info: Option<Info>) -> Paginator {
        self.info = info;
        self
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay `text` out without serialising it, so the placed spans can be
    /// inspected. The document always has at least one page.
    pub fn layout(&self, text: &str) -> Result<Document, RenderError> {
        let text = normalize(text);
        let mut layout = Layout::new(&self.options, &self.fonts, self.info.clone());

        let mut lines = 0usize;
        for line in text.split('\n') {
            layout.line(line)?;
            lines += 1;
        }

        let document = layout.finish();
        debug!(
            "laid out {} lines over {} pages",
            lines,
            document.page_count()
        );
        Ok(document)
    }

    /// Lay out and serialise `text`, returning the PDF bytes
    pub fn render(&self, text: &str) -> Result<Vec<u8>, RenderError> {
        self.layout(text)?.to_bytes()
    }
}

/// Render `text` with the default layout and Helvetica
pub fn render_pdf(text: &str) -> Result<Vec<u8>, RenderError> {
    Paginator::default().render(text)
}

#[derive(Copy, Clone)]
struct FontIds {
    regular: Id<Font>,
    bold: Id<Font>,
    italic: Id<Font>,
}

impl FontIds {
    fn get(&self, style: FontStyle) -> Id<Font> {
        match style {
            FontStyle::Regular => self.regular,
            FontStyle::Bold => self.bold,
            FontStyle::Italic => self.italic,
        }
    }
}

/// State of one render: the finished pages, the page being filled and the
/// baseline of the next line on it
struct Layout<'a> {
    options: &'a LayoutOptions,
    fonts: FontIds,
    document: Document,
    page: Page,
    y: Pt,
}

impl<'a> Layout<'a> {
    fn new(options: &'a LayoutOptions, family: &FontFamily, info: Option<Info>) -> Layout<'a> {
        let mut document = Document::default();
        if let Some(info) = info {
            document.set_info(info);
        }

        let fonts = FontIds {
            regular: document.add_font(family.get(FontStyle::Regular).clone()),
            bold: document.add_font(family.get(FontStyle::Bold).clone()),
            italic: document.add_font(family.get(FontStyle::Italic).clone()),
        };

        Layout {
            options,
            fonts,
            document,
            page: Page::new(options.page_size, Some(options.margins)),
            y: options.top(),
        }
    }

    fn span_font(&self, style: FontStyle, size: Pt) -> SpanFont {
        SpanFont {
            id: self.fonts.get(style),
            size,
        }
    }

    fn font(&self, font: SpanFont) -> Result<&Font, RenderError> {
        self.document
            .fonts
            .get(font.id)
            .ok_or(RenderError::FontMissing)
    }

    fn left(&self) -> Pt {
        self.options.margins.left
    }

    fn below_bottom(&self) -> bool {
        self.y < self.options.bottom()
    }

    /// Push the current page into the document and start a fresh one
    fn new_page(&mut self) {
        let fresh = Page::new(self.options.page_size, Some(self.options.margins));
        let finished = std::mem::replace(&mut self.page, fresh);
        self.document.add_page(finished);
        self.y = self.options.top();
        debug!("starting page {}", self.document.page_count() + 1);
    }

    fn advance(&mut self, dy: Pt) {
        self.y -= dy;
    }

    /// Start a new page if fewer than `keep_together_lines` lines are left
    fn keep_together(&mut self) {
        let reserve = self.options.line_height * self.options.keep_together_lines as f32;
        if !self.page.is_empty() && self.y < self.options.bottom() + reserve {
            self.new_page();
        }
    }

    /// Place one span. The text is encoded up front so a document that lays
    /// out can always be written.
    fn draw(&mut self, x: Pt, text: &str, font: SpanFont) -> Result<(), RenderError> {
        self.font(font)?.encode(text)?;
        if self.below_bottom() {
            self.new_page();
        }
        self.page.add_span(SpanLayout {
            text: text.to_string(),
            font,
            coords: (x, self.y),
        });
        Ok(())
    }

    /// Draw pre-wrapped lines one line height apart
    fn draw_lines<S: AsRef<str>>(
        &mut self,
        x: Pt,
        lines: &[S],
        font: SpanFont,
    ) -> Result<(), RenderError> {
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.advance(self.options.line_height);
            }
            self.draw(x, line.as_ref(), font)?;
        }
        Ok(())
    }

    fn wrapped(&self, text: &str, width: Pt, font: SpanFont) -> Result<Vec<String>, RenderError> {
        let face = self.font(font)?;
        wrap_words(text, width, |s| face.width_of_text(s, font.size))
    }

    fn paragraph(&mut self, text: &str, font: SpanFont, spacing: Pt) -> Result<(), RenderError> {
        let lines = self.wrapped(text, self.options.available_width(), font)?;
        self.draw_lines(self.left(), &lines, font)?;
        self.advance(spacing);
        Ok(())
    }

    fn line(&mut self, line: &str) -> Result<(), RenderError> {
        match classify(line) {
            LineKind::Blank => {
                self.advance(self.options.line_height);
                if self.below_bottom() {
                    self.new_page();
                }
            }
            LineKind::MajorHeader(title) => {
                self.keep_together();
                let font = self.span_font(FontStyle::Bold, self.options.major_header_size);
                self.paragraph(title, font, self.options.major_header_spacing)?;
            }
            LineKind::MinorHeader(title) => {
                self.keep_together();
                let font = self.span_font(FontStyle::Bold, self.options.minor_header_size);
                self.paragraph(title, font, self.options.minor_header_spacing)?;
            }
            LineKind::Hyperlink(url) => {
                let font = self.span_font(FontStyle::Italic, self.options.text_size);
                let face = self.font(font)?;
                let lines = wrap_url(url, self.options.available_width(), |s| {
                    face.width_of_text(s, font.size)
                })?;
                self.draw_lines(self.left(), &lines, font)?;
                self.advance(self.options.hyperlink_spacing);
            }
            LineKind::NumberedItem { number, body } => {
                self.keep_together();
                let font = self.span_font(FontStyle::Regular, self.options.text_size);
                let label = format!("{number}.");
                let hang = self
                    .font(font)?
                    .width_of_text(&format!("{label} "), font.size)?
                    .max(self.options.continuation_indent);
                let lines = self.wrapped(body, self.options.available_width() - hang, font)?;

                self.draw(self.left(), &label, font)?;
                self.draw_lines(self.left() + hang, &lines, font)?;
                self.advance(self.options.numbered_item_spacing);
            }
            LineKind::Body(text) => {
                let font = self.span_font(FontStyle::Regular, self.options.text_size);
                self.paragraph(text, font, self.options.body_spacing)?;
            }
        }
        Ok(())
    }

    /// Close the last page; every page opened is added exactly once
    fn finish(mut self) -> Document {
        self.document.add_page(self.page);
        self.document
    }
}
