use crate::{
    font::Font,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    RenderError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default, Debug)]
/// A document stores the laid out pages and the fonts they use, then renders
/// them out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Add a font to the document. Fonts are shared by every page; spans
    /// refer to them by the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// The pages in document order
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    /// Write the entire document to the writer. The whole document is
    /// rendered in memory first; on any error nothing is written.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), RenderError> {
        let bytes = self.to_bytes()?;
        w.write_all(&bytes).map_err(Into::into)
    }

    /// Render the document to PDF bytes
    pub fn to_bytes(self) -> Result<Vec<u8>, RenderError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (font_id, font) in fonts.iter() {
            let texts = page_order
                .iter()
                .filter_map(|id| pages.get(*id))
                .flat_map(|page| page.contents.iter())
                .filter(|span| span.font.id == font_id)
                .map(|span| span.text.as_str());
            font.write(&mut refs, font_id.index(), texts, &mut writer)?;
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(RenderError::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        Ok(writer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::StandardFont;
    use crate::layout::Margins;
    use crate::page::{SpanFont, SpanLayout};
    use crate::pagesize::LETTER;
    use crate::units::Pt;

    #[test]
    fn writes_a_pdf_with_every_page() {
        let mut doc = Document::default();
        doc.set_info(Info::enhanced_worksheet());
        let font = doc.add_font(StandardFont::Helvetica.into());

        for text in ["first", "second"] {
            let mut page = Page::new(LETTER, Some(Margins::default()));
            page.add_span(SpanLayout {
                text: text.to_string(),
                font: SpanFont {
                    id: font,
                    size: Pt(12.0),
                },
                coords: (Pt(40.0), Pt(752.0)),
            });
            doc.add_page(page);
        }
        assert_eq!(doc.page_count(), 2);

        let mut out = Vec::new();
        doc.write(&mut out).expect("can write");
        assert!(out.starts_with(b"%PDF-"));

        let parsed = lopdf::Document::load_mem(&out).expect("output parses");
        assert_eq!(parsed.get_pages().len(), 2);
    }

    #[test]
    fn nothing_is_written_when_a_span_cannot_be_encoded() {
        let mut doc = Document::default();
        let font = doc.add_font(StandardFont::Helvetica.into());
        let mut page = Page::new(LETTER, None);
        page.add_span(SpanLayout {
            text: "☃".to_string(),
            font: SpanFont {
                id: font,
                size: Pt(12.0),
            },
            coords: (Pt(0.0), Pt(0.0)),
        });
        doc.add_page(page);

        let mut out = Vec::new();
        assert!(doc.write(&mut out).is_err());
        assert!(out.is_empty());
    }
}
