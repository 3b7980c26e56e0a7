//! Fonts a worksheet can be drawn with.
//!
//! By default everything is set in the Helvetica family, which every PDF
//! viewer provides, so nothing is embedded. A [FontFamily] of TrueType faces
//! can be supplied instead when the text needs characters outside
//! `WinAnsiEncoding`.

mod embedded;
mod standard;

pub use embedded::*;
pub use standard::*;

use crate::{
    refs::{ObjectReferences, RefType},
    Pt, RenderError,
};
use pdf_writer::{Finish, Name, Pdf};

/// The three styles the paginator switches between
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// A face text can be measured and drawn with
#[derive(Debug, Clone)]
pub enum Font {
    /// A base-14 face, referenced by name and never embedded
    Standard(StandardFont),
    /// A TrueType / OpenType face embedded into the document
    Embedded(EmbeddedFont),
}

impl Font {
    /// Load a TrueType / OpenType font from raw bytes
    pub fn load(bytes: Vec<u8>) -> Result<Font, RenderError> {
        EmbeddedFont::load(bytes).map(Font::Embedded)
    }

    pub fn name(&self) -> String {
        match self {
            Font::Standard(font) => font.base_name().to_string(),
            Font::Embedded(font) => font.name(),
        }
    }

    fn scaling(&self, size: Pt) -> Pt {
        match self {
            Font::Standard(_) => size / 1000.0,
            Font::Embedded(font) => size / font.units_per_em() as f32,
        }
    }

    /// Calculate the width of a string set in this font at the given size.
    /// Fails if the font cannot represent one of the characters.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Result<Pt, RenderError> {
        let mut units: u32 = 0;
        for ch in text.chars() {
            let advance = match self {
                Font::Standard(font) => {
                    font.advance(ch).ok_or_else(|| RenderError::Unencodable {
                        ch,
                        font: self.name(),
                    })?
                }
                Font::Embedded(font) => font.advance(font.glyph_for(ch)?),
            };
            units += advance as u32;
        }
        Ok(self.scaling(size) * units as f32)
    }

    /// Encode text into the bytes of a PDF string for this font: one
    /// `WinAnsiEncoding` byte per character for standard fonts, a big-endian
    /// glyph id per character for embedded ones
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            match self {
                Font::Standard(_) => {
                    let code = win_ansi_code(ch).ok_or_else(|| RenderError::Unencodable {
                        ch,
                        font: self.name(),
                    })?;
                    bytes.push(code);
                }
                Font::Embedded(font) => {
                    bytes.extend_from_slice(&font.glyph_for(ch)?.0.to_be_bytes());
                }
            }
        }
        Ok(bytes)
    }

    /// Write the font's objects. `texts` are all the strings drawn with it,
    /// used to limit an embedded font's widths and ToUnicode map.
    pub(crate) fn write<'a, I>(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        texts: I,
        writer: &mut Pdf,
    ) -> Result<(), RenderError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            Font::Standard(font) => {
                let id = refs.gen(RefType::Font(font_index));
                let mut type1 = writer.type1_font(id);
                type1.base_font(Name(font.base_name().as_bytes()));
                type1.encoding_predefined(Name(b"WinAnsiEncoding"));
                type1.finish();
            }
            Font::Embedded(font) => {
                let used = font.used_glyphs(texts)?;
                font.write(refs, font_index, &used, writer);
            }
        }
        Ok(())
    }
}

impl From<StandardFont> for Font {
    fn from(font: StandardFont) -> Self {
        Font::Standard(font)
    }
}

impl From<EmbeddedFont> for Font {
    fn from(font: EmbeddedFont) -> Self {
        Font::Embedded(font)
    }
}

/// One face per [FontStyle]
#[derive(Debug, Clone)]
pub struct FontFamily {
    pub regular: Font,
    pub bold: Font,
    pub italic: Font,
}

impl FontFamily {
    /// Helvetica, Helvetica-Bold and Helvetica-Oblique
    pub fn helvetica() -> FontFamily {
        FontFamily {
            regular: StandardFont::Helvetica.into(),
            bold: StandardFont::HelveticaBold.into(),
            italic: StandardFont::HelveticaOblique.into(),
        }
    }

    /// Parse three TrueType / OpenType faces to embed
    pub fn truetype(
        regular: Vec<u8>,
        bold: Vec<u8>,
        italic: Vec<u8>,
    ) -> Result<FontFamily, RenderError> {
        Ok(FontFamily {
            regular: Font::load(regular)?,
            bold: Font::load(bold)?,
            italic: Font::load(italic)?,
        })
    }

    pub fn get(&self, style: FontStyle) -> &Font {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

impl Default for FontFamily {
    fn default() -> Self {
        FontFamily::helvetica()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_helvetica_in_points() {
        let font = Font::from(StandardFont::Helvetica);
        // H(722) + i(222) = 944 units at 12pt
        let width = font.width_of_text("Hi", Pt(12.0)).expect("can measure");
        assert!((width.0 - 11.328).abs() < 1e-4);
        assert_eq!(font.width_of_text("", Pt(12.0)).expect("empty"), Pt(0.0));
    }

    #[test]
    fn bold_text_is_wider() {
        let family = FontFamily::helvetica();
        let regular = family.get(FontStyle::Regular).width_of_text("worksheet", Pt(12.0));
        let bold = family.get(FontStyle::Bold).width_of_text("worksheet", Pt(12.0));
        assert!(bold.expect("bold") > regular.expect("regular"));
    }

    #[test]
    fn unencodable_text_is_an_error() {
        let font = Font::from(StandardFont::Helvetica);
        assert!(matches!(
            font.width_of_text("CO₂", Pt(12.0)),
            Err(RenderError::Unencodable { ch: '₂', .. })
        ));
        assert!(font.encode("CO₂").is_err());
        assert_eq!(font.encode("CO2").expect("ascii"), b"CO2".to_vec());
    }

    #[test]
    fn embedded_fonts_encode_glyph_ids() {
        let font = Font::load(include_bytes!("../../assets/DejaVuSans.ttf").to_vec())
            .expect("can load font");
        let bytes = font.encode("CO₂").expect("dejavu covers subscripts");
        assert_eq!(bytes.len(), 6);
        assert!(font.width_of_text("CO₂", Pt(12.0)).expect("width") > Pt(0.0));
    }
}
