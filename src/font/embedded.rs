use crate::{
    refs::{ObjectReferences, RefType},
    RenderError,
};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// A parsed TrueType / OpenType face. The whole font file is embedded in the
/// generated PDF, but widths and the ToUnicode map only cover the glyphs the
/// document actually uses.
///
/// The parsed face is shared behind an [Arc], so cloning is cheap and one
/// face can back any number of documents rendered in parallel.
#[derive(Clone)]
pub struct EmbeddedFont {
    face: Arc<OwnedFace>,
}

impl fmt::Debug for EmbeddedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedFont")
            .field("name", &self.name())
            .finish()
    }
}

impl EmbeddedFont {
    /// Parse a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<EmbeddedFont, RenderError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(EmbeddedFont {
            face: Arc::new(face),
        })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    /// The PostScript name of the face, falling back to its full name
    pub fn name(&self) -> String {
        let lookup = |id: u16| {
            self.face()
                .names()
                .into_iter()
                .find(|name| name.name_id == id && name.is_unicode())
                .and_then(|name| name.to_string())
        };
        lookup(owned_ttf_parser::name_id::POST_SCRIPT_NAME)
            .or_else(|| lookup(owned_ttf_parser::name_id::FULL_NAME))
            .map(|name| name.replace(' ', ""))
            .unwrap_or_else(|| "EmbeddedFont".to_string())
    }

    pub fn units_per_em(&self) -> u16 {
        self.face().units_per_em()
    }

    /// The glyph used to draw `ch`: the character's own glyph, else the
    /// replacement character, else a question mark
    pub fn glyph_for(&self, ch: char) -> Result<GlyphId, RenderError> {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .ok_or_else(|| RenderError::MissingGlyph {
                ch,
                font: self.name(),
            })
    }

    /// Horizontal advance of a glyph in font units
    pub fn advance(&self, gid: GlyphId) -> u16 {
        self.face().glyph_hor_advance(gid).unwrap_or_default()
    }

    /// Map every glyph the given strings need back to a character, for the
    /// widths array and the ToUnicode CMap
    pub(crate) fn used_glyphs<'a, I>(&self, texts: I) -> Result<BTreeMap<u16, char>, RenderError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut used = BTreeMap::new();
        for text in texts {
            for ch in text.chars() {
                let gid = self.glyph_for(ch)?;
                used.entry(gid.0).or_insert(ch);
            }
        }
        Ok(used)
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        used: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));
        let scaling = 1000.0 / self.units_per_em() as f32;

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(self.name().as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(self.advance(GlyphId(0)) as f32 * scaling);

        // one `consecutive` block per run of adjacent glyph ids
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for &gid in used.keys() {
            let width = self.advance(GlyphId(gid)) as f32 * scaling;
            let extends_run = runs
                .last()
                .is_some_and(|(start, block)| *start as usize + block.len() == gid as usize);
            if !extends_run {
                runs.push((gid, Vec::new()));
            }
            if let Some((_, block)) = runs.last_mut() {
                block.push(width);
            }
        }

        let mut widths = cid_font.widths();
        for (start, block) in runs {
            widths.consecutive(start, block);
        }
        widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        cid_font.finish();

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        let raw = self.face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw, 6);
        let mut stream = writer.stream(data_id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), raw.len() as i32);
        stream.finish();

        let face = self.face();
        let scaling = 1000.0 / self.units_per_em() as f32;
        let bbox = face.global_bounding_box();

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(self.name().as_bytes()));
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        // ttf has no stem width; 80 is the customary guess
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        used: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar sections are capped at 100 entries each
        let entries: Vec<(u16, char)> = used.iter().map(|(&gid, &ch)| (gid, ch)).collect();
        for block in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let target: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{target}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(cmap.as_bytes(), 6);
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.finish();

        id
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        used: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, used, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, used, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(self.name().as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
        font.finish();
    }
}
