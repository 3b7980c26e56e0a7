use thiserror::Error;

/// Everything that can go wrong while laying out or writing a document.
/// Any of these aborts the whole render; no partial document is returned.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("character {ch:?} cannot be encoded in font {font}")]
    /// A standard font has no code for this character in its encoding
    Unencodable { ch: char, font: String },

    #[error("font {font} has no glyph for {ch:?} and no replacement glyph")]
    /// An embedded font has neither the glyph nor a replacement for it
    MissingGlyph { ch: char, font: String },

    #[error("a page referenced by the document was missing")]
    /// A page id in the page order did not resolve to a page
    PageMissing,

    #[error("a font referenced by a span was missing")]
    /// A span refers to a font that is not part of the document
    FontMissing,
}
