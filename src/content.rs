//! Content stream generation for laid out pages.

use crate::font::Font;
use crate::page::{SpanFont, SpanLayout};
use crate::RenderError;
use id_arena::Arena;
use std::io::Write;

/// Renders positioned text spans to PDF content stream operators. The font
/// selection is only re-emitted when it changes between spans, and every
/// span is shown as a hex string encoded for its font.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_spans(
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, RenderError> {
    let mut content: Vec<u8> = Vec::default();
    if spans.is_empty() {
        return Ok(content);
    }

    write!(content, "q\n0 g\nBT\n")?;

    let mut current_font: Option<SpanFont> = None;
    let mut origin = (0.0f32, 0.0f32);

    for span in spans.iter() {
        let font = fonts.get(span.font.id).ok_or(RenderError::FontMissing)?;

        if current_font != Some(span.font) {
            write!(
                content,
                "/F{} {} Tf\n",
                span.font.id.index(),
                span.font.size.0
            )?;
            current_font = Some(span.font);
        }

        // Td is relative to the start of the previous line
        let (x, y) = (span.coords.0 .0, span.coords.1 .0);
        write!(content, "{} {} Td\n", x - origin.0, y - origin.1)?;
        origin = (x, y);

        write!(content, "<")?;
        for byte in font.encode(&span.text)? {
            write!(content, "{byte:02x}")?;
        }
        write!(content, "> Tj\n")?;
    }

    write!(content, "ET\nQ\n")?;
    Ok(content)
}
