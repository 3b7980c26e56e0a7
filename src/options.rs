use crate::layout::Margins;
use crate::pagesize::{PageSize, LETTER};
use crate::units::Pt;
use serde::{Deserialize, Serialize};

/// Page geometry, font sizes and spacing used by the
/// [`Paginator`](crate::Paginator).
///
/// Every field has a default, so options can be deserialized from a partial
/// document:
///
/// ```
/// use worksheet_pdf::{LayoutOptions, Pt};
///
/// let options: LayoutOptions = serde_json::from_str(r#"{ "line_height": 18.0 }"#).unwrap();
/// assert_eq!(options.line_height, Pt(18.0));
/// assert_eq!(options.body_spacing, Pt(15.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Width and height of every page
    pub page_size: PageSize,
    pub margins: Margins,
    /// Distance between the baselines of wrapped lines
    pub line_height: Pt,
    /// Extra space after a `*major header*`
    pub major_header_spacing: Pt,
    /// Extra space after a `**minor header**`
    pub minor_header_spacing: Pt,
    /// Extra space after a numbered question
    pub numbered_item_spacing: Pt,
    /// Extra space after a paragraph of body text
    pub body_spacing: Pt,
    /// Extra space after a hyperlink
    pub hyperlink_spacing: Pt,
    pub major_header_size: Pt,
    pub minor_header_size: Pt,
    /// Size of body text, numbered items and hyperlinks
    pub text_size: Pt,
    /// Minimum indent of a numbered item's text relative to its number
    pub continuation_indent: Pt,
    /// Headers and numbered items start a new page unless this many lines
    /// still fit above the bottom margin
    pub keep_together_lines: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            page_size: LETTER,
            margins: Margins::all(Pt(40.0)),
            line_height: Pt(15.0),
            major_header_spacing: Pt(30.0),
            minor_header_spacing: Pt(25.0),
            numbered_item_spacing: Pt(20.0),
            body_spacing: Pt(15.0),
            hyperlink_spacing: Pt(22.5),
            major_header_size: Pt(16.0),
            minor_header_size: Pt(14.0),
            text_size: Pt(12.0),
            continuation_indent: Pt(20.0),
            keep_together_lines: 3,
        }
    }
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_line_height(mut self, line_height: Pt) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_text_size(mut self, text_size: Pt) -> Self {
        self.text_size = text_size;
        self
    }

    pub fn with_continuation_indent(mut self, indent: Pt) -> Self {
        self.continuation_indent = indent;
        self
    }

    /// Disable or change the keep-together reserve for headers and questions
    pub fn with_keep_together_lines(mut self, lines: u32) -> Self {
        self.keep_together_lines = lines;
        self
    }

    /// Horizontal space between the side margins
    pub fn available_width(&self) -> Pt {
        self.page_size.0 - self.margins.horizontal()
    }

    /// Baseline of the first line on a page
    pub fn top(&self) -> Pt {
        self.page_size.1 - self.margins.top
    }

    /// Lowest baseline text may be drawn at
    pub fn bottom(&self) -> Pt {
        self.margins.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_letter_page() {
        let options = LayoutOptions::default();
        assert_eq!(options.available_width(), Pt(532.0));
        assert_eq!(options.top(), Pt(752.0));
        assert_eq!(options.bottom(), Pt(40.0));
    }

    #[test]
    fn builders_override_single_fields() {
        let options = LayoutOptions::new()
            .with_line_height(Pt(18.0))
            .with_keep_together_lines(0);
        assert_eq!(options.line_height, Pt(18.0));
        assert_eq!(options.keep_together_lines, 0);
        assert_eq!(options.text_size, Pt(12.0));
    }

    #[test]
    fn round_trips_through_json() {
        let options = LayoutOptions::new().with_margins(Margins::symmetric(Pt(50.0), Pt(36.0)));
        let json = serde_json::to_string(&options).expect("serializes");
        let back: LayoutOptions = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, options);
    }
}
