//! The lightweight line markup produced by the enhancement service.
//!
//! Markup never spans lines: each line is classified on its own, by a pure
//! function of its content.

use regex::Regex;
use std::sync::OnceLock;

const TABSIZE: usize = 4;

/// What a single line of worksheet text is, with its markup stripped
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Nothing but whitespace
    Blank,
    /// `*Title*`
    MajorHeader(&'a str),
    /// `**Section**`
    MinorHeader(&'a str),
    /// A line starting with `http://` or `https://`
    Hyperlink(&'a str),
    /// `12. What is X?`, split into the number and the question
    NumberedItem { number: &'a str, body: &'a str },
    /// Anything else
    Body(&'a str),
}

/// The category of a line, without its text
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LineCategory {
    Blank,
    MajorHeader,
    MinorHeader,
    Hyperlink,
    NumberedItem,
    Body,
}

impl LineKind<'_> {
    pub fn category(&self) -> LineCategory {
        match self {
            LineKind::Blank => LineCategory::Blank,
            LineKind::MajorHeader(_) => LineCategory::MajorHeader,
            LineKind::MinorHeader(_) => LineCategory::MinorHeader,
            LineKind::Hyperlink(_) => LineCategory::Hyperlink,
            LineKind::NumberedItem { .. } => LineCategory::NumberedItem,
            LineKind::Body(_) => LineCategory::Body,
        }
    }
}

fn numbered_item() -> &'static Regex {
    static NUMBERED_ITEM: OnceLock<Regex> = OnceLock::new();
    NUMBERED_ITEM.get_or_init(|| {
        Regex::new(r"^(\d+)\. (.*)$").expect("numbered item pattern is valid")
    })
}

/// Text between a matched pair of delimiters, if the line is wrapped in them
/// and there is something other than asterisks and whitespace inside
fn delimited<'a>(line: &'a str, delimiter: &str) -> Option<&'a str> {
    let inner = line.strip_prefix(delimiter)?.strip_suffix(delimiter)?;
    let inner = inner.trim_matches('*').trim();
    (!inner.is_empty()).then_some(inner)
}

/// Classify one line of text. Leading and trailing whitespace is ignored.
///
/// Categories are tried in order: blank, major header, minor header,
/// hyperlink, numbered item, body text. A major header is wrapped in exactly
/// one asterisk on each side, a minor header in two.
///
/// ```
/// use worksheet_pdf::markup::{classify, LineKind};
///
/// assert_eq!(classify("**Introduction**"), LineKind::MinorHeader("Introduction"));
/// assert_eq!(
///     classify("2. Describe cell structure."),
///     LineKind::NumberedItem { number: "2", body: "Describe cell structure." }
/// );
/// ```
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    let double = line.len() >= 4 && line.starts_with("**") && line.ends_with("**");
    if !double {
        if let Some(title) = delimited(line, "*") {
            return LineKind::MajorHeader(title);
        }
    } else if let Some(title) = delimited(line, "**") {
        return LineKind::MinorHeader(title);
    }

    if line.starts_with("http://") || line.starts_with("https://") {
        return LineKind::Hyperlink(line);
    }

    if let Some(captures) = numbered_item().captures(line) {
        if let (Some(number), Some(body)) = (captures.get(1), captures.get(2)) {
            return LineKind::NumberedItem {
                number: number.as_str(),
                body: body.as_str().trim(),
            };
        }
    }

    LineKind::Body(line)
}

/// Clean up text before it is split into lines: literal `\n` escapes left
/// behind by JSON round trips become newlines, line endings are unified, tabs
/// become spaces, and surrounding whitespace is dropped.
pub fn normalize(text: &str) -> String {
    text.replace("\\n", "\n")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', &" ".repeat(TABSIZE))
        .trim()
        .to_string()
}
