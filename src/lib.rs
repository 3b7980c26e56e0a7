//! Render lightly marked-up worksheet text into paginated PDF documents.
//!
//! Text is read line by line. `*Title*` and `**Section**` lines become bold
//! headers, lines starting with `http://` or `https://` are set in italics
//! and broken at slashes, `1. Question` lines get a hanging indent, and
//! everything else is wrapped body text. Pages are US Letter with 40pt
//! margins unless [LayoutOptions] say otherwise.
//!
//! ```
//! let pdf = worksheet_pdf::render_pdf("**Header**\n1. Question one?\n\nRegular text line.")
//!     .expect("renders");
//! assert!(pdf.starts_with(b"%PDF-"));
//! ```
//!
//! The [pipeline] module wires text extraction, enhancement and rendering
//! together for services that annotate uploaded worksheets.

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Utility functions and structures to lay text out on pages
pub mod layout;

pub mod markup;

mod options;
pub use options::*;

mod page;
pub use page::*;

pub mod pagesize;

mod paginator;
pub use paginator::*;

pub mod pipeline;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
