//! Page sizes the paginator knows about.
//!
//! Sizes are (width, height) in points, portrait orientation.
//!
//! ```
//! use worksheet_pdf::pagesize::LETTER;
//! use worksheet_pdf::Pt;
//!
//! assert_eq!(LETTER, (Pt(612.0), Pt(792.0)));
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

/// US Letter, the size every worksheet is rendered at unless overridden
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
