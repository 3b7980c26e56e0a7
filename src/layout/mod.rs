//! Line-breaking utilities used by the paginator.
//!
//! The wrapping functions are independent of any font: they take a
//! measuring closure, so the same code serves the standard fonts, embedded
//! faces and tests that measure in plain character counts.
//!
//! # Example
//!
//! ```
//! use worksheet_pdf::layout::wrap_words;
//! use worksheet_pdf::Pt;
//!
//! // one point per character
//! let measure = |s: &str| -> Result<Pt, std::convert::Infallible> {
//!     Ok(Pt(s.chars().count() as f32))
//! };
//! let lines = wrap_words("the carbon cycle", Pt(10.0), measure).unwrap();
//! assert_eq!(lines, vec!["the carbon", "cycle"]);
//! ```

mod margins;
mod wrap;

pub use margins::*;
pub use wrap::*;
