use crate::units::Pt;
use serde::{Deserialize, Serialize};

/// Margins are the guidelines the paginator lays text out within. They are
/// also applied to [`Page`](crate::Page)s to determine the `ArtBox` of each
/// page in the generated PDF.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// Create margins by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) margins
    pub fn symmetric(vertical: Pt, horizontal: Pt) -> Margins {
        Margins::trbl(vertical, horizontal, vertical, horizontal)
    }

    /// Combined left and right margin
    pub fn horizontal(&self) -> Pt {
        self.left + self.right
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::all(Pt(40.0))
    }
}
