//! Cell types and alignment for the grid model

use crate::dom::NodeId;

/// Horizontal alignment canonical keys
///
/// Attribute token encoding lives in the resolved configuration's codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Left,
    Right,
    Center,
    Justify,
}

/// Vertical alignment canonical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Middle,
    Bottom,
}

/// Zero-based grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCoord {
    pub row: usize,
    pub column: usize,
}

/// Rectangular footprint of a cell, in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub rows: usize,
    pub columns: usize,
}

/// CALS-specific cell specification
///
/// Every field is optional: `None` means the attribute was absent in the
/// source markup and the value is inherited from the column specification.
/// The synthesizer writes exactly the fields that are present, so inherited
/// values stay implicit over a round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    pub row_separator: Option<bool>,
    pub column_separator: Option<bool>,
    pub horizontal_alignment: Option<HorizontalAlignment>,
    pub vertical_alignment: Option<VerticalAlignment>,
    pub column_name: Option<String>,
    pub name_start: Option<String>,
    pub name_end: Option<String>,
}

/// One cell of the grid model
///
/// A spanning cell occupies a fully rectangular footprint; `origin` is its
/// top-left coordinate. The XML element is a back-reference into the source
/// document, not owned; a synthesized empty cell has none.
#[derive(Debug, Clone)]
pub struct Cell {
    pub origin: GridCoord,
    pub size: CellSpan,
    pub element: Option<NodeId>,
    pub data: CellData,
}

impl Cell {
    /// Create a single-coordinate cell at `origin`
    pub fn new(origin: GridCoord, element: Option<NodeId>) -> Self {
        Cell {
            origin,
            size: CellSpan { rows: 1, columns: 1 },
            element,
            data: CellData::default(),
        }
    }

    /// Whether the footprint covers more than one coordinate
    pub fn is_spanning(&self) -> bool {
        self.size.rows > 1 || self.size.columns > 1
    }

    /// Whether `coord` falls inside this cell's footprint
    pub fn covers(&self, coord: GridCoord) -> bool {
        coord.row >= self.origin.row
            && coord.row < self.origin.row + self.size.rows
            && coord.column >= self.origin.column
            && coord.column < self.origin.column + self.size.columns
    }
}
