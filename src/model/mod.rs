//! The abstract grid model
//!
//! A rectangular matrix of cells with row and column spans, header-row
//! count, ordered column specifications and a table-level border flag. The
//! builder produces one of these per read, host-driven operations mutate it
//! in place, and the synthesizer converts it back to XML exactly once.

mod cell;
mod column;
mod grid;

pub use cell::{Cell, CellData, CellSpan, GridCoord, HorizontalAlignment, VerticalAlignment};
pub use column::ColumnSpecification;
pub use grid::{CellId, GridModel};
