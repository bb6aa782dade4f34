//! Feature modules layered on top of the core mapping passes

pub mod borders;
pub mod widths;

pub use borders::{toggle_cell_borders, BorderToggleOutcome, CellBorderRequest};
pub use widths::{add_widths, halve_width, parse_width, width_to_percentage, ParsedWidth};
