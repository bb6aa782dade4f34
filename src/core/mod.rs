//! Core mapping passes between CALS XML and the grid model

pub mod grid2xml;
pub mod xml2grid;

pub use grid2xml::synthesize;
pub use xml2grid::build_grid;
