//! Column specifications

use super::cell::HorizontalAlignment;

/// One column of the grid, as described by a `colspec` element
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpecification {
    /// Unique, stable identifier referenced by cells via `colname`,
    /// `namest` and `nameend`; synthesized as `column-<index>` when the
    /// source markup has none
    pub column_name: String,
    /// 1-based position from the `colnum` attribute; sparse markup may omit it
    pub column_number: Option<usize>,
    /// CALS width string, e.g. `1*`, `25px`, `2*+10px`
    pub column_width: String,
    pub column_separator: bool,
    pub row_separator: bool,
    pub alignment: Option<HorizontalAlignment>,
    /// Derived zero-based ordinal
    pub index: usize,
}

impl ColumnSpecification {
    /// Synthesized default column at `index`: `column-<index>`, `1*` wide,
    /// both separators on
    pub fn default_at(index: usize) -> Self {
        ColumnSpecification {
            column_name: format!("column-{}", index),
            column_number: None,
            column_width: "1*".to_string(),
            column_separator: true,
            row_separator: true,
            alignment: None,
            index,
        }
    }
}
