//! Column lookup for a cell's name references
//!
//! The span/separator-inheritance rule is a small pure function of the
//! cell's name attributes and the column list, kept standalone so it is
//! testable without any DOM traversal.

use crate::model::ColumnSpecification;
use crate::utils::error::StructureError;

/// Result of resolving a cell's column references
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDataForCell {
    /// The cell references known columns
    Found {
        column_separator: bool,
        row_separator: bool,
        colspan: usize,
    },
    /// The cell carries no usable column reference; callers default to
    /// span 1 with both separators on
    NotFound,
}

/// Resolve `namest`/`nameend`/`colname` against the column list
///
/// A `namest`/`nameend` pair yields the ordinal distance as the span and the
/// start column's separators. A bare `colname` (or a lone `namest`) yields
/// span 1 with that column's separators. An unknown name in a pair, or a
/// pair whose span would be below 1, is a structural error; an unknown bare
/// name merely loses inheritance and is `NotFound`.
pub fn column_data_for_cell(
    name_start: Option<&str>,
    name_end: Option<&str>,
    column_name: Option<&str>,
    columns: &[ColumnSpecification],
) -> Result<ColumnDataForCell, StructureError> {
    let index_of = |name: &str| columns.iter().position(|c| c.column_name == name);

    if let (Some(start), Some(end)) = (name_start, name_end) {
        let start_index = index_of(start).ok_or_else(|| {
            StructureError::invalid_column_span(format!("unknown column name '{}'", start))
        })?;
        let end_index = index_of(end).ok_or_else(|| {
            StructureError::invalid_column_span(format!("unknown column name '{}'", end))
        })?;
        if end_index < start_index {
            return Err(StructureError::invalid_column_span(format!(
                "nameend '{}' precedes namest '{}'",
                end, start
            )));
        }
        let start_column = &columns[start_index];
        return Ok(ColumnDataForCell::Found {
            column_separator: start_column.column_separator,
            row_separator: start_column.row_separator,
            colspan: end_index - start_index + 1,
        });
    }

    if let Some(name) = column_name.or(name_start) {
        if let Some(index) = index_of(name) {
            let column = &columns[index];
            return Ok(ColumnDataForCell::Found {
                column_separator: column.column_separator,
                row_separator: column.row_separator,
                colspan: 1,
            });
        }
        return Ok(ColumnDataForCell::NotFound);
    }

    Ok(ColumnDataForCell::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnSpecification> {
        let mut c0 = ColumnSpecification::default_at(0);
        c0.column_separator = false;
        let c1 = ColumnSpecification::default_at(1);
        let c2 = ColumnSpecification::default_at(2);
        vec![c0, c1, c2]
    }

    #[test]
    fn test_pair_spans_ordinal_distance() {
        let result =
            column_data_for_cell(Some("column-0"), Some("column-2"), None, &columns()).unwrap();
        assert_eq!(
            result,
            ColumnDataForCell::Found {
                column_separator: false,
                row_separator: true,
                colspan: 3,
            }
        );
    }

    #[test]
    fn test_pair_prefers_start_column_separators() {
        let result =
            column_data_for_cell(Some("column-1"), Some("column-2"), None, &columns()).unwrap();
        assert_eq!(
            result,
            ColumnDataForCell::Found {
                column_separator: true,
                row_separator: true,
                colspan: 2,
            }
        );
    }

    #[test]
    fn test_reversed_pair_is_invalid_span() {
        let err = column_data_for_cell(Some("column-2"), Some("column-0"), None, &columns())
            .unwrap_err();
        assert!(matches!(err, StructureError::InvalidColumnSpan { .. }));
    }

    #[test]
    fn test_unknown_name_in_pair_is_error() {
        let err =
            column_data_for_cell(Some("column-0"), Some("nope"), None, &columns()).unwrap_err();
        assert!(matches!(err, StructureError::InvalidColumnSpan { .. }));
    }

    #[test]
    fn test_bare_colname() {
        let result = column_data_for_cell(None, None, Some("column-0"), &columns()).unwrap();
        assert_eq!(
            result,
            ColumnDataForCell::Found {
                column_separator: false,
                row_separator: true,
                colspan: 1,
            }
        );
    }

    #[test]
    fn test_unknown_bare_colname_is_not_found() {
        let result = column_data_for_cell(None, None, Some("nope"), &columns()).unwrap();
        assert_eq!(result, ColumnDataForCell::NotFound);
    }

    #[test]
    fn test_no_references_is_not_found() {
        let result = column_data_for_cell(None, None, None, &columns()).unwrap();
        assert_eq!(result, ColumnDataForCell::NotFound);
    }
}
