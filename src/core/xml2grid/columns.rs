//! Column discovery from colspec elements

use crate::config::defaults::DEFAULT_COLUMN_WIDTH;
use crate::config::CalsTableDefinition;
use crate::dom::{Document, NodeId};
use crate::model::ColumnSpecification;

/// Read the colspec children of `tgroup` into a fully-specified column list
///
/// Columns without an explicit colspec receive synthesized defaults keyed by
/// their positional index, so a table with zero or partial colspecs degrades
/// to a uniform grid. The resulting length is the declared column count: the
/// `cols` attribute when parseable, else the highest colspec ordinal, else
/// `fallback_count` (derived from the first row by the caller).
pub(crate) fn discover_columns(
    definition: &CalsTableDefinition,
    doc: &Document,
    tgroup: NodeId,
    fallback_count: usize,
) -> Vec<ColumnSpecification> {
    let config = definition.config();

    let mut explicit: Vec<(usize, ColumnSpecification)> = Vec::new();
    let mut next_index = 0usize;
    for &child in doc.children(tgroup) {
        if !config.is_colspec(doc, child) {
            continue;
        }
        let index = doc
            .attribute(child, &config.attr.colnum)
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .map(|n| n - 1)
            .unwrap_or(next_index);
        next_index = index.saturating_add(1);

        let column = ColumnSpecification {
            column_name: doc
                .attribute(child, &config.attr.colname)
                .map(str::to_string)
                .unwrap_or_else(|| format!("column-{}", index)),
            column_number: Some(index.saturating_add(1)),
            column_width: doc
                .attribute(child, &config.attr.colwidth)
                .unwrap_or(DEFAULT_COLUMN_WIDTH)
                .to_string(),
            column_separator: doc
                .attribute(child, &config.attr.colsep)
                .and_then(|token| config.boolean.decode(token))
                .unwrap_or(true),
            row_separator: doc
                .attribute(child, &config.attr.rowsep)
                .and_then(|token| config.boolean.decode(token))
                .unwrap_or(true),
            alignment: doc
                .attribute(child, &config.attr.align)
                .and_then(|token| config.horizontal.decode(token)),
            index,
        };
        explicit.push((index, column));
    }

    // A parseable cols attribute governs the width outright. Colspecs past
    // it are dropped; rows past it overflow.
    let from_colspecs = explicit
        .iter()
        .map(|(i, _)| i.saturating_add(1))
        .max()
        .unwrap_or(0);
    let count = doc
        .attribute(tgroup, &config.attr.cols)
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(if from_colspecs > 0 {
            from_colspecs
        } else {
            fallback_count
        });

    (0..count)
        .map(|index| {
            explicit
                .iter()
                .find(|(i, _)| *i == index)
                .map(|(_, column)| {
                    let mut column = column.clone();
                    column.index = index;
                    column
                })
                .unwrap_or_else(|| ColumnSpecification::default_at(index))
        })
        .collect()
}
