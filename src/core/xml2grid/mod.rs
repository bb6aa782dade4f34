//! XML → grid: the grid-model builder
//!
//! Walks a CALS `tgroup` subtree and produces the abstract grid model:
//! column specifications, header-row count, a rectangular matrix of placed
//! cells, and the table-level border flag. Structural problems in
//! well-formed XML are reported as [`StructureError`] values, never panics.

mod cellspec;
mod columns;
mod parser;


pub use cellspec::{column_data_for_cell, ColumnDataForCell};

use crate::config::{CalsTableDefinition, ResolvedCalsConfig};
use crate::dom::{Document, NodeId};
use crate::model::{CellData, GridModel};
use crate::utils::error::StructureError;

use columns::discover_columns;
use parser::GridPlacer;

/// Build the grid model for the table around `tgroup`
pub fn build_grid(
    definition: &CalsTableDefinition,
    doc: &Document,
    tgroup: NodeId,
) -> Result<GridModel, StructureError> {
    let config = definition.config();

    // Header rows first, then body rows; the header count becomes the
    // leading rows of the grid.
    let mut rows: Vec<NodeId> = Vec::new();
    let mut header_row_count = 0;
    for &child in doc.children(tgroup) {
        if config.is_thead(doc, child) {
            for &row in doc.children(child) {
                if config.is_row(doc, row) {
                    rows.push(row);
                    header_row_count += 1;
                }
            }
        }
    }
    for &child in doc.children(tgroup) {
        if config.is_tbody(doc, child) {
            for &row in doc.children(child) {
                if config.is_row(doc, row) {
                    rows.push(row);
                }
            }
        }
    }

    // With neither a cols attribute nor colspecs, the first row's total
    // span stands in as the declared width.
    let fallback_count = rows
        .first()
        .map(|&row| {
            doc.children(row)
                .iter()
                .filter(|&&e| config.is_entry(doc, e))
                .map(|&e| implied_span(doc, config, e))
                .sum::<usize>()
        })
        .unwrap_or(0);
    let column_specifications = discover_columns(definition, doc, tgroup, fallback_count);
    let width = column_specifications.len();
    let height = rows.len();

    let mut placer = GridPlacer::new(width, height);
    for (row_index, &row) in rows.iter().enumerate() {
        let entries: Vec<NodeId> = doc
            .children(row)
            .iter()
            .copied()
            .filter(|&e| config.is_entry(doc, e))
            .collect();
        let had_entries = !entries.is_empty();

        for entry in entries {
            let name_start = doc.attribute(entry, &config.attr.namest);
            let name_end = doc.attribute(entry, &config.attr.nameend);
            let column_name = doc.attribute(entry, &config.attr.colname);

            let colspan = match column_data_for_cell(
                name_start,
                name_end,
                column_name,
                &column_specifications,
            )? {
                ColumnDataForCell::Found { colspan, .. } => colspan,
                ColumnDataForCell::NotFound => 1,
            };
            let rowspan = doc
                .attribute(entry, &config.attr.morerows)
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0)
                .checked_add(1)
                .ok_or_else(|| {
                    StructureError::row_span_past_end(row_index, "morerows value out of range")
                })?;

            let data = CellData {
                row_separator: doc
                    .attribute(entry, &config.attr.rowsep)
                    .and_then(|token| config.boolean.decode(token)),
                column_separator: doc
                    .attribute(entry, &config.attr.colsep)
                    .and_then(|token| config.boolean.decode(token)),
                horizontal_alignment: doc
                    .attribute(entry, &config.attr.align)
                    .and_then(|token| config.horizontal.decode(token)),
                vertical_alignment: doc
                    .attribute(entry, &config.attr.valign)
                    .and_then(|token| config.vertical.decode(token)),
                column_name: column_name.map(str::to_string),
                name_start: name_start.map(str::to_string),
                name_end: name_end.map(str::to_string),
            };

            placer.place(row_index, Some(entry), data, colspan, rowspan)?;
        }
        placer.finish_row(row_index, had_entries)?;
    }

    let borders = doc
        .find_ancestor(tgroup, |d, id| definition.is_table_figure(d, id))
        .and_then(|figure| doc.attribute(figure, &config.attr.frame))
        .and_then(|token| config.frame.decode(token))
        .unwrap_or(false);

    let (cells, matrix) = placer.into_parts();
    Ok(GridModel::from_parts(
        width,
        height,
        header_row_count,
        borders,
        cells,
        matrix,
        column_specifications,
    ))
}

/// Column span a first-row entry implies before any columns exist
///
/// Without colspecs the only resolvable names are the synthesized
/// `column-<n>` ones; any other name pair counts as a single column.
fn implied_span(doc: &Document, config: &ResolvedCalsConfig, entry: NodeId) -> usize {
    let ordinal = |attr: &str| {
        doc.attribute(entry, attr)
            .and_then(|name| name.strip_prefix("column-"))
            .and_then(|n| n.parse::<usize>().ok())
    };
    match (ordinal(&config.attr.namest), ordinal(&config.attr.nameend)) {
        (Some(start), Some(end)) if end >= start => (end - start).saturating_add(1),
        _ => 1,
    }
}
