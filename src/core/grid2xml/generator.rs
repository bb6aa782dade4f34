//! Grid-state walker that rewrites the tgroup subtree

use crate::config::CalsTableDefinition;
use crate::dom::{Document, NodeId};
use crate::model::GridModel;
use crate::utils::error::WriteError;

pub(crate) fn synthesize_table(
    definition: &CalsTableDefinition,
    grid: &GridModel,
    doc: &mut Document,
    tgroup: NodeId,
) -> Result<(), WriteError> {
    let config = definition.config();

    doc.set_attribute(tgroup, &config.attr.cols, &grid.width().to_string())?;

    if let Some(figure) = doc.find_ancestor(tgroup, |d, id| definition.is_table_figure(d, id)) {
        let token = config.frame.encode(grid.borders()).to_string();
        doc.set_attribute(figure, &config.attr.frame, &token)?;
    }

    let containers = prepare_containers(definition, grid, doc, tgroup);
    write_colspecs(definition, grid, doc, tgroup, &containers)?;
    write_rows(definition, grid, doc, &containers)?;
    Ok(())
}

struct Containers {
    thead: Option<NodeId>,
    tbody: NodeId,
}

/// Ensure a header container exists iff the grid has header rows, and a
/// single body container for the rest; surplus containers are dropped
fn prepare_containers(
    definition: &CalsTableDefinition,
    grid: &GridModel,
    doc: &mut Document,
    tgroup: NodeId,
) -> Containers {
    let config = definition.config();

    let existing_theads: Vec<NodeId> = doc
        .children(tgroup)
        .iter()
        .copied()
        .filter(|&c| config.is_thead(doc, c))
        .collect();
    let existing_tbodies: Vec<NodeId> = doc
        .children(tgroup)
        .iter()
        .copied()
        .filter(|&c| config.is_tbody(doc, c))
        .collect();

    let thead = if grid.header_row_count() > 0 {
        Some(
            existing_theads
                .first()
                .copied()
                .unwrap_or_else(|| doc.create_element(config.thead.clone())),
        )
    } else {
        None
    };
    for &surplus in &existing_theads {
        if Some(surplus) != thead {
            doc.detach(surplus);
        }
    }

    let tbody = existing_tbodies
        .first()
        .copied()
        .unwrap_or_else(|| doc.create_element(config.tbody.clone()));
    for &surplus in existing_tbodies.iter().skip(1) {
        doc.detach(surplus);
    }

    if doc.parent(tbody) != Some(tgroup) {
        doc.append_child(tgroup, tbody);
    }
    if let Some(thead) = thead {
        doc.insert_before(tgroup, thead, Some(tbody));
    }

    Containers { thead, tbody }
}

/// Rewrite one colspec per column, in column order, immediately before the
/// first header/body container
fn write_colspecs(
    definition: &CalsTableDefinition,
    grid: &GridModel,
    doc: &mut Document,
    tgroup: NodeId,
    containers: &Containers,
) -> Result<(), WriteError> {
    let config = definition.config();

    let stale: Vec<NodeId> = doc
        .children(tgroup)
        .iter()
        .copied()
        .filter(|&c| config.is_colspec(doc, c))
        .collect();
    for colspec in stale {
        doc.detach(colspec);
    }

    let first_container = containers.thead.unwrap_or(containers.tbody);
    for column in grid.column_specifications() {
        let colspec = doc.create_element(config.colspec.clone());
        doc.set_attribute(colspec, &config.attr.colname, &column.column_name)?;
        doc.set_attribute(colspec, &config.attr.colnum, &(column.index + 1).to_string())?;
        doc.set_attribute(colspec, &config.attr.colwidth, &column.column_width)?;
        let colsep = config.boolean.encode(column.column_separator).to_string();
        doc.set_attribute(colspec, &config.attr.colsep, &colsep)?;
        let rowsep = config.boolean.encode(column.row_separator).to_string();
        doc.set_attribute(colspec, &config.attr.rowsep, &rowsep)?;
        if let Some(alignment) = column.alignment {
            let token = config.horizontal.encode(alignment).to_string();
            doc.set_attribute(colspec, &config.attr.align, &token)?;
        }
        doc.insert_before(tgroup, colspec, Some(first_container));
    }
    Ok(())
}

/// Redistribute rows between the containers and write every distinct cell
/// once, at its origin
fn write_rows(
    definition: &CalsTableDefinition,
    grid: &GridModel,
    doc: &mut Document,
    containers: &Containers,
) -> Result<(), WriteError> {
    let config = definition.config();

    for container in containers.thead.iter().chain([&containers.tbody]) {
        let old_rows: Vec<NodeId> = doc.children(*container).to_vec();
        for row in old_rows {
            doc.detach(row);
        }
    }

    for row_index in 0..grid.height() {
        let row = doc.create_element(config.row.clone());
        let container = if row_index < grid.header_row_count() {
            containers
                .thead
                .expect("header row without a header container")
        } else {
            containers.tbody
        };
        doc.append_child(container, row);

        for cell_id in grid.origin_cells_in_row(row_index) {
            let cell = grid.cell(cell_id);
            let element = match cell.element {
                Some(element) => element,
                None => doc.create_element(config.entry.clone()),
            };
            doc.append_child(row, element);

            let start = &grid.column_specifications()[cell.origin.column];
            if cell.size.columns > 1 {
                let end =
                    &grid.column_specifications()[cell.origin.column + cell.size.columns - 1];
                doc.set_attribute(element, &config.attr.namest, &start.column_name)?;
                doc.set_attribute(element, &config.attr.nameend, &end.column_name)?;
                doc.remove_attribute(element, &config.attr.colname);
            } else {
                doc.set_attribute(element, &config.attr.colname, &start.column_name)?;
                doc.remove_attribute(element, &config.attr.namest);
                doc.remove_attribute(element, &config.attr.nameend);
            }

            if cell.size.rows > 1 {
                doc.set_attribute(
                    element,
                    &config.attr.morerows,
                    &(cell.size.rows - 1).to_string(),
                )?;
            } else {
                doc.remove_attribute(element, &config.attr.morerows);
            }

            // Separators and alignments are written exactly as stored:
            // values absent in the source (inherited from the column) stay
            // absent over a round trip.
            match cell.data.column_separator {
                Some(value) => {
                    let token = config.boolean.encode(value).to_string();
                    doc.set_attribute(element, &config.attr.colsep, &token)?;
                }
                None => doc.remove_attribute(element, &config.attr.colsep),
            }
            match cell.data.row_separator {
                Some(value) => {
                    let token = config.boolean.encode(value).to_string();
                    doc.set_attribute(element, &config.attr.rowsep, &token)?;
                }
                None => doc.remove_attribute(element, &config.attr.rowsep),
            }
            match cell.data.horizontal_alignment {
                Some(alignment) => {
                    let token = config.horizontal.encode(alignment).to_string();
                    doc.set_attribute(element, &config.attr.align, &token)?;
                }
                None => doc.remove_attribute(element, &config.attr.align),
            }
            match cell.data.vertical_alignment {
                Some(alignment) => {
                    let token = config.vertical.encode(alignment).to_string();
                    doc.set_attribute(element, &config.attr.valign, &token)?;
                }
                None => doc.remove_attribute(element, &config.attr.valign),
            }
        }
    }
    Ok(())
}
