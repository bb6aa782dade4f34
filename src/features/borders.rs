//! Cell border toggling
//!
//! CALS has no per-side border attributes: a cell's bottom border is its own
//! `rowsep`, its right border its own `colsep`, and its top and left borders
//! belong to the neighboring cells above and to the left. The outermost
//! table borders are the `frame` attribute and cannot be flipped through a
//! single cell, so requests touching them are rejected as not allowed.

use fxhash::FxHashMap;

use crate::config::CalsTableDefinition;
use crate::dom::{Document, NodeId};
use crate::model::{CellId, GridModel};

/// A border-toggling request for one or more cells
#[derive(Debug, Clone, Default)]
pub struct CellBorderRequest {
    /// Entry elements whose borders are affected
    pub cell_node_ids: Vec<NodeId>,
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    /// Toggle relative to the current state instead of setting it outright
    pub is_toggle: bool,
    /// Desired state when `is_toggle` is false
    pub target_state: bool,
}

/// Tri-state result of a border mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderToggleOutcome {
    /// The operation is structurally impossible, e.g. an outer table border
    NotAllowed,
    /// The mutation committed; `active` reports whether the resulting
    /// border state is uniformly on across the affected separators
    Done { active: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeparatorAxis {
    Row,
    Column,
}

/// Toggle or set borders on the requested cells and write the result back
///
/// Builds the grid, maps each direction onto the owning cell's separator,
/// and synthesizes inside one transaction. A structurally broken table, an
/// unknown cell node, or an outer-boundary border all answer
/// [`BorderToggleOutcome::NotAllowed`].
pub fn toggle_cell_borders(
    definition: &CalsTableDefinition,
    doc: &mut Document,
    tgroup: NodeId,
    request: &CellBorderRequest,
) -> BorderToggleOutcome {
    if request.cell_node_ids.is_empty()
        || !(request.top || request.bottom || request.left || request.right)
    {
        return BorderToggleOutcome::NotAllowed;
    }

    let mut grid = match definition.build_grid(doc, tgroup) {
        Ok(grid) => grid,
        Err(_) => return BorderToggleOutcome::NotAllowed,
    };

    let by_element = cells_by_element(&grid);
    let mut affected: Vec<(CellId, SeparatorAxis)> = Vec::new();
    for node in &request.cell_node_ids {
        let Some(&cell_id) = by_element.get(node) else {
            return BorderToggleOutcome::NotAllowed;
        };
        match collect_affected(&grid, cell_id, request, &mut affected) {
            Ok(()) => {}
            Err(()) => return BorderToggleOutcome::NotAllowed,
        }
    }

    let all_on = affected.iter().all(|&(id, axis)| match axis {
        SeparatorAxis::Row => grid.effective_row_separator(id),
        SeparatorAxis::Column => grid.effective_column_separator(id),
    });
    let new_state = if request.is_toggle {
        !all_on
    } else {
        request.target_state
    };

    for &(id, axis) in &affected {
        let data = &mut grid.cell_mut(id).data;
        match axis {
            SeparatorAxis::Row => data.row_separator = Some(new_state),
            SeparatorAxis::Column => data.column_separator = Some(new_state),
        }
    }

    let committed = doc.transact(|d| definition.synthesize(&grid, d, tgroup));
    if committed {
        BorderToggleOutcome::Done { active: new_state }
    } else {
        BorderToggleOutcome::NotAllowed
    }
}

fn cells_by_element(grid: &GridModel) -> FxHashMap<NodeId, CellId> {
    let mut map = FxHashMap::default();
    for row in 0..grid.height() {
        for cell_id in grid.origin_cells_in_row(row) {
            if let Some(element) = grid.cell(cell_id).element {
                map.insert(element, cell_id);
            }
        }
    }
    map
}

/// Resolve the requested directions of one cell into separator slots
///
/// Boundary directions answer `Err`; a neighbor lookup inside the grid
/// cannot fail on a grid the builder accepted, so any panic below is a
/// coordinate-arithmetic bug, not a data problem.
fn collect_affected(
    grid: &GridModel,
    cell_id: CellId,
    request: &CellBorderRequest,
    affected: &mut Vec<(CellId, SeparatorAxis)>,
) -> Result<(), ()> {
    let cell = grid.cell(cell_id);
    let origin = cell.origin;
    let size = cell.size;

    let mut push = |slot: (CellId, SeparatorAxis)| {
        if !affected.contains(&slot) {
            affected.push(slot);
        }
    };

    if request.bottom {
        if origin.row + size.rows == grid.height() {
            return Err(());
        }
        push((cell_id, SeparatorAxis::Row));
    }
    if request.right {
        if origin.column + size.columns == grid.width() {
            return Err(());
        }
        push((cell_id, SeparatorAxis::Column));
    }
    if request.top {
        if origin.row == 0 {
            return Err(());
        }
        for column in origin.column..origin.column + size.columns {
            push((grid.cell_id_at(origin.row - 1, column), SeparatorAxis::Row));
        }
    }
    if request.left {
        if origin.column == 0 {
            return Err(());
        }
        for row in origin.row..origin.row + size.rows {
            push((grid.cell_id_at(row, origin.column - 1), SeparatorAxis::Column));
        }
    }
    Ok(())
}
