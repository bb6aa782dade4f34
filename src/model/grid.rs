//! The grid model: a rectangular matrix of cells with spans

use super::cell::{Cell, GridCoord};
use super::column::ColumnSpecification;
use crate::features::widths::add_widths;

/// Handle to a cell in a [`GridModel`] arena
///
/// Spanning cells share identity: every coordinate of a footprint resolves to
/// the same `CellId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(pub(crate) usize);

/// Abstract grid model of one CALS table
///
/// Built fresh on every read and converted back to XML exactly once per
/// write; there is no identity between grid models across separate
/// build/synthesize cycles except through the XML node back-references.
#[derive(Debug, Clone)]
pub struct GridModel {
    width: usize,
    height: usize,
    header_row_count: usize,
    borders: bool,
    cells: Vec<Cell>,
    /// Row-major `height × width` matrix; absorbed cells keep their arena
    /// slot but no coordinate points at them anymore
    matrix: Vec<CellId>,
    column_specifications: Vec<ColumnSpecification>,
}

impl GridModel {
    /// Assemble a grid from builder output
    ///
    /// Panics when the matrix is not `height × width` or a cell id is out of
    /// range; the builder guarantees both for any grid it accepts.
    pub fn from_parts(
        width: usize,
        height: usize,
        header_row_count: usize,
        borders: bool,
        cells: Vec<Cell>,
        matrix: Vec<CellId>,
        column_specifications: Vec<ColumnSpecification>,
    ) -> Self {
        assert_eq!(matrix.len(), width * height, "matrix is not rectangular");
        assert!(
            matrix.iter().all(|id| id.0 < cells.len()),
            "matrix references a cell outside the arena"
        );
        GridModel {
            width,
            height,
            header_row_count,
            borders,
            cells,
            matrix,
            column_specifications,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn header_row_count(&self) -> usize {
        self.header_row_count
    }

    pub fn borders(&self) -> bool {
        self.borders
    }

    pub fn set_borders(&mut self, borders: bool) {
        self.borders = borders;
    }

    pub fn column_specifications(&self) -> &[ColumnSpecification] {
        &self.column_specifications
    }

    pub fn column_specifications_mut(&mut self) -> &mut [ColumnSpecification] {
        &mut self.column_specifications
    }

    /// Cell id at a coordinate; panics outside `[0,height)×[0,width)`
    pub fn cell_id_at(&self, row: usize, column: usize) -> CellId {
        assert!(
            row < self.height && column < self.width,
            "coordinate ({}, {}) outside {}x{} grid",
            row,
            column,
            self.height,
            self.width
        );
        self.matrix[row * self.width + column]
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    pub fn cell_at(&self, row: usize, column: usize) -> &Cell {
        self.cell(self.cell_id_at(row, column))
    }

    /// Distinct cells of one row, left to right, each visited once at its
    /// leftmost coordinate in that row
    pub fn cells_in_row(&self, row: usize) -> Vec<CellId> {
        let mut seen = Vec::new();
        for column in 0..self.width {
            let id = self.cell_id_at(row, column);
            if seen.last() != Some(&id) && !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }

    /// Cells whose origin lies in `row` (spanning cells from earlier rows are
    /// skipped); this is the synthesizer's per-row visit order
    pub fn origin_cells_in_row(&self, row: usize) -> Vec<CellId> {
        self.cells_in_row(row)
            .into_iter()
            .filter(|&id| self.cell(id).origin.row == row)
            .collect()
    }

    /// Effective row separator of a cell: its own value, else the value
    /// inherited from its origin column
    pub fn effective_row_separator(&self, id: CellId) -> bool {
        let cell = self.cell(id);
        cell.data
            .row_separator
            .unwrap_or_else(|| self.column_default(cell.origin.column, |c| c.row_separator))
    }

    /// Effective column separator of a cell; inheritance follows the origin
    /// column, matching how a `namest` pair prefers the start column
    pub fn effective_column_separator(&self, id: CellId) -> bool {
        let cell = self.cell(id);
        cell.data
            .column_separator
            .unwrap_or_else(|| self.column_default(cell.origin.column, |c| c.column_separator))
    }

    fn column_default<F: Fn(&ColumnSpecification) -> bool>(&self, column: usize, get: F) -> bool {
        self.column_specifications.get(column).map(&get).unwrap_or(true)
    }

    /// Combined CALS width of all columns a cell spans
    pub fn cell_width(&self, id: CellId) -> String {
        let cell = self.cell(id);
        let mut width = String::new();
        for offset in 0..cell.size.columns {
            let column = &self.column_specifications[cell.origin.column + offset];
            width = if width.is_empty() {
                column.column_width.clone()
            } else {
                add_widths(&width, &column.column_width)
            };
        }
        width
    }

    /// Merge the cell at `(row, column)` with the cell directly to its right
    ///
    /// Both cells must be vertically aligned and span the same rows; the
    /// builder only produces rectangular grids, so a mismatch here is a
    /// coordinate-arithmetic bug in the caller and panics.
    pub fn merge_with_cell_to_the_right(&mut self, row: usize, column: usize) -> CellId {
        let keep = self.cell_id_at(row, column);
        let (origin, size) = {
            let cell = self.cell(keep);
            (cell.origin, cell.size)
        };
        let neighbor_column = origin.column + size.columns;
        assert!(
            neighbor_column < self.width,
            "no cell to the right of ({}, {})",
            row,
            column
        );
        let absorbed = self.cell_id_at(origin.row, neighbor_column);
        let absorbed_cell = self.cell(absorbed).clone();
        assert_eq!(
            absorbed_cell.origin.row, origin.row,
            "right neighbor is not vertically aligned"
        );
        assert_eq!(
            absorbed_cell.size.rows, size.rows,
            "right neighbor spans a different number of rows"
        );

        self.cell_mut(keep).size.columns += absorbed_cell.size.columns;
        self.stamp(keep);
        keep
    }

    /// Merge the cell at `(row, column)` with the cell directly below it
    ///
    /// Same alignment contract as [`Self::merge_with_cell_to_the_right`],
    /// horizontally: both cells must span the same columns.
    pub fn merge_with_cell_below(&mut self, row: usize, column: usize) -> CellId {
        let keep = self.cell_id_at(row, column);
        let (origin, size) = {
            let cell = self.cell(keep);
            (cell.origin, cell.size)
        };
        let neighbor_row = origin.row + size.rows;
        assert!(
            neighbor_row < self.height,
            "no cell below ({}, {})",
            row,
            column
        );
        let absorbed = self.cell_id_at(neighbor_row, origin.column);
        let absorbed_cell = self.cell(absorbed).clone();
        assert_eq!(
            absorbed_cell.origin.column, origin.column,
            "cell below is not horizontally aligned"
        );
        assert_eq!(
            absorbed_cell.size.columns, size.columns,
            "cell below spans a different number of columns"
        );

        self.cell_mut(keep).size.rows += absorbed_cell.size.rows;
        self.stamp(keep);
        keep
    }

    /// Re-point every coordinate of a cell's footprint at its id
    fn stamp(&mut self, id: CellId) {
        let cell = self.cell(id).clone();
        for row in cell.origin.row..cell.origin.row + cell.size.rows {
            for column in cell.origin.column..cell.origin.column + cell.size.columns {
                self.matrix[row * self.width + column] = id;
            }
        }
    }

    /// Every coordinate resolves to a cell whose footprint covers it
    pub fn is_rectangular(&self) -> bool {
        for row in 0..self.height {
            for column in 0..self.width {
                let cell = self.cell_at(row, column);
                if !cell.covers(GridCoord { row, column }) {
                    return false;
                }
            }
        }
        true
    }
}
