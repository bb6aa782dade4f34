//! Forward-scanning cell placement
//!
//! The placer maintains the full occupancy matrix and stamps each cell's
//! rectangular footprint at the next open coordinate of its row, scanning
//! left to right with no backtracking. That single pass is what detects
//! malformed input: a footprint past the declared column count, a row span
//! reaching past the last row, and rows left with gaps are all caught as the
//! scan reaches them.

use crate::model::{Cell, CellData, CellId, CellSpan, GridCoord};
use crate::utils::error::StructureError;

pub(crate) struct GridPlacer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    occupancy: Vec<Option<CellId>>,
}

impl GridPlacer {
    pub fn new(width: usize, height: usize) -> Self {
        GridPlacer {
            width,
            height,
            cells: Vec::new(),
            occupancy: vec![None; width * height],
        }
    }

    fn slot(&self, row: usize, column: usize) -> Option<CellId> {
        self.occupancy[row * self.width + column]
    }

    /// Place one cell in `row` at the next unoccupied coordinate
    pub fn place(
        &mut self,
        row: usize,
        element: Option<crate::dom::NodeId>,
        data: CellData,
        colspan: usize,
        rowspan: usize,
    ) -> Result<CellId, StructureError> {
        let column = (0..self.width)
            .find(|&c| self.slot(row, c).is_none())
            .ok_or_else(|| {
                StructureError::column_count_overflow(row, "no open coordinate left for cell")
            })?;

        // Checked sums so that absurd span values fail as structural errors
        // instead of wrapping.
        if column.checked_add(colspan).map_or(true, |end| end > self.width) {
            return Err(StructureError::column_count_overflow(
                row,
                format!(
                    "cell at column {} spans {} columns but only {} are declared",
                    column, colspan, self.width
                ),
            ));
        }
        if row.checked_add(rowspan).map_or(true, |end| end > self.height) {
            return Err(StructureError::row_span_past_end(
                row,
                format!(
                    "cell spans {} rows but only {} remain",
                    rowspan,
                    self.height - row
                ),
            ));
        }

        let id = CellId(self.cells.len());
        for r in row..row + rowspan {
            for c in column..column + colspan {
                if self.slot(r, c).is_some() {
                    return Err(StructureError::incomplete_row(
                        row,
                        format!("overlapping cell footprints at ({}, {})", r, c),
                    ));
                }
                self.occupancy[r * self.width + c] = Some(id);
            }
        }

        self.cells.push(Cell {
            origin: GridCoord { row, column },
            size: CellSpan {
                rows: rowspan,
                columns: colspan,
            },
            element,
            data,
        });
        Ok(id)
    }

    /// Verify that `row` is fully covered once its entries are consumed
    ///
    /// A fully covered row with no entries of its own is a legal
    /// continuation row; an uncovered gap is a structural error, reported
    /// differently depending on whether the row had explicit entries.
    pub fn finish_row(&mut self, row: usize, had_entries: bool) -> Result<(), StructureError> {
        let open = (0..self.width).filter(|&c| self.slot(row, c).is_none()).count();
        if open == 0 {
            return Ok(());
        }
        if had_entries {
            Err(StructureError::incomplete_row(
                row,
                format!("{} of {} columns unfilled", open, self.width),
            ))
        } else {
            Err(StructureError::missing_row_spans(
                row,
                "empty row not covered by row spans from above",
            ))
        }
    }

    /// Consume the placer; every coordinate is guaranteed occupied once all
    /// rows passed [`Self::finish_row`]
    pub fn into_parts(self) -> (Vec<Cell>, Vec<CellId>) {
        let matrix = self
            .occupancy
            .into_iter()
            .map(|slot| slot.expect("finish_row left an unoccupied coordinate"))
            .collect();
        (self.cells, matrix)
    }
}
