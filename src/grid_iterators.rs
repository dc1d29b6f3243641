use crate::cells::GridCoordinate;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

/// Every coordinate of a grid in row-major order: west to east along a row, rows north to south.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    columns: ColumnsCount,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(rows: RowsCount, columns: ColumnsCount) -> CellIter {
        CellIter {
            columns,
            current_cell_number: 0,
            cells_count: rows.0 * columns.0,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number,
                                                             self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

/// The coordinates of a grid one whole row at a time, northernmost row first.
#[derive(Debug, Copy, Clone)]
pub struct RowBatchIter {
    rows: RowsCount,
    columns: ColumnsCount,
    current_row: usize,
}

impl RowBatchIter {
    pub(crate) fn new(rows: RowsCount, columns: ColumnsCount) -> RowBatchIter {
        RowBatchIter {
            rows,
            columns,
            current_row: 0,
        }
    }
}

impl ExactSizeIterator for RowBatchIter {}
impl Iterator for RowBatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let RowsCount(rows_count) = self.rows;
        if self.current_row < rows_count {
            let ColumnsCount(length) = self.columns;
            let row = RowIndex(self.current_row);
            let coords = (0..length)
                .map(|i: usize| GridCoordinate::from_row_column_indices(row, ColumnIndex(i)))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows.0 - self.current_row;
        (remaining, Some(remaining))
    }
}
