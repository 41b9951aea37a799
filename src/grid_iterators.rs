use crate::cells::Cartesian2DCoordinate;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnIndex, ColumnLength, ColumnsCount, RowIndex, RowLength, RowsCount};

/// Row major iteration over every coordinate of a grid.
#[derive(Debug, Copy, Clone)]
pub struct RectGridCellIter {
    dimensions: RectGridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl RectGridCellIter {
    pub fn new(dimensions: RectGridDimensions) -> RectGridCellIter {
        RectGridCellIter {
            dimensions,
            current_cell_number: 0,
            cells_count: dimensions.size().0,
        }
    }
}

impl ExactSizeIterator for RectGridCellIter {} // default impl using size_hint()
impl Iterator for RectGridCellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian2DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    &self.dimensions);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

#[derive(Debug, Copy, Clone)]
pub enum BatchIterType {
    Row,
    Column,
}

/// Iterates a grid one whole row (north to south) or one whole column (west to east) at a time.
#[derive(Debug, Copy, Clone)]
pub struct RectBatchIter {
    iter_type: BatchIterType,
    batches_count: usize,
    current_index: usize,
    row_length: RowLength,
    col_length: ColumnLength,
}

impl RectBatchIter {
    pub fn new(iter_type: BatchIterType, dimensions: RectGridDimensions) -> RectBatchIter {
        let (RowsCount(rows_size), ColumnsCount(cols_size)) = (dimensions.rows(), dimensions.columns());
        let batches_count = match iter_type {
            BatchIterType::Row => rows_size,
            BatchIterType::Column => cols_size,
        };
        RectBatchIter {
            iter_type,
            batches_count,
            current_index: 0,
            row_length: dimensions.row_length(),
            col_length: dimensions.column_length(),
        }
    }
}

impl ExactSizeIterator for RectBatchIter {} // default impl using size_hint()
impl Iterator for RectBatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {

        if self.current_index >= self.batches_count {
            return None;
        }

        let coords = match self.iter_type {
            BatchIterType::Row => {
                let RowLength(length) = self.row_length;
                (0..length)
                    .map(|i: usize| {
                        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(i),
                                                                       RowIndex(self.current_index))
                    })
                    .collect()
            }
            BatchIterType::Column => {
                let ColumnLength(length) = self.col_length;
                (0..length)
                    .map(|i: usize| {
                        Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(self.current_index),
                                                                       RowIndex(i))
                    })
                    .collect()
            }
        };
        self.current_index += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.batches_count - self.current_index;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
