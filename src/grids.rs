use petgraph::graph::IndexType;
use std::{u16, u32, u8};

use crate::errors::*;
use crate::grid::Grid;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnLength, RowLength};

pub type SmallRectangularGrid = Grid<u8>;
pub type MediumRectangularGrid = Grid<u16>;
pub type LargeRectangularGrid = Grid<u32>;

pub fn small_rect_grid(row_width: RowLength,
                       column_height: ColumnLength)
                       -> Result<SmallRectangularGrid> {
    checked_rect_grid(row_width, column_height, u8::MAX as usize)
}

pub fn medium_rect_grid(row_width: RowLength,
                        column_height: ColumnLength)
                        -> Result<MediumRectangularGrid> {
    checked_rect_grid(row_width, column_height, u16::MAX as usize)
}

pub fn large_rect_grid(row_width: RowLength,
                       column_height: ColumnLength)
                       -> Result<LargeRectangularGrid> {
    checked_rect_grid(row_width, column_height, u32::MAX as usize)
}

// The maximum value of a petgraph index type is reserved, so `max_index` itself is not a usable
// cell count.
fn checked_rect_grid<GridIndexType: IndexType>(row_width: RowLength,
                                               column_height: ColumnLength,
                                               max_index: usize)
                                               -> Result<Grid<GridIndexType>> {
    let (RowLength(w), ColumnLength(h)) = (row_width, column_height);
    let fits = w.checked_mul(h).map_or(false, |cells| cells < max_index);

    if w == 0 || h == 0 || !fits {
        bail!(ErrorKind::InvalidDimensions(w as i64, h as i64));
    }

    Ok(Grid::new(RectGridDimensions::new(row_width, column_height)))
}
