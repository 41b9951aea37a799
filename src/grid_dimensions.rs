use std::cmp;

use crate::units::{ColumnLength, ColumnsCount, EdgesCount, NodesCount, RowLength, RowsCount};


/// Width and height of a rectangular grid of square cells.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectGridDimensions {
    row_width: RowLength,
    column_height: ColumnLength,
}

impl RectGridDimensions {
    pub fn new(row_width: RowLength, column_height: ColumnLength) -> RectGridDimensions {
        RectGridDimensions {
            row_width,
            column_height,
        }
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        NodesCount(self.row_width.0 * self.column_height.0)
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.column_height.0)
    }

    #[inline(always)]
    pub fn row_length(&self) -> RowLength {
        self.row_width
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.row_width.0)
    }

    #[inline(always)]
    pub fn column_length(&self) -> ColumnLength {
        self.column_height
    }

    /// Node count plus an edge capacity hint for the backing graph.
    /// A perfect maze needs `size - 1` edges; braiding adds a few more, bounded by the
    /// number of interior walls.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        let (w, h) = (self.row_width.0, self.column_height.0);
        let interior_walls = (w.saturating_sub(1) * h) + (h.saturating_sub(1) * w);
        let edges_count_hint = cmp::min(interior_walls, cells_count.0 + cmp::max(w, h));
        (cells_count, EdgesCount(edges_count_hint))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn rectangular_sizes() {
        let dims = RectGridDimensions::new(RowLength(4), ColumnLength(3));
        assert_eq!(dims.size(), NodesCount(12));
        assert_eq!(dims.rows(), RowsCount(3));
        assert_eq!(dims.columns(), ColumnsCount(4));
        assert_eq!(dims.row_length(), RowLength(4));
        assert_eq!(dims.column_length(), ColumnLength(3));
    }

    #[test]
    fn graph_size_hint_never_exceeds_interior_walls() {
        let single_row = RectGridDimensions::new(RowLength(5), ColumnLength(1));
        assert_eq!(single_row.graph_size(), (NodesCount(5), EdgesCount(4)));

        let single_cell = RectGridDimensions::new(RowLength(1), ColumnLength(1));
        assert_eq!(single_cell.graph_size(), (NodesCount(1), EdgesCount(0)));

        let square = RectGridDimensions::new(RowLength(10), ColumnLength(10));
        let (NodesCount(nodes), EdgesCount(edges)) = square.graph_size();
        assert_eq!(nodes, 100);
        assert!(edges >= nodes - 1);
        assert!(edges <= 180);
    }
}
