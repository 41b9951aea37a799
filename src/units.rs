//! Newtypes that keep widths, heights, counts and indices from being mixed up in grid APIs.

/// Number of rows in a grid, the same value as its `ColumnLength`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct RowsCount(pub usize);
/// Number of columns in a grid, the same value as its `RowLength`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct ColumnsCount(pub usize);

/// Cells in one row, the maze width.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct RowLength(pub usize);
/// Cells in one column, the maze height.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct ColumnLength(pub usize);

/// Zero based, counted from the north.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct RowIndex(pub usize);
/// Zero based, counted from the west.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct ColumnIndex(pub usize);

/// Graph nodes, one per cell.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct NodesCount(pub usize);
/// Graph edges, one per passage.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Hash)]
pub struct EdgesCount(pub usize);
