use petgraph::{Graph, Undirected};
use petgraph::graph;
pub use petgraph::graph::IndexType;
use rand::Rng;
use std::error;
use std::fmt;
use std::slice;

use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary, CoordinateOptionSmallVec,
                   CoordinateSmallVec, PassageSmallVec};
use crate::grid_dimensions::RectGridDimensions;
use crate::grid_iterators::{BatchIterType, RectBatchIter, RectGridCellIter};
use crate::units::{ColumnLength, ColumnsCount, EdgesCount, NodesCount, RowLength, RowsCount};


/// Rectangular grid of square cells.
///
/// Every cell is a node in an undirected graph and every passage carved between two adjacent
/// cells is a single edge. A cell's four passage flags are derived from its edges, so a passage
/// east from one cell is always the same fact as a passage west from its neighbour.
pub struct Grid<GridIndexType: IndexType> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    dimensions: RectGridDimensions,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotNeighbours,
}

impl fmt::Display for CellLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match *self {
            CellLinkError::InvalidGridCoordinate => "coordinate is not on the grid",
            CellLinkError::SelfLink => "a cell cannot be linked to itself",
            CellLinkError::NotNeighbours => "only adjacent cells can be linked",
        };
        write!(f, "cell link failed: {}", reason)
    }
}

impl error::Error for CellLinkError {}

impl<GridIndexType: IndexType> fmt::Debug for Grid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: graph: {:?}, rows: {:?}, columns: {:?}",
               self.graph, self.rows(), self.columns())
    }
}

impl<GridIndexType: IndexType> Clone for Grid<GridIndexType> {
    fn clone(&self) -> Self {
        Grid {
            graph: self.graph.clone(),
            dimensions: self.dimensions,
        }
    }
}

impl<GridIndexType: IndexType> Grid<GridIndexType> {
    /// A grid with every wall in place, no passages.
    ///
    /// Panics if the number of cells does not fit the index type, see `grids` for checked
    /// constructors.
    pub fn new(dimensions: RectGridDimensions) -> Grid<GridIndexType> {

        let (NodesCount(nodes), EdgesCount(edges)) = dimensions.graph_size();

        let mut grid = Grid {
            graph: Graph::with_capacity(nodes, edges),
            dimensions,
        };
        for _ in 0..nodes {
            let _ = grid.graph.add_node(());
        }

        grid
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn row_length(&self) -> RowLength {
        self.dimensions.row_length()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    #[inline]
    pub fn column_length(&self) -> ColumnLength {
        self.dimensions.column_length()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dimensions.row_length().0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dimensions.column_length().0
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cartesian2DCoordinate {
        let index = rng.gen_range(0..self.size());
        Cartesian2DCoordinate::from_row_major_index(index, &self.dimensions)
    }

    /// Link two adjacent cells, carving a passage between them.
    /// Linking cells that are already linked is a no-op.
    pub fn link(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }

        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        match (a_index_opt, b_index_opt) {
            (Some(a_index), Some(b_index)) => {
                if a.direction_to(b).is_none() {
                    return Err(CellLinkError::NotNeighbours);
                }
                let _ = self.graph.update_edge(a_index, b_index, ());
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Unlink two cells, if the grid coordinates are valid and a link exists between them.
    /// Returns true if an unlink occurred.
    pub fn unlink(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);

        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            if let Some(edge_index) = self.graph.find_edge(a_index, b_index) {
                // Invalidates the last edge index in the graph, which is fine as we
                // are not storing them.
                self.graph.remove_edge(edge_index);
                return true;
            }
        }

        false
    }

    /// Cell nodes that are linked to a particular node by a passage.
    pub fn links(&self, coord: Cartesian2DCoordinate) -> Option<CoordinateSmallVec> {

        self.grid_coordinate_graph_index(coord).map(|graph_node_index| {
            self.graph
                .neighbors(graph_node_index)
                .map(|linked_node_index| {
                    Cartesian2DCoordinate::from_row_major_index(linked_node_index.index(),
                                                                &self.dimensions)
                })
                .collect()
        })
    }

    /// Cell nodes that are to the North, South, East or West of a particular node, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: Cartesian2DCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction).filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Are two cells in the grid linked?
    pub fn is_linked(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false,
                    |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// The passage flags of one cell. None if the coordinate is off the grid.
    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<Cell> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let open = |dir| self.is_neighbour_linked(coord, dir);
        Some(Cell::new(coord,
                       open(CompassPrimary::North),
                       open(CompassPrimary::South),
                       open(CompassPrimary::East),
                       open(CompassPrimary::West)))
    }

    /// Each direction out of `coord` that has a passage, with the cell it leads into.
    /// None if the coordinate is off the grid.
    pub fn passages(&self, coord: Cartesian2DCoordinate) -> Option<PassageSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        Some(CompassPrimary::ALL
            .iter()
            .filter_map(|dir| {
                self.neighbour_at_direction(coord, *dir)
                    .filter(|neighbour_coord| self.is_linked(coord, *neighbour_coord))
                    .map(|neighbour_coord| (*dir, neighbour_coord))
            })
            .collect())
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            let RowLength(row_size) = self.dimensions.row_length();
            Some((coord.y as usize * row_size) + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn iter(&self) -> RectGridCellIter {
        RectGridCellIter::new(self.dimensions)
    }

    #[inline]
    pub fn iter_row(&self) -> RectBatchIter {
        RectBatchIter::new(BatchIterType::Row, self.dimensions)
    }

    #[inline]
    pub fn iter_column(&self) -> RectBatchIter {
        RectBatchIter::new(BatchIterType::Column, self.dimensions)
    }

    pub fn iter_links(&self) -> LinksIter<'_, GridIndexType> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            dimensions: &self.dimensions,
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        let (RowLength(width), ColumnLength(height)) = (self.dimensions.row_length(),
                                                        self.dimensions.column_length());
        (coord.x as usize) < width && (coord.y as usize) < height
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: Cartesian2DCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        let grid_index_raw_opt = self.grid_coordinate_to_index(coord);
        grid_index_raw_opt.map(graph::NodeIndex::<GridIndexType>::new)
    }
}

pub struct LinksIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    dimensions: &'a RectGridDimensions,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (Cartesian2DCoordinate, Cartesian2DCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        self.graph_edge_iter.next().map(|edge| {
            let src_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.source().index(),
                                                                             self.dimensions);
            let dst_cell_coord = Cartesian2DCoordinate::from_row_major_index(edge.target().index(),
                                                                             self.dimensions);
            (src_cell_coord, dst_cell_coord)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {} // default impl using size_hint()

impl<'a, GridIndexType: IndexType> fmt::Debug for LinksIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: edges remaining : {:?}", self.graph_edge_iter.len())
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools; // a trait
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;
    use smallvec::SmallVec;

    use super::*;
    use crate::grids::{small_rect_grid, SmallRectangularGrid};

    fn small_grid(w: usize, h: usize) -> SmallRectangularGrid {
        small_rect_grid(RowLength(w), ColumnLength(h))
            .expect("grid dimensions too large for small grid")
    }

    // Compare a smallvec to e.g. a vec! or &[T].
    // SmallVec derefs to [T] so we can take a slice of it.
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[Cartesian2DCoordinate]| {
            let node_indices: Vec<Cartesian2DCoordinate> =
                g.neighbours(coord).iter().cloned().sorted().collect();
            let expected_indices: Vec<Cartesian2DCoordinate> = expected_neighbours.iter()
                .cloned()
                .sorted()
                .collect();
            assert_eq!(node_indices, expected_indices);
        };
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);
        check_expected_neighbours(gc(9, 8), &[gc(9, 7), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);

        // Off the grid there are no neighbours at all
        check_expected_neighbours(gc(10, 9), &[]);
    }

    #[test]
    fn neighbours_at_dirs() {
        let g = small_grid(2, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        let check_neighbours =
            |coord, dirs: &[CompassPrimary], neighbour_opts: &[Option<Cartesian2DCoordinate>]| {
                let neighbour_options = g.neighbours_at_directions(coord, dirs);
                assert_eq!(&*neighbour_options, neighbour_opts);
            };
        check_neighbours(gc(0, 0), &[], &[]);
        check_neighbours(gc(0, 0), &[CompassPrimary::North], &[None]);
        check_neighbours(gc(0, 0),
                         &[CompassPrimary::West, CompassPrimary::North],
                         &[None, None]);
        check_neighbours(gc(0, 0),
                         &[CompassPrimary::East, CompassPrimary::South],
                         &[Some(gc(1, 0)), Some(gc(0, 1))]);
        check_neighbours(gc(1, 1),
                         &[CompassPrimary::South, CompassPrimary::East],
                         &[None, None]);
        check_neighbours(gc(1, 1),
                         &[CompassPrimary::West, CompassPrimary::North],
                         &[Some(gc(0, 1)), Some(gc(1, 0))]);
    }

    #[test]
    fn grid_size_on_non_square_grid() {
        let g = small_grid(5, 3);
        assert_eq!(g.size(), 15);
        assert_eq!(g.width(), 5);
        assert_eq!(g.height(), 3);
        assert_eq!(g.rows(), RowsCount(3));
        assert_eq!(g.columns(), ColumnsCount(5));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = small_grid(3, 3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let coords = &[gc(0, 0), gc(1, 0), gc(2, 0), gc(0, 1), gc(1, 1), gc(2, 1), gc(0, 2),
                       gc(1, 2), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn random_cell_is_on_grid() {
        let g = small_grid(4, 3);
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn linking_cells() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 1);
        let b = Cartesian2DCoordinate::new(0, 2);
        let c = Cartesian2DCoordinate::new(0, 3);

        let links_sorted = |grid: &SmallRectangularGrid, coord| -> Vec<Cartesian2DCoordinate> {
            grid.links(coord).expect("coordinate is invalid").iter().cloned().sorted().collect()
        };

        assert!(!g.is_linked(a, b));
        assert_eq!(links_sorted(&g, a), vec![]);

        g.link(a, b).expect("link failed");
        assert!(g.is_linked(a, b) && g.is_linked(b, a));
        assert_eq!(links_sorted(&g, a), vec![b]);
        assert_eq!(links_sorted(&g, b), vec![a]);
        assert!(g.is_neighbour_linked(a, CompassPrimary::South));
        assert!(g.is_neighbour_linked(b, CompassPrimary::North));

        g.link(b, c).expect("link failed");
        assert!(!g.is_linked(a, c));
        assert_eq!(links_sorted(&g, b), vec![a, c]);

        assert!(g.unlink(a, b));
        assert!(!g.is_linked(a, b));
        assert!(g.is_linked(b, c));
        assert_eq!(links_sorted(&g, a), vec![]);
        assert!(!g.unlink(a, b));
    }

    #[test]
    fn cell_snapshot_reflects_links_on_both_sides() {
        let mut g = small_grid(2, 2);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        g.link(gc(0, 0), gc(1, 0)).expect("link failed");

        let west_cell = g.cell(gc(0, 0)).unwrap();
        let east_cell = g.cell(gc(1, 0)).unwrap();
        assert!(west_cell.east() && east_cell.west());
        assert!(!west_cell.north() && !west_cell.south() && !west_cell.west());
        assert!(!east_cell.north() && !east_cell.south() && !east_cell.east());
        assert_eq!(g.cell(gc(2, 0)), None);
    }

    #[test]
    fn passages_name_direction_and_neighbour() {
        let mut g = small_grid(3, 3);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        g.link(gc(1, 1), gc(1, 0)).expect("link failed");
        g.link(gc(1, 1), gc(2, 1)).expect("link failed");

        let passages = g.passages(gc(1, 1)).unwrap();
        assert_smallvec_eq!(passages, &[(CompassPrimary::North, gc(1, 0)), (CompassPrimary::East, gc(2, 1))]);
        assert!(g.passages(gc(0, 0)).unwrap().is_empty());
        assert!(g.passages(gc(3, 0)).is_none());
    }

    #[test]
    fn iter_links_reports_each_passage_once() {
        let mut g = small_grid(3, 1);
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        g.link(gc(0, 0), gc(1, 0)).expect("link failed");
        g.link(gc(1, 0), gc(2, 0)).expect("link failed");
        g.link(gc(2, 0), gc(1, 0)).expect("link failed");

        let links = g.iter_links().collect::<Vec<_>>();
        assert_eq!(links.len(), 2);
        assert_eq!(g.iter_links().len(), g.links_count());
    }

    #[test]
    fn no_self_linked_cycles() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(g.link(a, a), Err(CellLinkError::SelfLink));
    }

    #[test]
    fn no_links_to_invalid_coordinates() {
        let mut g = small_grid(4, 4);
        let good_coord = Cartesian2DCoordinate::new(0, 0);
        let invalid_coord = Cartesian2DCoordinate::new(100, 100);
        assert_eq!(g.link(good_coord, invalid_coord), Err(CellLinkError::InvalidGridCoordinate));
    }

    #[test]
    fn no_links_between_distant_cells() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 0);
        let diagonal = Cartesian2DCoordinate::new(1, 1);
        let far = Cartesian2DCoordinate::new(3, 0);
        assert_eq!(g.link(a, diagonal), Err(CellLinkError::NotNeighbours));
        assert_eq!(g.link(a, far), Err(CellLinkError::NotNeighbours));
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn no_parallel_duplicated_linked_cells() {
        let mut g = small_grid(4, 4);
        let a = Cartesian2DCoordinate::new(0, 0);
        let b = Cartesian2DCoordinate::new(0, 1);
        g.link(a, b).expect("link failed");
        g.link(a, b).expect("link failed");
        assert_smallvec_eq!(g.links(a).unwrap(), &[b]);
        assert_smallvec_eq!(g.links(b).unwrap(), &[a]);

        g.unlink(a, b);
        let empty: SmallVec<[Cartesian2DCoordinate; 4]> = SmallVec::new();
        assert_smallvec_eq!(g.links(a).unwrap(), empty);
    }
}
