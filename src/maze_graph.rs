//! A generated maze and the queries rendering code makes against it.

use log::debug;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::cells::{Cartesian2DCoordinate, Cell, PassageSmallVec};
use crate::config::{GenerationAlgorithm, MazeConfig};
use crate::errors::*;
use crate::generators;
use crate::grids::{large_rect_grid, LargeRectangularGrid};
use crate::units::{ColumnLength, RowLength};

/// A fully generated maze. There is no way to change the passages of a `MazeGraph` once it
/// is built; regenerating means building a new one.
#[derive(Debug, Clone)]
pub struct MazeGraph {
    grid: LargeRectangularGrid,
    config: MazeConfig,
    braided_passages: usize,
}

impl MazeGraph {
    /// A perfect maze carved by the recursive backtracker.
    pub fn generate(width: i32, height: i32, seed: u64) -> Result<MazeGraph> {
        MazeGraph::generate_with(&MazeConfig::new(width, height, seed))
    }

    pub fn generate_with(config: &MazeConfig) -> Result<MazeGraph> {
        config.validate()?;

        let mut grid = large_rect_grid(RowLength(config.width as usize),
                                       ColumnLength(config.height as usize))?;
        let mut rng = XorShiftRng::seed_from_u64(config.seed);

        match config.algorithm {
            GenerationAlgorithm::BinaryTree => generators::binary_tree(&mut grid, &mut rng)?,
            GenerationAlgorithm::Sidewinder => generators::sidewinder(&mut grid, &mut rng)?,
            GenerationAlgorithm::AldousBroder => generators::aldous_broder(&mut grid, &mut rng)?,
            GenerationAlgorithm::Wilson => generators::wilson(&mut grid, &mut rng)?,
            GenerationAlgorithm::HuntAndKill => generators::hunt_and_kill(&mut grid, &mut rng)?,
            GenerationAlgorithm::RecursiveBacktracker => {
                generators::recursive_backtracker(&mut grid, &mut rng)?
            }
        }

        let braided_passages = if config.braid > 0.0 {
            generators::braid(&mut grid, &mut rng, config.braid)?
        } else {
            0
        };

        debug!("generated {}x{} maze with {} (seed {}): {} passages, {} from braiding",
               config.width,
               config.height,
               config.algorithm,
               config.seed,
               grid.links_count(),
               braided_passages);

        Ok(MazeGraph {
            grid,
            config: config.clone(),
            braided_passages,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    #[inline]
    pub fn algorithm(&self) -> GenerationAlgorithm {
        self.config.algorithm
    }

    #[inline]
    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    /// Read-only access to the underlying grid, for path finding and text rendering.
    #[inline]
    pub fn grid(&self) -> &LargeRectangularGrid {
        &self.grid
    }

    /// Passages added on top of the spanning tree. Zero for a perfect maze.
    #[inline]
    pub fn braided_passages(&self) -> usize {
        self.braided_passages
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.grid.links_count()
    }

    pub fn is_perfect(&self) -> bool {
        self.braided_passages == 0
    }

    /// The passage flags of the cell at column `x`, row `y`.
    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell> {
        let coord = self.checked_coordinate(x, y)?;
        self.grid.cell(coord).ok_or_else(|| self.out_of_bounds(x, y).into())
    }

    /// Each direction with a passage out of the cell at column `x`, row `y`, and the cell it
    /// leads into.
    pub fn neighbours_of(&self, x: i32, y: i32) -> Result<PassageSmallVec> {
        let coord = self.checked_coordinate(x, y)?;
        self.grid.passages(coord).ok_or_else(|| self.out_of_bounds(x, y).into())
    }

    /// Every cell in row major order.
    pub fn cells<'a>(&'a self) -> impl Iterator<Item = Cell> + 'a {
        self.grid.iter().filter_map(move |coord| self.grid.cell(coord))
    }

    pub fn dead_ends(&self) -> Vec<Cartesian2DCoordinate> {
        generators::dead_ends(&self.grid)
    }

    fn checked_coordinate(&self, x: i32, y: i32) -> Result<Cartesian2DCoordinate> {
        let on_grid = x >= 0 && y >= 0 && (x as usize) < self.width() && (y as usize) < self.height();
        if !on_grid {
            bail!(self.out_of_bounds(x, y));
        }
        Ok(Cartesian2DCoordinate::new(x as u32, y as u32))
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> ErrorKind {
        ErrorKind::OutOfBounds(i64::from(x), i64::from(y), self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};

    use super::*;
    use crate::cells::CompassPrimary;
    use crate::pathing::Distances;

    #[derive(Clone, Debug)]
    struct ArbitraryConfig(MazeConfig);

    impl Arbitrary for ArbitraryConfig {
        fn arbitrary(g: &mut Gen) -> Self {
            let algorithm = *g.choose(&GenerationAlgorithm::ALL).unwrap();
            let braid = *g.choose(&[0.0, 0.0, 0.25, 1.0]).unwrap();
            let config = MazeConfig::new(1 + (u8::arbitrary(g) % 14) as i32,
                                         1 + (u8::arbitrary(g) % 14) as i32,
                                         u64::arbitrary(g))
                .with_algorithm(algorithm)
                .with_braid(braid);
            ArbitraryConfig(config)
        }
    }

    fn unwrap_kind<T: ::std::fmt::Debug>(result: Result<T>) -> ErrorKind {
        match result {
            Err(Error(kind, _)) => kind,
            Ok(value) => panic!("expected an error, got {:?}", value),
        }
    }

    #[test]
    fn quickcheck_every_cell_is_reachable() {
        fn prop(config: ArbitraryConfig) -> bool {
            let maze = MazeGraph::generate_with(&config.0).unwrap();
            let distances = Distances::<u32>::for_grid(maze.grid(), Cartesian2DCoordinate::new(0, 0))
                .unwrap();
            distances.reachable_count() == maze.width() * maze.height()
        }
        quickcheck(prop as fn(ArbitraryConfig) -> bool);
    }

    #[test]
    fn quickcheck_passages_are_symmetric() {
        fn prop(config: ArbitraryConfig) -> bool {
            let maze = MazeGraph::generate_with(&config.0).unwrap();
            let symmetric = maze.cells().all(|cell| {
                cell.passages().iter().all(|dir| {
                    let neighbour = cell.coordinate().offset(*dir).unwrap();
                    maze.cell_at(neighbour.x as i32, neighbour.y as i32)
                        .map(|n| n.has_passage(dir.opposite()))
                        .unwrap_or(false)
                })
            });
            symmetric
        }
        quickcheck(prop as fn(ArbitraryConfig) -> bool);
    }

    #[test]
    fn quickcheck_no_passage_leaves_the_grid() {
        fn prop(config: ArbitraryConfig) -> bool {
            let maze = MazeGraph::generate_with(&config.0).unwrap();
            let (w, h) = (maze.width() as u32, maze.height() as u32);
            let enclosed = maze.cells().all(|cell| {
                let c = cell.coordinate();
                !(c.y == 0 && cell.north()) && !(c.y == h - 1 && cell.south()) &&
                !(c.x == 0 && cell.west()) && !(c.x == w - 1 && cell.east())
            });
            enclosed
        }
        quickcheck(prop as fn(ArbitraryConfig) -> bool);
    }

    #[test]
    fn quickcheck_generation_is_deterministic() {
        fn prop(config: ArbitraryConfig) -> bool {
            let first = MazeGraph::generate_with(&config.0).unwrap();
            let second = MazeGraph::generate_with(&config.0).unwrap();
            first.cells().eq(second.cells())
        }
        quickcheck(prop as fn(ArbitraryConfig) -> bool);
    }

    #[test]
    fn quickcheck_unbraided_mazes_are_trees() {
        fn prop(config: ArbitraryConfig) -> TestResult {
            if config.0.braid > 0.0 {
                return TestResult::discard();
            }
            let maze = MazeGraph::generate_with(&config.0).unwrap();
            TestResult::from_bool(maze.is_perfect() &&
                                  maze.links_count() == maze.width() * maze.height() - 1)
        }
        quickcheck(prop as fn(ArbitraryConfig) -> TestResult);
    }

    #[test]
    fn two_by_one_has_exactly_one_passage() {
        let maze = MazeGraph::generate(2, 1, 42).unwrap();
        let west = maze.cell_at(0, 0).unwrap();
        let east = maze.cell_at(1, 0).unwrap();

        assert!(west.east() && east.west());
        assert!(!west.north() && !west.south() && !west.west());
        assert!(!east.north() && !east.south() && !east.east());
        assert_eq!(maze.links_count(), 1);
    }

    #[test]
    fn single_cell_maze_is_all_walls() {
        let maze = MazeGraph::generate(1, 1, 0).unwrap();
        let cell = maze.cell_at(0, 0).unwrap();
        assert_eq!(cell.passages_count(), 0);
        assert!(maze.neighbours_of(0, 0).unwrap().is_empty());
    }

    #[test]
    fn different_seeds_usually_differ() {
        let a = MazeGraph::generate(12, 12, 1).unwrap();
        let b = MazeGraph::generate(12, 12, 2).unwrap();
        assert!(!a.cells().eq(b.cells()));
        assert_eq!(a.seed(), 1);
        assert_eq!(a.algorithm(), GenerationAlgorithm::RecursiveBacktracker);
    }

    #[test]
    fn out_of_bounds_lookups() {
        let maze = MazeGraph::generate(4, 3, 9).unwrap();
        for &(x, y) in &[(-1, 0), (0, -1), (4, 0), (0, 3), (i32::MIN, i32::MAX)] {
            match unwrap_kind(maze.cell_at(x, y)) {
                ErrorKind::OutOfBounds(ex, ey, 4, 3) => assert_eq!((ex, ey), (i64::from(x), i64::from(y))),
                other => panic!("unexpected error {:?}", other),
            }
            match unwrap_kind(maze.neighbours_of(x, y)) {
                ErrorKind::OutOfBounds(..) => (),
                other => panic!("unexpected error {:?}", other),
            }
        }
        assert!(maze.cell_at(3, 2).is_ok());
    }

    #[test]
    fn invalid_dimensions() {
        for &(w, h) in &[(0, 1), (1, 0), (-5, 5)] {
            match unwrap_kind(MazeGraph::generate(w, h, 0)) {
                ErrorKind::InvalidDimensions(..) => (),
                other => panic!("unexpected error {:?}", other),
            }
        }
    }

    #[test]
    fn neighbours_match_cell_flags() {
        let maze = MazeGraph::generate(8, 6, 3).unwrap();
        for cell in maze.cells() {
            let c = cell.coordinate();
            let passages = maze.neighbours_of(c.x as i32, c.y as i32).unwrap();
            let directions = passages.iter().map(|&(dir, _)| dir).collect::<Vec<_>>();
            assert_eq!(directions, cell.passages().to_vec());
            for &(dir, neighbour) in passages.iter() {
                assert_eq!(c.offset(dir), Some(neighbour));
            }
        }
    }

    #[test]
    fn braided_maze_keeps_invariants() {
        let config = MazeConfig::new(10, 10, 77).with_braid(1.0);
        let maze = MazeGraph::generate_with(&config).unwrap();
        assert!(!maze.is_perfect());
        assert!(maze.dead_ends().is_empty());
        assert_eq!(maze.links_count(), 99 + maze.braided_passages());

        let corner = maze.cell_at(0, 0).unwrap();
        assert!(!corner.has_passage(CompassPrimary::North) && !corner.has_passage(CompassPrimary::West));
    }
}
