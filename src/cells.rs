use rand::Rng;
use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnIndex, RowIndex, RowLength};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<Cartesian2DCoordinate>; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

/// A passage leaving a cell: the direction taken and the cell it leads into.
pub type PassageSmallVec = SmallVec<[(CompassPrimary, Cartesian2DCoordinate); 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, dimensions: &RectGridDimensions) -> Cartesian2DCoordinate {
        let RowLength(width) = dimensions.row_length();
        let x = index % width;
        let y = index / width;

        Cartesian2DCoordinate::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Cartesian2DCoordinate {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable, which is only the case north of
    /// row zero or west of column zero. The result is not bounds checked against any grid.
    pub fn offset(self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(1).map(|north_y| Cartesian2DCoordinate::new(x, north_y)),
            CompassPrimary::South => y.checked_add(1).map(|south_y| Cartesian2DCoordinate::new(x, south_y)),
            CompassPrimary::East => x.checked_add(1).map(|east_x| Cartesian2DCoordinate::new(east_x, y)),
            CompassPrimary::West => x.checked_sub(1).map(|west_x| Cartesian2DCoordinate::new(west_x, y)),
        }
    }

    /// The direction that leads from `self` to an adjacent `other`, if they are adjacent.
    pub fn direction_to(self, other: Cartesian2DCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|dir| self.offset(*dir) == Some(other))
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// North is towards row zero, west is towards column zero.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    pub fn rand_direction<R: Rng>(rng: &mut R) -> CompassPrimary {
        CompassPrimary::ALL[rng.gen_range(0..CompassPrimary::ALL.len())]
    }

    pub fn rand_roughly_vertical_direction<R: Rng>(rng: &mut R) -> CompassPrimary {
        if rng.gen() {
            CompassPrimary::North
        } else {
            CompassPrimary::South
        }
    }

    pub fn rand_roughly_horizontal_direction<R: Rng>(rng: &mut R) -> CompassPrimary {
        if rng.gen() {
            CompassPrimary::East
        } else {
            CompassPrimary::West
        }
    }
}

/// Snapshot of one maze cell: where it is and which of its four sides are open passages.
///
/// A `Cell` is a copy of the grid state at the time it was read. Nothing done to it reaches
/// back into the maze it came from.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub struct Cell {
    coordinate: Cartesian2DCoordinate,
    north: bool,
    south: bool,
    east: bool,
    west: bool,
}

impl Cell {
    pub(crate) fn new(coordinate: Cartesian2DCoordinate,
                      north: bool,
                      south: bool,
                      east: bool,
                      west: bool)
                      -> Cell {
        Cell { coordinate, north, south, east, west }
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        self.coordinate
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.coordinate.x
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.coordinate.y
    }

    #[inline]
    pub fn north(&self) -> bool {
        self.north
    }

    #[inline]
    pub fn south(&self) -> bool {
        self.south
    }

    #[inline]
    pub fn east(&self) -> bool {
        self.east
    }

    #[inline]
    pub fn west(&self) -> bool {
        self.west
    }

    /// Is there a passage (no wall) leading out of the cell in the given direction?
    pub fn has_passage(&self, dir: CompassPrimary) -> bool {
        match dir {
            CompassPrimary::North => self.north,
            CompassPrimary::South => self.south,
            CompassPrimary::East => self.east,
            CompassPrimary::West => self.west,
        }
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        !self.has_passage(dir)
    }

    pub fn passages(&self) -> DirectionSmallVec {
        CompassPrimary::ALL.iter().cloned().filter(|dir| self.has_passage(*dir)).collect()
    }

    /// The sides a renderer has to draw a wall quad for.
    pub fn walls(&self) -> DirectionSmallVec {
        CompassPrimary::ALL.iter().cloned().filter(|dir| self.has_wall(*dir)).collect()
    }

    pub fn passages_count(&self) -> usize {
        self.passages().len()
    }

    #[inline]
    pub fn is_dead_end(&self) -> bool {
        self.passages_count() == 1
    }
}
