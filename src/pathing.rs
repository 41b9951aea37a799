// Distances are a flood fill from one start cell over the passages of a maze.
// Every step is one cell so there are no weights: the first time the flood reaches a cell is the
// shortest distance to it, and the distances map doubles as the visited set.
//
// A `Distances` is not tied to the grid it was computed for. Any mutation of the grid after the
// flood (braiding, relinking) invalidates it, which is fine for mazes that are generated once and
// then only read.

use std::fmt::{Debug, Display, LowerHex};
use std::ops::Add;

use itertools::Itertools;
use num::traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CoordinateSmallVec};
use crate::grid::{Grid, IndexType};
use crate::utils;
use crate::utils::FnvHashMap;


// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this out each time
// Note generic parameter type aliases are not in the language.
// `type X = Y;` only works with concrete types.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord> MaxDistance for T {}


#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    /// Distances from `start_coordinate` to every cell reachable from it.
    /// None if the start is not on the grid.
    pub fn for_grid<GridIndexType>(grid: &Grid<GridIndexType>,
                                   start_coordinate: Cartesian2DCoordinate)
                                   -> Option<Distances<MaxDistanceT>>
        where GridIndexType: IndexType
    {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, Zero::zero());

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = match distances.get(cell_coord) {
                    Some(d) => *d,
                    None => continue,
                };
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links: CoordinateSmallVec = grid.links(*cell_coord).unwrap_or_default();
                for link_coordinate in &links {
                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + One::one());
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// None when the cell is unreachable from the start or not on the grid.
    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// Every cell at the maximum distance, sorted so ties come out in a stable order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[Cartesian2DCoordinate; 8]> {
        let furthest_distance = self.max();

        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}

/// Walk back from `end_point` to the start of `distances_from_start`, always stepping to a linked
/// neighbour that is closer to the start. The path runs start to end inclusive.
pub fn shortest_path<GridIndexType, MaxDistanceT>(grid: &Grid<GridIndexType>,
                                                  distances_from_start: &Distances<MaxDistanceT>,
                                                  end_point: Cartesian2DCoordinate)
                                                  -> Option<Vec<Cartesian2DCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    // Unreachable, or not even on the grid
    distances_from_start.distance_from_start_to(end_point)?;

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)?;

        let closest_to_start = grid.links(current_coord)?
            .iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord).map(|d| (*coord, d))
            })
            .min_by_key(|&(_, distance)| distance);

        match closest_to_start {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance_to_start => {
                current_coord = closer_coord;
                path.push(current_coord);
            }
            // We have not got any closer, the distances do not belong to this grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest path in a perfect maze: the furthest point from an arbitrary cell is one end of the
/// longest path, the furthest point from there is the other end.
/// On a braided maze this is the path between the two cells furthest apart by shortest route.
pub fn dijkstra_longest_path<GridIndexType, MaxDistanceT>(grid: &Grid<GridIndexType>)
                                                          -> Option<Vec<Cartesian2DCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    let arbitrary_start_point = Cartesian2DCoordinate::new(0, 0);
    let first_distances = Distances::<MaxDistanceT>::for_grid(grid, arbitrary_start_point)?;

    let long_path_start_coordinate = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::<MaxDistanceT>::for_grid(grid, long_path_start_coordinate)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}
