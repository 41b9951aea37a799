//! Maze carving algorithms.
//!
//! Each generator expects a grid with every wall still in place and carves a perfect maze
//! into it: every cell reachable from every other cell by exactly one path. All randomness
//! comes from the caller's rng, so a seeded rng reproduces the same maze.

use bit_set::BitSet;
use log::trace;
use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec};
use crate::grid::{CellLinkError, Grid, IndexType};

/// Apply the binary tree maze generation algorithm to a grid
/// It works simply by visiting each cell in the grid and choosing to carve a passage
/// in one of two perpendicular directions.
/// Once picked, the two perpendicular directions are constant for the entire maze generation process,
/// otherwise we'd have a good way for generating many areas with no way in or out. We would not be
/// generating a perfect maze.
pub fn binary_tree<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R) -> Result<(), CellLinkError>
    where GridIndexType: IndexType,
          R: Rng
{
    let neighbours_to_check = [CompassPrimary::rand_roughly_vertical_direction(rng),
                               CompassPrimary::rand_roughly_horizontal_direction(rng)];

    for cell_coord in grid.iter() {

        // Get the neighbours perpendicular to this cell
        let neighbours = grid.neighbours_at_directions(cell_coord, &neighbours_to_check)
            .into_iter()
            .flatten()
            .collect::<CoordinateSmallVec>();

        // Unless there are no neighbours, randomly choose a neighbour to connect.
        if let Some(&link_coord) = neighbours.choose(rng) {
            grid.link(cell_coord, link_coord)?;
        }
    }

    Ok(())
}

/// Apply the sidewinder maze generation algorithm to the grid
/// Sidewinder visits the cells one row (or column) at a time. Like the simple binary tree algorithm
/// it picks from one of two directions. The difference is that one direction (e.g east/horizontal)
/// just carves in that direction but when we pick to close out the run we carve a passage in
/// the other direction from a random cell selected from the most recent run of cells.
/// The two directions need to be perpendicular to one another and fixed for the lifetime of the
/// algorithm otherwise we get a lot of closed off rooms in the maze.
/// The run direction must match the order we visit cells in a batch (west to east, north to south).
pub fn sidewinder<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R) -> Result<(), CellLinkError>
    where GridIndexType: IndexType,
          R: Rng
{
    let runs_are_horizontal = rng.gen();
    let (next_in_run_direction, run_close_out_direction, batch_iter) = if runs_are_horizontal {
        (CompassPrimary::East, CompassPrimary::rand_roughly_vertical_direction(rng), grid.iter_row())
    } else {
        (CompassPrimary::South, CompassPrimary::rand_roughly_horizontal_direction(rng), grid.iter_column())
    };

    for coordinates_line in batch_iter {
        let mut run: Vec<Cartesian2DCoordinate> = vec![];

        for coord in coordinates_line {
            run.push(coord);

            let next_in_run_cell = grid.neighbour_at_direction(coord, next_in_run_direction);
            let at_close_out_direction_boundary =
                grid.neighbour_at_direction(coord, run_close_out_direction).is_none();

            match next_in_run_cell {
                Some(next_cell) if at_close_out_direction_boundary || !rng.gen::<bool>() => {
                    grid.link(coord, next_cell)?;
                }
                _ => {
                    if let Some(&run_member) = run.choose(rng) {
                        let close_out_cell = grid.neighbour_at_direction(run_member,
                                                                         run_close_out_direction);
                        if let Some(close_out_coord) = close_out_cell {
                            grid.link(run_member, close_out_coord)?;
                        }
                    }
                    run.clear();
                }
            }
        }
    }

    Ok(())
}

/// Aldous-Broder: a random walk over the whole grid, carving into a cell the first time the
/// walk enters it. Unbiased, but slow to finish on larger grids as the last few unvisited cells
/// have to be found by chance.
pub fn aldous_broder<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R) -> Result<(), CellLinkError>
    where GridIndexType: IndexType,
          R: Rng
{
    let mut visited = BitSet::with_capacity(grid.size());
    let mut current = grid.random_cell(rng);
    visited.insert(row_major_index(grid, current));
    let mut unvisited_count = grid.size() - 1;

    while unvisited_count > 0 {
        let neighbours = grid.neighbours(current);
        if let Some(&next) = neighbours.choose(rng) {
            if visited.insert(row_major_index(grid, next)) {
                grid.link(current, next)?;
                unvisited_count -= 1;
            }
            current = next;
        } else {
            break;
        }
    }

    Ok(())
}

/// Wilson's algorithm: loop-erased random walks from an unvisited cell until the walk hits the
/// part of the maze already carved, then the walked path is carved in one go.
/// Unbiased like Aldous-Broder, it is slow to start and fast to finish.
pub fn wilson<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R) -> Result<(), CellLinkError>
    where GridIndexType: IndexType,
          R: Rng
{
    let mut visited = BitSet::with_capacity(grid.size());
    let mut unvisited = grid.iter().collect::<Vec<_>>();

    if let Some(&first) = unvisited.choose(rng) {
        visited.insert(row_major_index(grid, first));
        unvisited.retain(|coord| *coord != first);
    }

    while let Some(&walk_start) = unvisited.choose(rng) {

        let mut path = vec![walk_start];
        let mut cell = walk_start;

        while !visited.contains(row_major_index(grid, cell)) {
            let neighbours = grid.neighbours(cell);
            match neighbours.choose(rng) {
                Some(&next) => cell = next,
                None => break,
            }

            // Erase any loop the walk just made
            if let Some(loop_start) = path.iter().position(|c| *c == cell) {
                path.truncate(loop_start + 1);
            } else {
                path.push(cell);
            }
        }

        for pair in path.windows(2) {
            grid.link(pair[0], pair[1])?;
        }
        for coord in &path {
            visited.insert(row_major_index(grid, *coord));
        }
        unvisited.retain(|coord| !visited.contains(row_major_index(grid, *coord)));
    }

    Ok(())
}

/// Hunt and kill: a random walk that only steps into unvisited cells. When it paints itself into a
/// corner it hunts, row by row, for the first unvisited cell that touches the visited region, links
/// the two and restarts the walk from there. Produces long winding passages with few dead ends.
pub fn hunt_and_kill<GridIndexType, R>(grid: &mut Grid<GridIndexType>, rng: &mut R) -> Result<(), CellLinkError>
    where GridIndexType: IndexType,
          R: Rng
{
    let mut visited = BitSet::with_capacity(grid.size());
    let start = grid.random_cell(rng);
    visited.insert(row_major_index(grid, start));
    let mut current = Some(start);

    while let Some(cell) = current {

        let unvisited_neighbours = grid.neighbours(cell)
            .iter()
            .cloned()
            .filter(|coord| !visited.contains(row_major_index(grid, *coord)))
            .collect::<CoordinateSmallVec>();

        if let Some(&next) = unvisited_neighbours.choose(rng) {
            grid.link(cell, next)?;
            visited.insert(row_major_index(grid, next));
            current = Some(next);
            continue;
        }

        // hunt
        current = None;
        for coord in grid.iter() {
            if visited.contains(row_major_index(grid, coord)) {
                continue;
            }
            let visited_neighbours = grid.neighbours(coord)
                .iter()
                .cloned()
                .filter(|c| visited.contains(row_major_index(grid, *c)))
                .collect::<CoordinateSmallVec>();
            if let Some(&neighbour) = visited_neighbours.choose(rng) {
                grid.link(coord, neighbour)?;
                visited.insert(row_major_index(grid, coord));
                current = Some(coord);
                break;
            }
        }
    }

    Ok(())
}

/// Randomised depth first search with an explicit stack (no recursion limit on big grids).
/// Walks into a random unvisited neighbour, backs up along the stack when there is none.
pub fn recursive_backtracker<GridIndexType, R>(grid: &mut Grid<GridIndexType>,
                                               rng: &mut R)
                                               -> Result<(), CellLinkError>
    where GridIndexType: IndexType,
          R: Rng
{
    let mut visited = BitSet::with_capacity(grid.size());
    let start = grid.random_cell(rng);
    visited.insert(row_major_index(grid, start));
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {

        let unvisited_neighbours = grid.neighbours(cell)
            .iter()
            .cloned()
            .filter(|coord| !visited.contains(row_major_index(grid, *coord)))
            .collect::<CoordinateSmallVec>();

        match unvisited_neighbours.choose(rng) {
            Some(&next) => {
                grid.link(cell, next)?;
                visited.insert(row_major_index(grid, next));
                stack.push(next);
            }
            None => {
                let _ = stack.pop();
            }
        }
    }

    Ok(())
}

/// Cells with exactly one passage leading out of them, in row major order.
pub fn dead_ends<GridIndexType: IndexType>(grid: &Grid<GridIndexType>) -> Vec<Cartesian2DCoordinate> {
    grid.iter()
        .filter(|coord| grid.links(*coord).map_or(false, |links| links.len() == 1))
        .collect()
}

/// Remove dead ends by linking them to another neighbour, turning a perfect maze into a braided
/// one with loops.
///
/// Every dead end is considered once, in random order, and is opened up with probability
/// `probability` (0.0 keeps the maze as is, 1.0 removes every dead end that has a neighbour to
/// link to). Neighbours that are dead ends themselves are preferred so one new passage removes
/// two dead ends. Returns the number of passages carved.
pub fn braid<GridIndexType, R>(grid: &mut Grid<GridIndexType>,
                               rng: &mut R,
                               probability: f64)
                               -> Result<usize, CellLinkError>
    where GridIndexType: IndexType,
          R: Rng
{
    let mut candidates = dead_ends(grid);
    candidates.shuffle(rng);
    let mut carved = 0;

    for cell in candidates {

        // An earlier braid may have already opened this one up
        let still_dead_end = grid.links(cell).map_or(false, |links| links.len() == 1);
        if !still_dead_end || rng.gen::<f64>() >= probability {
            continue;
        }

        let unlinked_neighbours = grid.neighbours(cell)
            .iter()
            .cloned()
            .filter(|neighbour| !grid.is_linked(cell, *neighbour))
            .collect::<CoordinateSmallVec>();
        let dead_end_neighbours = unlinked_neighbours.iter()
            .cloned()
            .filter(|neighbour| grid.links(*neighbour).map_or(false, |links| links.len() == 1))
            .collect::<SmallVec<[Cartesian2DCoordinate; 4]>>();

        let pool = if dead_end_neighbours.is_empty() {
            &unlinked_neighbours
        } else {
            &dead_end_neighbours
        };

        if let Some(&neighbour) = pool.choose(rng) {
            trace!("braiding dead end {} into {}", cell, neighbour);
            grid.link(cell, neighbour)?;
            carved += 1;
        }
    }

    Ok(carved)
}

// Coordinates handed out by the grid's own iterators and neighbour queries are always valid, so
// the row major index can be computed directly.
#[inline]
fn row_major_index<GridIndexType: IndexType>(grid: &Grid<GridIndexType>,
                                             coord: Cartesian2DCoordinate)
                                             -> usize {
    coord.y as usize * grid.width() + coord.x as usize
}
