//! **glmaze** generates rectangular mazes and answers per cell wall queries for a renderer that
//! walks the maze in first person.
//!
//! `MazeManager` owns the current maze and is safe to share between a generating thread and any
//! number of rendering threads. `MazeGraph` is one immutable generation.

pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grid_traits;
pub mod grids;
pub mod manager;
pub mod maze_graph;
pub mod pathing;
pub mod units;
mod utils;

pub use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary};
pub use crate::config::{GenerationAlgorithm, MazeConfig};
pub use crate::manager::{GenerationHandle, ManagerState, MazeManager};
pub use crate::maze_graph::MazeGraph;
