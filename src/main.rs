use docopt::Docopt;
use glmaze::{
    cells::{Cartesian2DCoordinate, CoordinateSmallVec},
    grid_displays::{PathDisplay, StartEndPointsDisplay},
    grid_traits::GridDisplay,
    grids::LargeRectangularGrid,
    pathing,
    GenerationAlgorithm, MazeConfig, MazeManager,
};
use log::info;
use serde_derive::Deserialize;
use smallvec::smallvec;
use std::{fs::File, io, io::prelude::*};

const USAGE: &str = "glmaze driver

Usage:
    glmaze_driver -h | --help
    glmaze_driver [--width=<w>] [--height=<h>] [--seed=<s>] [--algorithm=<a>] [--braid=<p>] [--show-distances|--show-path] [--mark-start-end] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --width=<w>            The maze width in a w*h grid [default: 20].
    --height=<h>           The maze height in a w*h grid [default: 20].
    --seed=<s>             Seed for the random number generator. A random seed is chosen and logged if not given.
    --algorithm=<a>        One of binary-tree, sidewinder, aldous-broder, wilson, hunt-and-kill, recursive-backtracker [default: recursive-backtracker].
    --braid=<p>            Probability 0.0 to 1.0 of opening up each dead end, making loops [default: 0.0].
    --show-distances       Show the distance from the start of the longest path to every other cell.
    --show-path            Show the longest path through the maze.
    --mark-start-end       Mark the start 'S' and end 'E' of the longest path.
    --text-out=<path>      Write the text rendering to a file instead of standard output.
    --save-edges=<path>    Serialize the maze to a text file. Line 1: n(#vertices) m(#edges). Line 2+: one edge per line between two 1-based vertex indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: i32,
    flag_height: i32,
    flag_seed: Option<u64>,
    flag_algorithm: String,
    flag_braid: f64,
    flag_show_distances: bool,
    flag_show_path: bool,
    flag_mark_start_end: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::glmaze::errors::Error, ::glmaze::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let algorithm = args.flag_algorithm.parse::<GenerationAlgorithm>()?;
    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!("using seed {}", seed);

    let config = MazeConfig::new(args.flag_width, args.flag_height, seed)
        .with_algorithm(algorithm)
        .with_braid(args.flag_braid);

    let manager = MazeManager::new();
    manager.create_maze_with(&config)
        .chain_err(|| format!("Failed to generate a {}x{} maze", config.width, config.height))?;
    let maze = manager.snapshot()?;

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(maze.grid(), &args.flag_save_edges)?;
    }

    let rendering = render_maze_text(maze.grid(), &args)?;
    if args.flag_text_out.is_empty() {
        println!("{}", rendering);
    } else {
        write_text_to_file(&rendering, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Pick what goes in the cell bodies:
/// - nothing
/// - distances from the start of the longest path
/// - the longest path itself
/// - start and end markers of the longest path
fn render_maze_text(grid: &LargeRectangularGrid, maze_args: &MazeArgs) -> Result<String> {

    let wants_longest_path = maze_args.flag_show_distances || maze_args.flag_show_path ||
                             maze_args.flag_mark_start_end;
    if !wants_longest_path {
        return Ok(format!("{}", grid));
    }

    let longest_path = pathing::dijkstra_longest_path::<u32, u32>(grid)
        .ok_or("Failed to find the longest path through the maze")?;
    let start = *longest_path.first().ok_or("Longest path is empty")?;
    let end = *longest_path.last().ok_or("Longest path is empty")?;

    let displayer: Box<dyn GridDisplay> = if maze_args.flag_show_distances {
        let distances = pathing::Distances::<u32>::for_grid(grid, start)
            .ok_or("Invalid start coordinate from which to show path distances")?;
        Box::new(distances)
    } else if maze_args.flag_show_path {
        Box::new(PathDisplay::new(&longest_path))
    } else {
        Box::new(StartEndPointsDisplay::new(as_coordinate_smallvec(start), as_coordinate_smallvec(end)))
    };

    Ok(format!("{}", grid.display_with(displayer.as_ref())))
}

fn as_coordinate_smallvec(coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
    smallvec![coord]
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(grid: &LargeRectangularGrid, file_path: &str) -> Result<()> {

    let mut graph_data = format!("{} {}\n", grid.size(), grid.links_count());

    for (src, dst) in grid.iter_links() {
        let index_a = grid.grid_coordinate_to_index(src)
            .ok_or("Links iterator gave a coordinate off the grid")?;
        let index_b = grid.grid_coordinate_to_index(dst)
            .ok_or("Links iterator gave a coordinate off the grid")?;
        graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
