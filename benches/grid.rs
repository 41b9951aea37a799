use criterion::{criterion_group, criterion_main, Criterion};
use glmaze::cells::Cartesian2DCoordinate;
use glmaze::grids::{large_rect_grid, medium_rect_grid, small_rect_grid};
use glmaze::units::{ColumnLength, RowLength};
use glmaze::MazeGraph;

fn bench_grid_construction(c: &mut Criterion) {
    c.bench_function("maze_11_u8", |b| {
        b.iter(|| small_rect_grid(RowLength(11), ColumnLength(11)).unwrap())
    });
    c.bench_function("maze_11_u16", |b| {
        b.iter(|| medium_rect_grid(RowLength(11), ColumnLength(11)).unwrap())
    });
    c.bench_function("maze_11_u32", |b| {
        b.iter(|| large_rect_grid(RowLength(11), ColumnLength(11)).unwrap())
    });
    c.bench_function("maze_128_u16", |b| {
        b.iter(|| medium_rect_grid(RowLength(128), ColumnLength(128)).unwrap())
    });
    c.bench_function("maze_128_u32", |b| {
        b.iter(|| large_rect_grid(RowLength(128), ColumnLength(128)).unwrap())
    });
    c.bench_function("maze_500", |b| {
        b.iter(|| large_rect_grid(RowLength(500), ColumnLength(500)).unwrap())
    });
}

fn bench_index_to_gridcoordinate(c: &mut Criterion) {
    let g = large_rect_grid(RowLength(11), ColumnLength(11)).unwrap();
    let dims = *g.dimensions();
    c.bench_function("index_to_gridcoordinate", move |b| {
        b.iter(|| Cartesian2DCoordinate::from_row_major_index(93, &dims))
    });
}

fn bench_neighbours(c: &mut Criterion) {
    let g = large_rect_grid(RowLength(11), ColumnLength(11)).unwrap();
    let corner = Cartesian2DCoordinate::new(0, 0);
    let mid = Cartesian2DCoordinate::new(5, 5);
    c.bench_function("neighbours_corner_of_grid", |b| b.iter(|| g.neighbours(corner)));
    c.bench_function("neighbours_middle_of_grid", |b| b.iter(|| g.neighbours(mid)));
}

fn bench_cell_lookup(c: &mut Criterion) {
    let maze = MazeGraph::generate(64, 64, 1).unwrap();
    c.bench_function("cell_at_64", |b| b.iter(|| maze.cell_at(31, 40).unwrap()));
    c.bench_function("all_cells_64", |b| b.iter(|| maze.cells().filter(|cell| cell.is_dead_end()).count()));
}

criterion_group!(benches,
    bench_grid_construction,
    bench_index_to_gridcoordinate,
    bench_neighbours,
    bench_cell_lookup
);
criterion_main!(benches);
