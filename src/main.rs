use docopt::Docopt;
use gridmaze::{
    cells::GridCoordinate,
    generators::Generator,
    grid::Grid,
    pathing::Distances,
    renderers,
    units,
};
use log::info;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Grid Mazes

Usage:
    gridmaze_driver -h | --help
    gridmaze_driver [binary | sidewinder] [--rows=<r>] [--columns=<c>] [--seed=<n>] [--start-row=<y>] [--start-column=<x>] [--text-out=<path>] [--image-out=<path>] [--cell-pixels=<n>] [--no-image]

Options:
    -h --help              Show this screen.
    --rows=<r>             The number of rows in the grid [default: 25].
    --columns=<c>          The number of columns in the grid [default: 25].
    --seed=<n>             Seed for the random number generator, for a reproducible maze.
    --start-row=<y>        Row of the cell distances are measured from [default: 0].
    --start-column=<x>     Column of the cell distances are measured from [default: 0].
    --text-out=<path>      Output file path for a textual rendering of the maze, otherwise printed.
    --image-out=<path>     Output file path for an image rendering of the maze. Always PNG format [default: maze.png].
    --cell-pixels=<n>      Pixel count to render one cell wall in a maze [default: 10] max 255.
    --no-image             Do not render the maze as an image.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_binary: bool,
    cmd_sidewinder: bool,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_start_row: u32,
    flag_start_column: u32,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_no_image: bool,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            ImageFailure(::image::ImageError);
            InvalidGrid(::gridmaze::grid::GridError);
            Pathing(::gridmaze::pathing::PathingError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    // Sidewinder unless asked otherwise
    let generator = match (args.cmd_binary, args.cmd_sidewinder) {
        (true, _) => Generator::BinaryTree,
        (false, _) => Generator::Sidewinder,
    };

    let mut rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };

    info!("generating a {}x{} {} maze", args.flag_rows, args.flag_columns, generator);

    let mut maze_grid = Grid::new(units::RowsCount(args.flag_rows),
                                  units::ColumnsCount(args.flag_columns))?;
    generator.apply(&mut maze_grid, &mut rng);

    let start = GridCoordinate::new(args.flag_start_row, args.flag_start_column);
    let distances = Distances::<u32>::for_grid(&maze_grid, start)?;
    maze_grid.record_distances(&distances);

    info!("furthest cell from {} is {} steps away", start, distances.max());

    if args.flag_text_out.is_empty() {
        println!("{}", maze_grid);
    } else {
        write_text_to_file(&maze_grid.to_string(), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        info!("maze text written to {}", args.flag_text_out);
    }

    if !args.flag_no_image {
        renderers::save_png(&maze_grid, args.flag_cell_pixels, &args.flag_image_out)
            .chain_err(|| format!("Failed to write maze image {}", args.flag_image_out))?;
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
