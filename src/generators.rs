use log::{debug, trace};
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::cells::{CompassPrimary, CoordinateSmallVec, GridCoordinate};
use crate::grid::Grid;

/// The maze generation algorithms, selectable as a plain value.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Generator {
    BinaryTree,
    Sidewinder,
}

impl Generator {
    pub fn apply<R: Rng + ?Sized>(self, grid: &mut Grid, rng: &mut R) {
        match self {
            Generator::BinaryTree => binary_tree(grid, rng),
            Generator::Sidewinder => sidewinder(grid, rng),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Generator::BinaryTree => "binary-tree",
            Generator::Sidewinder => "sidewinder",
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Eq, PartialEq, Clone, Debug)]
#[error("unknown maze generator '{0}'")]
pub struct ParseGeneratorError(String);

impl FromStr for Generator {
    type Err = ParseGeneratorError;

    fn from_str(s: &str) -> Result<Generator, ParseGeneratorError> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "binary-tree" | "binary_tree" => Ok(Generator::BinaryTree),
            "sidewinder" => Ok(Generator::Sidewinder),
            _ => Err(ParseGeneratorError(s.to_owned())),
        }
    }
}

/// Apply the binary tree maze generation algorithm to a grid
/// It works simply by visiting each cell in the grid and choosing to carve a passage
/// either east or north, whichever neighbours exist.
/// The directions are fixed for the whole run, mixing in south or west would wall off regions
/// and the result would no longer be a perfect maze.
/// Only the north east corner has neither neighbour, so it carves nothing on its own turn.
pub fn binary_tree<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    const CARVE_DIRECTIONS: [CompassPrimary; 2] = [CompassPrimary::East, CompassPrimary::North];

    let mut carved = 0;
    for cell_coord in grid.iter() {

        let neighbours = grid.neighbours_at_directions(cell_coord, &CARVE_DIRECTIONS)
            .into_iter()
            .flatten()
            .collect::<CoordinateSmallVec>();

        if !neighbours.is_empty() {
            let link_coord = neighbours[rng.gen_range(0..neighbours.len())];
            carve_passage(grid, cell_coord, link_coord);
            carved += 1;
        }
    }

    debug!("binary tree carved {} passages over {} cells", carved, grid.size());
}

/// Apply the sidewinder maze generation algorithm to the grid
/// Each row is visited west to east, collecting the cells visited into a "run". After each cell
/// a coin flip decides whether the run carries on eastwards or is closed out. Closing a run
/// carves a passage north from one randomly chosen member of the run, then starts a new run.
/// A run is always closed at the eastern boundary and never closed early on the northern row,
/// where there is nothing to carve north into, so that row ends up as a single corridor.
/// The result has a vertical bias, with most passages leading north.
pub fn sidewinder<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut carved = 0;

    for row in grid.iter_row() {
        let mut run: Vec<GridCoordinate> = Vec::with_capacity(row.len());

        for coord in row {
            run.push(coord);

            let east = grid.neighbour_at_direction(coord, CompassPrimary::East);
            let at_eastern_boundary = east.is_none();
            let at_northern_boundary = grid.neighbour_at_direction(coord, CompassPrimary::North)
                .is_none();

            let should_close_out = at_eastern_boundary ||
                                   (!at_northern_boundary && rng.gen::<bool>()); // coin flip

            if should_close_out {
                let run_member = run[rng.gen_range(0..run.len())];
                if let Some(north) = grid.neighbour_at_direction(run_member, CompassPrimary::North) {
                    carve_passage(grid, run_member, north);
                    carved += 1;
                }
                trace!("sidewinder closed a run of {} ending at {}", run.len(), coord);
                run.clear();
            } else if let Some(east_coord) = east {
                carve_passage(grid, coord, east_coord);
                carved += 1;
            }
        }
    }

    debug!("sidewinder carved {} passages over {} cells", carved, grid.size());
}

fn carve_passage(grid: &mut Grid, from: GridCoordinate, to: GridCoordinate) {
    // Both coordinates come from the grid's own neighbour relations.
    let linked = grid.link(from, to, true);
    debug_assert!(linked.is_ok(), "cannot carve from {} to {}: {:?}", from, to, linked);
}
