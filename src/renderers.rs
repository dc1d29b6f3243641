use image::{ImageFormat, ImageResult, Rgb, RgbImage};
use log::info;
use std::path::Path;

use crate::cells::UNVISITED_DISTANCE;
use crate::grid::Grid;

pub const WALL_COLOUR: Rgb<u8> = Rgb([0, 0, 0]);
pub const UNREACHED_COLOUR: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

/// Smallest cell side that still leaves room for a cell interior between the walls.
const MIN_CELL_SIDE_PIXELS: u32 = 2;

/// Background colour of a cell at `distance` from the start: bright green at the start fading
/// towards grey at `max_distance`.
pub fn distance_colour(distance: u32, max_distance: u32) -> Rgb<u8> {
    if distance == UNVISITED_DISTANCE {
        UNREACHED_COLOUR
    } else if max_distance == 0 {
        Rgb([0x55, 0xff, 0x55])
    } else {
        let nearness = u64::from(max_distance.saturating_sub(distance));
        let green = (nearness * 255 / u64::from(max_distance)) as u8;
        Rgb([0x55, green, 0x55])
    }
}

/// Draw the maze as a raster image, `cell_side_pixels` per cell plus a one pixel border.
///
/// Cells are shaded by their recorded scratch distance (see `Grid::record_distances`), passages
/// are painted over in the colour of the cell they lead out of.
pub fn render_square_grid(grid: &Grid, cell_side_pixels: u8) -> RgbImage {
    let cell_side = u32::from(cell_side_pixels).max(MIN_CELL_SIDE_PIXELS);
    let width = 1 + grid.columns().0 as u32 * cell_side;
    let height = 1 + grid.rows().0 as u32 * cell_side;
    let max_distance = grid.cells()
        .iter()
        .map(|cell| cell.distance())
        .filter(|&distance| distance != UNVISITED_DISTANCE)
        .max()
        .unwrap_or(0);

    let mut image = RgbImage::new(width, height);

    for cell in grid.cells() {
        let colour = distance_colour(cell.distance(), max_distance);
        let x1 = cell.column() * cell_side;
        let y1 = cell.row() * cell_side;
        let x2 = x1 + cell_side;
        let y2 = y1 + cell_side;

        for x in (x1 + 1)..x2 {
            for y in (y1 + 1)..y2 {
                image.put_pixel(x, y, colour);
            }
        }

        if cell.north().is_none() {
            horizontal_line(&mut image, y1, x1, x2, WALL_COLOUR);
        }
        if cell.west().is_none() {
            vertical_line(&mut image, x1, y1, y2, WALL_COLOUR);
        }

        if cell.is_linked(cell.east()) {
            vertical_line(&mut image, x2, y1 + 1, y2 - 1, colour);
        } else {
            vertical_line(&mut image, x2, y1, y2, WALL_COLOUR);
        }

        if cell.is_linked(cell.south()) {
            horizontal_line(&mut image, y2, x1 + 1, x2 - 1, colour);
        } else {
            horizontal_line(&mut image, y2, x1, x2, WALL_COLOUR);
        }
    }

    image
}

/// Render the maze and write it out as a PNG file.
pub fn save_png<P: AsRef<Path>>(grid: &Grid, cell_side_pixels: u8, path: P) -> ImageResult<()> {
    let image = render_square_grid(grid, cell_side_pixels);
    image.save_with_format(path.as_ref(), ImageFormat::Png)?;
    info!("maze image written to {}", path.as_ref().display());
    Ok(())
}

// Inclusive of both ends.
fn horizontal_line(image: &mut RgbImage, y: u32, from_x: u32, to_x: u32, colour: Rgb<u8>) {
    for x in from_x..=to_x {
        image.put_pixel(x, y, colour);
    }
}

fn vertical_line(image: &mut RgbImage, x: u32, from_y: u32, to_y: u32, colour: Rgb<u8>) {
    for y in from_y..=to_y {
        image.put_pixel(x, y, colour);
    }
}
