use std::fmt;

use crate::cells::{Cell, UNVISITED_DISTANCE};
use crate::grid::Grid;
use crate::utils;

/// Render the body of a cell as text, three glyphs wide: the recorded scratch distance in
/// base 36, or blank if the cell was never reached.
fn render_cell_body(cell: &Cell) -> String {
    if cell.distance() == UNVISITED_DISTANCE {
        String::from("   ")
    } else {
        format!("{:^3}", utils::base36(u64::from(cell.distance())))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const CORNER: &str = "+";
        const WALL_EW: &str = "---";
        const WALL_NS: &str = "|";
        const OPEN_EW: &str = "   ";
        const OPEN_NS: &str = " ";

        // The northern boundary, every other row draws its own southern boundary.
        let mut output = String::from(CORNER);
        for _ in 0..self.columns().0 {
            output.push_str(WALL_EW);
            output.push_str(CORNER);
        }
        output.push('\n');

        for row in self.cell_rows() {
            let mut row_middle_section_render = String::from(WALL_NS);
            let mut row_bottom_section_render = String::from(CORNER);

            for cell in row {
                row_middle_section_render.push_str(&render_cell_body(cell));
                row_middle_section_render.push_str(if cell.is_linked(cell.east()) {
                    OPEN_NS
                } else {
                    WALL_NS
                });

                row_bottom_section_render.push_str(if cell.is_linked(cell.south()) {
                    OPEN_EW
                } else {
                    WALL_EW
                });
                row_bottom_section_render.push_str(CORNER);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        f.write_str(&output)
    }
}

#[cfg(test)]
mod tests {

    use rand::rngs::mock::StepRng;

    use crate::cells::GridCoordinate;
    use crate::generators;
    use crate::grid::Grid;
    use crate::pathing::Distances;
    use crate::units::{ColumnsCount, RowsCount};

    #[test]
    fn unlinked_grid_is_all_walls() {
        let g = Grid::new(RowsCount(2), ColumnsCount(3)).unwrap();
        let expected = "+---+---+---+\n\
                        |   |   |   |\n\
                        +---+---+---+\n\
                        |   |   |   |\n\
                        +---+---+---+\n";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn maze_with_recorded_distances() {
        let mut g = Grid::new(RowsCount(2), ColumnsCount(2)).unwrap();
        generators::binary_tree(&mut g, &mut StepRng::new(0, 0));
        let distances = Distances::<u32>::for_grid(&g, GridCoordinate::new(0, 0)).unwrap();
        g.record_distances(&distances);

        let expected = "+---+---+\n\
                        | 0   1 |\n\
                        +---+   +\n\
                        | 3   2 |\n\
                        +---+---+\n";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn distances_shown_in_base36() {
        let mut g = Grid::new(RowsCount(1), ColumnsCount(40)).unwrap();
        for column in 0..39 {
            g.link(GridCoordinate::new(0, column), GridCoordinate::new(0, column + 1), true)
                .unwrap();
        }
        let distances = Distances::<u32>::for_grid(&g, GridCoordinate::new(0, 0)).unwrap();
        g.record_distances(&distances);

        let rendered = g.to_string();
        let middle = rendered.lines().nth(1).unwrap();
        assert!(middle.starts_with("| 0   1   2 "));
        assert!(middle.contains(" z  10  11 "));
        assert!(middle.ends_with(" 13 |"));
    }
}
