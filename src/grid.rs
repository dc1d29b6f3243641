use bit_set::BitSet;
use rand::Rng;
use num::ToPrimitive;
use smallvec::SmallVec;
use std::slice;
use thiserror::Error;

use crate::cells::{Cell, CompassPrimary, CoordinateSmallVec, GridCoordinate, UNVISITED_DISTANCE};
use crate::grid_iterators::{CellIter, RowBatchIter};
use crate::pathing::{Distances, MaxDistance};
use crate::units::{ColumnsCount, RowsCount};

pub type CoordinateOptionSmallVec = SmallVec<[Option<GridCoordinate>; 4]>;

#[derive(Error, Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridError {
    #[error("a grid needs at least one row and one column, asked for {rows} x {columns}")]
    ZeroDimension { rows: usize, columns: usize },
    #[error("a {rows} x {columns} grid has more cells than can be addressed")]
    TooLarge { rows: usize, columns: usize },
}

#[derive(Error, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    #[error("grid coordinate is outside of the grid")]
    InvalidGridCoordinate,
    #[error("a cell cannot be linked to itself")]
    SelfLink,
    #[error("only neighbouring cells can be linked")]
    NotNeighbour,
}

/// A rectangular grid of cells, owning every cell it contains.
///
/// Cells are stored row-major. Neighbour relations are wired once during construction and never
/// change afterwards, only the link sets are mutated (by the maze generators).
#[derive(Clone, Debug)]
pub struct Grid {
    rows: RowsCount,
    columns: ColumnsCount,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a `rows` x `columns` grid with every cell unlinked and unvisited.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid, GridError> {
        let (RowsCount(rows_count), ColumnsCount(columns_count)) = (rows, columns);
        if rows_count == 0 || columns_count == 0 {
            return Err(GridError::ZeroDimension {
                rows: rows_count,
                columns: columns_count,
            });
        }

        let cells_count = rows_count.checked_mul(columns_count)
            .filter(|&count| count <= u32::MAX as usize)
            .ok_or(GridError::TooLarge {
                rows: rows_count,
                columns: columns_count,
            })?;

        let mut grid = Grid {
            rows,
            columns,
            cells: Vec::with_capacity(cells_count),
        };
        grid.prepare_grid(cells_count);
        grid.configure_cells();
        Ok(grid)
    }

    fn prepare_grid(&mut self, cells_count: usize) {
        let columns = self.columns;
        self.cells.extend((0..cells_count)
            .map(|index| Cell::new(GridCoordinate::from_row_major_index(index, columns))));
    }

    fn configure_cells(&mut self) {
        let (rows, columns) = (self.rows, self.columns);
        for cell in &mut self.cells {
            let coord = cell.coordinate();
            for &dir in CompassPrimary::ALL.iter() {
                cell.set_neighbour(dir, offset_coordinate(coord, dir, rows, columns));
            }
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Every cell, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cells one row at a time, northernmost row first.
    #[inline]
    pub fn cell_rows(&self) -> slice::Chunks<Cell> {
        self.cells.chunks(self.columns.0)
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// Number of passages in the maze, a bidirectional link counting once.
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> GridCoordinate {
        let index = rng.gen_range(0..self.size());
        GridCoordinate::from_row_major_index(index, self.columns)
    }

    /// Link two neighbouring cells, and link back from `b` to `a` if `bidirectional`.
    ///
    /// Linking already linked cells changes nothing.
    pub fn link(&mut self,
                a: GridCoordinate,
                b: GridCoordinate,
                bidirectional: bool)
                -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }

        match (self.grid_coordinate_to_index(a), self.grid_coordinate_to_index(b)) {
            (Some(a_index), Some(b_index)) => {
                if !self.cells[a_index].is_neighbour(b) {
                    return Err(CellLinkError::NotNeighbour);
                }
                let _ = self.cells[a_index].insert_link(b);
                if bidirectional {
                    let _ = self.cells[b_index].insert_link(a);
                }
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Remove the link from `a` to `b`, and from `b` to `a` if `bidirectional`.
    /// Returns true if any link was removed.
    pub fn unlink(&mut self, a: GridCoordinate, b: GridCoordinate, bidirectional: bool) -> bool {
        match (self.grid_coordinate_to_index(a), self.grid_coordinate_to_index(b)) {
            (Some(a_index), Some(b_index)) => {
                let removed_forward = self.cells[a_index].remove_link(b);
                let removed_back = bidirectional && self.cells[b_index].remove_link(a);
                removed_forward || removed_back
            }
            _ => false,
        }
    }

    /// Is there a passage from `a` to `b`? False for any coordinate outside the grid.
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        self.cell(a).map_or(false, |cell| cell.is_linked(b))
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.cell(coord)
            .map_or(false, |cell| cell.is_linked(cell.neighbour(direction)))
    }

    /// Cells linked to `coord` by a passage, `None` if the coordinate is not in the grid.
    pub fn links(&self, coord: GridCoordinate) -> Option<&[GridCoordinate]> {
        self.cell(coord).map(Cell::links)
    }

    /// Cells to the North, South, East or West of `coord`, linked or not.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.cell(coord)
            .map(|cell| {
                CompassPrimary::ALL.iter()
                    .filter_map(|&dir| cell.neighbour(dir))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: GridCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|direction| self.neighbour_at_direction(coord, *direction))
            .collect()
    }

    #[inline]
    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        self.cell(coord).and_then(|cell| cell.neighbour(direction))
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.column as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.rows, self.columns)
    }

    #[inline]
    pub fn iter_row(&self) -> RowBatchIter {
        RowBatchIter::new(self.rows, self.columns)
    }

    /// Every passage once as a `(from, to)` pair. A bidirectional link is reported from the
    /// smaller coordinate, a one way link from the cell that holds it.
    pub fn iter_links(&self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + '_ {
        self.cells.iter().flat_map(move |cell| {
            let from = cell.coordinate();
            cell.links()
                .iter()
                .cloned()
                .filter(move |&to| from < to || !self.is_linked(to, from))
                .map(move |to| (from, to))
        })
    }

    /// Copy a distance map into the cells' scratch distances. Cells the map has no finite
    /// distance for are reset to `UNVISITED_DISTANCE`.
    pub fn record_distances<MaxDistanceT: MaxDistance>(&mut self,
                                                       distances: &Distances<MaxDistanceT>) {
        for cell in &mut self.cells {
            let distance = distances.distance_from_start_to(cell.coordinate())
                .and_then(|d| d.to_u32())
                .unwrap_or(UNVISITED_DISTANCE);
            cell.set_distance(distance);
        }
    }

    /// A perfect maze is a spanning tree over the grid: every cell reachable from every other
    /// and exactly one route between any two cells.
    pub fn is_perfect_maze(&self) -> bool {
        if self.links_count() != self.size() - 1 {
            return false;
        }

        let mut visited = BitSet::with_capacity(self.size());
        let mut frontier = vec![0usize];
        let _ = visited.insert(0);
        while let Some(index) = frontier.pop() {
            for &linked in self.cells[index].links() {
                if let Some(linked_index) = self.grid_coordinate_to_index(linked) {
                    if visited.insert(linked_index) {
                        frontier.push(linked_index);
                    }
                }
            }
        }
        visited.len() == self.size()
    }
}

fn offset_coordinate(coord: GridCoordinate,
                     direction: CompassPrimary,
                     rows: RowsCount,
                     columns: ColumnsCount)
                     -> Option<GridCoordinate> {
    let GridCoordinate { row, column } = coord;
    match direction {
        CompassPrimary::North => row.checked_sub(1).map(|r| GridCoordinate::new(r, column)),
        CompassPrimary::South => {
            if (row as usize) + 1 < rows.0 {
                Some(GridCoordinate::new(row + 1, column))
            } else {
                None
            }
        }
        CompassPrimary::East => {
            if (column as usize) + 1 < columns.0 {
                Some(GridCoordinate::new(row, column + 1))
            } else {
                None
            }
        }
        CompassPrimary::West => column.checked_sub(1).map(|c| GridCoordinate::new(row, c)),
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::cells::CompassPrimary::{East, North, South, West};

    fn small_grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("valid grid dimensions")
    }

    fn gc(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate::new(row, column)
    }

    // Compare a smallvec to e.g. a vec! or &[T].
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(Grid::new(RowsCount(0), ColumnsCount(4)).unwrap_err(),
                   GridError::ZeroDimension { rows: 0, columns: 4 });
        assert_eq!(Grid::new(RowsCount(4), ColumnsCount(0)).unwrap_err(),
                   GridError::ZeroDimension { rows: 4, columns: 0 });
    }

    #[test]
    fn oversized_grid_rejected() {
        let huge = u32::MAX as usize;
        assert_eq!(Grid::new(RowsCount(huge), ColumnsCount(2)).unwrap_err(),
                   GridError::TooLarge { rows: huge, columns: 2 });
    }

    #[test]
    fn grid_size() {
        let g = small_grid(10, 10);
        assert_eq!(g.size(), 100);
        assert_eq!(g.rows(), RowsCount(10));
        assert_eq!(g.columns(), ColumnsCount(10));

        let single = small_grid(1, 1);
        assert_eq!(single.size(), 1);
        assert!(single.neighbours(gc(0, 0)).is_empty());
    }

    #[test]
    fn cells_start_unvisited() {
        let g = small_grid(3, 2);
        assert!(g.cells().iter().all(|cell| cell.distance() == UNVISITED_DISTANCE));
        assert!(g.cells().iter().all(|cell| cell.links().is_empty()));
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[GridCoordinate]| {
            let neighbours = g.neighbours(coord).iter().cloned().sorted().collect::<Vec<_>>();
            let expected = expected_neighbours.iter().cloned().sorted().collect::<Vec<_>>();
            assert_eq!(neighbours, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(0, 1), gc(1, 0)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(8, 9), gc(9, 8)]);

        // side element examples
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(1, 1), gc(0, 2)]);
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(2, 0), gc(1, 1)]);
        check_expected_neighbours(gc(8, 9), &[gc(7, 9), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);

        // Off the grid
        check_expected_neighbours(gc(10, 10), &[]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small_grid(2, 2);
        let check_neighbour = |coord, dir: CompassPrimary, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), North, None);
        check_neighbour(gc(0, 0), South, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), East, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), West, None);

        check_neighbour(gc(1, 1), North, Some(gc(0, 1)));
        check_neighbour(gc(1, 1), South, None);
        check_neighbour(gc(1, 1), East, None);
        check_neighbour(gc(1, 1), West, Some(gc(1, 0)));
    }

    #[test]
    fn neighbours_at_dirs() {
        let g = small_grid(2, 2);
        let check_neighbours =
            |coord, dirs: &[CompassPrimary], neighbour_opts: &[Option<GridCoordinate>]| {
                assert_smallvec_eq!(g.neighbours_at_directions(coord, dirs), neighbour_opts);
            };
        check_neighbours(gc(0, 0), &[], &[]);
        check_neighbours(gc(0, 0), &[North, West], &[None, None]);
        check_neighbours(gc(0, 0), &[East, South], &[Some(gc(0, 1)), Some(gc(1, 0))]);
        check_neighbours(gc(1, 1), &[South, East], &[None, None]);
        check_neighbours(gc(1, 1), &[West, North], &[Some(gc(1, 0)), Some(gc(0, 1))]);
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = small_grid(3, 3);
        let indices = g.iter()
            .map(|coord| g.grid_coordinate_to_index(coord))
            .collect::<Vec<Option<usize>>>();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn cell_rows_match_coordinates() {
        let g = small_grid(3, 4);
        assert_eq!(g.cell_rows().len(), 3);
        for (row_index, row) in g.cell_rows().enumerate() {
            assert_eq!(row.len(), 4);
            for (column_index, cell) in row.iter().enumerate() {
                assert_eq!(cell.coordinate(), gc(row_index as u32, column_index as u32));
            }
        }
    }

    #[test]
    fn random_cell() {
        let g = small_grid(4, 5);
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn linking_cells() {
        let mut g = small_grid(4, 4);
        let a = gc(1, 0);
        let b = gc(2, 0);
        let c = gc(3, 0);

        let links_sorted = |grid: &Grid, coord| -> Vec<GridCoordinate> {
            grid.links(coord).expect("coordinate is invalid").iter().cloned().sorted().collect()
        };

        // Testing that the order of the arguments to `is_linked` does not matter
        macro_rules! bi_check_linked {
            ($x:expr, $y:expr) => (g.is_linked($x, $y) && g.is_linked($y, $x))
        }

        assert!(!bi_check_linked!(a, b));
        assert!(!bi_check_linked!(b, c));
        assert!(links_sorted(&g, a).is_empty());

        g.link(a, b, true).expect("link failed");
        assert!(bi_check_linked!(a, b));
        assert!(g.is_neighbour_linked(a, South));
        assert!(g.is_neighbour_linked(b, North));
        assert!(!g.is_neighbour_linked(b, South));

        g.link(b, c, true).expect("link failed");
        assert!(bi_check_linked!(a, b));
        assert!(bi_check_linked!(b, c));
        assert!(!bi_check_linked!(a, c));
        assert_eq!(links_sorted(&g, a), vec![b]);
        assert_eq!(links_sorted(&g, b), vec![a, c]);
        assert_eq!(links_sorted(&g, c), vec![b]);
        assert_eq!(g.links_count(), 2);

        assert!(g.unlink(a, b, true));
        assert!(!bi_check_linked!(a, b));
        assert!(!g.is_linked(a, b));
        assert!(!g.is_linked(b, a));
        assert!(bi_check_linked!(b, c));
        assert_eq!(links_sorted(&g, b), vec![c]);

        assert!(g.unlink(b, c, true));
        assert!(!g.unlink(b, c, true));
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn one_way_links() {
        let mut g = small_grid(1, 3);
        let (a, b) = (gc(0, 0), gc(0, 1));

        g.link(b, a, false).expect("link failed");
        assert!(g.is_linked(b, a));
        assert!(!g.is_linked(a, b));
        assert_eq!(g.iter_links().collect::<Vec<_>>(), vec![(b, a)]);

        // Completing the link the other way around makes it a single passage
        g.link(a, b, false).expect("link failed");
        assert_eq!(g.iter_links().collect::<Vec<_>>(), vec![(a, b)]);

        assert!(g.unlink(a, b, false));
        assert!(!g.is_linked(a, b));
        assert!(g.is_linked(b, a));
    }

    #[test]
    fn no_self_linked_cycles() {
        let mut g = small_grid(4, 4);
        let a = gc(0, 0);
        assert_eq!(g.link(a, a, true), Err(CellLinkError::SelfLink));
    }

    #[test]
    fn no_links_to_invalid_coordinates() {
        let mut g = small_grid(4, 4);
        let link_result = g.link(gc(0, 0), gc(100, 100), true);
        assert_eq!(link_result, Err(CellLinkError::InvalidGridCoordinate));
        assert!(!g.unlink(gc(0, 0), gc(100, 100), true));
        assert!(!g.is_linked(gc(100, 100), gc(0, 0)));
    }

    #[test]
    fn no_links_between_distant_cells() {
        let mut g = small_grid(4, 4);
        assert_eq!(g.link(gc(0, 0), gc(1, 1), true), Err(CellLinkError::NotNeighbour));
        assert_eq!(g.link(gc(0, 0), gc(0, 2), true), Err(CellLinkError::NotNeighbour));
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn no_parallel_duplicated_linked_cells() {
        let mut g = small_grid(4, 4);
        let a = gc(0, 0);
        let b = gc(0, 1);
        g.link(a, b, true).expect("link failed");
        g.link(a, b, true).expect("link failed");
        g.link(b, a, true).expect("link failed");
        assert_eq!(g.links(a).unwrap(), &[b]);
        assert_eq!(g.links(b).unwrap(), &[a]);
        assert_eq!(g.links_count(), 1);

        let _ = g.unlink(a, b, true);
        assert!(g.links(a).unwrap().is_empty());
        assert!(g.links(b).unwrap().is_empty());
    }

    #[test]
    fn perfect_maze_detection() {
        let mut g = small_grid(2, 2);
        assert!(!g.is_perfect_maze());

        g.link(gc(0, 0), gc(0, 1), true).unwrap();
        g.link(gc(0, 1), gc(1, 1), true).unwrap();
        assert!(!g.is_perfect_maze());

        g.link(gc(1, 1), gc(1, 0), true).unwrap();
        assert!(g.is_perfect_maze());

        // A cycle has too many links
        g.link(gc(1, 0), gc(0, 0), true).unwrap();
        assert!(!g.is_perfect_maze());

        assert!(small_grid(1, 1).is_perfect_maze());
    }

    #[test]
    fn recording_distances_into_cells() {
        let mut g = small_grid(1, 3);
        g.link(gc(0, 0), gc(0, 1), true).unwrap();

        let distances = Distances::<u32>::for_grid(&g, gc(0, 0)).unwrap();
        g.record_distances(&distances);

        let scratch = g.cells().iter().map(|cell| cell.distance()).collect::<Vec<_>>();
        assert_eq!(scratch, vec![0, 1, UNVISITED_DISTANCE]);
    }
}
