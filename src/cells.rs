use smallvec::SmallVec;
use std::fmt;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex};

/// Scratch distance of a cell that no pathing result has been recorded for.
pub const UNVISITED_DISTANCE: u32 = u32::MAX;

/// Identity of a cell within its grid: `row` counts down from the northern edge, `column`
/// counts east from the western edge.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub column: u32,
}

impl GridCoordinate {
    pub fn new(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(width) = columns;
        GridCoordinate::new((index / width) as u32, (index % width) as u32)
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> GridCoordinate {
        let (RowIndex(row), ColumnIndex(col)) = (row_index, col_index);
        GridCoordinate::new(row as u32, col as u32)
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_column_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Every direction, in the order linked neighbours are enumerated.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// A single maze position.
///
/// Neighbours are the geometrically adjacent cells, fixed when the owning `Grid` is built.
/// Links are the subset of neighbours with an open passage to them. Both refer to other cells
/// by coordinate only, the `Grid` owns every cell.
#[derive(Clone, Debug)]
pub struct Cell {
    coord: GridCoordinate,
    distance: u32,
    north: Option<GridCoordinate>,
    south: Option<GridCoordinate>,
    east: Option<GridCoordinate>,
    west: Option<GridCoordinate>,
    links: CoordinateSmallVec,
}

impl Cell {
    pub(crate) fn new(coord: GridCoordinate) -> Cell {
        Cell {
            coord,
            distance: UNVISITED_DISTANCE,
            north: None,
            south: None,
            east: None,
            west: None,
            links: CoordinateSmallVec::new(),
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coord
    }

    #[inline]
    pub fn row(&self) -> u32 {
        self.coord.row
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.coord.column
    }

    /// The scratch distance last recorded on this cell, `UNVISITED_DISTANCE` if none.
    #[inline]
    pub fn distance(&self) -> u32 {
        self.distance
    }

    #[inline]
    pub(crate) fn set_distance(&mut self, distance: u32) {
        self.distance = distance;
    }

    /// The adjacent cell in the given direction, `None` at the grid boundary.
    #[inline]
    pub fn neighbour(&self, direction: CompassPrimary) -> Option<GridCoordinate> {
        match direction {
            CompassPrimary::North => self.north,
            CompassPrimary::South => self.south,
            CompassPrimary::East => self.east,
            CompassPrimary::West => self.west,
        }
    }

    pub(crate) fn set_neighbour(&mut self,
                                direction: CompassPrimary,
                                neighbour: Option<GridCoordinate>) {
        let slot = match direction {
            CompassPrimary::North => &mut self.north,
            CompassPrimary::South => &mut self.south,
            CompassPrimary::East => &mut self.east,
            CompassPrimary::West => &mut self.west,
        };
        *slot = neighbour;
    }

    #[inline]
    pub fn north(&self) -> Option<GridCoordinate> {
        self.north
    }

    #[inline]
    pub fn south(&self) -> Option<GridCoordinate> {
        self.south
    }

    #[inline]
    pub fn east(&self) -> Option<GridCoordinate> {
        self.east
    }

    #[inline]
    pub fn west(&self) -> Option<GridCoordinate> {
        self.west
    }

    pub fn is_neighbour(&self, other: GridCoordinate) -> bool {
        CompassPrimary::ALL.iter().any(|&dir| self.neighbour(dir) == Some(other))
    }

    /// Every cell this cell has a passage to, in the order the links were made.
    #[inline]
    pub fn links(&self) -> &[GridCoordinate] {
        &self.links
    }

    /// Is there a passage from this cell to `other`?
    ///
    /// Accepts an optional coordinate so boundary neighbours can be queried directly,
    /// e.g. `cell.is_linked(cell.east())`. An absent neighbour is never linked.
    pub fn is_linked<C>(&self, other: C) -> bool
        where C: Into<Option<GridCoordinate>>
    {
        match other.into() {
            Some(coord) => self.links.contains(&coord),
            None => false,
        }
    }

    /// Linked neighbours, always enumerated North, South, East then West.
    pub fn neighbours(&self) -> CoordinateSmallVec {
        CompassPrimary::ALL.iter()
            .filter_map(|&dir| self.neighbour(dir))
            .filter(|&coord| self.is_linked(coord))
            .collect()
    }

    /// Adds `other` to the link set. Returns false if it was already present.
    pub(crate) fn insert_link(&mut self, other: GridCoordinate) -> bool {
        if self.links.contains(&other) {
            false
        } else {
            self.links.push(other);
            true
        }
    }

    /// Removes `other` from the link set. Returns false if it was not present.
    pub(crate) fn remove_link(&mut self, other: GridCoordinate) -> bool {
        if let Some(position) = self.links.iter().position(|&coord| coord == other) {
            let _ = self.links.remove(position);
            true
        } else {
            false
        }
    }
}
