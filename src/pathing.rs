// Dijkstra's Algorithm over the linked subgraph of a grid.
//
// Every passage costs one step. Cells are settled in (distance, row-major index) order and a
// predecessor is only replaced by a strictly shorter route.

use log::debug;
use num::traits::{Bounded, CheckedAdd, One, ToPrimitive, Unsigned, Zero};
use smallvec::SmallVec;
use std::fmt::Debug;
use thiserror::Error;

use crate::cells::GridCoordinate;
use crate::grid::Grid;
use crate::priority_queue::IndexedMinHeap;
use crate::utils;
use crate::utils::FnvHashMap;

// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this out each time
// Note generic parameter type aliases are not in the language.
// `type X = Y;` only works with concrete types.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + CheckedAdd + ToPrimitive + Debug + Clone + Copy + Ord
    {
}
impl<T> MaxDistance for T
    where T: Zero + One + Bounded + Unsigned + CheckedAdd + ToPrimitive + Debug + Clone + Copy + Ord
{
}

#[derive(Error, Eq, PartialEq, Copy, Clone, Debug)]
pub enum PathingError {
    #[error("start coordinate {0} is not part of the grid")]
    InvalidStartCoordinate(GridCoordinate),
}

/// Single source shortest path data for one grid.
///
/// Every cell of the grid has a distance entry, unreachable cells hold the infinity sentinel
/// (`MaxDistanceT::max_value()`) and have no predecessor.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, MaxDistanceT>,
    previous: FnvHashMap<GridCoordinate, GridCoordinate>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    /// Run Dijkstra from `start_coordinate` following only linked passages.
    pub fn for_grid(grid: &Grid,
                    start_coordinate: GridCoordinate)
                    -> Result<Distances<MaxDistanceT>, PathingError> {

        let start_index = grid.grid_coordinate_to_index(start_coordinate)
            .ok_or(PathingError::InvalidStartCoordinate(start_coordinate))?;

        let infinity = Self::infinity();
        let cells_count = grid.size();
        let mut distances = utils::fnv_hashmap(cells_count);
        let mut previous = utils::fnv_hashmap(cells_count);
        let mut unvisited: IndexedMinHeap<MaxDistanceT> =
            IndexedMinHeap::with_capacity(cells_count);

        distances.insert(start_coordinate, Zero::zero());
        let _ = unvisited.push(start_index, Zero::zero());
        for (index, cell) in grid.cells().iter().enumerate() {
            if index != start_index {
                distances.insert(cell.coordinate(), infinity);
                let _ = unvisited.push(index, infinity);
            }
        }

        let mut max = Zero::zero();
        while let Some((cell_index, distance_to_cell)) = unvisited.pop() {

            // Everything still queued is at infinity too, none of it is reachable.
            if distance_to_cell == infinity {
                break;
            }
            if distance_to_cell > max {
                max = distance_to_cell;
            }

            // A distance of max_value() would be indistinguishable from infinity.
            let candidate = match distance_to_cell.checked_add(&One::one()) {
                Some(d) if d != infinity => d,
                _ => continue,
            };

            let cell = &grid.cells()[cell_index];
            for linked_coord in cell.neighbours().iter() {
                let linked_index = match grid.grid_coordinate_to_index(*linked_coord) {
                    Some(index) => index,
                    None => continue,
                };

                let recorded = distances.get(linked_coord).cloned().unwrap_or(infinity);
                if candidate < recorded {
                    distances.insert(*linked_coord, candidate);
                    previous.insert(*linked_coord, cell.coordinate());
                    let _ = unvisited.decrease_key(linked_index, candidate);
                }
            }
        }

        debug!("distances from {}: {} of {} cells reached, max distance {:?}",
               start_coordinate,
               previous.len() + 1,
               cells_count,
               max);

        Ok(Distances {
            start_coordinate,
            distances,
            previous,
            max_distance: max,
        })
    }

    /// The sentinel distance of a cell that cannot be reached from the start.
    #[inline(always)]
    pub fn infinity() -> MaxDistanceT {
        Bounded::max_value()
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    /// The largest finite distance from the start.
    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// The recorded distance, `infinity()` for unreachable cells, `None` only if the
    /// coordinate was not part of the grid.
    #[inline]
    pub fn distance(&self, coord: GridCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// The distance from the start if `coord` can be reached at all.
    #[inline]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<MaxDistanceT> {
        self.distance(coord).filter(|&d| d != Self::infinity())
    }

    #[inline]
    pub fn is_reachable(&self, coord: GridCoordinate) -> bool {
        self.distance_from_start_to(coord).is_some()
    }

    /// The cell `coord` was reached from on a shortest path. None for the start cell and for
    /// unreachable cells.
    #[inline]
    pub fn previous(&self, coord: GridCoordinate) -> Option<GridCoordinate> {
        self.previous.get(&coord).cloned()
    }

    #[inline]
    pub fn distances(&self) -> &FnvHashMap<GridCoordinate, MaxDistanceT> {
        &self.distances
    }

    #[inline]
    pub fn previous_cells(&self) -> &FnvHashMap<GridCoordinate, GridCoordinate> {
        &self.previous
    }

    /// Hand over the distance and predecessor maps.
    pub fn into_maps(self)
                     -> (FnvHashMap<GridCoordinate, MaxDistanceT>,
                         FnvHashMap<GridCoordinate, GridCoordinate>) {
        (self.distances, self.previous)
    }

    /// Every cell at the maximum distance from the start, in row-major order.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[GridCoordinate; 8]>>();
        furthest.sort();
        furthest
    }

    /// The shortest route from the start to `end_point`, both ends included, found by walking the
    /// predecessor chain back from `end_point`.
    pub fn path_to(&self, end_point: GridCoordinate) -> Option<Vec<GridCoordinate>> {
        self.distance_from_start_to(end_point)?;

        let mut path = vec![end_point];
        let mut current_coord = end_point;
        while current_coord != self.start_coordinate {
            current_coord = self.previous(current_coord)?;
            path.push(current_coord);
            if path.len() > self.distances.len() {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}
