//! **gridmaze** models a rectangular grid of cells as a graph, carves perfect mazes into it with
//! the binary tree and sidewinder algorithms, and measures shortest path distances across the
//! resulting passages.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod priority_queue;
pub mod renderers;
pub mod units;
pub mod utils;
