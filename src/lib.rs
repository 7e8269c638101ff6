//! # grid_astar
//!
//! The pathfinding core behind an interactive grid: cells with a walkability
//! flag, [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) shortest-path
//! search with a Euclidean heuristic over the uniform-cost 4-connected
//! neighbourhood, and random maze generation. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! The presentation layer (rendering, pointer events) is expected to own a
//! [Grid], toggle walkability with [Grid::set_walkable], and hand the grid to
//! [MazeGenerator] or [PathFinder] on demand; nothing here calls back out.
mod astar;
mod error;
mod grid;
mod maze;

pub use astar::PathFinder;
pub use error::{GridError, Result};
pub use grid::{Cell, Grid};
pub use maze::{MazeGenerator, DEFAULT_WALL_PROBABILITY};

pub use grid_util::point::Point;
