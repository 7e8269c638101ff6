use log::info;
use rand::Rng;

use crate::error::{GridError, Result};
use crate::grid::Grid;

/// Wall density used by the interactive "generate maze" action.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.2;

/// Randomly relabels the walkability of a [Grid]'s cells.
///
/// Generic over the random source so interactive use can draw from thread
/// entropy while tests pass a seeded generator.
#[derive(Clone, Debug)]
pub struct MazeGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> MazeGenerator<R> {
    pub fn new(rng: R) -> MazeGenerator<R> {
        MazeGenerator { rng }
    }

    /// Draws once per cell: with probability `wall_probability` the cell
    /// becomes a wall, otherwise it is cleared. The start and end cells are
    /// exempt and stay walkable so the search problem remains well-formed.
    /// Dimensions, the start/end marks and the neighbour lists are untouched,
    /// and exclusive access to the grid means no caller can observe a
    /// half-relabeled state.
    pub fn generate(&mut self, grid: &mut Grid, wall_probability: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&wall_probability) {
            return Err(GridError::InvalidParameter(wall_probability));
        }
        info!(
            "Relabeling {}x{} grid with wall probability {}",
            grid.rows(),
            grid.cols(),
            wall_probability
        );
        for cell in grid.cells.iter_mut() {
            cell.walkable = !self.rng.gen_bool(wall_probability);
        }
        let start_ix = grid.ix(grid.start().x, grid.start().y);
        let end_ix = grid.ix(grid.end().x, grid.end().y);
        grid.cells[start_ix].walkable = true;
        grid.cells[end_ix].walkable = true;
        grid.generate_components();
        Ok(())
    }
}
