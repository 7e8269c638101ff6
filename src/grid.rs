use core::fmt;

use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::{GridError, Result};

/// One grid position. Identity (coordinates, start/end marks) and the
/// walkability flag live here; the per-search cost fields live in the owning
/// [Grid]'s scratch buffer so residue from an earlier search can never leak
/// into the next one.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) point: Point,
    pub(crate) walkable: bool,
    pub(crate) is_start: bool,
    pub(crate) is_end: bool,
    /// In-bounds 4-neighbourhood as flat indices into the owning grid, in
    /// left, right, up, down order.
    pub(crate) neighbours: SmallVec<[usize; 4]>,
}

impl Cell {
    pub fn point(&self) -> Point {
        self.point
    }
    pub fn walkable(&self) -> bool {
        self.walkable
    }
    pub fn is_start(&self) -> bool {
        self.is_start
    }
    pub fn is_end(&self) -> bool {
        self.is_end
    }
}

/// Ephemeral A* bookkeeping for one cell, keyed by the cell's flat index.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScratchNode {
    pub g: f32,
    pub f: f32,
    pub previous: Option<usize>,
}

impl Default for ScratchNode {
    fn default() -> ScratchNode {
        ScratchNode {
            g: f32::INFINITY,
            f: f32::INFINITY,
            previous: None,
        }
    }
}

/// A rectangular field of [Cell]s with derived 4-directional adjacency.
///
/// [Grid] is the sole owner of cell storage; cross-cell links (neighbour
/// lists and the `previous` back-pointers used for path reconstruction) are
/// flat indices into that storage rather than owning pointers. Connected
/// components are maintained with a [UnionFind] structure so a search
/// between separated regions can be answered without flooding the grid.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) cells: Vec<Cell>,
    pub(crate) scratch: Vec<ScratchNode>,
    rows: usize,
    cols: usize,
    start: Point,
    end: Point,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Grid {
    /// Allocates a `rows` x `cols` grid of walkable cells, marks `start` and
    /// `end` (both forced walkable) and computes the neighbour lists.
    pub fn new(rows: usize, cols: usize, start: Point, end: Point) -> Result<Grid> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let mut grid = Grid {
            cells: Vec::with_capacity(rows * cols),
            scratch: vec![ScratchNode::default(); rows * cols],
            rows,
            cols,
            start,
            end,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.checked_ix(start.x, start.y)?;
        grid.checked_ix(end.x, end.y)?;
        for y in 0..rows as i32 {
            for x in 0..cols as i32 {
                let point = Point::new(x, y);
                grid.cells.push(Cell {
                    point,
                    walkable: true,
                    is_start: point == start,
                    is_end: point == end,
                    neighbours: SmallVec::new(),
                });
            }
        }
        for ix in 0..grid.cells.len() {
            grid.cells[ix].neighbours = grid.neighbour_indices(grid.cells[ix].point);
        }
        grid.generate_components();
        Ok(grid)
    }

    fn neighbour_indices(&self, point: Point) -> SmallVec<[usize; 4]> {
        let mut neighbours = SmallVec::new();
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let (nx, ny) = (point.x + dx, point.y + dy);
            if self.in_bounds(nx, ny) {
                neighbours.push(self.ix(nx, ny));
            }
        }
        neighbours
    }

    pub(crate) fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    pub(crate) fn ix(&self, x: i32, y: i32) -> usize {
        y as usize * self.cols + x as usize
    }

    pub(crate) fn checked_ix(&self, x: i32, y: i32) -> Result<usize> {
        if self.in_bounds(x, y) {
            Ok(self.ix(x, y))
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }

    /// Bounds-checked cell lookup.
    pub fn cell_at(&self, x: i32, y: i32) -> Result<&Cell> {
        Ok(&self.cells[self.checked_ix(x, y)?])
    }

    /// Sets the walkability flag of a single cell. The change is visible to
    /// subsequent searches only. Clearing a cell joins the surrounding
    /// components; blocking one marks the components dirty so they are
    /// regenerated lazily before the next reachability query.
    pub fn set_walkable(&mut self, x: i32, y: i32, value: bool) -> Result<()> {
        let ix = self.checked_ix(x, y)?;
        if self.cells[ix].walkable == value {
            return Ok(());
        }
        self.cells[ix].walkable = value;
        if value {
            let neighbours = self.cells[ix].neighbours.clone();
            for n_ix in neighbours {
                if self.cells[n_ix].walkable {
                    self.components.union(ix, n_ix);
                }
            }
        } else {
            self.components_dirty = true;
        }
        Ok(())
    }

    /// Clears g/f/previous on every cell without touching walkability or the
    /// start/end marks. Searches reset their own scratch on entry; this is
    /// for callers that want to drop stale costs eagerly.
    pub fn reset_search_state(&mut self) {
        self.scratch.fill(ScratchNode::default());
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// The designated start position, kept walkable by construction and by
    /// maze generation.
    pub fn start(&self) -> Point {
        self.start
    }
    /// The designated end position, kept walkable by construction and by
    /// maze generation.
    pub fn end(&self) -> Point {
        self.end
    }

    pub(crate) fn same_component(&self, a: usize, b: usize) -> bool {
        self.components.equiv(a, b)
    }

    /// Regenerates the components if they are marked as dirty.
    pub(crate) fn update_components(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable grid
    /// neighbours to the same components.
    pub(crate) fn generate_components(&mut self) {
        info!("Generating connected components");
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            if !self.cells[ix].walkable {
                continue;
            }
            let point = self.cells[ix].point;
            // Right and down suffice: every adjacency is visited once.
            for (dx, dy) in [(1, 0), (0, 1)] {
                let (nx, ny) = (point.x + dx, point.y + dy);
                if self.in_bounds(nx, ny) && self.cells[self.ix(nx, ny)].walkable {
                    self.components.union(ix, self.ix(nx, ny));
                }
            }
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.rows as i32 {
            for x in 0..self.cols as i32 {
                let cell = &self.cells[self.ix(x, y)];
                let glyph = if cell.is_start {
                    'S'
                } else if cell.is_end {
                    'E'
                } else if cell.walkable {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_grid(rows: usize, cols: usize) -> Grid {
        Grid::new(
            rows,
            cols,
            Point::new(0, 0),
            Point::new(cols as i32 - 1, rows as i32 - 1),
        )
        .unwrap()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let err = Grid::new(0, 5, Point::new(0, 0), Point::new(0, 0)).unwrap_err();
        assert_eq!(err, GridError::InvalidDimensions { rows: 0, cols: 5 });
        assert!(Grid::new(5, 0, Point::new(0, 0), Point::new(0, 0)).is_err());
    }

    #[test]
    fn endpoints_outside_grid_are_rejected() {
        let err = Grid::new(3, 3, Point::new(0, 0), Point::new(3, 0)).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { x: 3, y: 0, .. }));
        assert!(Grid::new(3, 3, Point::new(-1, 0), Point::new(2, 2)).is_err());
    }

    #[test]
    fn neighbours_are_ordered_left_right_up_down() {
        let grid = corner_grid(3, 3);
        let centre = grid.cell_at(1, 1).unwrap();
        let points: Vec<Point> = centre
            .neighbours
            .iter()
            .map(|&ix| grid.cells[ix].point)
            .collect();
        assert_eq!(
            points,
            vec![
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(1, 2)
            ]
        );
    }

    #[test]
    fn border_cells_skip_out_of_bounds_neighbours() {
        let grid = corner_grid(3, 3);
        let corner = grid.cell_at(0, 0).unwrap();
        let points: Vec<Point> = corner
            .neighbours
            .iter()
            .map(|&ix| grid.cells[ix].point)
            .collect();
        // Left and up fall outside the grid; right comes before down.
        assert_eq!(points, vec![Point::new(1, 0), Point::new(0, 1)]);
    }

    #[test]
    fn start_and_end_are_marked() {
        let grid = corner_grid(2, 4);
        assert!(grid.cell_at(0, 0).unwrap().is_start());
        assert!(grid.cell_at(3, 1).unwrap().is_end());
        assert!(!grid.cell_at(1, 0).unwrap().is_start());
    }

    #[test]
    fn set_walkable_is_bounds_checked() {
        let mut grid = corner_grid(3, 3);
        assert!(grid.set_walkable(1, 1, false).is_ok());
        assert!(!grid.cell_at(1, 1).unwrap().walkable());
        let err = grid.set_walkable(5, 1, false).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { x: 5, y: 1, .. }));
    }

    /// Tests whether cells are correctly mapped to different connected
    /// components after a wall is drawn and rejoined once it is cleared.
    #[test]
    fn test_component_generation() {
        // Corresponds to the following 3x3 grid:
        //  ___
        // |S#.|
        // |.#.|
        // |.#E|
        //  ___
        let mut grid = corner_grid(3, 3);
        for y in 0..3 {
            grid.set_walkable(1, y, false).unwrap();
        }
        grid.update_components();
        let left = grid.ix(0, 0);
        let right = grid.ix(2, 0);
        assert!(!grid.same_component(left, right));
        assert!(grid.same_component(left, grid.ix(0, 2)));

        // Clearing one wall cell merges the halves without a regeneration.
        grid.set_walkable(1, 1, true).unwrap();
        assert!(grid.same_component(left, right));
    }

    #[test]
    fn reset_clears_costs_and_back_references() {
        let mut grid = corner_grid(2, 2);
        grid.scratch[0].g = 3.0;
        grid.scratch[0].f = 5.0;
        grid.scratch[3].previous = Some(0);
        grid.reset_search_state();
        assert!(grid.scratch[0].g.is_infinite());
        assert!(grid.scratch[0].f.is_infinite());
        assert_eq!(grid.scratch[3].previous, None);
    }

    #[test]
    fn display_renders_walls_and_endpoints() {
        let mut grid = corner_grid(2, 3);
        grid.set_walkable(1, 0, false).unwrap();
        assert_eq!(format!("{}", grid), "S#.\n..E\n");
    }
}
