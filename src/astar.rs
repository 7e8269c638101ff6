use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, info, warn};

use crate::error::Result;
use crate::grid::Grid;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Straight-line (Euclidean) distance between two cells. This never
/// overestimates the remaining hop count on a unit-cost 4-grid, so the
/// search is admissible and the returned path is hop-optimal.
fn heuristic(a: Point, b: Point) -> f32 {
    let dx = (b.x - a.x) as f32;
    let dy = (b.y - a.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// A* shortest-path engine over a [Grid].
///
/// Carries no state between invocations apart from the configured heuristic
/// weight: the frontier is local to one call and the per-cell bookkeeping
/// lives in the grid's scratch buffer, which is reset on entry.
#[derive(Clone, Debug)]
pub struct PathFinder {
    /// Multiplier applied to the heuristic. The default of 1.0 keeps it
    /// admissible; larger values speed up the search on big grids at the
    /// cost of the optimality guarantee.
    pub heuristic_factor: f32,
}

impl Default for PathFinder {
    fn default() -> PathFinder {
        PathFinder::new()
    }
}

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder {
            heuristic_factor: 1.0,
        }
    }

    /// Computes a minimum-hop path from `start` to `end`, both included.
    ///
    /// `Ok(None)` means the search completed and no route exists (the end is
    /// walled off); it is a regular result, distinct from the `Err` cases
    /// which signal malformed coordinates. Walkability is never mutated;
    /// the grid's search scratch is.
    ///
    /// When both endpoints are walkable, a connected-component lookup
    /// settles unreachable queries without flooding the grid. A cell that
    /// was blocked after construction forms a singleton component, so such
    /// endpoints skip the lookup and run the plain search: leaving an
    /// unwalkable start cell is allowed, while an unwalkable end cell is
    /// simply never entered.
    pub fn find_path(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
    ) -> Result<Option<Vec<Point>>> {
        let start_ix = grid.checked_ix(start.x, start.y)?;
        let end_ix = grid.checked_ix(end.x, end.y)?;
        grid.reset_search_state();

        let endpoints_walkable =
            grid.cells[start_ix].walkable() && grid.cells[end_ix].walkable();
        if endpoints_walkable {
            grid.update_components();
            if !grid.same_component(start_ix, end_ix) {
                info!("{} is not reachable from {}", end, start);
                return Ok(None);
            }
        }

        let mut search = Search::new(self, grid, start_ix, end, end_ix);
        loop {
            match search.step() {
                Advance::Found => return Ok(Some(search.reconstruct())),
                Advance::Exhausted => {
                    if endpoints_walkable {
                        warn!("Reachable goal could not be pathed to, are the components stale?");
                    } else {
                        debug!("Frontier exhausted without reaching {}", end);
                    }
                    return Ok(None);
                }
                Advance::Expanded => {}
            }
        }
    }
}

/// Outcome of popping one frontier entry.
enum Advance {
    Found,
    Exhausted,
    Expanded,
}

/// One in-flight search. Each [step](Search::step) is a single frontier pop,
/// which keeps the loop body expressible as a resumable unit.
struct Search<'a> {
    grid: &'a mut Grid,
    end: Point,
    end_ix: usize,
    frontier: FxIndexSet<usize>,
    heuristic_factor: f32,
}

impl<'a> Search<'a> {
    fn new(
        finder: &PathFinder,
        grid: &'a mut Grid,
        start_ix: usize,
        end: Point,
        end_ix: usize,
    ) -> Search<'a> {
        let mut frontier = FxIndexSet::default();
        frontier.insert(start_ix);
        let start_point = grid.cells[start_ix].point();
        grid.scratch[start_ix].g = 0.0;
        grid.scratch[start_ix].f = heuristic(start_point, end) * finder.heuristic_factor;
        Search {
            grid,
            end,
            end_ix,
            frontier,
            heuristic_factor: finder.heuristic_factor,
        }
    }

    /// Position (within the frontier) of the entry with the lowest f-cost.
    /// Only a strictly lower cost displaces the running minimum, so ties go
    /// to the earliest-inserted entry.
    fn lowest_f(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (pos, &cell_ix) in self.frontier.iter().enumerate() {
            let f = self.grid.scratch[cell_ix].f;
            if best.map_or(true, |(_, best_f)| f < best_f) {
                best = Some((pos, f));
            }
        }
        best.map(|(pos, _)| pos)
    }

    fn step(&mut self) -> Advance {
        let Some(pos) = self.lowest_f() else {
            return Advance::Exhausted;
        };
        let current = *self.frontier.get_index(pos).unwrap();
        if current == self.end_ix {
            return Advance::Found;
        }
        // shift_remove keeps the remaining entries in insertion order,
        // which the tie-break above relies on.
        self.frontier.shift_remove_index(pos);

        let current_g = self.grid.scratch[current].g;
        let neighbours = self.grid.cells[current].neighbours.clone();
        for n_ix in neighbours {
            let cell = &self.grid.cells[n_ix];
            if !cell.walkable() {
                continue;
            }
            let tentative_g = current_g + 1.0;
            if tentative_g < self.grid.scratch[n_ix].g {
                let f = tentative_g + heuristic(cell.point(), self.end) * self.heuristic_factor;
                let node = &mut self.grid.scratch[n_ix];
                node.previous = Some(current);
                node.g = tentative_g;
                node.f = f;
                // A no-op if the neighbour is already on the frontier: its
                // position, and with it the tie-break order, is preserved.
                self.frontier.insert(n_ix);
            }
        }
        Advance::Expanded
    }

    /// Follows the `previous` back-references from the end cell and reverses
    /// the result into start-to-end order.
    fn reconstruct(&self) -> Vec<Point> {
        let mut path: Vec<Point> = itertools::unfold(Some(self.end_ix), |state| {
            state.map(|cell_ix| {
                *state = self.grid.scratch[cell_ix].previous;
                self.grid.cells[cell_ix].point()
            })
        })
        .collect();
        path.reverse();
        path
    }
}
