//! The incremental re-planner.

use crate::{
    error::{PlanningError, Result},
    frontier::Frontier,
    grid::StateGrid,
    neighbors::{Dir, Heuristic},
    path::Path,
    state::{Key, INFINITY},
    Cost, Point, PointSet,
};

use log::{debug, trace};
use std::time::{Duration, Instant};

/// Cost of a single move. The Grid is uniform: every one of the 8 directions
/// costs the same, and blocked cells are never entered at all.
const EDGE_COST: Cost = 1;

/// Diagnostic counters for the convergence loop.
///
/// These are observational only; they never influence the search.
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    /// Largest number of queued cells observed.
    pub max_frontier: usize,
    /// Every cell the convergence loop has processed, stale pops included.
    pub expansions: PointSet,
    /// Accumulated wall-clock time spent converging.
    pub run_time: Duration,
}

/// An incremental shortest-path planner over a 2-D Grid (D* Lite).
///
/// The planner computes an initial route from `start` to `goal` and then
/// repairs it cheaply as the agent moves and obstacles toggle, instead of
/// searching from scratch after every change. Costs propagate backwards from
/// the goal, so the cells around the agent are exactly the ones that stay
/// accurate across re-planning.
///
/// ## Examples
/// A one-shot plan:
/// ```
/// use incremental_pathfinding::DStarLite;
///
/// let blocked = [(2, 2)];
/// let mut planner = DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &blocked).unwrap();
///
/// let path = planner.initial_plan().unwrap();
/// assert_eq!(path.cost(), 5); // the straight diagonal is cut by (2, 2)
/// ```
/// Walking to the goal while the map changes underneath the agent:
/// ```
/// use incremental_pathfinding::DStarLite;
///
/// let mut planner = DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &[]).unwrap();
///
/// // one batch of obstacle toggles, applied after the first step
/// let changes = vec![vec![(2, 2)]];
///
/// let mut visited = Vec::new();
/// planner
///     .plan(&changes, |cell| visited.push(cell), |_path| {})
///     .unwrap();
///
/// assert_eq!(*visited.last().unwrap(), (4, 4));
/// assert!(!visited.contains(&(2, 2)));
/// ```
#[derive(Clone, Debug)]
pub struct DStarLite {
    grid: StateGrid,
    start: Point,
    goal: Point,
    heuristic: Heuristic,
    /// Drift correction added to every Key. Grows by the heuristic distance
    /// the agent has moved since the last batch; never decreases.
    km: Cost,
    frontier: Frontier,
    stats: SearchStats,
}

impl DStarLite {
    /// Creates a planner for a `width x height` Grid.
    ///
    /// `heuristic` selects from the table by name (see
    /// [`Heuristic::from_name`]); for the 8-direction uniform-cost Grid,
    /// `"chebyshev"` is the one that guarantees optimal routes.
    ///
    /// Fails with [`PlanningError::UnknownHeuristic`] for a name not in the
    /// table and [`PlanningError::OutOfBounds`] if `start`, `goal` or any
    /// blocked cell lies outside the Grid.
    pub fn new(
        (width, height): (usize, usize),
        start: Point,
        goal: Point,
        heuristic: &str,
        blocked: &[Point],
    ) -> Result<DStarLite> {
        let heuristic = Heuristic::from_name(heuristic)
            .ok_or_else(|| PlanningError::UnknownHeuristic(heuristic.to_string()))?;

        let mut grid = StateGrid::new(width, height);
        for &cell in [start, goal].iter().chain(blocked) {
            if !grid.contains(cell) {
                return Err(PlanningError::OutOfBounds {
                    cell,
                    width,
                    height,
                });
            }
        }
        for &cell in blocked {
            grid.at_mut(cell).blocked = true;
        }
        // h estimates distance back to the search origin; km keeps the
        // estimates comparable once the agent has moved away from it.
        grid.each_cell(|p, state| state.h = heuristic.estimate(p, start));

        Ok(DStarLite {
            grid,
            start,
            goal,
            heuristic,
            km: 0,
            frontier: Frontier::default(),
            stats: SearchStats::default(),
        })
    }

    /// The cell the agent starts from.
    pub fn start(&self) -> Point {
        self.start
    }

    /// The cell the search converges toward.
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Current drift correction applied to frontier Keys. Monotonic.
    pub fn km(&self) -> Cost {
        self.km
    }

    /// Whether `cell` is currently flagged as blocked.
    pub fn is_blocked(&self, cell: Point) -> bool {
        self.grid.contains(cell) && self.grid.at(cell).blocked
    }

    /// Diagnostic counters accumulated so far.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Computes the route from `start` to `goal` against the current obstacle
    /// configuration.
    ///
    /// Resets the frontier and the drift offset, converges, and extracts the
    /// move sequence. [`PlanningError::Unreachable`] if no route exists.
    pub fn initial_plan(&mut self) -> Result<Path<Dir>> {
        self.initialize();
        self.compute_shortest_path();
        self.build_path(self.start, self.goal)
    }

    /// Drives the full incremental loop until the agent reaches the goal.
    ///
    /// Each iteration moves the agent one step (reported through `move_to`),
    /// applies the next batch of obstacle toggles from `changes` if one is
    /// left, re-converges, and hands the freshly extracted remaining route to
    /// `on_path_built`. Batches are consumed one per step; steps beyond the
    /// last batch just follow the converged costs.
    ///
    /// Both callbacks are invoked synchronously and must not call back into
    /// the planner.
    ///
    /// Fails with [`PlanningError::Unreachable`] as soon as the goal cannot be
    /// reached — initially, or because a batch walled it off — and with
    /// [`PlanningError::OutOfBounds`] for toggle cells outside the Grid.
    pub fn plan(
        &mut self,
        changes: &[Vec<Point>],
        mut move_to: impl FnMut(Point),
        mut on_path_built: impl FnMut(&Path<Dir>),
    ) -> Result<()> {
        self.initial_plan()?;

        let mut last = self.start;
        let mut current = self.start;
        let mut batches = changes.iter();

        while current != self.goal {
            current = self.next_step(current)?;
            move_to(current);

            if let Some(batch) = batches.next() {
                self.km = self
                    .km
                    .saturating_add(self.heuristic.estimate(last, current));
                last = current;
                self.apply_batch(batch)?;
                self.compute_shortest_path();
            }

            let path = self.build_path(current, self.goal)?;
            on_path_built(&path);
        }
        Ok(())
    }

    /// The next physical move: the unblocked neighbor minimizing `g + cost`,
    /// first in direction order on ties.
    fn next_step(&self, current: Point) -> Result<Point> {
        let next = self
            .neighbors(current)
            .filter(|&n| !self.grid.at(n).blocked)
            .min_by_key(|&n| self.grid.at(n).g.saturating_add(EDGE_COST))
            .ok_or(PlanningError::Unreachable(current))?;
        if self.grid.at(next).g == INFINITY {
            return Err(PlanningError::Unreachable(current));
        }
        Ok(next)
    }

    /// Flips the blocked flag of every cell in `batch` and propagates the
    /// edge-cost changes to the affected vertices.
    fn apply_batch(&mut self, batch: &[Point]) -> Result<()> {
        for &cell in batch {
            if !self.grid.contains(cell) {
                return Err(PlanningError::OutOfBounds {
                    cell,
                    width: self.grid.width(),
                    height: self.grid.height(),
                });
            }
            let blocked = !self.grid.at(cell).blocked;
            self.grid.at_mut(cell).blocked = blocked;
            if blocked {
                // A blocked cell's cost is infinite by definition; it is
                // consistent at infinity and leaves the frontier.
                let state = self.grid.at_mut(cell);
                state.g = INFINITY;
                state.rhs = INFINITY;
                self.frontier.remove(cell);
            } else {
                self.update_vertex(cell);
            }
            self.update_neighbors(cell);
        }
        Ok(())
    }

    /// Resets the search: empty frontier, zero drift, goal queued at `rhs = 0`.
    fn initialize(&mut self) {
        self.frontier.clear();
        self.km = 0;
        self.grid.at_mut(self.goal).rhs = 0;
        let key = self.key(self.goal);
        self.frontier.insert(self.goal, key);
    }

    /// Recomputes `rhs` from the neighbors and re-queues the cell iff it is
    /// inconsistent. The goal's `rhs` stays pinned at 0.
    fn update_vertex(&mut self, cell: Point) {
        if cell != self.goal {
            let mut min = INFINITY;
            for n in self.neighbors(cell) {
                let state = self.grid.at(n);
                if state.blocked {
                    continue;
                }
                min = min.min(state.g.saturating_add(EDGE_COST));
            }
            self.grid.at_mut(cell).rhs = min;
        }
        self.frontier.remove(cell);
        let state = self.grid.at(cell);
        if !state.is_consistent() {
            let key = Key::new(state, self.km);
            self.frontier.insert(cell, key);
        }
    }

    fn update_neighbors(&mut self, cell: Point) {
        for n in self.neighbors(cell) {
            if !self.grid.at(n).blocked {
                self.update_vertex(n);
            }
        }
    }

    /// Drains and repairs the frontier until the start cell is consistent and
    /// dominates the frontier minimum.
    fn compute_shortest_path(&mut self) {
        let timer = Instant::now();
        while let Some(top) = self.frontier.peek_key() {
            let start_state = self.grid.at(self.start);
            if top >= Key::new(start_state, self.km) && start_state.is_consistent() {
                break;
            }

            self.stats.max_frontier = self.stats.max_frontier.max(self.frontier.len());
            let (cell, queued_key) = match self.frontier.pop() {
                Some(entry) => entry,
                None => break,
            };
            self.stats.expansions.insert(cell);

            let current_key = self.key(cell);
            if queued_key < current_key {
                // The queued priority went stale while the cell waited; requeue
                // under the authoritative Key instead of processing.
                trace!("stale key for {:?}: {:?} < {:?}", cell, queued_key, current_key);
                self.frontier.insert(cell, current_key);
            } else if self.grid.at(cell).g > self.grid.at(cell).rhs {
                // Overconsistent: the lookahead found a better route. `g` is
                // final for this cell; let the neighbors catch up.
                let rhs = self.grid.at(cell).rhs;
                self.grid.at_mut(cell).g = rhs;
                self.update_neighbors(cell);
            } else {
                // Underconsistent: a cost increase invalidated the cell.
                // Detach it and propagate the invalidation outward.
                self.grid.at_mut(cell).g = INFINITY;
                self.update_vertex(cell);
                self.update_neighbors(cell);
            }
        }
        self.stats.run_time += timer.elapsed();
        debug!(
            "converged: {} cells queued, {} expanded, {:?} accumulated",
            self.frontier.len(),
            self.stats.expansions.len(),
            self.stats.run_time,
        );
    }

    /// Extracts the move sequence from `from` to `to` by gradient descent over
    /// the converged costs.
    ///
    /// Requires a quiescent cost field. Each move steps to the first neighbor
    /// in direction order whose `g` accounts exactly for one edge, so with a
    /// finite starting cost the walk shortens `g` every step and must reach
    /// `to`; an infinite cost or a missing descent neighbor means there is no
    /// route.
    fn build_path(&self, from: Point, to: Point) -> Result<Path<Dir>> {
        let total = self.grid.at(from).g;
        if total == INFINITY {
            return Err(PlanningError::Unreachable(from));
        }

        let mut moves = Vec::new();
        let mut current = from;
        while current != to {
            let here = self.grid.at(current).g;
            let step = Dir::all()
                .filter_map(|dir| self.apply(dir, current).map(|n| (dir, n)))
                .find(|&(_, n)| {
                    let state = self.grid.at(n);
                    !state.blocked && state.g.saturating_add(EDGE_COST) == here
                });
            match step {
                Some((dir, next)) => {
                    moves.push(dir);
                    current = next;
                }
                None => return Err(PlanningError::Unreachable(current)),
            }
        }
        Ok(Path::new(moves, total))
    }

    fn key(&self, cell: Point) -> Key {
        Key::new(self.grid.at(cell), self.km)
    }

    fn apply(&self, dir: Dir, cell: Point) -> Option<Point> {
        dir.apply(cell, self.grid.width(), self.grid.height())
    }

    /// In-bounds neighbors of `cell`, blocked or not, in direction order.
    fn neighbors(&self, cell: Point) -> impl Iterator<Item = Point> {
        let (width, height) = (self.grid.width(), self.grid.height());
        Dir::all().filter_map(move |dir| dir.apply(cell, width, height))
    }
}
