#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! A crate to incrementally re-plan shortest Paths on a Grid.
//!
//! ## Introduction
//! Re-running A* from scratch every time an agent takes a step or a Tile
//! changes is wasteful: almost all of the search is identical to the previous
//! one. This crate implements D* Lite, an incremental algorithm that searches
//! backwards from the goal and keeps its cost field alive between queries.
//! After the agent moves or obstacles appear and disappear, only the cells
//! whose costs actually changed are re-examined, and the repaired field yields
//! the new route by plain gradient descent.
//!
//! Two mechanisms make that possible:
//! - every cell tracks both its settled cost (`g`) and a one-step lookahead
//!   recomputed from its neighbors (`rhs`); cells where the two disagree form
//!   the work list, ordered by a two-part Key
//! - a cumulative drift offset (`km`) is folded into freshly computed Keys, so
//!   the Keys of cells queued before the agent moved stay comparable without
//!   re-sorting the whole work list
//!
//! Movement is 8-directional with uniform cost. For that model the
//! `"chebyshev"` heuristic is admissible and consistent, which is what the
//! optimality guarantee requires; see [`Heuristic`] for the full table.
//!
//! ## Examples
//! Planning once:
//! ```
//! use incremental_pathfinding::prelude::*;
//!
//! // x = blocked
//! //   0 1 2 3 4
//! // 0 S . . . .
//! // 1 . . . . .
//! // 2 . . x . .
//! // 3 . . . . .
//! // 4 . . . . G
//! let mut planner = DStarLite::new(
//!     (5, 5),        // Grid size
//!     (0, 0),        // start
//!     (4, 4),        // goal
//!     "chebyshev",   // heuristic, by name
//!     &[(2, 2)],     // initially blocked cells
//! ).unwrap();
//!
//! let path = planner.initial_plan().unwrap();
//! assert_eq!(path.cost(), 5);
//! ```
//! Re-planning while walking: `plan` moves the agent one step at a time,
//! applies one batch of obstacle toggles per step, and reports each step and
//! each re-extracted remaining route through callbacks:
//! ```
//! use incremental_pathfinding::prelude::*;
//!
//! let mut planner = DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &[]).unwrap();
//!
//! // after the first step, (2, 2) becomes blocked
//! let changes = vec![vec![(2, 2)]];
//!
//! let mut route_costs = Vec::new();
//! planner.plan(
//!     &changes,
//!     |cell| assert_ne!(cell, (2, 2)),
//!     |path| route_costs.push(path.cost()),
//! ).unwrap();
//!
//! // the detour made the remaining route longer than the straight diagonal
//! assert_eq!(route_costs[0], 4);
//! ```
//! An unreachable goal is reported instead of looping:
//! ```
//! use incremental_pathfinding::prelude::*;
//!
//! let walled_in = [(3, 3), (3, 4), (4, 3)];
//! let mut planner = DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &walled_in).unwrap();
//!
//! assert!(matches!(planner.initial_plan(), Err(PlanningError::Unreachable(_))));
//! ```

/// A position on the Grid.
pub type Point = (usize, usize);

/// The cost of a Path or of reaching a cell.
pub type Cost = usize;

pub(crate) type PointMap<V> = hashbrown::HashMap<Point, V>;

/// A set of Grid points, as gathered by the expansion statistics.
pub type PointSet = hashbrown::HashSet<Point>;

mod frontier;
mod grid;
mod state;

mod error;
pub use self::error::{PlanningError, Result};

mod neighbors;
pub use self::neighbors::{Dir, Heuristic};

mod path;
pub use self::path::Path;

mod planner;
pub use self::planner::{DStarLite, SearchStats};

/// The most common imports.
pub mod prelude {
    pub use crate::{DStarLite, Dir, Heuristic, Path, PlanningError};
}
