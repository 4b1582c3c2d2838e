//! Error types for the planner.

use crate::Point;
use thiserror::Error;

/// Errors reported by [`DStarLite`](crate::DStarLite).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanningError {
    /// The requested heuristic is not in the table.
    ///
    /// See [`Heuristic::from_name`](crate::Heuristic::from_name) for the known names.
    #[error("unknown heuristic {0:?}")]
    UnknownHeuristic(String),

    /// A cell lies outside the Grid. Reported for start, goal and blocked
    /// cells at construction, and for toggle batches during planning.
    #[error("cell {cell:?} lies outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending cell.
        cell: Point,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// No unblocked route connects the given cell to the goal.
    #[error("no route from {0:?} to the goal")]
    Unreachable(Point),
}

/// Shorthand for results with a [`PlanningError`].
pub type Result<T> = std::result::Result<T, PlanningError>;
