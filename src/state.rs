//! Per-cell search state and the frontier ordering Key.

use crate::Cost;

/// The cost assigned to cells with no known route to the goal.
///
/// All cost arithmetic saturates, so adding an edge cost to an unreachable
/// cell stays unreachable.
pub const INFINITY: Cost = Cost::MAX;

/// Search state of a single Grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellState {
    /// Best known cost from this cell to the goal.
    pub g: Cost,
    /// One-step lookahead: the cost recomputed from the neighbors, which `g`
    /// is driven toward.
    pub rhs: Cost,
    /// Heuristic distance to the search origin, seeded once at construction.
    pub h: Cost,
    /// Blocked cells never take part in expansions.
    pub blocked: bool,
}

impl Default for CellState {
    fn default() -> CellState {
        CellState {
            g: INFINITY,
            rhs: INFINITY,
            h: 0,
            blocked: false,
        }
    }
}

impl CellState {
    /// A cell is locally consistent iff `g == rhs`.
    pub fn is_consistent(&self) -> bool {
        self.g == self.rhs
    }
}

/// Frontier priority of a cell.
///
/// Ordered lexicographically: primary component first, the `min(g, rhs)`
/// tie-break second. The primary component carries the `km` drift offset so
/// that keys assigned before an agent move stay comparable to fresh ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key(pub Cost, pub Cost);

impl Key {
    /// Computes the authoritative Key for a cell under the given drift offset.
    pub fn new(state: &CellState, km: Cost) -> Key {
        let k2 = state.g.min(state.rhs);
        Key(k2.saturating_add(state.h).saturating_add(km), k2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_lexicographic() {
        assert!(Key(1, 5) < Key(2, 0));
        assert!(Key(2, 1) < Key(2, 3));
        assert_eq!(Key(4, 2), Key(4, 2));
    }

    #[test]
    fn key_uses_min_of_g_and_rhs() {
        let state = CellState {
            g: 7,
            rhs: 3,
            h: 2,
            blocked: false,
        };
        assert_eq!(Key::new(&state, 4), Key(3 + 2 + 4, 3));
    }

    #[test]
    fn key_saturates_at_infinity() {
        let state = CellState::default();
        assert_eq!(Key::new(&state, 10), Key(INFINITY, INFINITY));
    }
}
