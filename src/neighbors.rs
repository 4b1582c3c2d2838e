//! Movement directions and distance heuristics for the Grid.

use crate::{Cost, Point};
use std::fmt;

use self::Dir::*;

/// The 8 compass moves available to the agent.
///
/// [`Dir::all`] enumerates the directions in a fixed order. That order is the
/// tie-break everywhere several moves are equally good: path extraction and
/// stepping take the first qualifying direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    /// `(0, -1)`
    Up = 0,
    /// `(1, -1)`
    UpRight,
    /// `(1, 0)`
    Right,
    /// `(1, 1)`
    DownRight,
    /// `(0, 1)`
    Down,
    /// `(-1, 1)`
    DownLeft,
    /// `(-1, 0)`
    Left,
    /// `(-1, -1)`
    UpLeft,
}

const UNIT_CIRCLE: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

impl Dir {
    /// All directions in enumeration order.
    pub fn all() -> std::iter::Copied<std::slice::Iter<'static, Dir>> {
        [Up, UpRight, Right, DownRight, Down, DownLeft, Left, UpLeft]
            .iter()
            .copied()
    }

    /// The `(dx, dy)` offset of this move.
    pub fn offset(self) -> (isize, isize) {
        UNIT_CIRCLE[self as usize]
    }

    /// Applies this move to `pos` on a `width x height` Grid.
    ///
    /// `None` if the move would leave the Grid.
    pub fn apply(self, pos: Point, width: usize, height: usize) -> Option<Point> {
        let (dx, dy) = self.offset();
        let x = pos.0 as isize + dx;
        let y = pos.1 as isize + dy;
        if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{:?}", self)
    }
}

/// Named distance estimates between two Grid points.
///
/// The planner requires a heuristic that is admissible and consistent with
/// respect to the uniform edge cost. With 8-directional movement that is
/// [`Heuristic::Chebyshev`] (or the trivial [`Heuristic::Zero`]); the others
/// are kept in the table for 4-directional experiments and overestimate
/// diagonal-heavy routes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// `|dx| + |dy|`
    Manhattan,
    /// `max(|dx|, |dy|)`
    Chebyshev,
    /// `sqrt(dx^2 + dy^2)`, truncated
    Euclidean,
    /// Always 0; degrades the search to Dijkstra ordering.
    Zero,
}

impl Heuristic {
    /// Looks a heuristic up by name: `"manhattan"`, `"chebyshev"`,
    /// `"euclidean"` or `"zero"`.
    pub fn from_name(name: &str) -> Option<Heuristic> {
        match name {
            "manhattan" => Some(Heuristic::Manhattan),
            "chebyshev" => Some(Heuristic::Chebyshev),
            "euclidean" => Some(Heuristic::Euclidean),
            "zero" => Some(Heuristic::Zero),
            _ => None,
        }
    }

    /// The estimated distance from `a` to `b`.
    pub fn estimate(self, a: Point, b: Point) -> Cost {
        let dx = a.0.abs_diff(b.0);
        let dy = a.1.abs_diff(b.1);
        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Chebyshev => dx.max(dy),
            Heuristic::Euclidean => ((dx * dx + dy * dy) as f64).sqrt() as Cost,
            Heuristic::Zero => 0,
        }
    }
}

#[test]
fn test_dir_order_is_fixed() {
    let offsets: Vec<_> = Dir::all().map(Dir::offset).collect();
    assert_eq!(offsets, UNIT_CIRCLE);
}

#[test]
fn test_dir_apply_bounds() {
    assert_eq!(Up.apply((0, 0), 5, 5), None);
    assert_eq!(UpLeft.apply((0, 3), 5, 5), None);
    assert_eq!(DownRight.apply((4, 4), 5, 5), None);
    assert_eq!(DownRight.apply((3, 3), 5, 5), Some((4, 4)));
}

#[test]
fn test_heuristic_estimates() {
    assert_eq!(Heuristic::Manhattan.estimate((3, 1), (0, 0)), 3 + 1);
    assert_eq!(Heuristic::Chebyshev.estimate((3, 1), (0, 0)), 3);
    assert_eq!(Heuristic::Euclidean.estimate((3, 4), (0, 0)), 5);
    assert_eq!(Heuristic::Zero.estimate((3, 1), (0, 0)), 0);
}

#[test]
fn test_heuristic_table_lookup() {
    assert_eq!(Heuristic::from_name("chebyshev"), Some(Heuristic::Chebyshev));
    assert_eq!(Heuristic::from_name("octile"), None);
}
