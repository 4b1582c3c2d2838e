//! A sequence of moves together with its total cost.

use crate::Cost;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

/// An extracted Path: the moves to perform, in order, plus the total cost.
///
/// On the uniform-cost Grid the cost equals the number of moves, but callers
/// should rely on [`Path::cost`] rather than [`Path::len`] for comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<P> {
    steps: Vec<P>,
    cost: Cost,
}

impl<P> Path<P> {
    pub(crate) fn new(steps: Vec<P>, cost: Cost) -> Path<P> {
        Path { steps, cost }
    }

    /// The total cost of walking this Path.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The number of moves.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` for the zero-move Path (start equals goal).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates over the moves in walking order.
    pub fn iter(&self) -> std::slice::Iter<P> {
        self.steps.iter()
    }
}

impl<P> Index<usize> for Path<P> {
    type Output = P;
    fn index(&self, index: usize) -> &P {
        &self.steps[index]
    }
}

impl<'a, P> IntoIterator for &'a Path<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;
    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl<P: PartialEq> PartialEq<Vec<P>> for Path<P> {
    fn eq(&self, rhs: &Vec<P>) -> bool {
        self.steps == *rhs
    }
}

impl<'a, P: PartialEq> PartialEq<&'a [P]> for Path<P> {
    fn eq(&self, rhs: &&'a [P]) -> bool {
        self.steps == *rhs
    }
}

impl<P: Eq> Ord for Path<P> {
    fn cmp(&self, other: &Path<P>) -> Ordering {
        self.cost.cmp(&other.cost)
    }
}

impl<P: Eq> PartialOrd for Path<P> {
    fn partial_cmp(&self, other: &Path<P>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: fmt::Display> fmt::Display for Path<P> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {}]: ", self.cost)?;
        if self.steps.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{}", self.steps[0])?;
            for p in self.steps.iter().skip(1) {
                write!(fmt, " -> {}", p)?;
            }
            Ok(())
        }
    }
}
