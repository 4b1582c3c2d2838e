//! Fixed-size storage of the per-cell search state.

use crate::{state::CellState, Point};

/// A `width x height` Grid of [`CellState`], indexed by [`Point`].
///
/// Bounds are fixed at construction; cells live for the lifetime of the
/// planner and are only ever mutated in place.
#[derive(Clone, Debug)]
pub struct StateGrid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl StateGrid {
    pub fn new(width: usize, height: usize) -> StateGrid {
        StateGrid {
            width,
            height,
            cells: vec![CellState::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, (x, y): Point) -> bool {
        x < self.width && y < self.height
    }

    pub fn at(&self, p: Point) -> &CellState {
        &self.cells[self.index(p)]
    }

    pub fn at_mut(&mut self, p: Point) -> &mut CellState {
        let i = self.index(p);
        &mut self.cells[i]
    }

    /// Applies `f` to every cell. Used once to seed the heuristic values.
    pub fn each_cell(&mut self, mut f: impl FnMut(Point, &mut CellState)) {
        for y in 0..self.height {
            for x in 0..self.width {
                f((x, y), &mut self.cells[y * self.width + x]);
            }
        }
    }

    fn index(&self, p: Point) -> usize {
        assert!(self.contains(p), "{:?} outside the grid", p);
        p.1 * self.width + p.0
    }
}
