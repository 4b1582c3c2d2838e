//! The OPEN set: inconsistent cells ordered by Key.

use crate::{state::Key, Point, PointMap};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry. The stored Key is the priority the cell was queued under,
/// which can fall behind the authoritative Key computed from live state.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry(Point, Key);

impl PartialOrd for Entry {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}
impl Ord for Entry {
    fn cmp(&self, rhs: &Self) -> Ordering {
        rhs.1.cmp(&self.1)
    }
}

/// Priority queue over the inconsistent cells, with lazy removal.
///
/// `BinaryHeap` has no decrease-key, so nothing is ever deleted from the heap
/// directly. A side-table records the Key each member was last queued under;
/// heap entries that disagree with it (superseded by a later insert, or
/// removed) are dead and get dropped when they surface at the top.
///
/// The stale-on-pop check that substitutes for decrease-key lives in the
/// convergence loop: a popped entry's recorded Key still has to be compared
/// against the Key recomputed from current state.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    last_keys: PointMap<Key>,
}

impl Frontier {
    /// Queues `cell` under `key`, superseding any earlier entry for it.
    pub fn insert(&mut self, cell: Point, key: Key) {
        self.heap.push(Entry(cell, key));
        self.last_keys.insert(cell, key);
    }

    /// Removes `cell` from the set. The heap entry dies lazily.
    pub fn remove(&mut self, cell: Point) {
        self.last_keys.remove(&cell);
    }

    pub fn contains(&self, cell: Point) -> bool {
        self.last_keys.contains_key(&cell)
    }

    /// Number of queued cells (not heap entries).
    pub fn len(&self) -> usize {
        self.last_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.last_keys.clear();
    }

    /// Key of the structural minimum, ignoring dead entries.
    pub fn peek_key(&mut self) -> Option<Key> {
        self.skip_dead();
        self.heap.peek().map(|entry| entry.1)
    }

    /// Removes the structural minimum and returns it with the Key it was
    /// queued under.
    pub fn pop(&mut self) -> Option<(Point, Key)> {
        self.skip_dead();
        let Entry(cell, key) = self.heap.pop()?;
        self.last_keys.remove(&cell);
        Some((cell, key))
    }

    fn skip_dead(&mut self) {
        while let Some(&Entry(cell, key)) = self.heap.peek() {
            match self.last_keys.get(&cell) {
                Some(&current) if current == key => break,
                _ => {
                    self.heap.pop();
                }
            }
        }
    }
}
