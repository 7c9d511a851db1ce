//! Indexed min-heap of uncollapsed cells keyed by entropy
//!
//! Ordering is by entropy, then by cell index, so the traversal is fully
//! determined by the seed. Every cell appears at most once; a position table
//! gives O(log n) key updates and removal by cell index.

use std::cmp::Ordering;

/// Entropy of a cell no propagation has touched yet
///
/// Positive infinity orders after every entropy a real distribution can have,
/// so untouched cells are only picked once no touched cell remains.
pub const UNTOUCHED_ENTROPY: f64 = f64::INFINITY;

/// Queue entry for one uncollapsed cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueEntry {
    /// Current Shannon entropy of the cell, or [`UNTOUCHED_ENTROPY`]
    pub entropy: f64,
    /// Row-major cell index
    pub cell: usize,
}

impl QueueEntry {
    /// Total order by entropy, then cell index
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        self.entropy
            .total_cmp(&other.entropy)
            .then_with(|| self.cell.cmp(&other.cell))
    }
}

/// Priority queue supporting decrease/increase-key and delete by cell
#[derive(Debug, Clone, Default)]
pub struct EntropyQueue {
    heap: Vec<QueueEntry>,
    positions: Vec<Option<usize>>,
}

impl EntropyQueue {
    /// Queue holding cells `0..cells`, all at [`UNTOUCHED_ENTROPY`]
    pub fn untouched(cells: usize) -> Self {
        // Equal keys in ascending cell order already satisfy the heap property
        let heap = (0..cells)
            .map(|cell| QueueEntry {
                entropy: UNTOUCHED_ENTROPY,
                cell,
            })
            .collect();
        let positions = (0..cells).map(Some).collect();
        Self { heap, positions }
    }

    /// Number of queued cells
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no cells are queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether the cell is queued
    pub fn contains(&self, cell: usize) -> bool {
        self.position(cell).is_some()
    }

    /// Queued entropy of a cell
    pub fn entropy_of(&self, cell: usize) -> Option<f64> {
        self.position(cell)
            .and_then(|pos| self.heap.get(pos))
            .map(|entry| entry.entropy)
    }

    /// Lowest-priority entry without removing it
    pub fn peek(&self) -> Option<QueueEntry> {
        self.heap.first().copied()
    }

    /// Entry stored at an arbitrary heap slot
    ///
    /// Slots `0..len()` cover every queued cell exactly once, which makes this
    /// suitable for uniform random picks.
    pub fn entry_at(&self, slot: usize) -> Option<QueueEntry> {
        self.heap.get(slot).copied()
    }

    /// Remove and return the lowest entry
    pub fn pop(&mut self) -> Option<QueueEntry> {
        let cell = self.peek()?.cell;
        self.remove(cell)
    }

    /// Change a queued cell's entropy in place
    ///
    /// Returns `false` if the cell is not queued.
    pub fn update(&mut self, cell: usize, entropy: f64) -> bool {
        let Some(slot) = self.position(cell) else {
            return false;
        };
        if let Some(entry) = self.heap.get_mut(slot) {
            entry.entropy = entropy;
        }
        self.restore(slot);
        true
    }

    /// Remove a cell from the queue, returning its entry
    pub fn remove(&mut self, cell: usize) -> Option<QueueEntry> {
        let slot = self.position(cell)?;
        let last = self.heap.len().checked_sub(1)?;
        self.swap(slot, last);
        let removed = self.heap.pop()?;
        self.set_position(removed.cell, None);
        if slot < self.heap.len() {
            self.restore(slot);
        }
        Some(removed)
    }

    /// Iterate over queued entries in heap order
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.heap.iter()
    }

    fn position(&self, cell: usize) -> Option<usize> {
        self.positions.get(cell).copied().flatten()
    }

    fn set_position(&mut self, cell: usize, slot: Option<usize>) {
        if let Some(position) = self.positions.get_mut(cell) {
            *position = slot;
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        match (self.heap.get(a), self.heap.get(b)) {
            (Some(lhs), Some(rhs)) => lhs.priority_cmp(rhs) == Ordering::Less,
            _ => false,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        if let Some(cell) = self.heap.get(a).map(|entry| entry.cell) {
            self.set_position(cell, Some(a));
        }
        if let Some(cell) = self.heap.get(b).map(|entry| entry.cell) {
            self.set_position(cell, Some(b));
        }
    }

    fn restore(&mut self, slot: usize) {
        if slot > 0 && self.less(slot, (slot - 1) / 2) {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < self.heap.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
