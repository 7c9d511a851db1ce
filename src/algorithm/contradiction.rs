//! Bookkeeping for contradictions resolved during propagation
//!
//! A contradiction happens when a neighbor's combined distribution loses all
//! probability mass. It never aborts generation: the neighbor is reset to a
//! uniform distribution and the event is logged and counted here.

use crate::spatial::Direction;

/// One resolved contradiction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    /// Cell whose distribution was reset
    pub cell: usize,
    /// Collapsed cell whose constraint caused it
    pub source: usize,
    /// Direction from the source to the reset cell
    pub direction: Direction,
}

/// Contradictions observed during one generation
#[derive(Debug, Clone, Default)]
pub struct ContradictionLog {
    events: Vec<Contradiction>,
}

impl ContradictionLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a resolved contradiction
    pub fn record(&mut self, contradiction: Contradiction) {
        log::debug!(
            "contradiction at cell {} from cell {} ({}); reset to uniform",
            contradiction.cell,
            contradiction.source,
            contradiction.direction.label()
        );
        self.events.push(contradiction);
    }

    /// Number of contradictions so far
    pub fn count(&self) -> usize {
        self.events.len()
    }

    /// Whether none occurred
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All recorded contradictions in occurrence order
    pub fn events(&self) -> &[Contradiction] {
        &self.events
    }

    /// Whether a given cell was ever reset
    pub fn involves(&self, cell: usize) -> bool {
        self.events.iter().any(|event| event.cell == cell)
    }
}
