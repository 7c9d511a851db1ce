//! Sample-wide tile frequencies

use crate::analysis::catalog::Catalog;
use crate::spatial::TileGrid;

/// Relative occurrence of every catalog entry in the sample
///
/// Entries are indexed like the catalog and sum to one for any non-empty
/// sample. Used as the prior of every wave cell and for seeding draws.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    frequencies: Vec<f64>,
}

impl FrequencyTable {
    /// Count label occurrences and divide by the sample cell count
    ///
    /// Labels missing from the catalog are ignored.
    pub fn learn(grid: &TileGrid, catalog: &Catalog) -> Self {
        let counts = count_occurrences(grid, catalog);
        let total = grid.len();
        if total == 0 {
            return Self::default();
        }

        let frequencies = counts
            .into_iter()
            .map(|count| count as f64 / total as f64)
            .collect();
        Self { frequencies }
    }

    /// Wrap explicit frequencies
    pub const fn from_vec(frequencies: Vec<f64>) -> Self {
        Self { frequencies }
    }

    /// Frequency of a type index
    pub fn get(&self, type_index: usize) -> Option<f64> {
        self.frequencies.get(type_index).copied()
    }

    /// Frequencies in catalog order
    pub fn as_slice(&self) -> &[f64] {
        &self.frequencies
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Sum of all entries
    pub fn total(&self) -> f64 {
        self.frequencies.iter().sum()
    }
}

/// Number of cells carrying each catalog label
pub fn count_occurrences(grid: &TileGrid, catalog: &Catalog) -> Vec<usize> {
    let mut counts = vec![0; catalog.len()];
    for label in grid.labels() {
        if let Some(count) = catalog
            .index_of(label)
            .and_then(|index| counts.get_mut(index))
        {
            *count += 1;
        }
    }
    counts
}
