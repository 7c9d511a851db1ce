//! Per-cell probability distributions over the tile catalog

use bitvec::prelude::*;
use ndarray::{Array2, ArrayView1};

use crate::io::error::{Result, invariant_violation};
use crate::math::probability::{shannon_entropy, uniform};

/// Wave function of a whole output grid
///
/// One row per output cell (row-major), one column per tile type. A
/// collapsed cell holds a one-hot row and is flagged in the collapsed mask.
#[derive(Debug, Clone)]
pub struct WaveGrid {
    probabilities: Array2<f64>,
    collapsed: BitVec,
    width: usize,
    height: usize,
}

impl WaveGrid {
    /// Grid where every cell starts from the same prior distribution
    pub fn new(width: usize, height: usize, prior: &[f64]) -> Self {
        let cells = width * height;
        let types = prior.len();
        let probabilities =
            Array2::from_shape_fn((cells, types), |(_, t)| prior.get(t).copied().unwrap_or(0.0));

        Self {
            probabilities,
            collapsed: bitvec![0; cells],
            width,
            height,
        }
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.probabilities.nrows()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tile types per cell
    pub fn type_count(&self) -> usize {
        self.probabilities.ncols()
    }

    /// Distribution of a cell
    pub fn cell(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.len()).then(|| self.probabilities.row(index))
    }

    /// Distribution of a cell as an owned vector
    pub fn cell_vec(&self, index: usize) -> Option<Vec<f64>> {
        self.cell(index).map(|cell| cell.to_vec())
    }

    /// Shannon entropy of a cell
    pub fn entropy(&self, index: usize) -> Option<f64> {
        self.cell_vec(index).map(|cell| shannon_entropy(&cell))
    }

    /// Whether the cell has been collapsed
    pub fn is_collapsed(&self, index: usize) -> bool {
        self.collapsed.get(index).is_some_and(|bit| *bit)
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.collapsed.count_ones()
    }

    /// Whether every cell is collapsed
    pub fn is_fully_collapsed(&self) -> bool {
        self.collapsed.all()
    }

    /// Fix a cell to a single tile type
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the cell or type index is out of range
    pub fn collapse(&mut self, index: usize, type_index: usize) -> Result<()> {
        self.check_cell(index, "collapse")?;
        if type_index >= self.type_count() {
            return Err(invariant_violation(
                "collapse",
                &format!(
                    "type index {type_index} outside catalog of {}",
                    self.type_count()
                ),
            ));
        }

        let mut row = self.probabilities.row_mut(index);
        row.fill(0.0);
        if let Some(p) = row.get_mut(type_index) {
            *p = 1.0;
        }
        self.collapsed.set(index, true);
        Ok(())
    }

    /// Replace a cell's distribution
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the cell is out of range or the
    /// distribution length differs from the catalog size
    pub fn set_distribution(&mut self, index: usize, distribution: &[f64]) -> Result<()> {
        self.check_cell(index, "set_distribution")?;
        if distribution.len() != self.type_count() {
            return Err(invariant_violation(
                "set_distribution",
                &format!(
                    "distribution has {} entries, catalog has {}",
                    distribution.len(),
                    self.type_count()
                ),
            ));
        }
        for (p, &value) in self
            .probabilities
            .row_mut(index)
            .iter_mut()
            .zip(distribution)
        {
            *p = value;
        }
        Ok(())
    }

    /// Reset a cell to the uniform distribution over the catalog
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the cell is out of range
    pub fn reset_uniform(&mut self, index: usize) -> Result<()> {
        let distribution = uniform(self.type_count());
        self.set_distribution(index, &distribution)
    }

    /// Underlying `(cells, types)` array
    pub const fn as_array(&self) -> &Array2<f64> {
        &self.probabilities
    }

    fn check_cell(&self, index: usize, operation: &'static str) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(invariant_violation(
                operation,
                &format!("cell {index} outside wave grid of {} cells", self.len()),
            ))
        }
    }
}
