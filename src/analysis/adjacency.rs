//! Directional neighbor likelihoods learned from the sample

use ndarray::{Array3, ArrayView1, Axis, s};

use crate::analysis::catalog::Catalog;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::TileGrid;
use crate::spatial::neighbors::{Direction, neighbors};

/// Treatment of (type, direction) pairs that were never observed in the sample
///
/// A learned distribution with no observations is all zero. Multiplying a
/// neighbor by it wipes out every hypothesis, which then surfaces as a
/// contradiction and a reset to uniform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnobservedPolicy {
    /// Use the all-zero distribution as learned, forbidding the relationship
    #[default]
    Forbid,
    /// Skip the all-zero distribution, leaving the neighbor unconstrained
    Ignore,
}

/// Likelihood of each neighbor type, per source type and direction
///
/// Stored as a `(types, directions, types)` array. Each lane along the last
/// axis sums to one when at least one neighbor was observed and is all zero
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyModel {
    likelihoods: Array3<f64>,
}

impl Default for AdjacencyModel {
    fn default() -> Self {
        Self {
            likelihoods: Array3::zeros((0, Direction::COUNT, 0)),
        }
    }
}

impl AdjacencyModel {
    /// Count neighbor types around every sample cell and normalize per direction
    pub fn learn(grid: &TileGrid, catalog: &Catalog) -> Self {
        let mut likelihoods = count_neighbors(grid, catalog);
        normalize_lanes(&mut likelihoods);
        Self { likelihoods }
    }

    /// Wrap an explicit `(types, 8, types)` likelihood array
    ///
    /// # Errors
    ///
    /// Returns an error if the direction axis is not eight long or the two
    /// type axes differ
    pub fn from_array(likelihoods: Array3<f64>) -> Result<Self> {
        let (types, directions, neighbor_types) = likelihoods.dim();
        if directions != Direction::COUNT || neighbor_types != types {
            return Err(invalid_parameter(
                "adjacency",
                &format!("{:?}", likelihoods.dim()),
                &format!("expected shape (types, {}, types)", Direction::COUNT),
            ));
        }
        Ok(Self { likelihoods })
    }

    /// Number of tile types the model covers
    pub fn type_count(&self) -> usize {
        self.likelihoods.dim().0
    }

    /// Expected neighbor distribution for a source type in a direction
    pub fn distribution(&self, type_index: usize, direction: Direction) -> Option<ArrayView1<'_, f64>> {
        (type_index < self.type_count())
            .then(|| self.likelihoods.slice(s![type_index, direction.index(), ..]))
    }

    /// Whether any neighbor was observed for the type in the direction
    pub fn is_observed(&self, type_index: usize, direction: Direction) -> bool {
        self.distribution(type_index, direction)
            .is_some_and(|distribution| distribution.iter().any(|&p| p > 0.0))
    }

    /// Underlying likelihood array
    pub const fn as_array(&self) -> &Array3<f64> {
        &self.likelihoods
    }
}

/// Raw neighbor counts indexed by `(type, direction, neighbor type)`
///
/// Neighbors outside the grid are skipped; rows never wrap.
pub fn count_neighbors(grid: &TileGrid, catalog: &Catalog) -> Array3<f64> {
    let types = catalog.len();
    let mut counts = Array3::zeros((types, Direction::COUNT, types));
    let (width, height) = (grid.width(), grid.height());

    for (index, label) in grid.labels().iter().enumerate() {
        let Some(type_index) = catalog.index_of(label) else {
            continue;
        };
        for (direction, neighbor) in neighbors(index, width, height) {
            let neighbor_type = grid.get(neighbor).and_then(|label| catalog.index_of(label));
            if let Some(count) = neighbor_type
                .and_then(|neighbor_type| counts.get_mut([type_index, direction.index(), neighbor_type]))
            {
                *count += 1.0;
            }
        }
    }
    counts
}

/// Scale every lane along the last axis to sum to one, leaving empty lanes at zero
pub fn normalize_lanes(counts: &mut Array3<f64>) {
    for mut lane in counts.lanes_mut(Axis(2)) {
        let sum = lane.sum();
        if sum > 0.0 {
            lane.mapv_inplace(|count| count / sum);
        }
    }
}
