//! Immutable statistics learned once from a sample grid
//!
//! A [`SampleModel`] owns the catalog, frequency table and adjacency model.
//! Generation borrows it read-only, so one model can serve any number of
//! independent (and concurrent) generation calls.

use std::fmt::Write as _;

use crate::algorithm::executor::CollapseEngine;
use crate::analysis::adjacency::AdjacencyModel;
use crate::analysis::catalog::Catalog;
use crate::analysis::statistics::FrequencyTable;
use crate::io::configuration::GenerationConfig;
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::spatial::{Direction, TileGrid};

/// Tile catalog, frequencies and directional adjacency of a sample
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleModel {
    catalog: Catalog,
    frequencies: FrequencyTable,
    adjacency: AdjacencyModel,
}

impl SampleModel {
    /// Learn all statistics from a sample grid
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyModel`] if the sample has no cells
    pub fn learn(sample: &TileGrid) -> Result<Self> {
        if sample.is_empty() {
            return Err(GenerationError::EmptyModel);
        }
        let catalog = Catalog::from_labels(sample.labels().iter().map(String::as_str));
        let frequencies = FrequencyTable::learn(sample, &catalog);
        let adjacency = AdjacencyModel::learn(sample, &catalog);

        log::debug!(
            "learned {} tile types from a {}x{} sample",
            catalog.len(),
            sample.width(),
            sample.height()
        );

        Ok(Self {
            catalog,
            frequencies,
            adjacency,
        })
    }

    /// Assemble a model from explicit tables
    ///
    /// An empty catalog is accepted; generating from it fails with
    /// [`GenerationError::EmptyModel`].
    ///
    /// # Errors
    ///
    /// Returns an error if the frequency or adjacency shapes disagree with the catalog
    pub fn from_parts(
        catalog: Catalog,
        frequencies: FrequencyTable,
        adjacency: AdjacencyModel,
    ) -> Result<Self> {
        let types = catalog.len();
        if frequencies.len() != types {
            return Err(invalid_parameter(
                "frequencies",
                &frequencies.len(),
                &format!("expected one entry per catalog type ({types})"),
            ));
        }
        if adjacency.as_array().dim() != (types, Direction::COUNT, types) {
            return Err(invalid_parameter(
                "adjacency",
                &format!("{:?}", adjacency.as_array().dim()),
                &format!("expected shape ({types}, {}, {types})", Direction::COUNT),
            ));
        }
        Ok(Self {
            catalog,
            frequencies,
            adjacency,
        })
    }

    /// Distinct labels in first-occurrence order
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Sample-wide frequency of every type
    pub const fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Directional neighbor likelihoods
    pub const fn adjacency(&self) -> &AdjacencyModel {
        &self.adjacency
    }

    /// Number of tile types
    pub fn type_count(&self) -> usize {
        self.catalog.len()
    }

    /// Generate a grid seeded from the wall clock
    ///
    /// # Errors
    ///
    /// Returns an error if the model is empty, the dimensions are invalid, or
    /// an internal invariant breaks during generation
    pub fn generate(&self, width: usize, height: usize) -> Result<TileGrid> {
        self.generate_with_config(width, height, &GenerationConfig::default())
    }

    /// Generate a grid reproducibly from a fixed seed
    ///
    /// # Errors
    ///
    /// Returns an error if the model is empty, the dimensions are invalid, or
    /// an internal invariant breaks during generation
    pub fn generate_with_seed(&self, width: usize, height: usize, seed: u64) -> Result<TileGrid> {
        self.generate_with_config(width, height, &GenerationConfig::seeded(seed))
    }

    /// Generate a grid with explicit runtime options
    ///
    /// # Errors
    ///
    /// Returns an error if the model is empty, the dimensions are invalid, or
    /// an internal invariant breaks during generation
    pub fn generate_with_config(
        &self,
        width: usize,
        height: usize,
        config: &GenerationConfig,
    ) -> Result<TileGrid> {
        let mut engine = self.engine(width, height, config)?;
        engine.run()?;
        engine.materialize()
    }

    /// Prepare a step-wise generation without running it
    ///
    /// # Errors
    ///
    /// Returns an error if the model is empty or the dimensions are invalid
    pub fn engine(
        &self,
        width: usize,
        height: usize,
        config: &GenerationConfig,
    ) -> Result<CollapseEngine<'_>> {
        CollapseEngine::new(self, width, height, config)
    }

    /// Human-readable dump of the catalog, frequencies and adjacency likelihoods
    pub fn summary(&self) -> String {
        let mut out = String::new();
        if self.catalog.is_empty() {
            out.push_str("Types: (empty)\n");
            return out;
        }

        let _ = writeln!(out, "Types:");
        for (index, label) in self.catalog.iter().enumerate() {
            let frequency = self.frequencies.get(index).unwrap_or(0.0);
            let _ = writeln!(out, "  {index}: {label} ({frequency:.4})");
        }

        let _ = writeln!(out, "Neighbour likelihoods:");
        for (index, label) in self.catalog.iter().enumerate() {
            let _ = writeln!(out, "  {label}:");
            for direction in Direction::ALL {
                let values = self
                    .adjacency
                    .distribution(index, direction)
                    .map(|distribution| {
                        distribution
                            .iter()
                            .map(|p| format!("{p:.3}"))
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                let _ = writeln!(out, "    {:>2}: [{values}]", direction.label());
            }
        }
        out
    }
}
